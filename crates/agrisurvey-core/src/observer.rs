use tracing::{debug, info};

use crate::config::LoggingLevel;

/// Reporting seam for the transformation stages.
///
/// Stages report progress through this trait instead of logging directly, so
/// the core stays decoupled from any particular logging mechanism. Events
/// are informational only; nothing in the pipeline branches on them.
pub trait PipelineObserver: Send + Sync {
    /// A pipeline stage finished successfully.
    fn stage_completed(&self, stage: &str);

    /// Low-severity detail, e.g. a message that matched no pattern.
    fn debug(&self, message: &str);
}

/// Forwards observer events to the `tracing` subscriber.
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn stage_completed(&self, stage: &str) {
        info!(stage, "pipeline stage completed");
    }

    fn debug(&self, message: &str) {
        debug!("{message}");
    }
}

/// Discards every event. Used when the configured logging level is NONE.
pub struct SilentObserver;

impl PipelineObserver for SilentObserver {
    fn stage_completed(&self, _stage: &str) {}

    fn debug(&self, _message: &str) {}
}

pub fn observer_for(level: LoggingLevel) -> Box<dyn PipelineObserver> {
    match level {
        LoggingLevel::None => Box::new(SilentObserver),
        _ => Box::new(TracingObserver),
    }
}
