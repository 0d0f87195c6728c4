use polars::prelude::*;
use regex::Regex;

use crate::error::{PipelineError, Result};
use crate::field_corrections::ensure_column;
use crate::observer::PipelineObserver;

/// Column holding the free-text log entry in the weather message table.
pub const MESSAGE_COLUMN: &str = "Message";
/// Output column for the extracted measurement kind.
pub const MEASUREMENT_COLUMN: &str = "Measurement";
/// Output column for the extracted numeric value.
pub const VALUE_COLUMN: &str = "Value";

/// One entry of the ordered pattern list: a measurement kind and the
/// compiled expression that recognizes it in free text.
///
/// Construction validates the pattern eagerly; a pattern that does not
/// compile or has no capturing group is a configuration bug.
#[derive(Debug, Clone)]
pub struct MeasurementMatcher {
    pub kind: String,
    regex: Regex,
}

impl MeasurementMatcher {
    pub fn new(kind: String, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| PipelineError::InvalidPattern {
            kind: kind.clone(),
            source,
        })?;
        // captures_len counts the implicit whole-match group.
        if regex.captures_len() < 2 {
            return Err(PipelineError::PatternWithoutCapture { kind });
        }
        Ok(Self { kind, regex })
    }
}

/// Extract a `(kind, value)` pair from one message.
///
/// Patterns are tested in list order and the first match wins. The value is
/// the first non-null capture group of that match, parsed as a float. A
/// message matching no pattern yields `None`, an expected outcome rather
/// than an error. A matched pattern that captures nothing, or captures
/// non-numeric text, is a configuration error and fails loudly.
pub fn extract_measurement<'a>(
    patterns: &'a [MeasurementMatcher],
    message: &str,
) -> Result<Option<(&'a str, f64)>> {
    for matcher in patterns {
        let Some(captures) = matcher.regex.captures(message) else {
            continue;
        };

        let capture = captures
            .iter()
            .skip(1)
            .flatten()
            .next()
            .ok_or_else(|| PipelineError::CaptureMissing {
                kind: matcher.kind.clone(),
            })?;

        let value = capture.as_str().parse::<f64>().map_err(|_| {
            PipelineError::NonNumericCapture {
                kind: matcher.kind.clone(),
                captured: capture.as_str().to_string(),
            }
        })?;

        return Ok(Some((matcher.kind.as_str(), value)));
    }

    Ok(None)
}

/// Run extraction over every message row, appending `Measurement` and
/// `Value` columns. Exactly one pair per input row, in input order; rows
/// whose message matches nothing (or is null) get a null pair.
pub fn extract_measurements(
    df: &DataFrame,
    patterns: &[MeasurementMatcher],
    observer: &dyn PipelineObserver,
) -> Result<DataFrame> {
    if df.height() == 0 {
        return Err(PipelineError::EmptyInput {
            stage: "measurement extraction",
        });
    }
    ensure_column(df, MESSAGE_COLUMN)?;

    let messages = df.column(MESSAGE_COLUMN)?.str()?;

    let mut kinds: Vec<Option<&str>> = Vec::with_capacity(df.height());
    let mut values: Vec<Option<f64>> = Vec::with_capacity(df.height());

    for idx in 0..df.height() {
        match messages.get(idx) {
            Some(message) => match extract_measurement(patterns, message)? {
                Some((kind, value)) => {
                    kinds.push(Some(kind));
                    values.push(Some(value));
                }
                None => {
                    observer.debug("no measurement pattern matched message");
                    kinds.push(None);
                    values.push(None);
                }
            },
            None => {
                observer.debug("null message row, no measurement extracted");
                kinds.push(None);
                values.push(None);
            }
        }
    }

    let mut output = df.clone();
    let mut columns = [
        Series::new(MEASUREMENT_COLUMN.into(), kinds).into(),
        Series::new(VALUE_COLUMN.into(), values).into(),
    ];
    output.hstack_mut(columns.as_mut_slice())?;

    Ok(output)
}
