pub mod config;
pub mod error;
pub mod field_corrections;
pub mod measurement_extractor;
pub mod observer;
pub mod pipelines;
pub mod station_enricher;
pub mod station_means;
pub mod validation;
