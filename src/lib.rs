//! BMI ETL Library
//!
//! A Rust library for merging height/weight records held in CSV, JSON-lines
//! and XML files into a single metric CSV file.
//!
//! This library provides tools for:
//! - Discovering source files by extension in a fixed format order
//! - Reading each format into one `name`, `height`, `weight` dataset
//! - Coercing and converting inches to metres and pounds to kilograms
//! - Writing the result as CSV, overwriting previous output
//! - Appending timestamped phase boundaries to a progress log

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod processor;
pub mod progress_log;

// Re-export commonly used types
pub use config::EtlConfig;
pub use error::{EtlError, Result};
pub use models::{Dataset, JobStats, SourceFormat};
pub use processor::EtlPipeline;
pub use progress_log::{ProgressEvent, ProgressLogger};
