#![forbid(unsafe_code)]

//! Core domain model and logic for the BMI simulator.
//!
//! This crate provides:
//! - Domain types (measurements, categories, results, history records)
//! - Unit normalization and BMI classification
//! - The form model with its field ranges
//! - The in-memory session history and its CSV export
//! - The gauge model drawn next to a result

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod units;
pub mod classify;
pub mod form;
pub mod history;
pub mod session;
pub mod gauge;

// Re-export commonly used types
pub use error::{DomainError, Error, Result};
pub use types::*;
pub use config::Config;
pub use units::normalize;
pub use classify::classify;
pub use form::{FieldBounds, MeasurementForm};
pub use history::{HistoryOrder, SessionHistory};
pub use session::{Session, Submission};
pub use gauge::Gauge;
