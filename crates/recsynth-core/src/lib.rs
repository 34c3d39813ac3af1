//! Core contracts for recsynth.
//!
//! This crate defines the patient record model, the fixed field schema, the
//! synthesis options and their validation, and the error taxonomy shared by
//! the generator and the CLI.

pub mod error;
pub mod options;
pub mod record;
pub mod validation;

pub use error::{Error, Result};
pub use options::SynthesisOptions;
pub use record::{Field, FieldValue, Record, RecordSet, Row, RowKey};
pub use validation::{ValidatedOptions, validate_options};

/// Inclusive lower bound of the study id pool.
pub const MIN_STUDY_ID: u32 = 10_000;
/// Exclusive upper bound of the study id pool.
pub const MAX_STUDY_ID: u32 = 99_999;
