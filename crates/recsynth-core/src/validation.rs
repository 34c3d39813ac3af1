use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::options::SynthesisOptions;
use crate::record::Field;

/// Options that passed [`validate_options`], with the index field resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedOptions {
    pub index_field: Option<Field>,
    pub max_number_copies_of_one_record: usize,
    pub num_records_desired: usize,
    pub percent_records_to_duplicate: f64,
    pub allow_duplicate_identifier: bool,
    pub seed: Option<u64>,
    pub reference_date: Option<NaiveDate>,
}

impl ValidatedOptions {
    /// Number of duplication rounds, rounding half to even.
    pub fn num_records_to_duplicate(&self) -> usize {
        let exact =
            self.num_records_desired as f64 * self.percent_records_to_duplicate / 100.0;
        exact.round_ties_even() as usize
    }
}

/// Validate synthesis options before any generation work starts.
///
/// This checks:
/// - at least one record is requested
/// - the duplication percentage is a finite value within 0..=100
/// - the index field, when given and non-blank, names a record column
pub fn validate_options(options: &SynthesisOptions) -> Result<ValidatedOptions> {
    if options.num_records_desired == 0 {
        return Err(Error::Configuration(
            "'num_records_desired' must be a positive integer".to_string(),
        ));
    }

    let percent = options.percent_records_to_duplicate;
    if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
        return Err(Error::Configuration(format!(
            "'percent_records_to_duplicate' must be between 0 and 100, got {percent}"
        )));
    }

    let index_field = options
        .index_field_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(Field::parse)
        .transpose()?;

    Ok(ValidatedOptions {
        index_field,
        max_number_copies_of_one_record: options.max_number_copies_of_one_record,
        num_records_desired: options.num_records_desired,
        percent_records_to_duplicate: percent,
        allow_duplicate_identifier: options.allow_duplicate_identifier,
        seed: options.seed,
        reference_date: options.reference_date,
    })
}
