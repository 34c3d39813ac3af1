use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_NUM_RECORDS_DESIRED: usize = 100;
pub const DEFAULT_PERCENT_RECORDS_TO_DUPLICATE: f64 = 3.0;
pub const DEFAULT_MAX_NUMBER_COPIES_OF_ONE_RECORD: usize = 3;

/// Options for one synthesis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct SynthesisOptions {
    /// Column used to key the output rows instead of the row position.
    /// Blank means row positions.
    pub index_field_name: Option<String>,
    /// Upper bound of copies made per selected record; 0 means exactly one.
    pub max_number_copies_of_one_record: usize,
    /// Number of base records to synthesize.
    pub num_records_desired: usize,
    /// Share of base records (0-100) selected for duplication.
    pub percent_records_to_duplicate: f64,
    /// Let duplicates keep the study id of their source record.
    #[serde(alias = "duplicate_study_id")]
    pub allow_duplicate_identifier: bool,
    /// Seed for the run's random source. Drawn at random when absent.
    pub seed: Option<u64>,
    /// Date treated as "today". Defaults to the local date.
    pub reference_date: Option<NaiveDate>,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            index_field_name: None,
            max_number_copies_of_one_record: DEFAULT_MAX_NUMBER_COPIES_OF_ONE_RECORD,
            num_records_desired: DEFAULT_NUM_RECORDS_DESIRED,
            percent_records_to_duplicate: DEFAULT_PERCENT_RECORDS_TO_DUPLICATE,
            allow_duplicate_identifier: true,
            seed: None,
            reference_date: None,
        }
    }
}
