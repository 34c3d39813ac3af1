use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

use recsynth_core::SynthesisOptions;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionOverrides {
    pub num_records_desired: Option<usize>,
    pub percent_records_to_duplicate: Option<f64>,
    pub max_number_copies_of_one_record: Option<usize>,
    pub index_field_name: Option<String>,
    pub allow_duplicate_identifier: Option<bool>,
    pub seed: Option<u64>,
    pub reference_date: Option<NaiveDate>,
}

impl OptionOverrides {
    pub fn apply(self, options: &mut SynthesisOptions) {
        if let Some(records) = self.num_records_desired {
            options.num_records_desired = records;
        }
        if let Some(percent) = self.percent_records_to_duplicate {
            options.percent_records_to_duplicate = percent;
        }
        if let Some(max_copies) = self.max_number_copies_of_one_record {
            options.max_number_copies_of_one_record = max_copies;
        }
        if self.index_field_name.is_some() {
            options.index_field_name = self.index_field_name;
        }
        if let Some(allow) = self.allow_duplicate_identifier {
            options.allow_duplicate_identifier = allow;
        }
        if self.seed.is_some() {
            options.seed = self.seed;
        }
        if self.reference_date.is_some() {
            options.reference_date = self.reference_date;
        }
    }
}

/// Options from `path` (defaults when absent) with `overrides` applied.
pub fn resolve_options(
    path: Option<&Path>,
    overrides: OptionOverrides,
) -> Result<SynthesisOptions, ConfigError> {
    let mut options = match path {
        Some(path) => load_options(path)?,
        None => SynthesisOptions::default(),
    };
    overrides.apply(&mut options);
    Ok(options)
}

pub fn load_options(path: &Path) -> Result<SynthesisOptions, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
