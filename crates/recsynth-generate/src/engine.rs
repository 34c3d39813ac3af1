use std::collections::HashMap;
use std::time::Instant;

use chrono::Local;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use recsynth_core::{Error, Field, RecordSet, SynthesisOptions, ValidatedOptions, validate_options};

use crate::duplicate::{DuplicationContext, DuplicationEngine, NicknameQueue};
use crate::errors::GenerationError;
use crate::factory::RecordFactory;
use crate::identity::IdentityAllocator;
use crate::lookup::{NicknameLookup, StateNameLookup};
use crate::model::GenerationReport;
use crate::provider::{AttributeProvider, FakerProvider};

/// Result of a synthesis run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub records: RecordSet,
    pub report: GenerationReport,
}

/// Entry point for synthesizing a record set with duplicates.
pub struct DatasetAssembler {
    options: SynthesisOptions,
    provider: Box<dyn AttributeProvider>,
    nicknames: NicknameLookup,
    states: StateNameLookup,
    run_id: Option<String>,
}

impl DatasetAssembler {
    pub fn new(options: SynthesisOptions) -> Self {
        Self {
            options,
            provider: Box::new(FakerProvider::new()),
            nicknames: NicknameLookup::builtin(),
            states: StateNameLookup::new(),
            run_id: None,
        }
    }

    pub fn with_provider(mut self, provider: Box<dyn AttributeProvider>) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_nicknames(mut self, nicknames: NicknameLookup) -> Self {
        self.nicknames = nicknames;
        self
    }

    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = Some(run_id.into());
        self
    }

    pub fn options(&self) -> &SynthesisOptions {
        &self.options
    }

    /// Synthesize base records, then append duplicate variants.
    ///
    /// Options are validated before any study id is drawn, so a rejected
    /// configuration produces no rows.
    pub fn run(&self) -> Result<GenerationResult, GenerationError> {
        let validated = validate_options(&self.options).inspect_err(|err| {
            warn!(error = %err, "rejected synthesis options");
        })?;

        let start = Instant::now();
        let seed = validated.seed.unwrap_or_else(|| rand::rng().random());
        let today = validated
            .reference_date
            .unwrap_or_else(|| Local::now().date_naive());
        let run_id = self
            .run_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut report = GenerationReport::new(run_id.clone(), seed, today);

        info!(
            run_id = %run_id,
            seed,
            reference_date = %today,
            records = validated.num_records_desired,
            percent_to_duplicate = validated.percent_records_to_duplicate,
            max_copies = validated.max_number_copies_of_one_record,
            allow_duplicate_identifier = validated.allow_duplicate_identifier,
            "synthesis started"
        );

        let mut allocator = IdentityAllocator::default();
        let study_ids = allocator.allocate_batch(validated.num_records_desired, &mut rng)?;

        info!(records = study_ids.len(), "generating base records");
        let factory = RecordFactory::new(self.provider.as_ref(), today)?;
        let mut records = RecordSet::with_capacity(study_ids.len());
        for study_id in study_ids {
            records.push(factory.create(study_id, &mut rng))?;
        }
        report.base_records = records.len() as u64;

        self.append_duplicates(&validated, &mut records, &mut allocator, &mut rng, &mut report)?;

        if let Some(field) = validated.index_field {
            records.set_index(field)?;
            report.index_field = Some(field.to_string());
        }

        report.rows_total = records.len() as u64;
        report.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            run_id = %run_id,
            rows = report.rows_total,
            variants = report.variants_generated,
            duration_ms = report.duration_ms,
            "synthesis completed"
        );

        Ok(GenerationResult { records, report })
    }

    fn append_duplicates(
        &self,
        validated: &ValidatedOptions,
        records: &mut RecordSet,
        allocator: &mut IdentityAllocator,
        rng: &mut ChaCha8Rng,
        report: &mut GenerationReport,
    ) -> Result<(), GenerationError> {
        let base_count = records.len();
        let num_to_duplicate = validated.num_records_to_duplicate();
        info!(records = num_to_duplicate, "selecting records to duplicate");
        if num_to_duplicate == 0 || base_count == 0 {
            return Ok(());
        }

        let engine = DuplicationEngine::new(validated.allow_duplicate_identifier);
        let mut max_mrn = records.max_int(Field::Mrn).unwrap_or(0);
        let mut nickname_queues: HashMap<usize, NicknameQueue> = HashMap::new();

        for _ in 0..num_to_duplicate {
            let selected = rng.random_range(0..base_count);
            let source = records
                .get(selected)
                .map(|row| row.record.clone())
                .ok_or_else(|| Error::Configuration(format!("no record at row {selected}")))?;

            // One queue per source row for the whole run.
            let nicknames = nickname_queues.entry(selected).or_insert_with(|| {
                let alternates = source
                    .text(Field::FirstName)
                    .and_then(|name| self.nicknames.get(name));
                NicknameQueue::new(alternates, &mut *rng)
            });
            let full_state_name = source
                .text(Field::State)
                .map(|code| self.states.full_name(code).to_string())
                .unwrap_or_default();

            let copies = match validated.max_number_copies_of_one_record {
                0 => 1,
                max => rng.random_range(1..=max),
            };
            report.record_source();
            info!(row = selected, copies, "duplicating record");

            for _ in 0..copies {
                let mut ctx = DuplicationContext {
                    allocator: &mut *allocator,
                    provider: self.provider.as_ref(),
                    max_mrn,
                };
                let variant =
                    engine.duplicate(&source, nicknames, &full_state_name, &mut ctx, rng)?;

                if let Some(mrn) = variant.record.int(Field::Mrn) {
                    max_mrn = max_mrn.max(mrn);
                }
                report.record_variant(&variant.decisions);
                let position = records.push(variant.record)?;
                debug!(source = selected, position, "appended duplicate");
            }
        }

        Ok(())
    }
}
