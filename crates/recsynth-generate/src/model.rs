use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::duplicate::DuplicationDecisions;

/// Report for a synthesis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub seed: u64,
    pub reference_date: NaiveDate,
    pub index_field: Option<String>,
    pub base_records: u64,
    pub sources_selected: u64,
    pub variants_generated: u64,
    pub rows_total: u64,
    pub study_ids_reassigned: u64,
    pub study_ids_kept: u64,
    pub nicknames_used: u64,
    pub states_expanded: u64,
    pub mrns_reassigned: u64,
    pub date_layouts: BTreeMap<String, u64>,
    pub duration_ms: u64,
}

impl GenerationReport {
    pub fn new(run_id: String, seed: u64, reference_date: NaiveDate) -> Self {
        Self {
            run_id,
            seed,
            reference_date,
            index_field: None,
            base_records: 0,
            sources_selected: 0,
            variants_generated: 0,
            rows_total: 0,
            study_ids_reassigned: 0,
            study_ids_kept: 0,
            nicknames_used: 0,
            states_expanded: 0,
            mrns_reassigned: 0,
            date_layouts: BTreeMap::new(),
            duration_ms: 0,
        }
    }

    pub fn record_source(&mut self) {
        self.sources_selected += 1;
    }

    pub fn record_variant(&mut self, decisions: &DuplicationDecisions) {
        self.variants_generated += 1;
        if decisions.new_study_id.is_some() {
            self.study_ids_reassigned += 1;
        } else {
            self.study_ids_kept += 1;
        }
        if decisions.nickname.is_some() {
            self.nicknames_used += 1;
        }
        if decisions.state_expanded {
            self.states_expanded += 1;
        }
        if decisions.new_mrn.is_some() {
            self.mrns_reassigned += 1;
        }
        *self
            .date_layouts
            .entry(decisions.date_layout.as_str().to_string())
            .or_insert(0) += 1;
    }
}
