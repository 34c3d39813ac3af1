use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use tracing::debug;

use recsynth_core::{Error, Field, Record, Result};

use crate::dates::{DateLayout, parse_any};
use crate::email::synthesize_email;
use crate::identity::IdentityAllocator;
use crate::provider::AttributeProvider;

pub const PROBABILITY_OF_NEW_STUDY_ID: f64 = 0.80;
pub const PROBABILITY_OF_NICKNAME: f64 = 0.33;
pub const PROBABILITY_OF_FULL_STATE_NAME: f64 = 0.33;
pub const PROBABILITY_OF_NEW_MRN: f64 = 0.20;

/// Fields a record needs before it can be duplicated.
const REQUIRED_FIELDS: [Field; 6] = [
    Field::StudyId,
    Field::FirstName,
    Field::LastName,
    Field::Dob,
    Field::State,
    Field::Mrn,
];

/// Per-axis trigger probabilities for one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DuplicationPolicy {
    new_study_id: f64,
    nickname: f64,
    full_state_name: f64,
    new_mrn: f64,
}

impl DuplicationPolicy {
    fn new(allow_duplicate_identifier: bool) -> Self {
        Self {
            new_study_id: if allow_duplicate_identifier {
                PROBABILITY_OF_NEW_STUDY_ID
            } else {
                1.0
            },
            nickname: PROBABILITY_OF_NICKNAME,
            full_state_name: PROBABILITY_OF_FULL_STATE_NAME,
            new_mrn: PROBABILITY_OF_NEW_MRN,
        }
    }

    pub fn new_study_id(&self) -> f64 {
        self.new_study_id
    }

    pub fn nickname(&self) -> f64 {
        self.nickname
    }

    pub fn full_state_name(&self) -> f64 {
        self.full_state_name
    }

    pub fn new_mrn(&self) -> f64 {
        self.new_mrn
    }
}

/// Nicknames still available to copies of one source record.
///
/// Built once per selected source and handed to every copy made from it, so
/// no two copies get the same nickname until the queue runs dry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NicknameQueue {
    names: VecDeque<String>,
}

impl NicknameQueue {
    /// Shuffle `nicknames` into a queue; `None` yields an empty queue.
    pub fn new(nicknames: Option<Vec<String>>, rng: &mut dyn RngCore) -> Self {
        let mut names = nicknames.unwrap_or_default();
        names.shuffle(rng);
        Self {
            names: names.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Next nickname in title case.
    pub fn pop(&mut self) -> Option<String> {
        self.names.pop_front().map(|name| title_case(&name))
    }
}

/// Shared dataset state a duplicate is made against.
pub struct DuplicationContext<'a> {
    pub allocator: &'a mut IdentityAllocator,
    pub provider: &'a dyn AttributeProvider,
    /// Highest MRN in the dataset so far.
    pub max_mrn: i64,
}

/// Outcome of each mutation axis for one duplicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicationDecisions {
    pub new_study_id: Option<u32>,
    pub nickname: Option<String>,
    pub state_expanded: bool,
    pub date_layout: DateLayout,
    pub new_mrn: Option<i64>,
}

/// A duplicate record together with the decisions that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateVariant {
    pub record: Record,
    pub decisions: DuplicationDecisions,
}

/// Produces copies of a record that look like the same person entered again.
#[derive(Debug, Clone)]
pub struct DuplicationEngine {
    policy: DuplicationPolicy,
}

impl DuplicationEngine {
    /// With `allow_duplicate_identifier` off every copy gets a fresh study id.
    pub fn new(allow_duplicate_identifier: bool) -> Self {
        Self {
            policy: DuplicationPolicy::new(allow_duplicate_identifier),
        }
    }

    pub fn policy(&self) -> &DuplicationPolicy {
        &self.policy
    }

    /// Build one variant of `source`.
    ///
    /// Each axis is an independent trial: new study id, nickname from
    /// `nicknames`, `full_state_name` in place of the code, birthdate layout,
    /// regenerated email, and `max_mrn + 1` as MRN. The source is left
    /// untouched; a malformed source fails before any shared state changes.
    pub fn duplicate(
        &self,
        source: &Record,
        nicknames: &mut NicknameQueue,
        full_state_name: &str,
        ctx: &mut DuplicationContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<DuplicateVariant> {
        if let Some(field) = REQUIRED_FIELDS.iter().find(|field| !source.contains(**field)) {
            return Err(Error::Configuration(format!(
                "record to duplicate is missing field '{field}'"
            )));
        }
        let first_name = source.require_text(Field::FirstName)?;
        let surname = source.require_text(Field::LastName)?;
        let dob = source.require_text(Field::Dob)?;
        let (birthdate, _) = parse_any(dob).ok_or_else(|| {
            Error::Configuration(format!("record to duplicate has unreadable dob '{dob}'"))
        })?;

        let new_study_id = if rng.random_bool(self.policy.new_study_id) {
            Some(ctx.allocator.allocate_unique(rng)?)
        } else {
            None
        };

        let nickname = if !nicknames.is_empty() && rng.random_bool(self.policy.nickname) {
            nicknames.pop()
        } else {
            None
        };

        let state_expanded = rng.random_bool(self.policy.full_state_name);
        let date_layout = DateLayout::ALL[rng.random_range(0..DateLayout::ALL.len())];

        let given_name = nickname.as_deref().unwrap_or(first_name);
        let domain = ctx.provider.free_email_domain(rng);
        let email_address = synthesize_email(given_name, surname, &domain, rng);

        let new_mrn = if rng.random_bool(self.policy.new_mrn) {
            Some(ctx.max_mrn + 1)
        } else {
            None
        };

        let mut record = source.clone();
        if let Some(study_id) = new_study_id {
            record.set(Field::StudyId, study_id);
        }
        if let Some(nickname) = &nickname {
            record.set(Field::FirstName, nickname.as_str());
        }
        if state_expanded {
            record.set(Field::State, full_state_name);
        }
        record.set(Field::Dob, date_layout.render(birthdate));
        record.set(Field::EmailAddress, email_address);
        if let Some(mrn) = new_mrn {
            record.set(Field::Mrn, mrn);
        }

        debug!(
            new_study_id = ?new_study_id,
            nickname = ?nickname,
            state_expanded,
            date_layout = %date_layout,
            new_mrn = ?new_mrn,
            "duplicated record"
        );

        Ok(DuplicateVariant {
            record,
            decisions: DuplicationDecisions {
                new_study_id,
                nickname,
                state_expanded,
                date_layout,
                new_mrn,
            },
        })
    }
}

/// Upper-case the first letter of each word, lower-case the rest.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_word_start = true;
    for ch in name.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}
