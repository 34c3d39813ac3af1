#![allow(dead_code)]

use chrono::NaiveDate;
use rand::RngCore;

use recsynth_core::{Field, Record};
use recsynth_generate::AttributeProvider;

/// Provider with fixed string attributes; dates and integers stay random.
pub struct StubProvider {
    pub first_name: &'static str,
    pub state: &'static str,
}

impl Default for StubProvider {
    fn default() -> Self {
        Self {
            first_name: "Elizabeth",
            state: "CA",
        }
    }
}

impl AttributeProvider for StubProvider {
    fn first_name(&self, _rng: &mut dyn RngCore) -> String {
        self.first_name.to_string()
    }

    fn last_name(&self, _rng: &mut dyn RngCore) -> String {
        "Smith".to_string()
    }

    fn phone_number(&self, _rng: &mut dyn RngCore) -> String {
        "555-123-4567x890".to_string()
    }

    fn street_address(&self, _rng: &mut dyn RngCore) -> String {
        "1 Main Street".to_string()
    }

    fn city(&self, _rng: &mut dyn RngCore) -> String {
        "Springfield".to_string()
    }

    fn state_abbr(&self, _include_territories: bool, _rng: &mut dyn RngCore) -> String {
        self.state.to_string()
    }

    fn zipcode_in_state(&self, _state: &str, _rng: &mut dyn RngCore) -> String {
        "90001".to_string()
    }

    fn free_email_domain(&self, _rng: &mut dyn RngCore) -> String {
        "example.com".to_string()
    }
}

pub fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date")
}

pub fn source_record(first_name: &str) -> Record {
    Record::new()
        .with(Field::StudyId, 12_345_i64)
        .with(Field::FirstName, first_name)
        .with(Field::LastName, "Smith")
        .with(Field::PhoneNumber, "555-123-4567")
        .with(Field::EmailAddress, "liz.smith@example.com")
        .with(Field::StreetAddressLine1, "1 Main Street")
        .with(Field::City, "Springfield")
        .with(Field::State, "CA")
        .with(Field::ZipCode, "90001")
        .with(Field::Mrn, 500_000_i64)
        .with(Field::Dob, "1970-05-17")
        .with(Field::Ethnicity, 1_i64)
        .with(Field::Race, 2_i64)
        .with(Field::Sex, 3_i64)
        .with(Field::CoreParticipantDate, "2001-02-03")
        .with(Field::PrimaryConsentDate, "2000-01-02")
        .with(Field::DateOfLastActivity, "2024-01-01")
}
