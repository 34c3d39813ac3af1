use chrono::{Days, NaiveDate};
use rand::RngCore;
use regex::Regex;

use recsynth_core::{Field, Record};

use crate::dates::iso;
use crate::email::synthesize_email;
use crate::errors::GenerationError;
use crate::provider::AttributeProvider;

pub const MIN_AGE: u32 = 18;
pub const MAX_AGE: u32 = 115;
/// 18 years of 365.25 days, truncated to whole days.
pub const DAYS_UNTIL_ADULT: u64 = 6574;
pub const MRN_RANGE: (i64, i64) = (100_000, 999_999);
pub const ETHNICITY_RANGE: (i64, i64) = (1, 2);
pub const RACE_RANGE: (i64, i64) = (1, 5);
pub const SEX_RANGE: (i64, i64) = (1, 3);

/// Builds base records around a study id.
///
/// Dates are kept consistent: consent is only given once the patient is an
/// adult, core participation follows consent, and nothing is after `today`.
pub struct RecordFactory<'a> {
    provider: &'a dyn AttributeProvider,
    today: NaiveDate,
    phone_extension: Regex,
}

impl<'a> RecordFactory<'a> {
    pub fn new(provider: &'a dyn AttributeProvider, today: NaiveDate) -> Result<Self, GenerationError> {
        Ok(Self {
            provider,
            today,
            phone_extension: Regex::new(r"x\d+")?,
        })
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn create(&self, study_id: u32, rng: &mut dyn RngCore) -> Record {
        let provider = self.provider;
        let birthdate = provider.date_of_birth(self.today, MIN_AGE, MAX_AGE, rng);

        let adult_on = birthdate
            .checked_add_days(Days::new(DAYS_UNTIL_ADULT))
            .unwrap_or(self.today)
            .min(self.today);
        let primary_consent_date = provider.date_between(adult_on, self.today, rng);
        let core_participant_date = provider.date_between(primary_consent_date, self.today, rng);
        let state = provider.state_abbr(false, rng);

        let phone_number = provider.phone_number(rng);
        let phone_number = self
            .phone_extension
            .replace_all(&phone_number, "")
            .trim()
            .to_string();

        let given_name = provider.first_name(rng);
        let surname = provider.last_name(rng);
        let domain = provider.free_email_domain(rng);
        let email_address = synthesize_email(&given_name, &surname, &domain, rng);

        let street_address = provider.street_address(rng);
        let city = provider.city(rng);
        let zip_code = provider.zipcode_in_state(&state, rng);
        let mrn = provider.random_int(MRN_RANGE.0, MRN_RANGE.1, rng);
        let ethnicity = provider.random_int(ETHNICITY_RANGE.0, ETHNICITY_RANGE.1, rng);
        let race = provider.random_int(RACE_RANGE.0, RACE_RANGE.1, rng);
        let sex = provider.random_int(SEX_RANGE.0, SEX_RANGE.1, rng);

        Record::new()
            .with(Field::StudyId, study_id)
            .with(Field::FirstName, given_name)
            .with(Field::LastName, surname)
            .with(Field::PhoneNumber, phone_number)
            .with(Field::EmailAddress, email_address)
            .with(Field::StreetAddressLine1, street_address)
            .with(Field::City, city)
            .with(Field::State, state)
            .with(Field::ZipCode, zip_code)
            .with(Field::Mrn, mrn)
            .with(Field::Dob, iso(birthdate))
            .with(Field::Ethnicity, ethnicity)
            .with(Field::Race, race)
            .with(Field::Sex, sex)
            .with(Field::CoreParticipantDate, iso(core_participant_date))
            .with(Field::PrimaryConsentDate, iso(primary_consent_date))
            .with(Field::DateOfLastActivity, iso(self.today))
    }
}
