use chrono::{Days, Months, NaiveDate};
use fake::Fake;
use fake::faker::address::en::{BuildingNumber, CityName, StateAbbr, StreetName};
use fake::faker::internet::en::FreeEmailProvider;
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use rand::{Rng, RngCore};

use crate::lookup::StateNameLookup;

const FALLBACK_ZIP_RANGE: (u32, u32) = (501, 99950);

/// Source of individual fake attribute values for a record.
///
/// Every call samples independently. Date helpers have default
/// implementations based on the supplied random source.
pub trait AttributeProvider {
    fn first_name(&self, rng: &mut dyn RngCore) -> String;
    fn last_name(&self, rng: &mut dyn RngCore) -> String;
    fn phone_number(&self, rng: &mut dyn RngCore) -> String;
    fn street_address(&self, rng: &mut dyn RngCore) -> String;
    fn city(&self, rng: &mut dyn RngCore) -> String;
    fn state_abbr(&self, include_territories: bool, rng: &mut dyn RngCore) -> String;
    fn zipcode_in_state(&self, state: &str, rng: &mut dyn RngCore) -> String;
    fn free_email_domain(&self, rng: &mut dyn RngCore) -> String;

    /// Uniform integer in `min..=max`.
    fn random_int(&self, min: i64, max: i64, rng: &mut dyn RngCore) -> i64 {
        if min >= max {
            return min;
        }
        rng.random_range(min..=max)
    }

    /// Uniform date in `start..=end`; `start` when the range is empty.
    fn date_between(&self, start: NaiveDate, end: NaiveDate, rng: &mut dyn RngCore) -> NaiveDate {
        let span = (end - start).num_days();
        if span <= 0 {
            return start;
        }
        let offset = rng.random_range(0..=span) as u64;
        start.checked_add_days(Days::new(offset)).unwrap_or(end)
    }

    /// Birthdate of someone aged `min_age..=max_age` years on `today`.
    fn date_of_birth(
        &self,
        today: NaiveDate,
        min_age: u32,
        max_age: u32,
        rng: &mut dyn RngCore,
    ) -> NaiveDate {
        let latest = today
            .checked_sub_months(Months::new(min_age * 12))
            .unwrap_or(today);
        let earliest = today
            .checked_sub_months(Months::new((max_age + 1) * 12))
            .and_then(|date| date.checked_add_days(Days::new(1)))
            .unwrap_or(latest);
        self.date_between(earliest, latest, rng)
    }
}

/// [`AttributeProvider`] backed by the `fake` crate's English locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct FakerProvider {
    states: StateNameLookup,
}

impl FakerProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AttributeProvider for FakerProvider {
    fn first_name(&self, rng: &mut dyn RngCore) -> String {
        FirstName().fake_with_rng(rng)
    }

    fn last_name(&self, rng: &mut dyn RngCore) -> String {
        LastName().fake_with_rng(rng)
    }

    fn phone_number(&self, rng: &mut dyn RngCore) -> String {
        PhoneNumber().fake_with_rng(rng)
    }

    fn street_address(&self, rng: &mut dyn RngCore) -> String {
        let number: String = BuildingNumber().fake_with_rng(rng);
        let street: String = StreetName().fake_with_rng(rng);
        format!("{number} {street}")
    }

    fn city(&self, rng: &mut dyn RngCore) -> String {
        CityName().fake_with_rng(rng)
    }

    fn state_abbr(&self, include_territories: bool, rng: &mut dyn RngCore) -> String {
        let code: String = StateAbbr().fake_with_rng(rng);
        if self.states.is_known(&code) && (include_territories || !self.states.is_territory(&code))
        {
            return code;
        }

        let codes = self.states.codes(include_territories);
        codes[rng.random_range(0..codes.len())].to_string()
    }

    fn zipcode_in_state(&self, state: &str, rng: &mut dyn RngCore) -> String {
        let (min, max) = self.states.zip_range(state).unwrap_or(FALLBACK_ZIP_RANGE);
        format!("{:05}", rng.random_range(min..=max))
    }

    fn free_email_domain(&self, rng: &mut dyn RngCore) -> String {
        FreeEmailProvider().fake_with_rng(rng)
    }
}
