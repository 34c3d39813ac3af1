use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Columns of a synthesized patient record, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    StudyId,
    FirstName,
    LastName,
    PhoneNumber,
    EmailAddress,
    StreetAddressLine1,
    City,
    State,
    ZipCode,
    Mrn,
    Dob,
    Ethnicity,
    Race,
    Sex,
    CoreParticipantDate,
    PrimaryConsentDate,
    DateOfLastActivity,
}

impl Field {
    pub const ALL: [Field; 17] = [
        Field::StudyId,
        Field::FirstName,
        Field::LastName,
        Field::PhoneNumber,
        Field::EmailAddress,
        Field::StreetAddressLine1,
        Field::City,
        Field::State,
        Field::ZipCode,
        Field::Mrn,
        Field::Dob,
        Field::Ethnicity,
        Field::Race,
        Field::Sex,
        Field::CoreParticipantDate,
        Field::PrimaryConsentDate,
        Field::DateOfLastActivity,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::StudyId => "study_id",
            Field::FirstName => "first_name",
            Field::LastName => "last_name",
            Field::PhoneNumber => "phone_number",
            Field::EmailAddress => "email_address",
            Field::StreetAddressLine1 => "street_address_line_1",
            Field::City => "city",
            Field::State => "state",
            Field::ZipCode => "zip_code",
            Field::Mrn => "mrn",
            Field::Dob => "dob",
            Field::Ethnicity => "ethnicity",
            Field::Race => "race",
            Field::Sex => "sex",
            Field::CoreParticipantDate => "core_participant_date",
            Field::PrimaryConsentDate => "primary_consent_date",
            Field::DateOfLastActivity => "date_of_last_activity",
        }
    }

    /// Resolve a column name. Names are matched exactly.
    pub fn parse(name: &str) -> Result<Self> {
        Field::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == name)
            .ok_or_else(|| Error::Schema(format!("field '{name}' is not present in the records")))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Field::parse(s)
    }
}

/// Scalar value stored in a record field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldValue {
    Int(i64),
    Text(String),
}

impl FieldValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(value) => Some(*value),
            FieldValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value.as_str()),
            FieldValue::Int(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(value) => write!(f, "{value}"),
            FieldValue::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Int(i64::from(value))
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

/// One patient-like row, keyed by field in schema order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    values: BTreeMap<Field, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: Field, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: Field, value: impl Into<FieldValue>) {
        self.values.insert(field, value.into());
    }

    pub fn get(&self, field: Field) -> Option<&FieldValue> {
        self.values.get(&field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.values.contains_key(&field)
    }

    pub fn text(&self, field: Field) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_str)
    }

    pub fn int(&self, field: Field) -> Option<i64> {
        self.get(field).and_then(FieldValue::as_i64)
    }

    /// Text value of a field the caller cannot proceed without.
    pub fn require_text(&self, field: Field) -> Result<&str> {
        self.text(field).ok_or_else(|| {
            Error::Configuration(format!("record is missing text field '{field}'"))
        })
    }

    /// Integer value of a field the caller cannot proceed without.
    pub fn require_int(&self, field: Field) -> Result<i64> {
        self.int(field).ok_or_else(|| {
            Error::Configuration(format!("record is missing integer field '{field}'"))
        })
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.values.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldValue)> {
        self.values.iter().map(|(field, value)| (*field, value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn same_fields(&self, other: &Record) -> bool {
        self.values.keys().eq(other.values.keys())
    }
}

impl FromIterator<(Field, FieldValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (Field, FieldValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// A record and the position it was appended at.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub position: usize,
    pub record: Record,
}

/// Label of a row under the current index of a [`RecordSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKey<'a> {
    Position(usize),
    Value(&'a FieldValue),
}

impl fmt::Display for RowKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Position(position) => write!(f, "{position}"),
            RowKey::Value(value) => write!(f, "{value}"),
        }
    }
}

/// Ordered rows sharing one field set, optionally keyed by a field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    rows: Vec<Row>,
    index: Option<Field>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
            index: None,
        }
    }

    /// Append a record and return its row position.
    ///
    /// Every record must carry the same fields as the first one.
    pub fn push(&mut self, record: Record) -> Result<usize> {
        if let Some(first) = self.rows.first()
            && !first.record.same_fields(&record)
        {
            return Err(Error::Schema(
                "record fields differ from the rest of the set".to_string(),
            ));
        }
        if let Some(index) = self.index
            && !record.contains(index)
        {
            return Err(Error::Schema(format!(
                "record is missing index field '{index}'"
            )));
        }

        let position = self.rows.len();
        self.rows.push(Row { position, record });
        Ok(position)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Row> {
        self.rows.get(position)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.rows.iter().map(|row| &row.record)
    }

    pub fn index(&self) -> Option<Field> {
        self.index
    }

    /// Field set shared by all rows, empty when there are no rows.
    pub fn fields(&self) -> Vec<Field> {
        self.rows
            .first()
            .map(|row| row.record.fields().collect())
            .unwrap_or_default()
    }

    /// Re-key the rows by `field`. Every row must hold a value for it.
    pub fn set_index(&mut self, field: Field) -> Result<()> {
        if let Some(row) = self.rows.iter().find(|row| !row.record.contains(field)) {
            return Err(Error::Schema(format!(
                "field '{field}' is missing from row {}",
                row.position
            )));
        }
        self.index = Some(field);
        Ok(())
    }

    pub fn reset_index(&mut self) {
        self.index = None;
    }

    pub fn keys(&self) -> impl Iterator<Item = RowKey<'_>> {
        let index = self.index;
        self.rows.iter().map(move |row| match index {
            Some(field) => row
                .record
                .get(field)
                .map(RowKey::Value)
                .unwrap_or(RowKey::Position(row.position)),
            None => RowKey::Position(row.position),
        })
    }

    pub fn column(&self, field: Field) -> impl Iterator<Item = Option<&FieldValue>> {
        self.rows.iter().map(move |row| row.record.get(field))
    }

    /// Largest integer value held in `field`, if any.
    pub fn max_int(&self, field: Field) -> Option<i64> {
        self.column(field).flatten().filter_map(FieldValue::as_i64).max()
    }
}
