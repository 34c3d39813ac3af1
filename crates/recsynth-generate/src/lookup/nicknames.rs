use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::errors::GenerationError;

const BUILTIN_NICKNAMES: &str = include_str!("../../assets/nicknames.csv");

/// Maps given names to their nicknames and diminutives, e.g. "Robert" to
/// "Bob" and "Bobby".
///
/// The table is a CSV file where every line is one group of interchangeable
/// names. A name may appear in several groups.
#[derive(Debug, Clone, Default)]
pub struct NicknameLookup {
    groups: Vec<BTreeSet<String>>,
    by_name: HashMap<String, Vec<usize>>,
}

impl NicknameLookup {
    /// Table bundled with the crate.
    pub fn builtin() -> Self {
        // In-memory UTF-8 input; the reader has no failure path here.
        Self::from_reader(BUILTIN_NICKNAMES.as_bytes()).unwrap_or_default()
    }

    pub fn from_path(path: &Path) -> Result<Self, GenerationError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, GenerationError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut groups = Vec::new();
        for record in reader.records() {
            let record = record?;
            groups.push(record.iter().map(str::to_string).collect::<Vec<_>>());
        }
        Ok(Self::from_groups(groups))
    }

    fn from_groups<I>(groups: I) -> Self
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let mut lookup = Self::default();
        for group in groups {
            let names: BTreeSet<String> = group
                .iter()
                .map(|name| name.trim().to_lowercase())
                .filter(|name| !name.is_empty())
                .collect();
            if names.is_empty() {
                continue;
            }

            let slot = lookup.groups.len();
            for name in &names {
                lookup.by_name.entry(name.clone()).or_default().push(slot);
            }
            lookup.groups.push(names);
        }
        lookup
    }

    /// Lower-cased alternates for `name`, sorted, excluding `name` itself.
    ///
    /// Matching is case-insensitive. Returns `None` for unknown names.
    pub fn get(&self, name: &str) -> Option<Vec<String>> {
        let key = name.trim().to_lowercase();
        let slots = self.by_name.get(&key)?;

        let mut names = BTreeSet::new();
        for slot in slots {
            if let Some(group) = self.groups.get(*slot) {
                names.extend(group.iter().cloned());
            }
        }
        names.remove(&key);
        Some(names.into_iter().collect())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(&name.trim().to_lowercase())
    }

    /// Number of name groups in the table.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
