/// US state and territory postal codes with full names and ZIP ranges.
struct StateEntry {
    code: &'static str,
    name: &'static str,
    territory: bool,
    zip_min: u32,
    zip_max: u32,
}

const fn state(code: &'static str, name: &'static str, zip_min: u32, zip_max: u32) -> StateEntry {
    StateEntry {
        code,
        name,
        territory: false,
        zip_min,
        zip_max,
    }
}

const fn territory(
    code: &'static str,
    name: &'static str,
    zip_min: u32,
    zip_max: u32,
) -> StateEntry {
    StateEntry {
        code,
        name,
        territory: true,
        zip_min,
        zip_max,
    }
}

const STATES: &[StateEntry] = &[
    territory("AA", "Armed Forces Americas", 34001, 34095),
    territory("AE", "Armed Forces Europe", 9001, 9999),
    state("AK", "Alaska", 99501, 99950),
    state("AL", "Alabama", 35004, 36925),
    territory("AP", "Armed Forces Pacific", 96201, 96699),
    state("AR", "Arkansas", 71601, 72959),
    territory("AS", "American Samoa", 96799, 96799),
    state("AZ", "Arizona", 85001, 86556),
    state("CA", "California", 90001, 96162),
    state("CO", "Colorado", 80001, 81658),
    state("CT", "Connecticut", 6001, 6389),
    state("DC", "District of Columbia", 20001, 20039),
    state("DE", "Delaware", 19701, 19980),
    state("FL", "Florida", 32004, 34997),
    territory("FM", "Federated States of Micronesia", 96941, 96944),
    state("GA", "Georgia", 30001, 31999),
    territory("GU", "Guam", 96910, 96932),
    state("HI", "Hawaii", 96701, 96898),
    state("IA", "Iowa", 50001, 52809),
    state("ID", "Idaho", 83201, 83876),
    state("IL", "Illinois", 60001, 62999),
    state("IN", "Indiana", 46001, 47997),
    state("KS", "Kansas", 66002, 67954),
    state("KY", "Kentucky", 40003, 42788),
    state("LA", "Louisiana", 70001, 71232),
    state("MA", "Massachusetts", 1001, 2791),
    state("MD", "Maryland", 20812, 21930),
    state("ME", "Maine", 3901, 4992),
    territory("MH", "Marshall Islands", 96960, 96970),
    state("MI", "Michigan", 48001, 49971),
    state("MN", "Minnesota", 55001, 56763),
    state("MO", "Missouri", 63001, 65899),
    territory("MP", "Northern Mariana Islands", 96950, 96952),
    state("MS", "Mississippi", 38601, 39776),
    state("MT", "Montana", 59001, 59937),
    state("NC", "North Carolina", 27006, 28909),
    state("ND", "North Dakota", 58001, 58856),
    state("NE", "Nebraska", 68001, 69367),
    state("NH", "New Hampshire", 3031, 3897),
    state("NJ", "New Jersey", 7001, 8989),
    state("NM", "New Mexico", 87001, 88441),
    state("NV", "Nevada", 88901, 89883),
    state("NY", "New York", 10001, 14905),
    state("OH", "Ohio", 43001, 45999),
    state("OK", "Oklahoma", 73001, 74966),
    state("OR", "Oregon", 97001, 97920),
    state("PA", "Pennsylvania", 15001, 19640),
    territory("PR", "Puerto Rico", 601, 988),
    territory("PW", "Palau", 96939, 96940),
    state("RI", "Rhode Island", 2801, 2940),
    state("SC", "South Carolina", 29001, 29948),
    state("SD", "South Dakota", 57001, 57799),
    state("TN", "Tennessee", 37010, 38589),
    state("TX", "Texas", 75503, 79999),
    state("UT", "Utah", 84001, 84784),
    state("VA", "Virginia", 22001, 24658),
    territory("VI", "Virgin Islands", 801, 851),
    state("VT", "Vermont", 5001, 5495),
    state("WA", "Washington", 98001, 99403),
    state("WI", "Wisconsin", 53001, 54990),
    state("WV", "West Virginia", 24701, 26886),
    state("WY", "Wyoming", 82001, 83128),
];

/// Converts postal codes such as `CA` into full names such as `California`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StateNameLookup;

impl StateNameLookup {
    pub fn new() -> Self {
        Self
    }

    /// Full name for `code`, or `code` itself when it is not recognized.
    pub fn full_name<'a>(&self, code: &'a str) -> &'a str {
        find(code).map(|entry| entry.name).unwrap_or(code)
    }

    pub fn is_known(&self, code: &str) -> bool {
        find(code).is_some()
    }

    pub fn is_territory(&self, code: &str) -> bool {
        find(code).is_some_and(|entry| entry.territory)
    }

    /// Known codes in alphabetical order.
    pub fn codes(&self, include_territories: bool) -> Vec<&'static str> {
        STATES
            .iter()
            .filter(|entry| include_territories || !entry.territory)
            .map(|entry| entry.code)
            .collect()
    }

    /// Inclusive range of five-digit ZIP codes used by `code`.
    pub fn zip_range(&self, code: &str) -> Option<(u32, u32)> {
        find(code).map(|entry| (entry.zip_min, entry.zip_max))
    }
}

fn find(code: &str) -> Option<&'static StateEntry> {
    STATES.iter().find(|entry| entry.code == code)
}
