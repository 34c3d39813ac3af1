use std::fmt;

use chrono::NaiveDate;

/// Layouts a birthdate may be re-entered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DateLayout {
    /// `1970-01-31`
    Iso,
    /// `31-01-1970`
    DayFirst,
    /// `January 31, 1970`
    LongMonth,
    /// `Jan 31, 1970`
    ShortMonth,
}

impl DateLayout {
    pub const ALL: [DateLayout; 4] = [
        DateLayout::Iso,
        DateLayout::DayFirst,
        DateLayout::LongMonth,
        DateLayout::ShortMonth,
    ];

    pub fn pattern(self) -> &'static str {
        match self {
            DateLayout::Iso => "%Y-%m-%d",
            DateLayout::DayFirst => "%d-%m-%Y",
            DateLayout::LongMonth => "%B %d, %Y",
            DateLayout::ShortMonth => "%b %d, %Y",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DateLayout::Iso => "iso",
            DateLayout::DayFirst => "day_first",
            DateLayout::LongMonth => "long_month",
            DateLayout::ShortMonth => "short_month",
        }
    }

    pub fn render(self, date: NaiveDate) -> String {
        date.format(self.pattern()).to_string()
    }

    pub fn parse(self, text: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(text.trim(), self.pattern()).ok()
    }
}

impl fmt::Display for DateLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a date written in any supported layout.
///
/// The short month layout is tried before the long one, since `%B` also
/// accepts abbreviated month names.
pub fn parse_any(text: &str) -> Option<(NaiveDate, DateLayout)> {
    [
        DateLayout::Iso,
        DateLayout::DayFirst,
        DateLayout::ShortMonth,
        DateLayout::LongMonth,
    ]
    .into_iter()
    .find_map(|layout| layout.parse(text).map(|date| (date, layout)))
}

/// Render a date the way base records store it.
pub fn iso(date: NaiveDate) -> String {
    DateLayout::Iso.render(date)
}
