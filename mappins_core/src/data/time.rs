use chrono::{Datelike, NaiveDate};

/// Month names as the list view displays them (French locale).
const MONTH_NAMES: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

const SHORT_MONTH_NAMES: [&str; 12] = [
    "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.",
    "déc.",
];

/// Identifies a calendar month. Orders chronologically.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone)]
pub struct YearMonth {
    pub year: i32,
    /// 1-based, January is 1.
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        YearMonth { year: date.year(), month: date.month() }
    }

    /// The sortable `YYYY-MM` key used by the timeline.
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// The localized "Month Year" heading, capitalized, e.g. `Mars 2024`.
    pub fn label(&self) -> String {
        let name = MONTH_NAMES[self.month0()];
        let mut chars = name.chars();
        let capitalized: String = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        format!("{} {}", capitalized, self.year)
    }

    fn month0(&self) -> usize {
        self.month as usize - 1
    }
}

/// Index of the day of the week, Sunday = 0 through Saturday = 6.
pub fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_sunday() as usize
}

/// The short day-and-month form shown on a pin card, e.g. `2 mars`.
pub fn card_date_label(date: NaiveDate) -> String {
    let month = YearMonth::of(date);
    format!("{} {}", date.day(), SHORT_MONTH_NAMES[month.month0()])
}

/// Parses a `YYYY-MM-DD` date as entered in the form and stored in records.
pub fn parse_date(text: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
}
