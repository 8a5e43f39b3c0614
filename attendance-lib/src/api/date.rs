//! Date ranges sent as `from_date` / `to_date` query parameters.

use std::fmt;

use chrono::Local;
use chrono::NaiveDate;

use crate::error::DateRangeError;

/// Wire format of every date parameter.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// An inclusive date range, written `DD/MM/YYYY` on the wire.
///
/// The backend decides what an inverted range means; it is passed through
/// as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// First day.
    pub from: NaiveDate,
    /// Last day.
    pub to: NaiveDate,
}

impl DateRange {
    /// Creates a range.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// A single-day range for today in local time.
    pub fn today() -> Self {
        let today = Local::now().date_naive();
        Self::new(today, today)
    }

    /// Parses both bounds from `DD/MM/YYYY`.
    ///
    /// Blank input on either side is [`DateRangeError::Missing`]; anything
    /// else that does not parse is [`DateRangeError::Invalid`].
    pub fn parse(from: &str, to: &str) -> Result<Self, DateRangeError> {
        let (from, to) = (from.trim(), to.trim());
        if from.is_empty() || to.is_empty() {
            return Err(DateRangeError::Missing);
        }
        Ok(Self::new(parse_date("from", from)?, parse_date("to", to)?))
    }

    /// `from` in wire format.
    pub fn from_param(&self) -> String {
        self.from.format(DATE_FORMAT).to_string()
    }

    /// `to` in wire format.
    pub fn to_param(&self) -> String {
        self.to.format(DATE_FORMAT).to_string()
    }

    /// The `from_date` and `to_date` query pairs.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        vec![("from_date", self.from_param()), ("to_date", self.to_param())]
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.from_param(), self.to_param())
    }
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, DateRangeError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| DateRangeError::Invalid {
        field,
        value: value.to_string(),
    })
}
