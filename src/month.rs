//! The calendar month used to scope every report.

use std::fmt::Display;

use serde::Deserialize;

use crate::Error;

/// A calendar month from 1 (January) to 12 (December).
///
/// To create a `Month` from a query parameter, use [Month::parse].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Month(u8);

impl Month {
    /// Create a month from a number, returning `None` if it is not in 1..=12.
    pub fn new(month: u8) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self(month))
    }

    /// Parse the raw `month` query parameter.
    ///
    /// Leading zeros are accepted, so both `4` and `04` are April.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] if `raw` is missing, empty, not an integer,
    /// or outside 1..=12.
    pub fn parse(raw: Option<&str>) -> Result<Self, Error> {
        let raw = match raw.map(str::trim) {
            None | Some("") => {
                return Err(Error::InvalidMonth(
                    "the query parameter \"month\" is required".to_owned(),
                ));
            }
            Some(raw) => raw,
        };

        raw.parse::<u8>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| {
                Error::InvalidMonth(format!(
                    "\"{raw}\" is not a valid month, expected an integer from 1 to 12"
                ))
            })
    }

    /// The month number, 1 to 12.
    pub fn as_u8(self) -> u8 {
        self.0
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// The query string for routes that only take a month, e.g. `/statistics?month=04`.
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    /// The unvalidated month.
    pub month: Option<String>,
}

impl MonthQuery {
    /// Validate the month in the query string.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] if the month is missing or invalid.
    pub fn month(&self) -> Result<Month, Error> {
        Month::parse(self.month.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use crate::Error;

    use super::Month;

    #[test]
    fn parses_every_month() {
        for month in 1..=12u8 {
            let got = Month::parse(Some(month.to_string().as_str())).unwrap();
            assert_eq!(got.as_u8(), month);
        }
    }

    #[test]
    fn parses_leading_zero() {
        assert_eq!(Month::parse(Some("04")), Ok(Month(4)));
        assert_eq!(Month::parse(Some("12")), Ok(Month(12)));
    }

    #[test]
    fn rejects_missing_month() {
        assert!(matches!(Month::parse(None), Err(Error::InvalidMonth(_))));
        assert!(matches!(Month::parse(Some("")), Err(Error::InvalidMonth(_))));
        assert!(matches!(Month::parse(Some("  ")), Err(Error::InvalidMonth(_))));
    }

    #[test]
    fn rejects_out_of_range_months() {
        for raw in ["0", "13", "-1", "255", "1000"] {
            let result = Month::parse(Some(raw));
            assert!(
                matches!(result, Err(Error::InvalidMonth(_))),
                "want error for {raw:?}, got {result:?}"
            );
        }
    }

    #[test]
    fn rejects_non_numeric_month() {
        for raw in ["abc", "4.0", "April", "undefined"] {
            let result = Month::parse(Some(raw));
            assert!(
                matches!(result, Err(Error::InvalidMonth(_))),
                "want error for {raw:?}, got {result:?}"
            );
        }
    }

    #[test]
    fn displays_with_two_digits() {
        assert_eq!(Month::new(4).unwrap().to_string(), "04");
        assert_eq!(Month::new(11).unwrap().to_string(), "11");
    }
}
