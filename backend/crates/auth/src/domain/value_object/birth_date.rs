//! Birth Date Value Object
//!
//! A date of birth. Must lie strictly in the past.

use chrono::{NaiveDate, Utc};
use kernel::error::app_error::{AppError, AppResult};
use std::fmt;

/// Validated birth date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BirthDate(NaiveDate);

impl BirthDate {
    /// Create a new birth date, rejecting today and future dates
    pub fn new(date: NaiveDate) -> AppResult<Self> {
        let today = Utc::now().date_naive();
        if date >= today {
            return Err(AppError::bad_request("Birth date must be in the past"));
        }
        Ok(Self(date))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Get the underlying date
    #[inline]
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_past_date_ok() {
        let date = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
        let birth = BirthDate::new(date).unwrap();
        assert_eq!(birth.as_naive(), date);
    }

    #[test]
    fn test_today_rejected() {
        let today = Utc::now().date_naive();
        assert!(BirthDate::new(today).is_err());
    }

    #[test]
    fn test_future_rejected() {
        let tomorrow = Utc::now().date_naive() + Duration::days(1);
        assert!(BirthDate::new(tomorrow).is_err());
    }
}
