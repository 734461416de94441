//! Date of Birth Value Object
//!
//! Accepted as `DD/MM/YYYY`. Registration requires an adult (18 or older)
//! relative to the supplied "today", which comes from the clock.

use chrono::{Months, NaiveDate};
use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DATE_OF_BIRTH_FORMAT: &str = "%d/%m/%Y";
pub const ADULT_AGE_YEARS: u32 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateOfBirth(NaiveDate);

impl DateOfBirth {
    pub fn parse(raw: &str, today: NaiveDate) -> AppResult<Self> {
        let date = NaiveDate::parse_from_str(raw.trim(), DATE_OF_BIRTH_FORMAT).map_err(|_| {
            AppError::bad_request("Date of birth must be a valid DD/MM/YYYY date")
        })?;

        if date > today {
            return Err(AppError::bad_request("Date of birth cannot be in the future"));
        }

        let adult_cutoff = today
            .checked_sub_months(Months::new(ADULT_AGE_YEARS * 12))
            .ok_or_else(|| AppError::bad_request("Date of birth is out of range"))?;
        if date > adult_cutoff {
            return Err(AppError::bad_request(format!(
                "You must be at least {ADULT_AGE_YEARS} years old"
            )));
        }

        Ok(Self(date))
    }

    pub fn as_date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DateOfBirth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_OF_BIRTH_FORMAT))
    }
}
