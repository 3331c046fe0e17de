//! Canonical `YYYY-MM-DD` keys for calendar days.
//!
//! Keys are fixed width and zero padded, so ordering the strings is the same
//! as ordering the dates. Sets of keys can be range-queried and scanned in
//! chronological order without parsing.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateKeyError {
    #[error("invalid date key {0:?}: expected YYYY-MM-DD")]
    Malformed(String),
    #[error("invalid date key {0:?}: no such calendar day")]
    Impossible(String),
}

/// A validated calendar day key.
///
/// The key string is compared first, so the derived ordering is the
/// lexicographic one. Both fields always describe the same day.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey {
    key: String,
    date: NaiveDate,
}

impl DateKey {
    pub fn as_str(&self) -> &str {
        &self.key
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Formats the date's own year/month/day fields; no timezone conversion.
///
/// Only years 0000 through 9999 round-trip through [`decode`].
pub fn encode(date: NaiveDate) -> DateKey {
    DateKey {
        key: format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day()),
        date,
    }
}

pub fn decode(key: &str) -> Result<NaiveDate, DateKeyError> {
    let bytes = key.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(idx, byte)| match idx {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        });
    if !shaped {
        return Err(DateKeyError::Malformed(key.to_string()));
    }

    // Shape is checked above, the numeric parses cannot fail.
    let field = |range: std::ops::Range<usize>| key[range].parse::<u32>().unwrap_or_default();
    let (year, month, day) = (field(0..4), field(5..7), field(8..10));

    NaiveDate::from_ymd_opt(year as i32, month, day)
        .ok_or_else(|| DateKeyError::Impossible(key.to_string()))
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        encode(date)
    }
}

impl FromStr for DateKey {
    type Err = DateKeyError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        decode(key).map(encode)
    }
}

impl TryFrom<String> for DateKey {
    type Error = DateKeyError;

    fn try_from(key: String) -> Result<Self, Self::Error> {
        let date = decode(&key)?;
        Ok(Self { key, date })
    }
}

impl From<DateKey> for String {
    fn from(key: DateKey) -> Self {
        key.key
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}
