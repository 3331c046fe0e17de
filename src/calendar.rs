use crate::date_key::DateKey;
use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Week,
    #[default]
    Month,
    Year,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(format!("unknown view mode {other:?}")),
        }
    }
}

/// One day of a rendered window. Derived on every request, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub date_key: DateKey,
    /// 0 = Sunday .. 6 = Saturday
    pub day_of_week: u8,
    /// Grid column in year view. Not an ISO week number.
    pub week_index: u32,
    /// 0 = January .. 11 = December
    pub month_index: u8,
    pub is_first_of_month: bool,
    pub is_completed: bool,
    pub is_past: bool,
}

pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_sunday()))
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

pub fn month_end(date: NaiveDate) -> Option<NaiveDate> {
    month_start(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
}

pub fn year_start(date: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year(), 1, 1)
}

pub fn year_end(date: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year(), 12, 31)
}

/// Inclusive first and last day of the window containing `anchor`.
///
/// `None` only when the window would leave chrono's representable range.
pub fn window_bounds(view: ViewMode, anchor: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    match view {
        ViewMode::Week => {
            let start = week_start(anchor);
            Some((start, start.checked_add_days(Days::new(6))?))
        }
        ViewMode::Month => Some((month_start(anchor), month_end(anchor)?)),
        ViewMode::Year => Some((year_start(anchor)?, year_end(anchor)?)),
    }
}

/// Column of `date` in a Sunday-first year grid.
pub fn week_index(date: NaiveDate) -> u32 {
    let jan1_offset = year_start(date)
        .map(|jan1| jan1.weekday().num_days_from_sunday())
        .unwrap_or_default();
    (date.ordinal0() + jan1_offset + 1) / 7
}

/// Every day of the `view` window around `anchor`, ascending, with
/// completion and past flags resolved against `tracked` and `today`.
///
/// Month and year windows hold only real days; aligning them to a 7-column
/// grid is left to the renderer.
pub fn build_window(
    tracked: &BTreeSet<DateKey>,
    view: ViewMode,
    anchor: NaiveDate,
    today: NaiveDate,
) -> Vec<CalendarCell> {
    let Some((start, end)) = window_bounds(view, anchor) else {
        return Vec::new();
    };

    start
        .iter_days()
        .take_while(|date| *date <= end)
        .map(|date| {
            let date_key = DateKey::from(date);
            CalendarCell {
                is_completed: tracked.contains(&date_key),
                date,
                date_key,
                day_of_week: date.weekday().num_days_from_sunday() as u8,
                week_index: week_index(date),
                month_index: date.month0() as u8,
                is_first_of_month: date.day() == 1,
                is_past: date <= today,
            }
        })
        .collect()
}
