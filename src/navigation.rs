use crate::calendar::{ViewMode, week_start, window_bounds};
use crate::date_key::DateKey;
use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Prev,
    Next,
    Today,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    pub view_mode: ViewMode,
    pub anchor: NaiveDate,
}

impl NavigationState {
    pub fn new(view_mode: ViewMode, anchor: NaiveDate) -> Self {
        Self { view_mode, anchor }
    }

    /// Moves the anchor by one week, month or year. Month and year steps
    /// clamp to the last day of a shorter month (Jan 31 + 1 month = Feb 28).
    /// An anchor at the edge of the representable range stays put.
    pub fn navigate(self, direction: Direction, today: NaiveDate) -> Self {
        let anchor = match direction {
            Direction::Prev => self.step_back(),
            Direction::Next => self.step_forward(),
            Direction::Today => Some(today),
        };
        Self {
            anchor: anchor.unwrap_or(self.anchor),
            ..self
        }
    }

    pub fn reset_to_today(self, today: NaiveDate) -> Self {
        self.navigate(Direction::Today, today)
    }

    pub fn with_view_mode(self, view_mode: ViewMode) -> Self {
        Self { view_mode, ..self }
    }

    pub fn is_current_period(&self, today: NaiveDate) -> bool {
        match self.view_mode {
            ViewMode::Week => week_start(self.anchor) == week_start(today),
            ViewMode::Month => {
                self.anchor.year() == today.year() && self.anchor.month() == today.month()
            }
            ViewMode::Year => self.anchor.year() == today.year(),
        }
    }

    pub fn label(&self) -> String {
        period_label(self.view_mode, self.anchor)
    }

    pub fn view(&self, today: NaiveDate) -> NavigationView {
        let (start, end) = window_bounds(self.view_mode, self.anchor).unwrap_or((self.anchor, self.anchor));
        NavigationView {
            view_mode: self.view_mode,
            anchor: DateKey::from(self.anchor),
            start: DateKey::from(start),
            end: DateKey::from(end),
            label: self.label(),
            is_current_period: self.is_current_period(today),
        }
    }

    fn step_forward(self) -> Option<NaiveDate> {
        match self.view_mode {
            ViewMode::Week => self.anchor.checked_add_days(Days::new(7)),
            ViewMode::Month => self.anchor.checked_add_months(Months::new(1)),
            ViewMode::Year => self.anchor.checked_add_months(Months::new(12)),
        }
    }

    fn step_back(self) -> Option<NaiveDate> {
        match self.view_mode {
            ViewMode::Week => self.anchor.checked_sub_days(Days::new(7)),
            ViewMode::Month => self.anchor.checked_sub_months(Months::new(1)),
            ViewMode::Year => self.anchor.checked_sub_months(Months::new(12)),
        }
    }
}

/// Serializable snapshot of a navigation state, handed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationView {
    pub view_mode: ViewMode,
    pub anchor: DateKey,
    pub start: DateKey,
    pub end: DateKey,
    pub label: String,
    pub is_current_period: bool,
}

#[derive(Debug, Deserialize)]
pub struct NavigateQuery {
    #[serde(default)]
    pub view: ViewMode,
    pub anchor: Option<DateKey>,
    pub direction: Option<Direction>,
}

/// "Week of Feb 23, 2025", "March 2025" or "2025".
pub fn period_label(view: ViewMode, anchor: NaiveDate) -> String {
    match view {
        ViewMode::Week => format!("Week of {}", week_start(anchor).format("%b %-d, %Y")),
        ViewMode::Month => anchor.format("%B %Y").to_string(),
        ViewMode::Year => anchor.year().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn week_steps_are_seven_days() {
        let state = NavigationState::new(ViewMode::Week, ymd(2025, 2, 26));
        let today = ymd(2025, 3, 1);
        assert_eq!(state.navigate(Direction::Next, today).anchor, ymd(2025, 3, 5));
        assert_eq!(state.navigate(Direction::Prev, today).anchor, ymd(2025, 2, 19));
    }

    #[test]
    fn month_steps_clamp_to_month_end() {
        let today = ymd(2025, 3, 1);
        let state = NavigationState::new(ViewMode::Month, ymd(2025, 1, 31));
        assert_eq!(state.navigate(Direction::Next, today).anchor, ymd(2025, 2, 28));

        let leap = NavigationState::new(ViewMode::Month, ymd(2024, 3, 31));
        assert_eq!(leap.navigate(Direction::Prev, today).anchor, ymd(2024, 2, 29));

        let december = NavigationState::new(ViewMode::Month, ymd(2024, 12, 15));
        assert_eq!(december.navigate(Direction::Next, today).anchor, ymd(2025, 1, 15));
    }

    #[test]
    fn year_steps_handle_leap_day() {
        let today = ymd(2025, 3, 1);
        let state = NavigationState::new(ViewMode::Year, ymd(2024, 2, 29));
        assert_eq!(state.navigate(Direction::Next, today).anchor, ymd(2025, 2, 28));
        assert_eq!(state.navigate(Direction::Prev, today).anchor, ymd(2023, 2, 28));
    }

    #[test]
    fn reset_keeps_view_mode() {
        let today = ymd(2025, 3, 1);
        let state = NavigationState::new(ViewMode::Year, ymd(2019, 7, 4)).reset_to_today(today);
        assert_eq!(state, NavigationState::new(ViewMode::Year, today));
        assert!(state.is_current_period(today));
    }

    #[test]
    fn current_period_per_view_mode() {
        let today = ymd(2025, 3, 1);
        // Week of Sun Feb 23 .. Sat Mar 1.
        assert!(NavigationState::new(ViewMode::Week, ymd(2025, 2, 23)).is_current_period(today));
        assert!(!NavigationState::new(ViewMode::Week, ymd(2025, 3, 2)).is_current_period(today));
        assert!(NavigationState::new(ViewMode::Month, ymd(2025, 3, 31)).is_current_period(today));
        assert!(!NavigationState::new(ViewMode::Month, ymd(2024, 3, 1)).is_current_period(today));
        assert!(NavigationState::new(ViewMode::Year, ymd(2025, 12, 31)).is_current_period(today));
        assert!(!NavigationState::new(ViewMode::Year, ymd(2024, 12, 31)).is_current_period(today));
    }

    #[test]
    fn labels_and_view_bounds() {
        let today = ymd(2025, 3, 1);
        let week = NavigationState::new(ViewMode::Week, ymd(2025, 2, 26));
        assert_eq!(week.label(), "Week of Feb 23, 2025");
        let view = week.view(today);
        assert_eq!(view.start.as_str(), "2025-02-23");
        assert_eq!(view.end.as_str(), "2025-03-01");
        assert!(view.is_current_period);

        assert_eq!(period_label(ViewMode::Month, ymd(2025, 3, 9)), "March 2025");
        assert_eq!(period_label(ViewMode::Year, ymd(2025, 3, 9)), "2025");
    }
}
