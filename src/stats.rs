use crate::calendar::{month_end, month_start, year_end, year_start};
use crate::date_key::DateKey;
use crate::models::Habit;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::Serialize;
use std::collections::BTreeSet;

/// How far back [`current_streak`] looks, today included.
pub const STREAK_LOOKBACK_DAYS: u64 = 366;

pub const NO_BEST_DAY: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitStats {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_completions: usize,
    pub best_day: String,
    pub month_rate: u32,
    pub year_rate: u32,
}

pub fn build_stats_at(today: NaiveDate, habit: &Habit) -> HabitStats {
    let tracked = &habit.tracked_days;
    HabitStats {
        current_streak: current_streak(tracked, today),
        longest_streak: longest_streak(tracked),
        total_completions: total_completions(tracked),
        best_day: best_weekday(tracked)
            .map(weekday_name)
            .unwrap_or(NO_BEST_DAY)
            .to_string(),
        month_rate: month_rate(tracked, today),
        year_rate: year_rate(tracked, today),
    }
}

/// Consecutive completed days ending at `today`. An incomplete today is a
/// gap, so the streak is 0 until today is ticked.
pub fn current_streak(tracked: &BTreeSet<DateKey>, today: NaiveDate) -> u32 {
    let mut streak = 0;
    for offset in 0..STREAK_LOOKBACK_DAYS {
        let Some(date) = today.checked_sub_days(Days::new(offset)) else {
            break;
        };
        if !tracked.contains(&DateKey::from(date)) {
            break;
        }
        streak += 1;
    }
    streak
}

/// Longest run of calendar-consecutive keys. The set iterates in key order,
/// which is chronological order.
pub fn longest_streak(tracked: &BTreeSet<DateKey>) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut prev: Option<NaiveDate> = None;

    for key in tracked {
        let date = key.date();
        run = match prev {
            Some(prev) if prev.succ_opt() == Some(date) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(date);
    }

    longest
}

pub fn total_completions(tracked: &BTreeSet<DateKey>) -> usize {
    tracked.len()
}

/// Weekday with the most completions, Sunday winning ties first.
pub fn best_weekday(tracked: &BTreeSet<DateKey>) -> Option<Weekday> {
    let mut histogram = [0usize; 7];
    for key in tracked {
        histogram[key.date().weekday().num_days_from_sunday() as usize] += 1;
    }

    let mut best: Option<(usize, usize)> = None;
    for (index, count) in histogram.into_iter().enumerate() {
        if count > best.map_or(0, |(_, max)| max) {
            best = Some((index, count));
        }
    }

    best.map(|(index, _)| weekday_from_sunday(index))
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

fn weekday_from_sunday(index: usize) -> Weekday {
    match index {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        _ => Weekday::Sat,
    }
}

/// Completions inside `[start, end]`, both ends inclusive.
pub fn completions_between(tracked: &BTreeSet<DateKey>, start: NaiveDate, end: NaiveDate) -> usize {
    if end < start {
        return 0;
    }
    tracked
        .range(DateKey::from(start)..=DateKey::from(end))
        .count()
}

/// Days in `[start, end]`, or 0 for an inverted range.
pub fn elapsed_days(start: NaiveDate, end: NaiveDate) -> u64 {
    if end < start {
        0
    } else {
        (end - start).num_days() as u64 + 1
    }
}

/// Rounded percentage of days completed in `[start, min(end, today)]`.
/// A range with no elapsed days rates 0.
pub fn period_rate(
    tracked: &BTreeSet<DateKey>,
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
) -> u32 {
    let clipped_end = end.min(today);
    let completed = completions_between(tracked, start, clipped_end);
    percentage(completed as u64, elapsed_days(start, clipped_end))
}

pub fn month_rate(tracked: &BTreeSet<DateKey>, today: NaiveDate) -> u32 {
    match month_end(today) {
        Some(end) => period_rate(tracked, month_start(today), end, today),
        None => 0,
    }
}

pub fn year_rate(tracked: &BTreeSet<DateKey>, today: NaiveDate) -> u32 {
    match (year_start(today), year_end(today)) {
        (Some(start), Some(end)) => period_rate(tracked, start, end, today),
        _ => 0,
    }
}

pub(crate) fn percentage(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 * 100.0 / whole as f64).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn tracked(keys: &[&str]) -> BTreeSet<DateKey> {
        keys.iter().map(|key| key.parse().unwrap()).collect()
    }

    fn february_sample() -> BTreeSet<DateKey> {
        tracked(&[
            "2025-02-18",
            "2025-02-19",
            "2025-02-20",
            "2025-02-25",
            "2025-02-27",
            "2025-02-28",
            "2025-03-01",
        ])
    }

    #[test]
    fn sample_streaks_cross_month_boundary() {
        let days = february_sample();
        let today = ymd(2025, 3, 1);
        assert_eq!(current_streak(&days, today), 3);
        assert_eq!(longest_streak(&days), 3);
        assert_eq!(total_completions(&days), 7);
    }

    #[test]
    fn empty_set_has_sentinel_stats() {
        let days = BTreeSet::new();
        assert_eq!(current_streak(&days, ymd(2025, 3, 1)), 0);
        assert_eq!(longest_streak(&days), 0);
        assert_eq!(best_weekday(&days), None);

        let habit = Habit::new(1, "Read".into(), String::new(), "#4CAF50".into());
        assert_eq!(build_stats_at(ymd(2025, 3, 1), &habit).best_day, "N/A");
    }

    #[test]
    fn incomplete_today_breaks_current_streak() {
        let days = tracked(&["2025-02-27", "2025-02-28"]);
        assert_eq!(current_streak(&days, ymd(2025, 3, 1)), 0);
        assert_eq!(current_streak(&days, ymd(2025, 2, 28)), 2);
    }

    #[test]
    fn current_streak_stops_after_lookback() {
        let today = ymd(2025, 3, 1);
        let days: BTreeSet<DateKey> = (0..400u64)
            .map(|offset| DateKey::from(today - Days::new(offset)))
            .collect();
        assert_eq!(current_streak(&days, today), 366);
        assert_eq!(longest_streak(&days), 400);
    }

    #[test]
    fn longest_streak_handles_leap_day() {
        assert_eq!(longest_streak(&tracked(&["2024-02-28", "2024-02-29", "2024-03-01"])), 3);
        assert_eq!(longest_streak(&tracked(&["2025-02-28", "2025-03-01"])), 2);
        assert_eq!(longest_streak(&tracked(&["2024-02-28", "2024-03-01"])), 1);
        assert_eq!(longest_streak(&tracked(&["2024-12-31", "2025-01-01"])), 2);
        assert_eq!(longest_streak(&tracked(&["2025-06-01"])), 1);
    }

    #[test]
    fn longest_streak_never_below_current() {
        let days = february_sample();
        let mut today = ymd(2025, 2, 15);
        while today <= ymd(2025, 3, 10) {
            assert!(longest_streak(&days) >= current_streak(&days, today));
            today = today.succ_opt().unwrap();
        }
    }

    #[test]
    fn best_weekday_prefers_lowest_index_on_tie() {
        // 2025-02-23 is a Sunday, 2025-02-24 a Monday.
        let days = tracked(&["2025-02-23", "2025-02-24", "2025-03-02", "2025-03-03"]);
        assert_eq!(best_weekday(&days), Some(Weekday::Sun));

        let days = tracked(&["2025-02-24", "2025-03-03", "2025-02-28"]);
        assert_eq!(best_weekday(&days).map(weekday_name), Some("Monday"));
    }

    #[test]
    fn period_rate_clips_to_today() {
        let days = february_sample();
        // Mar 1 only: 1 of 1 elapsed days.
        assert_eq!(period_rate(&days, ymd(2025, 3, 1), ymd(2025, 3, 31), ymd(2025, 3, 1)), 100);
        // Feb: 6 of 28 days.
        assert_eq!(period_rate(&days, ymd(2025, 2, 1), ymd(2025, 2, 28), ymd(2025, 3, 1)), 21);
        assert_eq!(month_rate(&days, ymd(2025, 2, 20)), 15);
    }

    #[test]
    fn period_rate_with_no_elapsed_days_is_zero() {
        let days = february_sample();
        assert_eq!(period_rate(&days, ymd(2025, 4, 1), ymd(2025, 4, 30), ymd(2025, 3, 1)), 0);
        assert_eq!(period_rate(&days, ymd(2025, 3, 5), ymd(2025, 3, 1), ymd(2025, 3, 9)), 0);
    }

    #[test]
    fn year_rate_counts_year_to_date() {
        let days = tracked(&["2024-12-31", "2025-01-01", "2025-01-02", "2025-01-20"]);
        // 3 completions over the 20 days of 2025 elapsed.
        assert_eq!(year_rate(&days, ymd(2025, 1, 20)), 15);
    }

    #[test]
    fn stats_bundle_reports_each_metric() {
        let mut habit = Habit::new(7, "Walk".into(), String::new(), "#2196F3".into());
        habit.tracked_days = february_sample();
        let stats = build_stats_at(ymd(2025, 3, 1), &habit);
        assert_eq!(stats.current_streak, 3);
        assert_eq!(stats.longest_streak, 3);
        assert_eq!(stats.total_completions, 7);
        assert_eq!(stats.month_rate, 100);
        // Tuesday: Feb 18 and Feb 25.
        assert_eq!(stats.best_day, "Tuesday");
    }
}
