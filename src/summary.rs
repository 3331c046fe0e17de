use crate::calendar::year_start;
use crate::models::Habit;
use crate::stats::{completions_between, elapsed_days, longest_streak, month_rate, percentage, total_completions};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SummaryStats {
    NoData,
    Ready(SummaryReport),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryReport {
    pub total_habits: usize,
    pub overall_rate: u32,
    pub most_consistent: Highlight,
    pub longest_streak: Highlight,
    pub most_completions: Highlight,
}

/// The habit that won a category, with its winning value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub habit_id: u64,
    pub name: String,
    pub value: u64,
}

pub fn summarize(habits: &[Habit], today: NaiveDate) -> SummaryStats {
    let highlights = (
        first_max_by(habits, |habit| u64::from(month_rate(&habit.tracked_days, today))),
        first_max_by(habits, |habit| u64::from(longest_streak(&habit.tracked_days))),
        first_max_by(habits, |habit| total_completions(&habit.tracked_days) as u64),
    );
    let (Some(most_consistent), Some(longest_streak), Some(most_completions)) = highlights else {
        return SummaryStats::NoData;
    };

    SummaryStats::Ready(SummaryReport {
        total_habits: habits.len(),
        overall_rate: overall_rate(habits, today),
        most_consistent,
        longest_streak,
        most_completions,
    })
}

/// Year-to-date completions across all habits over `elapsed days x habits`.
/// Untouched habits still count in the denominator.
pub fn overall_rate(habits: &[Habit], today: NaiveDate) -> u32 {
    let Some(jan1) = year_start(today) else {
        return 0;
    };
    let completed: u64 = habits
        .iter()
        .map(|habit| completions_between(&habit.tracked_days, jan1, today) as u64)
        .sum();
    percentage(completed, elapsed_days(jan1, today) * habits.len() as u64)
}

/// Highest scorer; on a tie the earliest habit in list order wins.
fn first_max_by(habits: &[Habit], score: impl Fn(&Habit) -> u64) -> Option<Highlight> {
    let mut best: Option<(&Habit, u64)> = None;
    for habit in habits {
        let value = score(habit);
        if best.is_none_or(|(_, max)| value > max) {
            best = Some((habit, value));
        }
    }
    best.map(|(habit, value)| Highlight {
        habit_id: habit.id,
        name: habit.name.clone(),
        value,
    })
}
