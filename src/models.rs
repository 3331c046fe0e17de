use crate::calendar::{CalendarCell, ViewMode};
use crate::date_key::DateKey;
use crate::navigation::NavigationView;
use crate::stats::HabitStats;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const NAME_MAX_CHARS: usize = 50;
pub const DESCRIPTION_MAX_CHARS: usize = 200;
pub const DEFAULT_COLOR: &str = "#4CAF50";

pub const PALETTE: [ColorOption; 6] = [
    ColorOption { name: "Green", value: "#4CAF50" },
    ColorOption { name: "Blue", value: "#2196F3" },
    ColorOption { name: "Purple", value: "#9C27B0" },
    ColorOption { name: "Orange", value: "#FF9800" },
    ColorOption { name: "Red", value: "#F44336" },
    ColorOption { name: "Teal", value: "#009688" },
];

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ColorOption {
    pub name: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub color: String,
    #[serde(default, with = "tracked_days")]
    pub tracked_days: BTreeSet<DateKey>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleOutcome {
    Added,
    Removed,
    RejectedFuture,
}

impl ToggleOutcome {
    pub fn changed(self) -> bool {
        !matches!(self, Self::RejectedFuture)
    }
}

impl Habit {
    pub fn new(id: u64, name: String, description: String, color: String) -> Self {
        Self {
            id,
            name,
            description,
            color,
            tracked_days: BTreeSet::new(),
        }
    }

    pub fn is_completed(&self, key: &DateKey) -> bool {
        self.tracked_days.contains(key)
    }

    /// Flips completion of `key`. Days after `today` are left untouched.
    pub fn toggle(&mut self, key: DateKey, today: NaiveDate) -> ToggleOutcome {
        if key.date() > today {
            return ToggleOutcome::RejectedFuture;
        }
        if self.tracked_days.remove(&key) {
            ToggleOutcome::Removed
        } else {
            self.tracked_days.insert(key);
            ToggleOutcome::Added
        }
    }

    /// Replaces name, description and color. Completion history is kept.
    pub fn apply_draft(&mut self, draft: HabitDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.color = draft.color;
    }
}

/// The habit list as persisted: a JSON array of habits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitData {
    pub habits: Vec<Habit>,
}

impl HabitData {
    pub fn get(&self, id: u64) -> Option<&Habit> {
        self.habits.iter().find(|habit| habit.id == id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Habit> {
        self.habits.iter_mut().find(|habit| habit.id == id)
    }

    pub fn next_id(&self) -> u64 {
        self.habits.iter().map(|habit| habit.id).max().unwrap_or(0) + 1
    }

    pub fn create(&mut self, draft: HabitDraft) -> &Habit {
        let habit = Habit::new(self.next_id(), draft.name, draft.description, draft.color);
        self.habits.push(habit);
        &self.habits[self.habits.len() - 1]
    }

    pub fn remove(&mut self, id: u64) -> Option<Habit> {
        let index = self.habits.iter().position(|habit| habit.id == id)?;
        Some(self.habits.remove(index))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("habit name must not be empty")]
    EmptyName,
    #[error("habit name must be at most {max} characters", max = NAME_MAX_CHARS)]
    NameTooLong,
    #[error("description must be at most {max} characters", max = DESCRIPTION_MAX_CHARS)]
    DescriptionTooLong,
    #[error("color must be a #RRGGBB hex value, got {0:?}")]
    InvalidColor(String),
}

/// Habit metadata as submitted by a client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HabitDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

impl HabitDraft {
    pub fn validate(self) -> Result<Self, ValidationError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if name.chars().count() > NAME_MAX_CHARS {
            return Err(ValidationError::NameTooLong);
        }

        let description = self.description.trim().to_string();
        if description.chars().count() > DESCRIPTION_MAX_CHARS {
            return Err(ValidationError::DescriptionTooLong);
        }

        let color = self.color.trim().to_string();
        let is_hex = color.len() == 7
            && color.starts_with('#')
            && color[1..].chars().all(|ch| ch.is_ascii_hexdigit());
        if !is_hex {
            return Err(ValidationError::InvalidColor(color));
        }

        Ok(Self {
            name,
            description,
            color: color.to_ascii_uppercase(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub date: DateKey,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub habit_id: u64,
    pub date: DateKey,
    pub outcome: ToggleOutcome,
    pub completed: bool,
    pub stats: HabitStats,
}

#[derive(Debug, Serialize)]
pub struct HabitResponse {
    #[serde(flatten)]
    pub habit: Habit,
    pub stats: HabitStats,
}

#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    #[serde(default)]
    pub view: ViewMode,
    pub anchor: Option<DateKey>,
}

#[derive(Debug, Serialize)]
pub struct GridResponse {
    pub habit_id: u64,
    pub navigation: NavigationView,
    pub cells: Vec<CalendarCell>,
}

/// `trackedDays` is stored as `{ "YYYY-MM-DD": true }`. Keys are validated on
/// load and entries set to `false` are dropped.
mod tracked_days {
    use crate::date_key::DateKey;
    use serde::{Deserialize, Deserializer, Serializer, de::Error, ser::SerializeMap};
    use std::collections::{BTreeMap, BTreeSet};

    pub fn serialize<S: Serializer>(days: &BTreeSet<DateKey>, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(days.len()))?;
        for key in days {
            map.serialize_entry(key.as_str(), &true)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BTreeSet<DateKey>, D::Error> {
        let raw = BTreeMap::<String, bool>::deserialize(deserializer)?;
        raw.into_iter()
            .filter(|(_, completed)| *completed)
            .map(|(key, _)| DateKey::try_from(key).map_err(D::Error::custom))
            .collect()
    }
}
