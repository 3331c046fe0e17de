use crate::models::HabitData;
use crate::storage::JsonFileStore;
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared by every handler. The mutex is the single writer lock for the
/// habit list, so concurrent toggles on one habit cannot lose updates.
#[derive(Clone)]
pub struct AppState {
    pub store: JsonFileStore,
    pub data: Arc<Mutex<HabitData>>,
    fixed_today: Option<NaiveDate>,
}

impl AppState {
    pub fn new(store: JsonFileStore, data: HabitData, fixed_today: Option<NaiveDate>) -> Self {
        Self {
            store,
            data: Arc::new(Mutex::new(data)),
            fixed_today,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.fixed_today.unwrap_or_else(|| Local::now().date_naive())
    }
}
