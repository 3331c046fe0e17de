use crate::calendar::build_window;
use crate::date_key::DateKey;
use crate::errors::AppError;
use crate::models::{
    ColorOption, GridResponse, Habit, HabitDraft, HabitResponse, PALETTE, ToggleRequest,
    ToggleResponse, WindowQuery,
};
use crate::navigation::{NavigateQuery, NavigationState, NavigationView};
use crate::state::AppState;
use crate::stats::{HabitStats, build_stats_at};
use crate::summary::{SummaryStats, summarize};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use tracing::{debug, info};

pub async fn list_habits(State(state): State<AppState>) -> Json<Vec<HabitResponse>> {
    let today = state.today();
    let data = state.data.lock().await;
    Json(data.habits.iter().map(|habit| to_response(habit, today)).collect())
}

pub async fn get_habit(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<HabitResponse>, AppError> {
    let today = state.today();
    let data = state.data.lock().await;
    let habit = data.get(id).ok_or_else(|| AppError::habit_not_found(id))?;
    Ok(Json(to_response(habit, today)))
}

pub async fn create_habit(
    State(state): State<AppState>,
    Json(draft): Json<HabitDraft>,
) -> Result<(StatusCode, Json<HabitResponse>), AppError> {
    let draft = draft.validate()?;
    let today = state.today();
    let mut data = state.data.lock().await;
    let response = to_response(data.create(draft), today);

    state.store.save(&data).await?;
    info!(habit_id = response.habit.id, name = %response.habit.name, "created habit");

    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn update_habit(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(draft): Json<HabitDraft>,
) -> Result<Json<HabitResponse>, AppError> {
    let draft = draft.validate()?;
    let today = state.today();
    let mut data = state.data.lock().await;
    let response = {
        let habit = data.get_mut(id).ok_or_else(|| AppError::habit_not_found(id))?;
        habit.apply_draft(draft);
        to_response(habit, today)
    };

    state.store.save(&data).await?;
    info!(habit_id = id, "updated habit");

    Ok(Json(response))
}

pub async fn delete_habit(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    let mut data = state.data.lock().await;
    let removed = data.remove(id).ok_or_else(|| AppError::habit_not_found(id))?;

    state.store.save(&data).await?;
    info!(habit_id = id, name = %removed.name, "deleted habit");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn toggle_day(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<ToggleResponse>, AppError> {
    let today = state.today();
    let mut data = state.data.lock().await;
    let (outcome, response) = {
        let habit = data.get_mut(id).ok_or_else(|| AppError::habit_not_found(id))?;
        let outcome = habit.toggle(payload.date.clone(), today);
        let response = ToggleResponse {
            habit_id: id,
            completed: habit.is_completed(&payload.date),
            date: payload.date,
            outcome,
            stats: build_stats_at(today, habit),
        };
        (outcome, response)
    };

    if outcome.changed() {
        state.store.save(&data).await?;
        info!(habit_id = id, date = %response.date, ?outcome, "toggled day");
    } else {
        debug!(habit_id = id, date = %response.date, "ignored toggle of a future day");
    }

    Ok(Json(response))
}

pub async fn get_grid(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<GridResponse>, AppError> {
    let today = state.today();
    let nav = NavigationState::new(query.view, anchor_or_today(query.anchor.as_ref(), today));
    let data = state.data.lock().await;
    let habit = data.get(id).ok_or_else(|| AppError::habit_not_found(id))?;

    Ok(Json(GridResponse {
        habit_id: id,
        navigation: nav.view(today),
        cells: build_window(&habit.tracked_days, nav.view_mode, nav.anchor, today),
    }))
}

pub async fn get_stats(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<HabitStats>, AppError> {
    let today = state.today();
    let data = state.data.lock().await;
    let habit = data.get(id).ok_or_else(|| AppError::habit_not_found(id))?;
    Ok(Json(build_stats_at(today, habit)))
}

pub async fn get_summary(State(state): State<AppState>) -> Json<SummaryStats> {
    let today = state.today();
    let data = state.data.lock().await;
    Json(summarize(&data.habits, today))
}

/// Stateless: the client owns its navigation state and sends it back.
pub async fn navigate(
    State(state): State<AppState>,
    Query(query): Query<NavigateQuery>,
) -> Json<NavigationView> {
    let today = state.today();
    let mut nav = NavigationState::new(query.view, anchor_or_today(query.anchor.as_ref(), today));
    if let Some(direction) = query.direction {
        nav = nav.navigate(direction, today);
    }
    Json(nav.view(today))
}

pub async fn palette() -> Json<&'static [ColorOption]> {
    Json(&PALETTE)
}

fn anchor_or_today(anchor: Option<&DateKey>, today: NaiveDate) -> NaiveDate {
    anchor.map_or(today, |key| key.date())
}

fn to_response(habit: &Habit, today: NaiveDate) -> HabitResponse {
    HabitResponse {
        stats: build_stats_at(today, habit),
        habit: habit.clone(),
    }
}
