use crate::calendar;
use crate::errors::AppError;
use crate::models::{
    MarkerRequest, NavigateRequest, OpenRequest, SelectRequest, StatsView, TrackerView, WeekStatus,
};
use crate::overlay::{self, SelectOutcome, MARKER_COUNT};
use crate::state::{AppState, Session};
use crate::stats::build_stats;
use crate::storage::save_in_background;
use crate::ui::render_index;
use axum::{extract::State, response::Html, Json};
use chrono::NaiveDate;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let session = state.session.lock().await;
    let stats = build_stats(&session.weeks);
    Html(render_index(
        &calendar::month_label(session.reference),
        &stats,
    ))
}

pub async fn get_view(State(state): State<AppState>) -> Json<TrackerView> {
    let session = state.session.lock().await;
    Json(build_view(&session))
}

pub async fn get_stats(State(state): State<AppState>) -> Json<StatsView> {
    let session = state.session.lock().await;
    Json(build_stats(&session.weeks))
}

pub async fn open_overlay(
    State(state): State<AppState>,
    Json(payload): Json<OpenRequest>,
) -> Result<Json<TrackerView>, AppError> {
    let date: NaiveDate = payload
        .week_start
        .trim()
        .parse()
        .map_err(|_| AppError::bad_request("week_start must be an ISO date (YYYY-MM-DD)"))?;

    let mut session = state.session.lock().await;
    let opened = overlay::open(&session.weeks, date);
    session.overlay = opened;
    Ok(Json(build_view(&session)))
}

pub async fn close_overlay(State(state): State<AppState>) -> Json<TrackerView> {
    let mut session = state.session.lock().await;
    overlay::close(&mut session.overlay);
    Json(build_view(&session))
}

pub async fn select_status(
    State(state): State<AppState>,
    Json(payload): Json<SelectRequest>,
) -> Result<Json<TrackerView>, AppError> {
    let status = WeekStatus::parse(payload.status.trim()).ok_or_else(|| {
        AppError::bad_request("status must be complete, partial, none, or nothing-done")
    })?;

    let mut session = state.session.lock().await;
    let Session {
        weeks,
        overlay: selection,
        ..
    } = &mut *session;

    match overlay::select_status(selection, weeks, status) {
        SelectOutcome::NotOpen => return Err(AppError::bad_request("no week is selected")),
        SelectOutcome::Cleared | SelectOutcome::Recorded => {
            save_in_background(state.data_path.clone(), session.weeks.clone());
        }
        SelectOutcome::AwaitingBonus => {}
    }

    Ok(Json(build_view(&session)))
}

pub async fn toggle_marker(
    State(state): State<AppState>,
    Json(payload): Json<MarkerRequest>,
) -> Result<Json<TrackerView>, AppError> {
    if payload.value < 1 || payload.value > MARKER_COUNT {
        return Err(AppError::bad_request("marker value must be between 1 and 5"));
    }

    let mut session = state.session.lock().await;
    if !overlay::toggle_marker(&mut session.overlay, payload.value) {
        return Err(AppError::bad_request("no bonus selection is pending"));
    }
    Ok(Json(build_view(&session)))
}

pub async fn confirm_bonus(
    State(state): State<AppState>,
) -> Result<Json<TrackerView>, AppError> {
    let mut session = state.session.lock().await;
    let Session {
        weeks,
        overlay: selection,
        ..
    } = &mut *session;

    if !overlay::confirm_bonus(selection, weeks) {
        return Err(AppError::bad_request("no bonus selection is pending"));
    }
    save_in_background(state.data_path.clone(), session.weeks.clone());

    Ok(Json(build_view(&session)))
}

pub async fn navigate(
    State(state): State<AppState>,
    Json(payload): Json<NavigateRequest>,
) -> Result<Json<TrackerView>, AppError> {
    let mut session = state.session.lock().await;
    session.reference = match payload.direction.trim() {
        "prev" => calendar::previous_month(session.reference),
        "next" => calendar::next_month(session.reference),
        _ => return Err(AppError::bad_request("direction must be 'prev' or 'next'")),
    };
    Ok(Json(build_view(&session)))
}

fn build_view(session: &Session) -> TrackerView {
    TrackerView {
        calendar: calendar::build_calendar(session.reference, &session.weeks),
        stats: build_stats(&session.weeks),
        overlay: overlay::view(&session.overlay),
    }
}
