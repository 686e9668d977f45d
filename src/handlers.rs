use crate::dashboard::build_dashboard;
use crate::errors::{AppError, MoodError};
use crate::models::{AddMoodRequest, ClearRequest, ClickResponse, DashboardResponse, MoodEntry};
use crate::mood::{EXPORT_FILE_NAME, MoodStore};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
// Store mutations write the data file synchronously; they run under
// `block_in_place` so the worker is marked as blocking.
use tokio::task::block_in_place;
use tracing::warn;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let clicks = state.clicks.lock().await.count();
    let moods = state.moods.lock().await;
    let dashboard = build_dashboard(moods.list());
    Html(render_index(moods.list(), &dashboard, clicks))
}

pub async fn list_moods(State(state): State<AppState>) -> Json<Vec<MoodEntry>> {
    let moods = state.moods.lock().await;
    Json(moods.list().to_vec())
}

pub async fn add_mood(
    State(state): State<AppState>,
    Json(payload): Json<AddMoodRequest>,
) -> Result<Response, AppError> {
    let mut moods = state.moods.lock().await;
    match block_in_place(|| moods.add(&payload.text))? {
        Some(entry) => Ok((StatusCode::CREATED, Json(entry)).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

pub async fn delete_mood(
    State(state): State<AppState>,
    Path(index): Path<i64>,
) -> Result<Json<MoodEntry>, AppError> {
    let mut moods = state.moods.lock().await;
    let removed = remove_checked(&mut moods, index)?;
    Ok(Json(removed))
}

pub async fn clear_moods(
    State(state): State<AppState>,
    Query(request): Query<ClearRequest>,
) -> Result<StatusCode, AppError> {
    if !request.is_confirmed() {
        warn!("clear rejected without confirmation");
        return Err(AppError::bad_request("clearing all moods requires confirm=true"));
    }

    let mut moods = state.moods.lock().await;
    block_in_place(|| moods.clear())?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn export_moods(State(state): State<AppState>) -> Response {
    let moods = state.moods.lock().await;
    if moods.is_empty() {
        return StatusCode::NO_CONTENT.into_response();
    }

    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        moods.export(),
    )
        .into_response()
}

pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardResponse> {
    let moods = state.moods.lock().await;
    Json(build_dashboard(moods.list()))
}

pub async fn get_clicks(State(state): State<AppState>) -> Json<ClickResponse> {
    let clicks = state.clicks.lock().await;
    Json(ClickResponse {
        count: clicks.count(),
        achievement: None,
    })
}

pub async fn click(State(state): State<AppState>) -> Result<Json<ClickResponse>, AppError> {
    let mut clicks = state.clicks.lock().await;
    let achievement = block_in_place(|| clicks.increment())?;
    Ok(Json(ClickResponse {
        count: clicks.count(),
        achievement,
    }))
}

pub async fn form_add_mood(
    State(state): State<AppState>,
    Form(payload): Form<AddMoodRequest>,
) -> Result<Redirect, AppError> {
    let mut moods = state.moods.lock().await;
    block_in_place(|| moods.add(&payload.text))?;
    Ok(Redirect::to("/"))
}

pub async fn form_delete_mood(
    State(state): State<AppState>,
    Path(index): Path<i64>,
) -> Result<Redirect, AppError> {
    let mut moods = state.moods.lock().await;
    remove_checked(&mut moods, index)?;
    Ok(Redirect::to("/"))
}

pub async fn form_clear_moods(
    State(state): State<AppState>,
    Form(request): Form<ClearRequest>,
) -> Result<Redirect, AppError> {
    if !request.is_confirmed() {
        warn!("clear rejected without confirmation");
        return Err(AppError::bad_request("clearing all moods requires confirmation"));
    }

    let mut moods = state.moods.lock().await;
    block_in_place(|| moods.clear())?;
    Ok(Redirect::to("/"))
}

pub async fn form_click(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let mut clicks = state.clicks.lock().await;
    block_in_place(|| clicks.increment())?;
    Ok(Redirect::to("/"))
}

fn remove_checked(moods: &mut MoodStore, index: i64) -> Result<MoodEntry, AppError> {
    let len = moods.len();
    let position = usize::try_from(index).map_err(|_| MoodError::IndexOutOfRange { index, len })?;
    block_in_place(|| moods.remove_at(position)).map_err(|err| {
        warn!("rejected mood removal: {err}");
        AppError::from(err)
    })
}
