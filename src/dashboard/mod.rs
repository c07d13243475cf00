use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::models::ScheduleMode;
use crate::sources::{MlbSource, NbaSource, ScheduleSource};

mod pages;

#[derive(Clone)]
pub struct AppState {
    pub mlb: Arc<MlbSource>,
    pub nba: Arc<NbaSource>,
}

/// Build the Axum router for the dashboard.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home_page))
        .route("/mlb", get(mlb_index))
        .route("/nba", get(nba_index))
        .route("/game/:game_pk", get(mlb_game_page))
        .route("/nba/game/:game_id", get(nba_game_page))
        .route("/api/teams", get(mlb_teams_handler))
        .route("/api/schedule", get(mlb_schedule_handler))
        .route("/api/game/:game_pk", get(mlb_game_handler))
        .route("/nba/api/teams", get(nba_teams_handler))
        .route("/nba/api/schedule", get(nba_schedule_handler))
        .route("/nba/api/game/:game_id", get(nba_game_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Query parameters of the schedule endpoints.
#[derive(Debug, Deserialize)]
struct ScheduleQuery {
    #[serde(rename = "teamId")]
    team_id: Option<i64>,
    days: Option<u32>,
    mode: Option<String>,
}

impl ScheduleQuery {
    fn mode(&self) -> ScheduleMode {
        ScheduleMode::parse(self.mode.as_deref().unwrap_or("future"))
    }

    fn days(&self) -> u32 {
        self.days.unwrap_or(7)
    }
}

// ── HTML pages ───────────────────────────────────────────────────────────────

async fn home_page() -> Html<&'static str> {
    Html(pages::HOME_HTML)
}

async fn mlb_index() -> Html<&'static str> {
    Html(pages::MLB_INDEX_HTML)
}

async fn nba_index() -> Html<&'static str> {
    Html(pages::NBA_INDEX_HTML)
}

async fn mlb_game_page() -> Html<&'static str> {
    Html(pages::MLB_GAME_HTML)
}

async fn nba_game_page() -> Html<&'static str> {
    Html(pages::NBA_GAME_HTML)
}

// ── JSON API ─────────────────────────────────────────────────────────────────

/// GET /api/teams
async fn mlb_teams_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.mlb.teams())
}

/// GET /nba/api/teams
async fn nba_teams_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.nba.teams().to_vec())
}

/// GET /api/schedule?teamId=147&days=7&mode=future
async fn mlb_schedule_handler(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ScheduleQuery>,
) -> impl IntoResponse {
    Json(state.mlb.schedule(q.team_id, q.days(), q.mode()).await)
}

/// GET /nba/api/schedule?teamId=1&days=7&mode=past
async fn nba_schedule_handler(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ScheduleQuery>,
) -> impl IntoResponse {
    Json(state.nba.schedule(q.team_id, q.days(), q.mode()).await)
}

/// GET /api/game/745001. 404 only when the id cannot be resolved.
async fn mlb_game_handler(
    State(state): State<Arc<AppState>>,
    Path(game_pk): Path<i64>,
) -> Result<impl IntoResponse, StatusCode> {
    state
        .mlb
        .game_page(game_pk)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// GET /nba/api/game/18447091
async fn nba_game_handler(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<i64>,
) -> Result<impl IntoResponse, StatusCode> {
    state
        .nba
        .game_page(game_id)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_query_defaults() {
        let q = ScheduleQuery {
            team_id: None,
            days: None,
            mode: None,
        };
        assert_eq!(q.days(), 7);
        assert_eq!(q.mode(), ScheduleMode::Future);
    }

    #[test]
    fn schedule_query_honors_past_mode() {
        let q = ScheduleQuery {
            team_id: Some(147),
            days: Some(14),
            mode: Some("past".to_string()),
        };
        assert_eq!(q.days(), 14);
        assert_eq!(q.mode(), ScheduleMode::Past);
    }
}
