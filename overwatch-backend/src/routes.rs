use crate::AppState;
use crate::error::AppError;
use crate::helpers::timestamp;
use crate::response::ApiResponse;
use crate::validation;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_macros::debug_handler;
use overfast_client::{FullPlayerData, PlayerSearchResult, PlayerStats, PlayerSummary};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

#[derive(Deserialize)]
pub(crate) struct SearchQuery {
    name: Option<String>,
    battletag: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct PlayerQuery {
    platform: Option<String>,
    gamemode: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct SummaryQuery {
    platform: Option<String>,
}

#[derive(Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
    timestamp: String,
    /// Seconds since the server started
    uptime: f64,
    service: &'static str,
    version: &'static str,
}

#[debug_handler]
pub(crate) async fn search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Vec<PlayerSearchResult>> {
    let raw = query
        .name
        .as_deref()
        .filter(|name| !name.is_empty())
        .or(query.battletag.as_deref());
    let term = validation::validate_search_term(raw)?;

    let results = state.client.search_players(term).await;
    let message = format!("Found {} players matching \"{}\"", results.len(), term);

    Ok(Json(ApiResponse::ok(results, message)))
}

#[debug_handler]
pub(crate) async fn user(
    State(state): State<Arc<AppState>>,
    Path(battletag): Path<String>,
    Query(query): Query<PlayerQuery>,
) -> ApiResult<FullPlayerData> {
    let battletag = validation::validate_battletag(&battletag)?;
    let platform = validation::validate_platform(query.platform.as_deref())?;
    let gamemode = validation::validate_gamemode(query.gamemode.as_deref())?;

    let data = state
        .client
        .get_player_data(battletag, Some(platform), gamemode)
        .await?;

    Ok(Json(ApiResponse::ok(data, "User data retrieved successfully")))
}

#[debug_handler]
pub(crate) async fn summary(
    State(state): State<Arc<AppState>>,
    Path(battletag): Path<String>,
    Query(query): Query<SummaryQuery>,
) -> ApiResult<PlayerSummary> {
    let battletag = validation::validate_battletag(&battletag)?;
    let platform = validation::validate_platform(query.platform.as_deref())?;

    let data = state
        .client
        .get_player_data(battletag, Some(platform), None)
        .await?;

    Ok(Json(ApiResponse::ok(
        data.summary,
        "User summary retrieved successfully",
    )))
}

#[debug_handler]
pub(crate) async fn stats(
    State(state): State<Arc<AppState>>,
    Path(battletag): Path<String>,
    Query(query): Query<PlayerQuery>,
) -> ApiResult<Option<PlayerStats>> {
    let battletag = validation::validate_battletag(&battletag)?;
    let platform = validation::validate_platform(query.platform.as_deref())?;
    let gamemode = validation::validate_gamemode(query.gamemode.as_deref())?;

    let data = state
        .client
        .get_player_data(battletag, Some(platform), gamemode)
        .await?;

    let mode = gamemode.map(|m| format!("{m} ")).unwrap_or_default();
    Ok(Json(ApiResponse::ok(
        data.stats,
        format!("User {mode}stats retrieved successfully"),
    )))
}

/// Upstream payload as-is, unknown fields included.
#[debug_handler]
pub(crate) async fn full(
    State(state): State<Arc<AppState>>,
    Path(battletag): Path<String>,
    Query(query): Query<PlayerQuery>,
) -> ApiResult<serde_json::Value> {
    let battletag = validation::validate_battletag(&battletag)?;
    let platform = validation::validate_platform(query.platform.as_deref())?;
    let gamemode = validation::validate_gamemode(query.gamemode.as_deref())?;

    let data = state
        .client
        .get_player_data_raw(battletag, Some(platform), gamemode)
        .await?;

    Ok(Json(ApiResponse::ok(
        data,
        "Full user data retrieved successfully",
    )))
}

pub(crate) async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: timestamp(),
        uptime: state.started_at.elapsed().as_secs_f64(),
        service: "Overwatch API Client",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub(crate) async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::error("Not Found").with_message("The requested endpoint does not exist")),
    )
}
