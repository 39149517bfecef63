pub mod config;
mod docs;
mod error;
pub mod helpers;
mod response;
mod routes;
mod validation;

pub use error::AppError;
pub use response::ApiResponse;

use axum::{
    Json, Router,
    body::HttpBody,
    http::{Method, StatusCode, header},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use overfast_client::OverFastClient;
use std::any::Any;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_governor::{
    GovernorError, GovernorLayer, governor::GovernorConfigBuilder,
    key_extractor::SmartIpKeyExtractor,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

const REQUEST_TIMEOUT_MESSAGE: &str = "Request timed out";

pub struct AppState {
    pub client: OverFastClient,
    pub started_at: Instant,
}

/// Rate limiting configuration for the /api routes
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Requests per second per client IP
    pub per_sec: u64,
    /// Burst size
    pub burst: u32,
}

impl RateLimitConfig {
    /// Time after which one request of the burst is replenished
    pub fn replenish_interval(&self) -> Duration {
        let nanos = 1_000_000_000 / self.per_sec.max(1);
        Duration::from_nanos(nanos.max(1))
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_sec: 10,
            burst: 30,
        }
    }
}

/// Create the application router around an already configured upstream client
pub fn create_app(
    client: OverFastClient,
    request_timeout: Duration,
    rate_limit: RateLimitConfig,
) -> Router {
    let state = Arc::new(AppState {
        client,
        started_at: Instant::now(),
    });

    // Every /api call costs at least one upstream request
    let api_governor = GovernorConfigBuilder::default()
        .period(rate_limit.replenish_interval())
        .burst_size(rate_limit.burst.max(1))
        .key_extractor(SmartIpKeyExtractor)
        .finish()
        .expect("rate limit period and burst are non-zero");

    let api_routes = Router::new()
        .route("/api/search", get(routes::search))
        .route("/api/user/{battletag}", get(routes::user))
        .route("/api/user/{battletag}/summary", get(routes::summary))
        .route("/api/user/{battletag}/stats", get(routes::stats))
        .route("/api/user/{battletag}/full", get(routes::full))
        .layer(GovernorLayer::new(api_governor).error_handler(handle_rate_limit));

    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/", get(docs::index))
        .route("/docs", get(docs::reference))
        .route("/docs/openapi.json", get(docs::openapi))
        .route("/health", get(routes::health))
        .merge(api_routes)
        .fallback(routes::not_found)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(middleware::map_response(handle_timeout))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn handle_rate_limit(err: GovernorError) -> Response {
    match err {
        GovernorError::TooManyRequests { wait_time, headers } => {
            tracing::debug!(wait_time, "Rate limit exceeded");
            let mut response = (
                StatusCode::TOO_MANY_REQUESTS,
                Json(ApiResponse::error(format!("Too many requests, retry in {wait_time}s"))),
            )
                .into_response();
            // keeps retry-after / x-ratelimit-after
            if let Some(headers) = headers {
                response.headers_mut().extend(headers);
            }
            response
        }
        GovernorError::UnableToExtractKey => {
            tracing::error!("Unable to extract client IP for rate limiting");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(error::INTERNAL_ERROR_MESSAGE)),
            )
                .into_response()
        }
        GovernorError::Other { code, msg, headers } => {
            let message = msg.unwrap_or_else(|| error::INTERNAL_ERROR_MESSAGE.to_string());
            let mut response = (code, Json(ApiResponse::error(message))).into_response();
            if let Some(headers) = headers {
                response.headers_mut().extend(headers);
            }
            response
        }
    }
}

/// Gives the bodyless 408 of the timeout layer the usual error envelope
async fn handle_timeout(response: Response) -> Response {
    let bodyless = response.body().size_hint().exact() == Some(0);
    if response.status() != StatusCode::REQUEST_TIMEOUT || !bodyless {
        return response;
    }
    tracing::warn!("Request exceeded the whole-request timeout");
    (
        StatusCode::REQUEST_TIMEOUT,
        Json(ApiResponse::error(REQUEST_TIMEOUT_MESSAGE)),
    )
        .into_response()
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(%detail, "Unhandled error while serving request");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::error(error::INTERNAL_ERROR_MESSAGE)),
    )
        .into_response()
}
