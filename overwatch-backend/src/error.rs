use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use overfast_client::OverFastError;

use crate::response::ApiResponse;
use crate::validation::ValidationError;

pub(crate) const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Application error type
#[derive(Debug)]
pub enum AppError {
  /// Malformed client input, never reaches the upstream
  Validation(ValidationError),
  /// The upstream answered with an error or could not be reached
  Upstream(OverFastError),
  /// Anything else; the detail is logged, never returned
  Internal(String),
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    let (status, message) = match self {
      AppError::Validation(err) => {
        tracing::warn!(validation_error = %err, "Validation failed");
        (StatusCode::BAD_REQUEST, err.client_message())
      }
      AppError::Upstream(err) => {
        let status = err
          .status_code()
          .and_then(|code| StatusCode::from_u16(code).ok())
          .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
          tracing::error!(error = ?err, %status, "Upstream request failed");
        } else {
          tracing::info!(error = %err, %status, "Upstream returned an error");
        }
        (status, err.to_string())
      }
      AppError::Internal(detail) => {
        // Don't expose internal details
        tracing::error!(%detail, "Internal error occurred");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          INTERNAL_ERROR_MESSAGE.to_string(),
        )
      }
    };

    (status, Json(ApiResponse::error(message))).into_response()
  }
}

impl From<OverFastError> for AppError {
  fn from(err: OverFastError) -> Self {
    match err {
      OverFastError::Decode(_) | OverFastError::InvalidUrl(_) => AppError::Internal(err.to_string()),
      OverFastError::NotFound
      | OverFastError::ServerError
      | OverFastError::Unavailable
      | OverFastError::Api { .. }
      | OverFastError::Timeout
      | OverFastError::Transport(_) => AppError::Upstream(err),
    }
  }
}

impl From<ValidationError> for AppError {
  fn from(err: ValidationError) -> Self {
    AppError::Validation(err)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_status_codes() {
    let cases = [
      (AppError::Validation(ValidationError::BattleTagInvalid), 400),
      (AppError::from(OverFastError::NotFound), 404),
      (AppError::from(OverFastError::ServerError), 500),
      (AppError::from(OverFastError::Unavailable), 504),
      (
        AppError::from(OverFastError::Api {
          status: 429,
          message: "slow down".into(),
        }),
        429,
      ),
      (AppError::from(OverFastError::Decode("bad json".into())), 500),
      (AppError::Internal("boom".into()), 500),
    ];

    for (err, expected) in cases {
      assert_eq!(err.into_response().status().as_u16(), expected);
    }
  }

  #[test]
  fn test_decode_errors_are_internal() {
    assert!(matches!(
      AppError::from(OverFastError::Decode("missing field `summary`".into())),
      AppError::Internal(_)
    ));
  }
}
