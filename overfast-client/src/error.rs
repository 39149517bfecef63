use thiserror::Error;

#[derive(Debug, Error)]
pub enum OverFastError {
    #[error("Player not found")]
    NotFound,

    #[error("Internal server error from Overwatch API")]
    ServerError,

    #[error("Blizzard servers are temporarily unavailable")]
    Unavailable,

    #[error("API Error: {message}")]
    Api { status: u16, message: String },

    #[error("Overwatch API request timed out")]
    Timeout,

    #[error("Unable to reach Overwatch API")]
    Transport(#[source] reqwest::Error),

    #[error("unexpected payload from Overwatch API: {0}")]
    Decode(String),

    #[error("invalid upstream url: {0}")]
    InvalidUrl(String),
}

impl OverFastError {
    /// Builds the error for a non-2xx upstream response.
    ///
    /// The body is only consulted for statuses without a dedicated variant,
    /// where its `message` (or `detail`) string becomes the error text.
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        match status.as_u16() {
            404 => OverFastError::NotFound,
            500 => OverFastError::ServerError,
            504 => OverFastError::Unavailable,
            code => OverFastError::Api {
                status: code,
                message: upstream_message(body).unwrap_or_else(|| {
                    format!(
                        "HTTP {}: {}",
                        code,
                        status.canonical_reason().unwrap_or("Unknown Status")
                    )
                }),
            },
        }
    }

    /// HTTP status to surface to callers, `None` for failures that are not
    /// the upstream's fault.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            OverFastError::NotFound => Some(404),
            OverFastError::ServerError => Some(500),
            OverFastError::Unavailable => Some(504),
            OverFastError::Api { status, .. } => Some(*status),
            OverFastError::Timeout => Some(504),
            OverFastError::Transport(_) => Some(502),
            OverFastError::Decode(_) | OverFastError::InvalidUrl(_) => None,
        }
    }
}

impl From<reqwest::Error> for OverFastError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            OverFastError::Timeout
        } else if err.is_decode() {
            OverFastError::Decode(err.to_string())
        } else {
            OverFastError::Transport(err)
        }
    }
}

fn upstream_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "detail"]
        .iter()
        .find_map(|key| value.get(key).and_then(|v| v.as_str()))
        .filter(|msg| !msg.is_empty())
        .map(str::to_string)
}

pub type Result<T> = std::result::Result<T, OverFastError>;

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_specialised_statuses() {
        let not_found = OverFastError::from_status(StatusCode::NOT_FOUND, "");
        assert!(matches!(not_found, OverFastError::NotFound));
        assert_eq!(not_found.to_string(), "Player not found");
        assert_eq!(not_found.status_code(), Some(404));

        let internal = OverFastError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(
            internal.to_string(),
            "Internal server error from Overwatch API"
        );
        assert_eq!(internal.status_code(), Some(500));

        let gateway = OverFastError::from_status(StatusCode::GATEWAY_TIMEOUT, "");
        assert_eq!(
            gateway.to_string(),
            "Blizzard servers are temporarily unavailable"
        );
        assert_eq!(gateway.status_code(), Some(504));
    }

    #[test]
    fn test_message_extracted_from_body() {
        let err = OverFastError::from_status(
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"message": "Rate limit reached"}"#,
        );
        assert_eq!(err.to_string(), "API Error: Rate limit reached");
        assert_eq!(err.status_code(), Some(429));
    }

    #[test]
    fn test_detail_used_when_message_missing() {
        let err = OverFastError::from_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail": "Invalid player id"}"#,
        );
        assert_eq!(err.to_string(), "API Error: Invalid player id");
        assert_eq!(err.status_code(), Some(422));
    }

    #[test]
    fn test_non_json_body_falls_back_to_status_line() {
        let err = OverFastError::from_status(StatusCode::BAD_REQUEST, "<html>oops</html>");
        assert_eq!(err.to_string(), "API Error: HTTP 400: Bad Request");

        // structured detail (validation lists) is not a string
        let err = OverFastError::from_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail": [{"loc": ["query"]}]}"#,
        );
        assert_eq!(
            err.to_string(),
            "API Error: HTTP 422: Unprocessable Entity"
        );
    }

    #[test]
    fn test_internal_kinds_have_no_status() {
        assert_eq!(OverFastError::Decode("bad".into()).status_code(), None);
        assert_eq!(OverFastError::InvalidUrl("bad".into()).status_code(), None);
        assert_eq!(OverFastError::Timeout.status_code(), Some(504));
    }
}
