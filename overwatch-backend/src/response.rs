use crate::helpers::timestamp;
use serde::Serialize;

/// Envelope wrapping every API response
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
  pub success: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data: Option<T>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
  pub timestamp: String,
}

impl<T: Serialize> ApiResponse<T> {
  pub fn ok(data: T, message: impl Into<String>) -> Self {
    Self {
      success: true,
      data: Some(data),
      message: Some(message.into()),
      error: None,
      timestamp: timestamp(),
    }
  }
}

impl ApiResponse<()> {
  pub fn error(error: impl Into<String>) -> Self {
    Self {
      success: false,
      data: None,
      message: None,
      error: Some(error.into()),
      timestamp: timestamp(),
    }
  }

  pub fn with_message(mut self, message: impl Into<String>) -> Self {
    self.message = Some(message.into());
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_success_envelope() {
    let body = serde_json::to_value(ApiResponse::ok(vec![1, 2], "done")).unwrap();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"], json!([1, 2]));
    assert_eq!(body["message"], json!("done"));
    assert!(body.get("error").is_none());
    assert!(body["timestamp"].is_string());
  }

  #[test]
  fn test_error_envelope() {
    let body = serde_json::to_value(ApiResponse::error("Player not found")).unwrap();
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Player not found"));
    assert!(body.get("data").is_none());
    assert!(body.get("message").is_none());
  }

  #[test]
  fn test_null_data_is_kept_as_null() {
    // a private profile has no stats, which is still a successful lookup
    let body = serde_json::to_value(ApiResponse::ok(None::<u32>, "ok")).unwrap();
    assert_eq!(body.get("data"), Some(&serde_json::Value::Null));
  }
}
