//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every failure is rendered as `{"code": "...", "message": "..."}` with a
//! status fixed by the error's [`ErrorKind`].

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use quora_core::{Error, ErrorKind};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub Error);

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match (self.0.kind(), &self.0) {
      (_, Error::DuplicateQuestion) => StatusCode::CONFLICT,
      (ErrorKind::AuthenticationFailed, _) => StatusCode::UNAUTHORIZED,
      (ErrorKind::AuthorizationFailed, _) => StatusCode::FORBIDDEN,
      (ErrorKind::InvalidContent, _) => StatusCode::BAD_REQUEST,
      (ErrorKind::QuestionNotFound | ErrorKind::UserNotFound, _) => StatusCode::NOT_FOUND,
      (ErrorKind::Store, _) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!(error = %self.0, "request failed");
    }
    let body = json!({ "code": self.0.code(), "message": self.0.to_string() });
    (status, Json(body)).into_response()
  }
}
