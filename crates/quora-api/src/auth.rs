//! Bearer-token extraction.
//!
//! The extractor only pulls the token out of the `Authorization` header;
//! each handler validates it with its own activity description so a
//! signed-out caller learns what they were trying to do.

use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, header, request::Parts},
};
use quora_core::Error;

use crate::error::ApiError;

/// The raw bearer token presented with a request.
pub struct BearerToken(pub String);

/// Read the token from an `Authorization: Bearer <token>` header. The scheme
/// name is matched case-insensitively.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, Error> {
  headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.trim_start().split_once(' '))
    .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
    .map(|(_, token)| token.trim())
    .filter(|t| !t.is_empty())
    .ok_or(Error::MissingToken)
}

impl<S> FromRequestParts<S> for BearerToken
where
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    _state: &S,
  ) -> Result<Self, Self::Rejection> {
    let token = bearer_token(&parts.headers)?;
    Ok(BearerToken(token.to_owned()))
  }
}
