//! Bearer-token issuance and validation.
//!
//! Tokens are 32 random bytes from the OS RNG, URL-safe base64 encoded. The
//! store only ever sees the SHA-256 hex digest of a token, so a leaked
//! database cannot be replayed against the API.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{Duration, Utc};
use rand_core::{OsRng, RngCore};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::{
  Error, Result,
  store::QaStore,
  user::{Session, User},
};

pub const DEFAULT_SESSION_TTL_HOURS: i64 = 8;

const TOKEN_BYTES: usize = 32;

/// SHA-256 hex digest of a bearer token.
pub fn digest_token(token: &str) -> String {
  hex::encode(Sha256::digest(token.as_bytes()))
}

fn generate_token() -> String {
  let mut bytes = [0u8; TOKEN_BYTES];
  OsRng.fill_bytes(&mut bytes);
  URL_SAFE_NO_PAD.encode(bytes)
}

/// A freshly issued token. `token` is shown to the caller once and never
/// persisted.
#[derive(Debug, Clone)]
pub struct IssuedToken {
  pub token:   String,
  pub session: Session,
}

/// Resolves bearer tokens to users.
pub struct TokenValidator<S> {
  store: Arc<S>,
  ttl:   Duration,
}

impl<S> Clone for TokenValidator<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), ttl: self.ttl }
  }
}

impl<S: QaStore> TokenValidator<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self::with_ttl(store, Duration::hours(DEFAULT_SESSION_TTL_HOURS))
  }

  pub fn with_ttl(store: Arc<S>, ttl: Duration) -> Self { Self { store, ttl } }

  /// Resolve `token` to the signed-in user.
  ///
  /// `activity` describes what the caller is trying to do (e.g. "to post a
  /// question") and is folded into the signed-out message.
  pub async fn validate(&self, token: &str, activity: &str) -> Result<User> {
    let digest = digest_token(token);

    let session = self
      .store
      .get_session(&digest)
      .await
      .map_err(Error::store)?
      .ok_or(Error::NotSignedIn)?;

    if !session.is_live(Utc::now()) {
      tracing::debug!(user_id = %session.user_id, "rejected stale session");
      return Err(Error::SignedOut { activity: activity.to_owned() });
    }

    self
      .store
      .get_user(session.user_id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::NotSignedIn)
  }

  /// Start a new session for `user_id`.
  pub async fn issue(&self, user_id: Uuid) -> Result<IssuedToken> {
    self
      .store
      .get_user(user_id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::UserNotFound)?;

    let token = generate_token();
    let issued_at = Utc::now();
    let session = Session {
      token_digest: digest_token(&token),
      user_id,
      issued_at,
      expires_at: issued_at + self.ttl,
      signed_out_at: None,
    };

    self
      .store
      .add_session(session.clone())
      .await
      .map_err(Error::store)?;

    tracing::info!(%user_id, "issued session");
    Ok(IssuedToken { token, session })
  }

  /// End the session identified by `token`.
  pub async fn sign_out(&self, token: &str) -> Result<()> {
    let digest = digest_token(token);
    let signed_out = self
      .store
      .sign_out(&digest, Utc::now())
      .await
      .map_err(Error::store)?;
    if signed_out { Ok(()) } else { Err(Error::NotSignedIn) }
  }
}
