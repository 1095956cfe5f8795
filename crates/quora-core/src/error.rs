//! Error types for `quora-core`.
//!
//! Every business failure carries a stable short code (`ATHR-003`,
//! `QUE-888`, ...) alongside its message. Callers that only care about the
//! broad category use [`Error::kind`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  // ── Authentication ─────────────────────────────────────────────────────
  #[error("Authorization header must carry a bearer token")]
  MissingToken,

  #[error("User has not signed in")]
  NotSignedIn,

  #[error("User is signed out. Sign in first {activity}")]
  SignedOut { activity: String },

  // ── Authorization ──────────────────────────────────────────────────────
  #[error("Only the question owner can edit the question")]
  NotOwner,

  #[error("Only the question owner or admin can delete the question")]
  NotOwnerOrAdmin,

  // ── Content ────────────────────────────────────────────────────────────
  #[error("Content can't be null or empty")]
  EmptyContent,

  #[error("Content can't be null or empty or equal to existing content")]
  UnchangedContent,

  #[error("Question already exists. Duplicate question not allowed")]
  DuplicateQuestion,

  // ── Lookups ────────────────────────────────────────────────────────────
  #[error("Entered question uuid does not exist")]
  QuestionNotFound,

  #[error("User with entered uuid whose question details are to be seen does not exist")]
  UserNotFound,

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// The broad category of an [`Error`]; the API layer maps each kind to a
/// fixed HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  AuthenticationFailed,
  AuthorizationFailed,
  InvalidContent,
  QuestionNotFound,
  UserNotFound,
  Store,
}

impl Error {
  /// Wrap a backend error.
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }

  /// The stable short code reported to clients.
  pub fn code(&self) -> &'static str {
    match self {
      Self::MissingToken | Self::NotSignedIn => "ATHR-001",
      Self::SignedOut { .. } => "ATHR-002",
      Self::NotOwner | Self::NotOwnerOrAdmin => "ATHR-003",
      Self::EmptyContent | Self::UnchangedContent => "QUE-888",
      Self::DuplicateQuestion => "QUE-999",
      Self::QuestionNotFound => "QUES-001",
      Self::UserNotFound => "USR-001",
      Self::Store(_) => "STORE-500",
    }
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::MissingToken | Self::NotSignedIn | Self::SignedOut { .. } => {
        ErrorKind::AuthenticationFailed
      }
      Self::NotOwner | Self::NotOwnerOrAdmin => ErrorKind::AuthorizationFailed,
      Self::EmptyContent | Self::UnchangedContent | Self::DuplicateQuestion => {
        ErrorKind::InvalidContent
      }
      Self::QuestionNotFound => ErrorKind::QuestionNotFound,
      Self::UserNotFound => ErrorKind::UserNotFound,
      Self::Store(_) => ErrorKind::Store,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
