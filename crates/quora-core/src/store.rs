//! The `QaStore` trait.
//!
//! Implemented by storage backends (e.g. `quora-store-sqlite`). The service
//! layer and the HTTP layer depend on this abstraction, never on a concrete
//! backend. Each write is atomic on its own: a method either applies all of
//! its changes or none.

use std::future::Future;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
  answer::{Answer, NewAnswer},
  question::{NewQuestion, Question},
  user::{NewUser, Session, User},
};

/// Abstraction over a Q&A store backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait QaStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Create and persist a user. The store assigns `user_id` and
  /// `created_at`.
  fn add_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  /// Retrieve a user by public id. Returns `None` if not found.
  fn get_user(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  // ── Sessions ──────────────────────────────────────────────────────────

  fn add_session(
    &self,
    session: Session,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Look a session up by token digest.
  fn get_session<'a>(
    &'a self,
    token_digest: &'a str,
  ) -> impl Future<Output = Result<Option<Session>, Self::Error>> + Send + 'a;

  /// Mark a live session as signed out. Returns `false` if no such session
  /// exists or it was already signed out.
  fn sign_out<'a>(
    &'a self,
    token_digest: &'a str,
    at: DateTime<Utc>,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  // ── Questions ─────────────────────────────────────────────────────────

  /// Persist a new question. The store assigns `question_id` and
  /// `created_at`.
  ///
  /// Returns `None`, writing nothing, if another question already has the
  /// same content.
  fn insert_question(
    &self,
    input: NewQuestion,
  ) -> impl Future<Output = Result<Option<Question>, Self::Error>> + Send + '_;

  fn get_question(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Question>, Self::Error>> + Send + '_;

  /// Exact (case-sensitive) match on content.
  fn get_question_by_content<'a>(
    &'a self,
    content: &'a str,
  ) -> impl Future<Output = Result<Option<Question>, Self::Error>> + Send + 'a;

  /// Replace a question's content and return the refreshed record.
  ///
  /// Returns `None`, writing nothing, if the question no longer exists or
  /// another question already has `content`.
  fn update_question_content(
    &self,
    id: Uuid,
    content: String,
  ) -> impl Future<Output = Result<Option<Question>, Self::Error>> + Send + '_;

  /// Permanently remove a question together with its answers. Returns the
  /// removed record, or `None` if it did not exist.
  fn delete_question(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Question>, Self::Error>> + Send + '_;

  /// Every question, oldest first.
  fn list_questions(
    &self,
  ) -> impl Future<Output = Result<Vec<Question>, Self::Error>> + Send + '_;

  /// Every question owned by `owner_id`, oldest first.
  fn list_questions_by_owner(
    &self,
    owner_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Question>, Self::Error>> + Send + '_;

  // ── Answers ───────────────────────────────────────────────────────────

  fn add_answer(
    &self,
    input: NewAnswer,
  ) -> impl Future<Output = Result<Answer, Self::Error>> + Send + '_;

  fn list_answers(
    &self,
    question_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Answer>, Self::Error>> + Send + '_;
}
