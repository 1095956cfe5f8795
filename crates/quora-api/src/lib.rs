//! JSON REST API for the Quora Q&A backend.
//!
//! Exposes an axum [`Router`] backed by any [`quora_core::store::QaStore`].
//! Bearer-token authentication happens per request; TLS and transport
//! concerns are the caller's responsibility.

pub mod auth;
pub mod error;
pub mod questions;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post, put},
};
use quora_core::{auth::TokenValidator, service::QuestionService, store::QaStore};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S> {
  pub questions: QuestionService<S>,
  pub tokens:    TokenValidator<S>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self { questions: self.questions.clone(), tokens: self.tokens.clone() }
  }
}

impl<S: QaStore> AppState<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self {
      questions: QuestionService::new(Arc::clone(&store)),
      tokens:    TokenValidator::new(store),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API router for `state`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: QaStore + 'static,
{
  Router::new()
    .route("/question/create", post(questions::create::<S>))
    .route("/question/edit/{question_id}", put(questions::edit::<S>))
    .route("/question/all", get(questions::list_all::<S>))
    .route("/question/all/{user_id}", get(questions::list_by_user::<S>))
    .route("/question/delete/{question_id}", delete(questions::delete::<S>))
    .route("/question/{question_id}", get(questions::get_one::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
