//! Handlers for `/question` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/question/create` | Body: `{"content":"..."}` |
//! | `PUT`    | `/question/edit/:question_id` | Body: `{"content":"..."}`; owner only |
//! | `GET`    | `/question/all` | Every question |
//! | `GET`    | `/question/all/:user_id` | Questions asked by one user |
//! | `DELETE` | `/question/delete/:question_id` | Owner or admin |
//! | `GET`    | `/question/:question_id` | Single question |
//!
//! Every endpoint requires `Authorization: Bearer <token>`.

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
};
use quora_core::{Error, question::Question, store::QaStore, user::User};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, auth::BearerToken, error::ApiError};

pub const CREATED: &str = "QUESTION CREATED";
pub const EDITED: &str = "QUESTION EDITED";
pub const DELETED: &str = "QUESTION DELETED";

// ─── Bodies ───────────────────────────────────────────────────────────────────

/// JSON body accepted by create and edit. A missing `content`, or a body
/// that is not this JSON at all, is reported as empty content.
#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
  pub content: Option<String>,
}

/// Confirmation returned by create, edit and delete.
#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionResponse {
  pub id:     Uuid,
  pub status: String,
}

impl QuestionResponse {
  fn new(question: &Question, status: &str) -> Self {
    Self { id: question.question_id, status: status.to_owned() }
  }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionDetailsResponse {
  pub id:      Uuid,
  pub content: String,
}

impl From<Question> for QuestionDetailsResponse {
  fn from(q: Question) -> Self { Self { id: q.question_id, content: q.content } }
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

async fn authenticate<S: QaStore>(
  state: &AppState<S>,
  token: &str,
  activity: &str,
) -> Result<User, ApiError> {
  Ok(state.tokens.validate(token, activity).await?)
}

/// Ids that do not parse cannot name an existing question.
fn question_id(raw: &str) -> Result<Uuid, ApiError> {
  Uuid::parse_str(raw).map_err(|_| ApiError(Error::QuestionNotFound))
}

/// The submitted content. The body is only inspected once the caller is
/// authenticated, so an unreadable body never masks a token failure.
fn content(body: Result<Json<QuestionRequest>, JsonRejection>) -> Option<String> {
  match body {
    Ok(Json(body)) => body.content,
    Err(rejection) => {
      tracing::debug!(%rejection, "unreadable question body");
      None
    }
  }
}

fn details(questions: Vec<Question>) -> Json<Vec<QuestionDetailsResponse>> {
  Json(questions.into_iter().map(QuestionDetailsResponse::from).collect())
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /question/create`
pub async fn create<S: QaStore>(
  State(state): State<AppState<S>>,
  BearerToken(token): BearerToken,
  body: Result<Json<QuestionRequest>, JsonRejection>,
) -> Result<Json<QuestionResponse>, ApiError> {
  let user = authenticate(&state, &token, "to post a question").await?;
  let question = state.questions.create(content(body).as_deref(), &user).await?;
  Ok(Json(QuestionResponse::new(&question, CREATED)))
}

// ─── Edit ─────────────────────────────────────────────────────────────────────

/// `PUT /question/edit/:question_id`
pub async fn edit<S: QaStore>(
  State(state): State<AppState<S>>,
  BearerToken(token): BearerToken,
  Path(raw_id): Path<String>,
  body: Result<Json<QuestionRequest>, JsonRejection>,
) -> Result<Json<QuestionResponse>, ApiError> {
  let user = authenticate(&state, &token, "to edit the question").await?;
  let id = question_id(&raw_id)?;
  let question = state
    .questions
    .edit(content(body).as_deref(), user.user_id, id)
    .await?;
  Ok(Json(QuestionResponse::new(&question, EDITED)))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /question/all`
pub async fn list_all<S: QaStore>(
  State(state): State<AppState<S>>,
  BearerToken(token): BearerToken,
) -> Result<Json<Vec<QuestionDetailsResponse>>, ApiError> {
  authenticate(&state, &token, "to get all questions").await?;
  Ok(details(state.questions.list_all().await?))
}

/// `GET /question/all/:user_id`
pub async fn list_by_user<S: QaStore>(
  State(state): State<AppState<S>>,
  BearerToken(token): BearerToken,
  Path(raw_id): Path<String>,
) -> Result<Json<Vec<QuestionDetailsResponse>>, ApiError> {
  authenticate(&state, &token, "to get all questions posted by a specific user").await?;
  let user_id = Uuid::parse_str(&raw_id).map_err(|_| ApiError(Error::UserNotFound))?;
  Ok(details(state.questions.list_by_user(user_id).await?))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /question/delete/:question_id`
pub async fn delete<S: QaStore>(
  State(state): State<AppState<S>>,
  BearerToken(token): BearerToken,
  Path(raw_id): Path<String>,
) -> Result<Json<QuestionResponse>, ApiError> {
  let user = authenticate(&state, &token, "to delete the question").await?;
  let id = question_id(&raw_id)?;
  let removed = state.questions.delete(&user, id).await?;
  Ok(Json(QuestionResponse::new(&removed, DELETED)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /question/:question_id`
pub async fn get_one<S: QaStore>(
  State(state): State<AppState<S>>,
  BearerToken(token): BearerToken,
  Path(raw_id): Path<String>,
) -> Result<Json<QuestionDetailsResponse>, ApiError> {
  authenticate(&state, &token, "to get the question").await?;
  let id = question_id(&raw_id)?;
  Ok(Json(state.questions.get_by_id(id).await?.into()))
}
