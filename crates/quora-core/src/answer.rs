//! Answers: plain records attached to a question. Removed together with
//! their question.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
  pub answer_id:   Uuid,
  pub content:     String,
  pub created_at:  DateTime<Utc>,
  pub owner_id:    Uuid,
  pub question_id: Uuid,
}

/// Input to [`crate::store::QaStore::add_answer`].
#[derive(Debug, Clone)]
pub struct NewAnswer {
  pub content:     String,
  pub owner_id:    Uuid,
  pub question_id: Uuid,
}
