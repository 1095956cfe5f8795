//! Question records and content rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted question.
///
/// The store's internal row key is never surfaced; `question_id` is the only
/// identifier clients see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
  pub question_id: Uuid,
  /// Trimmed, non-empty, unique across all questions.
  pub content:     String,
  /// Server-assigned; never changes after creation.
  pub created_at:  DateTime<Utc>,
  /// The user who asked the question. Immutable.
  pub owner_id:    Uuid,
}

/// Input to [`crate::store::QaStore::insert_question`].
/// `question_id` and `created_at` are always set by the store.
#[derive(Debug, Clone)]
pub struct NewQuestion {
  pub content:  String,
  pub owner_id: Uuid,
}

/// Trim `raw` and reject it if nothing is left.
pub fn normalize_content(raw: Option<&str>) -> Option<&str> {
  raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Whether `candidate` would leave `current` effectively unchanged.
pub fn is_unchanged(current: &str, candidate: &str) -> bool {
  current.to_lowercase() == candidate.to_lowercase()
}
