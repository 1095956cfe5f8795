//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings and UUIDs as hyphenated
//! lowercase strings.

use chrono::{DateTime, Utc};
use quora_core::{
  answer::Answer,
  question::Question,
  user::{Session, User},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `users` row.
pub struct RawUser {
  pub user_id:    String,
  pub user_name:  String,
  pub role:       String,
  pub created_at: String,
}

impl RawUser {
  pub const COLUMNS: &'static str = "user_id, user_name, role, created_at";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      user_id:    row.get(0)?,
      user_name:  row.get(1)?,
      role:       row.get(2)?,
      created_at: row.get(3)?,
    })
  }

  pub fn into_user(self) -> Result<User> {
    Ok(User {
      user_id:    decode_uuid(&self.user_id)?,
      user_name:  self.user_name,
      role:       self.role,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `sessions` row.
pub struct RawSession {
  pub token_digest:  String,
  pub user_id:       String,
  pub issued_at:     String,
  pub expires_at:    String,
  pub signed_out_at: Option<String>,
}

impl RawSession {
  pub const COLUMNS: &'static str =
    "token_digest, user_id, issued_at, expires_at, signed_out_at";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      token_digest:  row.get(0)?,
      user_id:       row.get(1)?,
      issued_at:     row.get(2)?,
      expires_at:    row.get(3)?,
      signed_out_at: row.get(4)?,
    })
  }

  pub fn into_session(self) -> Result<Session> {
    Ok(Session {
      token_digest:  self.token_digest,
      user_id:       decode_uuid(&self.user_id)?,
      issued_at:     decode_dt(&self.issued_at)?,
      expires_at:    decode_dt(&self.expires_at)?,
      signed_out_at: self.signed_out_at.as_deref().map(decode_dt).transpose()?,
    })
  }
}

/// Raw strings read directly from a `questions` row.
pub struct RawQuestion {
  pub question_id: String,
  pub content:     String,
  pub created_at:  String,
  pub owner_id:    String,
}

impl RawQuestion {
  pub const COLUMNS: &'static str = "question_id, content, created_at, owner_id";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      question_id: row.get(0)?,
      content:     row.get(1)?,
      created_at:  row.get(2)?,
      owner_id:    row.get(3)?,
    })
  }

  pub fn into_question(self) -> Result<Question> {
    Ok(Question {
      question_id: decode_uuid(&self.question_id)?,
      content:     self.content,
      created_at:  decode_dt(&self.created_at)?,
      owner_id:    decode_uuid(&self.owner_id)?,
    })
  }
}

/// Raw strings read directly from an `answers` row.
pub struct RawAnswer {
  pub answer_id:   String,
  pub content:     String,
  pub created_at:  String,
  pub owner_id:    String,
  pub question_id: String,
}

impl RawAnswer {
  pub const COLUMNS: &'static str =
    "answer_id, content, created_at, owner_id, question_id";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      answer_id:   row.get(0)?,
      content:     row.get(1)?,
      created_at:  row.get(2)?,
      owner_id:    row.get(3)?,
      question_id: row.get(4)?,
    })
  }

  pub fn into_answer(self) -> Result<Answer> {
    Ok(Answer {
      answer_id:   decode_uuid(&self.answer_id)?,
      content:     self.content,
      created_at:  decode_dt(&self.created_at)?,
      owner_id:    decode_uuid(&self.owner_id)?,
      question_id: decode_uuid(&self.question_id)?,
    })
  }
}
