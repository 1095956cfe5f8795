//! [`SqliteStore`]: the SQLite implementation of [`QaStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use quora_core::{
  answer::{Answer, NewAnswer},
  question::{NewQuestion, Question},
  store::QaStore,
  user::{NewUser, Session, User},
};

use crate::{
  Result,
  encode::{RawAnswer, RawQuestion, RawSession, RawUser, encode_dt, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Q&A store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a single-row question query keyed on one text parameter.
  async fn question_where(&self, column: &'static str, value: String) -> Result<Option<Question>> {
    let raw: Option<RawQuestion> = self
      .conn
      .call(move |conn| {
        let sql = format!("SELECT {} FROM questions WHERE {column} = ?1", RawQuestion::COLUMNS);
        Ok(
          conn
            .query_row(&sql, rusqlite::params![value], RawQuestion::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawQuestion::into_question).transpose()
  }
}

// ─── QaStore impl ────────────────────────────────────────────────────────────

impl QaStore for SqliteStore {
  type Error = crate::Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn add_user(&self, input: NewUser) -> Result<User> {
    let user = User {
      user_id:    Uuid::new_v4(),
      user_name:  input.user_name,
      role:       input.role,
      created_at: Utc::now(),
    };

    let id_str = encode_uuid(user.user_id);
    let name   = user.user_name.clone();
    let role   = user.role.clone();
    let at_str = encode_dt(user.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (user_id, user_name, role, created_at) VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, name, role, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(user)
  }

  async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        let sql = format!("SELECT {} FROM users WHERE user_id = ?1", RawUser::COLUMNS);
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id_str], RawUser::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  // ── Sessions ──────────────────────────────────────────────────────────────

  async fn add_session(&self, session: Session) -> Result<()> {
    let user_id_str    = encode_uuid(session.user_id);
    let issued_at_str  = encode_dt(session.issued_at);
    let expires_at_str = encode_dt(session.expires_at);
    let signed_out_str = session.signed_out_at.map(encode_dt);
    let digest         = session.token_digest;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO sessions (token_digest, user_id, issued_at, expires_at, signed_out_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![digest, user_id_str, issued_at_str, expires_at_str, signed_out_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn get_session(&self, token_digest: &str) -> Result<Option<Session>> {
    let digest = token_digest.to_owned();

    let raw: Option<RawSession> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {} FROM sessions WHERE token_digest = ?1",
          RawSession::COLUMNS
        );
        Ok(
          conn
            .query_row(&sql, rusqlite::params![digest], RawSession::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawSession::into_session).transpose()
  }

  async fn sign_out(&self, token_digest: &str, at: DateTime<Utc>) -> Result<bool> {
    let digest = token_digest.to_owned();
    let at_str = encode_dt(at);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE sessions SET signed_out_at = ?2
           WHERE token_digest = ?1 AND signed_out_at IS NULL",
          rusqlite::params![digest, at_str],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }

  // ── Questions ─────────────────────────────────────────────────────────────

  async fn insert_question(&self, input: NewQuestion) -> Result<Option<Question>> {
    let question = Question {
      question_id: Uuid::new_v4(),
      content:     input.content,
      created_at:  Utc::now(),
      owner_id:    input.owner_id,
    };

    let id_str    = encode_uuid(question.question_id);
    let content   = question.content.clone();
    let at_str    = encode_dt(question.created_at);
    let owner_str = encode_uuid(question.owner_id);

    let inserted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "INSERT INTO questions (question_id, content, created_at, owner_id)
           VALUES (?1, ?2, ?3, ?4)
           ON CONFLICT (content) DO NOTHING",
          rusqlite::params![id_str, content, at_str, owner_str],
        )?)
      })
      .await?;

    Ok((inserted > 0).then_some(question))
  }

  async fn get_question(&self, id: Uuid) -> Result<Option<Question>> {
    self.question_where("question_id", encode_uuid(id)).await
  }

  async fn get_question_by_content(&self, content: &str) -> Result<Option<Question>> {
    self.question_where("content", content.to_owned()).await
  }

  async fn update_question_content(&self, id: Uuid, content: String) -> Result<Option<Question>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawQuestion> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let changed = tx.execute(
          "UPDATE OR IGNORE questions SET content = ?2 WHERE question_id = ?1",
          rusqlite::params![id_str, content],
        )?;
        if changed == 0 {
          return Ok(None);
        }
        let sql = format!("SELECT {} FROM questions WHERE question_id = ?1", RawQuestion::COLUMNS);
        let raw = tx.query_row(&sql, rusqlite::params![id_str], RawQuestion::from_row)?;
        tx.commit()?;
        Ok(Some(raw))
      })
      .await?;

    raw.map(RawQuestion::into_question).transpose()
  }

  async fn delete_question(&self, id: Uuid) -> Result<Option<Question>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawQuestion> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let sql = format!("SELECT {} FROM questions WHERE question_id = ?1", RawQuestion::COLUMNS);
        let Some(raw) = tx
          .query_row(&sql, rusqlite::params![id_str], RawQuestion::from_row)
          .optional()?
        else {
          return Ok(None);
        };
        tx.execute("DELETE FROM answers WHERE question_id = ?1", rusqlite::params![id_str])?;
        tx.execute("DELETE FROM questions WHERE question_id = ?1", rusqlite::params![id_str])?;
        tx.commit()?;
        Ok(Some(raw))
      })
      .await?;

    raw.map(RawQuestion::into_question).transpose()
  }

  async fn list_questions(&self) -> Result<Vec<Question>> {
    let raws: Vec<RawQuestion> = self
      .conn
      .call(|conn| {
        let sql = format!("SELECT {} FROM questions ORDER BY id", RawQuestion::COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], RawQuestion::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawQuestion::into_question).collect()
  }

  async fn list_questions_by_owner(&self, owner_id: Uuid) -> Result<Vec<Question>> {
    let owner_str = encode_uuid(owner_id);

    let raws: Vec<RawQuestion> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {} FROM questions WHERE owner_id = ?1 ORDER BY id",
          RawQuestion::COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![owner_str], RawQuestion::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawQuestion::into_question).collect()
  }

  // ── Answers ───────────────────────────────────────────────────────────────

  async fn add_answer(&self, input: NewAnswer) -> Result<Answer> {
    let answer = Answer {
      answer_id:   Uuid::new_v4(),
      content:     input.content,
      created_at:  Utc::now(),
      owner_id:    input.owner_id,
      question_id: input.question_id,
    };

    let id_str       = encode_uuid(answer.answer_id);
    let content      = answer.content.clone();
    let at_str       = encode_dt(answer.created_at);
    let owner_str    = encode_uuid(answer.owner_id);
    let question_str = encode_uuid(answer.question_id);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO answers (answer_id, content, created_at, owner_id, question_id)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, content, at_str, owner_str, question_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(answer)
  }

  async fn list_answers(&self, question_id: Uuid) -> Result<Vec<Answer>> {
    let question_str = encode_uuid(question_id);

    let raws: Vec<RawAnswer> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {} FROM answers WHERE question_id = ?1 ORDER BY id",
          RawAnswer::COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![question_str], RawAnswer::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAnswer::into_answer).collect()
  }
}
