//! In-memory [`QaStore`] used by this crate's unit tests.

use std::{convert::Infallible, sync::Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
  answer::{Answer, NewAnswer},
  question::{NewQuestion, Question},
  store::QaStore,
  user::{NewUser, Session, User},
};

#[derive(Default)]
struct Tables {
  users:     Vec<User>,
  sessions:  Vec<Session>,
  questions: Vec<Question>,
  answers:   Vec<Answer>,
}

#[derive(Default)]
pub struct MemStore {
  tables:        Mutex<Tables>,
  /// Makes `get_question_by_content` miss, as if a concurrent writer
  /// claimed the content between a check and the write.
  blind_lookups: bool,
}

impl MemStore {
  pub fn with_blind_lookups() -> Self { Self { blind_lookups: true, ..Self::default() } }
}

impl QaStore for MemStore {
  type Error = Infallible;

  async fn add_user(&self, input: NewUser) -> Result<User, Infallible> {
    let user = User {
      user_id:    Uuid::new_v4(),
      user_name:  input.user_name,
      role:       input.role,
      created_at: Utc::now(),
    };
    self.tables.lock().unwrap().users.push(user.clone());
    Ok(user)
  }

  async fn get_user(&self, id: Uuid) -> Result<Option<User>, Infallible> {
    let t = self.tables.lock().unwrap();
    Ok(t.users.iter().find(|u| u.user_id == id).cloned())
  }

  async fn add_session(&self, session: Session) -> Result<(), Infallible> {
    self.tables.lock().unwrap().sessions.push(session);
    Ok(())
  }

  async fn get_session(&self, token_digest: &str) -> Result<Option<Session>, Infallible> {
    let t = self.tables.lock().unwrap();
    Ok(t.sessions.iter().find(|s| s.token_digest == token_digest).cloned())
  }

  async fn sign_out(&self, token_digest: &str, at: DateTime<Utc>) -> Result<bool, Infallible> {
    let mut t = self.tables.lock().unwrap();
    match t
      .sessions
      .iter_mut()
      .find(|s| s.token_digest == token_digest && s.signed_out_at.is_none())
    {
      Some(s) => {
        s.signed_out_at = Some(at);
        Ok(true)
      }
      None => Ok(false),
    }
  }

  async fn insert_question(&self, input: NewQuestion) -> Result<Option<Question>, Infallible> {
    let mut t = self.tables.lock().unwrap();
    if t.questions.iter().any(|q| q.content == input.content) {
      return Ok(None);
    }
    let question = Question {
      question_id: Uuid::new_v4(),
      content:     input.content,
      created_at:  Utc::now(),
      owner_id:    input.owner_id,
    };
    t.questions.push(question.clone());
    Ok(Some(question))
  }

  async fn get_question(&self, id: Uuid) -> Result<Option<Question>, Infallible> {
    let t = self.tables.lock().unwrap();
    Ok(t.questions.iter().find(|q| q.question_id == id).cloned())
  }

  async fn get_question_by_content(&self, content: &str) -> Result<Option<Question>, Infallible> {
    if self.blind_lookups {
      return Ok(None);
    }
    let t = self.tables.lock().unwrap();
    Ok(t.questions.iter().find(|q| q.content == content).cloned())
  }

  async fn update_question_content(
    &self,
    id: Uuid,
    content: String,
  ) -> Result<Option<Question>, Infallible> {
    let mut t = self.tables.lock().unwrap();
    if t.questions.iter().any(|q| q.question_id != id && q.content == content) {
      return Ok(None);
    }
    Ok(t.questions.iter_mut().find(|q| q.question_id == id).map(|q| {
      q.content = content;
      q.clone()
    }))
  }

  async fn delete_question(&self, id: Uuid) -> Result<Option<Question>, Infallible> {
    let mut t = self.tables.lock().unwrap();
    let Some(pos) = t.questions.iter().position(|q| q.question_id == id) else {
      return Ok(None);
    };
    t.answers.retain(|a| a.question_id != id);
    Ok(Some(t.questions.remove(pos)))
  }

  async fn list_questions(&self) -> Result<Vec<Question>, Infallible> {
    Ok(self.tables.lock().unwrap().questions.clone())
  }

  async fn list_questions_by_owner(&self, owner_id: Uuid) -> Result<Vec<Question>, Infallible> {
    let t = self.tables.lock().unwrap();
    Ok(t.questions.iter().filter(|q| q.owner_id == owner_id).cloned().collect())
  }

  async fn add_answer(&self, input: NewAnswer) -> Result<Answer, Infallible> {
    let answer = Answer {
      answer_id:   Uuid::new_v4(),
      content:     input.content,
      created_at:  Utc::now(),
      owner_id:    input.owner_id,
      question_id: input.question_id,
    };
    self.tables.lock().unwrap().answers.push(answer.clone());
    Ok(answer)
  }

  async fn list_answers(&self, question_id: Uuid) -> Result<Vec<Answer>, Infallible> {
    let t = self.tables.lock().unwrap();
    Ok(t.answers.iter().filter(|a| a.question_id == question_id).cloned().collect())
  }
}
