//! The question lifecycle: every content and ownership rule is enforced here
//! before anything reaches the store.
//!
//! | Operation | Rejects with |
//! |-----------|--------------|
//! | [`create`](QuestionService::create) | `EmptyContent`, `DuplicateQuestion` |
//! | [`edit`](QuestionService::edit) | `QuestionNotFound`, `NotOwner`, `EmptyContent`, `UnchangedContent`, `DuplicateQuestion` |
//! | [`delete`](QuestionService::delete) | `QuestionNotFound`, `NotOwnerOrAdmin` |
//! | [`list_by_user`](QuestionService::list_by_user) | `UserNotFound` |
//! | [`get_by_id`](QuestionService::get_by_id) | `QuestionNotFound` |

use std::sync::Arc;

use uuid::Uuid;

use crate::{
  Error, Result,
  question::{NewQuestion, Question, is_unchanged, normalize_content},
  store::QaStore,
  user::User,
};

pub struct QuestionService<S> {
  store: Arc<S>,
}

impl<S> Clone for QuestionService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: QaStore> QuestionService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Post a new question owned by `owner`. The stored content is trimmed.
  pub async fn create(&self, content: Option<&str>, owner: &User) -> Result<Question> {
    let content = normalize_content(content).ok_or(Error::EmptyContent)?;

    if self
      .store
      .get_question_by_content(content)
      .await
      .map_err(Error::store)?
      .is_some()
    {
      return Err(Error::DuplicateQuestion);
    }

    // The store re-checks uniqueness atomically with the insert.
    let question = self
      .store
      .insert_question(NewQuestion {
        content:  content.to_owned(),
        owner_id: owner.user_id,
      })
      .await
      .map_err(Error::store)?
      .ok_or(Error::DuplicateQuestion)?;

    tracing::info!(question_id = %question.question_id, owner_id = %owner.user_id, "question created");
    Ok(question)
  }

  /// Replace the content of a question. Only its owner may do so.
  pub async fn edit(
    &self,
    content: Option<&str>,
    requester_id: Uuid,
    question_id: Uuid,
  ) -> Result<Question> {
    let current = self.get_by_id(question_id).await?;

    if current.owner_id != requester_id {
      tracing::warn!(%question_id, %requester_id, "edit refused: not the owner");
      return Err(Error::NotOwner);
    }

    let content = normalize_content(content).ok_or(Error::EmptyContent)?;
    if is_unchanged(&current.content, content) {
      return Err(Error::UnchangedContent);
    }
    // Content stays unique across questions after edits too.
    if self
      .store
      .get_question_by_content(content)
      .await
      .map_err(Error::store)?
      .is_some()
    {
      return Err(Error::DuplicateQuestion);
    }

    let Some(question) = self
      .store
      .update_question_content(question_id, content.to_owned())
      .await
      .map_err(Error::store)?
    else {
      // Nothing written: the question is gone, or a concurrent edit took
      // the content first.
      let still_there = self
        .store
        .get_question(question_id)
        .await
        .map_err(Error::store)?
        .is_some();
      return Err(if still_there { Error::DuplicateQuestion } else { Error::QuestionNotFound });
    };

    tracing::info!(%question_id, "question edited");
    Ok(question)
  }

  /// Permanently remove a question and its answers. Allowed for the owner
  /// and for admins.
  pub async fn delete(&self, requester: &User, question_id: Uuid) -> Result<Question> {
    let current = self.get_by_id(question_id).await?;

    if current.owner_id != requester.user_id && !requester.is_admin() {
      tracing::warn!(%question_id, requester_id = %requester.user_id, "delete refused");
      return Err(Error::NotOwnerOrAdmin);
    }

    let removed = self
      .store
      .delete_question(question_id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::QuestionNotFound)?;

    tracing::info!(%question_id, requester_id = %requester.user_id, "question deleted");
    Ok(removed)
  }

  pub async fn list_all(&self) -> Result<Vec<Question>> {
    self.store.list_questions().await.map_err(Error::store)
  }

  /// All questions asked by `user_id`.
  pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Question>> {
    self
      .store
      .get_user(user_id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::UserNotFound)?;

    self
      .store
      .list_questions_by_owner(user_id)
      .await
      .map_err(Error::store)
  }

  pub async fn get_by_id(&self, question_id: Uuid) -> Result<Question> {
    self
      .store
      .get_question(question_id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::QuestionNotFound)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{answer::NewAnswer, testing::MemStore, user::NewUser};

  struct Fixture {
    store:   Arc<MemStore>,
    service: QuestionService<MemStore>,
    alice:   User,
    bob:     User,
    admin:   User,
  }

  async fn fixture() -> Fixture {
    let store = Arc::new(MemStore::default());
    let alice = store.add_user(NewUser::new("alice")).await.unwrap();
    let bob = store.add_user(NewUser::new("bob")).await.unwrap();
    let admin = store.add_user(NewUser::admin("root")).await.unwrap();
    let service = QuestionService::new(Arc::clone(&store));
    Fixture { store, service, alice, bob, admin }
  }

  // ─── create ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_rejects_blank_content() {
    let f = fixture().await;
    for blank in [None, Some(""), Some("   "), Some("\t\n")] {
      let err = f.service.create(blank, &f.alice).await.unwrap_err();
      assert!(matches!(err, Error::EmptyContent), "{blank:?}");
    }
  }

  #[tokio::test]
  async fn create_stores_trimmed_content_and_owner() {
    let f = fixture().await;
    let q = f.service.create(Some("  What is Go?  "), &f.alice).await.unwrap();
    assert_eq!(q.content, "What is Go?");
    assert_eq!(q.owner_id, f.alice.user_id);
  }

  #[tokio::test]
  async fn create_rejects_duplicate_after_trim() {
    let f = fixture().await;
    f.service.create(Some("What is Go?"), &f.alice).await.unwrap();

    let err = f.service.create(Some(" What is Go? "), &f.bob).await.unwrap_err();
    assert!(matches!(err, Error::DuplicateQuestion));
  }

  #[tokio::test]
  async fn create_duplicate_check_is_case_sensitive() {
    let f = fixture().await;
    f.service.create(Some("What is Go?"), &f.alice).await.unwrap();
    assert!(f.service.create(Some("what is go?"), &f.alice).await.is_ok());
  }

  // ─── edit ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn edit_by_owner_updates_content() {
    let f = fixture().await;
    let q = f.service.create(Some("What is Go?"), &f.alice).await.unwrap();

    let edited = f
      .service
      .edit(Some("What is Rust?"), f.alice.user_id, q.question_id)
      .await
      .unwrap();
    assert_eq!(edited.question_id, q.question_id);
    assert_eq!(edited.content, "What is Rust?");
    assert_eq!(f.service.get_by_id(q.question_id).await.unwrap().content, "What is Rust?");
  }

  #[tokio::test]
  async fn edit_missing_question() {
    let f = fixture().await;
    let err = f
      .service
      .edit(Some("anything"), f.alice.user_id, Uuid::new_v4())
      .await
      .unwrap_err();
    assert!(matches!(err, Error::QuestionNotFound));
  }

  #[tokio::test]
  async fn edit_by_non_owner_is_refused() {
    let f = fixture().await;
    let q = f.service.create(Some("What is Go?"), &f.alice).await.unwrap();

    let err = f
      .service
      .edit(Some("What is Rust?"), f.bob.user_id, q.question_id)
      .await
      .unwrap_err();
    assert!(matches!(err, Error::NotOwner));

    // Admins get no override on edit.
    let err = f
      .service
      .edit(Some("What is Rust?"), f.admin.user_id, q.question_id)
      .await
      .unwrap_err();
    assert!(matches!(err, Error::NotOwner));
  }

  #[tokio::test]
  async fn edit_rejects_blank_and_unchanged_content() {
    let f = fixture().await;
    let q = f.service.create(Some("What is Go?"), &f.alice).await.unwrap();

    for blank in [None, Some(""), Some("  ")] {
      let err = f.service.edit(blank, f.alice.user_id, q.question_id).await.unwrap_err();
      assert!(matches!(err, Error::EmptyContent), "{blank:?}");
    }

    for same in ["What is Go?", "WHAT IS GO?", "  what is go?  "] {
      let err = f
        .service
        .edit(Some(same), f.alice.user_id, q.question_id)
        .await
        .unwrap_err();
      assert!(matches!(err, Error::UnchangedContent), "{same:?}");
    }
  }

  #[tokio::test]
  async fn edit_to_another_questions_content_is_a_duplicate() {
    let f = fixture().await;
    f.service.create(Some("What is Go?"), &f.alice).await.unwrap();
    let q = f.service.create(Some("What is Zig?"), &f.alice).await.unwrap();

    let err = f
      .service
      .edit(Some("What is Go?"), f.alice.user_id, q.question_id)
      .await
      .unwrap_err();
    assert!(matches!(err, Error::DuplicateQuestion));
  }

  #[tokio::test]
  async fn edit_losing_a_content_race_is_a_duplicate() {
    let store = Arc::new(MemStore::with_blind_lookups());
    let alice = store.add_user(NewUser::new("alice")).await.unwrap();
    let service = QuestionService::new(Arc::clone(&store));

    service.create(Some("What is Go?"), &alice).await.unwrap();
    let q = service.create(Some("What is Zig?"), &alice).await.unwrap();

    let err = service
      .edit(Some("What is Go?"), alice.user_id, q.question_id)
      .await
      .unwrap_err();
    assert!(matches!(err, Error::DuplicateQuestion));
    assert_eq!(service.get_by_id(q.question_id).await.unwrap().content, "What is Zig?");
  }

  #[tokio::test]
  async fn ownership_is_checked_before_content() {
    let f = fixture().await;
    let q = f.service.create(Some("What is Go?"), &f.alice).await.unwrap();
    let err = f.service.edit(Some(""), f.bob.user_id, q.question_id).await.unwrap_err();
    assert!(matches!(err, Error::NotOwner));
  }

  // ─── delete ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn delete_by_owner() {
    let f = fixture().await;
    let q = f.service.create(Some("What is Go?"), &f.alice).await.unwrap();

    let removed = f.service.delete(&f.alice, q.question_id).await.unwrap();
    assert_eq!(removed, q);
    assert!(matches!(
      f.service.get_by_id(q.question_id).await,
      Err(Error::QuestionNotFound)
    ));
  }

  #[tokio::test]
  async fn delete_by_admin_who_is_not_owner() {
    let f = fixture().await;
    let q = f.service.create(Some("What is Go?"), &f.alice).await.unwrap();
    assert!(f.service.delete(&f.admin, q.question_id).await.is_ok());
  }

  #[tokio::test]
  async fn delete_by_stranger_is_refused() {
    let f = fixture().await;
    let q = f.service.create(Some("What is Go?"), &f.alice).await.unwrap();

    let err = f.service.delete(&f.bob, q.question_id).await.unwrap_err();
    assert!(matches!(err, Error::NotOwnerOrAdmin));
    assert!(f.service.get_by_id(q.question_id).await.is_ok());
  }

  #[tokio::test]
  async fn delete_missing_question() {
    let f = fixture().await;
    let err = f.service.delete(&f.admin, Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, Error::QuestionNotFound));
  }

  #[tokio::test]
  async fn delete_removes_answers() {
    let f = fixture().await;
    let q = f.service.create(Some("What is Go?"), &f.alice).await.unwrap();
    f.store
      .add_answer(NewAnswer {
        content:     "A language.".into(),
        owner_id:    f.bob.user_id,
        question_id: q.question_id,
      })
      .await
      .unwrap();

    f.service.delete(&f.alice, q.question_id).await.unwrap();
    assert!(f.store.list_answers(q.question_id).await.unwrap().is_empty());
  }

  // ─── listing ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_by_user_returns_only_their_questions() {
    let f = fixture().await;
    f.service.create(Some("Q1"), &f.alice).await.unwrap();
    f.service.create(Some("Q2"), &f.bob).await.unwrap();
    f.service.create(Some("Q3"), &f.alice).await.unwrap();

    let mine = f.service.list_by_user(f.alice.user_id).await.unwrap();
    let contents: Vec<_> = mine.iter().map(|q| q.content.as_str()).collect();
    assert_eq!(contents, ["Q1", "Q3"]);

    assert_eq!(f.service.list_all().await.unwrap().len(), 3);
    assert!(f.service.list_by_user(f.admin.user_id).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn list_by_unknown_user() {
    let f = fixture().await;
    let err = f.service.list_by_user(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, Error::UserNotFound));
  }

  // ─── full lifecycle ────────────────────────────────────────────────────────

  #[tokio::test]
  async fn question_lifecycle() {
    let f = fixture().await;

    let q = f.service.create(Some("What is Go?"), &f.alice).await.unwrap();
    assert!(matches!(
      f.service.create(Some("What is Go?"), &f.alice).await,
      Err(Error::DuplicateQuestion)
    ));
    assert!(matches!(
      f.service.edit(Some("What is Go?"), f.alice.user_id, q.question_id).await,
      Err(Error::UnchangedContent)
    ));
    assert!(matches!(
      f.service.edit(Some("What is Rust?"), f.bob.user_id, q.question_id).await,
      Err(Error::NotOwner)
    ));
    f.service.delete(&f.alice, q.question_id).await.unwrap();
    assert!(matches!(
      f.service.get_by_id(q.question_id).await,
      Err(Error::QuestionNotFound)
    ));
  }
}
