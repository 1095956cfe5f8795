//! Users and their sign-in sessions.
//!
//! Users are referenced here, not managed: the Q&A logic only needs an
//! identity to record as owner and a role to check on delete.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role name that grants override rights on delete. Compared
/// case-insensitively.
pub const ADMIN_ROLE: &str = "admin";

/// Role assigned to users created without `--admin`.
pub const DEFAULT_ROLE: &str = "nonadmin";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub user_id:    Uuid,
  pub user_name:  String,
  pub role:       String,
  pub created_at: DateTime<Utc>,
}

impl User {
  pub fn is_admin(&self) -> bool { self.role.eq_ignore_ascii_case(ADMIN_ROLE) }
}

/// Input to [`crate::store::QaStore::add_user`].
#[derive(Debug, Clone)]
pub struct NewUser {
  pub user_name: String,
  pub role:      String,
}

impl NewUser {
  pub fn new(user_name: impl Into<String>) -> Self {
    Self { user_name: user_name.into(), role: DEFAULT_ROLE.to_owned() }
  }

  pub fn admin(user_name: impl Into<String>) -> Self {
    Self { user_name: user_name.into(), role: ADMIN_ROLE.to_owned() }
  }
}

/// A bearer-token session. Only the SHA-256 digest of the token is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
  pub token_digest:  String,
  pub user_id:       Uuid,
  pub issued_at:     DateTime<Utc>,
  pub expires_at:    DateTime<Utc>,
  pub signed_out_at: Option<DateTime<Utc>>,
}

impl Session {
  /// A session is live until it is signed out or reaches `expires_at`.
  pub fn is_live(&self, now: DateTime<Utc>) -> bool {
    self.signed_out_at.is_none() && now < self.expires_at
  }
}
