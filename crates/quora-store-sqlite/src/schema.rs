//! SQL schema for the Quora SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- `id` columns are internal row keys and never leave the store.
CREATE TABLE IF NOT EXISTS users (
    id          INTEGER PRIMARY KEY,
    user_id     TEXT NOT NULL UNIQUE,
    user_name   TEXT NOT NULL UNIQUE,
    role        TEXT NOT NULL DEFAULT 'nonadmin',
    created_at  TEXT NOT NULL
);

-- Only the SHA-256 digest of a bearer token is stored.
CREATE TABLE IF NOT EXISTS sessions (
    id             INTEGER PRIMARY KEY,
    token_digest   TEXT NOT NULL UNIQUE,
    user_id        TEXT NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
    issued_at      TEXT NOT NULL,
    expires_at     TEXT NOT NULL,
    signed_out_at  TEXT
);

CREATE TABLE IF NOT EXISTS questions (
    id           INTEGER PRIMARY KEY,
    question_id  TEXT NOT NULL UNIQUE,
    content      TEXT NOT NULL UNIQUE,   -- trimmed
    created_at   TEXT NOT NULL,
    owner_id     TEXT NOT NULL REFERENCES users(user_id)
);

CREATE TABLE IF NOT EXISTS answers (
    id           INTEGER PRIMARY KEY,
    answer_id    TEXT NOT NULL UNIQUE,
    content      TEXT NOT NULL,
    created_at   TEXT NOT NULL,
    owner_id     TEXT NOT NULL REFERENCES users(user_id),
    question_id  TEXT NOT NULL REFERENCES questions(question_id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS sessions_user_idx     ON sessions(user_id);
CREATE INDEX IF NOT EXISTS questions_owner_idx   ON questions(owner_id);
CREATE INDEX IF NOT EXISTS answers_question_idx  ON answers(question_id);

PRAGMA user_version = 1;
";
