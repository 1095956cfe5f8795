//! Server configuration: an optional TOML file overlaid with `QUORA_*`
//! environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// Upper bound on `session_ttl_hours`: one year.
const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

/// Runtime server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:              String,
  #[serde(default = "default_port")]
  pub port:              u16,
  #[serde(default = "default_store_path")]
  pub store_path:        PathBuf,
  /// Lifetime of bearer tokens issued by `add-user` / `issue-token`.
  /// Must be between 1 and [`MAX_SESSION_TTL_HOURS`].
  #[serde(default = "default_session_ttl_hours")]
  pub session_ttl_hours: i64,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8080 }

fn default_store_path() -> PathBuf { PathBuf::from("quora.sqlite") }

fn default_session_ttl_hours() -> i64 {
  quora_core::auth::DEFAULT_SESSION_TTL_HOURS
}

impl ServerConfig {
  /// Read `path` (if it exists) and the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let builder = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("QUORA"));
    Self::build(builder)
  }

  fn build(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
  ) -> anyhow::Result<Self> {
    let cfg: Self = builder
      .build()
      .context("failed to read config file")?
      .try_deserialize()
      .context("failed to deserialise ServerConfig")?;
    cfg.session_ttl()?;
    Ok(cfg)
  }

  /// The configured session lifetime.
  pub fn session_ttl(&self) -> anyhow::Result<chrono::Duration> {
    let hours = self.session_ttl_hours;
    anyhow::ensure!(
      (1..=MAX_SESSION_TTL_HOURS).contains(&hours),
      "session_ttl_hours must be between 1 and {MAX_SESSION_TTL_HOURS}, got {hours}"
    );
    chrono::Duration::try_hours(hours)
      .with_context(|| format!("session_ttl_hours out of range: {hours}"))
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// The store path with a leading `~` expanded.
  pub fn resolved_store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
