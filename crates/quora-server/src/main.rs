//! quora-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! store, and serves the Q&A API over HTTP.
//!
//! # Provisioning users
//!
//! Token issuance is not part of the HTTP surface. Operators create users
//! and hand out bearer tokens from the command line:
//!
//! ```text
//! quora-server add-user --name ada [--admin]
//! quora-server issue-token --user <uuid>
//! quora-server sign-out --token <token>
//! ```

mod config;

use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use quora_api::AppState;
use quora_core::{
  auth::{IssuedToken, TokenValidator},
  store::QaStore,
  user::NewUser,
};
use quora_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::config::ServerConfig;

#[derive(Parser)]
#[command(author, version, about = "Quora Q&A API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: std::path::PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the HTTP API (the default).
  Serve,
  /// Create a user and print a bearer token for them.
  AddUser {
    #[arg(long)]
    name:  String,
    /// Grant the admin role (may delete any question).
    #[arg(long)]
    admin: bool,
  },
  /// Print a fresh bearer token for an existing user.
  IssueToken {
    #[arg(long)]
    user: Uuid,
  },
  /// End the session behind a bearer token.
  SignOut {
    #[arg(long)]
    token: String,
  },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let server_cfg = ServerConfig::load(&cli.config)?;

  let store_path = server_cfg.resolved_store_path();
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  let store = Arc::new(store);

  let tokens = TokenValidator::with_ttl(Arc::clone(&store), server_cfg.session_ttl()?);

  match cli.command.unwrap_or(Command::Serve) {
    Command::Serve => serve(&server_cfg, store).await,
    Command::AddUser { name, admin } => {
      let input = if admin { NewUser::admin(name) } else { NewUser::new(name) };
      let user = store
        .add_user(input)
        .await
        .context("failed to create user")?;
      tracing::info!(user_id = %user.user_id, role = %user.role, "created user");
      print_token(user.user_id, tokens.issue(user.user_id).await?);
      Ok(())
    }
    Command::IssueToken { user } => {
      print_token(user, tokens.issue(user).await?);
      Ok(())
    }
    Command::SignOut { token } => {
      tokens.sign_out(&token).await?;
      println!("signed out");
      Ok(())
    }
  }
}

async fn serve(server_cfg: &ServerConfig, store: Arc<SqliteStore>) -> anyhow::Result<()> {
  let app = quora_api::router(AppState::new(store));
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;
  Ok(())
}

fn print_token(user_id: Uuid, issued: IssuedToken) {
  println!("user:    {user_id}");
  println!("token:   {}", issued.token);
  println!("expires: {}", issued.session.expires_at.to_rfc3339());
}
