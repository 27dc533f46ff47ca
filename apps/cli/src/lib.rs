//! # Marquee CLI Library
//!
//! Everything behind the `marquee` binary, exposed as a library so the
//! integration tests can drive commands without spawning a process.
//!
//! ## Module Organization
//! ```text
//! marquee_cli/
//! ├── lib.rs          ◄─── You are here (logging, run)
//! ├── cli.rs          ◄─── clap definitions and dispatch
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── AppConfig (TOML + MARQUEE_* env)
//! │   ├── storage.rs  ◄─── SQLite or in-memory key-value backend
//! │   └── store.rs    ◄─── CatalogStore (dispatch, snapshots, persistence)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── catalog.rs  ◄─── Movie commands
//! │   ├── personal_list.rs ◄─ "My list" commands
//! │   └── users.rs    ◄─── Register / login
//! └── error.rs        ◄─── AppError printed on failure
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use marquee_db::PersonalListRepository;
use marquee_remote::RemoteClient;
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use error::AppResult;
use state::{AppConfig, CatalogStore, StorageState};

/// Runs one invocation.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Invocation                                        │
/// │                                                                         │
/// │  1. Open Storage ─────────────────────────────────────────────────────► │
/// │     • SQLite at storage.database_path (WAL, migrations)                 │
/// │     • or an in-memory map with --ephemeral                              │
/// │                                                                         │
/// │  2. Rehydrate ────────────────────────────────────────────────────────► │
/// │     • read "myList", schema "1.0" or start empty                        │
/// │                                                                         │
/// │  3. Build Remote Client ──────────────────────────────────────────────► │
/// │                                                                         │
/// │  4. Execute Command ──────────────────────────────────────────────────► │
/// │                                                                         │
/// │  5. Close Storage ────────────────────────────────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(args: Cli, config: &AppConfig) -> AppResult<Value> {
    let storage = StorageState::open(&config.storage, args.ephemeral).await?;
    let store = CatalogStore::open(PersonalListRepository::new(storage.clone())).await;
    debug!(
        personal_list = store.snapshot().personal_list.len(),
        "Store ready"
    );

    let remote = RemoteClient::new(&config.remote)?;
    info!(base_url = %remote.base_url(), "Remote service configured");

    let result = cli::execute(args.command, &store, &remote).await;
    storage.close().await;
    result
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr; stdout carries only command output.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=marquee_db=trace` - Trace storage only
/// - Otherwise `default_filter` (the `[log] filter` config key)
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A second call (tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
