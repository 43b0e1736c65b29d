//! `Tasklist` stub server -- in-memory todo service.
//!
//! An axum HTTP server implementing the todo REST routes against an
//! in-memory store. Nothing is persisted.
//!
//! # Usage
//!
//! ```bash
//! # Run on default address 127.0.0.1:5000
//! cargo run --bin tasklist-stub
//!
//! # Run on custom address with bare (non-enveloped) responses
//! cargo run --bin tasklist-stub -- --bind 127.0.0.1:8080 --no-envelope
//! ```

use std::sync::Arc;

use clap::Parser;
use tasklist_stub::config::StubArgs;
use tasklist_stub::server::{self, StubState};
use tasklist_stub::store::TodoStore;

#[tokio::main]
async fn main() {
    let args = StubArgs::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(addr = %args.bind, envelope = args.envelope(), "starting tasklist stub server");

    let state = Arc::new(StubState::with_config(TodoStore::new(), args.envelope()));

    match server::start_server_with_state(&args.bind, state).await {
        Ok((bound_addr, handle)) => {
            tracing::info!(addr = %bound_addr, "stub server listening");
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "stub server task failed");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to start stub server");
            std::process::exit(1);
        }
    }
}
