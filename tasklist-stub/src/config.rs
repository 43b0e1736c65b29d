//! Command-line configuration for the stub server.
//!
//! The stub is a development fixture, so it has no config file: every
//! setting comes from a flag or its environment variable.

use clap::Parser;

/// Address the stub binds to when none is given.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// Settings for one stub server process.
#[derive(Parser, Debug, Clone)]
#[command(version, about = "In-memory todo service for development and tests")]
pub struct StubArgs {
    /// Address to listen on.
    #[arg(short, long, env = "TASKLIST_STUB_ADDR", default_value = DEFAULT_BIND_ADDR)]
    pub bind: String,

    /// Answer with bare payloads instead of `{"data": ...}`.
    #[arg(long)]
    pub no_envelope: bool,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, env = "TASKLIST_STUB_LOG", default_value = "info")]
    pub log_level: String,
}

impl StubArgs {
    /// Whether responses are wrapped in a `data` envelope.
    #[must_use]
    pub const fn envelope(&self) -> bool {
        !self.no_envelope
    }
}
