//! HTTP server command
//!
//! Builds the record store once, then hands it to the server for the
//! lifetime of the process.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use roster_server::http::{run_server, AppState, ServerConfig};
use roster_server::{MemoryRecordStore, RecordStore};

use super::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "ROSTER_BIND", default_value = "127.0.0.1:3030")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,

    /// Keep records in process memory instead of Postgres (lost on exit).
    /// Any database URL is ignored.
    #[arg(long)]
    pub in_memory: bool,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

impl ServeArgs {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind,
            cors_permissive: self.cors_permissive,
            request_timeout: Duration::from_secs(self.timeout.max(1)),
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!("Starting roster server on {}", args.bind);

    let store: Arc<dyn RecordStore> = if args.in_memory {
        tracing::warn!("Using in-memory store - records are lost on shutdown");
        Arc::new(MemoryRecordStore::new())
    } else {
        args.database.connect().await?
    };

    // Run server (blocks until shutdown)
    run_server(AppState::new(store), args.server_config())
        .await
        .context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        serve: ServeArgs,
    }

    #[test]
    fn defaults_map_to_server_config() {
        let Harness { serve } = Harness::try_parse_from(["roster", "--in-memory"]).unwrap();
        let config = serve.server_config();

        assert_eq!(config.bind_addr, ServerConfig::default().bind_addr);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(!config.cors_permissive);
    }

    #[test]
    fn zero_timeout_is_clamped() {
        let Harness { serve } =
            Harness::try_parse_from(["roster", "--in-memory", "--timeout", "0"]).unwrap();
        assert_eq!(serve.server_config().request_timeout, Duration::from_secs(1));
    }

    #[test]
    fn in_memory_accepts_database_url() {
        let Harness { serve } = Harness::try_parse_from([
            "roster",
            "--in-memory",
            "--database-url",
            "postgres://localhost/roster",
        ])
        .unwrap();
        assert!(serve.in_memory);
        assert_eq!(
            serve.database.database_url.as_deref(),
            Some("postgres://localhost/roster")
        );
    }
}
