//! Entry point: parses the CLI, spawns and initializes the language-server
//! child, starts the workspace watcher, and serves the MCP tools over
//! stdio until the server is interrupted.

mod cli;
mod server;

use std::sync::Arc;

use bridge_core::telemetry::TelemetryConfig;
use bridge_lsp::{LspClient, LspClientConfig};
use bridge_watch::{WatcherConfig, WorkspaceWatcher};
use clap::Parser;
use rmcp::ServiceExt;
use rmcp::transport::io::stdio;
use tokio::signal;
use tracing::{error, info};

use cli::Cli;
use server::BridgeServer;

#[tokio::main]
async fn main() {
  if let Err(err) = run().await {
    error!(error = %err, "lsp-mcp-bridge exiting with error");
    std::process::exit(1);
  }
}

async fn run() -> anyhow::Result<()> {
  let telemetry = TelemetryConfig::from_env();
  bridge_core::telemetry::init(telemetry)?;

  let cli = Cli::parse();
  cli.validate()?;

  let workspace = cli.workspace.canonicalize()?;
  info!(workspace = %workspace.display(), lsp = %cli.lsp, "starting lsp-mcp-bridge");

  let lsp = LspClient::spawn(&cli.lsp, &cli.lsp_args, LspClientConfig::default()).await?;
  lsp.initialize(&workspace).await?;

  let watcher = Arc::new(WorkspaceWatcher::new(workspace.clone(), WatcherConfig::default()));
  watcher.start(lsp.clone()).await?;

  let server = BridgeServer::new(lsp.clone(), workspace);
  let service = server.serve(stdio()).await?;

  tokio::select! {
    _ = signal::ctrl_c() => {
      info!("received SIGINT, shutting down");
    }
    result = wait_for_sigterm() => {
      if let Err(err) = result {
        error!(error = %err, "error waiting for SIGTERM");
      } else {
        info!("received SIGTERM, shutting down");
      }
    }
    result = service.waiting() => {
      if let Err(err) = result {
        error!(error = %err, "MCP service ended with error");
      }
    }
  }

  watcher.stop().await;
  lsp.shutdown().await.ok();
  lsp.exit().await.ok();
  lsp.close().await?;

  Ok(())
}

#[cfg(unix)]
async fn wait_for_sigterm() -> anyhow::Result<()> {
  let mut term = signal::unix::signal(signal::unix::SignalKind::terminate())?;
  term.recv().await;
  Ok(())
}

#[cfg(not(unix))]
async fn wait_for_sigterm() -> anyhow::Result<()> {
  std::future::pending().await
}
