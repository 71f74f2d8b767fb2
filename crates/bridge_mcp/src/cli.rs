//! Command-line surface: workspace directory, language-server command, and
//! its forwarded argv.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "lsp-mcp-bridge", about = "MCP server bridging to a language server over LSP")]
pub struct Cli {
  /// Workspace directory the language server and file watcher operate on.
  #[arg(long)]
  pub workspace: PathBuf,

  /// Language-server command to spawn.
  #[arg(long)]
  pub lsp: String,

  /// Arguments forwarded verbatim to the language-server command, after `--`.
  #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
  pub lsp_args: Vec<String>,
}

impl Cli {
  pub fn validate(&self) -> bridge_core::Result<()> {
    if !self.workspace.is_dir() {
      return Err(bridge_core::Error::Config(format!(
        "--workspace does not exist or is not a directory: {}",
        self.workspace.display()
      )));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_workspace_lsp_and_trailing_args() {
    let cli = Cli::parse_from([
      "lsp-mcp-bridge",
      "--workspace",
      "/tmp",
      "--lsp",
      "rust-analyzer",
      "--",
      "--stdio",
      "--log=info",
    ]);
    assert_eq!(cli.workspace, PathBuf::from("/tmp"));
    assert_eq!(cli.lsp, "rust-analyzer");
    assert_eq!(cli.lsp_args, vec!["--stdio", "--log=info"]);
  }

  #[test]
  fn validate_rejects_missing_workspace() {
    let cli = Cli::parse_from([
      "lsp-mcp-bridge",
      "--workspace",
      "/definitely/not/a/real/path/xyz",
      "--lsp",
      "gopls",
    ]);
    assert!(cli.validate().is_err());
  }
}
