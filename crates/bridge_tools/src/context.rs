//! Shared plumbing every tool uses: opening a file through the LSP client
//! before querying it, and loading its text for rendering.

use std::path::Path;

use bridge_core::{Error, ErrorContext, Result};
use bridge_lsp::LspClient;
use lsp_types::Uri;
use std::sync::Arc;

/// Open `path` (idempotent) and return its URI and line-split contents.
pub async fn open_and_read(client: &Arc<LspClient>, path: &Path) -> Result<(Uri, String)> {
  client.open_file(path).await?;
  let text = tokio::fs::read_to_string(path)
    .await
    .with_context(|| format!("reading {}", path.display()))?;
  let uri = bridge_lsp::uri::path_to_uri(path)?;
  Ok((uri, text))
}

/// Resolve a tool-supplied file path against the workspace root, rejecting
/// anything that does not exist.
pub fn resolve_path(workspace: &Path, file_path: &str) -> Result<std::path::PathBuf> {
  let path = Path::new(file_path);
  let resolved = if path.is_absolute() {
    path.to_path_buf()
  } else {
    workspace.join(path)
  };
  if !resolved.exists() {
    return Err(Error::Config(format!("file does not exist: {}", resolved.display())));
  }
  Ok(resolved)
}

pub fn split_lines(text: &str) -> Vec<&str> {
  text.split('\n').collect()
}
