//! The `references` tool: workspace-symbol lookup (permissive match
//! policy), per-URI reference grouping, and context-line rendering.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use bridge_core::Result;
use bridge_lsp::LspClient;
use lsp_types::Location;

use crate::context;
use crate::matching::references_matches;
use crate::render::{collapse_lines, render_collapsed};

const DEFAULT_CONTEXT_LINES: usize = 5;

fn context_lines() -> usize {
  std::env::var("LSP_CONTEXT_LINES")
    .ok()
    .and_then(|v| v.parse().ok())
    .unwrap_or(DEFAULT_CONTEXT_LINES)
}

/// Look up `symbol_name`, collect references for every accepted match, and
/// render one block per file grouped and collapsed by context lines.
pub async fn references(client: &Arc<LspClient>, symbol_name: &str) -> Result<String> {
  let symbols = client.workspace_symbol(symbol_name).await?;
  let accepted: Vec<_> = symbols.iter().filter(|s| references_matches(symbol_name, s)).collect();

  if accepted.is_empty() {
    return Ok(format!("No references found for {symbol_name}"));
  }

  let mut by_uri: BTreeMap<String, Vec<Location>> = BTreeMap::new();
  for symbol in accepted {
    let location = symbol.location();
    let path = bridge_lsp::uri::uri_to_path(&location.uri);
    context::open_and_read(client, &path).await?;
    let locations = client
      .references(location.uri.clone(), location.range.start, false)
      .await?;
    for loc in locations {
      by_uri.entry(loc.uri.as_str().to_string()).or_default().push(loc);
    }
  }

  if by_uri.is_empty() {
    return Ok(format!("No references found for {symbol_name}"));
  }

  let context = context_lines();
  let mut blocks = Vec::with_capacity(by_uri.len());

  for (uri_str, mut locations) in by_uri {
    locations.sort_by_key(|l| (l.range.start.line, l.range.start.character));
    let uri: lsp_types::Uri = uri_str.parse().map_err(|e| {
      bridge_core::Error::Internal(format!("invalid URI in reference result {uri_str}: {e}"))
    })?;
    let path = bridge_lsp::uri::uri_to_path(&uri);
    let text = tokio::fs::read_to_string(&path).await?;
    let lines = context::split_lines(&text);
    let total = lines.len();

    let mut indices = BTreeSet::new();
    for loc in &locations {
      let sl = loc.range.start.line as usize;
      let el = loc.range.end.line as usize;
      let lo = sl.saturating_sub(context);
      let hi = (el + context).min(total.saturating_sub(1));
      for i in lo..=hi {
        indices.insert(i);
      }
    }
    let ranges = collapse_lines(&indices);

    let mut block = String::new();
    block.push_str(&format!("{}\n", path.display()));
    block.push_str(&format!("References in File: {}\n", locations.len()));
    let positions = locations
      .iter()
      .map(|l| format!("L{}:C{}", l.range.start.line + 1, l.range.start.character + 1))
      .collect::<Vec<_>>()
      .join(", ");
    block.push_str(&format!("At: {positions}\n"));
    block.push_str(&render_collapsed(&lines, &ranges));

    blocks.push(block);
  }

  Ok(blocks.join("\n\n"))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_context_lines_is_five() {
    std::env::remove_var("LSP_CONTEXT_LINES");
    assert_eq!(context_lines(), 5);
  }

  #[test]
  fn context_lines_reads_env_override() {
    std::env::set_var("LSP_CONTEXT_LINES", "2");
    assert_eq!(context_lines(), 2);
    std::env::remove_var("LSP_CONTEXT_LINES");
  }
}
