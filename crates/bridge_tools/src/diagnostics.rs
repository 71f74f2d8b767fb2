//! The `diagnostics` tool: grace-period poll of the Diagnostics Store after
//! opening a file, rendered with an optional context slice per diagnostic.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use bridge_core::Result;
use bridge_lsp::LspClient;
use lsp_types::{Diagnostic, DiagnosticSeverity};

use crate::context;
use crate::render::render_range;

const GRACE_PERIOD: Duration = Duration::from_millis(500);

pub async fn diagnostics(
  client: &Arc<LspClient>,
  file_path: &Path,
  context_lines: usize,
  show_line_numbers: bool,
) -> Result<String> {
  let (uri, text) = context::open_and_read(client, file_path).await?;
  tokio::time::sleep(GRACE_PERIOD).await;

  let diags = client.diagnostics_for(&uri);
  if diags.is_empty() {
    return Ok(format!("No diagnostics for {}", file_path.display()));
  }

  let lines = context::split_lines(&text);
  let total = lines.len();
  let blocks: Vec<String> = diags
    .iter()
    .map(|d| render_diagnostic(d, &lines, total, context_lines, show_line_numbers))
    .collect();

  Ok(blocks.join("\n\n"))
}

fn severity_name(severity: Option<DiagnosticSeverity>) -> &'static str {
  match severity {
    Some(DiagnosticSeverity::ERROR) => "Error",
    Some(DiagnosticSeverity::WARNING) => "Warning",
    Some(DiagnosticSeverity::INFORMATION) => "Information",
    Some(DiagnosticSeverity::HINT) => "Hint",
    _ => "Error",
  }
}

fn render_diagnostic(
  diagnostic: &Diagnostic,
  lines: &[&str],
  total: usize,
  context_lines: usize,
  show_line_numbers: bool,
) -> String {
  let mut block = String::new();
  block.push_str(&format!("[{}] ", severity_name(diagnostic.severity)));
  block.push_str(&format!(
    "L{}:C{} - L{}:C{}\n",
    diagnostic.range.start.line + 1,
    diagnostic.range.start.character + 1,
    diagnostic.range.end.line + 1,
    diagnostic.range.end.character + 1,
  ));
  block.push_str(&format!("{}\n", diagnostic.message));
  if let Some(source) = &diagnostic.source {
    block.push_str(&format!("Source: {source}\n"));
  }
  if let Some(code) = &diagnostic.code {
    let code = match code {
      lsp_types::NumberOrString::Number(n) => n.to_string(),
      lsp_types::NumberOrString::String(s) => s.clone(),
    };
    block.push_str(&format!("Code: {code}\n"));
  }

  let sl = diagnostic.range.start.line as usize;
  let el = diagnostic.range.end.line as usize;
  let lo = sl.saturating_sub(context_lines);
  let hi = (el + context_lines).min(total.saturating_sub(1));

  if show_line_numbers {
    block.push_str(&render_range(lines, lo, hi));
  } else {
    block.push_str(&lines[lo..=hi.min(lines.len().saturating_sub(1))].join("\n"));
  }

  block
}

#[cfg(test)]
mod tests {
  use super::*;
  use lsp_types::{Position, Range};

  fn diag(severity: DiagnosticSeverity) -> Diagnostic {
    Diagnostic {
      range: Range::new(Position::new(1, 0), Position::new(1, 5)),
      severity: Some(severity),
      code: None,
      code_description: None,
      source: Some("rustc".into()),
      message: "unused variable".into(),
      related_information: None,
      tags: None,
      data: None,
    }
  }

  #[test]
  fn severity_names_match_documented_numbering() {
    assert_eq!(severity_name(Some(DiagnosticSeverity::ERROR)), "Error");
    assert_eq!(severity_name(Some(DiagnosticSeverity::WARNING)), "Warning");
    assert_eq!(severity_name(Some(DiagnosticSeverity::INFORMATION)), "Information");
    assert_eq!(severity_name(Some(DiagnosticSeverity::HINT)), "Hint");
  }

  #[test]
  fn render_includes_source_and_context_slice() {
    let lines = ["a", "let x = 1;", "b", "c"];
    let block = render_diagnostic(&diag(DiagnosticSeverity::WARNING), &lines, lines.len(), 1, true);
    assert!(block.contains("[Warning]"));
    assert!(block.contains("Source: rustc"));
    assert!(block.contains("unused variable"));
  }
}
