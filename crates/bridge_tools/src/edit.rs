//! The `edit_file` tool: 1-indexed inclusive line-range edits converted to
//! LSP-style ranges, then applied with the same algorithm `rename` uses.

use std::path::Path;

use bridge_core::{Error, Result};
use lsp_types::{Position, Range, TextEdit};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::apply::apply_edits_to_file;
use crate::context::split_lines;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EditRequest {
  /// 1-indexed starting line of the replaced range (inclusive)
  pub start_line: u32,
  /// 1-indexed ending line of the replaced range (inclusive)
  pub end_line: u32,
  /// Replacement text for the range
  pub new_text: String,
}

pub async fn edit_file(file_path: &Path, edits: &[EditRequest]) -> Result<String> {
  let text = tokio::fs::read_to_string(file_path).await?;
  let lines = split_lines(&text);
  let total_lines = lines.len();

  let mut text_edits = Vec::with_capacity(edits.len());
  let mut removed = 0usize;
  let mut added = 0usize;

  for req in edits {
    if req.start_line < 1 {
      return Err(Error::Config(format!("startLine must be >= 1, got {}", req.start_line)));
    }

    let (text_edit, r, a) = to_lsp_edit(&lines, total_lines, req);
    removed += r;
    added += a;
    text_edits.push(text_edit);
  }

  apply_edits_to_file(file_path, text_edits).await?;

  Ok(format!(
    "Applied {} edit(s) to {}: {removed} line(s) removed, {added} line(s) added",
    edits.len(),
    file_path.display()
  ))
}

fn to_lsp_edit(lines: &[&str], total_lines: usize, req: &EditRequest) -> (TextEdit, usize, usize) {
  let added = if req.new_text.is_empty() { 0 } else { req.new_text.split('\n').count() };

  if req.start_line as usize > total_lines {
    let last_idx = total_lines.saturating_sub(1);
    let last_len = lines.get(last_idx).map(|l| l.encode_utf16().count()).unwrap_or(0) as u32;
    let pos = Position::new(last_idx as u32, last_len);
    return (
      TextEdit {
        range: Range::new(pos, pos),
        new_text: req.new_text.clone(),
      },
      0,
      added,
    );
  }

  let start_idx = (req.start_line - 1) as usize;
  let end_line_1idx = req.end_line.min(total_lines as u32);
  let end_idx = (end_line_1idx - 1) as usize;
  let end_len = lines.get(end_idx).map(|l| l.encode_utf16().count()).unwrap_or(0) as u32;
  let removed = end_idx.saturating_sub(start_idx) + 1;

  (
    TextEdit {
      range: Range::new(Position::new(start_idx as u32, 0), Position::new(end_idx as u32, end_len)),
      new_text: req.new_text.clone(),
    },
    removed,
    added,
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn within_file_edit_spans_requested_lines() {
    let lines = ["one", "two", "three", "four"];
    let req = EditRequest {
      start_line: 2,
      end_line: 3,
      new_text: "TWO\nTHREE".into(),
    };
    let (edit, removed, added) = to_lsp_edit(&lines, lines.len(), &req);
    assert_eq!(edit.range.start, Position::new(1, 0));
    assert_eq!(edit.range.end, Position::new(2, 5));
    assert_eq!(removed, 2);
    assert_eq!(added, 2);
  }

  #[test]
  fn end_line_past_eof_is_capped_to_last_line() {
    let lines = ["one", "two"];
    let req = EditRequest {
      start_line: 1,
      end_line: 100,
      new_text: "X".into(),
    };
    let (edit, removed, _) = to_lsp_edit(&lines, lines.len(), &req);
    assert_eq!(edit.range.end, Position::new(1, 3));
    assert_eq!(removed, 2);
  }

  #[test]
  fn start_line_past_eof_becomes_zero_width_append() {
    let lines = ["one", "two"];
    let req = EditRequest {
      start_line: 5,
      end_line: 5,
      new_text: "appended".into(),
    };
    let (edit, removed, added) = to_lsp_edit(&lines, lines.len(), &req);
    assert_eq!(edit.range.start, edit.range.end);
    assert_eq!(edit.range.start, Position::new(1, 3));
    assert_eq!(removed, 0);
    assert_eq!(added, 1);
  }
}
