//! WorkspaceEdit application, done by the tool itself rather than relying
//! on the server's `workspace/applyEdit` (which the client acknowledges
//! but never applies — see `bridge_lsp::client`).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use bridge_core::{ErrorContext, Result};
use lsp_types::{TextEdit, WorkspaceEdit};

#[derive(Debug, Default)]
pub struct EditSummary {
  pub total_edits: usize,
  pub per_file: BTreeMap<PathBuf, usize>,
}

/// Apply every per-file edit list in `edit.changes`, in any order across
/// files (each file's edits are independent).
pub async fn apply_workspace_edit(edit: &WorkspaceEdit) -> Result<EditSummary> {
  let mut summary = EditSummary::default();

  if let Some(changes) = &edit.changes {
    for (uri, edits) in changes {
      let path = bridge_lsp::uri::uri_to_path(uri);
      apply_edits_to_file(&path, edits.clone()).await?;
      summary.total_edits += edits.len();
      *summary.per_file.entry(path).or_insert(0) += edits.len();
    }
  }

  Ok(summary)
}

/// Apply `edits` to the file at `path`: sort descending by start position
/// so earlier edits in the file are unaffected by later ones, then splice
/// each edit's range in turn.
pub async fn apply_edits_to_file(path: &Path, mut edits: Vec<TextEdit>) -> Result<()> {
  let text = tokio::fs::read_to_string(path)
    .await
    .with_context(|| format!("reading {}", path.display()))?;
  let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();

  edits.sort_by(|a, b| {
    (b.range.start.line, b.range.start.character).cmp(&(a.range.start.line, a.range.start.character))
  });

  for edit in &edits {
    let sl = edit.range.start.line as usize;
    let sc = edit.range.start.character as usize;
    let el = edit.range.end.line as usize;
    let ec = edit.range.end.character as usize;

    if sl == el {
      let units: Vec<u16> = lines[sl].encode_utf16().collect();
      let prefix = String::from_utf16_lossy(&units[..sc.min(units.len())]);
      let suffix = String::from_utf16_lossy(&units[ec.min(units.len())..]);
      lines[sl] = format!("{prefix}{}{suffix}", edit.new_text);
    } else {
      let start_units: Vec<u16> = lines[sl].encode_utf16().collect();
      let end_units: Vec<u16> = lines[el].encode_utf16().collect();
      let prefix = String::from_utf16_lossy(&start_units[..sc.min(start_units.len())]);
      let suffix = String::from_utf16_lossy(&end_units[ec.min(end_units.len())..]);
      let replacement = format!("{prefix}{}{suffix}", edit.new_text);
      lines.splice(sl..=el, std::iter::once(replacement));
    }
  }

  tokio::fs::write(path, lines.join("\n"))
    .await
    .with_context(|| format!("writing {}", path.display()))?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use lsp_types::{Position, Range};

  #[tokio::test]
  async fn applies_two_non_overlapping_edits_regardless_of_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.txt");

    let edit_a = TextEdit {
      range: Range::new(Position::new(0, 5), Position::new(0, 8)),
      new_text: "XYZ".into(),
    };
    let edit_b = TextEdit {
      range: Range::new(Position::new(2, 0), Position::new(3, 4)),
      new_text: "AB".into(),
    };

    let original = "hello world\nmiddle\nlast line\nmore\ntail";
    tokio::fs::write(&path, original).await.unwrap();
    apply_edits_to_file(&path, vec![edit_a.clone(), edit_b.clone()]).await.unwrap();
    let forward = tokio::fs::read_to_string(&path).await.unwrap();

    tokio::fs::write(&path, original).await.unwrap();
    apply_edits_to_file(&path, vec![edit_b, edit_a]).await.unwrap();
    let reversed = tokio::fs::read_to_string(&path).await.unwrap();

    assert_eq!(forward, reversed);
    assert_eq!(forward, "helloXYZrld\nmiddle\nAB\ntail");
  }

  #[tokio::test]
  async fn single_line_edit_replaces_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.txt");
    tokio::fs::write(&path, "let x = 1;").await.unwrap();

    let edit = TextEdit {
      range: Range::new(Position::new(0, 4), Position::new(0, 5)),
      new_text: "y".into(),
    };
    apply_edits_to_file(&path, vec![edit]).await.unwrap();
    assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "let y = 1;");
  }

  #[tokio::test]
  async fn edit_offsets_are_utf16_code_units_not_chars() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.txt");

    // "🎉" is one Unicode scalar value but two UTF-16 code units; a
    // char-indexed splice would land two positions early.
    let original = "🎉abcdef";
    tokio::fs::write(&path, original).await.unwrap();

    let edit = TextEdit {
      range: Range::new(Position::new(0, 4), Position::new(0, 6)),
      new_text: "XY".into(),
    };
    apply_edits_to_file(&path, vec![edit]).await.unwrap();
    assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "🎉abXYef");
  }
}
