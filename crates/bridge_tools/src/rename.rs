//! The `rename` tool: `textDocument/rename` followed by tool-side
//! application of the returned `WorkspaceEdit`.

use std::path::Path;
use std::sync::Arc;

use bridge_core::Result;
use bridge_lsp::LspClient;
use lsp_types::Position;

use crate::apply::apply_workspace_edit;
use crate::context;

pub async fn rename_symbol(
  client: &Arc<LspClient>,
  file_path: &Path,
  line: u32,
  column: u32,
  new_name: &str,
) -> Result<String> {
  let (uri, _) = context::open_and_read(client, file_path).await?;
  let position = Position::new(line.saturating_sub(1), column.saturating_sub(1));

  let Some(edit) = client.rename(uri, position, new_name).await? else {
    return Ok("No edits produced by rename".to_string());
  };

  let summary = apply_workspace_edit(&edit).await?;
  if summary.total_edits == 0 {
    return Ok("No edits produced by rename".to_string());
  }

  let mut out = format!(
    "Total changes: {} across {} file(s)\n",
    summary.total_edits,
    summary.per_file.len()
  );
  for (path, count) in &summary.per_file {
    out.push_str(&format!("  {}: {count} edit(s)\n", path.display()));
  }
  Ok(out)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::apply::EditSummary;
  use std::path::PathBuf;

  #[test]
  fn summary_format_matches_end_to_end_scenario() {
    let mut summary = EditSummary::default();
    summary.total_edits = 4;
    summary.per_file.insert(PathBuf::from("a.rs"), 3);
    summary.per_file.insert(PathBuf::from("b.rs"), 1);

    let header = format!(
      "Total changes: {} across {} file(s)",
      summary.total_edits,
      summary.per_file.len()
    );
    assert_eq!(header, "Total changes: 4 across 2 file(s)");
  }
}
