//! The `hover` tool: format whichever of the three `HoverContents` shapes
//! the server returns.

use std::path::Path;
use std::sync::Arc;

use bridge_core::Result;
use bridge_lsp::LspClient;
use lsp_types::{HoverContents, MarkedString, Position};

use crate::context;

pub async fn hover(client: &Arc<LspClient>, file_path: &Path, line: u32, column: u32) -> Result<String> {
  let (uri, _) = context::open_and_read(client, file_path).await?;
  let position = Position::new(line.saturating_sub(1), column.saturating_sub(1));

  let header = format!("Hover information for {}:{}:{}", file_path.display(), line, column);
  let Some(hover) = client.hover(uri, position).await? else {
    return Ok(format!("{header}\nNo hover information available"));
  };

  let body = format_contents(&hover.contents);
  Ok(format!("{header}\n{body}"))
}

fn format_contents(contents: &HoverContents) -> String {
  match contents {
    HoverContents::Scalar(marked) => format_marked(marked),
    HoverContents::Array(items) => items.iter().map(format_marked).collect::<Vec<_>>().join("\n---\n"),
    HoverContents::Markup(markup) => markup.value.clone(),
  }
}

fn format_marked(marked: &MarkedString) -> String {
  match marked {
    MarkedString::String(s) => s.clone(),
    MarkedString::LanguageString(ls) => format!("```{}\n{}\n```", ls.language, ls.value),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use lsp_types::{LanguageString, MarkupContent, MarkupKind};

  #[test]
  fn formats_plain_scalar_string() {
    let contents = HoverContents::Scalar(MarkedString::String("plain text".into()));
    assert_eq!(format_contents(&contents), "plain text");
  }

  #[test]
  fn formats_language_string_as_fenced_block() {
    let contents = HoverContents::Scalar(MarkedString::LanguageString(LanguageString {
      language: "rust".into(),
      value: "fn main() {}".into(),
    }));
    assert_eq!(format_contents(&contents), "```rust\nfn main() {}\n```");
  }

  #[test]
  fn formats_markup_content_verbatim() {
    let contents = HoverContents::Markup(MarkupContent {
      kind: MarkupKind::Markdown,
      value: "**bold**".into(),
    });
    assert_eq!(format_contents(&contents), "**bold**");
  }

  #[test]
  fn formats_array_of_marked_strings_with_separator() {
    let contents = HoverContents::Array(vec![
      MarkedString::String("a".into()),
      MarkedString::String("b".into()),
    ]);
    assert_eq!(format_contents(&contents), "a\n---\nb");
  }
}
