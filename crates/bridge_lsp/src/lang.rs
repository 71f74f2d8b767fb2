//! Extension-to-`languageId` mapping for `textDocument/didOpen`.

use std::path::Path;

/// Detect the LSP `languageId` for a file based on its extension
/// (case-insensitive). Falls back to `"plaintext"` for unrecognized
/// extensions.
pub fn detect_language_id(path: &Path) -> &'static str {
  let ext = path
    .extension()
    .and_then(|e| e.to_str())
    .unwrap_or_default()
    .to_ascii_lowercase();

  match ext.as_str() {
    "ts" => "typescript",
    "tsx" => "typescriptreact",
    "js" => "javascript",
    "jsx" => "javascriptreact",
    "py" => "python",
    "go" => "go",
    "rs" => "rust",
    "c" | "h" => "c",
    "cpp" | "cc" | "cxx" | "hpp" => "cpp",
    "java" => "java",
    "cs" => "csharp",
    "rb" => "ruby",
    "php" => "php",
    "swift" => "swift",
    "kt" => "kotlin",
    "scala" => "scala",
    "r" => "r",
    "sh" | "bash" | "zsh" | "fish" => "shell",
    _ => "plaintext",
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::path::PathBuf;

  #[test]
  fn common_extensions() {
    assert_eq!(detect_language_id(&PathBuf::from("a.rs")), "rust");
    assert_eq!(detect_language_id(&PathBuf::from("a.TSX")), "typescriptreact");
    assert_eq!(detect_language_id(&PathBuf::from("a.cpp")), "cpp");
    assert_eq!(detect_language_id(&PathBuf::from("a.h")), "c");
  }

  #[test]
  fn unknown_extension_falls_back_to_plaintext() {
    assert_eq!(detect_language_id(&PathBuf::from("a.xyz")), "plaintext");
    assert_eq!(detect_language_id(&PathBuf::from("noext")), "plaintext");
  }
}
