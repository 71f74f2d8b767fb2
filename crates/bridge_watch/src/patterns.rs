//! The three glob-pattern shapes the watcher understands. Anything richer
//! (`{a,b}`, `?`, character ranges) is not supported and is documented here
//! as an intentional limitation rather than silently half-implemented.

use lsp_types::{GlobPattern, OneOf};

/// Extract the pattern string from either `workspace/didChangeWatchedFiles`
/// registration-option shape. A `RelativePattern`'s base URI is ignored;
/// only its `pattern` field is treated as the match string.
pub fn pattern_string(glob: &GlobPattern) -> &str {
  match glob {
    OneOf::Left(s) => s,
    OneOf::Right(relative) => relative.pattern.as_str(),
  }
}

/// Match a workspace-relative path against one of exactly three supported
/// shapes:
/// - `**/*` matches any path.
/// - `**/*.EXT` matches iff the path ends with `.EXT`.
/// - `*.EXT` matches the same way, with no intermediate-directory constraint.
///
/// Any other pattern returns `false` ("no match") rather than attempting a
/// general glob evaluation.
pub fn matches(pattern: &str, relative_path: &str) -> bool {
  if pattern == "**/*" {
    return true;
  }
  if let Some(ext) = pattern.strip_prefix("**/*.") {
    return relative_path.ends_with(&format!(".{ext}"));
  }
  if let Some(ext) = pattern.strip_prefix("*.") {
    return relative_path.ends_with(&format!(".{ext}"));
  }
  false
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn star_star_matches_anything() {
    assert!(matches("**/*", "a/b/c.rs"));
    assert!(matches("**/*", "c.rs"));
  }

  #[test]
  fn star_star_extension_requires_suffix() {
    assert!(matches("**/*.rs", "src/lib.rs"));
    assert!(!matches("**/*.rs", "src/lib.py"));
  }

  #[test]
  fn bare_extension_has_no_directory_constraint() {
    assert!(matches("*.ts", "a/b/c.ts"));
    assert!(matches("*.ts", "c.ts"));
    assert!(!matches("*.ts", "c.tsx"));
  }

  #[test]
  fn unsupported_patterns_never_match() {
    assert!(!matches("{a,b}.rs", "a.rs"));
    assert!(!matches("src/*.rs", "src/lib.rs"));
    assert!(!matches("a?.rs", "ab.rs"));
  }
}
