//! The balanced-brace range expansion used by the `definition` tool to turn
//! a bare identifier range into a human-readable block.

const COMMENT_PREFIXES: [&str; 6] = ["//", "/*", "*", "#", "@", "*/"];

/// Expand `[orig_start, orig_end]` (0-indexed, inclusive) outward:
/// - upward while the preceding line, trimmed, begins with a comment or
///   annotation marker
/// - forward by tracking brace balance and quoted-string state starting at
///   the original end line, stopping at the first line strictly after
///   `orig_start` where the balance returns to zero. If it never returns to
///   zero, the original end is kept.
pub fn expand_range(lines: &[&str], orig_start: usize, orig_end: usize) -> (usize, usize) {
  let mut start = orig_start;
  while start > 0 {
    let prev = lines[start - 1].trim_start();
    if COMMENT_PREFIXES.iter().any(|p| prev.starts_with(p)) {
      start -= 1;
    } else {
      break;
    }
  }

  let mut end = orig_end;
  let mut balance: i64 = 0;
  let mut in_string: Option<char> = None;
  let mut escaped = false;

  'lines: for (line_idx, line) in lines.iter().enumerate().skip(orig_end) {
    for c in line.chars() {
      if let Some(quote) = in_string {
        if escaped {
          escaped = false;
        } else if c == '\\' {
          escaped = true;
        } else if c == quote {
          in_string = None;
        }
        continue;
      }
      match c {
        '"' | '\'' => in_string = Some(c),
        '{' => balance += 1,
        '}' => balance -= 1,
        _ => {},
      }
    }

    if line_idx > orig_start && balance == 0 {
      end = line_idx;
      break 'lines;
    }
  }

  (start, end)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn expands_leading_comment_and_trailing_brace() {
    let lines = ["// doc", "function f() {", "  return 1;", "}"];
    assert_eq!(expand_range(&lines, 1, 1), (0, 3));
  }

  #[test]
  fn stops_at_first_non_comment_line_above() {
    let lines = ["let x = 1;", "// doc", "function f() {", "}"];
    assert_eq!(expand_range(&lines, 2, 2), (1, 3));
  }

  #[test]
  fn keeps_original_end_when_balance_never_returns_to_zero() {
    let lines = ["function f() {", "  return 1;"];
    assert_eq!(expand_range(&lines, 0, 0), (0, 0));
  }

  #[test]
  fn braces_inside_string_literals_are_ignored() {
    let lines = ["function f() {", "  let s = \"{\";", "}"];
    assert_eq!(expand_range(&lines, 0, 0), (0, 2));
  }
}
