//! Shared line-number gutter rendering and line-range collapsing, used by
//! the `definition`, `references`, and `diagnostics` tools.

use std::collections::BTreeSet;

/// Render one source line with a 6-column right-padded 1-indexed gutter,
/// e.g. `     1| fn main() {`.
pub fn gutter_line(line_no_1idx: usize, text: &str) -> String {
  format!("{line_no_1idx:>6}| {text}")
}

/// Render the inclusive 0-indexed range `[start, end]` of `lines` with the
/// gutter applied to each line.
pub fn render_range(lines: &[&str], start: usize, end: usize) -> String {
  let end = end.min(lines.len().saturating_sub(1));
  (start..=end)
    .map(|i| gutter_line(i + 1, lines.get(i).copied().unwrap_or("")))
    .collect::<Vec<_>>()
    .join("\n")
}

/// Collapse a set of 0-indexed line indices into the maximal list of
/// contiguous, non-overlapping `(start, end)` ranges covering exactly that
/// set and no other indices.
pub fn collapse_lines(indices: &BTreeSet<usize>) -> Vec<(usize, usize)> {
  let mut ranges = Vec::new();
  let mut iter = indices.iter().copied();
  let Some(first) = iter.next() else {
    return ranges;
  };

  let mut start = first;
  let mut end = first;
  for i in iter {
    if i == end + 1 {
      end = i;
    } else {
      ranges.push((start, end));
      start = i;
      end = i;
    }
  }
  ranges.push((start, end));
  ranges
}

/// Render a collection of collapsed ranges, separated by `...` where the
/// ranges are non-adjacent.
pub fn render_collapsed(lines: &[&str], ranges: &[(usize, usize)]) -> String {
  ranges
    .iter()
    .map(|&(start, end)| render_range(lines, start, end))
    .collect::<Vec<_>>()
    .join("\n...\n")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn gutter_pads_to_six_columns() {
    assert_eq!(gutter_line(1, "fn main() {"), "     1| fn main() {");
    assert_eq!(gutter_line(123456, "x"), "123456| x");
  }

  #[test]
  fn collapse_merges_contiguous_and_splits_gaps() {
    let indices: BTreeSet<usize> = [1, 2, 3, 4, 5, 9, 10, 11, 12, 13].into_iter().collect();
    assert_eq!(collapse_lines(&indices), vec![(1, 5), (9, 13)]);
  }

  #[test]
  fn collapse_of_empty_set_is_empty() {
    assert!(collapse_lines(&BTreeSet::new()).is_empty());
  }

  #[test]
  fn references_context_scenario_from_spec() {
    // 20-line file, references at {3, 4, 12}, contextLines = 2.
    let total = 20usize;
    let refs = [3usize, 4, 12];
    let context = 2usize;
    let mut indices = BTreeSet::new();
    for &r in &refs {
      let lo = r.saturating_sub(context);
      let hi = (r + context).min(total - 1);
      for i in lo..=hi {
        indices.insert(i);
      }
    }
    assert_eq!(collapse_lines(&indices), vec![(1, 6), (10, 14)]);
  }
}
