//! Symbol match policies for `definition` and `references`. Both start from
//! a `workspace/symbol` query by raw name and then filter the results;
//! only the filter differs.

use bridge_lsp::Symbol;
use lsp_types::SymbolKind;

/// `definition`'s match policy:
/// - input contains `.`: exact name equality only
/// - else if the symbol's kind is Method: exact equality, or the name
///   ending in `::name` or `.name` (qualified-method names)
/// - else: exact equality
pub fn definition_matches(input: &str, symbol: &Symbol) -> bool {
  let name = symbol.name();
  if input.contains('.') {
    return name == input;
  }
  if symbol.kind() == SymbolKind::METHOD {
    return name == input
      || name.ends_with(&format!("::{input}"))
      || name.ends_with(&format!(".{input}"));
  }
  name == input
}

/// `references`'s match policy, more permissive when the input is
/// qualified: accept either the full qualified name or its last segment.
pub fn references_matches(input: &str, symbol: &Symbol) -> bool {
  let name = symbol.name();
  if let Some((_, last)) = input.rsplit_once('.') {
    return name == input || name == last;
  }
  name == input
}

#[cfg(test)]
mod tests {
  use super::*;
  use lsp_types::{Location, OneOf, Position, Range, SymbolInformation, Uri, WorkspaceSymbol};
  use std::str::FromStr;

  fn info(name: &str, kind: SymbolKind) -> Symbol {
    Symbol::Information(SymbolInformation {
      name: name.into(),
      kind,
      tags: None,
      deprecated: None,
      location: Location {
        uri: Uri::from_str("file:///tmp/a.rs").unwrap(),
        range: Range::new(Position::new(0, 0), Position::new(0, 1)),
      },
      container_name: None,
    })
  }

  #[test]
  fn definition_accepts_qualified_method_names_for_bare_input() {
    let foo = info("Foo", SymbolKind::METHOD);
    let bar_foo = info("Bar::Foo", SymbolKind::METHOD);
    let other_foo = info("other.Foo", SymbolKind::METHOD);

    assert!(definition_matches("Foo", &foo));
    assert!(definition_matches("Foo", &bar_foo));
    assert!(definition_matches("Foo", &other_foo));
  }

  #[test]
  fn definition_requires_exact_equality_when_input_is_qualified() {
    let bar_foo = info("Bar::Foo", SymbolKind::METHOD);
    assert!(!definition_matches("Bar.Foo", &bar_foo));

    let bar_dot_foo = info("Bar.Foo", SymbolKind::METHOD);
    assert!(definition_matches("Bar.Foo", &bar_dot_foo));
  }

  #[test]
  fn definition_non_method_requires_exact_equality() {
    let foo = info("Foo", SymbolKind::FUNCTION);
    let bar_foo = info("Bar::Foo", SymbolKind::FUNCTION);
    assert!(definition_matches("Foo", &foo));
    assert!(!definition_matches("Foo", &bar_foo));
  }

  #[test]
  fn references_accepts_qualified_or_last_segment() {
    let full = info("Bar.Foo", SymbolKind::FUNCTION);
    let segment = info("Foo", SymbolKind::FUNCTION);
    assert!(references_matches("Bar.Foo", &full));
    assert!(references_matches("Bar.Foo", &segment));
    assert!(!references_matches("Bar.Foo", &info("Other", SymbolKind::FUNCTION)));
  }

  #[test]
  fn references_workspace_symbol_without_range_still_matches_by_name() {
    let ws = WorkspaceSymbol {
      name: "Foo".into(),
      kind: SymbolKind::FUNCTION,
      tags: None,
      container_name: None,
      location: OneOf::Right(lsp_types::WorkspaceLocation {
        uri: Uri::from_str("file:///tmp/a.rs").unwrap(),
      }),
      data: None,
    };
    assert!(references_matches("Foo", &Symbol::Workspace(ws)));
  }
}
