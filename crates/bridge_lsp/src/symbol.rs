//! Uniform view over the two symbol shapes `workspace/symbol` can return.

use lsp_types::{Location, OneOf, Position, Range, SymbolInformation, SymbolKind, WorkspaceSymbol};

/// A symbol returned by `workspace/symbol`, abstracting over the two wire
/// shapes the LSP spec allows: the legacy flat `SymbolInformation` (always
/// carries a full range) and the newer `WorkspaceSymbol` (may carry only a
/// URI, with no range).
#[derive(Debug, Clone)]
pub enum Symbol {
  Information(SymbolInformation),
  Workspace(WorkspaceSymbol),
}

impl Symbol {
  pub fn name(&self) -> &str {
    match self {
      Symbol::Information(s) => &s.name,
      Symbol::Workspace(s) => &s.name,
    }
  }

  pub fn kind(&self) -> SymbolKind {
    match self {
      Symbol::Information(s) => s.kind,
      Symbol::Workspace(s) => s.kind,
    }
  }

  pub fn container_name(&self) -> Option<&str> {
    match self {
      Symbol::Information(s) => s.container_name.as_deref(),
      Symbol::Workspace(s) => s.container_name.as_deref(),
    }
  }

  /// The symbol's location. When the underlying `WorkspaceSymbol` carries
  /// only a URI (no range), a zero-length range at line 0 is synthesized so
  /// downstream code can stay uniform.
  pub fn location(&self) -> Location {
    match self {
      Symbol::Information(s) => s.location.clone(),
      Symbol::Workspace(s) => match &s.location {
        OneOf::Left(loc) => loc.clone(),
        OneOf::Right(workspace_loc) => Location {
          uri: workspace_loc.uri.clone(),
          range: Range {
            start: Position::new(0, 0),
            end: Position::new(0, 0),
          },
        },
      },
    }
  }
}

/// Flatten either shape of `workspace/symbol`'s response into a single list.
pub fn from_response(response: Option<lsp_types::WorkspaceSymbolResponse>) -> Vec<Symbol> {
  match response {
    None => Vec::new(),
    Some(lsp_types::WorkspaceSymbolResponse::Flat(items)) => {
      items.into_iter().map(Symbol::Information).collect()
    },
    Some(lsp_types::WorkspaceSymbolResponse::Nested(items)) => {
      items.into_iter().map(Symbol::Workspace).collect()
    },
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use lsp_types::{Uri, WorkspaceLocation};
  use std::str::FromStr;

  fn uri() -> Uri {
    Uri::from_str("file:///tmp/a.rs").unwrap()
  }

  #[test]
  fn workspace_symbol_without_range_synthesizes_zero_length_location() {
    let ws = WorkspaceSymbol {
      name: "Foo".into(),
      kind: SymbolKind::METHOD,
      tags: None,
      container_name: None,
      location: OneOf::Right(WorkspaceLocation { uri: uri() }),
      data: None,
    };
    let symbol = Symbol::Workspace(ws);
    let loc = symbol.location();
    assert_eq!(loc.range.start, Position::new(0, 0));
    assert_eq!(loc.range.end, Position::new(0, 0));
  }

  #[test]
  fn symbol_information_keeps_its_range() {
    let info = SymbolInformation {
      name: "Bar".into(),
      kind: SymbolKind::FUNCTION,
      tags: None,
      deprecated: None,
      location: Location {
        uri: uri(),
        range: Range::new(Position::new(1, 0), Position::new(1, 12)),
      },
      container_name: None,
    };
    let symbol = Symbol::Information(info);
    assert_eq!(symbol.location().range.end, Position::new(1, 12));
  }
}
