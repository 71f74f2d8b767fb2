//! Human-readable names for LSP `SymbolKind`, used in the `definition`
//! location block.

use lsp_types::SymbolKind;

pub fn kind_name(kind: SymbolKind) -> &'static str {
  match kind {
    SymbolKind::FILE => "File",
    SymbolKind::MODULE => "Module",
    SymbolKind::NAMESPACE => "Namespace",
    SymbolKind::PACKAGE => "Package",
    SymbolKind::CLASS => "Class",
    SymbolKind::METHOD => "Method",
    SymbolKind::PROPERTY => "Property",
    SymbolKind::FIELD => "Field",
    SymbolKind::CONSTRUCTOR => "Constructor",
    SymbolKind::ENUM => "Enum",
    SymbolKind::INTERFACE => "Interface",
    SymbolKind::FUNCTION => "Function",
    SymbolKind::VARIABLE => "Variable",
    SymbolKind::CONSTANT => "Constant",
    SymbolKind::STRING => "String",
    SymbolKind::NUMBER => "Number",
    SymbolKind::BOOLEAN => "Boolean",
    SymbolKind::ARRAY => "Array",
    SymbolKind::OBJECT => "Object",
    SymbolKind::KEY => "Key",
    SymbolKind::NULL => "Null",
    SymbolKind::ENUM_MEMBER => "EnumMember",
    SymbolKind::STRUCT => "Struct",
    SymbolKind::EVENT => "Event",
    SymbolKind::OPERATOR => "Operator",
    SymbolKind::TYPE_PARAMETER => "TypeParameter",
    _ => "Symbol",
  }
}
