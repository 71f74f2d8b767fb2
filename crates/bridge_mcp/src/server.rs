//! The MCP server: exposes the six bridge tools over `rmcp`'s
//! `ToolRouter`, translating each tool's `Result` into a `CallToolResult`.

use std::path::PathBuf;
use std::sync::Arc;

use bridge_lsp::LspClient;
use bridge_tools::EditRequest;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
  CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler, tool, tool_handler, tool_router};
use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DefinitionParams {
  /// Name of the symbol to locate
  pub symbol_name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ReferencesParams {
  /// Name of the symbol to find references for
  pub symbol_name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct HoverParams {
  /// Path to the file, relative to the workspace or absolute
  pub file_path: String,
  /// 1-indexed line number
  pub line: u32,
  /// 1-indexed column number
  pub column: u32,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DiagnosticsParams {
  /// Path to the file, relative to the workspace or absolute
  pub file_path: String,
  /// Lines of context to include around each diagnostic
  pub context_lines: Option<usize>,
  /// Whether to render line-number gutters
  pub show_line_numbers: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct RenameSymbolParams {
  /// Path to the file, relative to the workspace or absolute
  pub file_path: String,
  /// 1-indexed line number
  pub line: u32,
  /// 1-indexed column number
  pub column: u32,
  /// Replacement name
  pub new_name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct EditFileParams {
  /// Path to the file, relative to the workspace or absolute
  pub file_path: String,
  /// Line-range replacements, 1-indexed and inclusive on both ends
  pub edits: Vec<EditRequest>,
}

/// The MCP server. Holds the shared LSP client; the watcher runs
/// independently and is not driven by tool calls.
#[derive(Clone)]
pub struct BridgeServer {
  lsp: Arc<LspClient>,
  workspace: PathBuf,
  tool_router: ToolRouter<BridgeServer>,
}

#[tool_router]
impl BridgeServer {
  pub fn new(lsp: Arc<LspClient>, workspace: PathBuf) -> Self {
    Self {
      lsp,
      workspace,
      tool_router: Self::tool_router(),
    }
  }

  fn resolve(&self, file_path: &str) -> Result<PathBuf, CallToolResult> {
    bridge_tools::context::resolve_path(&self.workspace, file_path)
      .map_err(|e| CallToolResult::error(vec![Content::text(e.to_string())]))
  }

  #[tool(description = "Find the definition of a symbol by name")]
  async fn definition(
    &self,
    Parameters(params): Parameters<DefinitionParams>,
  ) -> Result<CallToolResult, McpError> {
    bridge_core::telemetry::metrics::TOOL_CALLS_TOTAL.increment();
    match bridge_tools::definition::definition(&self.lsp, &params.symbol_name).await {
      Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
      Err(e) => Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
    }
  }

  #[tool(description = "Find references to a symbol by name, grouped by file with context")]
  async fn references(
    &self,
    Parameters(params): Parameters<ReferencesParams>,
  ) -> Result<CallToolResult, McpError> {
    bridge_core::telemetry::metrics::TOOL_CALLS_TOTAL.increment();
    match bridge_tools::references::references(&self.lsp, &params.symbol_name).await {
      Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
      Err(e) => Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
    }
  }

  #[tool(description = "Show hover information at a file position")]
  async fn hover(&self, Parameters(params): Parameters<HoverParams>) -> Result<CallToolResult, McpError> {
    bridge_core::telemetry::metrics::TOOL_CALLS_TOTAL.increment();
    let path = match self.resolve(&params.file_path) {
      Ok(p) => p,
      Err(e) => return Ok(e),
    };
    match bridge_tools::hover::hover(&self.lsp, &path, params.line, params.column).await {
      Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
      Err(e) => Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
    }
  }

  #[tool(description = "Show diagnostics for a file, with surrounding context")]
  async fn diagnostics(
    &self,
    Parameters(params): Parameters<DiagnosticsParams>,
  ) -> Result<CallToolResult, McpError> {
    bridge_core::telemetry::metrics::TOOL_CALLS_TOTAL.increment();
    let path = match self.resolve(&params.file_path) {
      Ok(p) => p,
      Err(e) => return Ok(e),
    };
    let context_lines = params.context_lines.unwrap_or(5);
    let show_line_numbers = params.show_line_numbers.unwrap_or(true);
    match bridge_tools::diagnostics::diagnostics(&self.lsp, &path, context_lines, show_line_numbers).await
    {
      Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
      Err(e) => Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
    }
  }

  #[tool(description = "Rename the symbol at a file position and apply the resulting edits")]
  async fn rename_symbol(
    &self,
    Parameters(params): Parameters<RenameSymbolParams>,
  ) -> Result<CallToolResult, McpError> {
    bridge_core::telemetry::metrics::TOOL_CALLS_TOTAL.increment();
    let path = match self.resolve(&params.file_path) {
      Ok(p) => p,
      Err(e) => return Ok(e),
    };
    match bridge_tools::rename::rename_symbol(&self.lsp, &path, params.line, params.column, &params.new_name)
      .await
    {
      Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
      Err(e) => Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
    }
  }

  #[tool(description = "Apply 1-indexed inclusive line-range edits to a file")]
  async fn edit_file(
    &self,
    Parameters(params): Parameters<EditFileParams>,
  ) -> Result<CallToolResult, McpError> {
    bridge_core::telemetry::metrics::TOOL_CALLS_TOTAL.increment();
    let path = match self.resolve(&params.file_path) {
      Ok(p) => p,
      Err(e) => return Ok(e),
    };
    match bridge_tools::edit::edit_file(&path, &params.edits).await {
      Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
      Err(e) => Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
    }
  }
}

#[tool_handler]
impl ServerHandler for BridgeServer {
  fn get_info(&self) -> ServerInfo {
    ServerInfo {
      protocol_version: ProtocolVersion::V_2024_11_05,
      capabilities: ServerCapabilities::builder().enable_tools().build(),
      server_info: Implementation::from_build_env(),
      instructions: Some(
        "Bridges a spawned language server's LSP features (definition, references, hover, \
         diagnostics, rename, edit) to MCP tools."
          .to_string(),
      ),
    }
  }

  async fn initialize(
    &self,
    _request: rmcp::model::InitializeRequestParam,
    _context: RequestContext<RoleServer>,
  ) -> Result<rmcp::model::InitializeResult, McpError> {
    Ok(self.get_info())
  }
}
