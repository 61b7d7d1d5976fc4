use crate::scan_report::policies::SortStrategy;

/// Name and version of the tool producing the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolIdentity {
    pub name: String,
    pub version: String,
}

impl ToolIdentity {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl Default for ToolIdentity {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }
}

/// DocumentRequest - Options for assembling one report document
///
/// `configuration` is embedded into the descriptor as-is; the assembler
/// never looks inside it.
#[derive(Debug, Clone, Default)]
pub struct DocumentRequest {
    pub tool: ToolIdentity,
    pub configuration: serde_json::Value,
    pub sort_strategy: SortStrategy,
}

impl DocumentRequest {
    pub fn new(tool: ToolIdentity, configuration: serde_json::Value, sort_strategy: SortStrategy) -> Self {
        Self {
            tool,
            configuration,
            sort_strategy,
        }
    }
}
