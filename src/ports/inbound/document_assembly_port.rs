use crate::application::dto::{DocumentRequest, ScanInput};
use crate::application::read_models::Document;
use crate::shared::Result;

/// DocumentAssemblyPort - Inbound port for the report assembly use case
///
/// This port defines the interface that external adapters (the CLI)
/// use to turn a scan input into a report document.
pub trait DocumentAssemblyPort {
    /// Assembles the report document for a scan
    ///
    /// # Errors
    /// Returns an error if:
    /// - A match refers to a package missing from the inventory
    /// - Vulnerability metadata cannot be retrieved
    /// - The scanned source kind cannot be presented
    /// - The timestamp cannot be produced
    fn assemble(&self, input: &ScanInput, request: &DocumentRequest) -> Result<Document>;
}
