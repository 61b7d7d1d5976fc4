use crate::application::read_models::Document;
use crate::shared::Result;

/// DocumentFormatter port for rendering a report document
///
/// This port abstracts the rendering of the assembled document
/// (JSON, Markdown, etc.).
pub trait DocumentFormatter {
    /// Formats the document
    ///
    /// # Returns
    /// Rendered document content as a string
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, document: &Document) -> Result<String>;
}
