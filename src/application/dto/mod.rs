/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod document_request;
mod output_format;
mod scan_input;

pub use document_request::{DocumentRequest, ToolIdentity};
pub use output_format::OutputFormat;
pub use scan_input::ScanInput;
