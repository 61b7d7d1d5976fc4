/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, console, vulnerability store).
pub mod formatter;
pub mod output_presenter;
pub mod progress_reporter;
pub mod scan_input_reader;
pub mod vulnerability_metadata_provider;

pub use formatter::DocumentFormatter;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use scan_input_reader::{MetadataSource, ScanInputReader};
pub use vulnerability_metadata_provider::VulnerabilityMetadataProvider;
