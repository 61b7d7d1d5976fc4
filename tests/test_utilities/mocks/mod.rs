/// Mock implementations for testing
mod mock_metadata_provider;
mod mock_progress_reporter;

pub use mock_metadata_provider::MockMetadataProvider;
pub use mock_progress_reporter::MockProgressReporter;
