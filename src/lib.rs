//! vulnscope - vulnerability report assembly for scan results
//!
//! This library turns the raw output of a vulnerability scan (package
//! inventory, matches, ignored matches and the scanned source) into a
//! presentation document, and normalizes the OS and ecosystem specifiers
//! that vulnerability databases are indexed by. It follows hexagonal
//! architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`scan_report`): Scan model, override policies and distro selection
//! - **Application Layer** (`application`): Use cases, DTOs and read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use vulnscope::prelude::*;
//! use std::path::Path;
//!
//! # fn main() -> Result<()> {
//! // Create adapters
//! let reader = FileSystemReader::new();
//! let input = reader.read_scan_input(Path::new("scan.json"))?;
//! let metadata = reader.read_metadata(Path::new("metadata.json"))?;
//!
//! // Create use case
//! let use_case = BuildDocumentUseCase::new(
//!     InMemoryMetadataStore::new(metadata),
//!     StderrProgressReporter::new(),
//! );
//!
//! // Execute
//! let document = use_case.execute(&input, &DocumentRequest::default())?;
//!
//! // Format output
//! let output = JsonFormatter::new().format(&document)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod ports;
pub mod scan_report;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::database::InMemoryMetadataStore;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
    pub use crate::application::dto::{DocumentRequest, OutputFormat, ScanInput, ToolIdentity};
    pub use crate::application::read_models::{Document, IgnoredMatchView, MatchView};
    pub use crate::application::use_cases::BuildDocumentUseCase;
    pub use crate::ports::inbound::DocumentAssemblyPort;
    pub use crate::ports::outbound::{
        DocumentFormatter, MetadataSource, OutputPresenter, ProgressReporter, ScanInputReader,
        VulnerabilityMetadataProvider,
    };
    pub use crate::scan_report::domain::{
        Distro, IgnoreRule, IgnoredMatch, Match, MatchDetail, MatchSet, Package, PackageId,
        Severity, SourceDescription, SourceMetadata, Vulnerability, VulnerabilityMetadata,
        VulnerabilityReference,
    };
    pub use crate::scan_report::policies::{
        resolve_known_ecosystem, resolve_release, SchemaVersion, SortStrategy,
    };
    pub use crate::scan_report::services::DistroSelector;
    pub use crate::shared::error::{ExitCode, ReportError};
    pub use crate::shared::Result;
}
