use crate::application::dto::ScanInput;
use crate::scan_report::domain::VulnerabilityMetadata;
use crate::shared::Result;
use std::path::Path;

/// ScanInputReader port for loading the result of a scan
///
/// The scan input bundles the package inventory, the matches found against
/// it, the matches suppressed by ignore rules and the scanned source.
pub trait ScanInputReader {
    /// Reads and parses a scan input file
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist, is a symlink or is too large
    /// - The content is not a valid scan input document
    fn read_scan_input(&self, path: &Path) -> Result<ScanInput>;
}

/// MetadataSource port for loading an export of vulnerability metadata
pub trait MetadataSource {
    /// Reads every metadata record from the export at `path`
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    fn read_metadata(&self, path: &Path) -> Result<Vec<VulnerabilityMetadata>>;
}
