use crate::application::dto::ScanInput;
use crate::ports::outbound::{MetadataSource, ScanInputReader};
use crate::scan_report::domain::VulnerabilityMetadata;
use crate::shared::error::ReportError;
use crate::shared::security::{validate_file_size, validate_regular_file, MAX_FILE_SIZE};
use crate::shared::Result;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// FileSystemReader adapter for reading scan documents from the file system
///
/// This adapter implements both ScanInputReader and MetadataSource ports.
/// Both inputs are JSON documents.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    /// Safely read a file with security checks:
    /// - Reject symbolic links
    /// - Check file size limits
    /// - Validate file is a regular file
    fn safe_read_file(&self, path: &Path, file_description: &str) -> Result<String> {
        let file_size = validate_regular_file(path, file_description)?;
        validate_file_size(file_size, path, MAX_FILE_SIZE)?;

        fs::read_to_string(path).map_err(|e| {
            ReportError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }

    fn read_json<T: DeserializeOwned>(&self, path: &Path, file_description: &str) -> Result<T> {
        let content = self.safe_read_file(path, file_description)?;
        serde_json::from_str(&content).map_err(|e| {
            ReportError::ScanInputParseError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanInputReader for FileSystemReader {
    fn read_scan_input(&self, path: &Path) -> Result<ScanInput> {
        self.read_json(path, "scan input")
    }
}

impl MetadataSource for FileSystemReader {
    fn read_metadata(&self, path: &Path) -> Result<Vec<VulnerabilityMetadata>> {
        self.read_json(path, "vulnerability metadata")
    }
}
