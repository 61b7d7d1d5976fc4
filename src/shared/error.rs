use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - no matches at or above the `--fail-on` severity
    Success = 0,
    /// Matches at or above the configured severity were reported
    VulnerabilitiesDetected = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (missing package, metadata failure, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::VulnerabilitiesDetected => write!(f, "Vulnerabilities Detected (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Errors raised while assembling or rendering a vulnerability report.
///
/// The first three variants make up the assembly taxonomy: each one aborts
/// document construction immediately and no partial document is produced.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A match references a package that is not part of the same scan.
    /// This is an internal-consistency failure of the match producer.
    #[error("Unable to find package in collection: package={package_id} (vulnerability={vulnerability_id})\n\n💡 Hint: Matches must reference packages from the same scan; this indicates a bug in the match producer")]
    PackageNotFound {
        package_id: String,
        vulnerability_id: String,
    },

    #[error("Unable to fetch vulnerability metadata: vuln={vulnerability_id} namespace={namespace}\nDetails: {details}")]
    MetadataRetrieval {
        vulnerability_id: String,
        namespace: String,
        details: String,
    },

    #[error("Failed to format report timestamp: {details}")]
    Timestamp { details: String },

    #[error("Unsupported source type: {kind}\n\n💡 Hint: Supported source types are image, directory and file")]
    UnsupportedSource { kind: String },

    #[error("Failed to parse scan input: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file contains a valid scan document in JSON format")]
    ScanInputParseError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    /// Validation error for user-provided values (config, flags, constraints)
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}
