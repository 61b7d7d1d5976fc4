use crate::scan_report::domain::{IgnoredMatch, MatchSet, Package, ScanContext, SourceDescription};
use serde::Deserialize;

/// ScanInput - Everything a scan produced, as handed to report assembly
///
/// Deserialized from the scan input file:
///
/// ```json
/// {
///   "source": {"type": "directory", "target": "/src"},
///   "packages": [...],
///   "matches": [...],
///   "ignoredMatches": [...],
///   "db": {...}
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanInput {
    #[serde(default)]
    pub source: Option<SourceDescription>,
    #[serde(default)]
    pub packages: Vec<Package>,
    #[serde(default)]
    pub matches: MatchSet,
    #[serde(default)]
    pub ignored_matches: Vec<IgnoredMatch>,
    /// Description of the vulnerability database the matches came from
    #[serde(default)]
    pub db: serde_json::Value,
}

impl ScanInput {
    pub fn context(&self) -> ScanContext {
        ScanContext {
            source: self.source.clone(),
        }
    }
}
