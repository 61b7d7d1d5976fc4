//! Document read model
//!
//! The report as serialized for consumers. Field names and the nullability of
//! each field are part of the output contract: `matches` is always an array,
//! `ignoredMatches` is omitted when nothing was ignored, `source` is `null`
//! when the scan had no source.

use super::match_view::{IgnoredMatchView, MatchView};
use crate::scan_report::domain::{Distro, ImageMetadata, SourceMetadata};
use crate::shared::error::ReportError;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub matches: Vec<MatchView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignored_matches: Option<Vec<IgnoredMatchView>>,
    pub source: Option<SourceView>,
    pub distro: DistributionView,
    pub descriptor: DescriptorView,
}

/// What was scanned
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceView {
    #[serde(rename = "type")]
    pub kind: String,
    pub target: SourceTarget,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SourceTarget {
    Image(ImageMetadata),
    Path(String),
}

impl TryFrom<&SourceMetadata> for SourceView {
    type Error = ReportError;

    fn try_from(metadata: &SourceMetadata) -> Result<Self, Self::Error> {
        let target = match metadata {
            SourceMetadata::Image(image) => SourceTarget::Image(image.clone()),
            SourceMetadata::Directory { path } | SourceMetadata::File { path } => {
                SourceTarget::Path(path.clone())
            }
            SourceMetadata::Unknown { kind } => {
                return Err(ReportError::UnsupportedSource { kind: kind.clone() })
            }
        };

        Ok(Self {
            kind: metadata.kind().to_string(),
            target,
        })
    }
}

/// Distribution most packages were installed by; empty when none was detected
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionView {
    pub name: String,
    pub version: String,
    pub id_like: Vec<String>,
}

impl From<Option<&Distro>> for DistributionView {
    fn from(distro: Option<&Distro>) -> Self {
        match distro {
            Some(d) => Self {
                name: d.name().to_string(),
                version: d.version().to_string(),
                id_like: d
                    .id_like()
                    .iter()
                    .map(|id| id.trim().to_lowercase())
                    .filter(|id| !id.is_empty())
                    .collect(),
            },
            None => Self::default(),
        }
    }
}

/// Describes the tool run that produced the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptorView {
    pub name: String,
    pub version: String,
    pub configuration: serde_json::Value,
    pub db: serde_json::Value,
    pub timestamp: String,
}
