use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetadata {
    #[serde(default)]
    pub user_input: String,
    #[serde(default, rename = "imageID")]
    pub image_id: String,
    #[serde(default)]
    pub manifest_digest: String,
    #[serde(default)]
    pub media_type: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub repo_digests: Vec<String>,
    #[serde(default)]
    pub architecture: String,
    #[serde(default)]
    pub os: String,
}

/// What was scanned, as described by the inventory collector
///
/// Kinds this crate cannot present are kept as `Unknown` so the failure
/// surfaces at assembly time with the offending kind, not at parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceMetadata {
    Image(ImageMetadata),
    Directory { path: String },
    File { path: String },
    Unknown { kind: String },
}

impl SourceMetadata {
    pub fn kind(&self) -> &str {
        match self {
            SourceMetadata::Image(_) => "image",
            SourceMetadata::Directory { .. } => "directory",
            SourceMetadata::File { .. } => "file",
            SourceMetadata::Unknown { kind } => kind,
        }
    }
}

impl<'de> Deserialize<'de> for SourceMetadata {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(rename = "type")]
            kind: String,
            #[serde(default)]
            target: serde_json::Value,
        }

        let raw = Raw::deserialize(deserializer)?;
        let path = || raw.target.as_str().unwrap_or_default().to_string();
        let metadata = match raw.kind.as_str() {
            "image" => SourceMetadata::Image(
                serde_json::from_value(raw.target.clone()).map_err(serde::de::Error::custom)?,
            ),
            "directory" => SourceMetadata::Directory { path: path() },
            "file" => SourceMetadata::File { path: path() },
            _ => SourceMetadata::Unknown {
                kind: raw.kind.clone(),
            },
        };
        Ok(metadata)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceDescription {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(flatten)]
    pub metadata: SourceMetadata,
}

/// Context of one scan invocation
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ScanContext {
    #[serde(default)]
    pub source: Option<SourceDescription>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_image_source() {
        let json = r#"{
            "name": "alpine",
            "version": "3.19",
            "type": "image",
            "target": {"userInput": "alpine:3.19", "imageID": "sha256:abc", "tags": ["alpine:3.19"]}
        }"#;
        let source: SourceDescription = serde_json::from_str(json).unwrap();
        assert_eq!(source.metadata.kind(), "image");
        match source.metadata {
            SourceMetadata::Image(image) => {
                assert_eq!(image.user_input, "alpine:3.19");
                assert_eq!(image.image_id, "sha256:abc");
            }
            other => panic!("unexpected metadata: {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_directory_source() {
        let json = r#"{"type": "directory", "target": "/src/project"}"#;
        let source: SourceDescription = serde_json::from_str(json).unwrap();
        assert_eq!(
            source.metadata,
            SourceMetadata::Directory {
                path: "/src/project".to_string()
            }
        );
        assert!(source.name.is_empty());
    }

    #[test]
    fn test_deserialize_unknown_source_keeps_kind() {
        let json = r#"{"type": "snap", "target": {"name": "core"}}"#;
        let source: SourceDescription = serde_json::from_str(json).unwrap();
        assert_eq!(source.metadata.kind(), "snap");
    }

    #[test]
    fn test_scan_context_default_has_no_source() {
        let context: ScanContext = serde_json::from_str("{}").unwrap();
        assert!(context.source.is_none());
    }
}
