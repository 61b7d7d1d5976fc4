use crate::application::read_models::Document;
use crate::ports::outbound::DocumentFormatter;
use crate::shared::Result;

/// JsonFormatter adapter rendering the document as pretty-printed JSON
///
/// Serialization goes straight through the read model, so the field names
/// and null/absent semantics of [`Document`] are exactly what is emitted.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentFormatter for JsonFormatter {
    fn format(&self, document: &Document) -> Result<String> {
        let mut json = serde_json::to_string_pretty(document)
            .map_err(|e| anyhow::anyhow!("Failed to serialize report to JSON: {}", e))?;
        json.push('\n');
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::read_models::{DescriptorView, DistributionView};

    #[test]
    fn test_format_empty_document() {
        let document = Document {
            matches: Vec::new(),
            ignored_matches: None,
            source: None,
            distro: DistributionView::default(),
            descriptor: DescriptorView {
                name: "vulnscope".to_string(),
                version: "0.4.0".to_string(),
                configuration: serde_json::Value::Null,
                db: serde_json::Value::Null,
                timestamp: "2024-05-01T12:00:00+00:00".to_string(),
            },
        };

        let output = JsonFormatter::new().format(&document).unwrap();
        assert!(output.contains("\"matches\": []"));
        assert!(output.contains("\"source\": null"));
        assert!(!output.contains("ignoredMatches"));
        assert!(output.ends_with("}\n"));

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["descriptor"]["name"], "vulnscope");
    }
}
