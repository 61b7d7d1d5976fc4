use crate::ports::outbound::VulnerabilityMetadataProvider;
use crate::scan_report::domain::{VulnerabilityMetadata, VulnerabilityReference};
use crate::shared::Result;
use std::collections::HashMap;

/// InMemoryMetadataStore adapter serving metadata from a loaded export
///
/// Records are keyed by `(id, namespace)`. When an export carries the same
/// key twice the first record is kept.
#[derive(Debug, Default)]
pub struct InMemoryMetadataStore {
    records: HashMap<VulnerabilityReference, VulnerabilityMetadata>,
}

impl InMemoryMetadataStore {
    pub fn new(records: Vec<VulnerabilityMetadata>) -> Self {
        let mut by_reference = HashMap::with_capacity(records.len());
        for record in records {
            by_reference.entry(record.reference()).or_insert(record);
        }
        Self {
            records: by_reference,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl VulnerabilityMetadataProvider for InMemoryMetadataStore {
    fn vulnerability_metadata(
        &self,
        reference: &VulnerabilityReference,
    ) -> Result<Option<VulnerabilityMetadata>> {
        Ok(self.records.get(reference).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan_report::domain::Severity;

    #[test]
    fn test_lookup_by_id_and_namespace() {
        let store = InMemoryMetadataStore::new(vec![
            VulnerabilityMetadata::new("CVE-2024-1", "nvd:cpe", Severity::High),
            VulnerabilityMetadata::new("CVE-2024-1", "debian:distro:debian:12", Severity::Low),
        ]);

        let nvd = store
            .vulnerability_metadata(&VulnerabilityReference::new("CVE-2024-1", "nvd:cpe"))
            .unwrap()
            .unwrap();
        assert_eq!(nvd.severity, Severity::High);

        let missing = store
            .vulnerability_metadata(&VulnerabilityReference::new("CVE-2024-1", "alpine:distro:alpine:3.19"))
            .unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_first_duplicate_wins() {
        let store = InMemoryMetadataStore::new(vec![
            VulnerabilityMetadata::new("CVE-2024-1", "nvd:cpe", Severity::Critical),
            VulnerabilityMetadata::new("CVE-2024-1", "nvd:cpe", Severity::Low),
        ]);
        assert_eq!(store.len(), 1);
        let record = store
            .vulnerability_metadata(&VulnerabilityReference::new("CVE-2024-1", "nvd:cpe"))
            .unwrap()
            .unwrap();
        assert_eq!(record.severity, Severity::Critical);
    }

    #[test]
    fn test_empty_store() {
        let store = InMemoryMetadataStore::default();
        assert!(store.is_empty());
    }
}
