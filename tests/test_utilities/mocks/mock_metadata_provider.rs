use std::collections::HashSet;
use vulnscope::prelude::*;

/// Mock VulnerabilityMetadataProvider for testing
///
/// Serves records from memory and can be told to fail for specific ids.
#[derive(Default)]
pub struct MockMetadataProvider {
    records: Vec<VulnerabilityMetadata>,
    failing_ids: HashSet<String>,
    pub lookups: std::sync::Arc<std::sync::Mutex<Vec<String>>>,
}

impl MockMetadataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(mut self, id: &str, namespace: &str, severity: Severity, risk: f64) -> Self {
        let mut record = VulnerabilityMetadata::new(id, namespace, severity);
        record.risk = risk;
        self.records.push(record);
        self
    }

    pub fn with_failure(mut self, id: &str) -> Self {
        self.failing_ids.insert(id.to_string());
        self
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.lock().unwrap().len()
    }
}

impl VulnerabilityMetadataProvider for MockMetadataProvider {
    fn vulnerability_metadata(
        &self,
        reference: &VulnerabilityReference,
    ) -> Result<Option<VulnerabilityMetadata>> {
        self.lookups.lock().unwrap().push(reference.id.clone());

        if self.failing_ids.contains(&reference.id) {
            anyhow::bail!("Simulated store failure for {}", reference.id);
        }

        Ok(self
            .records
            .iter()
            .find(|r| r.id == reference.id && r.namespace == reference.namespace)
            .cloned())
    }
}
