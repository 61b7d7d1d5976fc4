use crate::scan_report::domain::{VulnerabilityMetadata, VulnerabilityReference};
use crate::shared::Result;

/// VulnerabilityMetadataProvider port for looking up vulnerability records
///
/// This port abstracts the vulnerability database. The report only ever
/// reads from it, one reference at a time.
pub trait VulnerabilityMetadataProvider {
    /// Fetches the metadata stored for a vulnerability reference
    ///
    /// # Arguments
    /// * `reference` - Vulnerability id and the namespace it was matched in
    ///
    /// # Returns
    /// `Some(metadata)` when the database knows the record, `None` otherwise
    ///
    /// # Errors
    /// Returns an error if the underlying store cannot be queried
    fn vulnerability_metadata(
        &self,
        reference: &VulnerabilityReference,
    ) -> Result<Option<VulnerabilityMetadata>>;
}

impl<T: VulnerabilityMetadataProvider + ?Sized> VulnerabilityMetadataProvider for &T {
    fn vulnerability_metadata(
        &self,
        reference: &VulnerabilityReference,
    ) -> Result<Option<VulnerabilityMetadata>> {
        (**self).vulnerability_metadata(reference)
    }
}
