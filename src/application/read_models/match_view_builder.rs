//! Builder for constructing MatchView from domain objects

use super::match_view::{
    IgnoreRuleView, IgnoredMatchView, MatchDetailView, MatchView, PackageView,
    VulnerabilityMetadataView, VulnerabilityView,
};
use crate::ports::outbound::VulnerabilityMetadataProvider;
use crate::scan_report::domain::{
    IgnoredMatch, Match, Package, PackageId, VulnerabilityMetadata, VulnerabilityReference,
};
use crate::shared::error::ReportError;
use std::collections::HashMap;

/// Builder for the presented form of matches
///
/// Every lookup either succeeds or aborts the build: a match whose package
/// is missing from the inventory, or whose metadata cannot be fetched,
/// never yields a partial view.
pub struct MatchViewBuilder;

impl MatchViewBuilder {
    /// Builds the view of one match
    ///
    /// # Arguments
    /// * `m` - The raw match
    /// * `packages` - Inventory index from [`index_by_id`](crate::scan_report::domain::index_by_id)
    /// * `provider` - Vulnerability metadata lookup
    ///
    /// # Errors
    /// - `ReportError::PackageNotFound` if the match's package is not in `packages`
    /// - `ReportError::MetadataRetrieval` if the provider fails for the
    ///   vulnerability or any related vulnerability
    pub fn build<P>(
        m: &Match,
        packages: &HashMap<&PackageId, &Package>,
        provider: &P,
    ) -> Result<MatchView, ReportError>
    where
        P: VulnerabilityMetadataProvider + ?Sized,
    {
        let package = packages
            .get(&m.package_id)
            .ok_or_else(|| ReportError::PackageNotFound {
                package_id: m.package_id.to_string(),
                vulnerability_id: m.vulnerability.id().to_string(),
            })?;

        let mut related_vulnerabilities = Vec::with_capacity(m.vulnerability.related.len());
        for reference in &m.vulnerability.related {
            if let Some(metadata) = Self::fetch_metadata(reference, provider)? {
                related_vulnerabilities.push(VulnerabilityMetadataView::from(metadata));
            }
        }

        let (metadata, risk) = match Self::fetch_metadata(&m.vulnerability.reference, provider)? {
            Some(metadata) => {
                let risk = metadata.risk;
                (VulnerabilityMetadataView::from(metadata), risk)
            }
            None => (VulnerabilityMetadataView::bare(&m.vulnerability.reference), 0.0),
        };

        Ok(MatchView {
            vulnerability: VulnerabilityView {
                metadata,
                fix: m.vulnerability.fix.clone(),
                risk,
            },
            related_vulnerabilities,
            match_details: m.details.iter().map(MatchDetailView::from).collect(),
            artifact: PackageView::from(*package),
        })
    }

    /// Builds the view of an ignored match, carrying its applied rules
    pub fn build_ignored<P>(
        ignored: &IgnoredMatch,
        packages: &HashMap<&PackageId, &Package>,
        provider: &P,
    ) -> Result<IgnoredMatchView, ReportError>
    where
        P: VulnerabilityMetadataProvider + ?Sized,
    {
        Ok(IgnoredMatchView {
            matched: Self::build(&ignored.matched, packages, provider)?,
            applied_ignore_rules: ignored
                .applied_ignore_rules
                .iter()
                .map(IgnoreRuleView::from)
                .collect(),
        })
    }

    fn fetch_metadata<P>(
        reference: &VulnerabilityReference,
        provider: &P,
    ) -> Result<Option<VulnerabilityMetadata>, ReportError>
    where
        P: VulnerabilityMetadataProvider + ?Sized,
    {
        provider
            .vulnerability_metadata(reference)
            .map_err(|e| ReportError::MetadataRetrieval {
                vulnerability_id: reference.id.clone(),
                namespace: reference.namespace.clone(),
                details: format!("{:#}", e),
            })
    }
}
