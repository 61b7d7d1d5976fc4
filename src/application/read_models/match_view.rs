//! Presented form of a match
//!
//! A match view denormalizes a raw match: the vulnerability is expanded with
//! its database metadata, related vulnerabilities are resolved and the
//! matched package is embedded as the `artifact`.

use crate::scan_report::domain::{
    Cvss, Fix, IgnoreRule, IgnoreRulePackage, MatchDetail, Package, Severity, UpstreamPackage,
    VulnerabilityMetadata, VulnerabilityReference,
};
use crate::scan_report::policies::SortableMatch;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VulnerabilityMetadataView {
    pub id: String,
    pub data_source: String,
    pub namespace: String,
    pub severity: Severity,
    pub urls: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub cvss: Vec<Cvss>,
}

impl VulnerabilityMetadataView {
    /// View of a vulnerability the database has no record for
    pub fn bare(reference: &VulnerabilityReference) -> Self {
        Self {
            id: reference.id.clone(),
            data_source: String::new(),
            namespace: reference.namespace.clone(),
            severity: Severity::Unknown,
            urls: Vec::new(),
            description: String::new(),
            cvss: Vec::new(),
        }
    }
}

impl From<VulnerabilityMetadata> for VulnerabilityMetadataView {
    fn from(metadata: VulnerabilityMetadata) -> Self {
        Self {
            id: metadata.id,
            data_source: metadata.data_source,
            namespace: metadata.namespace,
            severity: metadata.severity,
            urls: metadata.urls,
            description: metadata.description,
            cvss: metadata.cvss,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VulnerabilityView {
    #[serde(flatten)]
    pub metadata: VulnerabilityMetadataView,
    pub fix: Fix,
    pub risk: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDetailView {
    #[serde(rename = "type")]
    pub match_type: String,
    pub matcher: String,
    pub searched_by: serde_json::Value,
    pub found: serde_json::Value,
}

impl From<&MatchDetail> for MatchDetailView {
    fn from(detail: &MatchDetail) -> Self {
        Self {
            match_type: detail.match_type.clone(),
            matcher: detail.matcher.clone(),
            searched_by: detail.searched_by.clone(),
            found: detail.found.clone(),
        }
    }
}

/// The matched package as presented in the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageView {
    pub id: String,
    pub name: String,
    pub version: String,
    #[serde(rename = "type")]
    pub package_type: String,
    pub locations: Vec<String>,
    pub language: String,
    pub licenses: Vec<String>,
    pub cpes: Vec<String>,
    pub purl: String,
    pub upstreams: Vec<UpstreamPackage>,
}

impl From<&Package> for PackageView {
    fn from(package: &Package) -> Self {
        Self {
            id: package.id.to_string(),
            name: package.name.clone(),
            version: package.version.clone(),
            package_type: package.package_type.clone(),
            locations: package.locations.clone(),
            language: package.language.clone(),
            licenses: package.licenses.clone(),
            cpes: package.cpes.clone(),
            purl: package.purl.clone().unwrap_or_default(),
            upstreams: package.upstreams.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchView {
    pub vulnerability: VulnerabilityView,
    pub related_vulnerabilities: Vec<VulnerabilityMetadataView>,
    pub match_details: Vec<MatchDetailView>,
    pub artifact: PackageView,
}

impl SortableMatch for MatchView {
    fn vulnerability_id(&self) -> &str {
        &self.vulnerability.metadata.id
    }

    fn severity(&self) -> Severity {
        self.vulnerability.metadata.severity
    }

    fn risk(&self) -> f64 {
        self.vulnerability.risk
    }

    fn package_name(&self) -> &str {
        &self.artifact.name
    }

    fn package_version(&self) -> &str {
        &self.artifact.version
    }

    fn package_type(&self) -> &str {
        &self.artifact.package_type
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct IgnoreRulePackageView {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub language: String,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub package_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub location: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub upstream_name: String,
}

impl From<&IgnoreRulePackage> for IgnoreRulePackageView {
    fn from(package: &IgnoreRulePackage) -> Self {
        Self {
            name: package.name.clone(),
            version: package.version.clone(),
            language: package.language.clone(),
            package_type: package.package_type.clone(),
            location: package.location.clone(),
            upstream_name: package.upstream_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct IgnoreRuleView {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub vulnerability: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub reason: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fix_state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<IgnoreRulePackageView>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub vex_status: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub vex_justification: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub match_type: String,
}

impl From<&IgnoreRule> for IgnoreRuleView {
    fn from(rule: &IgnoreRule) -> Self {
        Self {
            vulnerability: rule.vulnerability.clone(),
            reason: rule.reason.clone(),
            namespace: rule.namespace.clone(),
            fix_state: rule.fix_state.clone(),
            package: rule.package.as_ref().map(IgnoreRulePackageView::from),
            vex_status: rule.vex_status.clone(),
            vex_justification: rule.vex_justification.clone(),
            match_type: rule.match_type.clone(),
        }
    }
}

/// A suppressed match, presented like any other plus the rules that suppressed it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IgnoredMatchView {
    #[serde(flatten)]
    pub matched: MatchView,
    pub applied_ignore_rules: Vec<IgnoreRuleView>,
}
