pub mod distro;
pub mod matches;
pub mod package;
pub mod package_type;
pub mod source;
pub mod vulnerability;

pub use distro::Distro;
pub use matches::{IgnoreRule, IgnoreRulePackage, IgnoredMatch, Match, MatchDetail, MatchSet};
pub use package::{index_by_id, Package, PackageId, UpstreamPackage};
pub use package_type::{Language, PackageType, PackageTypeDescriptor};
pub use source::{ImageMetadata, ScanContext, SourceDescription, SourceMetadata};
pub use vulnerability::{
    Cvss, CvssMetrics, Fix, FixState, Severity, Vulnerability, VulnerabilityMetadata,
    VulnerabilityReference,
};
