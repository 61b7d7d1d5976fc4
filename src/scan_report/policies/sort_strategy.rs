use crate::scan_report::domain::Severity;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Fields a presented match exposes for ordering
pub trait SortableMatch {
    fn vulnerability_id(&self) -> &str;
    fn severity(&self) -> Severity;
    fn risk(&self) -> f64;
    fn package_name(&self) -> &str;
    fn package_version(&self) -> &str;
    fn package_type(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Criterion {
    PackageName,
    PackageVersion,
    PackageType,
    SeverityDesc,
    VulnerabilityId,
    RiskDesc,
}

impl Criterion {
    fn compare<M: SortableMatch>(self, a: &M, b: &M) -> Ordering {
        match self {
            Criterion::PackageName => a.package_name().cmp(b.package_name()),
            Criterion::PackageVersion => a.package_version().cmp(b.package_version()),
            Criterion::PackageType => a.package_type().cmp(b.package_type()),
            Criterion::SeverityDesc => b.severity().cmp(&a.severity()),
            Criterion::VulnerabilityId => a.vulnerability_id().cmp(b.vulnerability_id()),
            Criterion::RiskDesc => b.risk().total_cmp(&a.risk()),
        }
    }
}

/// Ordering applied to the presented matches of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortStrategy {
    Package,
    Severity,
    Vulnerability,
    #[default]
    Risk,
}

impl SortStrategy {
    pub const ALL: [SortStrategy; 4] = [
        SortStrategy::Package,
        SortStrategy::Severity,
        SortStrategy::Vulnerability,
        SortStrategy::Risk,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortStrategy::Package => "package",
            SortStrategy::Severity => "severity",
            SortStrategy::Vulnerability => "vulnerability",
            SortStrategy::Risk => "risk",
        }
    }

    fn criteria(&self) -> &'static [Criterion] {
        use Criterion::*;
        match self {
            SortStrategy::Package => &[
                PackageName,
                PackageVersion,
                PackageType,
                SeverityDesc,
                VulnerabilityId,
            ],
            SortStrategy::Severity => &[
                SeverityDesc,
                VulnerabilityId,
                PackageName,
                PackageVersion,
                PackageType,
            ],
            SortStrategy::Vulnerability => &[
                VulnerabilityId,
                SeverityDesc,
                PackageName,
                PackageVersion,
                PackageType,
            ],
            SortStrategy::Risk => &[
                RiskDesc,
                SeverityDesc,
                VulnerabilityId,
                PackageName,
                PackageVersion,
                PackageType,
            ],
        }
    }

    /// Sorts in place; matches equal under every criterion keep their relative order
    pub fn sort<M: SortableMatch>(&self, matches: &mut [M]) {
        let criteria = self.criteria();
        matches.sort_by(|a, b| {
            criteria
                .iter()
                .map(|criterion| criterion.compare(a, b))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        });
    }
}

impl FromStr for SortStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "package" => Ok(SortStrategy::Package),
            "severity" => Ok(SortStrategy::Severity),
            "vulnerability" => Ok(SortStrategy::Vulnerability),
            "risk" => Ok(SortStrategy::Risk),
            _ => Err(format!(
                "Invalid sort strategy: {}. Expected one of package, severity, vulnerability, risk",
                s
            )),
        }
    }
}

impl fmt::Display for SortStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
