use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity levels, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Severity {
    #[default]
    Unknown,
    Negligible,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Unknown => "Unknown",
            Severity::Negligible => "Negligible",
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unknown" | "" => Ok(Severity::Unknown),
            "negligible" => Ok(Severity::Negligible),
            "low" => Ok(Severity::Low),
            "medium" | "moderate" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            _ => Err(format!(
                "Invalid severity: {}. Expected one of negligible, low, medium, high, critical",
                s
            )),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Severity travels as its display string; unrecognized values degrade to Unknown
impl Serialize for Severity {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or_default())
    }
}

/// Identifies one vulnerability record within one database namespace
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VulnerabilityReference {
    pub id: String,
    #[serde(default)]
    pub namespace: String,
}

impl VulnerabilityReference {
    pub fn new(id: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            namespace: namespace.into(),
        }
    }
}

impl fmt::Display for VulnerabilityReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.namespace)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FixState {
    Fixed,
    NotFixed,
    WontFix,
    #[default]
    Unknown,
}

impl FixState {
    pub fn as_str(&self) -> &'static str {
        match self {
            FixState::Fixed => "fixed",
            FixState::NotFixed => "not-fixed",
            FixState::WontFix => "wont-fix",
            FixState::Unknown => "unknown",
        }
    }
}

impl Serialize for FixState {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FixState {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "fixed" => FixState::Fixed,
            "not-fixed" => FixState::NotFixed,
            "wont-fix" => FixState::WontFix,
            _ => FixState::Unknown,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Fix {
    #[serde(default)]
    pub versions: Vec<String>,
    #[serde(default)]
    pub state: FixState,
}

/// Vulnerability as carried on a match: the reference plus what the matcher knew
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vulnerability {
    #[serde(flatten)]
    pub reference: VulnerabilityReference,
    #[serde(default)]
    pub fix: Fix,
    #[serde(default, rename = "relatedVulnerabilities")]
    pub related: Vec<VulnerabilityReference>,
}

impl Vulnerability {
    pub fn new(id: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            reference: VulnerabilityReference::new(id, namespace),
            fix: Fix::default(),
            related: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.reference.id
    }

    pub fn namespace(&self) -> &str {
        &self.reference.namespace
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvssMetrics {
    pub base_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exploitability_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cvss {
    #[serde(default)]
    pub source: String,
    #[serde(default, rename = "type")]
    pub cvss_type: String,
    pub version: String,
    pub vector: String,
    pub metrics: CvssMetrics,
}

/// Metadata the database holds for a vulnerability record
///
/// `risk` is a provider-computed priority score; higher means more urgent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VulnerabilityMetadata {
    pub id: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub data_source: String,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cvss: Vec<Cvss>,
    #[serde(default)]
    pub risk: f64,
}

impl VulnerabilityMetadata {
    pub fn new(id: impl Into<String>, namespace: impl Into<String>, severity: Severity) -> Self {
        Self {
            id: id.into(),
            namespace: namespace.into(),
            data_source: String::new(),
            severity,
            urls: Vec::new(),
            description: String::new(),
            cvss: Vec::new(),
            risk: 0.0,
        }
    }

    pub fn reference(&self) -> VulnerabilityReference {
        VulnerabilityReference::new(self.id.clone(), self.namespace.clone())
    }
}
