use super::{PackageId, Vulnerability};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a match was found: the matcher, what it searched by and what it hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDetail {
    #[serde(rename = "type")]
    pub match_type: String,
    pub matcher: String,
    #[serde(default)]
    pub searched_by: serde_json::Value,
    #[serde(default)]
    pub found: serde_json::Value,
    #[serde(default)]
    pub confidence: f64,
}

/// A vulnerability found against one package of the inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub vulnerability: Vulnerability,
    pub package_id: PackageId,
    #[serde(default)]
    pub details: Vec<MatchDetail>,
}

/// Identity of a match; also the canonical sort key of a [`MatchSet`]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MatchFingerprint {
    vulnerability_id: String,
    namespace: String,
    package_id: PackageId,
}

impl Match {
    pub fn new(vulnerability: Vulnerability, package_id: PackageId) -> Self {
        Self {
            vulnerability,
            package_id,
            details: Vec::new(),
        }
    }

    pub fn with_detail(mut self, detail: MatchDetail) -> Self {
        self.details.push(detail);
        self
    }

    pub fn fingerprint(&self) -> MatchFingerprint {
        MatchFingerprint {
            vulnerability_id: self.vulnerability.id().to_string(),
            namespace: self.vulnerability.namespace().to_string(),
            package_id: self.package_id.clone(),
        }
    }

    fn merge(&mut self, other: Match) {
        for detail in other.details {
            if !self.details.contains(&detail) {
                self.details.push(detail);
            }
        }
        for related in other.vulnerability.related {
            if !self.vulnerability.related.contains(&related) {
                self.vulnerability.related.push(related);
            }
        }
    }
}

/// Deduplicated set of matches with a canonical total order
///
/// Adding a match with an existing fingerprint merges its details into the
/// stored match instead of creating a second entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Vec<Match>")]
pub struct MatchSet {
    by_fingerprint: BTreeMap<MatchFingerprint, Match>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, m: Match) {
        let fingerprint = m.fingerprint();
        match self.by_fingerprint.get_mut(&fingerprint) {
            Some(existing) => existing.merge(m),
            None => {
                self.by_fingerprint.insert(fingerprint, m);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.by_fingerprint.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_fingerprint.is_empty()
    }

    /// Matches ordered by vulnerability id, namespace, then package id
    pub fn sorted(&self) -> impl Iterator<Item = &Match> {
        self.by_fingerprint.values()
    }
}

impl From<Vec<Match>> for MatchSet {
    fn from(matches: Vec<Match>) -> Self {
        matches.into_iter().collect()
    }
}

impl FromIterator<Match> for MatchSet {
    fn from_iter<I: IntoIterator<Item = Match>>(iter: I) -> Self {
        let mut set = MatchSet::new();
        for m in iter {
            set.add(m);
        }
        set
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct IgnoreRulePackage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub language: String,
    #[serde(default, rename = "type")]
    pub package_type: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub upstream_name: String,
}

/// An ignore rule as evaluated by the ignore-rule engine; opaque to assembly
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct IgnoreRule {
    #[serde(default)]
    pub vulnerability: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub fix_state: String,
    #[serde(default)]
    pub package: Option<IgnoreRulePackage>,
    #[serde(default)]
    pub vex_status: String,
    #[serde(default)]
    pub vex_justification: String,
    #[serde(default)]
    pub match_type: String,
}

/// A match suppressed from the primary report, kept with the rules that suppressed it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IgnoredMatch {
    #[serde(rename = "match")]
    pub matched: Match,
    #[serde(default)]
    pub applied_ignore_rules: Vec<IgnoreRule>,
}
