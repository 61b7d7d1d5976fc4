//! Database schema versions and the constraints overrides are gated on
//!
//! Schema versions are short dotted numbers ("6", "6.0", "6.0.3"); missing
//! components are treated as zero and comparison is delegated to `semver`.
//! Constraints are comma-separated clauses that must all hold, e.g.
//! `">= 6.0.0, < 6.0.3"`.

use crate::shared::error::ReportError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SchemaVersion(semver::Version);

impl SchemaVersion {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(semver::Version::new(major, minor, patch))
    }
}

impl FromStr for SchemaVersion {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ReportError::Validation {
            message: format!("invalid schema version '{}': {}", s, reason),
        };

        let trimmed = s.trim();
        let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
        if trimmed.is_empty() {
            return Err(invalid("version is empty"));
        }

        let mut parts = [0u64; 3];
        let mut count = 0;
        for component in trimmed.split('.') {
            if count == parts.len() {
                return Err(invalid("expected at most three components"));
            }
            parts[count] = component
                .parse()
                .map_err(|_| invalid("components must be non-negative integers"))?;
            count += 1;
        }

        Ok(Self::new(parts[0], parts[1], parts[2]))
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl Operator {
    // Two-character operators first so "<=" is not read as "<"
    const PREFIXES: [(&'static str, Operator); 7] = [
        ("<=", Operator::Le),
        (">=", Operator::Ge),
        ("==", Operator::Eq),
        ("!=", Operator::Ne),
        ("<", Operator::Lt),
        (">", Operator::Gt),
        ("=", Operator::Eq),
    ];

    fn holds(self, actual: &SchemaVersion, bound: &SchemaVersion) -> bool {
        match self {
            Operator::Lt => actual < bound,
            Operator::Le => actual <= bound,
            Operator::Gt => actual > bound,
            Operator::Ge => actual >= bound,
            Operator::Eq => actual == bound,
            Operator::Ne => actual != bound,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Clause {
    operator: Operator,
    version: SchemaVersion,
}

impl FromStr for Clause {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (operator, rest) = Operator::PREFIXES
            .iter()
            .find_map(|(prefix, op)| s.strip_prefix(*prefix).map(|rest| (*op, rest)))
            .unwrap_or((Operator::Eq, s));

        Ok(Self {
            operator,
            version: rest.parse()?,
        })
    }
}

/// Version-range constraint over client database schema versions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaConstraint {
    raw: String,
    clauses: Vec<Clause>,
}

impl SchemaConstraint {
    pub fn parse(raw: &str) -> Result<Self, ReportError> {
        if raw.trim().is_empty() {
            return Err(ReportError::Validation {
                message: "schema constraint must not be empty".to_string(),
            });
        }

        let clauses = raw
            .split(',')
            .map(str::parse::<Clause>)
            .collect::<Result<Vec<Clause>, _>>()?;

        Ok(Self {
            raw: raw.trim().to_string(),
            clauses,
        })
    }

    /// Returns true when every clause holds for `version`
    pub fn satisfied_by(&self, version: &SchemaVersion) -> bool {
        self.clauses
            .iter()
            .all(|clause| clause.operator.holds(version, &clause.version))
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for SchemaConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl Serialize for SchemaConstraint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(s: &str) -> SchemaVersion {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_pads_missing_components() {
        assert_eq!(version("6"), SchemaVersion::new(6, 0, 0));
        assert_eq!(version("6.1"), SchemaVersion::new(6, 1, 0));
        assert_eq!(version("v6.0.3"), SchemaVersion::new(6, 0, 3));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<SchemaVersion>().is_err());
        assert!("6.x".parse::<SchemaVersion>().is_err());
        assert!("6.0.3.1".parse::<SchemaVersion>().is_err());
        assert!("-1".parse::<SchemaVersion>().is_err());
    }

    #[test]
    fn test_version_ordering_is_numeric() {
        assert!(version("6.0.10") > version("6.0.3"));
        assert!(version("10.0") > version("9.9.9"));
    }

    #[test]
    fn test_less_than_constraint() {
        let constraint = SchemaConstraint::parse("< 6.0.3").unwrap();
        assert!(constraint.satisfied_by(&version("6.0.2")));
        assert!(constraint.satisfied_by(&version("5.9")));
        assert!(!constraint.satisfied_by(&version("6.0.3")));
        assert!(!constraint.satisfied_by(&version("6.0.5")));
    }

    #[test]
    fn test_compound_constraint() {
        let constraint = SchemaConstraint::parse(">= 6, < 6.0.3").unwrap();
        assert!(constraint.satisfied_by(&version("6.0.0")));
        assert!(constraint.satisfied_by(&version("6.0.2")));
        assert!(!constraint.satisfied_by(&version("5.1.0")));
        assert!(!constraint.satisfied_by(&version("6.1")));
    }

    #[test]
    fn test_operators() {
        let v = version("6.0.3");
        assert!(SchemaConstraint::parse("<= 6.0.3").unwrap().satisfied_by(&v));
        assert!(SchemaConstraint::parse(">6.0.2").unwrap().satisfied_by(&v));
        assert!(SchemaConstraint::parse("= 6.0.3").unwrap().satisfied_by(&v));
        assert!(SchemaConstraint::parse("== 6.0.3").unwrap().satisfied_by(&v));
        assert!(SchemaConstraint::parse("6.0.3").unwrap().satisfied_by(&v));
        assert!(!SchemaConstraint::parse("!= 6.0.3").unwrap().satisfied_by(&v));
    }

    #[test]
    fn test_invalid_constraint() {
        assert!(SchemaConstraint::parse("").is_err());
        assert!(SchemaConstraint::parse("< abc").is_err());
        assert!(SchemaConstraint::parse("<").is_err());
        assert!(SchemaConstraint::parse("< 6.0.3,").is_err());
    }

    #[test]
    fn test_constraint_serializes_as_source_text() {
        let constraint = SchemaConstraint::parse("< 6.0.3").unwrap();
        assert_eq!(serde_json::to_string(&constraint).unwrap(), r#""< 6.0.3""#);
        assert_eq!(constraint.to_string(), "< 6.0.3");
    }
}
