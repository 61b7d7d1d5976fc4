//! Operating-system specifier overrides
//!
//! Inventory tools report distributions under many names ("rocky",
//! "rockylinux", "almalinux", ...) and with versions the vulnerability
//! database does not index. The table below rewrites those raw specifiers
//! into the keys the database uses. Rules are evaluated in order and the
//! first applicable one wins; fields a rule does not set are left alone.

use super::schema_version::{SchemaConstraint, SchemaVersion};
use crate::shared::error::ReportError;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::sync::LazyLock;

/// Regular expression a raw version must match for an override to apply
#[derive(Debug, Clone)]
pub struct VersionPattern(Regex);

impl VersionPattern {
    pub fn new(pattern: &str) -> Result<Self, ReportError> {
        Regex::new(pattern)
            .map(Self)
            .map_err(|e| ReportError::Validation {
                message: format!("invalid version pattern '{}': {}", pattern, e),
            })
    }

    pub fn is_match(&self, version: &str) -> bool {
        self.0.is_match(version)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Serialize for VersionPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One rewrite rule for an OS alias
///
/// `replacement_minor_version: Some("")` drops the minor version, which is
/// different from `None` (keep whatever the inventory reported).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OsSpecifierOverride {
    pub alias: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_pattern: Option<VersionPattern>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacement_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacement_minor_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacement_label_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codename: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub rolling: bool,
    #[serde(rename = "applicableClientDBSchemas", skip_serializing_if = "Option::is_none")]
    pub applicable_client_db_schemas: Option<SchemaConstraint>,
}

impl OsSpecifierOverride {
    pub fn new(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            version_pattern: None,
            replacement_name: None,
            replacement_minor_version: None,
            replacement_label_version: None,
            codename: None,
            rolling: false,
            applicable_client_db_schemas: None,
        }
    }

    pub fn version_pattern(mut self, pattern: &str) -> Result<Self, ReportError> {
        self.version_pattern = Some(VersionPattern::new(pattern)?);
        Ok(self)
    }

    pub fn replacement_name(mut self, name: impl Into<String>) -> Self {
        self.replacement_name = Some(name.into());
        self
    }

    pub fn replacement_minor_version(mut self, minor: impl Into<String>) -> Self {
        self.replacement_minor_version = Some(minor.into());
        self
    }

    pub fn replacement_label_version(mut self, label: impl Into<String>) -> Self {
        self.replacement_label_version = Some(label.into());
        self
    }

    pub fn codename(mut self, codename: impl Into<String>) -> Self {
        self.codename = Some(codename.into());
        self
    }

    pub fn rolling(mut self) -> Self {
        self.rolling = true;
        self
    }

    pub fn applicable_client_db_schemas(mut self, constraint: &str) -> Result<Self, ReportError> {
        self.applicable_client_db_schemas = Some(SchemaConstraint::parse(constraint)?);
        Ok(self)
    }

    /// Whether this rule applies to the raw specifier for the given client schema
    pub fn applies_to(&self, alias: &str, version: &str, schema: &SchemaVersion) -> bool {
        if self.alias != alias {
            return false;
        }
        if let Some(pattern) = &self.version_pattern {
            if !pattern.is_match(version) {
                return false;
            }
        }
        if let Some(constraint) = &self.applicable_client_db_schemas {
            if !constraint.satisfied_by(schema) {
                return false;
            }
        }
        true
    }
}

/// Builds the table of known OS overrides
///
/// Order matters: the first applicable rule wins.
pub fn known_os_specifier_overrides() -> Result<Vec<OsSpecifierOverride>, ReportError> {
    // Before schema 6.0.3 clients cannot see the OS channel column and would
    // pick up extended-support rows keyed by major.minor; keep them on major only.
    const PRE_CHANNEL_SCHEMAS: &str = "< 6.0.3";
    const MAJOR_MINOR: &str = r"^\d+\.\d+";

    Ok(vec![
        // redhat clones or otherwise shared vulnerability data
        OsSpecifierOverride::new("centos").replacement_name("rhel"),
        OsSpecifierOverride::new("rocky").replacement_name("rhel"),
        OsSpecifierOverride::new("rockylinux").replacement_name("rhel"),
        OsSpecifierOverride::new("alma").replacement_name("rhel"),
        OsSpecifierOverride::new("almalinux").replacement_name("rhel"),
        OsSpecifierOverride::new("gentoo").replacement_name("rhel"),
        OsSpecifierOverride::new("rhel")
            .version_pattern(MAJOR_MINOR)?
            .replacement_minor_version("")
            .applicable_client_db_schemas(PRE_CHANNEL_SCHEMAS)?,
        OsSpecifierOverride::new("redhat")
            .version_pattern(MAJOR_MINOR)?
            .replacement_minor_version("")
            .replacement_name("rhel")
            .applicable_client_db_schemas(PRE_CHANNEL_SCHEMAS)?,
        // alpine family
        OsSpecifierOverride::new("alpine")
            .version_pattern(r".*_alpha.*")?
            .replacement_label_version("edge")
            .rolling(),
        OsSpecifierOverride::new("wolfi").rolling(),
        OsSpecifierOverride::new("chainguard").rolling(),
        // others
        OsSpecifierOverride::new("arch").rolling(),
        OsSpecifierOverride::new("minimos").rolling(),
        OsSpecifierOverride::new("archlinux")
            .replacement_name("arch")
            .rolling(),
        OsSpecifierOverride::new("oracle").replacement_name("ol"),
        OsSpecifierOverride::new("oraclelinux").replacement_name("ol"),
        OsSpecifierOverride::new("amazon").replacement_name("amzn"),
        OsSpecifierOverride::new("amazonlinux").replacement_name("amzn"),
        OsSpecifierOverride::new("echo").rolling(),
        // TODO: swap the trixie codename for sid once trixie is released as stable
        OsSpecifierOverride::new("debian")
            .codename("trixie")
            .rolling()
            .replacement_label_version("unstable"),
    ])
}

/// Process-wide OS override table; immutable after first use
pub static KNOWN_OS_SPECIFIER_OVERRIDES: LazyLock<Vec<OsSpecifierOverride>> =
    LazyLock::new(|| known_os_specifier_overrides().expect("built-in OS overrides are valid"));

/// An OS specifier as used for database lookups
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OsSpecifier {
    pub name: String,
    pub major_version: String,
    pub minor_version: String,
    pub label_version: String,
    pub codename: String,
}

impl OsSpecifier {
    /// Splits a raw release into its specifier parts
    ///
    /// Purely numeric versions ("8", "8.4", "3.19.1") fill major and minor;
    /// anything else ("edge", "3.20_alpha20240329") is kept as a label.
    pub fn from_release(name: &str, version: &str) -> Self {
        let mut specifier = Self {
            name: name.to_string(),
            ..Self::default()
        };

        let version = version.trim();
        let is_numeric = !version.is_empty()
            && version
                .split('.')
                .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()));

        if is_numeric {
            let mut parts = version.split('.');
            specifier.major_version = parts.next().unwrap_or_default().to_string();
            specifier.minor_version = parts.next().unwrap_or_default().to_string();
        } else {
            specifier.label_version = version.to_string();
        }
        specifier
    }

    pub fn with_codename(mut self, codename: impl Into<String>) -> Self {
        self.codename = codename.into();
        self
    }
}

/// Result of applying the override table to a raw specifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedOsSpecifier {
    #[serde(flatten)]
    pub specifier: OsSpecifier,
    /// Continuously released: version-based disambiguation should be skipped
    pub rolling: bool,
    /// Alias of the rule that applied, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_override: Option<String>,
}

/// Applies the first applicable override to `specifier`
///
/// The version pattern is checked against `raw_version`, the version string
/// exactly as the inventory reported it. Never fails: without an applicable
/// rule the specifier passes through unchanged.
pub fn resolve_os_specifier(
    overrides: &[OsSpecifierOverride],
    specifier: OsSpecifier,
    raw_version: &str,
    schema: &SchemaVersion,
) -> ResolvedOsSpecifier {
    let Some(rule) = overrides
        .iter()
        .find(|rule| rule.applies_to(&specifier.name, raw_version, schema))
    else {
        return ResolvedOsSpecifier {
            specifier,
            rolling: false,
            applied_override: None,
        };
    };

    let mut resolved = specifier;
    if let Some(name) = &rule.replacement_name {
        resolved.name = name.clone();
    }
    if let Some(minor) = &rule.replacement_minor_version {
        resolved.minor_version = minor.clone();
    }
    if let Some(label) = &rule.replacement_label_version {
        resolved.label_version = label.clone();
    }
    if let Some(codename) = &rule.codename {
        resolved.codename = codename.clone();
    }

    ResolvedOsSpecifier {
        specifier: resolved,
        rolling: rule.rolling,
        applied_override: Some(rule.alias.clone()),
    }
}

/// Resolves a raw `(name, version)` release against the known table
pub fn resolve_release(name: &str, version: &str, schema: &SchemaVersion) -> ResolvedOsSpecifier {
    resolve_os_specifier(
        &KNOWN_OS_SPECIFIER_OVERRIDES,
        OsSpecifier::from_release(name, version),
        version,
        schema,
    )
}
