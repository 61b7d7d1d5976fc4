//! Package ecosystem overrides
//!
//! Vulnerability data is indexed by package type, but upstream sources name
//! ecosystems by language ("go"), by package-URL type ("golang") or by legacy
//! names ("dpkg"). This table maps all of them onto the canonical package type.

use crate::scan_report::domain::{Language, PackageType, PackageTypeDescriptor};
use serde::Serialize;
use std::sync::LazyLock;

/// Maps one raw ecosystem name to its canonical package type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSpecifierOverride {
    pub ecosystem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacement_ecosystem: Option<String>,
}

impl PackageSpecifierOverride {
    pub fn new(ecosystem: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            ecosystem: ecosystem.into(),
            replacement_ecosystem: Some(replacement.into()),
        }
    }
}

const LANGUAGE_ECOSYSTEMS: [(Language, PackageType); 17] = [
    (Language::Dart, PackageType::DartPub),
    (Language::Dotnet, PackageType::Dotnet),
    (Language::Elixir, PackageType::Hex),
    (Language::Erlang, PackageType::ErlangOtp),
    (Language::Go, PackageType::GoModule),
    (Language::Haskell, PackageType::Hackage),
    (Language::Java, PackageType::JavaArchive),
    (Language::JavaScript, PackageType::Npm),
    (Language::Lua, PackageType::LuaRocks),
    (Language::OCaml, PackageType::Opam),
    (Language::Php, PackageType::PhpComposer),
    (Language::Python, PackageType::Python),
    (Language::R, PackageType::RPackage),
    (Language::Ruby, PackageType::Gem),
    (Language::Rust, PackageType::RustCrate),
    (Language::Swift, PackageType::Swift),
    (Language::Swipl, PackageType::SwiplPack),
];

const LEGACY_ECOSYSTEMS: [(&str, PackageType); 4] = [
    ("pecl", PackageType::PhpPecl),
    ("kb", PackageType::Kb),
    ("dpkg", PackageType::Deb),
    ("apkg", PackageType::Apk),
];

// Superseded by java-archive and github-action; never generate keys for them
const SUPERSEDED_TYPES: [&str; 2] = ["jenkins-plugin", "github-action-workflow"];

/// Builds the merged ecosystem table over the given package-type registry
///
/// Hand-authored entries come first (language ecosystems, jenkins plugins,
/// legacy names), followed by one entry per registry type whose package-URL
/// type differs from its canonical key.
pub fn known_package_specifier_overrides<T: PackageTypeDescriptor>(
    registry: &[T],
) -> Vec<PackageSpecifierOverride> {
    let mut overrides: Vec<PackageSpecifierOverride> = LANGUAGE_ECOSYSTEMS
        .iter()
        .map(|(language, package_type)| {
            PackageSpecifierOverride::new(language.as_str(), package_type.as_str())
        })
        .collect();

    // jenkins plugins always live in the java ecosystem
    overrides.push(PackageSpecifierOverride::new(
        PackageType::JenkinsPlugin.as_str(),
        PackageType::JavaArchive.as_str(),
    ));

    overrides.extend(
        LEGACY_ECOSYSTEMS
            .iter()
            .map(|(legacy, package_type)| PackageSpecifierOverride::new(*legacy, package_type.as_str())),
    );

    for descriptor in registry {
        let canonical = descriptor.canonical_key();
        if SUPERSEDED_TYPES.contains(&canonical) {
            continue;
        }

        let purl_type = descriptor.package_url_type();
        if purl_type.is_empty() || purl_type == canonical || purl_type.starts_with("generic") {
            continue;
        }

        overrides.push(PackageSpecifierOverride::new(purl_type, canonical));
    }

    overrides
}

/// Process-wide ecosystem table over the built-in registry
pub static KNOWN_PACKAGE_SPECIFIER_OVERRIDES: LazyLock<Vec<PackageSpecifierOverride>> =
    LazyLock::new(|| known_package_specifier_overrides(&PackageType::ALL));

/// Canonical ecosystem for `raw`: the first exact (case-sensitive) match, else `raw` itself
pub fn resolve_ecosystem(overrides: &[PackageSpecifierOverride], raw: &str) -> String {
    overrides
        .iter()
        .find(|o| o.ecosystem == raw)
        .and_then(|o| o.replacement_ecosystem.clone())
        .unwrap_or_else(|| raw.to_string())
}

/// Resolves against the built-in table
pub fn resolve_known_ecosystem(raw: &str) -> String {
    resolve_ecosystem(&KNOWN_PACKAGE_SPECIFIER_OVERRIDES, raw)
}
