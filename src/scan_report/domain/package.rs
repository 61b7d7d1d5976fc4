use super::Distro;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// NewType wrapper for the stable identity the inventory assigns to a package
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageId(String);

impl PackageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PackageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An upstream (source) package a binary package was built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamPackage {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
}

/// Package record as produced by the inventory collector
///
/// `package_type` and `language` are kept as raw strings: inventories may
/// report types this crate has never heard of, and those must survive into
/// the report untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub id: PackageId,
    pub name: String,
    pub version: String,
    #[serde(rename = "type")]
    pub package_type: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub licenses: Vec<String>,
    #[serde(default)]
    pub cpes: Vec<String>,
    #[serde(default)]
    pub purl: Option<String>,
    #[serde(default)]
    pub upstreams: Vec<UpstreamPackage>,
    #[serde(default)]
    pub distro: Option<Distro>,
}

impl Package {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
        package_type: impl Into<String>,
    ) -> Self {
        Self {
            id: PackageId::new(id),
            name: name.into(),
            version: version.into(),
            package_type: package_type.into(),
            language: String::new(),
            locations: Vec::new(),
            licenses: Vec::new(),
            cpes: Vec::new(),
            purl: None,
            upstreams: Vec::new(),
            distro: None,
        }
    }

    pub fn with_distro(mut self, distro: Distro) -> Self {
        self.distro = Some(distro);
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

/// Indexes packages by identity; on duplicate ids the first package wins
pub fn index_by_id(packages: &[Package]) -> HashMap<&PackageId, &Package> {
    let mut index = HashMap::with_capacity(packages.len());
    for package in packages {
        index.entry(&package.id).or_insert(package);
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_new() {
        let package = Package::new("pkg-1", "openssl", "3.0.2", "deb");
        assert_eq!(package.id.as_str(), "pkg-1");
        assert_eq!(package.name, "openssl");
        assert_eq!(package.package_type, "deb");
        assert!(package.distro.is_none());
    }

    #[test]
    fn test_package_deserialize_minimal() {
        let json = r#"{"id": "abc", "name": "lodash", "version": "4.17.20", "type": "npm"}"#;
        let package: Package = serde_json::from_str(json).unwrap();
        assert_eq!(package.id, PackageId::new("abc"));
        assert_eq!(package.package_type, "npm");
        assert!(package.locations.is_empty());
        assert!(package.purl.is_none());
    }

    #[test]
    fn test_package_deserialize_with_distro() {
        let json = r#"{
            "id": "abc", "name": "musl", "version": "1.2.4", "type": "apk",
            "distro": {"name": "alpine", "version": "3.19.1"}
        }"#;
        let package: Package = serde_json::from_str(json).unwrap();
        assert_eq!(package.distro.unwrap().to_string(), "alpine 3.19.1");
    }

    #[test]
    fn test_index_by_id() {
        let packages = vec![
            Package::new("a", "first", "1.0", "npm"),
            Package::new("b", "second", "1.0", "npm"),
        ];
        let index = index_by_id(&packages);
        assert_eq!(index.len(), 2);
        assert_eq!(index[&PackageId::new("b")].name, "second");
    }

    #[test]
    fn test_index_by_id_first_duplicate_wins() {
        let packages = vec![
            Package::new("a", "first", "1.0", "npm"),
            Package::new("a", "shadowed", "2.0", "npm"),
        ];
        let index = index_by_id(&packages);
        assert_eq!(index.len(), 1);
        assert_eq!(index[&PackageId::new("a")].name, "first");
    }
}
