use serde::{Deserialize, Serialize};
use std::fmt;

/// Distro value object describing the operating system a package was installed by
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Distro {
    name: String,
    #[serde(default)]
    version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    codename: String,
    #[serde(default)]
    id_like: Vec<String>,
}

impl Distro {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            codename: String::new(),
            id_like: Vec::new(),
        }
    }

    pub fn with_codename(mut self, codename: impl Into<String>) -> Self {
        self.codename = codename.into();
        self
    }

    pub fn with_id_like(mut self, id_like: Vec<String>) -> Self {
        self.id_like = id_like;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn codename(&self) -> &str {
        &self.codename
    }

    pub fn id_like(&self) -> &[String] {
        &self.id_like
    }
}

/// Canonical string form, used to compare distros for equality across packages
impl fmt::Display for Distro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let version = if !self.version.is_empty() {
            self.version.as_str()
        } else if !self.codename.is_empty() {
            self.codename.as_str()
        } else {
            "(version unknown)"
        };
        write!(f, "{} {}", self.name, version)
    }
}
