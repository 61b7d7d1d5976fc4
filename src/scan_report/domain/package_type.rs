//! Package-type registry
//!
//! The closed set of package types an inventory can report, each with the
//! canonical key the vulnerability database indexes and the package-URL type
//! the same ecosystem uses externally. The override tables only see this
//! registry through [`PackageTypeDescriptor`], so tests can inject their own.

use std::fmt;

/// Read-only view of a package type used to derive ecosystem overrides
pub trait PackageTypeDescriptor {
    /// Canonical key used by the vulnerability database (e.g. "go-module")
    fn canonical_key(&self) -> &str;

    /// External package-URL type (e.g. "golang"); empty when there is none
    fn package_url_type(&self) -> &str;
}

/// Known package types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageType {
    Alpm,
    Apk,
    Binary,
    Bitnami,
    Cocoapods,
    Conan,
    DartPub,
    Deb,
    Dotnet,
    ErlangOtp,
    Gem,
    GithubAction,
    GithubActionWorkflow,
    GoModule,
    GraalVmNativeImage,
    Hackage,
    Hex,
    Homebrew,
    JavaArchive,
    JenkinsPlugin,
    Kb,
    LinuxKernel,
    LinuxKernelModule,
    LuaRocks,
    Nix,
    Npm,
    Opam,
    PhpComposer,
    PhpPear,
    PhpPecl,
    Portage,
    Python,
    RPackage,
    Rpm,
    RustCrate,
    Swift,
    SwiplPack,
    Terraform,
    WordpressPlugin,
}

impl PackageType {
    /// The fixed global registry, in declaration order
    pub const ALL: [PackageType; 39] = [
        PackageType::Alpm,
        PackageType::Apk,
        PackageType::Binary,
        PackageType::Bitnami,
        PackageType::Cocoapods,
        PackageType::Conan,
        PackageType::DartPub,
        PackageType::Deb,
        PackageType::Dotnet,
        PackageType::ErlangOtp,
        PackageType::Gem,
        PackageType::GithubAction,
        PackageType::GithubActionWorkflow,
        PackageType::GoModule,
        PackageType::GraalVmNativeImage,
        PackageType::Hackage,
        PackageType::Hex,
        PackageType::Homebrew,
        PackageType::JavaArchive,
        PackageType::JenkinsPlugin,
        PackageType::Kb,
        PackageType::LinuxKernel,
        PackageType::LinuxKernelModule,
        PackageType::LuaRocks,
        PackageType::Nix,
        PackageType::Npm,
        PackageType::Opam,
        PackageType::PhpComposer,
        PackageType::PhpPear,
        PackageType::PhpPecl,
        PackageType::Portage,
        PackageType::Python,
        PackageType::RPackage,
        PackageType::Rpm,
        PackageType::RustCrate,
        PackageType::Swift,
        PackageType::SwiplPack,
        PackageType::Terraform,
        PackageType::WordpressPlugin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PackageType::Alpm => "alpm",
            PackageType::Apk => "apk",
            PackageType::Binary => "binary",
            PackageType::Bitnami => "bitnami",
            PackageType::Cocoapods => "pod",
            PackageType::Conan => "conan",
            PackageType::DartPub => "dart-pub",
            PackageType::Deb => "deb",
            PackageType::Dotnet => "dotnet",
            PackageType::ErlangOtp => "erlang-otp",
            PackageType::Gem => "gem",
            PackageType::GithubAction => "github-action",
            PackageType::GithubActionWorkflow => "github-action-workflow",
            PackageType::GoModule => "go-module",
            PackageType::GraalVmNativeImage => "graalvm-native-image",
            PackageType::Hackage => "hackage",
            PackageType::Hex => "hex",
            PackageType::Homebrew => "homebrew",
            PackageType::JavaArchive => "java-archive",
            PackageType::JenkinsPlugin => "jenkins-plugin",
            PackageType::Kb => "msrc-kb",
            PackageType::LinuxKernel => "linux-kernel",
            PackageType::LinuxKernelModule => "linux-kernel-module",
            PackageType::LuaRocks => "lua-rocks",
            PackageType::Nix => "nix",
            PackageType::Npm => "npm",
            PackageType::Opam => "opam",
            PackageType::PhpComposer => "php-composer",
            PackageType::PhpPear => "php-pear",
            PackageType::PhpPecl => "php-pecl-pkg",
            PackageType::Portage => "portage",
            PackageType::Python => "python",
            PackageType::RPackage => "R-package",
            PackageType::Rpm => "rpm",
            PackageType::RustCrate => "rust-crate",
            PackageType::Swift => "swift",
            PackageType::SwiplPack => "swiplpack",
            PackageType::Terraform => "terraform",
            PackageType::WordpressPlugin => "wordpress-plugin",
        }
    }

    /// Package-URL type for this package type
    ///
    /// Types without a registered purl type return an empty string; types that
    /// only have a generic purl return a `generic/...` value.
    pub fn purl_type(&self) -> &'static str {
        match self {
            PackageType::Alpm => "alpm",
            PackageType::Apk => "apk",
            PackageType::Binary => "",
            PackageType::Bitnami => "bitnami",
            PackageType::Cocoapods => "cocoapods",
            PackageType::Conan => "conan",
            PackageType::DartPub => "pub",
            PackageType::Deb => "deb",
            PackageType::Dotnet => "nuget",
            PackageType::ErlangOtp => "otp",
            PackageType::Gem => "gem",
            PackageType::GithubAction | PackageType::GithubActionWorkflow => "github",
            PackageType::GoModule => "golang",
            PackageType::GraalVmNativeImage => "",
            PackageType::Hackage => "hackage",
            PackageType::Hex => "hex",
            PackageType::Homebrew => "brew",
            PackageType::JavaArchive | PackageType::JenkinsPlugin => "maven",
            PackageType::Kb => "",
            PackageType::LinuxKernel | PackageType::LinuxKernelModule => "generic/linux-kernel",
            PackageType::LuaRocks => "luarocks",
            PackageType::Nix => "nix",
            PackageType::Npm => "npm",
            PackageType::Opam => "opam",
            PackageType::PhpComposer => "composer",
            PackageType::PhpPear => "pear",
            PackageType::PhpPecl => "pecl",
            PackageType::Portage => "ebuild",
            PackageType::Python => "pypi",
            PackageType::RPackage => "cran",
            PackageType::Rpm => "rpm",
            PackageType::RustCrate => "cargo",
            PackageType::Swift => "swift",
            PackageType::SwiplPack => "swiplpack",
            PackageType::Terraform => "terraform",
            PackageType::WordpressPlugin => "wordpress-plugin",
        }
    }

    /// Looks up a package type by its canonical key (case-sensitive)
    pub fn from_key(key: &str) -> Option<PackageType> {
        Self::ALL.iter().copied().find(|t| t.as_str() == key)
    }
}

impl PackageTypeDescriptor for PackageType {
    fn canonical_key(&self) -> &str {
        self.as_str()
    }

    fn package_url_type(&self) -> &str {
        self.purl_type()
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Language ecosystems reported by inventory tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Dart,
    Dotnet,
    Elixir,
    Erlang,
    Go,
    Haskell,
    Java,
    JavaScript,
    Lua,
    OCaml,
    Php,
    Python,
    R,
    Ruby,
    Rust,
    Swift,
    Swipl,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Dart => "dart",
            Language::Dotnet => "dotnet",
            Language::Elixir => "elixir",
            Language::Erlang => "erlang",
            Language::Go => "go",
            Language::Haskell => "haskell",
            Language::Java => "java",
            Language::JavaScript => "javascript",
            Language::Lua => "lua",
            Language::OCaml => "ocaml",
            Language::Php => "php",
            Language::Python => "python",
            Language::R => "R",
            Language::Ruby => "ruby",
            Language::Rust => "rust",
            Language::Swift => "swift",
            Language::Swipl => "swipl",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_canonical_keys_are_unique() {
        let keys: HashSet<&str> = PackageType::ALL.iter().map(|t| t.as_str()).collect();
        assert_eq!(keys.len(), PackageType::ALL.len());
    }

    #[test]
    fn test_from_key_round_trips_registry() {
        for t in PackageType::ALL {
            assert_eq!(PackageType::from_key(t.as_str()), Some(t));
        }
    }

    #[test]
    fn test_from_key_is_case_sensitive() {
        assert_eq!(PackageType::from_key("r-package"), None);
        assert_eq!(
            PackageType::from_key("R-package"),
            Some(PackageType::RPackage)
        );
    }

    #[test]
    fn test_descriptor_exposes_purl_type() {
        let go = PackageType::GoModule;
        assert_eq!(go.canonical_key(), "go-module");
        assert_eq!(go.package_url_type(), "golang");
    }

    #[test]
    fn test_superseded_types_share_purl_with_successor() {
        assert_eq!(
            PackageType::JenkinsPlugin.purl_type(),
            PackageType::JavaArchive.purl_type()
        );
        assert_eq!(
            PackageType::GithubActionWorkflow.purl_type(),
            PackageType::GithubAction.purl_type()
        );
    }

    #[test]
    fn test_language_display() {
        assert_eq!(Language::JavaScript.to_string(), "javascript");
        assert_eq!(Language::R.to_string(), "R");
    }
}
