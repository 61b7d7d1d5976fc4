pub mod os_specifier_override;
pub mod package_specifier_override;
pub mod schema_version;
pub mod sort_strategy;

pub use os_specifier_override::{
    known_os_specifier_overrides, resolve_os_specifier, resolve_release, OsSpecifier,
    OsSpecifierOverride, ResolvedOsSpecifier, VersionPattern, KNOWN_OS_SPECIFIER_OVERRIDES,
};
pub use package_specifier_override::{
    known_package_specifier_overrides, resolve_ecosystem, resolve_known_ecosystem,
    PackageSpecifierOverride, KNOWN_PACKAGE_SPECIFIER_OVERRIDES,
};
pub use schema_version::{SchemaConstraint, SchemaVersion};
pub use sort_strategy::{SortStrategy, SortableMatch};
