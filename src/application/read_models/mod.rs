//! Read models for CQRS-lite pattern
//!
//! This module contains view-optimized structs that provide
//! a denormalized representation of the scan for the report.

pub mod document;
pub mod match_view;
pub mod match_view_builder;

pub use document::{DescriptorView, DistributionView, Document, SourceTarget, SourceView};
pub use match_view::{
    IgnoreRulePackageView, IgnoreRuleView, IgnoredMatchView, MatchDetailView, MatchView,
    PackageView, VulnerabilityMetadataView, VulnerabilityView,
};
pub use match_view_builder::MatchViewBuilder;
