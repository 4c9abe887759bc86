//! Pricing data model for nav-core
//!
//! Parses the shared `packages.json` and derives what the pricing card and
//! the feature comparison table display: formatted prices, the enabled
//! feature summary and the comparison matrix.

pub mod error;
pub mod format;
pub mod labels;
pub mod types;

pub use error::PricingError;
pub use format::{
    comparison_rows, default_description, feature_summary, format_credits, format_price_eu,
    ComparisonCategory, ComparisonRow,
};
pub use labels::{category_label, feature_label, CATEGORY_LABELS, FEATURE_LABELS};
pub use types::{
    FeatureCategory, FeatureValue, HackerInTheLoopFeatures, PlatformFeatures, PricingData,
    PricingFeatures, PricingPackage, ReportingFeatures, ServiceFeatures,
};
