//! Investment Illustration - projected returns for savings and insurance products
//!
//! This library provides:
//! - A product catalog of CDs, money market accounts, annuities and life insurance
//! - Tiered rate resolution over amount-banded rate grids
//! - Compound-growth projections and growth series per product family
//! - Per-customer illustrations across four horizon buckets, with comparison charts
//! - Form validation and shareable result tokens

pub mod catalog;
pub mod customer;
pub mod error;
pub mod format;
pub mod illustration;
pub mod projection;

// Re-export commonly used types
pub use catalog::{Product, ProductCatalog, ProductKind, RateBand, RateGrid};
pub use customer::{Allocation, CustomerProfile, HorizonBucket, IllustrationInputs};
pub use error::CatalogError;
pub use illustration::{ComparisonSet, Illustration, IllustrationConfig, Illustrator};
pub use projection::{resolve_rate, ProjectionEngine, ProjectionResult};
