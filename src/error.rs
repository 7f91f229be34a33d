//! Error types for catalog and configuration loading
//!
//! The calculation engine itself never returns errors: rate resolution and
//! projection always produce a number. Only the I/O edges (catalog files,
//! rate grid CSVs, config files) can fail.

use thiserror::Error;

/// Errors raised while building a product catalog or loading configuration
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("unknown product type '{0}'")]
    UnknownProductType(String),

    #[error("duplicate product id '{0}'")]
    DuplicateId(String),

    #[error("product {product_id}: band {index} has min {min} above max {max}")]
    InvertedBand {
        product_id: String,
        index: usize,
        min: f64,
        max: f64,
    },

    #[error("product {product_id}: band {index} has non-finite rate")]
    NonFiniteRate { product_id: String, index: usize },

    #[error("product {product_id}: missing required field '{field}'")]
    MissingField {
        product_id: String,
        field: &'static str,
    },
}

impl CatalogError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        CatalogError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
