//! Illustration configuration
//!
//! Every field has a serde default so a partial JSON file (or `{}`) is a
//! valid configuration.

use crate::customer::HorizonBucket;
use crate::error::CatalogError;
use crate::projection::ProjectionConfig;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A fixed-rate CD quote shown alongside catalog products
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CdQuote {
    pub term_months: u32,
    pub rate: f64,
}

impl CdQuote {
    pub fn new(term_months: u32, rate: f64) -> Self {
        Self { term_months, rate }
    }

    /// Card id for the quote (`standard-cd-12m`)
    pub fn card_id(&self) -> String {
        format!("standard-cd-{}m", self.term_months)
    }
}

fn default_short_quote() -> CdQuote {
    CdQuote::new(12, 0.04)
}

fn default_intermediate_quote() -> CdQuote {
    CdQuote::new(36, 0.045)
}

fn default_long_quote() -> CdQuote {
    CdQuote::new(60, 0.05)
}

/// Standard CD quotes, one per banking tab
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardCdQuotes {
    /// 12 months @ 4.00%
    #[serde(default = "default_short_quote")]
    pub short: CdQuote,

    /// 36 months @ 4.50%
    #[serde(default = "default_intermediate_quote")]
    pub intermediate: CdQuote,

    /// 60 months @ 5.00%
    #[serde(default = "default_long_quote")]
    pub long: CdQuote,
}

impl Default for StandardCdQuotes {
    fn default() -> Self {
        Self {
            short: default_short_quote(),
            intermediate: default_intermediate_quote(),
            long: default_long_quote(),
        }
    }
}

impl StandardCdQuotes {
    /// Quote shown on a tab; the never tab has none
    pub fn for_bucket(&self, bucket: HorizonBucket) -> Option<CdQuote> {
        match bucket {
            HorizonBucket::Short => Some(self.short),
            HorizonBucket::Intermediate => Some(self.intermediate),
            HorizonBucket::Long => Some(self.long),
            HorizonBucket::Never => None,
        }
    }
}

/// Configuration for an [`Illustrator`](super::Illustrator)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IllustrationConfig {
    #[serde(default)]
    pub projection: ProjectionConfig,

    #[serde(default)]
    pub cd_quotes: StandardCdQuotes,
}

impl IllustrationConfig {
    /// Load configuration from a JSON file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| CatalogError::io(path, e))?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::MoneyMarketBasis;

    #[test]
    fn test_default_quotes() {
        let quotes = StandardCdQuotes::default();

        assert_eq!(quotes.for_bucket(HorizonBucket::Short), Some(CdQuote::new(12, 0.04)));
        assert_eq!(
            quotes.for_bucket(HorizonBucket::Intermediate),
            Some(CdQuote::new(36, 0.045))
        );
        assert_eq!(quotes.for_bucket(HorizonBucket::Long), Some(CdQuote::new(60, 0.05)));
        assert_eq!(quotes.for_bucket(HorizonBucket::Never), None);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: IllustrationConfig = serde_json::from_str(
            r#"{
                "projection": {"moneyMarketBasis": "flatThirtyYear"},
                "cdQuotes": {"long": {"termMonths": 48, "rate": 0.048}}
            }"#,
        )
        .unwrap();

        assert_eq!(config.projection.money_market_basis, MoneyMarketBasis::FlatThirtyYear);
        assert_eq!(config.cd_quotes.short, CdQuote::new(12, 0.04));
        assert_eq!(config.cd_quotes.long, CdQuote::new(48, 0.048));
        assert_eq!(config.cd_quotes.long.card_id(), "standard-cd-48m");

        let empty: IllustrationConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, IllustrationConfig::default());
    }

    #[test]
    fn test_missing_config_file() {
        let err = IllustrationConfig::from_json_path("/nonexistent/illustration.json").unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
