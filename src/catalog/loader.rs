//! Catalog loaders
//!
//! Product records arrive in the admin screen's JSON shape, where rate
//! structures appear under either `rateGrid` or `bands` and band limits under
//! either `minAmount`/`maxAmount` or `min`/`max`. Everything is normalized
//! here so the resolver only ever sees [`RateBand`].

use super::product::{
    AnnuityProduct, CdProduct, LifeInsuranceProduct, MoneyMarketProduct, Product, ProductKind,
    RateBand, RateGrid, TermType, UnderwritingRate,
};
use crate::customer::{Gender, TobaccoUse};
use crate::error::CatalogError;
use log::{info, warn};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Term illustrated for a CD record that does not name one
pub const DEFAULT_CD_TERM_MONTHS: u32 = 12;

/// Raw product record as stored by the admin screen
#[derive(Debug, Deserialize)]
struct RawProduct {
    #[serde(rename = "_id", default)]
    id: Option<String>,
    #[serde(rename = "type")]
    product_type: String,
    #[serde(rename = "termType", default)]
    term_type: Option<String>,
    #[serde(default)]
    data: RawProductData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProductData {
    institution: Option<String>,
    carrier: Option<String>,
    product_name: Option<String>,
    term_months: Option<u32>,
    term_years: Option<u32>,
    initial_rate: Option<f64>,
    bonus_rate: Option<f64>,
    guarantee_period: Option<u32>,
    base_rate: Option<f64>,
    minimum_balance: Option<f64>,
    rate_grid: Option<Vec<RawBand>>,
    bands: Option<Vec<RawBand>>,
    underwriting_grid: Option<Vec<RawUnderwriting>>,
}

/// Band in either naming convention
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBand {
    #[serde(alias = "min", default)]
    min_amount: Option<f64>,
    #[serde(alias = "max", default)]
    max_amount: Option<f64>,
    rate: f64,
    #[serde(default)]
    term_months: Option<u32>,
}

impl From<RawBand> for RateBand {
    fn from(raw: RawBand) -> Self {
        RateBand {
            min_amount: raw.min_amount.unwrap_or(0.0),
            max_amount: raw.max_amount,
            rate: raw.rate,
            term_months: raw.term_months,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUnderwriting {
    age: u32,
    gender: Gender,
    tobacco_use: TobaccoUse,
    rate: f64,
}

/// Row of a rate grid CSV
#[derive(Debug, Deserialize)]
struct CsvBandRow {
    min_amount: f64,
    max_amount: Option<f64>,
    rate: f64,
    #[serde(default)]
    term_months: Option<u32>,
}

impl RawProduct {
    fn into_product(
        self,
        generated_id: impl FnOnce(ProductKind) -> String,
    ) -> Result<Product, CatalogError> {
        let RawProduct {
            id,
            product_type,
            term_type,
            data,
        } = self;
        let kind = ProductKind::from_tag(&product_type)
            .ok_or(CatalogError::UnknownProductType(product_type))?;
        let id = id.unwrap_or_else(|| generated_id(kind));
        let term_type = term_type_or_default(term_type.as_deref(), kind, &id);
        let name = data
            .product_name
            .clone()
            .unwrap_or_else(|| kind.label().to_string());

        // rateGrid takes precedence over the legacy bands list
        let raw_bands = match (data.rate_grid, data.bands) {
            (Some(grid), _) if !grid.is_empty() => Some(grid),
            (_, Some(bands)) if !bands.is_empty() => Some(bands),
            (Some(grid), _) => Some(grid),
            (None, bands) => bands,
        };
        let rate_grid = raw_bands
            .map(|bands| normalize_bands(&id, bands))
            .transpose()?;

        let product = match kind {
            ProductKind::Cd => Product::Cd(CdProduct {
                id,
                institution: data.institution.unwrap_or_default(),
                name,
                term_type,
                term_months: data.term_months.unwrap_or(DEFAULT_CD_TERM_MONTHS),
                rate_grid,
            }),
            ProductKind::MoneyMarket => Product::MoneyMarket(MoneyMarketProduct {
                id,
                institution: data.institution.unwrap_or_default(),
                name,
                term_type,
                base_rate: data.base_rate,
                minimum_balance: data.minimum_balance,
                rate_grid,
            }),
            ProductKind::Annuity => {
                let term_years = data.term_years.ok_or_else(|| CatalogError::MissingField {
                    product_id: id.clone(),
                    field: "termYears",
                })?;
                Product::Annuity(AnnuityProduct {
                    id,
                    carrier: data.carrier.unwrap_or_default(),
                    name,
                    term_type,
                    term_years,
                    initial_rate: data.initial_rate.unwrap_or(0.0),
                    bonus_rate: data.bonus_rate.unwrap_or(0.0),
                    guarantee_period: data.guarantee_period,
                    rate_grid,
                })
            }
            ProductKind::LifeInsurance => Product::LifeInsurance(LifeInsuranceProduct {
                id,
                carrier: data.carrier.unwrap_or_default(),
                name,
                term_type,
                underwriting: data
                    .underwriting_grid
                    .unwrap_or_default()
                    .into_iter()
                    .map(|u| UnderwritingRate {
                        age: u.age,
                        gender: u.gender,
                        tobacco_use: u.tobacco_use,
                        rate: u.rate,
                    })
                    .collect(),
            }),
        };

        Ok(product)
    }
}

fn term_type_or_default(tag: Option<&str>, kind: ProductKind, id: &str) -> TermType {
    let default = match kind {
        ProductKind::Cd | ProductKind::MoneyMarket => TermType::Short,
        ProductKind::Annuity | ProductKind::LifeInsurance => TermType::Long,
    };
    match tag {
        None => default,
        Some(tag) => TermType::from_tag(tag).unwrap_or_else(|| {
            warn!("Product {}: unknown termType '{}', using {:?}", id, tag, default);
            default
        }),
    }
}

/// Convert raw bands into a validated grid, preserving listed order
fn normalize_bands(product_id: &str, raw: Vec<RawBand>) -> Result<RateGrid, CatalogError> {
    let bands: Vec<RateBand> = raw.into_iter().map(RateBand::from).collect();
    validate_bands(product_id, &bands)?;
    Ok(RateGrid::new(bands))
}

/// Reject bands the resolver could never match sensibly
pub fn validate_bands(product_id: &str, bands: &[RateBand]) -> Result<(), CatalogError> {
    for (index, band) in bands.iter().enumerate() {
        if !band.rate.is_finite() {
            return Err(CatalogError::NonFiniteRate {
                product_id: product_id.to_string(),
                index,
            });
        }
        if let Some(max) = band.max_amount {
            if band.min_amount > max {
                return Err(CatalogError::InvertedBand {
                    product_id: product_id.to_string(),
                    index,
                    min: band.min_amount,
                    max,
                });
            }
        }
    }
    Ok(())
}

/// Load products from any reader holding a JSON array of records
pub fn load_products_from_reader<R: Read>(reader: R) -> Result<Vec<Product>, CatalogError> {
    let raw: Vec<RawProduct> = serde_json::from_reader(reader)?;

    let mut explicit_ids: HashSet<String> = HashSet::new();
    for id in raw.iter().filter_map(|r| r.id.as_deref()) {
        if !explicit_ids.insert(id.to_string()) {
            return Err(CatalogError::DuplicateId(id.to_string()));
        }
    }

    // Generated ids skip any counter value a record already claims
    let mut counters: HashMap<ProductKind, usize> = HashMap::new();
    let mut products = Vec::with_capacity(raw.len());

    for record in raw {
        let product = record.into_product(|kind| {
            let n = counters.entry(kind).or_insert(0);
            loop {
                *n += 1;
                let id = format!("{}-{}", kind.tag(), n);
                if !explicit_ids.contains(&id) {
                    break id;
                }
            }
        })?;
        products.push(product);
    }

    Ok(products)
}

/// Load products from a JSON file
pub fn load_products<P: AsRef<Path>>(path: P) -> Result<Vec<Product>, CatalogError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| CatalogError::io(path, e))?;
    let products = load_products_from_reader(file)?;
    info!("Loaded {} products from {}", products.len(), path.display());
    Ok(products)
}

/// Load a rate grid from CSV (`min_amount,max_amount,rate[,term_months]`)
///
/// An empty `max_amount` means the band is unbounded.
pub fn load_rate_grid_from_reader<R: Read>(reader: R) -> Result<RateGrid, CatalogError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut bands = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvBandRow = result?;
        bands.push(RateBand {
            min_amount: row.min_amount,
            max_amount: row.max_amount,
            rate: row.rate,
            term_months: row.term_months,
        });
    }

    validate_bands("csv", &bands)?;
    Ok(RateGrid::new(bands))
}

/// Load a rate grid from a CSV file
pub fn load_rate_grid<P: AsRef<Path>>(path: P) -> Result<RateGrid, CatalogError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| CatalogError::io(path, e))?;
    load_rate_grid_from_reader(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_band_conventions_normalize_identically() {
        let json = r#"[
            {"_id": "mm-a", "type": "moneyMarket", "termType": "short",
             "data": {"productName": "A", "rateGrid": [
                {"minAmount": 0, "maxAmount": 24999, "rate": 0.038},
                {"minAmount": 25000, "maxAmount": 99999, "rate": 0.045}]}},
            {"_id": "mm-b", "type": "moneyMarket", "termType": "short",
             "data": {"productName": "B", "bands": [
                {"min": 0, "max": 24999, "rate": 0.038},
                {"min": 25000, "max": 99999, "rate": 0.045}]}}
        ]"#;

        let products = load_products_from_reader(json.as_bytes()).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].rate_grid(), products[1].rate_grid());
    }

    #[test]
    fn test_missing_limits_default_to_open_range() {
        let json = r#"[{"type": "moneyMarket", "data": {"bands": [{"rate": 0.05}]}}]"#;

        let products = load_products_from_reader(json.as_bytes()).unwrap();
        let band = products[0].rate_grid().unwrap().bands()[0];
        assert_eq!(band.min_amount, 0.0);
        assert_eq!(band.max_amount, None);
    }

    #[test]
    fn test_generated_ids() {
        let json = r#"[
            {"type": "cd", "data": {"institution": "SecureBank"}},
            {"type": "cd", "data": {}},
            {"type": "moneyMarket", "data": {}}
        ]"#;

        let products = load_products_from_reader(json.as_bytes()).unwrap();
        let ids: Vec<&str> = products.iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec!["cd-1", "cd-2", "moneyMarket-1"]);
    }

    #[test]
    fn test_generated_ids_skip_explicit_ids() {
        let json = r#"[
            {"type": "cd", "data": {"institution": "SecureBank"}},
            {"_id": "cd-1", "type": "cd", "data": {"institution": "TrustFirst"}}
        ]"#;

        let products = load_products_from_reader(json.as_bytes()).unwrap();
        let ids: Vec<&str> = products.iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec!["cd-2", "cd-1"]);
    }

    #[test]
    fn test_duplicate_explicit_ids_rejected() {
        let json = r#"[
            {"_id": "mm", "type": "moneyMarket", "data": {}},
            {"_id": "mm", "type": "moneyMarket", "data": {}}
        ]"#;
        let err = load_products_from_reader(json.as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == "mm"));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let json = r#"[{"type": "bond", "data": {}}]"#;
        let err = load_products_from_reader(json.as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownProductType(t) if t == "bond"));
    }

    #[test]
    fn test_inverted_band_rejected() {
        let json = r#"[{"_id": "x", "type": "annuity", "data": {"termYears": 10,
            "rateGrid": [{"minAmount": 500, "maxAmount": 100, "rate": 0.03}]}}]"#;
        let err = load_products_from_reader(json.as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::InvertedBand { index: 0, .. }));
    }

    #[test]
    fn test_annuity_requires_term() {
        let json = r#"[{"_id": "x", "type": "annuity", "data": {"initialRate": 0.03}}]"#;
        let err = load_products_from_reader(json.as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::MissingField { field: "termYears", .. }));
    }

    #[test]
    fn test_rate_grid_csv() {
        let csv = "min_amount,max_amount,rate,term_months\n\
                   0,9999,0.035,3\n\
                   10000,,0.04,3\n";

        let grid = load_rate_grid_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(grid.bands().len(), 2);
        assert_eq!(grid.bands()[1].max_amount, None);
        assert_eq!(grid.bands()[1].term_months, Some(3));
    }

    #[test]
    fn test_rate_grid_csv_without_term_column() {
        let csv = "min_amount,max_amount,rate\n0,,0.04\n";

        let grid = load_rate_grid_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(grid.bands()[0].term_months, None);
    }
}
