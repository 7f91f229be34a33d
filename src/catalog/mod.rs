//! Product catalog: typed product definitions, loaders and admin queries
//!
//! The catalog is built once and then only read. It is passed by reference
//! into the engine so tests can use synthetic catalogs.

mod builtin;
mod product;
pub mod loader;
pub mod query;

pub use product::{
    AnnuityProduct, CdProduct, LifeInsuranceProduct, MoneyMarketProduct, Product, ProductKind,
    RateBand, RateGrid, TermType, UnderwritingRate,
};
pub use query::{CatalogQuery, SortDirection, SortKey};

use crate::error::CatalogError;
use std::io::Read;
use std::path::Path;

/// Read-only set of products available for illustration
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    /// Create a catalog from already-normalized products
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Reference catalog compiled into the crate
    pub fn builtin() -> Self {
        Self::new(builtin::reference_products())
    }

    /// Load a catalog from a JSON file of admin-screen records
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        Ok(Self::new(loader::load_products(path)?))
    }

    /// Load a catalog from any reader holding admin-screen JSON records
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        Ok(Self::new(loader::load_products_from_reader(reader)?))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by id
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    /// Products of one family, in catalog order
    pub fn of_kind(&self, kind: ProductKind) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(move |p| p.kind() == kind)
    }

    pub fn cds(&self) -> impl Iterator<Item = &CdProduct> {
        self.products.iter().filter_map(|p| match p {
            Product::Cd(cd) => Some(cd),
            _ => None,
        })
    }

    /// Money market accounts offered under a results tab
    pub fn money_markets(&self, term_type: TermType) -> impl Iterator<Item = &MoneyMarketProduct> {
        self.products.iter().filter_map(move |p| match p {
            Product::MoneyMarket(mm) if mm.term_type == term_type => Some(mm),
            _ => None,
        })
    }

    pub fn annuities(&self) -> impl Iterator<Item = &AnnuityProduct> {
        self.products.iter().filter_map(|p| match p {
            Product::Annuity(a) => Some(a),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let catalog = ProductCatalog::builtin();

        assert_eq!(catalog.len(), 10);
        assert_eq!(
            catalog.get("annuity-2").map(|p| p.name()),
            Some("Silver Lining Plus")
        );
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn test_money_markets_by_term_type() {
        let catalog = ProductCatalog::builtin();

        let short: Vec<&str> = catalog
            .money_markets(TermType::Short)
            .map(|mm| mm.id.as_str())
            .collect();
        assert_eq!(short, vec!["money-market-1"]);
        assert_eq!(catalog.money_markets(TermType::Long).count(), 1);
    }

    #[test]
    fn test_synthetic_catalog() {
        let catalog = ProductCatalog::from_json_reader(
            r#"[{"_id": "only", "type": "cd", "data": {"productName": "Test CD"}}]"#.as_bytes(),
        )
        .unwrap();

        assert_eq!(catalog.cds().count(), 1);
        assert_eq!(catalog.annuities().count(), 0);
        assert_eq!(catalog.of_kind(ProductKind::Cd).count(), 1);
    }
}
