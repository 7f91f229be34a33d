//! Admin catalog browsing: type tab filter, free-text search and column sort
//!
//! Read-only. Edits made in the admin screen are never written back.

use super::{Product, ProductCatalog, ProductKind};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sortable admin table columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    ProductName,
    Provider,
    Term,
    Rate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Current admin table state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogQuery {
    /// Product type tab; `None` shows every type
    pub kind: Option<ProductKind>,
    /// Case-insensitive match against name and institution/carrier
    pub search: String,
    pub sort: Option<(SortKey, SortDirection)>,
}

impl CatalogQuery {
    pub fn for_kind(kind: ProductKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Clicking a column header: ascending first, then descending
    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort = match self.sort {
            Some((current, SortDirection::Asc)) if current == key => {
                Some((key, SortDirection::Desc))
            }
            _ => Some((key, SortDirection::Asc)),
        };
    }

    fn matches(&self, product: &Product) -> bool {
        if let Some(kind) = self.kind {
            if product.kind() != kind {
                return false;
            }
        }
        let needle = self.search.trim().to_lowercase();
        needle.is_empty()
            || product.name().to_lowercase().contains(&needle)
            || product.provider().to_lowercase().contains(&needle)
    }

    /// Apply filter and sort to a catalog
    pub fn apply<'a>(&self, catalog: &'a ProductCatalog) -> Vec<&'a Product> {
        let mut rows: Vec<&Product> = catalog
            .products()
            .iter()
            .filter(|p| self.matches(p))
            .collect();

        if let Some((key, direction)) = self.sort {
            rows.sort_by(|a, b| {
                let ordering = compare_by(key, a, b);
                match direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        rows
    }
}

/// Missing values sort as empty text or zero
fn compare_by(key: SortKey, a: &Product, b: &Product) -> Ordering {
    match key {
        SortKey::ProductName => a.name().cmp(b.name()),
        SortKey::Provider => a.provider().cmp(b.provider()),
        SortKey::Term => a.term_months().unwrap_or(0).cmp(&b.term_months().unwrap_or(0)),
        SortKey::Rate => a
            .headline_rate()
            .unwrap_or(0.0)
            .total_cmp(&b.headline_rate().unwrap_or(0.0)),
    }
}
