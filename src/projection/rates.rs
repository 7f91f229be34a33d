//! Tiered rate resolution over amount-banded grids
//!
//! Resolution never fails: a missing grid, an empty grid or an investment
//! that falls outside every band all degrade to a usable rate.

use crate::catalog::{Product, RateGrid};
use log::debug;

/// Rate used when a product has no usable rate structure (4%)
pub const DEFAULT_RATE: f64 = 0.04;

/// Resolve the rate for an investment against an optional grid
///
/// First listed band containing the investment wins. With no match the
/// first band's rate is used, and an empty or missing grid yields
/// [`DEFAULT_RATE`].
pub fn resolve_grid_rate(investment: f64, grid: Option<&RateGrid>) -> f64 {
    let Some(grid) = grid else {
        return DEFAULT_RATE;
    };

    if let Some(band) = grid.bands().iter().find(|b| b.contains(investment)) {
        return band.rate;
    }

    match grid.first_rate() {
        Some(rate) => {
            debug!(
                "No band contains {:.2}; falling back to first band rate {}",
                investment, rate
            );
            rate
        }
        None => DEFAULT_RATE,
    }
}

/// Resolve against the bands quoted for one term
///
/// Grids whose bands are not tagged with the term are resolved whole.
pub fn resolve_rate_for_term(investment: f64, grid: &RateGrid, term_months: u32) -> f64 {
    match grid.for_term(term_months) {
        Some(term_grid) => resolve_grid_rate(investment, Some(&term_grid)),
        None => resolve_grid_rate(investment, Some(grid)),
    }
}

/// Resolve the applicable rate for an investment in a product
///
/// CDs resolve against the bands for their own term.
pub fn resolve_rate(investment: f64, product: &Product) -> f64 {
    match product {
        Product::Cd(cd) => match &cd.rate_grid {
            Some(grid) => resolve_rate_for_term(investment, grid, cd.term_months),
            None => DEFAULT_RATE,
        },
        _ => resolve_grid_rate(investment, product.rate_grid()),
    }
}
