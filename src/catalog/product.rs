//! Product definitions: rate bands, rate grids and the product family enum

use crate::customer::{Gender, TobaccoUse};
use serde::{Deserialize, Serialize};

/// One amount range of a rate grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateBand {
    /// Smallest investment in the band (inclusive)
    pub min_amount: f64,

    /// Largest investment in the band (inclusive), `None` = unbounded
    pub max_amount: Option<f64>,

    /// Annual rate as a decimal fraction (0.045 = 4.5%)
    pub rate: f64,

    /// Term the band applies to, for grids partitioned by term (CDs)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_months: Option<u32>,
}

impl RateBand {
    pub fn new(min_amount: f64, max_amount: Option<f64>, rate: f64) -> Self {
        Self {
            min_amount,
            max_amount,
            rate,
            term_months: None,
        }
    }

    /// Band restricted to a single term
    pub fn with_term(mut self, term_months: u32) -> Self {
        self.term_months = Some(term_months);
        self
    }

    /// Check if an investment falls inside the band (both ends inclusive)
    pub fn contains(&self, investment: f64) -> bool {
        investment >= self.min_amount && investment <= self.max_amount.unwrap_or(f64::INFINITY)
    }
}

/// Ordered list of rate bands; the first matching band wins
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateGrid {
    bands: Vec<RateBand>,
}

impl RateGrid {
    pub fn new(bands: Vec<RateBand>) -> Self {
        Self { bands }
    }

    pub fn bands(&self) -> &[RateBand] {
        &self.bands
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Rate of the first listed band
    pub fn first_rate(&self) -> Option<f64> {
        self.bands.first().map(|b| b.rate)
    }

    /// Distinct terms quoted by the grid, in listed order
    pub fn terms(&self) -> Vec<u32> {
        let mut terms = Vec::new();
        for term in self.bands.iter().filter_map(|b| b.term_months) {
            if !terms.contains(&term) {
                terms.push(term);
            }
        }
        terms
    }

    /// Sub-grid of the bands quoted for one term
    ///
    /// Returns `None` when no band carries the term.
    pub fn for_term(&self, term_months: u32) -> Option<RateGrid> {
        let bands: Vec<RateBand> = self
            .bands
            .iter()
            .filter(|b| b.term_months == Some(term_months))
            .copied()
            .collect();
        if bands.is_empty() {
            None
        } else {
            Some(RateGrid::new(bands))
        }
    }

    /// Highest rate anywhere in the grid
    pub fn max_rate(&self) -> Option<f64> {
        self.bands.iter().map(|b| b.rate).reduce(f64::max)
    }
}

/// Product families the engine can project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProductKind {
    Cd,
    MoneyMarket,
    Annuity,
    LifeInsurance,
}

impl ProductKind {
    pub const ALL: [ProductKind; 4] = [
        ProductKind::Cd,
        ProductKind::MoneyMarket,
        ProductKind::Annuity,
        ProductKind::LifeInsurance,
    ];

    /// Parse the catalog's type tag (`cd`, `moneyMarket`, ...)
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "cd" => Some(ProductKind::Cd),
            "moneyMarket" => Some(ProductKind::MoneyMarket),
            "annuity" => Some(ProductKind::Annuity),
            "lifeInsurance" => Some(ProductKind::LifeInsurance),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            ProductKind::Cd => "cd",
            ProductKind::MoneyMarket => "moneyMarket",
            ProductKind::Annuity => "annuity",
            ProductKind::LifeInsurance => "lifeInsurance",
        }
    }

    /// Human-readable family name
    pub fn label(&self) -> &'static str {
        match self {
            ProductKind::Cd => "Certificate of Deposit",
            ProductKind::MoneyMarket => "Money Market Account",
            ProductKind::Annuity => "Annuity",
            ProductKind::LifeInsurance => "Whole Life Insurance",
        }
    }
}

/// Which results tab a product is offered under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermType {
    Short,
    Intermediate,
    Long,
}

impl TermType {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "short" => Some(TermType::Short),
            "intermediate" => Some(TermType::Intermediate),
            "long" => Some(TermType::Long),
            _ => None,
        }
    }

    /// Illustration horizon in years for money market accounts
    pub fn horizon_years(&self) -> u32 {
        match self {
            TermType::Short => 1,
            TermType::Intermediate => 3,
            TermType::Long => 5,
        }
    }

    pub fn badge(&self) -> &'static str {
        match self {
            TermType::Short => "Short",
            TermType::Intermediate => "Intermediate",
            TermType::Long => "Long",
        }
    }
}

/// Certificate of deposit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CdProduct {
    pub id: String,
    pub institution: String,
    pub name: String,
    pub term_type: TermType,
    /// Term illustrated when no other term is requested
    pub term_months: u32,
    pub rate_grid: Option<RateGrid>,
}

/// Money market account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyMarketProduct {
    pub id: String,
    pub institution: String,
    pub name: String,
    pub term_type: TermType,
    pub base_rate: Option<f64>,
    pub minimum_balance: Option<f64>,
    pub rate_grid: Option<RateGrid>,
}

/// Fixed annuity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnuityProduct {
    pub id: String,
    pub carrier: String,
    pub name: String,
    pub term_type: TermType,
    pub term_years: u32,
    pub initial_rate: f64,
    /// One-time bonus on principal, never compounded
    pub bonus_rate: f64,
    pub guarantee_period: Option<u32>,
    pub rate_grid: Option<RateGrid>,
}

/// Underwriting grid row (informational; projections use the adjustment rule)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnderwritingRate {
    pub age: u32,
    pub gender: Gender,
    pub tobacco_use: TobaccoUse,
    pub rate: f64,
}

/// Life-insurance-linked savings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifeInsuranceProduct {
    pub id: String,
    pub carrier: String,
    pub name: String,
    pub term_type: TermType,
    pub underwriting: Vec<UnderwritingRate>,
}

/// A catalog product, one variant per family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Product {
    Cd(CdProduct),
    MoneyMarket(MoneyMarketProduct),
    Annuity(AnnuityProduct),
    LifeInsurance(LifeInsuranceProduct),
}

impl Product {
    pub fn kind(&self) -> ProductKind {
        match self {
            Product::Cd(_) => ProductKind::Cd,
            Product::MoneyMarket(_) => ProductKind::MoneyMarket,
            Product::Annuity(_) => ProductKind::Annuity,
            Product::LifeInsurance(_) => ProductKind::LifeInsurance,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Product::Cd(p) => &p.id,
            Product::MoneyMarket(p) => &p.id,
            Product::Annuity(p) => &p.id,
            Product::LifeInsurance(p) => &p.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Product::Cd(p) => &p.name,
            Product::MoneyMarket(p) => &p.name,
            Product::Annuity(p) => &p.name,
            Product::LifeInsurance(p) => &p.name,
        }
    }

    /// Institution (banks) or carrier (insurers)
    pub fn provider(&self) -> &str {
        match self {
            Product::Cd(p) => &p.institution,
            Product::MoneyMarket(p) => &p.institution,
            Product::Annuity(p) => &p.carrier,
            Product::LifeInsurance(p) => &p.carrier,
        }
    }

    pub fn term_type(&self) -> TermType {
        match self {
            Product::Cd(p) => p.term_type,
            Product::MoneyMarket(p) => p.term_type,
            Product::Annuity(p) => p.term_type,
            Product::LifeInsurance(p) => p.term_type,
        }
    }

    /// Amount-banded rate grid, if the product has one
    pub fn rate_grid(&self) -> Option<&RateGrid> {
        match self {
            Product::Cd(p) => p.rate_grid.as_ref(),
            Product::MoneyMarket(p) => p.rate_grid.as_ref(),
            Product::Annuity(p) => p.rate_grid.as_ref(),
            Product::LifeInsurance(_) => None,
        }
    }

    /// Short term marker shown in the card title (`12m`, `10y`, `Life`)
    pub fn term_label(&self) -> String {
        match self {
            Product::Cd(p) => format!("{}m", p.term_months),
            Product::MoneyMarket(p) => format!("{}y", p.term_type.horizon_years()),
            Product::Annuity(p) => format!("{}y", p.term_years),
            Product::LifeInsurance(_) => "Life".to_string(),
        }
    }

    /// Badge shown in the card corner
    pub fn badge(&self) -> &'static str {
        match self {
            Product::Cd(_) => "CD",
            Product::MoneyMarket(p) => p.term_type.badge(),
            Product::Annuity(_) => "Annuity",
            Product::LifeInsurance(_) => "Life",
        }
    }

    /// Term length used for sorting, in months
    pub fn term_months(&self) -> Option<u32> {
        match self {
            Product::Cd(p) => Some(p.term_months),
            Product::MoneyMarket(p) => Some(p.term_type.horizon_years().saturating_mul(12)),
            Product::Annuity(p) => Some(p.term_years.saturating_mul(12)),
            Product::LifeInsurance(_) => None,
        }
    }

    /// Best advertised rate, for the admin table
    pub fn headline_rate(&self) -> Option<f64> {
        match self {
            Product::MoneyMarket(p) => p
                .rate_grid
                .as_ref()
                .and_then(RateGrid::max_rate)
                .or(p.base_rate),
            Product::Annuity(p) => p
                .rate_grid
                .as_ref()
                .and_then(RateGrid::max_rate)
                .or(Some(p.initial_rate)),
            Product::LifeInsurance(p) => p.underwriting.iter().map(|u| u.rate).reduce(f64::max),
            Product::Cd(p) => p.rate_grid.as_ref().and_then(RateGrid::max_rate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiered_grid() -> RateGrid {
        RateGrid::new(vec![
            RateBand::new(0.0, Some(9_999.0), 0.035),
            RateBand::new(10_000.0, Some(49_999.0), 0.04),
            RateBand::new(50_000.0, None, 0.042),
        ])
    }

    #[test]
    fn test_band_bounds_inclusive() {
        let band = RateBand::new(10_000.0, Some(49_999.0), 0.04);

        assert!(band.contains(10_000.0));
        assert!(band.contains(49_999.0));
        assert!(!band.contains(9_999.99));
        assert!(!band.contains(49_999.5));
    }

    #[test]
    fn test_unbounded_band() {
        let band = RateBand::new(50_000.0, None, 0.042);
        assert!(band.contains(1e12));
    }

    #[test]
    fn test_grid_for_term() {
        let grid = RateGrid::new(vec![
            RateBand::new(0.0, Some(9_999.0), 0.035).with_term(3),
            RateBand::new(10_000.0, None, 0.04).with_term(3),
            RateBand::new(0.0, None, 0.045).with_term(12),
        ]);

        assert_eq!(grid.terms(), vec![3, 12]);
        assert_eq!(grid.for_term(12).map(|g| g.bands().len()), Some(1));
        assert!(grid.for_term(6).is_none());
    }

    #[test]
    fn test_grid_rates() {
        let grid = tiered_grid();
        assert_eq!(grid.first_rate(), Some(0.035));
        assert_eq!(grid.max_rate(), Some(0.042));
        assert_eq!(RateGrid::default().first_rate(), None);
    }

    #[test]
    fn test_term_months_saturates() {
        let annuity = Product::Annuity(AnnuityProduct {
            id: "a".into(),
            carrier: "Carrier".into(),
            name: "Long Annuity".into(),
            term_type: TermType::Long,
            term_years: u32::MAX,
            initial_rate: 0.04,
            bonus_rate: 0.0,
            guarantee_period: None,
            rate_grid: None,
        });
        assert_eq!(annuity.term_months(), Some(u32::MAX));
    }

    #[test]
    fn test_kind_tags() {
        for kind in ProductKind::ALL {
            assert_eq!(ProductKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(ProductKind::from_tag("CD"), None);
    }
}
