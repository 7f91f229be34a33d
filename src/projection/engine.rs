//! Projection engine: compound-growth formulas per product family

use super::rates::{resolve_rate, resolve_rate_for_term};
use super::results::ProjectionResult;
use super::series::{generate_series, GrowthSeries, SamplingInterval};
use crate::catalog::{CdProduct, Product};
use crate::customer::{CustomerProfile, Gender};
use serde::{Deserialize, Serialize};

/// Horizon of a life insurance illustration (typical whole-life term)
pub const LIFE_INSURANCE_HORIZON_YEARS: u32 = 30;

/// Horizon used by the flat money market basis
pub const FLAT_MONEY_MARKET_YEARS: u32 = 30;

/// Base crediting rate for life insurance before profile adjustments
pub const LIFE_INSURANCE_BASE_RATE: f64 = 0.04;

/// CD value: annual compounding over a fractional number of years
pub fn project_cd(investment: f64, rate: f64, term_months: u32) -> f64 {
    investment * (1.0 + rate).powf(term_months as f64 / 12.0)
}

/// Money market value: monthly compounding over whole years
pub fn project_money_market(investment: f64, rate: f64, years: u32) -> f64 {
    investment * (1.0 + rate / 12.0).powi((years * 12) as i32)
}

/// Money market value on the flat basis: annual compounding over 30 years
pub fn project_money_market_flat(investment: f64, rate: f64) -> f64 {
    investment * (1.0 + rate).powi(FLAT_MONEY_MARKET_YEARS as i32)
}

/// Annuity value: compounded principal plus a one-time bonus on principal
pub fn project_annuity(investment: f64, rate: f64, term_years: u32, bonus_rate: f64) -> f64 {
    let years = term_years.min(i32::MAX as u32) as i32;
    investment * (1.0 + rate).powi(years) + investment * bonus_rate
}

/// Life insurance value at the profile's effective rate
pub fn project_life_insurance(investment: f64, profile: &CustomerProfile, years: u32) -> f64 {
    let rate = LifeInsuranceRate::for_profile(profile).effective();
    investment * (1.0 + rate).powi(years as i32)
}

/// Itemized life insurance rate
///
/// Adjustments are additive and independent of each other.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifeInsuranceRate {
    pub base: f64,
    /// +1% under 30, -1% over 60
    pub age_adjustment: f64,
    /// +0.5% for female
    pub gender_adjustment: f64,
    /// -1% for tobacco users
    pub tobacco_adjustment: f64,
}

impl LifeInsuranceRate {
    pub fn for_profile(profile: &CustomerProfile) -> Self {
        let age_adjustment = if profile.age < 30 {
            0.01
        } else if profile.age > 60 {
            -0.01
        } else {
            0.0
        };
        let gender_adjustment = match profile.gender {
            Gender::Female => 0.005,
            Gender::Male => 0.0,
        };
        let tobacco_adjustment = if profile.tobacco_use.is_user() { -0.01 } else { 0.0 };

        Self {
            base: LIFE_INSURANCE_BASE_RATE,
            age_adjustment,
            gender_adjustment,
            tobacco_adjustment,
        }
    }

    /// Rate actually used for the projection
    pub fn effective(&self) -> f64 {
        self.base + self.age_adjustment + self.gender_adjustment + self.tobacco_adjustment
    }
}

/// How money market accounts are projected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MoneyMarketBasis {
    /// Monthly compounding to the tab horizon (1, 3 or 5 years)
    #[default]
    MonthlyToHorizon,
    /// Annual compounding over a flat 30 years
    FlatThirtyYear,
}

fn default_life_insurance_years() -> u32 {
    LIFE_INSURANCE_HORIZON_YEARS
}

/// Configuration for the projection engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionConfig {
    /// Money market projection basis
    #[serde(default)]
    pub money_market_basis: MoneyMarketBasis,

    /// Years a life insurance illustration runs
    #[serde(default = "default_life_insurance_years")]
    pub life_insurance_years: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            money_market_basis: MoneyMarketBasis::default(),
            life_insurance_years: LIFE_INSURANCE_HORIZON_YEARS,
        }
    }
}

/// Projects investments into catalog products
///
/// Holds no catalog state; every call is a pure function of its inputs.
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Project an investment into a product
    ///
    /// Only life insurance reads the profile.
    pub fn project(
        &self,
        product: &Product,
        investment: f64,
        profile: &CustomerProfile,
    ) -> ProjectionResult {
        match product {
            Product::Cd(cd) => {
                let rate = resolve_rate(investment, product);
                ProjectionResult::new(investment, rate, project_cd(investment, rate, cd.term_months))
            }
            Product::MoneyMarket(mm) => {
                let rate = resolve_rate(investment, product);
                let value = match self.config.money_market_basis {
                    MoneyMarketBasis::MonthlyToHorizon => {
                        project_money_market(investment, rate, mm.term_type.horizon_years())
                    }
                    MoneyMarketBasis::FlatThirtyYear => project_money_market_flat(investment, rate),
                };
                ProjectionResult::new(investment, rate, value)
            }
            Product::Annuity(annuity) => {
                let rate = resolve_rate(investment, product);
                let value =
                    project_annuity(investment, rate, annuity.term_years, annuity.bonus_rate);
                ProjectionResult::new(investment, rate, value)
            }
            Product::LifeInsurance(_) => self.project_life(investment, profile),
        }
    }

    /// Project the profile-driven whole-life illustration
    pub fn project_life(&self, investment: f64, profile: &CustomerProfile) -> ProjectionResult {
        let rate = LifeInsuranceRate::for_profile(profile).effective();
        let value = project_life_insurance(investment, profile, self.config.life_insurance_years);
        ProjectionResult::new(investment, rate, value)
    }

    /// Project a CD at a fixed quoted rate
    pub fn project_cd_quote(&self, investment: f64, term_months: u32, rate: f64) -> ProjectionResult {
        ProjectionResult::new(investment, rate, project_cd(investment, rate, term_months))
    }

    /// Project a catalog CD for a term other than its default one
    ///
    /// Returns `None` when the CD has no grid quoting that term.
    pub fn project_cd_term(
        &self,
        cd: &CdProduct,
        investment: f64,
        term_months: u32,
    ) -> Option<ProjectionResult> {
        let grid = cd.rate_grid.as_ref()?;
        if !grid.terms().contains(&term_months) {
            return None;
        }
        let rate = resolve_rate_for_term(investment, grid, term_months);
        Some(self.project_cd_quote(investment, term_months, rate))
    }

    /// Growth trajectory of an investment in a product, for comparison charts
    ///
    /// Banking products are sampled monthly; annuities and life insurance
    /// yearly. Money markets on the flat basis follow its 30 yearly points.
    /// Annuity series leave out the bonus.
    pub fn growth_series(
        &self,
        product: &Product,
        investment: f64,
        profile: &CustomerProfile,
    ) -> GrowthSeries {
        match product {
            Product::Cd(cd) => {
                let rate = resolve_rate(investment, product);
                generate_series(investment, rate, cd.term_months, SamplingInterval::Month)
            }
            Product::MoneyMarket(mm) => {
                let rate = resolve_rate(investment, product);
                match self.config.money_market_basis {
                    MoneyMarketBasis::MonthlyToHorizon => {
                        let months = mm.term_type.horizon_years() * 12;
                        generate_series(investment, rate, months, SamplingInterval::Month)
                    }
                    MoneyMarketBasis::FlatThirtyYear => generate_series(
                        investment,
                        rate,
                        FLAT_MONEY_MARKET_YEARS,
                        SamplingInterval::Year,
                    ),
                }
            }
            Product::Annuity(annuity) => {
                let rate = resolve_rate(investment, product);
                generate_series(investment, rate, annuity.term_years, SamplingInterval::Year)
            }
            Product::LifeInsurance(_) => self.life_series(investment, profile),
        }
    }

    pub fn life_series(&self, investment: f64, profile: &CustomerProfile) -> GrowthSeries {
        let rate = LifeInsuranceRate::for_profile(profile).effective();
        generate_series(
            investment,
            rate,
            self.config.life_insurance_years,
            SamplingInterval::Year,
        )
    }

    /// Growth trajectory of a CD at a fixed quoted rate
    pub fn cd_quote_series(&self, investment: f64, term_months: u32, rate: f64) -> GrowthSeries {
        generate_series(investment, rate, term_months, SamplingInterval::Month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AnnuityProduct, ProductCatalog, TermType};
    use crate::customer::TobaccoUse;
    use approx::assert_relative_eq;
    use proptest::prelude::{prop_assert, proptest};

    fn profile() -> CustomerProfile {
        CustomerProfile::new(45, Gender::Male, TobaccoUse::No)
    }

    #[test]
    fn test_cd_formula() {
        assert_eq!(project_cd(10_000.0, 0.04, 12), 10_400.0);
        assert_relative_eq!(project_cd(10_000.0, 0.05, 60), 12_762.815625, epsilon = 1e-6);
        assert_eq!(project_cd(0.0, 0.05, 36), 0.0);
    }

    #[test]
    fn test_zero_term_returns_investment() {
        assert_eq!(project_cd(10_000.0, 0.05, 0), 10_000.0);
        assert_eq!(project_money_market(10_000.0, 0.05, 0), 10_000.0);
        assert_eq!(project_annuity(10_000.0, 0.05, 0, 0.0), 10_000.0);
    }

    #[test]
    fn test_money_market_compounds_monthly() {
        assert_relative_eq!(
            project_money_market(10_000.0, 0.045, 3),
            10_000.0 * (1.0 + 0.045 / 12.0_f64).powi(36),
            epsilon = 1e-9
        );
        assert_eq!(project_money_market(10_000.0, 0.04, 1).round(), 10_407.0);
    }

    #[test]
    fn test_annuity_bonus_not_compounded() {
        let investment = 100_000.0;
        let with_bonus = project_annuity(investment, 0.045, 10, 0.10);
        let without_bonus = project_annuity(investment, 0.045, 10, 0.0);

        assert_relative_eq!(with_bonus - without_bonus, investment * 0.10, epsilon = 1e-6);
        assert_relative_eq!(with_bonus, 165_296.942173, epsilon = 1e-5);
    }

    #[test]
    fn test_life_rate_adjustments() {
        let young_female = CustomerProfile::new(25, Gender::Female, TobaccoUse::No);
        let rate = LifeInsuranceRate::for_profile(&young_female);
        assert_relative_eq!(rate.effective(), 0.055, epsilon = 1e-12);
        assert_eq!(rate.age_adjustment, 0.01);
        assert_eq!(rate.gender_adjustment, 0.005);
        assert_eq!(rate.tobacco_adjustment, 0.0);

        let older_smoker = CustomerProfile::new(65, Gender::Male, TobaccoUse::Yes);
        assert_relative_eq!(
            LifeInsuranceRate::for_profile(&older_smoker).effective(),
            0.02,
            epsilon = 1e-12
        );

        // Boundaries are exclusive
        for age in [30, 60] {
            let p = CustomerProfile::new(age, Gender::Male, TobaccoUse::No);
            assert_eq!(LifeInsuranceRate::for_profile(&p).age_adjustment, 0.0);
        }
    }

    #[test]
    fn test_life_projection_thirty_years() {
        let young_female = CustomerProfile::new(25, Gender::Female, TobaccoUse::No);
        let value = project_life_insurance(10_000.0, &young_female, LIFE_INSURANCE_HORIZON_YEARS);
        assert_relative_eq!(value, 49_839.512884, epsilon = 1e-4);
    }

    #[test]
    fn test_engine_dispatch_over_reference_catalog() {
        let catalog = ProductCatalog::builtin();
        let engine = ProjectionEngine::default();

        let annuity = engine.project(catalog.get("annuity-1").unwrap(), 100_000.0, &profile());
        assert_eq!(annuity.rate, 0.04);
        assert_relative_eq!(
            annuity.projected_value,
            100_000.0 * 1.04_f64.powi(10) + 1_000.0,
            epsilon = 1e-6
        );
        assert_relative_eq!(annuity.growth, annuity.projected_value - 100_000.0);

        let mm = engine.project(catalog.get("money-market-2").unwrap(), 30_000.0, &profile());
        assert_eq!(mm.rate, 0.045);
        assert_relative_eq!(
            mm.projected_value,
            project_money_market(30_000.0, 0.045, 3),
            epsilon = 1e-9
        );

        let life = engine.project(catalog.get("life-insurance-1").unwrap(), 10_000.0, &profile());
        assert_relative_eq!(life.rate, 0.04, epsilon = 1e-12);
    }

    #[test]
    fn test_flat_money_market_basis() {
        let catalog = ProductCatalog::builtin();
        let engine = ProjectionEngine::new(ProjectionConfig {
            money_market_basis: MoneyMarketBasis::FlatThirtyYear,
            ..ProjectionConfig::default()
        });

        let mm = engine.project(catalog.get("money-market-1").unwrap(), 10_000.0, &profile());
        assert_relative_eq!(mm.projected_value, 10_000.0 * 1.042_f64.powi(30), epsilon = 1e-6);
    }

    #[test]
    fn test_catalog_cd_for_bucket_term() {
        let catalog = ProductCatalog::builtin();
        let engine = ProjectionEngine::default();
        let cd = catalog.cds().next().unwrap();

        let quoted = engine.project_cd_term(cd, 20_000.0, 6).unwrap();
        assert_eq!(quoted.rate, 0.045);
        assert!(engine.project_cd_term(cd, 20_000.0, 36).is_none());
    }

    #[test]
    fn test_growth_series_end_matches_projection() {
        let catalog = ProductCatalog::builtin();
        let engine = ProjectionEngine::default();

        let mm = catalog.get("money-market-3").unwrap();
        let series = engine.growth_series(mm, 60_000.0, &profile());
        assert_eq!(series.len(), 61);
        assert_relative_eq!(
            series.last_value().unwrap(),
            engine.project(mm, 60_000.0, &profile()).projected_value,
            epsilon = 1e-6
        );

        let life = catalog.get("life-insurance-2").unwrap();
        let series = engine.growth_series(life, 10_000.0, &profile());
        assert_eq!(series.interval, SamplingInterval::Year);
        assert_eq!(series.len(), 31);
    }

    #[test]
    fn test_flat_basis_series_ends_at_card_value() {
        let catalog = ProductCatalog::builtin();
        let engine = ProjectionEngine::new(ProjectionConfig {
            money_market_basis: MoneyMarketBasis::FlatThirtyYear,
            ..ProjectionConfig::default()
        });

        let mm = catalog.get("money-market-1").unwrap();
        let series = engine.growth_series(mm, 10_000.0, &profile());
        assert_eq!(series.interval, SamplingInterval::Year);
        assert_eq!(series.len(), FLAT_MONEY_MARKET_YEARS as usize + 1);
        assert_relative_eq!(
            series.last_value().unwrap(),
            engine.project(mm, 10_000.0, &profile()).projected_value,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_huge_annuity_term_does_not_wrap() {
        let value = project_annuity(1_000.0, 0.01, u32::MAX, 0.0);
        assert!(value > 1_000.0);
    }

    #[test]
    fn test_annuity_series_excludes_bonus() {
        let product = Product::Annuity(AnnuityProduct {
            id: "a".into(),
            carrier: "Carrier".into(),
            name: "Test Annuity".into(),
            term_type: TermType::Long,
            term_years: 5,
            initial_rate: 0.05,
            bonus_rate: 0.10,
            guarantee_period: None,
            rate_grid: None,
        });
        let engine = ProjectionEngine::default();

        let series = engine.growth_series(&product, 1_000.0, &profile());
        assert_relative_eq!(
            series.last_value().unwrap(),
            1_000.0 * 1.04_f64.powi(5),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_config_defaults_from_json() {
        let config: ProjectionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ProjectionConfig::default());

        let config: ProjectionConfig =
            serde_json::from_str(r#"{"moneyMarketBasis": "flatThirtyYear"}"#).unwrap();
        assert_eq!(config.money_market_basis, MoneyMarketBasis::FlatThirtyYear);
        assert_eq!(config.life_insurance_years, 30);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_annuity_decomposes(
            investment in 0.0f64..2_000_000.0,
            rate in 0.0f64..0.1,
            years in 0u32..40,
            bonus in 0.0f64..0.2,
        ) {
            let total = project_annuity(investment, rate, years, bonus);
            let base = investment * (1.0 + rate).powi(years as i32);
            prop_assert!((total - base - investment * bonus).abs() <= 1e-6 * total.max(1.0));
        }

        #[test]
        fn prop_positive_rate_grows(investment in 1.0f64..1e7, rate in 0.001f64..0.1, months in 1u32..360) {
            prop_assert!(project_cd(investment, rate, months) > investment);
            prop_assert!(project_money_market(investment, rate, months / 12 + 1) > investment);
        }
    }
}
