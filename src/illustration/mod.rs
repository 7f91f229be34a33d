//! Illustration assembly for one customer
//!
//! An [`Illustrator`] holds a catalog and configuration, then turns
//! [`IllustrationInputs`] into one tab of product cards per horizon bucket
//! plus the investment summary. Building the catalog once and sharing the
//! illustrator across many customers is cheap: illustrations never mutate it.

mod comparison;
mod config;

pub use comparison::{comparison_bucket, ComparisonSet};
pub use config::{CdQuote, IllustrationConfig, StandardCdQuotes};

use crate::catalog::{CdProduct, Product, ProductCatalog, ProductKind, TermType};
use crate::customer::{CustomerProfile, HorizonBucket, IllustrationInputs};
use crate::projection::{LifeInsuranceRate, ProjectionEngine, ProjectionResult};
use serde::Serialize;

/// Card id of the profile-driven whole-life illustration
pub const WHOLE_LIFE_CARD_ID: &str = "whole-life";

/// Where a card's numbers come from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "camelCase")]
pub enum CardSource {
    /// A catalog product at its own terms
    Catalog { product_id: String },
    /// A catalog CD quoted for a tab's standard term
    CatalogCdTerm { product_id: String, term_months: u32 },
    /// A standard fixed-rate CD quote
    StandardCd(CdQuote),
    /// Whole life insurance driven by the customer profile
    WholeLife,
}

/// One product card on a results tab
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    /// Stable id used for comparison selection
    pub card_id: String,
    pub label: String,
    pub kind: ProductKind,
    /// Corner badge (`CD`, `Short`, `Annuity`, `Life`)
    pub badge: &'static str,
    /// Term circle (`12m`, `10y`, `Life`)
    pub term_label: String,
    pub source: CardSource,
    pub result: ProjectionResult,
    /// Itemized rate for the life insurance details view
    #[serde(skip_serializing_if = "Option::is_none")]
    pub life_rate: Option<LifeInsuranceRate>,
}

/// One results tab
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketIllustration {
    pub bucket: HorizonBucket,
    pub heading: &'static str,
    pub investment: f64,
    pub cards: Vec<ProductCard>,
}

/// Totals shown under the tabs
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IllustrationSummary {
    pub total_investment: f64,
    /// Short CD quote + intermediate CD quote + every annuity on the
    /// long-term amount + whole life on the never amount
    pub total_return: f64,
    pub total_growth: f64,
}

/// Full results screen for one customer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Illustration {
    pub inputs: IllustrationInputs,
    pub tabs: Vec<BucketIllustration>,
    pub summary: IllustrationSummary,
}

impl Illustration {
    pub fn tab(&self, bucket: HorizonBucket) -> Option<&BucketIllustration> {
        self.tabs.iter().find(|t| t.bucket == bucket)
    }

    /// Find a card on any tab
    pub fn card(&self, card_id: &str) -> Option<&ProductCard> {
        self.tabs
            .iter()
            .flat_map(|t| t.cards.iter())
            .find(|c| c.card_id == card_id)
    }
}

/// Builds illustrations against a fixed catalog
#[derive(Debug, Clone)]
pub struct Illustrator {
    catalog: ProductCatalog,
    config: IllustrationConfig,
    engine: ProjectionEngine,
}

impl Illustrator {
    pub fn new(catalog: ProductCatalog, config: IllustrationConfig) -> Self {
        let engine = ProjectionEngine::new(config.projection.clone());
        Self {
            catalog,
            config,
            engine,
        }
    }

    /// Illustrator over the reference catalog with default configuration
    pub fn with_builtin_catalog() -> Self {
        Self::new(ProductCatalog::builtin(), IllustrationConfig::default())
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &IllustrationConfig {
        &self.config
    }

    pub fn engine(&self) -> &ProjectionEngine {
        &self.engine
    }

    /// Build every tab and the summary for one customer
    pub fn illustrate(&self, inputs: &IllustrationInputs) -> Illustration {
        let tabs = HorizonBucket::ALL
            .iter()
            .map(|&bucket| self.illustrate_bucket(bucket, inputs))
            .collect();

        Illustration {
            inputs: *inputs,
            tabs,
            summary: self.summary(inputs),
        }
    }

    /// Build the cards of a single tab
    pub fn illustrate_bucket(
        &self,
        bucket: HorizonBucket,
        inputs: &IllustrationInputs,
    ) -> BucketIllustration {
        let investment = inputs.allocation.amount(bucket);
        let profile = &inputs.profile;

        let cards = match term_type_for(bucket) {
            None => vec![self.whole_life_card(investment, profile)],
            Some(term_type) => {
                let mut cards: Vec<ProductCard> = self
                    .catalog
                    .products()
                    .iter()
                    .filter(|p| matches!(p, Product::MoneyMarket(mm) if mm.term_type == term_type))
                    .map(|p| self.catalog_card(p, investment, profile))
                    .collect();

                if let Some(quote) = self.config.cd_quotes.for_bucket(bucket) {
                    cards.extend(
                        self.catalog
                            .cds()
                            .filter_map(|cd| {
                                self.catalog_cd_card(cd, investment, quote.term_months, profile)
                            }),
                    );
                    cards.push(self.standard_cd_card(quote, investment));
                }

                if bucket == HorizonBucket::Long {
                    cards.extend(
                        self.catalog
                            .of_kind(ProductKind::Annuity)
                            .map(|p| self.catalog_card(p, investment, profile)),
                    );
                }
                cards
            }
        };

        BucketIllustration {
            bucket,
            heading: bucket.heading(),
            investment,
            cards,
        }
    }

    /// Total investment, return and growth across all buckets
    pub fn summary(&self, inputs: &IllustrationInputs) -> IllustrationSummary {
        let allocation = &inputs.allocation;
        let quotes = &self.config.cd_quotes;
        let long_term = allocation.long_term;

        let short = self
            .engine
            .project_cd_quote(allocation.short_term, quotes.short.term_months, quotes.short.rate);
        let intermediate = self.engine.project_cd_quote(
            allocation.intermediate,
            quotes.intermediate.term_months,
            quotes.intermediate.rate,
        );
        let annuities: f64 = self
            .catalog
            .of_kind(ProductKind::Annuity)
            .map(|p| self.engine.project(p, long_term, &inputs.profile).projected_value)
            .sum();
        let life = self.engine.project_life(allocation.never, &inputs.profile);

        let total_investment = allocation.total();
        let total_return =
            short.projected_value + intermediate.projected_value + annuities + life.projected_value;

        IllustrationSummary {
            total_investment,
            total_return,
            total_growth: total_return - total_investment,
        }
    }

    fn catalog_card(
        &self,
        product: &Product,
        investment: f64,
        profile: &CustomerProfile,
    ) -> ProductCard {
        ProductCard {
            card_id: product.id().to_string(),
            label: product.name().to_string(),
            kind: product.kind(),
            badge: product.badge(),
            term_label: product.term_label(),
            source: CardSource::Catalog {
                product_id: product.id().to_string(),
            },
            result: self.engine.project(product, investment, profile),
            life_rate: None,
        }
    }

    /// A catalog CD shown on a tab, if it quotes the tab's term
    fn catalog_cd_card(
        &self,
        cd: &CdProduct,
        investment: f64,
        term_months: u32,
        profile: &CustomerProfile,
    ) -> Option<ProductCard> {
        if let Some(result) = self.engine.project_cd_term(cd, investment, term_months) {
            let card_id = if term_months == cd.term_months {
                cd.id.clone()
            } else {
                format!("{}-{}m", cd.id, term_months)
            };
            return Some(ProductCard {
                card_id,
                label: cd.name.clone(),
                kind: ProductKind::Cd,
                badge: "CD",
                term_label: format!("{}m", term_months),
                source: CardSource::CatalogCdTerm {
                    product_id: cd.id.clone(),
                    term_months,
                },
                result,
                life_rate: None,
            });
        }

        // Untagged grid: only shown at the CD's own term
        if cd.term_months != term_months {
            return None;
        }
        let product = self.catalog.get(&cd.id)?;
        Some(self.catalog_card(product, investment, profile))
    }

    fn standard_cd_card(&self, quote: CdQuote, investment: f64) -> ProductCard {
        ProductCard {
            card_id: quote.card_id(),
            label: ProductKind::Cd.label().to_string(),
            kind: ProductKind::Cd,
            badge: "CD",
            term_label: format!("{}m", quote.term_months),
            source: CardSource::StandardCd(quote),
            result: self
                .engine
                .project_cd_quote(investment, quote.term_months, quote.rate),
            life_rate: None,
        }
    }

    fn whole_life_card(&self, investment: f64, profile: &CustomerProfile) -> ProductCard {
        ProductCard {
            card_id: WHOLE_LIFE_CARD_ID.to_string(),
            label: ProductKind::LifeInsurance.label().to_string(),
            kind: ProductKind::LifeInsurance,
            badge: "Life",
            term_label: "Life".to_string(),
            source: CardSource::WholeLife,
            result: self.engine.project_life(investment, profile),
            life_rate: Some(LifeInsuranceRate::for_profile(profile)),
        }
    }
}

impl Default for Illustrator {
    fn default() -> Self {
        Self::with_builtin_catalog()
    }
}

/// Money market term type offered on a banking tab
fn term_type_for(bucket: HorizonBucket) -> Option<TermType> {
    match bucket {
        HorizonBucket::Short => Some(TermType::Short),
        HorizonBucket::Intermediate => Some(TermType::Intermediate),
        HorizonBucket::Long => Some(TermType::Long),
        HorizonBucket::Never => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::{Allocation, Gender, TobaccoUse};
    use approx::assert_relative_eq;

    fn inputs() -> IllustrationInputs {
        IllustrationInputs {
            profile: CustomerProfile::new(25, Gender::Female, TobaccoUse::No),
            allocation: Allocation::new(10_000.0, 20_000.0, 100_000.0, 10_000.0),
        }
    }

    fn card_ids(tab: &BucketIllustration) -> Vec<&str> {
        tab.cards.iter().map(|c| c.card_id.as_str()).collect()
    }

    #[test]
    fn test_tab_contents() {
        let illustration = Illustrator::default().illustrate(&inputs());

        assert_eq!(illustration.tabs.len(), 4);
        assert_eq!(
            card_ids(illustration.tab(HorizonBucket::Short).unwrap()),
            vec!["money-market-1", "cd-1", "standard-cd-12m"]
        );
        assert_eq!(
            card_ids(illustration.tab(HorizonBucket::Intermediate).unwrap()),
            vec!["money-market-2", "standard-cd-36m"]
        );
        assert_eq!(
            card_ids(illustration.tab(HorizonBucket::Long).unwrap()),
            vec![
                "money-market-3",
                "standard-cd-60m",
                "annuity-1",
                "annuity-2",
                "annuity-3",
                "annuity-4"
            ]
        );
        assert_eq!(
            card_ids(illustration.tab(HorizonBucket::Never).unwrap()),
            vec![WHOLE_LIFE_CARD_ID]
        );
    }

    #[test]
    fn test_card_labels_and_values() {
        let illustration = Illustrator::default().illustrate(&inputs());

        let cd = illustration.card("standard-cd-12m").unwrap();
        assert_eq!(cd.term_label, "12m");
        assert_eq!(cd.badge, "CD");
        assert_relative_eq!(cd.result.projected_value, 10_400.0, epsilon = 1e-9);

        let mm = illustration.card("money-market-2").unwrap();
        assert_eq!(mm.term_label, "3y");
        assert_eq!(mm.badge, "Intermediate");
        assert_eq!(mm.result.investment, 20_000.0);
        assert_eq!(mm.result.rate, 0.038);

        let annuity = illustration.card("annuity-1").unwrap();
        assert_eq!(annuity.term_label, "10y");
        assert_eq!(annuity.result.investment, 100_000.0);

        let premium_cd = illustration.card("cd-1").unwrap();
        assert_eq!(premium_cd.result.rate, 0.05);
    }

    #[test]
    fn test_whole_life_card_itemizes_rate() {
        let illustration = Illustrator::default().illustrate(&inputs());
        let life = illustration.card(WHOLE_LIFE_CARD_ID).unwrap();

        let rate = life.life_rate.unwrap();
        assert_eq!(rate.base, 0.04);
        assert_eq!(rate.age_adjustment, 0.01);
        assert_eq!(rate.gender_adjustment, 0.005);
        assert_relative_eq!(life.result.projected_value, 49_839.512884, epsilon = 1e-4);
    }

    #[test]
    fn test_summary_totals() {
        let illustrator = Illustrator::default();
        let inputs = inputs();
        let summary = illustrator.summary(&inputs);

        let annuities: f64 = [
            (0.04, 10, 0.01),
            (0.04, 15, 0.015),
            (0.038, 20, 0.02),
            (0.04, 25, 0.025),
        ]
        .iter()
        .map(|&(rate, years, bonus): &(f64, i32, f64)| {
            100_000.0 * (1.0 + rate).powi(years) + 100_000.0 * bonus
        })
        .sum();
        let expected = 10_000.0 * 1.04
            + 20_000.0 * 1.045_f64.powi(3)
            + annuities
            + 10_000.0 * 1.055_f64.powi(30);

        assert_eq!(summary.total_investment, 140_000.0);
        assert_relative_eq!(summary.total_return, expected, epsilon = 1e-6);
        assert_relative_eq!(summary.total_growth, expected - 140_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_allocation() {
        let inputs = IllustrationInputs {
            profile: CustomerProfile::new(40, Gender::Male, TobaccoUse::No),
            allocation: Allocation::default(),
        };
        let summary = Illustrator::default().summary(&inputs);

        assert_eq!(summary.total_investment, 0.0);
        assert_eq!(summary.total_return, 0.0);
        assert_eq!(summary.total_growth, 0.0);
    }

    #[test]
    fn test_empty_catalog_still_quotes_standard_cds() {
        let illustrator = Illustrator::new(ProductCatalog::default(), IllustrationConfig::default());
        let illustration = illustrator.illustrate(&inputs());

        assert_eq!(
            card_ids(illustration.tab(HorizonBucket::Long).unwrap()),
            vec!["standard-cd-60m"]
        );
    }
}
