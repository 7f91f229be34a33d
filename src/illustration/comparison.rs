//! Product comparison: selection toggling and chart series

use super::{CardSource, Illustrator, ProductCard};
use crate::catalog::{Product, ProductKind};
use crate::customer::{HorizonBucket, IllustrationInputs};
use crate::projection::{resolve_rate_for_term, ChartLine, GrowthSeries, DEFAULT_RATE};
use log::warn;

/// Cards picked for comparison, in selection order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonSet {
    cards: Vec<ProductCard>,
}

impl ComparisonSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a card, or deselect it if already selected
    ///
    /// Returns whether the card is selected afterwards.
    pub fn toggle(&mut self, card: &ProductCard) -> bool {
        if let Some(pos) = self.cards.iter().position(|c| c.card_id == card.card_id) {
            self.cards.remove(pos);
            false
        } else {
            self.cards.push(card.clone());
            true
        }
    }

    pub fn contains(&self, card_id: &str) -> bool {
        self.cards.iter().any(|c| c.card_id == card_id)
    }

    pub fn cards(&self) -> &[ProductCard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

/// Bucket whose amount a compared product is illustrated with
///
/// Banking products follow the active tab (the never tab falls back to
/// long-term); annuities always use long-term, life insurance never.
pub fn comparison_bucket(kind: ProductKind, active: HorizonBucket) -> HorizonBucket {
    match kind {
        ProductKind::Cd | ProductKind::MoneyMarket => match active {
            HorizonBucket::Never => HorizonBucket::Long,
            bucket => bucket,
        },
        ProductKind::Annuity => HorizonBucket::Long,
        ProductKind::LifeInsurance => HorizonBucket::Never,
    }
}

impl Illustrator {
    /// One chart line per selected card
    ///
    /// Cards whose catalog product no longer exists are skipped.
    pub fn comparison_series(
        &self,
        inputs: &IllustrationInputs,
        selection: &ComparisonSet,
        active: HorizonBucket,
    ) -> Vec<ChartLine> {
        selection
            .cards()
            .iter()
            .filter_map(|card| {
                let bucket = comparison_bucket(card.kind, active);
                let investment = inputs.allocation.amount(bucket);
                let series = self.card_series(card, investment, inputs)?;
                Some(ChartLine {
                    label: card.label.clone(),
                    series,
                })
            })
            .collect()
    }

    fn card_series(
        &self,
        card: &ProductCard,
        investment: f64,
        inputs: &IllustrationInputs,
    ) -> Option<GrowthSeries> {
        let engine = self.engine();
        match &card.source {
            CardSource::Catalog { product_id } => {
                let Some(product) = self.catalog().get(product_id) else {
                    warn!("Compared product {} is not in the catalog", product_id);
                    return None;
                };
                Some(engine.growth_series(product, investment, &inputs.profile))
            }
            CardSource::CatalogCdTerm {
                product_id,
                term_months,
            } => match self.catalog().get(product_id) {
                Some(Product::Cd(cd)) => {
                    let rate = cd
                        .rate_grid
                        .as_ref()
                        .map(|grid| resolve_rate_for_term(investment, grid, *term_months))
                        .unwrap_or(DEFAULT_RATE);
                    Some(engine.cd_quote_series(investment, *term_months, rate))
                }
                _ => {
                    warn!("Compared CD {} is not in the catalog", product_id);
                    None
                }
            },
            CardSource::StandardCd(quote) => {
                Some(engine.cd_quote_series(investment, quote.term_months, quote.rate))
            }
            CardSource::WholeLife => Some(engine.life_series(investment, &inputs.profile)),
        }
    }
}
