//! Reference product catalog used when no catalog file is supplied

use super::product::{
    AnnuityProduct, CdProduct, LifeInsuranceProduct, MoneyMarketProduct, Product, RateBand,
    RateGrid, TermType, UnderwritingRate,
};
use crate::customer::{Gender, TobaccoUse};

fn band(min: f64, max: f64, rate: f64) -> RateBand {
    RateBand::new(min, Some(max), rate)
}

/// `(term_years, initial_rate, bonus_rate, guarantee_period)`
type AnnuityTerms = (u32, f64, f64, u32);

fn annuity(
    id: &str,
    carrier: &str,
    name: &str,
    terms: AnnuityTerms,
    bands: Vec<RateBand>,
) -> Product {
    let (term_years, initial_rate, bonus_rate, guarantee_period) = terms;
    Product::Annuity(AnnuityProduct {
        id: id.to_string(),
        carrier: carrier.to_string(),
        name: name.to_string(),
        term_type: TermType::Long,
        term_years,
        initial_rate,
        bonus_rate,
        guarantee_period: Some(guarantee_period),
        rate_grid: Some(RateGrid::new(bands)),
    })
}

fn money_market(
    id: &str,
    institution: &str,
    name: &str,
    term_type: TermType,
    base_rate: Option<f64>,
    minimum_balance: Option<f64>,
    bands: Vec<RateBand>,
) -> Product {
    Product::MoneyMarket(MoneyMarketProduct {
        id: id.to_string(),
        institution: institution.to_string(),
        name: name.to_string(),
        term_type,
        base_rate,
        minimum_balance,
        rate_grid: Some(RateGrid::new(bands)),
    })
}

fn underwriting(rows: &[(u32, Gender, TobaccoUse, f64)]) -> Vec<UnderwritingRate> {
    rows.iter()
        .map(|&(age, gender, tobacco_use, rate)| UnderwritingRate {
            age,
            gender,
            tobacco_use,
            rate,
        })
        .collect()
}

/// CD grid quoted for 3, 6 and 12 month terms
fn premium_cd_grid() -> RateGrid {
    let mut bands = Vec::new();
    for (term, rates) in [
        (3, [0.035, 0.04, 0.042]),
        (6, [0.04, 0.045, 0.047]),
        (12, [0.045, 0.05, 0.052]),
    ] {
        bands.push(band(0.0, 9_999.0, rates[0]).with_term(term));
        bands.push(band(10_000.0, 49_999.0, rates[1]).with_term(term));
        bands.push(band(50_000.0, 1_000_000.0, rates[2]).with_term(term));
    }
    RateGrid::new(bands)
}

/// The ten reference products
pub fn reference_products() -> Vec<Product> {
    use Gender::{Female, Male};
    use TobaccoUse::{No, Yes};

    vec![
        annuity(
            "annuity-1",
            "SecureLife",
            "Golden Nest Egg",
            (10, 0.035, 0.01, 5),
            vec![
                band(0.0, 49_999.0, 0.03),
                band(50_000.0, 99_999.0, 0.035),
                band(100_000.0, 1_000_000.0, 0.04),
            ],
        ),
        annuity(
            "annuity-2",
            "FutureGuard",
            "Silver Lining Plus",
            (15, 0.04, 0.015, 7),
            vec![
                band(0.0, 99_999.0, 0.035),
                band(100_000.0, 249_999.0, 0.04),
                band(250_000.0, 1_000_000.0, 0.045),
            ],
        ),
        annuity(
            "annuity-3",
            "WealthShield",
            "Platinum Legacy",
            (20, 0.042, 0.02, 10),
            vec![
                band(0.0, 249_999.0, 0.038),
                band(250_000.0, 499_999.0, 0.042),
                band(500_000.0, 1_000_000.0, 0.046),
            ],
        ),
        annuity(
            "annuity-4",
            "RetirementPlus",
            "Diamond Horizon",
            (25, 0.045, 0.025, 12),
            vec![
                band(0.0, 499_999.0, 0.04),
                band(500_000.0, 999_999.0, 0.045),
                band(1_000_000.0, 2_000_000.0, 0.05),
            ],
        ),
        Product::Cd(CdProduct {
            id: "cd-1".to_string(),
            institution: "SecureBank".to_string(),
            name: "Premium CD".to_string(),
            term_type: TermType::Short,
            term_months: 12,
            rate_grid: Some(premium_cd_grid()),
        }),
        money_market(
            "money-market-1",
            "SecureBank",
            "Premium Money Market",
            TermType::Short,
            None,
            None,
            vec![
                band(0.0, 9_999.0, 0.035),
                band(10_000.0, 49_999.0, 0.042),
                band(50_000.0, 99_999.0, 0.045),
                band(100_000.0, 1_000_000.0, 0.048),
            ],
        ),
        money_market(
            "money-market-2",
            "WealthGuard",
            "Enhanced Money Market",
            TermType::Intermediate,
            Some(0.045),
            Some(25_000.0),
            vec![
                band(0.0, 24_999.0, 0.038),
                band(25_000.0, 99_999.0, 0.045),
                band(100_000.0, 249_999.0, 0.048),
                band(250_000.0, 1_000_000.0, 0.051),
            ],
        ),
        money_market(
            "money-market-3",
            "FutureGrowth",
            "Elite Money Market",
            TermType::Long,
            Some(0.048),
            Some(50_000.0),
            vec![
                band(0.0, 49_999.0, 0.042),
                band(50_000.0, 249_999.0, 0.048),
                band(250_000.0, 499_999.0, 0.051),
                band(500_000.0, 1_000_000.0, 0.054),
            ],
        ),
        Product::LifeInsurance(LifeInsuranceProduct {
            id: "life-insurance-1".to_string(),
            carrier: "SecureLife".to_string(),
            name: "Whole Life Plus".to_string(),
            term_type: TermType::Long,
            underwriting: underwriting(&[
                (30, Male, No, 0.04),
                (30, Male, Yes, 0.06),
                (30, Female, No, 0.035),
                (30, Female, Yes, 0.055),
                (40, Male, No, 0.05),
                (40, Male, Yes, 0.07),
                (40, Female, No, 0.045),
                (40, Female, Yes, 0.065),
            ]),
        }),
        Product::LifeInsurance(LifeInsuranceProduct {
            id: "life-insurance-2".to_string(),
            carrier: "FutureGuard".to_string(),
            name: "Universal Life Elite".to_string(),
            term_type: TermType::Long,
            underwriting: underwriting(&[
                (30, Male, No, 0.045),
                (30, Male, Yes, 0.065),
                (30, Female, No, 0.04),
                (30, Female, Yes, 0.06),
                (40, Male, No, 0.055),
                (40, Male, Yes, 0.075),
                (40, Female, No, 0.05),
                (40, Female, Yes, 0.07),
            ]),
        }),
    ]
}
