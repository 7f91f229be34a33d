//! Projection engine: rate resolution, return projection and growth series

mod engine;
mod rates;
mod results;
mod series;

pub use engine::{
    project_annuity, project_cd, project_life_insurance, project_money_market,
    project_money_market_flat, LifeInsuranceRate, MoneyMarketBasis, ProjectionConfig,
    ProjectionEngine, FLAT_MONEY_MARKET_YEARS, LIFE_INSURANCE_BASE_RATE,
    LIFE_INSURANCE_HORIZON_YEARS,
};
pub use rates::{resolve_grid_rate, resolve_rate, resolve_rate_for_term, DEFAULT_RATE};
pub use results::ProjectionResult;
pub use series::{
    align_series, generate_series, line_end_index, ChartLine, ChartRow, GrowthPoint, GrowthSeries,
    SamplingInterval,
};
