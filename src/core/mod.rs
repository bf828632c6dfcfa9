mod engine;
mod types;

pub use engine::{
    CAPITAL_GAINS_UPPER_TIER_THRESHOLD, FEDERAL_CAPITAL_GAINS_LOWER_RATE,
    FEDERAL_CAPITAL_GAINS_UPPER_RATE, STATE_CAPITAL_GAINS_RATE, build_projection,
    capital_gains_tax, income_tax,
};
pub use types::{
    CompensationParameters, ExitValuation, PROJECTION_YEARS, Projection, TaxBreakdown, YearRecord,
};
