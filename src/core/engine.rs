use super::types::{
    CompensationParameters, ExitValuation, PROJECTION_YEARS, Projection, TaxBreakdown, YearRecord,
};

/// Gains strictly above this amount fall into the upper federal tier.
pub const CAPITAL_GAINS_UPPER_TIER_THRESHOLD: f64 = 500_000.0;
pub const FEDERAL_CAPITAL_GAINS_LOWER_RATE: f64 = 0.15;
pub const FEDERAL_CAPITAL_GAINS_UPPER_RATE: f64 = 0.20;
pub const STATE_CAPITAL_GAINS_RATE: f64 = 0.0882;

pub fn income_tax(income: f64, params: &CompensationParameters) -> TaxBreakdown {
    if !params.include_tax {
        return untaxed(income);
    }

    let tax = income * params.combined_income_tax_rate();
    let effective_rate = if income > 0.0 {
        nan_to_zero(tax / income * 100.0)
    } else {
        0.0
    };

    TaxBreakdown {
        tax: nan_to_zero(tax),
        net: nan_to_zero(income - tax),
        effective_rate,
    }
}

pub fn capital_gains_tax(gain: f64, params: &CompensationParameters) -> TaxBreakdown {
    if !params.include_tax {
        return untaxed(gain);
    }

    let total_rate = federal_capital_gains_rate(gain) + STATE_CAPITAL_GAINS_RATE;
    let tax = gain * total_rate;

    TaxBreakdown {
        tax: nan_to_zero(tax),
        net: nan_to_zero(gain - tax),
        effective_rate: nan_to_zero(total_rate * 100.0),
    }
}

/// Builds the ten-year schedule and the exit valuation in one pass.
///
/// A `vesting_years` of zero means nothing vests: every year carries zero
/// equity. The exit valuation still reflects the full grant.
pub fn build_projection(params: &CompensationParameters) -> Projection {
    let equity_value = params.equity_value();
    let yearly_equity = yearly_vested_equity(equity_value, params.vesting_years);

    let mut yearly_schedule = Vec::with_capacity(PROJECTION_YEARS as usize);
    let mut running_net = 0.0;
    for year in 1..=PROJECTION_YEARS {
        let equity = if year <= params.vesting_years {
            yearly_equity
        } else {
            0.0
        };
        let gross_total = params.base_salary + equity;
        let taxes = income_tax(gross_total, params);
        running_net += taxes.net;

        yearly_schedule.push(YearRecord {
            year,
            base: params.base_salary,
            equity,
            gross_total,
            tax: taxes.tax,
            net_total: taxes.net,
            effective_tax_rate: taxes.effective_rate,
            cumulative_net_total: running_net,
        });
    }

    let gross_exit_value = equity_value * params.exit_multiple;
    let exit_taxes = capital_gains_tax(gross_exit_value, params);

    Projection {
        yearly_schedule,
        exit_valuation: ExitValuation {
            gross_exit_value,
            tax: exit_taxes.tax,
            net_exit_value: exit_taxes.net,
            effective_rate: exit_taxes.effective_rate,
        },
    }
}

fn federal_capital_gains_rate(gain: f64) -> f64 {
    if gain > CAPITAL_GAINS_UPPER_TIER_THRESHOLD {
        FEDERAL_CAPITAL_GAINS_UPPER_RATE
    } else {
        FEDERAL_CAPITAL_GAINS_LOWER_RATE
    }
}

fn yearly_vested_equity(equity_value: f64, vesting_years: u32) -> f64 {
    if vesting_years == 0 {
        return 0.0;
    }
    nan_to_zero(equity_value / vesting_years as f64)
}

fn untaxed(amount: f64) -> TaxBreakdown {
    TaxBreakdown {
        tax: 0.0,
        net: amount,
        effective_rate: 0.0,
    }
}

fn nan_to_zero(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value }
}
