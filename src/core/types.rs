use serde::Serialize;

/// Number of years covered by every yearly schedule.
pub const PROJECTION_YEARS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompensationParameters {
    pub base_salary: f64,
    /// Fraction of the company granted, 0.1 for 10%.
    pub equity_percentage: f64,
    pub vesting_years: u32,
    pub company_value: f64,
    pub exit_multiple: f64,
    pub include_tax: bool,
    pub federal_tax_rate: f64,
    pub state_tax_rate: f64,
    pub city_tax_rate: f64,
}

impl Default for CompensationParameters {
    fn default() -> Self {
        Self {
            base_salary: 120_000.0,
            equity_percentage: 0.1,
            vesting_years: 4,
            company_value: 10_000_000.0,
            exit_multiple: 2.0,
            include_tax: true,
            federal_tax_rate: 0.35,
            state_tax_rate: 0.0685,
            city_tax_rate: 0.03876,
        }
    }
}

impl CompensationParameters {
    pub fn equity_value(&self) -> f64 {
        self.company_value * self.equity_percentage
    }

    pub fn combined_income_tax_rate(&self) -> f64 {
        self.federal_tax_rate + self.state_tax_rate + self.city_tax_rate
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBreakdown {
    pub tax: f64,
    pub net: f64,
    /// Percent, 45.7 rather than 0.457.
    pub effective_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRecord {
    pub year: u32,
    pub base: f64,
    pub equity: f64,
    pub gross_total: f64,
    pub tax: f64,
    pub net_total: f64,
    pub effective_tax_rate: f64,
    pub cumulative_net_total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitValuation {
    pub gross_exit_value: f64,
    pub tax: f64,
    pub net_exit_value: f64,
    pub effective_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub yearly_schedule: Vec<YearRecord>,
    pub exit_valuation: ExitValuation,
}
