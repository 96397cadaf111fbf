use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompoundFrequency {
    Daily,
    Monthly,
    Quarterly,
    Annually,
}

impl CompoundFrequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            CompoundFrequency::Daily => 365,
            CompoundFrequency::Monthly => 12,
            CompoundFrequency::Quarterly => 4,
            CompoundFrequency::Annually => 1,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundInputs {
    pub initial_investment: f64,
    pub monthly_contribution: f64,
    pub annual_return_rate: f64,
    pub time_horizon_years: u32,
    pub contribution_increase_rate: f64,
    pub compound_frequency: CompoundFrequency,
    pub tax_drag_enabled: bool,
    pub capital_gains_rate: f64,
    pub inflation_enabled: bool,
    pub inflation_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundYearEntry {
    pub year: u32,
    pub contributions: f64,
    pub total_contributions: f64,
    pub earnings: f64,
    pub total_earnings: f64,
    pub balance: f64,
    pub inflation_adjusted_balance: Option<f64>,
    pub tax_drag_balance: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundMilestone {
    pub amount: f64,
    pub label: &'static str,
    pub year: Option<u32>,
    pub month: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundScenario {
    pub label: &'static str,
    pub return_rate: f64,
    pub final_balance: f64,
    pub total_contributions: f64,
    pub total_earnings: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundResult {
    pub yearly_data: Vec<CompoundYearEntry>,
    pub total_contributed: f64,
    pub total_earnings: f64,
    pub final_balance: f64,
    pub effective_growth_multiple: f64,
    pub milestones: Vec<CompoundMilestone>,
    pub scenarios: Vec<CompoundScenario>,
    pub inflation_adjusted_final: Option<f64>,
}

const MILESTONE_TARGETS: [(f64, &str); 6] = [
    (100_000.0, "$100K"),
    (250_000.0, "$250K"),
    (500_000.0, "$500K"),
    (1_000_000.0, "$1M"),
    (2_000_000.0, "$2M"),
    (5_000_000.0, "$5M"),
];

const SCENARIO_RATES: [(f64, &str); 3] = [
    (6.0, "Conservative (6%)"),
    (8.0, "Moderate (8%)"),
    (10.0, "Aggressive (10%)"),
];

pub fn compute(inputs: &CompoundInputs) -> CompoundResult {
    let yearly_data = build_yearly_data(inputs);
    let milestones = find_milestones(&yearly_data);
    let scenarios = build_scenarios(inputs);

    let last = yearly_data.last();
    let total_contributed = last.map_or(inputs.initial_investment, |e| e.total_contributions);
    let final_balance = last.map_or(inputs.initial_investment, |e| e.balance);
    let inflation_adjusted_final = if inputs.inflation_enabled {
        last.and_then(|e| e.inflation_adjusted_balance)
    } else {
        None
    };

    CompoundResult {
        total_contributed,
        total_earnings: final_balance - total_contributed,
        final_balance,
        effective_growth_multiple: if total_contributed > 0.0 {
            final_balance / total_contributed
        } else {
            0.0
        },
        milestones,
        scenarios,
        inflation_adjusted_final,
        yearly_data,
    }
}

pub fn default_inputs() -> CompoundInputs {
    CompoundInputs {
        initial_investment: 10_000.0,
        monthly_contribution: 500.0,
        annual_return_rate: 8.0,
        time_horizon_years: 30,
        contribution_increase_rate: 2.0,
        compound_frequency: CompoundFrequency::Monthly,
        tax_drag_enabled: false,
        capital_gains_rate: 15.0,
        inflation_enabled: false,
        inflation_rate: 3.0,
    }
}

fn build_yearly_data(inputs: &CompoundInputs) -> Vec<CompoundYearEntry> {
    let periods_per_year = inputs.compound_frequency.periods_per_year();
    let rate_per_period = inputs.annual_return_rate / 100.0 / periods_per_year as f64;
    let tax_rate = if inputs.tax_drag_enabled {
        inputs.capital_gains_rate / 100.0
    } else {
        0.0
    };

    let mut data = Vec::with_capacity(inputs.time_horizon_years as usize);
    let mut balance = inputs.initial_investment;
    let mut tax_drag_balance = inputs.initial_investment;
    let mut total_contributions = inputs.initial_investment;
    let mut monthly_contribution = inputs.monthly_contribution;

    for year in 1..=inputs.time_horizon_years {
        let year_start_balance = balance;

        if year > 1 && inputs.contribution_increase_rate > 0.0 {
            monthly_contribution *= 1.0 + inputs.contribution_increase_rate / 100.0;
        }

        let year_contributions = monthly_contribution * 12.0;
        let period_contribution = year_contributions / periods_per_year as f64;

        // Contributions are credited before growth within each period, so
        // same-period deposits earn that period's growth. Swapping the order
        // changes every downstream number.
        for _ in 0..periods_per_year {
            balance += period_contribution;
            balance += balance * rate_per_period;

            tax_drag_balance += period_contribution;
            let taxed_growth = tax_drag_balance * rate_per_period;
            tax_drag_balance += taxed_growth * (1.0 - tax_rate);
        }

        total_contributions += year_contributions;
        let total_earnings = balance - total_contributions;
        let year_earnings = balance - year_start_balance - year_contributions;

        let inflation_adjusted_balance = if inputs.inflation_enabled {
            let factor = (1.0 + inputs.inflation_rate / 100.0).powi(year as i32);
            Some(balance / factor)
        } else {
            None
        };

        data.push(CompoundYearEntry {
            year,
            contributions: year_contributions,
            total_contributions,
            earnings: year_earnings,
            total_earnings,
            balance,
            inflation_adjusted_balance,
            tax_drag_balance: if inputs.tax_drag_enabled {
                Some(tax_drag_balance)
            } else {
                None
            },
        });
    }

    data
}

fn find_milestones(data: &[CompoundYearEntry]) -> Vec<CompoundMilestone> {
    MILESTONE_TARGETS
        .iter()
        .map(|&(amount, label)| {
            let hit = data.iter().find(|e| e.balance >= amount);
            CompoundMilestone {
                amount,
                label,
                year: hit.map(|e| e.year),
                month: hit.map(|e| e.year * 12),
            }
        })
        .collect()
}

fn build_scenarios(inputs: &CompoundInputs) -> Vec<CompoundScenario> {
    SCENARIO_RATES
        .iter()
        .map(|&(rate, label)| {
            let mut modified = inputs.clone();
            modified.annual_return_rate = rate;
            modified.inflation_enabled = false;
            modified.tax_drag_enabled = false;

            let data = build_yearly_data(&modified);
            let final_balance = data.last().map_or(inputs.initial_investment, |e| e.balance);
            let total_contributions = data
                .last()
                .map_or(inputs.initial_investment, |e| e.total_contributions);

            CompoundScenario {
                label,
                return_rate: rate,
                final_balance,
                total_contributions,
                total_earnings: final_balance - total_contributions,
            }
        })
        .collect()
}
