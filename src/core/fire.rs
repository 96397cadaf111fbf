use rayon::prelude::*;
use serde::Serialize;

use super::rng::{Rng, derive_seed};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Accumulation,
    Retirement,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FireInputs {
    pub current_age: u32,
    pub retirement_age: u32,
    pub life_expectancy: u32,
    pub current_savings: f64,
    pub annual_income: f64,
    pub savings_rate: f64,
    pub expected_return_pre_retirement: f64,
    pub expected_return_post_retirement: f64,
    pub annual_spending_in_retirement: f64,
    pub social_security_monthly: f64,
    pub social_security_start_age: u32,
    pub inflation_rate: f64,
    pub tax_rate_in_retirement: f64,
    pub simulations: u32,
    pub seed: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FireYearEntry {
    pub age: u32,
    pub year: u32,
    pub savings: f64,
    pub contributions: f64,
    pub investment: f64,
    pub withdrawals: f64,
    pub social_security: f64,
    pub phase: Phase,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FireResult {
    pub fire_number: f64,
    pub yearly_projection: Vec<FireYearEntry>,
    pub years_to_fire: u32,
    pub required_savings_rate: f64,
    pub coast_fire_number: f64,
    pub coast_fire_age: Option<u32>,
    pub lean_fire_number: f64,
    pub fat_fire_number: f64,
    pub barista_fire_number: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Percentiles {
    pub p10: Vec<f64>,
    pub p25: Vec<f64>,
    pub p50: Vec<f64>,
    pub p75: Vec<f64>,
    pub p90: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonteCarloResult {
    pub ages: Vec<u32>,
    pub percentiles: Percentiles,
    pub success_rate: f64,
}

// 4% safe-withdrawal rule.
const FIRE_MULTIPLE: f64 = 25.0;
const LEAN_SPENDING_FACTOR: f64 = 0.7;
const FAT_SPENDING_FACTOR: f64 = 1.5;
const BARISTA_SPENDING_FACTOR: f64 = 0.5;
// Annual return volatility used by the Monte Carlo paths.
const RETURN_VOLATILITY: f64 = 0.15;

pub fn compute(inputs: &FireInputs) -> FireResult {
    let annual_spending = inputs.annual_spending_in_retirement;
    let fire_number = annual_spending * FIRE_MULTIPLE;
    let lean_fire_number = annual_spending * LEAN_SPENDING_FACTOR * FIRE_MULTIPLE;
    let fat_fire_number = annual_spending * FAT_SPENDING_FACTOR * FIRE_MULTIPLE;
    let barista_fire_number = annual_spending * BARISTA_SPENDING_FACTOR * FIRE_MULTIPLE;

    let yearly_projection = build_projection(inputs);

    let years_to_retirement = inputs.retirement_age.saturating_sub(inputs.current_age);
    let years_to_fire = yearly_projection
        .iter()
        .find(|e| e.phase == Phase::Accumulation && e.savings >= fire_number)
        .map_or(years_to_retirement, |e| e.age - inputs.current_age);

    let pre_return = inputs.expected_return_pre_retirement / 100.0;
    let coast_fire_number = fire_number / (1.0 + pre_return).powi(years_to_retirement as i32);

    let coast_fire_age = yearly_projection
        .iter()
        .filter(|e| e.phase == Phase::Accumulation)
        .find(|e| {
            let years_left = inputs.retirement_age.saturating_sub(e.age);
            e.savings * (1.0 + pre_return).powi(years_left as i32) >= fire_number
        })
        .map(|e| e.age);

    FireResult {
        fire_number,
        years_to_fire,
        required_savings_rate: required_savings_rate(inputs, fire_number),
        coast_fire_number,
        coast_fire_age,
        lean_fire_number,
        fat_fire_number,
        barista_fire_number,
        yearly_projection,
    }
}

pub fn default_inputs() -> FireInputs {
    FireInputs {
        current_age: 30,
        retirement_age: 55,
        life_expectancy: 90,
        current_savings: 50_000.0,
        annual_income: 100_000.0,
        savings_rate: 30.0,
        expected_return_pre_retirement: 8.0,
        expected_return_post_retirement: 5.0,
        annual_spending_in_retirement: 50_000.0,
        social_security_monthly: 2_000.0,
        social_security_start_age: 67,
        inflation_rate: 3.0,
        tax_rate_in_retirement: 20.0,
        simulations: 1_000,
        seed: 42,
    }
}

fn annual_savings(inputs: &FireInputs) -> f64 {
    inputs.annual_income * inputs.savings_rate / 100.0
}

fn net_withdrawal(inputs: &FireInputs, age: u32) -> (f64, f64) {
    let inflation_factor = (1.0 + inputs.inflation_rate / 100.0)
        .powi(age.saturating_sub(inputs.retirement_age) as i32);
    let adjusted_spending = inputs.annual_spending_in_retirement * inflation_factor;

    let social_security = if age >= inputs.social_security_start_age {
        inputs.social_security_monthly * 12.0
    } else {
        0.0
    };

    let gross = adjusted_spending / (1.0 - inputs.tax_rate_in_retirement / 100.0);
    ((gross - social_security).max(0.0), social_security)
}

fn build_projection(inputs: &FireInputs) -> Vec<FireYearEntry> {
    let mut projection = Vec::new();
    let mut savings = inputs.current_savings;
    let contributions_per_year = annual_savings(inputs);
    let pre_return = inputs.expected_return_pre_retirement / 100.0;
    let post_return = inputs.expected_return_post_retirement / 100.0;

    for age in inputs.current_age..=inputs.life_expectancy {
        let retired = age >= inputs.retirement_age;

        let mut contributions = 0.0;
        let mut withdrawals = 0.0;
        let mut social_security = 0.0;
        let investment;

        if retired {
            let (net, ss) = net_withdrawal(inputs, age);
            withdrawals = net;
            social_security = ss;
            investment = savings * post_return;
            savings += investment - withdrawals;
        } else {
            contributions = contributions_per_year;
            investment = savings * pre_return;
            savings += contributions + investment;
        }

        projection.push(FireYearEntry {
            age,
            year: age - inputs.current_age,
            savings: savings.max(0.0),
            contributions,
            investment,
            withdrawals,
            social_security,
            phase: if retired {
                Phase::Retirement
            } else {
                Phase::Accumulation
            },
        });

        if savings <= 0.0 && retired {
            // Money ran out; the remaining years stay at zero.
            for later_age in age + 1..=inputs.life_expectancy {
                let social_security = if later_age >= inputs.social_security_start_age {
                    inputs.social_security_monthly * 12.0
                } else {
                    0.0
                };
                projection.push(FireYearEntry {
                    age: later_age,
                    year: later_age - inputs.current_age,
                    savings: 0.0,
                    contributions: 0.0,
                    investment: 0.0,
                    withdrawals: 0.0,
                    social_security,
                    phase: Phase::Retirement,
                });
            }
            break;
        }
    }

    projection
}

fn required_savings_rate(inputs: &FireInputs, fire_number: f64) -> f64 {
    let r = inputs.expected_return_pre_retirement / 100.0;
    let n = inputs.retirement_age.saturating_sub(inputs.current_age);
    let fv_factor = if r > 0.0 {
        ((1.0 + r).powi(n as i32) - 1.0) / r
    } else {
        n as f64
    };
    let fv_current_savings = inputs.current_savings * (1.0 + r).powi(n as i32);
    let needed = fire_number - fv_current_savings;
    if needed <= 0.0 || inputs.annual_income <= 0.0 || fv_factor <= 0.0 {
        return 0.0;
    }
    let required_annual = needed / fv_factor;
    (required_annual / inputs.annual_income * 100.0).clamp(0.0, 100.0)
}

pub fn run_monte_carlo(inputs: &FireInputs) -> MonteCarloResult {
    let ages: Vec<u32> = (inputs.current_age..=inputs.life_expectancy).collect();
    if inputs.simulations == 0 || ages.is_empty() {
        return MonteCarloResult {
            ages,
            percentiles: Percentiles {
                p10: Vec::new(),
                p25: Vec::new(),
                p50: Vec::new(),
                p75: Vec::new(),
                p90: Vec::new(),
            },
            success_rate: 0.0,
        };
    }

    // Each path derives its own seed, so the fan-out is order-independent and
    // a fixed base seed reproduces identical results serial or parallel.
    let paths: Vec<Vec<f64>> = (0..inputs.simulations)
        .into_par_iter()
        .map(|path_id| {
            let mut rng = Rng::new(derive_seed(inputs.seed, path_id as u64));
            simulate_path(inputs, &mut rng)
        })
        .collect();

    let successes = paths
        .iter()
        .filter(|path| path.last().is_some_and(|&v| v > 0.0))
        .count();

    let mut percentiles = Percentiles {
        p10: Vec::with_capacity(ages.len()),
        p25: Vec::with_capacity(ages.len()),
        p50: Vec::with_capacity(ages.len()),
        p75: Vec::with_capacity(ages.len()),
        p90: Vec::with_capacity(ages.len()),
    };

    let mut values = Vec::with_capacity(paths.len());
    for idx in 0..ages.len() {
        values.clear();
        values.extend(paths.iter().map(|path| path[idx]));
        percentiles.p10.push(percentile(&mut values, 10.0));
        percentiles.p25.push(percentile(&mut values, 25.0));
        percentiles.p50.push(percentile(&mut values, 50.0));
        percentiles.p75.push(percentile(&mut values, 75.0));
        percentiles.p90.push(percentile(&mut values, 90.0));
    }

    MonteCarloResult {
        ages,
        percentiles,
        success_rate: successes as f64 / inputs.simulations as f64 * 100.0,
    }
}

fn simulate_path(inputs: &FireInputs, rng: &mut Rng) -> Vec<f64> {
    let mut path = Vec::with_capacity((inputs.life_expectancy - inputs.current_age + 1) as usize);
    let mut savings = inputs.current_savings;
    let contributions_per_year = annual_savings(inputs);
    let pre_mean = inputs.expected_return_pre_retirement / 100.0;
    let post_mean = inputs.expected_return_post_retirement / 100.0;

    for age in inputs.current_age..=inputs.life_expectancy {
        let retired = age >= inputs.retirement_age;
        let mean = if retired { post_mean } else { pre_mean };
        let sampled_return = mean + RETURN_VOLATILITY * rng.standard_normal();

        if retired {
            let (net, _) = net_withdrawal(inputs, age);
            savings *= 1.0 + sampled_return;
            savings -= net;
        } else {
            savings += contributions_per_year;
            savings *= 1.0 + sampled_return;
        }

        path.push(savings.max(0.0));
    }

    path
}

fn percentile(values: &mut [f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    values.sort_by(|a, b| a.total_cmp(b));

    let n = values.len();
    if n == 1 {
        return values[0];
    }

    let rank = (p / 100.0) * (n as f64 - 1.0);
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;

    if lower == upper {
        values[lower]
    } else {
        let w = rank - lower as f64;
        values[lower] * (1.0 - w) + values[upper] * w
    }
}
