use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PayoffStrategy {
    Avalanche,
    Snowball,
    Custom,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub id: String,
    pub name: String,
    pub balance: f64,
    pub interest_rate: f64,
    pub minimum_payment: f64,
}

impl Debt {
    pub fn new(name: impl Into<String>, balance: f64, interest_rate: f64, minimum_payment: f64) -> Self {
        Self {
            id: random_id(),
            name: name.into(),
            balance,
            interest_rate,
            minimum_payment,
        }
    }
}

fn random_id() -> String {
    format!("{:08x}", rand::random::<u32>())
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtPayoffInputs {
    pub debts: Vec<Debt>,
    pub extra_monthly_payment: f64,
    pub strategy: PayoffStrategy,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySnapshot {
    pub month: u32,
    pub total_balance: f64,
    pub total_payment: f64,
    pub total_interest: f64,
    pub total_principal: f64,
    pub debts_remaining: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtSummary {
    pub debt_id: String,
    pub name: String,
    pub original_balance: f64,
    pub total_interest_paid: f64,
    pub payoff_month: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtPayoffResult {
    pub strategy: PayoffStrategy,
    pub monthly_snapshots: Vec<MonthlySnapshot>,
    pub debt_summaries: Vec<DebtSummary>,
    pub total_months: u32,
    pub total_interest_paid: f64,
    pub total_amount_paid: f64,
    pub minimum_only_months: u32,
    pub minimum_only_interest: f64,
    pub interest_saved: f64,
    pub months_saved: u32,
    pub truncated: bool,
    pub non_amortizing_debts: Vec<String>,
}

const PAYOFF_EPS: f64 = 0.01;
const MAX_MONTHS: u32 = 600;

struct DebtState {
    id: String,
    name: String,
    original_balance: f64,
    balance: f64,
    interest_rate: f64,
    minimum_payment: f64,
    total_interest_paid: f64,
    accrued_this_month: f64,
    paid_this_month: f64,
    paid_off: bool,
    payoff_month: Option<u32>,
}

struct Simulation {
    snapshots: Vec<MonthlySnapshot>,
    summaries: Vec<DebtSummary>,
    total_interest: f64,
    total_months: u32,
    truncated: bool,
    non_amortizing: Vec<String>,
}

pub fn compute(inputs: &DebtPayoffInputs) -> DebtPayoffResult {
    if inputs.debts.is_empty() {
        return DebtPayoffResult {
            strategy: inputs.strategy,
            monthly_snapshots: Vec::new(),
            debt_summaries: Vec::new(),
            total_months: 0,
            total_interest_paid: 0.0,
            total_amount_paid: 0.0,
            minimum_only_months: 0,
            minimum_only_interest: 0.0,
            interest_saved: 0.0,
            months_saved: 0,
            truncated: false,
            non_amortizing_debts: Vec::new(),
        };
    }

    let run = simulate(&inputs.debts, inputs.extra_monthly_payment, inputs.strategy);
    let baseline = simulate(&inputs.debts, 0.0, inputs.strategy);

    let total_original: f64 = inputs.debts.iter().map(|d| d.balance).sum();

    DebtPayoffResult {
        strategy: inputs.strategy,
        total_months: run.total_months,
        total_interest_paid: run.total_interest,
        total_amount_paid: total_original + run.total_interest,
        minimum_only_months: baseline.total_months,
        minimum_only_interest: baseline.total_interest,
        interest_saved: baseline.total_interest - run.total_interest,
        months_saved: baseline.total_months.saturating_sub(run.total_months),
        truncated: run.truncated,
        non_amortizing_debts: run.non_amortizing,
        monthly_snapshots: run.snapshots,
        debt_summaries: run.summaries,
    }
}

pub fn default_inputs() -> DebtPayoffInputs {
    DebtPayoffInputs {
        debts: vec![
            Debt::new("Credit Card A", 5_000.0, 22.99, 100.0),
            Debt::new("Car Loan", 12_000.0, 6.5, 250.0),
            Debt::new("Student Loan", 20_000.0, 4.5, 200.0),
        ],
        extra_monthly_payment: 200.0,
        strategy: PayoffStrategy::Avalanche,
    }
}

fn simulate(debts: &[Debt], extra_monthly_payment: f64, strategy: PayoffStrategy) -> Simulation {
    let mut states: Vec<DebtState> = debts
        .iter()
        .map(|d| DebtState {
            id: d.id.clone(),
            name: d.name.clone(),
            original_balance: d.balance,
            balance: d.balance,
            interest_rate: d.interest_rate,
            minimum_payment: d.minimum_payment,
            total_interest_paid: 0.0,
            accrued_this_month: 0.0,
            paid_this_month: 0.0,
            paid_off: d.balance <= PAYOFF_EPS,
            payoff_month: if d.balance <= PAYOFF_EPS { Some(0) } else { None },
        })
        .collect();

    let mut snapshots = Vec::new();
    let mut month = 0;

    while states.iter().any(|d| !d.paid_off) && month < MAX_MONTHS {
        month += 1;

        for debt in states.iter_mut() {
            debt.paid_this_month = 0.0;
            debt.accrued_this_month = 0.0;
            if debt.paid_off {
                continue;
            }
            let interest = debt.balance * debt.interest_rate / 100.0 / 12.0;
            debt.total_interest_paid += interest;
            debt.balance += interest;
            debt.accrued_this_month = interest;
        }

        let mut pool = extra_monthly_payment;

        // Minimums first, in input order. A debt retired this month hands its
        // minimum back to the surplus pool for the rest of the month.
        for idx in 0..states.len() {
            if states[idx].paid_off {
                continue;
            }
            let payment = states[idx].minimum_payment.min(states[idx].balance);
            states[idx].balance -= payment;
            states[idx].paid_this_month += payment;
            if states[idx].balance <= PAYOFF_EPS {
                retire(&mut states[idx], month, &mut pool);
            }
        }

        // The surplus pool drains into the current priority debt, cascading to
        // the next priority as debts retire within the month.
        while pool > PAYOFF_EPS {
            let Some(idx) = priority_index(&states, strategy) else {
                break;
            };
            let payment = pool.min(states[idx].balance);
            states[idx].balance -= payment;
            states[idx].paid_this_month += payment;
            pool -= payment;
            if states[idx].balance <= PAYOFF_EPS {
                retire(&mut states[idx], month, &mut pool);
            }
        }

        let total_balance: f64 = states.iter().map(|d| d.balance).sum();
        let total_payment: f64 = states.iter().map(|d| d.paid_this_month).sum();
        let total_interest: f64 = states
            .iter()
            .map(|d| d.accrued_this_month.min(d.paid_this_month))
            .sum();

        snapshots.push(MonthlySnapshot {
            month,
            total_balance,
            total_payment,
            total_interest,
            total_principal: total_payment - total_interest,
            debts_remaining: states.iter().filter(|d| !d.paid_off).count() as u32,
        });
    }

    let truncated = states.iter().any(|d| !d.paid_off);
    let non_amortizing = states
        .iter()
        .filter(|d| {
            !d.paid_off && d.minimum_payment <= d.balance * d.interest_rate / 100.0 / 12.0
        })
        .map(|d| d.id.clone())
        .collect();

    let summaries = states
        .iter()
        .map(|d| DebtSummary {
            debt_id: d.id.clone(),
            name: d.name.clone(),
            original_balance: d.original_balance,
            total_interest_paid: d.total_interest_paid,
            payoff_month: d.payoff_month,
        })
        .collect();

    Simulation {
        snapshots,
        summaries,
        total_interest: states.iter().map(|d| d.total_interest_paid).sum(),
        total_months: month,
        truncated,
        non_amortizing,
    }
}

fn retire(debt: &mut DebtState, month: u32, pool: &mut f64) {
    debt.balance = 0.0;
    debt.paid_off = true;
    debt.payoff_month = Some(month);
    *pool += debt.minimum_payment;
}

fn priority_index(states: &[DebtState], strategy: PayoffStrategy) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (idx, debt) in states.iter().enumerate() {
        if debt.paid_off {
            continue;
        }
        match strategy {
            PayoffStrategy::Custom => return Some(idx),
            PayoffStrategy::Avalanche => {
                if best.is_none_or(|b| debt.interest_rate > states[b].interest_rate) {
                    best = Some(idx);
                }
            }
            PayoffStrategy::Snowball => {
                if best.is_none_or(|b| debt.balance < states[b].balance) {
                    best = Some(idx);
                }
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, proptest};

    fn debt(id: &str, balance: f64, rate: f64, minimum: f64) -> Debt {
        Debt {
            id: id.to_string(),
            name: id.to_string(),
            balance,
            interest_rate: rate,
            minimum_payment: minimum,
        }
    }

    fn sample_inputs(strategy: PayoffStrategy, extra: f64) -> DebtPayoffInputs {
        DebtPayoffInputs {
            debts: vec![
                debt("card", 5_000.0, 22.99, 150.0),
                debt("car", 15_000.0, 6.5, 350.0),
                debt("student", 25_000.0, 5.0, 280.0),
            ],
            extra_monthly_payment: extra,
            strategy,
        }
    }

    #[test]
    fn empty_debts_produce_zeroed_result() {
        let inputs = DebtPayoffInputs {
            debts: Vec::new(),
            extra_monthly_payment: 500.0,
            strategy: PayoffStrategy::Avalanche,
        };
        let result = compute(&inputs);
        assert_eq!(result.total_months, 0);
        assert_eq!(result.total_interest_paid, 0.0);
        assert!(result.monthly_snapshots.is_empty());
        assert!(result.debt_summaries.is_empty());
        assert!(!result.truncated);
    }

    #[test]
    fn total_balance_is_non_increasing() {
        let result = compute(&sample_inputs(PayoffStrategy::Avalanche, 200.0));
        let mut prev = f64::INFINITY;
        for snapshot in &result.monthly_snapshots {
            assert!(
                snapshot.total_balance <= prev + 1e-9,
                "balance rose in month {}",
                snapshot.month
            );
            prev = snapshot.total_balance;
        }
        assert!(result.monthly_snapshots.last().unwrap().total_balance.abs() < 1e-9);
    }

    #[test]
    fn avalanche_beats_snowball_on_interest() {
        let avalanche = compute(&sample_inputs(PayoffStrategy::Avalanche, 200.0));
        let snowball = compute(&sample_inputs(PayoffStrategy::Snowball, 200.0));
        assert!(avalanche.total_interest_paid <= snowball.total_interest_paid + 1e-9);
    }

    #[test]
    fn avalanche_retires_highest_rate_first() {
        let result = compute(&sample_inputs(PayoffStrategy::Avalanche, 200.0));
        let card = result
            .debt_summaries
            .iter()
            .find(|s| s.debt_id == "card")
            .unwrap();
        for summary in &result.debt_summaries {
            assert!(card.payoff_month.unwrap() <= summary.payoff_month.unwrap());
        }
    }

    #[test]
    fn snowball_retires_smallest_balance_first() {
        let result = compute(&sample_inputs(PayoffStrategy::Snowball, 200.0));
        let card = result
            .debt_summaries
            .iter()
            .find(|s| s.debt_id == "card")
            .unwrap();
        for summary in &result.debt_summaries {
            assert!(card.payoff_month.unwrap() <= summary.payoff_month.unwrap());
        }
    }

    #[test]
    fn custom_strategy_prioritizes_input_order() {
        let inputs = DebtPayoffInputs {
            debts: vec![
                debt("first", 8_000.0, 3.0, 100.0),
                debt("second", 2_000.0, 29.0, 100.0),
            ],
            extra_monthly_payment: 500.0,
            strategy: PayoffStrategy::Custom,
        };
        let result = compute(&inputs);
        let first = result
            .debt_summaries
            .iter()
            .find(|s| s.debt_id == "first")
            .unwrap();
        let second = result
            .debt_summaries
            .iter()
            .find(|s| s.debt_id == "second")
            .unwrap();
        assert!(first.payoff_month.unwrap() <= second.payoff_month.unwrap());
    }

    #[test]
    fn extra_payment_saves_interest_and_months() {
        let with_extra = compute(&sample_inputs(PayoffStrategy::Avalanche, 200.0));
        assert!(with_extra.interest_saved > 0.0);
        assert!(with_extra.months_saved > 0);
        assert!(with_extra.total_months < with_extra.minimum_only_months);
    }

    #[test]
    fn freed_minimum_accelerates_remaining_debts() {
        let inputs = DebtPayoffInputs {
            debts: vec![
                debt("small", 300.0, 10.0, 150.0),
                debt("large", 10_000.0, 10.0, 200.0),
            ],
            extra_monthly_payment: 0.0,
            strategy: PayoffStrategy::Avalanche,
        };
        let result = compute(&inputs);
        // Month 3 onward the small debt's freed minimum flows to the large one.
        let small = result
            .debt_summaries
            .iter()
            .find(|s| s.debt_id == "small")
            .unwrap();
        assert!(small.payoff_month.unwrap() <= 3);

        let slower = compute(&DebtPayoffInputs {
            debts: vec![debt("large", 10_000.0, 10.0, 200.0)],
            extra_monthly_payment: 0.0,
            strategy: PayoffStrategy::Avalanche,
        });
        assert!(result.total_months <= slower.total_months);
    }

    #[test]
    fn non_amortizing_debt_is_surfaced_not_hidden() {
        let inputs = DebtPayoffInputs {
            debts: vec![debt("stuck", 20_000.0, 30.0, 100.0)],
            extra_monthly_payment: 0.0,
            strategy: PayoffStrategy::Avalanche,
        };
        let result = compute(&inputs);
        assert!(result.truncated);
        assert_eq!(result.total_months, 600);
        assert_eq!(result.non_amortizing_debts, vec!["stuck".to_string()]);
        assert!(result.debt_summaries[0].payoff_month.is_none());
    }

    #[test]
    fn debt_constructor_generates_distinct_ids() {
        let a = Debt::new("a", 100.0, 5.0, 10.0);
        let b = Debt::new("b", 100.0, 5.0, 10.0);
        assert_ne!(a.id, b.id);
        assert_eq!(a.id.len(), 8);
    }

    #[test]
    fn payment_splits_into_interest_and_principal() {
        let result = compute(&sample_inputs(PayoffStrategy::Avalanche, 200.0));
        for snapshot in &result.monthly_snapshots {
            assert!(snapshot.total_interest >= 0.0);
            assert!(snapshot.total_principal >= -1e-9);
            let sum = snapshot.total_interest + snapshot.total_principal;
            assert!((sum - snapshot.total_payment).abs() < 1e-9);
        }
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(32))]

        #[test]
        fn prop_avalanche_interest_never_exceeds_snowball(
            b1 in 500u32..20_000,
            b2 in 500u32..20_000,
            r1_bp in 100u32..3000,
            r2_bp in 100u32..3000,
            extra in 0u32..500
        ) {
            let make = |strategy| DebtPayoffInputs {
                debts: vec![
                    debt("a", b1 as f64, r1_bp as f64 / 100.0, (b1 as f64 * 0.03).max(25.0)),
                    debt("b", b2 as f64, r2_bp as f64 / 100.0, (b2 as f64 * 0.03).max(25.0)),
                ],
                extra_monthly_payment: extra as f64,
                strategy,
            };
            let avalanche = compute(&make(PayoffStrategy::Avalanche));
            let snowball = compute(&make(PayoffStrategy::Snowball));
            prop_assert!(
                avalanche.total_interest_paid <= snowball.total_interest_paid + 1e-6
            );
        }

        #[test]
        fn prop_balances_non_increasing_under_any_strategy(
            b1 in 500u32..30_000,
            rate_bp in 0u32..2500,
            extra in 0u32..1000
        ) {
            let inputs = DebtPayoffInputs {
                debts: vec![
                    debt("a", b1 as f64, rate_bp as f64 / 100.0, (b1 as f64 * 0.04).max(50.0)),
                ],
                extra_monthly_payment: extra as f64,
                strategy: PayoffStrategy::Snowball,
            };
            let result = compute(&inputs);
            let mut prev = f64::INFINITY;
            for snapshot in &result.monthly_snapshots {
                prop_assert!(snapshot.total_balance <= prev + 1e-9);
                prev = snapshot.total_balance;
            }
        }
    }
}
