use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MortgageInputs {
    pub home_price: f64,
    pub down_payment: f64,
    pub loan_term_years: u32,
    pub interest_rate: f64,
    pub property_tax_rate: f64,
    pub pmi_rate: f64,
    pub hoa_monthly: f64,
    pub home_insurance_annual: f64,
    pub extra_monthly_payment: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentBreakdown {
    pub principal: f64,
    pub interest: f64,
    pub property_tax: f64,
    pub home_insurance: f64,
    pub pmi: f64,
    pub hoa: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationEntry {
    pub month: u32,
    pub year: u32,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    pub extra_payment: f64,
    pub balance: f64,
    pub total_interest: f64,
    pub total_principal: f64,
    pub equity: f64,
    pub equity_percent: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MortgageResult {
    pub loan_amount: f64,
    pub monthly_payment: PaymentBreakdown,
    pub amortization_schedule: Vec<AmortizationEntry>,
    pub total_interest: f64,
    pub total_cost: f64,
    pub payoff_months: u32,
    pub amortization_with_extra: Option<Vec<AmortizationEntry>>,
    pub total_interest_with_extra: Option<f64>,
    pub interest_saved: Option<f64>,
    pub payoff_months_with_extra: Option<u32>,
    pub months_saved: Option<u32>,
    pub pmi_removal_month: Option<u32>,
    pub half_equity_month: Option<u32>,
}

const BALANCE_EPS: f64 = 0.01;
// PMI is charged only while loan-to-value strictly exceeds 80%.
const PMI_LTV_LIMIT: f64 = 0.8;
const PMI_REMOVAL_EQUITY_PERCENT: f64 = 20.0;
const HALF_EQUITY_PERCENT: f64 = 50.0;

pub fn compute(inputs: &MortgageInputs) -> MortgageResult {
    let loan_amount = inputs.home_price - inputs.down_payment;
    let monthly_rate = inputs.interest_rate / 100.0 / 12.0;
    let total_months = inputs.loan_term_years * 12;

    let monthly_pi = level_payment(loan_amount, monthly_rate, total_months);

    let monthly_property_tax = inputs.home_price * inputs.property_tax_rate / 100.0 / 12.0;
    let monthly_insurance = inputs.home_insurance_annual / 12.0;
    let ltv = if inputs.home_price > 0.0 {
        loan_amount / inputs.home_price
    } else {
        0.0
    };
    let monthly_pmi = if ltv > PMI_LTV_LIMIT {
        loan_amount * inputs.pmi_rate / 100.0 / 12.0
    } else {
        0.0
    };

    let schedule = build_schedule(
        loan_amount,
        monthly_rate,
        monthly_pi,
        total_months,
        0.0,
        inputs.home_price,
    );

    let mut monthly_payment = PaymentBreakdown {
        principal: 0.0,
        interest: 0.0,
        property_tax: monthly_property_tax,
        home_insurance: monthly_insurance,
        pmi: monthly_pmi,
        hoa: inputs.hoa_monthly,
        total: monthly_pi + monthly_property_tax + monthly_insurance + monthly_pmi
            + inputs.hoa_monthly,
    };
    if let Some(first) = schedule.first() {
        monthly_payment.principal = first.principal;
        monthly_payment.interest = first.interest;
    }

    let mut amortization_with_extra = None;
    let mut total_interest_with_extra = None;
    let mut interest_saved = None;
    let mut payoff_months_with_extra = None;
    let mut months_saved = None;

    let total_interest = schedule.last().map_or(0.0, |e| e.total_interest);

    if inputs.extra_monthly_payment > 0.0 {
        let with_extra = build_schedule(
            loan_amount,
            monthly_rate,
            monthly_pi,
            total_months,
            inputs.extra_monthly_payment,
            inputs.home_price,
        );
        let extra_interest = with_extra.last().map_or(0.0, |e| e.total_interest);
        total_interest_with_extra = Some(extra_interest);
        interest_saved = Some(total_interest - extra_interest);
        payoff_months_with_extra = Some(with_extra.len() as u32);
        months_saved = Some(schedule.len() as u32 - with_extra.len() as u32);
        amortization_with_extra = Some(with_extra);
    }

    let pmi_removal_month = first_month_at_equity(&schedule, PMI_REMOVAL_EQUITY_PERCENT);
    let half_equity_month = first_month_at_equity(&schedule, HALF_EQUITY_PERCENT);

    let recurring_monthly =
        monthly_property_tax + monthly_insurance + monthly_pmi + inputs.hoa_monthly;

    MortgageResult {
        loan_amount,
        monthly_payment,
        total_interest,
        total_cost: total_interest + loan_amount + recurring_monthly * total_months as f64,
        payoff_months: total_months,
        amortization_schedule: schedule,
        amortization_with_extra,
        total_interest_with_extra,
        interest_saved,
        payoff_months_with_extra,
        months_saved,
        pmi_removal_month,
        half_equity_month,
    }
}

pub fn default_inputs() -> MortgageInputs {
    MortgageInputs {
        home_price: 400_000.0,
        down_payment: 80_000.0,
        loan_term_years: 30,
        interest_rate: 6.5,
        property_tax_rate: 1.2,
        pmi_rate: 0.5,
        hoa_monthly: 0.0,
        home_insurance_annual: 1_500.0,
        extra_monthly_payment: 0.0,
    }
}

fn level_payment(loan_amount: f64, monthly_rate: f64, total_months: u32) -> f64 {
    if total_months == 0 {
        return 0.0;
    }
    if monthly_rate > 0.0 {
        let growth = (1.0 + monthly_rate).powi(total_months as i32);
        loan_amount * monthly_rate * growth / (growth - 1.0)
    } else {
        loan_amount / total_months as f64
    }
}

fn build_schedule(
    loan_amount: f64,
    monthly_rate: f64,
    monthly_payment: f64,
    max_months: u32,
    extra_payment: f64,
    home_price: f64,
) -> Vec<AmortizationEntry> {
    let mut schedule = Vec::new();
    let mut balance = loan_amount;
    let mut total_interest = 0.0;
    let mut total_principal = 0.0;

    for month in 1..=max_months {
        if balance <= BALANCE_EPS {
            break;
        }

        let interest = balance * monthly_rate;
        let mut principal = monthly_payment - interest;
        let mut extra = extra_payment.min(balance - principal).max(0.0);

        if principal + extra > balance {
            principal = balance;
            extra = 0.0;
        }

        balance -= principal + extra;
        if balance < BALANCE_EPS {
            balance = 0.0;
        }

        total_interest += interest;
        total_principal += principal + extra;

        let equity = home_price - balance;
        let equity_percent = if home_price > 0.0 {
            equity / home_price * 100.0
        } else {
            0.0
        };

        schedule.push(AmortizationEntry {
            month,
            year: month.div_ceil(12),
            payment: monthly_payment + extra,
            principal,
            interest,
            extra_payment: extra,
            balance,
            total_interest,
            total_principal,
            equity,
            equity_percent,
        });
    }

    schedule
}

fn first_month_at_equity(schedule: &[AmortizationEntry], percent: f64) -> Option<u32> {
    schedule
        .iter()
        .find(|entry| entry.equity_percent >= percent)
        .map(|entry| entry.month)
}
