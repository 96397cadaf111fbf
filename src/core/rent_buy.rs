use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Advantage {
    Buy,
    Rent,
    Equal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentBuyInputs {
    pub home_price: f64,
    pub down_payment: f64,
    pub mortgage_rate: f64,
    pub loan_term_years: u32,
    pub monthly_rent: f64,
    pub time_horizon_years: u32,
    pub home_appreciation: f64,
    pub rent_increase_rate: f64,
    pub investment_return_rate: f64,
    pub property_tax_rate: f64,
    pub maintenance_rate: f64,
    pub buying_closing_cost_rate: f64,
    pub selling_closing_cost_rate: f64,
    pub marginal_tax_rate: f64,
    pub annual_insurance: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentBuyYearEntry {
    pub year: u32,
    pub home_value: f64,
    pub mortgage_balance: f64,
    pub equity: f64,
    pub buy_net_worth: f64,
    pub cumulative_buy_costs: f64,
    pub monthly_rent: f64,
    pub investment_portfolio: f64,
    pub rent_net_worth: f64,
    pub cumulative_rent_costs: f64,
    pub advantage: Advantage,
    pub advantage_amount: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentBuyResult {
    pub yearly_data: Vec<RentBuyYearEntry>,
    pub break_even_year: Option<u32>,
    pub final_buy_net_worth: f64,
    pub final_rent_net_worth: f64,
    pub winner: Advantage,
    pub winner_advantage: f64,
    pub monthly_mortgage_payment: f64,
    pub initial_monthly_cost_diff: f64,
}

const BALANCE_EPS: f64 = 0.01;

pub fn compute(inputs: &RentBuyInputs) -> RentBuyResult {
    let loan_amount = inputs.home_price - inputs.down_payment;
    let monthly_mortgage_rate = inputs.mortgage_rate / 100.0 / 12.0;
    let total_mortgage_months = inputs.loan_term_years * 12;

    let monthly_mortgage_payment = if total_mortgage_months == 0 {
        0.0
    } else if monthly_mortgage_rate > 0.0 {
        let growth = (1.0 + monthly_mortgage_rate).powi(total_mortgage_months as i32);
        loan_amount * monthly_mortgage_rate * growth / (growth - 1.0)
    } else {
        loan_amount / total_mortgage_months as f64
    };

    let buying_closing_costs = inputs.home_price * inputs.buying_closing_cost_rate / 100.0;

    let monthly_invest_return = inputs.investment_return_rate / 100.0 / 12.0;
    let monthly_appreciation = inputs.home_appreciation / 100.0 / 12.0;
    let monthly_rent_increase = inputs.rent_increase_rate / 100.0 / 12.0;
    let monthly_maintenance_rate = inputs.maintenance_rate / 100.0 / 12.0;
    let monthly_property_tax_rate = inputs.property_tax_rate / 100.0 / 12.0;
    let monthly_insurance = inputs.annual_insurance / 12.0;

    // The renter keeps the down payment and closing costs invested instead.
    let mut investment_portfolio = inputs.down_payment + buying_closing_costs;
    let mut current_rent = inputs.monthly_rent;

    let mut mortgage_balance = loan_amount;
    let mut home_value = inputs.home_price;
    let mut cumulative_buy_costs = inputs.down_payment + buying_closing_costs;
    let mut cumulative_rent_costs = 0.0;

    let mut yearly_data = Vec::with_capacity(inputs.time_horizon_years as usize);
    let mut break_even_year = None;
    let mut prev_buy_ahead = false;

    for year in 1..=inputs.time_horizon_years {
        for _month in 0..12 {
            home_value *= 1.0 + monthly_appreciation;

            let interest_payment = mortgage_balance * monthly_mortgage_rate;
            if mortgage_balance > 0.0 {
                let principal_payment =
                    (monthly_mortgage_payment - interest_payment).min(mortgage_balance);
                mortgage_balance -= principal_payment;
                if mortgage_balance < BALANCE_EPS {
                    mortgage_balance = 0.0;
                }
            }

            let mortgage_deduction = interest_payment * inputs.marginal_tax_rate / 100.0;
            let property_tax = home_value * monthly_property_tax_rate;
            let maintenance = home_value * monthly_maintenance_rate;

            // Cash out of pocket; principal builds equity and is not a cost.
            let mortgage_outlay = if mortgage_balance > 0.0 {
                monthly_mortgage_payment
            } else {
                0.0
            };
            let monthly_buy_cost =
                mortgage_outlay + property_tax + maintenance + monthly_insurance
                    - mortgage_deduction;

            cumulative_buy_costs += monthly_buy_cost;
            cumulative_rent_costs += current_rent;

            let renter_savings = monthly_buy_cost - current_rent;
            investment_portfolio += renter_savings;
            if investment_portfolio < 0.0 {
                investment_portfolio = 0.0;
            }
            investment_portfolio *= 1.0 + monthly_invest_return;

            current_rent *= 1.0 + monthly_rent_increase;
        }

        let selling_costs = home_value * inputs.selling_closing_cost_rate / 100.0;
        let equity = home_value - mortgage_balance;
        let buy_net_worth = equity - selling_costs;
        let rent_net_worth = investment_portfolio;

        let advantage = if buy_net_worth > rent_net_worth {
            Advantage::Buy
        } else if buy_net_worth < rent_net_worth {
            Advantage::Rent
        } else {
            Advantage::Equal
        };
        let advantage_amount = (buy_net_worth - rent_net_worth).abs();

        let buy_ahead = buy_net_worth > rent_net_worth;
        if year == 1 {
            prev_buy_ahead = buy_ahead;
        } else if buy_ahead != prev_buy_ahead && break_even_year.is_none() {
            break_even_year = Some(year);
        }
        prev_buy_ahead = buy_ahead;

        yearly_data.push(RentBuyYearEntry {
            year,
            home_value,
            mortgage_balance,
            equity,
            buy_net_worth,
            cumulative_buy_costs,
            monthly_rent: current_rent,
            investment_portfolio,
            rent_net_worth,
            cumulative_rent_costs,
            advantage,
            advantage_amount,
        });
    }

    let (final_buy_net_worth, final_rent_net_worth) = yearly_data
        .last()
        .map_or((0.0, 0.0), |e| (e.buy_net_worth, e.rent_net_worth));

    let winner = if final_buy_net_worth > final_rent_net_worth {
        Advantage::Buy
    } else if final_buy_net_worth < final_rent_net_worth {
        Advantage::Rent
    } else {
        Advantage::Equal
    };

    let initial_property_tax = inputs.home_price * inputs.property_tax_rate / 100.0 / 12.0;
    let initial_maintenance = inputs.home_price * inputs.maintenance_rate / 100.0 / 12.0;
    let initial_deduction =
        loan_amount * inputs.mortgage_rate / 100.0 / 12.0 * inputs.marginal_tax_rate / 100.0;
    let initial_monthly_buy_cost = monthly_mortgage_payment + initial_property_tax
        + initial_maintenance
        + monthly_insurance
        - initial_deduction;

    RentBuyResult {
        yearly_data,
        break_even_year,
        final_buy_net_worth,
        final_rent_net_worth,
        winner,
        winner_advantage: (final_buy_net_worth - final_rent_net_worth).abs(),
        monthly_mortgage_payment,
        initial_monthly_cost_diff: initial_monthly_buy_cost - inputs.monthly_rent,
    }
}

pub fn default_inputs() -> RentBuyInputs {
    RentBuyInputs {
        home_price: 500_000.0,
        down_payment: 100_000.0,
        mortgage_rate: 6.5,
        loan_term_years: 30,
        monthly_rent: 2_500.0,
        time_horizon_years: 10,
        home_appreciation: 3.0,
        rent_increase_rate: 3.0,
        investment_return_rate: 7.0,
        property_tax_rate: 1.2,
        maintenance_rate: 1.0,
        buying_closing_cost_rate: 3.0,
        selling_closing_cost_rate: 6.0,
        marginal_tax_rate: 24.0,
        annual_insurance: 1_500.0,
    }
}
