use axum::{
    Router,
    extract::Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::black_scholes::OptionType;
use crate::core::compound::{self, CompoundFrequency, CompoundInputs};
use crate::core::debt::{self, Debt, DebtPayoffInputs, PayoffStrategy};
use crate::core::fire::{self, FireInputs};
use crate::core::mortgage::{self, MortgageInputs};
use crate::core::options::{self, Direction, OptionLeg, OptionStrategy, OptionsInputs};
use crate::core::rent_buy::{self, RentBuyInputs};

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ApiCompoundFrequency {
    Daily,
    Monthly,
    Quarterly,
    Annually,
}

impl From<ApiCompoundFrequency> for CompoundFrequency {
    fn from(value: ApiCompoundFrequency) -> Self {
        match value {
            ApiCompoundFrequency::Daily => CompoundFrequency::Daily,
            ApiCompoundFrequency::Monthly => CompoundFrequency::Monthly,
            ApiCompoundFrequency::Quarterly => CompoundFrequency::Quarterly,
            ApiCompoundFrequency::Annually => CompoundFrequency::Annually,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ApiPayoffStrategy {
    Avalanche,
    Snowball,
    Custom,
}

impl From<ApiPayoffStrategy> for PayoffStrategy {
    fn from(value: ApiPayoffStrategy) -> Self {
        match value {
            ApiPayoffStrategy::Avalanche => PayoffStrategy::Avalanche,
            ApiPayoffStrategy::Snowball => PayoffStrategy::Snowball,
            ApiPayoffStrategy::Custom => PayoffStrategy::Custom,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ApiOptionType {
    Call,
    Put,
}

impl From<ApiOptionType> for OptionType {
    fn from(value: ApiOptionType) -> Self {
        match value {
            ApiOptionType::Call => OptionType::Call,
            ApiOptionType::Put => OptionType::Put,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ApiDirection {
    Buy,
    Sell,
}

impl From<ApiDirection> for Direction {
    fn from(value: ApiDirection) -> Self {
        match value {
            ApiDirection::Buy => Direction::Buy,
            ApiDirection::Sell => Direction::Sell,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiOptionStrategy {
    LongCall,
    LongPut,
    CoveredCall,
    CashSecuredPut,
    BullCallSpread,
    BearPutSpread,
    IronCondor,
    Straddle,
    Strangle,
    Butterfly,
    Custom,
}

impl From<ApiOptionStrategy> for OptionStrategy {
    fn from(value: ApiOptionStrategy) -> Self {
        match value {
            ApiOptionStrategy::LongCall => OptionStrategy::LongCall,
            ApiOptionStrategy::LongPut => OptionStrategy::LongPut,
            ApiOptionStrategy::CoveredCall => OptionStrategy::CoveredCall,
            ApiOptionStrategy::CashSecuredPut => OptionStrategy::CashSecuredPut,
            ApiOptionStrategy::BullCallSpread => OptionStrategy::BullCallSpread,
            ApiOptionStrategy::BearPutSpread => OptionStrategy::BearPutSpread,
            ApiOptionStrategy::IronCondor => OptionStrategy::IronCondor,
            ApiOptionStrategy::Straddle => OptionStrategy::Straddle,
            ApiOptionStrategy::Strangle => OptionStrategy::Strangle,
            ApiOptionStrategy::Butterfly => OptionStrategy::Butterfly,
            ApiOptionStrategy::Custom => OptionStrategy::Custom,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct MortgagePayload {
    home_price: Option<f64>,
    down_payment: Option<f64>,
    #[serde(alias = "loanTermYears")]
    loan_term: Option<u32>,
    interest_rate: Option<f64>,
    property_tax_rate: Option<f64>,
    pmi_rate: Option<f64>,
    hoa_monthly: Option<f64>,
    home_insurance_annual: Option<f64>,
    extra_monthly_payment: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CompoundPayload {
    initial_investment: Option<f64>,
    monthly_contribution: Option<f64>,
    annual_return_rate: Option<f64>,
    #[serde(alias = "timeHorizonYears")]
    time_horizon: Option<u32>,
    contribution_increase_rate: Option<f64>,
    compound_frequency: Option<ApiCompoundFrequency>,
    tax_drag_enabled: Option<bool>,
    capital_gains_rate: Option<f64>,
    inflation_enabled: Option<bool>,
    inflation_rate: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DebtPayload {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    balance: f64,
    interest_rate: f64,
    minimum_payment: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct DebtPayoffPayload {
    debts: Option<Vec<DebtPayload>>,
    extra_monthly_payment: Option<f64>,
    strategy: Option<ApiPayoffStrategy>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct FirePayload {
    current_age: Option<u32>,
    retirement_age: Option<u32>,
    life_expectancy: Option<u32>,
    current_savings: Option<f64>,
    annual_income: Option<f64>,
    savings_rate: Option<f64>,
    expected_return_pre_retirement: Option<f64>,
    expected_return_post_retirement: Option<f64>,
    annual_spending_in_retirement: Option<f64>,
    social_security_monthly: Option<f64>,
    social_security_start_age: Option<u32>,
    inflation_rate: Option<f64>,
    tax_rate_in_retirement: Option<f64>,
    simulations: Option<u32>,
    seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OptionLegPayload {
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "type")]
    option_type: ApiOptionType,
    direction: ApiDirection,
    strike_price: f64,
    premium: f64,
    quantity: u32,
}

impl OptionLegPayload {
    fn into_leg(self) -> OptionLeg {
        let mut leg = OptionLeg::new(
            self.option_type.into(),
            self.direction.into(),
            self.strike_price,
            self.premium,
            self.quantity,
        );
        if let Some(id) = self.id {
            leg.id = id;
        }
        leg
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct OptionsPayload {
    strategy: Option<ApiOptionStrategy>,
    legs: Option<Vec<OptionLegPayload>>,
    current_price: Option<f64>,
    implied_volatility: Option<f64>,
    risk_free_rate: Option<f64>,
    days_to_expiration: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RentBuyPayload {
    home_price: Option<f64>,
    down_payment: Option<f64>,
    mortgage_rate: Option<f64>,
    #[serde(alias = "loanTermYears")]
    loan_term: Option<u32>,
    monthly_rent: Option<f64>,
    #[serde(alias = "timeHorizonYears")]
    time_horizon: Option<u32>,
    home_appreciation: Option<f64>,
    rent_increase_rate: Option<f64>,
    investment_return_rate: Option<f64>,
    property_tax_rate: Option<f64>,
    maintenance_rate: Option<f64>,
    buying_closing_cost_rate: Option<f64>,
    selling_closing_cost_rate: Option<f64>,
    marginal_tax_rate: Option<f64>,
    annual_insurance: Option<f64>,
}

fn require_finite(name: &str, value: f64) -> Result<(), String> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(format!("{name} must be a finite number"))
    }
}

fn require_non_negative(name: &str, value: f64) -> Result<(), String> {
    require_finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(format!("{name} must not be negative"))
    }
}

fn require_positive(name: &str, value: f64) -> Result<(), String> {
    require_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(format!("{name} must be positive"))
    }
}

fn require_rate(name: &str, value: f64) -> Result<(), String> {
    require_non_negative(name, value)?;
    if value <= 100.0 {
        Ok(())
    } else {
        Err(format!("{name} must not exceed 100"))
    }
}

fn mortgage_inputs(payload: MortgagePayload) -> Result<MortgageInputs, String> {
    let mut inputs = mortgage::default_inputs();
    if let Some(v) = payload.home_price {
        inputs.home_price = v;
    }
    if let Some(v) = payload.down_payment {
        inputs.down_payment = v;
    }
    if let Some(v) = payload.loan_term {
        inputs.loan_term_years = v;
    }
    if let Some(v) = payload.interest_rate {
        inputs.interest_rate = v;
    }
    if let Some(v) = payload.property_tax_rate {
        inputs.property_tax_rate = v;
    }
    if let Some(v) = payload.pmi_rate {
        inputs.pmi_rate = v;
    }
    if let Some(v) = payload.hoa_monthly {
        inputs.hoa_monthly = v;
    }
    if let Some(v) = payload.home_insurance_annual {
        inputs.home_insurance_annual = v;
    }
    if let Some(v) = payload.extra_monthly_payment {
        inputs.extra_monthly_payment = v;
    }

    require_positive("homePrice", inputs.home_price)?;
    require_non_negative("downPayment", inputs.down_payment)?;
    if inputs.down_payment > inputs.home_price {
        return Err("downPayment must not exceed homePrice".to_string());
    }
    if inputs.loan_term_years == 0 || inputs.loan_term_years > 50 {
        return Err("loanTerm must be between 1 and 50 years".to_string());
    }
    require_rate("interestRate", inputs.interest_rate)?;
    require_rate("propertyTaxRate", inputs.property_tax_rate)?;
    require_rate("pmiRate", inputs.pmi_rate)?;
    require_non_negative("hoaMonthly", inputs.hoa_monthly)?;
    require_non_negative("homeInsuranceAnnual", inputs.home_insurance_annual)?;
    require_non_negative("extraMonthlyPayment", inputs.extra_monthly_payment)?;
    Ok(inputs)
}

fn compound_inputs(payload: CompoundPayload) -> Result<CompoundInputs, String> {
    let mut inputs = compound::default_inputs();
    if let Some(v) = payload.initial_investment {
        inputs.initial_investment = v;
    }
    if let Some(v) = payload.monthly_contribution {
        inputs.monthly_contribution = v;
    }
    if let Some(v) = payload.annual_return_rate {
        inputs.annual_return_rate = v;
    }
    if let Some(v) = payload.time_horizon {
        inputs.time_horizon_years = v;
    }
    if let Some(v) = payload.contribution_increase_rate {
        inputs.contribution_increase_rate = v;
    }
    if let Some(v) = payload.compound_frequency {
        inputs.compound_frequency = v.into();
    }
    if let Some(v) = payload.tax_drag_enabled {
        inputs.tax_drag_enabled = v;
    }
    if let Some(v) = payload.capital_gains_rate {
        inputs.capital_gains_rate = v;
    }
    if let Some(v) = payload.inflation_enabled {
        inputs.inflation_enabled = v;
    }
    if let Some(v) = payload.inflation_rate {
        inputs.inflation_rate = v;
    }

    require_non_negative("initialInvestment", inputs.initial_investment)?;
    require_non_negative("monthlyContribution", inputs.monthly_contribution)?;
    require_finite("annualReturnRate", inputs.annual_return_rate)?;
    if inputs.annual_return_rate <= -100.0 {
        return Err("annualReturnRate must be above -100".to_string());
    }
    if inputs.time_horizon_years == 0 || inputs.time_horizon_years > 100 {
        return Err("timeHorizon must be between 1 and 100 years".to_string());
    }
    require_rate("contributionIncreaseRate", inputs.contribution_increase_rate)?;
    require_rate("capitalGainsRate", inputs.capital_gains_rate)?;
    require_rate("inflationRate", inputs.inflation_rate)?;
    Ok(inputs)
}

fn debt_payoff_inputs(payload: DebtPayoffPayload) -> Result<DebtPayoffInputs, String> {
    let mut inputs = debt::default_inputs();
    if let Some(debts) = payload.debts {
        inputs.debts = debts
            .into_iter()
            .enumerate()
            .map(|(idx, d)| {
                let mut converted = Debt::new(
                    d.name.unwrap_or_else(|| format!("Debt {}", idx + 1)),
                    d.balance,
                    d.interest_rate,
                    d.minimum_payment,
                );
                if let Some(id) = d.id {
                    converted.id = id;
                }
                converted
            })
            .collect();
    }
    if let Some(v) = payload.extra_monthly_payment {
        inputs.extra_monthly_payment = v;
    }
    if let Some(v) = payload.strategy {
        inputs.strategy = v.into();
    }

    for d in &inputs.debts {
        require_non_negative("balance", d.balance)?;
        require_rate("interestRate", d.interest_rate)?;
        require_non_negative("minimumPayment", d.minimum_payment)?;
    }
    require_non_negative("extraMonthlyPayment", inputs.extra_monthly_payment)?;
    Ok(inputs)
}

fn fire_inputs(payload: FirePayload) -> Result<FireInputs, String> {
    let mut inputs = fire::default_inputs();
    if let Some(v) = payload.current_age {
        inputs.current_age = v;
    }
    if let Some(v) = payload.retirement_age {
        inputs.retirement_age = v;
    }
    if let Some(v) = payload.life_expectancy {
        inputs.life_expectancy = v;
    }
    if let Some(v) = payload.current_savings {
        inputs.current_savings = v;
    }
    if let Some(v) = payload.annual_income {
        inputs.annual_income = v;
    }
    if let Some(v) = payload.savings_rate {
        inputs.savings_rate = v;
    }
    if let Some(v) = payload.expected_return_pre_retirement {
        inputs.expected_return_pre_retirement = v;
    }
    if let Some(v) = payload.expected_return_post_retirement {
        inputs.expected_return_post_retirement = v;
    }
    if let Some(v) = payload.annual_spending_in_retirement {
        inputs.annual_spending_in_retirement = v;
    }
    if let Some(v) = payload.social_security_monthly {
        inputs.social_security_monthly = v;
    }
    if let Some(v) = payload.social_security_start_age {
        inputs.social_security_start_age = v;
    }
    if let Some(v) = payload.inflation_rate {
        inputs.inflation_rate = v;
    }
    if let Some(v) = payload.tax_rate_in_retirement {
        inputs.tax_rate_in_retirement = v;
    }
    if let Some(v) = payload.simulations {
        inputs.simulations = v;
    }
    if let Some(v) = payload.seed {
        inputs.seed = v;
    }

    if inputs.current_age == 0 || inputs.current_age > 120 {
        return Err("currentAge must be between 1 and 120".to_string());
    }
    if inputs.retirement_age < inputs.current_age {
        return Err("retirementAge must not be below currentAge".to_string());
    }
    if inputs.life_expectancy < inputs.retirement_age {
        return Err("lifeExpectancy must not be below retirementAge".to_string());
    }
    require_non_negative("currentSavings", inputs.current_savings)?;
    require_non_negative("annualIncome", inputs.annual_income)?;
    require_rate("savingsRate", inputs.savings_rate)?;
    require_finite(
        "expectedReturnPreRetirement",
        inputs.expected_return_pre_retirement,
    )?;
    require_finite(
        "expectedReturnPostRetirement",
        inputs.expected_return_post_retirement,
    )?;
    require_non_negative(
        "annualSpendingInRetirement",
        inputs.annual_spending_in_retirement,
    )?;
    require_non_negative("socialSecurityMonthly", inputs.social_security_monthly)?;
    require_rate("inflationRate", inputs.inflation_rate)?;
    require_non_negative("taxRateInRetirement", inputs.tax_rate_in_retirement)?;
    if inputs.tax_rate_in_retirement >= 100.0 {
        return Err("taxRateInRetirement must be below 100".to_string());
    }
    if inputs.simulations == 0 || inputs.simulations > 100_000 {
        return Err("simulations must be between 1 and 100000".to_string());
    }
    Ok(inputs)
}

fn options_inputs(payload: OptionsPayload) -> Result<OptionsInputs, String> {
    let defaults = options::default_inputs();
    let current_price = payload.current_price.unwrap_or(defaults.current_price);
    require_positive("currentPrice", current_price)?;

    let legs = match (payload.legs, payload.strategy) {
        (Some(legs), _) => legs.into_iter().map(OptionLegPayload::into_leg).collect(),
        (None, Some(strategy)) => options::strategy_legs(strategy.into(), current_price),
        (None, None) => options::strategy_legs(OptionStrategy::LongCall, current_price),
    };

    let inputs = OptionsInputs {
        legs,
        current_price,
        implied_volatility: Some(
            payload
                .implied_volatility
                .unwrap_or(defaults.implied_volatility.unwrap_or(0.0)),
        ),
        risk_free_rate: payload.risk_free_rate.unwrap_or(defaults.risk_free_rate),
        days_to_expiration: payload
            .days_to_expiration
            .unwrap_or(defaults.days_to_expiration),
    };

    for leg in &inputs.legs {
        require_positive("strikePrice", leg.strike_price)?;
        require_non_negative("premium", leg.premium)?;
        if leg.quantity == 0 {
            return Err("quantity must be at least 1".to_string());
        }
    }
    if let Some(iv) = inputs.implied_volatility {
        require_non_negative("impliedVolatility", iv)?;
    }
    require_finite("riskFreeRate", inputs.risk_free_rate)?;
    if inputs.days_to_expiration > 3_650 {
        return Err("daysToExpiration must not exceed 3650".to_string());
    }
    Ok(inputs)
}

fn rent_buy_inputs(payload: RentBuyPayload) -> Result<RentBuyInputs, String> {
    let mut inputs = rent_buy::default_inputs();
    if let Some(v) = payload.home_price {
        inputs.home_price = v;
    }
    if let Some(v) = payload.down_payment {
        inputs.down_payment = v;
    }
    if let Some(v) = payload.mortgage_rate {
        inputs.mortgage_rate = v;
    }
    if let Some(v) = payload.loan_term {
        inputs.loan_term_years = v;
    }
    if let Some(v) = payload.monthly_rent {
        inputs.monthly_rent = v;
    }
    if let Some(v) = payload.time_horizon {
        inputs.time_horizon_years = v;
    }
    if let Some(v) = payload.home_appreciation {
        inputs.home_appreciation = v;
    }
    if let Some(v) = payload.rent_increase_rate {
        inputs.rent_increase_rate = v;
    }
    if let Some(v) = payload.investment_return_rate {
        inputs.investment_return_rate = v;
    }
    if let Some(v) = payload.property_tax_rate {
        inputs.property_tax_rate = v;
    }
    if let Some(v) = payload.maintenance_rate {
        inputs.maintenance_rate = v;
    }
    if let Some(v) = payload.buying_closing_cost_rate {
        inputs.buying_closing_cost_rate = v;
    }
    if let Some(v) = payload.selling_closing_cost_rate {
        inputs.selling_closing_cost_rate = v;
    }
    if let Some(v) = payload.marginal_tax_rate {
        inputs.marginal_tax_rate = v;
    }
    if let Some(v) = payload.annual_insurance {
        inputs.annual_insurance = v;
    }

    require_positive("homePrice", inputs.home_price)?;
    require_non_negative("downPayment", inputs.down_payment)?;
    if inputs.down_payment > inputs.home_price {
        return Err("downPayment must not exceed homePrice".to_string());
    }
    require_rate("mortgageRate", inputs.mortgage_rate)?;
    if inputs.loan_term_years == 0 || inputs.loan_term_years > 50 {
        return Err("loanTerm must be between 1 and 50 years".to_string());
    }
    require_non_negative("monthlyRent", inputs.monthly_rent)?;
    if inputs.time_horizon_years == 0 || inputs.time_horizon_years > 100 {
        return Err("timeHorizon must be between 1 and 100 years".to_string());
    }
    require_rate("homeAppreciation", inputs.home_appreciation)?;
    require_rate("rentIncreaseRate", inputs.rent_increase_rate)?;
    require_rate("investmentReturnRate", inputs.investment_return_rate)?;
    require_rate("propertyTaxRate", inputs.property_tax_rate)?;
    require_rate("maintenanceRate", inputs.maintenance_rate)?;
    require_rate("buyingClosingCostRate", inputs.buying_closing_cost_rate)?;
    require_rate("sellingClosingCostRate", inputs.selling_closing_cost_rate)?;
    require_non_negative("marginalTaxRate", inputs.marginal_tax_rate)?;
    if inputs.marginal_tax_rate >= 100.0 {
        return Err("marginalTaxRate must be below 100".to_string());
    }
    require_non_negative("annualInsurance", inputs.annual_insurance)?;
    Ok(inputs)
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/api/mortgage", post(mortgage_handler))
        .route("/api/mortgage/defaults", get(mortgage_defaults_handler))
        .route("/api/compound", post(compound_handler))
        .route("/api/compound/defaults", get(compound_defaults_handler))
        .route("/api/debt-payoff", post(debt_payoff_handler))
        .route("/api/debt-payoff/defaults", get(debt_payoff_defaults_handler))
        .route("/api/fire", post(fire_handler))
        .route("/api/fire/monte-carlo", post(fire_monte_carlo_handler))
        .route("/api/fire/defaults", get(fire_defaults_handler))
        .route("/api/options", post(options_handler))
        .route("/api/options/defaults", get(options_defaults_handler))
        .route("/api/rent-vs-buy", post(rent_buy_handler))
        .route("/api/rent-vs-buy/defaults", get(rent_buy_defaults_handler))
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    println!("Calculator HTTP API listening on http://{addr}");

    axum::serve(listener, app).await
}

async fn mortgage_handler(Json(payload): Json<MortgagePayload>) -> Response {
    match mortgage_inputs(payload) {
        Ok(inputs) => json_response(StatusCode::OK, mortgage::compute(&inputs)),
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

async fn mortgage_defaults_handler() -> Response {
    json_response(StatusCode::OK, mortgage::default_inputs())
}

async fn compound_handler(Json(payload): Json<CompoundPayload>) -> Response {
    match compound_inputs(payload) {
        Ok(inputs) => json_response(StatusCode::OK, compound::compute(&inputs)),
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

async fn compound_defaults_handler() -> Response {
    json_response(StatusCode::OK, compound::default_inputs())
}

async fn debt_payoff_handler(Json(payload): Json<DebtPayoffPayload>) -> Response {
    match debt_payoff_inputs(payload) {
        Ok(inputs) => json_response(StatusCode::OK, debt::compute(&inputs)),
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

async fn debt_payoff_defaults_handler() -> Response {
    json_response(StatusCode::OK, debt::default_inputs())
}

async fn fire_handler(Json(payload): Json<FirePayload>) -> Response {
    match fire_inputs(payload) {
        Ok(inputs) => json_response(StatusCode::OK, fire::compute(&inputs)),
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

async fn fire_monte_carlo_handler(Json(payload): Json<FirePayload>) -> Response {
    match fire_inputs(payload) {
        Ok(inputs) => json_response(StatusCode::OK, fire::run_monte_carlo(&inputs)),
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

async fn fire_defaults_handler() -> Response {
    json_response(StatusCode::OK, fire::default_inputs())
}

async fn options_handler(Json(payload): Json<OptionsPayload>) -> Response {
    match options_inputs(payload) {
        Ok(inputs) => json_response(StatusCode::OK, options::compute(&inputs)),
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

async fn options_defaults_handler() -> Response {
    json_response(StatusCode::OK, options::default_inputs())
}

async fn rent_buy_handler(Json(payload): Json<RentBuyPayload>) -> Response {
    match rent_buy_inputs(payload) {
        Ok(inputs) => json_response(StatusCode::OK, rent_buy::compute(&inputs)),
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

async fn rent_buy_defaults_handler() -> Response {
    json_response(StatusCode::OK, rent_buy::default_inputs())
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliCalculator {
    Mortgage,
    Compound,
    DebtPayoff,
    Fire,
    FireMonteCarlo,
    Options,
    RentVsBuy,
}

#[derive(Parser, Debug)]
#[command(
    name = "nestegg",
    about = "Personal-finance calculators: mortgage, compound growth, debt payoff, FIRE, options, rent vs buy"
)]
struct Cli {
    #[arg(long, value_enum, help = "Which calculator to run")]
    calculator: CliCalculator,
    #[arg(
        long,
        help = "JSON object of input overrides; omitted fields use the calculator defaults"
    )]
    inputs: Option<String>,
}

pub fn run_cli(args: Vec<String>) -> Result<(), String> {
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;
    let rendered = compute_json(cli.calculator, cli.inputs.as_deref())?;
    println!("{rendered}");
    Ok(())
}

fn compute_json(calculator: CliCalculator, raw_inputs: Option<&str>) -> Result<String, String> {
    match calculator {
        CliCalculator::Mortgage => {
            let inputs = mortgage_inputs(parse_payload(raw_inputs)?)?;
            to_pretty(&mortgage::compute(&inputs))
        }
        CliCalculator::Compound => {
            let inputs = compound_inputs(parse_payload(raw_inputs)?)?;
            to_pretty(&compound::compute(&inputs))
        }
        CliCalculator::DebtPayoff => {
            let inputs = debt_payoff_inputs(parse_payload(raw_inputs)?)?;
            to_pretty(&debt::compute(&inputs))
        }
        CliCalculator::Fire => {
            let inputs = fire_inputs(parse_payload(raw_inputs)?)?;
            to_pretty(&fire::compute(&inputs))
        }
        CliCalculator::FireMonteCarlo => {
            let inputs = fire_inputs(parse_payload(raw_inputs)?)?;
            to_pretty(&fire::run_monte_carlo(&inputs))
        }
        CliCalculator::Options => {
            let inputs = options_inputs(parse_payload(raw_inputs)?)?;
            to_pretty(&options::compute(&inputs))
        }
        CliCalculator::RentVsBuy => {
            let inputs = rent_buy_inputs(parse_payload(raw_inputs)?)?;
            to_pretty(&rent_buy::compute(&inputs))
        }
    }
}

fn parse_payload<T: DeserializeOwned + Default>(raw: Option<&str>) -> Result<T, String> {
    match raw {
        None => Ok(T::default()),
        Some(text) => {
            serde_json::from_str(text).map_err(|e| format!("Invalid inputs JSON: {e}"))
        }
    }
}

fn to_pretty<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("Failed to serialize result: {e}"))
}
