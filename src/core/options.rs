use serde::Serialize;

use super::black_scholes::{self, BsParams, OptionType};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Buy,
    Sell,
}

impl Direction {
    fn sign(self) -> f64 {
        match self {
            Direction::Buy => 1.0,
            Direction::Sell => -1.0,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionStrategy {
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

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionLeg {
    pub id: String,
    pub option_type: OptionType,
    pub direction: Direction,
    pub strike_price: f64,
    pub premium: f64,
    pub quantity: u32,
}

impl OptionLeg {
    pub fn new(
        option_type: OptionType,
        direction: Direction,
        strike_price: f64,
        premium: f64,
        quantity: u32,
    ) -> Self {
        Self {
            id: format!("{:08x}", rand::random::<u32>()),
            option_type,
            direction,
            strike_price,
            premium,
            quantity,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsInputs {
    pub legs: Vec<OptionLeg>,
    pub current_price: f64,
    pub implied_volatility: Option<f64>,
    pub risk_free_rate: f64,
    pub days_to_expiration: u32,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoffPoint {
    pub price: f64,
    pub profit: f64,
    pub profit_percent: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Greeks {
    pub delta: f64,
    pub gamma: f64,
    pub theta: f64,
    pub vega: f64,
    pub rho: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlSurfacePoint {
    pub price: f64,
    pub dte: u32,
    pub pl: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsResult {
    pub payoff_data: Vec<PayoffPoint>,
    pub max_profit: Option<f64>,
    pub max_loss: Option<f64>,
    pub breakevens: Vec<f64>,
    pub risk_reward_ratio: Option<f64>,
    pub capital_required: f64,
    pub greeks: Option<Greeks>,
    pub probability_of_profit: Option<f64>,
    pub pl_surface: Option<Vec<PlSurfacePoint>>,
}

const CONTRACT_MULTIPLIER: f64 = 100.0;
const PAYOFF_SAMPLES: usize = 200;
const DAYS_PER_YEAR: f64 = 365.0;

pub fn compute(inputs: &OptionsInputs) -> OptionsResult {
    let prices = price_range(inputs.current_price, &inputs.legs);
    let payoff_data: Vec<PayoffPoint> = prices
        .iter()
        .map(|&price| payoff_at_price(price, &inputs.legs))
        .collect();

    let profits: Vec<f64> = payoff_data.iter().map(|p| p.profit).collect();
    let max_profit = find_max_profit(&profits);
    let max_loss = find_max_loss(&profits, &payoff_data);
    let breakevens = find_breakevens(&payoff_data);
    let capital_required = capital_required(&inputs.legs, inputs.current_price);

    let mut greeks = None;
    let mut probability_of_profit = None;
    let mut pl_surface = None;

    if let Some(iv) = inputs.implied_volatility {
        if iv > 0.0 {
            let vol = iv / 100.0;
            let rate = inputs.risk_free_rate / 100.0;
            let time = inputs.days_to_expiration as f64 / DAYS_PER_YEAR;
            greeks = Some(aggregate_greeks(&inputs.legs, inputs.current_price, vol, rate, time));
            probability_of_profit = Some(probability_of_profit_estimate(
                inputs.current_price,
                &inputs.legs,
                vol,
                rate,
                time,
            ));
            pl_surface = Some(pl_surface_grid(
                &inputs.legs,
                inputs.current_price,
                vol,
                rate,
                inputs.days_to_expiration,
            ));
        }
    }

    let risk_reward_ratio = match (max_profit, max_loss) {
        (Some(profit), Some(loss)) if loss != 0.0 => Some((profit / loss).abs()),
        _ => None,
    };

    OptionsResult {
        payoff_data,
        max_profit,
        max_loss,
        breakevens,
        risk_reward_ratio,
        capital_required,
        greeks,
        probability_of_profit,
        pl_surface,
    }
}

pub fn default_inputs() -> OptionsInputs {
    let current_price = 100.0;
    OptionsInputs {
        legs: strategy_legs(OptionStrategy::LongCall, current_price),
        current_price,
        implied_volatility: Some(30.0),
        risk_free_rate: 5.0,
        days_to_expiration: 30,
    }
}

pub fn strategy_legs(strategy: OptionStrategy, current_price: f64) -> Vec<OptionLeg> {
    use Direction::{Buy, Sell};
    use OptionType::{Call, Put};

    let at = current_price.round();
    let pct = |factor: f64| (current_price * factor).round();

    match strategy {
        OptionStrategy::LongCall | OptionStrategy::Custom => {
            vec![OptionLeg::new(Call, Buy, at, 5.0, 1)]
        }
        OptionStrategy::LongPut => vec![OptionLeg::new(Put, Buy, at, 5.0, 1)],
        OptionStrategy::CoveredCall => vec![OptionLeg::new(Call, Sell, pct(1.05), 3.0, 1)],
        OptionStrategy::CashSecuredPut => vec![OptionLeg::new(Put, Sell, pct(0.95), 3.0, 1)],
        OptionStrategy::BullCallSpread => vec![
            OptionLeg::new(Call, Buy, at, 5.0, 1),
            OptionLeg::new(Call, Sell, pct(1.1), 2.0, 1),
        ],
        OptionStrategy::BearPutSpread => vec![
            OptionLeg::new(Put, Buy, at, 5.0, 1),
            OptionLeg::new(Put, Sell, pct(0.9), 2.0, 1),
        ],
        OptionStrategy::IronCondor => vec![
            OptionLeg::new(Put, Buy, pct(0.9), 1.5, 1),
            OptionLeg::new(Put, Sell, pct(0.95), 3.0, 1),
            OptionLeg::new(Call, Sell, pct(1.05), 3.0, 1),
            OptionLeg::new(Call, Buy, pct(1.1), 1.5, 1),
        ],
        OptionStrategy::Straddle => vec![
            OptionLeg::new(Call, Buy, at, 5.0, 1),
            OptionLeg::new(Put, Buy, at, 5.0, 1),
        ],
        OptionStrategy::Strangle => vec![
            OptionLeg::new(Call, Buy, pct(1.05), 3.0, 1),
            OptionLeg::new(Put, Buy, pct(0.95), 3.0, 1),
        ],
        OptionStrategy::Butterfly => vec![
            OptionLeg::new(Call, Buy, pct(0.95), 7.0, 1),
            OptionLeg::new(Call, Sell, at, 4.0, 2),
            OptionLeg::new(Call, Buy, pct(1.05), 2.0, 1),
        ],
    }
}

fn price_range(current_price: f64, legs: &[OptionLeg]) -> Vec<f64> {
    let mut min = current_price;
    let mut max = current_price;
    for leg in legs {
        min = min.min(leg.strike_price);
        max = max.max(leg.strike_price);
    }

    let span = max - min;
    let padding = (span * 0.5).max(current_price * 0.3);
    let low = (min - padding).max(0.0);
    let high = max + padding;
    let step = (high - low) / PAYOFF_SAMPLES as f64;

    let mut prices = Vec::with_capacity(PAYOFF_SAMPLES + 1);
    let mut p = low;
    while p <= high {
        prices.push((p * 100.0).round() / 100.0);
        p += step;
    }
    prices
}

fn intrinsic_value(option_type: OptionType, price: f64, strike: f64) -> f64 {
    match option_type {
        OptionType::Call => (price - strike).max(0.0),
        OptionType::Put => (strike - price).max(0.0),
    }
}

fn payoff_at_price(price_at_expiry: f64, legs: &[OptionLeg]) -> PayoffPoint {
    let mut total_profit = 0.0;
    let mut total_cost = 0.0;

    for leg in legs {
        let scale = leg.direction.sign() * leg.quantity as f64 * CONTRACT_MULTIPLIER;
        let intrinsic = intrinsic_value(leg.option_type, price_at_expiry, leg.strike_price);
        total_profit += (intrinsic - leg.premium) * scale;
        total_cost += leg.premium * leg.quantity as f64 * CONTRACT_MULTIPLIER * leg.direction.sign();
    }

    PayoffPoint {
        price: price_at_expiry,
        profit: total_profit,
        profit_percent: if total_cost != 0.0 {
            total_profit / total_cost.abs() * 100.0
        } else {
            0.0
        },
    }
}

// Profit still strictly climbing at the sampled boundary means the tail is
// unbounded; a plateau is a genuine cap.
fn find_max_profit(profits: &[f64]) -> Option<f64> {
    if profits.len() < 2 {
        return profits.first().copied();
    }
    let last = profits.len() - 1;
    if profits[last] > profits[last - 1] && profits[last] > profits[last / 2] {
        return None;
    }
    Some(profits.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

fn find_max_loss(profits: &[f64], data: &[PayoffPoint]) -> Option<f64> {
    if profits.len() < 2 {
        return profits.first().copied();
    }
    let min = profits.iter().copied().fold(f64::INFINITY, f64::min);
    if profits[0] < profits[1] && profits[0] < profits[profits.len() / 2] {
        if data[0].price <= 0.01 {
            // The underlying cannot fall below zero, so the loss is capped.
            return Some(min);
        }
        return None;
    }
    Some(min)
}

fn find_breakevens(data: &[PayoffPoint]) -> Vec<f64> {
    let mut breakevens = Vec::new();
    for window in data.windows(2) {
        let (prev, next) = (window[0], window[1]);
        let crosses = (prev.profit <= 0.0 && next.profit >= 0.0)
            || (prev.profit >= 0.0 && next.profit <= 0.0);
        if !crosses {
            continue;
        }
        let denom = prev.profit.abs() + next.profit.abs();
        if denom <= f64::EPSILON {
            continue;
        }
        let ratio = prev.profit.abs() / denom;
        let breakeven = prev.price + ratio * (next.price - prev.price);
        breakevens.push((breakeven * 100.0).round() / 100.0);
    }
    breakevens
}

fn capital_required(legs: &[OptionLeg], current_price: f64) -> f64 {
    let mut capital = 0.0;
    for leg in legs {
        let contracts = leg.quantity as f64 * CONTRACT_MULTIPLIER;
        match leg.direction {
            Direction::Buy => capital += leg.premium * contracts,
            Direction::Sell => match leg.option_type {
                // Collateral estimates, not a real margin engine.
                OptionType::Call => capital += current_price * contracts,
                OptionType::Put => capital += leg.strike_price * contracts,
            },
        }
    }
    capital
}

fn aggregate_greeks(
    legs: &[OptionLeg],
    spot_price: f64,
    volatility: f64,
    risk_free_rate: f64,
    time_to_expiry: f64,
) -> Greeks {
    let mut totals = Greeks {
        delta: 0.0,
        gamma: 0.0,
        theta: 0.0,
        vega: 0.0,
        rho: 0.0,
    };

    for leg in legs {
        let scale = leg.direction.sign() * leg.quantity as f64 * CONTRACT_MULTIPLIER;
        let result = black_scholes::price(&BsParams {
            spot_price,
            strike_price: leg.strike_price,
            time_to_expiry,
            risk_free_rate,
            volatility,
            option_type: leg.option_type,
        });

        totals.delta += result.delta * scale;
        totals.gamma += result.gamma * scale;
        totals.theta += result.theta * scale;
        totals.vega += result.vega * scale;
        totals.rho += result.rho * scale;
    }

    totals
}

fn probability_of_profit_estimate(
    spot_price: f64,
    legs: &[OptionLeg],
    volatility: f64,
    risk_free_rate: f64,
    time_to_expiry: f64,
) -> f64 {
    let prices = price_range(spot_price, legs);
    let payoffs: Vec<PayoffPoint> = prices
        .iter()
        .map(|&price| payoff_at_price(price, legs))
        .collect();

    let sqrt_t = time_to_expiry.sqrt();
    let drift = (risk_free_rate - 0.5 * volatility * volatility) * time_to_expiry;
    let spread = volatility * sqrt_t;
    if spread <= 0.0 {
        // At expiry the price distribution collapses onto the spot.
        return if payoff_at_price(spot_price, legs).profit > 0.0 {
            100.0
        } else {
            0.0
        };
    }

    // Weight each profitable interval by its lognormal probability mass.
    let d_score = |price: f64| ((price / spot_price).ln() - drift) / spread;

    let mut profit_probability = 0.0;
    for idx in 1..prices.len() {
        if prices[idx] <= 0.0 {
            continue;
        }
        let upper = black_scholes::norm_cdf(d_score(prices[idx]));
        let lower = black_scholes::norm_cdf(d_score(prices[idx - 1].max(f64::MIN_POSITIVE)));
        if payoffs[idx].profit > 0.0 {
            profit_probability += (upper - lower).abs();
        }
    }

    (profit_probability * 100.0).clamp(0.0, 100.0)
}

fn pl_surface_grid(
    legs: &[OptionLeg],
    spot_price: f64,
    volatility: f64,
    risk_free_rate: f64,
    days_to_expiration: u32,
) -> Vec<PlSurfacePoint> {
    let prices = price_range(spot_price, legs);
    let price_step = (prices.len() / 30).max(1);
    let dte_steps: Vec<u32> = [
        0,
        1,
        3,
        7,
        14,
        21,
        days_to_expiration / 2,
        days_to_expiration,
    ]
    .into_iter()
    .filter(|&d| d <= days_to_expiration)
    .collect();

    let mut surface = Vec::new();
    for &dte in &dte_steps {
        let time = dte as f64 / DAYS_PER_YEAR;
        for price in prices.iter().step_by(price_step) {
            let mut pl = 0.0;
            for leg in legs {
                let scale = leg.direction.sign() * leg.quantity as f64 * CONTRACT_MULTIPLIER;
                let value = if time <= 0.0 {
                    intrinsic_value(leg.option_type, *price, leg.strike_price)
                } else {
                    black_scholes::price(&BsParams {
                        spot_price: *price,
                        strike_price: leg.strike_price,
                        time_to_expiry: time,
                        risk_free_rate,
                        volatility,
                        option_type: leg.option_type,
                    })
                    .price
                };
                pl += (value - leg.premium) * scale;
            }
            surface.push(PlSurfacePoint {
                price: *price,
                dte,
                pl,
            });
        }
    }

    surface
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, proptest};

    fn assert_approx_tol(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    fn leg(
        option_type: OptionType,
        direction: Direction,
        strike: f64,
        premium: f64,
        quantity: u32,
    ) -> OptionLeg {
        OptionLeg {
            id: format!("{strike}-{premium}"),
            option_type,
            direction,
            strike_price: strike,
            premium,
            quantity,
        }
    }

    fn long_call_inputs() -> OptionsInputs {
        OptionsInputs {
            legs: vec![leg(OptionType::Call, Direction::Buy, 100.0, 5.0, 1)],
            current_price: 100.0,
            implied_volatility: Some(30.0),
            risk_free_rate: 5.0,
            days_to_expiration: 30,
        }
    }

    #[test]
    fn payoff_equals_intrinsic_minus_premium_at_every_sample() {
        let inputs = long_call_inputs();
        let result = compute(&inputs);
        for point in &result.payoff_data {
            let expected = ((point.price - 100.0).max(0.0) - 5.0) * 100.0;
            assert_approx_tol(point.profit, expected, 1e-9);
        }
    }

    #[test]
    fn long_call_has_bounded_loss_and_unbounded_profit() {
        let result = compute(&long_call_inputs());
        assert!(result.max_profit.is_none());
        assert_approx_tol(result.max_loss.unwrap(), -500.0, 1e-9);
        assert!(result.risk_reward_ratio.is_none());
    }

    #[test]
    fn long_call_breakeven_is_strike_plus_premium() {
        let result = compute(&long_call_inputs());
        assert_eq!(result.breakevens.len(), 1);
        assert_approx_tol(result.breakevens[0], 105.0, 0.5);
    }

    #[test]
    fn short_put_loss_is_unbounded_until_range_reaches_zero() {
        let inputs = OptionsInputs {
            legs: vec![leg(OptionType::Put, Direction::Sell, 100.0, 5.0, 1)],
            current_price: 100.0,
            implied_volatility: None,
            risk_free_rate: 5.0,
            days_to_expiration: 30,
        };
        let result = compute(&inputs);
        // Loss still steepening at the left boundary and price never samples 0.
        assert!(result.max_loss.is_none());
        assert_approx_tol(result.max_profit.unwrap(), 500.0, 1e-9);
    }

    #[test]
    fn short_put_loss_is_capped_when_range_hits_the_zero_floor() {
        let inputs = OptionsInputs {
            legs: vec![leg(OptionType::Put, Direction::Sell, 10.0, 3.0, 1)],
            current_price: 40.0,
            implied_volatility: None,
            risk_free_rate: 5.0,
            days_to_expiration: 30,
        };
        let result = compute(&inputs);
        // Range bottoms out at price 0, where the loss is (premium - strike).
        assert_approx_tol(result.max_loss.unwrap(), (3.0 - 10.0) * 100.0, 1e-9);
        assert_approx_tol(result.max_profit.unwrap(), 300.0, 1e-9);
    }

    #[test]
    fn bull_call_spread_has_bounded_extremes() {
        let inputs = OptionsInputs {
            legs: vec![
                leg(OptionType::Call, Direction::Buy, 100.0, 5.0, 1),
                leg(OptionType::Call, Direction::Sell, 110.0, 2.0, 1),
            ],
            current_price: 100.0,
            implied_volatility: Some(25.0),
            risk_free_rate: 5.0,
            days_to_expiration: 45,
        };
        let result = compute(&inputs);
        // Net debit 3: max loss 300, max profit (10 - 3) * 100 = 700.
        assert_approx_tol(result.max_loss.unwrap(), -300.0, 1e-9);
        assert_approx_tol(result.max_profit.unwrap(), 700.0, 1e-9);
        assert_approx_tol(result.risk_reward_ratio.unwrap(), 700.0 / 300.0, 1e-9);
    }

    #[test]
    fn straddle_has_two_breakevens() {
        let inputs = OptionsInputs {
            legs: vec![
                leg(OptionType::Call, Direction::Buy, 100.0, 5.0, 1),
                leg(OptionType::Put, Direction::Buy, 100.0, 5.0, 1),
            ],
            current_price: 100.0,
            implied_volatility: None,
            risk_free_rate: 5.0,
            days_to_expiration: 30,
        };
        let result = compute(&inputs);
        assert_eq!(result.breakevens.len(), 2);
        assert_approx_tol(result.breakevens[0], 90.0, 0.5);
        assert_approx_tol(result.breakevens[1], 110.0, 0.5);
    }

    #[test]
    fn capital_required_covers_bought_premium_and_sold_collateral() {
        let inputs = OptionsInputs {
            legs: vec![
                leg(OptionType::Call, Direction::Buy, 100.0, 5.0, 2),
                leg(OptionType::Call, Direction::Sell, 110.0, 2.0, 1),
                leg(OptionType::Put, Direction::Sell, 90.0, 3.0, 1),
            ],
            current_price: 100.0,
            implied_volatility: None,
            risk_free_rate: 5.0,
            days_to_expiration: 30,
        };
        let result = compute(&inputs);
        // 5*2*100 bought premium + 100*100 naked call + 90*100 secured put.
        assert_approx_tol(result.capital_required, 1_000.0 + 10_000.0 + 9_000.0, 1e-9);
    }

    #[test]
    fn greeks_require_implied_volatility() {
        let mut inputs = long_call_inputs();
        inputs.implied_volatility = None;
        let result = compute(&inputs);
        assert!(result.greeks.is_none());
        assert!(result.probability_of_profit.is_none());
        assert!(result.pl_surface.is_none());

        inputs.implied_volatility = Some(0.0);
        let result = compute(&inputs);
        assert!(result.greeks.is_none());
    }

    #[test]
    fn long_call_greeks_are_quantity_scaled() {
        let result = compute(&long_call_inputs());
        let greeks = result.greeks.unwrap();
        // A single near-the-money long call: delta about 0.5 per share, x100.
        assert!(greeks.delta > 30.0 && greeks.delta < 70.0);
        assert!(greeks.gamma > 0.0);
        assert!(greeks.theta < 0.0);
        assert!(greeks.vega > 0.0);
    }

    #[test]
    fn opposite_legs_cancel_aggregated_greeks() {
        let inputs = OptionsInputs {
            legs: vec![
                leg(OptionType::Call, Direction::Buy, 100.0, 5.0, 1),
                leg(OptionType::Call, Direction::Sell, 100.0, 5.0, 1),
            ],
            current_price: 100.0,
            implied_volatility: Some(30.0),
            risk_free_rate: 5.0,
            days_to_expiration: 30,
        };
        let greeks = compute(&inputs).greeks.unwrap();
        assert_approx_tol(greeks.delta, 0.0, 1e-9);
        assert_approx_tol(greeks.gamma, 0.0, 1e-9);
        assert_approx_tol(greeks.vega, 0.0, 1e-9);
    }

    #[test]
    fn probability_of_profit_stays_in_percent_range() {
        let result = compute(&long_call_inputs());
        let pop = result.probability_of_profit.unwrap();
        assert!((0.0..=100.0).contains(&pop));
        // A long ATM call should profit materially less than half the time.
        assert!(pop < 60.0);
    }

    #[test]
    fn probability_of_profit_is_defined_at_expiry() {
        let mut inputs = long_call_inputs();
        inputs.days_to_expiration = 0;
        let result = compute(&inputs);
        // ATM call bought for a premium is not profitable at the spot itself.
        assert_approx_tol(result.probability_of_profit.unwrap(), 0.0, 1e-12);
    }

    #[test]
    fn pl_surface_includes_expiry_and_full_dte() {
        let result = compute(&long_call_inputs());
        let surface = result.pl_surface.unwrap();
        assert!(surface.iter().any(|p| p.dte == 0));
        assert!(surface.iter().any(|p| p.dte == 30));
        assert!(surface.iter().all(|p| p.dte <= 30));
    }

    #[test]
    fn empty_legs_produce_flat_zero_result() {
        let inputs = OptionsInputs {
            legs: Vec::new(),
            current_price: 100.0,
            implied_volatility: Some(30.0),
            risk_free_rate: 5.0,
            days_to_expiration: 30,
        };
        let result = compute(&inputs);
        assert!(result.payoff_data.iter().all(|p| p.profit == 0.0));
        assert_approx_tol(result.capital_required, 0.0, 1e-12);
        assert!(result.breakevens.is_empty());
        assert_approx_tol(result.max_profit.unwrap(), 0.0, 1e-12);
    }

    #[test]
    fn strategy_presets_build_expected_shapes() {
        assert_eq!(strategy_legs(OptionStrategy::LongCall, 100.0).len(), 1);
        assert_eq!(strategy_legs(OptionStrategy::IronCondor, 100.0).len(), 4);
        let butterfly = strategy_legs(OptionStrategy::Butterfly, 100.0);
        assert_eq!(butterfly.len(), 3);
        assert_eq!(butterfly[1].quantity, 2);

        let straddle = strategy_legs(OptionStrategy::Straddle, 100.0);
        assert_eq!(straddle[0].strike_price, straddle[1].strike_price);
        assert_ne!(straddle[0].id, straddle[1].id);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(32))]

        #[test]
        fn prop_payoff_is_sum_of_leg_intrinsics(
            strike in 50u32..150,
            premium_cents in 1u32..2000,
            quantity in 1u32..5
        ) {
            let premium = premium_cents as f64 / 100.0;
            let inputs = OptionsInputs {
                legs: vec![leg(OptionType::Put, Direction::Buy, strike as f64, premium, quantity)],
                current_price: 100.0,
                implied_volatility: None,
                risk_free_rate: 5.0,
                days_to_expiration: 30,
            };
            let result = compute(&inputs);
            for point in &result.payoff_data {
                let intrinsic = (strike as f64 - point.price).max(0.0);
                let expected = (intrinsic - premium) * quantity as f64 * 100.0;
                prop_assert!((point.profit - expected).abs() < 1e-9);
            }
        }

        #[test]
        fn prop_long_option_max_loss_is_premium_paid(
            strike in 80u32..120,
            premium_cents in 100u32..1500,
            quantity in 1u32..4
        ) {
            let premium = premium_cents as f64 / 100.0;
            let inputs = OptionsInputs {
                legs: vec![leg(OptionType::Call, Direction::Buy, strike as f64, premium, quantity)],
                current_price: 100.0,
                implied_volatility: None,
                risk_free_rate: 5.0,
                days_to_expiration: 30,
            };
            let result = compute(&inputs);
            let expected_loss = -premium * quantity as f64 * 100.0;
            prop_assert!((result.max_loss.unwrap() - expected_loss).abs() < 1e-9);
            prop_assert!(result.max_profit.is_none());
        }
    }
}
