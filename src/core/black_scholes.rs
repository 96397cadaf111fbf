use std::f64::consts::PI;

use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

#[derive(Debug, Clone, Copy)]
pub struct BsParams {
    pub spot_price: f64,
    pub strike_price: f64,
    pub time_to_expiry: f64,
    pub risk_free_rate: f64,
    pub volatility: f64,
    pub option_type: OptionType,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BsResult {
    pub price: f64,
    pub delta: f64,
    pub gamma: f64,
    pub theta: f64,
    pub vega: f64,
    pub rho: f64,
    pub d1: f64,
    pub d2: f64,
}

const IV_INITIAL_GUESS: f64 = 0.3;
const IV_MIN: f64 = 0.001;
const IV_MAX: f64 = 5.0;
const IV_MAX_ITERATIONS: u32 = 100;
const IV_PRICE_TOLERANCE: f64 = 0.0001;
const IV_VEGA_FLOOR: f64 = 0.000_01;

// Abramowitz & Stegun rational approximation of the standard normal CDF.
pub fn norm_cdf(x: f64) -> f64 {
    if x < -10.0 {
        return 0.0;
    }
    if x > 10.0 {
        return 1.0;
    }

    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let abs_x = x.abs();
    let t = 1.0 / (1.0 + P * abs_x);
    let y = 1.0
        - (((((A5 * t + A4) * t) + A3) * t + A2) * t + A1) * t * (-abs_x * abs_x / 2.0).exp();

    0.5 * (1.0 + sign * y)
}

pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

pub fn price(params: &BsParams) -> BsResult {
    let BsParams {
        spot_price: s,
        strike_price: k,
        time_to_expiry: t,
        risk_free_rate: r,
        volatility: sigma,
        option_type,
    } = *params;

    if t <= 0.0 {
        let (intrinsic, delta) = match option_type {
            OptionType::Call => ((s - k).max(0.0), if s > k { 1.0 } else { 0.0 }),
            OptionType::Put => ((k - s).max(0.0), if s < k { -1.0 } else { 0.0 }),
        };
        return BsResult {
            price: intrinsic,
            delta,
            gamma: 0.0,
            theta: 0.0,
            vega: 0.0,
            rho: 0.0,
            d1: 0.0,
            d2: 0.0,
        };
    }

    let sqrt_t = t.sqrt();
    let d1 = ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / (sigma * sqrt_t);
    let d2 = d1 - sigma * sqrt_t;

    let nd1 = norm_cdf(d1);
    let nd2 = norm_cdf(d2);
    let n_neg_d1 = norm_cdf(-d1);
    let n_neg_d2 = norm_cdf(-d2);
    let pdf_d1 = norm_pdf(d1);

    let discount = (-r * t).exp();
    let (price, delta, rho) = match option_type {
        OptionType::Call => (
            s * nd1 - k * discount * nd2,
            nd1,
            k * t * discount * nd2 / 100.0,
        ),
        OptionType::Put => (
            k * discount * n_neg_d2 - s * n_neg_d1,
            nd1 - 1.0,
            -k * t * discount * n_neg_d2 / 100.0,
        ),
    };

    let gamma = pdf_d1 / (s * sigma * sqrt_t);
    let carry = match option_type {
        OptionType::Call => nd2,
        OptionType::Put => -n_neg_d2,
    };
    let theta = (-(s * pdf_d1 * sigma) / (2.0 * sqrt_t) - r * k * discount * carry) / 365.0;
    let vega = s * pdf_d1 * sqrt_t / 100.0;

    BsResult {
        price,
        delta,
        gamma,
        theta,
        vega,
        rho,
        d1,
        d2,
    }
}

pub fn implied_volatility(
    market_price: f64,
    spot_price: f64,
    strike_price: f64,
    time_to_expiry: f64,
    risk_free_rate: f64,
    option_type: OptionType,
) -> Option<f64> {
    let mut sigma = IV_INITIAL_GUESS;

    for _ in 0..IV_MAX_ITERATIONS {
        let result = price(&BsParams {
            spot_price,
            strike_price,
            time_to_expiry,
            risk_free_rate,
            volatility: sigma,
            option_type,
        });

        let diff = result.price - market_price;
        if diff.abs() < IV_PRICE_TOLERANCE {
            return Some(sigma);
        }

        // Newton-Raphson uses the unscaled vega.
        let vega = spot_price * norm_pdf(result.d1) * time_to_expiry.sqrt();
        if vega < IV_VEGA_FLOOR {
            return None;
        }

        sigma -= diff / vega;
        sigma = sigma.clamp(IV_MIN, IV_MAX);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_approx_tol(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    fn call(spot: f64, strike: f64, t: f64, r: f64, sigma: f64) -> BsResult {
        price(&BsParams {
            spot_price: spot,
            strike_price: strike,
            time_to_expiry: t,
            risk_free_rate: r,
            volatility: sigma,
            option_type: OptionType::Call,
        })
    }

    fn put(spot: f64, strike: f64, t: f64, r: f64, sigma: f64) -> BsResult {
        price(&BsParams {
            spot_price: spot,
            strike_price: strike,
            time_to_expiry: t,
            risk_free_rate: r,
            volatility: sigma,
            option_type: OptionType::Put,
        })
    }

    #[test]
    fn cdf_matches_known_values() {
        assert_approx_tol(norm_cdf(0.0), 0.5, 1e-7);
        assert_approx_tol(norm_cdf(1.0), 0.8413, 1e-3);
        assert_approx_tol(norm_cdf(-1.0), 0.1587, 1e-3);
        assert_approx_tol(norm_cdf(2.0), 0.9772, 1e-3);
        assert_approx_tol(norm_cdf(-11.0), 0.0, 0.0);
        assert_approx_tol(norm_cdf(11.0), 1.0, 0.0);
    }

    #[test]
    fn pdf_is_symmetric_and_peaks_at_zero() {
        assert_approx_tol(norm_pdf(0.0), 0.398942, 1e-6);
        assert_approx_tol(norm_pdf(1.5), norm_pdf(-1.5), 1e-12);
        assert!(norm_pdf(0.0) > norm_pdf(0.5));
    }

    #[test]
    fn atm_call_matches_reference_price() {
        // S=100, K=100, T=1, r=5%, sigma=20%: classic textbook value ~10.45.
        let result = call(100.0, 100.0, 1.0, 0.05, 0.2);
        assert_approx_tol(result.price, 10.4506, 1e-3);
        assert_approx_tol(result.delta, 0.6368, 1e-3);
    }

    #[test]
    fn put_call_parity_holds() {
        let (s, k, t, r, sigma) = (105.0, 100.0, 0.5, 0.04, 0.25);
        let c = call(s, k, t, r, sigma);
        let p = put(s, k, t, r, sigma);
        let parity = c.price - p.price - (s - k * (-r * t).exp());
        assert_approx_tol(parity, 0.0, 1e-9);
    }

    #[test]
    fn expired_option_degrades_to_intrinsic_value() {
        let c = call(110.0, 100.0, 0.0, 0.05, 0.2);
        assert_approx_tol(c.price, 10.0, 1e-12);
        assert_approx_tol(c.delta, 1.0, 1e-12);
        assert_approx_tol(c.gamma, 0.0, 1e-12);
        assert_approx_tol(c.vega, 0.0, 1e-12);

        let p = put(90.0, 100.0, -0.1, 0.05, 0.2);
        assert_approx_tol(p.price, 10.0, 1e-12);
        assert_approx_tol(p.delta, -1.0, 1e-12);
    }

    #[test]
    fn price_converges_to_intrinsic_near_expiry() {
        let intrinsic = 10.0;
        let near = call(110.0, 100.0, 1e-6, 0.05, 0.2);
        assert_approx_tol(near.price, intrinsic, 1e-3);
    }

    #[test]
    fn atm_call_delta_approaches_half_near_expiry() {
        let near = call(100.0, 100.0, 1e-8, 0.05, 0.2);
        assert_approx_tol(near.delta, 0.5, 1e-3);
    }

    #[test]
    fn implied_volatility_round_trips() {
        let sigma = 0.35;
        let market = call(100.0, 110.0, 0.25, 0.03, sigma).price;
        let solved =
            implied_volatility(market, 100.0, 110.0, 0.25, 0.03, OptionType::Call).unwrap();
        assert_approx_tol(solved, sigma, 1e-3);
    }

    #[test]
    fn implied_volatility_fails_gracefully_on_tiny_vega() {
        // Deep out-of-the-money with nearly no time value: vega collapses.
        let solved = implied_volatility(5.0, 100.0, 500.0, 1e-9, 0.03, OptionType::Call);
        assert!(solved.is_none());
    }

    #[test]
    fn greeks_have_expected_signs() {
        let c = call(100.0, 100.0, 0.5, 0.05, 0.25);
        assert!(c.delta > 0.0 && c.delta < 1.0);
        assert!(c.gamma > 0.0);
        assert!(c.theta < 0.0);
        assert!(c.vega > 0.0);
        assert!(c.rho > 0.0);

        let p = put(100.0, 100.0, 0.5, 0.05, 0.25);
        assert!(p.delta < 0.0 && p.delta > -1.0);
        assert!(p.rho < 0.0);
    }
}
