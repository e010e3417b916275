use crate::params::Parameters;
use crate::traits::ProfitFunction;
use serde::{Deserialize, Serialize};

/// One evaluated point of the firm model.
///
/// `ac` and `ap` are NaN at `q == 0`; consumers render them as undefined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    #[serde(rename = "Q")]
    pub q: f64,
    #[serde(rename = "TR")]
    pub tr: f64,
    #[serde(rename = "AR")]
    pub ar: f64,
    #[serde(rename = "MR")]
    pub mr: f64,
    #[serde(rename = "TC")]
    pub tc: f64,
    #[serde(rename = "AC")]
    pub ac: f64,
    #[serde(rename = "MC")]
    pub mc: f64,
    #[serde(rename = "TP")]
    pub tp: f64,
    #[serde(rename = "AP")]
    pub ap: f64,
    #[serde(rename = "MP")]
    pub mp: f64,
}

pub fn total_revenue(q: f64, params: &Parameters) -> f64 {
    params.p * q
}

pub fn total_cost(q: f64, params: &Parameters) -> f64 {
    params.fc + params.a * q - params.b * q * q + params.c * q * q * q
}

pub fn marginal_cost(q: f64, params: &Parameters) -> f64 {
    params.a - 2.0 * params.b * q + 3.0 * params.c * q * q
}

/// Evaluates every curve of the model at `q`.
pub fn evaluate(q: f64, params: &Parameters) -> Sample {
    let tr = total_revenue(q, params);
    let ar = params.p;
    let mr = params.p;
    let tc = total_cost(q, params);
    let mc = marginal_cost(q, params);
    let tp = tr - tc;
    let mp = mr - mc;
    let (ac, ap) = if q == 0.0 {
        (f64::NAN, f64::NAN)
    } else {
        (tc / q, tp / q)
    };

    Sample {
        q,
        tr,
        ar,
        mr,
        tc,
        ac,
        mc,
        tp,
        ap,
        mp,
    }
}

impl ProfitFunction for Parameters {
    fn profit(&self, q: f64) -> f64 {
        total_revenue(q, self) - total_cost(q, self)
    }

    fn marginal_profit(&self, q: f64) -> f64 {
        self.p - marginal_cost(q, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_reference_parameters() {
        let params = Parameters::default();
        let sample = evaluate(2.0, &params);
        assert_eq!(sample.tr, 10.0);
        assert_eq!(sample.ar, 5.0);
        assert_eq!(sample.mr, 5.0);
        // 5 + 5*2 - 1*4 + 0.1*8
        assert!((sample.tc - 11.8).abs() < 1e-12);
        assert!((sample.ac - 5.9).abs() < 1e-12);
        // 5 - 4 + 0.3*4
        assert!((sample.mc - 2.2).abs() < 1e-12);
        assert!((sample.tp + 1.8).abs() < 1e-12);
        assert!((sample.ap + 0.9).abs() < 1e-12);
        assert!((sample.mp - 2.8).abs() < 1e-12);
    }

    #[test]
    fn averages_are_undefined_at_origin() {
        let sample = evaluate(0.0, &Parameters::default());
        assert!(sample.ac.is_nan());
        assert!(sample.ap.is_nan());
        assert_eq!(sample.ar, 5.0);
        assert_eq!(sample.tc, 5.0);
        assert_eq!(sample.tp, -5.0);
    }

    #[test]
    fn zero_fixed_cost_gives_zero_profit_at_origin() {
        let params = Parameters::new(0.0, 3.0, 0.5, 0.2, 4.0);
        assert_eq!(evaluate(0.0, &params).tp, 0.0);
        assert_eq!(params.profit(0.0), 0.0);
    }

    #[test]
    fn profit_function_agrees_with_sample() {
        let params = Parameters::new(2.5, 4.0, 0.7, 0.05, 6.0);
        for i in 0..50 {
            let q = i as f64 * 0.3;
            let sample = evaluate(q, &params);
            assert!((params.profit(q) - sample.tp).abs() < 1e-9);
            assert_eq!(params.marginal_profit(q), sample.mp);
        }
    }

    #[test]
    fn marginal_profit_matches_finite_difference() {
        let params = Parameters::default();
        let h = 1e-6;
        for q in [0.5, 3.0, 7.25] {
            let numeric = (params.profit(q + h) - params.profit(q - h)) / (2.0 * h);
            assert!(
                (numeric - params.marginal_profit(q)).abs() < 1e-5,
                "dTP/dQ mismatch at q={q}"
            );
        }
    }

    #[test]
    fn negative_coefficients_are_accepted() {
        let params = Parameters::new(1.0, -2.0, -1.0, -0.5, 3.0);
        let sample = evaluate(1.0, &params);
        assert_eq!(sample.tc, 1.0 - 2.0 + 1.0 - 0.5);
        assert!(sample.tp.is_finite());
    }

    #[test]
    fn non_finite_inputs_propagate() {
        let params = Parameters::new(f64::NAN, 1.0, 1.0, 1.0, 1.0);
        let sample = evaluate(1.0, &params);
        assert!(sample.tc.is_nan());
        assert!(sample.tp.is_nan());
        assert_eq!(sample.tr, 1.0);
    }
}
