//! Profit-maximizing and break-even markers.
//!
//! The maximum is read off the display series. Zeros of total profit are
//! located on a separate, finer scan of the profit function, refined inside
//! each sign-change bracket and deduplicated.

use crate::sampling::{grid_point_count, Series};
use crate::traits::ProfitFunction;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootRefinement {
    /// Fixed-iteration bisection of the sign-change bracket.
    #[default]
    Bisection,
    /// Newton steps on the analytic marginal profit, falling back to
    /// bisection when an iterate leaves the bracket.
    Newton,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerSettings {
    pub scan_step: f64,
    pub bisection_iterations: usize,
    pub dedup_tolerance: f64,
    pub min_profit_limit_gap: f64,
    pub refinement: RootRefinement,
}

impl Default for MarkerSettings {
    fn default() -> Self {
        Self {
            scan_step: 0.01,
            bisection_iterations: 30,
            dedup_tolerance: 1e-3,
            min_profit_limit_gap: 1.0,
            refinement: RootRefinement::Bisection,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Markers {
    #[serde(rename = "Qstar")]
    pub q_star: Option<f64>,
    #[serde(rename = "maxTP")]
    pub max_profit: Option<f64>,
    #[serde(rename = "breakEven")]
    pub break_even: Option<f64>,
    #[serde(rename = "profitLimit")]
    pub profit_limit: Option<f64>,
}

/// Locates Q*, the maximum profit, break-even and the profit limit.
///
/// Q* is the first sample with the largest finite TP. Zeros of `profit` are
/// searched on `[0, series.q_max()]`. Zeros within `dedup_tolerance` of the
/// origin are skipped, so FC = 0 never reports Q = 0 as break-even.
/// Break-even is the first remaining zero whatever the direction of the
/// crossing: with FC = 0 and profit positive from the start, it is the point
/// where profit returns to zero. The profit limit is the next zero, reported
/// only when it lies at least `min_profit_limit_gap` past break-even.
pub fn find_markers<F: ProfitFunction>(
    profit: &F,
    series: &Series,
    settings: &MarkerSettings,
) -> Markers {
    let mut markers = Markers::default();

    let mut best: Option<(f64, f64)> = None;
    for point in series {
        if !point.tp.is_finite() {
            continue;
        }
        // Strict comparison keeps the first of equal maxima.
        if best.map_or(true, |(_, best_tp)| point.tp > best_tp) {
            best = Some((point.q, point.tp));
        }
    }
    if let Some((q, tp)) = best {
        markers.q_star = Some(q);
        markers.max_profit = Some(tp);
    }

    let Some(q_max) = series.q_max() else {
        return markers;
    };
    let roots = find_profit_roots(profit, q_max, settings);

    // The origin is an implicit zero whenever FC = 0; it is never a break-even.
    let mut positive = roots
        .into_iter()
        .filter(|root| *root > settings.dedup_tolerance);
    markers.break_even = positive.next();
    if let (Some(break_even), Some(next)) = (markers.break_even, positive.next()) {
        if next - break_even >= settings.min_profit_limit_gap {
            markers.profit_limit = Some(next);
        }
    }

    tracing::debug!(
        q_star = ?markers.q_star,
        max_profit = ?markers.max_profit,
        break_even = ?markers.break_even,
        profit_limit = ?markers.profit_limit,
        "markers located"
    );
    markers
}

/// Zeros of `profit` on `[0, q_max]`, sorted ascending with near-duplicates
/// removed.
pub fn find_profit_roots<F: ProfitFunction>(
    profit: &F,
    q_max: f64,
    settings: &MarkerSettings,
) -> Vec<f64> {
    let count = grid_point_count(q_max, settings.scan_step);
    let mut roots = Vec::new();
    if count < 2 {
        return roots;
    }

    let mut prev_q = 0.0;
    let mut prev_tp = profit.profit(prev_q);
    for i in 1..count {
        let curr_q = i as f64 * settings.scan_step;
        let curr_tp = profit.profit(curr_q);
        if prev_tp.is_finite() && curr_tp.is_finite() {
            if prev_tp == 0.0 {
                roots.push(prev_q);
            } else if curr_tp == 0.0 {
                roots.push(curr_q);
            } else if prev_tp * curr_tp < 0.0 {
                roots.push(refine_root(profit, prev_q, curr_q, prev_tp, curr_tp, settings));
            }
        }
        prev_q = curr_q;
        prev_tp = curr_tp;
    }

    roots.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    roots.dedup_by(|current, kept| (*current - *kept).abs() <= settings.dedup_tolerance);
    tracing::trace!(count = roots.len(), q_max, "profit roots");
    roots
}

fn refine_root<F: ProfitFunction>(
    profit: &F,
    lo: f64,
    hi: f64,
    f_lo: f64,
    f_hi: f64,
    settings: &MarkerSettings,
) -> f64 {
    let iterations = settings.bisection_iterations;
    match settings.refinement {
        RootRefinement::Bisection => bisect(profit, lo, hi, f_lo, iterations),
        RootRefinement::Newton => newton(profit, lo, hi, f_lo, f_hi, iterations)
            .unwrap_or_else(|| bisect(profit, lo, hi, f_lo, iterations)),
    }
}

/// Halves `[lo, hi]` a fixed number of times and returns the final midpoint.
pub fn bisect<F: ProfitFunction>(
    profit: &F,
    mut lo: f64,
    mut hi: f64,
    mut f_lo: f64,
    iterations: usize,
) -> f64 {
    for _ in 0..iterations {
        let mid = 0.5 * (lo + hi);
        let f_mid = profit.profit(mid);
        if f_mid * f_lo <= 0.0 {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }
    0.5 * (lo + hi)
}

fn newton<F: ProfitFunction>(
    profit: &F,
    lo: f64,
    hi: f64,
    f_lo: f64,
    f_hi: f64,
    max_steps: usize,
) -> Option<f64> {
    let mut q = lo + (hi - lo) * f_lo / (f_lo - f_hi);
    for _ in 0..max_steps {
        let value = profit.profit(q);
        if !value.is_finite() {
            return None;
        }
        if value == 0.0 {
            return Some(q);
        }
        let slope = profit.marginal_profit(q);
        if !slope.is_finite() || slope == 0.0 {
            return None;
        }
        let next = q - value / slope;
        if !(lo..=hi).contains(&next) {
            return None;
        }
        if (next - q).abs() <= f64::EPSILON * (1.0 + q.abs()) {
            return Some(next);
        }
        q = next;
    }
    Some(q)
}
