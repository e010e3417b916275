use crate::markers::Markers;
use crate::model::Sample;
use crate::sampling::Series;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("Unknown curve: {0}")]
    UnknownCurve(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Curve {
    TR,
    AR,
    MR,
    TC,
    AC,
    MC,
    TP,
    AP,
    MP,
}

impl Curve {
    pub const ALL: [Curve; 9] = [
        Curve::TR,
        Curve::AR,
        Curve::MR,
        Curve::TC,
        Curve::AC,
        Curve::MC,
        Curve::TP,
        Curve::AP,
        Curve::MP,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Curve::TR => "TR",
            Curve::AR => "AR",
            Curve::MR => "MR",
            Curve::TC => "TC",
            Curve::AC => "AC",
            Curve::MC => "MC",
            Curve::TP => "TP",
            Curve::AP => "AP",
            Curve::MP => "MP",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Curve::TR => "Total revenue",
            Curve::AR => "Average revenue",
            Curve::MR => "Marginal revenue",
            Curve::TC => "Total cost",
            Curve::AC => "Average cost",
            Curve::MC => "Marginal cost",
            Curve::TP => "Total profit",
            Curve::AP => "Average profit",
            Curve::MP => "Marginal profit",
        }
    }

    pub fn value(self, sample: &Sample) -> f64 {
        match self {
            Curve::TR => sample.tr,
            Curve::AR => sample.ar,
            Curve::MR => sample.mr,
            Curve::TC => sample.tc,
            Curve::AC => sample.ac,
            Curve::MC => sample.mc,
            Curve::TP => sample.tp,
            Curve::AP => sample.ap,
            Curve::MP => sample.mp,
        }
    }
}

impl FromStr for Curve {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Curve::ALL
            .iter()
            .copied()
            .find(|curve| curve.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ChartError::UnknownCurve(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Totals,
    UnitValues,
}

impl ChartKind {
    pub const ALL: [ChartKind; 2] = [ChartKind::Totals, ChartKind::UnitValues];

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::Totals => "Totals",
            ChartKind::UnitValues => "Unit values",
        }
    }

    pub fn curves(self) -> &'static [Curve] {
        match self {
            ChartKind::Totals => &[Curve::TR, Curve::TC, Curve::TP],
            ChartKind::UnitValues => &[
                Curve::AR,
                Curve::MR,
                Curve::AC,
                Curve::MC,
                Curve::AP,
                Curve::MP,
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartDomain {
    pub min: f64,
    pub max: f64,
}

/// Y-axis extent of every finite value the chart plots.
///
/// Returns `None` when nothing is finite. A flat range is widened by one unit
/// on each side so the axis stays drawable.
pub fn chart_domain(series: &Series, kind: ChartKind) -> Option<ChartDomain> {
    let mut extent: Option<(f64, f64)> = None;
    for sample in series {
        for curve in kind.curves() {
            let value = curve.value(sample);
            if !value.is_finite() {
                continue;
            }
            extent = Some(match extent {
                Some((min, max)) => (min.min(value), max.max(value)),
                None => (value, value),
            });
        }
    }
    extent.map(|(min, max)| {
        if min == max {
            ChartDomain {
                min: min - 1.0,
                max: max + 1.0,
            }
        } else {
            ChartDomain { min, max }
        }
    })
}

pub fn curve_values(series: &Series, curve: Curve) -> Vec<f64> {
    series.iter().map(|sample| curve.value(sample)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    ProfitMaximum,
    BreakEven,
    ProfitLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceLine {
    pub kind: ReferenceKind,
    pub label: &'static str,
    pub q: f64,
}

/// Vertical marker lines shared by both charts; undefined markers are
/// omitted.
pub fn reference_lines(markers: &Markers) -> Vec<ReferenceLine> {
    [
        (ReferenceKind::ProfitMaximum, "Q*", markers.q_star),
        (ReferenceKind::BreakEven, "Break-even", markers.break_even),
        (ReferenceKind::ProfitLimit, "Profit limit", markers.profit_limit),
    ]
    .into_iter()
    .filter_map(|(kind, label, q)| {
        q.filter(|value| value.is_finite())
            .map(|q| ReferenceLine { kind, label, q })
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Parameters;
    use crate::sampling::{sample, SamplingDomain};

    #[test]
    fn curve_keys_round_trip_through_from_str() {
        for curve in Curve::ALL {
            assert_eq!(curve.key().parse::<Curve>(), Ok(curve));
        }
        assert_eq!("tp".parse::<Curve>(), Ok(Curve::TP));
        let err = "XX".parse::<Curve>().unwrap_err();
        assert_eq!(err, ChartError::UnknownCurve("XX".to_string()));
        assert_eq!(err.to_string(), "Unknown curve: XX");
    }

    #[test]
    fn charts_partition_the_curves() {
        let mut all: Vec<Curve> = ChartKind::ALL
            .iter()
            .flat_map(|kind| kind.curves().iter().copied())
            .collect();
        all.sort_by_key(|curve| curve.key());
        let mut expected = Curve::ALL.to_vec();
        expected.sort_by_key(|curve| curve.key());
        assert_eq!(all, expected);
    }

    #[test]
    fn unit_domain_ignores_undefined_averages() {
        let params = Parameters::default();
        let series = sample(&params, &SamplingDomain::default());
        let domain = chart_domain(&series, ChartKind::UnitValues).expect("domain");
        assert!(domain.min.is_finite() && domain.max.is_finite());
        assert!(domain.min < domain.max);
        // AC at Q = 0.1 is (5 + 0.5 - 0.01 + 0.0001) / 0.1.
        assert!(domain.max >= series.samples()[1].ac);
    }

    #[test]
    fn totals_domain_covers_profit_and_cost() {
        let params = Parameters::default();
        let series = sample(&params, &SamplingDomain::default());
        let domain = chart_domain(&series, ChartKind::Totals).expect("domain");
        assert_eq!(domain.min, -5.0);
        for point in &series {
            assert!(point.tc <= domain.max && point.tr <= domain.max);
        }
    }

    #[test]
    fn flat_or_empty_domains() {
        let params = Parameters::new(0.0, 0.0, 0.0, 0.0, 0.0);
        let series = sample(&params, &SamplingDomain::default());
        let domain = chart_domain(&series, ChartKind::Totals).expect("domain");
        assert_eq!(domain, ChartDomain { min: -1.0, max: 1.0 });

        let nan = Parameters::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN, f64::NAN);
        let series = sample(&nan, &SamplingDomain::default());
        assert_eq!(chart_domain(&series, ChartKind::UnitValues), None);
        assert_eq!(chart_domain(&Series::default(), ChartKind::Totals), None);
    }

    #[test]
    fn reference_lines_skip_undefined_markers() {
        let markers = Markers {
            q_star: Some(6.7),
            max_profit: Some(9.8),
            break_even: Some(2.6),
            profit_limit: None,
        };
        let lines = reference_lines(&markers);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].kind, ReferenceKind::ProfitMaximum);
        assert_eq!(lines[1].q, 2.6);
        assert!(reference_lines(&Markers::default()).is_empty());
    }
}
