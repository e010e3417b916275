use crate::markers::Markers;
use serde::Serialize;

/// Shown in place of an undefined or non-finite value.
pub const PLACEHOLDER: &str = "—";

pub fn format_value(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(value) if value.is_finite() => format!("{value:.decimals$}"),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Text readouts for the marker panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Kpis {
    pub q_star: String,
    pub max_profit: String,
    pub break_even: String,
    pub profit_limit: String,
}

impl Kpis {
    pub fn from_markers(markers: &Markers) -> Self {
        Self {
            q_star: format_value(markers.q_star, 3),
            max_profit: format_value(markers.max_profit, 2),
            break_even: format_value(markers.break_even, 3),
            profit_limit: format_value(markers.profit_limit, 3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_defined_values() {
        assert_eq!(format_value(Some(2.59871), 3), "2.599");
        assert_eq!(format_value(Some(-1.0), 2), "-1.00");
    }

    #[test]
    fn undefined_values_render_placeholder() {
        assert_eq!(format_value(None, 3), PLACEHOLDER);
        assert_eq!(format_value(Some(f64::NAN), 3), PLACEHOLDER);
        assert_eq!(format_value(Some(f64::INFINITY), 2), PLACEHOLDER);
    }

    #[test]
    fn kpis_use_marker_precision() {
        let kpis = Kpis::from_markers(&Markers {
            q_star: Some(6.7),
            max_profit: Some(9.81366),
            break_even: Some(2.6),
            profit_limit: None,
        });
        assert_eq!(kpis.q_star, "6.700");
        assert_eq!(kpis.max_profit, "9.81");
        assert_eq!(kpis.break_even, "2.600");
        assert_eq!(kpis.profit_limit, PLACEHOLDER);
    }
}
