//! Serializable views of a model snapshot for the chart front-end.

use firm_core::chart::{chart_domain, reference_lines, ChartDomain, ChartKind, ReferenceLine};
use firm_core::format::Kpis;
use firm_core::{Markers, ModelSnapshot, Parameters, Series};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct ChartPayload {
    pub kind: ChartKind,
    pub title: &'static str,
    pub curves: Vec<&'static str>,
    pub domain: Option<ChartDomain>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ModelPayload<'a> {
    pub params: Parameters,
    pub series: &'a Series,
    pub markers: Markers,
    pub kpis: Kpis,
    pub charts: Vec<ChartPayload>,
    pub reference_lines: Vec<ReferenceLine>,
}

pub(crate) fn build_payload(snapshot: &ModelSnapshot) -> ModelPayload<'_> {
    let charts = ChartKind::ALL
        .iter()
        .map(|kind| ChartPayload {
            kind: *kind,
            title: kind.title(),
            curves: kind.curves().iter().map(|curve| curve.key()).collect(),
            domain: chart_domain(&snapshot.series, *kind),
        })
        .collect();

    ModelPayload {
        params: snapshot.params,
        series: &snapshot.series,
        markers: snapshot.markers,
        kpis: Kpis::from_markers(&snapshot.markers),
        charts,
        reference_lines: reference_lines(&snapshot.markers),
    }
}
