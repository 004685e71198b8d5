//! Shared chart types and the scenario comparison aggregator for Prism
//!
//! This crate contains the serializable data model consumed by the WASM
//! frontend plus the pure derivation logic behind it: legend grouping,
//! per-scenario totals and variance, scenario grouping for funnel-style
//! charts, and deterministic color banding. Everything here is stateless
//! and total over sparse input; derived structures are recomputed from
//! scratch on every call.

pub mod color;
pub mod funnel;
pub mod legend;
pub mod metrics;
pub mod model;

pub use color::{banded_gradient, comparison_pattern_fill, COMPARE_PATTERN_COLOR, SCENARIO_COLORS};
pub use funnel::group_by_scenario;
pub use legend::legend_items;
pub use metrics::{
    is_empty_value, metric_rows, scenario_totals, variance, ExcludePredicate, MetricGetter,
    MetricRow, MetricSpec, ScenarioData,
};
pub use model::{DataPoint, LegendItem, PatternFill, Scenario, SeriesFill, SeriesSlice};

/// Formats a numeric value for display.
///
/// Plain function pointers keep component props `Copy + PartialEq`, which
/// Dioxus requires, while still letting callers override formatting per
/// metric or per legend.
pub type ValueFormatter = fn(f64) -> String;

/// Address equality for optional formatters. Function pointers have no
/// meaningful structural comparison, so everything carrying one compares
/// it by address instead of deriving `PartialEq` over it.
pub fn formatter_eq(a: Option<ValueFormatter>, b: Option<ValueFormatter>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => std::ptr::fn_addr_eq(a, b),
        _ => false,
    }
}
