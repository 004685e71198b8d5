//! Scenario metrics comparison table.
//!
//! Renders per-scenario totals, one row per metric descriptor and — when
//! more than one scenario is present — a variance column computed by the
//! alternating-sign fold in `prism_types::metrics`.

use dioxus::prelude::*;

use crate::format;
use prism_types::{
    is_empty_value, metric_rows, scenario_totals, variance, MetricSpec, Scenario, ScenarioData,
    ValueFormatter,
};

/// Placeholder for null/missing/NaN values.
const EMPTY_VALUE: &str = "--";

#[derive(Props, Clone)]
pub struct ChartMetricsProps {
    /// One entry per scenario position; `None` marks a missing scenario.
    pub data: ScenarioData,
    /// Schema describing the metrics to display.
    pub metrics: Vec<MetricSpec>,
    /// Scenarios to compare, in column order.
    pub scenarios: Vec<Scenario>,
    /// Default formatter for values and totals; individual metrics may
    /// override it.
    #[props(default = format::monetary as ValueFormatter)]
    pub value_formatter: ValueFormatter,
}

// The formatter compares by address, like every fn pointer in props.
impl PartialEq for ChartMetricsProps {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
            && self.metrics == other.metrics
            && self.scenarios == other.scenarios
            && std::ptr::fn_addr_eq(self.value_formatter, other.value_formatter)
    }
}

#[component]
pub fn ChartMetrics(props: ChartMetricsProps) -> Element {
    let totals = scenario_totals(&props.data);
    let rows = metric_rows(&props.data, &props.metrics, &props.scenarios);
    let show_variance = props.scenarios.len() > 1;
    let total_variance = variance(totals.iter().copied().map(Some));
    let default_formatter = props.value_formatter;

    rsx! {
        div { class: "chart-metrics",
            table { class: "chart-metrics-table",
                thead {
                    tr { class: "metrics-row",
                        td { class: "metrics-cell-label" }
                        for (idx, scenario) in props.scenarios.iter().enumerate() {
                            th {
                                key: "{scenario.id}",
                                class: "metrics-scenario",
                                aria_label: "{scenario.name}",
                                ScenarioIcon {
                                    name: scenario.name.clone(),
                                    color: scenario.color.clone(),
                                }
                                div { class: "metrics-scenario-total",
                                    if let Some(total) = totals.get(idx) {
                                        "{default_formatter(*total)}"
                                    }
                                }
                            }
                        }
                        if show_variance {
                            th { class: "metrics-scenario metrics-scenario-variance",
                                span { class: "variance-icon", "\u{0394}" }
                                div { class: "metrics-scenario-total",
                                    "{default_formatter(total_variance)}"
                                }
                            }
                        }
                    }
                }
                tbody {
                    for row in rows.iter() {
                        {
                            let formatter = row.formatter.unwrap_or(default_formatter);
                            let row_class = if row.is_main_metric {
                                "metrics-row metrics-row-main"
                            } else {
                                "metrics-row"
                            };
                            rsx! {
                                tr { key: "{row.name}", class: "{row_class}",
                                    th { class: "metrics-cell metrics-cell-label", "{row.name}:" }
                                    for (scenario, value) in props.scenarios.iter().zip(row.values.iter()) {
                                        {
                                            let bullet = row.colors.get(&scenario.name).cloned();
                                            let text = match value {
                                                Some(v) if !v.is_nan() => formatter(*v),
                                                _ => EMPTY_VALUE.to_string(),
                                            };
                                            rsx! {
                                                td {
                                                    key: "{scenario.id}",
                                                    class: "metrics-cell metrics-cell-value",
                                                    style: "color: {scenario.color};",
                                                    div { class: "metrics-cell-content",
                                                        if let Some(color) = bullet {
                                                            span {
                                                                class: "metrics-bullet",
                                                                style: "background-color: {color};",
                                                            }
                                                        }
                                                        span { class: "metrics-value", "{text}" }
                                                    }
                                                }
                                            }
                                        }
                                    }
                                    if show_variance {
                                        td { class: "metrics-cell metrics-cell-variance",
                                            {variance_text(row.variance, formatter)}
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn variance_text(value: f64, formatter: ValueFormatter) -> String {
    if is_empty_value(Some(value)) {
        EMPTY_VALUE.to_string()
    } else {
        formatter(value)
    }
}

/// Small circular icon carrying the scenario's initial, used as the column
/// header marker.
#[component]
fn ScenarioIcon(name: String, color: String) -> Element {
    let initial: String = name.chars().take(1).collect();
    rsx! {
        span {
            class: "scenario-icon",
            style: "background-color: {color};",
            "{initial}"
        }
    }
}
