//! Root application: a dashboard comparing a Base forecast against a
//! Comparison scenario across all chart components.

use dioxus::prelude::*;

use crate::components::{ChartLegend, ChartMetrics, FunnelChart, PercentBarChart, PieChart};
use crate::format;
use prism_types::{
    banded_gradient, DataPoint, MetricSpec, Scenario, ScenarioData, SeriesSlice, ValueFormatter,
    SCENARIO_COLORS,
};

static CSS: Asset = asset!("/assets/styles.css");

fn base_scenario() -> Scenario {
    Scenario::new("base", "Base", SCENARIO_COLORS[0])
}

fn comparison_scenario() -> Scenario {
    Scenario::new("comparison", "Comparison", SCENARIO_COLORS[1])
}

/// Pipeline stages for the funnel demo, both scenarios interleaved.
fn funnel_points() -> Vec<DataPoint> {
    let base = base_scenario();
    let compare = comparison_scenario();
    let stages = [
        ("Leads", 2500.0, 2100.0),
        ("Qualified", 1400.0, 1350.0),
        ("Proposals", 600.0, 720.0),
        ("Closed", 180.0, 240.0),
    ];
    stages
        .iter()
        .flat_map(|(name, base_value, compare_value)| {
            [
                DataPoint::new(*name, *base_value, base.color.clone())
                    .with_scenario(base.clone()),
                DataPoint::new(*name, *compare_value, compare.color.clone())
                    .with_scenario(compare.clone())
                    .with_index(1),
            ]
        })
        .collect()
}

/// Expense breakdown for the pie demo, shaded from the scenario color.
fn pie_points(scenario: &Scenario) -> Vec<DataPoint> {
    let items = [("Payroll", 5200.0), ("Marketing", 2400.0), ("Tooling", 900.0)];
    let band = banded_gradient(&scenario.color, items.len());
    items
        .iter()
        .zip(band)
        .map(|((name, value), color)| {
            DataPoint::new(*name, *value, color).with_scenario(scenario.clone())
        })
        .collect()
}

/// Department spend groups shared by the percent bar and the metrics table.
fn spend_groups() -> Vec<Vec<SeriesSlice>> {
    let base = base_scenario();
    let compare = comparison_scenario();
    vec![
        vec![
            SeriesSlice::new("Marketing", vec![100.0]).with_scenario(base.clone()),
            SeriesSlice::new("Sales", vec![200.0]).with_scenario(base.clone()),
            SeriesSlice::new("Operations", vec![75.0]).with_scenario(base),
        ],
        vec![
            SeriesSlice::new("Marketing", vec![50.0]).with_scenario(compare.clone()),
            SeriesSlice::new("Sales", vec![230.0]).with_scenario(compare.clone()),
            SeriesSlice::new("Operations", vec![325.0]).with_scenario(compare),
        ],
    ]
}

fn largest_item(series: &[SeriesSlice]) -> Option<f64> {
    series
        .iter()
        .filter_map(|slice| slice.data.first().copied())
        .fold(None, |max, v| Some(max.map_or(v, |m: f64| m.max(v))))
}

fn spend_metrics() -> Vec<MetricSpec> {
    let base = base_scenario();
    let compare = comparison_scenario();
    vec![
        MetricSpec::keyed("Total", "data").main(),
        MetricSpec::computed("Largest Item", largest_item)
            .with_color(base.name, base.color)
            .with_color(compare.name, compare.color),
    ]
}

#[component]
pub fn App() -> Element {
    let scenarios = vec![base_scenario(), comparison_scenario()];
    let funnel_data = funnel_points();
    let legend_data = funnel_data.clone();
    let spend = spend_groups();
    let metrics_data: ScenarioData = spend.iter().cloned().map(Some).collect();

    let legend_formatter: ValueFormatter = format::count;

    rsx! {
        document::Stylesheet { href: CSS }
        // The external charting collaborator; everything below only hands
        // it option objects.
        document::Script { src: "https://cdn.jsdelivr.net/npm/echarts@5.5.1/dist/echarts.min.js" }
        div { class: "app",
            header { class: "app-header",
                h1 { "Prism" }
                span { class: "app-subtitle", "Scenario comparison" }
                div { class: "scenario-chips",
                    for scenario in scenarios.iter() {
                        span {
                            key: "{scenario.id}",
                            class: "scenario-chip",
                            style: "border-color: {scenario.color};",
                            "{scenario.name}"
                        }
                    }
                }
            }
            main { class: "chart-grid",
                section { class: "chart-panel",
                    h2 { "Pipeline" }
                    FunnelChart {
                        id: "funnel-pipeline",
                        data: funnel_data,
                        value_formatter: format::count,
                    }
                    ChartLegend {
                        points: legend_data,
                        max_items: 6,
                        value_formatter: legend_formatter,
                    }
                }
                section { class: "chart-panel",
                    h2 { "Expenses" }
                    div { class: "pie-pair",
                        PieChart {
                            id: "pie-base",
                            data: pie_points(&base_scenario()),
                            value_formatter: format::monetary,
                        }
                        PieChart {
                            id: "pie-comparison",
                            data: pie_points(&comparison_scenario()),
                            is_comparison: true,
                            value_formatter: format::monetary,
                        }
                    }
                }
                section { class: "chart-panel",
                    h2 { "Spend Mix" }
                    PercentBarChart { id: "percent-spend", data: spend }
                }
                section { class: "chart-panel",
                    h2 { "Metrics" }
                    ChartMetrics {
                        data: metrics_data,
                        metrics: spend_metrics(),
                        scenarios: scenarios.clone(),
                        value_formatter: format::monetary,
                    }
                }
            }
        }
    }
}
