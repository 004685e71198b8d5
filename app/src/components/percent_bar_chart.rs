//! Horizontal bar chart with values stacked as percentages.
//!
//! Each scenario contributes one stack; slices within a stack take shades
//! from a banded gradient of the scenario color (or an explicit color map),
//! and comparison stacks render with the dot pattern.

use std::collections::BTreeMap;

use dioxus::prelude::*;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local as spawn;

use crate::echarts::{
    self, init_chart, on_window_resize, resize_chart, set_chart_option, to_option, ItemStyle,
    Label, Tooltip,
};
use crate::format;
use prism_types::{banded_gradient, comparison_pattern_fill, SeriesFill, SeriesSlice};

#[derive(Debug, Clone, Serialize)]
struct BarItem {
    value: f64,
    label: Label,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct BarSeries {
    #[serde(rename = "type")]
    kind: &'static str,
    name: String,
    stack: String,
    item_style: ItemStyle,
    data: Vec<BarItem>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct AxisLabel {
    show: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    formatter: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct Axis {
    #[serde(rename = "type")]
    kind: &'static str,
    show: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    axis_label: Option<AxisLabel>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct PercentBarOption {
    tooltip: Tooltip,
    x_axis: Axis,
    y_axis: Axis,
    series: Vec<BarSeries>,
}

/// Percentages of each slice within its stack, per category position.
/// Positions a slice does not cover count as zero; an all-zero category
/// yields zeros rather than dividing by zero.
fn percent_stack(group: &[SeriesSlice]) -> Vec<Vec<f64>> {
    let categories = group.iter().map(|s| s.data.len()).max().unwrap_or(0);
    let mut sums = vec![0.0f64; categories];
    for slice in group {
        for (idx, value) in slice.data.iter().enumerate() {
            sums[idx] += value;
        }
    }
    group
        .iter()
        .map(|slice| {
            (0..categories)
                .map(|idx| {
                    let value = slice.data.get(idx).copied().unwrap_or(0.0);
                    if sums[idx] == 0.0 {
                        0.0
                    } else {
                        value / sums[idx] * 100.0
                    }
                })
                .collect()
        })
        .collect()
}

/// Fill for one slice: the explicit color map wins (keyed by slice id,
/// falling back to name), then the scenario's banded gradient; comparison
/// stacks (any group after the first) swap in the dot pattern.
fn slice_fill(
    slice: &SeriesSlice,
    band: &[String],
    position: usize,
    group_index: usize,
    colors: &BTreeMap<String, String>,
) -> SeriesFill {
    let key = slice.id.as_deref().unwrap_or(&slice.name);
    let color = colors
        .get(key)
        .cloned()
        .or_else(|| band.get(position).cloned())
        .unwrap_or_default();
    if group_index > 0 {
        comparison_pattern_fill(&color)
    } else {
        SeriesFill::Solid(color)
    }
}

fn build_percent_bar_option(
    data: &[Vec<SeriesSlice>],
    colors: &BTreeMap<String, String>,
) -> PercentBarOption {
    let categories = data
        .iter()
        .flatten()
        .map(|slice| slice.data.len())
        .max()
        .unwrap_or(0);

    let mut series = Vec::new();
    for (group_index, group) in data.iter().enumerate() {
        let Some(scenario) = group.first().and_then(|s| s.scenario.clone()) else {
            continue;
        };
        let band = banded_gradient(&scenario.color, group.len());
        let percents = percent_stack(group);

        for (position, slice) in group.iter().enumerate() {
            let fill = slice_fill(slice, &band, position, group_index, colors);
            let items = percents[position]
                .iter()
                .map(|pct| BarItem {
                    value: *pct,
                    label: Label {
                        show: true,
                        formatter: Some(format::percent(*pct)),
                        position: Some("insideRight".to_string()),
                        color: Some(scenario.color.clone()),
                    },
                })
                .collect();
            series.push(BarSeries {
                kind: "bar",
                name: slice.name.clone(),
                stack: scenario.name.clone(),
                item_style: ItemStyle::from_fill(&fill).with_border("#fff", 1.0),
                data: items,
            });
        }
    }

    PercentBarOption {
        tooltip: Tooltip::item(),
        x_axis: Axis {
            kind: "value",
            show: true,
            min: Some(0.0),
            max: Some(100.0),
            data: None,
            axis_label: Some(AxisLabel {
                show: true,
                formatter: Some("{value}%".to_string()),
            }),
        },
        y_axis: Axis {
            kind: "category",
            show: false,
            min: None,
            max: None,
            data: Some((0..categories).map(|i| i.to_string()).collect()),
            axis_label: None,
        },
        series,
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct PercentBarChartProps {
    /// DOM id of the chart container; must be unique per page.
    pub id: String,
    /// One slice group per scenario, base first.
    pub data: Vec<Vec<SeriesSlice>>,
    /// Explicit color map for slices, keyed by slice id (or name).
    #[props(default)]
    pub colors: BTreeMap<String, String>,
    /// Render a loading indicator instead of the chart.
    #[props(default)]
    pub loading: bool,
}

#[component]
pub fn PercentBarChart(props: PercentBarChartProps) -> Element {
    let mut data_signal = use_signal(|| props.data.clone());
    if *data_signal.read() != props.data {
        data_signal.set(props.data.clone());
    }

    let chart_id = props.id.clone();
    let colors = props.colors.clone();
    let loading = props.loading;

    use_effect(move || {
        let groups = data_signal.read().clone();
        let colors = colors.clone();
        let id = chart_id.clone();

        if loading {
            return;
        }

        spawn(async move {
            gloo_timers::future::TimeoutFuture::new(echarts::RENDER_SETTLE_MS).await;

            if groups.iter().all(|g| g.is_empty()) {
                return;
            }
            if let Some(chart) = init_chart(&id) {
                let option = build_percent_bar_option(&groups, &colors);
                set_chart_option(&chart, &to_option(&option));
            }
        });
    });

    let resize_id = props.id.clone();
    use_effect(move || {
        let id = resize_id.clone();
        let handler = Closure::new(move || {
            if let Some(chart) = init_chart(&id) {
                resize_chart(&chart);
            }
        });
        on_window_resize(handler);
    });

    rsx! {
        div { class: "percent-bar-chart",
            if props.loading {
                div { class: "chart-loading", "Loading\u{2026}" }
            } else {
                div { id: "{props.id}", class: "chart-container" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_types::Scenario;

    fn scenario(id: &str, name: &str, color: &str) -> Scenario {
        Scenario::new(id, name, color)
    }

    fn slice(name: &str, data: Vec<f64>, scenario: Scenario) -> SeriesSlice {
        SeriesSlice::new(name, data).with_scenario(scenario)
    }

    #[test]
    fn percent_stack_normalizes_each_category() {
        let base = scenario("base", "Base", "#3e6df5");
        let group = vec![
            slice("A", vec![25.0, 100.0], base.clone()),
            slice("B", vec![75.0, 100.0], base),
        ];
        let percents = percent_stack(&group);
        assert_eq!(percents[0], vec![25.0, 50.0]);
        assert_eq!(percents[1], vec![75.0, 50.0]);
    }

    #[test]
    fn percent_stack_handles_zero_sums_and_ragged_lengths() {
        let base = scenario("base", "Base", "#3e6df5");
        let group = vec![
            slice("A", vec![0.0, 10.0], base.clone()),
            slice("B", vec![0.0], base),
        ];
        let percents = percent_stack(&group);
        assert_eq!(percents[0], vec![0.0, 100.0]);
        assert_eq!(percents[1], vec![0.0, 0.0]);
    }

    #[test]
    fn explicit_color_map_beats_the_gradient() {
        let base = scenario("base", "Base", "#3e6df5");
        let group = vec![slice("A", vec![1.0], base)];
        let mut colors = BTreeMap::new();
        colors.insert("A".to_string(), "#123456".to_string());
        let option = build_percent_bar_option(&[group], &colors);
        assert_eq!(option.series[0].item_style.color, "#123456");
    }

    #[test]
    fn comparison_group_gets_pattern_over_banded_color() {
        let base = scenario("base", "Base", "#3e6df5");
        let compare = scenario("cmp", "Comparison", "#12b886");
        let data = vec![
            vec![slice("A", vec![1.0], base)],
            vec![slice("A", vec![1.0], compare)],
        ];
        let option = build_percent_bar_option(&data, &BTreeMap::new());
        assert!(option.series[0].item_style.decal.is_none());
        assert_eq!(option.series[0].item_style.color, "#3e6df5");
        assert!(option.series[1].item_style.decal.is_some());
        assert_eq!(option.series[1].item_style.color, "#12b886");
    }

    #[test]
    fn stacks_are_named_after_scenarios() {
        let base = scenario("base", "Base", "#3e6df5");
        let group = vec![
            slice("A", vec![1.0], base.clone()),
            slice("B", vec![2.0], base),
        ];
        let option = build_percent_bar_option(&[group], &BTreeMap::new());
        assert!(option.series.iter().all(|s| s.stack == "Base"));
        // Banded gradient gives sibling slices related but distinct shades.
        assert_ne!(
            option.series[0].item_style.color,
            option.series[1].item_style.color
        );
    }
}
