//! Funnel chart with side-by-side scenario comparison.
//!
//! With two scenarios, each renders as a half-width funnel sharing the
//! container, base on the left and comparison (pattern-filled) on the
//! right. Negative values display as zero while labels keep the original.

use dioxus::prelude::*;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local as spawn;

use crate::components::ChartLegend;
use crate::echarts::{
    self, init_chart, labels_fit, on_chart_event, on_window_resize, resize_chart,
    set_chart_option, to_option, ItemStyle, Label, Tooltip,
};
use crate::format;
use prism_types::{group_by_scenario, DataPoint, ValueFormatter};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct FunnelItem {
    name: String,
    value: f64,
    item_style: ItemStyle,
    label: Label,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct FunnelSeries {
    #[serde(rename = "type")]
    kind: &'static str,
    name: String,
    sort: &'static str,
    gap: u32,
    left: &'static str,
    width: &'static str,
    funnel_align: &'static str,
    data: Vec<FunnelItem>,
}

#[derive(Debug, Clone, Serialize)]
struct FunnelOption {
    tooltip: Tooltip,
    series: Vec<FunnelSeries>,
}

fn build_funnel_option(
    groups: &[Vec<DataPoint>],
    formatter: ValueFormatter,
    show_labels: bool,
) -> FunnelOption {
    let has_comparison = groups.len() > 1;

    let series = groups
        .iter()
        .enumerate()
        .map(|(idx, group)| {
            let name = group
                .first()
                .and_then(|p| p.scenario.as_ref())
                .map(|s| s.name.clone())
                .unwrap_or_default();
            // Labels sit outside the funnel, on the free side of each half.
            let (left, width, align, label_position) = if !has_comparison {
                ("10%", "80%", "center", "right")
            } else if idx == 0 {
                ("5%", "45%", "right", "left")
            } else {
                ("50%", "45%", "left", "right")
            };

            let data = group
                .iter()
                .map(|point| {
                    let label = if show_labels {
                        let text =
                            format!("{} - {}", point.name, formatter(point.display_value()));
                        Label::text(text).at(label_position)
                    } else {
                        Label::hidden()
                    };
                    FunnelItem {
                        name: point.name.clone(),
                        value: point.value,
                        item_style: ItemStyle::from_fill(&point.fill),
                        label,
                    }
                })
                .collect();

            FunnelSeries {
                kind: "funnel",
                name,
                sort: "descending",
                gap: 2,
                left,
                width,
                funnel_align: align,
                data,
            }
        })
        .collect();

    FunnelOption {
        tooltip: Tooltip::item(),
        series,
    }
}

#[derive(Props, Clone)]
pub struct FunnelChartProps {
    /// DOM id of the chart container; must be unique per page.
    pub id: String,
    /// Points across all scenarios; grouping happens here.
    pub data: Vec<DataPoint>,
    /// Formats the values for slice labels and the legend.
    #[props(default = format::count as ValueFormatter)]
    pub value_formatter: ValueFormatter,
}

impl PartialEq for FunnelChartProps {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.data == other.data
            && std::ptr::fn_addr_eq(self.value_formatter, other.value_formatter)
    }
}

#[component]
pub fn FunnelChart(props: FunnelChartProps) -> Element {
    // Mirror data into a signal so effects rerun when props change.
    let mut data_signal = use_signal(|| props.data.clone());
    if *data_signal.read() != props.data {
        data_signal.set(props.data.clone());
    }

    let mut show_labels = use_signal(|| true);
    // Scenario group the pointer is over; drives the legend in comparison
    // mode so hovering a funnel highlights its scenario's slices.
    let mut active_group = use_signal(|| None::<usize>);
    let mut hover_bound = use_signal(|| false);

    let chart_id = props.id.clone();
    let formatter = props.value_formatter;

    // Re-render the chart whenever data or label visibility changes.
    use_effect(move || {
        let points = data_signal.read().clone();
        let labels = *show_labels.read();
        let id = chart_id.clone();

        active_group.set(None);

        spawn(async move {
            // Delay to ensure the container exists after render.
            gloo_timers::future::TimeoutFuture::new(echarts::RENDER_SETTLE_MS).await;

            let groups = group_by_scenario(&points);
            if groups.is_empty() {
                return;
            }
            let fits = labels_fit(&id);
            if fits != labels {
                show_labels.set(fits);
            }

            if let Some(chart) = init_chart(&id) {
                let option = build_funnel_option(&groups, formatter, fits);
                set_chart_option(&chart, &to_option(&option));

                if !*hover_bound.peek() {
                    hover_bound.set(true);
                    let handler = Closure::new(move |params: JsValue| {
                        let idx = js_sys::Reflect::get(&params, &JsValue::from_str("seriesIndex"))
                            .ok()
                            .and_then(|v| v.as_f64());
                        active_group.set(idx.map(|i| i as usize));
                    });
                    on_chart_event(&chart, "mouseover", handler);
                }
            }
        });
    });

    // Track container size: labels are suppressed when space runs out.
    let resize_id = props.id.clone();
    use_effect(move || {
        let id = resize_id.clone();
        let handler = Closure::new(move || {
            show_labels.set(labels_fit(&id));
            if let Some(chart) = init_chart(&id) {
                resize_chart(&chart);
            }
        });
        on_window_resize(handler);
    });

    let groups = group_by_scenario(&props.data);
    let legend_points: Vec<DataPoint> = match *active_group.read() {
        Some(idx) if idx < groups.len() => groups[idx].clone(),
        _ => groups.iter().flatten().cloned().collect(),
    };
    let has_legend = !*show_labels.read();

    rsx! {
        div { class: "funnel-chart",
            div { id: "{props.id}", class: "chart-container" }
            if has_legend {
                ChartLegend { points: legend_points, value_formatter: formatter }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_types::Scenario;

    fn point(name: &str, value: f64, scenario: Scenario) -> DataPoint {
        DataPoint::new(name, value, "#3e6df5").with_scenario(scenario)
    }

    #[test]
    fn comparison_renders_two_half_funnels() {
        let base = Scenario::new("base", "Base", "#3e6df5");
        let compare = Scenario::new("cmp", "Comparison", "#12b886");
        let groups = group_by_scenario(&[
            point("Leads", 100.0, base),
            point("Leads", 80.0, compare),
        ]);
        let option = build_funnel_option(&groups, format::count, true);
        assert_eq!(option.series.len(), 2);
        assert_eq!(option.series[0].funnel_align, "right");
        assert_eq!(option.series[1].funnel_align, "left");
        assert!(option.series[1].data[0].item_style.decal.is_some());
    }

    #[test]
    fn labels_use_the_preserved_raw_value() {
        let base = Scenario::new("base", "Base", "#3e6df5");
        let groups = group_by_scenario(&[point("Loss", -5.0, base)]);
        let option = build_funnel_option(&groups, format::count, true);
        let item = &option.series[0].data[0];
        assert_eq!(item.value, 0.0);
        assert_eq!(item.label.formatter.as_deref(), Some("Loss - -5"));
    }

    #[test]
    fn hidden_labels_produce_no_formatter() {
        let base = Scenario::new("base", "Base", "#3e6df5");
        let groups = group_by_scenario(&[point("Leads", 10.0, base)]);
        let option = build_funnel_option(&groups, format::count, false);
        assert!(!option.series[0].data[0].label.show);
    }
}
