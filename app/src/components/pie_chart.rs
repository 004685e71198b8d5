//! Pie chart.
//!
//! A comparison rendering swaps every slice's solid color for the dot
//! pattern anchored at that color, so base and comparison pies stay in the
//! same hue family.

use dioxus::prelude::*;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local as spawn;

use crate::echarts::{
    self, init_chart, labels_fit, on_window_resize, resize_chart, set_chart_option, to_option,
    ItemStyle, Label, Tooltip,
};
use crate::format;
use prism_types::{comparison_pattern_fill, DataPoint, ValueFormatter};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct PieItem {
    name: String,
    value: f64,
    item_style: ItemStyle,
    label: Label,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct PieSeries {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    radius: &'static str,
    data: Vec<PieItem>,
}

#[derive(Debug, Clone, Serialize)]
struct PieOption {
    tooltip: Tooltip,
    series: Vec<PieSeries>,
}

fn build_pie_option(
    points: &[DataPoint],
    is_comparison: bool,
    formatter: ValueFormatter,
    show_labels: bool,
) -> PieOption {
    let data = points
        .iter()
        .map(|point| {
            let fill = if is_comparison {
                comparison_pattern_fill(point.fill.background())
            } else {
                point.fill.clone()
            };
            let label = if show_labels {
                Label::text(format!(
                    "{} - {}",
                    point.name,
                    formatter(point.display_value())
                ))
            } else {
                Label::hidden()
            };
            PieItem {
                name: point.name.clone(),
                value: point.value,
                item_style: ItemStyle::from_fill(&fill),
                label,
            }
        })
        .collect();

    let name = points
        .first()
        .and_then(|p| p.scenario.as_ref())
        .map(|s| s.name.clone());

    PieOption {
        tooltip: Tooltip::item(),
        series: vec![PieSeries {
            kind: "pie",
            name,
            // Labels need a margin around the pie; without them the pie
            // can take the whole container.
            radius: if show_labels { "70%" } else { "90%" },
            data,
        }],
    }
}

#[derive(Props, Clone)]
pub struct PieChartProps {
    /// DOM id of the chart container; must be unique per page.
    pub id: String,
    pub data: Vec<DataPoint>,
    /// Whether the chart represents a comparison scenario.
    #[props(default)]
    pub is_comparison: bool,
    /// Formats the values for the slice labels.
    #[props(default = format::count as ValueFormatter)]
    pub value_formatter: ValueFormatter,
}

impl PartialEq for PieChartProps {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.data == other.data
            && self.is_comparison == other.is_comparison
            && std::ptr::fn_addr_eq(self.value_formatter, other.value_formatter)
    }
}

#[component]
pub fn PieChart(props: PieChartProps) -> Element {
    let mut data_signal = use_signal(|| props.data.clone());
    if *data_signal.read() != props.data {
        data_signal.set(props.data.clone());
    }

    let mut show_labels = use_signal(|| true);

    let chart_id = props.id.clone();
    let formatter = props.value_formatter;
    let is_comparison = props.is_comparison;

    use_effect(move || {
        let points = data_signal.read().clone();
        let labels = *show_labels.read();
        let id = chart_id.clone();

        spawn(async move {
            gloo_timers::future::TimeoutFuture::new(echarts::RENDER_SETTLE_MS).await;

            if points.is_empty() {
                return;
            }
            let fits = labels_fit(&id);
            if fits != labels {
                show_labels.set(fits);
            }

            if let Some(chart) = init_chart(&id) {
                let option = build_pie_option(&points, is_comparison, formatter, fits);
                set_chart_option(&chart, &to_option(&option));
            }
        });
    });

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

    rsx! {
        div { class: "pie-chart",
            div { id: "{props.id}", class: "chart-container" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_slices_get_pattern_fills_anchored_at_their_color() {
        let points = vec![
            DataPoint::new("A", 10.0, "#f00"),
            DataPoint::new("B", 20.0, "#00f"),
        ];
        let option = build_pie_option(&points, true, format::count, true);
        let items = &option.series[0].data;
        assert!(items.iter().all(|i| i.item_style.decal.is_some()));
        assert_eq!(items[0].item_style.color, "#f00");
        assert_eq!(items[1].item_style.color, "#00f");
    }

    #[test]
    fn base_slices_stay_solid() {
        let points = vec![DataPoint::new("A", 10.0, "#f00")];
        let option = build_pie_option(&points, false, format::count, true);
        assert!(option.series[0].data[0].item_style.decal.is_none());
    }

    #[test]
    fn pie_grows_when_labels_are_suppressed() {
        let points = vec![DataPoint::new("A", 10.0, "#f00")];
        let with_labels = build_pie_option(&points, false, format::count, true);
        let without = build_pie_option(&points, false, format::count, false);
        assert_eq!(with_labels.series[0].radius, "70%");
        assert_eq!(without.series[0].radius, "90%");
    }
}
