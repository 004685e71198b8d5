//! Bulleted chart legend.
//!
//! Entities sharing a name collapse into one row carrying a swatch per
//! distinct color, so a base/comparison pair reads as a single labeled item
//! with two bullets.

use dioxus::prelude::*;

use prism_types::{formatter_eq, legend_items, DataPoint, ValueFormatter};

#[derive(Props, Clone)]
pub struct ChartLegendProps {
    /// Chart entities to aggregate: points for part-to-whole charts, one
    /// entry per series otherwise.
    pub points: Vec<DataPoint>,
    /// Reverse the item order (used for inverted chart orientations).
    #[props(default)]
    pub reverse: bool,
    /// Maximum number of items to display.
    #[props(default)]
    pub max_items: Option<usize>,
    /// Formats each item's total next to its name. Omitted = no totals.
    #[props(default)]
    pub value_formatter: Option<ValueFormatter>,
    /// Target for the "Show More" link rendered when the list is truncated.
    #[props(default)]
    pub show_more_url: Option<String>,
}

impl PartialEq for ChartLegendProps {
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points
            && self.reverse == other.reverse
            && self.max_items == other.max_items
            && formatter_eq(self.value_formatter, other.value_formatter)
            && self.show_more_url == other.show_more_url
    }
}

#[component]
pub fn ChartLegend(props: ChartLegendProps) -> Element {
    let items = legend_items(&props.points, props.reverse);
    let visible = props.max_items.unwrap_or(items.len()).min(items.len());
    let show_more = if items.len() > visible {
        props.show_more_url.clone()
    } else {
        None
    };

    rsx! {
        ul { class: "chart-legend",
            for item in items.iter().take(visible) {
                li { key: "{item.name}-{item.index}", class: "chart-legend-item",
                    for color in item.colors.iter() {
                        span {
                            class: "legend-bullet",
                            style: "background-color: {color};",
                        }
                    }
                    if !item.name.is_empty() {
                        span { class: "legend-label", title: "{item.name}", "{item.name}" }
                    }
                    if let (Some(formatter), Some(value)) = (props.value_formatter, item.value) {
                        span { class: "legend-value", " - {formatter(value)}" }
                    }
                }
            }
        }
        if let Some(url) = show_more {
            a { class: "legend-show-more", href: "{url}", "Show More" }
        }
    }
}
