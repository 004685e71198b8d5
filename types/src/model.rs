//! Chart data model shared between the aggregator and the frontend.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named comparison group, e.g. a "Base" vs "Comparison" forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub name: String,
    /// Solid hex color anchoring everything rendered for this scenario.
    pub color: String,
}

impl Scenario {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Diagonal dot pattern used to mark comparison-scenario rendering without
/// introducing a second hue. The renderer consumes this as a fill
/// descriptor; the aggregator only ever reads `background`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternFill {
    pub background: String,
    pub dot_color: String,
    pub width: u32,
    pub height: u32,
}

/// Fill style for one chart entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesFill {
    Solid(String),
    Pattern(PatternFill),
}

impl SeriesFill {
    pub fn solid(color: impl Into<String>) -> Self {
        SeriesFill::Solid(color.into())
    }

    /// Display color for legends and labels. A pattern resolves to its
    /// declared background color instead of the pattern itself.
    pub fn background(&self) -> &str {
        match self {
            SeriesFill::Solid(color) => color,
            SeriesFill::Pattern(pattern) => &pattern.background,
        }
    }

    pub fn is_pattern(&self) -> bool {
        matches!(self, SeriesFill::Pattern(_))
    }
}

/// One labeled, colored numeric observation belonging to at most one
/// scenario. Used by the part-to-whole charts (funnel, pie) and by the
/// legend aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub name: String,
    pub value: f64,
    /// Original value preserved when `value` was clamped for rendering
    /// (funnel charts force negatives to display as 0). Labels and legends
    /// prefer this over `value`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_value: Option<f64>,
    pub fill: SeriesFill,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<Scenario>,
    /// Declared position among sibling entities sharing a name, used to
    /// keep base/comparison swatches in a consistent left-to-right order.
    /// Points without a declared index sort after declared ones, in
    /// encounter order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(default = "default_true")]
    pub show_in_legend: bool,
}

impl DataPoint {
    pub fn new(name: impl Into<String>, value: f64, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            raw_value: None,
            fill: SeriesFill::solid(color),
            scenario: None,
            index: None,
            show_in_legend: true,
        }
    }

    pub fn with_scenario(mut self, scenario: Scenario) -> Self {
        self.scenario = Some(scenario);
        self
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Value to show in labels and legends: the pre-clamp original when one
    /// was retained, otherwise the computed value.
    pub fn display_value(&self) -> f64 {
        self.raw_value.unwrap_or(self.value)
    }
}

/// One record of a stacked series, as consumed by the percent bar chart and
/// the metrics comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSlice {
    pub name: String,
    /// Stable identity for color-map lookups; falls back to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub data: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<Scenario>,
    /// Extra named values resolvable by metric key.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, f64>,
}

impl SeriesSlice {
    pub fn new(name: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            id: None,
            data,
            scenario: None,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_scenario(mut self, scenario: Scenario) -> Self {
        self.scenario = Some(scenario);
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: f64) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// Resolve a metric key on this slice. The reserved key `"data"` means
    /// the first element of the series data; anything else looks up the
    /// named field. Absent keys resolve to `None`, never an error.
    pub fn field(&self, key: &str) -> Option<f64> {
        match key {
            "data" => self.data.first().copied(),
            _ => self.fields.get(key).copied(),
        }
    }
}

/// One named row in a chart legend, potentially representing several
/// underlying entities sharing a name. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendItem {
    pub name: String,
    pub index: usize,
    /// Deduplicated swatch colors in sibling-index order.
    pub colors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

pub(crate) fn default_true() -> bool {
    true
}
