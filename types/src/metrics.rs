//! Scenario comparison metrics: per-scenario totals, the variance fold and
//! metric row building for the comparison table.

use std::collections::BTreeMap;

use crate::model::{Scenario, SeriesSlice};
use crate::{formatter_eq, ValueFormatter};

/// Ordered scenario data as fed to the metrics table: one entry per
/// scenario position, `None` for a missing/placeholder scenario.
pub type ScenarioData = Vec<Option<Vec<SeriesSlice>>>;

/// Extracts a metric value from one scenario's series.
pub type MetricGetter = fn(&[SeriesSlice]) -> Option<f64>;

/// Decides whether a metric row should be dropped, given the full data set.
pub type ExcludePredicate = fn(&ScenarioData) -> bool;

/// Schema describing one metric row of the comparison table.
///
/// Value resolution per scenario: a getter named for the scenario wins,
/// then the shared getter, then `key` looked up on the first slice of the
/// scenario's series (see [`SeriesSlice::field`]). Whatever fails resolves
/// to empty, never an error.
#[derive(Debug, Clone)]
pub struct MetricSpec {
    pub name: String,
    pub key: Option<String>,
    pub get_value: Option<MetricGetter>,
    pub get_value_by_scenario: BTreeMap<String, MetricGetter>,
    /// Optional bullet colors by scenario name, mirroring series colors in
    /// stacked column and percent bar charts.
    pub colors: BTreeMap<String, String>,
    /// Overrides the table's default formatter for this row.
    pub formatter: Option<ValueFormatter>,
    pub exclude: Option<ExcludePredicate>,
    /// Highlighted row styling.
    pub is_main_metric: bool,
}

impl MetricSpec {
    pub fn keyed(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: Some(key.into()),
            get_value: None,
            get_value_by_scenario: BTreeMap::new(),
            colors: BTreeMap::new(),
            formatter: None,
            exclude: None,
            is_main_metric: false,
        }
    }

    pub fn computed(name: impl Into<String>, get_value: MetricGetter) -> Self {
        Self {
            name: name.into(),
            key: None,
            get_value: Some(get_value),
            get_value_by_scenario: BTreeMap::new(),
            colors: BTreeMap::new(),
            formatter: None,
            exclude: None,
            is_main_metric: false,
        }
    }

    pub fn main(mut self) -> Self {
        self.is_main_metric = true;
        self
    }

    pub fn with_formatter(mut self, formatter: ValueFormatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    pub fn with_exclude(mut self, exclude: ExcludePredicate) -> Self {
        self.exclude = Some(exclude);
        self
    }

    pub fn with_scenario_getter(mut self, scenario: impl Into<String>, get: MetricGetter) -> Self {
        self.get_value_by_scenario.insert(scenario.into(), get);
        self
    }

    pub fn with_color(mut self, scenario: impl Into<String>, color: impl Into<String>) -> Self {
        self.colors.insert(scenario.into(), color.into());
        self
    }

    fn resolve(&self, series: &[SeriesSlice], scenario_name: &str) -> Option<f64> {
        if let Some(get) = self.get_value_by_scenario.get(scenario_name) {
            return get(series);
        }
        if let Some(get) = self.get_value {
            return get(series);
        }
        let key = self.key.as_deref()?;
        series.first().and_then(|slice| slice.field(key))
    }
}

fn getter_eq(a: Option<MetricGetter>, b: Option<MetricGetter>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => std::ptr::fn_addr_eq(a, b),
        _ => false,
    }
}

fn exclude_eq(a: Option<ExcludePredicate>, b: Option<ExcludePredicate>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => std::ptr::fn_addr_eq(a, b),
        _ => false,
    }
}

fn getter_map_eq(a: &BTreeMap<String, MetricGetter>, b: &BTreeMap<String, MetricGetter>) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|((ka, a), (kb, b))| ka == kb && std::ptr::fn_addr_eq(*a, *b))
}

// Getter, predicate and formatter fields compare by address; deriving
// `PartialEq` over fn pointers is denied by the workspace lints.
impl PartialEq for MetricSpec {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.key == other.key
            && getter_eq(self.get_value, other.get_value)
            && getter_map_eq(&self.get_value_by_scenario, &other.get_value_by_scenario)
            && self.colors == other.colors
            && formatter_eq(self.formatter, other.formatter)
            && exclude_eq(self.exclude, other.exclude)
            && self.is_main_metric == other.is_main_metric
    }
}

/// One derived row of the comparison table: values aligned to scenario
/// order plus the folded variance.
#[derive(Debug, Clone)]
pub struct MetricRow {
    pub name: String,
    pub values: Vec<Option<f64>>,
    pub variance: f64,
    pub is_main_metric: bool,
    pub colors: BTreeMap<String, String>,
    pub formatter: Option<ValueFormatter>,
}

impl PartialEq for MetricRow {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.values == other.values
            && self.variance == other.variance
            && self.is_main_metric == other.is_main_metric
            && self.colors == other.colors
            && formatter_eq(self.formatter, other.formatter)
    }
}

/// True when a resolved value should render as the empty placeholder.
pub fn is_empty_value(value: Option<f64>) -> bool {
    match value {
        None => true,
        Some(v) => v.is_nan(),
    }
}

/// Per-scenario totals: the sum of each slice's leading data value, for
/// present series only. Missing scenarios are excluded from the result
/// rather than zero-padded.
pub fn scenario_totals(data: &ScenarioData) -> Vec<f64> {
    data.iter()
        .flatten()
        .map(|series| {
            series
                .iter()
                .map(|slice| slice.data.first().copied().unwrap_or(0.0))
                .sum()
        })
        .collect()
}

/// Alternating signed fold across scenario values in scenario order:
/// `acc = coalesce(value, 0) - acc`, starting at zero. Empty values fold as
/// zero; they are not skipped. With a single value the displayed variance
/// is the negation of the accumulation, otherwise the raw accumulation. An
/// exact zero is normalized so `-0` never reaches a formatter.
pub fn variance<I>(values: I) -> f64
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut acc = 0.0;
    let mut count = 0usize;
    for value in values {
        let v = match value {
            Some(v) if !v.is_nan() => v,
            _ => 0.0,
        };
        acc = v - acc;
        count += 1;
    }
    let result = if count == 1 { -acc } else { acc };
    if result == 0.0 { 0.0 } else { result }
}

/// Build the table body rows: one row per metric whose exclusion predicate
/// does not fire, with values aligned to `scenarios` order.
pub fn metric_rows(
    data: &ScenarioData,
    metrics: &[MetricSpec],
    scenarios: &[Scenario],
) -> Vec<MetricRow> {
    metrics
        .iter()
        .filter(|spec| !spec.exclude.is_some_and(|exclude| exclude(data)))
        .map(|spec| {
            let values: Vec<Option<f64>> = scenarios
                .iter()
                .enumerate()
                .map(|(idx, scenario)| {
                    data.get(idx)
                        .and_then(|series| series.as_ref())
                        .and_then(|series| spec.resolve(series, &scenario.name))
                        .filter(|v| !v.is_nan())
                })
                .collect();
            MetricRow {
                name: spec.name.clone(),
                variance: variance(values.iter().copied()),
                values,
                is_main_metric: spec.is_main_metric,
                colors: spec.colors.clone(),
                formatter: spec.formatter,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario(name: &str) -> Scenario {
        Scenario::new(name.to_lowercase(), name, "#3e6df5")
    }

    fn series(values: &[f64]) -> Vec<SeriesSlice> {
        values
            .iter()
            .enumerate()
            .map(|(idx, v)| SeriesSlice::new(format!("Item {}", idx + 1), vec![*v]))
            .collect()
    }

    #[test]
    fn totals_sum_leading_values_per_scenario() {
        let data: ScenarioData = vec![
            Some(series(&[100.0, 200.0, 75.0])),
            Some(series(&[50.0, 230.0, 325.0])),
        ];
        assert_eq!(scenario_totals(&data), vec![375.0, 605.0]);
    }

    #[test]
    fn missing_scenarios_are_excluded_from_totals() {
        let data: ScenarioData = vec![Some(series(&[100.0])), None];
        assert_eq!(scenario_totals(&data), vec![100.0]);
    }

    #[test]
    fn variance_of_single_value_is_its_negation() {
        assert_eq!(variance([Some(100.0)]), -100.0);
    }

    #[test]
    fn variance_of_two_values_alternates_signs() {
        // 100 - 0 = 100, then 50 - 100 = -50
        assert_eq!(variance([Some(100.0), Some(50.0)]), -50.0);
    }

    #[test]
    fn empty_values_fold_as_zero_not_skipped() {
        assert_eq!(variance([Some(100.0), None]), -100.0);
        assert_eq!(variance([None, Some(50.0)]), 50.0);
        assert_eq!(variance([Some(f64::NAN), Some(50.0)]), 50.0);
    }

    #[test]
    fn zero_variance_never_carries_a_sign() {
        let v = variance([Some(0.0)]);
        assert_eq!(v, 0.0);
        assert!(v.is_sign_positive());
    }

    #[test]
    fn keyed_metric_resolves_via_first_slice() {
        let data: ScenarioData = vec![Some(series(&[100.0])), Some(series(&[50.0]))];
        let metrics = vec![MetricSpec::keyed("Total", "data").main()];
        let rows = metric_rows(&data, &metrics, &[scenario("Base"), scenario("Comparison")]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].values, vec![Some(100.0), Some(50.0)]);
        assert_eq!(rows[0].variance, -50.0);
        assert!(rows[0].is_main_metric);
    }

    #[test]
    fn missing_series_yields_empty_cell() {
        let data: ScenarioData = vec![Some(series(&[100.0])), None];
        let metrics = vec![MetricSpec::keyed("Total", "data")];
        let rows = metric_rows(&data, &metrics, &[scenario("Base"), scenario("Comparison")]);
        assert_eq!(rows[0].values, vec![Some(100.0), None]);
        assert_eq!(rows[0].variance, -100.0);
    }

    #[test]
    fn absent_key_resolves_to_empty() {
        let data: ScenarioData = vec![Some(series(&[100.0]))];
        let metrics = vec![MetricSpec::keyed("Margin", "margin")];
        let rows = metric_rows(&data, &metrics, &[scenario("Base")]);
        assert!(is_empty_value(rows[0].values[0]));
    }

    #[test]
    fn scenario_named_getter_wins_over_shared_getter() {
        fn shared(_: &[SeriesSlice]) -> Option<f64> {
            Some(1.0)
        }
        fn base_only(_: &[SeriesSlice]) -> Option<f64> {
            Some(2.0)
        }
        let data: ScenarioData = vec![Some(series(&[0.0])), Some(series(&[0.0]))];
        let metrics =
            vec![MetricSpec::computed("Mixed", shared).with_scenario_getter("Base", base_only)];
        let rows = metric_rows(&data, &metrics, &[scenario("Base"), scenario("Comparison")]);
        assert_eq!(rows[0].values, vec![Some(2.0), Some(1.0)]);
    }

    #[test]
    fn specs_compare_by_getter_address() {
        fn first(series: &[SeriesSlice]) -> Option<f64> {
            series.first().and_then(|s| s.data.first().copied())
        }
        fn last(series: &[SeriesSlice]) -> Option<f64> {
            series.last().and_then(|s| s.data.last().copied())
        }
        fn fmt(v: f64) -> String {
            format!("{v}")
        }
        let spec = MetricSpec::computed("Peak", first)
            .with_formatter(fmt)
            .with_scenario_getter("Base", first);
        assert_eq!(spec.clone(), spec);
        assert_ne!(spec, MetricSpec::computed("Peak", last).with_formatter(fmt));
        assert_ne!(spec.clone().main(), spec);
    }

    #[test]
    fn excluded_metric_produces_no_row() {
        fn always(_: &ScenarioData) -> bool {
            true
        }
        let data: ScenarioData = vec![Some(series(&[100.0]))];
        let metrics = vec![
            MetricSpec::keyed("Hidden", "data").with_exclude(always),
            MetricSpec::keyed("Total", "data"),
        ];
        let rows = metric_rows(&data, &metrics, &[scenario("Base")]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Total");
    }

    #[test]
    fn total_variance_matches_row_variance_in_two_scenario_example() {
        let data: ScenarioData = vec![Some(series(&[100.0])), Some(series(&[50.0]))];
        let totals = scenario_totals(&data);
        assert_eq!(variance(totals.into_iter().map(Some)), -50.0);
    }
}
