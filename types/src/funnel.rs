//! Scenario grouping for funnel-style charts.

use crate::color::comparison_pattern_fill;
use crate::model::DataPoint;

/// Group points by scenario id, preserving first-insertion order of
/// scenarios (the output order is observable, so a plain hash map would
/// not do). Points without a scenario are skipped.
///
/// Two adjustments are applied while grouping:
/// - Funnel rendering breaks on negative values, so they clamp to 0 with
///   the original retained in `raw_value` for labels and tooltips.
/// - Points in any scenario after the first swap their solid fill for the
///   comparison pattern anchored at the same color.
pub fn group_by_scenario(points: &[DataPoint]) -> Vec<Vec<DataPoint>> {
    let mut groups: Vec<(String, Vec<DataPoint>)> = Vec::new();

    for point in points {
        let Some(scenario) = &point.scenario else {
            continue;
        };
        let is_comparison = groups
            .first()
            .is_some_and(|(first_id, _)| *first_id != scenario.id);

        let mut adjusted = point.clone();
        if adjusted.value < 0.0 {
            adjusted.raw_value = Some(adjusted.value);
            adjusted.value = 0.0;
        } else if is_comparison {
            adjusted.fill = comparison_pattern_fill(adjusted.fill.background());
        }

        match groups.iter_mut().find(|(id, _)| *id == scenario.id) {
            Some((_, group)) => group.push(adjusted),
            None => groups.push((scenario.id.clone(), vec![adjusted])),
        }
    }

    groups.into_iter().map(|(_, group)| group).collect()
}
