//! Legend aggregation: groups chart entities into named legend items with
//! one swatch per distinct color encountered.

use crate::model::{DataPoint, LegendItem};

/// Group points into legend items by name.
///
/// First occurrence of a name fixes the item's identity and position; later
/// occurrences contribute their display color, appended in encounter order
/// unless the point declares a sibling index, which slots the color at that
/// position instead. A point whose fill is a comparison pattern contributes
/// the pattern's background color. Duplicate colors within one item are
/// dropped.
///
/// `reverse` flips the final ordering; applying it twice restores the
/// original order.
pub fn legend_items(points: &[DataPoint], reverse: bool) -> Vec<LegendItem> {
    let mut items: Vec<LegendItem> = Vec::new();

    for point in points {
        if !point.show_in_legend {
            continue;
        }
        let color = point.fill.background();

        match items.iter_mut().find(|item| item.name == point.name) {
            None => items.push(LegendItem {
                name: point.name.clone(),
                index: point.index.unwrap_or_default(),
                colors: vec![color.to_string()],
                value: Some(point.display_value()),
            }),
            Some(existing) => {
                if !existing.colors.iter().any(|c| c == color) {
                    match point.index {
                        Some(at) => {
                            let at = at.min(existing.colors.len());
                            existing.colors.insert(at, color.to_string());
                        }
                        None => existing.colors.push(color.to_string()),
                    }
                }
            }
        }
    }

    if reverse {
        items.reverse();
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::comparison_pattern_fill;

    fn point(name: &str, value: f64, color: &str) -> DataPoint {
        DataPoint::new(name, value, color)
    }

    #[test]
    fn groups_same_name_into_one_item_with_both_colors() {
        let points = vec![point("A", 10.0, "#f00"), point("A", 10.0, "#00f")];
        let items = legend_items(&points, false);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "A");
        assert_eq!(items[0].colors, vec!["#f00", "#00f"]);
        assert_eq!(items[0].value, Some(10.0));
    }

    #[test]
    fn duplicate_colors_are_dropped() {
        let points = vec![point("A", 1.0, "#f00"), point("A", 2.0, "#f00")];
        let items = legend_items(&points, false);
        assert_eq!(items[0].colors, vec!["#f00"]);
    }

    #[test]
    fn first_seen_order_is_stable() {
        let points = vec![
            point("B", 1.0, "#111"),
            point("A", 2.0, "#222"),
            point("B", 3.0, "#333"),
        ];
        let items = legend_items(&points, false);
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn reverse_is_an_involution() {
        let points = vec![
            point("A", 1.0, "#111"),
            point("B", 2.0, "#222"),
            point("C", 3.0, "#333"),
        ];
        let forward = legend_items(&points, false);
        let mut twice = legend_items(&points, true);
        twice.reverse();
        assert_eq!(forward, twice);
    }

    #[test]
    fn sibling_index_orders_comparison_swatch() {
        // Comparison point declared at index 0 slots its color first.
        let base = point("A", 5.0, "#f00").with_index(1);
        let compare = point("A", 3.0, "#00f").with_index(0);
        let items = legend_items(&[base, compare], false);
        assert_eq!(items[0].colors, vec!["#00f", "#f00"]);
    }

    #[test]
    fn undeclared_index_appends_in_encounter_order() {
        let points = vec![
            point("A", 1.0, "#111"),
            point("A", 1.0, "#222"),
            point("A", 1.0, "#333"),
        ];
        let items = legend_items(&points, false);
        assert_eq!(items[0].colors, vec!["#111", "#222", "#333"]);
    }

    #[test]
    fn pattern_fill_resolves_to_background_color() {
        let mut compare = point("A", 3.0, "#0f0");
        compare.fill = comparison_pattern_fill("#00f");
        let items = legend_items(&[point("A", 5.0, "#f00"), compare], false);
        assert_eq!(items[0].colors, vec!["#f00", "#00f"]);
    }

    #[test]
    fn hidden_points_are_skipped() {
        let mut hidden = point("A", 1.0, "#f00");
        hidden.show_in_legend = false;
        assert!(legend_items(&[hidden], false).is_empty());
    }

    #[test]
    fn raw_value_wins_over_clamped_value() {
        let mut clamped = point("A", 0.0, "#f00");
        clamped.raw_value = Some(-5.0);
        let items = legend_items(&[clamped], false);
        assert_eq!(items[0].value, Some(-5.0));
    }
}
