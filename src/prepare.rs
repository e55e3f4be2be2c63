use std::cmp::Ordering;

use crate::item::TileItem;

/// Floor applied after inversion, as a fraction of the post-inversion
/// maximum. Items whose original value was the largest (now the smallest)
/// stay visibly nonzero.
pub const INVERSE_FLOOR_RATIO: f64 = 0.10;

/// Default size floor as a fraction of the largest prepared size. Zero- and
/// near-zero items render as a sliver instead of disappearing (the layout
/// engine drops true-zero items).
pub const DEFAULT_FLOOR_RATIO: f64 = 0.15;

/// Configuration for the preparation pass.
#[derive(Debug, Clone)]
pub struct PrepareOptions {
    /// Small `size_value` → large rectangle (lowest battery, biggest
    /// temperature deficit).
    pub inverse: bool,
    /// Requested visual reading order. Combined with `inverse` through
    /// [`effective_ascending`] before sorting.
    pub ascending: bool,
    /// Keep only the first N items after sorting.
    pub limit: Option<usize>,
    /// Explicit size floor. Defaults to `default_floor_ratio` of the
    /// largest size in the limited, capped set.
    pub size_min: Option<f64>,
    /// Size cap, applied before the floor so capped outliers do not
    /// inflate the floor threshold.
    pub size_max: Option<f64>,
    /// Overridable form of [`INVERSE_FLOOR_RATIO`].
    pub inverse_floor_ratio: f64,
    /// Overridable form of [`DEFAULT_FLOOR_RATIO`].
    pub default_floor_ratio: f64,
}

impl Default for PrepareOptions {
    fn default() -> Self {
        Self {
            inverse: false,
            ascending: false,
            limit: None,
            size_min: None,
            size_max: None,
            inverse_floor_ratio: INVERSE_FLOOR_RATIO,
            default_floor_ratio: DEFAULT_FLOOR_RATIO,
        }
    }
}

/// Output of preparation: transformed item copies plus the color range
/// observed over the full input (before limiting).
#[derive(Debug, Clone, Default)]
pub struct PreparedData {
    pub items: Vec<TileItem>,
    pub color_min: f64,
    pub color_max: f64,
}

/// Resolve the sort direction from the two independent option flags.
///
/// Inversion has already reversed the value semantics, so a literal
/// `ascending` would double-flip the visual order. Every sort decision in
/// the pipeline goes through this one place.
pub fn effective_ascending(inverse: bool, ascending: bool) -> bool {
    if inverse {
        !ascending
    } else {
        ascending
    }
}

/// Statistics, inverse-sizing, sort, limit and clamping ahead of layout.
///
/// Returns new item records; the caller's slice is never mutated and can be
/// reused across renders. Items with non-finite `size_value` or
/// `color_value` are filtered here; downstream layout assumes finite
/// input.
pub fn prepare(items: &[TileItem], options: &PrepareOptions) -> PreparedData {
    let mut items: Vec<TileItem> = items
        .iter()
        .filter(|item| {
            let finite = item.size_value.is_finite() && item.color_value.is_finite();
            if !finite {
                tracing::debug!("filtering item '{}' with non-finite metrics", item.label);
            }
            finite
        })
        .cloned()
        .collect();

    if items.is_empty() {
        return PreparedData::default();
    }

    // Single scan for the color range and the observed size range.
    let mut color_min = f64::INFINITY;
    let mut color_max = f64::NEG_INFINITY;
    let mut size_min = f64::INFINITY;
    let mut size_max = f64::NEG_INFINITY;
    for item in &items {
        color_min = color_min.min(item.color_value);
        color_max = color_max.max(item.color_value);
        size_min = size_min.min(item.size_value);
        size_max = size_max.max(item.size_value);
    }

    if options.inverse {
        let span = size_max + size_min;
        for item in &mut items {
            item.size_value = span - item.size_value;
        }
        // The old minimum is now the maximum.
        let inverted_max = span - size_min;
        let floor = options.inverse_floor_ratio * inverted_max;
        for item in &mut items {
            item.size_value = item.size_value.max(floor);
        }
    }

    let ascending = effective_ascending(options.inverse, options.ascending);
    items.sort_by(|a, b| {
        // Primary size, tie-broken by sort metric in the same direction;
        // label last so equal items order deterministically.
        let ord = compare_f64(a.size_value, b.size_value)
            .then_with(|| compare_f64(a.sort_value, b.sort_value));
        let ord = if ascending { ord } else { ord.reverse() };
        ord.then_with(|| a.label.cmp(&b.label))
    });

    if let Some(limit) = options.limit {
        if limit > 0 {
            items.truncate(limit);
        }
    }

    if let Some(cap) = options.size_max {
        for item in &mut items {
            item.size_value = item.size_value.min(cap);
        }
    }

    let current_max = items
        .iter()
        .map(|item| item.size_value)
        .fold(f64::NEG_INFINITY, f64::max);
    let floor = options
        .size_min
        .unwrap_or(options.default_floor_ratio * current_max);
    for item in &mut items {
        item.size_value = item.size_value.max(floor);
    }

    PreparedData { items, color_min, color_max }
}

fn compare_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::{effective_ascending, prepare, PrepareOptions};
    use crate::item::TileItem;

    fn item(label: &str, size: f64) -> TileItem {
        TileItem {
            label: label.into(),
            value: size,
            size_value: size,
            sort_value: 0.0,
            color_value: size,
            entity_id: None,
            icon: None,
            unit: None,
        }
    }

    fn sizes(prepared: &super::PreparedData) -> Vec<f64> {
        prepared.items.iter().map(|i| i.size_value).collect()
    }

    #[test]
    fn effective_ascending_pins_all_flag_combinations() {
        assert!(!effective_ascending(false, false));
        assert!(effective_ascending(false, true));
        assert!(effective_ascending(true, false)); // inversion flips the default
        assert!(!effective_ascending(true, true));
    }

    #[test]
    fn empty_input_yields_zeroed_ranges() {
        let prepared = prepare(&[], &PrepareOptions::default());
        assert!(prepared.items.is_empty());
        assert_eq!(prepared.color_min, 0.0);
        assert_eq!(prepared.color_max, 0.0);
    }

    #[test]
    fn computes_color_range_in_one_scan() {
        let items = [item("a", 3.0), item("b", 9.0), item("c", 6.0)];
        let prepared = prepare(&items, &PrepareOptions::default());
        assert_eq!(prepared.color_min, 3.0);
        assert_eq!(prepared.color_max, 9.0);
    }

    #[test]
    fn inverse_swaps_extremes_and_floors_at_ten_percent() {
        let items = [item("high", 100.0), item("low", 1.0)];
        let options = PrepareOptions { inverse: true, ..Default::default() };
        let prepared = prepare(&items, &options);

        let low = prepared.items.iter().find(|i| i.label == "low").unwrap();
        let high = prepared.items.iter().find(|i| i.label == "high").unwrap();
        // Original 1 ends larger than original 100.
        assert!(low.size_value > high.size_value);
        assert_eq!(low.size_value, 100.0); // (100+1) - 1
        // Post-inversion max is 100, so nothing may sit below 10.
        let floor = 0.10 * 100.0;
        assert!(prepared.items.iter().all(|i| i.size_value >= floor));
        assert_eq!(high.size_value, floor); // (100+1) - 100 = 1, floored
    }

    #[test]
    fn default_floor_keeps_zero_items_as_slivers() {
        let items = [item("big", 100.0), item("nil", 0.0)];
        let prepared = prepare(&items, &PrepareOptions::default());
        assert_eq!(sizes(&prepared), vec![100.0, 15.0]);
    }

    #[test]
    fn explicit_floor_overrides_the_default_ratio() {
        let items = [item("big", 100.0), item("nil", 0.0)];
        let options = PrepareOptions { size_min: Some(2.0), ..Default::default() };
        let prepared = prepare(&items, &options);
        assert_eq!(sizes(&prepared), vec![100.0, 2.0]);
    }

    #[test]
    fn cap_applies_before_floor_so_outliers_do_not_inflate_it() {
        let items = [item("spike", 1000.0), item("mid", 10.0), item("nil", 0.0)];
        let options = PrepareOptions { size_max: Some(100.0), ..Default::default() };
        let prepared = prepare(&items, &options);
        // Floor is 15% of the capped max (100), not of the raw 1000.
        assert_eq!(sizes(&prepared), vec![100.0, 15.0, 15.0]);
    }

    #[test]
    fn limit_truncates_after_sorting() {
        let items = [item("a", 1.0), item("b", 5.0), item("c", 3.0), item("d", 4.0)];
        let options = PrepareOptions { limit: Some(2), ..Default::default() };
        let prepared = prepare(&items, &options);
        let labels: Vec<_> = prepared.items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, ["b", "d"]);
    }

    #[test]
    fn sorts_descending_by_default_ascending_on_request() {
        let items = [item("a", 1.0), item("b", 3.0), item("c", 2.0)];
        let prepared = prepare(&items, &PrepareOptions::default());
        let labels: Vec<_> = prepared.items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, ["b", "c", "a"]);

        let options = PrepareOptions { ascending: true, ..Default::default() };
        let prepared = prepare(&items, &options);
        let labels: Vec<_> = prepared.items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, ["a", "c", "b"]);
    }

    #[test]
    fn inverse_flips_the_requested_sort_direction() {
        let items = [item("small", 1.0), item("large", 9.0)];
        // ascending=false + inverse → effective ascending: the item that is
        // now smallest (originally largest) comes first.
        let options = PrepareOptions { inverse: true, ..Default::default() };
        let prepared = prepare(&items, &options);
        assert_eq!(prepared.items[0].label, "large");
    }

    #[test]
    fn all_zero_sizes_survive_as_a_degenerate_but_valid_set() {
        let items = [item("a", 0.0), item("b", 0.0)];
        let prepared = prepare(&items, &PrepareOptions::default());
        assert_eq!(prepared.items.len(), 2);
        assert!(prepared.items.iter().all(|i| i.size_value == 0.0));
    }

    #[test]
    fn non_finite_items_are_filtered_at_the_entry_point() {
        let mut bad = item("bad", f64::NAN);
        bad.color_value = 1.0;
        let items = [item("good", 5.0), bad];
        let prepared = prepare(&items, &PrepareOptions::default());
        assert_eq!(prepared.items.len(), 1);
        assert_eq!(prepared.items[0].label, "good");
    }

    #[test]
    fn caller_items_are_never_mutated() {
        let items = [item("a", 100.0), item("b", 0.0)];
        let _ = prepare(&items, &PrepareOptions::default());
        assert_eq!(items[1].size_value, 0.0);
    }
}
