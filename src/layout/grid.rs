use crate::item::{TileItem, TileRect};
use crate::sort;

use super::{LayoutOptions, LayoutResult};

/// Uniform grid layout: every item gets the same cell, position is driven
/// by the sort policy instead of area. Zero-size items are kept; area
/// carries no meaning on this path.
pub(super) fn layout_equal_grid(
    items: &[TileItem],
    width: f64,
    height: f64,
    options: &LayoutOptions,
) -> LayoutResult {
    let count = items.len();

    // Seed the grid from the container aspect so cells start near-square,
    // then shrink while every item still fits (minimize empty cells).
    let aspect = width / height;
    let mut cols = ((count as f64 * aspect).sqrt().ceil() as usize).max(1);
    let mut rows = (count + cols - 1) / cols;
    while rows > 1 && (rows - 1) * cols >= count {
        rows -= 1;
    }
    while cols > 1 && rows * (cols - 1) >= count {
        cols -= 1;
    }

    let mut ordered = items.to_vec();
    sort::order_items(&mut ordered, options.sort_by, options.ascending);

    let cell_width = width / cols as f64;
    let cell_height = height / rows as f64;
    let rects = ordered
        .into_iter()
        .enumerate()
        .map(|(i, item)| TileRect {
            item,
            x: (i % cols) as f64 * cell_width,
            y: (i / cols) as f64 * cell_height,
            width: cell_width,
            height: cell_height,
        })
        .collect();

    LayoutResult { rects, rows }
}
