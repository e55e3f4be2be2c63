pub mod grid;
pub mod squarify;

use crate::item::{TileItem, TileRect};
use crate::sort::SortBy;

/// Upper bound on rectangle elongation enforced by post-correction.
/// A visual-design tradeoff, not a mathematical necessity.
pub const DEFAULT_ASPECT_LIMIT: f64 = 4.0;

/// Configuration for a layout pass.
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Replace each size with `sqrt(size/max) * max` before packing,
    /// trading strict proportionality for legibility of small items.
    pub compress_range: bool,
    /// Uniform grid cells instead of area-proportional packing.
    pub equal_size: bool,
    /// Smallest-first visual reading order.
    pub ascending: bool,
    /// Ordering policy for the equal-size grid.
    pub sort_by: SortBy,
    /// Overridable form of [`DEFAULT_ASPECT_LIMIT`].
    pub aspect_limit: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            compress_range: true,
            equal_size: false,
            ascending: false,
            sort_by: SortBy::Default,
            aspect_limit: DEFAULT_ASPECT_LIMIT,
        }
    }
}

/// The full layout result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutResult {
    /// Positioned tiles, in packing order.
    pub rects: Vec<TileRect>,
    /// Distinct row bands produced (grid rows on the equal-size path).
    /// Callers size the widget container proportional to this.
    pub rows: usize,
}

/// Lay out weighted items inside a `width` × `height` container.
///
/// Geometry is resolution-independent: callers usually pass 100×100 and
/// scale the returned percentages to pixels. Degenerate input (no items,
/// all-zero sizes, an empty or non-finite container) yields an empty
/// result, never an error. Non-finite item sizes are a caller precondition
/// (see [`crate::prepare::prepare`]); the engine drops them defensively.
pub fn squarify(
    items: &[TileItem],
    width: f64,
    height: f64,
    options: &LayoutOptions,
) -> LayoutResult {
    if items.is_empty() || !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0
    {
        return LayoutResult::default();
    }
    if options.equal_size {
        grid::layout_equal_grid(items, width, height, options)
    } else {
        squarify::layout_proportional(items, width, height, options)
    }
}
