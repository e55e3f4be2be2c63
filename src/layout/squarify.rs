use std::collections::VecDeque;

use crate::item::{TileItem, TileRect};

use super::{LayoutOptions, LayoutResult};

/// With this many unplaced items or fewer, candidates are merged into the
/// open row even when they worsen its aspect ratio. Trailing stragglers
/// would otherwise form a degenerate one-item final row.
const FORCE_MERGE_REMAINING: usize = 3;

/// Sub-rectangle of the container still available for row placement.
#[derive(Debug, Clone, Copy)]
struct Container {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

/// Area-proportional squarified layout (Bruls/Huizing/van Wijk): greedily
/// build rows, each accepted while its worst aspect ratio does not regress.
pub(super) fn layout_proportional(
    items: &[TileItem],
    width: f64,
    height: f64,
    options: &LayoutOptions,
) -> LayoutResult {
    // Sign carries no area meaning: a loss of magnitude 50 occupies the
    // same area as a gain of 50. True-zero items cannot be packed.
    let mut weighted: Vec<(&TileItem, f64)> = items
        .iter()
        .filter_map(|item| {
            let weight = item.size_value.abs();
            if !weight.is_finite() {
                tracing::warn!(
                    "dropping item '{}' with non-finite size {}",
                    item.label,
                    item.size_value
                );
                return None;
            }
            (weight > 0.0).then_some((item, weight))
        })
        .collect();

    if weighted.is_empty() {
        return LayoutResult::default();
    }

    if options.compress_range {
        compress_range(&mut weighted);
    }

    // Normalize to container area, then sort descending regardless of the
    // requested reading order: packing quality depends on processing
    // largest-first. Ascending order is recovered by mirroring afterwards.
    let total: f64 = weighted.iter().map(|&(_, w)| w).sum();
    let scale = (width * height) / total;
    for (_, weight) in weighted.iter_mut() {
        *weight *= scale;
    }
    weighted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut rects: Vec<TileRect> = Vec::with_capacity(weighted.len());
    let mut rows = 0usize;
    let mut container = Container { x: 0.0, y: 0.0, width, height };
    let mut queue: VecDeque<(&TileItem, f64)> = weighted.into();

    while !queue.is_empty() {
        // Guard against floating-point degeneracy in the shrunk container.
        if container.width <= 1e-9 || container.height <= 1e-9 {
            tracing::debug!("container exhausted with {} items unplaced", queue.len());
            break;
        }

        // Rows run across the longer axis and stack along the shorter one.
        let vertical = container.width < container.height;
        let side = if vertical { container.height } else { container.width };

        let Some(first) = queue.pop_front() else {
            break;
        };
        let mut row = vec![first];
        let mut row_sum = first.1;
        let mut row_min = first.1;
        let mut row_max = first.1;

        while let Some(&(_, candidate)) = queue.front() {
            let current = worst_aspect_ratio(row_min, row_max, row_sum, side);
            let merged = worst_aspect_ratio(
                row_min.min(candidate),
                row_max.max(candidate),
                row_sum + candidate,
                side,
            );
            if merged > current && queue.len() > FORCE_MERGE_REMAINING {
                break;
            }
            let Some(accepted) = queue.pop_front() else {
                break;
            };
            row_sum += accepted.1;
            row_min = row_min.min(accepted.1);
            row_max = row_max.max(accepted.1);
            row.push(accepted);
        }

        // The row occupies a strip of thickness rowSum/side on the top edge
        // (left edge when vertical); members split the strip by share.
        let thickness = row_sum / side;
        let mut offset = 0.0;
        for (item, area) in row {
            let length = area / thickness;
            if !length.is_finite() || !thickness.is_finite() || length <= 0.0 || thickness <= 0.0 {
                tracing::warn!(
                    "invalid row geometry (length={}, thickness={}, area={}), skipping '{}'",
                    length,
                    thickness,
                    area,
                    item.label
                );
                continue;
            }
            let rect = if vertical {
                TileRect {
                    item: item.clone(),
                    x: container.x,
                    y: container.y + offset,
                    width: thickness,
                    height: length,
                }
            } else {
                TileRect {
                    item: item.clone(),
                    x: container.x + offset,
                    y: container.y,
                    width: length,
                    height: thickness,
                }
            };
            rects.push(rect);
            offset += length;
        }
        rows += 1;

        if vertical {
            container.x += thickness;
            container.width = (container.width - thickness).max(0.0);
        } else {
            container.y += thickness;
            container.height = (container.height - thickness).max(0.0);
        }
    }

    correct_aspect_ratios(&mut rects, options.aspect_limit);
    if options.ascending {
        mirror_and_reanchor(&mut rects, width, height);
    }

    LayoutResult { rects, rows }
}

/// Replace each weight with `sqrt(w/max) * max`. An item at 1% of the max
/// would otherwise occupy 1% of total area and become imperceptible; the
/// square root maps it to roughly 10% of max-relative area. Lossy and
/// intentional.
fn compress_range(weighted: &mut [(&TileItem, f64)]) {
    let max_abs = weighted.iter().map(|&(_, w)| w).fold(0.0, f64::max);
    if max_abs <= 0.0 {
        return;
    }
    for (_, weight) in weighted.iter_mut() {
        *weight = (*weight / max_abs).sqrt() * max_abs;
    }
}

/// Worst aspect ratio of a row of normalized areas laid along `side`:
/// `max(side²·max/sum², sum²/(side²·min))`.
fn worst_aspect_ratio(row_min: f64, row_max: f64, sum: f64, side: f64) -> f64 {
    if sum <= 0.0 || row_min <= 0.0 || side <= 0.0 {
        return f64::MAX;
    }
    let side_sq = side * side;
    let sum_sq = sum * sum;
    ((side_sq * row_max) / sum_sq).max(sum_sq / (side_sq * row_min))
}

/// Shrink the long side of any rect beyond the limit and re-center it in
/// its original footprint. The gap is an accepted area loss; extreme
/// slivers are unreadable and unclickable.
fn correct_aspect_ratios(rects: &mut [TileRect], limit: f64) {
    for rect in rects.iter_mut() {
        let short = rect.width.min(rect.height);
        if short <= 0.0 {
            continue;
        }
        let long = rect.width.max(rect.height);
        if long / short <= limit {
            continue;
        }
        let corrected = short * limit;
        if rect.width > rect.height {
            rect.x += (rect.width - corrected) / 2.0;
            rect.width = corrected;
        } else {
            rect.y += (rect.height - corrected) / 2.0;
            rect.height = corrected;
        }
    }
}

/// Mirror every rect through the container center, then re-anchor the
/// bounding box at the origin (mirroring plus aspect correction can leave
/// the layout offset from it).
fn mirror_and_reanchor(rects: &mut [TileRect], width: f64, height: f64) {
    for rect in rects.iter_mut() {
        rect.x = width - rect.x - rect.width;
        rect.y = height - rect.y - rect.height;
    }
    let min_x = rects.iter().map(|r| r.x).fold(f64::INFINITY, f64::min);
    let min_y = rects.iter().map(|r| r.y).fold(f64::INFINITY, f64::min);
    if !min_x.is_finite() || !min_y.is_finite() {
        return;
    }
    for rect in rects.iter_mut() {
        rect.x -= min_x;
        rect.y -= min_y;
    }
}
