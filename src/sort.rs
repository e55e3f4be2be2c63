use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::item::TileItem;

/// Ordering policy for layouts whose position is not driven by area
/// (the equal-size grid, and callers ordering before a default layout).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Keep the caller's input order.
    #[default]
    Default,
    /// Alphabetical by entity id, falling back to label for items without one.
    EntityId,
    /// Alphabetical by label.
    Label,
}

impl SortBy {
    /// Compare two items under this policy. `Default` reports all items
    /// equal so a stable sort leaves the input order intact.
    pub fn compare(self, a: &TileItem, b: &TileItem) -> Ordering {
        match self {
            SortBy::Default => Ordering::Equal,
            SortBy::EntityId => a
                .identity_key()
                .cmp(b.identity_key())
                .then_with(|| a.label.cmp(&b.label)),
            SortBy::Label => a.label.cmp(&b.label),
        }
    }
}

/// Order items in place. A→Z when `ascending`, Z→A otherwise. `Default`
/// preserves input order either way: callers using it have already ordered
/// by their own metric (commonly `sort_value`).
pub fn order_items(items: &mut [TileItem], sort_by: SortBy, ascending: bool) {
    if sort_by == SortBy::Default {
        return;
    }
    items.sort_by(|a, b| {
        let ord = sort_by.compare(a, b);
        if ascending {
            ord
        } else {
            ord.reverse()
        }
    });
}
