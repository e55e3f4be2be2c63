use std::collections::HashMap;

use crate::item::{TileItem, TileRect};

/// Re-attach pre-preparation display values onto laid-out tiles.
///
/// Preparation rewrites `size_value` for packing and layout reorders
/// items, so positional correspondence with the caller's records is gone;
/// matching is by entity id first, label second (the identity key).
/// Duplicate bare labels without entity ids collide silently; the last
/// record under a key wins.
pub fn restore(rects: &mut [TileRect], originals: &[TileItem]) {
    let by_key: HashMap<&str, &TileItem> = originals
        .iter()
        .map(|item| (item.identity_key(), item))
        .collect();

    for rect in rects.iter_mut() {
        let Some(original) = by_key.get(rect.item.identity_key()) else {
            tracing::debug!("no original record for '{}'", rect.item.identity_key());
            continue;
        };
        rect.item.value = original.value;
        rect.item.size_value = original.size_value;
        rect.item.sort_value = original.sort_value;
        rect.item.color_value = original.color_value;
        rect.item.icon = original.icon.clone();
        rect.item.unit = original.unit.clone();
    }
}
