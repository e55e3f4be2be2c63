use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// A weighted dashboard item flowing into layout, built fresh per render
/// cycle from live entity state (or arbitrary JSON records).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileItem {
    /// Display name. Identity fallback when no entity id is present.
    pub label: CompactString,
    /// Original display value. Never consumed by layout math.
    #[serde(default)]
    pub value: f64,
    /// Drives rectangle area. Rewritten by preparation (inversion/clamping),
    /// so callers needing the raw value go through the restore step.
    #[serde(default)]
    pub size_value: f64,
    /// Positional-ordering metric, independent of `size_value` (a user may
    /// size by one metric and order by another).
    #[serde(default)]
    pub sort_value: f64,
    /// Carried through untouched for downstream coloring.
    #[serde(default)]
    pub color_value: f64,
    /// Stable identity key for restoration and diffing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<CompactString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<CompactString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<CompactString>,
}

impl TileItem {
    /// Stable identity: entity id when present, label otherwise.
    /// Duplicate labels without entity ids are not disambiguated.
    pub fn identity_key(&self) -> &str {
        self.entity_id.as_deref().unwrap_or(self.label.as_str())
    }
}

/// A positioned tile in the treemap layout.
///
/// Geometry is resolution-independent: `x`, `y`, `width`, `height` are
/// percentages (0–100) of the container passed to layout, and the caller
/// scales to pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileRect {
    #[serde(flatten)]
    pub item: TileItem,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl TileRect {
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Elongation: `max(w,h)/min(w,h)`. Infinite for a degenerate side.
    pub fn aspect_ratio(&self) -> f64 {
        let short = self.width.min(self.height);
        if short <= 0.0 {
            f64::INFINITY
        } else {
            self.width.max(self.height) / short
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TileItem;

    fn item(label: &str, entity_id: Option<&str>) -> TileItem {
        TileItem {
            label: label.into(),
            value: 0.0,
            size_value: 0.0,
            sort_value: 0.0,
            color_value: 0.0,
            entity_id: entity_id.map(Into::into),
            icon: None,
            unit: None,
        }
    }

    #[test]
    fn identity_prefers_entity_id_over_label() {
        assert_eq!(item("Kitchen", Some("sensor.kitchen")).identity_key(), "sensor.kitchen");
        assert_eq!(item("Kitchen", None).identity_key(), "Kitchen");
    }

    #[test]
    fn deserializes_camel_case_records() {
        let raw = r#"{
            "label": "Office",
            "value": 21.5,
            "sizeValue": 21.5,
            "colorValue": 48.0,
            "entityId": "sensor.office_temperature",
            "unit": "°C"
        }"#;
        let item: TileItem = serde_json::from_str(raw).unwrap();
        assert_eq!(item.entity_id.as_deref(), Some("sensor.office_temperature"));
        assert_eq!(item.size_value, 21.5);
        assert_eq!(item.sort_value, 0.0); // omitted fields default
    }
}
