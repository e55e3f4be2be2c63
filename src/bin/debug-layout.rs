/// Diagnostic tool to verify the prepare → layout → restore pipeline
use mosaicview_rs::item::TileItem;
use mosaicview_rs::layout::{self, LayoutOptions};
use mosaicview_rs::prepare::{prepare, PrepareOptions};
use mosaicview_rs::restore::restore;
use std::fs;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mosaicview_rs=debug".parse().unwrap()),
        )
        .init();

    let items = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => {
            let raw = fs::read_to_string(&path)?;
            serde_json::from_str::<Vec<TileItem>>(&raw)?
        }
        None => sample_items(),
    };

    println!("=== DIAGNOSTIC: Prepare → Layout Pipeline ===");
    println!("\n[1] Input: {} items", items.len());

    let prepared = prepare(&items, &PrepareOptions::default());
    println!("\n[2] Prepared: {} items", prepared.items.len());
    println!(
        "    Color range: [{:.2}, {:.2}]",
        prepared.color_min, prepared.color_max
    );
    println!("    Top 5 by prepared size:");
    for (i, item) in prepared.items.iter().take(5).enumerate() {
        println!(
            "    [{}] '{}' - size={:.2} (original value {:.2})",
            i, item.label, item.size_value, item.value
        );
    }

    let options = LayoutOptions::default();
    let result = layout::squarify(&prepared.items, 100.0, 100.0, &options);
    println!(
        "\n[3] Layout computed: {} rectangles in {} rows",
        result.rects.len(),
        result.rows
    );

    println!("\n[4] Top 5 largest rectangles by area:");
    let mut sorted_rects = result.rects.clone();
    sorted_rects.sort_by(|a, b| {
        b.area()
            .partial_cmp(&a.area())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for (i, rect) in sorted_rects.iter().take(5).enumerate() {
        println!(
            "    [{}] '{}' - {:.1}x{:.1} ({:.1}%²) at ({:.1}, {:.1}) - aspect {:.2}",
            i,
            rect.item.label,
            rect.width,
            rect.height,
            rect.area(),
            rect.x,
            rect.y,
            rect.aspect_ratio()
        );
    }

    println!("\n[5] Checking for anomalies:");
    let area_sum: f64 = result.rects.iter().map(|r| r.area()).sum();
    println!("    Total rect area: {:.0}%²", area_sum);
    println!("    Container area:  {:.0}%²", 100.0 * 100.0);
    println!("    Coverage: {:.1}%", area_sum / (100.0 * 100.0) * 100.0);
    let too_thin = result
        .rects
        .iter()
        .filter(|r| r.aspect_ratio() > options.aspect_limit + 0.1)
        .count();
    println!(
        "    Rects beyond the {:.0}:1 aspect limit: {}",
        options.aspect_limit, too_thin
    );

    let mut rects = result.rects;
    restore(&mut rects, &items);
    println!("\n[6] Restored display values:");
    for rect in rects.iter().take(5) {
        println!(
            "    '{}' - value {:.2}{}",
            rect.item.label,
            rect.item.value,
            rect.item.unit.as_deref().unwrap_or("")
        );
    }

    Ok(())
}

/// Built-in power-sensor sample, used when no JSON file is given.
fn sample_items() -> Vec<TileItem> {
    let readings = [
        ("Heat pump", "sensor.heat_pump_power", 1840.0),
        ("Oven", "sensor.oven_power", 2350.0),
        ("Dishwasher", "sensor.dishwasher_power", 940.0),
        ("Fridge", "sensor.fridge_power", 120.0),
        ("Office desk", "sensor.office_desk_power", 310.0),
        ("TV corner", "sensor.tv_corner_power", 185.0),
        ("Router", "sensor.router_power", 12.0),
        ("Standby", "sensor.standby_power", 0.0),
    ];
    readings
        .iter()
        .map(|&(label, entity_id, watts)| TileItem {
            label: label.into(),
            value: watts,
            size_value: watts,
            sort_value: watts,
            color_value: watts,
            entity_id: Some(entity_id.into()),
            icon: None,
            unit: Some(" W".into()),
        })
        .collect()
}
