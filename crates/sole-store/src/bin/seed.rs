//! # Seed Data Generator
//!
//! Populates a shop snapshot with demo inventory and sales for development.
//!
//! ## Usage
//! ```bash
//! # Generate the default demo shop
//! cargo run -p sole-store --bin seed
//!
//! # Generate a custom number of stock lots
//! cargo run -p sole-store --bin seed -- --count 20
//!
//! # Specify the data directory
//! cargo run -p sole-store --bin seed -- --data ./data
//! ```
//!
//! ## Generated Data
//! Creates realistic shoe lots across categories (runners, sneakers, boots),
//! each with size/color variants, then rings up a handful of sales so the
//! dashboard has something to show. Everything is derived from the lot index,
//! so repeated runs against a fresh directory produce the same shop.

use std::env;
use std::error::Error;

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use sole_core::types::{SaleLineInput, StockDraft, VariantDraft};
use sole_store::config::ShopConfig;
use sole_store::persistence::FileStore;
use sole_store::shop::Shop;

/// Shoe models for realistic demo data: (name, category, base cost in cents).
const MODELS: &[(&str, &str, i64)] = &[
    ("Runner Daily", "Running", 15000),
    ("Runner Tempo", "Running", 18500),
    ("Trail Grip 2", "Running", 21000),
    ("Court Classic", "Sneakers", 9000),
    ("Court Classic Mid", "Sneakers", 11000),
    ("Canvas Low", "Sneakers", 6500),
    ("Chelsea Boot", "Boots", 24000),
    ("Hiker 400", "Boots", 27500),
    ("Desert Boot", "Boots", 19500),
    ("Slide Comfort", "Sandals", 4500),
    ("Strap Sandal", "Sandals", 5500),
    ("Loafer Uptown", "Dress", 22000),
];

/// Size run used for every lot.
const SIZES: &[&str] = &["40", "41", "42", "43", "44"];

/// Colorways cycled across lots.
const COLORS: &[&str] = &["Black", "White", "Navy", "Taupe"];

fn main() -> Result<(), Box<dyn Error>> {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = MODELS.len();
    let mut config = ShopConfig::from_env();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(MODELS.len());
                    i += 1;
                }
            }
            "--data" | "-d" => {
                if i + 1 < args.len() {
                    config.data_dir = args[i + 1].clone().into();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Sole POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!(
                    "  -c, --count <N>    Number of stock lots to generate (default: {})",
                    MODELS.len()
                );
                println!("  -d, --data <PATH>  Data directory (default: ./data)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Sole POS Seed Data Generator");
    println!("============================");
    println!("Data dir: {}", config.data_dir.display());
    println!("Lots:     {}", count);
    println!();

    let store = FileStore::new(&config.data_dir);
    let mut shop = Shop::load_or_default(&store, &config.snapshot_key);

    if !shop.catalog().is_empty() {
        println!("⚠ Snapshot already has {} stock lots", shop.catalog().len());
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the data directory to regenerate.");
        return Ok(());
    }

    // Generate stock lots
    println!("Generating stock lots...");
    for lot in 0..count {
        let (name, category, base_cost) = MODELS[lot % MODELS.len()];
        let color = COLORS[lot % COLORS.len()];

        let variants = SIZES
            .iter()
            .enumerate()
            .map(|(s, size)| VariantDraft {
                id: None,
                size: size.to_string(),
                color: color.to_string(),
                // 1-4 units per size, derived from the indices
                quantity: ((lot + s) % 4 + 1) as i64,
            })
            .collect();

        shop.add_stock(StockDraft {
            name: if lot < MODELS.len() {
                name.to_string()
            } else {
                // Re-runs of the model table get a batch suffix
                format!("{} (batch {})", name, lot / MODELS.len() + 1)
            },
            category: Some(category.to_string()),
            description: None,
            image_url: None,
            unit_cost_cents: base_cost,
            variants,
        })?;
    }
    println!("✓ Generated {} lots", shop.catalog().len());

    // Ring up a few sales so the dashboard is not empty: one unit of the
    // first size of every third lot, at a 40% markup
    let targets: Vec<(String, String, i64)> = shop
        .catalog()
        .items()
        .iter()
        .step_by(3)
        .filter_map(|item| {
            item.variants.first().map(|v| {
                (
                    item.id.clone(),
                    v.id.clone(),
                    item.unit_cost_cents * 140 / 100,
                )
            })
        })
        .collect();

    for (stock_id, variant_id, price) in targets {
        shop.record_sale(
            &stock_id,
            &[SaleLineInput {
                variant_id,
                quantity: 1,
                price_per_unit_cents: price,
            }],
        )?;
    }
    println!("✓ Recorded {} demo sales", shop.ledger().len());

    shop.persist(&store, &config.snapshot_key)?;
    println!("✓ Snapshot saved");

    // Dashboard summary
    let stats = shop.dashboard();
    println!();
    println!("Dashboard");
    println!("---------");
    println!("  Units in stock:  {}", stats.total_inventory_count);
    println!(
        "  Inventory value: {}",
        config.format_currency(stats.total_inventory_value_cents)
    );
    println!(
        "  Revenue:         {}",
        config.format_currency(stats.total_revenue_cents)
    );
    println!(
        "  Profit:          {}",
        config.format_currency(stats.total_profit_cents)
    );
    println!("  Sales today:     {}", stats.sales_today);

    println!();
    println!("Best sellers:");
    for row in shop.best_sellers() {
        println!(
            "  {:>3} × {}  ({})",
            row.quantity_sold,
            row.name,
            config.format_currency(row.total_revenue_cents)
        );
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
