//! # Demo Cart Seeder
//!
//! Populates the cart store with a realistic demo cart for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default cart into ./apothecart_dev.db
//! cargo run -p apothecart-store --bin seed
//!
//! # Specify database path and cart id
//! cargo run -p apothecart-store --bin seed -- --db ./data/apothecart.db --cart demo
//! ```
//!
//! The seeded cart spans three sellers (two pharmacies plus a
//! marketplace-direct item) so the grouped view and per-seller shipping
//! are visible immediately. After saving, the cart is loaded back through
//! the pricing engine and the grouped totals are printed.

use std::env;

use apothecart_core::cart::Cart;
use apothecart_core::{LineItem, Money};
use apothecart_store::{CartStore, StoreConfig};

/// The demo cart: (product id, name, price cents, quantity, seller).
const DEMO_ITEMS: &[(&str, &str, i64, i64, Option<(&str, &str)>)] = &[
    (
        "amoxi-500",
        "Amoxicillin 500mg (10 caps)",
        4550,
        2,
        Some(("ph-central", "Central Pharmacy")),
    ),
    (
        "panadol-extra",
        "Panadol Extra (24 tabs)",
        1250,
        1,
        Some(("ph-central", "Central Pharmacy")),
    ),
    (
        "insulin-pen",
        "Insulin Pen 100IU/ml",
        120000,
        1,
        Some(("ph-sunrise", "Sunrise Pharmacy")),
    ),
    (
        "gauze-roll",
        "Sterile Gauze Roll",
        499,
        4,
        Some(("ph-sunrise", "Sunrise Pharmacy")),
    ),
    ("vitc-1000", "Vitamin C 1000mg (30 tabs)", 1999, 1, None),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./apothecart_dev.db");
    let mut cart_id = String::from("demo-cart");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--cart" | "-c" => {
                if i + 1 < args.len() {
                    cart_id = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Apothecart Demo Cart Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./apothecart_dev.db)");
                println!("  -c, --cart <ID>    Cart id to seed (default: demo-cart)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Apothecart Demo Cart Seeder");
    println!("===========================");
    println!("Database: {}", db_path);
    println!("Cart id:  {}", cart_id);
    println!();

    // Connect (creates the file and runs migrations)
    let store = CartStore::new(StoreConfig::new(&db_path)).await?;
    println!("✓ Connected, migrations applied");

    let repo = store.carts();

    let existing = repo.line_count(&cart_id).await?;
    if existing > 0 {
        println!("⚠ Cart '{}' already has {} lines", cart_id, existing);
        println!("  Skipping seed to avoid clobbering it.");
        println!("  Pass a different --cart id or delete the database file.");
        return Ok(());
    }

    // Build the snapshot through the engine so the seeded data went
    // through the same merge/clamp rules as live traffic
    let mut cart = Cart::new();
    for &(id, name, price_cents, quantity, seller) in DEMO_ITEMS {
        cart.add_item(
            LineItem {
                id: id.to_string(),
                name: name.to_string(),
                price_cents,
                quantity: 0,
                seller_id: seller.map(|(sid, _)| sid.to_string()),
                seller_name: seller.map(|(_, sname)| sname.to_string()),
                max_quantity: None,
            },
            quantity,
        );
    }

    repo.save(&cart_id, &cart.snapshot_items()).await?;
    println!("✓ Seeded {} lines", cart.line_count());

    // Load it back and show what a session would see
    let mut restored = Cart::new();
    restored.hydrate(repo.load(&cart_id).await?);

    println!();
    for group in restored.group_by_seller() {
        println!(
            "{} - subtotal {}, shipping {} ({})",
            group.seller_name,
            group.subtotal(),
            group.shipping_fee(),
            group.delivery_estimate
        );
        for item in &group.items {
            println!(
                "    {} x{} @ {}",
                item.name,
                item.quantity,
                item.unit_price()
            );
        }
    }

    let totals = restored.compute_totals();
    println!();
    println!("Subtotal: {}", Money::from_cents(totals.subtotal_cents));
    println!("Tax:      {}", Money::from_cents(totals.tax_cents));
    println!("Shipping: {}", Money::from_cents(totals.shipping_cents));
    println!("Total:    {}", Money::from_cents(totals.total_cents));
    println!();
    println!("✓ Seed complete!");

    Ok(())
}
