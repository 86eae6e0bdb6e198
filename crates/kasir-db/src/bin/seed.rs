//! # Seed Data Loader
//!
//! Loads the demo catalog into a database for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./kasir_dev.db (default)
//! cargo run -p kasir-db --bin seed
//!
//! # Specify database path
//! cargo run -p kasir-db --bin seed -- --db ./data/kasir.db
//! ```
//!
//! ## Demo Catalog
//! | Category | Product        | Price  | Stock |
//! |----------|----------------|--------|-------|
//! | Makanan  | Indomie Godog  |  3.500 |    10 |
//! | Minuman  | Vit 1000ml     |  3.000 |    40 |
//! | Bumbu    | Kecap          | 13.000 |    20 |

use std::env;

use kasir_core::{Money, NewCategory, NewProduct};
use kasir_db::{Database, DbConfig};
use tracing_subscriber::EnvFilter;

/// `(category, description, [(product, price, stock)])`
const CATALOG: &[(&str, &str, &[(&str, i64, i64)])] = &[
    ("Makanan", "Makanan siap saji", &[("Indomie Godog", 3500, 10)]),
    ("Minuman", "Minuman kemasan", &[("Vit 1000ml", 3000, 40)]),
    ("Bumbu", "Bumbu dapur", &[("Kecap", 13_000, 20)]),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./kasir_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Kasir POS Seed Data Loader");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./kasir_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }

    println!("🌱 Kasir POS Seed Data Loader");
    println!("=============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path).min_connections(1)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        db.close().await;
        return Ok(());
    }

    for (category_name, description, products) in CATALOG {
        let category = db
            .categories()
            .insert(&NewCategory {
                name: category_name.to_string(),
                description: Some(description.to_string()),
            })
            .await?;

        for (name, price, stock) in products.iter() {
            let product = db
                .products()
                .insert(&NewProduct {
                    name: name.to_string(),
                    price: *price,
                    stock: *stock,
                    category_id: Some(category.id),
                })
                .await?;

            println!(
                "  + [{}] {} {} (stock {})",
                category.name,
                product.name,
                Money::from_minor(product.price),
                product.stock
            );
        }
    }

    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}
