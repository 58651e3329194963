//! # Seed Data Generator
//!
//! Populates a development database with demo storefront data: an address
//! book, a staged cart, and the locale preference.
//!
//! ## Usage
//! ```bash
//! cargo run -p mercato-db --bin seed
//!
//! # Specify database path
//! cargo run -p mercato-db --bin seed -- --db ./mercato_dev.db
//! ```

use std::env;

use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use mercato_core::{AddressType, CartItem, Locale, ShippingAddress};
use mercato_db::{Database, DbConfig};

/// Demo address book: (name, phone, province, district, ward, street, default, type)
const ADDRESSES: &[(&str, &str, &str, &str, &str, &str, bool, AddressType)] = &[
    (
        "Nguyễn Văn An",
        "0912345678",
        "Hà Nội",
        "Cầu Giấy",
        "Dịch Vọng",
        "144 Xuân Thủy",
        true,
        AddressType::Home,
    ),
    (
        "Nguyễn Văn An",
        "0912345678",
        "Hà Nội",
        "Hai Bà Trưng",
        "Bách Khoa",
        "1 Đại Cồ Việt",
        false,
        AddressType::Office,
    ),
];

/// Demo cart lines: (name, brand, price, original price, variant label, qty)
const ITEMS: &[(&str, &str, i64, Option<i64>, Option<&str>, i64)] = &[
    (
        "Áo thun cotton",
        "Mercato Basics",
        120_000,
        Some(150_000),
        Some("Đỏ, M"),
        2,
    ),
    (
        "Quần jean slim",
        "Mercato Basics",
        350_000,
        None,
        Some("Xanh, 32 (+2)"),
        1,
    ),
    ("Giày sneaker", "SneakerHub", 890_000, None, Some("Trắng, 40"), 1),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./mercato_dev.db");

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
                println!("Mercato Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./mercato_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Mercato Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!();

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.addresses().load().await?;
    if !existing.is_empty() {
        println!("⚠ Database already has {} addresses", existing.len());
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let addresses: Vec<ShippingAddress> = ADDRESSES
        .iter()
        .map(
            |(name, phone, province, district, ward, street, is_default, address_type)| {
                ShippingAddress {
                    id: Uuid::new_v4().to_string(),
                    name: (*name).to_string(),
                    phone: (*phone).to_string(),
                    province: (*province).to_string(),
                    district: (*district).to_string(),
                    ward: (*ward).to_string(),
                    street_address: (*street).to_string(),
                    is_default: *is_default,
                    address_type: *address_type,
                }
            },
        )
        .collect();
    db.addresses().save(&addresses).await?;
    if let Some(default) = addresses.iter().find(|a| a.is_default) {
        db.addresses().set_selected_id(Some(&default.id)).await?;
    }

    let items: Vec<CartItem> = ITEMS
        .iter()
        .map(|(name, brand, price, original_price, variant, quantity)| CartItem {
            id: Uuid::new_v4().to_string(),
            name: (*name).to_string(),
            price: *price,
            original_price: *original_price,
            brand: (*brand).to_string(),
            image_url: String::new(),
            variant: (*variant).map(str::to_string),
            stock: Some(50),
            quantity: *quantity,
            selected: true,
        })
        .collect();
    db.storage()
        .put_json(mercato_db::keys::CHECKOUT_ITEMS, &items)
        .await?;

    db.prefs().set_locale(Locale::Vi).await?;

    println!("✓ Seeded {} addresses", addresses.len());
    println!("✓ Staged {} cart items", items.len());
    println!("✓ Locale set to vi");

    db.close().await;
    Ok(())
}
