//! # Seed Data Generator
//!
//! Populates the database with a realistic medical-apparel catalog for
//! development.
//!
//! ## Usage
//! ```bash
//! # Generate the default catalog (500 products)
//! cargo run -p drplanet-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p drplanet-db --bin seed -- --count 1000
//!
//! # Specify database path
//! cargo run -p drplanet-db --bin seed -- --db ./data/drplanet.db
//!
//! # Also seed a demo trading day (orders, sales, udhar, discount)
//! cargo run -p drplanet-db --bin seed -- --demo
//! ```
//!
//! ## Generated Products
//! - Scrubs, lab coats, and caps carry a color × size stock matrix
//! - Equipment (stethoscopes, monitors, instruments) carries flat stock
//! - Every product gets a SKU, a barcode, and a deterministic price;
//!   every fifth one gets a promotional sale price

use chrono::Utc;
use std::env;

use drplanet_core::pricing::SaleDiscount;
use drplanet_core::{
    GlobalDiscount, Money, Order, OrderItem, OrderStatus, PaymentMethod, PaymentStatus, Product,
    ShippingAddress, VariantMatrix,
};
use drplanet_db::repository::sale::{NewSale, NewSaleItem};
use drplanet_db::{Database, DbConfig};
use uuid::Uuid;

/// Apparel lines: SKU prefix, name, available colors, base price in paisa.
/// These all get a color × size matrix.
const APPAREL: &[(&str, &str, &[&str], i64)] = &[
    (
        "SCT",
        "Classic Scrub Top",
        &["Ceil Blue", "Navy", "Wine", "Black", "Hunter Green"],
        149_900,
    ),
    (
        "SCP",
        "Classic Scrub Pant",
        &["Ceil Blue", "Navy", "Wine", "Black", "Hunter Green"],
        139_900,
    ),
    (
        "SCS",
        "Stretch Scrub Set",
        &["Caribbean Blue", "Pewter", "Burgundy", "Teal"],
        279_900,
    ),
    (
        "JOG",
        "Jogger Scrub Pant",
        &["Navy", "Black", "Olive", "Grey"],
        169_900,
    ),
    (
        "LBC",
        "Consultation Lab Coat",
        &["White"],
        239_900,
    ),
    (
        "LBL",
        "Long Lab Coat",
        &["White", "Sky Blue"],
        269_900,
    ),
    (
        "CAP",
        "Surgical Cap",
        &["Ceil Blue", "Navy", "Floral Print", "Black"],
        39_900,
    ),
    (
        "WRM",
        "Warm-Up Jacket",
        &["Navy", "Black", "Wine"],
        189_900,
    ),
];

/// Equipment lines: SKU prefix, name, price in paisa. Flat stock only.
const EQUIPMENT: &[(&str, &str, i64)] = &[
    ("STH", "Dual-Head Stethoscope", 349_900),
    ("STC", "Cardiology Stethoscope", 1_249_900),
    ("BPM", "Aneroid BP Monitor", 449_900),
    ("BPD", "Digital BP Monitor", 689_900),
    ("OXI", "Fingertip Pulse Oximeter", 189_900),
    ("THM", "Infrared Thermometer", 259_900),
    ("PEN", "Diagnostic Penlight", 49_900),
    ("SCR", "Bandage Scissors", 59_900),
    ("HAM", "Reflex Hammer", 69_900),
    ("BAG", "Medical Utility Bag", 329_900),
];

/// Size run for apparel.
const SIZES: &[&str] = &["XS", "S", "M", "L", "XL", "XXL"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 500;
    let mut db_path = String::from("./drplanet_dev.db");
    let mut demo = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(500);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--demo" => {
                demo = true;
            }
            "--help" | "-h" => {
                println!("Doctor Planet Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 500)");
                println!("  -d, --db <PATH>    Database file path (default: ./drplanet_dev.db)");
                println!("      --demo         Also seed a demo trading day");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Doctor Planet Seed Data Generator");
    println!("====================================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing products
    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Generate products
    println!();
    println!("Generating products...");

    let mut generated = 0;
    let mut first_products: Vec<Product> = Vec::new();
    let start = std::time::Instant::now();

    let mut seed = 0usize;
    'outer: loop {
        for (prefix, name, colors, base_price) in APPAREL {
            if generated >= count {
                break 'outer;
            }
            let product = generate_apparel(prefix, name, colors, *base_price, seed);
            if let Err(e) = db.products().insert(&product).await {
                eprintln!("Failed to insert {}: {}", product.sku, e);
            } else {
                if first_products.len() < 4 {
                    first_products.push(product);
                }
                generated += 1;
                if generated % 100 == 0 {
                    println!("  Generated {} products...", generated);
                }
            }
            seed += 1;
        }

        for (prefix, name, price) in EQUIPMENT {
            if generated >= count {
                break 'outer;
            }
            let product = generate_equipment(prefix, name, *price, seed);
            if let Err(e) = db.products().insert(&product).await {
                eprintln!("Failed to insert {}: {}", product.sku, e);
            } else {
                if first_products.len() < 4 {
                    first_products.push(product);
                }
                generated += 1;
                if generated % 100 == 0 {
                    println!("  Generated {} products...", generated);
                }
            }
            seed += 1;
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} products in {:?}", generated, elapsed);
    println!(
        "  Rate: {:.0} products/second",
        generated as f64 / elapsed.as_secs_f64()
    );

    // Verify FTS
    println!();
    println!("Verifying FTS index...");
    let search_results = db.products().search("scrub", 10).await?;
    println!("  Search 'scrub': {} results", search_results.len());

    let search_results = db.products().search("steth", 10).await?;
    println!("  Search 'steth': {} results", search_results.len());

    if demo {
        println!();
        println!("Seeding demo trading day...");
        seed_demo_day(&db, &first_products).await?;
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates an apparel product with a color × size stock matrix.
fn generate_apparel(
    prefix: &str,
    name: &str,
    colors: &[&str],
    base_price: i64,
    seed: usize,
) -> Product {
    let now = Utc::now();

    let mut matrix = VariantMatrix::new();
    for (color_idx, color) in colors.iter().enumerate() {
        for (size_idx, size) in SIZES.iter().enumerate() {
            let cell = ((seed * 7 + color_idx * 3 + size_idx) % 12) as i64;
            matrix.set(color, size, cell);
        }
    }
    let stock = matrix.total();

    // Small deterministic spread so the catalog isn't flat-priced
    let price_paisa = base_price + ((seed * 137) % 5) as i64 * 10_000;

    // Every fifth product runs a promotion
    let sale_price_paisa = (seed % 5 == 0).then(|| price_paisa * 85 / 100);

    Product {
        id: Uuid::new_v4().to_string(),
        sku: format!("{}-{:04}", prefix, seed),
        barcode: Some(format!("896{:010}", seed)),
        name: name.to_string(),
        description: Some(format!("{} in {} colorways", name, colors.len())),
        category: Some("apparel".to_string()),
        price_paisa,
        sale_price_paisa,
        stock,
        variant_stock: Some(matrix),
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

/// Generates a flat-stock equipment product.
fn generate_equipment(prefix: &str, name: &str, price_paisa: i64, seed: usize) -> Product {
    let now = Utc::now();

    Product {
        id: Uuid::new_v4().to_string(),
        sku: format!("{}-{:04}", prefix, seed),
        barcode: Some(format!("896{:010}", seed)),
        name: name.to_string(),
        description: None,
        category: Some("equipment".to_string()),
        price_paisa,
        sale_price_paisa: (seed % 5 == 0).then(|| price_paisa * 90 / 100),
        stock: (seed % 40) as i64,
        variant_stock: None,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

/// Seeds one day of trading: web orders in assorted states, two POS
/// sales, an udhar settlement, and an active storewide discount. Ends by
/// printing the dashboard revenue report so the numbers can be eyeballed.
async fn seed_demo_day(
    db: &Database,
    products: &[Product],
) -> Result<(), Box<dyn std::error::Error>> {
    let [first, second, ..] = products else {
        println!("  ⚠ Not enough products for demo data, skipping");
        return Ok(());
    };

    let statuses = [
        OrderStatus::Delivered,
        OrderStatus::Pending,
        OrderStatus::Cancelled,
    ];
    for (i, status) in statuses.into_iter().enumerate() {
        let now = Utc::now();
        let order_id = Uuid::new_v4().to_string();
        let unit_price = first.unit_price().paisa();
        let quantity = (i + 1) as i64;
        let total = unit_price * quantity;

        let order = Order {
            id: order_id.clone(),
            status,
            payment_status: if status == OrderStatus::Delivered {
                PaymentStatus::Paid
            } else {
                PaymentStatus::Unpaid
            },
            subtotal_paisa: total,
            shipping_paisa: 0,
            total_paisa: total,
            customer_name: format!("Demo Customer {}", i + 1),
            customer_email: Some(format!("demo{}@example.com", i + 1)),
            shipping_address: Some(ShippingAddress {
                line1: "House 12, Street 4".to_string(),
                line2: None,
                city: "Karachi".to_string(),
                postal_code: Some("75500".to_string()),
                phone: Some("+92 321 5550100".to_string()),
            }),
            created_at: now,
            updated_at: now,
        };
        let items = vec![OrderItem {
            id: Uuid::new_v4().to_string(),
            order_id,
            product_id: first.id.clone(),
            name_snapshot: first.name.clone(),
            unit_price_paisa: unit_price,
            quantity,
            size: Some("M".to_string()),
            color: None,
            line_total_paisa: total,
        }];
        db.orders().insert_with_items(&order, &items).await?;
    }
    println!("  ✓ 3 web orders (delivered, pending, cancelled)");

    for product in [first, second] {
        let line = if product.has_variants() {
            NewSaleItem {
                product_id: product.id.clone(),
                quantity: 1,
                size: Some("M".to_string()),
                color: product
                    .variant_stock
                    .as_ref()
                    .and_then(|m| m.cells().next().map(|(color, _, _)| color.to_string())),
            }
        } else {
            NewSaleItem {
                product_id: product.id.clone(),
                quantity: 1,
                size: None,
                color: None,
            }
        };

        let (sale, _) = db
            .sales()
            .create_sale(NewSale {
                items: vec![line],
                discount: SaleDiscount::None,
                payment_method: PaymentMethod::Cash,
                amount_received: Some(Money::from_paisa(2_000_000)),
                customer_name: None,
                customer_phone: None,
                notes: None,
            })
            .await?;
        println!("  ✓ POS sale {}", sale.receipt_number);
    }

    db.udhar()
        .record(
            Some("Shifa Clinic"),
            Money::from_rupees(1_500, 0),
            Some("Partial settlement"),
        )
        .await?;
    println!("  ✓ 1 udhar payment");

    db.discount()
        .upsert(&GlobalDiscount {
            is_active: true,
            percentage_bps: 1_000,
            starts_at: None,
            ends_at: None,
            updated_at: Utc::now(),
        })
        .await?;
    println!("  ✓ Storewide discount active at 10%");

    let report = db.reporting().revenue_report().await?;
    println!();
    println!("  Today's revenue:  {}", report.today.total());
    println!("    web:   {}", report.today.web);
    println!("    pos:   {}", report.today.pos);
    println!("    udhar: {}", report.today.udhar);

    Ok(())
}
