//! # Seed Data Generator
//!
//! Populates a local ledger with sample data for development.
//!
//! ## Usage
//! ```bash
//! # Seed user "dev-user" with 20 sales (default)
//! cargo run -p ledger-db --bin seed
//!
//! # Custom user and amount
//! cargo run -p ledger-db --bin seed -- --user uid-123 --count 200
//!
//! # Specify database path
//! cargo run -p ledger-db --bin seed -- --db ./data/ledger.db
//! ```
//!
//! ## Generated Data
//! - One client per name in `CLIENTS`, keyed `CLI-{NNN}`
//! - One product per entry in `PRODUCTS`
//! - `count` sales cycling through clients and products, each with its
//!   automatic income transaction
//! - A collection payment for every credit sale

use chrono::{Duration, Local};
use ledger_core::document::fields;
use ledger_core::{Document, Session};
use ledger_db::{Database, DbConfig};
use serde_json::{json, Value};
use std::env;
use tracing_subscriber::EnvFilter;

/// Client names for test data.
const CLIENTS: &[&str] = &[
    "Ana López",
    "Luis Hernández",
    "María García",
    "Jorge Martínez",
    "Sofía Ramírez",
    "Carlos Torres",
];

/// (Clave, Nombre, Categoría, Precio Unitario, Costo Unitario)
const PRODUCTS: &[(&str, &str, &str, f64, f64)] = &[
    ("CAF-01", "Café molido 500g", "Abarrotes", 95.0, 61.5),
    ("AZU-01", "Azúcar 1kg", "Abarrotes", 32.0, 22.0),
    ("LEC-01", "Leche entera 1L", "Lácteos", 27.5, 19.0),
    ("QUE-01", "Queso fresco 400g", "Lácteos", 68.0, 45.0),
    ("JAB-01", "Jabón de barra", "Limpieza", 18.0, 11.5),
    ("DET-01", "Detergente 1kg", "Limpieza", 54.0, 36.0),
];

/// Payment methods, cycled per sale.
const PAYMENT_METHODS: &[&str] = &["Efectivo", "Transferencia", "Tarjeta"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 20;
    let mut db_path = String::from("./ledger_dev.db");
    let mut user_id = String::from("dev-user");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(20);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--user" | "-u" => {
                if i + 1 < args.len() {
                    user_id = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Ledger Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -u, --user <UID>   User to seed (default: dev-user)");
                println!("  -c, --count <N>    Number of sales to generate (default: 20)");
                println!("  -d, --db <PATH>    Database file path (default: ./ledger_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Ledger Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!("User:     {}", user_id);
    println!("Sales:    {}", count);
    println!();

    let session = Session::new(&user_id)?;
    let db = Database::connect(DbConfig::new(&db_path, "local")).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing data
    let existing = db.sales().list(&session).await?.len();
    if existing > 0 {
        println!("⚠ User already has {} sales", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Use another --user or delete the database file.");
        db.close().await;
        return Ok(());
    }

    let start = std::time::Instant::now();

    for (idx, name) in CLIENTS.iter().enumerate() {
        let id = format!("CLI-{:03}", idx + 1);
        db.clients().upsert(&session, &id, &client_record(name, idx)).await?;
    }
    println!("✓ Inserted {} clients", CLIENTS.len());

    for product in PRODUCTS {
        db.products().add(&session, &product_record(product)).await?;
    }
    println!("✓ Inserted {} products", PRODUCTS.len());

    let mut payments = 0;
    for seed in 0..count {
        let sale = sale_record(seed);

        if let Err(e) = db.sales().add(&session, &sale).await {
            eprintln!("Failed to insert sale {}: {}", seed, e);
            continue;
        }
        db.transactions().register_sale_income(&session, &sale).await?;

        let credit = sale.get(fields::CREDIT_AMOUNT).and_then(Value::as_f64).unwrap_or(0.0);
        if credit > 0.0 {
            let client = CLIENTS[seed % CLIENTS.len()];
            let date = sale.get(fields::DATE).and_then(Value::as_str).unwrap_or_default();
            db.transactions()
                .record_collection_payment(&session, client, credit / 2.0, "Efectivo", date, None)
                .await?;
            payments += 1;
        }
    }
    println!("✓ Inserted {} sales with automatic income", count);
    println!("✓ Recorded {} collection payments", payments);

    // Add one expense so the balance has both sides
    db.transactions()
        .add(
            &session,
            &document(json!({
                "Fecha": Local::now().date_naive().format("%Y-%m-%d").to_string(),
                "Descripción": "Renta del local",
                "Categoría": "Renta",
                "Tipo": "Egreso",
                "Monto": 3500.0,
            })),
        )
        .await?;

    println!();
    println!("Completed in {:?}", start.elapsed());
    println!();
    println!("Table sizes:");
    println!("  ventas:        {}", db.sales().list(&session).await?.len());
    println!("  clientes:      {}", db.clients().list(&session).await?.len());
    println!("  productos:     {}", db.products().list(&session).await?.len());
    println!("  transacciones: {}", db.transactions().list(&session).await?.len());
    println!("  cobranza:      {}", db.transactions().list_collections(&session).await?.len());

    let balance = db.transactions().balance(&session).await?;
    println!();
    println!("Balance:");
    println!("  Ingresos: {:>12.2}", balance.income);
    println!("  Egresos:  {:>12.2}", balance.expense);
    println!("  Neto:     {:>12.2}", balance.net);

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Installs the fmt subscriber. `RUST_LOG` overrides the default filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,ledger=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn document(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        _ => Document::new(),
    }
}

fn client_record(name: &str, seed: usize) -> Document {
    let slug = name
        .split_whitespace()
        .next()
        .unwrap_or("cliente")
        .to_lowercase();

    document(json!({
        "Nombre": name,
        "Correo": format!("{}@example.com", slug),
        "Teléfono": format!("55{:08}", 10_000_000 + seed * 7_919),
        "Empresa": if seed % 2 == 0 { "Particular" } else { "Comercial del Centro" },
        "RFC": format!("XAXX01010{}", seed),
        "Límite de crédito": 5000 + (seed as i64) * 1000,
    }))
}

fn product_record(product: &(&str, &str, &str, f64, f64)) -> Document {
    let (key, name, category, price, cost) = *product;

    document(json!({
        "Clave": key,
        "Nombre": name,
        "Categoría": category,
        "Precio Unitario": price,
        "Costo Unitario": cost,
        "Cantidad": 50,
        "Descripción": format!("{} ({})", name, category),
    }))
}

/// Builds a sale; every third sale is on credit.
fn sale_record(seed: usize) -> Document {
    let (_, product, _, price, _) = PRODUCTS[seed % PRODUCTS.len()];
    let client = CLIENTS[seed % CLIENTS.len()];
    let quantity = 1 + (seed * 7) % 5;
    let total = price * quantity as f64;
    let on_credit = seed % 3 == 0;
    let date = Local::now().date_naive() - Duration::days((seed % 30) as i64);

    document(json!({
        "Fecha": date.format("%Y-%m-%d").to_string(),
        "Cliente": client,
        "Producto": product,
        "Cantidad": quantity,
        "Precio Unitario": price,
        "Total": total,
        "Monto Crédito": if on_credit { total } else { 0.0 },
        "Monto Contado": if on_credit { 0.0 } else { total },
        "Anticipo Aplicado": 0.0,
        "Método de pago": PAYMENT_METHODS[seed % PAYMENT_METHODS.len()],
        "Tipo de venta": if on_credit { "Crédito" } else { "Contado" },
    }))
}
