//! # Seed Data Generator
//!
//! Resets the client list and service catalog to a known starting point.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p cotiza-db --bin seed
//!
//! # Specify database path
//! cargo run -p cotiza-db --bin seed -- --db ./data/cotiza.db
//! ```
//!
//! ## What It Does
//! 1. Deletes every client and every service (quotations are left alone)
//! 2. Inserts one client: ACME S.A.
//! 3. Inserts three catalog services
//! 4. Prints the generated identifiers, ready to paste into requests

use anyhow::Context;
use std::env;
use std::path::Path;

use cotiza_core::{NewClient, NewService};
use cotiza_db::{Database, DbConfig};

const DEFAULT_DB_PATH: &str = "./data/cotiza.db";

/// (name, base price, description)
const SERVICES: &[(&str, f64, &str)] = &[
    (
        "Formateo e Instalación SO",
        50.00,
        "Formateo y reinstalación del sistema operativo",
    ),
    (
        "Mantenimiento Preventivo PC",
        30.00,
        "Limpieza y revisión de hardware",
    ),
    ("Soporte Remoto", 20.00, "Soporte por hora vía remoto"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = env::var("DATABASE_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());

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
                println!("Cotiza Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: {DEFAULT_DB_PATH})");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Cotiza Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!();

    if let Some(parent) = Path::new(&db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }

    let db = Database::new(DbConfig::new(&db_path))
        .await
        .context("opening database")?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let removed_clients = db.clients().delete_all().await?;
    let removed_services = db.services().delete_all().await?;
    println!(
        "✓ Cleared {} clients and {} services",
        removed_clients, removed_services
    );

    let client = db
        .clients()
        .insert(&NewClient {
            name: "ACME S.A.".to_string(),
            email: "contacto@acme.com".to_string(),
            phone: "6000-0000".to_string(),
        })
        .await
        .context("inserting client")?;

    let mut service_ids = Vec::with_capacity(SERVICES.len());
    for (name, base_price, description) in SERVICES {
        let service = db
            .services()
            .insert(&NewService {
                name: name.to_string(),
                base_price: *base_price,
                description: Some(description.to_string()),
            })
            .await
            .with_context(|| format!("inserting service {name}"))?;
        service_ids.push((service.id, service.name));
    }

    println!();
    println!("✓ Seed complete!");
    println!("  Client ID:  {} ({})", client.id, client.name);
    for (id, name) in &service_ids {
        println!("  Service ID: {} ({})", id, name);
    }

    db.close().await;
    Ok(())
}
