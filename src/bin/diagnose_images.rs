//! Dump a row's image columns and probe each URL with a HEAD request.
//!
//! Read-only. Useful when a product renders without pictures and nobody
//! knows whether the row or the bucket is to blame.

use std::path::Path;
use std::process;

use serde_json::Value;

use catalog_sync::config::Config;
use catalog_sync::remote::table::TableClient;

const TABLE: &str = "products";
const ENV_PATH: &str = ".env";

/// Rows to inspect.
const SLUGS: [&str; 3] = ["mini-poker", "mine-my-pleasure", "petit-mort"];

const COLUMNS: &str = "name,slug,image_url,image2_url,image3_url";
const URL_COLUMNS: [&str; 3] = ["image_url", "image2_url", "image3_url"];

fn main() {
    println!("🩺 Running image diagnostics...");

    let config = match Config::from_env_file(Path::new(ENV_PATH)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            process::exit(1);
        }
    };

    let table = TableClient::new(&config, TABLE);
    let http = reqwest::blocking::Client::new();

    for slug in SLUGS {
        check_product(&table, &http, slug);
    }
}

fn check_product(table: &TableClient, http: &reqwest::blocking::Client, slug: &str) {
    let rows = match table.select_by_slug(slug, COLUMNS) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("❌ Error checking {}: {}", slug, e);
            return;
        }
    };
    let Some(row) = rows.first() else {
        println!("❌ Row NOT FOUND: {}", slug);
        return;
    };

    let name = row.get("name").and_then(Value::as_str).unwrap_or("?");
    println!("\n📦 Product: {} ({})", name, slug);

    for column in URL_COLUMNS {
        match row.get(column).and_then(Value::as_str) {
            Some(url) if !url.is_empty() => {
                println!("   - {}: {}", column, url);
                match http.head(url).send() {
                    Ok(response) if response.status().is_success() => {
                        println!("     ✅ Reachable ({})", response.status())
                    }
                    Ok(response) => println!("     ❌ Broken ({})", response.status()),
                    Err(e) => println!("     ❌ URL error: {}", e),
                }
            }
            _ => println!("   - {}: ⚠️ not set", column),
        }
    }
}
