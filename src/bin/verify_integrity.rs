//! Report orphan files (no matching row) and rows without images.
//!
//! Read-only on both sides; safe to run any time.

use std::collections::BTreeSet;
use std::path::Path;
use std::process;

use catalog_sync::audit;
use catalog_sync::config::Config;
use catalog_sync::remote::table::TableClient;

const OPTIMIZED_DIR: &str = "optimized_batch";
const TABLE: &str = "products";
const ENV_PATH: &str = ".env";

fn main() {
    println!("🔍 Starting integrity check...");

    let config = match Config::from_env_file(Path::new(ENV_PATH)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            process::exit(1);
        }
    };

    let table = TableClient::new(&config, TABLE);
    let db_slugs: BTreeSet<String> = match table.slugs() {
        Ok(slugs) => slugs.into_iter().collect(),
        Err(e) => {
            eprintln!("❌ Error fetching table slugs: {}", e);
            process::exit(1);
        }
    };
    println!("📚 Rows in table: {}", db_slugs.len());

    let dir = Path::new(OPTIMIZED_DIR);
    if !dir.exists() {
        eprintln!("❌ Directory not found: {}", dir.display());
        process::exit(1);
    }
    let file_slugs = audit::file_slugs(dir);
    println!("🖼️ Slugs detected in files: {}", file_slugs.len());

    let report = audit::cross_reference(&db_slugs, &file_slugs);

    println!("\n---------------------------------------------------");
    if report.orphans.is_empty() {
        println!("✅ No orphan files.");
    } else {
        println!(
            "⚠️ ORPHAN FILES ({}) - likely typos in source filenames:",
            report.orphans.len()
        );
        for slug in &report.orphans {
            println!("   - {}", slug);
        }
    }

    println!("\n---------------------------------------------------");
    if report.missing.is_empty() {
        println!("✅ Every row has an image.");
    } else {
        println!(
            "⚠️ ROWS WITHOUT IMAGES ({}) - photos missing for these slugs:",
            report.missing.len()
        );
        for slug in &report.missing {
            println!("   - {}", slug);
        }
    }
    println!("\n---------------------------------------------------");
}
