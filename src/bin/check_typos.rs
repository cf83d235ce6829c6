//! Hunt for spelling variants of a slug across the table and the raw folder.
//!
//! Read-only. When the integrity check shows an orphan and a missing row that
//! are really the same product under two spellings, this narrows down which
//! side has the typo before anything gets renamed.

use std::fs;
use std::path::Path;
use std::process;

use catalog_sync::config::Config;
use catalog_sync::remote::table::TableClient;

const RAW_DIR: &str = "raw_batch";
const TABLE: &str = "products";
const ENV_PATH: &str = ".env";

/// Substrings to hunt for: the doubled and single-letter spellings both.
const VARIANTS: [&str; 2] = ["effet", "efet"];

fn main() {
    println!("🔍 Searching for 'effeto' / 'effetto' variants...\n");

    let config = match Config::from_env_file(Path::new(ENV_PATH)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            process::exit(1);
        }
    };

    println!("--- 📚 TABLE (slugs) ---");
    let table = TableClient::new(&config, TABLE);
    match table.slugs() {
        Ok(slugs) => {
            let hits: Vec<&String> = slugs.iter().filter(|slug| contains_variant(slug)).collect();
            if hits.is_empty() {
                println!("No matches in the table.");
            }
            for slug in hits {
                println!("✅ Table slug: {}", slug);
            }
        }
        Err(e) => eprintln!("❌ Table error: {}", e),
    }

    println!("\n--- 📂 FILES ({}) ---", RAW_DIR);
    let dir = Path::new(RAW_DIR);
    if !dir.exists() {
        eprintln!("❌ Directory not found: {}", dir.display());
        return;
    }
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("❌ Could not read {}: {}", dir.display(), e);
            return;
        }
    };
    let mut found = false;
    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        if contains_variant(&name) {
            println!("📁 File: {}", name);
            found = true;
        }
    }
    if !found {
        println!("No matches in the files.");
    }
}

fn contains_variant(name: &str) -> bool {
    let lower = name.to_lowercase();
    VARIANTS.iter().any(|variant| lower.contains(variant))
}
