//! Patch size columns from a hardcoded slug → size table.
//!
//! The metric size comes from the merchandising sheet; the imperial column is
//! derived on the fly where the size is in millilitres.

use std::path::Path;
use std::process;

use catalog_sync::config::{Config, Credential};
use catalog_sync::remote::table::{TableClient, UpdateOutcome};
use catalog_sync::sizes;

const TABLE: &str = "products";
const ENV_PATH: &str = ".env";

/// Slug → display size, straight from the sheet.
const SIZES: [(&str, &str); 10] = [
    ("lube-premium-relaxing", "130 ml"),
    ("ibiza", "100 ml"),
    ("very-sexy", "50 ml"),
    ("petit-mort", "50 ml"),
    ("crazy-girl", "60 ml"),
    ("hi-sex", "60 CAPS"),
    ("black-dragon", "50 ml"),
    ("desire-coconut", "75 ml"),
    ("body-splash-love", "100 ml"),
    ("inlube-game", "20 ml"),
];

fn main() {
    println!("Starting size updates...");

    let config = match Config::from_env_file(Path::new(ENV_PATH)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            process::exit(1);
        }
    };
    if config.credential == Credential::Anon {
        println!("⚠️ Using the anon key; writes may be rejected by row-level policies.");
    }

    let table = TableClient::new(&config, TABLE);

    let mut updated = 0usize;
    for (slug, size) in SIZES {
        let fields = sizes::size_fields(size);
        println!("🔄 Updating {}: {:?}...", slug, fields);
        match table.patch_by_slug(slug, &fields) {
            Ok(UpdateOutcome::Updated(_)) => {
                println!("✅ OK");
                updated += 1;
            }
            Ok(UpdateOutcome::NotFound) => println!("⚠️ Slug '{}' not in table", slug),
            Err(e) => eprintln!("❌ Error {}: {}", slug, e),
        }
    }

    println!("\n✨ Done. {}/{} rows updated.", updated, SIZES.len());
}
