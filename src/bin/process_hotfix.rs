//! Targeted re-optimize + re-upload + relink for a short list of sources.
//!
//! For the shots that came back wrong after the main batch. No bucket clear;
//! the upserts overwrite the bad objects in place.

use std::collections::BTreeMap;
use std::path::Path;
use std::process;

use serde_json::{Map, Value};

use catalog_sync::config::{Config, Credential};
use catalog_sync::pipeline::{self, ProcessedImage};
use catalog_sync::remote::storage::StorageClient;
use catalog_sync::remote::table::{TableClient, UpdateOutcome};
use catalog_sync::scan;

const RAW_DIR: &str = "raw_images";
const OPTIMIZED_DIR: &str = "optimized_hotfix";
const BUCKET: &str = "images";
const TABLE: &str = "products";
const ENV_PATH: &str = ".env";

/// Source files this hotfix targets.
const TARGETS: [&str; 2] = ["desire-coconut1.jpeg", "mini-poker1.jpg"];

/// Alternate slug spellings to try when the first patch matches no row.
/// Dataset patchwork: one retry each, nothing general.
const ALT_SLUGS: [(&str, &str); 1] = [("mini-poker", "minipoker")];

fn main() {
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

    let storage = StorageClient::new(&config, BUCKET);
    let table = TableClient::new(&config, TABLE);
    let out_dir = Path::new(OPTIMIZED_DIR);

    let mut processed: Vec<ProcessedImage> = Vec::new();
    for target in TARGETS {
        let Some(src) = locate_source(Path::new(RAW_DIR), target) else {
            eprintln!("❌ Source not found: {}", target);
            continue;
        };
        if let Some(done) = pipeline::process_source(&src, out_dir) {
            processed.push(done);
        }
    }
    if processed.is_empty() {
        eprintln!("❌ No target files could be processed.");
        process::exit(1);
    }

    println!("\nStarting uploads (no bucket clear)...");
    for item in &processed {
        for filename in &item.outputs {
            match storage.upload_file(&out_dir.join(filename), filename) {
                Ok(url) => println!("🚀 Uploaded: {} -> {}", filename, url),
                Err(e) => eprintln!("❌ Upload error {}: {}", filename, e),
            }
        }
    }

    println!("\n🔄 Relinking rows...");
    for item in &processed {
        // main variant only; thumbnails never reach the table
        let main_name = &item.outputs[0];
        let url = storage.public_url(main_name);
        let index: u8 = item.index.parse().unwrap_or(1);
        relink(&table, &item.slug, &hotfix_fields(index, &url));
    }

    println!("\n✨ Hotfix complete!");
}

/// Locate a target source: exact name first, then a loose glob for the
/// name variants photographers produce ("mini-poker 1.jpg" and friends).
fn locate_source(dir: &Path, target: &str) -> Option<std::path::PathBuf> {
    let exact = dir.join(target);
    if exact.exists() {
        return Some(exact);
    }
    let stem = target
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(target);
    println!("⚠️ Exact match not found for {}, searching the folder...", target);
    scan::find_first_match(dir, &format!("*{}*", stem))
}

/// Column payload for one hotfixed image.
///
/// Index 1 also refreshes the legacy `image` column that older storefront
/// builds still read.
fn hotfix_fields(index: u8, url: &str) -> Map<String, Value> {
    let mut urls = BTreeMap::new();
    urls.insert(index, url.to_string());
    let mut fields = pipeline::image_fields(&urls);
    if index == 1 {
        fields.insert("image".to_string(), Value::String(url.to_string()));
    }
    fields
}

/// Patch the row, retrying once under the alternate spelling when the slug
/// matches nothing.
fn relink(table: &TableClient, slug: &str, fields: &Map<String, Value>) {
    match table.patch_by_slug(slug, fields) {
        Ok(UpdateOutcome::Updated(_)) => println!("✅ Relinked: {}", slug),
        Ok(UpdateOutcome::NotFound) => {
            let alt = ALT_SLUGS
                .iter()
                .find(|(known, _)| *known == slug)
                .map(|(_, alt)| *alt);
            match alt {
                Some(alt) => {
                    println!("⚠️ Slug '{}' not found, trying '{}'...", slug, alt);
                    match table.patch_by_slug(alt, fields) {
                        Ok(UpdateOutcome::Updated(_)) => println!("✅ Relinked: {}", alt),
                        Ok(UpdateOutcome::NotFound) => {
                            println!("⚠️ Uploaded but not linked: neither spelling is in the table")
                        }
                        Err(e) => eprintln!("❌ Uploaded but not linked: {}", e),
                    }
                }
                None => println!("⚠️ Uploaded but not linked: slug '{}' not in table", slug),
            }
        }
        Err(e) => eprintln!("❌ Uploaded but not linked: update for '{}' failed: {}", slug, e),
    }
}
