//! Clear the bucket, upload every optimized file, relink the table rows.
//!
//! The only destructive tool in the set: it empties the bucket before
//! re-uploading, so it asks for confirmation first. Uploads are upserts and
//! the relink filters by slug, so re-running after a partial failure is safe.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::Path;
use std::process;

use catalog_sync::config::{Config, Credential};
use catalog_sync::pipeline::{self, LinkState};
use catalog_sync::remote::storage::StorageClient;
use catalog_sync::remote::table::TableClient;
use catalog_sync::scan;

const OPTIMIZED_DIR: &str = "optimized_batch";
const BUCKET: &str = "images";
const TABLE: &str = "products";
const ENV_PATH: &str = ".env";
/// Page size for the bucket listing; plenty for this catalog.
const LIST_LIMIT: usize = 1000;

fn main() {
    println!("🚀 Starting batch upload...");

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

    let output = Path::new(OPTIMIZED_DIR);
    if !output.exists() {
        eprintln!("❌ Directory not found: {}", output.display());
        process::exit(1);
    }

    // Destructive step, so ask before touching anything remote
    println!("⚠️ ATTENTION: every file in bucket '{}' will be DELETED.", BUCKET);
    print!("Type 'y' to continue: ");
    io::stdout().flush().ok();
    let mut answer = String::new();
    io::stdin().read_line(&mut answer).ok();
    if !answer.trim().eq_ignore_ascii_case("y") {
        println!("Cancelled.");
        return;
    }

    let storage = StorageClient::new(&config, BUCKET);
    let table = TableClient::new(&config, TABLE);

    empty_bucket(&storage);

    let files = scan::list_filenames_with_suffix(output, ".webp");
    let mut uploaded = Vec::new();
    for filename in &files {
        match storage.upload_file(&output.join(filename), filename) {
            Ok(_) => {
                println!("✅ Uploaded: {}", filename);
                uploaded.push(filename.clone());
            }
            Err(e) => eprintln!("❌ Error uploading {}: {}", filename, e),
        }
    }

    println!("\n🔄 Updating table rows...");
    let groups = pipeline::group_uploads(&uploaded);
    let mut linked = 0usize;
    let mut dangling = Vec::new();
    for (slug, by_index) in &groups {
        let urls: BTreeMap<u8, String> = by_index
            .iter()
            .map(|(index, filename)| (*index, storage.public_url(filename)))
            .collect();
        let fields = pipeline::image_fields(&urls);
        match pipeline::link_product(&table, slug, &fields) {
            LinkState::Linked => linked += 1,
            LinkState::UploadedNotLinked => dangling.push(slug.clone()),
        }
    }

    println!("\n✨ Done. {}/{} slugs relinked.", linked, groups.len());
    if !dangling.is_empty() {
        println!(
            "⚠️ Uploaded but not linked ({}): {}",
            dangling.len(),
            dangling.join(", ")
        );
    }
}

/// List then bulk-remove everything in the bucket.
fn empty_bucket(storage: &StorageClient) {
    println!("🧹 Clearing bucket...");

    let objects = match storage.list("", LIST_LIMIT) {
        Ok(objects) => objects,
        Err(e) => {
            eprintln!("⚠️ Could not list bucket (may be empty): {}", e);
            return;
        }
    };
    if objects.is_empty() {
        println!("Bucket was already empty.");
        return;
    }

    let keys: Vec<String> = objects.into_iter().map(|object| object.name).collect();
    match storage.remove(&keys) {
        Ok(()) => println!("🗑️ Removed {} old files.", keys.len()),
        Err(e) => eprintln!("❌ Error removing old files: {}", e),
    }
}
