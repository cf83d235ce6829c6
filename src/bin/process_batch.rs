//! Optimize a folder of raw product shots into WebP main + thumbnail pairs.
//!
//! Purely local: nothing is uploaded and no credentials are needed. Run
//! `upload_batch` afterwards to push the results.

use std::path::Path;
use std::process;

use catalog_sync::{pipeline, scan};

/// Folder the photographer drops originals into.
const SOURCE_DIR: &str = "raw_batch";
/// Folder the optimized outputs land in.
const OUTPUT_DIR: &str = "optimized_batch";

fn main() {
    let source = Path::new(SOURCE_DIR);
    let output = Path::new(OUTPUT_DIR);

    if !source.exists() {
        eprintln!("❌ Source directory not found: {}", source.display());
        process::exit(1);
    }

    let files = scan::list_images(source);
    println!("Found {} images to process...", files.len());

    let mut processed = 0usize;
    for file in &files {
        if pipeline::process_source(file, output).is_some() {
            processed += 1;
        }
    }

    println!("\n✨ Batch complete: {}/{} images optimized.", processed, files.len());
    println!("📂 Output folder: {}", output.display());
}
