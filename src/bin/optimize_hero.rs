//! Emit portrait `-mobile` crops of the landing-page hero images.
//!
//! Desktop heroes are wide; phones want 720x1280. Center-crop and resize each
//! named hero in place, next to its source.

use std::path::Path;

use catalog_sync::transcode::{self, Target};

const HERO_DIR: &str = "public/hero";
const HERO_NAMES: [&str; 5] = ["silk", "feather", "glass", "liquid", "smoke"];

/// Portrait frame for phone screens.
const MOBILE: Target = Target {
    width: 720,
    height: Some(1280),
    quality: 80.0,
};

fn main() {
    println!("Starting optimization for {} hero images...", HERO_NAMES.len());

    let dir = Path::new(HERO_DIR);
    for name in HERO_NAMES {
        let source = dir.join(format!("{}.webp", name));
        let dest = dir.join(format!("{}-mobile.webp", name));

        if !source.exists() {
            println!("Skipping {}: source not found.", name);
            continue;
        }

        println!("Processing {}...", name);
        match transcode::transcode(&source, &dest, MOBILE) {
            Ok((w, h)) => println!("✅ Saved: {} ({}x{})", dest.display(), w, h),
            Err(e) => eprintln!("❌ Error processing {}: {}", name, e),
        }
    }
}
