//! Per-file orchestration: parse, transcode, group, relink.
//!
//! Every step is per-file and independent; a bad source or a failed request
//! is reported and the batch keeps going. The only coupling between the
//! storage write and the table write is the explicit [`LinkState`] handed
//! back to the caller.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::{Map, Value};

use crate::name::{self, ParsedName};
use crate::remote::table::{TableClient, UpdateOutcome};
use crate::transcode::{self, Target};

/// Width of the main product shot.
pub const MAIN_WIDTH: u32 = 1080;
/// Width of the `-min` thumbnail variant.
pub const THUMB_WIDTH: u32 = 400;
/// WebP quality for catalog shots.
pub const QUALITY: f32 = 85.0;

/// Image-URL columns by position index.
const IMAGE_COLUMNS: [(u8, &str); 3] = [(1, "image_url"), (2, "image2_url"), (3, "image3_url")];

/// Outputs produced from one source image.
#[derive(Debug)]
pub struct ProcessedImage {
    pub slug: String,
    pub index: String,
    /// Filenames written to the output directory: main, then thumbnail
    pub outputs: Vec<String>,
}

/// What happened to a slug after its files reached the bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// The row now references the new URLs
    Linked,
    /// Objects are in the bucket but no row points at them; the operator
    /// decides whether to fix the slug or the row
    UploadedNotLinked,
}

/// Optimize one source file into its main and thumbnail WebP variants.
///
/// Skips (with a console note) names that don't parse; reports and gives up
/// on this file if either variant fails. Both variants must land for the
/// file to count.
pub fn process_source(src: &Path, out_dir: &Path) -> Option<ProcessedImage> {
    let filename = src.file_name()?.to_string_lossy().into_owned();
    println!("🔄 Processing: {}", filename);

    let (slug, index) = match name::parse(&filename) {
        ParsedName::Matched { slug, index } => (slug, index),
        ParsedName::Unmatched => {
            println!("⚠️ Skipped (unrecognized name): {}", filename);
            return None;
        }
    };

    let (main_name, thumb_name) = name::output_names(&slug, &index);
    let variants = [
        (main_name, Target::width_limit(MAIN_WIDTH, QUALITY)),
        (thumb_name, Target::width_limit(THUMB_WIDTH, QUALITY)),
    ];

    let mut outputs = Vec::new();
    for (out_name, target) in variants {
        match transcode::transcode(src, &out_dir.join(&out_name), target) {
            Ok((w, h)) => {
                println!("   ✅ Saved: {} ({}x{})", out_name, w, h);
                outputs.push(out_name);
            }
            Err(e) => {
                eprintln!("❌ Error optimizing {}: {}", filename, e);
                return None;
            }
        }
    }

    Some(ProcessedImage {
        slug,
        index,
        outputs,
    })
}

/// Group uploaded output filenames into per-slug `index -> filename` maps.
///
/// Thumbnails never reach the table, so `-min` files are dropped. Only the
/// `-2` / `-3` suffixes are recognized as positions; everything else is the
/// main image.
pub fn group_uploads(filenames: &[String]) -> BTreeMap<String, BTreeMap<u8, String>> {
    let mut groups: BTreeMap<String, BTreeMap<u8, String>> = BTreeMap::new();

    for filename in filenames {
        let Some(stem) = filename.strip_suffix(".webp") else {
            continue;
        };
        if stem.contains("-min") || stem.contains("thumb") {
            continue;
        }

        let (slug, index) = if let Some(base) = stem.strip_suffix("-3") {
            (base, 3)
        } else if let Some(base) = stem.strip_suffix("-2") {
            (base, 2)
        } else {
            (stem, 1)
        };

        groups
            .entry(slug.to_string())
            .or_default()
            .insert(index, filename.clone());
    }

    groups
}

/// Column payload for a per-slug image relink.
pub fn image_fields(urls_by_index: &BTreeMap<u8, String>) -> Map<String, Value> {
    let mut fields = Map::new();
    for (index, column) in IMAGE_COLUMNS {
        if let Some(url) = urls_by_index.get(&index) {
            fields.insert(column.to_string(), Value::String(url.clone()));
        }
    }
    fields
}

/// Patch the row for `slug` and report the outcome explicitly.
///
/// An HTTP failure and a zero-row match both leave the uploads dangling, so
/// both come back as [`LinkState::UploadedNotLinked`]; only the wording of
/// the console note differs.
pub fn link_product(table: &TableClient, slug: &str, fields: &Map<String, Value>) -> LinkState {
    match table.patch_by_slug(slug, fields) {
        Ok(UpdateOutcome::Updated(_)) => {
            println!("🔄 Re-linked row: {}", slug);
            LinkState::Linked
        }
        Ok(UpdateOutcome::NotFound) => {
            println!("⚠️ Uploaded but not linked: slug '{}' not in table", slug);
            LinkState::UploadedNotLinked
        }
        Err(e) => {
            eprintln!("❌ Uploaded but not linked: update for '{}' failed: {}", slug, e);
            LinkState::UploadedNotLinked
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;

    #[test]
    fn one_source_yields_main_and_thumbnail() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("mini-poker1.png");
        RgbImage::from_pixel(1600, 1200, Rgb([5, 5, 5]))
            .save(&src)
            .unwrap();
        let out_dir = tmp.path().join("optimized");

        let processed = process_source(&src, &out_dir).unwrap();
        assert_eq!(processed.slug, "mini-poker");
        assert_eq!(processed.index, "1");
        assert_eq!(
            processed.outputs,
            vec!["mini-poker.webp", "mini-poker-min.webp"]
        );
        assert!(out_dir.join("mini-poker.webp").exists());
        assert!(out_dir.join("mini-poker-min.webp").exists());

        // thumbnail respects its own width cap
        let thumb = image::open(out_dir.join("mini-poker-min.webp")).unwrap();
        assert_eq!(thumb.width(), THUMB_WIDTH);
    }

    #[test]
    fn unparseable_names_are_skipped_quietly() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("readme.txt");
        std::fs::write(&src, b"hello").unwrap();

        assert!(process_source(&src, tmp.path()).is_none());
    }

    #[test]
    fn grouping_assigns_positions_and_drops_thumbnails() {
        let filenames: Vec<String> = [
            "mini-poker.webp",
            "mini-poker-2.webp",
            "mini-poker-3.webp",
            "mini-poker-min.webp",
            "mini-poker-2-min.webp",
            "fragancia.webp",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let groups = group_uploads(&filenames);
        assert_eq!(groups.len(), 2);

        let poker = &groups["mini-poker"];
        assert_eq!(poker[&1], "mini-poker.webp");
        assert_eq!(poker[&2], "mini-poker-2.webp");
        assert_eq!(poker[&3], "mini-poker-3.webp");

        assert_eq!(groups["fragancia"][&1], "fragancia.webp");
    }

    #[test]
    fn image_fields_map_indexes_to_columns() {
        let mut urls = BTreeMap::new();
        urls.insert(1, "https://x/a.webp".to_string());
        urls.insert(3, "https://x/a-3.webp".to_string());

        let fields = image_fields(&urls);
        assert_eq!(fields["image_url"], "https://x/a.webp");
        assert_eq!(fields["image3_url"], "https://x/a-3.webp");
        assert!(!fields.contains_key("image2_url"));
    }
}
