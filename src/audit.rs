//! Integrity cross-check between the table and the optimized outputs.
//!
//! Read-only on both sides. The slug is recovered from each output filename
//! by dropping the thumbnail marker and the known position suffixes, then the
//! two slug sets are diffed in both directions.

use std::collections::BTreeSet;
use std::path::Path;

use crate::scan;

/// Position suffixes that fold back onto the base slug.
const POSITION_SUFFIXES: [&str; 3] = ["-1", "-2", "-3"];

/// Outcome of the cross-check.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct IntegrityReport {
    /// A file exists for these slugs but no row does, usually a typo in the
    /// source filename
    pub orphans: Vec<String>,
    /// A row exists for these slugs but no optimized file does
    pub missing: Vec<String>,
}

/// Recover the base slug from an optimized output filename.
///
/// `None` for thumbnails and for anything that isn't a `.webp` output.
pub fn base_slug(filename: &str) -> Option<String> {
    let stem = filename.strip_suffix(".webp")?;
    if stem.contains("-min") {
        return None;
    }

    for suffix in POSITION_SUFFIXES {
        if let Some(base) = stem.strip_suffix(suffix) {
            return Some(base.to_string());
        }
    }
    Some(stem.to_string())
}

/// Collect the distinct slugs present in an output directory.
pub fn file_slugs(dir: &Path) -> BTreeSet<String> {
    scan::list_filenames_with_suffix(dir, ".webp")
        .iter()
        .filter_map(|name| base_slug(name))
        .collect()
}

/// Diff the two slug sets in both directions.
pub fn cross_reference(
    db_slugs: &BTreeSet<String>,
    file_slugs: &BTreeSet<String>,
) -> IntegrityReport {
    IntegrityReport {
        orphans: file_slugs.difference(db_slugs).cloned().collect(),
        missing: db_slugs.difference(file_slugs).cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn base_slug_strips_positions_and_skips_thumbnails() {
        assert_eq!(base_slug("mini-poker.webp"), Some("mini-poker".to_string()));
        assert_eq!(base_slug("mini-poker-2.webp"), Some("mini-poker".to_string()));
        assert_eq!(base_slug("mini-poker-3.webp"), Some("mini-poker".to_string()));
        assert_eq!(base_slug("mini-poker-min.webp"), None);
        assert_eq!(base_slug("mini-poker-2-min.webp"), None);
        assert_eq!(base_slug("mini-poker.jpg"), None);
    }

    #[test]
    fn cross_reference_reports_both_directions() {
        let report = cross_reference(&set(&["a", "b", "c"]), &set(&["a", "b", "d"]));
        assert_eq!(report.orphans, vec!["d".to_string()]);
        assert_eq!(report.missing, vec!["c".to_string()]);
    }

    #[test]
    fn matching_sets_produce_an_empty_report() {
        let slugs = set(&["a", "b"]);
        assert_eq!(cross_reference(&slugs, &slugs), IntegrityReport::default());
    }

    #[test]
    fn file_slugs_fold_variants_onto_one_slug() {
        let tmp = TempDir::new().unwrap();
        for name in [
            "mini-poker.webp",
            "mini-poker-2.webp",
            "mini-poker-min.webp",
            "fragancia.webp",
            "stray.txt",
        ] {
            fs::write(tmp.path().join(name), b"x").unwrap();
        }

        assert_eq!(file_slugs(tmp.path()), set(&["fragancia", "mini-poker"]));
    }
}
