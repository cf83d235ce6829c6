//! Source-directory scanning.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Extensions the batch scanner picks up, lowercase.
const SOURCE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// List the image files directly inside `dir`, sorted by name.
///
/// Only the directory itself is scanned; photographers drop files flat, and
/// anything nested was not meant for the batch.
pub fn list_images(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| has_source_extension(path))
        .collect();

    files.sort();
    files
}

/// List the filenames in `dir` ending with `suffix` (e.g. `".webp"`), sorted.
pub fn list_filenames_with_suffix(dir: &Path, suffix: &str) -> Vec<String> {
    let mut names: Vec<String> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| name.ends_with(suffix))
        .collect();

    names.sort();
    names
}

/// Find the first file under `dir` matching a glob pattern like
/// `"*mini-poker*.jpg"`. Used by the targeted-fix tools where the exact
/// source name is not known up front.
pub fn find_first_match(dir: &Path, pattern: &str) -> Option<PathBuf> {
    let full_pattern = dir.join(pattern);
    let mut matches = glob::glob(full_pattern.to_str()?).ok()?;
    matches.find_map(|entry| entry.ok())
}

fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SOURCE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"x").unwrap();
    }

    #[test]
    fn lists_only_recognized_extensions() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "b1.jpg");
        touch(tmp.path(), "a1.PNG");
        touch(tmp.path(), "notes.txt");
        touch(tmp.path(), "c1.webp");

        let files = list_images(tmp.path());
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a1.PNG", "b1.jpg", "c1.webp"]);
    }

    #[test]
    fn nested_files_are_ignored() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "top1.jpg");
        fs::create_dir(tmp.path().join("nested")).unwrap();
        touch(&tmp.path().join("nested"), "deep1.jpg");

        let files = list_images(tmp.path());
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn suffix_listing_returns_sorted_filenames() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "z.webp");
        touch(tmp.path(), "a.webp");
        touch(tmp.path(), "a.jpg");

        let names = list_filenames_with_suffix(tmp.path(), ".webp");
        assert_eq!(names, vec!["a.webp", "z.webp"]);
    }

    #[test]
    fn glob_search_finds_a_partial_name() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "shoot-mini-poker-final1.jpg");

        let found = find_first_match(tmp.path(), "*mini-poker*.jpg").unwrap();
        assert!(found.ends_with("shoot-mini-poker-final1.jpg"));

        assert!(find_first_match(tmp.path(), "*missing*.jpg").is_none());
    }
}
