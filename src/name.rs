//! Filename parsing for product shots.
//!
//! Source files are named `{slug}{index}.{ext}` or `{slug}-{index}.{ext}`,
//! with the index omitted for single-image products. The slug is whatever the
//! photographer typed, so parsing is best-effort: it is deterministic and
//! total, but two sloppy names can still collide on the same slug.

use once_cell::sync::Lazy;
use regex::Regex;

/// Filenames longer than this are rejected before any pattern evaluation.
pub const MAX_FILENAME_LEN: usize = 255;

// "mini-poker1.jpg" / "mini-poker-1.jpg" -> slug + trailing digits
static INDEXED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(.+?)-?(\d+)\.(jpe?g|png|webp)$").unwrap());

// "mini-poker.jpg" -> whole stem, no digits
static PLAIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(.+)\.(jpe?g|png|webp)$").unwrap());

/// Outcome of parsing one filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedName {
    /// The name yielded a slug and a position index (`"1"` when absent)
    Matched { slug: String, index: String },
    /// Unrecognized extension, or the name was too long to look at
    Unmatched,
}

/// Extract `(slug, index)` from a filename.
///
/// Trailing digits become the index; without them the whole stem is the slug
/// and the index is fixed at `"1"`. A `-` left dangling at the end of the
/// slug is stripped either way. Pure function, no I/O.
pub fn parse(filename: &str) -> ParsedName {
    if filename.len() > MAX_FILENAME_LEN {
        return ParsedName::Unmatched;
    }

    if let Some(caps) = INDEXED.captures(filename) {
        return ParsedName::Matched {
            slug: strip_separator(&caps[1]),
            index: caps[2].to_string(),
        };
    }

    // Fallback: no index digits, but the extension is one we handle
    if let Some(caps) = PLAIN.captures(filename) {
        return ParsedName::Matched {
            slug: strip_separator(&caps[1]),
            index: "1".to_string(),
        };
    }

    ParsedName::Unmatched
}

fn strip_separator(slug: &str) -> String {
    slug.strip_suffix('-').unwrap_or(slug).to_string()
}

/// Derived output filenames for one parsed source: `(main, thumbnail)`.
///
/// Index `"1"` gets the bare `{slug}.webp` name; higher indexes are suffixed.
/// Thumbnails carry the `-min` marker the storefront's listing views expect.
pub fn output_names(slug: &str, index: &str) -> (String, String) {
    if index == "1" {
        (format!("{}.webp", slug), format!("{}-min.webp", slug))
    } else {
        (
            format!("{}-{}.webp", slug, index),
            format!("{}-{}-min.webp", slug, index),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(slug: &str, index: &str) -> ParsedName {
        ParsedName::Matched {
            slug: slug.to_string(),
            index: index.to_string(),
        }
    }

    #[test]
    fn trailing_digits_become_the_index() {
        assert_eq!(parse("mini-poker1.jpg"), matched("mini-poker", "1"));
        assert_eq!(parse("mini-poker12.jpeg"), matched("mini-poker", "12"));
        assert_eq!(parse("desire-coconut2.png"), matched("desire-coconut", "2"));
    }

    #[test]
    fn separator_before_the_index_is_stripped() {
        assert_eq!(parse("mini-poker-1.jpg"), matched("mini-poker", "1"));
        assert_eq!(parse("body-splash-love-3.webp"), matched("body-splash-love", "3"));
    }

    #[test]
    fn no_digits_falls_back_to_index_one() {
        assert_eq!(parse("mini-poker.jpg"), matched("mini-poker", "1"));
        assert_eq!(parse("fragancia.webp"), matched("fragancia", "1"));
        // dangling separator is stripped in the fallback too
        assert_eq!(parse("mini-poker-.jpg"), matched("mini-poker", "1"));
    }

    #[test]
    fn extension_matching_is_case_insensitive() {
        assert_eq!(parse("Mini-Poker1.JPG"), matched("Mini-Poker", "1"));
        assert_eq!(parse("hero.PNG"), matched("hero", "1"));
    }

    #[test]
    fn unknown_extensions_do_not_match() {
        assert_eq!(parse("notes.txt"), ParsedName::Unmatched);
        assert_eq!(parse("archive1.zip"), ParsedName::Unmatched);
        assert_eq!(parse("no-extension"), ParsedName::Unmatched);
    }

    #[test]
    fn overlong_names_are_rejected_outright() {
        let long = format!("{}1.jpg", "a".repeat(300));
        assert_eq!(parse(&long), ParsedName::Unmatched);
    }

    #[test]
    fn digits_inside_the_stem_are_not_an_index() {
        // only digits adjacent to the extension count
        assert_eq!(parse("no5-shot.jpg"), matched("no5-shot", "1"));
    }

    #[test]
    fn output_names_for_first_and_later_indexes() {
        assert_eq!(
            output_names("mini-poker", "1"),
            ("mini-poker.webp".to_string(), "mini-poker-min.webp".to_string())
        );
        assert_eq!(
            output_names("mini-poker", "2"),
            (
                "mini-poker-2.webp".to_string(),
                "mini-poker-2-min.webp".to_string()
            )
        );
    }
}
