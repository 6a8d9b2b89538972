//! Version string normalization and comparison
//!
//! Providers decorate version strings inconsistently: game versions arrive
//! with loader suffixes baked in ("1.20.1-Fabric") and release names carry
//! arbitrary prefixes ("Test Mod 1.0.0", "v1.2.3-release"). Everything that
//! compares versions anywhere in the resolver goes through these helpers so
//! both sides of a comparison are reduced the same way.

use std::cmp::Ordering;

/// Strip a trailing `-<letters>` loader suffix and surrounding whitespace.
///
/// Stripping repeats until no suffix remains, so the result is a fixpoint:
/// `normalize(normalize(v)) == normalize(v)` for every input. Total function,
/// may return an empty string.
pub fn normalize(version: &str) -> String {
    let mut v = version.trim();
    loop {
        match v.rsplit_once('-') {
            Some((head, tail))
                if !tail.is_empty() && tail.chars().all(|c| c.is_ascii_alphabetic()) =>
            {
                v = head;
            }
            _ => break,
        }
    }
    v.trim().to_string()
}

/// Reduce a display string to its comparable version core.
///
/// Drops the leading non-numeric run, then keeps digits and dots up to the
/// first character that is neither ("v1.2.3-release" -> "1.2.3",
/// "Test Mod 1.0.0" -> "1.0.0"). Returns `None` when the string contains no
/// digits at all.
pub fn comparable(version: &str) -> Option<String> {
    let start = version.find(|c: char| c.is_ascii_digit())?;
    let tail = &version[start..];
    let end = tail
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(tail.len());
    Some(tail[..end].trim_end_matches('.').to_string())
}

/// True when `candidate` is strictly newer than `current`.
///
/// Both sides are reduced with [`comparable`] first; if either side has no
/// comparable core the answer is `false`. Segments compare numerically, and a
/// version that extends an equal prefix with more segments counts as newer
/// ("1.2.0" is newer than "1.2").
pub fn is_newer(candidate: &str, current: &str) -> bool {
    match (comparable(candidate), comparable(current)) {
        (Some(a), Some(b)) => compare_segments(&segments(&a), &segments(&b)) == Ordering::Greater,
        _ => false,
    }
}

/// Sort key for ordering version catalogs descending by numeric prefix.
///
/// Keeps only digits and dots, then parses the dot-separated segments.
/// Malformed or empty segments collapse to zero rather than failing.
pub fn numeric_sort_key(name: &str) -> Vec<u64> {
    let reduced: String = name
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    reduced
        .split('.')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().unwrap_or(0))
        .collect()
}

fn segments(reduced: &str) -> Vec<u64> {
    reduced
        .split('.')
        .map(|s| s.parse().unwrap_or(0))
        .collect()
}

fn compare_segments(a: &[u64], b: &[u64]) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        match x.cmp(y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    a.len().cmp(&b.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_loader_suffix() {
        assert_eq!(normalize("1.20.1-Fabric"), "1.20.1");
        assert_eq!(normalize("1.20-Forge"), "1.20");
        assert_eq!(normalize("1.19.2-NeoForge"), "1.19.2");
    }

    #[test]
    fn normalize_trims_whitespace() {
        assert_eq!(normalize("  1.20.1 "), "1.20.1");
        assert_eq!(normalize(" 1.20.1-Quilt "), "1.20.1");
    }

    #[test]
    fn normalize_leaves_numeric_suffixes_alone() {
        assert_eq!(normalize("1.20.1-rc1"), "1.20.1-rc1");
        assert_eq!(normalize("1.20.1"), "1.20.1");
    }

    #[test]
    fn normalize_is_idempotent() {
        for v in [
            "1.20.1-Fabric",
            "1.20-Snapshot-Fabric",
            "  1.20.1 ",
            "1.20.1-rc1",
            "",
            "-Fabric",
            "Fabric",
        ] {
            let once = normalize(v);
            assert_eq!(normalize(&once), once, "normalize not idempotent for {v:?}");
        }
    }

    #[test]
    fn normalize_handles_degenerate_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("-Fabric"), "");
    }

    #[test]
    fn comparable_drops_prefix_and_tail() {
        assert_eq!(comparable("v1.2.3-release").as_deref(), Some("1.2.3"));
        assert_eq!(comparable("Test Mod 1.0.0").as_deref(), Some("1.0.0"));
        assert_eq!(comparable("1.2.3").as_deref(), Some("1.2.3"));
        assert_eq!(comparable("release-2.0+build.5").as_deref(), Some("2.0"));
    }

    #[test]
    fn comparable_returns_none_without_digits() {
        assert_eq!(comparable("latest"), None);
        assert_eq!(comparable(""), None);
    }

    #[test]
    fn comparable_trims_trailing_dot() {
        assert_eq!(comparable("1.2.").as_deref(), Some("1.2"));
    }

    #[test]
    fn is_newer_detects_strictly_newer() {
        assert!(is_newer("1.1.0", "1.0.0"));
        assert!(is_newer("2.0", "1.9.9"));
        assert!(!is_newer("1.0.0", "1.1.0"));
    }

    #[test]
    fn is_newer_is_false_for_equal_versions() {
        assert!(!is_newer("1.0.0", "1.0.0"));
        assert!(!is_newer("v1.0.0", "1.0.0"));
    }

    #[test]
    fn is_newer_reduces_prefixed_names() {
        assert!(!is_newer("Test Mod 1.0.0", "Test Mod 1.1.0"));
        assert!(is_newer("Test Mod 1.2.0", "Test Mod 1.1.0"));
    }

    #[test]
    fn is_newer_applies_segment_length_rule() {
        assert!(is_newer("1.2.0", "1.2"));
        assert!(!is_newer("1.2", "1.2.0"));
    }

    #[test]
    fn is_newer_is_false_when_either_side_has_no_core() {
        assert!(!is_newer("latest", "1.0.0"));
        assert!(!is_newer("1.0.0", "unknown"));
    }

    #[test]
    fn numeric_sort_key_orders_catalog_versions() {
        let mut versions = vec!["1.9", "1.20.1", "1.20", "1.19.4"];
        versions.sort_by(|a, b| numeric_sort_key(b).cmp(&numeric_sort_key(a)));
        assert_eq!(versions, vec!["1.20.1", "1.20", "1.19.4", "1.9"]);
    }

    #[test]
    fn numeric_sort_key_ignores_decorations() {
        assert_eq!(numeric_sort_key("1.20.1-Fabric"), vec![1, 20, 1]);
        assert_eq!(numeric_sort_key("no digits"), Vec::<u64>::new());
    }
}
