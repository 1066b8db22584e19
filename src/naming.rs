//! Centralized path-segment parsing for the `NN_name` convention.
//!
//! Every directory and markdown file under a section follows the same naming
//! pattern: an optional numeric prefix (`NN_`) followed by a name. The prefix
//! only steers listing order; it never reaches a URL or a title.
//!
//! ## Slugs
//!
//! A slug is the canonical identity of a document, derived from its path
//! relative to the section root:
//!
//! - `01_intro.md` → `intro`
//! - `02_setup/01_install.md` → `setup/install`
//! - `02_setup/index.md` → `setup` (the index convention)
//! - `index.md` → `` (the section landing page)
//!
//! ## Display Titles
//!
//! Titles drop the prefix and the `.md` extension, turn `-` and `_` into
//! spaces, and capitalize each word:
//! - `03_getting-started.md` → "Getting Started"
//! - `02_setup` → "Setup"
//! - `faq_and-tips.md` → "Faq And Tips"

/// Markdown file extension, including the dot.
pub const MARKDOWN_EXT: &str = ".md";

/// Basename (without extension) that marks a directory landing document.
pub const INDEX_STEM: &str = "index";

/// Result of parsing one path segment like `02_setup`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSegment<'a> {
    /// Order prefix if present (e.g., `2` from `02_setup`).
    pub order: Option<u32>,
    /// Segment with the prefix removed. Extensions are preserved.
    pub name: &'a str,
}

/// Parse a single path segment following the `NN_name` convention.
///
/// At most one prefix is removed:
/// - `"02_setup"` → order=Some(2), name="setup"
/// - `"10_api.md"` → order=Some(10), name="api.md"
/// - `"01_02_x"` → order=Some(1), name="02_x"
/// - `"01_"` → order=Some(1), name=""
/// - `"setup"` → order=None, name="setup"
/// - `"v2_notes"` → order=None, name="v2_notes"
pub fn parse_segment(segment: &str) -> ParsedSegment<'_> {
    let digits = segment.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 && segment.as_bytes().get(digits) == Some(&b'_') {
        // Absurdly long prefixes still sort last instead of failing.
        let order = segment[..digits].parse::<u32>().unwrap_or(u32::MAX);
        return ParsedSegment {
            order: Some(order),
            name: &segment[digits + 1..],
        };
    }
    ParsedSegment {
        order: None,
        name: segment,
    }
}

/// Split a relative path on either separator style.
///
/// Empty segments from doubled separators are kept as-is.
pub fn split_segments(raw: &str) -> Vec<&str> {
    raw.split(['/', '\\']).collect()
}

/// Whether a file name is the directory landing document, ignoring prefix.
pub fn is_index_file(file_name: &str) -> bool {
    parse_segment(file_name)
        .name
        .strip_suffix(MARKDOWN_EXT)
        .is_some_and(|stem| stem == INDEX_STEM)
}

/// Normalize one segment: strip the prefix and, for the final segment,
/// the `.md` extension. A final `index` comes back as an empty string.
pub fn normalize_segment(segment: &str, is_last: bool) -> &str {
    let name = parse_segment(segment).name;
    if !is_last {
        return name;
    }
    let stem = name.strip_suffix(MARKDOWN_EXT).unwrap_or(name);
    if stem == INDEX_STEM { "" } else { stem }
}

/// Produce the canonical slug for a raw relative path.
///
/// Pure and idempotent for well-formed paths: `normalize_slug(normalize_slug(p))`
/// equals `normalize_slug(p)` as long as no segment carries two stacked
/// prefixes (`01_02_x`).
pub fn normalize_slug(raw: &str) -> String {
    let segments = split_segments(raw);
    let last = segments.len().saturating_sub(1);
    let mut parts: Vec<&str> = segments
        .iter()
        .enumerate()
        .map(|(i, seg)| normalize_segment(seg, i == last))
        .collect();
    if parts.last().is_some_and(|p| p.is_empty()) {
        parts.pop();
    }
    parts.join("/")
}

/// Derive the human-readable title for a path segment.
pub fn display_title(segment: &str) -> String {
    let name = parse_segment(segment).name;
    let stem = name.strip_suffix(MARKDOWN_EXT).unwrap_or(name);
    title_case(&stem.replace(['-', '_'], " "))
}

/// Capitalize the first character of every word, leaving the rest untouched.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.push(c);
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_segment() {
        let p = parse_segment("02_setup");
        assert_eq!(p.order, Some(2));
        assert_eq!(p.name, "setup");
    }

    #[test]
    fn numbered_file_keeps_extension() {
        let p = parse_segment("10_api.md");
        assert_eq!(p.order, Some(10));
        assert_eq!(p.name, "api.md");
    }

    #[test]
    fn only_one_prefix_stripped() {
        let p = parse_segment("01_02_x");
        assert_eq!(p.order, Some(1));
        assert_eq!(p.name, "02_x");
    }

    #[test]
    fn prefix_with_empty_name() {
        let p = parse_segment("01_");
        assert_eq!(p.order, Some(1));
        assert_eq!(p.name, "");
    }

    #[test]
    fn unnumbered_segment() {
        let p = parse_segment("setup");
        assert_eq!(p.order, None);
        assert_eq!(p.name, "setup");
    }

    #[test]
    fn letters_before_underscore_are_not_a_prefix() {
        let p = parse_segment("v2_notes");
        assert_eq!(p.order, None);
        assert_eq!(p.name, "v2_notes");
    }

    #[test]
    fn digits_without_underscore_are_not_a_prefix() {
        let p = parse_segment("2024-roadmap.md");
        assert_eq!(p.order, None);
        assert_eq!(p.name, "2024-roadmap.md");
    }

    #[test]
    fn zero_prefix() {
        assert_eq!(parse_segment("00_first").order, Some(0));
    }

    #[test]
    fn index_detection_ignores_prefix() {
        assert!(is_index_file("index.md"));
        assert!(is_index_file("01_index.md"));
        assert!(!is_index_file("indexes.md"));
        assert!(!is_index_file("index"));
        assert!(!is_index_file("my-index.md"));
    }

    #[test]
    fn slug_strips_prefixes_and_extension() {
        assert_eq!(normalize_slug("01_intro.md"), "intro");
        assert_eq!(normalize_slug("02_setup/01_install.md"), "setup/install");
    }

    #[test]
    fn slug_collapses_index() {
        assert_eq!(normalize_slug("02_setup/index.md"), "setup");
        assert_eq!(normalize_slug("index.md"), "");
        assert_eq!(normalize_slug("a/b/03_index.md"), "a/b");
    }

    #[test]
    fn slug_accepts_backslashes() {
        assert_eq!(normalize_slug("02_setup\\01_install.md"), "setup/install");
    }

    #[test]
    fn slug_keeps_empty_segments() {
        assert_eq!(normalize_slug("a//b.md"), "a//b");
    }

    #[test]
    fn slug_is_idempotent() {
        let paths = [
            "01_intro.md",
            "02_setup/index.md",
            "02_setup/01_install.md",
            "guides/03_deep/04_dive.md",
            "index.md",
            "plain/file.md",
            "10_a\\20_b\\index.md",
        ];
        for raw in paths {
            let once = normalize_slug(raw);
            assert_eq!(normalize_slug(&once), once, "not idempotent for {raw}");
        }
    }

    #[test]
    fn title_from_prefixed_file() {
        assert_eq!(display_title("03_getting-started.md"), "Getting Started");
    }

    #[test]
    fn title_from_directory() {
        assert_eq!(display_title("02_setup"), "Setup");
    }

    #[test]
    fn title_replaces_underscores_and_dashes() {
        assert_eq!(display_title("faq_and-tips.md"), "Faq And Tips");
    }

    #[test]
    fn title_keeps_inner_case() {
        assert_eq!(display_title("01_use-gRPC.md"), "Use GRPC");
        assert_eq!(display_title("macOS"), "MacOS");
    }

    #[test]
    fn title_of_index_file() {
        assert_eq!(display_title("index.md"), "Index");
    }

    #[test]
    fn title_case_after_punctuation() {
        assert_eq!(title_case("v2.0 release"), "V2.0 Release");
    }
}
