//! Document metadata: front-matter extraction and field resolution.
//!
//! Markdown files may start with a YAML block delimited by `---` lines:
//!
//! ```markdown
//! ---
//! title: Shipping the zone server
//! releasedate: 2025-03-14
//! description: How the first zone went live.
//! coverImage: /assets/zone.png
//! author: Ada
//! author_github: ada
//! tags: networking, release
//! ---
//!
//! # Body starts here
//! ```
//!
//! ## Recognized keys
//!
//! | Key | Field | Notes |
//! |-----|-------|-------|
//! | `title` | [`FrontMatter::title`] | |
//! | `releasedate` | [`FrontMatter::release_date`] | parsed to a date, several formats |
//! | `description` | [`FrontMatter::description`] | |
//! | `coverImage` | [`FrontMatter::cover_image`] | URL or site path |
//! | `author` | [`FrontMatter::author`] | |
//! | `author_github` | [`FrontMatter::author_github`] | comma-separated on docs pages |
//! | `tags` | [`FrontMatter::tags`] | comma-separated string or YAML list |
//!
//! ## Leniency
//!
//! Metadata never fails a build. Missing keys default to empty values;
//! invalid YAML, unparseable dates, and values of the wrong shape are logged
//! with `log::warn!` and replaced by defaults. Unknown keys are ignored.
//!
//! ## Resolution
//!
//! A document's title is resolved from several sources with [`resolve`]:
//! front-matter `title` → first `# heading` in the body → "Untitled".

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use serde_yaml::Value;

/// Title used when no source provides one.
pub const UNTITLED: &str = "Untitled";

/// Typed front-matter of a markdown document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrontMatter {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
    pub description: String,
    pub cover_image: String,
    pub author: String,
    pub author_github: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl FrontMatter {
    /// Map a parsed YAML block onto the recognized keys.
    ///
    /// `origin` only labels warnings.
    pub fn from_yaml_value(value: &Value, origin: &str) -> Self {
        let Some(map) = value.as_mapping() else {
            if !value.is_null() {
                log::warn!("{origin}: front-matter is not a key/value block, ignoring it");
            }
            return Self::default();
        };

        let text = |key: &str| -> String {
            match map.get(key) {
                None | Some(Value::Null) => String::new(),
                Some(v) => scalar_to_string(v).unwrap_or_else(|| {
                    log::warn!("{origin}: front-matter key `{key}` is not a plain value");
                    String::new()
                }),
            }
        };

        let release_date = match map.get("releasedate") {
            None | Some(Value::Null) => None,
            Some(v) => {
                let raw = scalar_to_string(v).unwrap_or_default();
                let parsed = parse_date(&raw);
                if parsed.is_none() {
                    log::warn!("{origin}: unparseable releasedate {raw:?}");
                }
                parsed
            }
        };

        let tags = match map.get("tags") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Sequence(items)) => items
                .iter()
                .filter_map(scalar_to_string)
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            Some(v) => match scalar_to_string(v) {
                Some(s) => split_list(&s),
                None => {
                    log::warn!("{origin}: front-matter key `tags` is not a list");
                    Vec::new()
                }
            },
        };

        Self {
            title: text("title"),
            release_date,
            description: text("description"),
            cover_image: text("coverImage"),
            author: text("author"),
            author_github: text("author_github"),
            tags,
        }
    }

    /// GitHub handles listed in `author_github` (comma-separated).
    pub fn github_handles(&self) -> Vec<String> {
        split_list(&self.author_github)
    }
}

/// Render a YAML scalar as text; `None` for mappings and sequences.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Parse a release date written in any of the common front-matter styles.
///
/// Accepts `2025-03-14`, `2025/03/14`, `03/14/2025`, `March 14, 2025`,
/// `14 March 2025`, and RFC 3339 timestamps (date part kept).
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    const FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%B %d, %Y", "%d %B %Y"];
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Split a document into its raw YAML block (if any) and the body.
///
/// The block must open on the very first line with `---` and close with a
/// line that is exactly `---` (surrounding whitespace ignored). Without a
/// closing delimiter the whole input is body.
pub fn split_front_matter(content: &str) -> (Option<&str>, &str) {
    let Some(rest) = content.strip_prefix("---") else {
        return (None, content);
    };
    let Some(first_newline) = rest.find('\n') else {
        return (None, content);
    };
    if !rest[..first_newline].trim().is_empty() {
        // `----` or `--- text` is a thematic break, not a delimiter
        return (None, content);
    }
    let after_open = &rest[first_newline + 1..];

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim() == "---" {
            let yaml = &after_open[..offset];
            let yaml = yaml.strip_suffix('\n').unwrap_or(yaml);
            let yaml = yaml.strip_suffix('\r').unwrap_or(yaml);
            return (Some(yaml), &after_open[offset + line.len()..]);
        }
        offset += line.len();
    }

    log::warn!("front-matter opening delimiter without a closing one");
    (None, content)
}

/// Parse a document's front-matter and return it with the body.
pub fn parse_document<'a>(content: &'a str, origin: &str) -> (FrontMatter, &'a str) {
    let (yaml, body) = split_front_matter(content);
    let Some(yaml) = yaml else {
        return (FrontMatter::default(), body);
    };
    if yaml.trim().is_empty() {
        return (FrontMatter::default(), body);
    }
    match serde_yaml::from_str::<Value>(yaml) {
        Ok(value) => (FrontMatter::from_yaml_value(&value, origin), body),
        Err(e) => {
            log::warn!("{origin}: invalid front-matter YAML: {e}");
            (FrontMatter::default(), body)
        }
    }
}

/// Plain text of the first level-one heading in a markdown body.
///
/// The body is parsed as markdown, so `#` lines inside code blocks are not
/// headings and closing `#` sequences are dropped. Inline markup contributes
/// its text only (`# The *fast* path` → `The fast path`).
pub fn first_heading(body: &str) -> Option<String> {
    let mut heading: Option<String> = None;
    for event in Parser::new(body) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => heading = Some(String::new()),
            Event::Text(text) | Event::Code(text) => {
                if let Some(h) = heading.as_mut() {
                    h.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(h) = heading.as_mut() {
                    h.push(' ');
                }
            }
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                if let Some(h) = heading.take() {
                    let trimmed = h.trim();
                    if !trimmed.is_empty() {
                        return Some(trimmed.to_string());
                    }
                }
            }
            _ => {}
        }
    }
    None
}

/// Resolve a metadata field from multiple sources.
///
/// Takes a list of optional values in priority order and returns the first
/// non-None, non-empty value.
///
/// ```text
/// title: resolve(&[front_matter_title, first_heading])
/// ```
pub fn resolve(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .filter_map(|opt| {
            opt.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
        .next()
}

/// Resolve the display title of a document.
pub fn resolve_title(front_matter: &FrontMatter, body: &str) -> String {
    let heading = first_heading(body);
    resolve(&[Some(front_matter.title.as_str()), heading.as_deref()])
        .unwrap_or_else(|| UNTITLED.to_string())
}
