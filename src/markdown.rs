//! Markdown → HTML conversion and reading-time estimates.
//!
//! Uses pulldown-cmark with the GFM extensions authors expect (tables,
//! strikethrough, task lists, footnotes). Two rewrites happen on the event
//! stream before HTML is emitted:
//!
//! - headings get an `id` derived from their text so sections can be linked
//!   (`## Getting started` → `id="getting-started"`, repeats get `-1`, `-2`)
//! - root-relative link and image targets (`/assets/x.png`) get the site's
//!   base path prepended, so a site deployed under `/project` keeps working

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html::push_html};
use std::collections::HashMap;

/// Render a markdown body to an HTML fragment.
pub fn render_markdown(body: &str, base_path: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES;

    let mut events: Vec<Event<'_>> = Parser::new_ext(body, options)
        .map(|event| prefix_root_links(event, base_path))
        .collect();
    assign_heading_ids(&mut events);

    let mut html = String::with_capacity(body.len() * 3 / 2);
    push_html(&mut html, events.into_iter());
    html
}

/// Slugify heading text for use as an HTML id.
///
/// Lowercases, replaces non-alphanumeric runs with hyphens, strips
/// leading/trailing hyphens.
fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut prev_hyphen = true;
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
            prev_hyphen = false;
        } else if !prev_hyphen {
            slug.push('-');
            prev_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

fn assign_heading_ids(events: &mut [Event<'_>]) {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut i = 0;
    while i < events.len() {
        if matches!(events[i], Event::Start(Tag::Heading { id: None, .. })) {
            let mut text = String::new();
            let mut end = i + 1;
            while end < events.len() && !matches!(events[end], Event::End(TagEnd::Heading(_))) {
                if let Event::Text(t) | Event::Code(t) = &events[end] {
                    text.push_str(t);
                }
                end += 1;
            }

            let base = slugify(&text);
            if !base.is_empty() {
                let count = seen.entry(base.clone()).or_insert(0);
                let anchor = if *count == 0 {
                    base
                } else {
                    format!("{base}-{count}")
                };
                *count += 1;
                if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
                    *id = Some(CowStr::from(anchor));
                }
            }
            i = end;
        }
        i += 1;
    }
}

fn prefix_root_links<'a>(event: Event<'a>, base_path: &str) -> Event<'a> {
    let base = base_path.trim_end_matches('/');
    if base.is_empty() {
        return event;
    }
    let rebase = |url: CowStr<'a>| -> CowStr<'a> {
        if url.starts_with('/') && !url.starts_with("//") {
            CowStr::from(format!("{base}{url}"))
        } else {
            url
        }
    };
    match event {
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: rebase(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: rebase(dest_url),
            title,
            id,
        }),
        other => other,
    }
}

/// Estimated reading time in whole minutes, rounded up.
pub fn reading_minutes(body: &str, words_per_minute: u32) -> u32 {
    let words = body.split_whitespace().count();
    let wpm = words_per_minute.max(1) as usize;
    u32::try_from(words.div_ceil(wpm)).unwrap_or(u32::MAX)
}

/// Human label for a reading time: `"1 min read"` or `"N mins read"`.
pub fn reading_time_label(minutes: u32) -> String {
    if minutes <= 1 {
        "1 min read".to_string()
    } else {
        format!("{minutes} mins read")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_basic_markdown() {
        let html = render_markdown("This is **bold** and *italic*.", "");
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>italic</em>"));
    }

    #[test]
    fn renders_gfm_tables() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n", "");
        assert!(html.contains("<table>"));
    }

    #[test]
    fn headings_get_ids() {
        let html = render_markdown("## Getting `cargo` Started!\n", "");
        assert!(html.contains(r#"<h2 id="getting-cargo-started">"#), "{html}");
    }

    #[test]
    fn repeated_headings_get_unique_ids() {
        let html = render_markdown("## Setup\n\n## Setup\n\n## Setup\n", "");
        assert!(html.contains(r#"id="setup""#));
        assert!(html.contains(r#"id="setup-1""#));
        assert!(html.contains(r#"id="setup-2""#));
    }

    #[test]
    fn root_links_get_base_path() {
        let html = render_markdown("[docs](/docs/intro) ![x](/assets/x.png)", "/site");
        assert!(html.contains(r#"href="/site/docs/intro""#), "{html}");
        assert!(html.contains(r#"src="/site/assets/x.png""#), "{html}");
    }

    #[test]
    fn relative_and_external_links_untouched() {
        let html = render_markdown(
            "[a](setup) [b](https://example.com) [c](//cdn.example.com/x)",
            "/site",
        );
        assert!(html.contains(r#"href="setup""#));
        assert!(html.contains(r#"href="https://example.com""#));
        assert!(html.contains(r#"href="//cdn.example.com/x""#));
    }

    #[test]
    fn empty_base_path_leaves_links() {
        let html = render_markdown("[docs](/docs/intro)", "");
        assert!(html.contains(r#"href="/docs/intro""#));
    }

    #[test]
    fn raw_html_passes_through() {
        let html = render_markdown("<div class=\"note\">hi</div>\n", "");
        assert!(html.contains(r#"<div class="note">hi</div>"#));
    }

    #[test]
    fn reading_minutes_rounds_up() {
        let body = "word ".repeat(201);
        assert_eq!(reading_minutes(&body, 200), 2);
        assert_eq!(reading_minutes(&"word ".repeat(200), 200), 1);
        assert_eq!(reading_minutes("", 200), 0);
    }

    #[test]
    fn reading_time_labels() {
        assert_eq!(reading_time_label(0), "1 min read");
        assert_eq!(reading_time_label(1), "1 min read");
        assert_eq!(reading_time_label(7), "7 mins read");
    }

    #[test]
    fn slugify_strips_edges() {
        assert_eq!(slugify("  Hello, World!  "), "hello-world");
        assert_eq!(slugify("***"), "");
    }
}
