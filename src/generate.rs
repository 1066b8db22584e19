//! HTML site generation.
//!
//! Stage 2 of the docsite build pipeline. Takes the scanned [`Manifest`] and
//! writes the final static site.
//!
//! ## Generated Pages
//!
//! - **Home** (`/index.html`): welcome text, a contribute card, latest posts
//! - **Blog listing** (`/blogs/index.html`): every post, newest first
//! - **Blog posts** (`/blogs/{slug}/index.html`): one page per post
//! - **Docs landing** (`/docs/index.html`): `docs/index.md`, or a default welcome
//! - **Docs pages** (`/docs/{slug}/index.html`): rendered markdown with the
//!   sidebar and an authors panel
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── style.css                  # Color variables + base styles
//! ├── sidebar.js                 # Sidebar collapse and live search
//! ├── assets/                    # Copied from the content root
//! ├── blogs/
//! │   ├── index.html
//! │   └── zone-server/index.html
//! └── docs/
//!     ├── index.html
//!     ├── intro/index.html
//!     └── setup/
//!         ├── index.html
//!         └── install/index.html
//! ```
//!
//! Every page lives at `<href>/index.html`, so hrefs work with or without a
//! trailing slash on any static host.
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: Base styles (colors injected from config)
//! - `static/sidebar.js`: Sidebar panel toggle and search filter
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::config::{self, SiteConfig};
use crate::markdown;
use crate::metadata;
use crate::nav::join_href;
use crate::scan::{Document, Manifest};
use crate::sidebar::{self, SidebarHeader, SidebarState};
use chrono::NaiveDate;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/sidebar.js");

/// docsite version baked into generated HTML as `<meta name="generator">`.
const VERSION: &str = env!("CARGO_PKG_VERSION");

const AVATAR_BASE: &str = "https://avatars.githubusercontent.com/";
const GITHUB_BASE: &str = "https://github.com/";

/// What a build wrote, for the CLI summary.
#[derive(Debug, Default, Serialize)]
pub struct GenerateReport {
    pub output_dir: PathBuf,
    /// Output-relative paths of the HTML pages, in write order.
    pub pages: Vec<String>,
    /// Number of files copied from the assets directory.
    pub assets_copied: usize,
}

pub fn generate(
    manifest: &Manifest,
    content_root: &Path,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let config = &manifest.config;
    fs::create_dir_all(output_dir)?;

    let mut report = GenerateReport {
        output_dir: output_dir.to_path_buf(),
        ..GenerateReport::default()
    };

    // Generate CSS with colors from config
    let color_css = config::generate_color_css(&config.colors);
    let css = format!("{}\n\n{}", color_css, CSS_STATIC);
    fs::write(output_dir.join("style.css"), css)?;
    fs::write(output_dir.join("sidebar.js"), JS)?;

    let assets = content_root.join(&config.assets_dir);
    if assets.is_dir() {
        let dest = output_dir.join(&config.assets_dir);
        fs::create_dir_all(&dest)?;
        report.assets_copied = copy_dir_recursive(&assets, &dest)?;
    } else {
        log::debug!("no assets directory at {}", assets.display());
    }

    write_page(output_dir, "", render_home(manifest), &mut report)?;

    let blogs = config.sections.blogs.as_str();
    write_page(output_dir, blogs, render_blog_listing(manifest), &mut report)?;
    for post in &manifest.blogs {
        let dir = format!("{blogs}/{}", post.slug);
        write_page(output_dir, &dir, render_blog_post(manifest, post), &mut report)?;
    }

    let docs = config.sections.docs.as_str();
    if manifest.docs.landing().is_none() {
        write_page(output_dir, docs, render_docs_landing(manifest), &mut report)?;
    }
    for doc in &manifest.docs.documents {
        let dir = join_dir(docs, &doc.slug);
        write_page(output_dir, &dir, render_doc_page(manifest, doc), &mut report)?;
    }

    Ok(report)
}

fn join_dir(section: &str, slug: &str) -> String {
    if slug.is_empty() {
        section.to_string()
    } else {
        format!("{section}/{slug}")
    }
}

fn write_page(
    output_dir: &Path,
    dir: &str,
    page: Markup,
    report: &mut GenerateReport,
) -> Result<(), GenerateError> {
    let rel = if dir.is_empty() {
        "index.html".to_string()
    } else {
        format!("{dir}/index.html")
    };
    let path = output_dir.join(&rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, page.into_string())?;
    log::debug!("wrote {rel}");
    report.pages.push(rel);
    Ok(())
}

/// Copy a directory tree, returning the number of files copied.
fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<usize> {
    let mut copied = 0;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copied += copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
            copied += 1;
        }
    }
    Ok(copied)
}

// ============================================================================
// Helpers
// ============================================================================

/// URL building for one site configuration.
struct Site<'a> {
    config: &'a SiteConfig,
}

impl<'a> Site<'a> {
    fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    fn base(&self) -> &str {
        self.config.base_path.trim_end_matches('/')
    }

    /// Prefix a root-relative path (`/style.css`) with the base path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base(), path)
    }

    fn docs_href(&self) -> String {
        join_href(self.base(), &self.config.sections.docs)
    }

    fn blogs_href(&self) -> String {
        join_href(self.base(), &self.config.sections.blogs)
    }

    /// Image sources from front-matter: root-relative ones get the base path,
    /// absolute URLs are kept.
    fn asset(&self, src: &str) -> String {
        if src.starts_with('/') && !src.starts_with("//") {
            self.url(src)
        } else {
            src.to_string()
        }
    }

    fn format_date(&self, date: Option<NaiveDate>) -> Option<String> {
        date.map(|d| d.format(&self.config.blog.date_format).to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    Home,
    Docs,
    Blogs,
}

/// Cut `text` to `limit` characters and append `suffix` when it was longer.
fn truncate(text: &str, limit: usize, suffix: &str) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}{}", &text[..cut], suffix),
        None => text.to_string(),
    }
}

fn avatar_url(handle: &str) -> String {
    format!("{AVATAR_BASE}{handle}")
}

fn github_url(handle: &str) -> String {
    format!("{GITHUB_BASE}{handle}")
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(site: &Site, title: &str, section: Section, content: Markup) -> Markup {
    let site_title = site.config.site.title.as_str();
    let full_title = if title == site_title {
        site_title.to_string()
    } else {
        format!("{title} | {site_title}")
    };
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="generator" content=(format!("docsite v{VERSION}"));
                title { (full_title) }
                link rel="stylesheet" href=(site.url("/style.css"));
            }
            body {
                (site_header(site, section))
                (content)
            }
        }
    }
}

/// Renders the navbar shown on every page
fn site_header(site: &Site, current: Section) -> Markup {
    let info = &site.config.site;
    let sections = &site.config.sections;
    html! {
        header.site-header {
            a.site-title href=(site.url("/")) { (info.title) }
            nav.site-nav {
                a.current[current == Section::Docs] href=(site.docs_href()) { (sections.docs_title) }
                a.current[current == Section::Blogs] href=(site.blogs_href()) { (sections.blogs_title) }
                @if !info.github_url.is_empty() {
                    a href=(info.github_url) target="_blank" rel="noopener" { "GitHub" }
                }
            }
        }
    }
}

fn render_tags(tags: &[String]) -> Markup {
    html! {
        @if !tags.is_empty() {
            ul.tags {
                @for tag in tags {
                    li.tag { (tag) }
                }
            }
        }
    }
}

fn render_markdown_body(site: &Site, body: &str) -> Markup {
    html! {
        div.prose {
            (PreEscaped(markdown::render_markdown(body, site.base())))
        }
    }
}

/// Docs pages: sidebar, main column, optional right-hand panel.
fn docs_layout(
    site: &Site,
    manifest: &Manifest,
    state: &SidebarState,
    title: &str,
    main: Markup,
    aside: Option<Markup>,
) -> Markup {
    let navigation = &manifest.docs.navigation;
    let docs_href = site.docs_href();
    let header = SidebarHeader {
        title: "Home",
        href: Some(navigation.href.as_deref().unwrap_or(&docs_href)),
    };

    let content = html! {
        div.docs-layout {
            (sidebar::render_sidebar(navigation, state, &header))
            main.docs-page {
                (main)
            }
            @if let Some(aside) = aside {
                (aside)
            }
        }
        script src=(site.url("/sidebar.js")) defer {}
    };

    base_document(site, title, Section::Docs, content)
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the home page
fn render_home(manifest: &Manifest) -> Markup {
    let config = &manifest.config;
    let site = Site::new(config);
    let docs_href = site.docs_href();
    let contribute_href = manifest
        .docs
        .find("contributing")
        .map(|d| d.href.clone())
        .unwrap_or_else(|| docs_href.clone());
    let latest = manifest.blogs.iter().take(config.blog.latest_count);

    let content = html! {
        main.home-page {
            section.welcome {
                h1 { "Welcome to " (config.site.title) }
                @if !config.site.tagline.is_empty() {
                    p { (config.site.tagline) }
                }
            }
            @if !config.site.intro.is_empty() {
                section.mission {
                    h2 { "Our Mission" }
                    p { (config.site.intro) }
                }
            }
            div.home-cards {
                section.card.contribute {
                    h3 { "How to Contribute" }
                    p { "Everything you need to get involved is in the documentation." }
                    a.card-more href=(contribute_href) { "Start contributing" }
                }
                section.card.latest-posts {
                    h3 { "Latest " (config.sections.blogs_title) }
                    p { "Stay updated with our latest insights and tutorials" }
                    @for post in latest {
                        div.post-teaser {
                            h4 { a href=(post.href) { (post.title) } }
                            @if !post.front_matter.description.is_empty() {
                                p { (truncate(&post.front_matter.description, config.blog.home_description_limit, "...")) }
                            }
                        }
                    }
                    @if manifest.blogs.is_empty() {
                        p.empty { "No posts yet." }
                    }
                    a.card-more href=(site.blogs_href()) { "View all " (config.sections.blogs_title.to_lowercase()) }
                }
            }
        }
    };

    base_document(&site, &config.site.title, Section::Home, content)
}

/// Renders the blog listing page
fn render_blog_listing(manifest: &Manifest) -> Markup {
    let config = &manifest.config;
    let site = Site::new(config);
    let limit = config.blog.listing_description_limit;

    let content = html! {
        main.blog-page {
            h1 { (config.sections.blogs_title) }
            p.lead { "Stay updated with our latest insights and tutorials" }
            ul.post-list {
                @for post in &manifest.blogs {
                    @let fm = &post.front_matter;
                    @let github = fm.github_handles().into_iter().next();
                    li {
                        a.post-card href=(post.href) {
                            @if !fm.cover_image.is_empty() {
                                img.post-cover-thumb src=(site.asset(&fm.cover_image)) alt=(post.title)
                                    width="80" height="80" loading="lazy";
                            }
                            div.post-summary {
                                h2 {
                                    (post.title)
                                    @if let Some(date) = site.format_date(fm.release_date) {
                                        " " span.post-meta { "(" (date) ")" }
                                    }
                                    @if !fm.author.is_empty() {
                                        " "
                                        span.post-meta {
                                            "by "
                                            @if let Some(handle) = &github {
                                                img.avatar src=(avatar_url(handle)) alt=(fm.author) width="16" height="16";
                                            }
                                            (fm.author)
                                        }
                                    }
                                }
                                @if !fm.description.is_empty() {
                                    p.post-description { (truncate(&fm.description, limit, "... read more")) }
                                }
                                (render_tags(&fm.tags))
                            }
                        }
                    }
                }
            }
            @if manifest.blogs.is_empty() {
                p.empty { "No posts yet." }
            }
        }
    };

    base_document(&site, &config.sections.blogs_title, Section::Blogs, content)
}

/// Renders a single blog post
fn render_blog_post(manifest: &Manifest, post: &Document) -> Markup {
    let config = &manifest.config;
    let site = Site::new(config);
    let fm = &post.front_matter;
    let github = fm.github_handles().into_iter().next();
    let date = site.format_date(fm.release_date);

    let content = html! {
        main.post-page {
            a.back-link href=(site.blogs_href()) { "← Back to " (config.sections.blogs_title) }
            article.post {
                @if !fm.cover_image.is_empty() {
                    img.post-cover src=(site.asset(&fm.cover_image)) alt=(post.title);
                }
                h1 { (post.title) }
                p.reading-time { (markdown::reading_time_label(post.reading_minutes)) }
                @if !fm.author.is_empty() || date.is_some() {
                    div.post-byline {
                        @if !fm.author.is_empty() {
                            @if let Some(handle) = &github {
                                img.avatar src=(avatar_url(handle)) alt=(fm.author) width="20" height="20";
                            }
                            span {
                                "by "
                                @if let Some(handle) = &github {
                                    a href=(github_url(handle)) target="_blank" rel="noopener noreferrer" { (fm.author) }
                                } @else {
                                    (fm.author)
                                }
                            }
                        }
                        @if let Some(date) = &date {
                            span.post-meta {
                                @if !fm.author.is_empty() { "• " }
                                time datetime=[fm.release_date.map(|d| d.to_string())] { (date) }
                            }
                        }
                    }
                }
                (render_tags(&fm.tags))
                (render_markdown_body(&site, &post.body))
            }
        }
    };

    base_document(&site, &post.title, Section::Blogs, content)
}

/// Renders the docs landing page when the section has no `index.md`
fn render_docs_landing(manifest: &Manifest) -> Markup {
    let config = &manifest.config;
    let site = Site::new(config);
    let title = config.sections.docs_title.as_str();

    let main = html! {
        article.doc {
            h1 { (title) }
            p {
                "Welcome to the documentation. Here you will find all the information you need to get started with "
                (config.site.title) "."
            }
        }
    };

    docs_layout(&site, manifest, &SidebarState::new(), title, main, None)
}

/// Renders a docs page with the sidebar opened to it
fn render_doc_page(manifest: &Manifest, doc: &Document) -> Markup {
    let site = Site::new(&manifest.config);
    let state = match &doc.nav_key {
        Some(key) => SidebarState::for_page(&manifest.docs.navigation, key),
        None => SidebarState::new(),
    };
    let authors = doc.front_matter.github_handles();
    // The body's own `# heading` already shows the title when front-matter has none.
    let show_title = !doc.front_matter.title.trim().is_empty()
        || metadata::first_heading(&doc.body).is_none();

    let main = html! {
        article.doc {
            @if show_title {
                h1 { (doc.title) }
            }
            p.reading-time { (markdown::reading_time_label(doc.reading_minutes)) }
            (render_markdown_body(&site, &doc.body))
        }
    };

    let aside = (!authors.is_empty()).then(|| {
        html! {
            aside.authors {
                h3 { "Authors" }
                ul {
                    @for handle in &authors {
                        li {
                            img.avatar src=(avatar_url(handle)) alt=(handle) width="24" height="24";
                            a href=(github_url(handle)) target="_blank" rel="noopener noreferrer" { (handle) }
                        }
                    }
                }
            }
        }
    });

    docs_layout(&site, manifest, &state, &doc.title, main, aside)
}

// ============================================================================
// Tests
// ============================================================================
