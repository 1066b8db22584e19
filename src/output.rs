//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every entity (doc, post, nav entry) is its semantic identity, meaning
//! its title and positional index. Filesystem paths show up as secondary
//! context on indented `Source:` lines, so the output reads as a content
//! inventory while still tracing back to specific files.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Docs (8 documents)
//!     Landing: index.md
//! 001 Intro
//!     Source: 01_intro.md
//!     Title: Introduction
//!     Hints: overview
//! 002 Setup
//!     Source: 02_setup/index.md
//!     001 Install
//!         Source: 02_setup/01_install.md
//!
//! Blogs (2 posts)
//! 001 Shipping the first zone server (2025-03-14)
//!     Source: zone-server.md
//! 002 Draft ideas (undated)
//!     Source: draft-ideas.md
//!
//! Config
//!     config.toml
//!     assets/
//! ```
//!
//! ## Nav
//!
//! ```text
//! Documentation → /docs
//! 001 Intro → /docs/intro
//! 002 Setup → /docs/setup
//!     001 Install → /docs/setup/install
//!         Matches: cargo
//! ```
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//! Blogs → blogs/index.html
//!     001 Shipping the first zone server → blogs/zone-server/index.html
//! Docs → docs/index.html
//!     001 Intro → docs/intro/index.html
//! Assets: 3 files → assets/
//!
//! Generated 6 pages in dist
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::config::CONFIG_FILE;
use crate::generate::GenerateReport;
use crate::scan::{Document, Manifest};
use crate::sidebar::SidebarState;
use crate::types::NavNode;
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an entity header: positional index + title, with optional detail.
///
/// ```text
/// 001 Intro
/// 001 Shipping the first zone server (2025-03-14)
/// ```
fn entity_header(index: usize, title: &str, detail: Option<&str>) -> String {
    match detail {
        Some(d) => format!("{} {} ({})", format_index(index), title, d),
        None => format!("{} {}", format_index(index), title),
    }
}

/// Source paths always print with forward slashes.
fn display_path(raw: &str) -> String {
    raw.replace('\\', "/")
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

// ============================================================================
// Tree walker
// ============================================================================

/// A flattened node from walking the NavNode tree.
struct TreeNode<'a> {
    depth: usize,
    position: usize,
    node: &'a NavNode,
}

/// Walk the navigation tree, assigning positional indices per sibling level.
/// Returns a flat list of nodes with depth and position for formatting.
fn walk_nav_tree(nav: &[NavNode]) -> Vec<TreeNode<'_>> {
    let mut nodes = Vec::new();
    walk_nav_tree_recursive(nav, 0, &mut nodes);
    nodes
}

fn walk_nav_tree_recursive<'a>(items: &'a [NavNode], depth: usize, nodes: &mut Vec<TreeNode<'a>>) {
    for (i, node) in items.iter().enumerate() {
        nodes.push(TreeNode {
            depth,
            position: i + 1,
            node,
        });
        walk_nav_tree_recursive(&node.children, depth + 1, nodes);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format the content inventory of a scan.
///
/// Docs follow the navigation tree; each entry that maps to a document shows
/// its source file, and its resolved title when that differs from the nav
/// title. Blog posts follow listing order.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    let docs = &manifest.docs;

    lines.push(format!(
        "Docs ({})",
        plural(docs.documents.len(), "document", "documents")
    ));
    if let Some(landing) = docs.landing() {
        lines.push(format!("    Landing: {}", display_path(&landing.file.raw_path)));
    }

    for entry in walk_nav_tree(&docs.navigation.children) {
        let base_indent = indent(entry.depth);
        let node = entry.node;
        lines.push(format!(
            "{}{}",
            base_indent,
            entity_header(entry.position, &node.title, None)
        ));

        if let Some(href) = &node.href {
            if let Some(doc) = docs.find_by_href(href) {
                lines.push(format!(
                    "{}    Source: {}",
                    base_indent,
                    display_path(&doc.file.raw_path)
                ));
                if doc.title != node.title {
                    lines.push(format!("{}    Title: {}", base_indent, doc.title));
                }
            }
        }
        if !node.hints.is_empty() {
            lines.push(format!("{}    Hints: {}", base_indent, node.hints.join(", ")));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Blogs ({})",
        plural(manifest.blogs.len(), "post", "posts")
    ));
    for (i, post) in manifest.blogs.iter().enumerate() {
        lines.extend(post_lines(i + 1, post));
    }

    // Config section
    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join(CONFIG_FILE).exists() {
        lines.push(format!("    {CONFIG_FILE}"));
    }
    let assets_path = source_root.join(&manifest.config.assets_dir);
    if assets_path.is_dir() {
        lines.push(format!("    {}/", manifest.config.assets_dir));
    }

    lines
}

fn post_lines(position: usize, post: &Document) -> Vec<String> {
    let date = post
        .front_matter
        .release_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "undated".to_string());
    let mut lines = vec![
        entity_header(position, &post.title, Some(&date)),
        format!("    Source: {}", display_path(&post.file.raw_path)),
    ];
    if !post.front_matter.tags.is_empty() {
        lines.push(format!("    Tags: {}", post.front_matter.tags.join(", ")));
    }
    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Nav output
// ============================================================================

/// Format a navigation tree as the sidebar would show it for `state`.
///
/// With an active search the tree is pruned to matching entries and hints
/// that matched are listed under their entry.
pub fn format_nav_tree(root: &NavNode, state: &SidebarState) -> Vec<String> {
    let mut lines = vec![nav_line(&root.title, root.href.as_deref())];
    let filtered = state.filter(&root.children);

    if filtered.is_empty() && state.is_searching() {
        lines.push(format!("    No entries match {:?}", state.search().trim()));
        return lines;
    }

    for entry in walk_nav_tree(&filtered) {
        let base_indent = indent(entry.depth);
        let node = entry.node;
        let header = entity_header(entry.position, &node.title, None);
        lines.push(format!(
            "{}{}",
            base_indent,
            nav_line(&header, node.href.as_deref())
        ));
        let hints = state.matching_hints(node);
        if !hints.is_empty() {
            lines.push(format!("{}    Matches: {}", base_indent, hints.join(", ")));
        }
    }
    lines
}

fn nav_line(label: &str, href: Option<&str>) -> String {
    match href {
        Some(href) => format!("{label} → {href}"),
        None => label.to_string(),
    }
}

/// Print a navigation tree to stdout.
pub fn print_nav_tree(root: &NavNode, state: &SidebarState) {
    for line in format_nav_tree(root, state) {
        println!("{}", line);
    }
}

// ============================================================================
// Build output
// ============================================================================

/// Format build output: every page with the file it was written to.
pub fn format_build_output(manifest: &Manifest, report: &GenerateReport) -> Vec<String> {
    let sections = &manifest.config.sections;
    let page = |dir: &str| -> String {
        if dir.is_empty() {
            "index.html".to_string()
        } else {
            format!("{dir}/index.html")
        }
    };

    let mut lines = vec![format!("Home → {}", page(""))];

    lines.push(format!("{} → {}", sections.blogs_title, page(&sections.blogs)));
    for (i, post) in manifest.blogs.iter().enumerate() {
        lines.push(format!(
            "    {} {} → {}",
            format_index(i + 1),
            post.title,
            page(&format!("{}/{}", sections.blogs, post.slug))
        ));
    }

    lines.push(format!("{} → {}", sections.docs_title, page(&sections.docs)));
    let pages = manifest
        .docs
        .documents
        .iter()
        .filter(|doc| !doc.slug.is_empty());
    for (i, doc) in pages.enumerate() {
        lines.push(format!(
            "    {} {} → {}",
            format_index(i + 1),
            doc.title,
            page(&format!("{}/{}", sections.docs, doc.slug))
        ));
    }

    if report.assets_copied > 0 {
        lines.push(format!(
            "Assets: {} → {}/",
            plural(report.assets_copied, "file", "files"),
            manifest.config.assets_dir
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {} in {}",
        plural(report.pages.len(), "page", "pages"),
        report.output_dir.display()
    ));
    lines
}

/// Print build output to stdout.
pub fn print_build_output(manifest: &Manifest, report: &GenerateReport) {
    for line in format_build_output(manifest, report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
