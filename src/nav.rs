//! Navigation tree construction.
//!
//! Turns the flat list of files discovered in a section into the nested
//! [`NavNode`] tree the sidebar renders. Every path segment becomes a node
//! titled by [`naming::display_title`]; files carry an `href`, directories
//! only get one when they contain an `index.md`.
//!
//! ```text
//! 01_intro.md                Docs
//! 02_setup/index.md    →     ├── Intro     /intro
//! 02_setup/01_install.md     └── Setup     /setup
//!                                └── Install  /setup/install
//! ```
//!
//! The builder holds a reference to the current parent while descending a
//! path, so a segment is only ever matched against its own siblings. Two
//! directories with the same title under different parents stay distinct.
//!
//! Children keep first-discovery order. Ordering comes from the discovery
//! walk, which visits entries by file name so `NN_` prefixes decide it.

use crate::naming;
use crate::types::{ContentFile, NavNode};

/// Join a section href base and a slug into an absolute href.
///
/// - `("", "intro")` → `/intro`
/// - `("/docs", "setup/install")` → `/docs/setup/install`
/// - `("/docs", "")` → `/docs`
/// - `("", "")` → `/`
pub fn join_href(base: &str, slug: &str) -> String {
    let base = base.trim_end_matches('/');
    match (base.is_empty(), slug.is_empty()) {
        (true, true) => "/".to_string(),
        (false, true) => base.to_string(),
        (true, false) => format!("/{slug}"),
        (false, false) => format!("{base}/{slug}"),
    }
}

/// Build the navigation tree for one section.
///
/// `root_title` names the synthetic root; `href_base` is prefixed to every
/// computed href (see [`join_href`]). A top-level `index.md` sets the root's
/// href.
pub fn build_tree(files: &[ContentFile], root_title: &str, href_base: &str) -> NavNode {
    let mut root = NavNode::new(root_title, "");
    for file in files {
        insert_file(&mut root, file, href_base);
    }
    root
}

fn insert_file(root: &mut NavNode, file: &ContentFile, href_base: &str) {
    let segments = file.segments();
    let last = segments.len().saturating_sub(1);
    // Hrefs follow the file's own path; keys follow the nodes it lands in,
    // which may have been created by a differently spelled segment.
    let mut slug_parts: Vec<&str> = Vec::with_capacity(segments.len());
    let mut parent = root;

    for (i, segment) in segments.iter().enumerate() {
        let is_last = i == last;
        let normalized = naming::normalize_segment(segment, is_last);

        if is_last && normalized.is_empty() {
            // index.md: the directory itself becomes navigable
            let href = join_href(href_base, &slug_parts.join("/"));
            parent.href.get_or_insert(href);
            return;
        }

        slug_parts.push(normalized);
        let title = naming::display_title(segment);
        let pos = match parent.children.iter().position(|c| c.title == title) {
            Some(pos) => pos,
            None => {
                let key = child_key(&parent.key, normalized);
                parent.children.push(NavNode::new(title, key));
                parent.children.len() - 1
            }
        };

        let node = &mut parent.children[pos];
        if is_last {
            let href = join_href(href_base, &slug_parts.join("/"));
            if node.href.is_some() {
                log::debug!("{} duplicates an existing nav entry", file.raw_path);
            }
            node.href.get_or_insert(href);
        }
        parent = node;
    }
}

fn child_key(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_string()
    } else {
        format!("{parent}/{segment}")
    }
}

/// Attach search hints to the node with the given key.
///
/// Returns `false` when no node has that key.
pub fn attach_hints(root: &mut NavNode, key: &str, hints: &[String]) -> bool {
    match root.find_by_key_mut(key) {
        Some(node) => {
            for hint in hints {
                if !node.hints.contains(hint) {
                    node.hints.push(hint.clone());
                }
            }
            true
        }
        None => false,
    }
}
