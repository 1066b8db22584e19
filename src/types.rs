//! Shared types used across discovery, navigation, and rendering.
//!
//! These types are serialized into the JSON manifest printed by
//! `docsite check --json` and `docsite nav --json`.

use crate::naming;
use serde::{Deserialize, Serialize};

/// A markdown file discovered under a section root.
///
/// `raw_path` keeps the separators the platform produced; everything derived
/// from it (slug, titles) accepts both `/` and `\`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentFile {
    /// Path relative to the section root, as discovered.
    pub raw_path: String,
    /// Order prefix of every path segment (`None` for unprefixed segments).
    pub order_prefixes: Vec<Option<u32>>,
    /// Whether the file name, ignoring prefix, is `index.md`.
    pub is_index: bool,
}

impl ContentFile {
    pub fn new(raw_path: impl Into<String>) -> Self {
        let raw_path = raw_path.into();
        let segments = naming::split_segments(&raw_path);
        let order_prefixes = segments
            .iter()
            .map(|s| naming::parse_segment(s).order)
            .collect();
        let is_index = segments
            .last()
            .is_some_and(|name| naming::is_index_file(name));
        Self {
            raw_path,
            order_prefixes,
            is_index,
        }
    }

    /// Raw path segments in order.
    pub fn segments(&self) -> Vec<&str> {
        naming::split_segments(&self.raw_path)
    }

    /// Canonical slug (prefixes stripped, `.md` dropped, index collapsed).
    pub fn slug(&self) -> String {
        naming::normalize_slug(&self.raw_path)
    }

    /// Title derived from the file name.
    pub fn file_title(&self) -> String {
        self.segments()
            .last()
            .map(|name| naming::display_title(name))
            .unwrap_or_default()
    }
}

/// Navigation tree node.
///
/// The tree root is synthetic: its title is the section title and its
/// children are the top-level path segments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavNode {
    pub title: String,
    /// Present only when the node maps to a navigable document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Normalized path from the root (`setup/install`); empty for the root.
    #[serde(default)]
    pub key: String,
    /// Extra search terms (front-matter tags).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavNode>,
}

impl NavNode {
    pub fn new(title: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Find a child by title among the direct children only.
    pub fn child(&self, title: &str) -> Option<&NavNode> {
        self.children.iter().find(|c| c.title == title)
    }

    /// Find a descendant (or self) by its path key.
    pub fn find_by_key(&self, key: &str) -> Option<&NavNode> {
        if self.key == key {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_key(key))
    }

    pub fn find_by_key_mut(&mut self, key: &str) -> Option<&mut NavNode> {
        if self.key == key {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_by_key_mut(key))
    }

    /// Find a descendant (or self) by its href.
    pub fn find_by_href(&self, href: &str) -> Option<&NavNode> {
        if self.href.as_deref() == Some(href) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_href(href))
    }

    /// Keys of this node's ancestors leading to `key`, outermost first,
    /// excluding the node itself. Empty when `key` is not in the tree.
    pub fn ancestor_keys(&self, key: &str) -> Vec<String> {
        fn walk(node: &NavNode, key: &str, trail: &mut Vec<String>) -> bool {
            if node.key == key {
                return true;
            }
            trail.push(node.key.clone());
            if node.children.iter().any(|c| walk(c, key, trail)) {
                return true;
            }
            trail.pop();
            false
        }

        let mut trail = Vec::new();
        if walk(self, key, &mut trail) {
            // The synthetic root is always expanded; drop it.
            trail.retain(|k| !k.is_empty());
            trail
        } else {
            Vec::new()
        }
    }

    /// Total number of nodes below this one.
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|c| 1 + c.descendant_count())
            .sum()
    }
}
