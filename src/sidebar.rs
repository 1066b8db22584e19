//! Docs sidebar: expansion state, search filtering, and rendering.
//!
//! [`SidebarState`] models what a reader can do with the sidebar: collapse
//! the whole panel, open and close branches, and type a search term. Branch
//! state is keyed by [`NavNode::key`], the normalized path of the node, so two
//! entries with the same title in different places never share state.
//!
//! While a search term is active every branch is forced open and the tree is
//! pruned to the entries that match (by title, by hint, or through a matching
//! descendant). Matching hints are listed under their entry.
//!
//! The static build renders one sidebar per docs page with the ancestors of
//! that page expanded. `static/sidebar.js` repeats the panel toggle and the
//! search filter in the browser using the `data-terms` attributes emitted
//! here.

use crate::types::NavNode;
use maud::{Markup, html};
use std::collections::BTreeSet;

/// Interactive state of one sidebar.
#[derive(Debug, Clone, PartialEq)]
pub struct SidebarState {
    /// Whole-panel collapse.
    pub is_expanded: bool,
    expanded: BTreeSet<String>,
    search: String,
    current: Option<String>,
}

impl Default for SidebarState {
    fn default() -> Self {
        Self {
            is_expanded: true,
            expanded: BTreeSet::new(),
            search: String::new(),
            current: None,
        }
    }
}

impl SidebarState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State for the page with `key`: its ancestors are open, and so is the
    /// page itself when it has children.
    pub fn for_page(root: &NavNode, key: &str) -> Self {
        let mut state = Self::new();
        state.expanded.extend(root.ancestor_keys(key));
        if let Some(node) = root.find_by_key(key) {
            if !node.is_leaf() && !node.key.is_empty() {
                state.expanded.insert(node.key.clone());
            }
        }
        state.current = Some(key.to_string());
        state
    }

    pub fn toggle_panel(&mut self) {
        self.is_expanded = !self.is_expanded;
    }

    pub fn toggle_node(&mut self, key: &str) {
        if !self.expanded.remove(key) {
            self.expanded.insert(key.to_string());
        }
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Key of the page the sidebar is rendered for.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn is_searching(&self) -> bool {
        !self.search.trim().is_empty()
    }

    /// Stored as open, or forced open by an active search.
    pub fn is_node_expanded(&self, node: &NavNode) -> bool {
        self.is_searching() || self.expanded.contains(&node.key)
    }

    /// Prune `nodes` to what the active search matches.
    pub fn filter(&self, nodes: &[NavNode]) -> Vec<NavNode> {
        filter_nodes(nodes, &self.search)
    }

    /// Hints of `node` matching the active search; empty when not searching.
    pub fn matching_hints<'a>(&self, node: &'a NavNode) -> Vec<&'a str> {
        if !self.is_searching() {
            return Vec::new();
        }
        let needle = self.search.trim().to_lowercase();
        node.hints
            .iter()
            .map(String::as_str)
            .filter(|hint| hint.to_lowercase().contains(&needle))
            .collect()
    }
}

/// Case-insensitive match on the title, any hint, or any descendant.
///
/// Surrounding whitespace in `term` is ignored.
pub fn node_matches(node: &NavNode, term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    matches_lowered(node, &needle)
}

fn matches_lowered(node: &NavNode, needle: &str) -> bool {
    node.title.to_lowercase().contains(needle)
        || node.hints.iter().any(|h| h.to_lowercase().contains(needle))
        || node.children.iter().any(|c| matches_lowered(c, needle))
}

/// Pruned copy of `nodes`: matching nodes are kept and their children are
/// filtered the same way. A blank term returns the nodes unchanged.
pub fn filter_nodes(nodes: &[NavNode], term: &str) -> Vec<NavNode> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return nodes.to_vec();
    }
    prune(nodes, &needle)
}

fn prune(nodes: &[NavNode], needle: &str) -> Vec<NavNode> {
    nodes
        .iter()
        .filter(|n| matches_lowered(n, needle))
        .map(|n| NavNode {
            children: prune(&n.children, needle),
            ..n.clone()
        })
        .collect()
}

/// Sidebar heading: a link when `href` is set.
#[derive(Debug, Clone, Copy)]
pub struct SidebarHeader<'a> {
    pub title: &'a str,
    pub href: Option<&'a str>,
}

/// Render the sidebar for `root` in the given state.
pub fn render_sidebar(root: &NavNode, state: &SidebarState, header: &SidebarHeader) -> Markup {
    let items = state.filter(&root.children);
    let no_results = state.is_searching() && items.is_empty();
    html! {
        aside.sidebar.collapsed[!state.is_expanded] id="sidebar" {
            div.sidebar-header {
                @if let Some(href) = header.href {
                    a.sidebar-title href=(href) { (header.title) }
                } @else {
                    h2.sidebar-title { (header.title) }
                }
                button.sidebar-toggle type="button" aria-controls="sidebar-panel"
                    aria-expanded=(if state.is_expanded { "true" } else { "false" })
                    aria-label="Toggle sidebar" { "«" }
            }
            div.sidebar-panel id="sidebar-panel" {
                input.sidebar-search type="search" placeholder="Search..."
                    aria-label="Search docs" autocomplete="off" value=(state.search());
                nav.sidebar-nav {
                    (render_items(&items, state, 0))
                }
                p.sidebar-empty hidden[!no_results] { "No matching pages" }
            }
        }
    }
}

fn render_items(nodes: &[NavNode], state: &SidebarState, depth: usize) -> Markup {
    html! {
        ul.nav-tree.nested[depth > 0] {
            @for node in nodes {
                (render_item(node, state, depth))
            }
        }
    }
}

fn render_item(node: &NavNode, state: &SidebarState, depth: usize) -> Markup {
    let active = state.current() == Some(node.key.as_str());
    let shown_hints = state.matching_hints(node);
    html! {
        li.nav-item data-key=(node.key) data-terms=(search_terms(node)) {
            @if node.is_leaf() {
                (entry(node, active))
            } @else {
                details open[state.is_node_expanded(node)] {
                    summary { (entry(node, active)) }
                    (render_items(&node.children, state, depth + 1))
                }
            }
            @if !node.hints.is_empty() {
                ul.nav-hints {
                    @for hint in &node.hints {
                        li.nav-hint hidden[!shown_hints.contains(&hint.as_str())] { (hint) }
                    }
                }
            }
        }
    }
}

fn entry(node: &NavNode, active: bool) -> Markup {
    html! {
        @if let Some(href) = &node.href {
            a.nav-link.active[active] href=(href) title=(node.title)
                aria-current=[active.then_some("page")] { (node.title) }
        } @else {
            span.nav-label title=(node.title) { (node.title) }
        }
    }
}

/// Lowercased title and hints, one per line, for the browser-side filter.
fn search_terms(node: &NavNode) -> String {
    std::iter::once(node.title.as_str())
        .chain(node.hints.iter().map(String::as_str))
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("\n")
}
