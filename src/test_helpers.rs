//! Shared test utilities for the docsite test suite.
//!
//! Provides fixture setup, lookup helpers, and navigation tree assertions
//! that work with scan-phase data structures (`Manifest`, `Document`,
//! `NavNode`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//!
//! let intro = find_doc(&manifest, "intro");
//! assert_eq!(intro.title, "Introduction");
//!
//! assert_tree_shape(&manifest.docs.navigation, &[
//!     ("Intro", &[]),
//!     ("Setup", &["Install", "Configure Server"]),
//! ]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::scan::{Document, Manifest};
use crate::types::{ContentFile, NavNode};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Build `ContentFile`s from raw relative paths.
pub fn files(paths: &[&str]) -> Vec<ContentFile> {
    paths.iter().map(|p| ContentFile::new(*p)).collect()
}

// =========================================================================
// Manifest lookups: panics with a clear message on miss
// =========================================================================

/// Find a docs document by slug. Panics if not found.
pub fn find_doc<'a>(manifest: &'a Manifest, slug: &str) -> &'a Document {
    manifest.docs.find(slug).unwrap_or_else(|| {
        let slugs: Vec<&str> = manifest
            .docs
            .documents
            .iter()
            .map(|d| d.slug.as_str())
            .collect();
        panic!("doc '{slug}' not found. Available: {slugs:?}")
    })
}

/// Find a blog post by slug. Panics if not found.
pub fn find_post<'a>(manifest: &'a Manifest, slug: &str) -> &'a Document {
    manifest
        .blogs
        .iter()
        .find(|p| p.slug == slug)
        .unwrap_or_else(|| {
            let slugs = post_slugs(manifest);
            panic!("post '{slug}' not found. Available: {slugs:?}")
        })
}

/// All blog slugs in manifest order.
pub fn post_slugs(manifest: &Manifest) -> Vec<&str> {
    manifest.blogs.iter().map(|p| p.slug.as_str()).collect()
}

// =========================================================================
// Navigation helpers
// =========================================================================

/// Direct child titles of a node, in order.
pub fn nav_titles(node: &NavNode) -> Vec<&str> {
    node.children.iter().map(|n| n.title.as_str()).collect()
}

/// Child titles under a given direct child. Panics if the child is missing.
pub fn nav_children_titles<'a>(node: &'a NavNode, parent_title: &str) -> Vec<&'a str> {
    node.child(parent_title)
        .map(nav_titles)
        .unwrap_or_else(|| {
            let titles = nav_titles(node);
            panic!("nav item '{parent_title}' not found. Available: {titles:?}")
        })
}

/// Assert that the top two levels of a tree match an expected shape.
///
/// Each entry is `(title, children)`. Use `&[]` for leaf nodes.
///
/// ```rust
/// assert_tree_shape(&root, &[
///     ("Intro", &[]),
///     ("Setup", &["Install"]),
/// ]);
/// ```
pub fn assert_tree_shape(root: &NavNode, expected: &[(&str, &[&str])]) {
    let actual = nav_titles(root);
    let expected_titles: Vec<&str> = expected.iter().map(|(t, _)| *t).collect();
    assert_eq!(actual, expected_titles, "nav top-level titles mismatch");

    for (title, children) in expected {
        let actual_children = nav_children_titles(root, title);
        assert_eq!(
            actual_children,
            children.to_vec(),
            "nav children of '{title}' mismatch"
        );
    }
}
