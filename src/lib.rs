//! # Docsite
//!
//! A static site generator for project documentation and blogs. Your
//! filesystem is the data source: directories under `docs/` become sections
//! of a navigable tree, files are ordered by numeric prefix, and markdown
//! files under `blogs/` become dated posts.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      content/  →  Manifest   (filesystem → documents + nav tree)
//! 2. Generate  Manifest  →  dist/      (final HTML site)
//! ```
//!
//! The manifest is plain data and serializes to JSON (`docsite check --json`),
//! so every stage can be inspected and tested without rendering HTML.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: discovers markdown, parses documents, builds the manifest |
//! | [`generate`] | Stage 2: renders the HTML site from the manifest using Maud |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`types`] | Shared types: `ContentFile` and the `NavNode` tree |
//! | [`naming`] | `NN_name` path convention: slugs and display titles |
//! | [`nav`] | Builds the navigation tree from a flat file list |
//! | [`sidebar`] | Sidebar state (expansion, search filter) and its HTML |
//! | [`metadata`] | YAML front-matter parsing and title resolution |
//! | [`markdown`] | Markdown to HTML and reading time |
//! | [`output`] | CLI output formatting: tree-based display of pipeline results |
//!
//! # Design Decisions
//!
//! ## Paths Are the Navigation
//!
//! The docs tree mirrors the directory layout. `02_setup/01_install.md` lands
//! at `/docs/setup/install` under a "Setup" branch; the `NN_` prefix only
//! controls order. An `index.md` gives its directory a page of its own
//! instead of adding a child. See [`naming`] and [`nav::build_tree`].
//!
//! ## Explicit Discovery Options
//!
//! Where content lives and which base path hrefs carry are passed in through
//! [`scan::DiscoveryOptions`], never read from process-wide state, so a
//! preview build and a deploy build differ only in their arguments.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): malformed markup
//! is a build error, interpolation is escaped by default, and there is no
//! template directory to ship.
//!
//! ## Progressive Sidebar
//!
//! Every docs page is complete HTML with its ancestors already expanded.
//! The embedded `sidebar.js` only adds the panel toggle and live search, and
//! applies the same matching rules as [`sidebar::node_matches`].

pub mod config;
pub mod generate;
pub mod markdown;
pub mod metadata;
pub mod naming;
pub mod nav;
pub mod output;
pub mod scan;
pub mod sidebar;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
