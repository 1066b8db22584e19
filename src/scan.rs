//! Filesystem discovery and manifest generation.
//!
//! Stage 1 of the docsite build pipeline. Walks the content root, reads every
//! markdown file, and produces a [`Manifest`] the generate stage renders.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                         # Content root
//! ├── config.toml                  # Site configuration (optional)
//! ├── assets/                      # Copied verbatim to <output>/assets/
//! ├── docs/                        # Docs section
//! │   ├── index.md                 # Docs landing page (optional)
//! │   ├── 01_intro.md              # → /docs/intro
//! │   ├── 02_setup/
//! │   │   ├── index.md             # → /docs/setup (directory becomes navigable)
//! │   │   └── 01_install.md        # → /docs/setup/install
//! │   └── 03_getting-started.md    # → /docs/getting-started
//! └── blogs/                       # Blog section
//!     ├── zone-server.md           # → /blogs/zone-server
//!     └── roadmap.md
//! ```
//!
//! ## Naming Conventions
//!
//! - **Numbered entries** (`NN_name`): the number orders siblings and is
//!   stripped from URLs and titles (see [`crate::naming`])
//! - **`index.md`**: the landing document of its directory
//! - Only files ending in `.md` are content; everything else is ignored
//!
//! ## Output
//!
//! Produces a [`Manifest`] containing:
//! - Docs documents and their navigation tree
//! - Blog posts, newest first (undated posts last)
//! - Site configuration
//!
//! ## Validation
//!
//! - Both section directories must exist; a missing one is an error, never an
//!   empty site
//! - Two files resolving to the same slug are not an error: the first one
//!   discovered wins and the other is reported with `log::warn!`

use crate::config::{self, SiteConfig};
use crate::markdown;
use crate::metadata::{self, FrontMatter};
use crate::naming;
use crate::nav;
use crate::types::{ContentFile, NavNode};
use serde::Serialize;
use std::cmp::{Ordering, Reverse};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Content directory not found: {0}")]
    MissingRoot(PathBuf),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("No document with slug {slug:?} in section {section:?}")]
    DocumentNotFound { section: String, slug: String },
}

/// Where content lives and how its URLs are prefixed.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryOptions {
    /// Directory holding the section directories.
    pub content_root: PathBuf,
    /// URL prefix (`""` or `/path`).
    pub base_path: String,
}

/// Section-aware view of the content root.
#[derive(Debug, Clone)]
pub struct Discovery {
    options: DiscoveryOptions,
}

impl Discovery {
    pub fn new(options: DiscoveryOptions) -> Self {
        Self { options }
    }

    pub fn content_root(&self) -> &Path {
        &self.options.content_root
    }

    pub fn base_path(&self) -> &str {
        &self.options.base_path
    }

    /// `<content_root>/<section>`
    pub fn section_dir(&self, section: &str) -> PathBuf {
        self.options.content_root.join(section)
    }

    /// `<base_path>/<section>`, the prefix of every href in the section.
    pub fn href_base(&self, section: &str) -> String {
        format!("{}/{}", self.options.base_path.trim_end_matches('/'), section)
    }

    /// List the markdown files of a section.
    pub fn list(&self, section: &str) -> Result<Vec<ContentFile>, ScanError> {
        discover_markdown(&self.section_dir(section))
    }

    /// Resolve a slug to the source file that produces it.
    ///
    /// Leading and trailing slashes on `slug` are ignored, so an href tail
    /// like `setup/install/` resolves too. When several files share a slug
    /// the first discovered one is returned.
    pub fn find_document(&self, section: &str, slug: &str) -> Result<PathBuf, ScanError> {
        let wanted = slug.trim_matches('/');
        self.list(section)?
            .into_iter()
            .find(|file| file.slug() == wanted)
            .map(|file| self.section_dir(section).join(&file.raw_path))
            .ok_or_else(|| ScanError::DocumentNotFound {
                section: section.to_string(),
                slug: wanted.to_string(),
            })
    }
}

/// Recursively list every `.md` file under `root`, relative to `root`.
///
/// Siblings are visited by order prefix (numerically), then by file name, so
/// `10_x` follows `9_x` and the result is the same on every platform.
pub fn discover_markdown(root: &Path) -> Result<Vec<ContentFile>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::MissingRoot(root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).sort_by(compare_entries) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !name.ends_with(naming::MARKDOWN_EXT) {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        files.push(ContentFile::new(relative.to_string_lossy()));
    }
    Ok(files)
}

fn compare_entries(a: &DirEntry, b: &DirEntry) -> Ordering {
    let key = |entry: &DirEntry| {
        let name = entry.file_name().to_string_lossy().into_owned();
        let order = naming::parse_segment(&name).order;
        (order.is_none(), order, name)
    };
    key(a).cmp(&key(b))
}

/// Manifest output from the scan stage.
#[derive(Debug, Serialize)]
pub struct Manifest {
    pub docs: DocsSection,
    pub blogs: Vec<Document>,
    pub config: SiteConfig,
}

/// The docs section: its documents and the navigation tree built from them.
#[derive(Debug, Serialize)]
pub struct DocsSection {
    pub documents: Vec<Document>,
    pub navigation: NavNode,
}

impl DocsSection {
    /// The top-level `index.md`, if the section has one.
    pub fn landing(&self) -> Option<&Document> {
        self.find("")
    }

    pub fn find(&self, slug: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.slug == slug)
    }

    /// The document a navigation node links to.
    pub fn find_by_href(&self, href: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.href == href)
    }
}

/// A parsed markdown document.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub file: ContentFile,
    /// Canonical slug, unique within the section.
    pub slug: String,
    /// Absolute href including base path and section.
    pub href: String,
    /// Front-matter title, else first `# heading`, else "Untitled".
    pub title: String,
    pub front_matter: FrontMatter,
    /// Markdown after the front-matter block.
    #[serde(skip)]
    pub body: String,
    pub reading_minutes: u32,
    /// Key of the navigation node this document is reached through.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav_key: Option<String>,
}

/// Scan a content root using its own `config.toml`.
pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::MissingRoot(root.to_path_buf()));
    }
    let config = config::load_config(root)?;
    let discovery = Discovery::new(DiscoveryOptions {
        content_root: root.to_path_buf(),
        base_path: config.base_path.clone(),
    });
    scan_with(&discovery, config)
}

/// Scan with explicit discovery options and an already resolved config.
pub fn scan_with(discovery: &Discovery, config: SiteConfig) -> Result<Manifest, ScanError> {
    let wpm = config.reading.words_per_minute;

    let docs_section = config.sections.docs.as_str();
    let doc_files = discovery.list(docs_section)?;
    let docs_base = discovery.href_base(docs_section);
    let mut documents = load_documents(discovery, docs_section, &doc_files, wpm, false)?;

    let mut navigation = nav::build_tree(&doc_files, &config.sections.docs_title, &docs_base);
    for doc in &mut documents {
        // Merged nodes keep the key of whichever path created them, so the
        // href is what ties a document to its node.
        doc.nav_key = navigation.find_by_href(&doc.href).map(|n| n.key.clone());
        let Some(key) = &doc.nav_key else {
            log::warn!(
                "{docs_section}/{}: no navigation entry links to {}",
                doc.file.raw_path,
                doc.href
            );
            continue;
        };
        if !doc.front_matter.tags.is_empty()
            && !nav::attach_hints(&mut navigation, key, &doc.front_matter.tags)
        {
            log::warn!("{docs_section}/{}: tags not attached to navigation", doc.file.raw_path);
        }
    }

    let blogs_section = config.sections.blogs.as_str();
    let blog_files = discovery.list(blogs_section)?;
    let mut blogs = load_documents(discovery, blogs_section, &blog_files, wpm, true)?;
    sort_newest_first(&mut blogs);

    log::debug!(
        "scanned {} docs and {} blog posts under {}",
        documents.len(),
        blogs.len(),
        discovery.content_root().display()
    );

    Ok(Manifest {
        docs: DocsSection {
            documents,
            navigation,
        },
        blogs,
        config,
    })
}

fn load_documents(
    discovery: &Discovery,
    section: &str,
    files: &[ContentFile],
    words_per_minute: u32,
    skip_index: bool,
) -> Result<Vec<Document>, ScanError> {
    let dir = discovery.section_dir(section);
    let href_base = discovery.href_base(section);
    let mut seen: HashMap<String, &str> = HashMap::new();
    let mut documents = Vec::with_capacity(files.len());

    for file in files {
        if skip_index && file.is_index {
            log::warn!("{section}/{}: index files are not posts, skipping", file.raw_path);
            continue;
        }
        let slug = file.slug();
        if let Some(first) = seen.get(&slug) {
            log::warn!(
                "{section}/{} resolves to slug {slug:?} already used by {section}/{first}, skipping",
                file.raw_path
            );
            continue;
        }
        seen.insert(slug.clone(), &file.raw_path);
        documents.push(load_document(&dir, file, slug, &href_base, words_per_minute)?);
    }
    Ok(documents)
}

fn load_document(
    dir: &Path,
    file: &ContentFile,
    slug: String,
    href_base: &str,
    words_per_minute: u32,
) -> Result<Document, ScanError> {
    let content = fs::read_to_string(dir.join(&file.raw_path))?;
    let (front_matter, body) = metadata::parse_document(&content, &file.raw_path);
    let title = metadata::resolve_title(&front_matter, body);
    Ok(Document {
        href: nav::join_href(href_base, &slug),
        reading_minutes: markdown::reading_minutes(body, words_per_minute),
        body: body.to_string(),
        file: file.clone(),
        slug,
        title,
        front_matter,
        nav_key: None,
    })
}

/// Newest release date first; posts without a date keep discovery order at
/// the end.
pub fn sort_newest_first(posts: &mut [Document]) {
    posts.sort_by_key(|post| Reverse(post.front_matter.release_date));
}
