//! End-to-end builds of the fixture content directory.

use docsite::generate::generate;
use docsite::output;
use docsite::scan::{self, Discovery, DiscoveryOptions, ScanError, scan_with};
use docsite::sidebar::SidebarState;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content")
}

fn copy_dir(src: &Path, dst: &Path) {
    fs::create_dir_all(dst).unwrap();
    for entry in fs::read_dir(src).unwrap() {
        let entry = entry.unwrap();
        let target = dst.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }
}

fn content_copy() -> TempDir {
    let tmp = TempDir::new().unwrap();
    copy_dir(&fixtures(), tmp.path());
    tmp
}

fn read(path: PathBuf) -> String {
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("{}: {e}", path.display()))
}

#[test]
fn full_build_writes_navigable_site() {
    let content = content_copy();
    let out = TempDir::new().unwrap();

    let manifest = scan::scan(content.path()).unwrap();
    let report = generate(&manifest, content.path(), out.path()).unwrap();

    assert_eq!(report.pages.len(), 14);
    for page in &report.pages {
        assert!(out.path().join(page).is_file(), "missing {page}");
    }

    // Every sidebar link on a docs page points at a generated page.
    let page = read(out.path().join("docs/setup/install/index.html"));
    for href in [
        "/docs/intro",
        "/docs/setup",
        "/docs/setup/install",
        "/docs/setup/configure-server",
        "/docs/getting-started",
        "/docs/reference/protocol/packets",
        "/docs/reference/glossary",
    ] {
        assert!(page.contains(&format!(r#"href="{href}""#)), "sidebar lacks {href}");
        let file = out.path().join(href.trim_start_matches('/')).join("index.html");
        assert!(file.is_file(), "{href} has no page");
    }
    assert!(page.contains(r#"class="nav-link active" href="/docs/setup/install""#));
}

#[test]
fn blog_pages_follow_release_order() {
    let content = content_copy();
    let out = TempDir::new().unwrap();

    let manifest = scan::scan(content.path()).unwrap();
    generate(&manifest, content.path(), out.path()).unwrap();

    let listing = read(out.path().join("blogs/index.html"));
    let positions: Vec<usize> = [
        "Shipping the first zone server",
        "Roadmap for spring",
        "First steps",
        "Draft ideas",
    ]
    .iter()
    .map(|title| listing.find(title).unwrap_or_else(|| panic!("missing {title}")))
    .collect();
    let mut sorted = positions.clone();
    sorted.sort();
    assert_eq!(positions, sorted);

    assert!(out.path().join("blogs/draft-ideas/index.html").is_file());
}

#[test]
fn base_path_from_config_prefixes_every_link() {
    let content = content_copy();
    let out = TempDir::new().unwrap();
    let config = read(content.path().join("config.toml"));
    fs::write(
        content.path().join("config.toml"),
        format!("base_path = \"/mmo\"\n{config}"),
    )
    .unwrap();

    let manifest = scan::scan(content.path()).unwrap();
    generate(&manifest, content.path(), out.path()).unwrap();

    let home = read(out.path().join("index.html"));
    assert!(home.contains(r#"href="/mmo/style.css""#));
    assert!(home.contains(r#"href="/mmo/blogs/zone-server""#));
    let doc = read(out.path().join("docs/intro/index.html"));
    assert!(doc.contains(r#"href="/mmo/docs/setup/install""#));
    assert!(!doc.contains(r#"href="/docs/"#));
}

#[test]
fn explicit_discovery_options_override_config() {
    let content = content_copy();
    let config = docsite::config::load_config(content.path()).unwrap();
    let discovery = Discovery::new(DiscoveryOptions {
        content_root: content.path().to_path_buf(),
        base_path: "/preview".into(),
    });

    let manifest = scan_with(&discovery, config).unwrap();
    let intro = manifest.docs.find("intro").unwrap();
    assert_eq!(intro.href, "/preview/docs/intro");
    assert_eq!(
        manifest.docs.navigation.href.as_deref(),
        Some("/preview/docs")
    );
}

#[test]
fn resolve_slug_to_source_file() {
    let content = content_copy();
    let discovery = Discovery::new(DiscoveryOptions {
        content_root: content.path().to_path_buf(),
        base_path: String::new(),
    });

    let path = discovery.find_document("docs", "setup/install").unwrap();
    assert_eq!(path, content.path().join("docs/02_setup/01_install.md"));

    let landing = discovery.find_document("docs", "").unwrap();
    assert_eq!(landing, content.path().join("docs/index.md"));

    let err = discovery.find_document("docs", "nope").unwrap_err();
    assert!(matches!(err, ScanError::DocumentNotFound { .. }));
}

#[test]
fn missing_section_fails_the_build() {
    let content = content_copy();
    fs::remove_dir_all(content.path().join("blogs")).unwrap();
    let err = scan::scan(content.path()).unwrap_err();
    assert!(matches!(err, ScanError::MissingRoot(_)));
}

#[test]
fn cli_output_matches_build() {
    let content = content_copy();
    let out = TempDir::new().unwrap();

    let manifest = scan::scan(content.path()).unwrap();
    let report = generate(&manifest, content.path(), out.path()).unwrap();

    let lines = output::format_build_output(&manifest, &report);
    let summary = format!("Generated 14 pages in {}", out.path().display());
    assert_eq!(lines.last(), Some(&summary));

    let mut state = SidebarState::new();
    state.set_search("CARGO");
    let nav = output::format_nav_tree(&manifest.docs.navigation, &state);
    assert_eq!(
        nav,
        vec![
            "Documentation → /docs",
            "001 Setup → /docs/setup",
            "    001 Install → /docs/setup/install",
            "        Matches: cargo",
        ]
    );
}
