use clap::{Parser, Subcommand};
use docsite::config::{self, SiteConfig};
use docsite::scan::{self, Discovery, DiscoveryOptions, Manifest};
use docsite::sidebar::SidebarState;
use docsite::types::NavNode;
use docsite::{generate, nav, output};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "docsite")]
#[command(about = "Static site generator for project documentation and blogs")]
#[command(long_about = "\
Static site generator for project documentation and blogs

Your filesystem is the data source. Directories under docs/ become branches
of the navigation tree, files are ordered by numeric prefix, and markdown
files under blogs/ become dated posts.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── assets/                      # Static files → copied to <output>/assets/
  ├── docs/
  │   ├── index.md                 # Docs landing page (optional)
  │   ├── 01_intro.md              # → /docs/intro
  │   ├── 02_setup/
  │   │   ├── index.md             # → /docs/setup
  │   │   └── 01_install.md        # → /docs/setup/install
  │   └── 03_getting-started.md    # → /docs/getting-started
  └── blogs/
      └── zone-server.md           # → /blogs/zone-server

Front-matter (YAML, all optional):
  title, releasedate, description, coverImage, author, author_github, tags

Title resolution (first available wins):
  front-matter title → first '# ' heading → \"Untitled\"

Run 'docsite gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// URL prefix for generated links, overriding config.toml (e.g. /my-project)
    #[arg(long, global = true)]
    base_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the content directory and render the site
    Build,
    /// Validate the content directory without building
    Check {
        /// Print the scanned manifest as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the navigation tree of a section
    Nav {
        /// Section directory (defaults to the docs section)
        #[arg(long)]
        section: Option<String>,
        /// Show only entries matching this term, as the sidebar search does
        #[arg(long)]
        search: Option<String>,
        /// Print the tree as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the source file that produces a slug
    Resolve {
        /// Section directory, e.g. docs
        section: String,
        /// Document slug, e.g. setup/install
        slug: String,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match &cli.command {
        Command::Build => {
            println!("==> Scanning {}", cli.source.display());
            let manifest = scan_source(&cli)?;
            output::print_scan_output(&manifest, &cli.source);

            println!("==> Generating HTML → {}", cli.output.display());
            let report = generate::generate(&manifest, &cli.source, &cli.output)?;
            output::print_build_output(&manifest, &report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check { json } => {
            let manifest = scan_source(&cli)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&manifest)?);
            } else {
                println!("==> Checking {}", cli.source.display());
                output::print_scan_output(&manifest, &cli.source);
                println!("==> Content is valid");
            }
        }
        Command::Nav {
            section,
            search,
            json,
        } => {
            let manifest = scan_source(&cli)?;
            let root = section_tree(&cli, &manifest, section.as_deref())?;
            let mut state = SidebarState::new();
            if let Some(term) = search {
                state.set_search(term.as_str());
            }
            if *json {
                let filtered = NavNode {
                    children: state.filter(&root.children),
                    ..root
                };
                println!("{}", serde_json::to_string_pretty(&filtered)?);
            } else {
                output::print_nav_tree(&root, &state);
            }
        }
        Command::Resolve { section, slug } => {
            let config = load_site_config(&cli)?;
            let discovery = discovery_for(&cli.source, &config);
            let path = discovery.find_document(section, slug)?;
            println!("{}", path.display());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load `config.toml` from the source and apply the `--base-path` override.
fn load_site_config(cli: &Cli) -> Result<SiteConfig, Box<dyn std::error::Error>> {
    if !cli.source.is_dir() {
        return Err(scan::ScanError::MissingRoot(cli.source.clone()).into());
    }
    let mut site_config = config::load_config(&cli.source)?;
    if let Some(base_path) = &cli.base_path {
        site_config.base_path = base_path.clone();
        site_config.validate()?;
    }
    Ok(site_config)
}

fn discovery_for(source: &Path, site_config: &SiteConfig) -> Discovery {
    Discovery::new(DiscoveryOptions {
        content_root: source.to_path_buf(),
        base_path: site_config.base_path.clone(),
    })
}

fn scan_source(cli: &Cli) -> Result<Manifest, Box<dyn std::error::Error>> {
    let site_config = load_site_config(cli)?;
    let discovery = discovery_for(&cli.source, &site_config);
    Ok(scan::scan_with(&discovery, site_config)?)
}

/// Navigation tree for a section. The docs tree comes from the manifest so it
/// carries tag hints; any other section is built from its file listing.
fn section_tree(
    cli: &Cli,
    manifest: &Manifest,
    section: Option<&str>,
) -> Result<NavNode, Box<dyn std::error::Error>> {
    let sections = &manifest.config.sections;
    match section {
        None => Ok(manifest.docs.navigation.clone()),
        Some(name) if name == sections.docs => Ok(manifest.docs.navigation.clone()),
        Some(name) => {
            let discovery = discovery_for(&cli.source, &manifest.config);
            let files = discovery.list(name)?;
            let title = if name == sections.blogs {
                sections.blogs_title.as_str()
            } else {
                name
            };
            Ok(nav::build_tree(&files, title, &discovery.href_base(name)))
        }
    }
}
