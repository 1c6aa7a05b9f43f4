use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use valkyrie_gallery::config::{self, GalleryConfig, Overrides};
use valkyrie_gallery::gallery::Gallery;
use valkyrie_gallery::loader::{self, AssetLoader, DeferredLoader, HttpLoader, ImageLoader};
use valkyrie_gallery::resolve::ImageResolver;
use valkyrie_gallery::source::{DataSource, fetch_items};
use valkyrie_gallery::{check, generate, output};

#[derive(Parser)]
#[command(name = "valkyrie-gallery")]
#[command(about = "Searchable character portrait gallery")]
#[command(long_about = "\
Searchable character portrait gallery

Reads a JSON list of characters and renders a gallery page with live search,
per-portrait image fallback and a lightbox viewer.

Data file:

  [
    { \"slug\": \"kiana\", \"en\": \"Kiana Kaslana\", \"zh\": \"琪亚娜\" },
    { \"slug\": \"mei\",   \"en\": \"Raiden Mei\" }
  ]

Portraits are looked up as <img_base><slug>.<ext>, trying webp, png, jpg,
jpeg and avif in that order, then falling back to the placeholder.

With --site-root, site-absolute URLs map onto that directory, so portraits
are resolved at build time:

  public/
  ├── data/characters.json
  └── assets/
      ├── placeholder.png
      └── hi3/characters/
          ├── kiana.webp
          └── mei.png

Without it, the page tries the candidates in the browser.

Run 'valkyrie-gallery gen-config' to generate a documented gallery.toml.")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

/// Flags shared by every command that loads the gallery.
#[derive(clap::Args)]
struct GlobalArgs {
    /// Config file
    #[arg(long, default_value = "gallery.toml", global = true)]
    config: PathBuf,

    /// Directory that site-absolute URLs (/data/…, /assets/…) map onto
    #[arg(long, global = true)]
    site_root: Option<PathBuf>,

    /// Data source URL or path (overrides data_url)
    #[arg(long, global = true)]
    data: Option<String>,

    /// Portrait URL prefix (overrides img_base)
    #[arg(long, global = true)]
    img_base: Option<String>,

    /// Download remote portraits to resolve them at build time
    #[arg(long, global = true)]
    fetch_images: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Render the gallery page
    Build {
        /// Output directory
        #[arg(long, default_value = "dist")]
        output: PathBuf,
    },
    /// List the items matching a query
    Search {
        /// Case- and whitespace-insensitive query
        query: String,
    },
    /// Open the lightbox on a card and show what it displays
    Show {
        /// Slug of the card to click
        slug: String,
    },
    /// Report unresolved portraits and unused images
    Check,
    /// Print a stock gallery.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let args = &cli.global;

    match cli.command {
        Command::Build { output: output_dir } => {
            let ctx = Context::new(args)?;
            println!("==> Loading {}", ctx.source.describe());
            let mut gallery = ctx.load_with_progress();

            println!("==> Rendering → {}", output_dir.display());
            let report = generate::generate(&mut gallery, &ctx.config, &output_dir)?;
            output::print_generate(&report, &output_dir);
        }
        Command::Search { query } => {
            let mut gallery = Context::new(args)?.load();
            let total = gallery.index().len();
            let cards = gallery.search(&query);
            output::print_search(&query, cards, total);
        }
        Command::Show { slug } => {
            let mut gallery = Context::new(args)?.load();
            if !gallery.click_slug(&slug) {
                return Err(format!("no card with slug '{slug}'").into());
            }
            output::print_lightbox(gallery.lightbox());
        }
        Command::Check => {
            let ctx = Context::new(args)?;
            println!("==> Checking {}", ctx.source.describe());
            let gallery = ctx.load_with_progress();
            let asset_dir = args
                .site_root
                .as_deref()
                .map(|root| loader::asset_dir(&ctx.config.img_base, root));
            let report = check::check(&gallery, asset_dir.as_deref());
            output::print_check(&report);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Resolved config plus the data source and loader it implies.
struct Context {
    config: GalleryConfig,
    source: DataSource,
    loader: Box<dyn ImageLoader>,
}

impl Context {
    fn new(args: &GlobalArgs) -> Result<Self, config::ConfigError> {
        let overrides = Overrides {
            data_url: args.data.clone(),
            img_base: args.img_base.clone(),
        };
        let config = config::load_config(&args.config, &overrides)?;
        let site_root = args.site_root.as_deref();
        let source = DataSource::locate(&config.data_url, site_root);
        let loader = select_loader(&config, site_root, args.fetch_images);
        Ok(Self {
            config,
            source,
            loader,
        })
    }

    fn resolver(&self) -> ImageResolver {
        ImageResolver::new(&self.config.img_base, &self.config.placeholder)
    }

    fn load(&self) -> Gallery {
        let (gallery, report) =
            Gallery::load(&self.source, self.resolver(), self.loader.as_ref(), None);
        output::print_fetch_report(&report);
        gallery
    }

    /// Load the gallery, printing each portrait's resolution as it settles.
    fn load_with_progress(&self) -> Gallery {
        let report = fetch_items(&self.source);
        output::print_fetch_report(&report);

        let (tx, rx) = std::sync::mpsc::channel();
        let printer = std::thread::spawn(move || {
            for event in rx {
                for line in output::format_resolve_event(&event) {
                    println!("{}", line);
                }
            }
        });
        let gallery = Gallery::from_items(
            report.items,
            self.resolver(),
            self.loader.as_ref(),
            Some(tx),
        );
        let _ = printer.join();
        gallery
    }
}

/// Pick how portraits are loaded at build time.
///
/// - remote `img_base`: downloaded with `--fetch-images`, otherwise left to the browser
/// - local `img_base` with `--site-root`: read from disk
/// - otherwise: left to the browser
fn select_loader(
    config: &GalleryConfig,
    site_root: Option<&Path>,
    fetch_images: bool,
) -> Box<dyn ImageLoader> {
    let remote = config.img_base.starts_with("http://") || config.img_base.starts_with("https://");
    match (remote, site_root) {
        (true, _) if fetch_images => Box::new(HttpLoader::new()),
        (true, _) => Box::new(DeferredLoader),
        (false, Some(root)) => Box::new(AssetLoader::new(&config.img_base, root)),
        (false, None) => Box::new(DeferredLoader),
    }
}
