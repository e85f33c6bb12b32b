use astro_gallery::assets::{AssetMode, AssetResolver};
use astro_gallery::collection::Collection;
use astro_gallery::config::{self, GalleryConfig};
use astro_gallery::gallery::Gallery;
use astro_gallery::record::{self, RecordDraft};
use astro_gallery::sort::SortCriterion;
use astro_gallery::thumbnails::{self, ThumbnailOptions};
use astro_gallery::types::{FilterLabel, ObjectType};
use astro_gallery::viewer::ViewerInput;
use astro_gallery::{logging, output};
use clap::{Parser, Subcommand};
use std::io::BufRead;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "astro-gallery")]
#[command(about = "Browse and maintain an astrophotography gallery")]
#[command(long_about = "\
Browse and maintain an astrophotography gallery

The gallery is a static JSON collection of photo records plus a directory of
images. Records are listed in one of four orders (date, name, integration time,
equipment) and opened one at a time in a viewer.

Gallery layout:

  gallery/
  ├── config.toml              # Optional, see 'astro-gallery gen-config'
  ├── data/
  │   └── photos.json          # { \"photos\": [ ...records ] }
  └── images/
      ├── m31.jpg              # Full-size images
      └── thumbnails/
          └── m31.jpg          # Same name, 400px wide ('astro-gallery thumbnails')

Diagnostics go to stderr; set ASTRO_GALLERY_LOG=debug for more detail.")]
#[command(version)]
struct Cli {
    /// Gallery root directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Config file (defaults to <root>/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Sort option shared by the browsing commands.
#[derive(clap::Args, Clone)]
struct SortArgs {
    /// date, name, integrationTime or equipment
    #[arg(long, default_value_t = SortCriterion::Date)]
    sort: SortCriterion,
}

#[derive(Subcommand)]
enum Command {
    /// List the gallery in display order
    List(SortArgs),
    /// Show one photo (1-based position) as the viewer displays it
    Show {
        position: usize,
        #[command(flatten)]
        sort: SortArgs,
    },
    /// Browse interactively: right/left/escape, a number, or 'sort <criterion>'
    Browse {
        #[command(flatten)]
        sort: SortArgs,
        /// Open this photo (1-based) right away
        #[arg(long)]
        start: Option<usize>,
    },
    /// Print a new photo record as JSON for pasting into the collection
    NewRecord(NewRecordArgs),
    /// Generate missing thumbnails
    Thumbnails {
        /// Source image directory (overrides config)
        #[arg(long)]
        source: Option<PathBuf>,
        /// Thumbnail directory (overrides config)
        #[arg(long)]
        dest: Option<PathBuf>,
        /// Thumbnail width in pixels (overrides config)
        #[arg(long)]
        width: Option<u32>,
    },
    /// Validate config and collection without changing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Resolve an image path for the configured (or given) asset mode
    AssetPath {
        path: String,
        #[arg(long)]
        mode: Option<AssetMode>,
    },
}

#[derive(clap::Args)]
struct NewRecordArgs {
    /// Catalogue name, also used as the title
    #[arg(long)]
    object_name: String,
    /// Image file name under images/
    #[arg(long)]
    file_name: String,
    /// Thumbnail file name, when it differs from the image's
    #[arg(long)]
    thumbnail: Option<String>,
    /// Capture date, YYYY-MM-DD (defaults to today)
    #[arg(long, default_value = "")]
    date: String,
    /// DSO, Planetary, Lunar, Solar or Other
    #[arg(long = "type")]
    object_type: Option<ObjectType>,
    #[arg(long)]
    telescope: Option<String>,
    #[arg(long)]
    camera: Option<String>,
    #[arg(long)]
    mount: Option<String>,
    /// Filter label to toggle (repeatable)
    #[arg(long = "filter")]
    filters: Vec<FilterLabel>,
    /// Exposure entry BAND=COUNTxSECONDS, e.g. Ha=30x300 (repeatable)
    #[arg(long = "integration")]
    integrations: Vec<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(if cli.verbose {
        "info"
    } else {
        logging::DEFAULT_DIRECTIVES
    })?;

    match cli.command {
        Command::List(args) => {
            let config = load_config(&cli.root, cli.config.as_deref())?;
            let gallery = load_gallery(&cli.root, &config, args.sort)?;
            output::print_gallery_listing(&gallery, &AssetResolver::from_config(&config.assets));
        }
        Command::Show { position, sort } => {
            let config = load_config(&cli.root, cli.config.as_deref())?;
            let mut gallery = load_gallery(&cli.root, &config, sort.sort)?;
            gallery.open(position_to_index(position)?)?;
            output::print_viewer(&gallery, &AssetResolver::from_config(&config.assets));
        }
        Command::Browse { sort, start } => {
            let config = load_config(&cli.root, cli.config.as_deref())?;
            let mut gallery = load_gallery(&cli.root, &config, sort.sort)?;
            let resolver = AssetResolver::from_config(&config.assets);
            browse(&mut gallery, &resolver, start, std::io::stdin().lock())?;
        }
        Command::NewRecord(args) => {
            let config = load_config(&cli.root, cli.config.as_deref())?;
            let draft = draft_from_args(args)?;
            let now = chrono::Utc::now();
            let built =
                draft.build(record::new_record_id(now), now.date_naive(), &config.equipment);
            println!("{}", record::to_json(&built)?);
        }
        Command::Thumbnails {
            source,
            dest,
            width,
        } => {
            let config = load_config(&cli.root, cli.config.as_deref())?;
            init_thread_pool(&config.processing);
            let mut options = ThumbnailOptions::from_config(&config, &cli.root);
            if let Some(source) = source {
                options.thumbnail_dir = config.thumbnail_dir(&source);
                options.source_dir = source;
            }
            if let Some(dest) = dest {
                options.thumbnail_dir = dest;
            }
            if let Some(width) = width {
                if width == 0 {
                    return Err("--width must be non-zero".into());
                }
                options.thumbnail.width = width;
            }

            let report = thumbnails::generate_thumbnails(&options)?;
            output::print_thumbnail_report(&report, &options.thumbnail_dir);
            if report.failed() > 0 {
                return Err(format!("{} thumbnail(s) failed", report.failed()).into());
            }
        }
        Command::Check => {
            let config = load_config(&cli.root, cli.config.as_deref())?;
            let path = config.collection_path(&cli.root);
            let collection = Collection::load(&path)?;
            let warnings = collection.check();
            output::print_check_output(&collection, &path, &warnings);
            println!("==> Config is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::AssetPath { path, mode } => {
            let config = load_config(&cli.root, cli.config.as_deref())?;
            let resolver = AssetResolver::new(
                mode.unwrap_or(config.assets.mode),
                config.assets.base_path.clone(),
            );
            tracing::info!(mode = %resolver.mode(), "resolving asset path");
            println!("{}", resolver.resolve(&path));
        }
    }

    Ok(())
}

/// Load the gallery config; an explicitly named file must exist.
fn load_config(
    root: &Path,
    explicit: Option<&Path>,
) -> Result<GalleryConfig, Box<dyn std::error::Error>> {
    match explicit {
        Some(path) if !path.exists() => {
            Err(format!("config file not found: {}", path.display()).into())
        }
        Some(path) => Ok(config::load_config_file(path)?),
        None => Ok(config::load_config(root)?),
    }
}

fn load_gallery(
    root: &Path,
    config: &GalleryConfig,
    criterion: SortCriterion,
) -> Result<Gallery, Box<dyn std::error::Error>> {
    let collection = Collection::load(&config.collection_path(root))?;
    Ok(Gallery::with_criterion(collection, criterion))
}

/// Positions on the command line are 1-based.
fn position_to_index(position: usize) -> Result<usize, String> {
    position
        .checked_sub(1)
        .ok_or_else(|| "photo positions start at 1".to_string())
}

fn draft_from_args(args: NewRecordArgs) -> Result<RecordDraft, record::RecordError> {
    let mut draft = RecordDraft::new();
    draft.object_name = args.object_name;
    draft.file_name = args.file_name;
    draft.thumbnail_file_name = args.thumbnail;
    draft.date = args.date;
    draft.object_type = args.object_type;
    draft.telescope = args.telescope;
    draft.camera = args.camera;
    draft.mount = args.mount;
    for label in args.filters {
        draft.toggle_filter(label);
    }
    for entry in &args.integrations {
        draft.add_integration_entry(entry)?;
    }
    Ok(draft)
}

/// One line of input in `browse`.
#[derive(Debug, Clone, PartialEq, Eq)]
enum BrowseCommand {
    Input(ViewerInput),
    /// 1-based position: opens the viewer, or jumps when already open.
    Go(usize),
    Sort(SortCriterion),
    List,
    Quit,
}

fn parse_browse_command(line: &str) -> Result<BrowseCommand, String> {
    let line = line.trim();
    if let Some(input) = ViewerInput::from_key(line) {
        return Ok(BrowseCommand::Input(input));
    }
    if let Ok(position) = line.parse::<usize>() {
        return Ok(BrowseCommand::Go(position));
    }
    if let Some(name) = line.strip_prefix("sort ") {
        return SortCriterion::from_name(name)
            .map(BrowseCommand::Sort)
            .ok_or_else(|| format!("unknown sort criterion: {}", name.trim()));
    }
    match line.to_ascii_lowercase().as_str() {
        "right" | "next" | "n" | ">" => Ok(BrowseCommand::Input(ViewerInput::Forward)),
        "left" | "prev" | "p" | "<" => Ok(BrowseCommand::Input(ViewerInput::Backward)),
        "escape" | "esc" | "close" => Ok(BrowseCommand::Input(ViewerInput::Escape)),
        "list" | "ls" => Ok(BrowseCommand::List),
        "quit" | "exit" | "q" => Ok(BrowseCommand::Quit),
        _ => Err(format!("unrecognized command: {line}")),
    }
}

fn browse(
    gallery: &mut Gallery,
    resolver: &AssetResolver,
    start: Option<usize>,
    input: impl BufRead,
) -> Result<(), Box<dyn std::error::Error>> {
    match start {
        Some(position) => {
            gallery.open(position_to_index(position)?)?;
            output::print_viewer(gallery, resolver);
        }
        None => output::print_gallery_listing(gallery, resolver),
    }

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match parse_browse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match command {
            BrowseCommand::Input(input) => {
                let transition = gallery.handle_input(input);
                match output::format_transition(transition) {
                    Some(status) => println!("{status}"),
                    None => output::print_viewer(gallery, resolver),
                }
            }
            BrowseCommand::Go(position) => {
                let result = position_to_index(position).and_then(|index| {
                    let moved = if gallery.viewer().is_open() {
                        gallery.jump(index).map(|_| ())
                    } else {
                        gallery.open(index)
                    };
                    moved.map_err(|e| e.to_string())
                });
                match result {
                    Ok(()) => output::print_viewer(gallery, resolver),
                    Err(message) => println!("{message}"),
                }
            }
            BrowseCommand::Sort(criterion) => {
                gallery.select_criterion(criterion);
                if gallery.viewer().is_open() {
                    output::print_viewer(gallery, resolver);
                } else {
                    output::print_gallery_listing(gallery, resolver);
                }
            }
            BrowseCommand::List => output::print_gallery_listing(gallery, resolver),
            BrowseCommand::Quit => break,
        }
    }
    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; the user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
