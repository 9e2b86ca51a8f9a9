use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use lantern_search::config::{find_config_file, load_config, load_from_env, Config, LogFormat};
use lantern_search::models::{FilterCriteria, SearchRequest, SearchResponse, SortDirection, SortField};
use lantern_search::search::CatalogSearch;
use lantern_search::sources::MediaFormats;
use lantern_search::utils::{
    format_page_summary, is_terminal, render_providers_table, render_results_table,
    terminal_width,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Lantern Search - find films across the VHS, DVD and Projector catalogs
#[derive(Parser, Debug)]
#[command(name = "lantern-search")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search film availability across VHS, DVD and projector catalogs", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (-v for debug, -vv for trace)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Table on a terminal, JSON otherwise
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
}

/// Catalog provider formats
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Vhs,
    Dvd,
    Projector,
}

impl From<Format> for MediaFormats {
    fn from(format: Format) -> Self {
        match format {
            Format::Vhs => MediaFormats::VHS,
            Format::Dvd => MediaFormats::DVD,
            Format::Projector => MediaFormats::PROJECTOR,
        }
    }
}

/// Sort field for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum SortKey {
    Title,
    ReleaseYear,
}

/// Sort order
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Order {
    Asc,
    Desc,
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Title filter
    #[arg(long, short)]
    title: Option<String>,

    /// Release year filter
    #[arg(long, short)]
    year: Option<i32>,

    /// Director filter
    #[arg(long, short)]
    director: Option<String>,

    /// Distributor filter
    #[arg(long)]
    distributor: Option<String>,

    /// Skip a provider (repeatable)
    #[arg(long, short = 'x', value_enum)]
    exclude: Vec<Format>,

    /// Page to return (1-based)
    #[arg(long, short, default_value_t = 1, allow_negative_numbers = true)]
    page: i64,

    /// Results per page
    #[arg(long, short = 's', default_value_t = 10, allow_negative_numbers = true)]
    page_size: i64,

    /// Sort field
    #[arg(long, value_enum, default_value_t = SortKey::Title)]
    sort_by: SortKey,

    /// Sort order
    #[arg(long, value_enum, default_value_t = Order::Asc)]
    order: Order,

    /// Read a JSON search request from a file ("-" for stdin) instead of flags
    #[arg(long, short, conflicts_with_all = ["title", "year", "director", "distributor", "exclude"])]
    request: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search all catalogs
    #[command(alias = "s")]
    Search(SearchArgs),

    /// List configured providers
    Providers,

    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,

    /// Write a configuration file with default values
    Init {
        /// Where to write the file
        #[arg(long, default_value = "lantern-search.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn build_request(args: &SearchArgs) -> Result<SearchRequest> {
    if let Some(path) = &args.request {
        let json = read_request_source(path)?;
        return SearchRequest::from_json(&json).context("Invalid search request");
    }

    let mut criteria = FilterCriteria::new();
    criteria.title = args.title.clone();
    criteria.release_year = args.year;
    criteria.director = args.director.clone();
    criteria.distributor = args.distributor.clone();

    let excluded = args
        .exclude
        .iter()
        .fold(MediaFormats::empty(), |acc, f| acc | MediaFormats::from(*f));

    let field = match args.sort_by {
        SortKey::Title => SortField::Title,
        SortKey::ReleaseYear => SortField::ReleaseYear,
    };
    let direction = match args.order {
        Order::Asc => SortDirection::Asc,
        Order::Desc => SortDirection::Desc,
    };

    Ok(SearchRequest::new(criteria)
        .page(args.page, args.page_size)
        .sort(field, direction)
        .exclude(excluded))
}

fn read_request_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut json = String::new();
        std::io::stdin()
            .read_to_string(&mut json)
            .context("Failed to read search request from stdin")?;
        return Ok(json);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read search request from {}", path.display()))
}

fn resolve_config(path: Option<&Path>) -> Result<(Config, Option<PathBuf>)> {
    let path = path.map(Path::to_path_buf).or_else(find_config_file);
    let config = match &path {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => load_from_env().context("Failed to load config from environment")?,
    };
    Ok((config, path))
}

fn init_tracing(cli: &Cli, config: &Config) {
    let level = if cli.quiet {
        "error".to_string()
    } else {
        match cli.verbose {
            0 => config.logging.level.clone(),
            1 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("lantern_search={}", level)));

    let registry = tracing_subscriber::registry().with(filter);
    match config.logging.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

fn output_response(response: &SearchResponse, format: OutputFormat) -> Result<()> {
    let format = match format {
        OutputFormat::Auto if is_terminal() => OutputFormat::Table,
        OutputFormat::Auto => OutputFormat::Json,
        other => other,
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(response)?);
        }
        _ => {
            if !response.results.is_empty() {
                println!("{}", render_results_table(response, terminal_width()));
            }
            println!("{}", format_page_summary(response));
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, config_path) = resolve_config(cli.config.as_deref())?;
    init_tracing(&cli, &config);

    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }

    match &cli.command {
        Commands::Search(args) => {
            let request = build_request(args)?;
            let search = CatalogSearch::from_config(&config).context("Failed to set up providers")?;
            let response = search.search(&request).await?;
            output_response(&response, cli.output)?;
        }

        Commands::Providers => match cli.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config.providers)?),
            _ => println!("{}", render_providers_table(&config.providers)),
        },

        Commands::Config { action } => match action {
            ConfigAction::Show => print!("{}", config.to_toml()?),
            ConfigAction::Init { path, force } => {
                if path.exists() && !force {
                    anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
                }
                Config::default().save(path)?;
                if !cli.quiet {
                    eprintln!("Wrote default configuration to {}", path.display());
                }
            }
        },
    }

    Ok(())
}
