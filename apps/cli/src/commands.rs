//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use thesaurus_client::{CatalogOptions, HttpCatalog};
use thesaurus_core::ThesaurusService;
use thesaurus_shared::{
    AppConfig, MatchMode, ServiceSettings, Term, ThesaurusError, init_config, load_config,
    load_config_from,
};
use tracing::{debug, info};

use crate::render::{self, OutputFormat};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Thesaurus: browse and search the environmental concept catalog.
#[derive(Parser)]
#[command(
    name = "thesaurus",
    version,
    about = "Look up, search and browse terms of the environmental concept catalog.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Result format: text (default) or json.
    #[arg(short, long, default_value = "text", global = true)]
    pub output: OutputFormat,

    /// Config file to use instead of ~/.thesaurus/thesaurus.toml.
    #[arg(long, global = true, env = "THESAURUS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Language of returned names (overrides config).
    #[arg(short, long, global = true)]
    pub lang: Option<String>,

    /// Also return names in this language (overrides config).
    #[arg(long, global = true)]
    pub alt_lang: Option<String>,

    /// Catalog base URL (overrides config).
    #[arg(long, global = true, env = "THESAURUS_URL")]
    pub url: Option<String>,

    /// Fetch single terms as RDF/XML.
    #[arg(long, global = true)]
    pub rdf: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Show a single term.
    Term {
        /// Term id (catalog URI).
        id: String,
    },

    /// Search terms by keyword.
    Search {
        /// Query; every word must occur in the name.
        query: String,

        /// Match mode: exact, begins-with, ends-with, contains or check-all.
        #[arg(short, long, default_value = "exact")]
        mode: MatchMode,
    },

    /// Find terms whose names contain all of the given words.
    Similar {
        /// Words to look for.
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Find terms mentioned in a piece of text.
    Text {
        /// Text to analyze.
        text: String,

        /// Number of words to analyze (capped by config).
        #[arg(long, default_value = "10")]
        max_words: usize,
    },

    /// Show the top-level entries.
    Top,

    /// Show the children of an entry (the top level without an id).
    Next {
        /// Parent id.
        id: Option<String>,
    },

    /// Show the path from an entry up to the top level.
    Path {
        /// Term id.
        id: String,
    },

    /// Show every neighbour of an entry.
    Related {
        /// Term id.
        id: String,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr so results on
/// stdout stay machine-readable.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "thesaurus=info",
        1 => "thesaurus=debug",
        _ => "thesaurus=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    // Init must work even when the existing file is broken
    if let Command::Config { action: ConfigAction::Init } = &cli.command {
        return cmd_config_init();
    }

    let config = resolve_config(&cli)?;
    if let Command::Config { action: ConfigAction::Show } = &cli.command {
        return cmd_config_show(&config);
    }

    let service = build_service(&config)?;

    let lang = cli.lang.as_deref();
    let out = cli.output;

    match cli.command {
        Command::Term { id } => {
            let term = found(service.term(&id, lang).await, &id)?;
            render::term(&term, out)
        }
        Command::Search { query, mode } => {
            let terms = service.find_terms_from_query(&query, mode, lang).await;
            info!(query, %mode, found = terms.len(), "search finished");
            render::terms(&terms, out)
        }
        Command::Similar { names } => {
            render::terms(&service.similar_terms(&names, lang).await, out)
        }
        Command::Text { text, max_words } => {
            render::terms(&service.terms_from_text(&text, max_words, lang).await, out)
        }
        Command::Top => render::tree(&service.top_level(lang).await, out),
        Command::Next { id } => render::tree(&service.next_level(id.as_deref(), lang).await, out),
        Command::Path { id } => render::path(&service.path_to_top(&id, lang).await, out),
        Command::Related { id } => render::related(&service.related_terms(&id, lang).await, out),
        Command::Config { .. } => Ok(()),
    }
}

/// Load the config file and apply CLI overrides on top.
fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    if let Some(lang) = &cli.lang {
        config.language.default = lang.clone();
    }
    if let Some(alt) = &cli.alt_lang {
        config.language.alternate = Some(alt.clone());
    }
    if let Some(url) = &cli.url {
        config.service.url = url.clone();
    }
    if cli.rdf {
        config.service.request_rdf = true;
    }

    debug!(url = %config.service.url, language = %config.language.default, "resolved config");
    Ok(config)
}

fn build_service(config: &AppConfig) -> Result<ThesaurusService<HttpCatalog>> {
    let catalog = HttpCatalog::new(&CatalogOptions::from(config))?;
    debug!(url = %catalog.base_url(), rdf = config.service.request_rdf, "catalog ready");
    Ok(ThesaurusService::new(catalog, ServiceSettings::from(config)))
}

/// A lookup that came back empty is reported as a missing entry.
fn found(term: Option<Term>, id: &str) -> std::result::Result<Term, ThesaurusError> {
    term.ok_or_else(|| ThesaurusError::not_found(id))
}

// ---------------------------------------------------------------------------
// Config handlers
// ---------------------------------------------------------------------------

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{toml_str}");
    Ok(())
}
