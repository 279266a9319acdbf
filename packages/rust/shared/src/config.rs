//! Application configuration for the thesaurus service.
//!
//! User config lives at `~/.thesaurus/thesaurus.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ThesaurusError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "thesaurus.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".thesaurus";

// ---------------------------------------------------------------------------
// Config structs (matching thesaurus.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Catalog service settings.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Keyword search settings.
    #[serde(default)]
    pub search: SearchConfig,

    /// Language settings.
    #[serde(default)]
    pub language: LanguageConfig,
}

/// `[service]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the catalog REST API.
    #[serde(default = "default_service_url")]
    pub url: String,

    /// Fetch single terms as RDF/XML (true) or JSON (false).
    #[serde(default)]
    pub request_rdf: bool,

    /// HTTP request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            url: default_service_url(),
            request_rdf: false,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_service_url() -> String {
    "https://www.eionet.europa.eu/gemet/".into()
}
fn default_timeout_secs() -> u64 {
    30
}

/// `[search]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum number of words analyzed from a query or free text.
    #[serde(default = "default_analyze_max_words")]
    pub analyze_max_words: usize,

    /// Always search with `Contains`, whatever mode the caller asked for.
    #[serde(default)]
    pub ignore_passed_matching_type: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            analyze_max_words: default_analyze_max_words(),
            ignore_passed_matching_type: false,
        }
    }
}

fn default_analyze_max_words() -> usize {
    10
}

/// `[language]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageConfig {
    /// Language used when the caller passes none.
    #[serde(default = "default_language")]
    pub default: String,

    /// Also deliver names in this language. Empty means none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate: Option<String>,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            default: default_language(),
            alternate: None,
        }
    }
}

fn default_language() -> String {
    "de".into()
}

// ---------------------------------------------------------------------------
// Service settings (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Which representation single-term lookups request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordFormat {
    #[default]
    Json,
    Rdf,
}

/// Immutable runtime settings threaded through every service call.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// Language used when the caller passes none.
    pub default_language: String,
    /// Alternate language for `alternate_name`, if any.
    pub alternate_language: Option<String>,
    /// Force `Contains` for query-term searches.
    pub force_contains: bool,
    /// Upper bound on analyzed words.
    pub analyze_max_words: usize,
    /// Representation for single-term lookups.
    pub record_format: RecordFormat,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for ServiceSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            default_language: config.language.default.clone(),
            alternate_language: config
                .language
                .alternate
                .as_deref()
                .map(str::trim)
                .filter(|lang| !lang.is_empty())
                .map(str::to_string),
            force_contains: config.search.ignore_passed_matching_type,
            analyze_max_words: config.search.analyze_max_words,
            record_format: if config.service.request_rdf {
                RecordFormat::Rdf
            } else {
                RecordFormat::Json
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.thesaurus/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ThesaurusError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.thesaurus/thesaurus.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ThesaurusError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        ThesaurusError::config(format!("failed to parse {}: {e}", path.display()))
    })?;

    validate(&config)?;
    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| ThesaurusError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| ThesaurusError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ThesaurusError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Reject values no service call could work with.
fn validate(config: &AppConfig) -> Result<()> {
    if config.service.url.trim().is_empty() {
        return Err(ThesaurusError::config("service.url must not be empty"));
    }
    if config.language.default.trim().is_empty() {
        return Err(ThesaurusError::config("language.default must not be empty"));
    }
    if config.search.analyze_max_words == 0 {
        return Err(ThesaurusError::config(
            "search.analyze_max_words must be at least 1",
        ));
    }
    Ok(())
}
