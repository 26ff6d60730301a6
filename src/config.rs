//! Configuration for audioshelf.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (AUDIOSHELF_HOME, AUDIOSHELF_CATALOG)
//! 2. Config file (.audioshelf/config.yaml)
//! 3. Defaults (~/.audioshelf)
//!
//! Config file discovery:
//! - Searches current directory and parents for .audioshelf/config.yaml
//! - `paths.home` is relative to the .audioshelf/ directory, `paths.catalog`
//!   to the project root (the directory containing .audioshelf/)
//!
//! Example:
//!
//! ```yaml
//! version: "1.0"
//! paths:
//!   catalog: site/catalog.csv
//! view:
//!   page_size: 50
//!   sort_field: author
//!   sort_direction: asc
//! series:
//!   mostly_complete_pct: 80
//!   in_progress_pct: 50
//! stats:
//!   top_n: 15
//! ```

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::stats::DEFAULT_TOP_N;
use crate::core::CompletionThresholds;
use crate::domain::{PageSize, SortConfig, SortDirection, SortField, ViewMode};
use crate::library::ViewPreferences;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

const CONFIG_DIR: &str = ".audioshelf";
const CONFIG_FILE: &str = "config.yaml";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub view: Option<ViewConfig>,
    #[serde(default)]
    pub series: Option<CompletionThresholds>,
    #[serde(default)]
    pub stats: Option<StatsConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// State directory (preferences), relative to .audioshelf/
    pub home: Option<String>,
    /// Catalog CSV, relative to the project root
    pub catalog: Option<String>,
}

/// Listing defaults; kept as strings so invalid values can be reported precisely
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewConfig {
    pub page_size: Option<serde_yaml::Value>,
    pub sort_field: Option<String>,
    pub sort_direction: Option<String>,
    pub view_mode: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatsConfig {
    pub top_n: Option<usize>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// State directory
    pub home: PathBuf,
    /// Catalog CSV to load
    pub catalog: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Listing defaults before stored preferences are applied
    pub view: ViewPreferences,
    /// Series status cut-offs
    pub series: CompletionThresholds,
    /// Length of top-N lists
    pub top_n: usize,
}

impl ResolvedConfig {
    /// Preferences file ($AUDIOSHELF_HOME/preferences.json)
    pub fn preferences_path(&self) -> PathBuf {
        self.home.join("preferences.json")
    }
}

/// Values taken from the environment
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub home: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            home: std::env::var("AUDIOSHELF_HOME").ok().map(PathBuf::from),
            catalog: std::env::var("AUDIOSHELF_CATALOG").ok().map(PathBuf::from),
        }
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(CONFIG_DIR).join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's parent
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Apply the `view:` section on top of the built-in defaults
fn resolve_view(view: Option<&ViewConfig>) -> Result<ViewPreferences> {
    let mut prefs = ViewPreferences::default();
    let Some(view) = view else {
        return Ok(prefs);
    };

    if let Some(raw) = &view.page_size {
        let text = match raw {
            serde_yaml::Value::String(s) => s.clone(),
            serde_yaml::Value::Number(n) => n.to_string(),
            other => format!("{:?}", other),
        };
        prefs.page_size = text
            .parse::<PageSize>()
            .context("Invalid view.page_size in config file")?;
    }

    let field = match &view.sort_field {
        Some(raw) => raw
            .parse::<SortField>()
            .context("Invalid view.sort_field in config file")?,
        None => prefs.sort.field,
    };
    let direction = match &view.sort_direction {
        Some(raw) => raw
            .parse::<SortDirection>()
            .context("Invalid view.sort_direction in config file")?,
        None => prefs.sort.direction,
    };
    prefs.sort = SortConfig::new(field, direction);

    if let Some(raw) = &view.view_mode {
        prefs.view_mode = raw
            .parse::<ViewMode>()
            .context("Invalid view.view_mode in config file")?;
    }

    Ok(prefs)
}

/// Combine an optional config file with environment overrides
pub fn resolve_config(config_file: Option<PathBuf>, env: &EnvOverrides) -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(CONFIG_DIR);

    let parsed = match &config_file {
        Some(path) => Some(load_config_file(path)?),
        None => None,
    };

    let (home, catalog) = match (&config_file, &parsed) {
        (Some(config_path), Some(config)) => {
            // .audioshelf/ and the project root above it
            let shelf_dir = config_path.parent().unwrap_or(Path::new("."));
            let base_dir = shelf_dir.parent().unwrap_or(Path::new("."));

            let home = if let Some(env_home) = &env.home {
                env_home.clone()
            } else if let Some(ref home_path) = config.paths.home {
                resolve_path(shelf_dir, home_path)
            } else {
                default_home.clone()
            };

            let catalog = if let Some(env_catalog) = &env.catalog {
                env_catalog.clone()
            } else if let Some(ref catalog_path) = config.paths.catalog {
                resolve_path(base_dir, catalog_path)
            } else {
                home.join("catalog.csv")
            };

            (home, catalog)
        }
        _ => {
            let home = env.home.clone().unwrap_or_else(|| default_home.clone());
            let catalog = env
                .catalog
                .clone()
                .unwrap_or_else(|| home.join("catalog.csv"));
            (home, catalog)
        }
    };

    let view = resolve_view(parsed.as_ref().and_then(|c| c.view.as_ref()))?;

    let series = parsed
        .as_ref()
        .and_then(|c| c.series)
        .unwrap_or_default();
    series
        .validate()
        .context("Invalid series thresholds in config file")?;

    let top_n = parsed
        .as_ref()
        .and_then(|c| c.stats.as_ref())
        .and_then(|s| s.top_n)
        .unwrap_or(DEFAULT_TOP_N);

    Ok(ResolvedConfig {
        home,
        catalog,
        config_file,
        view,
        series,
        top_n,
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    resolve_config(find_config_file(), &EnvOverrides::from_env())
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}
