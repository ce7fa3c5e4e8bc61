//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.listnav/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListNavConfig {
    #[serde(default)]
    pub navigator: NavigatorSection,
    #[serde(default)]
    pub dropdown: DropdownSection,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NavigatorSection {
    pub item_role: Option<String>,
    pub scroll_on_highlight: Option<bool>,
    pub focus_on_navigation: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DropdownSection {
    pub title: Option<String>,
    pub max_visible: Option<u16>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_ITEM_ROLE: &str = "option";
pub const DEFAULT_TITLE: &str = "Select";
pub const DEFAULT_MAX_VISIBLE: u16 = 12;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

/// Behavior switches for a [`crate::core::navigator::Navigator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigatorConfig {
    /// Rows with this role count as list items.
    pub item_role: String,
    pub scroll_on_highlight: bool,
    pub focus_on_navigation: bool,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            item_role: DEFAULT_ITEM_ROLE.to_string(),
            scroll_on_highlight: true,
            focus_on_navigation: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub navigator: NavigatorConfig,
    pub title: String,
    pub max_visible: u16,
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub item_role: Option<String>,
    pub scroll_on_highlight: Option<bool>,
    pub focus_on_navigation: Option<bool>,
    pub title: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.listnav/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".listnav").join("config.toml"))
}

/// Load config from `~/.listnav/config.toml`.
pub fn load_config() -> Result<ListNavConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ListNavConfig::default());
        }
    };
    load_config_from(&path)
}

/// Load config from an explicit path.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ListNavConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config_from(path: &Path) -> Result<ListNavConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(ListNavConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ListNavConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# listnav configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [navigator]
# item_role = "option"            # Or set LISTNAV_ITEM_ROLE
# scroll_on_highlight = true      # Or set LISTNAV_SCROLL
# focus_on_navigation = false     # Or set LISTNAV_FOCUS

# [dropdown]
# title = "Select"
# max_visible = 12
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ListNavConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

fn resolve_with_env(
    config: &ListNavConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    let defaults = NavigatorConfig::default();

    // Item role: CLI → env → config → default
    let item_role = cli
        .item_role
        .clone()
        .or_else(|| env("LISTNAV_ITEM_ROLE"))
        .or_else(|| config.navigator.item_role.clone())
        .unwrap_or(defaults.item_role);

    let scroll_on_highlight = cli
        .scroll_on_highlight
        .or_else(|| env_flag(&env, "LISTNAV_SCROLL"))
        .or(config.navigator.scroll_on_highlight)
        .unwrap_or(defaults.scroll_on_highlight);

    let focus_on_navigation = cli
        .focus_on_navigation
        .or_else(|| env_flag(&env, "LISTNAV_FOCUS"))
        .or(config.navigator.focus_on_navigation)
        .unwrap_or(defaults.focus_on_navigation);

    ResolvedConfig {
        navigator: NavigatorConfig {
            item_role,
            scroll_on_highlight,
            focus_on_navigation,
        },
        title: cli
            .title
            .clone()
            .or_else(|| config.dropdown.title.clone())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        max_visible: config
            .dropdown
            .max_visible
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_VISIBLE),
    }
}

/// Parse a boolean env var. Unrecognized values are ignored with a warning.
fn env_flag(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    let raw = env(key)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            warn!("Ignoring {key}={raw:?}: expected true/false");
            None
        }
    }
}
