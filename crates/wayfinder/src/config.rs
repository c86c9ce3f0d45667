// File: src/config.rs
// Purpose: Configuration parsing from wayfinder.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use wayfinder_router::{NoMatchPolicy, RouterOptions};
use wayfinder_view::{Delimiters, ViewConfig};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub routing: RoutingConfig,

    #[serde(default)]
    pub views: ViewsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Routing configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoutingConfig {
    /// Fallback path for empty and unmatched navigation (default: "/")
    #[serde(default = "default_route")]
    pub default_route: String,

    /// What happens when nothing matches (default: redirect)
    #[serde(default)]
    pub no_match: NoMatchPolicy,

    /// Whether literal segments compare case-insensitively (default: true)
    #[serde(default = "default_true")]
    pub case_insensitive: bool,

    /// Collapse duplicate and trailing slashes before matching
    #[serde(default = "default_false")]
    pub normalize_paths: bool,
}

/// View rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewsConfig {
    /// Base URL path for templates (default: "/views")
    #[serde(default = "default_view_location")]
    pub view_location: String,

    #[serde(default = "default_extension")]
    pub extension: String,

    /// Opening and closing placeholder delimiters
    #[serde(default = "default_delimiters")]
    pub delimiters: [String; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `trace`, `debug`, `info`, `warn` or `error`
    #[serde(default = "default_level")]
    pub level: String,
}

// Default values
fn default_route() -> String {
    "/".to_string()
}

fn default_view_location() -> String {
    "/views".to_string()
}

fn default_extension() -> String {
    "mst".to_string()
}

fn default_delimiters() -> [String; 2] {
    ["{{".to_string(), "}}".to_string()]
}

fn default_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            default_route: default_route(),
            no_match: NoMatchPolicy::default(),
            case_insensitive: true,
            normalize_paths: false,
        }
    }
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            view_location: default_view_location(),
            extension: default_extension(),
            delimiters: default_delimiters(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl RoutingConfig {
    pub fn to_options(&self) -> RouterOptions {
        RouterOptions::new()
            .with_default_route(self.default_route.clone())
            .with_no_match(self.no_match)
            .with_case_sensitivity(self.case_insensitive)
            .with_normalized_paths(self.normalize_paths)
    }
}

impl ViewsConfig {
    pub fn to_view_config(&self) -> ViewConfig {
        let [open, close] = &self.delimiters;
        ViewConfig {
            view_location: self.view_location.clone(),
            extension: self.extension.clone(),
            delimiters: Delimiters::new(open.clone(), close.clone()),
        }
    }
}

impl Config {
    /// Load configuration from wayfinder.toml
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        config
            .views
            .to_view_config()
            .delimiters
            .validate()
            .with_context(|| format!("Invalid [views] section in {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./wayfinder.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("wayfinder.toml")
    }
}
