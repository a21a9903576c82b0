//! Module configuration
//!
//! Parses the `[ui]` settings section the host passes at mount time, either
//! as an already-decoded JSON value or as a TOML file.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Display options for the streaming UI
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UiConfig {
    /// Show reasoning blocks (default: true)
    #[serde(default = "default_true")]
    pub show_thinking_stream: bool,
    /// Max lines of tool arguments/results to show (default: 5)
    #[serde(default = "default_show_tool_lines")]
    pub show_tool_lines: usize,
    /// Show token usage after each prompt (default: true)
    #[serde(default = "default_true")]
    pub show_token_usage: bool,
}

const fn default_true() -> bool {
    true
}

const fn default_show_tool_lines() -> usize {
    5
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_thinking_stream: true,
            show_tool_lines: default_show_tool_lines(),
            show_token_usage: true,
        }
    }
}

/// Top-level module configuration; only the `ui` section is read
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModuleConfig {
    /// UI settings section
    #[serde(default)]
    pub ui: UiConfig,
}

impl ModuleConfig {
    /// Decode configuration handed over by the host as JSON.
    ///
    /// `null` is accepted and yields the defaults.
    pub fn from_value(value: &Value) -> Result<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        Self::deserialize(value).context("Failed to parse streaming UI config")
    }

    /// Parse a TOML config file from a path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse TOML config content from a string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse streaming UI config")
    }
}
