use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::layout::{Breakpoints, LayoutAssignment};
use crate::measure::FontSpec;
use crate::sizing::core::SizingConfig;
use crate::sizing::frozen::parse_width_spec;

/// Row/cell spacing presets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Compact,
    Default,
    Spacious,
}

impl Default for Density {
    fn default() -> Self {
        Density::Default
    }
}

impl Density {
    /// Horizontal padding inside a rendered cell, in character cells
    pub fn cell_padding(&self) -> u16 {
        match self {
            Density::Compact => 0,
            Density::Default => 1,
            Density::Spacious => 2,
        }
    }

    /// Blank lines between cards/timeline entries
    pub fn row_gap(&self) -> u16 {
        match self {
            Density::Compact => 0,
            Density::Default => 1,
            Density::Spacious => 2,
        }
    }
}

/// Full on-disk configuration. Every field has a default so a partial
/// TOML file works.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sizing: SizingConfig,
    pub font: FontSpec,
    pub breakpoints: Breakpoints,
    pub layouts: LayoutAssignment,
    /// Columns pinned to the left edge under horizontal scroll
    pub frozen_columns: Vec<usize>,
    /// Explicit per-column width specs ("120px", "10rem", "96");
    /// positions past the end of the list have no explicit width
    pub column_widths: Vec<String>,
    pub density: Density,
    /// Cell length above which a column counts as long-content
    pub long_content_threshold: usize,
    pub theme: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sizing: SizingConfig::default(),
            font: FontSpec::default(),
            breakpoints: Breakpoints::default(),
            layouts: LayoutAssignment::default(),
            frozen_columns: vec![0],
            column_widths: Vec::new(),
            density: Density::Default,
            long_content_threshold: 50,
            theme: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Explicitly configured width for a column, if any
    pub fn explicit_width(&self, col: usize) -> Option<f64> {
        self.column_widths
            .get(col)
            .and_then(|spec| parse_width_spec(spec))
    }
}
