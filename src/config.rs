// src/config.rs

//! Defines the configuration structures for a console and the tables drawn on it.
//!
//! All structs can be deserialized from JSON and fall back to defaults for
//! any missing field. Configuration is always handed to
//! [`Console::with_config`](crate::console::Console::with_config) explicitly;
//! nothing is read from the environment or from disk by the library.

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::color::{Background, Foreground};

/// Represents the complete configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Glyphs used when drawing tables.
    pub appearance: AppearanceConfig,
    /// Default colors for table cells and separators.
    pub colors: ColorScheme,
    /// Console behavior.
    pub console: ConsoleConfig,
}

impl Config {
    /// Parses a JSON document. Missing sections and fields take their defaults.
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Failed to parse console configuration")
    }
}

// --- Appearance Configuration ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Glyph drawn in separator columns between table columns.
    pub separator_glyph: char,
    /// Glyph repeated three times at the end of an overflowing cell.
    pub ellipsis_glyph: char,
    /// Glyph used to pad content and blank cells.
    pub fill_glyph: char,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        AppearanceConfig {
            separator_glyph: '|',
            ellipsis_glyph: '.',
            fill_glyph: ' ',
        }
    }
}

// --- Color Scheme Configuration ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorScheme {
    /// Foreground of blank and newly created table cells.
    pub table_foreground: Foreground,
    /// Background of blank and newly created table cells.
    pub table_background: Background,
    pub separator_foreground: Foreground,
    pub separator_background: Background,
}

impl Default for ColorScheme {
    fn default() -> Self {
        ColorScheme {
            table_foreground: Foreground::BRIGHT_WHITE,
            table_background: Background::BLACK,
            separator_foreground: Foreground::BRIGHT_WHITE,
            separator_background: Background::BLACK,
        }
    }
}

// --- Console Configuration ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Hide the terminal cursor once the console is created.
    pub hide_cursor: bool,
    /// Width reported by the tty backend when the kernel reports zero columns.
    pub fallback_cols: u16,
    /// Height reported by the tty backend when the kernel reports zero rows.
    pub fallback_rows: u16,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        ConsoleConfig {
            hide_cursor: true,
            fallback_cols: 80,
            fallback_rows: 24,
        }
    }
}
