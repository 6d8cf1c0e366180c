//! Viewer configuration, persisted as JSON in localStorage.

use serde::{Deserialize, Serialize};
use wasm_bindgen::{JsCast, JsValue};

use crate::state::touch::GestureAxis;
use crate::spring::SpringConfig;

pub const STORAGE_KEY: &str = "liquid_text_config";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("localStorage is unavailable")]
    Unavailable,
    #[error("config storage error: {0}")]
    Storage(String),
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Classic,
    Sunset,
    Ocean,
    Midnight,
}

/// Colours for one theme. Backgrounds are full CSS values so gradients work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub page_background: &'static str,
    pub panel_background: &'static str,
    pub text: &'static str,
    pub muted: &'static str,
    pub accent: &'static str,
    pub secondary: &'static str,
    pub track: &'static str,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Classic, Theme::Sunset, Theme::Ocean, Theme::Midnight];

    pub fn label(self) -> &'static str {
        match self {
            Theme::Classic => "Classic",
            Theme::Sunset => "Sunset",
            Theme::Ocean => "Ocean",
            Theme::Midnight => "Midnight",
        }
    }

    pub fn from_label(label: &str) -> Option<Theme> {
        Theme::ALL.into_iter().find(|t| t.label() == label)
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Classic => Palette {
                page_background: "#f3f4f6",
                panel_background: "#ffffff",
                text: "#1f2937",
                muted: "#6b7280",
                accent: "#2563eb",
                secondary: "#16a34a",
                track: "#e5e7eb",
            },
            Theme::Sunset => Palette {
                page_background: "linear-gradient(135deg, #fde68a, #f9a8d4)",
                panel_background: "#fffaf5",
                text: "#3f1d38",
                muted: "#7c4a5e",
                accent: "#db2777",
                secondary: "#ea580c",
                track: "#fce7f3",
            },
            Theme::Ocean => Palette {
                page_background: "linear-gradient(135deg, #a5f3fc, #6366f1)",
                panel_background: "#f0f9ff",
                text: "#0c4a6e",
                muted: "#334155",
                accent: "#0891b2",
                secondary: "#4f46e5",
                track: "#e0f2fe",
            },
            Theme::Midnight => Palette {
                page_background: "linear-gradient(160deg, #0d1117, #1f2937)",
                panel_background: "#161b22",
                text: "#e6edf3",
                muted: "#8b949e",
                accent: "#7c3aed",
                secondary: "#238636",
                track: "#30363d",
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub theme: Theme,
    pub show_progress_bar: bool,
    pub enable_pdf_ingestion: bool,
    pub gesture_axis: GestureAxis,
    pub line_height_spring: SpringConfig,
    pub progress_spring: SpringConfig,
    pub placeholder_lines: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Classic,
            show_progress_bar: true,
            enable_pdf_ingestion: true,
            gesture_axis: GestureAxis::X,
            line_height_spring: SpringConfig::line_height(),
            progress_spring: SpringConfig::progress(),
            placeholder_lines: 20,
        }
    }
}

impl ViewerConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Stored config, or defaults when nothing usable is stored.
    pub fn load() -> Self {
        Self::from_stored(read_stored())
    }

    /// Resolves whatever the storage read produced. Storage failures and
    /// unparsable JSON both fall back to defaults.
    pub fn from_stored(stored: Result<Option<String>, ConfigError>) -> Self {
        match stored.and_then(|raw| raw.map(|r| Self::from_json(&r)).transpose()) {
            Ok(Some(cfg)) => cfg,
            Ok(None) => Self::default(),
            Err(err) => {
                log::warn!("ignoring stored config: {err}");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let raw = serde_json::to_string(self)?;
        local_storage()?
            .set_item(STORAGE_KEY, &raw)
            .map_err(|e| ConfigError::Storage(js_error_message(&e)))
    }
}

fn local_storage() -> Result<web_sys::Storage, ConfigError> {
    let win = web_sys::window().ok_or(ConfigError::Unavailable)?;
    match win.local_storage() {
        Ok(Some(store)) => Ok(store),
        Ok(None) => Err(ConfigError::Unavailable),
        Err(e) => Err(ConfigError::Storage(js_error_message(&e))),
    }
}

fn read_stored() -> Result<Option<String>, ConfigError> {
    local_storage()?
        .get_item(STORAGE_KEY)
        .map_err(|e| ConfigError::Storage(js_error_message(&e)))
}

/// Message of a thrown JS error (SecurityError, QuotaExceededError, ...).
fn js_error_message(value: &JsValue) -> String {
    match value.dyn_ref::<js_sys::Error>() {
        Some(err) => String::from(err.message()),
        None => format!("{value:?}"),
    }
}

pub fn placeholder_lines(count: usize) -> Vec<String> {
    (1..=count)
        .map(|i| format!("Line {i}: This is an example of dynamically adjustable text."))
        .collect()
}
