use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use juliascope_core::{Bounds, FractalParams};

/// Persisted explorer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorerPreferences {
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    #[serde(default = "default_julia_size")]
    pub julia_width: u32,
    #[serde(default = "default_julia_size")]
    pub julia_height: u32,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    /// File name of the favorites list, resolved against the config directory.
    #[serde(default = "default_favorites_file")]
    pub favorites_file: String,
    /// Mandelbrot bounds at the end of the previous session.
    #[serde(default)]
    pub last_bounds: Option<Bounds>,
}

fn default_window_width() -> u32 {
    800
}
fn default_window_height() -> u32 {
    640
}
fn default_julia_size() -> u32 {
    600
}
fn default_max_iterations() -> u32 {
    FractalParams::DEFAULT_MAX_ITERATIONS
}
fn default_favorites_file() -> String {
    "julia_favourites.txt".into()
}

impl Default for ExplorerPreferences {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            julia_width: default_julia_size(),
            julia_height: default_julia_size(),
            max_iterations: default_max_iterations(),
            favorites_file: default_favorites_file(),
            last_bounds: None,
        }
    }
}

impl ExplorerPreferences {
    /// Load from the per-user config directory.
    pub fn load() -> Self {
        Self::load_from(&config_dir().join("preferences.json"))
    }

    pub fn save(&self) {
        self.save_to(&config_dir().join("preferences.json"));
    }

    /// Load from `path`, falling back to defaults if the file is missing or
    /// does not parse.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            debug!("No preferences file at {}", path.display());
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<ExplorerPreferences>(&json) {
                Ok(prefs) => {
                    info!("Loaded preferences from {}", path.display());
                    return prefs.sanitized();
                }
                Err(e) => error!("Failed to parse preferences: {e}"),
            },
            Err(e) => error!("Failed to read preferences file: {e}"),
        }
        Self::default()
    }

    pub fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                error!("Failed to create config directory: {e}");
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(path, &json) {
                    error!("Failed to write preferences: {e}");
                } else {
                    debug!("Saved preferences to {}", path.display());
                }
            }
            Err(e) => error!("Failed to serialize preferences: {e}"),
        }
    }

    /// Iteration cap as validated parameters.
    pub fn fractal_params(&self) -> FractalParams {
        FractalParams::new(self.max_iterations).unwrap_or_default()
    }

    /// Path of the favorites file next to the preferences.
    pub fn favorites_path(&self) -> PathBuf {
        config_dir().join(&self.favorites_file)
    }

    // Zero sizes or caps from a hand-edited file would be rejected later by
    // `Viewport` and `FractalParams`.
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.window_width == 0 || self.window_height == 0 {
            self.window_width = defaults.window_width;
            self.window_height = defaults.window_height;
        }
        if self.julia_width == 0 || self.julia_height == 0 {
            self.julia_width = defaults.julia_width;
            self.julia_height = defaults.julia_height;
        }
        if self.max_iterations == 0 {
            self.max_iterations = defaults.max_iterations;
        }
        self
    }
}

/// Per-user config directory, or the executable's directory when the
/// platform has none.
pub fn config_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "JuliaScope")
        .map(|d| d.config_dir().to_path_buf())
        .unwrap_or_else(exe_directory)
}

fn exe_directory() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}
