use crate::menu::easing::{Easing, Interpolator};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Gap between rows, in density-independent units.
    pub vertical_gap_dp: f64,
    /// Pixels per density-independent unit.
    pub density: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            vertical_gap_dp: 40.0,
            density: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub duration_ms: u64,
    /// Total stagger spread across all items.
    pub stagger_ms: u64,
    pub overshoot_tension: f64,
    pub close_easing: Easing,
    pub selection_duration_ms: u64,
}

impl AnimationConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn selection_duration(&self) -> Duration {
        Duration::from_millis(self.selection_duration_ms)
    }

    /// Start offset of child `index` out of `child_count` children.
    pub fn stagger(&self, index: usize, child_count: usize) -> Duration {
        match child_count.checked_sub(1) {
            Some(items) if items > 0 => {
                Duration::from_millis(index as u64 * self.stagger_ms / items as u64)
            }
            _ => Duration::ZERO,
        }
    }

    pub fn open_interpolator(&self) -> Interpolator {
        Interpolator::overshoot(self.overshoot_tension)
    }

    pub fn close_interpolator(&self) -> Interpolator {
        Interpolator {
            easing: self.close_easing,
            tension: self.overshoot_tension,
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: 300,
            stagger_ms: 100,
            overshoot_tension: 1.5,
            close_easing: Easing::AccelerateDecelerate,
            selection_duration_ms: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Ignore toggle and item taps while a sequence is still playing.
    pub guard_transitions: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct MenuConfig {
    pub layout: LayoutConfig,
    pub animation: AnimationConfig,
    pub behavior: BehaviorConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "raymenu", "raymenu").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config(path: &Path) -> Result<MenuConfig, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("RAYMENU")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default(path: &Path) -> MenuConfig {
    match load_config(path) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config from {}: {}", path.display(), e);
            MenuConfig::default()
        }
    }
}

/// Writes the commented default file unless one already exists.
pub fn write_default_config(path: &Path) -> Result<PathBuf, ConfigError> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(path, DEFAULT_CONFIG)?;
    }
    Ok(path.to_path_buf())
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");
