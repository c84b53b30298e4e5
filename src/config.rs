use crate::app_dirs::AppDirs;
use crate::game::{Category, Difficulty, TimerSettings, DEFAULT_TIME_SECS, SUCCESS_BONUS_SECS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Player preferences. Scores are deliberately not part of it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub category: Option<Category>,
    pub difficulty: Option<Difficulty>,
    pub start_secs: u32,
    pub bonus_secs: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            category: None,
            difficulty: None,
            start_secs: DEFAULT_TIME_SECS,
            bonus_secs: SUCCESS_BONUS_SECS,
        }
    }
}

impl Config {
    pub fn timer_settings(&self) -> TimerSettings {
        TimerSettings {
            start_secs: self.start_secs,
            bonus_secs: self.bonus_secs,
        }
    }

    pub fn remember_selection(
        &mut self,
        category: Option<Category>,
        difficulty: Option<Difficulty>,
    ) {
        self.category = category;
        self.difficulty = difficulty;
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => return Config::default(),
        };

        serde_json::from_slice::<Config>(&bytes).unwrap_or_else(|error| {
            warn!(path = %self.path.display(), %error, "ignoring unreadable config");
            Config::default()
        })
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}
