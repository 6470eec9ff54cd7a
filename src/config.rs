//! Game configuration
//!
//! Runtime settings read from a RON file. Lookup order:
//! `./planetes.ron`, then `<config_dir>/planetes/config.ron`, else defaults.
//! Every field is optional in the file. Gameplay tunables are not here;
//! they live in `game::constants`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "planetes.ron";
/// App folder under the platform config/data dirs
pub const APP_DIR: &str = "planetes";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen_width: f32,
    pub target_fps: u32,
    pub player_name: String,
    pub level_index: u32,
    /// Layout used when no save exists yet
    pub level_file: PathBuf,
    /// Directory of the local save store; platform data dir when unset
    pub store_dir: Option<PathBuf>,
    /// Remote save endpoint; `None` disables uploads
    pub remote_save_url: Option<String>,
    pub remote_timeout_secs: u64,
    pub assets_dir: PathBuf,
    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: crate::game::constants::SCREEN_WIDTH,
            target_fps: crate::game::constants::TARGET_FPS,
            player_name: "Player 1".to_string(),
            level_index: 0,
            level_file: PathBuf::from("assets/levels/level_0.txt"),
            store_dir: None,
            remote_save_url: Some("http://localhost:8000/save".to_string()),
            remote_timeout_secs: 5,
            assets_dir: PathBuf::from("assets/graphics"),
            log_filter: "info".to_string(),
        }
    }
}

impl GameConfig {
    /// Parse a config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_ron(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }

    pub fn to_ron(&self) -> Result<String, ron::Error> {
        let config = ron::ser::PrettyConfig::new().indentor("  ".to_string());
        ron::ser::to_string_pretty(self, config)
    }

    /// Candidate config files, most specific first
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        #[cfg(not(target_arch = "wasm32"))]
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join(APP_DIR).join("config.ron"));
        }
        paths
    }

    /// First existing config file from `paths`, else defaults.
    ///
    /// A file that exists but fails to parse is an error, not a fallback.
    /// First existing file of `paths`, with the path it came from.
    /// Defaults and `None` when no file exists.
    pub fn load_from(paths: &[PathBuf]) -> Result<(Self, Option<PathBuf>), ConfigError> {
        match paths.iter().find(|path| path.is_file()) {
            Some(path) => Ok((Self::from_file(path)?, Some(path.clone()))),
            None => Ok((Self::default(), None)),
        }
    }

    pub fn load() -> Result<(Self, Option<PathBuf>), ConfigError> {
        Self::load_from(&Self::search_paths())
    }

    /// Where the local key/value store lives
    pub fn store_dir(&self) -> PathBuf {
        if let Some(dir) = &self.store_dir {
            return dir.clone();
        }
        #[cfg(not(target_arch = "wasm32"))]
        if let Some(dir) = dirs::data_dir() {
            return dir.join(APP_DIR);
        }
        PathBuf::from(".")
    }

    pub fn remote_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.remote_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = GameConfig::from_ron("(player_name: \"Ana\", level_index: 2)").unwrap();
        assert_eq!(config.player_name, "Ana");
        assert_eq!(config.level_index, 2);
        assert_eq!(config.screen_width, 1200.0);
        assert_eq!(config.target_fps, 60);
        assert_eq!(config.remote_save_url.as_deref(), Some("http://localhost:8000/save"));
    }

    #[test]
    fn test_disable_remote() {
        let config = GameConfig::from_ron("(remote_save_url: None)").unwrap();
        assert_eq!(config.remote_save_url, None);
    }

    #[test]
    fn test_ron_round_trip() {
        let config = GameConfig {
            store_dir: Some(PathBuf::from("/tmp/saves")),
            ..GameConfig::default()
        };
        let text = config.to_ron().unwrap();
        assert_eq!(GameConfig::from_ron(&text).unwrap(), config);
    }

    #[test]
    fn test_load_from_first_existing() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.ron");
        let present = dir.path().join("config.ron");
        std::fs::write(&present, "(target_fps: 30)").unwrap();

        let (config, source) = GameConfig::load_from(&[missing.clone(), present.clone()]).unwrap();
        assert_eq!(config.target_fps, 30);
        assert_eq!(source, Some(present));

        let (defaults, source) = GameConfig::load_from(&[missing]).unwrap();
        assert_eq!(defaults, GameConfig::default());
        assert_eq!(source, None);
    }

    #[test]
    fn test_bad_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ron");
        std::fs::write(&path, "(target_fps: \"fast\")").unwrap();
        assert!(matches!(GameConfig::load_from(&[path]), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_explicit_store_dir() {
        let config = GameConfig {
            store_dir: Some(PathBuf::from("saves")),
            ..GameConfig::default()
        };
        assert_eq!(config.store_dir(), PathBuf::from("saves"));
    }
}
