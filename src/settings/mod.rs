use std::{
    fs, io,
    path::{Path, PathBuf},
};

use camaze::GenParams;
use ron::{self, extensions::Extensions};
use serde::{Deserialize, Serialize};

const DEFAULT_SETTINGS: &str = include_str!("./default_settings.ron");

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read/write settings file {0:?}: {1}")]
    Io(PathBuf, #[source] io::Error),
    #[error("Failed to parse settings file {0:?}: {1}")]
    Parse(PathBuf, #[source] ron::error::SpannedError),
    #[error("No config directory on this platform")]
    NoConfigDir,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MazePreset {
    pub title: String,
    pub rows: u16,
    pub cols: u16,
    #[serde(default)]
    pub params: Option<GenParams>,
    #[serde(default)]
    pub default: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub params: Option<GenParams>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub mazes: Option<Vec<MazePreset>>,
}

impl Settings {
    pub fn get_params(&self) -> GenParams {
        self.params.unwrap_or_default()
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn get_mazes(&self) -> Vec<MazePreset> {
        self.mazes.clone().unwrap_or_default()
    }

    /// Preset by title (case insensitive), or the one marked as default when `title` is `None`.
    pub fn find_preset(&self, title: Option<&str>) -> Option<MazePreset> {
        let mazes = self.mazes.as_deref().unwrap_or_default();
        let preset = match title {
            Some(title) => mazes.iter().find(|m| m.title.eq_ignore_ascii_case(title)),
            None => mazes.iter().find(|m| m.default),
        };
        preset.cloned()
    }

    pub fn default_path() -> Result<PathBuf, SettingsError> {
        dirs::config_dir()
            .map(|dir| dir.join("automaze").join("settings.ron"))
            .ok_or(SettingsError::NoConfigDir)
    }

    fn options() -> ron::Options {
        ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME)
    }

    pub fn parse(path: &Path, source: &str) -> Result<Self, SettingsError> {
        Self::options()
            .from_str(source)
            .map_err(|err| SettingsError::Parse(path.to_path_buf(), err))
    }

    pub fn defaults() -> Self {
        // the embedded file is covered by a test, fall back to code defaults anyway
        Self::parse(Path::new("<default settings>"), DEFAULT_SETTINGS).unwrap_or_default()
    }

    /// Loads settings, writing the default file first if there is none at `path`.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match fs::read_to_string(path) {
            Ok(source) => Self::parse(path, &source),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("No settings at {:?}, writing defaults", path);
                Self::reset_config(path)?;
                Ok(Self::defaults())
            }
            Err(err) => Err(SettingsError::Io(path.to_path_buf(), err)),
        }
    }

    pub fn reset_config(path: &Path) -> Result<(), SettingsError> {
        let io_err = |err| SettingsError::Io(path.to_path_buf(), err);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, DEFAULT_SETTINGS).map_err(io_err)
    }
}
