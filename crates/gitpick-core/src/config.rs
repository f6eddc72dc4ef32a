use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{PickError, Result};
use crate::git::DEFAULT_LOG_COMMAND;
use crate::resolve::DEFAULT_REMOTE_NAME;

const DEFAULT_CONFIG_FILENAME: &str = "config.toml";
const DEFAULT_LOG_FILENAME: &str = "gitpick.log";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub git_binary: String,
    pub log_command: String,
    pub remote_name: String,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            git_binary: "git".to_string(),
            log_command: DEFAULT_LOG_COMMAND.to_string(),
            remote_name: DEFAULT_REMOTE_NAME.to_string(),
            log_file: None,
        }
    }
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| PickError::Config(format!("invalid config toml: {e}")))
    }

    // A missing default file yields defaults; a missing explicit path is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match default_config_path() {
                Some(path) => (path, false),
                None => return Ok(Self::default()),
            },
        };
        if !path.exists() {
            if required {
                return Err(PickError::Config(format!(
                    "config file {} does not exist",
                    path.display()
                )));
            }
            return Ok(Self::default());
        }
        let text = fs::read_to_string(&path)
            .map_err(|source| PickError::io("reading config file", source))?;
        Self::from_toml(&text)
    }

    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(default_log_path)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "GitPick", "gitpick")
}

pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(DEFAULT_CONFIG_FILENAME))
}

pub fn default_log_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_local_dir().join(DEFAULT_LOG_FILENAME))
}
