use std::{env, fs::{self, File, OpenOptions}, path::PathBuf};

use crate::error::Result;

const DATA_DIR_VAR: &str = "SNAKECALC_DATA_DIR";
const LOG_PATH_VAR: &str = "SNAKECALC_LOG";
const LOG_FILE_NAME: &str = "snakecalc.log";

/// Where the program keeps its files. Everything else is a compile-time constant.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub log_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(env::var_os(DATA_DIR_VAR).map(PathBuf::from), env::var_os(LOG_PATH_VAR).map(PathBuf::from))
    }

    /// Opens the log file for appending, creating missing directories.
    pub fn open_log(&self) -> Result<File> {
        if let Some(parent) = self.log_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&self.log_path)?;
        Ok(file)
    }

    fn from_vars(data_dir: Option<PathBuf>, log_path: Option<PathBuf>) -> Self {
        let data_dir = data_dir.unwrap_or_else(|| PathBuf::from("."));
        let log_path = log_path.unwrap_or_else(|| data_dir.join(LOG_FILE_NAME));
        Config { data_dir, log_path }
    }
}
