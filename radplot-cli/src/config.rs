use directories::ProjectDirs;
use std::path::PathBuf;

use crate::error::CliError;

pub const STATE_DIR: &str = "plots";
pub const STATE_FILE: &str = "current.json";

pub fn get_project_dirs() -> Result<ProjectDirs, CliError> {
    ProjectDirs::from("com", "radplot", "radplot").ok_or(CliError::NoDataDir)
}

/// `<data_dir>/plots/current.json`
pub fn default_state_path() -> Result<PathBuf, CliError> {
    let mut path = get_project_dirs()?.data_dir().to_owned();
    path.push(STATE_DIR);
    path.push(STATE_FILE);
    Ok(path)
}
