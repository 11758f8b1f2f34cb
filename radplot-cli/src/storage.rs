//! Plot state persistence.
//!
//! The plotting sheet is kept as pretty-printed JSON so it can be edited by
//! hand between runs.
//!
//! Default path: `~/.local/share/radplot/plots/current.json`

use log::{debug, info};
use radplot_core::PlotState;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::default_state_path;
use crate::error::CliError;

/// One plot state file on disk
pub struct PlotStore {
    path: PathBuf,
}

impl PlotStore {
    /// Store at `path`, or at the default location under the data dir
    pub fn new(path: Option<PathBuf>) -> Result<Self, CliError> {
        let path = match path {
            Some(path) => path,
            None => default_state_path()?,
        };
        debug!("Plot state file: {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the saved plot, or `None` when nothing has been saved yet
    pub fn load(&self) -> Result<Option<PlotState>, CliError> {
        if !self.path.exists() {
            debug!("No plot state at {}", self.path.display());
            return Ok(None);
        }

        let file = fs::File::open(&self.path).map_err(|source| CliError::Io {
            path: self.path.clone(),
            source,
        })?;
        let state = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            CliError::StateFormat {
                path: self.path.clone(),
                source,
            }
        })?;
        debug!("Loaded plot state from {}", self.path.display());
        Ok(Some(state))
    }

    /// Load the saved plot, falling back to the default sheet
    pub fn load_or_default(&self) -> Result<PlotState, CliError> {
        match self.load()? {
            Some(state) => Ok(state),
            None => {
                info!(
                    "No saved plot at {}, using the default plot",
                    self.path.display()
                );
                Ok(PlotState::default())
            }
        }
    }

    /// Save the plot; refuses to replace an existing file unless `force`
    pub fn save(&self, state: &PlotState, force: bool) -> Result<(), CliError> {
        if self.path.exists() && !force {
            return Err(CliError::StateExists(self.path.clone()));
        }

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|source| CliError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let io_err = |source| CliError::Io {
            path: self.path.clone(),
            source,
        };
        let file = fs::File::create(&self.path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, state)?;
        writer.write_all(b"\n").map_err(io_err)?;
        writer.flush().map_err(io_err)?;

        info!("Stored plot state -> {}", self.path.display());
        Ok(())
    }
}
