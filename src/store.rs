//! Durable storage of a [`QTable`] as a flat JSON file

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{
    ds::QTable,
    error::{Error, Result},
};

/// Whether a session learns from its decisions or only replays a saved table
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Mode {
    /// Update and persist the table on every decision
    Train,
    /// Never touch the table; a saved table must exist
    #[default]
    Evaluate,
}

impl Mode {
    pub fn is_training(self) -> bool {
        self == Self::Train
    }
}

/// The file a named table lives in: `<dir>/<name>.json`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableFile {
    path: PathBuf,
}

impl TableFile {
    pub fn new(dir: impl AsRef<Path>, name: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{name}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the table from disk
    ///
    /// A missing file yields an empty table when training and [`Error::MissingModel`] otherwise.
    pub fn load(&self, mode: Mode) -> Result<QTable> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return match mode {
                    Mode::Train => {
                        log::info!("Training {} (new table)", self.path.display());
                        Ok(QTable::new())
                    }
                    Mode::Evaluate => Err(Error::MissingModel {
                        path: self.path.clone(),
                    }),
                };
            }
            Err(source) => {
                return Err(Error::StorageIo {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let table: QTable =
            serde_json::from_slice(&data).map_err(|source| Error::MalformedTable {
                path: self.path.clone(),
                source,
            })?;

        match mode {
            Mode::Train => log::info!("Training {} ({} keys)", self.path.display(), table.len()),
            Mode::Evaluate => log::info!("Loaded {} ({} keys)", self.path.display(), table.len()),
        }
        Ok(table)
    }

    /// Overwrite the file with the full table
    ///
    /// The table is written to a sibling temporary file first and renamed into place, so the
    /// file on disk always holds a complete table.
    pub fn save(&self, table: &QTable) -> Result<()> {
        let io_err = |source| Error::StorageIo {
            path: self.path.clone(),
            source,
        };

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(io_err)?;
        }

        let data = serde_json::to_vec(table).map_err(|e| io_err(e.into()))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data).map_err(io_err)?;
        if let Err(source) = fs::rename(&tmp, &self.path) {
            if let Err(e) = fs::remove_file(&tmp) {
                log::warn!("Could not remove {}: {e}", tmp.display());
            }
            return Err(io_err(source));
        }

        log::debug!("Saved {} keys to {}", table.len(), self.path.display());
        Ok(())
    }
}
