//! pdaforge-store
//!
//! Persists [`WalletRecord`]s as pretty-printed JSON files, one record per
//! file. Records are written once: saving over an existing file fails unless
//! the store was opened with `overwrite`.
//!
//! Writes go to a uniquely named sibling temp file first and are then
//! persisted into place, so readers never observe a half-written record.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use pdaforge_core::{PdaError, PdaResult, WalletRecord, WalletRecordStore};
use thiserror::Error;
use tracing::debug;

/// Default file name, matching what the dashboard tooling expects.
pub const DEFAULT_FILE_NAME: &str = "platform-wallet.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record already exists at {0}")]
    AlreadyExists(PathBuf),
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid record json in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<StoreError> for PdaError {
    fn from(e: StoreError) -> Self {
        PdaError::storage(e.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub root: PathBuf,
    pub file_name: String,
    pub overwrite: bool,
}

impl StoreConfig {
    /// Record file under `root` with the default name, no overwrite.
    pub fn local_dev(root: PathBuf) -> Self {
        Self { root, file_name: DEFAULT_FILE_NAME.to_string(), overwrite: false }
    }

    /// Store bound to an explicit file path.
    pub fn at_path(path: &Path) -> PdaResult<Self> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| PdaError::invalid_argument(format!("not a file path: {}", path.display())))?
            .to_string();
        let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(Self { root, file_name, overwrite: false })
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

#[derive(Debug)]
pub struct JsonWalletStore {
    cfg: StoreConfig,
}

impl JsonWalletStore {
    pub fn open(cfg: StoreConfig) -> PdaResult<Self> {
        if cfg.file_name.trim().is_empty() {
            return Err(PdaError::invalid_argument("store file name must not be empty"));
        }
        if !cfg.root.as_os_str().is_empty() {
            fs::create_dir_all(&cfg.root).map_err(|source| StoreError::Io {
                path: cfg.root.clone(),
                source,
            })?;
        }
        Ok(Self { cfg })
    }

    pub fn path(&self) -> PathBuf {
        self.cfg.root.join(&self.cfg.file_name)
    }

    fn dir(&self) -> &Path {
        if self.cfg.root.as_os_str().is_empty() {
            Path::new(".")
        } else {
            &self.cfg.root
        }
    }

    fn save_inner(&self, record: &WalletRecord) -> Result<(), StoreError> {
        let path = self.path();
        let bytes = serde_json::to_vec_pretty(record).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        let io_err = |source: std::io::Error| StoreError::Io { path: path.clone(), source };

        // unique per call; a leftover from a crashed run is never reused
        let mut tmp = tempfile::Builder::new()
            .prefix(&format!(".{}.", self.cfg.file_name))
            .suffix(".tmp")
            .tempfile_in(self.dir())
            .map_err(io_err)?;
        #[cfg(unix)]
        if record.has_signing_key() {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file()
                .set_permissions(fs::Permissions::from_mode(0o600))
                .map_err(io_err)?;
        }
        tmp.write_all(&bytes).map_err(io_err)?;
        tmp.write_all(b"\n").map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;

        let placed = if self.cfg.overwrite {
            tmp.persist(&path)
        } else {
            tmp.persist_noclobber(&path)
        };

        match placed {
            Ok(_) => {
                debug!(path = %path.display(), owner = %record.owner, "wallet record saved");
                Ok(())
            }
            Err(e) if e.error.kind() == std::io::ErrorKind::AlreadyExists => {
                Err(StoreError::AlreadyExists(path))
            }
            Err(e) => Err(StoreError::Io { path, source: e.error }),
        }
    }
}

fn read_at(path: &Path) -> Result<Option<WalletRecord>, StoreError> {
    let raw = match fs::read(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(StoreError::Io { path: path.to_path_buf(), source }),
    };
    let record = serde_json::from_slice(&raw).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(record))
}

/// Load the record at `path` without opening a store. Creates nothing.
pub fn read_record(path: &Path) -> PdaResult<Option<WalletRecord>> {
    Ok(read_at(path)?)
}

impl WalletRecordStore for JsonWalletStore {
    fn save(&self, record: &WalletRecord) -> PdaResult<()> {
        Ok(self.save_inner(record)?)
    }

    fn load(&self) -> PdaResult<Option<WalletRecord>> {
        read_record(&self.path())
    }
}
