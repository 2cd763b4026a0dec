//! JSON document file wrapper for the storage crate.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::info;
use tempfile::NamedTempFile;
use tokio::fs;

use crate::error::StorageError;
use crate::models::MessageDocument;

/// Owns the path of a single document file; creates it if missing.
///
/// Each write goes to its own temporary file in the document's directory, which is
/// synced and then renamed over the document, so readers see either the old or the
/// new content. A failed write removes its temporary file.
#[derive(Clone, Debug)]
pub struct JsonFileManager {
    path: PathBuf,
    dir: PathBuf,
}

impl JsonFileManager {
    /// Opens the document at `path`.
    ///
    /// With `create_if_missing`, a missing file (and its parent directories) is
    /// created holding an empty document.
    pub async fn new(
        path: impl AsRef<Path>,
        create_if_missing: bool,
    ) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        info!("Opening message document: {}", path.display());

        if path.file_name().is_none() {
            return Err(StorageError::Io {
                path,
                source: std::io::Error::new(ErrorKind::InvalidInput, "path has no file name"),
            });
        }
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let manager = Self { path, dir };

        match fs::metadata(&manager.path).await {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound && create_if_missing => {
                fs::create_dir_all(&manager.dir)
                    .await
                    .map_err(StorageError::io(&manager.dir))?;
                manager.write(&MessageDocument::default()).await?;
                info!("Created empty message document: {}", manager.path.display());
            }
            Err(e) => return Err(StorageError::io(&manager.path)(e)),
        }

        Ok(manager)
    }

    /// Returns the document path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and decodes the whole document.
    pub async fn read(&self) -> Result<MessageDocument, StorageError> {
        let bytes = fs::read(&self.path)
            .await
            .map_err(StorageError::io(&self.path))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Encodes and atomically replaces the whole document.
    pub async fn write(&self, document: &MessageDocument) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(document).map_err(StorageError::Encode)?;
        let path = self.path.clone();
        let dir = self.dir.clone();

        tokio::task::spawn_blocking(move || replace(&dir, &path, &bytes))
            .await
            .map_err(|e| StorageError::Io {
                path: self.path.clone(),
                source: std::io::Error::other(e),
            })?
    }
}

fn replace(dir: &Path, path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let mut tmp = NamedTempFile::new_in(dir).map_err(StorageError::io(dir))?;
    tmp.write_all(bytes)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(StorageError::io(tmp.path()))?;
    tmp.persist(path)
        .map_err(|e| StorageError::io(path)(e.error))?;
    Ok(())
}
