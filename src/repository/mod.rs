//! Repository layer: catalog snapshots on the local filesystem

pub mod snapshot;

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{error::AppResult, services::Catalog};

pub use snapshot::SCHEMA_VERSION;

/// Snapshot store bound to one file
#[derive(Debug, Clone)]
pub struct Repository {
    path: PathBuf,
}

impl Repository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> AppResult<Catalog> {
        load(&self.path)
    }

    pub fn save(&self, catalog: &Catalog) -> AppResult<()> {
        save(catalog, &self.path)
    }
}

/// Write the whole catalog to `path`, replacing any previous snapshot
pub fn save(catalog: &Catalog, path: &Path) -> AppResult<()> {
    let bytes = snapshot::encode(catalog)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    // Write beside the target then rename, so an interrupted save keeps the old file
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    if let Err(e) = fs::write(&tmp, &bytes).and_then(|_| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }

    tracing::info!(
        "Saved catalog to {} ({} books, {} users)",
        path.display(),
        catalog.books().len(),
        catalog.users().len()
    );
    Ok(())
}

/// Read a catalog from `path`. A missing file yields an empty catalog.
pub fn load(path: &Path) -> AppResult<Catalog> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!("No snapshot at {}, starting with an empty catalog", path.display());
            return Ok(Catalog::new());
        }
        Err(e) => return Err(e.into()),
    };

    let snapshot = snapshot::decode(&bytes)?;
    tracing::info!(
        "Loaded catalog from {} (saved at {})",
        path.display(),
        snapshot
            .saved_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "unknown".to_string())
    );
    Ok(snapshot.catalog)
}
