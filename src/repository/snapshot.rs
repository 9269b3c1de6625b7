//! On-disk snapshot envelope

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    services::Catalog,
};

/// Tag written in every snapshot
pub const SNAPSHOT_FORMAT: &str = "biblioteca";

/// Current schema version. Bump when the catalog shape changes.
pub const SCHEMA_VERSION: u32 = 1;

/// Just enough of a snapshot to decide whether it can be decoded
#[derive(Debug, Deserialize)]
struct Header {
    format: String,
    version: u32,
}

#[derive(Debug, Serialize)]
struct SnapshotRef<'a> {
    format: &'static str,
    version: u32,
    saved_at: DateTime<Utc>,
    catalog: &'a Catalog,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Snapshot {
    pub saved_at: Option<DateTime<Utc>>,
    pub catalog: Catalog,
}

pub(crate) fn encode(catalog: &Catalog) -> AppResult<Vec<u8>> {
    let snapshot = SnapshotRef {
        format: SNAPSHOT_FORMAT,
        version: SCHEMA_VERSION,
        saved_at: Utc::now(),
        catalog,
    };
    serde_json::to_vec_pretty(&snapshot)
        .map_err(|e| AppError::Internal(format!("Failed to encode snapshot: {}", e)))
}

pub(crate) fn decode(bytes: &[u8]) -> AppResult<Snapshot> {
    let header: Header = serde_json::from_slice(bytes)?;
    if header.format != SNAPSHOT_FORMAT {
        return Err(AppError::CorruptSnapshot(format!(
            "unexpected format tag {:?}",
            header.format
        )));
    }
    if header.version != SCHEMA_VERSION {
        return Err(AppError::UnsupportedVersion {
            found: header.version,
            supported: SCHEMA_VERSION,
        });
    }

    let snapshot: Snapshot = serde_json::from_slice(bytes)?;
    if let Some(user) = snapshot.catalog.users().iter().find(|u| !u.has_valid_hash()) {
        return Err(AppError::CorruptSnapshot(format!(
            "malformed password hash for user {}",
            user.email
        )));
    }
    Ok(snapshot)
}
