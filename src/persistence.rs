//! Session snapshots as plain JSON records.

use crate::models::{Session, SessionError, SessionId};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Snapshot is inconsistent: {0}")]
    Inconsistent(#[from] SessionError),
}

pub fn to_json(session: &Session) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string_pretty(session)?)
}

/// Parse a snapshot, rejecting one whose line and courts break the session invariants.
pub fn from_json(json: &str) -> Result<Session, SnapshotError> {
    let session: Session = serde_json::from_str(json)?;
    session.check_invariants()?;
    Ok(session)
}

pub fn snapshot_path(dir: &Path, id: SessionId) -> PathBuf {
    dir.join(format!("{id}.json"))
}

/// Write `<dir>/<session id>.json`, creating the directory if needed.
pub fn save(session: &Session, dir: &Path) -> Result<PathBuf, SnapshotError> {
    fs::create_dir_all(dir)?;
    let path = snapshot_path(dir, session.id);
    fs::write(&path, to_json(session)?)?;
    Ok(path)
}

pub fn remove(dir: &Path, id: SessionId) -> Result<(), SnapshotError> {
    match fs::remove_file(snapshot_path(dir, id)) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
        _ => Ok(()),
    }
}

/// Load every `*.json` snapshot in `dir`. Unreadable snapshots are skipped with a warning.
pub fn load_all(dir: &Path) -> Result<Vec<Session>, SnapshotError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut sessions = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        match fs::read_to_string(&path)
            .map_err(SnapshotError::from)
            .and_then(|text| from_json(&text))
        {
            Ok(session) => sessions.push(session),
            Err(e) => log::warn!("Skipping snapshot {}: {}", path.display(), e),
        }
    }
    Ok(sessions)
}
