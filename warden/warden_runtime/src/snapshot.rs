//! Snapshot persistence.
//!
//! Serializes the four registries to a JSON blob at a caller-supplied path
//! and restores them verbatim. All I/O is synchronous and completes before
//! or after engine calls, never during one.

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::info;

use warden_access::Snapshot;

/// Errors that can occur while persisting or restoring a snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to read snapshot: {0}")]
    ReadFailed(String),

    #[error("Failed to write snapshot: {0}")]
    WriteFailed(String),

    #[error("Failed to parse snapshot: {0}")]
    ParseFailed(String),

    #[error("Failed to encode snapshot: {0}")]
    EncodeFailed(String),
}

/// Write a snapshot to `path` as pretty-printed JSON.
pub fn save(path: &Path, snapshot: &Snapshot) -> Result<(), SnapshotError> {
    let payload = serde_json::to_string_pretty(snapshot)
        .map_err(|err| SnapshotError::EncodeFailed(err.to_string()))?;

    fs::write(path, payload)
        .map_err(|err| SnapshotError::WriteFailed(format!("{}: {}", path.display(), err)))?;

    info!("Saved snapshot to {}", path.display());
    Ok(())
}

/// Read a snapshot back from `path`.
pub fn load(path: &Path) -> Result<Snapshot, SnapshotError> {
    let content = fs::read_to_string(path)
        .map_err(|err| SnapshotError::ReadFailed(format!("{}: {}", path.display(), err)))?;

    let snapshot = serde_json::from_str(&content)
        .map_err(|err| SnapshotError::ParseFailed(format!("{}: {}", path.display(), err)))?;

    info!("Loaded snapshot from {}", path.display());
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;
    use warden_access::AccessControlStore;

    #[test]
    fn test_save_and_load_round_trip() {
        let mut store = AccessControlStore::new();
        store.register_user("alice", "pw1").unwrap();
        store.add_user_to_group("alice", "admins").unwrap();
        store.add_object_to_group("file1", "docs");
        store.add_rule("read", "admins", Some("docs")).unwrap();

        let file = NamedTempFile::new().unwrap();
        save(file.path(), &store.export()).unwrap();

        // Restore into a fresh store and verify decisions survive
        let restored = AccessControlStore::from_snapshot(load(file.path()).unwrap());
        assert!(restored.can_access("read", "alice", Some("file1")).unwrap());
        assert!(!restored.can_access("read", "alice", None).unwrap());
        assert!(restored.authenticate("alice", "pw1").is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load(Path::new("/nonexistent/registries.json")).unwrap_err();
        assert!(matches!(err, SnapshotError::ReadFailed(_)));
    }

    #[test]
    fn test_load_malformed_snapshot() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "not json at all").unwrap();

        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, SnapshotError::ParseFailed(_)));
    }
}
