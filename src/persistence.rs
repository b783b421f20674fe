//! Snapshot save/load between driver invocations
//!
//! The core hands the driver an opaque snapshot after every tick and
//! requires the exact same value back on the next call. Snapshots are a
//! versioned JSON envelope; a wrong version or malformed JSON is a hard
//! error, never silently repaired.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::GameState;

/// Envelope format version
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("snapshot I/O error")]
    Io(#[from] std::io::Error),
    #[error("snapshot is not valid JSON")]
    Json(#[from] serde_json::Error),
    #[error("snapshot version {found} (expected {SNAPSHOT_VERSION})")]
    Version { found: u32 },
}

/// Persisted unit: the core game state plus driver bookkeeping that the
/// pacing step owns (the core never reads it).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: GameState,
    /// Wall-clock start of the current tick cycle, unix millis
    #[serde(default)]
    pub tick_start_ms: Option<u64>,
}

impl Snapshot {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            tick_start_ms: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    version: u32,
    #[serde(flatten)]
    snapshot: Snapshot,
}

/// Write a snapshot to the given path
pub fn save_snapshot(path: &Path, snapshot: &Snapshot) -> Result<(), SnapshotError> {
    let envelope = Envelope {
        version: SNAPSHOT_VERSION,
        snapshot: snapshot.clone(),
    };
    fs::write(path, serde_json::to_string(&envelope)?)?;
    Ok(())
}

/// Read a snapshot back, rejecting unknown versions
pub fn load_snapshot(path: &Path) -> Result<Snapshot, SnapshotError> {
    let raw = fs::read_to_string(path)?;
    let envelope: Envelope = serde_json::from_str(&raw)?;
    if envelope.version != SNAPSHOT_VERSION {
        return Err(SnapshotError::Version {
            found: envelope.version,
        });
    }
    Ok(envelope.snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Lifecycle, TickInput, tick};

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("foldy-bird-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_round_trip_preserves_state() {
        let mut state = GameState::new(42);
        for flapped in [false, true, true, false] {
            tick(&mut state, &TickInput { flapped });
        }

        let path = temp_path("roundtrip.json");
        save_snapshot(&path, &Snapshot::new(state.clone())).unwrap();
        let loaded = load_snapshot(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(loaded.state.frame, state.frame);
        assert_eq!(loaded.state.player_y, state.player_y);
        assert_eq!(loaded.state.obstacles, state.obstacles);
        assert_eq!(loaded.state.rng_state, state.rng_state);
        assert_eq!(loaded.state.lifecycle, Lifecycle::Ticking);
    }

    #[test]
    fn test_wrong_version_rejected() {
        let path = temp_path("version.json");
        let mut json = serde_json::to_value(&Envelope {
            version: SNAPSHOT_VERSION,
            snapshot: Snapshot::new(GameState::new(1)),
        })
        .unwrap();
        json["version"] = serde_json::json!(99);
        fs::write(&path, serde_json::to_string(&json).unwrap()).unwrap();

        let err = load_snapshot(&path).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(matches!(err, SnapshotError::Version { found: 99 }));
    }

    #[test]
    fn test_garbage_rejected() {
        let path = temp_path("garbage.json");
        fs::write(&path, "not json at all").unwrap();
        let err = load_snapshot(&path).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(matches!(err, SnapshotError::Json(_)));
    }
}
