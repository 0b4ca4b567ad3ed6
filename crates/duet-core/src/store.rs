//! On-disk persistence for one device's session.
//!
//! Two independent records live under the store directory:
//!
//! - `state.json`: the full game state blob, rewritten atomically after
//!   every mutation.
//! - `side`: which side ("A"/"B") this device plays. Set once, sticky
//!   until explicit reset, and deliberately separate from the shared state
//!   so clearing one never clears the other.
//!
//! A missing or corrupt state file degrades to the default state with a
//! warning; persistence problems are never fatal to the caller's view.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::model::Side;
use crate::state::{GameState, RawState};

const STATE_FILE: &str = "state.json";
const SIDE_FILE: &str = "side";

/// Handle to one device's persisted session records.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn state_path(&self) -> PathBuf {
        self.dir.join(STATE_FILE)
    }

    fn side_path(&self) -> PathBuf {
        self.dir.join(SIDE_FILE)
    }

    /// Load the persisted state, upgrading legacy shapes.
    ///
    /// A missing file yields the default state; a corrupt file is treated
    /// the same after a warning. Never fails.
    #[must_use]
    pub fn load(&self) -> GameState {
        let path = self.state_path();
        let Ok(bytes) = fs::read(&path) else {
            return GameState::default();
        };
        match serde_json::from_slice::<RawState>(&bytes) {
            Ok(raw) => raw.upgrade(),
            Err(err) => {
                warn!(path = %path.display(), %err, "corrupt state file, resetting to default");
                GameState::default()
            }
        }
    }

    /// Persist the full state in a single atomic write (temp + rename).
    pub fn save(&self, state: &GameState) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating store dir {}", self.dir.display()))?;
        let path = self.state_path();
        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(state).context("serializing state")?;
        fs::write(&tmp, json).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &path).with_context(|| format!("renaming into {}", path.display()))?;
        Ok(())
    }

    /// Remove the persisted state blob. The side record is untouched.
    pub fn clear(&self) -> Result<()> {
        remove_if_exists(&self.state_path())
    }

    /// Which side this device plays, if recorded.
    #[must_use]
    pub fn side(&self) -> Option<Side> {
        let raw = fs::read_to_string(self.side_path()).ok()?;
        match raw.trim().parse::<Side>() {
            Ok(side) => Some(side),
            Err(err) => {
                warn!(%err, "corrupt side record, ignoring");
                None
            }
        }
    }

    /// Record which side this device plays.
    pub fn set_side(&self, side: Side) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating store dir {}", self.dir.display()))?;
        fs::write(self.side_path(), side.as_str())
            .with_context(|| format!("writing {}", self.side_path().display()))
    }

    /// Forget the device side. The state blob is untouched.
    pub fn clear_side(&self) -> Result<()> {
        remove_if_exists(&self.side_path())
    }
}

fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err).with_context(|| format!("removing {}", path.display())),
    }
}
