//! Persisted pending merge: the payload and report of the last import that
//! left conflicts, so `duet resolve` can act on them in a later invocation.

use anyhow::{Context, Result};
use duet_core::MergeReport;
use duet_core::state::{RawState, SessionPayload};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const PENDING_FILE: &str = "pending.json";

/// A merge awaiting manual conflict resolution.
#[derive(Debug, Clone)]
pub struct Pending {
    pub payload: SessionPayload,
    pub report: MergeReport,
}

#[derive(Serialize)]
struct PendingOut<'a> {
    payload: &'a SessionPayload,
    report: &'a MergeReport,
}

#[derive(Deserialize)]
struct PendingIn {
    payload: RawState,
    report: MergeReport,
}

fn path(store_dir: &Path) -> PathBuf {
    store_dir.join(PENDING_FILE)
}

/// Persist a payload and its unresolved report.
pub fn save(store_dir: &Path, payload: &SessionPayload, report: &MergeReport) -> Result<()> {
    fs::create_dir_all(store_dir)
        .with_context(|| format!("creating store dir {}", store_dir.display()))?;
    let json = serde_json::to_string_pretty(&PendingOut { payload, report })
        .context("serializing pending merge")?;
    fs::write(path(store_dir), json).context("writing pending merge")
}

/// Load the pending merge, if one exists and parses.
pub fn load(store_dir: &Path) -> Result<Option<Pending>> {
    let path = path(store_dir);
    if !path.exists() {
        return Ok(None);
    }
    let bytes = fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
    let raw: PendingIn = serde_json::from_slice(&bytes).context("parsing pending merge")?;
    Ok(Some(Pending {
        payload: raw.payload.upgrade_payload(),
        report: raw.report,
    }))
}

/// Forget the pending merge.
pub fn clear(store_dir: &Path) -> Result<()> {
    match fs::remove_file(path(store_dir)) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err).context("removing pending merge"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duet_core::model::{LockState, Side};
    use duet_core::state::GameState;
    use duet_core::merge_into_state;
    use tempfile::TempDir;

    #[test]
    fn pending_round_trips() {
        let dir = TempDir::new().expect("tempdir");

        // A lock tie-break conflict, so the record carries the displaced
        // local copy and must survive the disk round trip with it.
        let mut local = GameState::default();
        local.entry_mut("q1").set_text(Side::A, "mine");
        *local.locks_mut("q1").side_mut(Side::A) = LockState::locked_at(900);
        let mut other = GameState::default();
        other.entry_mut("q1").set_text(Side::A, "theirs");
        *other.locks_mut("q1").side_mut(Side::A) = LockState::locked_at(100);
        let payload = other.to_payload();
        let report = merge_into_state(&mut local, &payload);
        assert!(!report.is_clean());
        assert!(report.conflicts[0].displaced.is_some());

        save(dir.path(), &payload, &report).expect("save");
        let pending = load(dir.path()).expect("load").expect("present");
        assert_eq!(pending.payload, payload);
        assert_eq!(pending.report, report);

        clear(dir.path()).expect("clear");
        assert!(load(dir.path()).expect("load").is_none());
    }
}
