//! Manual conflict resolution.
//!
//! The automatic tie-breaks in [`merge_into_state`](super::merge_into_state)
//! always leave a [`ConflictRecord`] behind; this entry point lets the user
//! overrule one explicitly. Same contract as merge: mutate local state,
//! update the report.

use thiserror::Error;
use tracing::info;

use crate::merge::{ConflictRecord, Kept, MergeReport};
use crate::model::Side;
use crate::state::{GameState, SessionPayload};

/// A manual override referenced a conflict the report does not contain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no recorded conflict for question {qid} side {side}")]
pub struct ResolveError {
    pub qid: String,
    pub side: Side,
}

/// Apply the user's explicit choice for one recorded conflict.
///
/// `keep = Local` restores the copy an automatic tie-break displaced, or
/// reaffirms the local entry and lock if they still stand; `keep =
/// Incoming` overwrites both with the payload's copy for that (question,
/// side). The matching record is removed from the report and returned
/// with its `kept` field reflecting the choice.
///
/// # Errors
///
/// [`ResolveError`] when the report holds no conflict for `(qid, side)`.
pub fn resolve_conflict(
    local: &mut GameState,
    incoming: &SessionPayload,
    report: &mut MergeReport,
    qid: &str,
    side: Side,
    keep: Kept,
) -> Result<ConflictRecord, ResolveError> {
    let pos = report
        .conflicts
        .iter()
        .position(|c| c.qid == qid && c.side == side)
        .ok_or_else(|| ResolveError {
            qid: qid.to_string(),
            side,
        })?;

    match keep {
        Kept::Incoming => {
            let text = incoming
                .notes
                .get(qid)
                .map(|e| e.text(side).to_string())
                .unwrap_or_default();
            local.entry_mut(qid).set_text(side, text);
            *local.locks_mut(qid).side_mut(side) = incoming
                .locks
                .get(qid)
                .map_or_else(crate::model::LockState::default, |p| p.side(side));
            report.merged = true;
        }
        Kept::Local => {
            // If the tie-break already adopted the incoming copy, the
            // original local one lives on the record; put it back.
            if let Some(displaced) = report.conflicts[pos].displaced.clone() {
                local.entry_mut(qid).set_text(side, displaced.text);
                *local.locks_mut(qid).side_mut(side) = displaced.lock;
                report.merged = true;
            }
        }
    }

    let mut record = report.conflicts.remove(pos);
    record.kept = keep;
    info!(qid, %side, kept = keep.as_str(), "conflict resolved manually");
    Ok(record)
}
