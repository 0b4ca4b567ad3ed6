//! The per-question, per-side reconciliation pass.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::clock::{DEFAULT_SKEW_THRESHOLD_MS, check_clock_skew, wall_clock_now_ms};
use crate::merge::{ConflictKind, ConflictRecord, DisplacedLocal, Kept, MergeReport};
use crate::model::{LockState, Side, texts_equal};
use crate::state::{GameState, SessionPayload};

/// Reconcile `incoming` into `local`, in place, and report what happened.
///
/// Safe against partially populated payloads: absent questions and sides
/// default to the empty, unlocked representation before comparison (the
/// payload itself was already upgraded from any legacy shape at decode).
/// Merging the same payload twice leaves notes and locks unchanged.
pub fn merge_into_state(local: &mut GameState, incoming: &SessionPayload) -> MergeReport {
    let mut report = MergeReport::default();

    let qids: BTreeSet<String> = local
        .notes
        .keys()
        .chain(local.locks.keys())
        .chain(incoming.notes.keys())
        .chain(incoming.locks.keys())
        .cloned()
        .collect();

    for qid in &qids {
        for side in Side::ALL {
            merge_side(local, incoming, qid, side, &mut report);
        }
    }

    let players_before = local.players.clone();
    local.players.fill_from(&incoming.players);
    if local.players != players_before {
        report.merged = true;
    }

    // An established local order is authoritative; only a device that has
    // never generated one adopts the partner's order and position.
    if local.order.is_empty() && !incoming.order.is_empty() {
        local.order.clone_from(&incoming.order);
        local.index = incoming.index;
        local.clamp_index();
        report.merged = true;
    }

    debug!(
        questions = qids.len(),
        locked_wins = report.applied.locked_wins,
        filled_empties = report.applied.filled_empties,
        conflicts = report.conflicts.len(),
        "merge complete"
    );
    report
}

fn merge_side(
    local: &mut GameState,
    incoming: &SessionPayload,
    qid: &str,
    side: Side,
    report: &mut MergeReport,
) {
    let inc_text = incoming
        .notes
        .get(qid)
        .map(|e| e.text(side).to_string())
        .unwrap_or_default();
    let inc_lock = incoming
        .locks
        .get(qid)
        .map_or_else(LockState::default, |p| p.side(side));

    let loc_text = local.entry(qid).text(side).to_string();
    let loc_lock = local.lock_pair(qid).side(side);

    match (loc_lock.locked, inc_lock.locked) {
        // An incoming commit beats a local draft. The incoming text is
        // adopted unless empty, in which case the local draft survives
        // under the adopted lock.
        (false, true) => {
            if !inc_text.trim().is_empty() {
                local.entry_mut(qid).set_text(side, inc_text);
            }
            let slot = local.locks_mut(qid).side_mut(side);
            slot.locked = true;
            slot.locked_at = inc_lock.locked_at.or(loc_lock.locked_at);
            if let Some(ts) = inc_lock.locked_at
                && let Some(skew) =
                    check_clock_skew(ts, wall_clock_now_ms(), DEFAULT_SKEW_THRESHOLD_MS)
            {
                warn!(qid, %side, skew_ms = skew.skew_ms, "adopted lock timestamp is far from local clock");
            }
            report.applied.locked_wins += 1;
            report.merged = true;
        }

        // Both committed: equal texts converge silently, different texts
        // tie-break on first-locked-wins and are always reported.
        (true, true) => {
            if texts_equal(&loc_text, &inc_text) {
                return;
            }
            let kept = first_locked_wins(loc_lock.locked_at, inc_lock.locked_at);
            let mut displaced = None;
            if kept == Kept::Incoming {
                // Stash the copy being overwritten so a manual override
                // can bring it back.
                displaced = Some(DisplacedLocal {
                    text: loc_text,
                    lock: loc_lock,
                });
                local.entry_mut(qid).set_text(side, inc_text);
                *local.locks_mut(qid).side_mut(side) = inc_lock;
                report.merged = true;
            }
            report.conflicts.push(ConflictRecord {
                qid: qid.to_string(),
                side,
                kind: ConflictKind::BothLockedDifferent,
                kept,
                displaced,
            });
        }

        // A local commit is never overturned by an uncommitted draft.
        (true, false) => {}

        // Two drafts: fill an empty slot, surface a real disagreement.
        (false, false) => {
            let loc_empty = loc_text.trim().is_empty();
            let inc_empty = inc_text.trim().is_empty();
            if loc_empty && !inc_empty {
                local.entry_mut(qid).set_text(side, inc_text);
                report.applied.filled_empties += 1;
                report.merged = true;
            } else if !loc_empty && !inc_empty && !texts_equal(&loc_text, &inc_text) {
                report.conflicts.push(ConflictRecord {
                    qid: qid.to_string(),
                    side,
                    kind: ConflictKind::BothUnlockedDifferent,
                    kept: Kept::Local,
                    displaced: None,
                });
            }
        }
    }
}

/// Tie-break for two committed, different answers.
///
/// Whoever committed first is authoritative: a present timestamp beats an
/// absent one, the earlier of two timestamps wins, and with no timestamps
/// there is no evidence to overturn the local copy.
const fn first_locked_wins(local_ts: Option<i64>, incoming_ts: Option<i64>) -> Kept {
    match (local_ts, incoming_ts) {
        (None, Some(_)) => Kept::Incoming,
        (Some(l), Some(i)) if i < l => Kept::Incoming,
        _ => Kept::Local,
    }
}
