//! Session merge engine.
//!
//! Reconciles a partner's [`SessionPayload`](crate::state::SessionPayload)
//! into the local [`GameState`](crate::state::GameState), per question and
//! per side, and reports every conflict it saw, including the ones it
//! auto-resolved. The report is ephemeral: it describes one merge call and
//! is never persisted by the engine itself.
//!
//! # Merge rules
//!
//! Per (question, side), after normalizing both representations:
//!
//! 1. **Lock-wins**: a locked incoming side beats an unlocked local side.
//! 2. **Both locked, different texts**: first-locked-wins. A non-null
//!    `lockedAt` beats null, the *earlier* of two timestamps wins, and with
//!    no timestamps at all the local side stands. Always recorded as a
//!    conflict, even though the tie-break is deterministic; when the
//!    incoming side wins, the overwritten local copy rides along on the
//!    record so a manual override can restore it.
//! 3. **Neither locked**: incoming text only fills an empty local slot;
//!    two different drafts are surfaced as a conflict and left for a human.
//! 4. A locked local side is never overturned by an unlocked incoming one.
//!
//! Sides are independent: a conflict on side A never affects side B.

pub mod engine;
pub mod resolve;

pub use engine::merge_into_state;
pub use resolve::{ResolveError, resolve_conflict};

use serde::{Deserialize, Serialize};

use crate::model::{LockState, Side};

/// Which copy a conflict resolution kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kept {
    Local,
    Incoming,
}

impl Kept {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Incoming => "incoming",
        }
    }
}

impl std::str::FromStr for Kept {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Self::Local),
            "incoming" => Ok(Self::Incoming),
            other => Err(format!("unknown resolution: {other} (expected local or incoming)")),
        }
    }
}

/// How a conflict arose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// Both sides committed, with different texts. Auto-resolved by the
    /// first-locked-wins tie-break; recorded for the user regardless.
    BothLockedDifferent,
    /// Two different uncommitted drafts. No lock evidence to arbitrate
    /// with, so the local draft stands and the user decides.
    BothUnlockedDifferent,
}

impl ConflictKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BothLockedDifferent => "both_locked_different",
            Self::BothUnlockedDifferent => "both_unlocked_different",
        }
    }
}

/// The local copy a tie-break pushed aside when it adopted the incoming
/// side. Kept on the record so a manual override can restore it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplacedLocal {
    pub text: String,
    pub lock: LockState,
}

/// One reconciliation conflict observed during a merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictRecord {
    pub qid: String,
    pub side: Side,
    #[serde(rename = "type")]
    pub kind: ConflictKind,
    pub kept: Kept,
    /// Present exactly when `kept` is [`Kept::Incoming`]: the local text
    /// and lock the merge overwrote.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub displaced: Option<DisplacedLocal>,
}

/// Counters for the automatic rules a merge applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedCounts {
    /// Times an incoming lock overturned an unlocked local side.
    pub locked_wins: u32,
    /// Times incoming text filled an empty, unlocked local slot.
    pub filled_empties: u32,
}

/// Outcome of one merge call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeReport {
    /// Whether the merge changed local state at all.
    pub merged: bool,
    pub conflicts: Vec<ConflictRecord>,
    pub applied: AppliedCounts,
}

impl MergeReport {
    /// Whether the merge finished without anything to surface to the user.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty()
    }
}
