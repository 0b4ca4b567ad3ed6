//! Per-question, per-side lock state.
//!
//! A lock is the only commit signal in the system: a player locking an
//! answer declares it final, and a locked answer dominates any unlocked
//! draft during merge. A question is *revealed* only once both sides have
//! locked.
//!
//! Like answer entries, lock records have two wire epochs: a bare boolean
//! per side, and the current `{locked, lockedAt}` object.

use serde::{Deserialize, Serialize};

use crate::model::side::Side;

/// Lock state for one side of one question.
///
/// `locked_at` is a wall-clock millisecond reading taken on the device that
/// locked, meaningful only while `locked` is true. It is a best-effort
/// ordering hint, not a synchronized clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockState {
    #[serde(default)]
    pub locked: bool,
    #[serde(rename = "lockedAt", default)]
    pub locked_at: Option<i64>,
}

impl LockState {
    /// A lock committed at the given wall-clock millisecond.
    #[must_use]
    pub const fn locked_at(ts: i64) -> Self {
        Self {
            locked: true,
            locked_at: Some(ts),
        }
    }
}

/// Lock records for both sides of one question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockPair {
    #[serde(rename = "A", default)]
    pub a: LockState,
    #[serde(rename = "B", default)]
    pub b: LockState,
}

impl LockPair {
    #[must_use]
    pub const fn side(&self, side: Side) -> LockState {
        match side {
            Side::A => self.a,
            Side::B => self.b,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut LockState {
        match side {
            Side::A => &mut self.a,
            Side::B => &mut self.b,
        }
    }

    /// A question's answers are revealed only when both sides committed.
    #[must_use]
    pub const fn both_locked(&self) -> bool {
        self.a.locked && self.b.locked
    }
}

/// One side's lock record as found on the wire, covering both epochs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawLockSide {
    /// Legacy epoch: a bare boolean, no timestamp.
    Flag(bool),
    /// Current epoch: explicit `{locked, lockedAt}` record.
    State(LockState),
}

impl RawLockSide {
    /// Upgrade either epoch to the canonical shape.
    #[must_use]
    pub const fn upgrade(self) -> LockState {
        match self {
            Self::Flag(locked) => LockState {
                locked,
                locked_at: None,
            },
            Self::State(state) => state,
        }
    }
}

/// A question's lock records as found on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawLockPair {
    #[serde(rename = "A", default)]
    pub a: Option<RawLockSide>,
    #[serde(rename = "B", default)]
    pub b: Option<RawLockSide>,
}

impl RawLockPair {
    /// Upgrade to the canonical shape, defaulting missing sides to unlocked.
    #[must_use]
    pub fn upgrade(self) -> LockPair {
        LockPair {
            a: self.a.map_or_else(LockState::default, RawLockSide::upgrade),
            b: self.b.map_or_else(LockState::default, RawLockSide::upgrade),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_boolean_upgrades_without_timestamp() {
        let raw: RawLockPair = serde_json::from_str(r#"{"A":true,"B":false}"#).unwrap();
        let pair = raw.upgrade();
        assert!(pair.a.locked);
        assert_eq!(pair.a.locked_at, None);
        assert!(!pair.b.locked);
    }

    #[test]
    fn current_shape_keeps_timestamp() {
        let raw: RawLockPair =
            serde_json::from_str(r#"{"A":{"locked":true,"lockedAt":1000}}"#).unwrap();
        let pair = raw.upgrade();
        assert_eq!(pair.a, LockState::locked_at(1000));
        assert_eq!(pair.b, LockState::default());
    }

    #[test]
    fn both_locked_needs_both_sides() {
        let mut pair = LockPair::default();
        pair.a = LockState::locked_at(1);
        assert!(!pair.both_locked());
        pair.b = LockState::locked_at(2);
        assert!(pair.both_locked());
    }

    #[test]
    fn canonical_serializes_camel_case() {
        let json = serde_json::to_string(&LockState::locked_at(42)).unwrap();
        assert_eq!(json, r#"{"locked":true,"lockedAt":42}"#);
    }
}
