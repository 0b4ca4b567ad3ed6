//! Canonical game state and its legacy-tolerant wire shape.
//!
//! Everything that crosses a process boundary (the persisted blob and the
//! share-token payload) is parsed as [`RawState`] first, then lifted into
//! the canonical [`GameState`] by [`RawState::upgrade`]. The raw shape
//! tolerates every epoch the format has gone through: missing fields, bare
//! string notes, bare boolean locks. Canonical types never carry legacy
//! shapes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::{AnswerEntry, LockPair, RawEntry, RawLockPair, Side};

/// Display names for the two players.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Players {
    #[serde(rename = "A", default)]
    pub a: String,
    #[serde(rename = "B", default)]
    pub b: String,
}

impl Players {
    #[must_use]
    pub fn name(&self, side: Side) -> &str {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }

    /// Display name, falling back to "Player A"/"Player B".
    #[must_use]
    pub fn display_name(&self, side: Side) -> String {
        let name = self.name(side).trim();
        if name.is_empty() {
            format!("Player {side}")
        } else {
            name.to_string()
        }
    }

    /// Fill-only merge: an empty local slot takes the incoming name, a
    /// non-empty local slot is never overwritten.
    pub fn fill_from(&mut self, incoming: &Self) {
        if self.a.trim().is_empty() && !incoming.a.trim().is_empty() {
            self.a.clone_from(&incoming.a);
        }
        if self.b.trim().is_empty() && !incoming.b.trim().is_empty() {
            self.b.clone_from(&incoming.b);
        }
    }
}

/// One device's full game state.
///
/// Owned exclusively by the local device; partners only ever see an
/// immutable [`SessionPayload`] snapshot of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// Current position in `order`, 0-based. Always within bounds while
    /// `order` is non-empty, 0 otherwise.
    pub index: usize,
    /// Whose nominal turn it is. Advisory only; merge never arbitrates it.
    pub player: Side,
    pub players: Players,
    /// Play order: a permutation of all question ids, grouped by set.
    pub order: Vec<String>,
    pub notes: BTreeMap<String, AnswerEntry>,
    pub locks: BTreeMap<String, LockPair>,
}

impl GameState {
    /// Question id at the current position, if an order exists.
    #[must_use]
    pub fn current_question_id(&self) -> Option<&str> {
        self.order.get(self.index).map(String::as_str)
    }

    /// Answer entry for a question, creating an empty one on first write.
    pub fn entry_mut(&mut self, qid: &str) -> &mut AnswerEntry {
        self.notes.entry(qid.to_string()).or_default()
    }

    /// Lock pair for a question, creating an unlocked one on first write.
    pub fn locks_mut(&mut self, qid: &str) -> &mut LockPair {
        self.locks.entry(qid.to_string()).or_default()
    }

    #[must_use]
    pub fn entry(&self, qid: &str) -> AnswerEntry {
        self.notes.get(qid).cloned().unwrap_or_default()
    }

    #[must_use]
    pub fn lock_pair(&self, qid: &str) -> LockPair {
        self.locks.get(qid).copied().unwrap_or_default()
    }

    /// Advance to the next question, toggling the nominal turn.
    /// No-op at the last question.
    pub fn next(&mut self) -> bool {
        if self.index + 1 < self.order.len() {
            self.index += 1;
            self.player = self.player.other();
            true
        } else {
            false
        }
    }

    /// Step back to the previous question, toggling the nominal turn.
    /// No-op at the first question.
    pub fn prev(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            self.player = self.player.other();
            true
        } else {
            false
        }
    }

    /// Clamp `index` into bounds for the current order.
    pub fn clamp_index(&mut self) {
        if self.order.is_empty() {
            self.index = 0;
        } else if self.index >= self.order.len() {
            self.index = self.order.len() - 1;
        }
    }

    /// Immutable transport snapshot for sharing.
    #[must_use]
    pub fn to_payload(&self) -> SessionPayload {
        SessionPayload {
            index: self.index,
            player: self.player,
            players: self.players.clone(),
            order: self.order.clone(),
            notes: self.notes.clone(),
            locks: self.locks.clone(),
        }
    }
}

/// Snapshot of a [`GameState`] serialized for transport in a share token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionPayload {
    pub index: usize,
    pub player: Side,
    pub players: Players,
    pub order: Vec<String>,
    pub notes: BTreeMap<String, AnswerEntry>,
    pub locks: BTreeMap<String, LockPair>,
}

/// State as parsed from disk or from a decoded token, before upgrading.
///
/// Every field is optional or legacy-tolerant, so payloads written by any
/// prior epoch of the format still parse.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawState {
    pub index: Option<i64>,
    pub player: Option<String>,
    pub players: Players,
    pub order: Vec<String>,
    pub notes: BTreeMap<String, RawEntry>,
    pub locks: BTreeMap<String, RawLockPair>,
}

impl RawState {
    /// Lift the raw shape into canonical state, filling defaults and
    /// upgrading legacy note/lock representations.
    #[must_use]
    pub fn upgrade(self) -> GameState {
        let player = self
            .player
            .as_deref()
            .and_then(|p| p.parse::<Side>().ok())
            .unwrap_or(Side::A);

        let notes = self
            .notes
            .into_iter()
            .map(|(qid, raw)| (qid, raw.upgrade()))
            .collect();
        let locks = self
            .locks
            .into_iter()
            .map(|(qid, raw)| (qid, raw.upgrade()))
            .collect();

        let mut state = GameState {
            index: usize::try_from(self.index.unwrap_or(0).max(0)).unwrap_or(0),
            player,
            players: self.players,
            order: self.order,
            notes,
            locks,
        };
        state.clamp_index();
        state
    }

    /// Lift straight into a transport payload.
    #[must_use]
    pub fn upgrade_payload(self) -> SessionPayload {
        self.upgrade().to_payload()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LockState;

    #[test]
    fn empty_raw_upgrades_to_default() {
        let raw: RawState = serde_json::from_str("{}").unwrap();
        assert_eq!(raw.upgrade(), GameState::default());
    }

    #[test]
    fn legacy_note_and_lock_shapes_upgrade() {
        let json = r#"{
            "index": 2,
            "player": "B",
            "players": {"A": "ana"},
            "order": ["q1", "q2", "q3"],
            "notes": {"q1": "old bare note", "q2": {"B": "split"}},
            "locks": {"q1": {"A": true}, "q2": {"B": {"locked": true, "lockedAt": 7}}}
        }"#;
        let state: GameState = serde_json::from_str::<RawState>(json).unwrap().upgrade();

        assert_eq!(state.index, 2);
        assert_eq!(state.player, Side::B);
        assert_eq!(state.players.b, "");
        assert_eq!(state.entry("q1").a, "old bare note");
        assert_eq!(state.entry("q2").b, "split");
        assert_eq!(
            state.lock_pair("q1").a,
            LockState {
                locked: true,
                locked_at: None
            }
        );
        assert_eq!(state.lock_pair("q2").b, LockState::locked_at(7));
    }

    #[test]
    fn out_of_range_index_is_clamped() {
        let json = r#"{"index": 99, "order": ["q1", "q2"]}"#;
        let state = serde_json::from_str::<RawState>(json).unwrap().upgrade();
        assert_eq!(state.index, 1);

        let json = r#"{"index": -5, "order": ["q1"]}"#;
        let state = serde_json::from_str::<RawState>(json).unwrap().upgrade();
        assert_eq!(state.index, 0);
    }

    #[test]
    fn unknown_player_falls_back_to_a() {
        let json = r#"{"player": "Z"}"#;
        let state = serde_json::from_str::<RawState>(json).unwrap().upgrade();
        assert_eq!(state.player, Side::A);
    }

    #[test]
    fn navigation_toggles_turn_and_clamps() {
        let mut state = GameState {
            order: vec!["q1".into(), "q2".into()],
            ..GameState::default()
        };
        assert!(state.next());
        assert_eq!((state.index, state.player), (1, Side::B));
        assert!(!state.next());
        assert!(state.prev());
        assert_eq!((state.index, state.player), (0, Side::A));
        assert!(!state.prev());
    }

    #[test]
    fn players_fill_only() {
        let mut local = Players {
            a: "ana".into(),
            b: String::new(),
        };
        let incoming = Players {
            a: "overwrite?".into(),
            b: "ben".into(),
        };
        local.fill_from(&incoming);
        assert_eq!(local.a, "ana");
        assert_eq!(local.b, "ben");
    }
}
