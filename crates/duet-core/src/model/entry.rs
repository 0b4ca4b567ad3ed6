//! Per-question answer text, one slot per side.
//!
//! The wire/persisted shape has gone through two epochs: originally a note
//! was a bare string (implicitly side A's text), today it is a `{A, B}`
//! object. [`RawEntry`] captures both shapes as an untagged union and
//! [`RawEntry::upgrade`] lifts either into the canonical [`AnswerEntry`].

use serde::{Deserialize, Serialize};

use crate::model::side::Side;

/// Canonical per-question answer entry. Empty string means unanswered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerEntry {
    #[serde(rename = "A", default)]
    pub a: String,
    #[serde(rename = "B", default)]
    pub b: String,
}

impl AnswerEntry {
    #[must_use]
    pub fn text(&self, side: Side) -> &str {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }

    pub fn set_text(&mut self, side: Side, text: impl Into<String>) {
        match side {
            Side::A => self.a = text.into(),
            Side::B => self.b = text.into(),
        }
    }

    /// Whether the given side has written anything beyond whitespace.
    #[must_use]
    pub fn is_answered(&self, side: Side) -> bool {
        !self.text(side).trim().is_empty()
    }

    /// Whether both slots are empty after trimming.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.is_answered(Side::A) && !self.is_answered(Side::B)
    }
}

/// Answer entry as found on the wire or on disk, covering both epochs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawEntry {
    /// Legacy epoch: a bare string is side A's note.
    Legacy(String),
    /// Current epoch: explicit per-side slots. Missing slots default empty.
    Split(AnswerEntry),
}

impl RawEntry {
    /// Upgrade either epoch to the canonical shape.
    #[must_use]
    pub fn upgrade(self) -> AnswerEntry {
        match self {
            Self::Legacy(text) => AnswerEntry {
                a: text,
                b: String::new(),
            },
            Self::Split(entry) => entry,
        }
    }
}

/// Normalize answer text for comparison: trim and collapse CRLF newlines.
///
/// Used only to decide equality during merge; stored text is never altered.
#[must_use]
pub fn normalized(text: &str) -> String {
    text.trim().replace("\r\n", "\n")
}

/// Whether two answer texts are the same after normalization.
#[must_use]
pub fn texts_equal(left: &str, right: &str) -> bool {
    normalized(left) == normalized(right)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_string_becomes_side_a() {
        let raw: RawEntry = serde_json::from_str("\"my note\"").unwrap();
        let entry = raw.upgrade();
        assert_eq!(entry.a, "my note");
        assert_eq!(entry.b, "");
    }

    #[test]
    fn split_shape_passes_through() {
        let raw: RawEntry = serde_json::from_str(r#"{"A":"x","B":"y"}"#).unwrap();
        assert_eq!(
            raw.upgrade(),
            AnswerEntry {
                a: "x".into(),
                b: "y".into()
            }
        );
    }

    #[test]
    fn missing_slots_default_empty() {
        let raw: RawEntry = serde_json::from_str(r#"{"B":"only b"}"#).unwrap();
        let entry = raw.upgrade();
        assert_eq!(entry.a, "");
        assert_eq!(entry.b, "only b");
    }

    #[test]
    fn normalization_ignores_crlf_and_padding() {
        assert!(texts_equal("  hello\r\nworld ", "hello\nworld"));
        assert!(!texts_equal("hello", "goodbye"));
    }

    #[test]
    fn answered_ignores_whitespace() {
        let mut entry = AnswerEntry::default();
        entry.set_text(Side::A, "   ");
        assert!(!entry.is_answered(Side::A));
        entry.set_text(Side::A, "hi");
        assert!(entry.is_answered(Side::A));
        assert!(!entry.is_empty());
    }
}
