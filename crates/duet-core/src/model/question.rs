use serde::{Deserialize, Serialize};
use std::fmt;

/// The three question sets of the exercise, in fixed macro-order.
///
/// The playing order always runs through all of set one before set two, and
/// set two before set three; only the order *within* a set is randomized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Set {
    One = 1,
    Two = 2,
    Three = 3,
}

impl Set {
    /// Numeric label used in display and the wire format.
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// All sets in play order.
    pub const ALL: [Set; 3] = [Self::One, Self::Two, Self::Three];
}

impl fmt::Display for Set {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl From<Set> for u8 {
    fn from(set: Set) -> Self {
        set.number()
    }
}

impl TryFrom<u8> for Set {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            other => Err(format!("unknown question set: {other}")),
        }
    }
}

/// One question of the exercise. Immutable, externally supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique key, stable across devices. Referenced by `order`, `notes`
    /// and `locks`.
    pub id: String,
    /// The question text shown to the players.
    pub text: String,
    /// Which of the three sets this question belongs to.
    pub set: Set,
}

impl Question {
    #[must_use]
    pub fn new(id: impl Into<String>, text: impl Into<String>, set: Set) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            set,
        }
    }
}

/// Look up a question by id.
#[must_use]
pub fn question_by_id<'a>(questions: &'a [Question], id: &str) -> Option<&'a Question> {
    questions.iter().find(|q| q.id == id)
}
