use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The two named sides of a session.
///
/// Every per-question record (answer text, lock) exists once per side, and
/// the two sides are reconciled independently during merge.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Side {
    #[default]
    A,
    B,
}

impl Side {
    /// The partner's side.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
        }
    }

    /// Both sides in stable order.
    pub const ALL: [Side; 2] = [Self::A, Self::B];
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a side designator fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSide(pub String);

impl fmt::Display for UnknownSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown side: {} (expected A or B)", self.0)
    }
}

impl std::error::Error for UnknownSide {}

impl FromStr for Side {
    type Err = UnknownSide;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" | "a" => Ok(Self::A),
            "B" | "b" => Ok(Self::B),
            other => Err(UnknownSide(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_flips() {
        assert_eq!(Side::A.other(), Side::B);
        assert_eq!(Side::B.other(), Side::A);
    }

    #[test]
    fn parse_accepts_both_cases() {
        assert_eq!("A".parse::<Side>().unwrap(), Side::A);
        assert_eq!("b".parse::<Side>().unwrap(), Side::B);
        assert!("C".parse::<Side>().is_err());
    }

    #[test]
    fn serializes_as_bare_letter() {
        assert_eq!(serde_json::to_string(&Side::A).unwrap(), "\"A\"");
        assert_eq!(serde_json::from_str::<Side>("\"B\"").unwrap(), Side::B);
    }
}
