use std::fmt;

/// Machine-readable error codes for CLI and script-friendly output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NoSessionFound,
    InvalidToken,
    GameNotStarted,
    UnknownQuestion,
    AnswerLocked,
    NoPendingConflicts,
    ConflictNotFound,
    SideNotSet,
    StoreWriteFailed,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NoSessionFound => "E1001",
            Self::InvalidToken => "E1002",
            Self::GameNotStarted => "E2001",
            Self::UnknownQuestion => "E2002",
            Self::AnswerLocked => "E2003",
            Self::NoPendingConflicts => "E3001",
            Self::ConflictNotFound => "E3002",
            Self::SideNotSet => "E4001",
            Self::StoreWriteFailed => "E5001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NoSessionFound => "No valid session link found",
            Self::InvalidToken => "Session token is malformed",
            Self::GameNotStarted => "Game not started",
            Self::UnknownQuestion => "Unknown question id",
            Self::AnswerLocked => "Answer is locked",
            Self::NoPendingConflicts => "No pending merge conflicts",
            Self::ConflictNotFound => "No such conflict",
            Self::SideNotSet => "Device side not set",
            Self::StoreWriteFailed => "Could not write session state",
        }
    }

    /// Optional remediation hint that can be surfaced to the user.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::NoSessionFound | Self::InvalidToken => {
                Some("Paste the full share link, including the #session=... fragment.")
            }
            Self::GameNotStarted => Some("Run `duet start` to name both players first."),
            Self::UnknownQuestion => None,
            Self::AnswerLocked => Some("Run `duet unlock` to edit a committed answer."),
            Self::NoPendingConflicts => Some("Run `duet import <url>` first."),
            Self::ConflictNotFound => Some("Run `duet conflicts` to list pending conflicts."),
            Self::SideNotSet => Some("Run `duet side A` or `duet side B` on this device."),
            Self::StoreWriteFailed => Some("Check permissions on the store directory."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}
