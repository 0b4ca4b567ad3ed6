//! Data model for the session: sides, questions, answer entries, locks.

pub mod entry;
pub mod lock;
pub mod question;
pub mod side;

pub use entry::{AnswerEntry, RawEntry, normalized, texts_equal};
pub use lock::{LockPair, LockState, RawLockPair, RawLockSide};
pub use question::{Question, Set, question_by_id};
pub use side::{Side, UnknownSide};
