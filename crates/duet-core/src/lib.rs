//! duet-core: state model, session codec, and merge engine for the
//! two-player 36-questions exercise.
//!
//! Two devices play the same session with no server between them. Each one
//! owns a [`state::GameState`], persisted locally through
//! [`store::SessionStore`]; synchronization happens by encoding the state
//! into a URL-fragment token ([`codec`]) and reconciling a partner's
//! decoded payload with [`merge::merge_into_state`].
//!
//! # Conventions
//!
//! - **Errors**: typed leaf errors (`thiserror`) for decode/resolve
//!   failures, `anyhow::Result` with context at I/O seams. Nothing in this
//!   crate is fatal: malformed input degrades to a safe default.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `debug!`).

pub mod clock;
pub mod codec;
pub mod error;
pub mod merge;
pub mod model;
pub mod order;
pub mod state;
pub mod store;

pub use codec::{DecodeError, build_share_url, decode_token_from_url, encode_session};
pub use error::ErrorCode;
pub use merge::{
    ConflictKind, ConflictRecord, DisplacedLocal, Kept, MergeReport, merge_into_state,
    resolve_conflict,
};
pub use model::{AnswerEntry, LockPair, LockState, Question, Set, Side};
pub use order::ensure_order;
pub use state::{GameState, Players, SessionPayload};
pub use store::SessionStore;
