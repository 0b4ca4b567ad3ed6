//! Command handlers. Each file owns one `duet <command>` surface.

pub mod answer;
pub mod compare;
pub mod import;
pub mod lock;
pub mod nav;
pub mod reset;
pub mod resolve;
pub mod share;
pub mod show;
pub mod side;
pub mod start;

use anyhow::Result;
use duet_core::ErrorCode;
use duet_core::model::Side;
use duet_core::state::GameState;
use duet_core::store::SessionStore;

use crate::output::{CliError, OutputMode, render_error};

/// Resolve which side this invocation acts for: an explicit `--side` flag,
/// else the device's sticky side record.
pub(crate) fn device_side(
    flag: Option<Side>,
    store: &SessionStore,
    mode: OutputMode,
) -> Result<Side> {
    if let Some(side) = flag.or_else(|| store.side()) {
        Ok(side)
    } else {
        render_error(mode, &CliError::from_code(ErrorCode::SideNotSet))?;
        anyhow::bail!("device side not set")
    }
}

/// Resolve the question a command targets: `--question QID`, else the
/// current position.
pub(crate) fn target_qid(
    state: &GameState,
    question_flag: Option<&str>,
    mode: OutputMode,
) -> Result<String> {
    if let Some(qid) = question_flag {
        if state.order.iter().any(|id| id == qid) {
            Ok(qid.to_string())
        } else {
            render_error(mode, &CliError::with_detail(ErrorCode::UnknownQuestion, qid))?;
            anyhow::bail!("unknown question {qid}")
        }
    } else if let Some(qid) = state.current_question_id() {
        Ok(qid.to_string())
    } else {
        render_error(mode, &CliError::from_code(ErrorCode::GameNotStarted))?;
        anyhow::bail!("no current question")
    }
}
