//! `duet lock` / `duet unlock`: commit or uncommit this device's answer.
//!
//! Locking stamps the answer with the local wall clock; that timestamp is
//! what the merge tie-break later arbitrates with.

use anyhow::Result;
use clap::Args;
use duet_core::clock::wall_clock_now_ms;
use duet_core::model::{LockState, Side};
use duet_core::store::SessionStore;

use crate::cmd::{device_side, target_qid};
use crate::output::{OutputMode, render_success};

#[derive(Args, Debug)]
pub struct LockArgs {
    /// Side to lock for (defaults to this device's side record).
    #[arg(short, long)]
    pub side: Option<Side>,

    /// Question id (defaults to the current question).
    #[arg(long, value_name = "QID")]
    pub question: Option<String>,
}

pub fn run_lock(args: &LockArgs, store: &SessionStore, mode: OutputMode) -> Result<()> {
    let mut state = store.load();
    let side = device_side(args.side, store, mode)?;
    let qid = target_qid(&state, args.question.as_deref(), mode)?;

    *state.locks_mut(&qid).side_mut(side) = LockState::locked_at(wall_clock_now_ms());
    let revealed = state.lock_pair(&qid).both_locked();
    store.save(&state)?;

    let message = if revealed {
        format!("Locked {side}'s answer for {qid}. Both sides locked, answers revealed!")
    } else {
        format!("Locked {side}'s answer for {qid}. Waiting on the other side to reveal.")
    };
    render_success(mode, &message)?;
    Ok(())
}

pub fn run_unlock(args: &LockArgs, store: &SessionStore, mode: OutputMode) -> Result<()> {
    let mut state = store.load();
    let side = device_side(args.side, store, mode)?;
    let qid = target_qid(&state, args.question.as_deref(), mode)?;

    *state.locks_mut(&qid).side_mut(side) = LockState::default();
    store.save(&state)?;
    render_success(mode, &format!("Unlocked {side}'s answer for {qid}."))?;
    Ok(())
}
