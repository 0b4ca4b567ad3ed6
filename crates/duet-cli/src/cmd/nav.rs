//! `duet next` / `duet prev`: move through the play order.
//!
//! Moving also toggles whose nominal turn it is, matching the alternating
//! rhythm of the exercise.

use anyhow::Result;
use duet_core::ensure_order;
use duet_core::store::SessionStore;
use serde::Serialize;

use crate::output::{OutputMode, render};
use crate::questions::builtin_questions;

#[derive(Serialize)]
struct Moved {
    moved: bool,
    number: usize,
    total: usize,
    turn: String,
}

pub fn run_next(store: &SessionStore, mode: OutputMode) -> Result<()> {
    step(store, mode, true)
}

pub fn run_prev(store: &SessionStore, mode: OutputMode) -> Result<()> {
    step(store, mode, false)
}

fn step(store: &SessionStore, mode: OutputMode, forward: bool) -> Result<()> {
    let questions = builtin_questions();
    let mut state = store.load();
    ensure_order(&mut state, &questions);

    let moved = if forward { state.next() } else { state.prev() };
    store.save(&state)?;

    let result = Moved {
        moved,
        number: state.index + 1,
        total: state.order.len(),
        turn: state.players.display_name(state.player),
    };
    render(mode, &result, |v, w| {
        if v.moved {
            writeln!(w, "Question {} / {}, {}'s turn.", v.number, v.total, v.turn)
        } else {
            writeln!(w, "Already at question {} / {}.", v.number, v.total)
        }
    })?;
    Ok(())
}
