//! `duet start`: name the players and generate the play order.

use anyhow::Result;
use clap::Args;
use duet_core::ensure_order;
use duet_core::store::SessionStore;
use serde::Serialize;

use crate::output::{OutputMode, render};
use crate::questions::builtin_questions;

#[derive(Args, Debug)]
pub struct StartArgs {
    /// Name of the player on side A.
    #[arg(long = "player-a", value_name = "NAME")]
    pub player_a: String,

    /// Name of the player on side B.
    #[arg(long = "player-b", value_name = "NAME")]
    pub player_b: String,
}

#[derive(Serialize)]
struct Started {
    player_a: String,
    player_b: String,
    questions: usize,
}

pub fn run_start(args: &StartArgs, store: &SessionStore, mode: OutputMode) -> Result<()> {
    let questions = builtin_questions();
    let mut state = store.load();
    state.players.a = args.player_a.trim().to_string();
    state.players.b = args.player_b.trim().to_string();
    ensure_order(&mut state, &questions);
    store.save(&state)?;

    let started = Started {
        player_a: state.players.a.clone(),
        player_b: state.players.b.clone(),
        questions: state.order.len(),
    };
    render(mode, &started, |v, w| {
        writeln!(
            w,
            "Game on: {} (A) and {} (B), {} questions ahead.",
            v.player_a, v.player_b, v.questions
        )
    })?;
    Ok(())
}
