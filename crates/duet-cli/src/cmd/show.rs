//! `duet show`: the current question, progress, and lock status.

use anyhow::Result;
use duet_core::model::{Side, question_by_id};
use duet_core::store::SessionStore;
use duet_core::{ErrorCode, ensure_order};
use serde::Serialize;

use crate::output::{CliError, OutputMode, render, render_error};
use crate::questions::builtin_questions;

#[derive(Serialize)]
struct Shown {
    number: usize,
    total: usize,
    set: u8,
    qid: String,
    text: String,
    turn: String,
    answered_a: bool,
    answered_b: bool,
    locked_a: bool,
    locked_b: bool,
    revealed: bool,
}

pub fn run_show(store: &SessionStore, mode: OutputMode) -> Result<()> {
    let questions = builtin_questions();
    let mut state = store.load();
    if ensure_order(&mut state, &questions) {
        store.save(&state)?;
    }

    let Some(qid) = state.current_question_id().map(ToString::to_string) else {
        render_error(mode, &CliError::from_code(ErrorCode::GameNotStarted))?;
        anyhow::bail!("no current question");
    };
    let Some(question) = question_by_id(&questions, &qid) else {
        render_error(mode, &CliError::with_detail(ErrorCode::UnknownQuestion, &qid))?;
        anyhow::bail!("unknown question {qid}");
    };

    let entry = state.entry(&qid);
    let locks = state.lock_pair(&qid);
    let shown = Shown {
        number: state.index + 1,
        total: state.order.len(),
        set: question.set.number(),
        qid: qid.clone(),
        text: question.text.clone(),
        turn: state.players.display_name(state.player),
        answered_a: entry.is_answered(Side::A),
        answered_b: entry.is_answered(Side::B),
        locked_a: locks.a.locked,
        locked_b: locks.b.locked,
        revealed: locks.both_locked(),
    };

    render(mode, &shown, |v, w| {
        writeln!(w, "Question {} / {} (set {})", v.number, v.total, v.set)?;
        writeln!(w, "  {}", v.text)?;
        writeln!(w, "  turn: {}", v.turn)?;
        writeln!(
            w,
            "  A: {}{}   B: {}{}",
            if v.answered_a { "answered" } else { "-" },
            if v.locked_a { " (locked)" } else { "" },
            if v.answered_b { "answered" } else { "-" },
            if v.locked_b { " (locked)" } else { "" },
        )?;
        if v.revealed {
            writeln!(w, "  revealed: both answers are locked")?;
        }
        Ok(())
    })?;
    Ok(())
}
