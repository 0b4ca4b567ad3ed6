//! `duet compare`: the end-screen comparison: both answers side by side,
//! with session stats. Revealed (both-locked) questions only by default.

use anyhow::Result;
use clap::Args;
use duet_core::ensure_order;
use duet_core::model::{Side, question_by_id};
use duet_core::store::SessionStore;
use serde::Serialize;

use crate::output::{OutputMode, render};
use crate::questions::builtin_questions;

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Include every question with at least one answer, not only the
    /// revealed ones.
    #[arg(long)]
    pub all: bool,

    /// Omit the question texts, listing answers only.
    #[arg(long)]
    pub no_questions: bool,
}

#[derive(Serialize)]
struct CompareItem {
    number: usize,
    set: u8,
    qid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    question: Option<String>,
    answer_a: String,
    answer_b: String,
    revealed: bool,
}

#[derive(Serialize)]
struct Comparison {
    player_a: String,
    player_b: String,
    total: usize,
    revealed: usize,
    a_wrote: usize,
    b_wrote: usize,
    items: Vec<CompareItem>,
}

pub fn run_compare(args: &CompareArgs, store: &SessionStore, mode: OutputMode) -> Result<()> {
    let questions = builtin_questions();
    let mut state = store.load();
    ensure_order(&mut state, &questions);

    let mut items = Vec::new();
    let mut revealed = 0;
    let mut a_wrote = 0;
    let mut b_wrote = 0;

    for (idx, qid) in state.order.iter().enumerate() {
        let entry = state.entry(qid);
        let locks = state.lock_pair(qid);
        let has_a = entry.is_answered(Side::A);
        let has_b = entry.is_answered(Side::B);
        if locks.both_locked() {
            revealed += 1;
        }
        if has_a {
            a_wrote += 1;
        }
        if has_b {
            b_wrote += 1;
        }

        let include = if args.all {
            has_a || has_b
        } else {
            locks.both_locked()
        };
        if !include {
            continue;
        }

        items.push(CompareItem {
            number: idx + 1,
            set: question_by_id(&questions, qid).map_or(0, |q| q.set.number()),
            qid: qid.clone(),
            question: if args.no_questions {
                None
            } else {
                question_by_id(&questions, qid).map(|q| q.text.clone())
            },
            answer_a: entry.a.clone(),
            answer_b: entry.b.clone(),
            revealed: locks.both_locked(),
        });
    }

    let comparison = Comparison {
        player_a: state.players.display_name(Side::A),
        player_b: state.players.display_name(Side::B),
        total: state.order.len(),
        revealed,
        a_wrote,
        b_wrote,
        items,
    };

    render(mode, &comparison, |v, w| {
        writeln!(w, "{} & {}", v.player_a, v.player_b)?;
        writeln!(
            w,
            "Questions: {}   fully revealed: {}   {} wrote: {}   {} wrote: {}",
            v.total, v.revealed, v.player_a, v.a_wrote, v.player_b, v.b_wrote
        )?;
        writeln!(w)?;
        for item in &v.items {
            writeln!(w, "#{} (set {})", item.number, item.set)?;
            if let Some(q) = &item.question {
                writeln!(w, "  {q}")?;
            }
            let dash = "(empty)";
            writeln!(
                w,
                "  {}: {}",
                v.player_a,
                if item.answer_a.trim().is_empty() { dash } else { &item.answer_a }
            )?;
            writeln!(
                w,
                "  {}: {}",
                v.player_b,
                if item.answer_b.trim().is_empty() { dash } else { &item.answer_b }
            )?;
            writeln!(w)?;
        }
        if v.items.is_empty() {
            writeln!(w, "Nothing to show yet. Lock answers on both sides to reveal them.")?;
        }
        Ok(())
    })?;
    Ok(())
}
