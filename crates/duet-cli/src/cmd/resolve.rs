//! `duet conflicts` / `duet resolve`: review and manually settle merge
//! conflicts persisted by the last import.

use anyhow::Result;
use clap::Args;
use duet_core::model::Side;
use duet_core::store::SessionStore;
use duet_core::{ConflictRecord, ErrorCode, Kept, resolve_conflict};
use serde::Serialize;

use crate::output::{CliError, OutputMode, render, render_error, render_success};
use crate::pending;

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Question id of the conflict.
    pub question: String,

    /// Side of the conflict.
    #[arg(short, long)]
    pub side: Side,

    /// Which copy to keep.
    #[arg(short, long)]
    pub keep: Kept,
}

#[derive(Serialize)]
struct PendingList {
    conflicts: Vec<ConflictRecord>,
}

pub fn run_conflicts(store: &SessionStore, mode: OutputMode) -> Result<()> {
    let Some(pending) = pending::load(store.dir())? else {
        render_error(mode, &CliError::from_code(ErrorCode::NoPendingConflicts))?;
        return Ok(());
    };

    let list = PendingList {
        conflicts: pending.report.conflicts,
    };
    render(mode, &list, |v, w| {
        writeln!(w, "{} pending conflict(s):", v.conflicts.len())?;
        for c in &v.conflicts {
            writeln!(
                w,
                "  {} side {}: {} (auto-kept {})",
                c.qid,
                c.side,
                c.kind.as_str(),
                c.kept.as_str()
            )?;
        }
        writeln!(w, "Settle one with: duet resolve <QID> --side <A|B> --keep <local|incoming>")
    })?;
    Ok(())
}

pub fn run_resolve(args: &ResolveArgs, store: &SessionStore, mode: OutputMode) -> Result<()> {
    let Some(mut pending) = pending::load(store.dir())? else {
        render_error(mode, &CliError::from_code(ErrorCode::NoPendingConflicts))?;
        anyhow::bail!("no pending merge");
    };

    let mut state = store.load();
    match resolve_conflict(
        &mut state,
        &pending.payload,
        &mut pending.report,
        &args.question,
        args.side,
        args.keep,
    ) {
        Ok(record) => {
            store.save(&state)?;
            if pending.report.is_clean() {
                pending::clear(store.dir())?;
            } else {
                pending::save(store.dir(), &pending.payload, &pending.report)?;
            }
            render_success(
                mode,
                &format!(
                    "Kept the {} copy for {} side {}. {} conflict(s) left.",
                    record.kept.as_str(),
                    record.qid,
                    record.side,
                    pending.report.conflicts.len()
                ),
            )?;
            Ok(())
        }
        Err(err) => {
            render_error(mode, &CliError::with_detail(ErrorCode::ConflictNotFound, err))?;
            anyhow::bail!("conflict not found")
        }
    }
}
