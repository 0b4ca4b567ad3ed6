//! `duet import`: decode a partner's link and merge it into local state.

use anyhow::Result;
use clap::Args;
use duet_core::store::SessionStore;
use duet_core::{ErrorCode, MergeReport, decode_token_from_url, merge_into_state};
use serde::Serialize;
use std::io::Write;

use crate::output::{CliError, OutputMode, render, render_error};
use crate::pending;

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// The partner's share link (either #session=... or legacy #s=...).
    pub url: String,
}

#[derive(Serialize)]
struct Imported {
    #[serde(flatten)]
    report: MergeReport,
}

pub fn run_import(args: &ImportArgs, store: &SessionStore, mode: OutputMode) -> Result<()> {
    let payload = match decode_token_from_url(&args.url) {
        Ok(payload) => payload,
        Err(err) => {
            render_error(mode, &CliError::with_detail(ErrorCode::NoSessionFound, err))?;
            anyhow::bail!("no importable session");
        }
    };

    let mut state = store.load();
    let report = merge_into_state(&mut state, &payload);
    store.save(&state)?;

    if report.is_clean() {
        pending::clear(store.dir())?;
    } else {
        // Keep the payload around so `duet resolve` can act on it later.
        pending::save(store.dir(), &payload, &report)?;
    }

    render(mode, &Imported { report: report.clone() }, |v, w| {
        render_report_human(&v.report, w)
    })?;
    Ok(())
}

fn render_report_human(report: &MergeReport, w: &mut dyn Write) -> std::io::Result<()> {
    if !report.merged && report.is_clean() {
        return writeln!(w, "Already in sync, nothing to merge.");
    }
    writeln!(w, "Merge complete.")?;
    if report.applied.locked_wins > 0 {
        writeln!(w, "  {} locked answer(s) adopted", report.applied.locked_wins)?;
    }
    if report.applied.filled_empties > 0 {
        writeln!(w, "  {} empty slot(s) filled", report.applied.filled_empties)?;
    }
    if report.is_clean() {
        writeln!(w, "  no conflicts")?;
    } else {
        writeln!(w, "  {} conflict(s):", report.conflicts.len())?;
        for c in &report.conflicts {
            writeln!(
                w,
                "    {} side {}: {}, kept {}",
                c.qid,
                c.side,
                c.kind.as_str(),
                c.kept.as_str()
            )?;
        }
        writeln!(w, "  run `duet conflicts` / `duet resolve` to review them")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_args_take_a_url() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: ImportArgs,
        }
        let w = Wrapper::parse_from(["test", "https://example.com/#session=abc"]);
        assert!(w.args.url.contains("#session="));
    }
}
