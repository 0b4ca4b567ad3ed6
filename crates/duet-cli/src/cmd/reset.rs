//! `duet reset`: wipe the whole session: state, device side, pending merge.

use anyhow::Result;
use clap::Args;
use duet_core::store::SessionStore;

use crate::output::{OutputMode, render_success};
use crate::pending;

#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Confirm the reset. Without this flag nothing is deleted.
    #[arg(long)]
    pub yes: bool,
}

pub fn run_reset(args: &ResetArgs, store: &SessionStore, mode: OutputMode) -> Result<()> {
    if !args.yes {
        render_success(
            mode,
            "This deletes all progress and answers on this device. Re-run with --yes to confirm.",
        )?;
        return Ok(());
    }

    store.clear()?;
    store.clear_side()?;
    pending::clear(store.dir())?;
    render_success(mode, "Session reset. All progress and answers deleted.")?;
    Ok(())
}
