//! `duet side`: show, set, or clear which side this device plays.
//!
//! The record is sticky: set once, it survives until an explicit clear or
//! reset, independently of the game state.

use anyhow::Result;
use clap::Args;
use duet_core::model::Side;
use duet_core::store::SessionStore;
use serde::Serialize;

use crate::output::{OutputMode, render, render_success};

#[derive(Args, Debug)]
pub struct SideArgs {
    /// Side to record for this device.
    pub side: Option<Side>,

    /// Forget the recorded side.
    #[arg(long, conflicts_with = "side")]
    pub clear: bool,
}

#[derive(Serialize)]
struct SideStatus {
    side: Option<Side>,
}

pub fn run_side(args: &SideArgs, store: &SessionStore, mode: OutputMode) -> Result<()> {
    if args.clear {
        store.clear_side()?;
        return Ok(render_success(mode, "Device side cleared.")?);
    }
    if let Some(side) = args.side {
        store.set_side(side)?;
        return Ok(render_success(mode, &format!("This device now plays side {side}."))?);
    }

    let status = SideStatus { side: store.side() };
    render(mode, &status, |v, w| match v.side {
        Some(side) => writeln!(w, "This device plays side {side}."),
        None => writeln!(w, "No side set. Run `duet side A` or `duet side B`."),
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_args_parse() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: SideArgs,
        }
        let w = Wrapper::parse_from(["test", "B"]);
        assert_eq!(w.args.side, Some(Side::B));
        let w = Wrapper::parse_from(["test", "--clear"]);
        assert!(w.args.clear);
    }
}
