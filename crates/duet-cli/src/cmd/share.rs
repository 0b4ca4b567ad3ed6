//! `duet share`: build the session link for the partner device.

use anyhow::Result;
use clap::Args;
use duet_core::build_share_url;
use duet_core::store::SessionStore;
use serde::Serialize;

use crate::output::{OutputMode, render};

/// Default page the share link points at; any base works, the fragment
/// carries the whole session.
const DEFAULT_BASE: &str = "https://duet.app/play";

#[derive(Args, Debug)]
pub struct ShareArgs {
    /// Base URL for the link (the token rides in the fragment).
    #[arg(long, default_value = DEFAULT_BASE)]
    pub base: String,
}

#[derive(Serialize)]
struct Shared {
    url: String,
}

pub fn run_share(args: &ShareArgs, store: &SessionStore, mode: OutputMode) -> Result<()> {
    let state = store.load();
    let url = build_share_url(&args.base, &state);
    render(mode, &Shared { url }, |v, w| {
        writeln!(w, "{}", v.url)?;
        writeln!(w, "Send this link to your partner; importing it merges both sessions.")
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_args_default_base() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: ShareArgs,
        }
        let w = Wrapper::parse_from(["test"]);
        assert_eq!(w.args.base, DEFAULT_BASE);
    }
}
