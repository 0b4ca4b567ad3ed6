//! `duet answer`: write this device's note for a question.

use anyhow::Result;
use clap::Args;
use duet_core::ErrorCode;
use duet_core::model::Side;
use duet_core::store::SessionStore;

use crate::cmd::{device_side, target_qid};
use crate::output::{CliError, OutputMode, render_error, render_success};

#[derive(Args, Debug)]
pub struct AnswerArgs {
    /// The answer text.
    pub text: String,

    /// Side to write for (defaults to this device's side record).
    #[arg(short, long)]
    pub side: Option<Side>,

    /// Question id (defaults to the current question).
    #[arg(long, value_name = "QID")]
    pub question: Option<String>,
}

pub fn run_answer(args: &AnswerArgs, store: &SessionStore, mode: OutputMode) -> Result<()> {
    let mut state = store.load();
    let side = device_side(args.side, store, mode)?;
    let qid = target_qid(&state, args.question.as_deref(), mode)?;

    // A locked answer is committed; it cannot be edited back into a draft.
    if state.lock_pair(&qid).side(side).locked {
        render_error(
            mode,
            &CliError::with_detail(ErrorCode::AnswerLocked, format!("{qid} side {side}")),
        )?;
        anyhow::bail!("answer is locked");
    }

    state.entry_mut(&qid).set_text(side, args.text.clone());
    store.save(&state)?;
    render_success(mode, &format!("Saved {side}'s answer for {qid}."))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_args_parse() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: AnswerArgs,
        }
        let w = Wrapper::parse_from(["test", "my answer", "--side", "B", "--question", "q05"]);
        assert_eq!(w.args.text, "my answer");
        assert_eq!(w.args.side, Some(Side::B));
        assert_eq!(w.args.question.as_deref(), Some("q05"));
    }
}
