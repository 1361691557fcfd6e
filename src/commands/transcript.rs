//! Transcript command handler

use std::time::Duration;

use anyhow::{bail, Context, Result};

use chatreel::cli::TranscriptArgs;
use chatreel::playback::{record, PlaybackOptions, TranscriptPlan};
use chatreel::Config;

use super::load_script;

/// Build the headless run plan from the flags.
pub fn plan(args: &TranscriptArgs) -> TranscriptPlan {
    TranscriptPlan {
        stop_at: args.at.map(Duration::from_millis),
        replay_at: args.replay_at.map(Duration::from_millis),
    }
}

/// Run a demo on a virtual clock and print the result.
pub fn handle(args: TranscriptArgs) -> Result<()> {
    if let (Some(at), Some(replay_at)) = (args.at, args.replay_at) {
        if replay_at > at {
            bail!("--replay-at ({}ms) is later than --at ({}ms)", replay_at, at);
        }
    }

    let config = Config::load()?;
    let script = load_script(&args.input)?;
    let options = PlaybackOptions {
        reduced_motion: args.input.reduced_motion || config.playback.reduced_motion,
    };

    let transcript = record(script, options, plan(&args));

    if args.json {
        let json = serde_json::to_string_pretty(&transcript).context("Failed to serialize transcript")?;
        println!("{}", json);
    } else {
        print!("{}", transcript.render_plain());
    }
    Ok(())
}
