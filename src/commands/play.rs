//! Play command handler

use anyhow::Result;

use chatreel::cli::PlayArgs;
use chatreel::config::clamp_speed;
use chatreel::player::{play_demo, PlaybackResult, PlayerOptions};
use chatreel::Config;

use super::load_script;

/// Resolve player options: flags override the config file.
pub fn player_options(args: &PlayArgs, config: &Config) -> PlayerOptions {
    PlayerOptions {
        reduced_motion: args.input.reduced_motion || config.playback.reduced_motion,
        speed: args.speed.map(clamp_speed).unwrap_or_else(|| config.speed()),
        theme: config.theme(),
    }
}

/// Play a demo in the terminal.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: PlayArgs) -> Result<()> {
    let config = Config::load()?;
    let script = load_script(&args.input)?;
    let options = player_options(&args, &config);
    let theme = options.theme.clone();

    match play_demo(script, options)? {
        PlaybackResult::Finished => println!("{}", theme.success_text("Demo finished.")),
        PlaybackResult::Interrupted => println!("{}", theme.secondary_text("Demo stopped.")),
    }
    Ok(())
}
