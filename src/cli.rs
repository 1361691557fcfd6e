//! Command-line interface definitions
//!
//! Shared by the binary and by `xtask` (man page generation).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Version string with git SHA and build date.
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    ", built ",
    env!("CHATREEL_BUILD_DATE"),
    ")"
);

/// Chatreel - scripted chat demo player
#[derive(Parser, Debug)]
#[command(name = "chatreel")]
#[command(version = VERSION)]
#[command(about = "Play scripted AI chat demos in the terminal")]
#[command(long_about = "Chatreel replays a canned AI conversation: a user message, a \
thinking checklist, a response streamed character by character with inline citations, \
and a closing artifact card.\n\n\
Run interactively with `chatreel play`, or headless with `chatreel transcript`.")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a demo in the terminal
    #[command(long_about = "Play a demo in the terminal.\n\n\
Keys: r replay, space pause/resume, +/- speed, m toggle reduced motion, \
? help, q/Esc/Ctrl-C quit.\n\n\
EXAMPLES:\n  \
chatreel play\n  \
chatreel play --script demos/rag-comparison.toml --speed 2")]
    Play(PlayArgs),

    /// Run a demo headless and print its timeline and final frame
    #[command(long_about = "Run a demo on a virtual clock, without a terminal UI.\n\n\
Prints every phase change with its time, then the frame at the stop time.\n\n\
EXAMPLES:\n  \
chatreel transcript\n  \
chatreel transcript --at 3700\n  \
chatreel transcript --replay-at 2000 --json")]
    Transcript(TranscriptArgs),

    /// Inspect and validate demo scripts
    #[command(subcommand)]
    Script(ScriptCommands),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Options shared by `play` and `transcript`.
#[derive(Args, Debug, Clone, Default)]
pub struct ScriptArgs {
    /// Demo script (TOML); the built-in demo if omitted
    #[arg(short, long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Reveal the response at once instead of streaming it
    #[arg(long)]
    pub reduced_motion: bool,
}

#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    #[command(flatten)]
    pub input: ScriptArgs,

    /// Playback speed multiplier (0.1 to 16)
    #[arg(long, value_name = "X")]
    pub speed: Option<f64>,
}

#[derive(Args, Debug, Clone)]
pub struct TranscriptArgs {
    #[command(flatten)]
    pub input: ScriptArgs,

    /// Stop the clock at this time in milliseconds (default: run to the end)
    #[arg(long, value_name = "MS")]
    pub at: Option<u64>,

    /// Replay the demo at this time in milliseconds
    #[arg(long, value_name = "MS")]
    pub replay_at: Option<u64>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ScriptCommands {
    /// Print a script as TOML (the built-in demo if no file is given)
    Show {
        /// Script file to print
        file: Option<PathBuf>,
    },

    /// Validate a script and report citation coverage
    Check {
        /// Script file to check
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Open configuration file in the default editor
    Edit,

    /// Add missing fields to the config file
    #[command(long_about = "Add missing fields to the config file.\n\n\
Existing values and comments are kept. Shows the fields to be added and asks \
for confirmation unless --yes is given.")]
    Migrate {
        /// Apply without asking
        #[arg(short, long)]
        yes: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_transcript_flags() {
        let cli = Cli::try_parse_from([
            "chatreel",
            "-vv",
            "transcript",
            "--script",
            "demo.toml",
            "--reduced-motion",
            "--at",
            "3700",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Transcript(args) => {
                assert_eq!(args.input.script, Some(PathBuf::from("demo.toml")));
                assert!(args.input.reduced_motion);
                assert_eq!(args.at, Some(3700));
                assert_eq!(args.replay_at, None);
                assert!(args.json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["chatreel", "play", "--speed", "2", "--log-file", "x.log"]).unwrap();
        assert_eq!(cli.log_file, Some(PathBuf::from("x.log")));
        match cli.command {
            Commands::Play(args) => assert_eq!(args.speed, Some(2.0)),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn script_check_requires_file() {
        assert!(Cli::try_parse_from(["chatreel", "script", "check"]).is_err());
    }
}
