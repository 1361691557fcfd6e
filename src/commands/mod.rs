//! CLI subcommand handlers

pub mod completions;
pub mod config;
pub mod play;
pub mod script;
pub mod transcript;

use anyhow::{Context, Result};

use chatreel::cli::ScriptArgs;
use chatreel::DemoScript;

/// Load the script named by `--script`, or the built-in demo.
pub fn load_script(args: &ScriptArgs) -> Result<DemoScript> {
    match &args.script {
        Some(path) => DemoScript::load(path)
            .with_context(|| format!("Failed to load script {}", path.display())),
        None => Ok(DemoScript::builtin()),
    }
}
