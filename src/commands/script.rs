//! Script subcommands handler

use std::path::Path;

use anyhow::{Context, Result};

use chatreel::{Config, DemoScript};

/// Print a script as TOML (the built-in demo if `file` is `None`).
pub fn handle_show(file: Option<&Path>) -> Result<()> {
    let script = match file {
        Some(path) => DemoScript::load(path)?,
        None => DemoScript::builtin(),
    };
    print!("{}", script.to_toml_string()?);
    Ok(())
}

/// Validate a script and report how its markers and citations line up.
///
/// Structural errors fail the command; orphan markers and unused
/// citations are reported as warnings.
pub fn handle_check(file: &Path) -> Result<()> {
    let theme = Config::load()?.theme();
    let script = DemoScript::load(file).with_context(|| format!("{} is not a valid script", file.display()))?;

    println!("{}", theme.success_text(&format!("{}: OK", file.display())));
    for line in summary_lines(&script) {
        println!("  {}", theme.primary_text(&line));
    }
    for warning in warning_lines(&script) {
        println!("  {} {}", theme.error_text("warning:"), warning);
    }
    Ok(())
}

/// Counts shown for a valid script.
pub fn summary_lines(script: &DemoScript) -> Vec<String> {
    vec![
        format!("{} thinking step(s)", script.thinking_steps.len()),
        format!("{} character(s) of response", script.response.chars().count()),
        format!("{} citation(s)", script.citations.len()),
        match &script.artifact {
            Some(artifact) => format!("artifact: {} \"{}\"", artifact.kind, artifact.title),
            None => "no artifact".to_string(),
        },
    ]
}

/// Coverage problems that do not stop playback.
pub fn warning_lines(script: &DemoScript) -> Vec<String> {
    let mut warnings: Vec<String> = script
        .orphan_markers()
        .into_iter()
        .map(|n| format!("marker [{}] has no citation and will show as text", n))
        .collect();
    warnings.extend(
        script
            .unused_citations()
            .into_iter()
            .map(|c| format!("citation {} ({}) is never referenced", c.number, c.id)),
    );
    warnings
}
