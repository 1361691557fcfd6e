//! Config subcommands handler

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};

use chatreel::config::{migrate_config, MigrateResult};
use chatreel::theme::Theme;
use chatreel::Config;

/// Show current configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show() -> Result<()> {
    let config = Config::load()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("# {}", Config::config_path()?.display());
    println!("{}", config.theme().primary_text(&toml_str));
    Ok(())
}

/// Open configuration file in the default editor.
///
/// Uses $EDITOR environment variable (defaults to 'vi').
#[cfg(not(tarpaulin_include))]
pub fn handle_edit() -> Result<()> {
    let config_path = Config::config_path()?;
    let theme = Config::load()?.theme();

    if !config_path.exists() {
        Config::default().save()?;
    }

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    println!(
        "{}",
        theme.primary_text(&format!("Opening {} with {}", config_path.display(), editor))
    );

    std::process::Command::new(&editor)
        .arg(&config_path)
        .status()
        .with_context(|| format!("Failed to open editor {}", editor))?;

    // Report a broken edit now rather than on the next run
    if let Err(e) = Config::load() {
        println!("{}", theme.error_text(&format!("Warning: {}", e)));
    }
    Ok(())
}

/// Migrate config file by adding missing fields.
///
/// A missing file is created with every default. Otherwise the missing
/// fields are previewed and written after confirmation, or straight away
/// with `yes`.
#[cfg(not(tarpaulin_include))]
pub fn handle_migrate(yes: bool) -> Result<()> {
    let config_path = Config::config_path()?;
    let file_exists = config_path.exists();

    let content = if file_exists {
        fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?
    } else {
        String::new()
    };

    let result = migrate_config(&content)?;
    let theme = toml::from_str::<Config>(&result.content)
        .map(|config| config.theme())
        .unwrap_or_default();

    if !result.has_changes() {
        println!("{}", theme.primary_text("Config is already up to date."));
        return Ok(());
    }

    let question = if file_exists {
        println!("{}", theme.primary_text(&migrate_summary(&result)));
        format!("Apply these changes to {}?", config_path.display())
    } else {
        println!(
            "{}",
            theme.primary_text("Config file does not exist. Will create with default settings.")
        );
        format!("Create {}?", config_path.display())
    };
    println!();
    for (added, line) in preview_lines(&result) {
        if added {
            println!("{}", theme.success_text(&format!("+ {}", line)));
        } else {
            println!("  {}", line);
        }
    }
    println!();

    if !yes && !prompt_confirmation(&question)? {
        println!("{}", theme.primary_text("No changes made."));
        return Ok(());
    }

    write_config(&config_path, &result.content)?;
    let done = if file_exists {
        "Config updated successfully."
    } else {
        "Config file created successfully."
    };
    println!("{}", theme.success_text(done));
    Ok(())
}

fn write_config(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// One-line summary of what a migration adds.
pub fn migrate_summary(result: &MigrateResult) -> String {
    let fields = result.added_fields.len();
    match result.sections_added.len() {
        0 => format!("Found {} missing field(s):", fields),
        sections => format!(
            "Found {} missing field(s) in {} new section(s):",
            fields, sections
        ),
    }
}

/// Lines of the migrated file worth showing, flagged when added.
///
/// Added fields are shown under their section header; sections with no
/// additions and untouched fields are left out.
pub fn preview_lines<'a>(result: &'a MigrateResult) -> Vec<(bool, &'a str)> {
    let mut lines = Vec::new();
    let mut section = "";
    let mut pending_header: Option<&str> = None;

    for line in result.content.lines() {
        let trimmed = line.trim();

        if let Some(name) = trimmed.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
            section = name;
            pending_header = Some(line);
            continue;
        }

        let Some((key, _)) = trimmed.split_once('=') else {
            continue;
        };
        if !result
            .added_fields
            .contains(&format!("{}.{}", section, key.trim()))
        {
            continue;
        }

        if let Some(header) = pending_header.take() {
            let new_section = result.sections_added.iter().any(|s| s == section);
            lines.push((new_section, header));
        }
        lines.push((true, line));
    }
    lines
}

/// Prompt user for yes/no confirmation.
///
/// Returns true if user confirms (y/yes), false otherwise.
/// If stdin is not a TTY (non-interactive), returns false.
fn prompt_confirmation(message: &str) -> Result<bool> {
    let theme = Theme::default();

    if !atty::is(atty::Stream::Stdin) {
        println!(
            "{}",
            theme.secondary_text("Non-interactive mode: use --yes to apply changes automatically")
        );
        return Ok(false);
    }

    print!("{} [y/N] ", theme.primary_text(message));
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;

    let response = input.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}
