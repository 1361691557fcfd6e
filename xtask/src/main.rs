//! Development tasks for chatreel.
//!
//! Run with `cargo xtask <task>`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xtask", about = "Development tasks for chatreel")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages for chatreel and every subcommand
    Man {
        /// Output directory
        #[arg(short, long, default_value = "target/man")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    match Xtask::parse().task {
        Task::Man { out } => generate_man_pages(&out),
    }
}

fn generate_man_pages(out: &Path) -> Result<()> {
    fs::create_dir_all(out).with_context(|| format!("Failed to create {}", out.display()))?;

    let cmd = chatreel::cli::Cli::command();
    write_page(out, &cmd, "chatreel")?;
    for sub in cmd.get_subcommands() {
        let name = format!("chatreel-{}", sub.get_name());
        write_page(out, sub, &name)?;
    }
    Ok(())
}

fn write_page(out: &Path, cmd: &clap::Command, name: &str) -> Result<()> {
    let cmd = cmd.clone().name(name.to_string());
    let mut buffer = Vec::new();
    clap_mangen::Man::new(cmd).render(&mut buffer)?;

    let path = out.join(format!("{}.1", name));
    fs::write(&path, buffer).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Generated {}", path.display());
    Ok(())
}
