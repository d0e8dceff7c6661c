use std::path::PathBuf;

use anyhow::Result;
use cardwire_core::config::Settings;
use clap::{Args, Subcommand};

pub mod fmt;
pub mod show;
pub mod upgrade;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a summary of every card.
    Show(ShowArgs),
    /// Re-encode cards in canonical form.
    Fmt(FmtArgs),
    /// Migrate cards to vCard 4.0.
    Upgrade(UpgradeArgs),
}

pub fn run(command: Command, settings: &Settings) -> Result<()> {
    match command {
        Command::Show(args) => show::run(&args),
        Command::Fmt(args) => fmt::run(&args, settings),
        Command::Upgrade(args) => upgrade::run(&args),
    }
}

#[derive(Args, Debug)]
pub struct IoArgs {
    /// vCard file to read, `-` for standard input.
    #[arg(default_value = "-")]
    pub input: PathBuf,
    /// Write to this file instead of standard output.
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub io: IoArgs,
    /// Print the decoded records as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct FmtArgs {
    #[command(flatten)]
    pub io: IoArgs,
    /// Also migrate cards to vCard 4.0 (same as `codec.upgrade`).
    #[arg(long)]
    pub upgrade: bool,
}

#[derive(Args, Debug)]
pub struct UpgradeArgs {
    #[command(flatten)]
    pub io: IoArgs,
}
