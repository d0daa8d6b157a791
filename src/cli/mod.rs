//! CLI for teamhub

pub mod serve;

use clap::{Parser, Subcommand};

/// Teamhub - team invites and passwordless club login
#[derive(Parser)]
#[command(name = "teamhub")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,
}
