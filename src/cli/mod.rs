//! CLI module for the storefront identity service

pub mod serve;

use clap::{Parser, Subcommand};

/// Storefront Identity - account, session, cart, and wishlist backend
#[derive(Parser)]
#[command(name = "storefront-identity")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,
}
