//! Command-line argument parsing for the Rampart client.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Rampart client command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "rampart", about = "Rampart voxel-shooter client")]
pub struct CliArgs {
    /// Player name.
    #[arg(long)]
    pub name: Option<String>,

    /// Preferred team (team1, team2).
    #[arg(long)]
    pub team: Option<String>,

    /// Preferred weapon (rifle, smg, shotgun).
    #[arg(long)]
    pub weapon: Option<String>,

    /// Server address.
    #[arg(long)]
    pub server: Option<String>,

    /// Server port.
    #[arg(long)]
    pub port: Option<u16>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref name) = args.name {
            self.player.name = name.clone();
        }
        if let Some(ref team) = args.team {
            self.player.team = team.clone();
        }
        if let Some(ref weapon) = args.weapon {
            self.player.weapon = weapon.clone();
        }
        if let Some(ref addr) = args.server {
            self.network.server_address = addr.clone();
        }
        if let Some(port) = args.port {
            self.network.server_port = port;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
