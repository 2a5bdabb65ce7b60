use clap::Parser;

use capture_probes::cli::{Cli, Commands};
use capture_probes::commands;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Chunk(cmd) => {
            commands::chunk::command(cmd);
        }
        Commands::Design(cmd) => {
            commands::design::command(cmd);
        }
    }
}
