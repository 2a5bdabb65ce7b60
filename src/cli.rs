use clap::{Parser, Subcommand};

use crate::commands;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split the target into chunks for the genome alignment search
    Chunk(commands::chunk::ChunkCommand),
    /// Design capture probes from the target and its chunk alignment hits
    Design(commands::design::DesignCommand),
}

#[derive(Parser)]
#[command(
    name = "capture-probes",
    color = clap::ColorChoice::Always,
    version,
    about = "Design hybridization capture probes over genome-unique regions",
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}
