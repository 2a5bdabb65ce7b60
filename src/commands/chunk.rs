use clap::Parser;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::{error, info};

use crate::commands::logging::{self, CommonArgs};
use crate::probes::chunker::{chunk_sequence, write_chunks};
use crate::probes::settings::DesignSettings;
use crate::probes::target::read_target;

#[derive(Parser, Debug, Clone)]
pub struct ChunkCommand {
    // Target FASTA (optionally gzipped)
    #[arg()]
    target: PathBuf,

    // Chunk FASTA to hand to the aligner
    #[arg(long, short, default_value = "chunks.fasta")]
    output: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

pub fn command(cmd: ChunkCommand) {
    if let Err(e) = logging::init(&cmd.common) {
        eprintln!("Failed to open log file: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(&cmd) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cmd: &ChunkCommand) -> Result<(), Box<dyn std::error::Error>> {
    let settings = DesignSettings::load(Some(cmd.common.config.as_path()))?;
    let target = read_target(&cmd.target)?;

    let chunks = chunk_sequence(target.seq(), settings.chunk_size, settings.chunk_overlap)?;
    info!(
        "Split {} bases into {} chunks of {} (overlap {})",
        target.len(),
        chunks.len(),
        settings.chunk_size,
        settings.chunk_overlap
    );

    let writer = BufWriter::new(File::create(&cmd.output)?);
    write_chunks(&chunks, writer)?;
    info!("Chunks written to {}", cmd.output.display());
    Ok(())
}
