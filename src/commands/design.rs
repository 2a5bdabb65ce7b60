use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, error, info};

use crate::commands::logging::{self, CommonArgs};
use crate::probes::adjuster::AdjustOutcome;
use crate::probes::chunker::chunk_sequence;
use crate::probes::export::write_design;
use crate::probes::hits::read_hits;
use crate::probes::melting::NearestNeighborTm;
use crate::probes::pipeline::design_probes;
use crate::probes::scanner::Attempt;
use crate::probes::settings::DesignSettings;
use crate::probes::target::read_target;

#[derive(Parser, Debug, Clone)]
pub struct DesignCommand {
    // Target FASTA (optionally gzipped)
    #[arg()]
    target: PathBuf,

    // Tabular alignment output for the chunks, query id in column 1
    #[arg()]
    hits: PathBuf,

    // Output directory
    #[arg(long, short, default_value = "./output")]
    output_dir: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

pub fn command(cmd: DesignCommand) {
    if let Err(e) = logging::init(&cmd.common) {
        eprintln!("Failed to open log file: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(&cmd) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn log_attempt(attempt: &Attempt<'_>) {
    let window = attempt.outcome.window();
    match attempt.outcome {
        AdjustOutcome::Accepted { tm, gc, .. } => debug!(
            "{} [{}, {}) accepted as [{}, {}) tm={:.1} gc={:.1}",
            attempt.orientation,
            attempt.initial.start,
            attempt.initial.end,
            window.start,
            window.end,
            tm,
            gc
        ),
        other => debug!(
            "{} [{}, {}) rejected at [{}, {}): {:?}",
            attempt.orientation,
            attempt.initial.start,
            attempt.initial.end,
            window.start,
            window.end,
            other
        ),
    }
}

fn run(cmd: &DesignCommand) -> Result<(), Box<dyn std::error::Error>> {
    let settings = DesignSettings::load(Some(cmd.common.config.as_path()))?;
    let target = read_target(&cmd.target)?;

    let chunk_count =
        chunk_sequence(target.seq(), settings.chunk_size, settings.chunk_overlap)?.len();
    let hits = read_hits(&cmd.hits, chunk_count)?;

    let tm_model = NearestNeighborTm::new(settings.thermo);
    let design = design_probes(&target, &hits, &settings, &tm_model, log_attempt)?;

    let counts = &design.scan.counts;
    info!(
        "Attempts: {} total, {} accepted, {} bounds, {} stalled, {} homopolymer, {} gc, {} uniqueness",
        counts.total,
        counts.accepted,
        counts.bounds_failed,
        counts.stalled,
        counts.homopolymer_failed,
        counts.gc_failed,
        counts.uniqueness_failed
    );

    write_design(&design, &cmd.output_dir)?;
    Ok(())
}
