//! Flat CSV outputs of a design run.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use csv::Writer;
use tracing::info;

use crate::probes::error::DesignError;
use crate::probes::pipeline::{ChunkSummary, Design};
use crate::probes::scanner::{Probe, ScanCounts};
use crate::probes::uniqueness::{score_string, UniquenessScore};

pub const PROBES_CSV: &str = "probes.csv";
pub const UNIQUENESS_CSV: &str = "uniqueness.csv";
pub const CHUNKS_CSV: &str = "chunks.csv";
pub const SCAN_COUNTS_CSV: &str = "scan_counts.csv";

pub fn write_probes<W: Write>(probes: &[Probe], writer: W) -> Result<(), DesignError> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record([
        "id",
        "start",
        "end",
        "orientation",
        "length",
        "sequence",
        "tm",
        "gc",
        "uniqueness",
    ])?;

    for (i, probe) in probes.iter().enumerate() {
        let sequence = String::from_utf8_lossy(&probe.oriented_sequence()).into_owned();
        wtr.write_record([
            format!("probe_{}", i + 1),
            probe.start.to_string(),
            probe.end.to_string(),
            probe.orientation.to_string(),
            probe.len().to_string(),
            sequence,
            format!("{:.2}", probe.tm),
            format!("{:.2}", probe.gc),
            score_string(&probe.uniqueness),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_uniqueness<W: Write>(
    uniqueness: &[UniquenessScore],
    writer: W,
) -> Result<(), DesignError> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(["position", "score"])?;
    for (position, score) in uniqueness.iter().enumerate() {
        wtr.write_record([position.to_string(), score.value().to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_chunks<W: Write>(chunks: &[ChunkSummary], writer: W) -> Result<(), DesignError> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(["index", "start", "end", "hits", "score", "class"])?;
    for chunk in chunks {
        wtr.write_record([
            chunk.index.to_string(),
            chunk.start.to_string(),
            chunk.end.to_string(),
            chunk.hits.to_string(),
            chunk.score.value().to_string(),
            chunk.score.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_scan_counts<W: Write>(counts: &ScanCounts, writer: W) -> Result<(), DesignError> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(["Outcome", "Count"])?;

    let rows = [
        ("Accepted", counts.accepted),
        ("Length Bounds Fail", counts.bounds_failed),
        ("Stalled", counts.stalled),
        ("Homopolymer Fail", counts.homopolymer_failed),
        ("GC Content Fail", counts.gc_failed),
        ("Uniqueness Fail", counts.uniqueness_failed),
        ("Total Attempts", counts.total),
    ];
    for (outcome, count) in rows {
        wtr.write_record([outcome, count.to_string().as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes all four CSV files into `output_dir`, creating it if needed.
pub fn write_design(design: &Design, output_dir: &Path) -> Result<(), DesignError> {
    if !output_dir.exists() {
        info!("Creating output directory {}", output_dir.display());
        std::fs::create_dir_all(output_dir)?;
    }

    write_probes(&design.scan.probes, File::create(output_dir.join(PROBES_CSV))?)?;
    write_uniqueness(&design.uniqueness, File::create(output_dir.join(UNIQUENESS_CSV))?)?;
    write_chunks(&design.chunks, File::create(output_dir.join(CHUNKS_CSV))?)?;
    write_scan_counts(&design.scan.counts, File::create(output_dir.join(SCAN_COUNTS_CSV))?)?;

    info!(
        "Wrote {} probes to {}",
        design.scan.probes.len(),
        output_dir.display()
    );
    Ok(())
}
