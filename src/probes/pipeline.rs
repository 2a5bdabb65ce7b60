//! Turns a target and its chunk hit counts into scored probes.

use tracing::info;

use crate::probes::chunker::chunk_sequence;
use crate::probes::error::DesignError;
use crate::probes::melting::MeltingTemperature;
use crate::probes::scanner::{Attempt, ScanResult, Scanner};
use crate::probes::settings::DesignSettings;
use crate::probes::target::Target;
use crate::probes::uniqueness::{aggregate_scores, classify_hits, UniquenessScore};

/// Per-chunk alignment summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkSummary {
    pub index: usize,
    pub start: usize,
    pub end: usize,
    pub hits: usize,
    pub score: UniquenessScore,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Design {
    pub chunks: Vec<ChunkSummary>,
    pub uniqueness: Vec<UniquenessScore>,
    pub scan: ScanResult,
}

pub fn design_probes<T, F>(
    target: &Target,
    chunk_hits: &[usize],
    settings: &DesignSettings,
    tm_model: &T,
    observe: F,
) -> Result<Design, DesignError>
where
    T: MeltingTemperature,
    F: FnMut(&Attempt<'_>),
{
    settings.validate()?;

    let chunks = chunk_sequence(target.seq(), settings.chunk_size, settings.chunk_overlap)?;
    if chunks.len() != chunk_hits.len() {
        return Err(DesignError::ChunkCountMismatch {
            expected: chunks.len(),
            found: chunk_hits.len(),
        });
    }

    let chunk_scores = classify_hits(chunk_hits);
    let uniqueness = aggregate_scores(
        &chunk_scores,
        settings.chunk_size,
        settings.chunk_overlap,
        target.len(),
    )?;
    info!(
        "Aggregated uniqueness over {} bases from {} chunks",
        uniqueness.len(),
        chunks.len()
    );

    let scan = Scanner::new(target.seq(), &uniqueness, settings, tm_model).scan_with(observe);

    let chunks = chunks
        .iter()
        .zip(chunk_scores.iter().zip(chunk_hits.iter()))
        .map(|(chunk, (&score, &hits))| ChunkSummary {
            index: chunk.index,
            start: chunk.start,
            end: chunk.end(),
            hits,
            score,
        })
        .collect();

    Ok(Design {
        chunks,
        uniqueness,
        scan,
    })
}
