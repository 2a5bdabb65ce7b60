//! Per-base genome uniqueness derived from chunk alignment hit counts, and
//! the strand-aware acceptance test applied to candidate probe windows.

use strum_macros::{Display, EnumString};

use crate::probes::constants;
use crate::probes::error::DesignError;
use crate::probes::orientation::Orientation;
use crate::probes::settings::UniquenessPolicy;

/// Ordinal uniqueness class. Ordering follows the numeric score, so the
/// aggregate over overlapping chunks is a plain `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString)]
pub enum UniquenessScore {
    #[strum(serialize = "unplaced")]
    Unplaced = 0,
    #[strum(serialize = "unique")]
    Unique = 1,
    #[strum(serialize = "low-repeat")]
    LowRepeat = 2,
    #[strum(serialize = "high-repeat")]
    HighRepeat = 3,
}

impl UniquenessScore {
    pub fn from_hits(hits: usize) -> Self {
        match hits {
            0 => UniquenessScore::Unplaced,
            constants::UNIQUE_HITS => UniquenessScore::Unique,
            h if h <= constants::LOW_REPEAT_MAX_HITS => UniquenessScore::LowRepeat,
            _ => UniquenessScore::HighRepeat,
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }
}

/// Overlays each chunk's score onto its span, keeping the worst score where
/// chunks overlap. Positions past the last chunk take the last chunk's score;
/// without any chunk every position is unplaced.
pub fn aggregate_scores(
    chunk_scores: &[UniquenessScore],
    chunk_size: usize,
    overlap: usize,
    len: usize,
) -> Result<Vec<UniquenessScore>, DesignError> {
    let mut covered = vec![None; len];
    overlay_scores(&mut covered, chunk_scores, chunk_size, overlap)?;

    let fallback = chunk_scores
        .last()
        .copied()
        .unwrap_or(UniquenessScore::Unplaced);

    Ok(covered.into_iter().map(|s| s.unwrap_or(fallback)).collect())
}

fn overlay_scores(
    covered: &mut [Option<UniquenessScore>],
    chunk_scores: &[UniquenessScore],
    chunk_size: usize,
    overlap: usize,
) -> Result<(), DesignError> {
    if chunk_size == 0 || overlap >= chunk_size {
        return Err(DesignError::InvalidConfig(format!(
            "cannot aggregate chunks with size {} and overlap {}",
            chunk_size, overlap
        )));
    }

    let step = chunk_size - overlap;
    let len = covered.len();
    for (i, &score) in chunk_scores.iter().enumerate() {
        let start = i * step;
        if start >= len {
            break;
        }
        let end = (start + chunk_size).min(len);
        for slot in &mut covered[start..end] {
            *slot = Some(slot.map_or(score, |existing| existing.max(score)));
        }
    }
    Ok(())
}

/// Scores a list of per-chunk hit counts.
pub fn classify_hits(hits: &[usize]) -> Vec<UniquenessScore> {
    hits.iter().map(|&h| UniquenessScore::from_hits(h)).collect()
}

/// Renders scores as a digit string, e.g. `"1112"`.
pub fn score_string(scores: &[UniquenessScore]) -> String {
    scores.iter().map(|s| char::from(b'0' + s.value())).collect()
}

/// Why a window failed the uniqueness acceptance test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniquenessFailure {
    Unplaced { position: usize },
    TooFewUnique { count: usize },
    TooManyLowRepeat { count: usize },
    TooManyHighRepeat { count: usize },
    LowRepeatAtEdge,
    HighRepeatAtEdge,
}

fn count(scores: &[UniquenessScore], class: UniquenessScore) -> usize {
    scores.iter().filter(|&&s| s == class).count()
}

/// Accepts or rejects a window's uniqueness sub-array.
///
/// The edge guard is strand dependent: a forward probe must keep its last
/// `edge_length` bases free of low and high repeats. A reverse probe must
/// keep its first `edge_length` bases free of low repeats and its last
/// `edge_length` bases free of high repeats.
pub fn check_window(
    scores: &[UniquenessScore],
    orientation: Orientation,
    policy: &UniquenessPolicy,
) -> Result<(), UniquenessFailure> {
    if let Some(position) = scores.iter().position(|&s| s == UniquenessScore::Unplaced) {
        return Err(UniquenessFailure::Unplaced { position });
    }

    let unique = count(scores, UniquenessScore::Unique);
    if unique < policy.min_unique {
        return Err(UniquenessFailure::TooFewUnique { count: unique });
    }

    let low = count(scores, UniquenessScore::LowRepeat);
    if low as f64 >= scores.len() as f64 * policy.max_low_repeat_fraction {
        return Err(UniquenessFailure::TooManyLowRepeat { count: low });
    }

    let high = count(scores, UniquenessScore::HighRepeat);
    if high >= policy.max_high_repeat {
        return Err(UniquenessFailure::TooManyHighRepeat { count: high });
    }

    let edge = policy.edge_length.min(scores.len());
    let head = &scores[..edge];
    let tail = &scores[scores.len() - edge..];

    let low_edge = match orientation {
        Orientation::Forward => tail,
        Orientation::Reverse => head,
    };
    if low_edge.contains(&UniquenessScore::LowRepeat) {
        return Err(UniquenessFailure::LowRepeatAtEdge);
    }
    if tail.contains(&UniquenessScore::HighRepeat) {
        return Err(UniquenessFailure::HighRepeatAtEdge);
    }

    Ok(())
}
