//! Walks the target placing probes with the adjuster, alternating strands
//! between accepted probes.

use tracing::info;

use crate::probes::adjuster::{AdjustOutcome, Adjuster, CompositionFailure, Window};
use crate::probes::melting::MeltingTemperature;
use crate::probes::orientation::Orientation;
use crate::probes::settings::DesignSettings;
use crate::probes::uniqueness::UniquenessScore;

/// An accepted probe. `sequence` is always the forward-strand substring.
#[derive(Debug, Clone, PartialEq)]
pub struct Probe {
    pub start: usize,
    pub end: usize,
    pub orientation: Orientation,
    pub sequence: Vec<u8>,
    pub tm: f64,
    pub gc: f64,
    pub uniqueness: Vec<UniquenessScore>,
}

impl Probe {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Sequence to synthesise, reverse complemented for `-` probes.
    pub fn oriented_sequence(&self) -> Vec<u8> {
        self.orientation.oriented(&self.sequence)
    }
}

/// One adjuster invocation, reported to scan observers.
#[derive(Debug)]
pub struct Attempt<'o> {
    pub initial: Window,
    pub orientation: Orientation,
    pub outcome: &'o AdjustOutcome,
}

/// Tally of scan attempts by outcome.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanCounts {
    pub accepted: u64,
    pub bounds_failed: u64,
    pub stalled: u64,
    pub homopolymer_failed: u64,
    pub gc_failed: u64,
    pub uniqueness_failed: u64,
    pub total: u64,
}

impl ScanCounts {
    pub fn record(&mut self, outcome: &AdjustOutcome) {
        self.total += 1;
        match outcome {
            AdjustOutcome::Accepted { .. } => self.accepted += 1,
            AdjustOutcome::RejectedBounds { .. } => self.bounds_failed += 1,
            AdjustOutcome::Stalled { .. } => self.stalled += 1,
            AdjustOutcome::RejectedComposition { failure, .. } => match failure {
                CompositionFailure::Homopolymer => self.homopolymer_failed += 1,
                CompositionFailure::GcContent { .. } => self.gc_failed += 1,
            },
            AdjustOutcome::RejectedUniqueness { .. } => self.uniqueness_failed += 1,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScanResult {
    pub probes: Vec<Probe>,
    pub counts: ScanCounts,
}

pub struct Scanner<'a, T: MeltingTemperature> {
    adjuster: Adjuster<'a, T>,
    seq: &'a [u8],
    uniqueness: &'a [UniquenessScore],
    settings: &'a DesignSettings,
}

impl<'a, T: MeltingTemperature> Scanner<'a, T> {
    pub fn new(
        seq: &'a [u8],
        uniqueness: &'a [UniquenessScore],
        settings: &'a DesignSettings,
        tm_model: &'a T,
    ) -> Self {
        Scanner {
            adjuster: Adjuster::new(seq, uniqueness, settings, tm_model),
            seq,
            uniqueness,
            settings,
        }
    }

    pub fn scan(&self) -> ScanResult {
        self.scan_with(|_| {})
    }

    /// Scans the whole target, handing every attempt to `observe`.
    ///
    /// A failed attempt slides the window one base forward on the same
    /// strand. An accepted probe moves the cursor `spacing` bases past its
    /// end and flips the strand. The scan stops once the window end reaches
    /// the end of the target.
    pub fn scan_with<F>(&self, mut observe: F) -> ScanResult
    where
        F: FnMut(&Attempt<'_>),
    {
        let s = self.settings;
        let len = self.seq.len();
        let mut result = ScanResult::default();
        let mut window = Window::new(0, s.default_length);
        let mut orientation = Orientation::Forward;

        while window.end < len {
            let outcome = self.adjuster.adjust(window, orientation);
            result.counts.record(&outcome);
            observe(&Attempt {
                initial: window,
                orientation,
                outcome: &outcome,
            });

            match outcome {
                AdjustOutcome::Accepted { window: accepted, tm, gc } => {
                    result.probes.push(Probe {
                        start: accepted.start,
                        end: accepted.end,
                        orientation,
                        sequence: self.seq[accepted.start..accepted.end].to_vec(),
                        tm,
                        gc,
                        uniqueness: self.uniqueness[accepted.start..accepted.end].to_vec(),
                    });
                    let next = accepted.end + s.spacing;
                    window = Window::new(next, next + s.default_length);
                    orientation = orientation.flip();
                }
                _ => {
                    window = Window::new(window.start + 1, window.end + 1);
                }
            }
        }

        info!(
            "Scanned {} windows, accepted {} probes",
            result.counts.total, result.counts.accepted
        );
        result
    }
}
