//! Single-base hill climbing of a probe window onto the Tm target.
//!
//! Each step widens the window while it melts too low and narrows it while
//! it melts too high. Composition and uniqueness are only checked once the
//! Tm is in range, and that check is final: a window rejected there is not
//! adjusted further. A search that stops moving, or that steps back onto the
//! window it left two steps earlier, ends as stalled.

use crate::probes::composition::{gc_percent, has_homopolymer};
use crate::probes::melting::MeltingTemperature;
use crate::probes::orientation::Orientation;
use crate::probes::settings::DesignSettings;
use crate::probes::uniqueness::{check_window, UniquenessFailure, UniquenessScore};

/// Half-open window `[start, end)` on the forward strand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: usize,
    pub end: usize,
}

impl Window {
    pub fn new(start: usize, end: usize) -> Self {
        Window { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompositionFailure {
    Homopolymer,
    GcContent { gc: f64 },
}

/// Terminal state of one adjustment.
#[derive(Debug, Clone, PartialEq)]
pub enum AdjustOutcome {
    Accepted { window: Window, tm: f64, gc: f64 },
    RejectedComposition { window: Window, failure: CompositionFailure },
    RejectedUniqueness { window: Window, failure: UniquenessFailure },
    RejectedBounds { window: Window },
    Stalled { window: Window },
}

impl AdjustOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, AdjustOutcome::Accepted { .. })
    }

    /// The window the search ended on.
    pub fn window(&self) -> Window {
        match *self {
            AdjustOutcome::Accepted { window, .. }
            | AdjustOutcome::RejectedComposition { window, .. }
            | AdjustOutcome::RejectedUniqueness { window, .. }
            | AdjustOutcome::RejectedBounds { window }
            | AdjustOutcome::Stalled { window } => window,
        }
    }
}

pub struct Adjuster<'a, T: MeltingTemperature> {
    seq: &'a [u8],
    uniqueness: &'a [UniquenessScore],
    settings: &'a DesignSettings,
    tm_model: &'a T,
}

impl<'a, T: MeltingTemperature> Adjuster<'a, T> {
    /// `seq` and `uniqueness` must have the same length.
    pub fn new(
        seq: &'a [u8],
        uniqueness: &'a [UniquenessScore],
        settings: &'a DesignSettings,
        tm_model: &'a T,
    ) -> Self {
        debug_assert_eq!(seq.len(), uniqueness.len());
        Adjuster {
            seq,
            uniqueness,
            settings,
            tm_model,
        }
    }

    pub fn adjust(&self, initial: Window, orientation: Orientation) -> AdjustOutcome {
        let s = self.settings;
        let mut window = initial;
        let mut before_previous = None;

        loop {
            let len = window.len();
            if window.end > self.seq.len() || len < s.min_length || len > s.max_length {
                return AdjustOutcome::RejectedBounds { window };
            }

            let tm = self.tm_model.tm(&self.seq[window.start..window.end]);

            if s.tm.contains(tm) {
                return self.validate(window, orientation, tm);
            }

            let previous = window;
            if tm < s.tm.low {
                match orientation {
                    Orientation::Forward => window.start = window.start.saturating_sub(1),
                    Orientation::Reverse => window.end = (window.end + 1).min(self.seq.len()),
                }
            } else {
                match orientation {
                    Orientation::Forward => {
                        window.start = (window.start + 1).min(window.end - s.min_length)
                    }
                    Orientation::Reverse => {
                        window.end = (window.end - 1).max(window.start + s.min_length)
                    }
                }
            }

            // one boundary moves by one base, so any cycle revisits the window two steps back
            if window == previous || before_previous == Some(window) {
                return AdjustOutcome::Stalled { window };
            }
            before_previous = Some(previous);
        }
    }

    fn validate(&self, window: Window, orientation: Orientation, tm: f64) -> AdjustOutcome {
        let s = self.settings;
        let bases = &self.seq[window.start..window.end];

        if has_homopolymer(bases, s.max_homopolymer) {
            return AdjustOutcome::RejectedComposition {
                window,
                failure: CompositionFailure::Homopolymer,
            };
        }

        let gc = gc_percent(bases);
        if gc <= s.gc_low || gc >= s.gc_high {
            return AdjustOutcome::RejectedComposition {
                window,
                failure: CompositionFailure::GcContent { gc },
            };
        }

        match check_window(
            &self.uniqueness[window.start..window.end],
            orientation,
            &s.uniqueness,
        ) {
            Ok(()) => AdjustOutcome::Accepted { window, tm, gc },
            Err(failure) => AdjustOutcome::RejectedUniqueness { window, failure },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probes::settings::TmRange;
    use UniquenessScore::*;

    const ACGT_100: &[u8] = b"ACGTACGTACGTACGTACGTACGTACGTACGTACGTACGTACGTACGTACGTACGTACGTACGTACGTACGTACGTACGTACGTACGTACGTACGTACGT";

    fn by_length(seq: &[u8]) -> f64 {
        seq.len() as f64
    }

    fn settings(low: f64, high: f64) -> DesignSettings {
        DesignSettings {
            default_length: 40,
            min_length: 30,
            max_length: 60,
            tm: TmRange { low, high },
            ..DesignSettings::default()
        }
    }

    #[test]
    fn in_range_window_is_returned_unchanged() {
        let unique = vec![Unique; ACGT_100.len()];
        let settings = settings(35.0, 45.0);
        let adjuster = Adjuster::new(ACGT_100, &unique, &settings, &by_length);

        let outcome = adjuster.adjust(Window::new(10, 50), Orientation::Forward);
        match outcome {
            AdjustOutcome::Accepted { window, tm, gc } => {
                assert_eq!(window, Window::new(10, 50));
                assert_eq!(tm, 40.0);
                assert_eq!(gc, 50.0);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn forward_widens_towards_five_prime() {
        let unique = vec![Unique; ACGT_100.len()];
        let settings = settings(45.0, 50.0);
        let adjuster = Adjuster::new(ACGT_100, &unique, &settings, &by_length);

        let outcome = adjuster.adjust(Window::new(20, 60), Orientation::Forward);
        assert_eq!(outcome.window(), Window::new(15, 60));
        assert!(outcome.is_accepted());
    }

    #[test]
    fn reverse_widens_towards_three_prime() {
        let unique = vec![Unique; ACGT_100.len()];
        let settings = settings(45.0, 50.0);
        let adjuster = Adjuster::new(ACGT_100, &unique, &settings, &by_length);

        let outcome = adjuster.adjust(Window::new(20, 60), Orientation::Reverse);
        assert_eq!(outcome.window(), Window::new(20, 65));
        assert!(outcome.is_accepted());
    }

    #[test]
    fn narrowing_moves_one_boundary() {
        let unique = vec![Unique; ACGT_100.len()];
        let settings = settings(30.0, 35.0);
        let adjuster = Adjuster::new(ACGT_100, &unique, &settings, &by_length);

        let forward = adjuster.adjust(Window::new(0, 50), Orientation::Forward);
        assert_eq!(forward.window(), Window::new(15, 50));
        let reverse = adjuster.adjust(Window::new(0, 50), Orientation::Reverse);
        assert_eq!(reverse.window(), Window::new(0, 35));
    }

    #[test]
    fn widening_stalls_at_sequence_edges() {
        let unique = vec![Unique; ACGT_100.len()];
        let settings = settings(50.0, 55.0);
        let adjuster = Adjuster::new(ACGT_100, &unique, &settings, &by_length);

        let forward = adjuster.adjust(Window::new(0, 40), Orientation::Forward);
        assert_eq!(forward, AdjustOutcome::Stalled { window: Window::new(0, 40) });

        let reverse = adjuster.adjust(Window::new(70, 100), Orientation::Reverse);
        assert_eq!(reverse, AdjustOutcome::Stalled { window: Window::new(70, 100) });
    }

    #[test]
    fn narrowing_stalls_at_min_length() {
        let unique = vec![Unique; ACGT_100.len()];
        let settings = settings(10.0, 20.0);
        let adjuster = Adjuster::new(ACGT_100, &unique, &settings, &by_length);

        let outcome = adjuster.adjust(Window::new(0, 40), Orientation::Forward);
        assert_eq!(outcome, AdjustOutcome::Stalled { window: Window::new(10, 40) });
    }

    #[test]
    fn tm_jumping_over_the_range_stalls() {
        let unique = vec![Unique; ACGT_100.len()];
        let settings = settings(40.5, 40.5);
        let adjuster = Adjuster::new(ACGT_100, &unique, &settings, &by_length);

        assert_eq!(
            adjuster.adjust(Window::new(20, 60), Orientation::Forward),
            AdjustOutcome::Stalled { window: Window::new(20, 60) }
        );
        assert_eq!(
            adjuster.adjust(Window::new(20, 60), Orientation::Reverse),
            AdjustOutcome::Stalled { window: Window::new(20, 60) }
        );
        // narrowing from above lands on the same pair of windows
        assert_eq!(
            adjuster.adjust(Window::new(18, 60), Orientation::Forward),
            AdjustOutcome::Stalled { window: Window::new(19, 60) }
        );
    }

    #[test]
    fn widening_past_max_length_is_out_of_bounds() {
        let unique = vec![Unique; ACGT_100.len()];
        let settings = settings(90.0, 95.0);
        let adjuster = Adjuster::new(ACGT_100, &unique, &settings, &by_length);

        let outcome = adjuster.adjust(Window::new(50, 90), Orientation::Forward);
        assert_eq!(outcome, AdjustOutcome::RejectedBounds { window: Window::new(29, 90) });

        let short = adjuster.adjust(Window::new(0, 10), Orientation::Forward);
        assert_eq!(short, AdjustOutcome::RejectedBounds { window: Window::new(0, 10) });
    }

    #[test]
    fn composition_is_checked_once_tm_fits() {
        let mut seq = ACGT_100.to_vec();
        for b in &mut seq[10..16] {
            *b = b'A';
        }
        let unique = vec![Unique; seq.len()];
        let settings = settings(35.0, 45.0);
        let adjuster = Adjuster::new(&seq, &unique, &settings, &by_length);

        assert_eq!(
            adjuster.adjust(Window::new(0, 40), Orientation::Forward),
            AdjustOutcome::RejectedComposition {
                window: Window::new(0, 40),
                failure: CompositionFailure::Homopolymer,
            }
        );

        let at_rich: Vec<u8> = b"ATTA".iter().cycle().take(100).copied().collect();
        let adjuster = Adjuster::new(&at_rich, &unique, &settings, &by_length);
        assert_eq!(
            adjuster.adjust(Window::new(0, 40), Orientation::Forward),
            AdjustOutcome::RejectedComposition {
                window: Window::new(0, 40),
                failure: CompositionFailure::GcContent { gc: 0.0 },
            }
        );
    }

    #[test]
    fn uniqueness_failure_is_final() {
        let mut scores = vec![Unique; ACGT_100.len()];
        scores[45] = LowRepeat;
        let settings = settings(35.0, 45.0);
        let adjuster = Adjuster::new(ACGT_100, &scores, &settings, &by_length);

        assert_eq!(
            adjuster.adjust(Window::new(10, 50), Orientation::Forward),
            AdjustOutcome::RejectedUniqueness {
                window: Window::new(10, 50),
                failure: UniquenessFailure::LowRepeatAtEdge,
            }
        );
        // the reverse strand guards the other edge for low repeats
        assert!(adjuster
            .adjust(Window::new(10, 50), Orientation::Reverse)
            .is_accepted());
    }

    fn gc_window(len: usize, gc_bases: usize) -> Vec<u8> {
        b"GC".iter()
            .cycle()
            .take(gc_bases)
            .chain(b"AT".iter().cycle().take(len - gc_bases))
            .copied()
            .collect()
    }

    #[test]
    fn gc_bounds_are_exclusive() {
        let settings = settings(35.0, 55.0);

        for (len, gc_bases, gc) in [(40, 14, 35.0), (40, 26, 65.0)] {
            let seq = gc_window(len, gc_bases);
            let unique = vec![Unique; seq.len()];
            let adjuster = Adjuster::new(&seq, &unique, &settings, &by_length);
            assert_eq!(
                adjuster.adjust(Window::new(0, len), Orientation::Forward),
                AdjustOutcome::RejectedComposition {
                    window: Window::new(0, len),
                    failure: CompositionFailure::GcContent { gc },
                }
            );
        }

        let seq = gc_window(50, 18);
        let unique = vec![Unique; seq.len()];
        let adjuster = Adjuster::new(&seq, &unique, &settings, &by_length);
        assert_eq!(
            adjuster.adjust(Window::new(0, 50), Orientation::Forward),
            AdjustOutcome::Accepted {
                window: Window::new(0, 50),
                tm: 50.0,
                gc: 36.0,
            }
        );
    }
}
