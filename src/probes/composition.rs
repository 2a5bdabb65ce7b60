//! Sequence composition filters applied to candidate probes.

/// GC content in percent. An empty window has no defined content and
/// yields 0.
pub fn gc_percent(seq: &[u8]) -> f64 {
    if seq.is_empty() {
        return 0.0;
    }
    let gc = seq
        .iter()
        .map(|c| c.to_ascii_uppercase())
        .filter(|&c| c == b'G' || c == b'C')
        .count() as f64;
    100.0 * gc / seq.len() as f64
}

/// Length of the longest run of one repeated symbol, ignoring case.
pub fn longest_run(seq: &[u8]) -> usize {
    let mut longest = 0;
    let mut run = 0;
    let mut prev = None;
    for &c in seq {
        let c = c.to_ascii_uppercase();
        if Some(c) == prev {
            run += 1;
        } else {
            run = 1;
            prev = Some(c);
        }
        longest = longest.max(run);
    }
    longest
}

/// True if any single-symbol run reaches `max_len`.
pub fn has_homopolymer(seq: &[u8], max_len: usize) -> bool {
    longest_run(seq) >= max_len
}
