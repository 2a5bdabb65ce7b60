//! Splits the target into fixed-size overlapping chunks for the alignment search.

use std::io::Write;
use bio::io::fasta;
use tracing::info;

use crate::probes::constants;
use crate::probes::error::DesignError;

/// One full-length window of the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub index: usize,
    pub start: usize,
    pub seq: &'a [u8],
}

impl<'a> Chunk<'a> {
    pub fn end(&self) -> usize {
        self.start + self.seq.len()
    }

    /// Identifier used as the query name of the alignment search.
    pub fn id(&self) -> String {
        chunk_id(self.index)
    }
}

pub fn chunk_id(index: usize) -> String {
    format!("{}{}", constants::CHUNK_ID_PREFIX, index)
}

/// Emits windows of `chunk_size` at stride `chunk_size - overlap`, dropping
/// the trailing window that would run past the end.
pub fn chunk_sequence(
    seq: &[u8],
    chunk_size: usize,
    overlap: usize,
) -> Result<Vec<Chunk<'_>>, DesignError> {
    if chunk_size == 0 || overlap >= chunk_size {
        return Err(DesignError::InvalidConfig(format!(
            "cannot chunk with size {} and overlap {}",
            chunk_size, overlap
        )));
    }

    let step = chunk_size - overlap;
    let chunks = (0..seq.len())
        .step_by(step)
        .take_while(|&start| start + chunk_size <= seq.len())
        .enumerate()
        .map(|(index, start)| Chunk {
            index,
            start,
            seq: &seq[start..start + chunk_size],
        })
        .collect();

    Ok(chunks)
}

/// Writes chunks as FASTA records `chunk_<index>` with their offset in the
/// description.
pub fn write_chunks<W: Write>(chunks: &[Chunk<'_>], writer: W) -> Result<(), DesignError> {
    let mut writer = fasta::Writer::new(writer);
    for chunk in chunks {
        let description = format!("start={}", chunk.start);
        writer.write(&chunk.id(), Some(&description), chunk.seq)?;
    }
    writer.flush()?;
    info!("Wrote {} chunks", chunks.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn drops_trailing_short_chunk() {
        let chunks = chunk_sequence(b"AAAACCCCGGGGT", 4, 0).unwrap();
        let seqs: Vec<&[u8]> = chunks.iter().map(|c| c.seq).collect();
        assert_eq!(seqs, vec![&b"AAAA"[..], b"CCCC", b"GGGG"]);
        assert_eq!(chunks[2].start, 8);
        assert_eq!(chunks[2].end(), 12);
    }

    #[test]
    fn overlapping_chunks() {
        let chunks = chunk_sequence(b"ACGTACGTAC", 4, 2).unwrap();
        let starts: Vec<usize> = chunks.iter().map(|c| c.start).collect();
        assert_eq!(starts, vec![0, 2, 4, 6]);
        assert_eq!(chunks[1].seq, b"GTAC");
        assert_eq!(chunks[3].id(), "chunk_3");
    }

    #[test]
    fn short_sequence_has_no_chunks() {
        assert!(chunk_sequence(b"ACG", 4, 1).unwrap().is_empty());
    }

    #[test]
    fn rejects_degenerate_sizes() {
        assert!(chunk_sequence(b"ACGT", 0, 0).is_err());
        assert!(chunk_sequence(b"ACGT", 4, 4).is_err());
    }

    #[test]
    fn writes_fasta() {
        let chunks = chunk_sequence(b"ACGTAC", 4, 2).unwrap();
        let mut out = Vec::new();
        write_chunks(&chunks, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, ">chunk_0 start=0\nACGT\n>chunk_1 start=2\nGTAC\n");
    }

    proptest! {
        #[test]
        fn chunks_are_full_length_and_evenly_spaced(
            len in 0usize..300,
            chunk_size in 1usize..40,
            overlap_frac in 0.0f64..1.0,
        ) {
            let overlap = ((chunk_size as f64) * overlap_frac) as usize;
            prop_assume!(overlap < chunk_size);
            let seq = vec![b'A'; len];
            let chunks = chunk_sequence(&seq, chunk_size, overlap).unwrap();

            for (i, chunk) in chunks.iter().enumerate() {
                prop_assert_eq!(chunk.seq.len(), chunk_size);
                prop_assert_eq!(chunk.start, i * (chunk_size - overlap));
                prop_assert!(chunk.start + chunk_size <= len);
            }
            // the next window would not fit
            let next = chunks.len() * (chunk_size - overlap);
            prop_assert!(next + chunk_size > len);
        }
    }
}
