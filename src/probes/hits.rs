//! Counts tabular alignment records per chunk.

use std::io::Read;
use std::path::Path;
use csv::ReaderBuilder;
use regex::Regex;
use tracing::{info, warn};

use crate::probes::constants;
use crate::probes::error::DesignError;
use crate::probes::target::open_maybe_gz;

/// Reads tab-separated alignment output (query id in the first column) and
/// returns one hit count per chunk. Chunks that never appear have no hits.
pub fn count_hits<R: Read>(reader: R, chunk_count: usize) -> Result<Vec<usize>, DesignError> {
    let pattern = Regex::new(&format!(r"^{}(\d+)$", regex::escape(constants::CHUNK_ID_PREFIX)))?;

    let mut rdr = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .comment(Some(b'#'))
        .flexible(true)
        .from_reader(reader);

    let mut hits = vec![0; chunk_count];
    let mut records = 0u64;

    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let query = record
            .get(0)
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or(DesignError::MalformedRecord(line))?;

        let index: usize = pattern
            .captures(query)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
            .ok_or_else(|| DesignError::UnknownChunk(query.to_string()))?;

        if index >= chunk_count {
            return Err(DesignError::ChunkOutOfRange {
                index,
                count: chunk_count,
            });
        }

        hits[index] += 1;
        records += 1;
    }

    let unplaced = hits.iter().filter(|&&h| h == 0).count();
    if unplaced > 0 {
        warn!("{} of {} chunks have no alignment hits", unplaced, chunk_count);
    }
    info!("Counted {} alignment records over {} chunks", records, chunk_count);

    Ok(hits)
}

pub fn read_hits(path: &Path, chunk_count: usize) -> Result<Vec<usize>, DesignError> {
    info!("Reading alignment hits from {}", path.display());
    count_hits(open_maybe_gz(path)?, chunk_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLAST: &str = "\
# BLASTN 2.14.0+
chunk_0\tchr1\t100.00\t50\t0\t0\t1\t50\t1000\t1049\t1e-20\t93.5
chunk_1\tchr1\t100.00\t50\t0\t0\t1\t50\t1025\t1074\t1e-20\t93.5
chunk_1\tchr7\t96.00\t50\t2\t0\t1\t50\t5000\t5049\t1e-15\t80.1
chunk_3\tchr2\t100.00\t50\t0\t0\t1\t50\t10\t59\t1e-20\t93.5
";

    #[test]
    fn counts_records_per_chunk() {
        let hits = count_hits(BLAST.as_bytes(), 4).unwrap();
        assert_eq!(hits, vec![1, 2, 0, 1]);
    }

    #[test]
    fn empty_output_means_no_hits() {
        assert_eq!(count_hits("".as_bytes(), 3).unwrap(), vec![0, 0, 0]);
    }

    #[test]
    fn rejects_foreign_and_out_of_range_ids() {
        assert!(matches!(
            count_hits("read_7\tchr1\n".as_bytes(), 3),
            Err(DesignError::UnknownChunk(_))
        ));
        assert!(matches!(
            count_hits("chunk_3\tchr1\n".as_bytes(), 3),
            Err(DesignError::ChunkOutOfRange { index: 3, count: 3 })
        ));
    }

    #[test]
    fn query_column_only_needs_an_id() {
        let hits = count_hits("chunk_2\nchunk_2\tchrX\textra\n".as_bytes(), 3).unwrap();
        assert_eq!(hits, vec![0, 0, 2]);
    }
}
