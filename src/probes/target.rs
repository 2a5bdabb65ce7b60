//! Loading and validation of the target sequence.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use bio::io::fasta;
use flate2::read::MultiGzDecoder;
use tracing::info;

use crate::probes::error::DesignError;

/// An uppercase, validated nucleotide sequence over {A,C,G,T}.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    id: String,
    seq: Vec<u8>,
}

impl Target {
    pub fn new(id: &str, seq: &[u8]) -> Result<Self, DesignError> {
        if seq.is_empty() {
            return Err(DesignError::EmptySequence);
        }

        let mut normalized = Vec::with_capacity(seq.len());
        for (position, &base) in seq.iter().enumerate() {
            match base.to_ascii_uppercase() {
                b @ (b'A' | b'C' | b'G' | b'T') => normalized.push(b),
                _ => {
                    return Err(DesignError::InvalidBase {
                        position,
                        base: base as char,
                    })
                }
            }
        }

        Ok(Target {
            id: id.to_string(),
            seq: normalized,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn seq(&self) -> &[u8] {
        &self.seq
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }
}

/// Opens a file for reading, gunzipping it when the name ends in `.gz`.
pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn Read>, DesignError> {
    let file = BufReader::new(File::open(path)?);
    let gzipped = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false);

    if gzipped {
        Ok(Box::new(MultiGzDecoder::new(file)))
    } else {
        Ok(Box::new(file))
    }
}

/// Reads the first record of a FASTA file as the target.
pub fn read_target(path: &Path) -> Result<Target, DesignError> {
    info!("Reading target sequence from {}", path.display());

    let reader = fasta::Reader::new(open_maybe_gz(path)?);
    let record = reader
        .records()
        .next()
        .ok_or_else(|| DesignError::MissingRecord(path.display().to_string()))??;

    let target = Target::new(record.id(), record.seq())?;
    info!("Target {} has {} bases", target.id(), target.len());
    Ok(target)
}
