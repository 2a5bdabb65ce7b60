use thiserror::Error;

#[derive(Error, Debug)]
pub enum DesignError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Target sequence is empty")]
    EmptySequence,

    #[error("Invalid nucleotide '{base}' at position {position}")]
    InvalidBase { position: usize, base: char },

    #[error("Expected {expected} chunk scores, found {found}")]
    ChunkCountMismatch { expected: usize, found: usize },

    #[error("Unrecognised chunk identifier: {0}")]
    UnknownChunk(String),

    #[error("Chunk index {index} out of range for {count} chunks")]
    ChunkOutOfRange { index: usize, count: usize },

    #[error("No sequence record found in {0}")]
    MissingRecord(String),

    #[error("Malformed alignment record at line {0}")]
    MalformedRecord(u64),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Regex pattern error: {0}")]
    Regex(#[from] regex::Error),
}
