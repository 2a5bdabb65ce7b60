pub mod adjuster;
pub mod chunker;
pub mod composition;
pub mod constants;
pub mod error;
pub mod export;
pub mod hits;
pub mod melting;
pub mod orientation;
pub mod pipeline;
pub mod scanner;
pub mod settings;
pub mod target;
pub mod uniqueness;
