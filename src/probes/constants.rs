// Default tunables for capture probe design
//
// Chunking of the target for the external alignment search
pub const CHUNK_SIZE: usize = 50;
pub const CHUNK_OVERLAP: usize = 25;

// Probe window
pub const DEFAULT_PROBE_LENGTH: usize = 60;
pub const MIN_PROBE_LENGTH: usize = 40;
pub const MAX_PROBE_LENGTH: usize = 120;
pub const PROBE_SPACING: usize = 20;

// Melting temperature target (°C)
pub const TM_LOW: f64 = 68.0;
pub const TM_HIGH: f64 = 78.0;

// Composition (GC bounds are exclusive, in percent)
pub const GC_LOW: f64 = 35.0;
pub const GC_HIGH: f64 = 65.0;
pub const MAX_HOMOPOLYMER_LENGTH: usize = 5;

// Uniqueness acceptance
pub const MIN_UNIQUE_BASES: usize = 30;
pub const MAX_LOW_REPEAT_FRACTION: f64 = 0.25;
pub const MAX_HIGH_REPEAT_BASES: usize = 5;
pub const EDGE_LENGTH: usize = 30;

// Hit count thresholds for the uniqueness classes
pub const UNIQUE_HITS: usize = 1;
pub const LOW_REPEAT_MAX_HITS: usize = 3;

// Nearest-neighbour thermodynamics
pub const NA_MM: f64 = 50.0;
pub const DNAC1_NM: f64 = 25.0;
pub const DNAC2_NM: f64 = 25.0;

// Alignment output
pub const CHUNK_ID_PREFIX: &str = "chunk_";
