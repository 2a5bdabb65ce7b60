//! Immutable tunables for one design run, loaded from layered sources.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use dotenvy::dotenv;
use std::path::Path;

use crate::probes::constants;
use crate::probes::error::DesignError;

pub const ENV_PREFIX: &str = "CAPTURE_PROBES";

/// Closed melting temperature interval in °C.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TmRange {
    pub low: f64,
    pub high: f64,
}

impl TmRange {
    pub fn contains(&self, tm: f64) -> bool {
        tm >= self.low && tm <= self.high
    }
}

/// Thresholds of the per-window uniqueness acceptance test.
#[derive(Debug, Clone, PartialEq)]
pub struct UniquenessPolicy {
    pub min_unique: usize,
    pub max_low_repeat_fraction: f64,
    pub max_high_repeat: usize,
    pub edge_length: usize,
}

impl Default for UniquenessPolicy {
    fn default() -> Self {
        UniquenessPolicy {
            min_unique: constants::MIN_UNIQUE_BASES,
            max_low_repeat_fraction: constants::MAX_LOW_REPEAT_FRACTION,
            max_high_repeat: constants::MAX_HIGH_REPEAT_BASES,
            edge_length: constants::EDGE_LENGTH,
        }
    }
}

/// Buffer conditions for the nearest-neighbour Tm model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermoSettings {
    pub na_mm: f64,
    pub dnac1_nm: f64,
    pub dnac2_nm: f64,
}

impl Default for ThermoSettings {
    fn default() -> Self {
        ThermoSettings {
            na_mm: constants::NA_MM,
            dnac1_nm: constants::DNAC1_NM,
            dnac2_nm: constants::DNAC2_NM,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DesignSettings {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub default_length: usize,
    pub min_length: usize,
    pub max_length: usize,
    pub spacing: usize,
    pub tm: TmRange,
    pub gc_low: f64,
    pub gc_high: f64,
    pub max_homopolymer: usize,
    pub uniqueness: UniquenessPolicy,
    pub thermo: ThermoSettings,
}

impl Default for DesignSettings {
    fn default() -> Self {
        DesignSettings {
            chunk_size: constants::CHUNK_SIZE,
            chunk_overlap: constants::CHUNK_OVERLAP,
            default_length: constants::DEFAULT_PROBE_LENGTH,
            min_length: constants::MIN_PROBE_LENGTH,
            max_length: constants::MAX_PROBE_LENGTH,
            spacing: constants::PROBE_SPACING,
            tm: TmRange {
                low: constants::TM_LOW,
                high: constants::TM_HIGH,
            },
            gc_low: constants::GC_LOW,
            gc_high: constants::GC_HIGH,
            max_homopolymer: constants::MAX_HOMOPOLYMER_LENGTH,
            uniqueness: UniquenessPolicy::default(),
            thermo: ThermoSettings::default(),
        }
    }
}

impl DesignSettings {
    /// Distance between the starts of consecutive chunks.
    pub fn chunk_step(&self) -> usize {
        self.chunk_size - self.chunk_overlap
    }

    pub fn validate(&self) -> Result<(), DesignError> {
        let invalid = |msg: String| Err(DesignError::InvalidConfig(msg));

        if self.chunk_size == 0 {
            return invalid("chunk.size must be positive".to_string());
        }
        if self.chunk_overlap >= self.chunk_size {
            return invalid(format!(
                "chunk.overlap ({}) must be smaller than chunk.size ({})",
                self.chunk_overlap, self.chunk_size
            ));
        }
        if self.min_length == 0 || self.min_length > self.max_length {
            return invalid(format!(
                "probe length bounds [{}, {}] are empty",
                self.min_length, self.max_length
            ));
        }
        if self.default_length < self.min_length || self.default_length > self.max_length {
            return invalid(format!(
                "probe.default_length ({}) lies outside [{}, {}]",
                self.default_length, self.min_length, self.max_length
            ));
        }
        if !(self.tm.low <= self.tm.high) {
            return invalid(format!("tm range [{}, {}] is empty", self.tm.low, self.tm.high));
        }
        if !(0.0..=100.0).contains(&self.gc_low)
            || !(0.0..=100.0).contains(&self.gc_high)
            || self.gc_low >= self.gc_high
        {
            return invalid(format!(
                "gc bounds ({}, {}) must be increasing percentages",
                self.gc_low, self.gc_high
            ));
        }
        if self.max_homopolymer < 2 {
            return invalid("homopolymer.max_length must be at least 2".to_string());
        }
        let fraction = self.uniqueness.max_low_repeat_fraction;
        if !(fraction > 0.0 && fraction <= 1.0) {
            return invalid(format!(
                "uniqueness.max_low_repeat_fraction ({}) must lie in (0, 1]",
                fraction
            ));
        }
        if self.uniqueness.edge_length == 0 {
            return invalid("uniqueness.edge_length must be positive".to_string());
        }
        if self.uniqueness.max_high_repeat == 0 {
            return invalid("uniqueness.max_high_repeat must be at least 1".to_string());
        }
        if self.uniqueness.min_unique > self.max_length {
            return invalid(format!(
                "uniqueness.min_unique ({}) exceeds probe.max_length ({})",
                self.uniqueness.min_unique, self.max_length
            ));
        }
        if !(self.thermo.na_mm > 0.0 && self.thermo.dnac1_nm > 0.0 && self.thermo.dnac2_nm > 0.0) {
            return invalid("thermo concentrations must be positive".to_string());
        }
        Ok(())
    }

    /// Defaults, then the optional config file, then `CAPTURE_PROBES_*`
    /// environment variables.
    pub fn load(config_file: Option<&Path>) -> Result<Self, DesignError> {
        dotenv().ok();

        let d = DesignSettings::default();
        let mut builder = ConfigBuilder::<DefaultState>::default()
            .set_default("chunk.size", d.chunk_size as i64)?
            .set_default("chunk.overlap", d.chunk_overlap as i64)?
            .set_default("probe.default_length", d.default_length as i64)?
            .set_default("probe.min_length", d.min_length as i64)?
            .set_default("probe.max_length", d.max_length as i64)?
            .set_default("probe.spacing", d.spacing as i64)?
            .set_default("tm.low", d.tm.low)?
            .set_default("tm.high", d.tm.high)?
            .set_default("gc.low", d.gc_low)?
            .set_default("gc.high", d.gc_high)?
            .set_default("homopolymer.max_length", d.max_homopolymer as i64)?
            .set_default("uniqueness.min_unique", d.uniqueness.min_unique as i64)?
            .set_default(
                "uniqueness.max_low_repeat_fraction",
                d.uniqueness.max_low_repeat_fraction,
            )?
            .set_default("uniqueness.max_high_repeat", d.uniqueness.max_high_repeat as i64)?
            .set_default("uniqueness.edge_length", d.uniqueness.edge_length as i64)?
            .set_default("thermo.na_mm", d.thermo.na_mm)?
            .set_default("thermo.dnac1_nm", d.thermo.dnac1_nm)?
            .set_default("thermo.dnac2_nm", d.thermo.dnac2_nm)?;

        if let Some(path) = config_file {
            let name = path
                .to_str()
                .ok_or_else(|| DesignError::InvalidConfig("Invalid config path".to_string()))?;
            builder = builder.add_source(File::with_name(name).required(false));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = DesignSettings::from_config(&config)?;
        settings.validate()?;
        Ok(settings)
    }

    fn from_config(config: &Config) -> Result<Self, DesignError> {
        Ok(DesignSettings {
            chunk_size: config.get("chunk.size")?,
            chunk_overlap: config.get("chunk.overlap")?,
            default_length: config.get("probe.default_length")?,
            min_length: config.get("probe.min_length")?,
            max_length: config.get("probe.max_length")?,
            spacing: config.get("probe.spacing")?,
            tm: TmRange {
                low: config.get("tm.low")?,
                high: config.get("tm.high")?,
            },
            gc_low: config.get("gc.low")?,
            gc_high: config.get("gc.high")?,
            max_homopolymer: config.get("homopolymer.max_length")?,
            uniqueness: UniquenessPolicy {
                min_unique: config.get("uniqueness.min_unique")?,
                max_low_repeat_fraction: config.get("uniqueness.max_low_repeat_fraction")?,
                max_high_repeat: config.get("uniqueness.max_high_repeat")?,
                edge_length: config.get("uniqueness.edge_length")?,
            },
            thermo: ThermoSettings {
                na_mm: config.get("thermo.na_mm")?,
                dnac1_nm: config.get("thermo.dnac1_nm")?,
                dnac2_nm: config.get("thermo.dnac2_nm")?,
            },
        })
    }
}
