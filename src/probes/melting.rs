//! Melting temperature of a perfectly matched probe duplex.
//!
//! The default model is the two-state nearest-neighbour calculation with the
//! Allawi & SantaLucia (1997) unified parameters, terminal A/T and G/C
//! initiation, and the SantaLucia (1998) entropy salt correction.

use crate::probes::settings::ThermoSettings;

/// Gas constant in cal/(K·mol).
const R: f64 = 1.987;

const INIT_AT: (f64, f64) = (2.3, 4.1);
const INIT_GC: (f64, f64) = (0.1, -2.8);

pub trait MeltingTemperature {
    /// Tm in °C of `seq` annealed to its exact complement.
    fn tm(&self, seq: &[u8]) -> f64;
}

impl<F> MeltingTemperature for F
where
    F: Fn(&[u8]) -> f64,
{
    fn tm(&self, seq: &[u8]) -> f64 {
        self(seq)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestNeighborTm {
    thermo: ThermoSettings,
}

impl Default for NearestNeighborTm {
    fn default() -> Self {
        NearestNeighborTm::new(ThermoSettings::default())
    }
}

impl NearestNeighborTm {
    pub fn new(thermo: ThermoSettings) -> Self {
        NearestNeighborTm { thermo }
    }
}

/// (ΔH kcal/mol, ΔS cal/(K·mol)) of a stacked pair, keyed by the 5'→3'
/// dinucleotide on the top strand.
fn stack(a: u8, b: u8) -> Option<(f64, f64)> {
    let params = match (a, b) {
        (b'A', b'A') | (b'T', b'T') => (-7.9, -22.2),
        (b'A', b'T') => (-7.2, -20.4),
        (b'T', b'A') => (-7.2, -21.3),
        (b'C', b'A') | (b'T', b'G') => (-8.5, -22.7),
        (b'G', b'T') | (b'A', b'C') => (-8.4, -22.4),
        (b'C', b'T') | (b'A', b'G') => (-7.8, -21.0),
        (b'G', b'A') | (b'T', b'C') => (-8.2, -22.2),
        (b'C', b'G') => (-10.6, -27.2),
        (b'G', b'C') => (-9.8, -24.4),
        (b'G', b'G') | (b'C', b'C') => (-8.0, -19.9),
        _ => return None,
    };
    Some(params)
}

fn terminal(base: u8) -> (f64, f64) {
    match base {
        b'G' | b'C' => INIT_GC,
        b'A' | b'T' => INIT_AT,
        _ => (0.0, 0.0),
    }
}

impl MeltingTemperature for NearestNeighborTm {
    fn tm(&self, seq: &[u8]) -> f64 {
        if seq.len() < 2 {
            return 0.0;
        }
        let seq = seq.to_ascii_uppercase();

        let (mut dh, mut ds) = (0.0, 0.0);
        for &end in [seq[0], seq[seq.len() - 1]].iter() {
            let (h, s) = terminal(end);
            dh += h;
            ds += s;
        }
        for pair in seq.windows(2) {
            if let Some((h, s)) = stack(pair[0], pair[1]) {
                dh += h;
                ds += s;
            }
        }

        let na = self.thermo.na_mm * 1e-3;
        ds += 0.368 * (seq.len() - 1) as f64 * na.ln();

        let high = self.thermo.dnac1_nm.max(self.thermo.dnac2_nm);
        let low = self.thermo.dnac1_nm.min(self.thermo.dnac2_nm);
        let k = (high - low / 2.0) * 1e-9;

        1000.0 * dh / (ds + R * k.ln()) - 273.15
    }
}
