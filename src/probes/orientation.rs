use bio::alphabets::dna::revcomp;
use strum_macros::{Display, EnumString};

/// Strand a probe is designed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum Orientation {
    #[strum(serialize = "+")]
    Forward,
    #[strum(serialize = "-")]
    Reverse,
}

impl Orientation {
    pub fn flip(self) -> Self {
        match self {
            Orientation::Forward => Orientation::Reverse,
            Orientation::Reverse => Orientation::Forward,
        }
    }

    /// The probe sequence as synthesised: forward-strand bases for `+`,
    /// their reverse complement for `-`.
    pub fn oriented(self, forward: &[u8]) -> Vec<u8> {
        match self {
            Orientation::Forward => forward.to_vec(),
            Orientation::Reverse => revcomp(forward),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_strand_symbols() {
        assert_eq!("+".parse::<Orientation>().unwrap(), Orientation::Forward);
        assert_eq!("-".parse::<Orientation>().unwrap(), Orientation::Reverse);
        assert!("x".parse::<Orientation>().is_err());
        assert_eq!(Orientation::Reverse.to_string(), "-");
    }

    #[test]
    fn flips_and_reverse_complements() {
        assert_eq!(Orientation::Forward.flip(), Orientation::Reverse);
        assert_eq!(Orientation::Reverse.flip(), Orientation::Forward);
        assert_eq!(Orientation::Forward.oriented(b"AACG"), b"AACG".to_vec());
        assert_eq!(Orientation::Reverse.oriented(b"AACG"), b"CGTT".to_vec());
    }
}
