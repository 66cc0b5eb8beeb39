//! Melting temperature estimates for report formatting
//!
//! Nearest-neighbour thermodynamics after SantaLucia (1998), PNAS 95(4),
//! "A unified view of polymer, dumbbell, and oligonucleotide DNA
//! nearest-neighbor thermodynamics".

use super::error::{DesignError, Result};
use super::iupac::{is_standard_base, reverse_complement};
use super::types::MeltParams;

/// Gas constant, cal/(K·mol)
const GAS_CONSTANT: f64 = 1.987;
const KELVIN: f64 = 273.15;

/// Unified nearest-neighbour stacks: (dinucleotide, ΔH kcal/mol, ΔS cal/(K·mol)).
/// The other six stacks are reverse complements of these.
const NN_STACKS: [(&str, f64, f64); 10] = [
    ("AA", -7.9, -22.2),
    ("AT", -7.2, -20.4),
    ("TA", -7.2, -21.3),
    ("CA", -8.5, -22.7),
    ("GT", -8.4, -22.4),
    ("CT", -7.8, -21.0),
    ("GA", -8.2, -22.2),
    ("CG", -10.6, -27.2),
    ("GC", -9.8, -24.4),
    ("GG", -8.0, -19.9),
];

/// Duplex initiation per terminal pair
const INIT_GC: (f64, f64) = (0.1, -2.8);
const INIT_AT: (f64, f64) = (2.3, 4.1);
const SYMMETRY_ENTROPY: f64 = -1.4;

/// Anything that can put a melting temperature on a primer.
pub trait MeltingTemperature {
    /// Melting temperature in °C
    fn melting_temperature(&self, seq: &str) -> Result<f64>;

    /// One-line, tab-separated summary of the conditions, for report headers
    fn describe(&self) -> String;
}

/// SantaLucia nearest-neighbour model with sodium-equivalent salt correction.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestNeighbor {
    pub params: MeltParams,
}

impl NearestNeighbor {
    pub fn new(params: MeltParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Monovalent-equivalent cation concentration in M (von Ahsen et al. 2001).
    fn sodium_equivalent(&self) -> f64 {
        (self.params.sodium_mm + 120.0 * self.params.magnesium_mm.sqrt()) / 1000.0
    }

    /// Effective strand concentration in M.
    fn strand_concentration(&self, self_complementary: bool) -> Result<f64> {
        let nm = if self_complementary {
            self.params.primer_nm
        } else {
            self.params.primer_nm - self.params.template_nm / 2.0
        };
        if nm <= 0.0 {
            return Err(DesignError::InvalidConfig(format!(
                "primer concentration {} nM is too low for template concentration {} nM",
                self.params.primer_nm, self.params.template_nm
            )));
        }
        Ok(nm * 1e-9)
    }
}

impl MeltingTemperature for NearestNeighbor {
    fn melting_temperature(&self, seq: &str) -> Result<f64> {
        let seq = seq.to_ascii_uppercase();
        if let Some((position, base)) = seq.char_indices().find(|(_, c)| !is_standard_base(*c)) {
            return Err(DesignError::UnrecognizedBase { base, position });
        }
        if seq.len() < 2 {
            return Err(DesignError::SequenceTooShort(seq));
        }

        let bytes = seq.as_bytes();
        let mut dh = 0.0;
        let mut ds = 0.0;

        for end in [bytes[0], bytes[bytes.len() - 1]] {
            let (h, s) = if matches!(end, b'G' | b'C') { INIT_GC } else { INIT_AT };
            dh += h;
            ds += s;
        }

        for (position, pair) in bytes.windows(2).enumerate() {
            let (h, s) = stack(pair, position)?;
            dh += h;
            ds += s;
        }

        let self_complementary = reverse_complement(&seq)? == seq;
        if self_complementary {
            ds += SYMMETRY_ENTROPY;
        }

        ds += 0.368 * (seq.len() - 1) as f64 * self.sodium_equivalent().ln();

        let ct = self.strand_concentration(self_complementary)?;
        let tm = 1000.0 * dh / (ds + GAS_CONSTANT * ct.ln()) - KELVIN;
        Ok(round_tm(tm))
    }

    fn describe(&self) -> String {
        format!(
            "Primer(nM): {}\tTemplateDNA(nM): {}\tNa(mM): {}\tMg(mM): {}",
            self.params.primer_nm,
            self.params.template_nm,
            self.params.sodium_mm,
            self.params.magnesium_mm
        )
    }
}

/// Stack parameters for the dinucleotide starting at `position`.
fn stack(pair: &[u8], position: usize) -> Result<(f64, f64)> {
    let forward = [pair[0], pair[1]];
    let reverse = [complement_byte(pair[1]), complement_byte(pair[0])];
    NN_STACKS
        .iter()
        .find(|(dinuc, _, _)| dinuc.as_bytes() == forward || dinuc.as_bytes() == reverse)
        .map(|&(_, h, s)| (h, s))
        .ok_or_else(|| {
            let offset = if is_standard_base(pair[0] as char) { 1 } else { 0 };
            DesignError::UnrecognizedBase {
                base: pair[offset] as char,
                position: position + offset,
            }
        })
}

fn complement_byte(b: u8) -> u8 {
    match b {
        b'A' => b'T',
        b'T' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        other => other,
    }
}

/// Temperatures are reported to two decimals.
fn round_tm(tm: f64) -> f64 {
    (tm * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_model() -> NearestNeighbor {
        NearestNeighbor::new(MeltParams::default()).unwrap()
    }

    #[test]
    fn test_known_value() {
        let tm = default_model().melting_temperature("AGAGATTCATAGCGAGTGTC").unwrap();
        assert!((tm - 50.2).abs() < 0.011, "got {}", tm);
    }

    #[test]
    fn test_gc_rich_melts_higher() {
        let model = default_model();
        let gc = model.melting_temperature("GCGCGGCCGCGCGGCCGCGC").unwrap();
        let at = model.melting_temperature("ATATTATAATTATATAAATA").unwrap();
        assert!(gc > at + 30.0, "gc={} at={}", gc, at);
    }

    #[test]
    fn test_strand_symmetry() {
        let model = default_model();
        let seq = "GACACTCGCTATGAATCTCT";
        let rc = reverse_complement(seq).unwrap();
        assert_eq!(
            model.melting_temperature(seq).unwrap(),
            model.melting_temperature(&rc).unwrap()
        );
        assert_eq!(
            model.melting_temperature("gacactcgctatgaatctct").unwrap(),
            model.melting_temperature(seq).unwrap()
        );
    }

    #[test]
    fn test_salt_raises_tm() {
        let seq = "AGAGATTCATAGCGAGTGTC";
        let base = default_model().melting_temperature(seq).unwrap();
        let sodium = NearestNeighbor::new(MeltParams { sodium_mm: 100.0, ..Default::default() })
            .unwrap()
            .melting_temperature(seq)
            .unwrap();
        let magnesium = NearestNeighbor::new(MeltParams { magnesium_mm: 2.0, ..Default::default() })
            .unwrap()
            .melting_temperature(seq)
            .unwrap();
        assert!(sodium > base);
        assert!(magnesium > sodium);
    }

    #[test]
    fn test_rounded_to_two_decimals() {
        let tm = default_model().melting_temperature("ACGTACGTAC").unwrap();
        assert_eq!(tm, round_tm(tm));
        assert_eq!(tm.to_string().parse::<f64>().unwrap(), tm);
    }

    #[test]
    fn test_rejects_bad_input() {
        let model = default_model();
        assert!(matches!(
            model.melting_temperature("A"),
            Err(DesignError::SequenceTooShort(_))
        ));
        assert!(matches!(
            model.melting_temperature("ACGNT"),
            Err(DesignError::UnrecognizedBase { base: 'N', position: 3 })
        ));
        let starved = NearestNeighbor::new(MeltParams { primer_nm: 10.0, template_nm: 25.0, ..Default::default() })
            .unwrap();
        assert!(matches!(
            starved.melting_temperature("ACGTTGCAAG"),
            Err(DesignError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_stack_reports_offending_offset() {
        assert_eq!(stack(b"CA", 4).unwrap(), (-8.5, -22.7));
        assert_eq!(stack(b"TG", 0).unwrap(), (-8.5, -22.7));
        assert!(matches!(
            stack(b"AN", 6),
            Err(DesignError::UnrecognizedBase { base: 'N', position: 7 })
        ));
        assert!(matches!(
            stack(b"XA", 2),
            Err(DesignError::UnrecognizedBase { base: 'X', position: 2 })
        ));
    }

    #[test]
    fn test_describe_header() {
        assert_eq!(
            default_model().describe(),
            "Primer(nM): 50\tTemplateDNA(nM): 25\tNa(mM): 50\tMg(mM): 0"
        );
    }
}
