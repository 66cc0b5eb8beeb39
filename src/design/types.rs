//! Data types for primer design and report output

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{DesignError, Result};

/// Homology arm lengths used when building dsDNA primers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignConfig {
    /// Bases of genomic homology at the 5' end of each primer
    pub genome_overlap: usize,
    /// Bases of insert homology at the 3' end of each primer
    pub insert_overlap: usize,
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            genome_overlap: 40,
            insert_overlap: 20,
        }
    }
}

impl DesignConfig {
    pub fn new(genome_overlap: usize, insert_overlap: usize) -> Result<Self> {
        let config = Self {
            genome_overlap,
            insert_overlap,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.genome_overlap == 0 || self.insert_overlap == 0 {
            return Err(DesignError::InvalidConfig(format!(
                "overlaps must be positive (genome_overlap={}, insert_overlap={})",
                self.genome_overlap, self.insert_overlap
            )));
        }
        Ok(())
    }

    /// Length of every primer produced under this configuration
    pub fn primer_length(&self) -> usize {
        self.genome_overlap + self.insert_overlap
    }

    /// Shortest insert that can supply both insert windows
    pub fn min_insert_length(&self) -> usize {
        2 * self.insert_overlap
    }
}

/// A 1-indexed, inclusive genomic interval with `left <= right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenomicInterval {
    left: usize,
    right: usize,
}

impl GenomicInterval {
    /// Build an interval from two positions given in either order.
    pub fn new(a: usize, b: usize) -> Self {
        if a > b {
            Self { left: b, right: a }
        } else {
            Self { left: a, right: b }
        }
    }

    pub fn left(&self) -> usize {
        self.left
    }

    pub fn right(&self) -> usize {
        self.right
    }

    /// Number of genomic bases the insert replaces
    pub fn span(&self) -> usize {
        self.right - self.left + 1
    }
}

/// The forward and reverse dsDNA cassette primers for one replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimerPair {
    pub forward: String,
    pub reverse: String,
}

/// A single MASC PCR primer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Primer {
    /// Name of the oligo (edit target) this primer verifies
    pub oligo: String,
    pub sequence: String,
    /// Forward primers come in unmodified/modified (allele-specific) flavours
    #[serde(default)]
    pub modified: bool,
    /// Expected amplicon length; only meaningful for reverse primers
    #[serde(default)]
    pub amplicon: Option<u32>,
}

/// Primer sets as produced by the MASC PCR enumeration step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MascPrimerSets {
    /// Unmodified and modified forward primers for every oligo
    pub forward: Vec<Primer>,
    /// Reverse primers, one list per set
    pub reverse_sets: Vec<Vec<Primer>>,
}

impl MascPrimerSets {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Concentrations used for melting temperature estimates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeltParams {
    /// Primer strand concentration (nM)
    pub primer_nm: f64,
    /// Template strand concentration (nM)
    pub template_nm: f64,
    /// Monovalent cation concentration (mM)
    pub sodium_mm: f64,
    /// Free magnesium concentration (mM)
    pub magnesium_mm: f64,
}

impl Default for MeltParams {
    fn default() -> Self {
        Self {
            primer_nm: 50.0,
            template_nm: 25.0,
            sodium_mm: 50.0,
            magnesium_mm: 0.0,
        }
    }
}

impl MeltParams {
    pub fn validate(&self) -> Result<()> {
        if self.primer_nm <= 0.0 || self.sodium_mm <= 0.0 {
            return Err(DesignError::InvalidConfig(
                "primer and sodium concentrations must be positive".to_string(),
            ));
        }
        if self.template_nm < 0.0 || self.magnesium_mm < 0.0 {
            return Err(DesignError::InvalidConfig(
                "template and magnesium concentrations cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// What a report writer does when its destination already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverwritePolicy {
    /// Leave the existing file untouched
    SkipExisting,
    /// Recreate the file
    Replace,
}

/// Whether a writer produced a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Skipped,
}

/// Run-wide configuration, loadable from a (possibly partial) JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub design: DesignConfig,
    pub melt: MeltParams,
    /// Annealing temperature the MASC primers were chosen for (°C)
    pub target_temp: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            design: DesignConfig::default(),
            melt: MeltParams::default(),
            target_temp: 62.0,
        }
    }
}

impl RunConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.design.validate()?;
        config.melt.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_interval_normalizes_order() {
        let a = GenomicInterval::new(110, 101);
        let b = GenomicInterval::new(101, 110);
        assert_eq!(a, b);
        assert_eq!(a.left(), 101);
        assert_eq!(a.right(), 110);
        assert_eq!(a.span(), 10);
        assert_eq!(GenomicInterval::new(7, 7).span(), 1);
    }

    #[test]
    fn test_design_config_defaults_and_validation() {
        let config = DesignConfig::default();
        assert_eq!(config.primer_length(), 60);
        assert_eq!(config.min_insert_length(), 40);
        assert!(DesignConfig::new(0, 20).is_err());
        assert!(DesignConfig::new(40, 0).is_err());
        assert_eq!(DesignConfig::new(30, 15).unwrap().primer_length(), 45);
    }

    #[test]
    fn test_partial_run_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"design": {{"insert_overlap": 25}}, "target_temp": 58.5}}"#).unwrap();

        let config = RunConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.design.genome_overlap, 40);
        assert_eq!(config.design.insert_overlap, 25);
        assert_eq!(config.target_temp, 58.5);
        assert_eq!(config.melt, MeltParams::default());
    }

    #[test]
    fn test_run_config_rejects_zero_overlap() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"design": {{"genome_overlap": 0}}}}"#).unwrap();
        assert!(matches!(
            RunConfig::from_json_file(file.path()),
            Err(DesignError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_primer_sets_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "forward": [{{"oligo": "o1", "sequence": "ACGT"}},
                            {{"oligo": "o1", "sequence": "ACGA", "modified": true}}],
                "reverse_sets": [[{{"oligo": "o1", "sequence": "TTGC", "amplicon": 150}}]]
            }}"#
        )
        .unwrap();

        let sets = MascPrimerSets::from_json_file(file.path()).unwrap();
        assert_eq!(sets.forward.len(), 2);
        assert!(!sets.forward[0].modified);
        assert!(sets.forward[1].modified);
        assert_eq!(sets.reverse_sets[0][0].amplicon, Some(150));
    }
}
