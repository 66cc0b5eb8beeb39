//! Tab-delimited primer reports for spreadsheet import

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use log::{info, warn};

use super::dsdna::design_primers;
use super::error::{DesignError, Result};
use super::melt::MeltingTemperature;
use super::types::{DesignConfig, MascPrimerSets, OverwritePolicy, Primer, PrimerPair, WriteOutcome};

/// Column header of the MASC PCR table
pub const MASC_COLUMNS: &str = "Set\tAmpLen\tTarget\tFwdBase\tMT\tFwdMod\tMT\tRev\tMT";

/// What ends up in a dsDNA primer file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DsdnaRecord {
    Primers(PrimerPair),
    /// The design was refused for a reason the user can fix
    Rejected(String),
}

impl DsdnaRecord {
    /// Keep validation failures as a record; propagate everything else.
    pub fn from_result(result: Result<PrimerPair>) -> Result<Self> {
        match result {
            Ok(pair) => Ok(Self::Primers(pair)),
            Err(e) if e.is_validation() => {
                warn!("Primer design rejected: {}", e);
                Ok(Self::Rejected(e.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Primers(pair) => vec![pair.forward.clone(), pair.reverse.clone()],
            Self::Rejected(message) => vec![format!("Error: {}", message)],
        }
    }
}

/// Write a dsDNA record, one line per primer.
pub fn write_dsdna_record(record: &DsdnaRecord, dest: &Path, policy: OverwritePolicy) -> Result<WriteOutcome> {
    if skip_existing(dest, policy) {
        return Ok(WriteOutcome::Skipped);
    }
    let mut contents = String::new();
    for line in record.lines() {
        contents.push_str(&line);
        contents.push('\n');
    }
    std::fs::write(dest, contents)?;
    info!("Wrote dsDNA primers to {}", dest.display());
    Ok(WriteOutcome::Written)
}

/// Design the cassette primers and write them (or the rejection) to `dest`.
pub fn generate_dsdna_primer_file(
    genome: &str,
    insert: &str,
    left_pos: usize,
    right_pos: usize,
    config: &DesignConfig,
    dest: &Path,
    policy: OverwritePolicy,
) -> Result<(DsdnaRecord, WriteOutcome)> {
    let record = DsdnaRecord::from_result(design_primers(genome, insert, left_pos, right_pos, config))?;
    let outcome = write_dsdna_record(&record, dest, policy)?;
    Ok((record, outcome))
}

/// A primer sequence with its melting temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimerCall {
    pub sequence: String,
    pub tm: f64,
}

impl PrimerCall {
    fn measure<M: MeltingTemperature + ?Sized>(primer: &Primer, melt: &M) -> Result<Self> {
        Ok(Self {
            sequence: primer.sequence.clone(),
            tm: melt.melting_temperature(&primer.sequence)?,
        })
    }
}

/// One line of the MASC PCR table.
#[derive(Debug, Clone, PartialEq)]
pub struct MascRow {
    /// 1-based set number
    pub set: usize,
    pub amplicon: Option<u32>,
    pub target: String,
    pub forward_base: PrimerCall,
    pub forward_modified: PrimerCall,
    pub reverse: PrimerCall,
}

impl fmt::Display for MascRow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let amplicon = self.amplicon.map(|a| a.to_string()).unwrap_or_default();
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.set,
            amplicon,
            self.target,
            self.forward_base.sequence,
            self.forward_base.tm,
            self.forward_modified.sequence,
            self.forward_modified.tm,
            self.reverse.sequence,
            self.reverse.tm
        )
    }
}

impl FromStr for MascRow {
    type Err = String;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 9 {
            return Err(format!("expected 9 columns, found {}", fields.len()));
        }

        let set = fields[0]
            .parse()
            .map_err(|_| format!("bad set number '{}'", fields[0]))?;
        let amplicon = match fields[1] {
            "" => None,
            text => Some(text.parse().map_err(|_| format!("bad amplicon length '{}'", text))?),
        };
        let call = |seq: &str, tm: &str| -> std::result::Result<PrimerCall, String> {
            Ok(PrimerCall {
                sequence: seq.to_string(),
                tm: tm.parse().map_err(|_| format!("bad temperature '{}'", tm))?,
            })
        };

        Ok(Self {
            set,
            amplicon,
            target: fields[2].to_string(),
            forward_base: call(fields[3], fields[4])?,
            forward_modified: call(fields[5], fields[6])?,
            reverse: call(fields[7], fields[8])?,
        })
    }
}

/// Pair every reverse primer with its oligo's unmodified and modified
/// forward primers.
pub fn masc_rows<M: MeltingTemperature + ?Sized>(sets: &MascPrimerSets, melt: &M) -> Result<Vec<MascRow>> {
    let mut base: HashMap<&str, &Primer> = HashMap::new();
    let mut modified: HashMap<&str, &Primer> = HashMap::new();
    for primer in &sets.forward {
        let slot = if primer.modified { &mut modified } else { &mut base };
        slot.insert(primer.oligo.as_str(), primer);
    }

    let missing = |oligo: &str, modified: bool| DesignError::MissingForwardPrimer {
        oligo: oligo.to_string(),
        modified,
    };

    let mut rows = Vec::new();
    for (i, reverse_set) in sets.reverse_sets.iter().enumerate() {
        for rev in reverse_set {
            ensure_single_field(&rev.oligo)?;
            let bf = base.get(rev.oligo.as_str()).ok_or_else(|| missing(rev.oligo.as_str(), false))?;
            let mf = modified.get(rev.oligo.as_str()).ok_or_else(|| missing(rev.oligo.as_str(), true))?;
            rows.push(MascRow {
                set: i + 1,
                amplicon: rev.amplicon,
                target: rev.oligo.clone(),
                forward_base: PrimerCall::measure(bf, melt)?,
                forward_modified: PrimerCall::measure(mf, melt)?,
                reverse: PrimerCall::measure(rev, melt)?,
            });
        }
    }
    Ok(rows)
}

/// Render the full MASC PCR table, header block included.
pub fn format_masc_report<M: MeltingTemperature + ?Sized>(
    sets: &MascPrimerSets,
    melt: &M,
    target_temp: f64,
) -> Result<String> {
    let mut out = format!("Target Temperature: {}\t\n", target_temp);
    out.push_str(&melt.describe());
    out.push_str("\n\n");
    out.push_str(MASC_COLUMNS);
    out.push('\n');
    for row in masc_rows(sets, melt)? {
        out.push_str(&row.to_string());
        out.push('\n');
    }
    Ok(out)
}

/// Write the MASC PCR table to `dest`.
pub fn write_masc_report<M: MeltingTemperature + ?Sized>(
    sets: &MascPrimerSets,
    melt: &M,
    target_temp: f64,
    dest: &Path,
    policy: OverwritePolicy,
) -> Result<WriteOutcome> {
    if skip_existing(dest, policy) {
        return Ok(WriteOutcome::Skipped);
    }
    let report = format_masc_report(sets, melt, target_temp)?;
    std::fs::write(dest, report)?;
    info!("Wrote MASC PCR primers to {}", dest.display());
    Ok(WriteOutcome::Written)
}

/// Pipeline entry point: only builds the table if it is not there yet.
pub fn generate_masc_pcr_file<M: MeltingTemperature + ?Sized>(
    sets: &MascPrimerSets,
    melt: &M,
    target_temp: f64,
    dest: &Path,
) -> Result<WriteOutcome> {
    write_masc_report(sets, melt, target_temp, dest, OverwritePolicy::SkipExisting)
}

/// Read back the rows of a MASC PCR table.
pub fn parse_masc_report(text: &str) -> Result<Vec<MascRow>> {
    let mut lines = text.lines().enumerate();
    lines
        .by_ref()
        .find(|(_, line)| line.trim_end() == MASC_COLUMNS)
        .ok_or_else(|| DesignError::MalformedRow {
            line: 0,
            reason: "column header not found".to_string(),
        })?;

    lines
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            line.parse::<MascRow>()
                .map_err(|reason| DesignError::MalformedRow { line: i + 1, reason })
        })
        .collect()
}

/// Oligo names become a table cell; a tab or line break would split the row.
fn ensure_single_field(name: &str) -> Result<()> {
    if name.contains(['\t', '\n', '\r']) {
        return Err(DesignError::InvalidConfig(format!(
            "oligo name {:?} contains a tab or line break",
            name
        )));
    }
    Ok(())
}

fn skip_existing(dest: &Path, policy: OverwritePolicy) -> bool {
    if policy == OverwritePolicy::SkipExisting && dest.exists() {
        info!("{} already exists, leaving it in place", dest.display());
        return true;
    }
    false
}
