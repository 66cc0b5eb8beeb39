//! Loading genome and insert sequences from FASTA or raw text

use std::path::Path;

use bio::io::fasta;
use log::debug;

use super::error::{DesignError, Result};

/// A single named input sequence
#[derive(Debug, Clone)]
pub struct SequenceInput {
    pub name: String,
    pub sequence: String,
}

/// Parse text holding exactly one sequence, either as a FASTA record or as
/// bare sequence lines. Line breaks and other separators are left for the
/// design step to strip.
pub fn parse_single_sequence(text: &str) -> Result<SequenceInput> {
    if !text.trim_start().starts_with('>') {
        if text.trim().is_empty() {
            return Err(DesignError::EmptyInput("no sequence found".to_string()));
        }
        return Ok(SequenceInput {
            name: "Sequence_1".to_string(),
            sequence: text.to_string(),
        });
    }

    let mut records = Vec::new();
    for record in fasta::Reader::new(text.trim_start().as_bytes()).records() {
        records.push(record?);
    }

    match records.len() {
        0 => Err(DesignError::EmptyInput("no FASTA record found".to_string())),
        1 => {
            let record = &records[0];
            if record.seq().is_empty() {
                return Err(DesignError::EmptyInput(format!("record '{}' has no sequence", record.id())));
            }
            Ok(SequenceInput {
                name: record.id().to_string(),
                sequence: String::from_utf8_lossy(record.seq()).into_owned(),
            })
        }
        n => Err(DesignError::InvalidConfig(format!(
            "expected exactly 1 sequence, found {}",
            n
        ))),
    }
}

/// Read a single sequence from a FASTA or raw-sequence file.
pub fn read_sequence_file(path: &Path) -> Result<SequenceInput> {
    let text = std::fs::read_to_string(path)?;
    let input = parse_single_sequence(&text)?;
    debug!("Loaded '{}' from {}", input.name, path.display());
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_fasta_record() {
        let data = parse_single_sequence(">chr1 E. coli MG1655\nACGTACGT\nTTGA\n").unwrap();
        assert_eq!(data.name, "chr1");
        assert_eq!(data.sequence, "ACGTACGTTTGA");
    }

    #[test]
    fn test_parse_raw_sequence() {
        let data = parse_single_sequence("ACGT ACGT\nTTGA\n").unwrap();
        assert_eq!(data.name, "Sequence_1");
        assert_eq!(data.sequence, "ACGT ACGT\nTTGA\n");
    }

    #[test]
    fn test_parse_rejects_multiple_records() {
        let err = parse_single_sequence(">a\nACGT\n>b\nACGT\n").unwrap_err();
        assert!(matches!(err, DesignError::InvalidConfig(_)));
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(matches!(
            parse_single_sequence("  \n"),
            Err(DesignError::EmptyInput(_))
        ));
        assert!(matches!(
            parse_single_sequence(">empty\n"),
            Err(DesignError::EmptyInput(_))
        ));
    }

    #[test]
    fn test_read_sequence_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, ">insert\nGACACTCGCT\nATGAATCTCT").unwrap();
        let data = read_sequence_file(file.path()).unwrap();
        assert_eq!(data.name, "insert");
        assert_eq!(data.sequence, "GACACTCGCTATGAATCTCT");
    }
}
