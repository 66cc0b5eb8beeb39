//! dsDNA recombineering primer design
//!
//! Each primer is `genome_overlap` bases of genomic homology followed by
//! `insert_overlap` bases of insert homology, read on the strand that lets
//! the 3' end prime into the insert cassette:
//!
//! ```text
//!           genLeft            insert              genRight
//! genome: ----------|L ...replaced... R|----------
//!                   [ins_left ........ ins_right]
//! forward = revcomp(genLeft + ins_left)
//! reverse = revcomp(ins_right + genRight)
//! ```
//!
//! See Yu et al. 2000, "An efficient recombination system for chromosome
//! engineering in Escherichia coli", PNAS 97(11).

use log::debug;

use super::error::{DesignError, Result};
use super::iupac::reverse_complement;
use super::normalize::{strip_non_word, strip_whitespace};
use super::types::{DesignConfig, GenomicInterval, PrimerPair};

/// Design the two cassette primers that replace the 1-indexed, inclusive
/// genome interval between `left_pos` and `right_pos` (either order) with
/// `insert`.
///
/// The insert is stripped of non-word characters and the genome of
/// whitespace before use. An insert shorter than two insert windows fails
/// with [`DesignError::InsertTooShort`]; a homology arm that would run off
/// the genome fails with [`DesignError::OutOfBoundsInterval`]. Arms are
/// never truncated.
pub fn design_primers(
    genome: &str,
    insert: &str,
    left_pos: usize,
    right_pos: usize,
    config: &DesignConfig,
) -> Result<PrimerPair> {
    config.validate()?;

    let insert = strip_non_word(insert);
    let genome = strip_whitespace(genome);
    let interval = GenomicInterval::new(left_pos, right_pos);

    ensure_ascii(&insert)?;
    if insert.len() < config.min_insert_length() {
        return Err(DesignError::InsertTooShort {
            required: config.min_insert_length(),
            actual: insert.len(),
        });
    }

    ensure_ascii(&genome)?;
    let (gen_left, gen_right) = homology_arms(&genome, interval, config.genome_overlap)?;

    let ins_left = &insert[..config.insert_overlap];
    let ins_right = &insert[insert.len() - config.insert_overlap..];

    debug!(
        "Designing primers for {}..={} ({} bp replaced, {} bp insert)",
        interval.left(),
        interval.right(),
        interval.span(),
        insert.len()
    );

    let forward = reverse_complement(&format!("{}{}", gen_left, ins_left))?;
    let reverse = reverse_complement(&strip_non_word(&format!("{}{}", ins_right, gen_right)))?;

    Ok(PrimerPair { forward, reverse })
}

/// Genomic windows flanking `interval`: the `overlap` bases ending just
/// before its left end and the `overlap` bases starting just after its
/// right end.
fn homology_arms(genome: &str, interval: GenomicInterval, overlap: usize) -> Result<(&str, &str)> {
    let out_of_bounds = || DesignError::OutOfBoundsInterval {
        left: interval.left(),
        right: interval.right(),
        genome_len: genome.len(),
        genome_overlap: overlap,
    };

    // 1-indexed position p is byte p - 1
    let left = interval.left().checked_sub(1).ok_or_else(out_of_bounds)?;
    let left_start = left.checked_sub(overlap).ok_or_else(out_of_bounds)?;
    let right_start = interval.right();
    let right_end = right_start
        .checked_add(overlap)
        .filter(|&end| end <= genome.len())
        .ok_or_else(out_of_bounds)?;

    let gen_left = &genome[left_start..left];
    let gen_right = &genome[right_start..right_end];
    // A separator inside an arm would be stripped later and shorten the primer
    ensure_word_chars(gen_left, left_start)?;
    ensure_word_chars(gen_right, right_start)?;

    Ok((gen_left, gen_right))
}

fn ensure_word_chars(arm: &str, offset: usize) -> Result<()> {
    match arm.char_indices().find(|(_, c)| !(c.is_alphanumeric() || *c == '_')) {
        Some((i, base)) => Err(DesignError::UnrecognizedBase {
            base,
            position: offset + i,
        }),
        None => Ok(()),
    }
}

/// Byte offsets double as base positions only for ASCII text.
fn ensure_ascii(seq: &str) -> Result<()> {
    match seq.char_indices().find(|(_, c)| !c.is_ascii()) {
        Some((position, base)) => Err(DesignError::UnrecognizedBase { base, position }),
        None => Ok(()),
    }
}
