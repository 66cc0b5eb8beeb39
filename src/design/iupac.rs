//! IUPAC nucleotide codes and reverse complement

use std::collections::HashMap;
use once_cell::sync::Lazy;

use super::error::{DesignError, Result};

/// Standard DNA bases
pub const STANDARD_BASES: [char; 4] = ['A', 'C', 'G', 'T'];

/// Ambiguous IUPAC bases
pub const AMBIGUOUS_BASES: [char; 11] = ['R', 'Y', 'S', 'W', 'K', 'M', 'B', 'D', 'H', 'V', 'N'];

/// Watson-Crick complement for every IUPAC code, in both cases.
pub static COMPLEMENT: Lazy<HashMap<char, char>> = Lazy::new(|| {
    let pairs = [
        ('A', 'T'),
        ('T', 'A'),
        ('C', 'G'),
        ('G', 'C'),
        ('R', 'Y'),
        ('Y', 'R'),
        ('S', 'S'),
        ('W', 'W'),
        ('K', 'M'),
        ('M', 'K'),
        ('B', 'V'),
        ('V', 'B'),
        ('D', 'H'),
        ('H', 'D'),
        ('N', 'N'),
    ];
    let mut map = HashMap::with_capacity(pairs.len() * 2);
    for (base, comp) in pairs {
        map.insert(base, comp);
        map.insert(base.to_ascii_lowercase(), comp.to_ascii_lowercase());
    }
    map
});

/// Check if a character is a standard DNA base (either case)
pub fn is_standard_base(c: char) -> bool {
    matches!(c.to_ascii_uppercase(), 'A' | 'C' | 'G' | 'T')
}

/// Check if a character is an ambiguous base (either case)
pub fn is_ambiguous_base(c: char) -> bool {
    matches!(
        c.to_ascii_uppercase(),
        'R' | 'Y' | 'S' | 'W' | 'K' | 'M' | 'B' | 'D' | 'H' | 'V' | 'N'
    )
}

/// Check if a character is a valid DNA character (including ambiguous)
pub fn is_valid_dna(c: char) -> bool {
    is_standard_base(c) || is_ambiguous_base(c)
}

/// Complement of a single base, if it has one.
pub fn complement(c: char) -> Option<char> {
    COMPLEMENT.get(&c).copied()
}

/// Compute the reverse complement of a DNA sequence.
///
/// Case is preserved. A character outside the IUPAC alphabet fails with
/// [`DesignError::UnrecognizedBase`] carrying its index in `seq`; nothing is
/// passed through unchanged.
pub fn reverse_complement(seq: &str) -> Result<String> {
    let mut out = String::with_capacity(seq.len());
    for (position, c) in seq.char_indices().rev() {
        match complement(c) {
            Some(comp) => out.push(comp),
            None => return Err(DesignError::UnrecognizedBase { base: c, position }),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_complement_basic() {
        assert_eq!(reverse_complement("ACGT").unwrap(), "ACGT");
        assert_eq!(reverse_complement("AAACCG").unwrap(), "CGGTTT");
        assert_eq!(reverse_complement("").unwrap(), "");
    }

    #[test]
    fn test_reverse_complement_preserves_case_and_ambiguity() {
        assert_eq!(reverse_complement("acgN").unwrap(), "Ncgt");
        assert_eq!(reverse_complement("RYKMBV").unwrap(), "BVKMRY");
    }

    #[test]
    fn test_reverse_complement_round_trip() {
        for seq in ["GATTACA", "ttgacaGGCC", "ACGTRYSWKMBDHVN", "A"] {
            let twice = reverse_complement(&reverse_complement(seq).unwrap()).unwrap();
            assert_eq!(twice, seq);
        }
    }

    #[test]
    fn test_reverse_complement_rejects_unknown() {
        match reverse_complement("ACXGT") {
            Err(DesignError::UnrecognizedBase { base, position }) => {
                assert_eq!(base, 'X');
                assert_eq!(position, 2);
            }
            other => panic!("expected UnrecognizedBase, got {:?}", other),
        }
        assert!(reverse_complement("AC GT").is_err());
        assert!(reverse_complement("ACU").is_err());
    }

    #[test]
    fn test_alphabet_predicates() {
        for c in STANDARD_BASES {
            assert!(is_standard_base(c));
            assert!(is_standard_base(c.to_ascii_lowercase()));
            assert!(!is_ambiguous_base(c));
        }
        for c in AMBIGUOUS_BASES {
            assert!(is_ambiguous_base(c));
            assert!(is_valid_dna(c));
        }
        assert!(!is_valid_dna('-'));
        assert!(!is_valid_dna('X'));
    }
}
