//! Error taxonomy for primer design and report output

use thiserror::Error;

/// Every failure the design and report layers can surface.
#[derive(Debug, Error)]
pub enum DesignError {
    /// The insert cannot supply two non-empty homology windows.
    #[error("The inserted sequence should be at least {required} bases long (got {actual})")]
    InsertTooShort { required: usize, actual: usize },

    /// The requested homology arms run off one end of the genome.
    #[error(
        "Interval {left}..={right} needs {genome_overlap} flanking bases on each side, \
         but the genome is only {genome_len} bases long"
    )]
    OutOfBoundsInterval {
        left: usize,
        right: usize,
        genome_len: usize,
        genome_overlap: usize,
    },

    #[error("No complement defined for '{base}' at position {position}")]
    UnrecognizedBase { base: char, position: usize },

    #[error("Sequence '{0}' is too short for a melting temperature")]
    SequenceTooShort(String),

    #[error("No {} forward primer for oligo '{oligo}'", forward_kind(.modified))]
    MissingForwardPrimer { oligo: String, modified: bool },

    #[error("Malformed report row {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DesignError {
    /// True for failures that are a property of the user's request rather
    /// than malformed coordinates or data; these are reported, not raised.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InsertTooShort { .. })
    }
}

fn forward_kind(modified: &bool) -> &'static str {
    if *modified {
        "modified"
    } else {
        "unmodified"
    }
}

pub type Result<T> = std::result::Result<T, DesignError>;
