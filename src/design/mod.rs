mod types;
mod error;
mod iupac;
mod normalize;
mod dsdna;
mod melt;
mod report;
mod fasta;

pub use types::*;
pub use error::*;
pub use iupac::*;
pub use normalize::*;
pub use dsdna::*;
pub use melt::*;
pub use report::*;
pub use fasta::*;
