//! Recombineer - dsDNA and MASC PCR Primer Design
//!
//! A Rust library for designing recombineering cassette primers and
//! writing MASC PCR verification primer tables.

pub mod design;

pub use design::*;
