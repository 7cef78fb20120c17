//! The strand channel upon which coverage is measured.

use std::io;
use std::str::FromStr;

/// An error related to the parsing of a strand.
#[derive(Debug)]
pub struct ParseStrandError(io::Error);

impl std::fmt::Display for ParseStrandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "parse strand error: {}", self.0)
    }
}

impl std::error::Error for ParseStrandError {}

/// The strand of a detected interval.
///
/// When coverage from both strands is summed before scanning, intervals are
/// reported on the [`Strand::Combined`] channel.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Strand {
    /// The forward strand (`+`).
    Forward,
    /// The reverse strand (`-`).
    Reverse,
    /// Both strands summed together (`+/-`).
    Combined,
}

impl FromStr for Strand {
    type Err = ParseStrandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Self::Forward),
            "-" => Ok(Self::Reverse),
            "+/-" => Ok(Self::Combined),
            c => Err(ParseStrandError(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{} is not a valid strand", c),
            ))),
        }
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strand::Forward => write!(f, "+"),
            Strand::Reverse => write!(f, "-"),
            Strand::Combined => write!(f, "+/-"),
        }
    }
}
