//! Core functionality used across the crate.

pub mod interval;
pub mod strand;

pub use interval::ChromosomeId;
pub use interval::Interval;
pub use interval::TrackId;
pub use strand::Strand;
