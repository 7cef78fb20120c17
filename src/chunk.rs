//! Chunks of per-base coverage streamed into a [`Scanner`](crate::Scanner).
//!
//! A chunk is a contiguous, 1-based, fully-closed range `from..=to` of one
//! chromosome together with one coverage value per position. Each chunk
//! carries a main coverage array (forward strand, or both strands summed)
//! and, optionally, a reverse strand coverage array.
//!
//! Chunks are always constructed through a [`Builder`], which guarantees
//! that the coverage arrays exactly span the declared range.

use omics::coordinate::position::Number;

use crate::core::ChromosomeId;
use crate::core::TrackId;

pub mod builder;

pub use builder::Builder;

/// A chunk of coverage for one track and chromosome.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Chunk {
    /// The track the coverage was computed from.
    track: TrackId,

    /// The chromosome the chunk lies on.
    chromosome: ChromosomeId,

    /// The first position of the chunk.
    from: Number,

    /// The last position of the chunk.
    to: Number,

    /// The main coverage array (forward or summed strands).
    main: Vec<u32>,

    /// The reverse strand coverage array, if provided.
    reverse: Option<Vec<u32>>,
}

impl Chunk {
    /// Gets the track of the chunk.
    pub fn track(&self) -> TrackId {
        self.track
    }

    /// Gets the chromosome of the chunk.
    pub fn chromosome(&self) -> ChromosomeId {
        self.chromosome
    }

    /// Gets the first position of the chunk.
    ///
    /// # Examples
    ///
    /// ```
    /// use covscan::chunk::Builder;
    ///
    /// let chunk = Builder::default()
    ///     .track(0)
    ///     .chromosome(0)
    ///     .range(6, 10)
    ///     .main(vec![5, 5, 0, 0, 0])?
    ///     .try_build()?;
    ///
    /// assert_eq!(chunk.from(), 6);
    /// assert_eq!(chunk.to(), 10);
    /// assert_eq!(chunk.len(), 5);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from(&self) -> Number {
        self.from
    }

    /// Gets the last position of the chunk.
    pub fn to(&self) -> Number {
        self.to
    }

    /// Gets the main coverage array.
    pub fn main(&self) -> &[u32] {
        &self.main
    }

    /// Gets the reverse strand coverage array, if one was provided.
    pub fn reverse(&self) -> Option<&[u32]> {
        self.reverse.as_deref()
    }

    /// Gets the number of positions in the chunk.
    pub fn len(&self) -> usize {
        self.main.len()
    }

    /// Returns whether the chunk spans no position at all.
    pub fn is_empty(&self) -> bool {
        self.main.is_empty()
    }
}
