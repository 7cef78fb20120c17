//! A scanner that detects coverage intervals in streamed chunks.
//!
//! The [`Scanner`] consumes the coverage of one track chunk by chunk and
//! reports the maximal intervals whose coverage satisfies the predicate of
//! its [`Parameters`]. An interval that reaches the end of a chunk is held
//! back as pending. If the next chunk on that chromosome starts right after
//! it (`previous.to + 1 == next.from`) and its first position still
//! qualifies, the interval is continued. Otherwise the pending interval is
//! complete and is finalized as-is.
//!
//! ```text
//! chunk 1 (1-5)        chunk 2 (6-10)
//! | 0 | 0 | 5 | 5 | 5 || 5 | 5 | 0 | 0 | 0 |
//!         [  pending  ]
//!         [          3-7          ]
//! ```
//!
//! ## Mean coverage
//!
//! The mean coverage of an interval within a single chunk is the integer
//! division of the summed coverage by the number of positions. When an
//! interval continues a pending interval whose mean is non-zero, the new
//! mean is `(old + sum / len) / 2`, again truncated. Note that this is not a
//! length-weighted average: a long stretch and a single position carry the
//! same weight.

use omics::coordinate::position::Number;
use tracing::debug;

use crate::chunk::Chunk;
use crate::core::ChromosomeId;
use crate::core::Strand;
use crate::core::TrackId;
use crate::parameters::Parameters;
use crate::results::Results;

pub mod channel;

pub use channel::Channel;

/// An error related to a [`Scanner`].
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// The chunk belongs to a different track than the scanner.
    TrackMismatch {
        /// The track of the scanner.
        expected: TrackId,
        /// The track of the chunk.
        found: TrackId,
    },

    /// The strands are scanned separately, but the chunk has no reverse
    /// strand coverage.
    MissingReverseCoverage(ChromosomeId, Number, Number),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::TrackMismatch { expected, found } => write!(
                f,
                "chunk belongs to track {found}, but the scanner processes track {expected}"
            ),
            Error::MissingReverseCoverage(chromosome, from, to) => write!(
                f,
                "chunk {chromosome}:{from}-{to} has no reverse strand coverage, but strands are \
                 scanned separately"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// Detects coverage intervals of one track in a stream of chunks.
///
/// Chunks of the same chromosome must be processed in order of their start
/// position. Chunks of different chromosomes may be interleaved. Once the
/// last chunk was processed, [`Scanner::finalize()`] flushes the intervals
/// that reached the end of their last chunk and returns the [`Results`].
///
/// # Examples
///
/// ```
/// use covscan::Scanner;
/// use covscan::chunk;
/// use covscan::parameters;
///
/// let parameters = parameters::Builder::default()
///     .min_coverage(5)
///     .sum_both_strands(true)
///     .try_build()?;
/// let mut scanner = Scanner::new(0, parameters);
///
/// for (from, coverage) in [(1, vec![0, 0, 5, 5, 5]), (6, vec![5, 5, 0, 0, 0])] {
///     let chunk = chunk::Builder::default()
///         .track(0)
///         .chromosome(0)
///         .range(from, from + 4)
///         .main(coverage)?
///         .try_build()?;
///
///     scanner.process(&chunk)?;
/// }
///
/// let results = scanner.finalize();
/// let intervals = results.forward_or_combined();
///
/// assert_eq!(intervals.len(), 1);
/// assert_eq!(intervals[0].start(), 3);
/// assert_eq!(intervals[0].stop(), 7);
/// assert_eq!(intervals[0].mean_coverage(), 5);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Scanner {
    /// The track.
    track: TrackId,

    /// The scan parameters.
    parameters: Parameters,

    /// The forward (or combined) channel.
    main: Channel,

    /// The reverse channel, absent when both strands are summed.
    reverse: Option<Channel>,

    /// The finalized intervals.
    results: Results,
}

impl Scanner {
    /// Creates a new [`Scanner`] for `track`.
    pub fn new(track: TrackId, parameters: Parameters) -> Self {
        let (main, reverse) = match parameters.sum_both_strands() {
            true => (Channel::new(track, Strand::Combined), None),
            false => (
                Channel::new(track, Strand::Forward),
                Some(Channel::new(track, Strand::Reverse)),
            ),
        };

        Self {
            track,
            parameters,
            main,
            reverse,
            results: Results::default(),
        }
    }

    /// Gets the track of the scanner.
    pub fn track(&self) -> TrackId {
        self.track
    }

    /// Gets the parameters of the scanner.
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Gets the intervals finalized so far.
    ///
    /// Intervals that reached the end of the most recent chunk are still
    /// pending and are not included until a later chunk completes them or
    /// the scanner is [finalized](Scanner::finalize).
    pub fn results(&self) -> &Results {
        &self.results
    }

    /// Gets the channels of the scanner, forward (or combined) first.
    pub fn channels(&self) -> impl Iterator<Item = &Channel> {
        std::iter::once(&self.main).chain(self.reverse.as_ref())
    }

    /// Processes the next chunk.
    ///
    /// When both strands are summed, only the main coverage of the chunk is
    /// scanned and any reverse coverage is ignored. Otherwise, the main
    /// coverage is scanned as the forward strand and the reverse coverage is
    /// required.
    ///
    /// A chunk that is rejected leaves the scanner untouched.
    pub fn process(&mut self, chunk: &Chunk) -> Result<()> {
        if chunk.track() != self.track {
            return Err(Error::TrackMismatch {
                expected: self.track,
                found: chunk.track(),
            });
        }

        let reverse = match self.reverse.as_mut() {
            Some(channel) => {
                let coverage = chunk.reverse().ok_or(Error::MissingReverseCoverage(
                    chunk.chromosome(),
                    chunk.from(),
                    chunk.to(),
                ))?;
                Some((channel, coverage))
            }
            None => None,
        };

        self.main.scan(
            chunk.chromosome(),
            chunk.from(),
            chunk.main(),
            &self.parameters,
            &mut self.results.forward_or_combined,
        );

        if let Some((channel, coverage)) = reverse {
            channel.scan(
                chunk.chromosome(),
                chunk.from(),
                coverage,
                &self.parameters,
                &mut self.results.reverse,
            );
        }

        Ok(())
    }

    /// Consumes the scanner, finalizing every pending interval, and returns
    /// the detected intervals.
    pub fn finalize(mut self) -> Results {
        self.main.drain(&mut self.results.forward_or_combined);

        if let Some(channel) = self.reverse.as_mut() {
            channel.drain(&mut self.results.reverse);
        }

        debug!(
            track = self.track,
            forward_or_combined = self.results.forward_or_combined.len(),
            reverse = self.results.reverse.len(),
            "finalized coverage scan"
        );

        self.results
    }
}
