//! A 1-based, fully-closed interval of positions that satisfied a coverage
//! threshold.
//!
//! ```text
//! ================ chromosome 0 ===============
//!
//! | 1 | 2 | 3 | 4 | 5 | 6 | 7 | 8 | 9 |
//! -------------------------------------
//! | 0 | 5 | 5 | 5 | 0 | 5 | 5 | 0 | 0 |  <= coverage
//! |   | X | X | X |   | X | X |   |   |  <= 2-4 and 6-7 (minimum coverage 5)
//! ```
//!
//! Both the start and the stop position are included in the interval, so an
//! interval covering a single base has `start == stop`.

use omics::coordinate::position::Number;

use crate::core::Strand;

/// The identifier of a track (a single set of aligned reads).
pub type TrackId = usize;

/// The identifier of a chromosome within a reference genome.
pub type ChromosomeId = usize;

/// An error related to an interval.
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// A position of zero was provided, but positions are 1-based.
    ZeroPosition,
    /// The start position is greater than the stop position.
    StartGreaterThanStop(Number, Number),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ZeroPosition => write!(f, "positions are 1-based, but a position of 0 was found"),
            Error::StartGreaterThanStop(start, stop) => write!(
                f,
                "start position ({start}) cannot be greater than the stop position ({stop})"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A maximal run of positions on one chromosome and strand whose coverage
/// satisfied the scan predicate.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Interval {
    /// The track the coverage was computed from.
    track: TrackId,

    /// The chromosome the interval lies on.
    chromosome: ChromosomeId,

    /// The strand channel the interval was detected on.
    strand: Strand,

    /// The first position of the interval (1-based, inclusive).
    start: Number,

    /// The last position of the interval (1-based, inclusive).
    stop: Number,

    /// The mean coverage over the interval.
    mean_coverage: u32,
}

impl Interval {
    /// Attempts to create a new [`Interval`].
    ///
    /// # Examples
    ///
    /// ```
    /// use covscan::core::Interval;
    /// use covscan::core::Strand;
    ///
    /// let interval = Interval::try_new(0, 1, Strand::Forward, 2, 4, 5)?;
    /// assert_eq!(interval.size(), 3);
    ///
    /// assert!(Interval::try_new(0, 1, Strand::Forward, 4, 2, 5).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(
        track: TrackId,
        chromosome: ChromosomeId,
        strand: Strand,
        start: Number,
        stop: Number,
        mean_coverage: u32,
    ) -> Result<Self> {
        if start == 0 || stop == 0 {
            return Err(Error::ZeroPosition);
        }

        if start > stop {
            return Err(Error::StartGreaterThanStop(start, stop));
        }

        Ok(Self {
            track,
            chromosome,
            strand,
            start,
            stop,
            mean_coverage,
        })
    }

    /// Creates a new [`Interval`] from positions already known to be valid.
    pub(crate) fn new_unchecked(
        track: TrackId,
        chromosome: ChromosomeId,
        strand: Strand,
        start: Number,
        stop: Number,
        mean_coverage: u32,
    ) -> Self {
        debug_assert!(start > 0 && start <= stop);

        Self {
            track,
            chromosome,
            strand,
            start,
            stop,
            mean_coverage,
        }
    }

    /// Gets the track of the interval.
    pub fn track(&self) -> TrackId {
        self.track
    }

    /// Gets the chromosome of the interval.
    pub fn chromosome(&self) -> ChromosomeId {
        self.chromosome
    }

    /// Gets the strand channel of the interval.
    pub fn strand(&self) -> Strand {
        self.strand
    }

    /// Gets the start position of the interval.
    ///
    /// # Examples
    ///
    /// ```
    /// use covscan::core::Interval;
    /// use covscan::core::Strand;
    ///
    /// let interval = Interval::try_new(0, 1, Strand::Reverse, 10, 20, 3)?;
    /// assert_eq!(interval.start(), 10);
    /// assert_eq!(interval.stop(), 20);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn start(&self) -> Number {
        self.start
    }

    /// Gets the stop position of the interval.
    pub fn stop(&self) -> Number {
        self.stop
    }

    /// Gets the mean coverage of the interval.
    ///
    /// For intervals that were stitched together across chunk boundaries,
    /// this is the blended mean described in
    /// [`Scanner`](crate::Scanner), not a length-weighted average.
    pub fn mean_coverage(&self) -> u32 {
        self.mean_coverage
    }

    /// Gets the number of positions included in the interval.
    pub fn size(&self) -> Number {
        self.stop - self.start + 1
    }

    /// Returns whether the interval includes `position`.
    ///
    /// # Examples
    ///
    /// ```
    /// use covscan::core::Interval;
    /// use covscan::core::Strand;
    ///
    /// let interval = Interval::try_new(0, 1, Strand::Combined, 10, 20, 3)?;
    /// assert!(interval.contains(10));
    /// assert!(interval.contains(20));
    /// assert!(!interval.contains(21));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn contains(&self, position: Number) -> bool {
        self.start <= position && position <= self.stop
    }

    /// Returns whether the interval shares at least one position with the
    /// closed range `[start, stop]`.
    pub fn overlaps(&self, start: Number, stop: Number) -> bool {
        self.start <= stop && start <= self.stop
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}-{}",
            self.track, self.chromosome, self.strand, self.start, self.stop
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_creates_a_single_base_interval() -> std::result::Result<(), Box<dyn std::error::Error>>
    {
        let interval = Interval::try_new(3, 1, Strand::Forward, 7, 7, 12)?;

        assert_eq!(interval.track(), 3);
        assert_eq!(interval.chromosome(), 1);
        assert_eq!(interval.strand(), Strand::Forward);
        assert_eq!(interval.size(), 1);
        assert_eq!(interval.mean_coverage(), 12);

        Ok(())
    }

    #[test]
    fn it_rejects_invalid_positions() {
        let err = Interval::try_new(0, 0, Strand::Forward, 0, 7, 0).unwrap_err();
        assert_eq!(err, Error::ZeroPosition);
        assert_eq!(
            err.to_string(),
            "positions are 1-based, but a position of 0 was found"
        );

        let err = Interval::try_new(0, 0, Strand::Forward, 8, 7, 0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "start position (8) cannot be greater than the stop position (7)"
        );
    }

    #[test]
    fn it_checks_overlaps() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let interval = Interval::try_new(0, 0, Strand::Reverse, 5, 9, 0)?;

        assert!(interval.overlaps(1, 5));
        assert!(interval.overlaps(9, 12));
        assert!(interval.overlaps(6, 7));
        assert!(!interval.overlaps(1, 4));
        assert!(!interval.overlaps(10, 12));

        Ok(())
    }

    #[test]
    fn it_displays() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let interval = Interval::try_new(2, 0, Strand::Combined, 5, 9, 0)?;
        assert_eq!(interval.to_string(), "2:0:+/-:5-9");
        Ok(())
    }
}
