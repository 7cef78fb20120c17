//! A builder for a [`Chunk`].

use omics::coordinate::position::Number;

use crate::chunk::Chunk;
use crate::core::ChromosomeId;
use crate::core::TrackId;

/// An error that occurs when a required field was never provided to the
/// [`Builder`].
#[derive(Debug, Eq, PartialEq)]
pub enum MissingError {
    /// No track was provided to the [`Builder`].
    Track,

    /// No chromosome was provided to the [`Builder`].
    Chromosome,

    /// No range was provided to the [`Builder`].
    Range,

    /// No main coverage was provided to the [`Builder`].
    Main,
}

impl std::fmt::Display for MissingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingError::Track => write!(f, "track"),
            MissingError::Chromosome => write!(f, "chromosome"),
            MissingError::Range => write!(f, "range"),
            MissingError::Main => write!(f, "main coverage"),
        }
    }
}

impl std::error::Error for MissingError {}

/// An error that occurs when a singular field was provided multiple times to
/// the [`Builder`].
#[derive(Debug, Eq, PartialEq)]
pub enum MultipleError {
    /// The main coverage was provided multiple times to the [`Builder`].
    Main,

    /// The reverse coverage was provided multiple times to the [`Builder`].
    Reverse,
}

impl std::fmt::Display for MultipleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MultipleError::Main => write!(f, "main coverage"),
            MultipleError::Reverse => write!(f, "reverse coverage"),
        }
    }
}

impl std::error::Error for MultipleError {}

/// An error that occurs when the provided fields do not describe a valid
/// [`Chunk`].
#[derive(Debug, Eq, PartialEq)]
pub enum InvalidError {
    /// The range started at position zero, but positions are 1-based.
    ZeroStart,

    /// The range ended more than one position before it started.
    InvertedRange(Number, Number),

    /// The range does not have a representable length.
    UnrepresentableRange(Number, Number),

    /// The main coverage length does not match the range.
    MainLength {
        /// The number of positions in the range.
        expected: usize,
        /// The number of coverage values provided.
        found: usize,
    },

    /// The reverse coverage length does not match the range.
    ReverseLength {
        /// The number of positions in the range.
        expected: usize,
        /// The number of coverage values provided.
        found: usize,
    },
}

impl std::fmt::Display for InvalidError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidError::ZeroStart => write!(f, "range must start at position 1 or later"),
            InvalidError::InvertedRange(from, to) => {
                write!(f, "range {from}-{to} ends before it starts")
            }
            InvalidError::UnrepresentableRange(from, to) => {
                write!(f, "range {from}-{to} is too large")
            }
            InvalidError::MainLength { expected, found } => write!(
                f,
                "main coverage has {found} values, but the range spans {expected} positions"
            ),
            InvalidError::ReverseLength { expected, found } => write!(
                f,
                "reverse coverage has {found} values, but the range spans {expected} positions"
            ),
        }
    }
}

impl std::error::Error for InvalidError {}

/// An error related to a [`Builder`].
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// An error where a required field was never provided to the [`Builder`].
    Missing(MissingError),

    /// An error where a singular field was provided to the [`Builder`] more
    /// than once.
    Multiple(MultipleError),

    /// An error where the provided fields are inconsistent.
    Invalid(InvalidError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Missing(err) => write!(f, "missing required field: {err}"),
            Error::Multiple(err) => write!(f, "singular field set multiple times: {err}"),
            Error::Invalid(err) => write!(f, "invalid chunk: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A builder for a [`Chunk`].
#[derive(Debug, Default)]
pub struct Builder {
    /// The track.
    track: Option<TrackId>,

    /// The chromosome.
    chromosome: Option<ChromosomeId>,

    /// The first and last position.
    range: Option<(Number, Number)>,

    /// The main coverage.
    main: Option<Vec<u32>>,

    /// The reverse coverage.
    reverse: Option<Vec<u32>>,
}

impl Builder {
    /// Sets the track for the [`Builder`].
    pub fn track(mut self, track: TrackId) -> Self {
        self.track = Some(track);
        self
    }

    /// Sets the chromosome for the [`Builder`].
    pub fn chromosome(mut self, chromosome: ChromosomeId) -> Self {
        self.chromosome = Some(chromosome);
        self
    }

    /// Sets the 1-based, fully-closed range of positions for the [`Builder`].
    ///
    /// An empty chunk is described by `to == from - 1`.
    pub fn range(mut self, from: Number, to: Number) -> Self {
        self.range = Some((from, to));
        self
    }

    /// Sets the main coverage (forward strand or both strands summed) for the
    /// [`Builder`].
    ///
    /// # Examples
    ///
    /// ```
    /// use covscan::chunk::Builder;
    ///
    /// let builder = Builder::default().main(vec![0, 1, 2])?;
    /// assert!(builder.main(vec![0, 1, 2]).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn main(mut self, coverage: Vec<u32>) -> Result<Self> {
        if self.main.is_some() {
            return Err(Error::Multiple(MultipleError::Main));
        }

        self.main = Some(coverage);
        Ok(self)
    }

    /// Sets the reverse strand coverage for the [`Builder`].
    pub fn reverse(mut self, coverage: Vec<u32>) -> Result<Self> {
        if self.reverse.is_some() {
            return Err(Error::Multiple(MultipleError::Reverse));
        }

        self.reverse = Some(coverage);
        Ok(self)
    }

    /// Consumes `self` to attempt to build a [`Chunk`].
    ///
    /// # Examples
    ///
    /// ```
    /// use covscan::chunk::Builder;
    ///
    /// let chunk = Builder::default()
    ///     .track(0)
    ///     .chromosome(1)
    ///     .range(1, 5)
    ///     .main(vec![0, 5, 5, 5, 0])?
    ///     .reverse(vec![0, 0, 1, 0, 0])?
    ///     .try_build()?;
    ///
    /// assert_eq!(chunk.chromosome(), 1);
    /// assert_eq!(chunk.reverse(), Some(&[0, 0, 1, 0, 0][..]));
    ///
    /// let err = Builder::default()
    ///     .track(0)
    ///     .chromosome(1)
    ///     .range(1, 5)
    ///     .main(vec![0, 5, 5])?
    ///     .try_build()
    ///     .unwrap_err();
    ///
    /// assert_eq!(
    ///     err.to_string(),
    ///     "invalid chunk: main coverage has 3 values, but the range spans 5 positions"
    /// );
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_build(self) -> Result<Chunk> {
        let track = self.track.ok_or(Error::Missing(MissingError::Track))?;
        let chromosome = self
            .chromosome
            .ok_or(Error::Missing(MissingError::Chromosome))?;
        let (from, to) = self.range.ok_or(Error::Missing(MissingError::Range))?;
        let main = self.main.ok_or(Error::Missing(MissingError::Main))?;

        if from == 0 {
            return Err(Error::Invalid(InvalidError::ZeroStart));
        }

        // `from` is at least 1 here, so `from - 1` cannot underflow.
        if to < from - 1 {
            return Err(Error::Invalid(InvalidError::InvertedRange(from, to)));
        }

        let expected = to
            .checked_add(1)
            .and_then(|end| usize::try_from(end - from).ok())
            .ok_or(Error::Invalid(InvalidError::UnrepresentableRange(from, to)))?;

        if main.len() != expected {
            return Err(Error::Invalid(InvalidError::MainLength {
                expected,
                found: main.len(),
            }));
        }

        if let Some(reverse) = &self.reverse {
            if reverse.len() != expected {
                return Err(Error::Invalid(InvalidError::ReverseLength {
                    expected,
                    found: reverse.len(),
                }));
            }
        }

        Ok(Chunk {
            track,
            chromosome,
            from,
            to,
            main,
            reverse: self.reverse,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_builds_an_empty_chunk() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let chunk = Builder::default()
            .track(0)
            .chromosome(0)
            .range(6, 5)
            .main(Vec::new())?
            .try_build()?;

        assert!(chunk.is_empty());
        assert_eq!(chunk.reverse(), None);

        Ok(())
    }

    #[test]
    fn it_fails_to_build_when_a_field_is_missing()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let err = Builder::default()
            .chromosome(0)
            .range(1, 1)
            .main(vec![1])?
            .try_build()
            .unwrap_err();
        assert_eq!(err.to_string(), "missing required field: track");

        let err = Builder::default()
            .track(0)
            .chromosome(0)
            .main(vec![1])?
            .try_build()
            .unwrap_err();
        assert_eq!(err.to_string(), "missing required field: range");

        let err = Builder::default()
            .track(0)
            .chromosome(0)
            .range(1, 1)
            .try_build()
            .unwrap_err();
        assert_eq!(err.to_string(), "missing required field: main coverage");

        Ok(())
    }

    #[test]
    fn it_fails_to_build_when_the_reverse_coverage_is_set_twice()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let err = Builder::default()
            .reverse(vec![1])?
            .reverse(vec![1])
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "singular field set multiple times: reverse coverage"
        );

        Ok(())
    }

    #[test]
    fn it_fails_to_build_an_invalid_range() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let err = Builder::default()
            .track(0)
            .chromosome(0)
            .range(0, 1)
            .main(vec![1, 1])?
            .try_build()
            .unwrap_err();
        assert_eq!(err, Error::Invalid(InvalidError::ZeroStart));

        let err = Builder::default()
            .track(0)
            .chromosome(0)
            .range(10, 5)
            .main(Vec::new())?
            .try_build()
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid chunk: range 10-5 ends before it starts");

        Ok(())
    }

    #[test]
    fn it_fails_to_build_a_range_ending_at_the_last_position()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let err = Builder::default()
            .track(0)
            .chromosome(0)
            .range(Number::MAX, Number::MAX)
            .main(vec![1])?
            .try_build()
            .unwrap_err();

        assert_eq!(
            err,
            Error::Invalid(InvalidError::UnrepresentableRange(
                Number::MAX,
                Number::MAX
            ))
        );

        let err = Builder::default()
            .track(0)
            .chromosome(0)
            .range(Number::MAX, Number::MAX - 2)
            .main(Vec::new())?
            .try_build()
            .unwrap_err();

        assert_eq!(
            err,
            Error::Invalid(InvalidError::InvertedRange(Number::MAX, Number::MAX - 2))
        );

        Ok(())
    }

    #[test]
    fn it_fails_to_build_when_the_reverse_length_differs()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let err = Builder::default()
            .track(0)
            .chromosome(0)
            .range(1, 3)
            .main(vec![1, 1, 1])?
            .reverse(vec![1, 1])?
            .try_build()
            .unwrap_err();

        assert_eq!(
            err,
            Error::Invalid(InvalidError::ReverseLength {
                expected: 3,
                found: 2
            })
        );

        Ok(())
    }
}
