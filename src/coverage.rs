//! Coverage split by read class, and its reduction into a [`Chunk`].
//!
//! Upstream of the scanner, coverage is counted separately for each
//! [`ReadClass`] and strand. [`ClassCoverage::select()`] applies the read
//! class filter and the strand summation of a set of [`Parameters`] to
//! produce the [`Chunk`] that the [`Scanner`](crate::Scanner) consumes.

use std::collections::BTreeMap;

use omics::coordinate::position::Number;

use crate::chunk;
use crate::chunk::Chunk;
use crate::core::ChromosomeId;
use crate::core::TrackId;
use crate::parameters::Parameters;
use crate::parameters::read_class::ReadClass;

/// An error related to [`ClassCoverage`].
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// The coverage arrays for a read class do not have the same length.
    StrandLengthMismatch(ReadClass, usize, usize),

    /// The coverage arrays for a read class differ in length from the ones
    /// added before.
    ClassLengthMismatch(ReadClass, usize, usize),

    /// The selected coverage did not form a valid chunk.
    Chunk(chunk::builder::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::StrandLengthMismatch(class, forward, reverse) => write!(
                f,
                "{class} coverage has {forward} forward values but {reverse} reverse values"
            ),
            Error::ClassLengthMismatch(class, expected, found) => write!(
                f,
                "{class} coverage has {found} values, but previous classes have {expected}"
            ),
            Error::Chunk(err) => write!(f, "chunk error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// Forward and reverse coverage for a single read class.
#[derive(Clone, Debug, Eq, PartialEq)]
struct StrandCoverage {
    /// The forward strand coverage.
    forward: Vec<u32>,

    /// The reverse strand coverage.
    reverse: Vec<u32>,
}

/// Coverage of one track over one request range, split by read class and
/// strand.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClassCoverage {
    /// The track.
    track: TrackId,

    /// The chromosome.
    chromosome: ChromosomeId,

    /// The first position of the request range.
    from: Number,

    /// The last position of the request range.
    to: Number,

    /// The per-class coverage.
    classes: BTreeMap<ReadClass, StrandCoverage>,
}

impl ClassCoverage {
    /// Creates an empty [`ClassCoverage`] for the request range `from..=to`.
    pub fn new(track: TrackId, chromosome: ChromosomeId, from: Number, to: Number) -> Self {
        Self {
            track,
            chromosome,
            from,
            to,
            classes: BTreeMap::new(),
        }
    }

    /// Adds (or replaces) the coverage of a read class.
    ///
    /// Every class must be given the same number of values on both strands.
    /// Whether that number matches the request range is checked when the
    /// coverage is [selected](ClassCoverage::select).
    pub fn with(mut self, class: ReadClass, forward: Vec<u32>, reverse: Vec<u32>) -> Result<Self> {
        if forward.len() != reverse.len() {
            return Err(Error::StrandLengthMismatch(
                class,
                forward.len(),
                reverse.len(),
            ));
        }

        let existing = self
            .classes
            .iter()
            .find(|(other, _)| **other != class)
            .map(|(_, coverage)| coverage);

        if let Some(existing) = existing {
            if existing.forward.len() != forward.len() {
                return Err(Error::ClassLengthMismatch(
                    class,
                    existing.forward.len(),
                    forward.len(),
                ));
            }
        }

        self.classes
            .insert(class, StrandCoverage { forward, reverse });
        Ok(self)
    }

    /// Reduces the coverage to a [`Chunk`] according to `parameters`.
    ///
    /// The coverage of every read class admitted by the filter is summed.
    /// Classes that were never added count as zero coverage. When both
    /// strands are summed, the chunk carries only the combined coverage;
    /// otherwise it carries forward coverage as the main array and the
    /// reverse coverage alongside.
    ///
    /// # Examples
    ///
    /// ```
    /// use covscan::coverage::ClassCoverage;
    /// use covscan::parameters::Builder;
    /// use covscan::parameters::read_class::Filter;
    /// use covscan::parameters::read_class::ReadClass;
    ///
    /// let coverage = ClassCoverage::new(0, 0, 1, 3)
    ///     .with(ReadClass::Perfect, vec![1, 2, 3], vec![0, 1, 0])?
    ///     .with(ReadClass::Common, vec![4, 4, 4], vec![1, 1, 1])?;
    ///
    /// let parameters = Builder::default()
    ///     .read_classes(Filter::empty().with(ReadClass::Perfect))
    ///     .sum_both_strands(true)
    ///     .try_build()?;
    ///
    /// let chunk = coverage.select(&parameters)?;
    /// assert_eq!(chunk.main(), &[1, 3, 3]);
    /// assert_eq!(chunk.reverse(), None);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn select(&self, parameters: &Parameters) -> Result<Chunk> {
        // With no class added, the range decides the length; an unrepresentable
        // range falls through to the chunk builder's validation.
        let len = match self.classes.values().next() {
            Some(coverage) => coverage.forward.len(),
            None => self
                .to
                .checked_add(1)
                .and_then(|end| usize::try_from(end.saturating_sub(self.from)).ok())
                .unwrap_or(0),
        };

        let mut forward = vec![0u32; len];
        let mut reverse = vec![0u32; len];

        for class in parameters.read_classes().iter() {
            if let Some(coverage) = self.classes.get(&class) {
                add_assign(&mut forward, &coverage.forward);
                add_assign(&mut reverse, &coverage.reverse);
            }
        }

        let builder = chunk::Builder::default()
            .track(self.track)
            .chromosome(self.chromosome)
            .range(self.from, self.to);

        let builder = if parameters.sum_both_strands() {
            add_assign(&mut forward, &reverse);
            builder.main(forward).map_err(Error::Chunk)?
        } else {
            builder
                .main(forward)
                .and_then(|b| b.reverse(reverse))
                .map_err(Error::Chunk)?
        };

        builder.try_build().map_err(Error::Chunk)
    }
}

/// Adds `other` onto `values` element-wise, saturating at [`u32::MAX`].
fn add_assign(values: &mut [u32], other: &[u32]) {
    for (value, add) in values.iter_mut().zip(other) {
        *value = value.saturating_add(*add);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters;
    use crate::parameters::read_class::Filter;

    fn coverage() -> std::result::Result<ClassCoverage, Error> {
        ClassCoverage::new(2, 1, 11, 14)
            .with(ReadClass::Perfect, vec![1, 1, 0, 0], vec![0, 2, 0, 0])?
            .with(ReadClass::Best, vec![0, 1, 1, 0], vec![0, 0, 3, 0])?
            .with(ReadClass::Common, vec![5, 0, 0, 5], vec![1, 1, 1, 1])
    }

    #[test]
    fn it_keeps_strands_separate() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let parameters = parameters::Builder::default().try_build()?;
        let chunk = coverage()?.select(&parameters)?;

        assert_eq!(chunk.track(), 2);
        assert_eq!(chunk.chromosome(), 1);
        assert_eq!(chunk.from(), 11);
        assert_eq!(chunk.to(), 14);
        assert_eq!(chunk.main(), &[6, 2, 1, 5]);
        assert_eq!(chunk.reverse(), Some(&[1, 3, 4, 1][..]));

        Ok(())
    }

    #[test]
    fn it_sums_only_the_selected_classes() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let parameters = parameters::Builder::default()
            .read_classes(Filter::empty().with(ReadClass::Perfect).with(ReadClass::Best))
            .sum_both_strands(true)
            .try_build()?;
        let chunk = coverage()?.select(&parameters)?;

        assert_eq!(chunk.main(), &[1, 4, 4, 0]);
        assert_eq!(chunk.reverse(), None);

        Ok(())
    }

    #[test]
    fn it_treats_missing_classes_as_zero() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let parameters = parameters::Builder::default()
            .read_classes(Filter::empty().with(ReadClass::Best))
            .try_build()?;
        let chunk = ClassCoverage::new(0, 0, 1, 3)
            .with(ReadClass::Perfect, vec![9, 9, 9], vec![9, 9, 9])?
            .select(&parameters)?;

        assert_eq!(chunk.main(), &[0, 0, 0]);
        assert_eq!(chunk.reverse(), Some(&[0, 0, 0][..]));

        Ok(())
    }

    #[test]
    fn it_rejects_mismatched_lengths() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let err = ClassCoverage::new(0, 0, 1, 3)
            .with(ReadClass::Perfect, vec![1, 1, 1], vec![1, 1])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "perfect coverage has 3 forward values but 2 reverse values"
        );

        let err = ClassCoverage::new(0, 0, 1, 3)
            .with(ReadClass::Perfect, vec![1, 1, 1], vec![1, 1, 1])?
            .with(ReadClass::Best, vec![1, 1], vec![1, 1])
            .unwrap_err();
        assert_eq!(err, Error::ClassLengthMismatch(ReadClass::Best, 3, 2));

        let parameters = parameters::Builder::default().try_build()?;
        let err = ClassCoverage::new(0, 0, 1, 5)
            .with(ReadClass::Perfect, vec![1, 1, 1], vec![1, 1, 1])?
            .select(&parameters)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "chunk error: invalid chunk: main coverage has 3 values, but the range spans 5 \
             positions"
        );

        Ok(())
    }

    #[test]
    fn it_reports_a_range_ending_at_the_last_position()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let parameters = parameters::Builder::default().try_build()?;
        let err = ClassCoverage::new(0, 0, Number::MAX, Number::MAX)
            .select(&parameters)
            .unwrap_err();

        assert_eq!(
            err,
            Error::Chunk(chunk::builder::Error::Invalid(
                chunk::builder::InvalidError::UnrepresentableRange(Number::MAX, Number::MAX)
            ))
        );

        Ok(())
    }
}
