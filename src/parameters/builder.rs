//! A builder for [`Parameters`].

use crate::parameters::Parameters;
use crate::parameters::read_class::Filter;

/// The default coverage threshold.
pub const DEFAULT_MIN_COVERAGE: u32 = 1;

/// An error related to a [`Builder`].
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// The read class filter admits no read class, so every position would
    /// have zero coverage.
    NoReadClasses,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NoReadClasses => write!(f, "at least one read class must be selected"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A builder for [`Parameters`].
///
/// Unless set otherwise, covered intervals with a coverage of at least
/// [`DEFAULT_MIN_COVERAGE`] are detected on separate strands using every
/// read class.
#[derive(Debug)]
pub struct Builder {
    /// The coverage threshold.
    min_coverage: u32,

    /// Whether covered or uncovered intervals are detected.
    detect_covered_intervals: bool,

    /// Whether both strands are summed.
    sum_both_strands: bool,

    /// The read classes counted toward coverage.
    read_classes: Filter,
}

impl Builder {
    /// Sets the coverage threshold.
    pub fn min_coverage(mut self, value: u32) -> Self {
        self.min_coverage = value;
        self
    }

    /// Sets whether covered (`true`) or uncovered (`false`) intervals are
    /// detected.
    pub fn detect_covered_intervals(mut self, value: bool) -> Self {
        self.detect_covered_intervals = value;
        self
    }

    /// Sets whether forward and reverse coverage are summed into a single
    /// channel.
    pub fn sum_both_strands(mut self, value: bool) -> Self {
        self.sum_both_strands = value;
        self
    }

    /// Sets the read classes counted toward coverage.
    pub fn read_classes(mut self, filter: Filter) -> Self {
        self.read_classes = filter;
        self
    }

    /// Consumes `self` to attempt to build [`Parameters`].
    ///
    /// # Examples
    ///
    /// ```
    /// use covscan::parameters::Builder;
    /// use covscan::parameters::read_class::Filter;
    /// use covscan::parameters::read_class::ReadClass;
    ///
    /// let parameters = Builder::default()
    ///     .min_coverage(10)
    ///     .sum_both_strands(true)
    ///     .read_classes(Filter::empty().with(ReadClass::Perfect))
    ///     .try_build()?;
    ///
    /// assert_eq!(parameters.min_coverage(), 10);
    /// assert!(parameters.detect_covered_intervals());
    /// assert!(parameters.sum_both_strands());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_build(self) -> Result<Parameters> {
        if self.read_classes.is_empty() {
            return Err(Error::NoReadClasses);
        }

        Ok(Parameters {
            min_coverage: self.min_coverage,
            detect_covered_intervals: self.detect_covered_intervals,
            sum_both_strands: self.sum_both_strands,
            read_classes: self.read_classes,
        })
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            min_coverage: DEFAULT_MIN_COVERAGE,
            detect_covered_intervals: true,
            sum_both_strands: false,
            read_classes: Filter::all(),
        }
    }
}
