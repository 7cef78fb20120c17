//! Parameters governing a coverage scan.

pub mod builder;
pub mod read_class;

pub use builder::Builder;

/// The parameters of a single coverage scan.
///
/// Parameters are immutable: scanning with different parameters requires a
/// new [`Scanner`](crate::Scanner). Use a [`Builder`] to construct them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Parameters {
    /// The coverage threshold.
    pub(crate) min_coverage: u32,

    /// Whether to detect intervals at or above the threshold (`true`) or
    /// below it (`false`).
    pub(crate) detect_covered_intervals: bool,

    /// Whether forward and reverse coverage are summed into a single
    /// channel.
    pub(crate) sum_both_strands: bool,

    /// The read classes counted toward coverage.
    pub(crate) read_classes: read_class::Filter,
}

impl Parameters {
    /// Gets the coverage threshold.
    pub fn min_coverage(&self) -> u32 {
        self.min_coverage
    }

    /// Gets whether covered (`true`) or uncovered (`false`) intervals are
    /// detected.
    pub fn detect_covered_intervals(&self) -> bool {
        self.detect_covered_intervals
    }

    /// Gets whether both strands are summed into a single channel.
    pub fn sum_both_strands(&self) -> bool {
        self.sum_both_strands
    }

    /// Gets the read classes counted toward coverage.
    pub fn read_classes(&self) -> read_class::Filter {
        self.read_classes
    }

    /// Returns whether a position with the given coverage belongs to an
    /// interval.
    ///
    /// # Examples
    ///
    /// ```
    /// use covscan::parameters::Builder;
    ///
    /// let covered = Builder::default().min_coverage(5).try_build()?;
    /// assert!(covered.qualifies(5));
    /// assert!(!covered.qualifies(4));
    ///
    /// let uncovered = Builder::default()
    ///     .min_coverage(5)
    ///     .detect_covered_intervals(false)
    ///     .try_build()?;
    /// assert!(!uncovered.qualifies(5));
    /// assert!(uncovered.qualifies(4));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn qualifies(&self, coverage: u32) -> bool {
        match self.detect_covered_intervals {
            true => coverage >= self.min_coverage,
            false => coverage < self.min_coverage,
        }
    }
}

impl std::fmt::Display for Parameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let relation = match self.detect_covered_intervals {
            true => ">=",
            false => "<",
        };

        let strands = match self.sum_both_strands {
            true => "summed",
            false => "separate",
        };

        write!(
            f,
            "coverage {relation} {} (strands: {strands}, read classes: {})",
            self.min_coverage, self.read_classes
        )
    }
}
