//! The intervals detected by a scan.

use crate::core::Interval;

pub mod index;

pub use index::Index;

/// The finalized intervals of a scan, split by strand channel.
///
/// Within a chromosome, each sequence is ordered by start position and free
/// of overlaps as long as chunks were delivered in order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Results {
    /// Intervals on the forward strand, or on both strands summed.
    pub(crate) forward_or_combined: Vec<Interval>,

    /// Intervals on the reverse strand.
    pub(crate) reverse: Vec<Interval>,
}

impl Results {
    /// Gets the intervals detected on the forward strand (or on both strands
    /// summed).
    pub fn forward_or_combined(&self) -> &[Interval] {
        &self.forward_or_combined
    }

    /// Gets the intervals detected on the reverse strand.
    ///
    /// This is always empty when both strands were summed.
    pub fn reverse(&self) -> &[Interval] {
        &self.reverse
    }

    /// Gets the total number of intervals over both channels.
    pub fn len(&self) -> usize {
        self.forward_or_combined.len() + self.reverse.len()
    }

    /// Returns whether no interval was detected at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over all intervals, forward (or combined) first.
    pub fn iter(&self) -> impl Iterator<Item = &Interval> {
        self.forward_or_combined.iter().chain(self.reverse.iter())
    }

    /// Consumes `self` and returns the forward (or combined) and the reverse
    /// intervals.
    pub fn into_parts(self) -> (Vec<Interval>, Vec<Interval>) {
        (self.forward_or_combined, self.reverse)
    }

    /// Builds an [`Index`] for region queries over the intervals.
    pub fn index(&self) -> Index {
        Index::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Strand;

    #[test]
    fn it_counts_both_channels() -> Result<(), Box<dyn std::error::Error>> {
        let mut results = Results::default();
        assert!(results.is_empty());

        results
            .forward_or_combined
            .push(Interval::try_new(0, 0, Strand::Forward, 1, 2, 3)?);
        results
            .reverse
            .push(Interval::try_new(0, 0, Strand::Reverse, 5, 6, 3)?);
        results
            .reverse
            .push(Interval::try_new(0, 0, Strand::Reverse, 8, 8, 3)?);

        assert_eq!(results.len(), 3);
        assert_eq!(
            results.iter().map(|i| i.strand()).collect::<Vec<_>>(),
            vec![Strand::Forward, Strand::Reverse, Strand::Reverse]
        );

        let (forward, reverse) = results.into_parts();
        assert_eq!(forward.len(), 1);
        assert_eq!(reverse.len(), 2);

        Ok(())
    }
}
