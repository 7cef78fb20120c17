//! An index for looking up detected intervals by region.

use std::collections::HashMap;

use omics::coordinate::position::Number;
use rust_lapper as lapper;

use crate::core::ChromosomeId;
use crate::core::Interval;
use crate::core::Strand;
use crate::results::Results;

/// The inner value of the lookup data structure.
type Iv = lapper::Interval<Number, Interval>;

/// An index over the intervals of a [`Results`] for region queries.
///
/// Generally, you will want to obtain one of these through
/// [`Results::index()`].
#[derive(Debug)]
pub struct Index {
    /// The inner lookup table for each chromosome and strand.
    inner: HashMap<(ChromosomeId, Strand), lapper::Lapper<Number, Interval>>,
}

impl Index {
    /// Finds every interval on `chromosome` and `strand` that shares at least
    /// one position with the 1-based, fully-closed range `[start, stop]`.
    ///
    /// Returns [`None`] if no interval overlaps the range.
    ///
    /// # Examples
    ///
    /// ```
    /// use covscan::Scanner;
    /// use covscan::chunk;
    /// use covscan::core::Strand;
    /// use covscan::parameters;
    ///
    /// let parameters = parameters::Builder::default()
    ///     .min_coverage(5)
    ///     .sum_both_strands(true)
    ///     .try_build()?;
    /// let mut scanner = Scanner::new(0, parameters);
    ///
    /// let chunk = chunk::Builder::default()
    ///     .track(0)
    ///     .chromosome(0)
    ///     .range(1, 10)
    ///     .main(vec![0, 5, 5, 5, 0, 0, 7, 7, 0, 0])?
    ///     .try_build()?;
    /// scanner.process(&chunk)?;
    ///
    /// let index = scanner.finalize().index();
    ///
    /// let found = index.find(0, Strand::Combined, 4, 8).unwrap();
    /// assert_eq!(found.len(), 2);
    /// assert_eq!(found[0].start(), 2);
    /// assert_eq!(found[1].start(), 7);
    ///
    /// assert!(index.find(0, Strand::Combined, 5, 6).is_none());
    /// assert!(index.find(0, Strand::Forward, 1, 10).is_none());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn find(
        &self,
        chromosome: ChromosomeId,
        strand: Strand,
        start: Number,
        stop: Number,
    ) -> Option<Vec<Interval>> {
        let entry = self.inner.get(&(chromosome, strand))?;

        let mut results = entry
            .find(start, stop.saturating_add(1))
            .map(|e| e.val.clone())
            .collect::<Vec<_>>();

        results.sort_by_key(|interval| interval.start());

        match results.is_empty() {
            true => None,
            false => Some(results),
        }
    }
}

impl From<&Results> for Index {
    fn from(results: &Results) -> Self {
        let mut hm = HashMap::<(ChromosomeId, Strand), Vec<Iv>>::default();

        for interval in results.iter() {
            let entry = hm
                .entry((interval.chromosome(), interval.strand()))
                .or_default();

            // Lapper intervals are half-open.
            entry.push(lapper::Interval {
                start: interval.start(),
                stop: interval.stop() + 1,
                val: interval.clone(),
            });
        }

        let inner = hm
            .into_iter()
            .map(|(k, v)| (k, lapper::Lapper::new(v)))
            .collect();

        Self { inner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_separates_chromosomes_and_strands() -> Result<(), Box<dyn std::error::Error>> {
        let results = Results {
            forward_or_combined: vec![
                Interval::try_new(0, 0, Strand::Forward, 1, 4, 1)?,
                Interval::try_new(0, 1, Strand::Forward, 1, 4, 2)?,
            ],
            reverse: vec![Interval::try_new(0, 0, Strand::Reverse, 3, 3, 3)?],
        };

        let index = results.index();

        let found = index.find(0, Strand::Forward, 4, 4).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].mean_coverage(), 1);

        let found = index.find(1, Strand::Forward, 2, 2).unwrap();
        assert_eq!(found[0].mean_coverage(), 2);

        let found = index.find(0, Strand::Reverse, 1, 10).unwrap();
        assert_eq!(found[0].mean_coverage(), 3);

        assert_eq!(index.find(0, Strand::Forward, 5, 9), None);
        assert_eq!(index.find(2, Strand::Forward, 1, 9), None);

        Ok(())
    }
}
