//! The scan of a single strand channel.
//!
//! A [`Channel`] owns the pending intervals of one strand: intervals that
//! reached the right edge of a chunk while their coverage still satisfied
//! the predicate and that may therefore continue into the next chunk.
//! Within a chunk, the scan is a small state machine over [`State`].

use std::collections::BTreeMap;

use omics::coordinate::position::Number;
use tracing::debug;
use tracing::trace;

use crate::core::ChromosomeId;
use crate::core::Interval;
use crate::core::Strand;
use crate::core::TrackId;
use crate::parameters::Parameters;

/// An interval whose right edge coincided with the end of a processed chunk.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pending {
    /// The chromosome.
    chromosome: ChromosomeId,

    /// The first position.
    start: Number,

    /// The last position (the end of the chunk that produced it).
    stop: Number,

    /// The mean coverage so far.
    mean_coverage: u32,
}

impl Pending {
    /// Gets the chromosome of the pending interval.
    pub fn chromosome(&self) -> ChromosomeId {
        self.chromosome
    }

    /// Gets the first position of the pending interval.
    pub fn start(&self) -> Number {
        self.start
    }

    /// Gets the last position of the pending interval.
    pub fn stop(&self) -> Number {
        self.stop
    }

    /// Gets the mean coverage of the pending interval so far.
    pub fn mean_coverage(&self) -> u32 {
        self.mean_coverage
    }
}

/// The state of the scan at a position within a chunk.
#[derive(Clone, Copy, Debug)]
enum State {
    /// No interval is open.
    Idle,

    /// An interval is open.
    Open {
        /// The first position of the interval.
        start: Number,

        /// The coverage summed over the positions seen in this chunk.
        sum: u64,

        /// The number of positions seen in this chunk.
        len: u64,

        /// The mean of the pending interval this one continues, if any.
        carried: Option<u32>,
    },
}

/// Computes the mean coverage of an interval.
///
/// The mean over the positions of the current chunk is `sum / len` with
/// integer truncation. If the interval continues a pending interval with a
/// non-zero mean, the result is the truncated average of the two means
/// rather than a length-weighted one.
fn blend(carried: Option<u32>, sum: u64, len: u64) -> u32 {
    let segment = sum.checked_div(len).unwrap_or(0);

    let mean = match carried {
        Some(old) if old > 0 => (u64::from(old) + segment) / 2,
        _ => segment,
    };

    u32::try_from(mean).unwrap_or(u32::MAX)
}

/// The pending intervals and scan logic of one strand channel.
#[derive(Debug)]
pub struct Channel {
    /// The track.
    track: TrackId,

    /// The strand reported on produced intervals.
    strand: Strand,

    /// The pending intervals keyed by chromosome and stop position.
    pending: BTreeMap<(ChromosomeId, Number), Pending>,
}

impl Channel {
    /// Creates a new [`Channel`] for a track and strand.
    pub fn new(track: TrackId, strand: Strand) -> Self {
        Self {
            track,
            strand,
            pending: BTreeMap::new(),
        }
    }

    /// Gets the strand of the channel.
    pub fn strand(&self) -> Strand {
        self.strand
    }

    /// Iterates over the pending intervals in chromosome and position order.
    pub fn pending(&self) -> impl Iterator<Item = &Pending> {
        self.pending.values()
    }

    /// Converts a scanned stretch into an [`Interval`].
    fn interval(
        &self,
        chromosome: ChromosomeId,
        start: Number,
        stop: Number,
        mean_coverage: u32,
    ) -> Interval {
        Interval::new_unchecked(
            self.track,
            chromosome,
            self.strand,
            start,
            stop,
            mean_coverage,
        )
    }

    /// Converts a pending interval into a finalized [`Interval`].
    fn finalize(&self, pending: Pending) -> Interval {
        self.interval(
            pending.chromosome,
            pending.start,
            pending.stop,
            pending.mean_coverage,
        )
    }

    /// Scans the coverage of one chunk starting at `from`, pushing every
    /// interval that is known to be complete onto `output`.
    pub fn scan(
        &mut self,
        chromosome: ChromosomeId,
        from: Number,
        coverage: &[u32],
        parameters: &Parameters,
        output: &mut Vec<Interval>,
    ) {
        let Some(&first) = coverage.first() else {
            return;
        };

        let to = from + coverage.len() as Number - 1;

        // (1) Settle the pending intervals of this chromosome against the
        // chunk. Pending intervals lying to the right of the chunk came from
        // chunks delivered ahead of this one and are left alone.
        let keys = self
            .pending
            .range((chromosome, Number::MIN)..=(chromosome, Number::MAX))
            .map(|(key, _)| *key)
            .collect::<Vec<_>>();

        let mut open_start = None;
        let mut open_end = None;

        for key in keys {
            let (_, stop) = key;

            if stop + 1 == from {
                open_start = self.pending.remove(&key);
            } else if stop + 1 < from {
                if let Some(pending) = self.pending.remove(&key) {
                    debug!(
                        track = self.track,
                        strand = %self.strand,
                        chromosome,
                        start = pending.start,
                        stop = pending.stop,
                        "pending interval is separated from the next chunk by a gap"
                    );
                    output.push(self.finalize(pending));
                }
            } else if self
                .pending
                .get(&key)
                .is_some_and(|pending| pending.start == to + 1)
            {
                open_end = Some(key);
            }
        }

        // (2) Continue the open-start candidate if the first position still
        // qualifies, otherwise it ended with the previous chunk.
        let mut state = match open_start {
            Some(pending) if parameters.qualifies(first) => State::Open {
                start: pending.start,
                sum: 0,
                len: 0,
                carried: Some(pending.mean_coverage),
            },
            Some(pending) => {
                debug!(
                    track = self.track,
                    strand = %self.strand,
                    chromosome,
                    start = pending.start,
                    stop = pending.stop,
                    "pending interval does not continue into the next chunk"
                );
                output.push(self.finalize(pending));
                State::Idle
            }
            None => State::Idle,
        };

        // (3) Scan the chunk.
        for (offset, &value) in coverage.iter().enumerate() {
            let position = from + offset as Number;

            state = match (state, parameters.qualifies(value)) {
                (State::Idle, false) => State::Idle,
                (State::Idle, true) => State::Open {
                    start: position,
                    sum: u64::from(value),
                    len: 1,
                    carried: None,
                },
                (
                    State::Open {
                        start,
                        sum,
                        len,
                        carried,
                    },
                    true,
                ) => State::Open {
                    start,
                    sum: sum + u64::from(value),
                    len: len + 1,
                    carried,
                },
                (
                    State::Open {
                        start,
                        sum,
                        len,
                        carried,
                    },
                    false,
                ) => {
                    let mean = blend(carried, sum, len);
                    output.push(self.interval(chromosome, start, position - 1, mean));
                    State::Idle
                }
            };
        }

        // (4) An interval still open at the end of the chunk may continue
        // into the next one, so it becomes pending.
        if let State::Open {
            start,
            sum,
            len,
            carried,
        } = state
        {
            match open_end.and_then(|key| self.pending.get_mut(&key)) {
                Some(candidate) => {
                    debug!(
                        track = self.track,
                        strand = %self.strand,
                        chromosome,
                        start,
                        stop = candidate.stop,
                        "stitching interval onto a pending interval from a later chunk"
                    );
                    candidate.start = start;
                }
                None => {
                    let pending = Pending {
                        chromosome,
                        start,
                        stop: to,
                        mean_coverage: blend(carried, sum, len),
                    };

                    trace!(
                        track = self.track,
                        strand = %self.strand,
                        chromosome,
                        start,
                        stop = to,
                        "interval reaches the end of the chunk"
                    );

                    self.pending.insert((chromosome, to), pending);
                }
            }
        }
    }

    /// Moves every pending interval onto `output` in chromosome and position
    /// order.
    pub fn drain(&mut self, output: &mut Vec<Interval>) {
        let pending = std::mem::take(&mut self.pending);
        output.extend(pending.into_values().map(|pending| self.finalize(pending)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters;

    #[test]
    fn it_truncates_means() {
        assert_eq!(blend(None, 3, 2), 1);
        assert_eq!(blend(None, 0, 0), 0);
        assert_eq!(blend(Some(3), 4, 1), 3);
        assert_eq!(blend(Some(0), 4, 1), 4);
        assert_eq!(blend(Some(u32::MAX), u64::from(u32::MAX), 1), u32::MAX);
    }

    #[test]
    fn it_keeps_one_pending_interval_per_boundary() -> Result<(), Box<dyn std::error::Error>> {
        let parameters = parameters::Builder::default().min_coverage(1).try_build()?;
        let mut channel = Channel::new(0, Strand::Forward);
        let mut output = Vec::new();

        channel.scan(0, 1, &[0, 1, 1], &parameters, &mut output);
        channel.scan(1, 1, &[1, 1, 1], &parameters, &mut output);
        assert!(output.is_empty());

        let pending = channel.pending().collect::<Vec<_>>();
        assert_eq!(pending.len(), 2);
        assert_eq!((pending[0].chromosome(), pending[0].start()), (0, 2));
        assert_eq!((pending[1].chromosome(), pending[1].start()), (1, 1));
        assert_eq!(pending[1].stop(), 3);
        assert_eq!(pending[1].mean_coverage(), 1);

        channel.scan(0, 4, &[1, 1, 1], &parameters, &mut output);
        assert!(output.is_empty());
        assert_eq!(channel.pending().count(), 2);

        channel.drain(&mut output);
        assert_eq!(channel.pending().count(), 0);
        assert_eq!(output.len(), 2);
        assert_eq!((output[0].start(), output[0].stop()), (2, 6));
        assert_eq!((output[1].start(), output[1].stop()), (1, 3));

        Ok(())
    }
}
