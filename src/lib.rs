//! `covscan` is a crate for detecting covered and uncovered intervals in
//! genomic coverage that is streamed in chunks.
//!
//! Coverage of a track is rarely available all at once: a genome browser
//! fetches it in chunks ("data packages") of a chromosome as the analysis
//! walks the genome. The [`Scanner`] consumes these chunks one by one and
//! reports every maximal interval whose per-base coverage satisfies a
//! threshold predicate, correctly stitching together intervals that straddle
//! the boundary between two chunks.
//!
//! ## Parameters
//!
//! A scan is configured by [`parameters::Parameters`], constructed with a
//! [`parameters::Builder`]:
//!
//! - the minimum coverage threshold,
//! - whether intervals at or above the threshold (covered) or below it
//!   (uncovered) are detected,
//! - whether forward and reverse coverage are summed into a single channel
//!   or scanned separately, and
//! - which [read classes](parameters::read_class::ReadClass) count toward
//!   coverage.
//!
//! Coverage that is still split by read class can be reduced to a
//! [`chunk::Chunk`] that honors these parameters with
//! [`coverage::ClassCoverage::select()`].
//!
//! ## Scanning
//!
//! Chunks are constructed with a [`chunk::Builder`] and pushed into the
//! scanner with [`Scanner::process()`]. Chunks of the same chromosome must
//! arrive in order of their start position. When the stream is exhausted,
//! [`Scanner::finalize()`] flushes the intervals that reached the end of
//! their last chunk and returns the [`Results`].
//!
//! ```
//! use covscan::Scanner;
//! use covscan::chunk;
//! use covscan::parameters;
//!
//! let parameters = parameters::Builder::default().min_coverage(5).try_build()?;
//! let mut scanner = Scanner::new(0, parameters);
//!
//! let chunks = [
//!     (1, vec![0, 5, 5, 5, 0], vec![0, 0, 0, 0, 6]),
//!     (6, vec![5, 5, 0, 0, 0], vec![6, 0, 0, 0, 0]),
//! ];
//!
//! for (from, forward, reverse) in chunks {
//!     let chunk = chunk::Builder::default()
//!         .track(0)
//!         .chromosome(0)
//!         .range(from, from + 4)
//!         .main(forward)?
//!         .reverse(reverse)?
//!         .try_build()?;
//!
//!     scanner.process(&chunk)?;
//! }
//!
//! let results = scanner.finalize();
//!
//! for interval in results.iter() {
//!     println!("{} (mean coverage {})", interval, interval.mean_coverage());
//! }
//!
//! assert_eq!(results.forward_or_combined().len(), 2);
//! assert_eq!(results.reverse().len(), 1);
//! assert_eq!(results.reverse()[0].start(), 5);
//! assert_eq!(results.reverse()[0].stop(), 6);
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Concurrency
//!
//! A [`Scanner`] is not synchronized internally. Each scanner owns its
//! pending intervals and results, so scanners for different tracks can be
//! driven from different threads.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod chunk;
pub mod core;
pub mod coverage;
pub mod parameters;
pub mod results;
pub mod scanner;

pub use results::Results;

pub use self::scanner::Scanner;
