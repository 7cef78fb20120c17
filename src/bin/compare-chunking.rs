//! A binary to comprehensively test that the `covscan` scanner reports the
//! same intervals no matter how the coverage is cut into chunks.
//!
//! ```shell
//! cargo run --release --bin=compare-chunking --features=binaries -- -n 1000
//! ```
//!
//! It achieves this by carrying out the following for each of `n` trials:
//!
//! * Randomly generating forward and reverse coverage for a chromosome.
//! * Detecting intervals directly from the whole arrays with a naive,
//!   non-streaming pass.
//! * Cutting the same coverage into randomly sized, adjacent chunks, scanning
//!   them with a [`Scanner`], and ensuring the interval extents match.

use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use covscan::Scanner;
use covscan::core::Strand;
use covscan::coverage::ClassCoverage;
use covscan::parameters;
use covscan::parameters::Parameters;
use covscan::parameters::read_class::ReadClass;
use omics::coordinate::position::Number;
use rand::Rng;
use rand::rngs::ThreadRng;
use tracing::debug;
use tracing::info;
use tracing::warn;
use tracing_log::AsTrace as _;
use tracing_subscriber::EnvFilter;

/// The longest run of identical coverage values that is generated.
const MAX_RUN_LENGTH: usize = 50;

////////////////////////////////////////////////////////////////////////////////////////
// Coverage generation
////////////////////////////////////////////////////////////////////////////////////////

/// Generates `length` coverage values as runs of identical values, which
/// resembles real coverage more closely than independent draws.
fn random_coverage(rng: &mut ThreadRng, length: usize, max_coverage: u32) -> Vec<u32> {
    let mut coverage = Vec::with_capacity(length);

    while coverage.len() < length {
        let value = rng.gen_range(0..=max_coverage);
        let run = rng.gen_range(1..=MAX_RUN_LENGTH).min(length - coverage.len());
        coverage.extend(std::iter::repeat(value).take(run));
    }

    coverage
}

/// Randomly chooses the start offsets of at most `max_chunks` adjacent chunks
/// covering `length` positions. The first offset is always zero.
fn random_cuts(rng: &mut ThreadRng, length: usize, max_chunks: usize) -> Vec<usize> {
    let mut cuts = (1..max_chunks)
        .map(|_| rng.gen_range(0..length))
        .collect::<Vec<_>>();

    cuts.push(0);
    cuts.sort_unstable();
    cuts.dedup();
    cuts
}

////////////////////////////////////////////////////////////////////////////////////////
// Interval extents
////////////////////////////////////////////////////////////////////////////////////////

/// The strand and extent of a detected interval.
type Extent = (Strand, Number, Number);

/// Detects interval extents in a whole coverage array without any chunking.
fn naive_extents(coverage: &[u32], strand: Strand, parameters: &Parameters) -> Vec<Extent> {
    let mut extents = Vec::new();
    let mut start = None;

    for (offset, value) in coverage.iter().enumerate() {
        let position = offset as Number + 1;

        match (start, parameters.qualifies(*value)) {
            (None, true) => start = Some(position),
            (Some(s), false) => {
                extents.push((strand, s, position - 1));
                start = None;
            }
            _ => {}
        }
    }

    if let Some(s) = start {
        extents.push((strand, s, coverage.len() as Number));
    }

    extents
}

/// Scans the coverage as adjacent chunks starting at the offsets in `cuts`.
fn chunked_extents(
    forward: &[u32],
    reverse: &[u32],
    cuts: &[usize],
    parameters: &Parameters,
) -> Result<Vec<Extent>> {
    let mut scanner = Scanner::new(0, parameters.clone());

    let ends = cuts.iter().skip(1).copied().chain(Some(forward.len()));

    for (&begin, end) in cuts.iter().zip(ends) {
        let chunk = ClassCoverage::new(0, 0, begin as Number + 1, end as Number)
            .with(
                ReadClass::Best,
                forward[begin..end].to_vec(),
                reverse[begin..end].to_vec(),
            )
            .and_then(|coverage| coverage.select(parameters))
            .with_context(|| format!("building chunk {}-{}", begin + 1, end))?;

        scanner
            .process(&chunk)
            .with_context(|| format!("scanning chunk {}-{}", begin + 1, end))?;
    }

    Ok(scanner
        .finalize()
        .iter()
        .map(|interval| (interval.strand(), interval.start(), interval.stop()))
        .collect())
}

////////////////////////////////////////////////////////////////////////////////////////
// Comparisons
////////////////////////////////////////////////////////////////////////////////////////

/// The outcome of one trial.
struct Comparison {
    /// The chunk start offsets.
    cuts: Vec<usize>,

    /// The extents from the naive pass.
    expected: Vec<Extent>,

    /// The extents from the chunked scan.
    found: Vec<Extent>,
}

impl Comparison {
    /// Whether both passes agreed.
    fn matched(&self) -> bool {
        self.expected == self.found
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Main
////////////////////////////////////////////////////////////////////////////////////////

#[derive(Parser)]
struct Args {
    /// The number of trials to run.
    #[arg(short, default_value_t = 1_000)]
    n: usize,

    /// The number of positions of the simulated chromosome.
    #[arg(short, long, default_value_t = 10_000)]
    length: usize,

    /// The maximum number of chunks per trial.
    #[arg(short = 'c', long, default_value_t = 32)]
    max_chunks: usize,

    /// The highest coverage value that is generated.
    #[arg(long, default_value_t = 10)]
    max_coverage: u32,

    /// The coverage threshold.
    #[arg(short, long, default_value_t = 5)]
    min_coverage: u32,

    /// Detect intervals below the threshold instead of at or above it.
    #[arg(short, long, default_value_t = false)]
    uncovered: bool,

    /// Sum forward and reverse coverage into a single channel.
    #[arg(short, long, default_value_t = false)]
    sum_both_strands: bool,

    /// If desired, the number of mismatches to explore.
    #[arg(short, long)]
    explore_mismatches: Option<usize>,

    #[command(flatten)]
    verbose: Verbosity,
}

/// Runs the trials.
fn throw(args: &Args) -> Result<()> {
    if args.length == 0 || args.max_chunks == 0 {
        bail!("`length` and `max_chunks` must be greater than 0!");
    }

    let parameters = parameters::Builder::default()
        .min_coverage(args.min_coverage)
        .detect_covered_intervals(!args.uncovered)
        .sum_both_strands(args.sum_both_strands)
        .try_build()
        .context("building scan parameters")?;

    info!("parameters: {parameters}");

    let mut rng = rand::thread_rng();
    let mut comparisons = Vec::with_capacity(args.n);

    for trial in 0..args.n {
        let forward = random_coverage(&mut rng, args.length, args.max_coverage);
        let reverse = random_coverage(&mut rng, args.length, args.max_coverage);
        let cuts = random_cuts(&mut rng, args.length, args.max_chunks);

        let expected = match parameters.sum_both_strands() {
            true => {
                let combined = forward
                    .iter()
                    .zip(&reverse)
                    .map(|(f, r)| f.saturating_add(*r))
                    .collect::<Vec<_>>();
                naive_extents(&combined, Strand::Combined, &parameters)
            }
            false => {
                let mut extents = naive_extents(&forward, Strand::Forward, &parameters);
                extents.extend(naive_extents(&reverse, Strand::Reverse, &parameters));
                extents
            }
        };

        let found = chunked_extents(&forward, &reverse, &cuts, &parameters)
            .with_context(|| format!("running trial {trial}"))?;

        debug!(
            trial,
            chunks = cuts.len(),
            intervals = expected.len(),
            "trial completed"
        );

        comparisons.push(Comparison {
            cuts,
            expected,
            found,
        });
    }

    let total_comparisons = comparisons.len();
    let mismatches = comparisons
        .into_iter()
        .filter(|comparison| !comparison.matched())
        .collect::<Vec<_>>();
    let n_matches = total_comparisons - mismatches.len();
    let matched_percent = (n_matches as f64 * 100.0) / total_comparisons.max(1) as f64;

    println!(
        "chunked and whole-array scans matched in {matched_percent:.2}% of cases (n = \
         {total_comparisons})"
    );

    if let Some(take_n_mismatches) = args.explore_mismatches {
        for (i, comparison) in mismatches.iter().enumerate().take(take_n_mismatches) {
            warn!("== unmatched example #{} ==", i + 1);
            warn!("chunk offsets: {:?}", comparison.cuts);

            for extent in comparison.expected.iter() {
                if !comparison.found.contains(extent) {
                    warn!("  ↳ missing: {}:{}-{}", extent.0, extent.1, extent.2);
                }
            }

            for extent in comparison.found.iter() {
                if !comparison.expected.contains(extent) {
                    warn!("  ↳ unexpected: {}:{}-{}", extent.0, extent.1, extent.2);
                }
            }
        }
    }

    if !mismatches.is_empty() {
        bail!("{} trial(s) did not match", mismatches.len());
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    match std::env::var("RUST_LOG") {
        Ok(_) => tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_max_level(args.verbose.log_level_filter().as_trace())
            .init(),
    };

    throw(&args)
}
