use std::env;

use covscan::Scanner;
use covscan::chunk;
use covscan::parameters;
use tabled::builder::Builder;
use tabled::settings::Alignment;
use tabled::settings::Style;
use tabled::settings::object::Rows;

/// The size of each streamed chunk.
const CHUNK_SIZE: usize = 8;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let min_coverage = env::args()
        .nth(1)
        .map(|s| s.parse::<u32>())
        .transpose()?
        .unwrap_or(5);

    let uncovered = env::args().nth(2).is_some_and(|s| s == "uncovered");

    let forward: Vec<u32> = vec![
        0, 0, 2, 6, 7, 7, 8, 6, 6, 5, 1, 0, 0, 0, 3, 9, 9, 9, 9, 9, 9, 9, 9, 9, 4, 2, 0, 0, 5, 5,
        5, 0,
    ];
    let reverse: Vec<u32> = vec![
        1, 1, 1, 1, 1, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 2, 2, 0, 0, 0, 0, 0, 0, 0, 7, 7, 7, 7,
        7, 7,
    ];

    let parameters = parameters::Builder::default()
        .min_coverage(min_coverage)
        .detect_covered_intervals(!uncovered)
        .try_build()?;

    println!("scanning with {parameters}");

    let mut scanner = Scanner::new(0, parameters);

    for (i, (forward, reverse)) in forward
        .chunks(CHUNK_SIZE)
        .zip(reverse.chunks(CHUNK_SIZE))
        .enumerate()
    {
        let from = (i * CHUNK_SIZE) as u64 + 1;

        let chunk = chunk::Builder::default()
            .track(0)
            .chromosome(0)
            .range(from, from + forward.len() as u64 - 1)
            .main(forward.to_vec())?
            .reverse(reverse.to_vec())?
            .try_build()?;

        scanner.process(&chunk)?;
    }

    let results = scanner.finalize();

    let mut builder = Builder::default();
    builder.push_record(["Track", "Chromosome", "Strand", "Start", "Stop", "Size", "Mean"]);

    for interval in results.iter() {
        builder.push_record([
            interval.track().to_string(),
            interval.chromosome().to_string(),
            interval.strand().to_string(),
            interval.start().to_string(),
            interval.stop().to_string(),
            interval.size().to_string(),
            interval.mean_coverage().to_string(),
        ]);
    }

    let table = builder
        .build()
        .with(Style::rounded())
        .modify(Rows::new(1..), Alignment::left())
        .to_string();

    println!("{}", table);

    Ok(())
}
