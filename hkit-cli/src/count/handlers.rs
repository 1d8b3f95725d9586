use anyhow::{Context, Result};
use clap::ArgMatches;

use hkit_count::CountOptions;
use hkit_io::{OutputOptions, read_pairs_file, write_pairs_file};

const STDOUT: &str = "-";

const OUTPUT_OPTIONS: OutputOptions = OutputOptions {
    phase: true,
    count: true,
};

pub fn run_count_contained(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("pairs")
        .expect("A path to a pairs file is required.");
    let default_out = STDOUT.to_string();
    let output = matches.get_one::<String>("output").unwrap_or(&default_out);

    let opts = CountOptions::default().with_sort(!matches.get_flag("no-sort"));

    let mut map =
        read_pairs_file(input).with_context(|| format!("Failed to read pairs from {}", input))?;
    opts.count_contained(&mut map);

    write_pairs_file(output, &map, OUTPUT_OPTIONS)
        .with_context(|| format!("Failed to write pairs to {}", output))?;
    Ok(())
}

pub fn run_count_nei(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("pairs")
        .expect("A path to a pairs file is required.");
    let default_out = STDOUT.to_string();
    let output = matches.get_one::<String>("output").unwrap_or(&default_out);
    let radius = *matches
        .get_one::<u32>("radius")
        .expect("radius has a default value");

    let opts = CountOptions::default().with_radius(radius);

    let mut map =
        read_pairs_file(input).with_context(|| format!("Failed to read pairs from {}", input))?;
    opts.count_neighbors(&mut map)
        .with_context(|| format!("Failed to count neighbors within radius {}", radius))?;

    write_pairs_file(output, &map, OUTPUT_OPTIONS)
        .with_context(|| format!("Failed to write pairs to {}", output))?;
    Ok(())
}
