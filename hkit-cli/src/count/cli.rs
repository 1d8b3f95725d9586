use clap::{Arg, Command, arg, value_parser};

pub use hkit_count::consts::*;

// must match DEFAULT_RADIUS
const DEFAULT_RADIUS_ARG: &str = "10000";

pub fn create_count_contained_cli() -> Command {
    Command::new(COUNT_CONTAINED_CMD)
        .about("Count, for every intra-chromosomal pair, the pairs nested inside it.")
        .arg_required_else_help(true)
        .arg(
            Arg::new("pairs")
                .required(true)
                .help("Input .pairs[.gz] file, or - for stdin"),
        )
        .arg(arg!(-o --output <output> "Output .pairs[.gz] file (default: stdout)"))
        .arg(arg!(--"no-sort" "Input is already sorted by chromosome pair and position"))
}

pub fn create_count_nei_cli() -> Command {
    Command::new(COUNT_NEI_CMD)
        .about("Count, for every pair, the pairs whose both anchors lie within a radius.")
        .arg_required_else_help(true)
        .arg(
            Arg::new("pairs")
                .required(true)
                .help("Input .pairs[.gz] file, or - for stdin"),
        )
        .arg(arg!(-o --output <output> "Output .pairs[.gz] file (default: stdout)"))
        .arg(
            arg!(-r --radius <radius> "Half-width of the neighbor box in bp")
                .value_parser(value_parser!(u32))
                .default_value(DEFAULT_RADIUS_ARG),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_default_radius_matches_engine_default() {
        let matches = create_count_nei_cli()
            .try_get_matches_from(["count-nei", "in.pairs"])
            .unwrap();
        assert_eq!(matches.get_one::<u32>("radius"), Some(&DEFAULT_RADIUS));
    }
}
