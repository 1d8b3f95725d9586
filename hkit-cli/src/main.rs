mod count;

use anyhow::Result;
use clap::{ArgAction, ArgMatches, Command, arg};
use log::LevelFilter;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "hkit";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Derived per-pair statistics for Hi-C contact pairs: containment and neighbor density.")
        .subcommand_required(true)
        .arg(
            arg!(-v --verbose "Increase logging verbosity (-v debug, -vv trace)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(count::cli::create_count_contained_cli())
        .subcommand(count::cli::create_count_nei_cli())
}

fn init_logging(matches: &ArgMatches) {
    let filter_level = match matches.get_count("verbose") {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::builder()
        .format_timestamp_millis()
        .filter_level(filter_level)
        .init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();
    init_logging(&matches);

    match matches.subcommand() {
        //
        // CONTAINMENT COUNTING
        //
        Some((count::cli::COUNT_CONTAINED_CMD, matches)) => {
            count::handlers::run_count_contained(matches)?;
        }

        //
        // NEIGHBOR COUNTING
        //
        Some((count::cli::COUNT_NEI_CMD, matches)) => {
            count::handlers::run_count_nei(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
