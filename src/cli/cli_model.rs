use std::path::PathBuf;

use clap::{command, value_parser, Arg, ArgAction, Command};

use crate::log_utils::LogLevel;

pub(super) fn cli_model() -> Command {
    command!()
    .arg(
        Arg::new("min_depth")
            .short('d')
            .long("depth")
            .default_value("20")
            .value_parser(value_parser!(usize))
            .value_name("INT")
            .help("Minimum depth for counting mutations at a site"),
    )
    .arg(
        Arg::new("clonal_min")
            .short('c')
            .long("min-clonality")
            .alias("min_clonality")
            .allow_negative_numbers(true)
            .default_value("0")
            .value_parser(value_parser!(f64))
            .value_name("FREQ")
            .help("Sites where the most common mutation has frequency below FREQ are not reported"),
    )
    .arg(
        Arg::new("clonal_max")
            .short('C')
            .long("max-clonality")
            .alias("max_clonality")
            .allow_negative_numbers(true)
            .default_value("0.3")
            .value_parser(value_parser!(f64))
            .value_name("FREQ")
            .help("Sites where the most common mutation has frequency above FREQ are not reported"),
    )
    .arg(
        Arg::new("num_muts")
            .short('n')
            .long("num-muts")
            .alias("num_muts")
            .default_value("0")
            .value_parser(value_parser!(usize))
            .value_name("INT")
            .help("Minimum number of mutations for scoring a site"),
    )
    .next_help_heading("Operation")
    .arg(
        Arg::new("threads")
            .short('t')
            .long("threads")
            .default_value("1")
            .value_parser(value_parser!(u16).range(1..))
            .value_name("INT")
            .help("Number of threads used to process input lines"),
    )
    .arg(
        Arg::new("loglevel")
            .short('l')
            .long("loglevel")
            .value_name("LOGLEVEL")
            .value_parser(value_parser!(LogLevel))
            .ignore_case(true)
            .default_value("info")
            .help("Set log level"),
    )
    .arg(
        Arg::new("timestamp")
            .long("timestamp")
            .action(ArgAction::SetTrue)
            .help("Prepend timestamps to log messages"),
    )
    .next_help_heading("Input/Output")
    .arg(
        Arg::new("infile")
            .short('i')
            .long("infile")
            .value_parser(value_parser!(PathBuf))
            .value_name("FILE")
            .help("Input pileup file (possibly compressed) [default: stdin]"),
    )
    .arg(
        Arg::new("outfile")
            .short('o')
            .long("outfile")
            .value_parser(value_parser!(PathBuf))
            .value_name("FILE")
            .help("Output file [default: stdout]"),
    )
    .arg(
        Arg::new("compress")
            .short('z')
            .long("compress")
            .action(ArgAction::SetTrue)
            .help("Compress output with bgzip"),
    )
}
