#[macro_use]
extern crate log;
#[macro_use]
extern crate anyhow;

mod analyze;
mod cli;
mod counts;
mod error;
mod filter;
mod indel;
mod log_utils;
mod pileup;
mod process;

fn main() -> anyhow::Result<()> {
    let (infile, cfg) = cli::handle_cli()?;
    process::process_data(infile, cfg)
}
