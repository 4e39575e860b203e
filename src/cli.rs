use std::io::BufReader;

use compress_io::compress::Reader;

use crate::log_utils::init_log;

mod cli_model;
mod config;

pub use config::Config;

pub fn handle_cli() -> anyhow::Result<(BufReader<Reader>, Config)> {
    let m = cli_model::cli_model().get_matches();
    init_log(&m)?;
    Config::from_matches(&m)
}
