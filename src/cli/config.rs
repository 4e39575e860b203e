use std::path::PathBuf;

use crate::filter::FilterConfig;

mod getters;
mod mk_config;

pub struct Config {
    filter: FilterConfig,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    threads: usize,
    compress: bool,
}
