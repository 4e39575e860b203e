use std::path::Path;

use crate::filter::FilterConfig;

use super::Config;

impl Config {
    pub fn filter(&self) -> &FilterConfig {
        &self.filter
    }

    pub fn input(&self) -> Option<&Path> {
        self.input.as_deref()
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    pub fn compress(&self) -> bool {
        self.compress
    }
}
