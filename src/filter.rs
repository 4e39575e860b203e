use std::fmt;

use crate::{counts::BaseCounts, indel::IndelSplit};

pub const DEFAULT_MIN_DEPTH: usize = 20;
pub const DEFAULT_CLONAL_MIN: f64 = 0.0;
pub const DEFAULT_CLONAL_MAX: f64 = 0.3;
pub const DEFAULT_NUM_MUTS: usize = 0;

/// Thresholds deciding which positions are reported
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterConfig {
    min_depth: usize,
    clonal_min: f64,
    clonal_max: f64,
    num_muts: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_depth: DEFAULT_MIN_DEPTH,
            clonal_min: DEFAULT_CLONAL_MIN,
            clonal_max: DEFAULT_CLONAL_MAX,
            num_muts: DEFAULT_NUM_MUTS,
        }
    }
}

impl fmt::Display for FilterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "min depth: {}, clonality: [{}, {}], min peak: {}",
            self.min_depth(),
            self.clonal_min(),
            self.clonal_max(),
            self.num_muts()
        )
    }
}

impl FilterConfig {
    pub fn new(min_depth: usize, clonal_min: f64, clonal_max: f64, num_muts: usize) -> Self {
        Self {
            min_depth,
            clonal_min,
            clonal_max,
            num_muts,
        }
    }

    pub fn min_depth(&self) -> usize {
        self.min_depth
    }

    pub fn clonal_min(&self) -> f64 {
        self.clonal_min
    }

    pub fn clonal_max(&self) -> f64 {
        self.clonal_max
    }

    pub fn num_muts(&self) -> usize {
        self.num_muts
    }

    /// Decide whether a position with the given depth and peak is reported.
    /// Both clonality bounds are inclusive, as is the depth threshold.  A
    /// position with no depth is never reported.
    pub fn retain(&self, depth: usize, peak: usize) -> bool {
        if depth == 0 || depth < self.min_depth {
            return false;
        }
        let ratio = peak as f64 / depth as f64;
        ratio >= self.clonal_min && ratio <= self.clonal_max && peak >= self.num_muts
    }
}

/// The largest of the four substitution counts and the two largest indel
/// *lengths*.  Note that indel lengths and not indel counts take part.
pub fn peak(counts: &BaseCounts, split: &IndelSplit) -> usize {
    counts
        .max_subst()
        .max(split.ins.max_len())
        .max(split.dels.max_len())
}
