use thiserror::Error;

/// Problems that make a pileup line unusable.  These are not fatal; the
/// line is reported and skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("expected at least 5 fields, found {0}")]
    TooFewFields(usize),

    #[error("could not parse position '{0}'")]
    BadPosition(String),

    #[error("invalid UTF-8 at byte {0}")]
    Encoding(usize),
}

/// Problems found while removing indel runs from a call string.  The
/// extractor recovers from these locally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndelError {
    #[error("{sign}{len} marker runs past end of call string ({unremoved} not removed)")]
    Truncated {
        sign: char,
        len: usize,
        unremoved: usize,
    },

    #[error("could not parse indel length '{sign}{digits}'")]
    BadLength { sign: char, digits: String },
}
