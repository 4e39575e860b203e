use std::fmt;

use clap::{builder::PossibleValue, ArgMatches, ValueEnum};
use stderrlog::Timestamp;

/// Minimum level of messages that will be logged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    None,
}

const LEVELS: [LogLevel; 6] = [
    LogLevel::Error,
    LogLevel::Warn,
    LogLevel::Info,
    LogLevel::Debug,
    LogLevel::Trace,
    LogLevel::None,
];

impl ValueEnum for LogLevel {
    fn value_variants<'a>() -> &'a [Self] {
        &LEVELS
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(PossibleValue::new(self.name()))
    }
}

impl LogLevel {
    fn name(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
            Self::None => "none",
        }
    }

    /// stderrlog verbosity, or None if logging is switched off
    fn verbosity(&self) -> Option<usize> {
        match self {
            Self::None => None,
            l => Some(*l as usize),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Initialize logging from command line arguments
pub fn init_log(m: &ArgMatches) -> anyhow::Result<()> {
    let level = m
        .get_one::<LogLevel>("loglevel")
        .copied()
        .unwrap_or(LogLevel::Info);
    let ts = if m.get_flag("timestamp") {
        Timestamp::Second
    } else {
        Timestamp::Off
    };

    let mut log = stderrlog::new();
    log.timestamp(ts);
    match level.verbosity() {
        Some(v) => log.verbosity(v),
        None => log.quiet(true),
    };
    log.init()?;
    debug!("Logging initialized at level {}", level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity() {
        assert_eq!(LogLevel::Error.verbosity(), Some(0));
        assert_eq!(LogLevel::Trace.verbosity(), Some(4));
        assert_eq!(LogLevel::None.verbosity(), None);
    }

    #[test]
    fn parse_level() {
        assert_eq!(LogLevel::from_str("Debug", true).unwrap(), LogLevel::Debug);
        assert!(LogLevel::from_str("loud", true).is_err());
        assert_eq!(LogLevel::Warn.to_string(), "warn");
    }
}
