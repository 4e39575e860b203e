use std::{
    fmt,
    io::{self, BufRead},
    str,
};

use crate::{
    counts::{BaseCounts, PositionRecord},
    error::LineError,
    filter::{peak, FilterConfig},
    indel::split_indels,
    pileup::{normalize_calls, PileupLine},
};

/// What became of a single input line
#[derive(Debug)]
pub enum LineOutcome {
    Blank,
    Malformed(LineError),
    Rejected,
    Retained(PositionRecord),
}

/// Run a pileup line through normalization, indel removal, counting and
/// filtering.  Lines are handled independently of each other.
pub fn analyze_line(line: &str, cfg: &FilterConfig) -> LineOutcome {
    if line.trim().is_empty() {
        return LineOutcome::Blank;
    }
    let pl = match PileupLine::from_line(line) {
        Ok(p) => p,
        Err(e) => return LineOutcome::Malformed(e),
    };

    let split = split_indels(&normalize_calls(pl.calls()));
    for e in split.problems.iter() {
        warn!("{}:{} {}", pl.chrom(), pl.pos(), e)
    }

    let counts = BaseCounts::from_calls(&split.calls);
    let pk = peak(&counts, &split);
    trace!(
        "{}:{} depth {} peak {} ins {} del {}",
        pl.chrom(),
        pl.pos(),
        counts.depth,
        pk,
        split.ins.events(),
        split.dels.events()
    );

    if cfg.retain(counts.depth, pk) {
        LineOutcome::Retained(PositionRecord::new(&pl, counts, &split))
    } else {
        LineOutcome::Rejected
    }
}

/// As `analyze_line`, but for a line that has not yet been checked for valid
/// UTF-8.  Undecodable lines are reported as malformed.
pub fn analyze_raw(line: &[u8], cfg: &FilterConfig) -> LineOutcome {
    match str::from_utf8(line) {
        Ok(s) => analyze_line(s, cfg),
        Err(e) => LineOutcome::Malformed(LineError::Encoding(e.valid_up_to())),
    }
}

/// Lines of a reader as raw bytes with the line terminator (`\n` or `\r\n`)
/// removed.  Unlike `BufRead::lines` a line with invalid UTF-8 is not an
/// error at this stage.
pub struct RawLines<R> {
    rdr: R,
}

impl<R: BufRead> RawLines<R> {
    pub fn new(rdr: R) -> Self {
        Self { rdr }
    }
}

impl<R: BufRead> Iterator for RawLines<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = Vec::new();
        match self.rdr.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => {
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                    if buf.last() == Some(&b'\r') {
                        buf.pop();
                    }
                }
                Some(Ok(buf))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub lines: usize,
    pub blank: usize,
    pub malformed: usize,
    pub rejected: usize,
    pub retained: usize,
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lines read: {}, blank: {}, malformed: {}, rejected: {}, retained: {}",
            self.lines, self.blank, self.malformed, self.rejected, self.retained
        )
    }
}

impl RunStats {
    /// Account for the outcome of the next input line, returning the record
    /// to be output (if any).  Outcomes must be supplied in input order.
    pub fn tally(&mut self, outcome: LineOutcome) -> Option<PositionRecord> {
        self.lines += 1;
        match outcome {
            LineOutcome::Blank => {
                debug!("Skipping blank line {}", self.lines);
                self.blank += 1;
                None
            }
            LineOutcome::Malformed(e) => {
                warn!("Skipping malformed line {}: {}", self.lines, e);
                self.malformed += 1;
                None
            }
            LineOutcome::Rejected => {
                self.rejected += 1;
                None
            }
            LineOutcome::Retained(rec) => {
                self.retained += 1;
                Some(rec)
            }
        }
    }
}

/// Lazily turns a sequence of pileup lines into the records that pass the
/// filters.  Malformed lines are skipped; read errors are passed through.
pub struct PileupAnalyzer<'a, I> {
    lines: I,
    cfg: &'a FilterConfig,
    stats: RunStats,
}

impl<'a, I, T> PileupAnalyzer<'a, I>
where
    I: Iterator<Item = io::Result<T>>,
    T: AsRef<[u8]>,
{
    pub fn new(lines: I, cfg: &'a FilterConfig) -> Self {
        Self {
            lines,
            cfg,
            stats: RunStats::default(),
        }
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }
}

impl<I, T> Iterator for PileupAnalyzer<'_, I>
where
    I: Iterator<Item = io::Result<T>>,
    T: AsRef<[u8]>,
{
    type Item = io::Result<PositionRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(l) => l,
                Err(e) => return Some(Err(e)),
            };
            if let Some(rec) = self.stats.tally(analyze_raw(line.as_ref(), self.cfg)) {
                return Some(Ok(rec));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn retained(line: &str, cfg: &FilterConfig) -> Option<String> {
        match analyze_line(line, cfg) {
            LineOutcome::Retained(rec) => Some(rec.to_string()),
            _ => None,
        }
    }

    #[test]
    fn low_depth_rejected() {
        let cfg = FilterConfig::default();
        assert!(matches!(
            analyze_line("chr1\t100\tA\t5\tTTTTt\t*****", &cfg),
            LineOutcome::Rejected
        ));
    }

    #[test]
    fn clonal_position_rejected() {
        let cfg = FilterConfig::default();
        let line = format!("chr1\t100\tA\t25\t{}\t{}", "T".repeat(25), "I".repeat(25));
        assert!(matches!(analyze_line(&line, &cfg), LineOutcome::Rejected));
    }

    #[test]
    fn subclonal_position_retained() {
        let cfg = FilterConfig::default();
        let line = format!("chr1\t100\tA\t25\tTTTTT{}", ".".repeat(20));
        assert_eq!(
            retained(&line, &cfg).as_deref(),
            Some("chr1\tA\t100\t25\t5\t5\t0\t0\t0\t0\t0\t0")
        );
    }

    #[test]
    fn insertion_not_counted_in_depth() {
        let cfg = FilterConfig::default();
        let line = format!("chr1\t100\tA\t21\t+2AG{}", ".".repeat(20));
        assert_eq!(
            retained(&line, &cfg).as_deref(),
            Some("chr1\tA\t100\t20\t0\t0\t0\t0\t0\t1\t0\t0")
        );
    }

    #[test]
    fn markers_and_strands() {
        let cfg = FilterConfig::new(5, 0.0, 1.0, 0);
        let line = "chrX\t9\tC\t8\t^F.,$t^~T.-1a,n\tIIIIIIII";
        assert_eq!(
            retained(line, &cfg).as_deref(),
            Some("chrX\tC\t9\t7\t2\t2\t0\t0\t0\t0\t1\t1")
        );
    }

    #[test]
    fn malformed_and_blank() {
        let cfg = FilterConfig::default();
        assert!(matches!(
            analyze_line("chr1\t100\tA", &cfg),
            LineOutcome::Malformed(LineError::TooFewFields(3))
        ));
        assert!(matches!(analyze_line("  \t", &cfg), LineOutcome::Blank));
    }

    #[test]
    fn analyzer_skips_and_counts() {
        let cfg = FilterConfig::new(2, 0.0, 1.0, 0);
        let input = vec![
            Ok("chr1 1 A 2 ..".to_owned()),
            Ok("chr1 2 A".to_owned()),
            Ok(String::new()),
            Ok("chr1 3 A 1 T".to_owned()),
            Ok("chr1 4 A 3 T.,".to_owned()),
        ];
        let mut an = PileupAnalyzer::new(input.into_iter(), &cfg);
        let pos: Vec<usize> = an.by_ref().map(|r| r.unwrap().pos()).collect();
        assert_eq!(pos, vec![1, 4]);
        assert_eq!(
            *an.stats(),
            RunStats {
                lines: 5,
                blank: 1,
                malformed: 1,
                rejected: 1,
                retained: 2
            }
        );
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let cfg = FilterConfig::new(1, 0.0, 1.0, 0);
        assert!(matches!(
            analyze_raw(b"chr1\t5\tA\t1\t.\t\xff", &cfg),
            LineOutcome::Malformed(LineError::Encoding(13))
        ));
        assert!(matches!(
            analyze_raw(b"chr1\t5\tA\t1\t.\tI", &cfg),
            LineOutcome::Retained(_)
        ));
    }

    #[test]
    fn raw_lines() {
        let input: &[u8] = b"a b\r\n\xfe\n\nlast";
        let lines: Vec<Vec<u8>> = RawLines::new(input).map(|l| l.unwrap()).collect();
        assert_eq!(
            lines,
            vec![b"a b".to_vec(), vec![0xfe], Vec::new(), b"last".to_vec()]
        );
    }

    #[test]
    fn analyzer_passes_read_errors() {
        let cfg = FilterConfig::default();
        let input: Vec<io::Result<String>> =
            vec![Err(io::Error::new(io::ErrorKind::Other, "boom"))];
        let mut an = PileupAnalyzer::new(input.into_iter(), &cfg);
        assert!(an.next().unwrap().is_err());
        assert!(an.next().is_none());
    }
}
