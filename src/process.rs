use std::io::{BufRead, Write};

use rayon::prelude::*;

use crate::{
    analyze::{analyze_raw, LineOutcome, PileupAnalyzer, RawLines, RunStats},
    cli::Config,
    filter::FilterConfig,
};

/// Number of lines handed to the thread pool at a time
const CHUNK_SIZE: usize = 16384;

pub fn process_data<R: BufRead>(rdr: R, cfg: Config) -> anyhow::Result<()> {
    let mut wrt = cfg.open_output()?;
    let stats = analyze_stream(rdr, &mut wrt, cfg.filter(), cfg.threads())?;
    wrt.flush()?;
    info!("{}", stats);
    Ok(())
}

/// Read pileup lines from `rdr` and write the records of retained positions
/// to `wrt` in input order.
pub fn analyze_stream<R: BufRead, W: Write>(
    rdr: R,
    wrt: &mut W,
    filter: &FilterConfig,
    threads: usize,
) -> anyhow::Result<RunStats> {
    if threads > 1 {
        analyze_parallel(rdr, wrt, filter, threads)
    } else {
        let mut an = PileupAnalyzer::new(RawLines::new(rdr), filter);
        for rec in an.by_ref() {
            writeln!(wrt, "{}", rec?)?;
        }
        Ok(*an.stats())
    }
}

fn analyze_parallel<R: BufRead, W: Write>(
    rdr: R,
    wrt: &mut W,
    filter: &FilterConfig,
    threads: usize,
) -> anyhow::Result<RunStats> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()?;
    debug!("Using {} worker threads", threads);

    let mut stats = RunStats::default();
    let mut lines = RawLines::new(rdr);
    let mut chunk = Vec::with_capacity(CHUNK_SIZE);
    loop {
        chunk.clear();
        // A read error is returned only after the lines before it are output
        let mut read_err = None;
        for line in lines.by_ref().take(CHUNK_SIZE) {
            match line {
                Ok(l) => chunk.push(l),
                Err(e) => {
                    read_err = Some(e);
                    break;
                }
            }
        }
        if chunk.is_empty() && read_err.is_none() {
            break;
        }
        trace!("Analyzing chunk of {} lines", chunk.len());
        let outcomes: Vec<LineOutcome> = pool.install(|| {
            chunk
                .par_iter()
                .map(|l| analyze_raw(l, filter))
                .collect()
        });
        for rec in outcomes.into_iter().filter_map(|o| stats.tally(o)) {
            writeln!(wrt, "{}", rec)?;
        }
        if let Some(e) = read_err {
            return Err(e.into());
        }
    }
    Ok(stats)
}
