use std::{
    io::{self, BufReader, BufWriter},
    path::PathBuf,
};

use clap::ArgMatches;
use compress_io::{
    compress::{CompressIo, Reader, Writer},
    compress_type::CompressType,
};

use crate::filter::FilterConfig;

use super::Config;

fn get_arg<T: Clone + Send + Sync + 'static>(m: &ArgMatches, id: &str) -> anyhow::Result<T> {
    m.try_get_one::<T>(id)?
        .cloned()
        .ok_or_else(|| anyhow!("Missing value for {}", id))
}

fn check_ratio(x: f64, name: &str) -> anyhow::Result<f64> {
    if !x.is_finite() {
        return Err(anyhow!("Invalid {} ({}): must be a finite number", name, x));
    }
    if x < 0.0 {
        warn!("Negative {} ({}) has the same effect as 0", name, x)
    }
    Ok(x)
}

impl Config {
    pub fn from_matches(m: &ArgMatches) -> anyhow::Result<(BufReader<Reader>, Self)> {
        let min_depth = get_arg::<usize>(m, "min_depth")?;
        let clonal_min = check_ratio(get_arg::<f64>(m, "clonal_min")?, "minimum clonality")?;
        let clonal_max = check_ratio(get_arg::<f64>(m, "clonal_max")?, "maximum clonality")?;
        let num_muts = get_arg::<usize>(m, "num_muts")?;
        if clonal_min > clonal_max {
            warn!(
                "Minimum clonality {} is greater than maximum clonality {}: no sites will be reported",
                clonal_min, clonal_max
            )
        }
        let filter = FilterConfig::new(min_depth, clonal_min, clonal_max, num_muts);
        debug!("Filter settings - {}", filter);

        let threads = get_arg::<u16>(m, "threads")? as usize;
        let compress = m.get_flag("compress");
        let input = m.get_one::<PathBuf>("infile").cloned();
        let output = m.get_one::<PathBuf>("outfile").cloned();

        let cfg = Config {
            filter,
            input,
            output,
            threads,
            compress,
        };
        let rdr = cfg.open_input()?;
        Ok((rdr, cfg))
    }

    fn open_input(&self) -> io::Result<BufReader<Reader>> {
        let mut cio = CompressIo::new();
        if let Some(p) = self.input() {
            cio.path(p);
        }
        let rdr = cio.bufreader()?;
        match self.input() {
            Some(p) => debug!("Opened {} for input", p.display()),
            None => debug!("Reading input from stdin"),
        }
        Ok(rdr)
    }

    pub fn open_output(&self) -> io::Result<BufWriter<Writer>> {
        let mut cio = CompressIo::new();
        if let Some(p) = self.output() {
            cio.path(p);
        }
        if self.compress() {
            cio.ctype(CompressType::Bgzip);
        }
        let wrt = cio.bufwriter()?;
        match self.output() {
            Some(p) => debug!("Opened {} for output", p.display()),
            None => debug!("Writing output to stdout"),
        }
        Ok(wrt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_ratio_accepted() {
        assert_eq!(check_ratio(-0.5, "minimum clonality").unwrap(), -0.5);
        assert_eq!(check_ratio(0.3, "maximum clonality").unwrap(), 0.3);
    }

    #[test]
    fn non_finite_ratio_rejected() {
        assert!(check_ratio(f64::NAN, "minimum clonality").is_err());
        assert!(check_ratio(f64::INFINITY, "maximum clonality").is_err());
    }
}
