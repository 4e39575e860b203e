use crate::error::LineError;

/// Minimum number of whitespace separated fields in a pileup record
pub const MIN_FIELDS: usize = 5;

/// The fields of a pileup record that we use.  The reported depth (field 4)
/// and anything after the call string (base and mapping qualities) are
/// ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PileupLine<'a> {
    chrom: &'a str,
    pos: usize,
    ref_base: &'a str,
    calls: &'a str,
}

impl<'a> PileupLine<'a> {
    pub fn from_line(line: &'a str) -> Result<Self, LineError> {
        let mut fields = [""; MIN_FIELDS];
        let mut n = 0;
        for s in line.split_ascii_whitespace().take(MIN_FIELDS) {
            fields[n] = s;
            n += 1;
        }
        if n < MIN_FIELDS {
            return Err(LineError::TooFewFields(n));
        }
        let pos = fields[1]
            .parse::<usize>()
            .map_err(|_| LineError::BadPosition(fields[1].to_owned()))?;

        Ok(Self {
            chrom: fields[0],
            pos,
            ref_base: fields[2],
            calls: fields[4],
        })
    }

    pub fn chrom(&self) -> &'a str {
        self.chrom
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn ref_base(&self) -> &'a str {
        self.ref_base
    }

    pub fn calls(&self) -> &'a str {
        self.calls
    }
}

/// Fold reverse strand calls onto the forward strand and strip read start
/// (`^` + mapping quality) and read end (`$`) markers.
///
/// The `$` markers are removed before the `^` pairs, so a mapping quality
/// character of `$` does not protect the following call.
pub fn normalize_calls(calls: &str) -> String {
    let mut out = String::with_capacity(calls.len());
    let mut it = calls
        .chars()
        .filter(|c| *c != '$')
        .map(|c| match c {
            't' | 'c' | 'g' | 'a' | 'n' => c.to_ascii_uppercase(),
            _ => c,
        });

    while let Some(c) = it.next() {
        if c == '^' && it.next().is_some() {
            continue;
        }
        out.push(c)
    }
    out
}
