use std::fmt;

use crate::{indel::IndelSplit, pileup::PileupLine};

/// Counts over a cleaned call string (indels and read markers removed)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BaseCounts {
    pub depth: usize,
    /// T, C, G, A
    pub subst: [usize; 4],
    pub n: usize,
}

impl BaseCounts {
    pub fn from_calls(calls: &str) -> Self {
        let mut bc = Self::default();
        for c in calls.chars() {
            bc.depth += 1;
            match c {
                'T' => bc.subst[0] += 1,
                'C' => bc.subst[1] += 1,
                'G' => bc.subst[2] += 1,
                'A' => bc.subst[3] += 1,
                'N' => bc.n += 1,
                _ => (),
            }
        }
        bc
    }

    pub fn substitutions(&self) -> usize {
        self.subst.iter().sum()
    }

    pub fn max_subst(&self) -> usize {
        self.subst.iter().copied().max().unwrap_or(0)
    }
}

/// One output row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionRecord {
    chrom: Box<str>,
    ref_base: Box<str>,
    pos: usize,
    counts: BaseCounts,
    insertions: usize,
    deletions: usize,
}

impl PositionRecord {
    pub fn new(line: &PileupLine, counts: BaseCounts, split: &IndelSplit) -> Self {
        Self {
            chrom: Box::from(line.chrom()),
            ref_base: Box::from(line.ref_base()),
            pos: line.pos(),
            counts,
            insertions: split.ins.events(),
            deletions: split.dels.events(),
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }
}

impl fmt::Display for PositionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.counts;
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.chrom,
            self.ref_base,
            self.pos,
            c.depth,
            c.substitutions()
        )?;
        for x in c.subst.iter() {
            write!(f, "\t{}", x)?;
        }
        write!(f, "\t{}\t{}\t{}", self.insertions, self.deletions, c.n)
    }
}
