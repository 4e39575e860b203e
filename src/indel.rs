use std::{
    collections::BTreeMap,
    iter,
    sync::LazyLock,
};

use regex::Regex;

use crate::error::IndelError;

static RE_INS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\+[0-9]+").unwrap());
static RE_DEL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-[0-9]+").unwrap());

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IndelKind {
    Insertion,
    Deletion,
}

impl IndelKind {
    pub fn sign(&self) -> char {
        match self {
            Self::Insertion => '+',
            Self::Deletion => '-',
        }
    }

    fn marker_re(&self) -> &'static Regex {
        match self {
            Self::Insertion => &*RE_INS,
            Self::Deletion => &*RE_DEL,
        }
    }
}

/// Number of indels seen for each indel length.  There is always an entry
/// for length 0 so that the maximum length is defined even when no indels
/// were seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndelTally(BTreeMap<usize, usize>);

impl Default for IndelTally {
    fn default() -> Self {
        Self::new()
    }
}

impl IndelTally {
    pub fn new() -> Self {
        let mut m = BTreeMap::new();
        m.insert(0, 0);
        Self(m)
    }

    pub fn add(&mut self, len: usize) {
        *self.0.entry(len).or_insert(0) += 1
    }

    pub fn count(&self, len: usize) -> usize {
        self.0.get(&len).copied().unwrap_or(0)
    }

    /// Total number of indel events irrespective of length
    pub fn events(&self) -> usize {
        self.0.values().sum()
    }

    pub fn max_len(&self) -> usize {
        self.0.keys().next_back().copied().unwrap_or(0)
    }
}

/// Result of removing the indels of one kind from a call string
#[derive(Debug)]
pub struct Extracted {
    pub calls: String,
    pub tally: IndelTally,
    pub problems: Vec<IndelError>,
}

/// Byte offset of the end of a run of `len` characters at the start of `s`
fn run_end(s: &str, len: usize) -> Option<usize> {
    s.char_indices()
        .map(|(j, _)| j)
        .chain(iter::once(s.len()))
        .nth(len)
}

/// Remove all non-overlapping occurrences of `marker` followed by `len`
/// characters, scanning from the left.  Returns the new string and the
/// number of runs removed.
fn remove_runs(s: &str, marker: &str, len: usize) -> (String, usize) {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    let mut n = 0;
    while let Some(i) = rest.find(marker) {
        let tail = &rest[i + marker.len()..];
        // If there is no room here there is no room further on either
        let Some(j) = run_end(tail, len) else { break };
        out.push_str(&rest[..i]);
        rest = &tail[j..];
        n += 1;
    }
    out.push_str(rest);
    (out, n)
}

/// Count and remove the indels of type `kind` from a normalized call string.
///
/// Markers are found in a single scan of the input.  For each marker, in
/// order, the tally for its length is incremented and every run
/// `<sign><len>` followed by `len` characters is cut from the current string,
/// so a repeated length is cut again from the result of earlier removals.
/// Markers exposed by a removal are never added to the list.  A marker whose
/// run can not be removed (it extends past the end of the string) stays in
/// the string but is still counted.
pub fn extract_indels(calls: &str, kind: IndelKind) -> Extracted {
    let sign = kind.sign();
    let mut tally = IndelTally::new();
    let mut problems = Vec::new();
    let mut removed: BTreeMap<usize, usize> = BTreeMap::new();

    let lengths: Vec<usize> = kind
        .marker_re()
        .find_iter(calls)
        .filter_map(|m| {
            let digits = &m.as_str()[1..];
            match digits.parse::<usize>() {
                Ok(l) => Some(l),
                Err(_) => {
                    problems.push(IndelError::BadLength {
                        sign,
                        digits: digits.to_owned(),
                    });
                    None
                }
            }
        })
        .collect();

    let mut s = calls.to_owned();
    for len in lengths {
        tally.add(len);
        let (s1, n) = remove_runs(&s, &format!("{}{}", sign, len), len);
        s = s1;
        *removed.entry(len).or_insert(0) += n;
    }

    for (&len, &r) in removed.iter() {
        let n = tally.count(len);
        if n > r {
            problems.push(IndelError::Truncated {
                sign,
                len,
                unremoved: n - r,
            })
        }
    }

    Extracted {
        calls: s,
        tally,
        problems,
    }
}

/// Call string with all insertions and deletions removed
#[derive(Debug)]
pub struct IndelSplit {
    pub calls: String,
    pub ins: IndelTally,
    pub dels: IndelTally,
    pub problems: Vec<IndelError>,
}

/// Insertions are removed first, then deletions are looked for in what remains
pub fn split_indels(calls: &str) -> IndelSplit {
    let ins = extract_indels(calls, IndelKind::Insertion);
    let dels = extract_indels(&ins.calls, IndelKind::Deletion);
    let mut problems = ins.problems;
    problems.extend(dels.problems);
    IndelSplit {
        calls: dels.calls,
        ins: ins.tally,
        dels: dels.tally,
        problems,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel() {
        let t = IndelTally::new();
        assert_eq!(t.count(0), 0);
        assert_eq!(t.events(), 0);
        assert_eq!(t.max_len(), 0);
    }

    #[test]
    fn single_insertion() {
        let calls = format!("+2AG{}", ".".repeat(20));
        let x = extract_indels(&calls, IndelKind::Insertion);
        assert_eq!(x.calls, ".".repeat(20));
        let mut expected = IndelTally::new();
        expected.add(2);
        assert_eq!(x.tally, expected);
        assert_eq!(x.tally.count(0), 0);
        assert_eq!(x.tally.events(), 1);
        assert!(x.problems.is_empty());
    }

    #[test]
    fn repeated_lengths() {
        let x = extract_indels("..+1A,+1C.+3ACG,", IndelKind::Insertion);
        assert_eq!(x.calls, "..,.,");
        assert_eq!(x.tally.count(1), 2);
        assert_eq!(x.tally.count(3), 1);
        assert_eq!(x.tally.events(), 3);
        assert_eq!(x.tally.max_len(), 3);
    }

    #[test]
    fn multi_digit_length() {
        let run = "A".repeat(12);
        let x = extract_indels(&format!(".-12{}.", run), IndelKind::Deletion);
        assert_eq!(x.calls, "..");
        assert_eq!(x.tally.count(12), 1);
    }

    #[test]
    fn deletion_ignores_insertion_markers() {
        let x = extract_indels(".+1A.", IndelKind::Deletion);
        assert_eq!(x.calls, ".+1A.");
        assert_eq!(x.tally.events(), 0);
    }

    #[test]
    fn truncated_run() {
        let x = extract_indels("..+5AC", IndelKind::Insertion);
        assert_eq!(x.calls, "..+5AC");
        assert_eq!(x.tally.count(5), 1);
        assert_eq!(
            x.problems,
            vec![IndelError::Truncated {
                sign: '+',
                len: 5,
                unremoved: 1
            }]
        );
    }

    #[test]
    fn partly_truncated() {
        // The first run is removed, the second runs off the end
        let x = extract_indels("+2AC.+2A", IndelKind::Insertion);
        assert_eq!(x.calls, ".+2A");
        assert_eq!(x.tally.count(2), 2);
        assert_eq!(x.problems.len(), 1);
    }

    #[test]
    fn repeated_length_cut_again() {
        // The second '+1' is cut from the string left after removing '+2XY'
        let x = extract_indels("+1A++2XY1C+1", IndelKind::Insertion);
        assert_eq!(x.calls, "+1");
        assert_eq!(x.tally.count(1), 2);
        assert_eq!(x.tally.count(2), 1);
        assert!(x.problems.is_empty());
    }

    #[test]
    fn overlong_length() {
        let x = extract_indels(".+99999999999999999999999A", IndelKind::Insertion);
        assert_eq!(x.tally.events(), 0);
        assert!(matches!(x.problems[0], IndelError::BadLength { sign: '+', .. }));
    }

    #[test]
    fn no_rescan() {
        // Removing '+1A' joins '+' and '1C' into a new marker, which is kept
        let x = extract_indels(".++1A1C.", IndelKind::Insertion);
        assert_eq!(x.tally.count(1), 1);
        assert_eq!(x.calls, ".+1C.");
        assert!(x.problems.is_empty());

        // A run can swallow the sign of the next marker
        let x = extract_indels("+1++1C.", IndelKind::Insertion);
        assert_eq!(x.tally.count(1), 2);
        assert_eq!(x.calls, ".");
    }

    #[test]
    fn marker_count_round_trip() {
        let raw = "..+1A,-2CT+3GGG.-1A,,+1T-4ACGT.";
        let n_markers = raw.matches(|c| c == '+' || c == '-').count();
        let s = split_indels(raw);
        assert_eq!(s.ins.events() + s.dels.events(), n_markers);
        assert_eq!(s.calls, "..,.,,.");
        assert_eq!(s.ins.max_len(), 3);
        assert_eq!(s.dels.max_len(), 4);
    }
}
