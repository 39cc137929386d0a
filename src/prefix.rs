//! Common prefix detection for a set of file names.
//!
//! The search grows every candidate substring one byte at a time in synchronized rounds.
//! A substring becomes a result candidate once it occurs in every name,
//! and the candidate whose occurrences start earliest on average wins.
//! Stop words act as hard boundaries that a match can never grow across,
//! which lets names like `[Draft] Report 234.txt` and `Report 234 - v2.txt`
//! still agree on `Report 234`.

use std::collections::BTreeMap;

/// Stop words used when none are configured.
pub const DEFAULT_STOP_WORDS: [&str; 3] = [" - ", "] ", "["];

/// Characters trimmed from the ends of a prefix when none are configured.
pub const DEFAULT_TRIM: &str = "-_ ";

/// Minimum prefix length used when none is configured.
pub const DEFAULT_MIN_LENGTH: usize = 3;

/// Substring value -> name index -> occurrences in ascending start order.
type MatchTable<'a> = BTreeMap<&'a [u8], BTreeMap<usize, Vec<Occurrence>>>;

/// One occurrence of a candidate substring inside a single name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Occurrence {
    start: usize,
    len: usize,
}

/// The best qualifying candidate found so far.
#[derive(Debug, Clone, Copy)]
struct BestMatch {
    /// Occurrence in the first name, used to extract the result.
    occurrence: Occurrence,
    /// Average start position over all names, multiplied by 100.
    average_position: usize,
}

impl Occurrence {
    const fn new(start: usize) -> Self {
        Self { start, len: 1 }
    }

    /// Exclusive end index.
    const fn end(self) -> usize {
        self.start + self.len
    }

    const fn grown(self) -> Self {
        Self {
            start: self.start,
            len: self.len + 1,
        }
    }
}

/// Finds the most representative common prefix shared by a list of names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixMatcher {
    stop_words: Vec<String>,
    trim: Vec<u8>,
    min_length: usize,
}

impl Default for PrefixMatcher {
    fn default() -> Self {
        Self::new(&DEFAULT_STOP_WORDS, DEFAULT_TRIM, DEFAULT_MIN_LENGTH)
    }
}

impl PrefixMatcher {
    /// Create a matcher with the given stop words, trim characters and minimum match length.
    ///
    /// Empty stop words are ignored. A minimum length of zero disables the length check.
    #[must_use]
    pub fn new<S: AsRef<str>>(stop_words: &[S], trim: &str, min_length: usize) -> Self {
        let stop_words = stop_words
            .iter()
            .map(|word| word.as_ref().to_string())
            .filter(|word| !word.is_empty())
            .collect();

        Self {
            stop_words,
            trim: trim.as_bytes().to_vec(),
            min_length,
        }
    }

    #[must_use]
    pub fn stop_words(&self) -> &[String] {
        &self.stop_words
    }

    #[must_use]
    pub const fn min_length(&self) -> usize {
        self.min_length
    }

    /// Find the best common prefix for the given names.
    ///
    /// Returns an empty string if the names are empty
    /// or no substring qualifies in all of them.
    #[must_use]
    pub fn find<S: AsRef<str>>(&self, names: &[S]) -> String {
        if names.is_empty() {
            return String::new();
        }

        let names: Vec<&[u8]> = names.iter().map(|name| name.as_ref().as_bytes()).collect();
        let mut table = self.seed(&names);
        let mut best: Option<BestMatch> = None;

        while !table.is_empty() {
            let mut next: MatchTable = BTreeMap::new();
            for (substring, occurrences) in &table {
                if occurrences.len() == names.len() && self.qualifies(substring) {
                    let average_position = Self::average_position(occurrences, names.len());
                    if best.is_none_or(|current| average_position <= current.average_position)
                        && let Some(occurrence) = occurrences.get(&0).and_then(|list| list.first())
                    {
                        best = Some(BestMatch {
                            occurrence: *occurrence,
                            average_position,
                        });
                    }
                }
                self.grow(&names, occurrences, &mut next);
            }
            table = next;
        }

        best.map_or_else(String::new, |best| {
            let name = names[0];
            self.trim_bytes(&name[best.occurrence.start..best.occurrence.end()])
        })
    }

    /// Seed length-one occurrences from every position that is not a trim character
    /// and does not start a stop word.
    fn seed<'a>(&self, names: &[&'a [u8]]) -> MatchTable<'a> {
        let mut table: MatchTable = BTreeMap::new();
        for (name_index, &name) in names.iter().enumerate() {
            let mut index = 0;
            while index < name.len() {
                if self.is_trim(name[index]) {
                    index += 1;
                    continue;
                }
                if let Some(skip) = self.stop_word_at(name, index) {
                    index += skip;
                    continue;
                }
                table
                    .entry(&name[index..=index])
                    .or_default()
                    .entry(name_index)
                    .or_default()
                    .push(Occurrence::new(index));
                index += 1;
            }
        }
        table
    }

    /// Extend each occurrence by one byte into the next round's table.
    /// Occurrences blocked by a stop word or the end of the name are dropped.
    /// A match may include the last byte of a name, only growing past it ends the occurrence.
    fn grow<'a>(
        &self,
        names: &[&'a [u8]],
        occurrences: &BTreeMap<usize, Vec<Occurrence>>,
        next: &mut MatchTable<'a>,
    ) {
        for (&name_index, list) in occurrences {
            let name = names[name_index];
            for occurrence in list {
                if self.stop_word_at(name, occurrence.end()).is_some() {
                    continue;
                }
                let grown = occurrence.grown();
                if grown.end() > name.len() {
                    continue;
                }
                next.entry(&name[grown.start..grown.end()])
                    .or_default()
                    .entry(name_index)
                    .or_default()
                    .push(grown);
            }
        }
    }

    /// Check the length and trailing character requirements for a result candidate.
    fn qualifies(&self, substring: &[u8]) -> bool {
        substring.len() >= self.min_length && substring.last().is_some_and(|&byte| !self.is_trim(byte))
    }

    /// Average of each name's first start position, scaled by 100 to stay in integers.
    fn average_position(occurrences: &BTreeMap<usize, Vec<Occurrence>>, name_count: usize) -> usize {
        let sum: usize = occurrences
            .values()
            .filter_map(|list| list.first())
            .map(|occurrence| occurrence.start)
            .sum();
        sum * 100 / name_count
    }

    /// Length of the longest stop word starting at `index`.
    fn stop_word_at(&self, name: &[u8], index: usize) -> Option<usize> {
        let rest = name.get(index..)?;
        self.stop_words
            .iter()
            .map(String::as_bytes)
            .filter(|word| rest.starts_with(word))
            .map(<[u8]>::len)
            .max()
    }

    fn is_trim(&self, byte: u8) -> bool {
        self.trim.contains(&byte)
    }

    fn trim_bytes(&self, bytes: &[u8]) -> String {
        let start = bytes.iter().position(|&byte| !self.is_trim(byte));
        let end = bytes.iter().rposition(|&byte| !self.is_trim(byte));
        match (start, end) {
            (Some(start), Some(end)) => String::from_utf8_lossy(&bytes[start..=end]).into_owned(),
            _ => String::new(),
        }
    }
}

/// Find the common prefix of names, stopping at stop words,
/// trimming the given characters from both ends,
/// and requiring a match of at least `min_length` bytes.
///
/// ```rust
/// use mvcommon::find_common_prefix;
///
/// let names = ["apple_pie.txt", "apple_crumble.txt", "apple_sauce.txt"];
/// let prefix = find_common_prefix(&names, &[" - ", "] ", "["], "_- ", 3);
/// assert_eq!(prefix, "apple");
/// ```
#[must_use]
pub fn find_common_prefix<S: AsRef<str>, W: AsRef<str>>(
    names: &[S],
    stop_words: &[W],
    trim: &str,
    min_length: usize,
) -> String {
    PrefixMatcher::new(stop_words, trim, min_length).find(names)
}
