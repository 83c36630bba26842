use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Target names – boolean label → class name
// ---------------------------------------------------------------------------

/// Class names indexed by label: `false` → `"ham"`, `true` → `"spam"`.
pub const TARGET_NAMES: [&str; 2] = ["ham", "spam"];

/// Human-readable class name for a label.
pub fn target_name(target: bool) -> &'static str {
    TARGET_NAMES[usize::from(target)]
}

// ---------------------------------------------------------------------------
// CorpusEntry – one processed email file
// ---------------------------------------------------------------------------

/// A single processed email (one row of the archive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusEntry {
    /// Base name of the source file, verbatim.
    pub file_name: String,
    /// `true` for spam, `false` for ham.
    pub target: bool,
    /// Normalized tokens of the body line.
    pub words: Vec<String>,
}

// ---------------------------------------------------------------------------
// CorpusDataset – parallel, index-aligned columns
// ---------------------------------------------------------------------------

/// The accumulated corpus as four named arrays.
///
/// `file_names`, `targets` and `words` always have the same length and
/// position `i` in each describes the same source file. The fields are
/// private so the only way to grow the dataset is [`CorpusDataset::push`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusDataset {
    target_names: Vec<String>,
    file_names: Vec<String>,
    targets: Vec<bool>,
    words: Vec<Vec<String>>,
}

impl Default for CorpusDataset {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl CorpusDataset {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            target_names: TARGET_NAMES.iter().map(|s| s.to_string()).collect(),
            file_names: Vec::with_capacity(capacity),
            targets: Vec::with_capacity(capacity),
            words: Vec::with_capacity(capacity),
        }
    }

    /// Rebuild a dataset from stored columns, checking that they line up.
    pub fn from_columns(
        target_names: Vec<String>,
        file_names: Vec<String>,
        targets: Vec<bool>,
        words: Vec<Vec<String>>,
    ) -> Option<Self> {
        if file_names.len() != targets.len() || file_names.len() != words.len() {
            return None;
        }
        Some(Self {
            target_names,
            file_names,
            targets,
            words,
        })
    }

    /// Append one entry to all three per-file columns.
    pub fn push(&mut self, entry: CorpusEntry) {
        self.file_names.push(entry.file_name);
        self.targets.push(entry.target);
        self.words.push(entry.words);
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.file_names.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.file_names.is_empty()
    }

    pub fn target_names(&self) -> &[String] {
        &self.target_names
    }

    pub fn file_names(&self) -> &[String] {
        &self.file_names
    }

    pub fn targets(&self) -> &[bool] {
        &self.targets
    }

    pub fn words(&self) -> &[Vec<String>] {
        &self.words
    }

    /// Reassemble the entry at `index`.
    pub fn entry(&self, index: usize) -> Option<CorpusEntry> {
        Some(CorpusEntry {
            file_name: self.file_names.get(index)?.clone(),
            target: *self.targets.get(index)?,
            words: self.words.get(index)?.clone(),
        })
    }

    /// Number of spam entries.
    pub fn spam_count(&self) -> usize {
        self.targets.iter().filter(|&&t| t).count()
    }

    /// Total number of tokens across all entries.
    pub fn token_count(&self) -> usize {
        self.words.iter().map(Vec::len).sum()
    }

    pub fn summary(&self) -> CorpusSummary {
        CorpusSummary {
            entries: self.len(),
            spam: self.spam_count(),
            ham: self.len() - self.spam_count(),
            tokens: self.token_count(),
        }
    }
}

impl FromIterator<CorpusEntry> for CorpusDataset {
    fn from_iter<I: IntoIterator<Item = CorpusEntry>>(iter: I) -> Self {
        let mut dataset = CorpusDataset::default();
        for entry in iter {
            dataset.push(entry);
        }
        dataset
    }
}

// ---------------------------------------------------------------------------
// CorpusSummary – aggregate counts for logs and inspection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CorpusSummary {
    pub entries: usize,
    pub ham: usize,
    pub spam: usize,
    pub tokens: usize,
}

impl CorpusSummary {
    /// Mean tokens per entry, `0.0` for an empty corpus.
    pub fn mean_tokens(&self) -> f64 {
        if self.entries == 0 {
            0.0
        } else {
            self.tokens as f64 / self.entries as f64
        }
    }
}

impl fmt::Display for CorpusSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} entries ({} {}, {} {}), {} tokens, {:.1} tokens/entry",
            self.entries,
            self.ham,
            target_name(false),
            self.spam,
            target_name(true),
            self.tokens,
            self.mean_tokens()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, target: bool, words: &[&str]) -> CorpusEntry {
        CorpusEntry {
            file_name: name.to_string(),
            target,
            words: words.iter().map(|w| w.to_string()).collect(),
        }
    }

    #[test]
    fn target_name_lookup() {
        assert_eq!(target_name(false), "ham");
        assert_eq!(target_name(true), "spam");
    }

    #[test]
    fn push_keeps_columns_aligned() {
        let mut ds = CorpusDataset::default();
        ds.push(entry("spmsga1.txt", true, &["free", "money"]));
        ds.push(entry("3-1msg1.txt", false, &[]));
        ds.push(entry("3-1msg2.txt", false, &["conference"]));

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.file_names().len(), 3);
        assert_eq!(ds.targets().len(), 3);
        assert_eq!(ds.words().len(), 3);
        assert_eq!(ds.entry(1), Some(entry("3-1msg1.txt", false, &[])));
        assert_eq!(ds.entry(3), None);
    }

    #[test]
    fn target_names_are_constant() {
        let ds = CorpusDataset::default();
        assert!(ds.is_empty());
        assert_eq!(ds.target_names(), ["ham", "spam"]);
    }

    #[test]
    fn from_columns_rejects_misaligned() {
        let names = vec!["a".to_string(), "b".to_string()];
        let words = vec![Vec::new(), Vec::new()];
        assert!(CorpusDataset::from_columns(vec![], names.clone(), vec![true], words.clone()).is_none());
        assert!(CorpusDataset::from_columns(vec![], names, vec![true, false], words).is_some());
    }

    #[test]
    fn summary_counts() {
        let ds: CorpusDataset = vec![
            entry("spmsga1.txt", true, &["a", "b", "c"]),
            entry("msg1.txt", false, &["d"]),
            entry("msg2.txt", false, &[]),
            entry("spmsga2.txt", true, &["e", "f"]),
        ]
        .into_iter()
        .collect();

        let summary = ds.summary();
        assert_eq!(
            summary,
            CorpusSummary {
                entries: 4,
                ham: 2,
                spam: 2,
                tokens: 6
            }
        );
        assert_eq!(summary.mean_tokens(), 1.5);
        assert_eq!(
            summary.to_string(),
            "4 entries (2 ham, 2 spam), 6 tokens, 1.5 tokens/entry"
        );
    }

    #[test]
    fn empty_summary_mean_is_zero() {
        assert_eq!(CorpusDataset::default().summary().mean_tokens(), 0.0);
    }
}
