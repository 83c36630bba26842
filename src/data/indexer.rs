use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use super::model::{CorpusDataset, CorpusEntry};
use super::normalizer::EmailFilter;
use crate::error::{CorpusError, Result};

/// Line index of the message body in a Ling-Spam file
/// (line 0 is the `Subject:` header, line 1 is blank).
pub const BODY_LINE: usize = 2;

/// File name prefix that marks a spam message.
pub const SPAM_PREFIX: &str = "spmsg";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Fixed corpus conventions. The binary always uses the defaults.
#[derive(Debug, Clone)]
pub struct IndexerConfig {
    pub body_line: usize,
    pub spam_prefix: String,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            body_line: BODY_LINE,
            spam_prefix: SPAM_PREFIX.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Per-file steps
// ---------------------------------------------------------------------------

/// Final path component, lossily converted; empty when the path has none.
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `true` (spam) iff `file_name` starts with `prefix`.
pub fn is_spam(file_name: &str, prefix: &str) -> bool {
    file_name.starts_with(prefix)
}

/// Line boundaries: `\n`, `\r` and `\r\n`, plus vertical tab, form feed,
/// the file/group/record separators, NEL and the Unicode line and
/// paragraph separators.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split `content` into lines without their terminators.
///
/// `\r\n` counts as a single break and a trailing break does not start an
/// empty final line.
pub fn split_lines(content: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = content.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&content[start..i]);
        start = i + c.len_utf8();
        if c == '\r' {
            if let Some(&(j, '\n')) = chars.peek() {
                chars.next();
                start = j + 1;
            }
        }
    }
    if start < content.len() {
        lines.push(&content[start..]);
    }
    lines
}

/// Select line `index` of `content`, or report how many lines there were.
pub fn select_line<'a>(content: &'a str, index: usize, path: &Path) -> Result<&'a str> {
    let lines = split_lines(content);
    match lines.get(index).copied() {
        Some(line) => Ok(line),
        None => Err(CorpusError::MissingBodyLine {
            path: path.to_path_buf(),
            line: index,
            found: lines.len(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Single-line percentage indicator, rewritten in place with `\r`.
pub struct Progress<W: Write> {
    out: W,
    total: usize,
}

impl<W: Write> Progress<W> {
    pub fn new(out: W, total: usize) -> Self {
        Self { out, total }
    }

    /// Report that the file at `index` (0-based) has been processed.
    pub fn update(&mut self, index: usize) -> std::io::Result<()> {
        let pct = index as f64 * 100.0 / self.total as f64;
        write!(self.out, "\r{pct:.1}%")?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

// ---------------------------------------------------------------------------
// Indexer
// ---------------------------------------------------------------------------

pub struct CorpusIndexer {
    config: IndexerConfig,
    filter: &'static EmailFilter,
}

impl Default for CorpusIndexer {
    fn default() -> Self {
        Self::new(IndexerConfig::default())
    }
}

impl CorpusIndexer {
    pub fn new(config: IndexerConfig) -> Self {
        Self {
            config,
            filter: EmailFilter::shared(),
        }
    }

    /// Process a single file into a corpus entry.
    pub fn index_file(&self, path: &Path) -> Result<CorpusEntry> {
        let file_name = base_name(path);
        let target = is_spam(&file_name, &self.config.spam_prefix);

        let content = std::fs::read_to_string(path).map_err(|source| CorpusError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let body = select_line(&content, self.config.body_line, path)?;
        let words = self.filter.tokenize(body);

        debug!("{file_name}: target={target} tokens={}", words.len());
        if words.is_empty() {
            warn!("{}: body line produced no tokens", path.display());
        }

        Ok(CorpusEntry {
            file_name,
            target,
            words,
        })
    }

    /// Process every path in order, reporting progress to `progress_out`.
    ///
    /// Stops at the first failing file; nothing is returned for a partial run.
    pub fn index_files<W: Write>(
        &self,
        paths: &[PathBuf],
        progress_out: W,
    ) -> Result<CorpusDataset> {
        if paths.is_empty() {
            return Err(CorpusError::EmptyInput);
        }
        info!("indexing {} files", paths.len());

        let mut dataset = CorpusDataset::with_capacity(paths.len());
        let mut progress = Progress::new(progress_out, paths.len());

        for (i, path) in paths.iter().enumerate() {
            dataset.push(self.index_file(path)?);
            // A closed stdout must not abort the run.
            if let Err(e) = progress.update(i) {
                debug!("progress output failed: {e}");
            }
        }

        info!("indexed {}", dataset.summary());
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_email(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn spam_classification_by_prefix() {
        assert!(is_spam("spmsg001.txt", SPAM_PREFIX));
        assert!(is_spam("spmsga12.txt", SPAM_PREFIX));
        assert!(!is_spam("msg002.txt", SPAM_PREFIX));
        assert!(!is_spam("3-1msg1.txt", SPAM_PREFIX));
        assert!(!is_spam("xspmsg1.txt", SPAM_PREFIX));
    }

    #[test]
    fn base_name_of_nested_path() {
        assert_eq!(base_name(Path::new("lemm_stop/part1/spmsga1.txt")), "spmsga1.txt");
        assert_eq!(base_name(Path::new("msg2.txt")), "msg2.txt");
        assert_eq!(base_name(Path::new("/")), "");
    }

    #[test]
    fn select_third_line() {
        let content = "Subject: hello\n\nbody text here\ntrailer\n";
        assert_eq!(select_line(content, 2, Path::new("x")).unwrap(), "body text here");
    }

    #[test]
    fn select_line_reports_short_file() {
        let err = select_line("Subject: hi\n\n", 2, Path::new("short.txt")).unwrap_err();
        match err {
            CorpusError::MissingBodyLine { line, found, .. } => {
                assert_eq!(line, 2);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn split_lines_on_every_break_kind() {
        assert_eq!(split_lines("a\nb\r\nc\rd"), ["a", "b", "c", "d"]);
        assert_eq!(
            split_lines("a\x0bb\x0cc\x1cd\x1de\x1ef\u{85}g\u{2028}h\u{2029}i"),
            ["a", "b", "c", "d", "e", "f", "g", "h", "i"]
        );
        assert_eq!(split_lines("a\n\nb\n"), ["a", "", "b"]);
        assert_eq!(split_lines("a\r\n"), ["a"]);
        assert_eq!(split_lines("a\n\r"), ["a", ""]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn select_line_in_cr_only_file() {
        let content = "Subject: x\rsecond\nbody here\n";
        assert_eq!(select_line(content, 2, Path::new("x")).unwrap(), "body here");
    }

    #[test]
    fn select_line_breaks_on_form_feed() {
        assert_eq!(select_line("a\x0cb\nc\nd\n", 2, Path::new("x")).unwrap(), "c");
    }

    #[test]
    fn index_file_with_old_mac_line_endings() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_email(dir.path(), "spmsgc3.txt", "Subject: deal\r\rcheap watches today\r");

        let entry = CorpusIndexer::default().index_file(&path).unwrap();
        assert!(entry.target);
        assert_eq!(entry.words, vec!["cheap", "watches", "today"]);
    }

    #[test]
    fn progress_writes_percentages() {
        let mut progress = Progress::new(Vec::new(), 4);
        for i in 0..4 {
            progress.update(i).unwrap();
        }
        let out = String::from_utf8(progress.into_inner()).unwrap();
        assert_eq!(out, "\r0.0%\r25.0%\r50.0%\r75.0%");
    }

    #[test]
    fn index_file_builds_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_email(
            dir.path(),
            "spmsg001.txt",
            "Subject: win big\n\nHi - this 12 is a test message 99\n",
        );

        let entry = CorpusIndexer::default().index_file(&path).unwrap();
        assert_eq!(entry.file_name, "spmsg001.txt");
        assert!(entry.target);
        assert_eq!(entry.words, vec!["this", "test", "message", "#"]);
    }

    #[test]
    fn index_files_keeps_input_order_and_alignment() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![
            write_email(dir.path(), "msg002.txt", "Subject: re\n\nlinguistics conference 2000\n"),
            write_email(dir.path(), "spmsg001.txt", "Subject: free\n\nfree money now !!!\n"),
            write_email(dir.path(), "msg003.txt", "Subject:\n\n?? !!\n"),
        ];

        let mut out = Vec::new();
        let ds = CorpusIndexer::default().index_files(&paths, &mut out).unwrap();

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.file_names(), ["msg002.txt", "spmsg001.txt", "msg003.txt"]);
        assert_eq!(ds.targets(), [false, true, false]);
        assert_eq!(ds.words()[0], vec!["linguistics", "conference", "#"]);
        assert_eq!(ds.words()[1], vec!["free", "money", "now"]);
        assert!(ds.words()[2].is_empty());

        let progress = String::from_utf8(out).unwrap();
        assert!(progress.starts_with("\r0.0%"));
        assert!(progress.ends_with("\r66.7%"));
    }

    #[test]
    fn two_line_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![
            write_email(dir.path(), "msg1.txt", "Subject: ok\n\nfine body\n"),
            write_email(dir.path(), "msg2.txt", "Subject: short\n\n"),
        ];

        let err = CorpusIndexer::default()
            .index_files(&paths, std::io::sink())
            .unwrap_err();
        assert!(matches!(err, CorpusError::MissingBodyLine { found: 2, .. }));
    }

    #[test]
    fn missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![dir.path().join("nope.txt")];

        let err = CorpusIndexer::default()
            .index_files(&paths, std::io::sink())
            .unwrap_err();
        assert!(matches!(err, CorpusError::Read { .. }));
    }

    #[test]
    fn empty_input_is_fatal() {
        let err = CorpusIndexer::default()
            .index_files(&[], std::io::sink())
            .unwrap_err();
        assert!(matches!(err, CorpusError::EmptyInput));
    }

    #[test]
    fn non_utf8_content_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("msg1.txt");
        fs::write(&path, [b'a', b'\n', b'\n', 0xff, 0xfe, b'\n']).unwrap();

        let err = CorpusIndexer::default().index_file(&path).unwrap_err();
        assert!(matches!(err, CorpusError::Read { .. }));
    }

    #[test]
    fn custom_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_email(dir.path(), "junk7.txt", "first body line\nsecond\n");
        let indexer = CorpusIndexer::new(IndexerConfig {
            body_line: 0,
            spam_prefix: "junk".to_string(),
        });

        let entry = indexer.index_file(&path).unwrap();
        assert!(entry.target);
        assert_eq!(entry.words, vec!["first", "body", "line"]);
    }
}
