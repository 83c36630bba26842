use std::sync::LazyLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// EmailFilter – the four-pass body line normalizer
// ---------------------------------------------------------------------------

/// Compiled patterns for the four filtering passes, in application order.
///
/// Pass 2 has three alternatives tried left to right:
/// * a run of 1–2 character words inside the line
/// * the same run anchored at the start of the line
/// * a trailing cluster of non-alphanumeric characters
///
/// The number pass matches digit runs and checks the word boundary by hand.
pub struct EmailFilter {
    hyphen: Regex,
    short_or_trailing: Regex,
    multi_space: Regex,
    number: Regex,
}

static SHARED: LazyLock<EmailFilter> = LazyLock::new(EmailFilter::compile);

impl EmailFilter {
    fn compile() -> Self {
        // The patterns are literals; failure here is a programming error.
        let re = |pattern: &str| Regex::new(pattern).unwrap_or_else(|e| panic!("{pattern}: {e}"));
        Self {
            hyphen: re(r"-"),
            short_or_trailing: re(r" ([^ ]{1,2} )+|^([^ ]{1,2} )+|[^a-zA-Z0-9]+?$"),
            multi_space: re(r" {2,}"),
            number: re(r"\d+"),
        }
    }

    /// The process-wide filter, compiled on first use.
    pub fn shared() -> &'static EmailFilter {
        &SHARED
    }

    /// Normalize one line of email text.
    ///
    /// Each pass runs exactly once, in order. The result is not guaranteed to
    /// be a fixed point: a `#` produced by the last pass is itself a short
    /// token that the second pass would remove on a re-run.
    pub fn normalize(&self, line: &str) -> String {
        let text = self.hyphen.replace_all(line, " ");
        let text = self.short_or_trailing.replace_all(&text, " ");
        let text = self.multi_space.replace_all(&text, " ");
        let text = self.replace_numbers(&text);
        text.trim().to_string()
    }

    /// Replace every digit run that stands alone between word boundaries
    /// with `#`. A digit run is always maximal, so only its outer
    /// neighbours decide whether it is a separate word.
    fn replace_numbers(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for m in self.number.find_iter(text) {
            let before = text[..m.start()].chars().next_back();
            let after = text[m.end()..].chars().next();
            if !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char) {
                out.push_str(&text[last..m.start()]);
                out.push('#');
                last = m.end();
            }
        }
        out.push_str(&text[last..]);
        out
    }

    /// Normalize a line and split it into whitespace-separated tokens.
    pub fn tokenize(&self, line: &str) -> Vec<String> {
        self.normalize(line)
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}

/// Word characters for boundary checks: letters, numbers and `_`.
///
/// Combining marks such as U+0301 do not count, unlike the regex `\b`.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Shorthand for [`EmailFilter::normalize`] on the shared filter.
pub fn normalize(line: &str) -> String {
    EmailFilter::shared().normalize(line)
}
