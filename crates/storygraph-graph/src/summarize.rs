//! Edge label summarization.
//!
//! Choice texts are often full sentences. Labels keep the first few
//! significant words, falling back to the leading words of the text when
//! nothing significant is left after stopword removal.

use crate::stopwords;
use std::collections::HashSet;
use std::sync::LazyLock;

pub const DEFAULT_MAX_KEYWORDS: usize = 3;

/// Appended to fallback labels that were cut short.
pub const ELLIPSIS: char = '\u{2026}';

static DEFAULT_SUMMARIZER: LazyLock<KeywordExtractor> = LazyLock::new(KeywordExtractor::english);

/// Capability used by the planner to turn raw edge text into a label.
///
/// Implementations may call out to other processes or services; an error is
/// recovered per edge by the caller.
pub trait Summarize: Send + Sync {
    fn summarize(&self, text: &str) -> anyhow::Result<String>;
}

/// Stopword-based keyword extraction.
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    stopwords: HashSet<String>,
}

impl KeywordExtractor {
    pub fn english() -> Self {
        Self {
            stopwords: stopwords::ENGLISH.iter().map(|w| w.to_string()).collect(),
        }
    }

    pub fn with_extra_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stopwords
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
        self
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    /// Keywords in order of first appearance: sentence punctuation stripped,
    /// lowercased, stopwords and all-digit tokens dropped, no duplicates.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut keywords = Vec::new();

        for raw in text.split_whitespace() {
            let word = normalize_token(raw);
            if word.is_empty()
                || word.chars().all(|c| c.is_ascii_digit())
                || self.is_stopword(&word)
            {
                continue;
            }
            if seen.insert(word.clone()) {
                keywords.push(word);
            }
        }

        keywords
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::english()
    }
}

/// Removed wherever they appear in a token. Hyphens and other inner
/// characters are kept, so `well-being` and `guard7` survive intact.
const STRIPPED: &[char] = &[
    '.', ',', ';', '!', '?', '(', ')', ':', '"', '\u{201c}', '\u{201d}',
];

fn normalize_token(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| !STRIPPED.contains(c))
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            c => c,
        })
        .collect();
    kept.trim_matches('\'').to_lowercase()
}

/// Keyword summarizer with a fixed keyword budget.
#[derive(Debug, Clone)]
pub struct TextSummarizer {
    pub extractor: KeywordExtractor,
    pub max_keywords: usize,
}

impl Default for TextSummarizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_KEYWORDS)
    }
}

impl TextSummarizer {
    pub fn new(max_keywords: usize) -> Self {
        Self {
            extractor: KeywordExtractor::english(),
            max_keywords,
        }
    }

    pub fn with_extractor(mut self, extractor: KeywordExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn summarize<'a>(&self, text: impl Into<Option<&'a str>>) -> String {
        summarize_with(&self.extractor, text.into(), self.max_keywords)
    }
}

impl Summarize for TextSummarizer {
    fn summarize(&self, text: &str) -> anyhow::Result<String> {
        Ok(TextSummarizer::summarize(self, text))
    }
}

/// Summarize `text` with the built-in English stopword list.
///
/// Absent or blank text yields an empty string.
pub fn summarize<'a>(text: impl Into<Option<&'a str>>, max_keywords: usize) -> String {
    summarize_with(&DEFAULT_SUMMARIZER, text.into(), max_keywords)
}

fn summarize_with(extractor: &KeywordExtractor, text: Option<&str>, max_keywords: usize) -> String {
    let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
        return String::new();
    };

    let keywords = extractor.extract(text);
    if !keywords.is_empty() {
        let snippet = keywords
            .into_iter()
            .take(max_keywords)
            .collect::<Vec<_>>()
            .join(" ");
        if !snippet.is_empty() {
            return snippet;
        }
    }

    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut snippet = tokens
        .iter()
        .take(max_keywords)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    if tokens.len() > max_keywords {
        snippet.push(ELLIPSIS);
    }
    snippet
}
