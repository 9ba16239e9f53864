//! Sentence segmentation.
//!
//! Detection runs per sentence so that a pattern can never stitch together
//! an author from one sentence and a year from the next. Segmenters are
//! pluggable; `RuleSegmenter` is a punctuation-based default that knows the
//! abbreviations common in academic prose.

/// A sentence slice with its byte offset in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentence<'a> {
    /// Sentence text, trimmed
    pub text: &'a str,
    /// Byte offset of `text` within the source
    pub offset: usize,
}

/// Splits text into sentences.
pub trait SentenceSegmenter: Send + Sync {
    /// Split `text` into non-overlapping sentences in source order.
    ///
    /// Every returned slice must be a sub-slice of `text` located at `offset`.
    fn segment<'a>(&self, text: &'a str) -> Vec<Sentence<'a>>;
}

/// Words that end in a period without ending the sentence.
const ABBREVIATIONS: &[&str] = &[
    "al", "p", "pp", "vol", "vols", "no", "ed", "eds", "et", "e.g", "i.e", "cf", "dr", "mr",
    "mrs", "ms", "st", "vs", "ch", "fig", "trans", "rev",
];

/// Punctuation-driven segmenter.
///
/// A sentence ends at `.`, `!` or `?` (plus any closing quotes or brackets)
/// when whitespace and an uppercase letter, digit or opening quote follow.
/// Blank lines always end a sentence.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleSegmenter;

impl RuleSegmenter {
    /// Create a new segmenter.
    pub fn new() -> Self {
        Self
    }

    /// Whether the period at `dot` belongs to a token rather than ending the sentence.
    fn is_non_terminal(&self, text: &str, sentence_start: usize, dot: usize) -> bool {
        let before = &text[sentence_start..dot];
        let word = before
            .rsplit(char::is_whitespace)
            .next()
            .unwrap_or("")
            .trim_start_matches(['(', '[', '"', '\'', '\u{201C}', '\u{2018}']);

        if word.is_empty() {
            return false;
        }

        // initials: "J. Smith"
        let mut chars = word.chars();
        if let (Some(first), None) = (chars.next(), chars.next()) {
            if first.is_uppercase() {
                return true;
            }
        }

        // list or note numbers at the start of a sentence: "12. Smith, ..."
        if word.chars().all(|c| c.is_ascii_digit()) && before.trim() == word {
            return true;
        }

        let lower = word.to_lowercase();
        ABBREVIATIONS.contains(&lower.as_str())
    }
}

impl SentenceSegmenter for RuleSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<Sentence<'a>> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i < chars.len() {
            let (pos, c) = chars[i];

            if c == '\n' {
                let mut j = i + 1;
                while j < chars.len() && matches!(chars[j].1, ' ' | '\t' | '\r') {
                    j += 1;
                }
                if j < chars.len() && chars[j].1 == '\n' {
                    push_sentence(&mut sentences, text, start, pos);
                    start = chars[j].0 + 1;
                    i = j + 1;
                    continue;
                }
            } else if matches!(c, '.' | '!' | '?') {
                let mut j = i + 1;
                while j < chars.len() && is_closing(chars[j].1) {
                    j += 1;
                }
                if j >= chars.len() {
                    break;
                }

                if chars[j].1.is_whitespace() {
                    let mut k = j;
                    while k < chars.len() && chars[k].1.is_whitespace() {
                        k += 1;
                    }
                    let opens_sentence = k >= chars.len() || is_opener(chars[k].1);
                    if opens_sentence && !(c == '.' && self.is_non_terminal(text, start, pos)) {
                        let end = chars[j].0;
                        push_sentence(&mut sentences, text, start, end);
                        start = end;
                    }
                }
                i = j;
                continue;
            }

            i += 1;
        }

        push_sentence(&mut sentences, text, start, text.len());
        sentences
    }
}

fn push_sentence<'a>(sentences: &mut Vec<Sentence<'a>>, text: &'a str, start: usize, end: usize) {
    if start >= end {
        return;
    }
    let slice = &text[start..end];
    let trimmed = slice.trim();
    if trimmed.is_empty() {
        return;
    }
    let lead = slice.len() - slice.trim_start().len();
    sentences.push(Sentence {
        text: trimmed,
        offset: start + lead,
    });
}

fn is_closing(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '\u{201D}' | '\u{2019}')
}

fn is_opener(c: char) -> bool {
    c.is_uppercase() || c.is_ascii_digit() || matches!(c, '"' | '\'' | '(' | '[' | '\u{201C}' | '\u{2018}')
}
