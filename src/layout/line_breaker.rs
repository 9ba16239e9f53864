//! Greedy word wrapping.

/// Wrap `text` into lines of at most `chars_per_line` characters.
///
/// Words are whitespace-separated and counted in chars. A word longer than
/// the limit goes on a line of its own; words are never split.
pub fn break_lines(text: &str, chars_per_line: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let needed = if current.is_empty() {
            word_len
        } else {
            current_len + 1 + word_len
        };

        if needed <= chars_per_line || current.is_empty() {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_len = needed;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Wrap each blank-line separated paragraph separately.
///
/// Returns the lines together with the index of each paragraph's first line.
pub fn break_paragraphs(text: &str, chars_per_line: usize) -> (Vec<String>, Vec<usize>) {
    let mut lines = Vec::new();
    let mut starts = Vec::new();
    for (_, paragraph) in paragraph_spans(text) {
        starts.push(lines.len());
        lines.extend(break_lines(paragraph, chars_per_line));
    }
    (lines, starts)
}

/// Blank-line separated, trimmed, non-empty paragraphs with their byte offsets.
pub fn paragraph_spans(text: &str) -> Vec<(usize, &str)> {
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;
    let mut end = 0;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        if line.trim().is_empty() {
            if let Some(from) = start.take() {
                spans.push(trimmed_span(text, from, end));
            }
        } else {
            start.get_or_insert(offset);
            end = offset + line.len();
        }
        offset += line.len();
    }
    if let Some(from) = start {
        spans.push(trimmed_span(text, from, end));
    }
    spans
}

fn trimmed_span(text: &str, from: usize, to: usize) -> (usize, &str) {
    let raw = &text[from..to];
    let lead = raw.len() - raw.trim_start().len();
    (from + lead, raw.trim())
}
