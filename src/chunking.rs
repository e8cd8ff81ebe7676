/*!
 * Chunking of long speech text.
 *
 * Synthesis engines cap the length of a single request, so long texts are
 * packed sentence by sentence into chunks that stay under a character limit.
 */

use log::debug;

/// Split text into sentences after `.`, `!` or `?` followed by whitespace.
/// The whitespace between sentences is dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let Some(&(next_index, next)) = chars.peek() else {
            continue;
        };
        if !next.is_whitespace() {
            continue;
        }

        sentences.push(&text[start..next_index]);

        // Skip the whole whitespace run
        let mut resume = text.len();
        while let Some(&(i, ws)) = chars.peek() {
            if ws.is_whitespace() {
                chars.next();
            } else {
                resume = i;
                break;
            }
        }
        start = resume;
    }

    if start < text.len() {
        sentences.push(&text[start..]);
    }

    sentences
}

/// Pack text into chunks of at most `max_chars` characters.
///
/// Text that already fits is returned as one chunk. Sentences are joined with
/// a single space; a sentence longer than the limit becomes a chunk of its own.
pub fn split_for_synthesis(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    if text.chars().count() <= max_chars {
        if text.trim().is_empty() {
            return Vec::new();
        }
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for sentence in split_sentences(text) {
        let sentence_len = sentence.chars().count();
        let joined_len = if current.is_empty() {
            sentence_len
        } else {
            current_len + 1 + sentence_len
        };

        if joined_len <= max_chars {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(sentence);
            current_len = joined_len;
        } else {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            current.push_str(sentence);
            current_len = sentence_len;
        }
    }

    if !current.trim().is_empty() {
        chunks.push(current);
    }

    debug!("Split {} chars into {} chunks", text.chars().count(), chunks.len());
    chunks
}
