/*!
 * Individual rewrite stages.
 *
 * Each stage is a pure, local string rewrite. A pattern that does not match
 * leaves the text untouched; no stage can fail.
 */

use once_cell::sync::Lazy;
use regex::{Captures, NoExpand, Regex};

use crate::app_config::GreetingPolicy;

use super::rules::{EmphasisRule, GreetingRule, PronunciationRule, RhythmRule};

/// Exclamation and question marks
static INTERJECTION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[!?]").expect("Invalid interjection regex")
});

/// Ellipses, ASCII or typographic
static ELLIPSIS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.{3,}|…").expect("Invalid ellipsis regex")
});

/// Semicolons and colons
static CLAUSE_BREAK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[;:]").expect("Invalid clause break regex")
});

/// Commas and periods followed by whitespace, as one run
static PAUSE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[,.]+\s+").expect("Invalid pause regex")
});

/// Fuse greeting phrases into single tokens.
///
/// With `GreetingPolicy::Prefix` only a greeting that starts the text is
/// replaced; with `GreetingPolicy::Everywhere` every occurrence is.
pub fn normalize_greetings(text: &str, greetings: &[GreetingRule], policy: GreetingPolicy) -> String {
    let mut result = text.to_string();

    for greeting in greetings {
        match policy {
            GreetingPolicy::Prefix => {
                // The leftmost match starts at 0 whenever any match does
                let matched_end = greeting
                    .pattern
                    .find(&result)
                    .filter(|m| m.start() == 0)
                    .map(|m| m.end());
                if let Some(end) = matched_end {
                    result = format!("{}{}", greeting.replacement, &result[end..]);
                }
            }
            GreetingPolicy::Everywhere => {
                result = greeting
                    .pattern
                    .replace_all(&result, NoExpand(&greeting.replacement))
                    .into_owned();
            }
        }
    }

    result
}

/// Drop commas sitting between two digits so `1,000` reads as `1000`
pub fn strip_digit_group_commas(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut result = String::with_capacity(text.len());

    for (i, &c) in chars.iter().enumerate() {
        let between_digits = c == ','
            && i > 0
            && chars[i - 1].is_ascii_digit()
            && chars.get(i + 1).is_some_and(|next| next.is_ascii_digit());
        if !between_digits {
            result.push(c);
        }
    }

    result
}

/// Remove punctuation that makes the synthesis engine pause awkwardly.
///
/// Digit-group commas are dropped before `", "` is collapsed so numbers are
/// never split. Running this twice gives the same text as running it once.
pub fn thin_punctuation(text: &str) -> String {
    let result = INTERJECTION_REGEX.replace_all(text, "");
    let result = ELLIPSIS_REGEX.replace_all(&result, "");
    let result = strip_digit_group_commas(&result);
    let result = CLAUSE_BREAK_REGEX.replace_all(&result, " ");
    PAUSE_REGEX.replace_all(&result, " ").into_owned()
}

/// Replace whole-word domain terms with their respellings.
///
/// Matching is case-sensitive: `bitcoin` is left alone when the table
/// holds `Bitcoin`.
pub fn substitute_pronunciations(text: &str, rules: &[PronunciationRule]) -> String {
    let mut result = text.to_string();

    for rule in rules {
        if rule.pattern.is_match(&result) {
            result = rule
                .pattern
                .replace_all(&result, NoExpand(&rule.respelling))
                .into_owned();
        }
    }

    result
}

/// Uppercase emphasis words, matched whole-word and case-insensitively
pub fn mark_emphasis(text: &str, rules: &[EmphasisRule]) -> String {
    let mut result = text.to_string();

    for rule in rules {
        if rule.pattern.is_match(&result) {
            result = rule
                .pattern
                .replace_all(&result, NoExpand(&rule.emphasized))
                .into_owned();
        }
    }

    result
}

/// Append a hyphen to conjunctions surrounded by whitespace.
///
/// The conjunction keeps its casing and the surrounding whitespace is
/// preserved: `" Mas "` becomes `" Mas- "`.
pub fn insert_rhythm_cues(text: &str, rules: &[RhythmRule]) -> String {
    let mut result = text.to_string();

    for rule in rules {
        result = rule
            .pattern
            .replace_all(&result, |caps: &Captures| format!("{}{}-{}", &caps[1], &caps[2], &caps[3]))
            .into_owned();
    }

    result
}
