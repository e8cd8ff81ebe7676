/*!
 * Tests for synthesis chunking
 */

use rapidinha::chunking::{split_for_synthesis, split_sentences};
use rapidinha::script_template::generate_script;
use rapidinha::segmenter::segment;

/// Test that every chunk fits when sentences fit
#[test]
fn test_splitForSynthesis_manySentences_shouldKeepChunksUnderLimit() {
    let text = "O mercado abriu em alta hoje. ".repeat(40);

    let chunks = split_for_synthesis(text.trim_end(), 200);

    assert!(chunks.len() > 1);
    for chunk in &chunks {
        assert!(chunk.chars().count() <= 200, "chunk too long: {}", chunk);
        assert!(!chunk.trim().is_empty());
    }
}

/// Test that the speech text of a generated script can be chunked
#[test]
fn test_splitForSynthesis_generatedScript_shouldCoverWholeText() {
    let speech = segment(&generate_script("Bitcoin", 3)).speech_text();

    let chunks = split_for_synthesis(&speech, 10_000);

    assert_eq!(chunks, vec![speech]);
}

/// Test that chunking keeps every sentence in order
#[test]
fn test_splitForSynthesis_shouldPreserveSentenceOrder() {
    let text = "Um dois três. Quatro cinco seis! Sete oito nove? Dez.";

    let chunks = split_for_synthesis(text, 20);

    assert_eq!(chunks.join(" "), text);
}

/// Test that a zero limit is treated as one character
#[test]
fn test_splitForSynthesis_zeroLimit_shouldNotPanic() {
    let chunks = split_for_synthesis("A. B.", 0);

    assert_eq!(chunks, vec!["A.".to_string(), "B.".to_string()]);
}

/// Test that text without terminators stays whole
#[test]
fn test_splitSentences_noTerminator_shouldReturnWholeText() {
    assert_eq!(split_sentences("sem ponto final"), vec!["sem ponto final"]);
    assert!(split_sentences("").is_empty());
}
