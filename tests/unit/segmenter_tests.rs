/*!
 * Tests for script segmentation
 */

use rapidinha::app_config::{Config, SegmenterConfig};
use rapidinha::rewriter::Rewriter;
use rapidinha::segmenter::{segment, ScriptSegmenter, SectionKind};
use crate::common::SAMPLE_SCRIPT;

/// Test the sample roundup end to end
#[test]
fn test_segment_sampleScript_shouldRewriteEachSection() {
    let parsed = segment(SAMPLE_SCRIPT);

    assert_eq!(parsed.intro, "EAÍCAMBADA Tô de volta com mais uma Rapidinha Cripto");
    assert_eq!(parsed.items.len(), 2);
    assert_eq!(parsed.items[0].title, "1 Bitcoim bate RECORDE");
    assert_eq!(parsed.items[0].body, "O Bitcoim subiu MUITO hoje passando de 100000 dólares.");
    assert_eq!(parsed.items[1].title, "2 Etherium anuncia atualização");
    assert_eq!(parsed.items[1].body, "A rede Etherium vai ficar mais rápida e- barata.");
    assert_eq!(parsed.outro, "É isso cambada Até a próxima");
    assert_eq!(parsed.originals.outro, "É isso cambada! Até a próxima!");
}

/// Test that sections come out in reading order with labels
#[test]
fn test_sections_sampleScript_shouldFlattenInReadingOrder() {
    let sections = segment(SAMPLE_SCRIPT).sections();

    let kinds: Vec<SectionKind> = sections.iter().map(|s| s.kind).collect();
    assert_eq!(kinds, vec![
        SectionKind::Intro,
        SectionKind::NewsItem,
        SectionKind::NewsItem,
        SectionKind::Outro,
    ]);
    assert_eq!(sections[2].label, "news item 2");
    assert_eq!(sections[1].original, "1. Bitcoin bate recorde\nO Bitcoin subiu muito hoje, passando de 100,000 dólares.");
}

/// Test that speech text joins sections with blank lines
#[test]
fn test_speechText_sampleScript_shouldJoinRewrittenSections() {
    let speech = segment(SAMPLE_SCRIPT).speech_text();

    assert!(speech.starts_with("EAÍCAMBADA"));
    assert!(speech.ends_with("Até a próxima"));
    assert_eq!(speech.split("\n\n").count(), 4);
}

/// Test that Windows line endings segment the same way
#[test]
fn test_segment_crlfLineEndings_shouldMatchLf() {
    let crlf = SAMPLE_SCRIPT.replace('\n', "\r\n");

    assert_eq!(segment(&crlf), segment(SAMPLE_SCRIPT));
}

/// Test that segmenting twice gives the same result
#[test]
fn test_segment_calledTwice_shouldBeDeterministic() {
    assert_eq!(segment(SAMPLE_SCRIPT), segment(SAMPLE_SCRIPT));
}

/// Test that a higher outro threshold keeps the farewell in the last item
#[test]
fn test_segment_highOutroThreshold_shouldKeepFarewellInBody() {
    let config = SegmenterConfig {
        outro_threshold: 3,
        outro_marker: None,
    };
    let segmenter = ScriptSegmenter::new(Rewriter::default(), config);

    let sections = segmenter.split_sections(SAMPLE_SCRIPT);

    assert!(sections.outro.is_empty());
    assert!(sections.items[1].body.ends_with("É isso cambada! Até a próxima!"));
}

/// Test building the segmenter from the application configuration
#[test]
fn test_segmenter_fromConfig_shouldUseConfiguredRules() {
    let mut config = Config::default();
    config.rewrite.rhythm_cues = false;
    let segmenter = ScriptSegmenter::from_config(&config).unwrap();

    let parsed = segmenter.segment(SAMPLE_SCRIPT);

    assert_eq!(parsed.items[1].body, "A rede Etherium vai ficar mais rápida e barata.");
}

/// Test that parsed scripts serialize to JSON with snake_case kinds
#[test]
fn test_parsedScript_serialize_shouldIncludeOriginals() {
    let parsed = segment(SAMPLE_SCRIPT);

    let json = serde_json::to_value(&parsed).unwrap();
    assert_eq!(json["items"][0]["ordinal"], 1);
    assert_eq!(json["originals"]["items"][1]["title"], "2. Ethereum anuncia atualização");
    assert_eq!(serde_json::to_value(SectionKind::NewsItem).unwrap(), "news_item");
}

/// Test that a second paragraph inside an item does not end the list
#[test]
fn test_segment_itemWithTwoParagraphs_shouldKeepLaterItems() {
    let script = "Fala galera!\n\n\
                  1. Bitcoin sobe\nO Bitcoin subiu.\n\n\
                  2. Ethereum cai\nO Ethereum caiu hoje.\n\nAnalistas esperam recuperação.\n\n\
                  3. Solana estável\nA Solana ficou parada.\n\n\n\
                  Valeu, até amanhã!";

    let sections = segment(script).sections();

    let kinds: Vec<SectionKind> = sections.iter().map(|s| s.kind).collect();
    assert_eq!(kinds, vec![
        SectionKind::Intro,
        SectionKind::NewsItem,
        SectionKind::NewsItem,
        SectionKind::NewsItem,
        SectionKind::Outro,
    ]);
    assert_eq!(
        sections[2].original,
        "2. Ethereum cai\nO Ethereum caiu hoje.\nAnalistas esperam recuperação."
    );
    assert_eq!(sections[4].original, "Valeu, até amanhã!");
}
