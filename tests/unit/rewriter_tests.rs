/*!
 * Tests for the speech rewriter
 */

use rapidinha::app_config::{GreetingConfig, GreetingPolicy, PronunciationConfig, RewriteConfig};
use rapidinha::rewriter::{rewrite, RewriteStage, Rewriter, SECTION_PIPELINE, TEXT_PIPELINE};
use rapidinha::rewriter::stages::thin_punctuation;
use rapidinha::errors::RuleError;

/// Test that the built-in tables rewrite a typical opening
#[test]
fn test_rewrite_typicalOpening_shouldFuseGreetingAndRespell() {
    let result = rewrite("Fala galera! Hoje o Bitcoin e o Ethereum estão subindo...");

    assert_eq!(result, "FALAGALERA Hoje o Bitcoim e o Etherium estão SUBINDO");
}

/// Test that no pause punctuation survives the rewrite
#[test]
fn test_rewrite_output_shouldNotContainPausePunctuation() {
    let inputs = [
        "O quê?! Sério... isso: aquilo; mais, menos.",
        "Preço: 45,000… e subindo!",
        "Sem pontuação nenhuma",
    ];

    for input in inputs {
        let result = rewrite(input);
        assert!(!result.contains(['!', '?', ';', ':', '…']), "{}", result);
        assert!(!result.contains(", "), "{}", result);
        assert!(!result.contains(". "), "{}", result);
        assert!(!result.contains("..."), "{}", result);
    }
}

/// Test that punctuation thinning is idempotent
#[test]
fn test_thinPunctuation_appliedTwice_shouldEqualOnce() {
    let inputs = [
        "Olá, mundo. Tudo bem?",
        "1,000,000 de pessoas.... incrível!",
        "a,,  b..  c;: d",
        ",1, 2,3 ,",
        "Fim.",
    ];

    for input in inputs {
        let once = thin_punctuation(input);
        assert_eq!(thin_punctuation(&once), once, "input: {}", input);
    }
}

/// Test that grouped digits are joined, not spaced
#[test]
fn test_rewrite_groupedDigits_shouldJoinWithoutSpaces() {
    assert_eq!(rewrite("Foram 2,500,000 de transações"), "Foram 2500000 de transações");
}

/// Test that pronunciation substitution respects word boundaries and case
#[test]
fn test_rewrite_partialOrLowercaseTerm_shouldNotRespell() {
    assert_eq!(rewrite("Bitcoins"), "Bitcoins");
    assert_eq!(rewrite("bitcoin"), "bitcoin");
    assert_eq!(rewrite("tokens e token"), "tokens e tôken");
}

/// Test that emphasis matching is case-insensitive and whole-word
#[test]
fn test_rewrite_emphasisWords_shouldUppercaseWholeWordsOnly() {
    assert_eq!(rewrite("Muito bom, muitos dias"), "MUITO bom muitos dias");
    assert_eq!(rewrite("alta altas"), "ALTA altas");
}

/// Test that the greeting is only fused at the start with the default policy
#[test]
fn test_rewrite_greetingMidText_shouldStayWithPrefixPolicy() {
    assert_eq!(rewrite("Então fala galera"), "Então fala galera");
}

/// Test that the everywhere policy fuses every occurrence
#[test]
fn test_rewrite_everywherePolicy_shouldFuseAllGreetings() -> Result<(), RuleError> {
    let mut config = RewriteConfig::default();
    config.greeting_policy = GreetingPolicy::Everywhere;
    let rewriter = Rewriter::from_config(&config)?;

    assert_eq!(rewriter.rewrite("Então fala galera"), "Então FALAGALERA");
    assert_eq!(
        rewriter.rewrite("Fala galera, e aí cambada"),
        "FALAGALERA EAÍCAMBADA"
    );
    Ok(())
}

/// Test that a configured replacement overrides the fused token
#[test]
fn test_rewrite_customGreetingReplacement_shouldUseIt() -> Result<(), RuleError> {
    let mut config = RewriteConfig::default();
    config.greetings = vec![GreetingConfig {
        phrase: "bom dia".to_string(),
        replacement: Some("BOMDIAAA".to_string()),
    }];
    let rewriter = Rewriter::from_config(&config)?;

    assert_eq!(rewriter.rewrite("Bom dia, pessoal"), "BOMDIAAA pessoal");
    Ok(())
}

/// Test that custom pronunciation tables replace the built-in one
#[test]
fn test_rewrite_customPronunciations_shouldApplyOnlyConfiguredTerms() -> Result<(), RuleError> {
    let mut config = RewriteConfig::default();
    config.pronunciations = vec![PronunciationConfig::new("Tether", "Téder")];
    let rewriter = Rewriter::from_config(&config)?;

    assert_eq!(rewriter.rewrite("Tether e Bitcoin"), "Téder e Bitcoin");
    Ok(())
}

/// Test that a respelling containing `$` is inserted literally
#[test]
fn test_rewrite_respellingWithDollar_shouldBeLiteral() -> Result<(), RuleError> {
    let mut config = RewriteConfig::default();
    config.pronunciations = vec![PronunciationConfig::new("USD", "$1 dólar")];
    let rewriter = Rewriter::from_config(&config)?;

    assert_eq!(rewriter.rewrite("USD"), "$1 dólar");
    Ok(())
}

/// Test the declared pipelines
#[test]
fn test_pipelines_shouldDeclareStageOrder() {
    assert_eq!(TEXT_PIPELINE, [
        RewriteStage::Greeting,
        RewriteStage::Punctuation,
        RewriteStage::Pronunciation,
        RewriteStage::Emphasis,
    ]);
    assert_eq!(SECTION_PIPELINE.last(), Some(&RewriteStage::Rhythm));
}

/// Test that rhythm cues keep casing and only touch section rewrites
#[test]
fn test_rewriteSection_conjunctions_shouldGetPauseCue() {
    let rewriter = Rewriter::default();

    assert_eq!(rewriter.rewrite_section("subiu Mas caiu porém voltou"), "subiu Mas- caiu porém- voltou");
    assert_eq!(rewriter.rewrite_section("Mas no início não"), "Mas no início não");
    assert_eq!(rewriter.rewrite("subiu mas caiu"), "subiu mas caiu");
}

/// Test that a greeting followed by more letters is not fused
#[test]
fn test_rewrite_greetingInsideLongerWord_shouldStayUnfused() {
    assert_eq!(rewrite("Fala galeras, tudo bem?"), "Fala galeras tudo bem");
}
