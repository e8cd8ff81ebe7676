/*!
 * Rule tables for the speech rewriter.
 *
 * Tables are plain data (see `RewriteConfig`) compiled once into regexes.
 * A compiled `RewriteRuleSet` is never mutated; share it by cloning, which
 * only bumps the reference counts inside each `Regex`.
 */

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::app_config::{GreetingPolicy, RewriteConfig};
use crate::errors::RuleError;

/// Greetings fused into one exclamation
pub const DEFAULT_GREETINGS: &[&str] = &["e aí cambada", "fala cambada", "e aí galera", "fala galera"];

/// Crypto vocabulary and the respellings the Portuguese voice pronounces well
pub const DEFAULT_PRONUNCIATIONS: &[(&str, &str)] = &[
    ("Bitcoin", "Bitcoim"),
    ("Ethereum", "Etherium"),
    ("Cardano", "Cardâno"),
    ("Solana", "Solâna"),
    ("Polkadot", "Polcadot"),
    ("Binance", "Bináns"),
    ("Coinbase", "Cóinbeis"),
    ("NFT", "ÊnÊfeTê"),
    ("DeFi", "DêFai"),
    ("staking", "stêiking"),
    ("blockchain", "blókcheim"),
    ("wallet", "wólet"),
    ("token", "tôken"),
    ("altcoin", "ôltcoin"),
    ("mining", "máining"),
    ("miner", "máiner"),
];

/// Intensity words stressed by uppercasing
pub const DEFAULT_EMPHASIS_WORDS: &[&str] = &[
    "bombando", "muito", "super", "mega", "alta", "subindo",
    "disparou", "explodiu", "recorde", "máxima", "forte",
    "incrível", "enorme", "gigante", "absurdo", "impressionante",
    "surpreendente", "extraordinário", "fenomenal", "espetacular",
];

/// Conjunctions followed by a short pause cue
pub const DEFAULT_RHYTHM_CONJUNCTIONS: &[&str] = &["mas", "e", "então", "porém"];

static DEFAULT_RULES: Lazy<RewriteRuleSet> = Lazy::new(|| {
    RewriteRuleSet::from_config(&RewriteConfig::default()).expect("Invalid built-in rewrite tables")
});

/// Greeting phrase and the fused token replacing it
#[derive(Debug, Clone)]
pub struct GreetingRule {
    pub phrase: String,
    pub replacement: String,
    pub(crate) pattern: Regex,
}

/// Whole-word, case-sensitive term respelling
#[derive(Debug, Clone)]
pub struct PronunciationRule {
    pub term: String,
    pub respelling: String,
    pub(crate) pattern: Regex,
}

/// Whole-word, case-insensitive emphasis
#[derive(Debug, Clone)]
pub struct EmphasisRule {
    pub word: String,
    pub emphasized: String,
    pub(crate) pattern: Regex,
}

/// Conjunction that receives a trailing hyphen
#[derive(Debug, Clone)]
pub struct RhythmRule {
    pub conjunction: String,
    pub(crate) pattern: Regex,
}

/// Compiled, ordered rule tables
#[derive(Debug, Clone)]
pub struct RewriteRuleSet {
    pub greeting_policy: GreetingPolicy,
    pub greetings: Vec<GreetingRule>,
    pub pronunciations: Vec<PronunciationRule>,
    pub emphasis: Vec<EmphasisRule>,
    pub rhythm: Vec<RhythmRule>,
}

impl Default for RewriteRuleSet {
    fn default() -> Self {
        DEFAULT_RULES.clone()
    }
}

impl RewriteRuleSet {
    /// Compile and validate the tables of a configuration
    pub fn from_config(config: &RewriteConfig) -> Result<Self, RuleError> {
        let greetings = config
            .greetings
            .iter()
            .map(|greeting| {
                let words: Vec<String> = greeting.phrase.split_whitespace().map(regex::escape).collect();
                if words.is_empty() {
                    return Err(RuleError::EmptyGreeting);
                }
                Ok(GreetingRule {
                    phrase: greeting.phrase.clone(),
                    replacement: greeting.fused_token(),
                    pattern: compile(&format!(r"(?i)\b{}\b", words.join(r"\s+")), &greeting.phrase)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen_terms = HashSet::new();
        let mut pronunciations = Vec::with_capacity(config.pronunciations.len());
        for entry in &config.pronunciations {
            if entry.term.trim().is_empty() {
                return Err(RuleError::EmptyTerm {
                    respelling: entry.respelling.clone(),
                });
            }
            if entry.respelling.trim().is_empty() {
                return Err(RuleError::EmptyRespelling(entry.term.clone()));
            }
            if !seen_terms.insert(entry.term.as_str()) {
                return Err(RuleError::DuplicateTerm(entry.term.clone()));
            }
            pronunciations.push(PronunciationRule {
                term: entry.term.clone(),
                respelling: entry.respelling.clone(),
                pattern: compile(&format!(r"\b{}\b", regex::escape(&entry.term)), &entry.term)?,
            });
        }

        let emphasis = config
            .emphasis_words
            .iter()
            .map(|word| {
                let word = word.trim();
                if word.is_empty() {
                    return Err(RuleError::EmptyEmphasisWord);
                }
                Ok(EmphasisRule {
                    word: word.to_string(),
                    emphasized: word.to_uppercase(),
                    pattern: compile(&format!(r"(?i)\b{}\b", regex::escape(word)), word)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let rhythm = config
            .rhythm_conjunctions
            .iter()
            .map(|conjunction| {
                if conjunction.is_empty() || conjunction.chars().any(char::is_whitespace) {
                    return Err(RuleError::InvalidConjunction(conjunction.clone()));
                }
                Ok(RhythmRule {
                    conjunction: conjunction.clone(),
                    pattern: compile(&format!(r"(?i)(\s+)({})(\s+)", regex::escape(conjunction)), conjunction)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            greeting_policy: config.greeting_policy,
            greetings,
            pronunciations,
            emphasis,
            rhythm,
        })
    }

    /// Same tables with a different greeting policy
    pub fn with_greeting_policy(mut self, policy: GreetingPolicy) -> Self {
        self.greeting_policy = policy;
        self
    }
}

fn compile(pattern: &str, source_text: &str) -> Result<Regex, RuleError> {
    Regex::new(pattern).map_err(|e| RuleError::Pattern {
        source_text: source_text.to_string(),
        message: e.to_string(),
    })
}
