/*!
 * Pronunciation and emphasis rewriter.
 *
 * Adapts prose for a speech-synthesis engine by running a declared, ordered
 * list of stages over the text:
 *
 * 1. `Greeting` - fuse an opening greeting into one exclamation
 * 2. `Punctuation` - drop or collapse punctuation that forces pauses
 * 3. `Pronunciation` - respell domain terms (after punctuation, so a trailing
 *    comma cannot block a match)
 * 4. `Emphasis` - uppercase intensity words (after respelling)
 * 5. `Rhythm` - pause cue after conjunctions, for script sections only
 *
 * # Architecture
 *
 * - `rules`: rule tables and their compiled form
 * - `stages`: one pure function per stage
 */

pub mod rules;
pub mod stages;

use log::debug;
use once_cell::sync::Lazy;

use crate::app_config::RewriteConfig;
use crate::errors::RuleError;

pub use rules::RewriteRuleSet;

static DEFAULT_REWRITER: Lazy<Rewriter> = Lazy::new(Rewriter::default);

/// A single step of the rewrite pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteStage {
    Greeting,
    Punctuation,
    Pronunciation,
    Emphasis,
    Rhythm,
}

/// Stages applied to free text
pub const TEXT_PIPELINE: [RewriteStage; 4] = [
    RewriteStage::Greeting,
    RewriteStage::Punctuation,
    RewriteStage::Pronunciation,
    RewriteStage::Emphasis,
];

/// Stages applied to each script section
pub const SECTION_PIPELINE: [RewriteStage; 5] = [
    RewriteStage::Greeting,
    RewriteStage::Punctuation,
    RewriteStage::Pronunciation,
    RewriteStage::Emphasis,
    RewriteStage::Rhythm,
];

/// Stateless text rewriter owning an immutable rule table
#[derive(Debug, Clone)]
pub struct Rewriter {
    rules: RewriteRuleSet,
    rhythm_cues: bool,
}

impl Default for Rewriter {
    fn default() -> Self {
        Self::new(RewriteRuleSet::default())
    }
}

impl Rewriter {
    /// Create a rewriter over compiled rules, with rhythm cues enabled for sections
    pub fn new(rules: RewriteRuleSet) -> Self {
        Self {
            rules,
            rhythm_cues: true,
        }
    }

    /// Compile the tables of a configuration into a rewriter
    pub fn from_config(config: &RewriteConfig) -> Result<Self, RuleError> {
        let rules = RewriteRuleSet::from_config(config)?;
        Ok(Self {
            rules,
            rhythm_cues: config.rhythm_cues,
        })
    }

    /// Enable or disable rhythm cues in `rewrite_section`
    pub fn with_rhythm_cues(mut self, enabled: bool) -> Self {
        self.rhythm_cues = enabled;
        self
    }

    pub fn rules(&self) -> &RewriteRuleSet {
        &self.rules
    }

    /// Rewrite free text: greeting, punctuation, pronunciation, emphasis.
    /// Empty input is returned unchanged.
    pub fn rewrite(&self, text: &str) -> String {
        self.run(text, &TEXT_PIPELINE)
    }

    /// Rewrite one script section, adding rhythm cues when enabled
    pub fn rewrite_section(&self, text: &str) -> String {
        if self.rhythm_cues {
            self.run(text, &SECTION_PIPELINE)
        } else {
            self.run(text, &TEXT_PIPELINE)
        }
    }

    /// Apply a single stage
    pub fn apply_stage(&self, stage: RewriteStage, text: &str) -> String {
        match stage {
            RewriteStage::Greeting => {
                stages::normalize_greetings(text, &self.rules.greetings, self.rules.greeting_policy)
            }
            RewriteStage::Punctuation => stages::thin_punctuation(text),
            RewriteStage::Pronunciation => stages::substitute_pronunciations(text, &self.rules.pronunciations),
            RewriteStage::Emphasis => stages::mark_emphasis(text, &self.rules.emphasis),
            RewriteStage::Rhythm => stages::insert_rhythm_cues(text, &self.rules.rhythm),
        }
    }

    fn run(&self, text: &str, pipeline: &[RewriteStage]) -> String {
        if text.is_empty() {
            return String::new();
        }

        let optimized = pipeline
            .iter()
            .fold(text.to_string(), |current, stage| self.apply_stage(*stage, &current));

        debug!("Optimized text: {}...", preview(&optimized, 50));
        optimized
    }
}

/// Rewrite free text with the built-in tables
pub fn rewrite(text: &str) -> String {
    DEFAULT_REWRITER.rewrite(text)
}

fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
