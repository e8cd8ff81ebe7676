use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::rewriter::rules::{
    RewriteRuleSet, DEFAULT_EMPHASIS_WORDS, DEFAULT_GREETINGS, DEFAULT_PRONUNCIATIONS,
    DEFAULT_RHYTHM_CONJUNCTIONS,
};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Rewrite rule tables and policies
    #[serde(default)]
    pub rewrite: RewriteConfig,

    /// Section detection settings
    #[serde(default)]
    pub segmenter: SegmenterConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Where greeting normalization applies
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GreetingPolicy {
    // @policy: Only a greeting that opens the text
    #[default]
    Prefix,
    // @policy: Every occurrence of a greeting phrase
    Everywhere,
}

impl std::fmt::Display for GreetingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Prefix => write!(f, "prefix"),
            Self::Everywhere => write!(f, "everywhere"),
        }
    }
}

impl std::str::FromStr for GreetingPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "prefix" => Ok(Self::Prefix),
            "everywhere" => Ok(Self::Everywhere),
            _ => Err(anyhow!("Invalid greeting policy: {}", s)),
        }
    }
}

/// A greeting phrase fused into a single exclamation
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GreetingConfig {
    // @field: Words of the greeting, matched case-insensitively
    pub phrase: String,

    // @field: Fused token; defaults to the words concatenated and uppercased
    #[serde(default)]
    pub replacement: Option<String>,
}

impl GreetingConfig {
    pub fn new(phrase: &str) -> Self {
        Self {
            phrase: phrase.to_string(),
            replacement: None,
        }
    }

    /// The token that replaces the greeting
    pub fn fused_token(&self) -> String {
        match &self.replacement {
            Some(replacement) => replacement.clone(),
            None => self
                .phrase
                .split_whitespace()
                .collect::<String>()
                .to_uppercase(),
        }
    }
}

/// A domain term and the respelling fed to the synthesis engine
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PronunciationConfig {
    // @field: Canonical, case-sensitive form of the term
    pub term: String,

    // @field: Phonetic respelling
    pub respelling: String,
}

impl PronunciationConfig {
    pub fn new(term: &str, respelling: &str) -> Self {
        Self {
            term: term.to_string(),
            respelling: respelling.to_string(),
        }
    }
}

/// Rewrite rule tables
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RewriteConfig {
    /// Whether greetings are fused only at the start of a text or everywhere
    #[serde(default)]
    pub greeting_policy: GreetingPolicy,

    /// Greeting phrases, tried in order
    #[serde(default = "default_greetings")]
    pub greetings: Vec<GreetingConfig>,

    /// Term respellings, applied in order
    #[serde(default = "default_pronunciations")]
    pub pronunciations: Vec<PronunciationConfig>,

    /// Words uppercased for vocal emphasis
    #[serde(default = "default_emphasis_words")]
    pub emphasis_words: Vec<String>,

    /// Conjunctions that receive a trailing pause cue
    #[serde(default = "default_rhythm_conjunctions")]
    pub rhythm_conjunctions: Vec<String>,

    /// Insert pause cues when rewriting script sections
    #[serde(default = "default_true")]
    pub rhythm_cues: bool,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            greeting_policy: GreetingPolicy::default(),
            greetings: default_greetings(),
            pronunciations: default_pronunciations(),
            emphasis_words: default_emphasis_words(),
            rhythm_conjunctions: default_rhythm_conjunctions(),
            rhythm_cues: default_true(),
        }
    }
}

/// Section detection settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SegmenterConfig {
    /// Completed items required before a new paragraph is read as the outro
    #[serde(default = "default_outro_threshold")]
    pub outro_threshold: usize,

    /// Line that explicitly starts the outro; the line itself is dropped
    #[serde(default)]
    pub outro_marker: Option<String>,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            outro_threshold: default_outro_threshold(),
            outro_marker: None,
        }
    }
}

/// Output settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// Directory for generated files when none is given on the command line
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Maximum characters per synthesis chunk
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            max_chunk_chars: default_max_chunk_chars(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching `log` filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_greetings() -> Vec<GreetingConfig> {
    DEFAULT_GREETINGS.iter().map(|phrase| GreetingConfig::new(phrase)).collect()
}

fn default_pronunciations() -> Vec<PronunciationConfig> {
    DEFAULT_PRONUNCIATIONS
        .iter()
        .map(|(term, respelling)| PronunciationConfig::new(term, respelling))
        .collect()
}

fn default_emphasis_words() -> Vec<String> {
    DEFAULT_EMPHASIS_WORDS.iter().map(|w| w.to_string()).collect()
}

fn default_rhythm_conjunctions() -> Vec<String> {
    DEFAULT_RHYTHM_CONJUNCTIONS.iter().map(|w| w.to_string()).collect()
}

fn default_true() -> bool {
    true
}

fn default_outro_threshold() -> usize {
    2
}

fn default_output_dir() -> String {
    "output".to_string()
}

fn default_max_chunk_chars() -> usize {
    1000
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        RewriteRuleSet::from_config(&self.rewrite).context("Invalid rewrite rules")?;

        if self.segmenter.outro_threshold == 0 {
            return Err(anyhow!("segmenter.outro_threshold must be at least 1"));
        }

        if let Some(marker) = &self.segmenter.outro_marker {
            if marker.trim().is_empty() {
                return Err(anyhow!("segmenter.outro_marker cannot be blank"));
            }
        }

        if self.output.max_chunk_chars == 0 {
            return Err(anyhow!("output.max_chunk_chars must be greater than zero"));
        }

        if self.output.output_dir.trim().is_empty() {
            return Err(anyhow!("output.output_dir cannot be empty"));
        }

        Ok(())
    }

    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Write this configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Load the configuration, writing the defaults first if the file is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_file(path);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }
}
