/*!
 * Error types for the rapidinha application.
 *
 * The text transforms themselves never fail: rewriting and segmenting accept
 * any string. Errors only arise while building rule tables from
 * configuration and around file handling in the controller.
 */

use thiserror::Error;

/// Errors raised while compiling a rewrite rule table
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleError {
    /// A pronunciation entry has an empty term
    #[error("Pronunciation term cannot be empty (respelling: '{respelling}')")]
    EmptyTerm {
        /// Respelling attached to the empty term
        respelling: String,
    },

    /// A pronunciation entry has an empty respelling
    #[error("Respelling for '{0}' cannot be empty")]
    EmptyRespelling(String),

    /// The same term appears twice in the pronunciation table
    #[error("Duplicate pronunciation term: {0}")]
    DuplicateTerm(String),

    /// A greeting phrase has no words
    #[error("Greeting phrase cannot be empty")]
    EmptyGreeting,

    /// An emphasis word is empty or whitespace
    #[error("Emphasis word cannot be empty")]
    EmptyEmphasisWord,

    /// A rhythm conjunction is empty or contains whitespace
    #[error("Invalid rhythm conjunction: '{0}'")]
    InvalidConjunction(String),

    /// A pattern built from the table did not compile
    #[error("Invalid rule pattern for '{source_text}': {message}")]
    Pattern {
        /// Table entry the pattern was built from
        source_text: String,
        /// Regex compiler message
        message: String,
    },
}

/// Errors that can occur when handling script files
#[derive(Error, Debug)]
pub enum ScriptError {
    /// The script has no non-blank line
    #[error("Script is empty: {0}")]
    EmptyScript(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid rewrite rule table
    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    /// Error from script handling
    #[error("Script error: {0}")]
    Script(#[from] ScriptError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
