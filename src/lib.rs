/*!
 * # Rapidinha - script-to-speech text optimizer
 *
 * A Rust library that prepares news roundup scripts for speech synthesis.
 *
 * ## Features
 *
 * - Fuse opening greetings into a single exclamation
 * - Thin punctuation that makes synthesis engines pause
 * - Respell domain terms phonetically and uppercase intensity words
 * - Split scripts into intro, numbered news items and outro
 * - Pack long speech text into synthesis-sized chunks
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `rewriter`: Pronunciation and emphasis rewriting:
 *   - `rewriter::rules`: Rule tables and their compiled form
 *   - `rewriter::stages`: The individual rewrite stages
 * - `segmenter`: Script segmentation into sections
 * - `chunking`: Sentence-based chunking for synthesis
 * - `script_template`: Starter script generation
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod rewriter;
pub mod segmenter;
pub mod chunking;
pub mod script_template;
pub mod file_utils;
pub mod app_controller;

// Re-export main types for easier usage
pub use app_config::Config;
pub use rewriter::{rewrite, RewriteRuleSet, RewriteStage, Rewriter};
pub use segmenter::{segment, NewsItem, ParsedScript, ScriptSections, ScriptSegmenter, SectionKind};
pub use chunking::split_for_synthesis;
pub use script_template::generate_script;
pub use app_controller::Controller;
pub use errors::{AppError, RuleError, ScriptError};
