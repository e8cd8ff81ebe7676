use anyhow::{Result, Context};
use log::{error, warn, info, debug};
use std::path::{Path, PathBuf};
use std::time::Duration;
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::chunking;
use crate::errors::{AppError, ScriptError};
use crate::file_utils::{FileManager, OPTIMIZED_SUFFIX, SECTIONS_SUFFIX};
use crate::segmenter::{ParsedScript, ScriptSegmenter};

// @module: Application controller for script processing

/// What happened to a single script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Speech text and section dump were written
    Written {
        speech_path: PathBuf,
        sections_path: PathBuf,
    },

    /// Outputs already existed and overwriting was not forced
    SkippedExisting(PathBuf),

    /// The script had no content
    SkippedEmpty,
}

/// Counters for a folder run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
}

/// Main application controller for script optimization
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Segmenter built from the configured rule tables
    segmenter: ScriptSegmenter,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let segmenter = ScriptSegmenter::from_config(&config)
            .map_err(AppError::from)
            .context("Failed to build rewrite rules from configuration")?;

        Ok(Self { config, segmenter })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Segment and rewrite a script held in memory
    pub fn process_script(&self, text: &str) -> ParsedScript {
        let parsed = self.segmenter.segment(text);
        if !parsed.incomplete_titles.is_empty() {
            debug!("{} numbered lines had no content", parsed.incomplete_titles.len());
        }
        parsed
    }

    /// Rewrite free text with the configured rules
    pub fn optimize_text(&self, text: &str) -> String {
        self.segmenter.rewriter().rewrite(text)
    }

    /// Side-by-side report of a text before and after rewriting
    pub fn preview_report(&self, text: &str) -> String {
        let optimized = self.optimize_text(text);
        format!(
            "=== Original Text ===\n{}\n\n=== Optimized Text ===\n{}\n",
            text.trim_end(),
            optimized.trim_end()
        )
    }

    /// Split text into chunks that fit one synthesis request
    pub fn chunks(&self, text: &str) -> Vec<String> {
        chunking::split_for_synthesis(text, self.config.output.max_chunk_chars)
    }

    /// Read a script file, rejecting files with no content
    pub fn read_script(&self, input_file: &Path) -> Result<String, AppError> {
        if !FileManager::file_exists(input_file) {
            return Err(AppError::File(format!("Input file does not exist: {}", input_file.display())));
        }

        let text = FileManager::read_to_string(input_file)?;
        if text.trim().is_empty() {
            return Err(ScriptError::EmptyScript(input_file.display().to_string()).into());
        }
        Ok(text)
    }

    /// Process one script file, writing `<stem>_optimized.txt` and
    /// `<stem>_sections.json` into the output directory
    pub fn run(&self, input_file: PathBuf, output_dir: PathBuf, force_overwrite: bool) -> Result<RunOutcome> {
        let speech_path = FileManager::generate_output_path(&input_file, &output_dir, OPTIMIZED_SUFFIX, "txt");
        let sections_path = FileManager::generate_output_path(&input_file, &output_dir, SECTIONS_SUFFIX, "json");

        if speech_path.exists() && !force_overwrite {
            warn!("Skipping file, output already exists (use -f to force overwrite): {}", speech_path.display());
            return Ok(RunOutcome::SkippedExisting(speech_path));
        }

        let text = match self.read_script(&input_file) {
            Ok(text) => text,
            Err(AppError::Script(ScriptError::EmptyScript(path))) => {
                warn!("Skipping empty script: {}", path);
                return Ok(RunOutcome::SkippedEmpty);
            }
            Err(e) => return Err(e.into()),
        };

        let parsed = self.process_script(&text);
        debug!("Parsed {} news items from {}", parsed.items.len(), input_file.display());

        FileManager::ensure_dir(&output_dir)?;
        FileManager::write_to_file(&speech_path, &parsed.speech_text())?;

        let sections_json = serde_json::to_string_pretty(&parsed)
            .context("Failed to serialize script sections")?;
        FileManager::write_to_file(&sections_path, &sections_json)?;

        info!("Success: {}", speech_path.display());

        Ok(RunOutcome::Written { speech_path, sections_path })
    }

    /// Run the workflow in folder mode, processing every script in a directory.
    /// Outputs are written next to each script; generated files are not picked up.
    pub fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<FolderSummary> {
        let start_time = std::time::Instant::now();

        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow::anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let scripts = FileManager::find_scripts(&input_dir)?;
        if scripts.is_empty() {
            return Err(anyhow::anyhow!("No script files found in directory: {:?}", input_dir));
        }

        let folder_pb = ProgressBar::new(scripts.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(style.progress_chars("█▓▒░"));
        folder_pb.set_message("Processing files");

        let mut summary = FolderSummary::default();

        for script in &scripts {
            let file_name = script.file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            let output_dir = script.parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| input_dir.clone());

            match self.run(script.clone(), output_dir, force_overwrite) {
                Ok(RunOutcome::Written { .. }) => summary.processed += 1,
                Ok(_) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing file {}: {}", file_name, e);
                    summary.errors += 1;
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");

        info!(
            "Folder processing completed: {} processed, {} skipped, {} errors - Duration: {}",
            summary.processed,
            summary.skipped,
            summary.errors,
            Self::format_duration(start_time.elapsed())
        );

        Ok(summary)
    }

    // Format duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
