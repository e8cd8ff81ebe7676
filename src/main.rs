// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::{Read, Write};
use std::path::PathBuf;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use rapidinha::app_config::{self, Config};
use rapidinha::app_controller::{Controller, RunOutcome};
use rapidinha::file_utils::FileManager;
use rapidinha::script_template::generate_script;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Optimize a script file, or every script in a directory
    Optimize {
        /// Script file or directory to process
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,

        /// Directory for the outputs of a single file (defaults to output.output_dir)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Force overwrite of existing output files
        #[arg(short, long)]
        force_overwrite: bool,
    },

    /// Print an original/optimized report for a text (reads stdin when omitted)
    Preview {
        /// Text to optimize
        text: Option<String>,
    },

    /// Print the segmented sections of a script as JSON
    Parse {
        /// Script file to parse
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Generate a starter script
    Template {
        /// Topic of the news roundup
        #[arg(short, long)]
        topic: String,

        /// Number of news items
        #[arg(short = 'n', long, default_value_t = 3)]
        items: usize,

        /// Save to a timestamped file in output.output_dir instead of printing
        #[arg(short, long)]
        save: bool,
    },

    /// Print the synthesis chunks of a script's optimized text
    Chunk {
        /// Script file to chunk
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Generate shell completions for rapidinha
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Rapidinha - script-to-speech text optimizer
///
/// Rewrites news roundup scripts so a speech-synthesis engine reads them
/// with the intended pronunciation, emphasis and rhythm.
#[derive(Parser, Debug)]
#[command(name = "rapidinha")]
#[command(version)]
#[command(about = "Script-to-speech text optimizer")]
#[command(long_about = "Rapidinha splits news roundup scripts into intro, numbered items and outro,
then rewrites each section for speech synthesis.

EXAMPLES:
    rapidinha optimize script.txt                 # Write script_optimized.txt and script_sections.json
    rapidinha optimize -f scripts/                # Process a directory, overwriting outputs
    rapidinha preview \"E aí cambada! O Bitcoin subiu\"
    rapidinha parse script.txt > sections.json
    rapidinha template --topic Bitcoin --items 5
    rapidinha completions bash > rapidinha.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌",
            Level::Warn => "🚧",
            Level::Info => "",
            Level::Debug => "🔍",
            Level::Trace => "📋",
        }
    }

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let level = record.level();

            let _ = writeln!(
                std::io::stderr(),
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(level),
                now,
                Self::get_emoji_for_level(level),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set through max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "rapidinha", &mut std::io::stdout());
        return Ok(());
    }

    // If log level is set via command line, apply it before loading the config
    if let Some(cli_level) = &cli.log_level {
        let level: app_config::LogLevel = cli_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&cli.config_path)?;
    if let Some(cli_level) = &cli.log_level {
        config.log_level = cli_level.clone().into();
    } else {
        log::set_max_level(config.log_level.to_level_filter());
    }

    config.validate()
        .context("Configuration validation failed")?;

    let controller = Controller::with_config(config)?;
    run_command(&controller, cli.command)
}

fn run_command(controller: &Controller, command: Commands) -> Result<()> {
    match command {
        Commands::Optimize { input_path, output_dir, force_overwrite } => {
            if input_path.is_file() {
                let output_dir = output_dir
                    .unwrap_or_else(|| PathBuf::from(&controller.config().output.output_dir));
                if let RunOutcome::Written { sections_path, .. } =
                    controller.run(input_path, output_dir, force_overwrite)?
                {
                    info!("Sections: {}", sections_path.display());
                }
            } else if input_path.is_dir() {
                controller.run_folder(input_path, force_overwrite)?;
            } else {
                return Err(anyhow!("Input path does not exist: {:?}", input_path));
            }
        }
        Commands::Preview { text } => {
            let text = match text {
                Some(text) => text,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buffer)
                        .context("Failed to read text from stdin")?;
                    buffer
                }
            };
            print!("{}", controller.preview_report(&text));
        }
        Commands::Parse { file } => {
            let text = controller.read_script(&file)?;
            let parsed = controller.process_script(&text);
            let json = serde_json::to_string_pretty(&parsed)
                .context("Failed to serialize script sections")?;
            println!("{}", json);
        }
        Commands::Template { topic, items, save } => {
            let script = generate_script(&topic, items);
            if save {
                let output_dir = PathBuf::from(&controller.config().output.output_dir);
                let path = output_dir.join(FileManager::timestamp_filename("script", "txt"));
                FileManager::write_to_file(&path, &script)?;
                info!("Success: {}", path.display());
            } else {
                println!("{}", script);
            }
        }
        Commands::Chunk { file } => {
            let text = controller.read_script(&file)?;
            let speech = controller.process_script(&text).speech_text();
            for (index, chunk) in controller.chunks(&speech).iter().enumerate() {
                println!("--- chunk {} ({} chars) ---", index + 1, chunk.chars().count());
                println!("{}", chunk);
            }
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}
