/*!
 * Common test utilities for the rapidinha test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use tempfile::TempDir;

/// A two-item roundup with greeting and farewell
pub const SAMPLE_SCRIPT: &str = "E aí cambada! Tô de volta com mais uma Rapidinha Cripto!

1. Bitcoin bate recorde
O Bitcoin subiu muito hoje, passando de 100,000 dólares.

2. Ethereum anuncia atualização
A rede Ethereum vai ficar mais rápida e barata.

É isso cambada! Até a próxima!
";

/// Route library logs through env_logger once per test binary
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates the sample script in the specified directory
pub fn create_test_script(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, SAMPLE_SCRIPT)
}
