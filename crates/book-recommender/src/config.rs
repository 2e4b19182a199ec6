use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::recommend::DEFAULT_TOP_N;

const DEFAULT_MAX_LIMIT: usize = 50;

/// Application configuration loaded explicitly from environment variables.
///
/// No defaults are assumed for the input files; the caller must point at a books CSV and the
/// similarity matrix computed from that same CSV.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the cleaned books CSV.
    pub books_path: String,
    /// Path to the `.npy` similarity matrix whose rows follow the CSV's row order.
    pub similarity_path: String,
    /// Result count used when a tool call does not pass `limit`.
    pub default_limit: usize,
    /// Upper bound applied to any requested `limit`.
    pub max_limit: usize,
}

impl Config {
    /// Required:
    /// - `BOOKS_CSV_PATH`
    /// - `SIMILARITY_MATRIX_PATH`
    ///
    /// Optional:
    /// - `BOOKREC_DEFAULT_LIMIT` (default: 5)
    /// - `BOOKREC_MAX_LIMIT` (default: 50)
    pub fn from_env() -> Result<Self, AppError> {
        let books_path = required_file("BOOKS_CSV_PATH")?;
        let similarity_path = required_file("SIMILARITY_MATRIX_PATH")?;

        let default_limit = parse_limit(
            "BOOKREC_DEFAULT_LIMIT",
            std::env::var("BOOKREC_DEFAULT_LIMIT").ok(),
            DEFAULT_TOP_N,
        )?;
        let max_limit = parse_limit(
            "BOOKREC_MAX_LIMIT",
            std::env::var("BOOKREC_MAX_LIMIT").ok(),
            DEFAULT_MAX_LIMIT,
        )?;
        if default_limit > max_limit {
            return Err(AppError::Config(format!(
                "BOOKREC_DEFAULT_LIMIT ({default_limit}) exceeds BOOKREC_MAX_LIMIT ({max_limit})"
            )));
        }

        Ok(Self {
            books_path,
            similarity_path,
            default_limit,
            max_limit,
        })
    }

    pub fn books_path(&self) -> PathBuf {
        Path::new(&self.books_path).to_path_buf()
    }

    pub fn similarity_path(&self) -> PathBuf {
        Path::new(&self.similarity_path).to_path_buf()
    }

    /// Applies the default and the cap. Zero is passed through so the lookup can reject it.
    pub fn resolve_limit(&self, requested: Option<u32>) -> usize {
        requested
            .map(|n| n as usize)
            .unwrap_or(self.default_limit)
            .min(self.max_limit)
    }
}

fn required_file(var: &str) -> Result<String, AppError> {
    let path = std::env::var(var)
        .map_err(|_| AppError::Config(format!("{var} environment variable is required")))?;
    if !Path::new(&path).is_file() {
        return Err(AppError::Config(format!("required file not found: {path} ({var})")));
    }
    Ok(path)
}

fn parse_limit(var: &str, raw: Option<String>, default: usize) -> Result<usize, AppError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(AppError::Config(format!(
            "{var} must be a positive integer, got '{raw}'"
        ))),
    }
}
