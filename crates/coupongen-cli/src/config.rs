use std::path::{Path, PathBuf};

use clap::Args;
use serde::Deserialize;
use thiserror::Error;

use coupongen_core::{DEFAULT_COUNT, DEFAULT_PATTERN, Pattern};
use coupongen_generate::GenerateOptions;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Generation settings from the command line. Unset flags fall back to the
/// config file, then to built-in defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Coupon pattern: `A` letter, `D` digit, `S` symbol, anything else literal.
    #[arg(long, short)]
    pub pattern: Option<String>,
    /// Number of unique coupons to generate.
    #[arg(long, short = 'n')]
    pub count: Option<u64>,
    /// Output CSV path.
    #[arg(long, short)]
    pub out: Option<PathBuf>,
    /// Give up after this many draws.
    #[arg(long, value_name = "N")]
    pub max_attempts: Option<u64>,
    /// Write a JSON run report to this path.
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
    /// TOML file with default settings.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Contents of a `--config` TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub pattern: Option<String>,
    pub count: Option<u64>,
    pub out: Option<PathBuf>,
    pub max_attempts: Option<u64>,
    pub report: Option<PathBuf>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Fully resolved generation settings.
#[derive(Debug, Clone)]
pub struct GenerateSettings {
    pub pattern: Pattern,
    pub count: u64,
    pub options: GenerateOptions,
}

impl GenerateArgs {
    /// Merge flags over the config file (if any) over defaults.
    pub fn resolve(self) -> Result<GenerateSettings, ConfigError> {
        let file = match &self.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Ok(self.merge(file))
    }

    fn merge(self, file: FileConfig) -> GenerateSettings {
        let defaults = GenerateOptions::default();
        let pattern = self
            .pattern
            .or(file.pattern)
            .unwrap_or_else(|| DEFAULT_PATTERN.to_string());

        GenerateSettings {
            pattern: Pattern::parse(&pattern),
            count: self.count.or(file.count).unwrap_or(DEFAULT_COUNT),
            options: GenerateOptions {
                out_path: self.out.or(file.out).unwrap_or(defaults.out_path),
                max_attempts: self.max_attempts.or(file.max_attempts),
                report_path: self.report.or(file.report),
            },
        }
    }
}
