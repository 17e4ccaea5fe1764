use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Options for the generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// CSV file the codes are written to.
    pub out_path: PathBuf,
    /// Maximum number of draws before giving up. `None` draws until done.
    pub max_attempts: Option<u64>,
    /// Optional path for the JSON run report.
    pub report_path: Option<PathBuf>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            out_path: PathBuf::from("coupons.csv"),
            max_attempts: None,
            report_path: None,
        }
    }
}

/// Counters collected while filling a coupon set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationStats {
    pub requested: u64,
    pub capacity: u128,
    /// Codes drawn, including discarded duplicates.
    pub attempts: u64,
    pub duplicates: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Success,
    Failed,
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub status: RunStatus,
    pub pattern: String,
    pub requested: u64,
    pub generated: u64,
    /// Decimal string, since the capacity may exceed what JSON numbers hold.
    pub capacity: String,
    pub attempts: u64,
    pub duplicates: u64,
    pub output: PathBuf,
    pub bytes_written: u64,
    pub duration_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerationReport {
    pub fn new(run_id: String, pattern: &str, requested: u64, output: PathBuf) -> Self {
        Self {
            run_id,
            started_at: Utc::now(),
            status: RunStatus::Success,
            pattern: pattern.to_string(),
            requested,
            generated: 0,
            capacity: String::new(),
            attempts: 0,
            duplicates: 0,
            output,
            bytes_written: 0,
            duration_ms: 0,
            error: None,
        }
    }

    pub fn record_stats(&mut self, stats: &GenerationStats, generated: u64) {
        self.generated = generated;
        self.capacity = stats.capacity.to_string();
        self.attempts = stats.attempts;
        self.duplicates = stats.duplicates;
    }

    pub fn record_failure(&mut self, message: String) {
        self.status = RunStatus::Failed;
        self.error = Some(message);
    }
}
