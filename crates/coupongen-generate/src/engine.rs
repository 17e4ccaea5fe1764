use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Instant;

use rand::TryRngCore;
use rand::rngs::OsRng;
use tracing::{debug, info, warn};

use coupongen_core::{Pattern, Token};

use crate::errors::GenerationError;
use crate::model::{GenerateOptions, GenerationReport, GenerationStats};
use crate::output::csv::write_codes_csv;
use crate::output::report::write_report;
use crate::random::draw_char;

/// Unique codes in the order they were first drawn.
#[derive(Debug, Clone)]
pub struct CouponBatch {
    pub codes: Vec<String>,
    pub stats: GenerationStats,
}

/// Result of a generate-and-export run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub out_path: PathBuf,
    pub report: GenerationReport,
}

/// Entry point for generating coupon sets from a pattern.
#[derive(Debug, Clone, Default)]
pub struct CouponGenerator {
    options: GenerateOptions,
}

impl CouponGenerator {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    /// Generate `amount` unique codes using the OS random source.
    pub fn generate(&self, pattern: &Pattern, amount: u64) -> Result<CouponBatch, GenerationError> {
        let mut rng = OsRng;
        self.generate_with_rng(&mut rng, pattern, amount)
    }

    /// Generate `amount` unique codes from `rng`.
    ///
    /// Capacity is checked before the first draw. Duplicates are discarded
    /// and redrawn until the set is full or `max_attempts` is reached.
    pub fn generate_with_rng<R>(
        &self,
        rng: &mut R,
        pattern: &Pattern,
        amount: u64,
    ) -> Result<CouponBatch, GenerationError>
    where
        R: TryRngCore + ?Sized,
    {
        let capacity = pattern.ensure_capacity(amount)?;
        let mut stats = GenerationStats {
            requested: amount,
            capacity,
            ..GenerationStats::default()
        };

        if near_capacity(pattern, amount, capacity) {
            warn!(
                pattern = %pattern,
                requested = amount,
                capacity = %capacity,
                "requested amount is over half the pattern capacity; expect many duplicate draws"
            );
        }

        let reserve = usize::try_from(amount).unwrap_or(usize::MAX).min(1 << 20);
        let mut seen: HashSet<String> = HashSet::with_capacity(reserve);
        let mut codes: Vec<String> = Vec::with_capacity(reserve);

        while (codes.len() as u64) < amount {
            if let Some(limit) = self.options.max_attempts {
                if stats.attempts >= limit {
                    return Err(GenerationError::AttemptsExhausted {
                        attempts: stats.attempts,
                        generated: codes.len() as u64,
                        requested: amount,
                    });
                }
            }

            let code = draw_code(rng, pattern)?;
            stats.attempts += 1;

            if seen.insert(code.clone()) {
                codes.push(code);
            } else {
                stats.duplicates += 1;
            }
        }

        debug!(
            attempts = stats.attempts,
            duplicates = stats.duplicates,
            "coupon set filled"
        );

        Ok(CouponBatch { codes, stats })
    }

    /// Generate `amount` codes, export them to `out_path` and write the
    /// optional run report.
    ///
    /// On failure the report, if configured, is still written with the error.
    pub fn run(&self, pattern: &Pattern, amount: u64) -> Result<GenerationResult, GenerationError> {
        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        let mut report = GenerationReport::new(
            run_id.clone(),
            pattern.as_str(),
            amount,
            self.options.out_path.clone(),
        );
        report.capacity = pattern.max_combinations().to_string();

        info!(
            run_id = %run_id,
            pattern = %pattern,
            requested = amount,
            out = %self.options.out_path.display(),
            "generation started"
        );

        let outcome = self.generate(pattern, amount).and_then(|batch| {
            report.record_stats(&batch.stats, batch.codes.len() as u64);
            let bytes = write_codes_csv(&self.options.out_path, &batch.codes)?;
            report.bytes_written = bytes;
            Ok(())
        });

        report.duration_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(()) => {
                if let Some(path) = &self.options.report_path {
                    write_report(path, &report)?;
                }
                info!(
                    run_id = %run_id,
                    generated = report.generated,
                    attempts = report.attempts,
                    duplicates = report.duplicates,
                    bytes_written = report.bytes_written,
                    duration_ms = report.duration_ms,
                    "generation completed"
                );
                Ok(GenerationResult {
                    out_path: self.options.out_path.clone(),
                    report,
                })
            }
            Err(err) => {
                report.record_failure(err.to_string());
                if let Some(path) = &self.options.report_path {
                    if let Err(report_err) = write_report(path, &report) {
                        warn!(
                            run_id = %run_id,
                            path = %path.display(),
                            error = %report_err,
                            "failed to write run report"
                        );
                    }
                }
                warn!(run_id = %run_id, error = %err, "generation failed");
                Err(err)
            }
        }
    }
}

/// Whether `amount` is large enough relative to `capacity` that duplicate
/// draws will dominate. Literal-only patterns never warn.
fn near_capacity(pattern: &Pattern, amount: u64, capacity: u128) -> bool {
    pattern.placeholder_count() > 0 && u128::from(amount) * 2 > capacity
}

/// Draw one candidate code: placeholders are replaced by a random character
/// from their set, literals are copied.
pub fn draw_code<R>(rng: &mut R, pattern: &Pattern) -> Result<String, GenerationError>
where
    R: TryRngCore + ?Sized,
{
    let mut code = String::with_capacity(pattern.as_str().len());
    for token in pattern.tokens() {
        match token {
            Token::Placeholder(kind) => code.push(draw_char(rng, kind.charset())?),
            Token::Literal(ch) => code.push(*ch),
        }
    }
    Ok(code)
}
