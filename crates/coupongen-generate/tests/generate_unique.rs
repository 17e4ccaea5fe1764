use std::collections::HashSet;

use rand::{SeedableRng, TryRngCore};
use rand_chacha::ChaCha8Rng;
use regex::Regex;

use coupongen_core::{DEFAULT_COUNT, DEFAULT_PATTERN, DIGITS, Error as CoreError, LETTERS, Pattern};
use coupongen_generate::{CouponGenerator, GenerateOptions, GenerationError};

/// Counts every draw and fails on request.
struct CountingRng {
    draws: u64,
    fail: bool,
}

impl CountingRng {
    fn new(fail: bool) -> Self {
        Self { draws: 0, fail }
    }
}

impl TryRngCore for CountingRng {
    type Error = std::io::Error;

    fn try_next_u32(&mut self) -> Result<u32, Self::Error> {
        self.draws += 1;
        if self.fail {
            return Err(std::io::Error::other("entropy unavailable"));
        }
        Ok((self.draws as u32).wrapping_mul(2_654_435_761))
    }

    fn try_next_u64(&mut self) -> Result<u64, Self::Error> {
        Ok(u64::from(self.try_next_u32()?))
    }

    fn try_fill_bytes(&mut self, dst: &mut [u8]) -> Result<(), Self::Error> {
        for byte in dst {
            *byte = self.try_next_u32()? as u8;
        }
        Ok(())
    }
}

#[test]
fn default_pattern_produces_ten_thousand_unique_codes() {
    let generator = CouponGenerator::default();
    let pattern = Pattern::parse(DEFAULT_PATTERN);
    let batch = generator
        .generate(&pattern, DEFAULT_COUNT)
        .expect("generate default batch");

    assert_eq!(batch.codes.len(), 10_000);
    assert_eq!(batch.stats.capacity, 655_360_000);

    let unique: HashSet<&String> = batch.codes.iter().collect();
    assert_eq!(unique.len(), batch.codes.len(), "codes must be distinct");

    let shape = Regex::new(&format!(
        "^[{LETTERS}]{{2}}-[{DIGITS}]{{4}}-[{LETTERS}]{{2}}$"
    ))
    .expect("shape regex");
    for code in &batch.codes {
        assert!(shape.is_match(code), "{code} does not match {DEFAULT_PATTERN}");
    }
}

#[test]
fn codes_match_pattern_shape_for_mixed_patterns() {
    let generator = CouponGenerator::default();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for source in ["SS-AD", "PROMO-DDD", "A.D.S", "ñAD"] {
        let pattern = Pattern::parse(source);
        let batch = generator
            .generate_with_rng(&mut rng, &pattern, 25)
            .expect("generate");
        assert_eq!(batch.codes.len(), 25);
        let unique: HashSet<&String> = batch.codes.iter().collect();
        assert_eq!(unique.len(), 25);
        for code in &batch.codes {
            assert!(pattern.matches(code), "{code} does not match {source}");
        }
    }
}

#[test]
fn capacity_exceeded_fails_before_any_draw() {
    let generator = CouponGenerator::default();
    let mut rng = CountingRng::new(false);

    let err = generator
        .generate_with_rng(&mut rng, &Pattern::parse("DD"), 100)
        .expect_err("capacity exceeded");

    assert!(matches!(
        err,
        GenerationError::Core(CoreError::CapacityExceeded {
            requested: 100,
            capacity: 64,
            ..
        })
    ));
    assert_eq!(rng.draws, 0);
}

#[test]
fn literal_only_pattern_yields_itself_once() {
    let generator = CouponGenerator::default();
    let mut rng = CountingRng::new(false);
    let pattern = Pattern::parse("XYZ");

    let batch = generator
        .generate_with_rng(&mut rng, &pattern, 1)
        .expect("single literal code");
    assert_eq!(batch.codes, vec!["XYZ".to_string()]);
    assert_eq!(rng.draws, 0);

    let err = generator
        .generate_with_rng(&mut rng, &pattern, 2)
        .expect_err("only one code exists");
    assert!(matches!(err, GenerationError::Core(CoreError::CapacityExceeded { .. })));
}

#[test]
fn random_source_failure_aborts_generation() {
    let generator = CouponGenerator::default();
    let mut rng = CountingRng::new(true);

    let err = generator
        .generate_with_rng(&mut rng, &Pattern::parse("AA"), 3)
        .expect_err("source fails");
    assert!(matches!(err, GenerationError::RandomSource(message) if message.contains("entropy")));
    assert_eq!(rng.draws, 1);
}

#[test]
fn attempt_ceiling_stops_the_loop() {
    let generator = CouponGenerator::new(GenerateOptions {
        max_attempts: Some(1),
        ..GenerateOptions::default()
    });
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    let err = generator
        .generate_with_rng(&mut rng, &Pattern::parse("DD"), 2)
        .expect_err("one draw cannot fill two codes");
    match err {
        GenerationError::AttemptsExhausted {
            attempts,
            generated,
            requested,
        } => {
            assert_eq!(attempts, 1);
            assert_eq!(generated, 1);
            assert_eq!(requested, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn attempt_ceiling_does_not_trip_when_met() {
    let generator = CouponGenerator::new(GenerateOptions {
        max_attempts: Some(10_000),
        ..GenerateOptions::default()
    });
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let batch = generator
        .generate_with_rng(&mut rng, &Pattern::parse("DDD"), 50)
        .expect("generate");
    assert_eq!(batch.codes.len(), 50);
    assert!(batch.stats.attempts <= 10_000);
}
