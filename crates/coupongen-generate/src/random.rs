use rand::TryRngCore;

use crate::errors::GenerationError;

/// Draw an index in `[0, bound)` with uniform probability.
///
/// Values below `2^32 mod bound` are rejected so the final reduction carries
/// no modulo bias.
pub fn draw_index<R>(rng: &mut R, bound: u32) -> Result<u32, GenerationError>
where
    R: TryRngCore + ?Sized,
{
    debug_assert!(bound > 0, "bound must be non-zero");
    let threshold = bound.wrapping_neg() % bound;
    loop {
        let value = rng
            .try_next_u32()
            .map_err(|err| GenerationError::RandomSource(err.to_string()))?;
        if value >= threshold {
            return Ok(value % bound);
        }
    }
}

/// Pick one character from a non-empty ASCII set.
pub fn draw_char<R>(rng: &mut R, set: &[u8]) -> Result<char, GenerationError>
where
    R: TryRngCore + ?Sized,
{
    let index = draw_index(rng, set.len() as u32)?;
    Ok(char::from(set[index as usize]))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    /// Replays a fixed list of words, then fails.
    struct ScriptedRng {
        words: Vec<u32>,
        position: usize,
    }

    impl TryRngCore for ScriptedRng {
        type Error = std::io::Error;

        fn try_next_u32(&mut self) -> Result<u32, Self::Error> {
            let word = self
                .words
                .get(self.position)
                .copied()
                .ok_or_else(|| std::io::Error::other("script exhausted"))?;
            self.position += 1;
            Ok(word)
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
    fn biased_region_is_rejected() {
        // 2^32 mod 20 == 16, so 0..16 must be redrawn.
        let mut rng = ScriptedRng {
            words: vec![3, 15, 16, 41],
            position: 0,
        };
        assert_eq!(draw_index(&mut rng, 20).expect("draw"), 16);
        assert_eq!(draw_index(&mut rng, 20).expect("draw"), 1);
    }

    #[test]
    fn power_of_two_bound_never_rejects() {
        let mut rng = ScriptedRng {
            words: vec![0, 7, 8],
            position: 0,
        };
        assert_eq!(draw_index(&mut rng, 8).expect("draw"), 0);
        assert_eq!(draw_index(&mut rng, 8).expect("draw"), 7);
        assert_eq!(draw_index(&mut rng, 8).expect("draw"), 0);
    }

    #[test]
    fn source_failure_is_reported() {
        let mut rng = ScriptedRng {
            words: Vec::new(),
            position: 0,
        };
        let err = draw_char(&mut rng, b"AB").expect_err("empty script");
        assert!(matches!(err, GenerationError::RandomSource(message) if message.contains("exhausted")));
    }

    #[test]
    fn every_character_is_reachable() {
        let set = b"01234578";
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut seen = [false; 8];
        for _ in 0..1000 {
            let ch = draw_char(&mut rng, set).expect("draw");
            let position = set.iter().position(|b| char::from(*b) == ch).expect("in set");
            seen[position] = true;
        }
        assert!(seen.iter().all(|hit| *hit));
    }
}
