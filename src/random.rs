use crate::error::SelectionError;
use log::{debug, warn};
use rand::rngs::SmallRng;
use rand::{RngExt, SeedableRng};
use std::fmt;
use std::time::{Duration, Instant};

pub const RESEED_INTERVAL: u32 = 20;
pub const MAX_LIMIT: usize = i32::MAX as usize;
pub const DEFAULT_FALLBACK_TIMEOUT: Duration = Duration::from_secs(1);

pub trait EntropySource: Send {
    fn next_seed(&mut self) -> i32;

    fn next_below(&mut self, limit: u32) -> u32;
}

#[derive(Debug, Clone)]
pub struct SystemEntropy {
    rng: SmallRng,
}

impl SystemEntropy {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for SystemEntropy {
    fn default() -> Self {
        Self::new()
    }
}

impl EntropySource for SystemEntropy {
    fn next_seed(&mut self) -> i32 {
        self.rng.random_range(i32::MIN..=i32::MAX)
    }

    fn next_below(&mut self, limit: u32) -> u32 {
        self.rng.random_range(0..limit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub fallback_timeout: Duration,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            fallback_timeout: DEFAULT_FALLBACK_TIMEOUT,
        }
    }
}

pub struct BoundedRandom {
    seed: i32,
    draws_since_reseed: u32,
    fallbacks: u64,
    options: GeneratorOptions,
    entropy: Box<dyn EntropySource>,
}

impl BoundedRandom {
    pub fn new() -> Self {
        Self::with_entropy(SystemEntropy::new(), GeneratorOptions::default())
    }

    pub fn with_entropy(entropy: impl EntropySource + 'static, options: GeneratorOptions) -> Self {
        let mut entropy: Box<dyn EntropySource> = Box::new(entropy);
        let seed = usable_seed(entropy.next_seed());
        Self {
            seed,
            draws_since_reseed: 0,
            fallbacks: 0,
            options,
            entropy,
        }
    }

    pub fn next_bounded(&mut self, limit: usize) -> Result<usize, SelectionError> {
        if limit == 0 {
            return Ok(0);
        }
        if limit > MAX_LIMIT {
            return Err(SelectionError::LimitTooLarge { limit });
        }

        let limit = limit as u32;
        let divisor = i32::MAX as u32 / limit;
        let bound = limit * divisor;
        let started = Instant::now();

        loop {
            let raw = self.next_raw();
            if started.elapsed() >= self.options.fallback_timeout {
                warn!(
                    "bounded draw for limit {limit} exceeded {:?}, using entropy fallback",
                    self.options.fallback_timeout
                );
                self.fallbacks += 1;
                return Ok(self.entropy.next_below(limit) as usize);
            }
            if raw < bound {
                return Ok((raw / divisor) as usize);
            }
        }
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) -> Result<(), SelectionError> {
        for upper in (1..items.len()).rev() {
            let swap_with = self.next_bounded(upper + 1)?;
            items.swap(upper, swap_with);
        }
        Ok(())
    }

    pub fn fallback_count(&self) -> u64 {
        self.fallbacks
    }

    fn next_raw(&mut self) -> u32 {
        let next = xorshift(self.seed);

        self.draws_since_reseed += 1;
        if self.draws_since_reseed == RESEED_INTERVAL {
            self.seed = usable_seed(self.entropy.next_seed());
            self.draws_since_reseed = 0;
            debug!("reseeded bounded generator");
        } else {
            self.seed = next;
        }

        // i32::MIN maps to 2^31, which is always above the rejection bound.
        next.unsigned_abs()
    }
}

impl Default for BoundedRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BoundedRandom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedRandom")
            .field("draws_since_reseed", &self.draws_since_reseed)
            .field("fallbacks", &self.fallbacks)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

fn xorshift(seed: i32) -> i32 {
    let mut next = seed;
    next ^= next << 13;
    next ^= next >> 17;
    next ^= next << 5;
    next
}

// Zero is a fixed point of xorshift.
fn usable_seed(seed: i32) -> i32 {
    if seed == 0 { 1 } else { seed }
}
