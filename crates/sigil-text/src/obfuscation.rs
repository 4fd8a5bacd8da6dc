//! The obfuscated-text effect.
//!
//! Obfuscated glyphs are replaced by random glyphs of the same class. The
//! random stream is seeded from the string and a slow clock, so the shuffle
//! is stable within one refresh interval and identical between the shadow
//! and main passes of a draw.

use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Counter advanced at most once per refresh interval.
#[derive(Debug, Clone)]
pub struct ObfuscationClock {
    counter: u64,
    last_update: Option<Instant>,
    interval: Duration,
}

impl ObfuscationClock {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(50);

    pub fn new(interval: Duration) -> Self {
        Self {
            counter: 0,
            last_update: None,
            interval,
        }
    }

    /// A clock frozen at `counter` until its first tick.
    pub fn with_counter(counter: u64) -> Self {
        Self {
            counter,
            ..Self::default()
        }
    }

    /// Advance the counter if a full interval has passed since the last
    /// advance. The first tick only records `now`.
    pub fn tick(&mut self, now: Instant) -> u64 {
        match self.last_update {
            None => self.last_update = Some(now),
            Some(last) if now.saturating_duration_since(last) >= self.interval => {
                self.counter += 1;
                self.last_update = Some(now);
                tracing::trace!("obfuscation clock advanced to {}", self.counter);
            }
            Some(_) => {}
        }
        self.counter
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }
}

impl Default for ObfuscationClock {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}

/// Rolling 31-multiplier hash over the UTF-16 code units of `text`.
pub fn string_hash(text: &str) -> i32 {
    text.encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// Class-preserving random substitution for one pass.
#[derive(Debug, Clone)]
pub struct Obfuscator {
    rng: StdRng,
}

impl Obfuscator {
    pub fn new(hash: i32, counter: u64) -> Self {
        let seed = i64::from(hash).wrapping_add(counter as i64);
        Self {
            rng: StdRng::seed_from_u64(seed as u64),
        }
    }

    /// Replace an ASCII letter or digit with a random one of the same class.
    /// Other characters are returned unchanged and consume no randomness.
    pub fn substitute(&mut self, c: char) -> char {
        match c {
            'A'..='Z' => self.pick(b'A', 26),
            'a'..='z' => self.pick(b'a', 26),
            '0'..='9' => self.pick(b'0', 10),
            _ => c,
        }
    }

    fn pick(&mut self, first: u8, len: u8) -> char {
        char::from(first + self.rng.random_range(0..len))
    }
}

/// One-shot substitution of `c` for the given clock value and string hash.
pub fn substitute(c: char, counter: u64, hash: i32) -> char {
    Obfuscator::new(hash, counter).substitute(c)
}
