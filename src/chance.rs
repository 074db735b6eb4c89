use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::VecDeque;

/// Source of every random decision the simulation makes.
pub trait Chance {
    /// Uniform in `[0, 1)`.
    fn roll(&mut self) -> f64;
    /// Uniform in `0..n`. `n` must be non-zero.
    fn pick(&mut self, n: usize) -> usize;
    /// Uniform in `lo..=hi`.
    fn between(&mut self, lo: i32, hi: i32) -> i32;
}

/// `Chance` backed by any `rand` generator.
pub struct Dice<R: Rng> {
    rng: R,
}

impl<R: Rng> Dice<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl Dice<StdRng> {
    /// Seeded when `seed` is given, otherwise drawn from OS entropy.
    pub fn session(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::new(StdRng::seed_from_u64(s)),
            None => Self::new(StdRng::from_entropy()),
        }
    }
}

impl<R: Rng> Chance for Dice<R> {
    fn roll(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn pick(&mut self, n: usize) -> usize {
        self.rng.gen_range(0..n)
    }

    fn between(&mut self, lo: i32, hi: i32) -> i32 {
        self.rng.gen_range(lo..=hi)
    }
}

/// Replays queued values in order.
///
/// Once a queue runs dry the script falls back to the lowest possible
/// answer: `0.0` for rolls, `0` for picks, `lo` for ranges. Values are
/// clamped into the requested range so a script can never produce an
/// out-of-contract draw.
#[derive(Clone, Debug, Default)]
pub struct Script {
    rolls: VecDeque<f64>,
    picks: VecDeque<usize>,
    ranges: VecDeque<i32>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rolls(mut self, rolls: impl IntoIterator<Item = f64>) -> Self {
        self.rolls.extend(rolls);
        self
    }

    pub fn picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(picks);
        self
    }

    pub fn ranges(mut self, values: impl IntoIterator<Item = i32>) -> Self {
        self.ranges.extend(values);
        self
    }
}

impl Chance for Script {
    fn roll(&mut self) -> f64 {
        self.rolls
            .pop_front()
            .map(|r| r.clamp(0.0, 1.0 - f64::EPSILON))
            .unwrap_or(0.0)
    }

    fn pick(&mut self, n: usize) -> usize {
        self.picks
            .pop_front()
            .map(|p| p.min(n.saturating_sub(1)))
            .unwrap_or(0)
    }

    fn between(&mut self, lo: i32, hi: i32) -> i32 {
        self.ranges
            .pop_front()
            .map(|v| v.max(lo).min(hi))
            .unwrap_or(lo)
    }
}
