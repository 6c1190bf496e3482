use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Largest progress increment a driver can make in a single tick (inclusive).
pub const MAX_INCREMENT: u8 = 4;

/// IncrementSource is the capability to draw progress increments in [0, MAX_INCREMENT]. The race
/// engine draws exactly one increment per unfinished driver and tick, in roster order.
pub trait IncrementSource {
    fn draw(&mut self) -> u8;
}

impl<T: IncrementSource + ?Sized> IncrementSource for &mut T {
    fn draw(&mut self) -> u8 {
        (**self).draw()
    }
}

impl<T: IncrementSource + ?Sized> IncrementSource for Box<T> {
    fn draw(&mut self) -> u8 {
        (**self).draw()
    }
}

/// RandomIncrements draws uniformly distributed increments from a rand generator.
#[derive(Debug, Clone)]
pub struct RandomIncrements<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomIncrements<R> {
    pub fn new(rng: R) -> Self {
        RandomIncrements { rng }
    }
}

impl RandomIncrements<StdRng> {
    /// seeded returns a reproducible increment source.
    pub fn seeded(seed: u64) -> Self {
        RandomIncrements::new(StdRng::seed_from_u64(seed))
    }

    /// from_entropy returns an increment source seeded by the operating system.
    pub fn from_entropy() -> Self {
        RandomIncrements::new(StdRng::from_entropy())
    }
}

impl<R: Rng> IncrementSource for RandomIncrements<R> {
    fn draw(&mut self) -> u8 {
        self.rng.gen_range(0..=MAX_INCREMENT)
    }
}

/// ScriptedIncrements replays a fixed sequence of increments and starts over once it is exhausted.
/// Values above MAX_INCREMENT are capped.
#[derive(Debug, Clone)]
pub struct ScriptedIncrements {
    script: Vec<u8>,
    idx: usize,
}

impl ScriptedIncrements {
    pub fn new(script: Vec<u8>) -> Self {
        assert!(!script.is_empty(), "Increment script must not be empty!");
        ScriptedIncrements { script, idx: 0 }
    }

    /// constant returns a source that always draws the same increment.
    pub fn constant(increment: u8) -> Self {
        ScriptedIncrements::new(vec![increment])
    }
}

impl IncrementSource for ScriptedIncrements {
    fn draw(&mut self) -> u8 {
        let increment = self.script[self.idx].min(MAX_INCREMENT);
        self.idx = (self.idx + 1) % self.script.len();
        increment
    }
}
