use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub trait RandomSource {
    // Inclusive on both ends; callers guarantee min <= max.
    fn roll(&mut self, min: u32, max: u32) -> u32;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn roll(&mut self, min: u32, max: u32) -> u32 {
        (**self).roll(min, max)
    }
}

#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: SmallRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn roll(&mut self, min: u32, max: u32) -> u32 {
        self.rng.gen_range(min..=max)
    }
}

// Values are clamped into the requested range, so FixedRandom(255) hits every
// accuracy check and rolls the maximum variance factor.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FixedRandom(pub u32);

impl RandomSource for FixedRandom {
    fn roll(&mut self, min: u32, max: u32) -> u32 {
        self.0.clamp(min, max)
    }
}

#[derive(Clone, Debug)]
pub struct ScriptedRandom {
    values: Vec<u32>,
    index: usize,
}

impl ScriptedRandom {
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
            index: 0,
        }
    }

    pub fn consumed(&self) -> usize {
        self.index
    }
}

impl RandomSource for ScriptedRandom {
    fn roll(&mut self, min: u32, max: u32) -> u32 {
        if self.values.is_empty() {
            return min;
        }
        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        value.clamp(min, max)
    }
}
