use rand::Rng;

/// Source of randomness for the reply gate and pacing.
pub trait Sampler: Send + Sync {
    /// Uniform draw in `[0, 1)`.
    fn probability(&self) -> f64;

    /// Uniform whole seconds in `[min, max]`.
    fn delay_secs(&self, min: u64, max: u64) -> u64;
}

/// Thread-local RNG sampler.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSampler;

impl Sampler for RandomSampler {
    fn probability(&self) -> f64 {
        rand::rng().random::<f64>()
    }

    fn delay_secs(&self, min: u64, max: u64) -> u64 {
        if min >= max {
            return min;
        }
        rand::rng().random_range(min..=max)
    }
}

/// Deterministic sampler for tests and dry runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedSampler {
    pub probability: f64,
    pub delay_secs: u64,
}

impl FixedSampler {
    pub fn new(probability: f64, delay_secs: u64) -> Self {
        Self {
            probability,
            delay_secs,
        }
    }
}

impl Sampler for FixedSampler {
    fn probability(&self) -> f64 {
        self.probability
    }

    fn delay_secs(&self, min: u64, max: u64) -> u64 {
        self.delay_secs.clamp(min, max.max(min))
    }
}
