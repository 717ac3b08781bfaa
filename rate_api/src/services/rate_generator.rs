use fx_domain::Rate;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::RoundingStrategy;

pub const RATE_DECIMAL_PLACES: u32 = 6;

/// Uniform pseudo-random rates in `[low, high]`, rounded to [`RATE_DECIMAL_PLACES`].
/// There is no relation between consecutive values or to any real market data.
pub struct UniformRateGenerator {
    low: f64,
    high: f64,
    rng: Mutex<StdRng>,
}

impl UniformRateGenerator {
    pub const DEFAULT_LOW: f64 = 0.5;
    pub const DEFAULT_HIGH: f64 = 1.5;

    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            low: Self::DEFAULT_LOW,
            high: Self::DEFAULT_HIGH,
            rng: Mutex::new(rng),
        }
    }

    pub fn next_rate(&self) -> Rate {
        let value = self.rng.lock().gen_range(self.low..=self.high);
        round_rate(value)
    }
}

/// Rounds half away from zero to [`RATE_DECIMAL_PLACES`]
pub fn round_rate(value: f64) -> Rate {
    Rate::from_f64(value)
        .unwrap_or_default()
        .round_dp_with_strategy(RATE_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}
