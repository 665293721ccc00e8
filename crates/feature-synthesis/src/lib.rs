//! Synthetic input generation
//!
//! Stands in for real financial data ingestion: draws a feature vector and
//! a small news signal per scoring run from a single injectable random
//! source, so tests can fix seeds and assert exact outputs.

use credit_core::{
    BaselineRating, CreditError, FeatureSource, FeatureVector, NewsKeyword, NewsSignal, Sector,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Feature ranges for the synthetic financials
const PROFIT_MARGIN_RANGE: std::ops::Range<f64> = -0.2..0.4;
const DEBT_RATIO_RANGE: std::ops::Range<f64> = 0.1..1.0;
const GROWTH_RANGE: std::ops::Range<f64> = -0.1..0.3;

/// Random synthetic data source. The RNG sits behind a mutex so one source
/// can be shared across async handlers.
pub struct SyntheticDataSource<R: Rng + Send> {
    rng: Mutex<R>,
}

impl SyntheticDataSource<StdRng> {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic source for tests
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for SyntheticDataSource<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng + Send> SyntheticDataSource<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl<R: Rng + Send> FeatureSource for SyntheticDataSource<R> {
    fn financials(&self) -> Result<FeatureVector, CreditError> {
        let mut rng = self.rng.lock().expect("rng lock poisoned");
        Ok(FeatureVector {
            profit_margin: rng.gen_range(PROFIT_MARGIN_RANGE),
            debt_ratio: rng.gen_range(DEBT_RATIO_RANGE),
            growth: rng.gen_range(GROWTH_RANGE),
        })
    }

    fn news(&self) -> Result<NewsSignal, CreditError> {
        let mut rng = self.rng.lock().expect("rng lock poisoned");
        let count = rng.gen_range(1..=3);
        let keywords: Vec<NewsKeyword> = NewsKeyword::ALL
            .choose_multiple(&mut *rng, count)
            .copied()
            .collect();
        Ok(NewsSignal { keywords })
    }
}

/// Draw a random sector/rating pair for a demo issuer profile
pub fn demo_profile<R: Rng>(rng: &mut R) -> (Sector, BaselineRating) {
    let sector = *Sector::ALL.choose(rng).expect("sector vocabulary is non-empty");
    let rating = *BaselineRating::ALL
        .choose(rng)
        .expect("rating vocabulary is non-empty");
    (sector, rating)
}
