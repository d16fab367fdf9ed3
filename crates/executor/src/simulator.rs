use async_trait::async_trait;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::config::SimulatorConfig;
use super::error::Error;
use super::types::{Market, MarketSource, Quote};

/// One basis point as a fraction.
const BPS: f64 = 0.0001;

/// Produces a synthetic barter market for demos and smoke runs.
///
/// Generates `quotes` random quotes between `total_products` products. Each
/// quote trades one unit for roughly one unit, perturbed by up to
/// `rate_fluctuation_bps` basis points, so small cycles hover around
/// break-even and some of them turn profitable.
pub struct SimulatorSource {
    pub total_products: usize,
    pub quotes: usize,
    pub rate_fluctuation_bps: f64,
    pub seed: Option<u64>,
}

impl SimulatorSource {
    pub fn new(config: SimulatorConfig) -> Self {
        SimulatorSource {
            total_products: config.total_products,
            quotes: config.quotes,
            rate_fluctuation_bps: config.rate_fluctuation_bps,
            seed: config.seed,
        }
    }

    fn generate(&self, rng: &mut SmallRng) -> Vec<Quote> {
        let fluctuation = self.rate_fluctuation_bps.abs() * BPS;
        let product_range = 1..=self.total_products;

        (0..self.quotes)
            .map(|_| {
                let product_a = rng.random_range(product_range.clone());
                let product_b = rng.random_range(product_range.clone());
                let noise = if fluctuation > 0.0 {
                    rng.random_range(-fluctuation..=fluctuation)
                } else {
                    0.0
                };

                Quote {
                    product_a,
                    product_b,
                    weight_a: 1.0,
                    weight_b: 1.0 + noise,
                }
            })
            .collect()
    }
}

#[async_trait]
impl MarketSource for SimulatorSource {
    async fn load(self) -> Result<Market, Error> {
        if self.total_products == 0 {
            return Err(Error::ConfigLoadError(
                "simulator.total_products must be at least 1".to_string(),
            ));
        }

        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        let quotes = self.generate(&mut rng);
        tracing::debug!("Simulator generated {} quotes.", quotes.len());

        Ok(Market {
            num_products: self.total_products,
            quotes,
        })
    }
}
