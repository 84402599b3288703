//! Monte-Carlo cross-check of the linear uncertainty propagation.
//!
//! Each draw perturbs every constant by its own normal error, builds an exact
//! model from the draw and evaluates the formula of interest. For formulas that
//! are close to linear over one sigma, the spread of the draws should agree
//! with the propagated sigma.

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::errors::ModelError;
use crate::model::{LaunchConstants, WaterRocketModel};
use crate::uncertainty::Uncertain;

#[derive(Debug, Clone, PartialEq)]
pub struct SampleSummary {
    pub mean: f64,
    pub std_dev: f64,
    pub samples: usize,
    /// Draws for which the formula rejected the sampled constants.
    pub failures: usize,
}

pub struct MonteCarlo {
    samples: usize,
    seed: u64,
}

impl MonteCarlo {
    pub fn new(samples: usize, seed: u64) -> Self {
        MonteCarlo { samples, seed }
    }

    /// One perturbed, exact copy of `constants`.
    pub fn perturb<R: Rng + ?Sized>(constants: &LaunchConstants, rng: &mut R) -> LaunchConstants {
        constants.map(|quantity| {
            let error = quantity.sigma() * rng.sample::<f64, _>(StandardNormal);
            Uncertain::exact(quantity.nominal() + error)
        })
    }

    pub fn run<F>(
        &self,
        constants: &LaunchConstants,
        mut evaluate: F,
    ) -> Result<SampleSummary, ModelError>
    where
        F: FnMut(&WaterRocketModel) -> Result<Uncertain, ModelError>,
    {
        let mut rng = StdRng::seed_from_u64(self.seed);

        // Welford's running mean and variance
        let mut count = 0usize;
        let mut mean = 0.0;
        let mut m2 = 0.0;
        let mut failures = 0usize;

        for _ in 0..self.samples {
            let model = WaterRocketModel::new(Self::perturb(constants, &mut rng));
            match evaluate(&model) {
                Ok(value) => {
                    count += 1;
                    let delta = value.nominal() - mean;
                    mean += delta / count as f64;
                    m2 += delta * (value.nominal() - mean);
                }
                Err(_) => failures += 1,
            }
        }

        if count < 2 {
            warn!("only {} of {} draws succeeded", count, self.samples);
            return Err(ModelError::InvalidInput(format!(
                "need at least two successful draws, got {}",
                count
            )));
        }

        let std_dev = (m2 / (count - 1) as f64).sqrt();
        debug!(
            "monte carlo: {} draws, {} failures, mean={} std_dev={}",
            count, failures, mean, std_dev
        );

        Ok(SampleSummary {
            mean,
            std_dev,
            samples: count,
            failures,
        })
    }
}
