//! Water-bottle rocket launch formulas.
//!
//! Every formula is a pure function of the run inputs `(pumps,
//! total_launch_mass)` and the model's [`LaunchConstants`]. Evaluations share
//! no state, so sweeps may be spread over threads by the caller.

mod instant;
mod launch_constants;
mod variable_mass;

pub use launch_constants::LaunchConstants;
pub use variable_mass::{MassSample, VariableMassProfile, VariableMassSteps};

use log::{debug, warn};

use crate::constants::MAX_PROFILE_STEPS;
use crate::errors::ModelError;
use crate::uncertainty::Uncertain;

#[derive(Debug, Clone, Default)]
pub struct WaterRocketModel {
    constants: LaunchConstants,
}

/// All derived quantities of one launch.
#[derive(Debug, Clone)]
pub struct LaunchEstimate {
    pub pumps: f64,
    pub total_launch_mass: Uncertain,
    pub water_mass: Uncertain,
    pub pressure: Uncertain,
    pub exhaust_velocity: Uncertain,
    pub instant_velocity: Uncertain,
    pub instant_velocity_with_drag: Uncertain,
    pub variable_mass_velocity: Uncertain,
}

impl WaterRocketModel {
    pub fn new(constants: LaunchConstants) -> Self {
        WaterRocketModel { constants }
    }

    pub fn constants(&self) -> &LaunchConstants {
        &self.constants
    }

    /// Mass of water loaded: `total_launch_mass - bottle_mass`.
    ///
    /// Fails with [`ModelError::InvalidInput`] unless some water is on board.
    pub fn water_mass(&self, total_launch_mass: &Uncertain) -> Result<Uncertain, ModelError> {
        if !total_launch_mass.nominal().is_finite() {
            warn!("rejecting non-finite launch mass {}", total_launch_mass);
            return Err(ModelError::InvalidInput(format!(
                "total launch mass must be finite, got {}",
                total_launch_mass.nominal()
            )));
        }

        let water_mass = total_launch_mass - &self.constants.bottle_mass;
        if water_mass.nominal() <= 0.0 {
            warn!(
                "launch mass {} does not exceed bottle mass {}",
                total_launch_mass, self.constants.bottle_mass
            );
            return Err(ModelError::InvalidInput(format!(
                "total launch mass {} kg leaves no water above the bottle mass {} kg",
                total_launch_mass.nominal(),
                self.constants.bottle_mass.nominal()
            )));
        }
        Ok(water_mass)
    }

    /// Evaluates every launch quantity for one run.
    pub fn estimate(
        &self,
        pumps: f64,
        total_launch_mass: &Uncertain,
    ) -> Result<LaunchEstimate, ModelError> {
        let water_mass = self.water_mass(total_launch_mass)?;
        let pressure = self.d_pressure_launch(pumps, &water_mass)?;
        let exhaust_velocity = self.exhaust_velocity(pumps, &water_mass)?;
        let instant_velocity = self.velocity_instant_final(pumps, total_launch_mass)?;
        let instant_velocity_with_drag =
            self.instant_velocity_air_resist(pumps, total_launch_mass)?;
        let variable_mass_velocity =
            self.variable_mass_velocity(pumps, total_launch_mass, MAX_PROFILE_STEPS)?;

        debug!(
            "pumps={} mass={:.4}: instant={:.3} drag={:.3} variable={:.3}",
            pumps,
            total_launch_mass,
            instant_velocity,
            instant_velocity_with_drag,
            variable_mass_velocity
        );

        Ok(LaunchEstimate {
            pumps,
            total_launch_mass: total_launch_mass.clone(),
            water_mass,
            pressure,
            exhaust_velocity,
            instant_velocity,
            instant_velocity_with_drag,
            variable_mass_velocity,
        })
    }

    /// One independent [`LaunchEstimate`] per pump count.
    pub fn sweep_pumps<I>(
        &self,
        pumps: I,
        total_launch_mass: &Uncertain,
    ) -> Vec<Result<LaunchEstimate, ModelError>>
    where
        I: IntoIterator<Item = f64>,
    {
        pumps
            .into_iter()
            .map(|count| self.estimate(count, total_launch_mass))
            .collect()
    }

    fn check_pumps(pumps: f64) -> Result<(), ModelError> {
        if !pumps.is_finite() || pumps < 0.0 {
            warn!("rejecting pump count {}", pumps);
            return Err(ModelError::InvalidInput(format!(
                "pump count must be finite and non-negative, got {}",
                pumps
            )));
        }
        Ok(())
    }

    fn check_water(water_mass_launch: &Uncertain) -> Result<(), ModelError> {
        if !(water_mass_launch.nominal() > 0.0) {
            return Err(ModelError::InvalidInput(format!(
                "water mass must be positive, got {}",
                water_mass_launch.nominal()
            )));
        }
        Ok(())
    }
}
