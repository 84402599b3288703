use log::{debug, trace};

use super::WaterRocketModel;
use crate::constants::TIME_STEP;
use crate::errors::ModelError;
use crate::uncertainty::Uncertain;

/// Rocket mass at one time step.
#[derive(Debug, Clone)]
pub struct MassSample {
    pub t: f64,
    pub mass: Uncertain,
    pub water_exhausted: bool,
}

/// Time-stepped water depletion at a constant ejection rate.
///
/// Initial pressure is taken as given and never re-derived as the water
/// leaves, so the mass simply falls linearly until only the dry bottle
/// remains. Iterating is cheap and can be restarted any number of times.
#[derive(Debug, Clone)]
pub struct VariableMassProfile {
    total_launch_mass: Uncertain,
    water_mass: Uncertain,
    ejection_rate: Uncertain,
    time_step: f64,
    max_steps: usize,
}

impl VariableMassProfile {
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    pub fn water_mass(&self) -> &Uncertain {
        &self.water_mass
    }

    /// Mass ejected per second.
    pub fn ejection_rate(&self) -> &Uncertain {
        &self.ejection_rate
    }

    pub fn iter(&self) -> VariableMassSteps<'_> {
        VariableMassSteps {
            profile: self,
            step: 0,
            finished: false,
        }
    }

    /// Mass at time `t`, clamped at the dry mass once the water is gone.
    pub fn mass_at(&self, t: f64) -> MassSample {
        let ejected = &self.ejection_rate * t;
        let water_exhausted = ejected.nominal() >= self.water_mass.nominal();
        let mass = &self.total_launch_mass - ejected.min_nominal(&self.water_mass);

        MassSample {
            t,
            mass,
            water_exhausted,
        }
    }
}

impl<'a> IntoIterator for &'a VariableMassProfile {
    type Item = MassSample;
    type IntoIter = VariableMassSteps<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Yields samples at `t = 0, dt, 2dt, ...` up to and including the first
/// sample with no water left, or `max_steps` samples, whichever comes first.
#[derive(Debug, Clone)]
pub struct VariableMassSteps<'a> {
    profile: &'a VariableMassProfile,
    step: usize,
    finished: bool,
}

impl Iterator for VariableMassSteps<'_> {
    type Item = MassSample;

    fn next(&mut self) -> Option<MassSample> {
        if self.finished || self.step >= self.profile.max_steps {
            return None;
        }

        let sample = self
            .profile
            .mass_at(self.step as f64 * self.profile.time_step);
        trace!(
            "step {} t={:.4}s mass={:.5}",
            self.step,
            sample.t,
            sample.mass
        );

        self.step += 1;
        self.finished = sample.water_exhausted;
        Some(sample)
    }
}

// Variable-mass model: initial pressure is instant, water leaves over time.
impl WaterRocketModel {
    /// Mass ejected per second at launch pressure.
    pub fn instantaneous_mass_ejection(
        &self,
        pumps: f64,
        water_mass_launch: &Uncertain,
    ) -> Result<Uncertain, ModelError> {
        let c = &self.constants;
        let exhaust = self.exhaust_velocity(pumps, water_mass_launch)?;
        Ok(exhaust * &c.nozzle_area * &c.water_density)
    }

    /// Builds the depletion profile sampled every [`TIME_STEP`] seconds.
    pub fn variable_mass_profile(
        &self,
        pumps: f64,
        total_launch_mass: &Uncertain,
        max_steps: usize,
    ) -> Result<VariableMassProfile, ModelError> {
        let water_mass = self.water_mass(total_launch_mass)?;
        let ejection_rate = self.instantaneous_mass_ejection(pumps, &water_mass)?;

        Ok(VariableMassProfile {
            total_launch_mass: total_launch_mass.clone(),
            water_mass,
            ejection_rate,
            time_step: TIME_STEP,
            max_steps,
        })
    }

    /// Rocket mass `t` seconds after launch.
    pub fn variable_mass(
        &self,
        pumps: f64,
        total_launch_mass: &Uncertain,
        t: f64,
    ) -> Result<Uncertain, ModelError> {
        if !t.is_finite() || t < 0.0 {
            return Err(ModelError::InvalidInput(format!(
                "time must be finite and non-negative, got {}",
                t
            )));
        }
        let profile = self.variable_mass_profile(pumps, total_launch_mass, 0)?;
        Ok(profile.mass_at(t).mass)
    }

    /// Velocity at burnout from the rocket equation applied step by step.
    ///
    /// Each step adds `v_e * ln(m_prev / m_next)` and loses `g * dt`, until
    /// the water is exhausted or `max_steps` samples have been taken.
    pub fn variable_mass_velocity(
        &self,
        pumps: f64,
        total_launch_mass: &Uncertain,
        max_steps: usize,
    ) -> Result<Uncertain, ModelError> {
        let profile = self.variable_mass_profile(pumps, total_launch_mass, max_steps)?;
        let exhaust = self.exhaust_velocity(pumps, profile.water_mass())?;
        let gravity_loss = &self.constants.gravity_local * profile.time_step();

        let mut velocity = Uncertain::exact(0.0);
        let mut previous: Option<Uncertain> = None;
        let mut steps = 0;
        for sample in profile.iter() {
            if let Some(previous_mass) = previous.as_ref() {
                let ratio = previous_mass.checked_div(&sample.mass)?;
                velocity = velocity + &exhaust * ratio.ln()? - &gravity_loss;
            }
            previous = Some(sample.mass);
            steps += 1;
        }

        debug!(
            "variable-mass velocity for {} pumps after {} samples: {:.3}",
            pumps, steps, velocity
        );
        Ok(velocity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::model::LaunchConstants;
    use approx::assert_relative_eq;

    fn total_mass() -> Uncertain {
        Uncertain::exact(BOTTLE_MASS + 0.5)
    }

    #[test]
    fn test_mass_ejection_rate() {
        let model = WaterRocketModel::new(LaunchConstants::exact());
        let water = Uncertain::exact(0.5);

        let exhaust = model.exhaust_velocity(10.0, &water).unwrap();
        let rate = model.instantaneous_mass_ejection(10.0, &water).unwrap();

        assert_relative_eq!(
            rate.nominal(),
            exhaust.nominal() * NOZZLE_AREA * WATER_DENSITY,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_mass_at_launch_is_total_mass() {
        let model = WaterRocketModel::default();
        let mass = model.variable_mass(10.0, &total_mass(), 0.0).unwrap();
        assert_relative_eq!(mass.nominal(), BOTTLE_MASS + 0.5, epsilon = 1e-15);
    }

    #[test]
    fn test_mass_clamps_at_dry_mass() {
        let model = WaterRocketModel::default();
        let total = total_mass();

        for t in [1.0, 5.0, 60.0] {
            let mass = model.variable_mass(10.0, &total, t).unwrap();
            assert_relative_eq!(mass.nominal(), BOTTLE_MASS, epsilon = 1e-12);
            // total - (total - bottle) leaves only the bottle's uncertainty
            assert_relative_eq!(mass.sigma(), BOTTLE_MASS_SIGMA, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_mass_rejects_negative_time() {
        let model = WaterRocketModel::default();
        let err = model.variable_mass(10.0, &total_mass(), -0.1).unwrap_err();
        assert!(matches!(err, ModelError::InvalidInput(_)));
    }

    #[test]
    fn test_profile_stops_at_step_limit() {
        let model = WaterRocketModel::default();
        let profile = model.variable_mass_profile(0.0, &total_mass(), 5).unwrap();

        let samples: Vec<MassSample> = profile.iter().collect();
        assert_eq!(samples.len(), 5);
        assert!(samples.iter().all(|s| !s.water_exhausted));
        assert_relative_eq!(samples[4].t, 4.0 * TIME_STEP, epsilon = 1e-15);
    }

    #[test]
    fn test_profile_is_restartable() {
        let model = WaterRocketModel::default();
        let profile = model.variable_mass_profile(1.0, &total_mass(), 100).unwrap();

        let first: Vec<f64> = profile.iter().map(|s| s.mass.nominal()).collect();
        let second: Vec<f64> = (&profile).into_iter().map(|s| s.mass.nominal()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_pumps_only_loses_gravity() {
        let model = WaterRocketModel::default();
        let velocity = model.variable_mass_velocity(0.0, &total_mass(), 5).unwrap();
        assert_relative_eq!(
            velocity.nominal(),
            -4.0 * GRAVITY_LOCAL * TIME_STEP,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_variable_mass_velocity_telescopes() {
        let model = WaterRocketModel::new(LaunchConstants::exact());
        let total = total_mass();
        let water = model.water_mass(&total).unwrap();
        let exhaust = model.exhaust_velocity(10.0, &water).unwrap();

        let profile = model.variable_mass_profile(10.0, &total, 600).unwrap();
        let intervals = profile.iter().count() - 1;
        let velocity = model.variable_mass_velocity(10.0, &total, 600).unwrap();

        let expected = exhaust.nominal() * (total.nominal() / BOTTLE_MASS).ln()
            - intervals as f64 * GRAVITY_LOCAL * TIME_STEP;
        assert_relative_eq!(velocity.nominal(), expected, max_relative = 1e-9);
        assert!(velocity.nominal() > 0.0);
    }
}
