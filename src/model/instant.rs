use log::debug;

use super::WaterRocketModel;
use crate::errors::ModelError;
use crate::uncertainty::Uncertain;

// Instant model: pressure equalisation and water release happen at launch.
impl WaterRocketModel {
    /// Differential pressure induced by `pumps` strokes of the bike pump.
    ///
    /// `air_mol_per_pump * pumps * R * T / (V_bottle - m_water / rho_water)`.
    /// A bottle with no room left for air is rejected as invalid input.
    pub fn d_pressure_launch(
        &self,
        pumps: f64,
        water_mass_launch: &Uncertain,
    ) -> Result<Uncertain, ModelError> {
        Self::check_pumps(pumps)?;
        Self::check_water(water_mass_launch)?;
        let c = &self.constants;

        let numerator = &c.air_mol_per_pump * pumps * &c.gas_constant * &c.temperature;
        let water_volume = water_mass_launch.checked_div(&c.water_density)?;
        let air_volume = &c.bottle_volume - water_volume;
        if air_volume.nominal() <= 0.0 {
            return Err(ModelError::InvalidInput(format!(
                "{} kg of water fills the {} m³ bottle",
                water_mass_launch.nominal(),
                c.bottle_volume.nominal()
            )));
        }

        numerator.checked_div(&air_volume)
    }

    /// Exhaust velocity of the water leaving the nozzle.
    pub fn exhaust_velocity(
        &self,
        pumps: f64,
        water_mass_launch: &Uncertain,
    ) -> Result<Uncertain, ModelError> {
        let pressure = self.d_pressure_launch(pumps, water_mass_launch)?;
        (pressure * &self.constants.nozzle_area).checked_div(water_mass_launch)
    }

    /// `0.5 * v^2 * area * drag_coefficient`
    pub fn resistance_term(
        &self,
        velocity: &Uncertain,
        area: &Uncertain,
    ) -> Result<Uncertain, ModelError> {
        Ok(0.5 * velocity.powi(2)? * area * &self.constants.drag_coefficient)
    }

    /// Equivalent velocity of the instant model.
    ///
    /// The pressure term and the exhaust-velocity term are summed as given.
    pub fn equivalent_velocity_instant_model(
        &self,
        pumps: f64,
        total_launch_mass: &Uncertain,
    ) -> Result<Uncertain, ModelError> {
        let water_mass_launch = self.water_mass(total_launch_mass)?;
        let pressure_term =
            &self.constants.nozzle_area * self.d_pressure_launch(pumps, &water_mass_launch)?;
        let numerator = pressure_term + self.exhaust_velocity(pumps, &water_mass_launch)?;
        numerator.checked_div(&water_mass_launch)
    }

    /// Launch velocity from the rocket equation less one step of gravity.
    pub fn velocity_instant_final(
        &self,
        pumps: f64,
        total_launch_mass: &Uncertain,
    ) -> Result<Uncertain, ModelError> {
        let equivalent = self.equivalent_velocity_instant_model(pumps, total_launch_mass)?;
        let mass_ratio = self.mass_ratio(total_launch_mass)?;
        let log_ratio = mass_ratio
            .ln()
            .map_err(|e| ModelError::InvalidInput(format!("launch mass ratio: {}", e)))?;

        let velocity = equivalent * log_ratio - &self.constants.gravity_local;
        debug!("instant velocity for {} pumps: {:.3}", pumps, velocity);
        Ok(velocity)
    }

    /// [`velocity_instant_final`](Self::velocity_instant_final) less the drag
    /// over the bottle cross-section.
    pub fn instant_velocity_air_resist(
        &self,
        pumps: f64,
        total_launch_mass: &Uncertain,
    ) -> Result<Uncertain, ModelError> {
        let c = &self.constants;
        let velocity = self.velocity_instant_final(pumps, total_launch_mass)?;
        let resistance = self.resistance_term(&velocity, &c.bottle_area)?;
        Ok(&velocity - resistance.checked_div(&c.bottle_mass)?)
    }

    fn mass_ratio(&self, total_launch_mass: &Uncertain) -> Result<Uncertain, ModelError> {
        let ratio = total_launch_mass.checked_div(&self.constants.bottle_mass)?;
        if ratio.nominal() <= 1.0 {
            return Err(ModelError::InvalidInput(format!(
                "launch mass ratio {} must exceed 1",
                ratio.nominal()
            )));
        }
        Ok(ratio)
    }
}
