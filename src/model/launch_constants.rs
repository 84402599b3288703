use crate::constants::*;
use crate::uncertainty::Uncertain;

/// Physical and experimental constants feeding every formula.
///
/// Built once and handed to [`WaterRocketModel`](super::WaterRocketModel); the
/// model only ever reads it. Each entry is an independent root quantity, so
/// reusing an entry inside one formula is propagated as a single variable.
#[derive(Debug, Clone)]
pub struct LaunchConstants {
    pub gas_constant: Uncertain,
    pub water_density: Uncertain,
    pub gravity_local: Uncertain,
    pub bottle_area: Uncertain,
    pub nozzle_area: Uncertain,
    pub air_mol_per_pump: Uncertain,
    pub temperature: Uncertain,
    pub bottle_volume: Uncertain,
    pub bottle_mass: Uncertain,
    pub air_density: Uncertain,
    pub drag_coefficient: Uncertain,
}

impl LaunchConstants {
    /// The measured table with its experimental uncertainties.
    pub fn measured() -> Self {
        LaunchConstants {
            gas_constant: Uncertain::root(Some("gas_constant"), GAS_CONSTANT, 0.0),
            water_density: Uncertain::root(Some("water_density"), WATER_DENSITY, 0.0),
            gravity_local: Uncertain::root(Some("gravity_local"), GRAVITY_LOCAL, 0.0),
            bottle_area: Uncertain::root(Some("bottle_area"), BOTTLE_AREA, BOTTLE_AREA_SIGMA),
            nozzle_area: Uncertain::root(Some("nozzle_area"), NOZZLE_AREA, NOZZLE_AREA_SIGMA),
            air_mol_per_pump: Uncertain::root(
                Some("air_mol_per_pump"),
                AIR_MOL_PER_PUMP,
                AIR_MOL_PER_PUMP_SIGMA,
            ),
            temperature: Uncertain::root(Some("temperature"), TEMPERATURE, TEMPERATURE_SIGMA),
            bottle_volume: Uncertain::root(Some("bottle_volume"), BOTTLE_VOLUME, 0.0),
            bottle_mass: Uncertain::root(Some("bottle_mass"), BOTTLE_MASS, BOTTLE_MASS_SIGMA),
            air_density: Uncertain::root(Some("air_density"), AIR_DENSITY, AIR_DENSITY_SIGMA),
            drag_coefficient: Uncertain::root(
                Some("drag_coefficient"),
                DRAG_COEFFICIENT,
                DRAG_COEFFICIENT_SIGMA,
            ),
        }
    }

    /// The measured table with the handbook density of water.
    pub fn physical() -> Self {
        Self::measured().with_water_density(Uncertain::root(
            Some("water_density"),
            WATER_DENSITY_PHYSICAL,
            0.0,
        ))
    }

    /// The same nominal values with every uncertainty removed.
    pub fn exact() -> Self {
        Self::measured().map(|quantity| Uncertain::exact(quantity.nominal()))
    }

    /// Applies `f` to every entry, producing a new table.
    pub fn map<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&Uncertain) -> Uncertain,
    {
        LaunchConstants {
            gas_constant: f(&self.gas_constant),
            water_density: f(&self.water_density),
            gravity_local: f(&self.gravity_local),
            bottle_area: f(&self.bottle_area),
            nozzle_area: f(&self.nozzle_area),
            air_mol_per_pump: f(&self.air_mol_per_pump),
            temperature: f(&self.temperature),
            bottle_volume: f(&self.bottle_volume),
            bottle_mass: f(&self.bottle_mass),
            air_density: f(&self.air_density),
            drag_coefficient: f(&self.drag_coefficient),
        }
    }

    pub fn with_bottle_mass(self, bottle_mass: Uncertain) -> Self {
        LaunchConstants {
            bottle_mass,
            ..self
        }
    }

    pub fn with_water_density(self, water_density: Uncertain) -> Self {
        LaunchConstants {
            water_density,
            ..self
        }
    }

    pub fn with_temperature(self, temperature: Uncertain) -> Self {
        LaunchConstants {
            temperature,
            ..self
        }
    }
}

impl Default for LaunchConstants {
    fn default() -> Self {
        Self::measured()
    }
}
