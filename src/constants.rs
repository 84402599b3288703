// Physical Constants
pub const GAS_CONSTANT: f64 = 8.314; // J/(K⋅mol)
pub const WATER_DENSITY: f64 = 1e5; // kg/m³, as tabulated for the experiment
pub const WATER_DENSITY_PHYSICAL: f64 = 1_000.0; // kg/m³
pub const GRAVITY_LOCAL: f64 = 9.796; // m/s²

// Experimental Constants (nominal, 1-sigma)
pub const BOTTLE_AREA: f64 = 6.08e-3; // m²
pub const BOTTLE_AREA_SIGMA: f64 = 5e-4;
pub const NOZZLE_AREA: f64 = 2.01e-4; // m²
pub const NOZZLE_AREA_SIGMA: f64 = 5e-5;
pub const AIR_MOL_PER_PUMP: f64 = 0.1; // mol/pump
pub const AIR_MOL_PER_PUMP_SIGMA: f64 = 0.01;
pub const TEMPERATURE: f64 = 283.0; // K
pub const TEMPERATURE_SIGMA: f64 = 2.0;
pub const BOTTLE_VOLUME: f64 = 1.5e-3; // m³, fixed by the bottle
pub const BOTTLE_MASS: f64 = 0.032; // kg
pub const BOTTLE_MASS_SIGMA: f64 = 0.01;
pub const AIR_DENSITY: f64 = 1.23; // kg/m³
pub const AIR_DENSITY_SIGMA: f64 = 0.1;
pub const DRAG_COEFFICIENT: f64 = 0.8; // blunt cylinder estimate
pub const DRAG_COEFFICIENT_SIGMA: f64 = 0.05;

// Simulation Parameters
pub const TIME_STEP: f64 = 1.0 / 60.0; // s
pub const MAX_PROFILE_STEPS: usize = 600; // 10 s at TIME_STEP
