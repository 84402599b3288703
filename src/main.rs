use log::{info, warn, LevelFilter};
use water_rocket::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .try_init()?;

    let model = WaterRocketModel::new(LaunchConstants::measured());

    // 0.5 kg of water weighed to the gram
    let total_launch_mass = Uncertain::labeled("total_launch_mass", BOTTLE_MASS + 0.5, 0.001)?;

    let mut rows = Vec::new();
    for result in model.sweep_pumps((0..=20).step_by(2).map(f64::from), &total_launch_mass) {
        match result {
            Ok(estimate) => rows.push(estimate),
            Err(e) => warn!("Skipping run: {}", e),
        }
    }

    LaunchReport::new(rows).display_data();

    let profile = model.variable_mass_profile(10.0, &total_launch_mass, MAX_PROFILE_STEPS)?;
    for sample in &profile {
        info!("t={:.3}s mass={:.4} kg", sample.t, sample.mass);
    }

    Ok(())
}
