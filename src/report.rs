use std::fmt;

use crate::model::LaunchEstimate;
use crate::uncertainty::Uncertain;

/// Text table of launch estimates, one row per run.
pub struct LaunchReport {
    pub rows: Vec<LaunchEstimate>,
    precision: usize,
}

impl LaunchReport {
    pub fn new(rows: Vec<LaunchEstimate>) -> Self {
        LaunchReport { rows, precision: 2 }
    }

    pub fn with_precision(self, precision: usize) -> Self {
        LaunchReport { precision, ..self }
    }

    fn format_quantity(quantity: &Uncertain, precision: usize) -> String {
        format!("{:.precision$}", quantity, precision = precision)
    }

    fn format_pressure(pressure: &Uncertain) -> String {
        if pressure.nominal().abs() >= 1_000.0 {
            format!(
                "{:.1}+/-{:.1} kPa",
                pressure.nominal() / 1_000.0,
                pressure.sigma() / 1_000.0
            )
        } else {
            format!("{:.1}+/-{:.1} Pa", pressure.nominal(), pressure.sigma())
        }
    }

    pub fn header() -> String {
        format!(
            "{:>6} | {:>22} | {:>18} | {:>22} | {:>24} | {:>22}",
            "pumps", "pressure", "exhaust (m/s)", "instant (m/s)", "instant+drag (m/s)", "variable (m/s)"
        )
    }

    pub fn lines(&self) -> Vec<String> {
        let p = self.precision;
        let mut lines = vec![Self::header()];
        lines.extend(self.rows.iter().map(|row| {
            format!(
                "{:>6} | {:>22} | {:>18} | {:>22} | {:>24} | {:>22}",
                row.pumps,
                Self::format_pressure(&row.pressure),
                Self::format_quantity(&row.exhaust_velocity, p),
                Self::format_quantity(&row.instant_velocity, p),
                Self::format_quantity(&row.instant_velocity_with_drag, p),
                Self::format_quantity(&row.variable_mass_velocity, p),
            )
        }));
        lines
    }

    pub fn display_data(&self) {
        for line in self.lines() {
            println!("{}", line);
        }
    }
}

impl fmt::Display for LaunchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WaterRocketModel;

    #[test]
    fn test_one_line_per_row_plus_header() {
        let model = WaterRocketModel::default();
        let total = Uncertain::exact(0.532);
        let rows: Vec<LaunchEstimate> = model
            .sweep_pumps([0.0, 5.0, 10.0], &total)
            .into_iter()
            .collect::<Result<_, _>>()
            .unwrap();

        let report = LaunchReport::new(rows);
        let lines = report.lines();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("pumps"));
        assert!(lines[1].trim_start().starts_with('0'));
        assert!(lines[3].contains("kPa"));
        assert_eq!(report.to_string().lines().count(), 4);
    }

    #[test]
    fn test_pressure_units() {
        let pascals = Uncertain::new(12.0, 1.0).unwrap();
        let kilopascals = Uncertain::new(2_500.0, 100.0).unwrap();

        assert_eq!(LaunchReport::format_pressure(&pascals), "12.0+/-1.0 Pa");
        assert_eq!(LaunchReport::format_pressure(&kilopascals), "2.5+/-0.1 kPa");
    }
}
