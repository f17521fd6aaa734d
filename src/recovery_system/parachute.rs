use std::f64::consts::{E, PI};

use serde::Deserialize;

use crate::atmosphere_system::environment::Environment;
use crate::constants::GRAVITY;
use crate::errors::SimulationError;

/// Canopy inflation profile, applied to normalized fill progress in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum OpeningShape {
    Linear,
    Sqrt,
    Square,
    Cube,
    Natural,
    Sine,
}

impl OpeningShape {
    pub fn evaluate(&self, x: f64) -> f64 {
        match self {
            OpeningShape::Linear => x,
            OpeningShape::Sqrt => x.sqrt(),
            OpeningShape::Square => x * x,
            OpeningShape::Cube => x.powi(3),
            OpeningShape::Natural => (x.exp() - 1.0) / (E - 1.0),
            OpeningShape::Sine => 0.5 * (PI * (x - 0.5)).sin() + 0.5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpeningCharacteristics {
    pub shape: OpeningShape,
    pub fill_time: f64, // s
}

impl OpeningCharacteristics {
    pub fn new(shape: OpeningShape, fill_time: f64) -> Self {
        OpeningCharacteristics { shape, fill_time }
    }

    /// Fraction of the canopy open at `time_since_deploy` seconds after
    /// deployment: 0 before deployment, 1 once the fill time has elapsed
    /// (or for a canopy with no fill time at all).
    pub fn percent_open(&self, time_since_deploy: f64) -> f64 {
        if time_since_deploy <= 0.0 {
            return 0.0;
        }
        if self.fill_time <= 0.0 || time_since_deploy >= self.fill_time {
            return 1.0;
        }
        self.shape.evaluate(time_since_deploy / self.fill_time)
    }
}

#[derive(Debug, Clone)]
pub struct Parachute {
    pub drag_coefficient: f64,
    pub radius: f64,        // m
    pub attached_mass: f64, // kg
    pub opening: OpeningCharacteristics,
}

impl Parachute {
    pub fn new(
        drag_coefficient: f64,
        radius: f64,
        attached_mass: f64,
        opening: OpeningCharacteristics,
    ) -> Self {
        Parachute {
            drag_coefficient,
            radius,
            attached_mass,
            opening,
        }
    }

    /// Full canopy area in m².
    pub fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }

    /// Quadratic drag on the canopy at the given opening fraction. The
    /// open fraction prorates the radius, not the area.
    pub fn drag_force(&self, air_density: f64, velocity: f64, open_fraction: f64) -> f64 {
        let effective_radius = self.radius * open_fraction;
        0.5 * air_density
            * velocity
            * velocity
            * self.drag_coefficient
            * PI
            * effective_radius
            * effective_radius
    }

    /// Steady descent velocity at the given altitude with this canopy
    /// plus any companions fully open.
    pub fn terminal_velocity(
        &self,
        altitude: f64,
        environment: &Environment,
        other_parachutes: &[&Parachute],
    ) -> Result<f64, SimulationError> {
        let air_density = environment.density(altitude);
        if air_density <= 0.0 {
            return Err(SimulationError::ConfigError(format!(
                "no atmosphere at {altitude} m, cannot derive a terminal velocity"
            )));
        }

        let mut drag_area = self.drag_coefficient * self.area();
        for parachute in other_parachutes {
            drag_area += parachute.drag_coefficient * parachute.area();
        }
        if drag_area <= 0.0 {
            return Err(SimulationError::ConfigError(
                "combined drag area must be positive".to_string(),
            ));
        }

        Ok((2.0 * self.attached_mass * GRAVITY / (air_density * drag_area)).sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atmosphere_system::environment::WindModel;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const ALL_SHAPES: [OpeningShape; 6] = [
        OpeningShape::Linear,
        OpeningShape::Sqrt,
        OpeningShape::Square,
        OpeningShape::Cube,
        OpeningShape::Natural,
        OpeningShape::Sine,
    ];

    fn test_parachute(radius: f64) -> Parachute {
        Parachute::new(
            1.2,
            radius,
            6.22,
            OpeningCharacteristics::new(OpeningShape::Linear, 2.0),
        )
    }

    #[test]
    fn test_shape_endpoints() {
        for shape in ALL_SHAPES {
            assert_abs_diff_eq!(shape.evaluate(0.0), 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(shape.evaluate(1.0), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_shapes_monotonically_non_decreasing() {
        for shape in ALL_SHAPES {
            let mut previous = 0.0;
            for step in 0..=100 {
                let x = step as f64 / 100.0;
                let value = shape.evaluate(x);
                assert!(
                    value + 1e-12 >= previous,
                    "{:?} decreased at x = {}: {} -> {}",
                    shape,
                    x,
                    previous,
                    value
                );
                previous = value;
            }
        }
    }

    #[test]
    fn test_percent_open_bounds() {
        for shape in ALL_SHAPES {
            let opening = OpeningCharacteristics::new(shape, 3.0);
            assert_abs_diff_eq!(opening.percent_open(-1.0), 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(opening.percent_open(0.0), 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(opening.percent_open(3.0), 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!(opening.percent_open(10.0), 1.0, epsilon = 1e-12);

            let mid = opening.percent_open(1.5);
            assert!((0.0..=1.0).contains(&mid));
        }
    }

    #[test]
    fn test_zero_fill_time_opens_instantly() {
        let opening = OpeningCharacteristics::new(OpeningShape::Sine, 0.0);
        assert_abs_diff_eq!(opening.percent_open(1e-9), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(opening.percent_open(0.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_drag_force_full_open() {
        let parachute = test_parachute(1.0);

        // ½ · ρ · v² · Cd · π · r²
        let expected = 0.5 * 1.225 * 10.0 * 10.0 * 1.2 * PI;
        assert_relative_eq!(
            parachute.drag_force(1.225, 10.0, 1.0),
            expected,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_drag_force_prorates_radius() {
        let parachute = test_parachute(2.0);

        let half_open = parachute.drag_force(1.225, 10.0, 0.5);
        let full_open = parachute.drag_force(1.225, 10.0, 1.0);

        // Radius proration means quarter force at half open
        assert_relative_eq!(half_open, full_open / 4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(parachute.drag_force(1.225, 10.0, 0.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_terminal_velocity_balances_gravity() {
        let environment = Environment::new(0.0, WindModel::Constant { speed: 0.0 });
        let parachute = test_parachute(0.9);

        let terminal = parachute
            .terminal_velocity(0.0, &environment, &[])
            .expect("terminal velocity should exist at sea level");

        // At terminal velocity, drag balances weight
        let drag = parachute.drag_force(environment.density(0.0), terminal, 1.0);
        assert_relative_eq!(drag, parachute.attached_mass * GRAVITY, epsilon = 1e-6);
    }

    #[test]
    fn test_terminal_velocity_drops_with_companion() {
        let environment = Environment::new(0.0, WindModel::Constant { speed: 0.0 });
        let main = test_parachute(1.5);
        let drogue = test_parachute(0.3);

        let alone = main.terminal_velocity(0.0, &environment, &[]).unwrap();
        let together = main
            .terminal_velocity(0.0, &environment, &[&drogue])
            .unwrap();

        assert!(
            together < alone,
            "A companion canopy should lower terminal velocity: {} >= {}",
            together,
            alone
        );
    }

    #[test]
    fn test_terminal_velocity_fails_in_vacuum() {
        let environment = Environment::new(0.0, WindModel::Constant { speed: 0.0 });
        let parachute = test_parachute(0.9);

        let result = parachute.terminal_velocity(90_000.0, &environment, &[]);
        assert!(matches!(result, Err(SimulationError::ConfigError(_))));
    }
}
