use std::f64::consts::PI;

use crate::atmosphere_system::environment::Environment;
use crate::constants::GRAVITY;
use crate::errors::SimulationError;
use crate::recovery_system::parachute::Parachute;

/// Canopy radius that makes drag balance weight at the target descent
/// velocity: `r = sqrt(2·m·g / (π·Cd·ρ·v²))`.
pub fn radius_for_target_velocity(
    mass: f64,
    drag_coefficient: f64,
    air_density: f64,
    target_velocity: f64,
) -> Result<f64, SimulationError> {
    if mass <= 0.0 {
        return Err(SimulationError::ConfigError(format!(
            "mass must be positive, got {mass} kg"
        )));
    }
    if drag_coefficient <= 0.0 {
        return Err(SimulationError::ConfigError(format!(
            "drag coefficient must be positive, got {drag_coefficient}"
        )));
    }
    if air_density <= 0.0 {
        return Err(SimulationError::ConfigError(format!(
            "air density must be positive, got {air_density} kg/m³"
        )));
    }
    if target_velocity <= 0.0 {
        return Err(SimulationError::ConfigError(format!(
            "target velocity must be positive, got {target_velocity} m/s"
        )));
    }

    let radius_squared = 2.0 * mass * GRAVITY
        / (PI * drag_coefficient * air_density * target_velocity * target_velocity);
    Ok(radius_squared.sqrt())
}

/// Radius needed to land at the target velocity, using ground-level density.
pub fn radius_for_landing(
    mass: f64,
    drag_coefficient: f64,
    environment: &Environment,
    target_velocity: f64,
) -> Result<f64, SimulationError> {
    radius_for_target_velocity(mass, drag_coefficient, environment.density(0.0), target_velocity)
}

/// Radius needed to descend at the target velocity at a given altitude
/// above the launch site.
pub fn radius_for_descent_at_altitude(
    mass: f64,
    drag_coefficient: f64,
    environment: &Environment,
    altitude: f64,
    target_velocity: f64,
) -> Result<f64, SimulationError> {
    radius_for_target_velocity(
        mass,
        drag_coefficient,
        environment.density(altitude),
        target_velocity,
    )
}

/// Radius this canopy alone must have when a companion flies alongside
/// it, so that the combined area of both matches the area implied by
/// `total_radius`.
pub fn residual_radius_given_companion(
    total_radius: f64,
    companion: &Parachute,
) -> Result<f64, SimulationError> {
    let residual_area = PI * total_radius * total_radius - companion.area();
    if residual_area <= 0.0 {
        return Err(SimulationError::SizingError(format!(
            "companion canopy area {:.3} m² meets or exceeds the required total area {:.3} m²",
            companion.area(),
            PI * total_radius * total_radius
        )));
    }
    Ok((residual_area / PI).sqrt())
}
