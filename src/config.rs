use std::fs::File;

use serde::Deserialize;
use serde_yaml::from_reader;

use crate::atmosphere_system::environment::WindModel;
use crate::constants::{
    DEFAULT_CRITICAL_BAND, DEFAULT_DISREEF_TIMESTEP_FACTOR, DEFAULT_FINE_TIMESTEP,
    DEFAULT_NOMINAL_TIMESTEP, DEFAULT_OPENING_SHOCK_FACTOR, MIN_FEASIBLE_VELOCITY,
};
use crate::errors::SimulationError;
use crate::recovery_system::descent::IntegratorConfig;
use crate::recovery_system::monte_carlo::SweepConfig;
use crate::recovery_system::parachute::OpeningShape;
use crate::utils::measurement::Unit;

/// One recovery stage as configured: either sized for a target velocity
/// or pinned to a known diameter.
#[derive(Debug, Clone, Deserialize)]
pub struct StageConfig {
    pub drag_coefficient: f64,
    pub target_velocity: f64, // m/s
    pub fill_time: f64,       // s
    pub opening_shape: OpeningShape,
    /// When set, sizing is skipped and the stage reports its terminal
    /// velocities instead.
    #[serde(default)]
    pub fixed_diameter: Option<f64>, // m
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecoveryConfig {
    pub rocket_mass: f64,          // kg
    pub launch_site_altitude: f64, // m above sea level
    pub apogee_altitude: f64,      // m above ground
    pub main_altitude: f64,        // m above ground
    pub drogue: StageConfig,
    pub main: StageConfig,
    pub wind: WindModel,
    pub integrator: IntegratorConfig,
    pub sweep: SweepConfig,
    pub output_unit: Unit,
    pub drift_unit: Unit,
    pub landing_speed_unit: Unit,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        let main_altitude = 304.8; // 1000 ft
        RecoveryConfig {
            rocket_mass: 6.22,             // 13.7 lb
            launch_site_altitude: 304.8,   // 1000 ft
            apogee_altitude: 2_133.6,      // 7000 ft
            main_altitude,
            drogue: StageConfig {
                drag_coefficient: 1.2,
                target_velocity: 22.86, // 75 ft/s at main deploy
                fill_time: 2.0,
                opening_shape: OpeningShape::Linear,
                fixed_diameter: None,
            },
            main: StageConfig {
                drag_coefficient: 2.2,
                target_velocity: 6.1, // 20 ft/s at landing
                fill_time: 4.0,
                opening_shape: OpeningShape::Sine,
                fixed_diameter: None,
            },
            wind: WindModel::Constant { speed: 4.47 }, // 10 mph
            integrator: IntegratorConfig {
                nominal_timestep: DEFAULT_NOMINAL_TIMESTEP,
                fine_timestep: DEFAULT_FINE_TIMESTEP,
                critical_altitude: main_altitude,
                critical_band: DEFAULT_CRITICAL_BAND,
                opening_shock_factor: DEFAULT_OPENING_SHOCK_FACTOR,
                disreef_timestep_factor: DEFAULT_DISREEF_TIMESTEP_FACTOR,
                min_feasible_velocity: MIN_FEASIBLE_VELOCITY,
            },
            sweep: SweepConfig {
                delay_fineness: 0.2,
                delay_maximum: 15.0,
                max_tolerable_force: 2_224.1, // 500 lbf
            },
            output_unit: Unit::Feet,
            drift_unit: Unit::Miles,
            landing_speed_unit: Unit::Feet,
        }
    }
}

impl RecoveryConfig {
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.rocket_mass <= 0.0 {
            return Err(SimulationError::ConfigError(format!(
                "rocket mass must be positive, got {} kg",
                self.rocket_mass
            )));
        }
        if self.main_altitude <= 0.0 {
            return Err(SimulationError::ConfigError(format!(
                "main deploy altitude must be positive, got {} m",
                self.main_altitude
            )));
        }
        if self.apogee_altitude <= self.main_altitude {
            return Err(SimulationError::ConfigError(format!(
                "apogee {} m must lie above the main deploy altitude {} m",
                self.apogee_altitude, self.main_altitude
            )));
        }
        validate_stage("drogue", &self.drogue)?;
        validate_stage("main", &self.main)?;
        self.integrator.validate()?;
        self.sweep.validate()?;
        Ok(())
    }
}

fn validate_stage(name: &str, stage: &StageConfig) -> Result<(), SimulationError> {
    if stage.drag_coefficient <= 0.0 {
        return Err(SimulationError::ConfigError(format!(
            "{name} drag coefficient must be positive, got {}",
            stage.drag_coefficient
        )));
    }
    if stage.target_velocity <= 0.0 {
        return Err(SimulationError::ConfigError(format!(
            "{name} target velocity must be positive, got {} m/s",
            stage.target_velocity
        )));
    }
    if stage.fill_time < 0.0 {
        return Err(SimulationError::ConfigError(format!(
            "{name} fill time must be non-negative, got {} s",
            stage.fill_time
        )));
    }
    if let Some(diameter) = stage.fixed_diameter {
        if diameter <= 0.0 {
            return Err(SimulationError::ConfigError(format!(
                "{name} fixed diameter must be positive, got {} m",
                diameter
            )));
        }
    }
    Ok(())
}

/// Loads and validates a recovery configuration from a YAML file.
pub fn load_config(path: &str) -> Result<RecoveryConfig, SimulationError> {
    let file = File::open(path)?;
    let config: RecoveryConfig = from_reader(file)?;
    config.validate()?;
    Ok(config)
}
