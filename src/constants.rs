// Physical Constants
pub const GRAVITY: f64 = 9.81; // m/s²

// Environmental Constants
pub const SEA_LEVEL_TEMPERATURE: f64 = 288.15; // K
pub const SEA_LEVEL_PRESSURE: f64 = 101_325.0; // Pa
pub const TROPOSPHERE_TEMP_GRADIENT: f64 = -6.5 / 1_000.0; // °C per meter
pub const TROPOSPHERE_HEIGHT: f64 = 11_000.0; // m
pub const AIR_DENSITY_SEA_LEVEL: f64 = 1.225; // kg/m³
pub const SPECIFIC_GAS_CONSTANT_AIR: f64 = 287.05; // J/(kg·K)

// Simulation Parameters
pub const DEFAULT_NOMINAL_TIMESTEP: f64 = 0.05; // s
pub const DEFAULT_FINE_TIMESTEP: f64 = 0.005; // s
pub const DEFAULT_CRITICAL_BAND: f64 = 50.0; // m, around the main-deploy altitude
pub const DEFAULT_DISREEF_TIMESTEP_FACTOR: f64 = 0.1; // fraction of the nominal timestep
pub const MIN_FEASIBLE_VELOCITY: f64 = 0.1; // m/s, descent-rate floor for the iteration guard

// Recovery Constants
pub const DEFAULT_OPENING_SHOCK_FACTOR: f64 = 1.5;
pub const NEWTONS_TO_POUNDS_FORCE: f64 = 0.224_808_94;
