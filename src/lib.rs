pub mod atmosphere_system;
pub mod config;
pub mod constants;
pub mod errors;
pub mod recovery_system;
pub mod telemetry_system;
pub mod utils;

pub use constants::*;
pub use atmosphere_system::environment::{Environment, WindModel};
pub use config::{load_config, RecoveryConfig, StageConfig};
pub use errors::SimulationError;
pub use recovery_system::descent::{
    simulate_descent, DriftResult, IntegratorConfig, MonteCarloParameters,
};
pub use recovery_system::monte_carlo::{
    run_delay_sweep, DelaySweepResult, SweepConfig, SweepPoint,
};
pub use recovery_system::parachute::{OpeningCharacteristics, OpeningShape, Parachute};
pub use recovery_system::sizing;

// Re-export commonly used items from telemetry_system
pub use telemetry_system::telemetry::Telemetry;

// Re-export commonly used utilities
pub use utils::measurement::{Measurement, TimeUnit, Unit, Velocity};
