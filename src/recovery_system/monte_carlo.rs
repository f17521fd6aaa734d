use serde::Deserialize;

use crate::atmosphere_system::environment::Environment;
use crate::errors::SimulationError;
use crate::recovery_system::descent::{
    simulate_descent, DriftResult, IntegratorConfig, MonteCarloParameters,
};
use crate::recovery_system::parachute::Parachute;

/// Bounds of the deployment-delay grid and the structural limit the
/// safety factor is measured against.
#[derive(Debug, Clone, Deserialize)]
pub struct SweepConfig {
    pub delay_fineness: f64, // s, grid step
    pub delay_maximum: f64,  // s, inclusive upper bound
    pub max_tolerable_force: f64, // N
}

impl SweepConfig {
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.delay_fineness <= 0.0 {
            return Err(SimulationError::ConfigError(format!(
                "delay fineness must be positive, got {} s",
                self.delay_fineness
            )));
        }
        if self.delay_maximum < 0.0 {
            return Err(SimulationError::ConfigError(format!(
                "delay maximum must be non-negative, got {} s",
                self.delay_maximum
            )));
        }
        if self.max_tolerable_force <= 0.0 {
            return Err(SimulationError::ConfigError(format!(
                "maximum tolerable force must be positive, got {} N",
                self.max_tolerable_force
            )));
        }
        Ok(())
    }
}

/// Peak forces and derived safety margin for one deployment delay. All
/// forces carry the opening-shock factor.
#[derive(Debug, Clone)]
pub struct SweepPoint {
    pub ejection_delay: f64, // s
    pub drogue_force: f64,   // N
    pub main_force: f64,     // N
    pub disreef_force: f64,  // N
    pub safety_factor: f64,
}

#[derive(Debug, Clone)]
pub struct DelaySweepResult {
    /// One point per grid delay, in delay order, baseline first.
    pub points: Vec<SweepPoint>,
}

impl DelaySweepResult {
    pub fn minimum_safety_factor(&self) -> Option<&SweepPoint> {
        self.points
            .iter()
            .min_by(|a, b| a.safety_factor.total_cmp(&b.safety_factor))
    }
}

/// Sweeps the deployment delay over the configured grid, re-running both
/// descent stages per point. Every delayed run chains from the baseline
/// (zero-delay) drogue-to-main handoff state; the delay perturbs only
/// the canopy opening clock. The full grid is always evaluated.
#[allow(clippy::too_many_arguments)]
pub fn run_delay_sweep(
    drogue: &Parachute,
    main: &Parachute,
    environment: &Environment,
    config: &IntegratorConfig,
    apogee_altitude: f64,
    main_altitude: f64,
    sweep: &SweepConfig,
) -> Result<DelaySweepResult, SimulationError> {
    sweep.validate()?;

    // Baseline establishes the handoff used by every sweep point.
    let baseline_drogue = simulate_descent(
        drogue,
        config,
        apogee_altitude,
        main_altitude,
        environment,
        0.0,
        0.0,
        &[],
        None,
        Some(main),
    )?;
    let handoff_velocity = baseline_drogue.final_velocity();
    let handoff_time = baseline_drogue.time;
    let baseline_main = simulate_descent(
        main,
        config,
        main_altitude,
        0.0,
        environment,
        handoff_velocity,
        handoff_time,
        &[drogue],
        None,
        None,
    )?;

    let mut points = vec![evaluate_point(
        0.0,
        &baseline_drogue,
        &baseline_main,
        config,
        sweep,
    )];

    let mut delay = sweep.delay_fineness;
    while delay <= sweep.delay_maximum + 1e-9 {
        let params = MonteCarloParameters {
            ejection_delay: delay,
        };

        let drogue_result = simulate_descent(
            drogue,
            config,
            apogee_altitude,
            main_altitude,
            environment,
            0.0,
            0.0,
            &[],
            Some(params),
            Some(main),
        )?;
        let main_result = simulate_descent(
            main,
            config,
            main_altitude,
            0.0,
            environment,
            handoff_velocity,
            handoff_time,
            &[drogue],
            Some(params),
            None,
        )?;

        points.push(evaluate_point(
            delay,
            &drogue_result,
            &main_result,
            config,
            sweep,
        ));

        delay += sweep.delay_fineness;
    }

    Ok(DelaySweepResult { points })
}

fn evaluate_point(
    delay: f64,
    drogue_result: &DriftResult,
    main_result: &DriftResult,
    config: &IntegratorConfig,
    sweep: &SweepConfig,
) -> SweepPoint {
    let drogue_force = drogue_result.max_force * config.opening_shock_factor;
    let main_force = main_result.max_force * config.opening_shock_factor;
    // Disreef probe entries are shock-scaled when recorded.
    let disreef_force = drogue_result.peak_disreef_force();

    let worst = drogue_force.max(main_force).max(disreef_force);
    SweepPoint {
        ejection_delay: delay,
        drogue_force,
        main_force,
        disreef_force,
        safety_factor: sweep.max_tolerable_force / worst,
    }
}
