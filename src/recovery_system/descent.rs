use serde::Deserialize;

use crate::atmosphere_system::environment::Environment;
use crate::constants::GRAVITY;
use crate::errors::SimulationError;
use crate::recovery_system::parachute::Parachute;

/// Every tunable of the descent integrator, passed explicitly. The same
/// struct also feeds the nested disreef probe so its timestep dependency
/// stays visible.
#[derive(Debug, Clone, Deserialize)]
pub struct IntegratorConfig {
    pub nominal_timestep: f64, // s
    pub fine_timestep: f64,    // s, used inside the critical band
    /// Altitude of the next deployment event, usually the main-deploy
    /// altitude.
    pub critical_altitude: f64, // m AGL
    /// Half-width of the band around the critical altitude in which the
    /// fine timestep applies.
    pub critical_band: f64, // m
    pub opening_shock_factor: f64,
    /// The disreef probe integrates at `nominal_timestep * disreef_timestep_factor`.
    pub disreef_timestep_factor: f64,
    /// Slowest descent rate considered reachable; bounds the iteration
    /// count so a non-descending configuration fails instead of hanging.
    pub min_feasible_velocity: f64, // m/s
}

impl IntegratorConfig {
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.nominal_timestep <= 0.0 || self.fine_timestep <= 0.0 {
            return Err(SimulationError::ConfigError(format!(
                "timesteps must be positive, got nominal {} s and fine {} s",
                self.nominal_timestep, self.fine_timestep
            )));
        }
        if self.fine_timestep > self.nominal_timestep {
            return Err(SimulationError::ConfigError(format!(
                "fine timestep {} s exceeds nominal timestep {} s",
                self.fine_timestep, self.nominal_timestep
            )));
        }
        if self.critical_band < 0.0 {
            return Err(SimulationError::ConfigError(format!(
                "critical band must be non-negative, got {} m",
                self.critical_band
            )));
        }
        if self.opening_shock_factor <= 0.0 {
            return Err(SimulationError::ConfigError(format!(
                "opening shock factor must be positive, got {}",
                self.opening_shock_factor
            )));
        }
        if self.disreef_timestep_factor <= 0.0 {
            return Err(SimulationError::ConfigError(format!(
                "disreef timestep factor must be positive, got {}",
                self.disreef_timestep_factor
            )));
        }
        if self.min_feasible_velocity <= 0.0 {
            return Err(SimulationError::ConfigError(format!(
                "minimum feasible velocity must be positive, got {} m/s",
                self.min_feasible_velocity
            )));
        }
        Ok(())
    }

    fn timestep_at(&self, altitude: f64) -> f64 {
        if (altitude - self.critical_altitude).abs() <= self.critical_band {
            self.fine_timestep
        } else {
            self.nominal_timestep
        }
    }

    fn disreef_timestep(&self) -> f64 {
        self.nominal_timestep * self.disreef_timestep_factor
    }
}

/// Perturbed inputs for a delay-sweep run. The delay shifts the canopy
/// opening clock only; the trajectory handoff stays at its baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonteCarloParameters {
    pub ejection_delay: f64, // s
}

/// Everything one integrator invocation produces. Immutable once returned.
#[derive(Debug, Clone)]
pub struct DriftResult {
    pub drift: f64,                 // m, accumulated horizontal wind carry
    pub time: f64,                  // s, simulation clock at the end altitude
    pub maximum_velocity: f64,      // m/s
    pub steady_state_velocity: f64, // m/s, mean of the recorded velocities
    /// Peak drag force on the primary canopy, before the opening-shock
    /// factor is applied.
    pub max_force: f64, // N
    pub timestamps: Vec<f64>,
    pub velocities: Vec<f64>,
    pub altitudes: Vec<f64>,
    /// Shock-scaled peak forces from the per-step disreef probe; empty
    /// when no disreef target was supplied.
    pub disreef_forces: Vec<f64>,
    pub monte_carlo_params: Option<MonteCarloParameters>,
}

impl DriftResult {
    /// A run counts as a Monte Carlo variant only when the ejection
    /// delay actually perturbed it.
    pub fn is_monte_carlo(&self) -> bool {
        self.monte_carlo_params
            .map_or(false, |params| params.ejection_delay != 0.0)
    }

    pub fn final_velocity(&self) -> f64 {
        self.velocities.last().copied().unwrap_or(0.0)
    }

    pub fn peak_disreef_force(&self) -> f64 {
        self.disreef_forces.iter().copied().fold(0.0, f64::max)
    }
}

/// Advances the descent under one primary canopy from `start_altitude`
/// down to `end_altitude` with semi-implicit Euler steps. Companion
/// canopies in `other_open_parachutes` are treated as fully open. When a
/// `disreef_target` is supplied, each step also probes the opening shock
/// that canopy would see if it deployed at the current state; the probe
/// never feeds back into the trajectory.
#[allow(clippy::too_many_arguments)]
pub fn simulate_descent(
    parachute: &Parachute,
    config: &IntegratorConfig,
    start_altitude: f64,
    end_altitude: f64,
    environment: &Environment,
    start_velocity: f64,
    start_time: f64,
    other_open_parachutes: &[&Parachute],
    monte_carlo: Option<MonteCarloParameters>,
    disreef_target: Option<&Parachute>,
) -> Result<DriftResult, SimulationError> {
    config.validate()?;
    validate_canopy(parachute)?;
    for other in other_open_parachutes {
        validate_canopy(other)?;
    }
    if let Some(target) = disreef_target {
        validate_canopy(target)?;
    }
    if end_altitude >= start_altitude {
        return Err(SimulationError::ConfigError(format!(
            "end altitude {end_altitude} m must lie below start altitude {start_altitude} m"
        )));
    }

    let ejection_delay = monte_carlo.map_or(0.0, |params| params.ejection_delay);
    if ejection_delay < 0.0 {
        return Err(SimulationError::ConfigError(format!(
            "ejection delay must be non-negative, got {ejection_delay} s"
        )));
    }

    // Iteration bound: the span cannot take longer to cross than it would
    // at the minimum feasible descent rate.
    let max_simulated_time = (start_altitude - end_altitude) / config.min_feasible_velocity;
    let max_steps = (max_simulated_time / config.fine_timestep).ceil() as u64;

    let mut altitude = start_altitude;
    let mut velocity = start_velocity;
    let mut total_time = start_time;
    let mut drift = 0.0;
    let mut maximum_velocity = start_velocity;
    let mut max_force: f64 = 0.0;

    let mut timestamps = Vec::new();
    let mut velocities = Vec::new();
    let mut altitudes = Vec::new();
    let mut disreef_forces = Vec::new();

    let mut steps: u64 = 0;
    loop {
        let timestep = config.timestep_at(altitude);
        let time_since_opening = total_time - start_time - ejection_delay;
        let open_fraction = parachute.opening.percent_open(time_since_opening);
        let air_density = environment.density(altitude);

        let primary_force = parachute.drag_force(air_density, velocity, open_fraction);
        let mut total_drag = primary_force;
        for other in other_open_parachutes {
            total_drag += other.drag_force(air_density, velocity, 1.0);
        }

        if let Some(target) = disreef_target {
            let shock = estimate_disreef_shock(
                target,
                parachute,
                other_open_parachutes,
                altitude,
                velocity,
                environment,
                config,
            );
            disreef_forces.push(shock * config.opening_shock_factor);
        }

        // Acceleration from the pre-step velocity, then velocity, then
        // altitude from the new velocity.
        let acceleration = GRAVITY - total_drag / parachute.attached_mass;
        velocity += acceleration * timestep;
        drift += environment.windspeed(altitude) * timestep;
        altitude -= velocity * timestep;
        total_time += timestep;

        if velocity > maximum_velocity {
            maximum_velocity = velocity;
        }
        if primary_force > max_force {
            max_force = primary_force;
        }

        timestamps.push(total_time);
        velocities.push(velocity);
        altitudes.push(altitude);

        if altitude <= end_altitude {
            break;
        }

        steps += 1;
        if steps >= max_steps {
            return Err(SimulationError::IntegrationError(format!(
                "no descent from {start_altitude} m to {end_altitude} m within {max_steps} steps; \
                 the configuration cannot reach the end altitude"
            )));
        }
    }

    let steady_state_velocity = velocities.iter().sum::<f64>() / velocities.len() as f64;

    Ok(DriftResult {
        drift,
        time: total_time,
        maximum_velocity,
        steady_state_velocity,
        max_force,
        timestamps,
        velocities,
        altitudes,
        disreef_forces,
        monte_carlo_params: monte_carlo,
    })
}

/// Probes the opening transient a candidate canopy would experience if
/// it deployed at the given state, with the already-open canopies still
/// attached. Bounded by the candidate's fill time; never touches the
/// caller's trajectory.
pub fn estimate_disreef_shock(
    target: &Parachute,
    primary: &Parachute,
    other_open_parachutes: &[&Parachute],
    altitude: f64,
    velocity: f64,
    environment: &Environment,
    config: &IntegratorConfig,
) -> f64 {
    let timestep = config.disreef_timestep();

    // A canopy with no fill time is open the moment it deploys.
    if target.opening.fill_time <= 0.0 {
        return target.drag_force(environment.density(altitude), velocity, 1.0);
    }

    let mut local_altitude = altitude;
    let mut local_velocity = velocity;
    let mut elapsed = 0.0;
    let mut peak: f64 = 0.0;

    while elapsed < target.opening.fill_time {
        let air_density = environment.density(local_altitude);
        let open_fraction = target.opening.percent_open(elapsed);
        let opening_force = target.drag_force(air_density, local_velocity, open_fraction);

        let mut total_drag = opening_force + primary.drag_force(air_density, local_velocity, 1.0);
        for other in other_open_parachutes {
            total_drag += other.drag_force(air_density, local_velocity, 1.0);
        }

        if opening_force > peak {
            peak = opening_force;
        }

        let acceleration = GRAVITY - total_drag / target.attached_mass;
        local_velocity += acceleration * timestep;
        local_altitude -= local_velocity * timestep;
        elapsed += timestep;
    }

    // The transient ends fully open; include that endpoint.
    let final_force = target.drag_force(
        environment.density(local_altitude),
        local_velocity,
        1.0,
    );
    peak.max(final_force)
}

fn validate_canopy(parachute: &Parachute) -> Result<(), SimulationError> {
    if parachute.attached_mass <= 0.0 {
        return Err(SimulationError::ConfigError(format!(
            "attached mass must be positive, got {} kg",
            parachute.attached_mass
        )));
    }
    if parachute.drag_coefficient <= 0.0 {
        return Err(SimulationError::ConfigError(format!(
            "drag coefficient must be positive, got {}",
            parachute.drag_coefficient
        )));
    }
    if parachute.radius <= 0.0 {
        return Err(SimulationError::ConfigError(format!(
            "canopy radius must be positive, got {} m",
            parachute.radius
        )));
    }
    if parachute.opening.fill_time < 0.0 {
        return Err(SimulationError::ConfigError(format!(
            "fill time must be non-negative, got {} s",
            parachute.opening.fill_time
        )));
    }
    Ok(())
}
