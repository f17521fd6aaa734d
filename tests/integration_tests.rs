use recovery_simulation::{
    run_delay_sweep, simulate_descent, sizing, Environment, IntegratorConfig,
    OpeningCharacteristics, OpeningShape, Parachute, SweepConfig, WindModel,
    AIR_DENSITY_SEA_LEVEL, GRAVITY,
};

use approx::{assert_abs_diff_eq, assert_relative_eq};
use std::f64::consts::PI;

fn still_air() -> Environment {
    Environment::new(0.0, WindModel::Constant { speed: 0.0 })
}

fn test_integrator(critical_altitude: f64) -> IntegratorConfig {
    IntegratorConfig {
        nominal_timestep: 0.05,
        fine_timestep: 0.005,
        critical_altitude,
        critical_band: 50.0,
        opening_shock_factor: 1.5,
        disreef_timestep_factor: 0.1,
        min_feasible_velocity: 0.1,
    }
}

fn drogue_and_main(mass: f64) -> (Parachute, Parachute) {
    let drogue = Parachute::new(
        1.2,
        0.3,
        mass,
        OpeningCharacteristics::new(OpeningShape::Linear, 1.0),
    );
    let main = Parachute::new(
        2.2,
        1.2,
        mass,
        OpeningCharacteristics::new(OpeningShape::Sine, 3.0),
    );
    (drogue, main)
}

#[test]
fn test_drogue_sizing_scenario() {
    // 13.7 lb vehicle, Cd 1.2, 75 ft/s descent at sea-level density
    let mass = 6.22; // kg
    let drag_coefficient = 1.2;
    let air_density = AIR_DENSITY_SEA_LEVEL;
    let target_velocity = 22.86; // m/s

    let radius =
        sizing::radius_for_target_velocity(mass, drag_coefficient, air_density, target_velocity)
            .expect("sizing should succeed for positive inputs");

    // Verify against the closed form directly, within 1%
    let expected = (2.0 * mass * GRAVITY
        / (PI * drag_coefficient * air_density * target_velocity * target_velocity))
        .sqrt();
    assert_relative_eq!(radius, expected, max_relative = 0.01);

    // And the round trip: this radius must reproduce the target velocity
    let area = PI * radius * radius;
    let terminal = (2.0 * mass * GRAVITY / (drag_coefficient * air_density * area)).sqrt();
    assert_relative_eq!(terminal, target_velocity, max_relative = 0.01);
}

#[test]
fn test_free_fall_descent_time_scenario() {
    // Zero drag, zero wind, 100 m of fall with a 0.01 s step
    let config = IntegratorConfig {
        nominal_timestep: 0.01,
        fine_timestep: 0.01,
        critical_altitude: -1_000.0, // band never entered
        critical_band: 0.0,
        opening_shock_factor: 1.5,
        disreef_timestep_factor: 0.1,
        min_feasible_velocity: 0.1,
    };
    let vanishing = Parachute::new(
        1e-12,
        1e-12,
        1.0,
        OpeningCharacteristics::new(OpeningShape::Linear, 0.0),
    );

    let result = simulate_descent(
        &vanishing,
        &config,
        100.0,
        0.0,
        &still_air(),
        0.0,
        0.0,
        &[],
        None,
        None,
    )
    .expect("free fall should integrate cleanly");

    let analytic = (2.0 * 100.0 / GRAVITY).sqrt(); // ≈ 4.52 s
    assert_abs_diff_eq!(result.time, analytic, epsilon = 0.05);
    assert_abs_diff_eq!(result.drift, 0.0, epsilon = 1e-12);
}

#[test]
fn test_delay_sweep_scenario() {
    // Delay grid [0, 15] stepped by 0.2 must yield exactly 76 points
    let (drogue, main) = drogue_and_main(6.22);
    let config = IntegratorConfig {
        nominal_timestep: 0.1,
        fine_timestep: 0.01,
        ..test_integrator(300.0)
    };
    let sweep = SweepConfig {
        delay_fineness: 0.2,
        delay_maximum: 15.0,
        max_tolerable_force: 2_224.1,
    };

    let result = run_delay_sweep(
        &drogue,
        &main,
        &still_air(),
        &config,
        800.0,
        300.0,
        &sweep,
    )
    .expect("sweep should complete");

    assert_eq!(result.points.len(), 76);
    for (index, point) in result.points.iter().enumerate() {
        assert_abs_diff_eq!(point.ejection_delay, index as f64 * 0.2, epsilon = 1e-6);
        assert!(point.safety_factor > 0.0);
    }
}

#[test]
fn test_two_stage_descent_pipeline() {
    // Full mission: size both canopies, fly drogue then main, hand off
    // velocity and clock between them.
    let mass = 6.22;
    let environment = still_air();
    let apogee = 2_133.6;
    let main_altitude = 304.8;

    let drogue_radius =
        sizing::radius_for_descent_at_altitude(mass, 1.2, &environment, main_altitude, 22.86)
            .unwrap();
    let drogue = Parachute::new(
        1.2,
        drogue_radius,
        mass,
        OpeningCharacteristics::new(OpeningShape::Linear, 1.0),
    );

    let total_radius = sizing::radius_for_landing(mass, 2.2, &environment, 6.1).unwrap();
    let main_radius = sizing::residual_radius_given_companion(total_radius, &drogue).unwrap();
    let main = Parachute::new(
        2.2,
        main_radius,
        mass,
        OpeningCharacteristics::new(OpeningShape::Sine, 3.0),
    );

    let config = test_integrator(main_altitude);
    let drogue_result = simulate_descent(
        &drogue,
        &config,
        apogee,
        main_altitude,
        &environment,
        0.0,
        0.0,
        &[],
        None,
        Some(&main),
    )
    .expect("drogue stage should integrate");

    // The drogue stage must settle close to its sizing target
    assert_relative_eq!(drogue_result.final_velocity(), 22.86, max_relative = 0.1);
    assert_eq!(
        drogue_result.disreef_forces.len(),
        drogue_result.timestamps.len()
    );

    let main_result = simulate_descent(
        &main,
        &config,
        main_altitude,
        0.0,
        &environment,
        drogue_result.final_velocity(),
        drogue_result.time,
        &[&drogue],
        None,
        None,
    )
    .expect("main stage should integrate");

    // Time chains across the handoff
    assert!(main_result.time > drogue_result.time);
    assert!(main_result.timestamps[0] > drogue_result.time);

    // The landing velocity must come in close to the combined-canopy
    // sizing target
    assert_relative_eq!(main_result.final_velocity(), 6.1, max_relative = 0.1);

    // Peak loads happen during openings, and the main sees its peak at
    // the handoff velocity
    assert!(main_result.max_force > 0.0);
    assert!(drogue_result.max_force > 0.0);
}

#[test]
fn test_windy_descent_accumulates_drift() {
    let (drogue, _) = drogue_and_main(6.22);
    let windy = Environment::new(
        0.0,
        WindModel::PowerLawShear {
            reference_speed: 4.0,
            reference_altitude: 10.0,
            exponent: 1.0 / 7.0,
        },
    );

    let result = simulate_descent(
        &drogue,
        &test_integrator(300.0),
        2_000.0,
        300.0,
        &windy,
        0.0,
        0.0,
        &[],
        None,
        None,
    )
    .unwrap();

    // Shear wind above the reference floor always exceeds 4 m/s, so the
    // drift must beat the constant-floor bound
    assert!(result.drift > 4.0 * result.time * 0.9);
}

#[test]
fn test_sweep_baseline_matches_direct_runs() {
    let (drogue, main) = drogue_and_main(6.22);
    let environment = still_air();
    let config = IntegratorConfig {
        nominal_timestep: 0.1,
        fine_timestep: 0.01,
        ..test_integrator(300.0)
    };
    let sweep = SweepConfig {
        delay_fineness: 5.0,
        delay_maximum: 5.0,
        max_tolerable_force: 2_224.1,
    };

    let result = run_delay_sweep(
        &drogue,
        &main,
        &environment,
        &config,
        800.0,
        300.0,
        &sweep,
    )
    .unwrap();

    // Recreate the baseline by hand; the sweep's first point must match
    let baseline_drogue = simulate_descent(
        &drogue,
        &config,
        800.0,
        300.0,
        &environment,
        0.0,
        0.0,
        &[],
        None,
        Some(&main),
    )
    .unwrap();
    let baseline_main = simulate_descent(
        &main,
        &config,
        300.0,
        0.0,
        &environment,
        baseline_drogue.final_velocity(),
        baseline_drogue.time,
        &[&drogue],
        None,
        None,
    )
    .unwrap();

    let first = &result.points[0];
    assert_abs_diff_eq!(first.ejection_delay, 0.0, epsilon = 1e-12);
    assert_relative_eq!(
        first.drogue_force,
        baseline_drogue.max_force * config.opening_shock_factor,
        epsilon = 1e-9
    );
    assert_relative_eq!(
        first.main_force,
        baseline_main.max_force * config.opening_shock_factor,
        epsilon = 1e-9
    );
    assert_relative_eq!(
        first.disreef_force,
        baseline_drogue.peak_disreef_force(),
        epsilon = 1e-9
    );
}
