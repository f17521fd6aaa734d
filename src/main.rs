use recovery_simulation::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => load_config(&path)?,
        None => RecoveryConfig::default(),
    };
    config.validate()?;

    let environment = Environment::new(config.launch_site_altitude, config.wind.clone());

    println!("=== DROGUE ===");
    let drogue_opening =
        OpeningCharacteristics::new(config.drogue.opening_shape, config.drogue.fill_time);
    let drogue_radius = match config.drogue.fixed_diameter {
        Some(diameter) => diameter / 2.0,
        None => sizing::radius_for_descent_at_altitude(
            config.rocket_mass,
            config.drogue.drag_coefficient,
            &environment,
            config.main_altitude,
            config.drogue.target_velocity,
        )?,
    };
    let drogue = Parachute::new(
        config.drogue.drag_coefficient,
        drogue_radius,
        config.rocket_mass,
        drogue_opening,
    );
    match config.drogue.fixed_diameter {
        Some(diameter) => {
            println!(
                "With a drogue diameter of {}:",
                Measurement::from_meters(diameter).set_unit(config.output_unit)
            );
            let at_main_deploy =
                drogue.terminal_velocity(config.main_altitude, &environment, &[])?;
            println!(
                "Terminal velocity at main deploy: {}",
                Measurement::from_meters(at_main_deploy)
                    .per(TimeUnit::Second)
                    .set_units(config.landing_speed_unit, TimeUnit::Second)
            );
        }
        None => {
            println!(
                "To achieve a drogue descent velocity of {}:",
                Measurement::from_meters(config.drogue.target_velocity)
                    .per(TimeUnit::Second)
                    .set_units(config.landing_speed_unit, TimeUnit::Second)
            );
            println!(
                "Drogue diameter: {}",
                Measurement::from_meters(drogue_radius * 2.0).set_unit(config.output_unit)
            );
        }
    }

    println!("\n=== MAIN ===");
    let main_opening =
        OpeningCharacteristics::new(config.main.opening_shape, config.main.fill_time);
    let main_radius = match config.main.fixed_diameter {
        Some(diameter) => diameter / 2.0,
        None => {
            // Size for landing alone, then shrink to account for the
            // drogue staying attached all the way down.
            let total_radius = sizing::radius_for_landing(
                config.rocket_mass,
                config.main.drag_coefficient,
                &environment,
                config.main.target_velocity,
            )?;
            println!(
                "To achieve a landing velocity of {}:",
                Measurement::from_meters(config.main.target_velocity)
                    .per(TimeUnit::Second)
                    .set_units(config.landing_speed_unit, TimeUnit::Second)
            );
            println!(
                "TOTAL required diameter: {}",
                Measurement::from_meters(total_radius * 2.0).set_unit(config.output_unit)
            );
            sizing::residual_radius_given_companion(total_radius, &drogue)?
        }
    };
    let main_chute = Parachute::new(
        config.main.drag_coefficient,
        main_radius,
        config.rocket_mass,
        main_opening,
    );
    if let Some(diameter) = config.main.fixed_diameter {
        println!(
            "With a main diameter of {}:",
            Measurement::from_meters(diameter).set_unit(config.output_unit)
        );
        let at_deploy = main_chute.terminal_velocity(config.main_altitude, &environment, &[])?;
        let at_landing = main_chute.terminal_velocity(0.0, &environment, &[])?;
        println!(
            "Terminal velocity at deploy: {}",
            Measurement::from_meters(at_deploy)
                .per(TimeUnit::Second)
                .set_units(config.landing_speed_unit, TimeUnit::Second)
        );
        println!(
            "Terminal velocity at landing: {}",
            Measurement::from_meters(at_landing)
                .per(TimeUnit::Second)
                .set_units(config.landing_speed_unit, TimeUnit::Second)
        );
    }
    println!(
        "MAIN diameter: {}",
        Measurement::from_meters(main_radius * 2.0).set_unit(config.output_unit)
    );
    println!(
        " > Additional canopy: DROGUE (diameter: {})",
        Measurement::from_meters(drogue_radius * 2.0).set_unit(config.output_unit)
    );

    // Descent analysis: drogue from apogee to main deploy, probing the
    // disreef shock the main would see, then main to the ground with the
    // drogue still attached.
    let drogue_result = simulate_descent(
        &drogue,
        &config.integrator,
        config.apogee_altitude,
        config.main_altitude,
        &environment,
        0.0,
        0.0,
        &[],
        None,
        Some(&main_chute),
    )?;
    let main_result = simulate_descent(
        &main_chute,
        &config.integrator,
        config.main_altitude,
        0.0,
        &environment,
        drogue_result.final_velocity(),
        drogue_result.time,
        &[&drogue],
        None,
        None,
    )?;

    let mut telemetry = Telemetry::new(config.drift_unit, config.landing_speed_unit);
    telemetry.collect_stage(
        "DROGUE",
        &drogue_result,
        config.integrator.opening_shock_factor,
    );
    telemetry.collect_stage(
        "MAIN",
        &main_result,
        config.integrator.opening_shock_factor,
    );

    let sweep_result = run_delay_sweep(
        &drogue,
        &main_chute,
        &environment,
        &config.integrator,
        config.apogee_altitude,
        config.main_altitude,
        &config.sweep,
    )?;
    telemetry.collect_sweep(&sweep_result);

    println!();
    telemetry.display_data();

    Ok(())
}
