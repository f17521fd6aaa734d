use crate::constants::NEWTONS_TO_POUNDS_FORCE;
use crate::recovery_system::descent::DriftResult;
use crate::recovery_system::monte_carlo::DelaySweepResult;
use crate::utils::measurement::{Measurement, TimeUnit, Unit};

/// Collects per-stage descent summaries and sweep results, and renders
/// the whole analysis as a console report. The simulation core hands its
/// results here and performs no output of its own.
pub struct Telemetry {
    pub log: Vec<String>,
    max_velocity: f64,
    max_force: f64,
    total_drift: f64,
    stage_times: Vec<(String, f64)>,
    sweep_summary: Option<String>,
    drift_unit: Unit,
    speed_unit: Unit,
}

impl Telemetry {
    pub fn new(drift_unit: Unit, speed_unit: Unit) -> Self {
        Telemetry {
            log: Vec::new(),
            max_velocity: 0.0,
            max_force: 0.0,
            total_drift: 0.0,
            stage_times: Vec::new(),
            sweep_summary: None,
            drift_unit,
            speed_unit,
        }
    }

    fn format_time(elapsed_time: f64) -> String {
        if elapsed_time >= 3600.0 {
            let hours = (elapsed_time / 3600.0).floor();
            let minutes = ((elapsed_time % 3600.0) / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}h {:.0}m {:.2}s", hours, minutes, seconds)
        } else if elapsed_time >= 60.0 {
            let minutes = (elapsed_time / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}m {:.2}s", minutes, seconds)
        } else {
            format!("{:.2}s", elapsed_time)
        }
    }

    fn format_altitude(altitude: f64) -> String {
        if altitude >= 1000.0 {
            format!("{:.2} km", altitude / 1000.0)
        } else {
            format!("{:.2} m", altitude)
        }
    }

    fn format_force(force: f64) -> String {
        format!(
            "{:.1} N ({:.1} lbf)",
            force,
            force * NEWTONS_TO_POUNDS_FORCE
        )
    }

    pub fn collect_stage(&mut self, name: &str, result: &DriftResult, shock_factor: f64) {
        let shock_force = result.max_force * shock_factor;
        if result.maximum_velocity > self.max_velocity {
            self.max_velocity = result.maximum_velocity;
        }
        if shock_force > self.max_force {
            self.max_force = shock_force;
        }
        self.total_drift += result.drift;

        let drift = Measurement::from_meters(result.drift).set_unit(self.drift_unit);
        let average = Measurement::from_meters(result.steady_state_velocity)
            .per(TimeUnit::Second)
            .set_units(self.speed_unit, TimeUnit::Second);
        let final_velocity = Measurement::from_meters(result.final_velocity())
            .per(TimeUnit::Second)
            .set_units(self.speed_unit, TimeUnit::Second);

        let mut data = format!(
            "Stage: {}\n\
                 Descent time: {}\n\
                 Final altitude: {}\n\
                 Drift: {}\n\
                 Maximum velocity: {:.2} m/s\n\
                 Average velocity: {}\n\
                 Final velocity: {}\n\
                 Maximum opening force: {}\n",
            name,
            Self::format_time(result.time),
            Self::format_altitude(result.altitudes.last().copied().unwrap_or(0.0)),
            drift,
            result.maximum_velocity,
            average,
            final_velocity,
            Self::format_force(shock_force),
        );
        if !result.disreef_forces.is_empty() {
            data.push_str(&format!(
                "Peak disreef shock: {}\n",
                Self::format_force(result.peak_disreef_force())
            ));
        }
        if result.is_monte_carlo() {
            if let Some(params) = result.monte_carlo_params {
                data.push_str(&format!(
                    "Deployment delay: {:.2}s\n",
                    params.ejection_delay
                ));
            }
        }
        self.log.push(data);

        self.stage_times.push((name.to_string(), result.time));
    }

    pub fn collect_sweep(&mut self, sweep: &DelaySweepResult) {
        let mut summary = String::new();
        for point in &sweep.points {
            summary.push_str(&format!(
                "delay {:>5.1}s | drogue {:>9} | main {:>9} | disreef {:>9} | safety factor {:.2}\n",
                point.ejection_delay,
                Self::format_force(point.drogue_force),
                Self::format_force(point.main_force),
                Self::format_force(point.disreef_force),
                point.safety_factor,
            ));
        }
        if let Some(worst) = sweep.minimum_safety_factor() {
            summary.push_str(&format!(
                "\nWorst case: safety factor {:.2} at {:.1}s deployment delay{}\n",
                worst.safety_factor,
                worst.ejection_delay,
                if worst.safety_factor < 1.0 {
                    " — EXCEEDS STRUCTURAL LIMIT"
                } else {
                    ""
                }
            ));
        }
        self.sweep_summary = Some(summary);
    }

    pub fn total_drift(&self) -> Measurement {
        Measurement::from_meters(self.total_drift).set_unit(self.drift_unit)
    }

    pub fn display_data(&self) {
        println!("--- Descent Analysis ---");
        for entry in &self.log {
            println!("{}", entry);
        }

        println!("--- Summary ---");
        println!("Max velocity: {:.2} m/s", self.max_velocity);
        println!("Max opening force: {}", Self::format_force(self.max_force));
        println!("Total drift: {}", self.total_drift());

        println!("\n--- Stage Times ---");
        for (stage, time) in &self.stage_times {
            println!("{} reached its end altitude at {}", stage, Self::format_time(*time));
        }

        if let Some(summary) = &self.sweep_summary {
            println!("\n--- Deployment Delay Sweep ---");
            print!("{}", summary);
        }
    }
}
