use serde::Deserialize;

use crate::constants::{
    SEA_LEVEL_PRESSURE, SEA_LEVEL_TEMPERATURE, SPECIFIC_GAS_CONSTANT_AIR, TROPOSPHERE_HEIGHT,
    TROPOSPHERE_TEMP_GRADIENT,
};

/// Horizontal wind as a function of altitude above ground level.
#[derive(Debug, Clone, Deserialize)]
pub enum WindModel {
    Constant {
        speed: f64, // m/s
    },
    /// Power-law shear profile: constant below the reference altitude,
    /// `reference_speed * (alt / reference_altitude)^exponent` above it.
    PowerLawShear {
        reference_speed: f64,    // m/s
        reference_altitude: f64, // m AGL
        exponent: f64,
    },
}

impl WindModel {
    pub fn speed_at(&self, altitude: f64) -> f64 {
        match self {
            WindModel::Constant { speed } => *speed,
            WindModel::PowerLawShear {
                reference_speed,
                reference_altitude,
                exponent,
            } => {
                if altitude <= *reference_altitude {
                    *reference_speed
                } else {
                    reference_speed * (altitude / reference_altitude).powf(*exponent)
                }
            }
        }
    }
}

/// Atmospheric conditions above a launch site. Altitude arguments are
/// meters above ground level; the launch-site elevation is folded in
/// before the standard-atmosphere lookup.
pub struct Environment {
    pub ground_altitude: f64, // m above sea level
    wind: WindModel,
}

impl Environment {
    pub fn new(ground_altitude: f64, wind: WindModel) -> Self {
        Environment {
            ground_altitude,
            wind,
        }
    }

    /// Air density in kg/m³ from the ideal gas law.
    pub fn density(&self, altitude: f64) -> f64 {
        let (temperature, pressure) = self.conditions_at(altitude);
        if pressure > 0.0 && temperature > 0.0 {
            pressure / (SPECIFIC_GAS_CONSTANT_AIR * temperature)
        } else {
            0.0
        }
    }

    /// Air temperature in K.
    pub fn temperature(&self, altitude: f64) -> f64 {
        self.conditions_at(altitude).0
    }

    /// Horizontal wind speed in m/s.
    pub fn windspeed(&self, altitude: f64) -> f64 {
        self.wind.speed_at(altitude)
    }

    fn conditions_at(&self, altitude: f64) -> (f64, f64) {
        let geometric_altitude = self.ground_altitude + altitude;

        if geometric_altitude < TROPOSPHERE_HEIGHT {
            // Troposphere, standard lapse rate
            let temperature =
                SEA_LEVEL_TEMPERATURE + TROPOSPHERE_TEMP_GRADIENT * geometric_altitude;
            let pressure =
                SEA_LEVEL_PRESSURE * (temperature / SEA_LEVEL_TEMPERATURE).powf(5.255);
            (temperature, pressure)
        } else if geometric_altitude < 47_000.0 {
            // Between 11 km and ~47 km, temperature decreases gradually
            let temperature =
                216.65 + (-2.8 / 1_000.0) * (geometric_altitude - TROPOSPHERE_HEIGHT);
            let pressure =
                22_632.0 * (-0.000_157 * (geometric_altitude - TROPOSPHERE_HEIGHT)).exp();
            (temperature, pressure)
        } else if geometric_altitude < 80_000.0 {
            // 47 km to 80 km, temperature held at 197.65 K
            let pressure = 5_474.89 * (-0.000_157 * (geometric_altitude - 47_000.0)).exp();
            (197.65, pressure)
        } else {
            // Beyond 80 km, near space
            (2.7, 0.0)
        }
    }
}
