use std::cmp::Ordering;
use std::fmt;

use serde::Deserialize;

/// Length units accepted at the configuration and display boundaries.
/// Internally every measurement is stored in meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Unit {
    Millimeters,
    Centimeters,
    Inches,
    Feet,
    Meters,
    Kilometers,
    Miles,
}

impl Unit {
    pub fn meters_per_unit(&self) -> f64 {
        match self {
            Unit::Millimeters => 0.001,
            Unit::Centimeters => 0.01,
            Unit::Inches => 0.0254,
            Unit::Feet => 0.3048,
            Unit::Meters => 1.0,
            Unit::Kilometers => 1_000.0,
            Unit::Miles => 1_609.344,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Millimeters => "mm",
            Unit::Centimeters => "cm",
            Unit::Inches => "in",
            Unit::Feet => "ft",
            Unit::Meters => "m",
            Unit::Kilometers => "km",
            Unit::Miles => "mi",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
}

impl TimeUnit {
    pub fn seconds_per_unit(&self) -> f64 {
        match self {
            TimeUnit::Second => 1.0,
            TimeUnit::Minute => 60.0,
            TimeUnit::Hour => 3_600.0,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TimeUnit::Second => "s",
            TimeUnit::Minute => "min",
            TimeUnit::Hour => "h",
        }
    }
}

/// Unit-tagged scalar length. The canonical magnitude is always meters;
/// the preferred display unit is carried separately and only affects
/// rendering and `value()`.
#[derive(Debug, Clone, Copy)]
pub struct Measurement {
    meters: f64,
    display_unit: Unit,
}

impl Measurement {
    pub fn new(value: f64, unit: Unit) -> Self {
        Measurement {
            meters: value * unit.meters_per_unit(),
            display_unit: unit,
        }
    }

    pub fn from_meters(meters: f64) -> Self {
        Measurement {
            meters,
            display_unit: Unit::Meters,
        }
    }

    pub fn meters(&self) -> f64 {
        self.meters
    }

    pub fn to(&self, unit: Unit) -> f64 {
        self.meters / unit.meters_per_unit()
    }

    /// Magnitude in the preferred display unit.
    pub fn value(&self) -> f64 {
        self.to(self.display_unit)
    }

    pub fn display_unit(&self) -> Unit {
        self.display_unit
    }

    /// Changes the preferred display unit without changing the magnitude.
    pub fn set_unit(self, unit: Unit) -> Self {
        Measurement {
            meters: self.meters,
            display_unit: unit,
        }
    }

    pub fn add(&self, other: &Measurement) -> Measurement {
        Measurement {
            meters: self.meters + other.meters,
            display_unit: self.display_unit,
        }
    }

    pub fn subtract(&self, other: &Measurement) -> Measurement {
        Measurement {
            meters: self.meters - other.meters,
            display_unit: self.display_unit,
        }
    }

    pub fn scale(&self, factor: f64) -> Measurement {
        Measurement {
            meters: self.meters * factor,
            display_unit: self.display_unit,
        }
    }

    /// Ratio of two lengths, dimensionless.
    pub fn divide_by(&self, other: &Measurement) -> f64 {
        self.meters / other.meters
    }

    /// Turns this length into a rate over the given time unit, keeping
    /// the preferred length unit for display.
    pub fn per(&self, time_unit: TimeUnit) -> Velocity {
        Velocity {
            meters_per_second: self.meters / time_unit.seconds_per_unit(),
            length_unit: self.display_unit,
            time_unit,
        }
    }
}

impl PartialEq for Measurement {
    fn eq(&self, other: &Self) -> bool {
        self.meters == other.meters
    }
}

impl PartialOrd for Measurement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.meters.partial_cmp(&other.meters)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.value(), self.display_unit.symbol())
    }
}

/// A length per time unit. Canonical magnitude is m/s.
#[derive(Debug, Clone, Copy)]
pub struct Velocity {
    meters_per_second: f64,
    length_unit: Unit,
    time_unit: TimeUnit,
}

impl Velocity {
    pub fn new(meters_per_second: f64) -> Self {
        Velocity {
            meters_per_second,
            length_unit: Unit::Meters,
            time_unit: TimeUnit::Second,
        }
    }

    pub fn meters_per_second(&self) -> f64 {
        self.meters_per_second
    }

    pub fn to(&self, length_unit: Unit, time_unit: TimeUnit) -> f64 {
        self.meters_per_second * time_unit.seconds_per_unit() / length_unit.meters_per_unit()
    }

    pub fn set_units(self, length_unit: Unit, time_unit: TimeUnit) -> Self {
        Velocity {
            meters_per_second: self.meters_per_second,
            length_unit,
            time_unit,
        }
    }

    pub fn scale(&self, factor: f64) -> Velocity {
        Velocity {
            meters_per_second: self.meters_per_second * factor,
            length_unit: self.length_unit,
            time_unit: self.time_unit,
        }
    }
}

impl PartialEq for Velocity {
    fn eq(&self, other: &Self) -> bool {
        self.meters_per_second == other.meters_per_second
    }
}

impl PartialOrd for Velocity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.meters_per_second.partial_cmp(&other.meters_per_second)
    }
}

impl fmt::Display for Velocity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2} {}/{}",
            self.to(self.length_unit, self.time_unit),
            self.length_unit.symbol(),
            self.time_unit.symbol()
        )
    }
}
