use crate::error::{Error, Result};
use std::{fmt, str::FromStr};

/// Distance units accepted at the call boundary.
///
/// The solver itself works in meters only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DistanceUnit {
    Miles,
    Kilometers,
    Meters,
    Feet,
    /// No unit given, the value is taken as meters.
    #[default]
    Unspecified,
}

impl DistanceUnit {
    /// Resolves an optional unit tag; a missing tag means meters.
    pub fn from_tag(tag: Option<&str>) -> Result<Self> {
        match tag {
            None => Ok(Self::Unspecified),
            Some(tag) => tag.parse(),
        }
    }

    pub const fn meters_per_unit(self) -> f64 {
        match self {
            Self::Miles => 1609.34,
            Self::Kilometers => 1000.0,
            Self::Feet => 0.3048,
            Self::Meters | Self::Unspecified => 1.0,
        }
    }
}

impl FromStr for DistanceUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "miles" => Ok(Self::Miles),
            "kilometers" => Ok(Self::Kilometers),
            "meters" => Ok(Self::Meters),
            "feet" => Ok(Self::Feet),
            _ => Err(Error::InvalidUnit { tag: s.to_string() }),
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::Miles => "miles",
            Self::Kilometers => "kilometers",
            Self::Meters | Self::Unspecified => "meters",
            Self::Feet => "feet",
        };
        f.write_str(tag)
    }
}

/// A distance expressed in some [`DistanceUnit`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distance {
    pub value: f64,
    pub unit: DistanceUnit,
}

impl Distance {
    pub const fn new(value: f64, unit: DistanceUnit) -> Self {
        Self { value, unit }
    }

    pub const fn meters(value: f64) -> Self {
        Self::new(value, DistanceUnit::Meters)
    }

    /// Builds a distance from a value and an optional unit tag.
    pub fn from_tag(value: f64, tag: Option<&str>) -> Result<Self> {
        Ok(Self::new(value, DistanceUnit::from_tag(tag)?))
    }

    pub fn to_meters(self) -> f64 {
        self.value * self.unit.meters_per_unit()
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}
