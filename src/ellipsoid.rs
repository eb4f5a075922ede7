use crate::error::{Error, Result};
use std::str::FromStr;

/// Largest accepted gap between the given flattening and `(a - b) / a`.
///
/// The customary WGS-84 triple rounds `b` to 0.1 mm, which puts it about
/// 7e-12 away from the exact value.
const FLATTENING_TOLERANCE: f64 = 1e-9;

/// Ellipsoid of revolution described by its semi-major axis `a`, semi-minor
/// axis `b` (both in meters) and flattening `f = (a - b) / a`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    a: f64,
    b: f64,
    f: f64,
}

impl Ellipsoid {
    /// WGS-84, with the semi-minor axis rounded to 0.1 mm.
    pub const WGS84: Self = Self {
        a: 6378137.0,
        b: 6356752.3142,
        f: 1.0 / 298.257223563,
    };

    pub const GRS80: Self = Self {
        a: 6378137.0,
        b: 6356752.3141,
        f: 1.0 / 298.257222101,
    };

    /// International 1924 (Hayford).
    pub const INTERNATIONAL: Self = Self {
        a: 6378388.0,
        b: 6356911.946,
        f: 1.0 / 297.0,
    };

    pub const CLARKE_1866: Self = Self {
        a: 6378206.4,
        b: 6356583.8,
        f: 1.0 / 294.9786982,
    };

    pub fn new(a: f64, b: f64, f: f64) -> Result<Self> {
        let degenerate = Error::DegenerateEllipsoid { a, b, f };

        if !(a.is_finite() && b.is_finite() && f.is_finite()) {
            return Err(degenerate);
        }
        if a <= 0.0 || b <= 0.0 || b > a {
            return Err(degenerate);
        }
        if (f - (a - b) / a).abs() > FLATTENING_TOLERANCE {
            return Err(degenerate);
        }

        Ok(Self { a, b, f })
    }

    /// Builds an ellipsoid from its two axes, deriving the flattening.
    pub fn from_axes(a: f64, b: f64) -> Result<Self> {
        Self::new(a, b, (a - b) / a)
    }

    /// Builds an ellipsoid from the semi-major axis and the inverse
    /// flattening `1/f`, deriving the semi-minor axis.
    pub fn from_inverse_flattening(a: f64, inverse_flattening: f64) -> Result<Self> {
        let f = 1.0 / inverse_flattening;
        Self::new(a, a * (1.0 - f), f)
    }

    pub const fn semi_major_axis(&self) -> f64 {
        self.a
    }

    pub const fn semi_minor_axis(&self) -> f64 {
        self.b
    }

    pub const fn flattening(&self) -> f64 {
        self.f
    }

    /// Second eccentricity squared, `(a² - b²) / b²`.
    pub fn second_eccentricity_squared(&self) -> f64 {
        (self.a * self.a - self.b * self.b) / (self.b * self.b)
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::WGS84
    }
}

impl FromStr for Ellipsoid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wgs84" | "wgs-84" => Ok(Self::WGS84),
            "grs80" => Ok(Self::GRS80),
            "intl" | "international" => Ok(Self::INTERNATIONAL),
            "clrk66" | "clarke1866" => Ok(Self::CLARKE_1866),
            _ => Err(Error::UnknownEllipsoid {
                name: s.to_string(),
            }),
        }
    }
}
