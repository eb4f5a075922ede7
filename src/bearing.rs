use crate::{
    error::{Error, Result},
    point::parse_degrees,
};
use itertools::Itertools;
use std::{fmt, str::FromStr};

/// Meridian a quadrant bearing is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceDir {
    N,
    S,
}

impl FromStr for FaceDir {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "N" => Ok(FaceDir::N),
            "S" => Ok(FaceDir::S),
            _ => Err(Error::InvalidBearing {
                input: s.to_string(),
            }),
        }
    }
}

/// Side of the meridian a quadrant bearing turns towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDir {
    E,
    W,
}

impl FromStr for TurnDir {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "E" => Ok(TurnDir::E),
            "W" => Ok(TurnDir::W),
            _ => Err(Error::InvalidBearing {
                input: s.to_string(),
            }),
        }
    }
}

/// Initial azimuth in decimal degrees, clockwise from true north.
///
/// Parses either a plain decimal value (`"145"`, `"-35.5°"`) or surveyor
/// quadrant notation `<N|S> <deg> <min> <sec> <E|W>`:
///
/// ```
/// use vincenty_direct::Bearing;
///
/// let quadrant: Bearing = "S 35 00 00 E".parse().unwrap();
/// assert_eq!(quadrant.degrees(), 145.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bearing(f64);

impl Bearing {
    pub fn from_degrees(degrees: f64) -> Result<Self> {
        if !degrees.is_finite() {
            return Err(Error::NonFinite);
        }
        Ok(Self(degrees))
    }

    /// Converts `<face> <deg>° <min>′ <sec>″ <turn>` to an azimuth in `[0, 360)`.
    pub fn from_quadrant(face: FaceDir, deg: f64, min: f64, sec: f64, turn: TurnDir) -> Self {
        let angle = deg + min / 60.0 + sec / 3600.0;

        let mut az = match (face, turn) {
            (FaceDir::N, TurnDir::E) => 0.0 + angle,
            (FaceDir::N, TurnDir::W) => 0.0 - angle,
            (FaceDir::S, TurnDir::E) => 180.0 - angle,
            (FaceDir::S, TurnDir::W) => 180.0 + angle,
        };

        if az < 0.0 {
            az += 360.0;
        }

        Self(az)
    }

    pub const fn degrees(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Bearing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\u{00B0}", self.0)
    }
}

impl FromStr for Bearing {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidBearing {
            input: s.to_string(),
        };

        if let Some(degrees) = parse_degrees(s) {
            return Self::from_degrees(degrees);
        }

        // Example: S 78 03 13 E
        let Some((face, deg, min, sec, turn)) = s.split_whitespace().collect_tuple() else {
            return Err(invalid());
        };

        let face = face.parse::<FaceDir>().map_err(|_| invalid())?;
        let turn = turn.parse::<TurnDir>().map_err(|_| invalid())?;
        let parse_part = |part: &str| {
            part.parse::<f64>()
                .ok()
                .filter(|value| value.is_finite() && *value >= 0.0)
                .ok_or_else(invalid)
        };
        let deg = parse_part(deg)?;
        let min = parse_part(min)?;
        let sec = parse_part(sec)?;
        if deg > 90.0 || min >= 60.0 || sec >= 60.0 {
            return Err(invalid());
        }

        Ok(Self::from_quadrant(face, deg, min, sec, turn))
    }
}
