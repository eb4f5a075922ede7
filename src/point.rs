use crate::error::{Error, Result};
use itertools::Itertools;
use std::{fmt, str::FromStr};

const DEGREE_SUFFIX: char = '\u{00BA}';
const ALT_DEGREE_SUFFIX: char = '\u{00B0}';

/// A geographic position in decimal degrees.
///
/// Latitude is checked to lie within `[-90, 90]` on construction. Longitude
/// is accepted as any finite value; [`GeodesicPoint::normalized`] wraps it
/// into `(-180, 180]`.
///
/// ```
/// use vincenty_direct::GeodesicPoint;
///
/// let miami: GeodesicPoint = "25.761681, -80.191788".parse().unwrap();
/// assert_eq!(miami.latitude(), 25.761681);
/// assert_eq!(miami.longitude(), -80.191788);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodesicPoint {
    latitude: f64,
    longitude: f64,
}

impl GeodesicPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(Error::NonFinite);
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::InvalidLatitude { value: latitude });
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Same point with its longitude wrapped into `(-180, 180]`.
    pub fn normalized(self) -> Self {
        Self {
            latitude: self.latitude,
            longitude: normalize_degrees(self.longitude),
        }
    }
}

/// Wraps an angle in degrees into `(-180, 180]`.
pub fn normalize_degrees(angle: f64) -> f64 {
    if (-180.0..=180.0).contains(&angle) && angle != -180.0 {
        return angle;
    }

    let wrapped = (angle + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

impl fmt::Display for GeodesicPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.6}{DEGREE_SUFFIX}, {:.6}{DEGREE_SUFFIX}",
            self.latitude, self.longitude
        )
    }
}

impl FromStr for GeodesicPoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidPoint {
            input: s.to_string(),
        };

        let Some((lat, lon)) = s.split(',').collect_tuple() else {
            return Err(invalid());
        };
        let lat = parse_degrees(lat).ok_or_else(invalid)?;
        let lon = parse_degrees(lon).ok_or_else(invalid)?;

        Self::new(lat, lon)
    }
}

impl From<GeodesicPoint> for geo::Point<f64> {
    fn from(point: GeodesicPoint) -> Self {
        geo::Point::new(point.longitude, point.latitude)
    }
}

impl TryFrom<geo::Point<f64>> for GeodesicPoint {
    type Error = Error;

    fn try_from(point: geo::Point<f64>) -> Result<Self> {
        Self::new(point.y(), point.x())
    }
}

/// Parses a decimal degree value, accepting an optional trailing degree sign.
pub(crate) fn parse_degrees(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    let trimmed = trimmed
        .strip_suffix(DEGREE_SUFFIX)
        .or_else(|| trimmed.strip_suffix(ALT_DEGREE_SUFFIX))
        .unwrap_or(trimmed)
        .trim();

    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rejects_out_of_range_latitude() {
        assert_eq!(
            GeodesicPoint::new(90.5, 0.0).unwrap_err(),
            Error::InvalidLatitude { value: 90.5 }
        );
        assert_eq!(
            GeodesicPoint::new(-91.0, 0.0).unwrap_err(),
            Error::InvalidLatitude { value: -91.0 }
        );
        assert!(GeodesicPoint::new(90.0, 0.0).is_ok());
        assert!(GeodesicPoint::new(-90.0, 0.0).is_ok());
    }

    #[test]
    fn rejects_non_finite() {
        assert_eq!(
            GeodesicPoint::new(f64::NAN, 0.0).unwrap_err(),
            Error::NonFinite
        );
        assert_eq!(
            GeodesicPoint::new(0.0, f64::INFINITY).unwrap_err(),
            Error::NonFinite
        );
    }

    #[test]
    fn longitude_is_not_constrained_on_input() {
        let point = GeodesicPoint::new(10.0, 540.0).unwrap();
        assert_eq!(point.longitude(), 540.0);
        assert_eq!(point.normalized().longitude(), 180.0);
    }

    #[test]
    fn normalize() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(180.0), 180.0);
        assert_eq!(normalize_degrees(-180.0), 180.0);
        assert_eq!(normalize_degrees(190.0), -170.0);
        assert_eq!(normalize_degrees(-190.0), 170.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-540.0), 180.0);
        assert_eq!(normalize_degrees(306.5), -53.5);
    }

    #[test]
    fn parse_and_display() {
        let point: GeodesicPoint = "25.761681, -80.191788".parse().unwrap();
        assert_eq!(point, GeodesicPoint::new(25.761681, -80.191788).unwrap());
        assert_eq!(point.to_string(), "25.761681º, -80.191788º");

        let with_suffix: GeodesicPoint = " 25.761681° , -80.191788º ".parse().unwrap();
        assert_eq!(with_suffix, point);

        assert_eq!(point.to_string().parse::<GeodesicPoint>().unwrap(), point);
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(matches!(
            "25.76".parse::<GeodesicPoint>(),
            Err(Error::InvalidPoint { .. })
        ));
        assert!(matches!(
            "25.76, -80.19, 3".parse::<GeodesicPoint>(),
            Err(Error::InvalidPoint { .. })
        ));
        assert!(matches!(
            "north, west".parse::<GeodesicPoint>(),
            Err(Error::InvalidPoint { .. })
        ));
        assert_eq!(
            "95, 0".parse::<GeodesicPoint>().unwrap_err(),
            Error::InvalidLatitude { value: 95.0 }
        );
    }

    #[test]
    fn geo_point_interop() {
        let point = GeodesicPoint::new(39.603480, -84.151764).unwrap();
        let geo_point: geo::Point<f64> = point.into();
        assert_eq!(geo_point.x(), -84.151764);
        assert_eq!(geo_point.y(), 39.603480);

        assert_eq!(GeodesicPoint::try_from(geo_point).unwrap(), point);
        assert!(GeodesicPoint::try_from(geo::Point::new(0.0, 100.0)).is_err());
    }
}
