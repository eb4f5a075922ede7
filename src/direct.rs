//! Vincenty's direct geodesic solution.
//!
//! Given a starting point, an initial azimuth and a distance along the
//! ellipsoid surface, find the destination point and the azimuth of the
//! geodesic when it gets there.
//!
//! [Wikipedia Vincenty formulae](https://en.wikipedia.org/wiki/Vincenty%27s_formulae)

use crate::{
    bearing::Bearing,
    ellipsoid::Ellipsoid,
    error::{Error, Result},
    point::{normalize_degrees, GeodesicPoint},
    units::Distance,
};
use tracing::{debug, trace};

/// Inputs of a single direct computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectRequest {
    pub start: GeodesicPoint,
    /// Meters along the geodesic.
    pub distance: f64,
    /// Initial azimuth in degrees, clockwise from north. Taken modulo 360.
    pub bearing: f64,
    pub ellipsoid: Ellipsoid,
}

impl DirectRequest {
    /// Request on the WGS-84 ellipsoid.
    pub fn new(start: GeodesicPoint, distance: f64, bearing: f64) -> Self {
        Self {
            start,
            distance,
            bearing,
            ellipsoid: Ellipsoid::default(),
        }
    }

    pub fn with_ellipsoid(mut self, ellipsoid: Ellipsoid) -> Self {
        self.ellipsoid = ellipsoid;
        self
    }
}

/// Outcome of a direct computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectResult {
    /// Destination, longitude in `(-180, 180]`.
    pub destination: GeodesicPoint,
    /// Azimuth of the geodesic at the destination, in `(-180, 180]`.
    ///
    /// Travelling back along the same geodesic starts at
    /// `reverse_azimuth + 180`.
    pub reverse_azimuth: f64,
    /// Refinement steps taken by the convergence loop.
    pub iterations: usize,
}

/// Vincenty direct solver, parametrized with its convergence tolerance and
/// the maximum number of refinement steps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VincentyDirect {
    /// Absolute change of `sigma` (radians) under which the loop stops.
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for VincentyDirect {
    fn default() -> Self {
        Self {
            tolerance: 1e-12,
            max_iterations: 200,
        }
    }
}

impl VincentyDirect {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn solve(&self, request: &DirectRequest) -> Result<DirectResult> {
        let s = request.distance;
        if !s.is_finite() || s < 0.0 {
            return Err(Error::InvalidDistance { value: s });
        }
        if !request.bearing.is_finite() {
            return Err(Error::NonFinite);
        }

        let start = request.start;
        if s == 0.0 {
            return Ok(DirectResult {
                destination: start.normalized(),
                reverse_azimuth: normalize_degrees(request.bearing),
                iterations: 0,
            });
        }

        let b = request.ellipsoid.semi_minor_axis();
        let f = request.ellipsoid.flattening();

        let alpha1 = request.bearing.to_radians();
        let (sin_alpha1, cos_alpha1) = alpha1.sin_cos();

        // u = 'reduced latitude'
        let tan_u1 = (1.0 - f) * start.latitude().to_radians().tan();
        let cos_u1 = 1.0 / (1.0 + tan_u1 * tan_u1).sqrt();
        let sin_u1 = tan_u1 * cos_u1;

        // angular distance on the sphere from the equator to the start
        let sigma1 = tan_u1.atan2(cos_alpha1);
        let sin_alpha = cos_u1 * sin_alpha1;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;

        let u_sq = cos_sq_alpha * request.ellipsoid.second_eccentricity_squared();
        let cap_a =
            1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
        let cap_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));

        let sigma0 = s / (b * cap_a);
        let mut sigma = sigma0;
        let mut iterations = 0;
        let mut last_delta = f64::INFINITY;

        let (sin_sigma, cos_sigma, cos2_sigma_m) = loop {
            if iterations >= self.max_iterations {
                debug!(iterations, last_delta, "vincenty direct did not converge");
                return Err(Error::NonConvergence {
                    iterations,
                    last_delta,
                });
            }

            let cos2_sigma_m = (2.0 * sigma1 + sigma).cos();
            let (sin_sigma, cos_sigma) = sigma.sin_cos();
            let delta_sigma = cap_b
                * sin_sigma
                * (cos2_sigma_m
                    + cap_b / 4.0
                        * (cos_sigma * (-1.0 + 2.0 * cos2_sigma_m * cos2_sigma_m)
                            - cap_b / 6.0
                                * cos2_sigma_m
                                * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                                * (-3.0 + 4.0 * cos2_sigma_m * cos2_sigma_m)));

            let sigma_prime = sigma;
            sigma = sigma0 + delta_sigma;
            iterations += 1;

            last_delta = (sigma - sigma_prime).abs();
            trace!(iterations, sigma, last_delta, "refining sigma");

            // leave the loop if it has converged
            if last_delta <= self.tolerance {
                break (sin_sigma, cos_sigma, cos2_sigma_m);
            }

            // a NaN delta never settles
            if last_delta.is_nan() {
                debug!(iterations, "vincenty direct produced a NaN sigma");
                return Err(Error::NonConvergence {
                    iterations,
                    last_delta,
                });
            }
        };

        debug!(iterations, sigma, "vincenty direct converged");

        let tmp = sin_u1 * sin_sigma - cos_u1 * cos_sigma * cos_alpha1;
        let lat2 = (sin_u1 * cos_sigma + cos_u1 * sin_sigma * cos_alpha1)
            .atan2((1.0 - f) * (sin_alpha * sin_alpha + tmp * tmp).sqrt());
        let lambda =
            (sin_sigma * sin_alpha1).atan2(cos_u1 * cos_sigma - sin_u1 * sin_sigma * cos_alpha1);
        let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
        let l = lambda
            - (1.0 - c)
                * f
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos2_sigma_m
                            + c * cos_sigma * (-1.0 + 2.0 * cos2_sigma_m * cos2_sigma_m)));
        let rev_az = sin_alpha.atan2(-tmp);

        let latitude = lat2.to_degrees();
        let longitude = normalize_degrees(start.longitude() + l.to_degrees());
        if !latitude.is_finite() || !longitude.is_finite() || !rev_az.is_finite() {
            return Err(Error::NonFinite);
        }

        Ok(DirectResult {
            destination: GeodesicPoint::new(latitude.clamp(-90.0, 90.0), longitude)?,
            reverse_azimuth: normalize_degrees(rev_az.to_degrees()),
            iterations,
        })
    }
}

/// Solves `request` with the default tolerance and iteration cap.
pub fn solve(request: &DirectRequest) -> Result<DirectResult> {
    VincentyDirect::default().solve(request)
}

/// Destination reached from `start` after `distance` (in the unit named by
/// `units`, meters when `None`) on the initial `bearing`, on WGS-84.
///
/// # Example
///
/// ```
/// use vincenty_direct::{destination, GeodesicPoint};
///
/// let start = GeodesicPoint::new(39.984, -75.343).unwrap();
/// let result = destination(start, 50.0, Some("miles"), 90.0).unwrap();
///
/// assert!(result.destination.longitude() > start.longitude());
/// ```
pub fn destination(
    start: GeodesicPoint,
    distance: f64,
    units: Option<&str>,
    bearing: f64,
) -> Result<DirectResult> {
    let meters = Distance::from_tag(distance, units)?.to_meters();
    let bearing = Bearing::from_degrees(bearing)?;
    solve(&DirectRequest::new(start, meters, bearing.degrees()))
}

/// Azimuth, in `(-180, 180]`, for the trip back along the same geodesic.
pub fn back_azimuth(reverse_azimuth: f64) -> f64 {
    normalize_degrees(reverse_azimuth + 180.0)
}
