//! Destination point on an ellipsoid from a start point, a distance and an
//! initial bearing, using Vincenty's direct formula.
//!
//! ```
//! use vincenty_direct::{solve, DirectRequest, GeodesicPoint};
//!
//! let start = GeodesicPoint::new(25.761681, -80.191788).unwrap();
//! let result = solve(&DirectRequest::new(start, 50_000.0, 145.0)).unwrap();
//!
//! assert!(result.destination.latitude() < start.latitude());
//! assert!(result.destination.longitude() > start.longitude());
//! ```

pub mod bearing;
pub mod direct;
pub mod ellipsoid;
pub mod error;
pub mod point;
pub mod units;

pub use bearing::Bearing;
pub use direct::{back_azimuth, destination, solve, DirectRequest, DirectResult, VincentyDirect};
pub use ellipsoid::Ellipsoid;
pub use error::{Error, Result};
pub use point::GeodesicPoint;
pub use units::{Distance, DistanceUnit};
