use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("unknown distance unit '{tag}', expected miles, kilometers, meters or feet")]
    InvalidUnit { tag: String },
    #[error("direct solution did not converge after {iterations} iterations (last delta {last_delta:e} rad)")]
    NonConvergence { iterations: usize, last_delta: f64 },
    #[error("degenerate ellipsoid: a = {a}, b = {b}, f = {f}")]
    DegenerateEllipsoid { a: f64, b: f64, f: f64 },
    #[error("unknown ellipsoid '{name}'")]
    UnknownEllipsoid { name: String },
    #[error("latitude out of range [-90, 90]: {value}")]
    InvalidLatitude { value: f64 },
    #[error("distance must be finite and non-negative, got {value}")]
    InvalidDistance { value: f64 },
    #[error("invalid bearing '{input}'")]
    InvalidBearing { input: String },
    #[error("invalid point '{input}', expected `<latitude>, <longitude>`")]
    InvalidPoint { input: String },
    #[error("input is not a finite number")]
    NonFinite,
}

pub type Result<T> = std::result::Result<T, Error>;
