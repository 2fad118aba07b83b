//! # Constants and type definitions for rovpos
//!
//! This module centralizes the **physical constants**, **reference ellipsoid
//! parameters**, and **common type definitions** used throughout the `rovpos`
//! library.
//!
//! ## Overview
//!
//! - WGS84 reference ellipsoid parameters
//! - Sound-velocity depth-correction constants
//! - Core type aliases used across the crate
//!
//! These definitions are used by all main modules, including the coordinate
//! transforms, the SVP table, and the positioning engine.

// -------------------------------------------------------------------------------------------------
// Reference ellipsoid (WGS84)
// -------------------------------------------------------------------------------------------------

/// Earth equatorial radius in meters (WGS84 semi-major axis)
pub const EARTH_MAJOR_AXIS: f64 = 6_378_137.0;

/// WGS84 flattening
pub const EARTH_FLATTENING: f64 = 1.0 / 298.257_223_563;

/// Earth polar radius in meters (WGS84 semi-minor axis, derived)
pub const EARTH_MINOR_AXIS: f64 = EARTH_MAJOR_AXIS * (1.0 - EARTH_FLATTENING);

// -------------------------------------------------------------------------------------------------
// Sound velocity correction
// -------------------------------------------------------------------------------------------------

/// Reference sound velocity in sea water, in m/s.
///
/// A measured depth is assumed to have been derived from acoustic travel time
/// at this nominal velocity; deviations of the profile velocity from this
/// value drive the depth correction.
pub const SVP_REFERENCE_VELOCITY: f64 = 1500.0;

/// Depth correction gain, in meters of depth per (m/s) of velocity deviation.
pub const SVP_CORRECTION_FACTOR: f64 = 0.01;

// -------------------------------------------------------------------------------------------------
// Numerical tolerances
// -------------------------------------------------------------------------------------------------

/// Numerical epsilon used for floating-point comparisons
pub const EPS: f64 = 1e-6;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in meters
pub type Meter = f64;
/// Velocity in meters per second
pub type MeterPerSecond = f64;
