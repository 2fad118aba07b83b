//! # Geodetic ↔ ECEF coordinate transforms
//!
//! This module defines the two position value types used across the crate and
//! the [`ReferenceEllipsoid`] that converts between them:
//!
//! - [`GeodeticPosition`] – latitude/longitude/altitude referenced to the
//!   ellipsoid (degrees, degrees, meters).
//! - [`EcefPosition`] – Earth-Centered-Earth-Fixed Cartesian coordinates
//!   (meters).
//! - [`ReferenceEllipsoid`] – a fixed ellipsoidal Earth model, with the
//!   [`WGS84`] instance used by default throughout the crate.
//!
//! ## Conventions
//!
//! - Latitude: **degrees**, positive north, in `[-90, 90]`.
//! - Longitude: **degrees**, positive east, in `[-180, 180]`.
//! - Altitude: **meters** above the ellipsoid, signed, positive up.
//!
//! The forward transform is the closed form through the prime-vertical radius
//! of curvature; the inverse uses Bowring's parametric-latitude method with a
//! short fixed-point refinement, accurate to sub-millimeter level for
//! terrestrial points. Behavior for points near the Earth's center is
//! **undefined** (the parametric latitude degenerates there).
//!
//! ## Round-trip invariant
//!
//! For any valid input, `ecef_to_geodetic(geodetic_to_ecef(p))` reproduces `p`
//! within 1e-6 degrees in latitude/longitude and 1e-3 m in altitude.

use nalgebra::Vector3;

use crate::constants::{Degree, Meter, EARTH_FLATTENING, EARTH_MAJOR_AXIS};
use crate::rovpos_errors::RovposError;

/// A geodetic position referenced to an ellipsoidal Earth model.
///
/// Immutable value type. Use [`GeodeticPosition::new`] when the components
/// come from an external caller (it validates finiteness and ranges); the
/// fields are public for positions produced by the transforms themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodeticPosition {
    /// Latitude in **degrees**, positive north.
    pub latitude: Degree,

    /// Longitude in **degrees**, positive east.
    pub longitude: Degree,

    /// Height above the reference ellipsoid in **meters**, positive up.
    pub altitude: Meter,
}

impl GeodeticPosition {
    /// Create a geodetic position from caller-supplied components.
    ///
    /// Arguments
    /// -----------------
    /// * `latitude`: Latitude in **degrees**, must be finite and in `[-90, 90]`.
    /// * `longitude`: Longitude in **degrees**, must be finite and in `[-180, 180]`.
    /// * `altitude`: Height above the ellipsoid in **meters**, must be finite
    ///   but is otherwise unconstrained.
    ///
    /// Return
    /// ----------
    /// * The validated position.
    ///
    /// Errors
    /// ----------
    /// * [`RovposError::NonFiniteInput`] if any component is NaN or infinite.
    /// * [`RovposError::LatitudeOutOfRange`] / [`RovposError::LongitudeOutOfRange`]
    ///   if an angle is outside its valid range.
    pub fn new(
        latitude: Degree,
        longitude: Degree,
        altitude: Meter,
    ) -> Result<GeodeticPosition, RovposError> {
        for (name, value) in [
            ("latitude", latitude),
            ("longitude", longitude),
            ("altitude", altitude),
        ] {
            if !value.is_finite() {
                return Err(RovposError::NonFiniteInput { name, value });
            }
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(RovposError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(RovposError::LongitudeOutOfRange(longitude));
        }

        Ok(GeodeticPosition {
            latitude,
            longitude,
            altitude,
        })
    }
}

/// An Earth-Centered-Earth-Fixed Cartesian position, in **meters**.
///
/// Immutable value type, derived from a [`GeodeticPosition`] through a
/// [`ReferenceEllipsoid`]. The origin is the Earth's center of mass, the
/// z-axis the polar axis, the x-axis the intersection of the equator with the
/// prime meridian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EcefPosition {
    pub x: Meter,
    pub y: Meter,
    pub z: Meter,
}

impl EcefPosition {
    /// View the position as a nalgebra column vector.
    pub fn as_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Build a position from a nalgebra column vector.
    pub fn from_vector(v: Vector3<f64>) -> EcefPosition {
        EcefPosition {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

/// A fixed ellipsoidal Earth model with precomputed derived quantities.
///
/// The crate always operates against a single ellipsoid instance, normally
/// [`WGS84`]; the engine takes the ellipsoid as an explicit value so tests can
/// substitute alternative parameters.
///
/// Units
/// -----
/// * `semi_major_axis`, `semi_minor_axis`: **meters**.
/// * `flattening`, `eccentricity_squared`, `second_eccentricity_squared`:
///   dimensionless.
///
/// See also
/// ------------
/// * [`ReferenceEllipsoid::geodetic_to_ecef`] – forward transform.
/// * [`ReferenceEllipsoid::ecef_to_geodetic`] – inverse transform (Bowring).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceEllipsoid {
    /// Equatorial radius `a` in **meters**.
    pub semi_major_axis: Meter,

    /// Polar radius `b = a(1 - f)` in **meters**.
    pub semi_minor_axis: Meter,

    /// Flattening `f`.
    pub flattening: f64,

    /// First eccentricity squared `e² = f(2 - f)`.
    pub eccentricity_squared: f64,

    /// Second eccentricity squared `e'² = e² / (1 - e²)`.
    pub second_eccentricity_squared: f64,
}

/// The WGS84 reference ellipsoid used by default throughout the crate.
pub const WGS84: ReferenceEllipsoid =
    ReferenceEllipsoid::new(EARTH_MAJOR_AXIS, EARTH_FLATTENING);

impl ReferenceEllipsoid {
    /// Build an ellipsoid from its semi-major axis and flattening, deriving
    /// the semi-minor axis and both eccentricities.
    pub const fn new(semi_major_axis: Meter, flattening: f64) -> ReferenceEllipsoid {
        let semi_minor_axis = semi_major_axis * (1.0 - flattening);
        let eccentricity_squared = flattening * (2.0 - flattening);
        let second_eccentricity_squared = eccentricity_squared / (1.0 - eccentricity_squared);
        ReferenceEllipsoid {
            semi_major_axis,
            semi_minor_axis,
            flattening,
            eccentricity_squared,
            second_eccentricity_squared,
        }
    }

    /// Convert a geodetic position to ECEF Cartesian coordinates.
    ///
    /// Closed form through the prime-vertical radius of curvature
    /// `N = a / sqrt(1 - e²·sin²φ)`:
    ///
    /// ```text
    /// x = (N + h)·cosφ·cosλ
    /// y = (N + h)·cosφ·sinλ
    /// z = (N·(1 - e²) + h)·sinφ
    /// ```
    ///
    /// Arguments
    /// -----------------
    /// * `position`: The geodetic position to convert.
    ///
    /// Return
    /// ----------
    /// * The equivalent ECEF position in **meters**.
    ///
    /// See also
    /// ------------
    /// * [`ReferenceEllipsoid::ecef_to_geodetic`] – the inverse transform.
    pub fn geodetic_to_ecef(&self, position: &GeodeticPosition) -> EcefPosition {
        let lat = position.latitude.to_radians();
        let lon = position.longitude.to_radians();
        let (sin_lat, cos_lat) = lat.sin_cos();
        let (sin_lon, cos_lon) = lon.sin_cos();

        let prime_vertical =
            self.semi_major_axis / (1.0 - self.eccentricity_squared * sin_lat * sin_lat).sqrt();

        EcefPosition {
            x: (prime_vertical + position.altitude) * cos_lat * cos_lon,
            y: (prime_vertical + position.altitude) * cos_lat * sin_lon,
            z: (prime_vertical * (1.0 - self.eccentricity_squared) + position.altitude) * sin_lat,
        }
    }

    /// Convert an ECEF Cartesian position back to geodetic coordinates.
    ///
    /// Bowring's method: an initial parametric latitude
    /// `θ = atan2(z·a, p·b)` seeds the geodetic latitude
    ///
    /// ```text
    /// φ = atan2(z + e'²·b·sin³θ, p - e²·a·cos³θ)
    /// ```
    ///
    /// and θ is re-derived from φ for one refinement pass, which keeps the
    /// result below millimeter error for any terrestrial altitude. Longitude
    /// is exact (`atan2(y, x)`); altitude comes from the prime-vertical
    /// radius, with a polar-axis branch when the equatorial distance `p`
    /// vanishes.
    ///
    /// Arguments
    /// -----------------
    /// * `position`: The ECEF position to convert, in **meters**.
    ///
    /// Return
    /// ----------
    /// * The equivalent geodetic position (degrees, degrees, meters).
    ///
    /// Remarks
    /// -------
    /// * Points close to the Earth's center have no meaningful geodetic
    ///   representation; the result there is undefined rather than guarded.
    ///
    /// See also
    /// ------------
    /// * [`ReferenceEllipsoid::geodetic_to_ecef`] – the forward transform.
    pub fn ecef_to_geodetic(&self, position: &EcefPosition) -> GeodeticPosition {
        let (x, y, z) = (position.x, position.y, position.z);
        let longitude = y.atan2(x);

        // Distance from the polar axis.
        let p = x.hypot(y);

        let theta = (z * self.semi_major_axis).atan2(p * self.semi_minor_axis);
        let mut latitude = self.bowring_latitude(p, z, theta);

        // One refinement pass: re-derive the parametric latitude from the
        // first estimate and solve again.
        let refined_theta =
            ((self.semi_minor_axis / self.semi_major_axis) * latitude.tan()).atan();
        latitude = self.bowring_latitude(p, z, refined_theta);

        let sin_lat = latitude.sin();
        let prime_vertical =
            self.semi_major_axis / (1.0 - self.eccentricity_squared * sin_lat * sin_lat).sqrt();

        // Near the poles p/cosφ degenerates; fall back to the polar radius.
        let altitude = if p > 1.0 {
            p / latitude.cos() - prime_vertical
        } else {
            z.abs() - self.semi_minor_axis
        };

        GeodeticPosition {
            latitude: latitude.to_degrees(),
            longitude: longitude.to_degrees(),
            altitude,
        }
    }

    /// Bowring's geodetic-latitude estimate from a parametric latitude θ.
    fn bowring_latitude(&self, p: f64, z: f64, theta: f64) -> f64 {
        let (sin_theta, cos_theta) = theta.sin_cos();
        (z + self.second_eccentricity_squared * self.semi_minor_axis * sin_theta.powi(3)).atan2(
            p - self.eccentricity_squared * self.semi_major_axis * cos_theta.powi(3),
        )
    }
}

#[cfg(test)]
mod coordinates_tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;

    fn roundtrip(latitude: f64, longitude: f64, altitude: f64) {
        let p = GeodeticPosition::new(latitude, longitude, altitude).unwrap();
        let back = WGS84.ecef_to_geodetic(&WGS84.geodetic_to_ecef(&p));
        assert_abs_diff_eq!(back.latitude, p.latitude, epsilon = 1e-6);
        assert_abs_diff_eq!(back.longitude, p.longitude, epsilon = 1e-6);
        assert_abs_diff_eq!(back.altitude, p.altitude, epsilon = 1e-3);
    }

    #[test]
    fn test_wgs84_derived_parameters() {
        assert_relative_eq!(WGS84.semi_minor_axis, 6_356_752.314_245_179, epsilon = 1e-6);
        assert_relative_eq!(
            WGS84.eccentricity_squared,
            6.694_379_990_141_317e-3,
            epsilon = 1e-15
        );
        assert_relative_eq!(
            WGS84.second_eccentricity_squared,
            6.739_496_742_276_435e-3,
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_geodetic_to_ecef_equator() {
        let p = GeodeticPosition::new(0.0, 0.0, 0.0).unwrap();
        let ecef = WGS84.geodetic_to_ecef(&p);
        assert_relative_eq!(ecef.x, EARTH_MAJOR_AXIS, epsilon = 1e-6);
        assert_abs_diff_eq!(ecef.y, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(ecef.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_geodetic_to_ecef_north_pole() {
        let p = GeodeticPosition::new(90.0, 0.0, 0.0).unwrap();
        let ecef = WGS84.geodetic_to_ecef(&p);
        assert_abs_diff_eq!(ecef.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(ecef.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(ecef.z, WGS84.semi_minor_axis, epsilon = 1e-9);
    }

    #[test]
    fn test_roundtrip_mid_latitudes() {
        roundtrip(10.0, -40.0, 0.0);
        roundtrip(51.58206, -73.06644, 100.0);
        roundtrip(-33.8568, 151.2153, -2500.0);
        roundtrip(0.0, 179.999, 0.0);
    }

    #[test]
    fn test_roundtrip_poles_and_deep_points() {
        roundtrip(90.0, 0.0, 0.0);
        roundtrip(-90.0, 45.0, 1000.0);
        roundtrip(89.999_999, -180.0, -4000.0);
        roundtrip(-60.0, 0.0, -11_000.0);
    }

    #[test]
    fn test_invalid_geodetic_inputs() {
        assert_eq!(
            GeodeticPosition::new(91.0, 0.0, 0.0),
            Err(RovposError::LatitudeOutOfRange(91.0))
        );
        assert_eq!(
            GeodeticPosition::new(0.0, -180.5, 0.0),
            Err(RovposError::LongitudeOutOfRange(-180.5))
        );
        assert!(matches!(
            GeodeticPosition::new(f64::NAN, 0.0, 0.0),
            Err(RovposError::NonFiniteInput {
                name: "latitude",
                ..
            })
        ));
        assert!(matches!(
            GeodeticPosition::new(0.0, 0.0, f64::INFINITY),
            Err(RovposError::NonFiniteInput {
                name: "altitude",
                ..
            })
        ));
    }
}
