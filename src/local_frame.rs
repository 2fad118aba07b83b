//! # Local tangent-plane (ENU) displacements
//!
//! This module expresses a relative survey measurement – so many meters east,
//! north, and up of an anchor point – as an absolute geodetic position:
//!
//! - [`EnuDisplacement`] – an East-North-Up offset in meters, anchored at a
//!   geodetic position.
//! - [`enu_basis`] – the 3×3 direction-cosine matrix whose rows are the local
//!   East, North, and Up unit vectors expressed in ECEF coordinates.
//! - [`apply_enu`] – forward transform, rotation, and inverse transform in
//!   one call.
//!
//! ## Sign convention
//!
//! Survey depth is positive **down** while the ENU frame is positive **up**;
//! [`EnuDisplacement::from_survey`] performs the negation so the rest of the
//! pipeline only ever sees an "up" component.

use nalgebra::{Matrix3, Vector3};

use crate::constants::{Meter, Radian};
use crate::coordinates::{EcefPosition, GeodeticPosition, ReferenceEllipsoid};

/// A displacement in the local East-North-Up frame, in **meters**.
///
/// The frame is anchored at a geodetic position supplied separately; the
/// displacement itself is a plain value with no anchor attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnuDisplacement {
    /// Offset toward local east, in **meters**.
    pub east: Meter,

    /// Offset toward local north, in **meters**.
    pub north: Meter,

    /// Offset along the local vertical, in **meters**, positive up.
    pub up: Meter,
}

impl EnuDisplacement {
    /// Build a displacement from survey conventions, where the vertical
    /// component is a depth **below** the anchor (positive down).
    ///
    /// Arguments
    /// -----------------
    /// * `east`: Offset toward local east, in **meters**.
    /// * `north`: Offset toward local north, in **meters**.
    /// * `depth`: Vertical offset in **meters**, positive down; stored
    ///   negated as `up`.
    ///
    /// Remarks
    /// -------
    /// * A negative `depth` (above the anchor) is accepted and simply yields
    ///   a positive `up`; no clamping is applied.
    pub fn from_survey(east: Meter, north: Meter, depth: Meter) -> EnuDisplacement {
        EnuDisplacement {
            east,
            north,
            up: -depth,
        }
    }

    /// View the displacement as a nalgebra column vector `(e, n, u)`.
    pub fn as_vector(&self) -> Vector3<f64> {
        Vector3::new(self.east, self.north, self.up)
    }
}

/// Direction-cosine matrix of the local ENU frame at latitude φ, longitude λ.
///
/// The rows are the East, North, and Up unit vectors expressed in ECEF
/// coordinates:
///
/// ```text
///     [ -sinλ        cosλ        0    ]   (East)
/// B = [ -sinφ·cosλ  -sinφ·sinλ   cosφ ]   (North)
///     [  cosφ·cosλ   cosφ·sinλ   sinφ ]   (Up)
/// ```
///
/// `B` maps an ECEF vector into ENU components; its transpose `Bᵀ` maps an
/// ENU displacement into ECEF, `dECEF = e·Ê + n·N̂ + u·Û`. The matrix is
/// orthonormal, so both directions are exact given exact trigonometry.
///
/// Arguments
/// -----------------
/// * `latitude`: Geodetic latitude φ of the anchor, in **radians**.
/// * `longitude`: Geodetic longitude λ of the anchor, in **radians**.
///
/// Return
/// ----------
/// * The 3×3 basis matrix described above.
pub fn enu_basis(latitude: Radian, longitude: Radian) -> Matrix3<f64> {
    let (sin_lat, cos_lat) = latitude.sin_cos();
    let (sin_lon, cos_lon) = longitude.sin_cos();

    Matrix3::new(
        -sin_lon,
        cos_lon,
        0.0,
        -sin_lat * cos_lon,
        -sin_lat * sin_lon,
        cos_lat,
        cos_lat * cos_lon,
        cos_lat * sin_lon,
        sin_lat,
    )
}

/// Apply an ENU displacement at an anchor and return the displaced geodetic
/// position.
///
/// The anchor is converted to ECEF, the displacement is rotated into ECEF
/// through the transpose of [`enu_basis`] and added to the anchor, and the
/// sum is converted back to geodetic coordinates.
///
/// Arguments
/// -----------------
/// * `ellipsoid`: The reference ellipsoid used for both transforms.
/// * `anchor`: Geodetic position the ENU frame is anchored at.
/// * `displacement`: The ENU offset to apply, in **meters**.
///
/// Return
/// ----------
/// * The geodetic position of the displaced point.
///
/// Remarks
/// -------
/// * For a zero displacement the result equals the anchor within the
///   ellipsoid round-trip tolerance.
/// * Accumulated floating-point error stays below one millimeter for
///   displacements under roughly 10 km.
///
/// See also
/// ------------
/// * [`ReferenceEllipsoid::geodetic_to_ecef`] / [`ReferenceEllipsoid::ecef_to_geodetic`].
pub fn apply_enu(
    ellipsoid: &ReferenceEllipsoid,
    anchor: &GeodeticPosition,
    displacement: &EnuDisplacement,
) -> GeodeticPosition {
    let base = ellipsoid.geodetic_to_ecef(anchor);
    let basis = enu_basis(
        anchor.latitude.to_radians(),
        anchor.longitude.to_radians(),
    );

    let shifted = base.as_vector() + basis.transpose() * displacement.as_vector();
    ellipsoid.ecef_to_geodetic(&EcefPosition::from_vector(shifted))
}
