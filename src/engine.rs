//! # Positioning engine
//!
//! The [`PositioningEngine`] is the crate's façade: it owns the reference
//! ellipsoid and the loaded SVP profile and turns one set of five survey
//! scalars (vessel latitude/longitude, east/north displacement, raw depth)
//! into an absolute geodetic fix for the ROV.
//!
//! Each [`PositioningEngine::compute_position`] call is an independent,
//! stateless transaction: inputs are validated up front, nothing is computed
//! on invalid input, and no state is retained between calls. The engine is
//! immutable after construction, so one instance may serve any number of
//! threads; to swap in a new SVP profile, build a new engine and replace the
//! shared reference rather than mutating in place.
//!
//! ## Typical usage
//!
//! ```rust,no_run
//! use rovpos::engine::PositioningEngine;
//! use rovpos::svp::SvpProfile;
//!
//! let svp = SvpProfile::from_csv_path("svp_profile.csv")?;
//! let engine = PositioningEngine::new(svp);
//!
//! let fix = engine.compute_position(10.0, -40.0, 100.0, -50.0, 1000.0)?;
//! println!("{fix}");
//! # Ok::<(), rovpos::rovpos_errors::RovposError>(())
//! ```

use std::fmt;

use crate::constants::{Degree, Meter};
use crate::coordinates::{EcefPosition, GeodeticPosition, ReferenceEllipsoid, WGS84};
use crate::depth::DepthCorrection;
use crate::local_frame::{apply_enu, EnuDisplacement};
use crate::rovpos_errors::RovposError;
use crate::svp::SvpProfile;

/// One computed fix: the vessel's ECEF base point, the ROV's absolute
/// geodetic position, and the depth-correction diagnostics that produced it.
///
/// Created fresh per [`PositioningEngine::compute_position`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositioningFix {
    /// ECEF coordinates of the vessel reference point (altitude 0).
    pub vessel_ecef: EcefPosition,

    /// Absolute geodetic position of the ROV.
    pub rov_position: GeodeticPosition,

    /// Depth correction applied to the vertical displacement.
    pub depth_correction: DepthCorrection,
}

impl fmt::Display for PositioningFix {
    /// Render the fix as the operator-facing result block: latitude and
    /// longitude to 7 decimal places, meters to 2, velocity to 1.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Absolute Position of the ROV:")?;
        writeln!(f, "Latitude: {:.7}°", self.rov_position.latitude)?;
        writeln!(f, "Longitude: {:.7}°", self.rov_position.longitude)?;
        writeln!(f, "Original Depth: {:.2} m", self.depth_correction.raw_depth)?;
        writeln!(
            f,
            "Sound Velocity at Depth: {:.1} m/s",
            self.depth_correction.sound_velocity
        )?;
        writeln!(
            f,
            "Corrected Depth (SVP): {:.2} m",
            self.depth_correction.corrected_depth
        )?;
        writeln!(f, "Altitude: {:.2} m", self.rov_position.altitude)?;
        write!(f, "SVP Correction: {:.2} m", self.depth_correction.correction())
    }
}

/// The geodetic positioning engine.
///
/// Owns an immutable [`ReferenceEllipsoid`] and [`SvpProfile`] for the
/// lifetime of the process (or request). Both are explicit values rather
/// than process-wide singletons so tests can substitute alternative
/// ellipsoid parameters or profiles.
#[derive(Debug, Clone, PartialEq)]
pub struct PositioningEngine {
    ellipsoid: ReferenceEllipsoid,
    svp: SvpProfile,
}

impl PositioningEngine {
    /// Build an engine on the WGS84 ellipsoid.
    ///
    /// Arguments
    /// -----------------
    /// * `svp`: The loaded sound velocity profile; owned by the engine and
    ///   never mutated afterwards.
    pub fn new(svp: SvpProfile) -> PositioningEngine {
        PositioningEngine::with_ellipsoid(WGS84, svp)
    }

    /// Build an engine on an explicit ellipsoid.
    pub fn with_ellipsoid(ellipsoid: ReferenceEllipsoid, svp: SvpProfile) -> PositioningEngine {
        PositioningEngine { ellipsoid, svp }
    }

    /// The profile the engine corrects depths against.
    pub fn svp(&self) -> &SvpProfile {
        &self.svp
    }

    /// The ellipsoid the engine transforms against.
    pub fn ellipsoid(&self) -> &ReferenceEllipsoid {
        &self.ellipsoid
    }

    /// Compute the ROV's absolute geodetic position.
    ///
    /// Pipeline: validate the five inputs → correct `raw_depth` against the
    /// SVP profile → build the ENU displacement with the corrected depth as
    /// the (negated) vertical → rotate and add at the vessel position with
    /// altitude fixed at 0 → convert back to geodetic.
    ///
    /// Arguments
    /// -----------------
    /// * `vessel_latitude`: Vessel latitude in **degrees**, in `[-90, 90]`.
    /// * `vessel_longitude`: Vessel longitude in **degrees**, in `[-180, 180]`.
    /// * `east`: ROV displacement toward local east, in **meters**.
    /// * `north`: ROV displacement toward local north, in **meters**.
    /// * `raw_depth`: ROV depth below the vessel, in **meters**, positive
    ///   down. Not clamped; a negative value is processed as a height above
    ///   the vessel.
    ///
    /// Return
    /// ----------
    /// * The complete [`PositioningFix`].
    ///
    /// Errors
    /// ----------
    /// * [`RovposError::NonFiniteInput`] if any of the five inputs is NaN or
    ///   infinite.
    /// * [`RovposError::LatitudeOutOfRange`] / [`RovposError::LongitudeOutOfRange`]
    ///   for an out-of-range vessel position.
    /// * [`RovposError::NonFiniteResult`] if the geometry degenerates; not
    ///   expected for inputs in normal ranges.
    ///
    /// No partial result is ever produced: validation happens before any
    /// computation, and every call is independent and idempotent.
    pub fn compute_position(
        &self,
        vessel_latitude: Degree,
        vessel_longitude: Degree,
        east: Meter,
        north: Meter,
        raw_depth: Meter,
    ) -> Result<PositioningFix, RovposError> {
        for (name, value) in [
            ("east displacement", east),
            ("north displacement", north),
            ("raw depth", raw_depth),
        ] {
            if !value.is_finite() {
                return Err(RovposError::NonFiniteInput { name, value });
            }
        }

        // Vessel altitude is 0 by convention: the reference point sits on
        // the ellipsoid.
        let vessel = GeodeticPosition::new(vessel_latitude, vessel_longitude, 0.0)?;

        let depth_correction = DepthCorrection::correct(raw_depth, &self.svp);
        let displacement =
            EnuDisplacement::from_survey(east, north, depth_correction.corrected_depth);

        let vessel_ecef = self.ellipsoid.geodetic_to_ecef(&vessel);
        let rov_position = apply_enu(&self.ellipsoid, &vessel, &displacement);

        if !rov_position.latitude.is_finite()
            || !rov_position.longitude.is_finite()
            || !rov_position.altitude.is_finite()
        {
            return Err(RovposError::NonFiniteResult(format!(
                "non-finite geodetic result for vessel ({vessel_latitude}, {vessel_longitude})"
            )));
        }

        Ok(PositioningFix {
            vessel_ecef,
            rov_position,
            depth_correction,
        })
    }
}

#[cfg(test)]
mod engine_tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::unit_test_global::SVP_SHELF_TEST;

    fn shelf_engine() -> PositioningEngine {
        PositioningEngine::new(SVP_SHELF_TEST.clone())
    }

    #[test]
    fn test_zero_displacement_returns_vessel_position() {
        let engine = shelf_engine();
        // Raw depth 20 m yields a zero corrected depth only if the profile
        // sits at the reference velocity there; use a flat reference profile.
        let flat = PositioningEngine::new(
            crate::svp::SvpProfile::from_samples(vec![(0.0, 1500.0)]).unwrap(),
        );
        let fix = flat.compute_position(10.0, -40.0, 0.0, 0.0, 0.0).unwrap();
        assert_abs_diff_eq!(fix.rov_position.latitude, 10.0, epsilon = 1e-6);
        assert_abs_diff_eq!(fix.rov_position.longitude, -40.0, epsilon = 1e-6);
        assert_abs_diff_eq!(fix.rov_position.altitude, 0.0, epsilon = 1e-3);

        // Same vessel point, non-trivial profile: the base ECEF is identical.
        let other = engine.compute_position(10.0, -40.0, 0.0, 0.0, 0.0).unwrap();
        assert_eq!(other.vessel_ecef, fix.vessel_ecef);
    }

    #[test]
    fn test_non_finite_inputs_are_rejected() {
        let engine = shelf_engine();
        assert!(matches!(
            engine.compute_position(f64::NAN, -40.0, 0.0, 0.0, 100.0),
            Err(RovposError::NonFiniteInput {
                name: "latitude",
                ..
            })
        ));
        assert!(matches!(
            engine.compute_position(10.0, -40.0, f64::INFINITY, 0.0, 100.0),
            Err(RovposError::NonFiniteInput {
                name: "east displacement",
                ..
            })
        ));
        assert!(matches!(
            engine.compute_position(10.0, -40.0, 0.0, 0.0, f64::NAN),
            Err(RovposError::NonFiniteInput {
                name: "raw depth",
                ..
            })
        ));
    }

    #[test]
    fn test_out_of_range_vessel_position_is_rejected() {
        let engine = shelf_engine();
        assert_eq!(
            engine.compute_position(95.0, 0.0, 0.0, 0.0, 100.0),
            Err(RovposError::LatitudeOutOfRange(95.0))
        );
        assert_eq!(
            engine.compute_position(0.0, 222.0, 0.0, 0.0, 100.0),
            Err(RovposError::LongitudeOutOfRange(222.0))
        );
    }

    #[test]
    fn test_display_block() {
        let engine = shelf_engine();
        let fix = engine
            .compute_position(10.0, -40.0, 100.0, -50.0, 1000.0)
            .unwrap();
        let rendered = fix.to_string();
        assert!(rendered.starts_with("Absolute Position of the ROV:\n"));
        assert!(rendered.contains("Original Depth: 1000.00 m"));
        assert!(rendered.contains("Sound Velocity at Depth: 1506.7 m/s"));
        assert!(rendered.contains("Corrected Depth (SVP): 1000.07 m"));
        assert!(rendered.contains("SVP Correction: 0.07 m"));
    }
}
