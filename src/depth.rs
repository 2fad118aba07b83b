//! # SVP depth correction
//!
//! A raw depth derived from acoustic travel time assumes a nominal sound
//! velocity ([`SVP_REFERENCE_VELOCITY`]). Where the actual water column is
//! faster or slower, the measurement is offset; this module applies the
//! linear correction
//!
//! ```text
//! corrected = raw + (v(raw) - SVP_REFERENCE_VELOCITY) · SVP_CORRECTION_FACTOR
//! ```
//!
//! with `v(raw)` interpolated from the loaded [`SvpProfile`].

use crate::constants::{Meter, MeterPerSecond, SVP_CORRECTION_FACTOR, SVP_REFERENCE_VELOCITY};
use crate::svp::SvpProfile;

/// Result of correcting one raw depth against a profile.
///
/// Carries the inputs alongside the corrected value so callers can display
/// the full diagnostic line-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthCorrection {
    /// The uncorrected depth as measured, in **meters**, positive down.
    pub raw_depth: Meter,

    /// Interpolated sound velocity at `raw_depth`, in **m/s**.
    pub sound_velocity: MeterPerSecond,

    /// The corrected depth, in **meters**, positive down.
    pub corrected_depth: Meter,
}

impl DepthCorrection {
    /// Correct a raw depth against a sound velocity profile.
    ///
    /// The raw depth is deliberately **not** clamped: a negative value
    /// (above the sea surface) or an implausibly large one passes through
    /// the formula unchanged; the depth sign convention is the caller's
    /// responsibility, and the profile lookup clamps on its own.
    ///
    /// Arguments
    /// -----------------
    /// * `raw_depth`: Measured depth in **meters**, positive down.
    /// * `profile`: The loaded sound velocity profile.
    ///
    /// Return
    /// ----------
    /// * The correction record, including the interpolated velocity.
    pub fn correct(raw_depth: Meter, profile: &SvpProfile) -> DepthCorrection {
        let sound_velocity = profile.sound_velocity_at(raw_depth);
        let corrected_depth =
            raw_depth + (sound_velocity - SVP_REFERENCE_VELOCITY) * SVP_CORRECTION_FACTOR;

        DepthCorrection {
            raw_depth,
            sound_velocity,
            corrected_depth,
        }
    }

    /// The correction offset `corrected_depth - raw_depth`, in **meters**.
    pub fn correction(&self) -> Meter {
        self.corrected_depth - self.raw_depth
    }
}

#[cfg(test)]
mod depth_tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::svp::SvpProfile;
    use crate::unit_test_global::SVP_SHELF_TEST;

    #[test]
    fn test_correction_formula() {
        // Flat profile at 1520 m/s: 20 m/s above reference -> +0.2 m.
        let profile = SvpProfile::from_samples(vec![(0.0, 1520.0)]).unwrap();
        let correction = DepthCorrection::correct(1000.0, &profile);
        assert_eq!(correction.raw_depth, 1000.0);
        assert_eq!(correction.sound_velocity, 1520.0);
        assert_relative_eq!(correction.corrected_depth, 1000.2, epsilon = 1e-9);
        assert_relative_eq!(correction.correction(), 0.2, epsilon = 1e-9);
    }

    #[test]
    fn test_correction_at_reference_velocity_is_zero() {
        let profile = SvpProfile::from_samples(vec![(0.0, 1500.0)]).unwrap();
        let correction = DepthCorrection::correct(750.0, &profile);
        assert_eq!(correction.corrected_depth, 750.0);
        assert_eq!(correction.correction(), 0.0);
    }

    #[test]
    fn test_correction_against_shelf_profile() {
        let correction = DepthCorrection::correct(1000.0, &SVP_SHELF_TEST);
        assert_relative_eq!(
            correction.sound_velocity,
            1500.0 + 20.0 * 500.0 / 1500.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(correction.corrected_depth, 1000.0 + 20.0 / 300.0, epsilon = 1e-9);
    }

    #[test]
    fn test_negative_raw_depth_passes_through() {
        // Above the surface the lookup clamps to the shallowest sample and
        // the raw value is not clamped.
        let correction = DepthCorrection::correct(-3.0, &SVP_SHELF_TEST);
        assert_eq!(correction.sound_velocity, 1480.0);
        assert_relative_eq!(correction.corrected_depth, -3.2, epsilon = 1e-9);
    }
}
