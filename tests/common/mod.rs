use approx::assert_abs_diff_eq;
use rovpos::coordinates::GeodeticPosition;

/// Assert two geodetic positions agree within the crate round-trip
/// tolerance: `angle_eps` degrees on latitude/longitude, `alt_eps` meters
/// on altitude.
pub fn assert_geodetic_close(
    actual: &GeodeticPosition,
    expected: &GeodeticPosition,
    angle_eps: f64,
    alt_eps: f64,
) {
    assert_abs_diff_eq!(actual.latitude, expected.latitude, epsilon = angle_eps);
    assert_abs_diff_eq!(actual.longitude, expected.longitude, epsilon = angle_eps);
    assert_abs_diff_eq!(actual.altitude, expected.altitude, epsilon = alt_eps);
}
