use thiserror::Error;

/// Error type for every fallible operation in the crate.
///
/// The variants fall into three families:
/// - **input errors**: a caller-supplied scalar is non-finite or outside its
///   geodetic range,
/// - **configuration errors**: the SVP source is missing, unreadable, empty,
///   or contains an invalid sample,
/// - **numeric errors**: the geometry degenerated during a transform.
#[derive(Error, Debug)]
pub enum RovposError {
    #[error("non-finite value for input '{name}': {value}")]
    NonFiniteInput { name: &'static str, value: f64 },

    #[error("latitude out of range [-90, 90] degrees: {0}")]
    LatitudeOutOfRange(f64),

    #[error("longitude out of range [-180, 180] degrees: {0}")]
    LongitudeOutOfRange(f64),

    #[error("SVP profile contains no samples")]
    EmptySvpProfile,

    #[error("invalid SVP sample (depth: {depth}, velocity: {velocity}): depth must be finite and non-negative, velocity finite and positive")]
    InvalidSvpSample { depth: f64, velocity: f64 },

    #[error("unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("error while parsing the SVP source: {0}")]
    CsvError(#[from] csv::Error),

    #[error("NaN encountered in a geometry field: {0}")]
    NanValue(#[from] ordered_float::FloatIsNan),

    #[error("degenerate geometry: {0}")]
    NonFiniteResult(String),
}

impl PartialEq for RovposError {
    fn eq(&self, other: &Self) -> bool {
        use RovposError::*;
        match (self, other) {
            (
                NonFiniteInput { name: a, value: b },
                NonFiniteInput { name: c, value: d },
            ) => a == c && (b == d || (b.is_nan() && d.is_nan())),
            (LatitudeOutOfRange(a), LatitudeOutOfRange(b)) => a == b,
            (LongitudeOutOfRange(a), LongitudeOutOfRange(b)) => a == b,
            (
                InvalidSvpSample { depth: a, velocity: b },
                InvalidSvpSample { depth: c, velocity: d },
            ) => {
                (a == c || (a.is_nan() && c.is_nan()))
                    && (b == d || (b.is_nan() && d.is_nan()))
            }
            (NonFiniteResult(a), NonFiniteResult(b)) => a == b,

            // Wrapped errors are not comparable: equal if same variant.
            (IoError(_), IoError(_)) => true,
            (CsvError(_), CsvError(_)) => true,
            (NanValue(_), NanValue(_)) => true,

            // Unit variants
            (EmptySvpProfile, EmptySvpProfile) => true,

            _ => false,
        }
    }
}
