//! # Sound Velocity Profile table
//!
//! A [`SvpProfile`] is an ordered, depth-indexed table of measured sound
//! velocities, loaded once at startup and read-only afterwards. It answers a
//! single question: what is the sound velocity at a given depth?
//!
//! ## Source format
//!
//! The CSV source carries one header row and two named, float-parseable
//! fields per data row:
//!
//! ```text
//! Depth,Velocity
//! 0,1480.0
//! 500,1500.0
//! 2000,1520.0
//! ```
//!
//! Row order in the source is irrelevant; the loader sorts by depth. Any
//! malformed row fails the entire load.
//!
//! ## Lookup semantics
//!
//! [`SvpProfile::sound_velocity_at`] clamps to the first/last sample outside
//! the table span and interpolates linearly between the bracketing pair
//! inside it. Adjacent samples sharing the same depth are legal; the first
//! bracketing pair in ascending order wins and equal depths short-circuit to
//! that sample's velocity instead of dividing by zero.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use ordered_float::NotNan;
use serde::Deserialize;

use crate::constants::{Meter, MeterPerSecond};
use crate::rovpos_errors::RovposError;

/// One (depth, velocity) measurement of the profile.
///
/// Stored as [`NotNan`] so samples have the total order required for
/// sorting; both fields are validated at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SvpSample {
    /// Depth of the measurement in **meters**, non-negative.
    pub depth: NotNan<f64>,

    /// Sound velocity at that depth in **m/s**, strictly positive.
    pub velocity: NotNan<f64>,
}

/// On-disk record shape of one SVP source row.
#[derive(Debug, Deserialize)]
struct SvpRecord {
    #[serde(rename = "Depth")]
    depth: f64,
    #[serde(rename = "Velocity")]
    velocity: f64,
}

/// An immutable sound velocity profile, sorted ascending by depth.
///
/// The constructors reject empty input, so every profile holds at least one
/// sample and lookups are total. The profile is never mutated after load and
/// contains no interior mutability, so a shared reference may be used from
/// any number of threads.
#[derive(Debug, Clone, PartialEq)]
pub struct SvpProfile {
    /// Samples in non-decreasing depth order, never empty.
    samples: Vec<SvpSample>,
}

impl SvpProfile {
    /// Build a profile from raw `(depth, velocity)` pairs.
    ///
    /// The pairs are validated and sorted ascending by depth; input order is
    /// irrelevant.
    ///
    /// Arguments
    /// -----------------
    /// * `pairs`: `(depth in meters, velocity in m/s)` tuples, in any order.
    ///
    /// Return
    /// ----------
    /// * The sorted profile.
    ///
    /// Errors
    /// ----------
    /// * [`RovposError::EmptySvpProfile`] if `pairs` is empty.
    /// * [`RovposError::InvalidSvpSample`] if a depth is non-finite or
    ///   negative, or a velocity is non-finite or not strictly positive.
    pub fn from_samples(pairs: Vec<(f64, f64)>) -> Result<SvpProfile, RovposError> {
        if pairs.is_empty() {
            return Err(RovposError::EmptySvpProfile);
        }

        let mut samples = Vec::with_capacity(pairs.len());
        for (depth, velocity) in pairs {
            if !depth.is_finite() || depth < 0.0 || !velocity.is_finite() || velocity <= 0.0 {
                return Err(RovposError::InvalidSvpSample { depth, velocity });
            }
            samples.push(SvpSample {
                depth: NotNan::new(depth)?,
                velocity: NotNan::new(velocity)?,
            });
        }
        samples.sort_by_key(|sample| sample.depth);

        Ok(SvpProfile { samples })
    }

    /// Load a profile from a CSV file on disk.
    ///
    /// Arguments
    /// -----------------
    /// * `path`: Path to a CSV source in the format described in the module
    ///   documentation.
    ///
    /// Errors
    /// ----------
    /// * [`RovposError::IoError`] if the file cannot be opened.
    /// * Any error of [`SvpProfile::from_csv_reader`].
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<SvpProfile, RovposError> {
        let file = File::open(path)?;
        SvpProfile::from_csv_reader(file)
    }

    /// Load a profile from any CSV byte stream.
    ///
    /// Arguments
    /// -----------------
    /// * `reader`: The CSV source, header row included.
    ///
    /// Return
    /// ----------
    /// * The parsed, sorted profile.
    ///
    /// Errors
    /// ----------
    /// * [`RovposError::CsvError`] if the header is missing a required field
    ///   or any row fails to parse as two floats; a single bad row fails
    ///   the whole load.
    /// * [`RovposError::EmptySvpProfile`] / [`RovposError::InvalidSvpSample`]
    ///   from the sample validation.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<SvpProfile, RovposError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let pairs = csv_reader
            .deserialize::<SvpRecord>()
            .map(|record| record.map(|r| (r.depth, r.velocity)))
            .collect::<Result<Vec<_>, csv::Error>>()?;

        SvpProfile::from_samples(pairs)
    }

    /// The samples in non-decreasing depth order.
    pub fn samples(&self) -> &[SvpSample] {
        &self.samples
    }

    /// Interpolated sound velocity at `depth`, in **m/s**.
    ///
    /// Outside the table span the nearest boundary sample's velocity is
    /// returned unchanged (clamp, no extrapolation). Inside it, the first
    /// pair `(d0, v0), (d1, v1)` with `d0 ≤ depth ≤ d1` is interpolated
    /// linearly; when `d1 == d0` that sample's velocity is returned directly.
    ///
    /// Arguments
    /// -----------------
    /// * `depth`: Query depth in **meters**. May be negative or beyond the
    ///   deepest sample; both clamp.
    pub fn sound_velocity_at(&self, depth: Meter) -> MeterPerSecond {
        let first = self.samples[0];
        let last = self.samples[self.samples.len() - 1];

        if depth <= first.depth.into_inner() {
            return first.velocity.into_inner();
        }
        if depth >= last.depth.into_inner() {
            return last.velocity.into_inner();
        }

        for pair in self.samples.windows(2) {
            let (d0, v0) = (pair[0].depth.into_inner(), pair[0].velocity.into_inner());
            let (d1, v1) = (pair[1].depth.into_inner(), pair[1].velocity.into_inner());

            if d0 <= depth && depth <= d1 {
                if d1 == d0 {
                    return v0;
                }
                return v0 + (v1 - v0) * (depth - d0) / (d1 - d0);
            }
        }

        // Unreachable for a sorted, non-empty table; the clamp above already
        // handled everything outside the bracketed span.
        last.velocity.into_inner()
    }
}
