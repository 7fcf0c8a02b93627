//! Errors produced by the curve model, the canvas mapper and the gallery.

/// Everything that can go wrong in this crate.
///
/// None of these are fatal: they are reported to the caller, and whatever
/// state existed before the failing call is left as it was.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The input did not contain exactly four coordinates.
    #[error("expected 4 coordinates, found {0}")]
    Count(usize),
    /// A token could not be read as a finite number.
    #[error("wrong coordinate at {index} ({token:?})")]
    NotANumber { index: usize, token: String },
    /// An x coordinate (index 0 or 2) was outside of `0..=1`.
    #[error("wrong coordinate at {index} ({value})")]
    OutOfRange { index: usize, value: f64 },
    /// Padding that leaves no room to draw in, or that is not 1-4 values.
    #[error("invalid padding {0:?}")]
    BadPadding(Vec<f64>),
    #[error("no curve named {0:?}")]
    UnknownCurve(String),
    /// A drawing surface refused an operation.
    #[error("surface error: {0}")]
    Surface(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
