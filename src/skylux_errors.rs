use thiserror::Error;

/// Error type shared by every fallible operation of the crate.
///
/// The photometric formulas themselves never fail: horizon crossings,
/// degenerate phase geometry and zero distances are all resolved by clamping
/// inside the model. The only failure surfaces are invalid caller input and
/// an ephemeris lookup outside the provider's supported range, both reported
/// synchronously with no partial result.
#[derive(Error, Debug, PartialEq)]
pub enum SkyluxError {
    #[error("Ephemeris unavailable for the requested epoch: {0}")]
    EphemerisUnavailable(String),

    #[error("Invalid observer coordinates: {0}")]
    InvalidObserver(String),

    #[error("Invalid turbidity (must be non-negative and finite): {0}")]
    InvalidTurbidity(f64),

    #[error("NaN encountered in site geometry: {0}")]
    NanInput(#[from] ordered_float::FloatIsNan),
}
