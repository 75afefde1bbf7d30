//! # Atmospheric extinction model
//!
//! Light transmission through Earth's atmosphere: relative optical **air
//! mass** and turbidity-dependent **extinction**, after section 5 of
//! Undeger (2009).
//!
//! ## Air mass
//!
//! The air mass is the atmospheric path length relative to the zenith path.
//! Up to the geometric horizon it follows the Kasten–Young (1989) fit, the
//! industry standard for illumination work, which stays finite at the
//! horizon (≈ 38) unlike the naive `1/cos(z)`. Past 90° a Rozenberg-style
//! bounded continuation takes over: it starts at the Kasten–Young horizon
//! value and saturates exponentially, so the function is continuous at 90°,
//! monotonically non-decreasing, and finite for every zenith angle. The
//! twilight boundary is the most bug-prone region of the whole model and is
//! covered by tests straddling z = 90°.
//!
//! ## Extinction
//!
//! The extinction coefficient combines Rayleigh scattering of the standard
//! atmosphere with an aerosol (Mie) term linear in the Linke turbidity
//! factor. Turbidity 1 is the ideal, pure-Rayleigh sky; 2–3 a clear sky;
//! 10 and above haze and fog. Transmittance follows the Beer–Lambert law,
//! `exp(−k·m)`.

use serde::{Deserialize, Serialize};

use crate::constants::{
    Degree, AEROSOL_EXPONENT, AEROSOL_TURBIDITY_OFFSET, AEROSOL_TURBIDITY_SLOPE,
    CLEAR_SKY_TURBIDITY, DEFAULT_TURBIDITY, RAYLEIGH_COEFF, RAYLEIGH_EXPONENT,
    TWILIGHT_AIR_MASS_LIMIT, TWILIGHT_AIR_MASS_SCALE_DEG, WAVELENGTH_UM,
};
use crate::skylux_errors::SkyluxError;

/// Atmospheric conditions of a query. Supplied by the caller, constant for
/// the duration of the query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtmosphericState {
    /// Linke turbidity factor, ≥ 1 (1 = ideal clear sky, larger = haze/fog)
    pub turbidity: f64,
}

impl AtmosphericState {
    pub fn new(turbidity: f64) -> Self {
        AtmosphericState { turbidity }
    }
}

impl Default for AtmosphericState {
    /// Clear-sky conditions
    fn default() -> Self {
        AtmosphericState {
            turbidity: DEFAULT_TURBIDITY,
        }
    }
}

/// Derived extinction state for one body at one zenith angle. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirMassResult {
    /// Zenith angle in degrees
    pub zenith_angle: Degree,
    /// Relative optical air mass, finite and positive for any zenith angle
    pub air_mass: f64,
    /// Fraction of light transmitted, in [0, 1]
    pub extinction_factor: f64,
}

/// Relative optical air mass at a zenith angle, finite on the whole range.
///
/// Kasten–Young (1989) up to z = 90°:
///
/// ```text
/// m(z) = 1 / (cos z + 0.50572 · (96.07995 − z)^−1.6364)      (z in degrees)
/// ```
///
/// Beyond the horizon the path saturates toward the horizontal-chord value,
/// continuing the Kasten–Young horizon air mass with a bounded exponential
/// ramp of amplitude [`TWILIGHT_AIR_MASS_LIMIT`]. `m(0°) ≈ 1`, `m(90°) ≈ 38`,
/// and the function is monotonically non-decreasing everywhere.
///
/// Arguments
/// ---------
/// * `zenith_angle`: zenith angle in degrees; values are clamped to
///   [0°, 180°].
pub fn air_mass(zenith_angle: Degree) -> f64 {
    let z = zenith_angle.clamp(0.0, 180.0);

    if z <= 90.0 {
        kasten_young(z)
    } else {
        let horizon = kasten_young(90.0);
        horizon
            + TWILIGHT_AIR_MASS_LIMIT * (1.0 - (-(z - 90.0) / TWILIGHT_AIR_MASS_SCALE_DEG).exp())
    }
}

fn kasten_young(z: Degree) -> f64 {
    1.0 / (z.to_radians().cos() + 0.50572 * (96.07995 - z).powf(-1.6364))
}

/// Total extinction coefficient for a given turbidity.
///
/// The Rayleigh term is fixed by the standard atmosphere; the aerosol term
/// grows linearly with turbidity and is clamped at zero so that turbidity
/// values at or near 1 reduce to the pure Rayleigh sky (zenith transmittance
/// ≈ 0.91). Sub-1 positive turbidity is treated as 1.
///
/// Arguments
/// ---------
/// * `turbidity`: Linke turbidity factor.
///
/// Return
/// ------
/// * The extinction coefficient `k` of the Beer–Lambert law.
///
/// Errors
/// ------
/// * [`SkyluxError::InvalidTurbidity`] if the turbidity is negative or not
///   finite.
pub fn extinction_coefficient(turbidity: f64) -> Result<f64, SkyluxError> {
    if !turbidity.is_finite() || turbidity < 0.0 {
        return Err(SkyluxError::InvalidTurbidity(turbidity));
    }
    let turbidity = turbidity.max(CLEAR_SKY_TURBIDITY);

    let rayleigh = RAYLEIGH_COEFF * WAVELENGTH_UM.powf(RAYLEIGH_EXPONENT);
    let aerosol = ((AEROSOL_TURBIDITY_SLOPE * turbidity + AEROSOL_TURBIDITY_OFFSET)
        * WAVELENGTH_UM.powf(AEROSOL_EXPONENT))
    .max(0.0);

    Ok(rayleigh + aerosol)
}

/// Air mass and transmitted-light fraction for one body.
///
/// Arguments
/// ---------
/// * `zenith_angle`: zenith angle of the body in degrees.
/// * `turbidity`: Linke turbidity factor.
///
/// Return
/// ------
/// * An [`AirMassResult`] with the air mass and the Beer–Lambert extinction
///   factor `exp(−k·m)`.
///
/// Errors
/// ------
/// * [`SkyluxError::InvalidTurbidity`] for negative or non-finite turbidity.
pub fn extinction(zenith_angle: Degree, turbidity: f64) -> Result<AirMassResult, SkyluxError> {
    let k = extinction_coefficient(turbidity)?;
    let m = air_mass(zenith_angle);

    Ok(AirMassResult {
        zenith_angle,
        air_mass: m,
        extinction_factor: (-k * m).exp(),
    })
}

/// Estimate the Linke turbidity from a meteorological visibility range.
///
/// Step approximation of figure 3 of Undeger (2009); convenient when the
/// caller has a weather report rather than a turbidity measurement.
pub fn visibility_to_turbidity(visibility_km: f64) -> f64 {
    if visibility_km > 100.0 {
        2.0 // very clear
    } else if visibility_km > 20.0 {
        3.0 // clear
    } else if visibility_km > 10.0 {
        4.0 // light haze
    } else if visibility_km > 5.0 {
        7.0 // haze
    } else if visibility_km > 2.0 {
        15.0 // strong haze / fog
    } else {
        30.0 // dense fog
    }
}
