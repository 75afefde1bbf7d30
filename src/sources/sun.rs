use crate::constants::{Kilometer, Lux, AU, SOLAR_CONSTANT_LUX};

/// Extraterrestrial solar illuminance for a given Sun distance, in lux.
///
/// Inverse-square scaling of the solar illuminance constant with the actual
/// Earth–Sun distance from the ephemeris. Over a year this varies by about
/// ±3.4% around [`SOLAR_CONSTANT_LUX`], equivalent to the orbital
/// eccentricity correction of the source model (Undeger 2009, Eq. 9).
///
/// Arguments
/// ---------
/// * `distance_km`: Earth–Sun distance in kilometers. Non-positive values
///   are clamped to one astronomical unit.
///
/// Return
/// ------
/// * Illuminance in lux just outside the atmosphere.
pub fn extraterrestrial_illuminance(distance_km: Kilometer) -> Lux {
    let distance = if distance_km > 0.0 { distance_km } else { AU };
    let ratio = AU / distance;
    SOLAR_CONSTANT_LUX * ratio * ratio
}
