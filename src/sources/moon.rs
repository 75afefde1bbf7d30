//! # Moon photometric model
//!
//! Physical brightness of the Moon as a light source, after section 4.2 of
//! Undeger (2009): direct solar reflectance shaped by the **phase function**,
//! the **earthshine** path Sun→Earth→Moon→Observer, and the **opposition
//! surge** near Full Moon.
//!
//! ## Phase geometry
//!
//! The phase angle is the angle **at the Moon** between the directions to the
//! Sun and to the observer, computed from full 3D vectors so it stays
//! accurate near the syzygies where 2D ecliptic-longitude approximations
//! break down. 0° is Full Moon, 180° is New Moon.
//!
//! ## Earthshine
//!
//! Light reflected by Earth onto the lunar surface, governed by Earth's
//! phase as seen from the Moon, which is complementary to the Moon's phase
//! seen from Earth. Near New Moon the Earth is nearly full from the Moon and
//! earthshine peaks; near Full Moon it vanishes. The term is strictly
//! positive at a phase angle of exactly 180°, which guarantees a non-zero
//! Moon brightness at New Moon.
//!
//! ## Opposition surge
//!
//! Non-linear brightening for small phase angles. Parameterized as a linear
//! ramp from `1 + 0.315` at 0° down to exactly 1 at the configured threshold
//! (7° by default), so the multiplier is continuous at the threshold for any
//! threshold value, never below 1, and matches the ~1.3 peak of the lunar
//! photometry literature. The amplitude choice is recorded in DESIGN.md.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::{
    Degree, Kilometer, Lux, Radian, EARTHSHINE_PEAK_WM2, LAMBERT_SPHERE_FACTOR, MOON_ALBEDO,
    MOON_RADIUS_KM, OPPOSITION_SURGE_AMPLITUDE, SOLAR_CONSTANT_LUX, SOLAR_IRRADIANCE_WM2,
};

/// Angular guard around the degenerate phase angles 0 and π, in radians
const PHASE_EPSILON: Radian = 1e-4;

/// Photometric state of the Moon for one query. Derived, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoonPhotometricState {
    /// Phase angle in degrees: 0 = Full Moon, 180 = New Moon
    pub phase_angle: Degree,
    /// Fraction of the disk illuminated as seen by the observer, in [0, 1]
    pub illuminated_fraction: f64,
    /// Earthshine irradiance on the lunar surface, in W/m², ≥ 0
    pub earthshine_irradiance: f64,
    /// Opposition-surge multiplier, ≥ 1
    pub opposition_surge: f64,
    /// Combined apparent brightness above the atmosphere, in lux
    pub brightness: Lux,
}

/// Phase angle at the Moon between the directions to the Sun and to the
/// observer, in radians.
///
/// Arguments
/// ---------
/// * `moon_to_sun`: vector from the Moon toward the Sun (any length unit).
/// * `moon_to_observer`: vector from the Moon toward the observer.
///
/// Return
/// ------
/// * The angle in radians, in [0, π]. Degenerate geometry (a zero vector,
///   or coincident directions) yields 0 by convention.
pub fn phase_angle(moon_to_sun: &Vector3<f64>, moon_to_observer: &Vector3<f64>) -> Radian {
    let norm_product = moon_to_sun.norm() * moon_to_observer.norm();
    if norm_product == 0.0 {
        return 0.0;
    }
    let cos_phase = (moon_to_sun.dot(moon_to_observer) / norm_product).clamp(-1.0, 1.0);
    cos_phase.acos()
}

/// Fraction of the lunar disk illuminated, from the half-angle relation
/// `(1 + cos φ) / 2`. 1 at Full Moon, 0 at New Moon, monotonic in between.
pub fn illuminated_fraction(phase: Radian) -> f64 {
    (1.0 + phase.cos()) / 2.0
}

/// Lunar phase function: relative brightness of the sunlit disk at a phase
/// angle, normalized to 1 at opposition (Undeger 2009, Eq. 10).
///
/// ```text
/// f(φ) = 1 − sin(φ/2) · tan(φ/2) · ln(cot(φ/4))
/// ```
///
/// The analytic expression is indeterminate at both ends; its limits are 1
/// at φ → 0 and 0 at φ → π, and the implementation pins those values inside
/// a small angular guard.
fn phase_factor(phase: Radian) -> f64 {
    if phase < PHASE_EPSILON {
        return 1.0;
    }
    if phase > std::f64::consts::PI - PHASE_EPSILON {
        return 0.0;
    }
    let half = phase / 2.0;
    let factor = 1.0 - half.sin() * half.tan() * (1.0 / (phase / 4.0).tan()).ln();
    factor.clamp(0.0, 1.0)
}

/// Earthshine irradiance on the lunar surface, in W/m².
///
/// Earth's phase seen from the Moon is `π − φ`; the same phase function that
/// shapes the Moon's sunlit disk shapes the Earth-lit one. The irradiance
/// peaks at [`EARTHSHINE_PEAK_WM2`] for a full Earth (New Moon, φ = 180°)
/// and decays to zero toward Full Moon. Strictly positive at φ = 180°:
/// this is what keeps the Moon visible at New Moon.
pub fn earthshine_irradiance(phase: Radian) -> f64 {
    let earth_phase = std::f64::consts::PI - phase;
    EARTHSHINE_PEAK_WM2 * phase_factor(earth_phase)
}

/// Opposition-surge multiplier at a phase angle.
///
/// Linear ramp `1 + A·(1 − φ/θ)` inside the threshold θ, exactly 1 at and
/// beyond it. Continuous at θ, ≥ 1 everywhere, and `1 + A ≈ 1.315` at
/// opposition.
///
/// Arguments
/// ---------
/// * `phase`: phase angle in radians.
/// * `threshold_deg`: phase angle in degrees beyond which the surge is off.
pub fn opposition_surge(phase: Radian, threshold_deg: Degree) -> f64 {
    let phi_deg = phase.to_degrees();
    if threshold_deg <= 0.0 || phi_deg >= threshold_deg {
        return 1.0;
    }
    1.0 + OPPOSITION_SURGE_AMPLITUDE * (1.0 - phi_deg / threshold_deg)
}

/// Full photometric state of the Moon from the observer-centric geometry.
///
/// Arguments
/// ---------
/// * `obs_to_sun`: topocentric vector from the observer to the Sun, in km.
/// * `obs_to_moon`: topocentric vector from the observer to the Moon, in km.
/// * `surge_threshold_deg`: opposition-surge cutoff in degrees.
///
/// Return
/// ------
/// * The [`MoonPhotometricState`]; its `brightness` field is the combined
///   extraterrestrial illuminance:
///
/// ```text
/// E = (2/3) · albedo · surge · (R_moon/d)² · (E_reflected + E_earthshine)
/// ```
///
/// with the direct term `E_reflected = E_sc · f(φ)` and the earthshine
/// irradiance converted to lux through the solar lux/irradiance ratio.
/// The distance is clamped to the lunar radius so the inverse-square factor
/// never diverges; no input geometry can produce NaN or infinity.
pub fn moon_photometry(
    obs_to_sun: &Vector3<f64>,
    obs_to_moon: &Vector3<f64>,
    surge_threshold_deg: Degree,
) -> MoonPhotometricState {
    let moon_to_sun = obs_to_sun - obs_to_moon;
    let moon_to_observer = -obs_to_moon;
    let phase = phase_angle(&moon_to_sun, &moon_to_observer);

    let surge = opposition_surge(phase, surge_threshold_deg);
    let earthshine = earthshine_irradiance(phase);

    let reflected_lux = SOLAR_CONSTANT_LUX * phase_factor(phase);
    let earthshine_lux = earthshine * (SOLAR_CONSTANT_LUX / SOLAR_IRRADIANCE_WM2);

    let distance: Kilometer = obs_to_moon.norm().max(MOON_RADIUS_KM);
    let geometry = (MOON_RADIUS_KM / distance) * (MOON_RADIUS_KM / distance);

    let brightness =
        LAMBERT_SPHERE_FACTOR * MOON_ALBEDO * surge * geometry * (reflected_lux + earthshine_lux);

    MoonPhotometricState {
        phase_angle: phase.to_degrees(),
        illuminated_fraction: illuminated_fraction(phase),
        earthshine_irradiance: earthshine,
        opposition_surge: surge,
        brightness,
    }
}

#[cfg(test)]
mod moon_test {
    use super::*;
    use crate::constants::{DEFAULT_SURGE_THRESHOLD_DEG, AU};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::PI;

    const MEAN_MOON_DISTANCE_KM: f64 = 384_400.0;

    /// Observer-centric Sun/Moon vectors for a prescribed phase angle, both
    /// bodies overhead at their mean distances.
    fn geometry_for_phase(phase_deg: f64) -> (Vector3<f64>, Vector3<f64>) {
        let obs_to_moon = Vector3::new(0.0, 0.0, MEAN_MOON_DISTANCE_KM);
        // Rotate the Sun direction in the x-z plane: separation π − φ from
        // the Moon direction puts the angle at the Moon at φ (the Sun is far
        // enough that moon→sun ≈ obs→sun).
        let separation = PI - phase_deg.to_radians();
        let obs_to_sun = AU * Vector3::new(separation.sin(), 0.0, separation.cos());
        (obs_to_sun, obs_to_moon)
    }

    #[test]
    fn test_phase_angle_from_vectors() {
        for expected in [0.0, 45.0, 90.0, 135.0, 180.0] {
            let (sun, moon) = geometry_for_phase(expected);
            let state = moon_photometry(&sun, &moon, DEFAULT_SURGE_THRESHOLD_DEG);
            assert_abs_diff_eq!(state.phase_angle, expected, epsilon = 0.2);
        }
    }

    #[test]
    fn test_phase_angle_degenerate_geometry() {
        // Coincident directions and zero vectors resolve to 0 by convention
        let v = Vector3::new(1.0, 0.0, 0.0);
        assert_eq!(phase_angle(&v, &v), 0.0);
        assert_eq!(phase_angle(&Vector3::zeros(), &v), 0.0);
    }

    #[test]
    fn test_illuminated_fraction_endpoints() {
        assert_eq!(illuminated_fraction(0.0), 1.0);
        assert_abs_diff_eq!(illuminated_fraction(PI), 0.0, epsilon = 1e-12);
        assert_relative_eq!(illuminated_fraction(PI / 2.0), 0.5, epsilon = 1e-12);

        // Monotonically decreasing from full to new
        let mut previous = 1.0;
        let mut phi = 0.0;
        while phi < PI {
            phi += 0.01;
            let f = illuminated_fraction(phi.min(PI));
            assert!(f <= previous);
            previous = f;
        }
    }

    #[test]
    fn test_opposition_surge_profile() {
        // Maximum at opposition, above the ~1.3 literature peak
        assert!(opposition_surge(0.0, 7.0) > 1.3);

        // Off beyond the threshold
        assert_eq!(opposition_surge(8.0_f64.to_radians(), 7.0), 1.0);
        assert_eq!(opposition_surge(30.0_f64.to_radians(), 7.0), 1.0);

        // Continuous at the threshold and never below 1
        assert_abs_diff_eq!(opposition_surge(6.999_f64.to_radians(), 7.0), 1.0, epsilon = 1e-3);
        let mut phi: f64 = 0.0;
        while phi < 20.0 {
            assert!(opposition_surge(phi.to_radians(), 7.0) >= 1.0);
            phi += 0.05;
        }

        // A non-default threshold keeps both properties
        assert_abs_diff_eq!(opposition_surge(3.999_f64.to_radians(), 4.0), 1.0, epsilon = 1e-3);
        assert!(opposition_surge(0.0, 4.0) > 1.3);
    }

    #[test]
    fn test_earthshine_complementary_to_phase() {
        // Maximal at New Moon (full Earth), zero at Full Moon (new Earth)
        assert_eq!(earthshine_irradiance(PI), EARTHSHINE_PEAK_WM2);
        assert_eq!(earthshine_irradiance(0.0), 0.0);

        // Strictly positive through the whole New Moon neighbourhood
        for phi_deg in [170.0_f64, 175.0, 179.0, 180.0] {
            assert!(earthshine_irradiance(phi_deg.to_radians()) > 0.0);
        }
    }

    #[test]
    fn test_full_moon_brightness() {
        // Full Moon at mean distance: about 0.2–0.45 lux above the
        // atmosphere, with the opposition surge engaged.
        let (sun, moon) = geometry_for_phase(0.0);
        let state = moon_photometry(&sun, &moon, DEFAULT_SURGE_THRESHOLD_DEG);

        assert!(state.phase_angle < 5.0);
        assert!(state.opposition_surge > 1.0);
        assert!((0.2..0.45).contains(&state.brightness), "{}", state.brightness);
    }

    #[test]
    fn test_new_moon_earthshine_guarantee() {
        // At exactly 180° the direct reflectance is zero but the earthshine
        // keeps the combined brightness strictly positive.
        let (sun, moon) = geometry_for_phase(180.0);
        let state = moon_photometry(&sun, &moon, DEFAULT_SURGE_THRESHOLD_DEG);

        assert!(state.phase_angle > 179.0);
        assert_abs_diff_eq!(state.illuminated_fraction, 0.0, epsilon = 1e-4);
        assert!(state.brightness > 0.0);
        assert!(state.brightness < 0.01);
    }

    #[test]
    fn test_crescent_brightness_between_extremes() {
        let (sun_full, moon_full) = geometry_for_phase(0.0);
        let full = moon_photometry(&sun_full, &moon_full, DEFAULT_SURGE_THRESHOLD_DEG);

        let (sun_q, moon_q) = geometry_for_phase(90.0);
        let quarter = moon_photometry(&sun_q, &moon_q, DEFAULT_SURGE_THRESHOLD_DEG);

        let (sun_new, moon_new) = geometry_for_phase(180.0);
        let new = moon_photometry(&sun_new, &moon_new, DEFAULT_SURGE_THRESHOLD_DEG);

        assert!(full.brightness > quarter.brightness);
        assert!(quarter.brightness > new.brightness);
    }

    #[test]
    fn test_zero_distance_does_not_diverge() {
        let sun = Vector3::new(AU, 0.0, 0.0);
        let state = moon_photometry(&sun, &Vector3::zeros(), DEFAULT_SURGE_THRESHOLD_DEG);
        assert!(state.brightness.is_finite());
    }
}
