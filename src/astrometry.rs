//! # Astrometry adapter
//!
//! This module normalizes the raw output of an external ephemeris provider
//! into **topocentric altitude/azimuth/distance** for the Sun and the Moon,
//! ready for the photometric models downstream.
//!
//! ## Overview
//!
//! The provider is abstracted behind the [`EphemerisProvider`] trait: it
//! returns apparent geocentric right ascension, declination and distance for
//! a [`Body`]. The adapter then:
//!
//! 1. Converts RA/Dec to horizontal coordinates with the hour-angle formulas
//!    (GMST + observer longitude).
//! 2. Applies a **diurnal parallax** correction in altitude from the site's
//!    geocentric radius and the body distance (about a degree for the Moon,
//!    negligible for the Sun).
//! 3. Applies the **Sæmundsson refraction** correction when enabled, so the
//!    apparent altitude near 0° stays continuous; the correction vanishes
//!    asymptotically toward the zenith.
//!
//! ## Conventions
//!
//! - Altitude in degrees, clamped to [−90°, 90°].
//! - Azimuth in degrees from North through East, normalized to [0°, 360°).
//! - Distances in kilometers.
//! - Topocentric vectors are East-North-Up, in kilometers.

use hifitime::Epoch;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::{Degree, Kilometer};
use crate::observer::Observer;
use crate::skylux_errors::SkyluxError;
use crate::time::local_sidereal_time;

/// Celestial bodies resolvable by an [`EphemerisProvider`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun,
    Moon,
}

/// Apparent geocentric equatorial coordinates of a body, as returned by the
/// ephemeris provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaDec {
    /// Right ascension in degrees
    pub ra: Degree,
    /// Declination in degrees
    pub dec: Degree,
    /// Geocentric distance in kilometers
    pub distance: Kilometer,
}

/// Capability interface over an external astrometric dataset.
///
/// The core assumes sub-arcsecond-class precision but imposes no
/// implementation: a JPL ephemeris reader, an analytic theory or a fixture
/// provider for tests all fit. Implementations must be pure reads; the scene
/// never mutates the provider.
pub trait EphemerisProvider {
    /// Apparent geocentric RA/Dec/distance of `body` at `epoch`.
    ///
    /// Errors
    /// ------
    /// * [`SkyluxError::EphemerisUnavailable`] if the epoch falls outside the
    ///   supported range of the underlying dataset.
    fn body_position(&self, epoch: &Epoch, body: Body) -> Result<RaDec, SkyluxError>;
}

impl<P: EphemerisProvider + ?Sized> EphemerisProvider for &P {
    fn body_position(&self, epoch: &Epoch, body: Body) -> Result<RaDec, SkyluxError> {
        (**self).body_position(epoch, body)
    }
}

/// Topocentric horizontal position of a body. Immutable once produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    /// Apparent altitude in degrees, clamped to [−90°, 90°]
    pub altitude: Degree,
    /// Azimuth in degrees from North through East, in [0°, 360°)
    pub azimuth: Degree,
    /// Topocentric distance in kilometers
    pub distance: Kilometer,
}

impl BodyPosition {
    /// Zenith angle in degrees, the complement of the altitude
    pub fn zenith_angle(&self) -> Degree {
        90.0 - self.altitude
    }

    /// Topocentric direction vector in the East-North-Up frame, scaled by the
    /// body distance (kilometers).
    pub fn topocentric_vector(&self) -> Vector3<f64> {
        let alt = self.altitude.to_radians();
        let az = self.azimuth.to_radians();
        self.distance * Vector3::new(alt.cos() * az.sin(), alt.cos() * az.cos(), alt.sin())
    }
}

/// Sun and Moon positions for one query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunMoonPositions {
    pub sun: BodyPosition,
    pub moon: BodyPosition,
}

/// Convert apparent RA/Dec to geometric horizontal coordinates.
///
/// Uses the classical hour-angle relations with the observer's geodetic
/// latitude and the local sidereal time.
///
/// Arguments
/// ---------
/// * `ra`: right ascension in degrees.
/// * `dec`: declination in degrees.
/// * `observer`: site providing latitude and longitude.
/// * `epoch`: instant of the query.
///
/// Return
/// ------
/// * `(altitude, azimuth)` in degrees; azimuth from North through East in
///   [0°, 360°).
pub fn radec_to_altaz(
    ra: Degree,
    dec: Degree,
    observer: &Observer,
    epoch: &Epoch,
) -> (Degree, Degree) {
    let lat = observer.latitude.into_inner().to_radians();
    let lst = local_sidereal_time(epoch, observer.longitude.into_inner().to_radians());
    let hour_angle = lst - ra.to_radians();
    let dec = dec.to_radians();

    let sin_alt = lat.sin() * dec.sin() + lat.cos() * dec.cos() * hour_angle.cos();
    let alt = sin_alt.clamp(-1.0, 1.0).asin();

    let az = (-dec.cos() * hour_angle.sin())
        .atan2(dec.sin() * lat.cos() - dec.cos() * lat.sin() * hour_angle.cos());

    (alt.to_degrees(), az.to_degrees().rem_euclid(360.0))
}

/// Atmospheric refraction at a given geometric altitude, in degrees.
///
/// Sæmundsson's formula, `R = 1.02 / tan(h + 10.3/(h + 5.11))` arcminutes,
/// clamped to be non-negative. The correction is about 0.48° at the horizon,
/// drops below 0.02° above 45° altitude and vanishes at the zenith, so the
/// apparent altitude is a continuous function of the geometric one.
pub fn refraction_correction(altitude: Degree) -> Degree {
    // The formula is an horizon fit; far below the horizon the argument of
    // the tangent goes through a pole, so taper to zero there.
    if altitude < -5.0 {
        return 0.0;
    }
    let arg = (altitude + 10.3 / (altitude + 5.11)).to_radians();
    let refraction_arcmin = 1.02 / arg.tan();
    (refraction_arcmin / 60.0).max(0.0)
}

/// Diurnal parallax correction in altitude, in degrees (non-negative).
///
/// A topocentric observer sees a nearby body lower than the geocentric
/// direction by `asin((r_site / d) · cos(alt))`. About 0.95° for the Moon at
/// the horizon, under 0.003° for the Sun.
fn parallax_correction(altitude: Degree, distance: Kilometer, observer: &Observer) -> Degree {
    if distance <= 0.0 {
        return 0.0;
    }
    let ratio = (observer.geocentric_distance_km() / distance).min(1.0);
    (ratio * altitude.to_radians().cos())
        .clamp(-1.0, 1.0)
        .asin()
        .to_degrees()
}

/// Build the topocentric [`BodyPosition`] of a body from its geocentric
/// coordinates.
///
/// Applies the diurnal parallax correction and, when `refraction` is set, the
/// Sæmundsson refraction correction. The resulting altitude is clamped to
/// [−90°, 90°].
pub fn apparent_position(
    radec: &RaDec,
    observer: &Observer,
    epoch: &Epoch,
    refraction: bool,
) -> BodyPosition {
    let (mut altitude, azimuth) = radec_to_altaz(radec.ra, radec.dec, observer, epoch);

    altitude -= parallax_correction(altitude, radec.distance, observer);
    if refraction {
        altitude += refraction_correction(altitude);
    }

    BodyPosition {
        altitude: altitude.clamp(-90.0, 90.0),
        azimuth,
        distance: radec.distance,
    }
}

/// Resolve the topocentric Sun and Moon positions for one query.
///
/// Arguments
/// ---------
/// * `provider`: the external ephemeris source.
/// * `epoch`: instant of the query.
/// * `observer`: validated ground site.
/// * `refraction`: whether to apply the horizon refraction correction.
///
/// Return
/// ------
/// * The [`SunMoonPositions`] pair, or the provider's
///   [`SkyluxError::EphemerisUnavailable`].
pub fn sun_moon_positions<P: EphemerisProvider>(
    provider: &P,
    epoch: &Epoch,
    observer: &Observer,
    refraction: bool,
) -> Result<SunMoonPositions, SkyluxError> {
    let sun = provider.body_position(epoch, Body::Sun)?;
    let moon = provider.body_position(epoch, Body::Moon)?;

    Ok(SunMoonPositions {
        sun: apparent_position(&sun, observer, epoch, refraction),
        moon: apparent_position(&moon, observer, epoch, refraction),
    })
}

#[cfg(test)]
mod astrometry_test {
    use super::*;
    use crate::constants::AU;
    use crate::time::gmst;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use hifitime::TimeScale;

    fn test_epoch() -> Epoch {
        Epoch::from_mjd_in_time_scale(59215.0, TimeScale::UTC)
    }

    #[test]
    fn test_culmination_altitude() {
        // A body on the local meridian (hour angle 0) culminates at
        // 90° − |lat − dec|, due South for a northern observer.
        let observer = Observer::new(45.0, 0.0, 0.0).unwrap();
        let epoch = test_epoch();
        let ra = gmst(epoch.to_mjd_utc_days()).to_degrees();

        let (alt, az) = radec_to_altaz(ra, 0.0, &observer, &epoch);
        assert_relative_eq!(alt, 45.0, epsilon = 1e-9);
        assert_relative_eq!(az, 180.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zenith_pass() {
        // Declination equal to the latitude, hour angle zero: the body is at
        // the zenith.
        let observer = Observer::new(30.0, 10.0, 0.0).unwrap();
        let epoch = test_epoch();
        let lst = local_sidereal_time(&epoch, observer.longitude.into_inner().to_radians());

        let (alt, _az) = radec_to_altaz(lst.to_degrees(), 30.0, &observer, &epoch);
        assert_relative_eq!(alt, 90.0, epsilon = 1e-6);
    }

    #[test]
    fn test_refraction_profile() {
        // Classical value at the horizon, about 29 arcminutes
        assert_abs_diff_eq!(refraction_correction(0.0), 0.48, epsilon = 0.02);
        // Vanishes toward the zenith
        assert!(refraction_correction(45.0) < 0.02);
        assert!(refraction_correction(89.0) < 0.001);
        // Never negative, even where the fit changes sign
        assert!(refraction_correction(90.0) >= 0.0);
        assert_eq!(refraction_correction(-30.0), 0.0);
    }

    #[test]
    fn test_refraction_continuity_at_horizon() {
        // No jump across altitude 0: sample a fine grid straddling the
        // horizon and bound the step-to-step variation.
        let mut previous = refraction_correction(-1.0);
        let mut alt = -1.0;
        while alt <= 1.0 {
            alt += 0.01;
            let current = refraction_correction(alt);
            assert!((current - previous).abs() < 0.01);
            previous = current;
        }
    }

    #[test]
    fn test_moon_parallax_magnitude() {
        // At the horizon the lunar parallax is close to 0.95°
        let observer = Observer::new(0.0, 0.0, 0.0).unwrap();
        let p = parallax_correction(0.0, 384_400.0, &observer);
        assert_abs_diff_eq!(p, 0.95, epsilon = 0.01);

        // The solar parallax is negligible
        let p_sun = parallax_correction(0.0, AU, &observer);
        assert!(p_sun < 0.003);

        // Zero distance must not blow up
        assert_eq!(parallax_correction(45.0, 0.0, &observer), 0.0);
    }

    #[test]
    fn test_topocentric_vector() {
        let east = BodyPosition {
            altitude: 0.0,
            azimuth: 90.0,
            distance: 1000.0,
        };
        let v = east.topocentric_vector();
        assert_relative_eq!(v.x, 1000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(v.y, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(v.z, 0.0, epsilon = 1e-9);

        let zenith = BodyPosition {
            altitude: 90.0,
            azimuth: 0.0,
            distance: 2.0,
        };
        assert_relative_eq!(zenith.topocentric_vector().z, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_altitude_clamped() {
        // A zenith body plus refraction must not exceed 90°
        let observer = Observer::new(30.0, 10.0, 0.0).unwrap();
        let epoch = test_epoch();
        let lst = local_sidereal_time(&epoch, observer.longitude.into_inner().to_radians());

        let radec = RaDec {
            ra: lst.to_degrees(),
            dec: 30.0,
            distance: AU,
        };
        let pos = apparent_position(&radec, &observer, &epoch, true);
        assert!(pos.altitude <= 90.0);
        assert!((0.0..360.0).contains(&pos.azimuth));
    }
}
