//! # Observer & site geometry
//!
//! This module defines the [`Observer`] type: a ground site described by its
//! geodetic latitude, longitude and elevation, validated at construction and
//! stored as NaN-free values.
//!
//! ## Frames & conventions
//!
//! - Latitude: **degrees**, north positive, range [−90°, 90°].
//! - Longitude: **degrees**, east positive, range [−180°, 360°] (both the
//!   signed and the 0–360 east conventions are accepted).
//! - Elevation: **meters** above the reference ellipsoid.
//!
//! The constructor also precomputes the **geocentric parallax coordinates**
//! (ρ·cosφ′, ρ·sinφ′), where ρ is the geocentric distance in Earth radii and
//! φ′ the geocentric latitude. These account for Earth oblateness and feed
//! the diurnal parallax correction of the astrometry adapter.
//!
//! ## Errors
//!
//! [`Observer::new`] rejects out-of-range coordinates with
//! [`SkyluxError::InvalidObserver`] before any computation takes place, and
//! NaN inputs through the [`ordered_float::NotNan`] wrappers.

use ordered_float::NotNan;

use crate::constants::{Degree, Kilometer, Meter, EARTH_MAJOR_AXIS, EARTH_MINOR_AXIS};
use crate::skylux_errors::SkyluxError;

/// A ground-based observer with validated geodetic coordinates.
///
/// Immutable per query: every illumination computation takes the observer by
/// reference and never mutates it, so instances can be freely shared across
/// threads for batch evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Observer {
    /// Geodetic latitude in degrees, north positive
    pub latitude: NotNan<f64>,
    /// Geodetic longitude in degrees, east positive
    pub longitude: NotNan<f64>,
    /// Elevation above the reference ellipsoid in meters
    pub elevation: NotNan<f64>,
    /// ρ·cosφ′ in Earth equatorial radii (oblateness-corrected)
    rho_cos_phi: f64,
    /// ρ·sinφ′ in Earth equatorial radii (oblateness-corrected)
    rho_sin_phi: f64,
}

impl Observer {
    /// Build an observer from geodetic coordinates.
    ///
    /// Arguments
    /// ---------
    /// * `latitude`: geodetic latitude in **degrees**, north positive.
    /// * `longitude`: geodetic longitude in **degrees**, east positive.
    /// * `elevation`: elevation above the ellipsoid in **meters**.
    ///
    /// Return
    /// ------
    /// * A validated [`Observer`] with precomputed parallax coordinates.
    ///
    /// Errors
    /// ------
    /// * [`SkyluxError::InvalidObserver`] if the latitude is outside
    ///   [−90°, 90°] or the longitude outside [−180°, 360°].
    /// * [`SkyluxError::NanInput`] if any coordinate is NaN.
    pub fn new(latitude: Degree, longitude: Degree, elevation: Meter) -> Result<Self, SkyluxError> {
        let latitude = NotNan::new(latitude)?;
        let longitude = NotNan::new(longitude)?;
        let elevation = NotNan::new(elevation)?;

        if !(-90.0..=90.0).contains(&latitude.into_inner()) {
            return Err(SkyluxError::InvalidObserver(format!(
                "latitude {latitude}° outside [-90°, 90°]"
            )));
        }
        if !(-180.0..=360.0).contains(&longitude.into_inner()) {
            return Err(SkyluxError::InvalidObserver(format!(
                "longitude {longitude}° outside [-180°, 360°]"
            )));
        }

        let (rho_cos_phi, rho_sin_phi) =
            geodetic_to_parallax(latitude.into_inner(), elevation.into_inner());

        Ok(Observer {
            latitude,
            longitude,
            elevation,
            rho_cos_phi,
            rho_sin_phi,
        })
    }

    /// Geocentric distance of the site in kilometers.
    ///
    /// Derived from the parallax coordinates, so it accounts for Earth
    /// oblateness and site elevation. Used for the diurnal parallax
    /// correction of nearby bodies (the Moon).
    pub fn geocentric_distance_km(&self) -> Kilometer {
        let rho = (self.rho_cos_phi * self.rho_cos_phi + self.rho_sin_phi * self.rho_sin_phi)
            .sqrt();
        rho * EARTH_MAJOR_AXIS / 1000.0
    }
}

/// Convert geodetic latitude and elevation into normalized parallax
/// coordinates (ρ·cosφ′, ρ·sinφ′), in Earth equatorial radii.
///
/// The parametric latitude `u` corrects for Earth oblateness through the
/// polar-to-equatorial axis ratio.
///
/// Arguments
/// ---------
/// * `lat`: geodetic latitude in **degrees**.
/// * `elevation`: elevation above the ellipsoid in **meters**.
///
/// Return
/// ------
/// * `(rho_cos_phi, rho_sin_phi)`: projections of the geocentric site vector
///   on the equatorial plane and the rotation axis, in Earth radii.
pub fn geodetic_to_parallax(lat: Degree, elevation: Meter) -> (f64, f64) {
    let axis_ratio = EARTH_MINOR_AXIS / EARTH_MAJOR_AXIS;
    let lat_rad = lat.to_radians();

    // Parametric latitude
    let u = (lat_rad.sin() * axis_ratio).atan2(lat_rad.cos());

    let rho_sin_phi = axis_ratio * u.sin() + (elevation / EARTH_MAJOR_AXIS) * lat_rad.sin();
    let rho_cos_phi = u.cos() + (elevation / EARTH_MAJOR_AXIS) * lat_rad.cos();

    (rho_cos_phi, rho_sin_phi)
}

#[cfg(test)]
mod observer_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_observer_construction() {
        let obs = Observer::new(50.0755, 14.4378, 200.0).unwrap();
        assert_eq!(obs.latitude.into_inner(), 50.0755);
        assert_eq!(obs.longitude.into_inner(), 14.4378);
        assert_eq!(obs.elevation.into_inner(), 200.0);
    }

    #[test]
    fn test_invalid_coordinates_rejected() {
        assert!(matches!(
            Observer::new(91.0, 0.0, 0.0),
            Err(SkyluxError::InvalidObserver(_))
        ));
        assert!(matches!(
            Observer::new(0.0, -181.0, 0.0),
            Err(SkyluxError::InvalidObserver(_))
        ));
        assert!(matches!(
            Observer::new(f64::NAN, 0.0, 0.0),
            Err(SkyluxError::NanInput(_))
        ));
    }

    #[test]
    fn test_parallax_coordinates() {
        // At the equator and sea level the site sits exactly one equatorial
        // radius from the geocenter, on the equatorial plane.
        let (c, s) = geodetic_to_parallax(0.0, 0.0);
        assert_eq!(c, 1.0);
        assert_eq!(s, 0.0);

        // At the pole the distance is one polar radius, on the rotation axis.
        let (c, s) = geodetic_to_parallax(90.0, 0.0);
        assert_relative_eq!(c, 0.0, epsilon = 1e-12);
        assert_relative_eq!(s, EARTH_MINOR_AXIS / EARTH_MAJOR_AXIS, epsilon = 1e-12);
    }

    #[test]
    fn test_geocentric_distance() {
        let obs = Observer::new(0.0, 0.0, 0.0).unwrap();
        assert_relative_eq!(
            obs.geocentric_distance_km(),
            EARTH_MAJOR_AXIS / 1000.0,
            epsilon = 1e-9
        );

        // Elevation pushes the site outward
        let high = Observer::new(0.0, 0.0, 3000.0).unwrap();
        assert!(high.geocentric_distance_km() > obs.geocentric_distance_km());
    }
}
