//! # Stellar background model
//!
//! Aggregate sky contribution of the stars above the horizon, subject to
//! atmospheric extinction.
//!
//! The catalog is consumed through the [`StarCatalog`] capability trait: an
//! enumerable, read-only collection of `{ra, dec, magnitude}` records loaded
//! once and treated as immutable for the process lifetime, which makes
//! concurrent batch queries lock-free.
//!
//! The aggregation is intentionally a flat sum of extinguished per-star
//! illuminances rather than a scattering simulation: precision below the
//! catalog's own magnitude precision is not required. Summed over a
//! naked-eye catalog this lands near the 2.7·10⁻⁴ lx total starlight figure
//! of the source model.

use hifitime::Epoch;
use serde::{Deserialize, Serialize};

use crate::astrometry::radec_to_altaz;
use crate::atmosphere::{air_mass, extinction_coefficient, AtmosphericState};
use crate::constants::{Degree, Lux, VBAND_MAG0_LUX};
use crate::observer::Observer;
use crate::skylux_errors::SkyluxError;

/// One star catalog record, read-only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarEntry {
    /// Right ascension in degrees
    pub ra: Degree,
    /// Declination in degrees
    pub dec: Degree,
    /// Apparent visual magnitude
    pub magnitude: f64,
}

impl StarEntry {
    /// Illuminance of the star outside the atmosphere, in lux, from the
    /// magnitude scale zero point.
    pub fn extraterrestrial_lux(&self) -> Lux {
        VBAND_MAG0_LUX * 10f64.powf(-0.4 * self.magnitude)
    }
}

/// Capability interface over an external star catalog.
///
/// Implementations expose their records as a slice; the crate ships blanket
/// implementations for slices and vectors so a test fixture is just a
/// `Vec<StarEntry>`.
pub trait StarCatalog {
    fn entries(&self) -> &[StarEntry];
}

impl StarCatalog for [StarEntry] {
    fn entries(&self) -> &[StarEntry] {
        self
    }
}

impl StarCatalog for Vec<StarEntry> {
    fn entries(&self) -> &[StarEntry] {
        self.as_slice()
    }
}

impl<C: StarCatalog + ?Sized> StarCatalog for &C {
    fn entries(&self) -> &[StarEntry] {
        (**self).entries()
    }
}

/// Aggregate illuminance of the stars above the horizon, in lux.
///
/// For each catalog entry the geometric altitude is computed for the query
/// epoch and observer; stars at or below the horizon contribute zero, the
/// rest contribute their magnitude-derived illuminance attenuated by the
/// Beer–Lambert factor at their own zenith angle. The total is strictly
/// decreasing in turbidity and tends to zero in fog.
///
/// Arguments
/// ---------
/// * `catalog`: read-only star catalog.
/// * `observer`: validated ground site.
/// * `epoch`: instant of the query.
/// * `atmosphere`: turbidity state of the query.
///
/// Return
/// ------
/// * The summed star component in lux.
///
/// Errors
/// ------
/// * [`SkyluxError::InvalidTurbidity`] for negative or non-finite turbidity.
pub fn stellar_background<C: StarCatalog + ?Sized>(
    catalog: &C,
    observer: &Observer,
    epoch: &Epoch,
    atmosphere: &AtmosphericState,
) -> Result<Lux, SkyluxError> {
    let k = extinction_coefficient(atmosphere.turbidity)?;

    let mut total: Lux = 0.0;
    for star in catalog.entries() {
        let (altitude, _azimuth) = radec_to_altaz(star.ra, star.dec, observer, epoch);
        if altitude <= 0.0 {
            continue;
        }
        let transmittance = (-k * air_mass(90.0 - altitude)).exp();
        total += star.extraterrestrial_lux() * transmittance;
    }

    Ok(total)
}

#[cfg(test)]
mod starfield_test {
    use super::*;
    use crate::time::local_sidereal_time;
    use approx::assert_relative_eq;
    use hifitime::TimeScale;

    fn test_epoch() -> Epoch {
        Epoch::from_mjd_in_time_scale(59215.0, TimeScale::UTC)
    }

    /// A star that culminates at the prescribed altitude for an equatorial
    /// observer at Greenwich.
    fn star_at_altitude(altitude: Degree, magnitude: f64, epoch: &Epoch) -> StarEntry {
        let lst = local_sidereal_time(epoch, 0.0).to_degrees();
        let hour_angle = altitude.to_radians().sin().clamp(-1.0, 1.0).acos();
        StarEntry {
            ra: (lst - hour_angle.to_degrees()).rem_euclid(360.0),
            dec: 0.0,
            magnitude,
        }
    }

    #[test]
    fn test_magnitude_scale() {
        let vega = StarEntry {
            ra: 0.0,
            dec: 0.0,
            magnitude: 0.0,
        };
        assert_eq!(vega.extraterrestrial_lux(), VBAND_MAG0_LUX);

        // Five magnitudes are a factor of 100
        let faint = StarEntry {
            ra: 0.0,
            dec: 0.0,
            magnitude: 5.0,
        };
        assert_relative_eq!(
            faint.extraterrestrial_lux() * 100.0,
            VBAND_MAG0_LUX,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_below_horizon_contributes_zero() {
        let observer = Observer::new(0.0, 0.0, 0.0).unwrap();
        let epoch = test_epoch();
        let catalog = vec![star_at_altitude(-20.0, -1.0, &epoch)];

        let total =
            stellar_background(&catalog, &observer, &epoch, &AtmosphericState::new(1.0)).unwrap();
        assert_eq!(total, 0.0);
    }

    #[test]
    fn test_extinction_monotone_in_turbidity() {
        let observer = Observer::new(0.0, 0.0, 0.0).unwrap();
        let epoch = test_epoch();
        let catalog = vec![
            star_at_altitude(80.0, 1.0, &epoch),
            star_at_altitude(45.0, 2.0, &epoch),
            star_at_altitude(10.0, 0.5, &epoch),
        ];

        let mut previous = f64::INFINITY;
        for turbidity in [1.0, 2.0, 5.0, 10.0, 50.0] {
            let total = stellar_background(
                &catalog,
                &observer,
                &epoch,
                &AtmosphericState::new(turbidity),
            )
            .unwrap();
            assert!(total > 0.0);
            assert!(total < previous, "star component not decreasing at T = {turbidity}");
            previous = total;
        }

        // Stars disappear in dense fog
        let fog = stellar_background(
            &catalog,
            &observer,
            &epoch,
            &AtmosphericState::new(500.0),
        )
        .unwrap();
        assert!(fog < 1e-12);
    }

    #[test]
    fn test_low_star_dimmer_than_high_star() {
        // Same magnitude, but the horizon star crosses ~38 air masses
        let observer = Observer::new(0.0, 0.0, 0.0).unwrap();
        let epoch = test_epoch();
        let atmosphere = AtmosphericState::new(2.0);

        let high = stellar_background(
            &vec![star_at_altitude(85.0, 1.0, &epoch)],
            &observer,
            &epoch,
            &atmosphere,
        )
        .unwrap();
        let low = stellar_background(
            &vec![star_at_altitude(2.0, 1.0, &epoch)],
            &observer,
            &epoch,
            &atmosphere,
        )
        .unwrap();
        assert!(high > low);
    }
}
