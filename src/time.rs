use hifitime::Epoch;

use crate::constants::{Radian, DPI, MJD, T2000};

/// Compute the Greenwich Mean Sidereal Time (GMST) in radians
/// for a given Modified Julian Date (UT1 time scale).
///
/// The angle is obtained from the IAU 1982 polynomial for the mean sidereal
/// time at 0h UT1, plus the fractional-day contribution of Earth's rotation
/// scaled by the solar-to-sidereal day ratio.
///
/// Arguments
/// ---------
/// * `tjm`: Modified Julian Date (MJD, UT1 time scale).
///
/// Return
/// ------
/// * GMST angle in radians, normalized to the interval [0, 2π).
///
/// See also
/// ------------
/// * [`local_sidereal_time`] – GMST shifted to the observer meridian.
pub fn gmst(tjm: MJD) -> Radian {
    // Polynomial coefficients for GMST at 0h UT1 (in seconds)
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    // Ratio of sidereal day to solar day
    const RAP: f64 = 1.00273790934;

    // GMST at 0h UT1 of the current date, in Julian centuries since J2000
    let itjm = tjm.floor();
    let t = (itjm - T2000) / 36525.0;
    let mut gmst0 = ((C3 * t + C2) * t + C1) * t + C0;
    gmst0 *= DPI / 86400.0;

    // Rotation accumulated over the fraction of the day
    let h = tjm.fract() * DPI;
    let mut gmst = gmst0 + h * RAP;

    // Normalize to [0, 2π)
    let mut i: i64 = (gmst / DPI).floor() as i64;
    if gmst < 0.0 {
        i -= 1;
    }
    gmst -= i as f64 * DPI;

    gmst
}

/// Local mean sidereal time at an east longitude, in radians.
///
/// UT1 is approximated by UTC: the difference is below 0.9 s by definition of
/// UTC, i.e. under 0.004° of sidereal rotation, negligible for illumination
/// purposes.
///
/// Arguments
/// ---------
/// * `epoch`: instant of the query as a [`hifitime::Epoch`].
/// * `longitude`: geodetic longitude in radians, east positive.
///
/// Return
/// ------
/// * Local sidereal time in radians, normalized to [0, 2π).
pub fn local_sidereal_time(epoch: &Epoch, longitude: Radian) -> Radian {
    let lst = gmst(epoch.to_mjd_utc_days()) + longitude;
    lst.rem_euclid(DPI)
}
