//! # Constants and type definitions for Skylux
//!
//! This module centralizes the **physical constants**, **photometric reference
//! values**, and **common type definitions** used throughout the `skylux`
//! library.
//!
//! ## Overview
//!
//! - Astronomical and geophysical constants
//! - Photometric reference values (solar constant, lunar albedo, V-band zero point)
//! - Atmospheric model coefficients (Rayleigh/aerosol extinction, air-mass fits)
//! - Core type aliases used across the crate
//!
//! These definitions are used by all main modules: astrometry, atmosphere,
//! light sources and the illumination scene.

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00 TT)
pub const T2000: f64 = 51544.5;

/// Earth equatorial radius in meters (GRS1980/WGS84)
pub const EARTH_MAJOR_AXIS: f64 = 6_378_137.0;

/// Earth polar radius in meters (GRS1980/WGS84)
pub const EARTH_MINOR_AXIS: f64 = 6_356_752.3;

/// Mean radius of the Moon in kilometers
pub const MOON_RADIUS_KM: f64 = 1_737.4;

// -------------------------------------------------------------------------------------------------
// Photometric reference values
// -------------------------------------------------------------------------------------------------

/// Solar illuminance constant just outside the atmosphere, in lux
/// (Undeger 2009, section 4.1)
pub const SOLAR_CONSTANT_LUX: f64 = 127_500.0;

/// Solar irradiance just outside the atmosphere, in W/m².
/// Used to convert the earthshine irradiance term into lux.
pub const SOLAR_IRRADIANCE_WM2: f64 = 1_300.0;

/// Mean visual albedo of the Moon
pub const MOON_ALBEDO: f64 = 0.12;

/// Geometric factor for a Lambertian sphere (ratio of its mean apparent
/// brightness to that of a flat Lambertian disk of the same radius)
pub const LAMBERT_SPHERE_FACTOR: f64 = 2.0 / 3.0;

/// Peak irradiance of earthshine on the lunar surface, in W/m²
/// (Earth seen full from the Moon; Undeger 2009, Eq. 11)
pub const EARTHSHINE_PEAK_WM2: f64 = 0.095;

/// Maximum brightening of the opposition surge, reached at phase angle 0°.
/// The multiplier ramps linearly from `1 + OPPOSITION_SURGE_AMPLITUDE` down
/// to 1 at the surge threshold.
pub const OPPOSITION_SURGE_AMPLITUDE: f64 = 0.315;

/// Default phase angle in degrees beyond which the opposition surge vanishes
pub const DEFAULT_SURGE_THRESHOLD_DEG: f64 = 7.0;

/// Illuminance of a star of apparent visual magnitude 0 outside the
/// atmosphere, in lux (Allen, Astrophysical Quantities)
pub const VBAND_MAG0_LUX: f64 = 2.54e-6;

// -------------------------------------------------------------------------------------------------
// Atmospheric model coefficients
// -------------------------------------------------------------------------------------------------

/// Reference wavelength in micrometers: the photopic vision peak, taken as
/// representative of the whole visible band for extinction purposes.
pub const WAVELENGTH_UM: f64 = 0.555;

/// Rayleigh extinction coefficient of the standard atmosphere:
/// k_rayleigh = 0.008735 · λ^(−4.08) at [`WAVELENGTH_UM`]
pub const RAYLEIGH_COEFF: f64 = 0.008735;

/// Spectral exponent of the Rayleigh extinction law
pub const RAYLEIGH_EXPONENT: f64 = -4.08;

/// Linear turbidity coefficients of the aerosol (Mie) extinction term:
/// (A·T + B) · λ^(−1.3), after Undeger 2009, Eq. 17
pub const AEROSOL_TURBIDITY_SLOPE: f64 = 0.04608;

/// Offset of the aerosol extinction term (see [`AEROSOL_TURBIDITY_SLOPE`])
pub const AEROSOL_TURBIDITY_OFFSET: f64 = -0.04586;

/// Spectral exponent of the aerosol extinction law
pub const AEROSOL_EXPONENT: f64 = -1.3;

/// Turbidity of the ideal clear sky (pure Rayleigh atmosphere)
pub const CLEAR_SKY_TURBIDITY: f64 = 1.0;

/// Default turbidity of [`crate::atmosphere::AtmosphericState`]: a clear sky
pub const DEFAULT_TURBIDITY: f64 = 2.0;

/// Additional air mass accumulated below the geometric horizon before the
/// twilight continuation saturates (Rozenberg horizon value)
pub const TWILIGHT_AIR_MASS_LIMIT: f64 = 40.0;

/// Angular scale in degrees of the below-horizon air-mass saturation
pub const TWILIGHT_AIR_MASS_SCALE_DEG: f64 = 6.0;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Distance in meters
pub type Meter = f64;
/// Illuminance in lux
pub type Lux = f64;
/// Modified Julian Date (days)
pub type MJD = f64;
