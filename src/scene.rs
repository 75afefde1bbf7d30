//! # Illumination scene
//!
//! The [`Scene`] is the façade that wires the astrometry adapter, the light
//! source models, the atmosphere and the star catalog into the single query
//! API of the crate:
//! [`compute_illumination`](Scene::compute_illumination).
//!
//! ## Query model
//!
//! Every query is a pure function of `(epoch, observer, atmospheric state)`
//! plus the scene's immutable configuration: nothing is cached or mutated
//! across calls, so a single `Scene` can serve a time series or a grid of
//! observers from many threads without coordination.
//!
//! ## Aggregation
//!
//! ```text
//! ephemeris ──► sun/moon alt-az ──► extinction ──► sun & moon components
//! catalog   ─────────────────────► extinction ──► star component
//!                                                 Σ = IlluminationResult
//! ```
//!
//! Sun and Moon contribute their extraterrestrial illuminance attenuated by
//! the extinction factor at their own zenith angle and projected on the
//! horizontal surface (`sin alt`); a body at or below the horizon contributes
//! exactly zero, so the total transitions smoothly into night levels carried
//! by the Moon and the stars.

use hifitime::Epoch;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::astrometry::{sun_moon_positions, BodyPosition, EphemerisProvider};
use crate::atmosphere::{extinction, AtmosphericState};
use crate::constants::{Degree, Lux, DEFAULT_SURGE_THRESHOLD_DEG};
use crate::observer::Observer;
use crate::skylux_errors::SkyluxError;
use crate::sources::moon::{moon_photometry, MoonPhotometricState};
use crate::sources::sun;
use crate::starfield::{stellar_background, StarCatalog};

/// Tunable model parameters of a [`Scene`].
///
/// All knobs are explicit configuration rather than hidden module state, so
/// every computation stays a pure function of its declared inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Apply the horizon refraction correction to apparent altitudes
    pub refraction_correction: bool,
    /// Phase angle in degrees beyond which the lunar opposition surge is off
    pub opposition_surge_threshold: Degree,
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig {
            refraction_correction: true,
            opposition_surge_threshold: DEFAULT_SURGE_THRESHOLD_DEG,
        }
    }
}

/// Illuminance of the scene with its per-source breakdown. Output, immutable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IlluminationResult {
    /// Total horizontal illuminance in lux
    pub total: Lux,
    /// Direct solar component in lux (zero below the horizon)
    pub sun: Lux,
    /// Lunar component in lux (zero below the horizon)
    pub moon: Lux,
    /// Aggregate stellar background in lux
    pub stars: Lux,
    /// Topocentric Sun position used for the query
    pub sun_position: BodyPosition,
    /// Topocentric Moon position used for the query
    pub moon_position: BodyPosition,
    /// Photometric state of the Moon (phase, earthshine, surge)
    pub moon_state: MoonPhotometricState,
}

/// The illumination scene: ephemeris provider, star catalog and model
/// configuration.
///
/// Both collaborators are consumed through capability traits
/// ([`EphemerisProvider`], [`StarCatalog`]) so they are swappable without
/// touching the photometric formulas.
#[derive(Debug, Clone)]
pub struct Scene<P, C> {
    provider: P,
    catalog: C,
    config: SceneConfig,
}

impl<P: EphemerisProvider, C: StarCatalog> Scene<P, C> {
    /// Build a scene with the default configuration.
    pub fn new(provider: P, catalog: C) -> Self {
        Scene {
            provider,
            catalog,
            config: SceneConfig::default(),
        }
    }

    /// Build a scene with an explicit configuration.
    pub fn with_config(provider: P, catalog: C, config: SceneConfig) -> Self {
        Scene {
            provider,
            catalog,
            config,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Compute the total outdoor illuminance for one query.
    ///
    /// This is the sole entry point the core exposes to surrounding
    /// functionality. Queries are independent: the scene holds no mutable
    /// state, so a batch of `(epoch, observer, atmosphere)` triples is
    /// embarrassingly parallel.
    ///
    /// Arguments
    /// ---------
    /// * `epoch`: instant of the query as a [`hifitime::Epoch`].
    /// * `observer`: validated ground site.
    /// * `atmosphere`: turbidity state for the query.
    ///
    /// Return
    /// ------
    /// * An [`IlluminationResult`] with the total illuminance, the
    ///   per-source components and the photometric diagnostics.
    ///
    /// Errors
    /// ------
    /// * [`SkyluxError::EphemerisUnavailable`] if the provider does not
    ///   cover the epoch.
    /// * [`SkyluxError::InvalidTurbidity`] for negative or non-finite
    ///   turbidity.
    pub fn compute_illumination(
        &self,
        epoch: &Epoch,
        observer: &Observer,
        atmosphere: &AtmosphericState,
    ) -> Result<IlluminationResult, SkyluxError> {
        let positions = sun_moon_positions(
            &self.provider,
            epoch,
            observer,
            self.config.refraction_correction,
        )?;

        // Sun: extraterrestrial illuminance scaled by the actual distance,
        // extinguished at the solar zenith angle, projected on the
        // horizontal. Below the horizon the direct contribution is zero; no
        // extrapolation past that boundary.
        let sun_component = extinguished_component(
            sun::extraterrestrial_illuminance(positions.sun.distance),
            &positions.sun,
            atmosphere,
        )?;

        // Moon: combined brightness from the 3D phase geometry, then the
        // same extinction and projection as the Sun.
        let moon_state = moon_photometry(
            &positions.sun.topocentric_vector(),
            &positions.moon.topocentric_vector(),
            self.config.opposition_surge_threshold,
        );
        let moon_component =
            extinguished_component(moon_state.brightness, &positions.moon, atmosphere)?;

        let star_component = stellar_background(&self.catalog, observer, epoch, atmosphere)?;

        let total = sun_component + moon_component + star_component;
        debug!(
            "illumination: total = {total:.5} lx (sun = {sun_component:.5}, moon = {moon_component:.5}, stars = {star_component:.6}), \
             sun alt = {:.2}°, moon alt = {:.2}°, phase = {:.1}°",
            positions.sun.altitude, positions.moon.altitude, moon_state.phase_angle
        );

        Ok(IlluminationResult {
            total,
            sun: sun_component,
            moon: moon_component,
            stars: star_component,
            sun_position: positions.sun,
            moon_position: positions.moon,
            moon_state,
        })
    }
}

/// Horizontal-surface illuminance of one body: extraterrestrial brightness ×
/// extinction factor × sin(altitude) projection, exactly zero at or below
/// the horizon.
fn extinguished_component(
    extraterrestrial: Lux,
    position: &BodyPosition,
    atmosphere: &AtmosphericState,
) -> Result<Lux, SkyluxError> {
    if position.altitude <= 0.0 {
        // Validate the turbidity even when the body is down, so an invalid
        // query fails regardless of geometry.
        extinction(position.zenith_angle(), atmosphere.turbidity)?;
        return Ok(0.0);
    }
    let result = extinction(position.zenith_angle(), atmosphere.turbidity)?;
    let horizontal_projection = position.altitude.to_radians().sin();
    Ok(extraterrestrial * result.extinction_factor * horizontal_projection)
}
