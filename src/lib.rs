//! # Skylux
//!
//! Physically plausible outdoor illuminance for simulation, rendering and
//! sensor modeling: the Sun, the Moon (phase, earthshine, opposition surge)
//! and the stellar background, attenuated by a turbidity-dependent
//! atmosphere, across the full day/night cycle including twilight.
//!
//! Raw ephemerides and the star catalog are external collaborators consumed
//! through the [`astrometry::EphemerisProvider`] and
//! [`starfield::StarCatalog`] traits. The single query entry point is
//! [`scene::Scene::compute_illumination`].
//!
//! ```rust,no_run
//! use hifitime::Epoch;
//! use skylux::atmosphere::AtmosphericState;
//! use skylux::observer::Observer;
//! use skylux::scene::Scene;
//! # use skylux::astrometry::{Body, EphemerisProvider, RaDec};
//! # use skylux::skylux_errors::SkyluxError;
//! # struct MyEphemeris;
//! # impl EphemerisProvider for MyEphemeris {
//! #     fn body_position(&self, _: &Epoch, _: Body) -> Result<RaDec, SkyluxError> {
//! #         unimplemented!()
//! #     }
//! # }
//!
//! let catalog: Vec<skylux::starfield::StarEntry> = Vec::new();
//! let scene = Scene::new(MyEphemeris, catalog);
//! let prague = Observer::new(50.0755, 14.4378, 200.0)?;
//! let epoch = Epoch::from_gregorian_utc_hms(2024, 10, 17, 22, 0, 0);
//!
//! let result = scene.compute_illumination(&epoch, &prague, &AtmosphericState::new(3.0))?;
//! println!("total: {:.5} lx (moon {:.5} lx)", result.total, result.moon);
//! # Ok::<(), SkyluxError>(())
//! ```

pub mod astrometry;
pub mod atmosphere;
pub mod constants;
pub mod observer;
pub mod scene;
pub mod skylux_errors;
pub mod sources;
pub mod starfield;
pub mod time;
