//! Physical models of the individual light sources: the Sun and the Moon.
//!
//! Both models produce **extraterrestrial illuminance** (lux just outside the
//! atmosphere); the extinction and the horizontal-surface projection are
//! applied by the illumination scene.

pub mod moon;
pub mod sun;
