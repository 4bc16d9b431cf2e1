//! Effect Registry
//!
//! The fixed catalog of effect kinds and the per-track settings built from
//! it. Pure data; nothing here processes audio.

mod registry;
mod settings;

pub use registry::{EffectKind, ParamSpec};
pub use settings::{EffectRack, EffectSettings, ParamMap};
