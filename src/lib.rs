//! Lumnia - Mixing Studio Console State
//!
//! Lumnia models the console of a mock "AI mixing studio": tracks with a
//! fixed rack of effects, a scripted analysis that switches effects on over
//! time, and transport/export placeholders. No audio is decoded or rendered.
//!
//! # Architecture
//!
//! - `effects`: closed catalog of effect kinds, defaults and parameter ranges
//! - `state`: project snapshot, tracks and the reducer (single mutation path)
//! - `analysis`: the four-stage analysis script and its scheduling plan
//! - `engine`: virtual-clock scheduler, transport and export state
//! - `studio`: controller tying state, timers and transport together

pub mod analysis;
pub mod cli;
pub mod config;
pub mod effects;
pub mod engine;
pub mod error;
pub mod state;
pub mod studio;

pub use config::StudioConfig;
pub use error::{LumniaError, Result};
pub use studio::Studio;
