//! Engine Module
//!
//! Timing and transport for the console:
//! - Virtual-clock scheduler for deferred work
//! - Transport (play/stop) and the export placeholder

pub mod scheduler;
pub mod transport;

pub use scheduler::{Fired, Scheduler};
pub use transport::{ExportState, TransportManager, TransportState};
