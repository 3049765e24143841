//! Subsystem modules for FRIDAY.

pub mod agents;
pub mod comms;
pub mod context;
pub mod memory;
