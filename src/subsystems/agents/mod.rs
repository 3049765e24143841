//! Agents subsystem.

pub mod friday;
