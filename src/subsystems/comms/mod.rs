//! Comms subsystem — the channels through which the user talks to FRIDAY.
//!
//! Only the console channel exists; it is the conversation loop.

pub mod pty;
