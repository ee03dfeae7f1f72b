//! Ambient utilities shared by the Peggy binaries.

pub mod logging;
