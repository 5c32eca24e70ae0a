//! Offline calculator
//!
//! Runs the same validation and projection as the HTTP API against a
//! catalog directory on disk.

pub mod cli;
pub mod commands;
pub mod render;
