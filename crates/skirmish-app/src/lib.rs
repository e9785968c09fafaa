//! Headless host for the naval skirmish.
//!
//! Loads the scenario and host settings, drives the simulation engine at a
//! fixed tick rate on its own thread, and forwards host commands to it.

pub mod config;
pub mod game_loop;
pub mod state;

pub use skirmish_core as core;
