//! Core types and definitions for the naval skirmish simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, components, host commands, snapshots, events, and constants.
//! It has no dependency on any rendering or windowing framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
