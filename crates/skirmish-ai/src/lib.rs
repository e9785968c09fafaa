//! Combat AI for the naval skirmish.
//!
//! Implements target acquisition, pickup seeking, the approach/retreat/orbit
//! behaviour state machine, and the tunable behaviour profile.

pub mod fsm;
pub mod profiles;
pub mod targeting;

pub use skirmish_core as core;
