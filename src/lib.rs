//! Anger-triggered rhythm combat for a first-person prison walking sim.
//!
//! Pushing NPCs fills an anger meter; a full meter starts a four-lane
//! rhythm fight against one of them. The core lives in [`state`] and only
//! talks to the scene through [`state::traits::FightHost`] and typed
//! [`shared::FightEvent`]s; [`input`] and [`logic`] wire it to threads.

pub mod input;
pub mod logic;
pub mod models;
pub mod shared;
pub mod state;
pub mod system;
