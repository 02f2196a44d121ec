//! # Year Rules
//!
//! The bookkeeping crate for an Infinite Year session - players, the turn clock,
//! seasons and years, narrative prompts, and the store of features players draw
//! onto the shared map. This crate is the single source of truth for session
//! state and knows nothing about how that state is rendered.

pub mod config;
pub mod engine;
pub mod entities;
pub mod game_state;
pub mod mechanics;
pub mod persist;

pub use config::*;
pub use engine::*;
pub use entities::*;
pub use game_state::*;
pub use mechanics::*;
pub use persist::*;
