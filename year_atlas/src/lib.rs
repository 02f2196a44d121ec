//! # Year Atlas
//!
//! Views over the features of an Infinite Year session. This crate reads from
//! `year_rules` and never writes to it.
//!
//! ## Core Components
//!
//! - **feature_tree**: Groups features into a folder hierarchy and filters it by search term
//! - **browser**: Sidebar state - view mode, search, folder expansion and the detail panel
//!
//! Everything here is recomputed from the current session snapshot on demand.

pub mod browser;
pub mod feature_tree;

pub use browser::*;
pub use feature_tree::*;
