//! # Utilities Module
//!
//! Grid mathematics shared by the floor queries.

pub mod math;

pub use math::*;
