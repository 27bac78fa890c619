//! # Rendering Module
//!
//! Text rendering of a floor with its agents drawn over the terrain.
//!
//! Rendering produces plain rows of characters and leaves presentation to the
//! caller, whether that is a terminal front end or a test.

pub mod viewport;

pub use viewport::*;
