//! wi-crosscheck: differential validation of two wrapped-interval
//! implementations.
//!
//! Reads a results document in which both implementations reported outputs
//! for the same cases, pairs those outputs up and reports every case where
//! they disagree.

pub mod align;
pub mod config;
pub mod diverge;
pub mod error;
pub mod extract;
pub mod render;
pub mod report;
pub mod split;
pub mod types;
