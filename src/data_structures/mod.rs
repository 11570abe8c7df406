//! Engine data structures.
//!
//! - `texture` contains the GPU texture wrapper and creation utilities

pub mod texture;
