//! amora-core — Pure types and text processing for the amora gateway
//!
//! No I/O and no async here. Keeping the normalizer and error taxonomy in
//! their own crate means consumers can depend on types without pulling in
//! tokio, axum, or reqwest.

pub mod error;
pub mod normalize;
pub mod types;
