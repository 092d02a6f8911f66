//! Adapter implementations for port traits.
//!
//! - `generators` — Built-in drawing strategies over RGB surfaces
//! - `random` — `rand`-backed random source

pub mod generators;
pub mod random;
