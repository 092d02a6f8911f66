//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the generation core and a
//! collaborator it does not own. Implementations live in `src/adapters/`.

pub mod catalog;
pub mod random;

pub use catalog::{GeneratorCatalog, Strategy};
pub use random::RandomSource;
