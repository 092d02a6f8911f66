//! Generator catalog port: named drawing strategies.

use crate::configuration::Configuration;

/// A single drawing routine bound to one generation request.
pub trait Strategy<S> {
    /// Draw onto `surface`, mutating it in place.
    fn draw(&mut self, surface: &mut S);
}

/// Registry of named strategies that can be constructed on demand.
pub trait GeneratorCatalog {
    /// The drawable surface the strategies render onto.
    type Surface;

    /// Stable, ordered strategy identifiers.
    fn names(&self) -> Vec<String>;

    /// Construct a fresh strategy for `name`, or `None` if it is not registered.
    ///
    /// `seed` is the entropy the strategy should draw from.
    fn create(
        &self,
        name: &str,
        config: &Configuration,
        seed: u64,
    ) -> Option<Box<dyn Strategy<Self::Surface>>>;

    /// Whether `name` is registered.
    fn contains(&self, name: &str) -> bool {
        self.names().iter().any(|n| n == name)
    }
}
