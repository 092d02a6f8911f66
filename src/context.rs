//! Service context that bundles the ports a front end needs.

use image::RgbImage;
use rand::rngs::StdRng;

use crate::adapters::generators::{rgb_surface, BuiltinCatalog};
use crate::adapters::random::RngSource;
use crate::configuration::Configuration;
use crate::error::GenerationError;
use crate::orchestrator::{generate, Generation};
use crate::ports::GeneratorCatalog;

/// Bundles the generator catalog and the random source for one run.
pub struct ServiceContext<C = BuiltinCatalog> {
    /// Generator catalog port.
    pub catalog: C,
    /// Fixed seed, or `None` for OS entropy.
    pub seed: Option<u64>,
}

impl ServiceContext {
    /// Context over the built-in catalog.
    #[must_use]
    pub fn builtin(seed: Option<u64>) -> Self {
        Self { catalog: BuiltinCatalog, seed }
    }
}

impl<C> ServiceContext<C>
where
    C: GeneratorCatalog<Surface = RgbImage>,
{
    /// Start a generation run over RGB surfaces.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationError`] if the run cannot start.
    pub fn run<'a>(
        &'a self,
        config: &'a Configuration,
    ) -> Result<Generation<'a, C, fn(u32, u32) -> RgbImage, RngSource<StdRng>>, GenerationError>
    {
        let random = self.seed.map_or_else(RngSource::<StdRng>::from_entropy, RngSource::<StdRng>::seeded);
        generate(config, &self.catalog, rgb_surface as fn(u32, u32) -> RgbImage, random)
    }
}
