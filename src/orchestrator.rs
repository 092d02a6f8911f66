//! Generation orchestration: a lazy, counted loop over the configured images.
//!
//! Each iteration picks its strategies, builds every one of them, and only
//! then allocates a fresh surface for them to draw on. The finished surface is
//! yielded together with its resolved name. Nothing is retained between
//! iterations, so a caller that stops pulling stops all further allocation and
//! drawing. A strategy the catalog refuses to build ends the run with an error
//! instead of a partially drawn image.

use std::iter::FusedIterator;

use tracing::{debug, warn};

use crate::configuration::Configuration;
use crate::error::GenerationError;
use crate::ports::{GeneratorCatalog, RandomSource, Strategy};

/// One finished image, owned by the caller once yielded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage<S> {
    /// The drawn surface.
    pub surface: S,
    /// The name template with placeholders substituted.
    pub name: String,
    /// Zero-based iteration index.
    pub serial: usize,
    /// Strategies that drew this image, in draw order.
    pub generators: Vec<String>,
}

/// Forward-only sequence of [`GeneratedImage`]s, produced on demand.
pub struct Generation<'a, C, F, R>
where
    C: GeneratorCatalog + ?Sized,
{
    config: &'a Configuration,
    catalog: &'a C,
    factory: F,
    random: R,
    names: Vec<String>,
    serial: usize,
    failed: bool,
}

/// Validate the request and return the lazy image sequence.
///
/// The effective strategy set is the configured selection, or every catalog
/// name when nothing is selected.
///
/// # Errors
///
/// - [`GenerationError::HelpRequested`] if the configuration asks for help.
/// - [`GenerationError::UnknownGeneratorName`] for the first effective name the
///   catalog does not know or cannot build.
/// - [`GenerationError::NoGeneratorsAvailable`] if the effective set is empty.
pub fn generate<'a, C, F, R>(
    config: &'a Configuration,
    catalog: &'a C,
    factory: F,
    random: R,
) -> Result<Generation<'a, C, F, R>, GenerationError>
where
    C: GeneratorCatalog + ?Sized,
    F: FnMut(u32, u32) -> C::Surface,
    R: RandomSource,
{
    if config.help_requested {
        return Err(GenerationError::HelpRequested);
    }

    let names = if config.selected_generators.is_empty() {
        catalog.names()
    } else {
        config.selected_generators.clone()
    };

    if names.is_empty() {
        return Err(GenerationError::NoGeneratorsAvailable);
    }

    if let Some(missing) = names.iter().find(|n| catalog.create(n, config, 0).is_none()) {
        return Err(GenerationError::UnknownGeneratorName(missing.clone()));
    }

    debug!(
        total = config.total_images,
        width = config.width,
        height = config.height,
        random_single = config.random_single,
        generators = ?names,
        "starting generation"
    );

    Ok(Generation { config, catalog, factory, random, names, serial: 0, failed: false })
}

impl<C, F, R> Generation<'_, C, F, R>
where
    C: GeneratorCatalog + ?Sized,
    F: FnMut(u32, u32) -> C::Surface,
    R: RandomSource,
{
    /// The effective strategy names for this run, in draw order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    fn choose(&mut self) -> Vec<String> {
        if self.config.random_single {
            let index = self.random.pick(self.names.len()).min(self.names.len() - 1);
            vec![self.names[index].clone()]
        } else {
            self.names.clone()
        }
    }

    fn build(&mut self, chosen: &[String]) -> Result<Vec<Box<dyn Strategy<C::Surface>>>, GenerationError> {
        chosen
            .iter()
            .map(|name| {
                let seed = self.random.next_seed();
                self.catalog.create(name, self.config, seed).ok_or_else(|| {
                    warn!(generator = %name, "catalog could not construct strategy");
                    GenerationError::UnknownGeneratorName(name.clone())
                })
            })
            .collect()
    }
}

impl<C, F, R> Iterator for Generation<'_, C, F, R>
where
    C: GeneratorCatalog + ?Sized,
    F: FnMut(u32, u32) -> C::Surface,
    R: RandomSource,
{
    type Item = Result<GeneratedImage<C::Surface>, GenerationError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.serial >= self.config.total_images {
            return None;
        }
        let serial = self.serial;
        self.serial += 1;

        let chosen = self.choose();
        debug!(serial, generators = ?chosen, "drawing image");

        let mut strategies = match self.build(&chosen) {
            Ok(strategies) => strategies,
            Err(e) => {
                self.failed = true;
                return Some(Err(e));
            }
        };

        let mut surface = (self.factory)(self.config.width, self.config.height);
        for strategy in &mut strategies {
            strategy.draw(&mut surface);
        }

        let labels: Vec<&str> = chosen.iter().map(String::as_str).collect();
        let name = self.config.resolve_name(serial, &labels);
        Some(Ok(GeneratedImage { surface, name, serial, generators: chosen }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        let remaining = self.config.total_images.saturating_sub(self.serial);
        // A build failure yields one error and then ends the run.
        (remaining.min(1), Some(remaining))
    }
}

impl<C, F, R> FusedIterator for Generation<'_, C, F, R>
where
    C: GeneratorCatalog + ?Sized,
    F: FnMut(u32, u32) -> C::Surface,
    R: RandomSource,
{
}
