//! Random source port for strategy selection.

/// Source of the randomness the orchestrator consumes.
///
/// Injected so tests can script exact strategy choices.
pub trait RandomSource {
    /// A uniformly distributed index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;

    /// Entropy handed to a freshly constructed strategy.
    fn next_seed(&mut self) -> u64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn pick(&mut self, len: usize) -> usize {
        (**self).pick(len)
    }

    fn next_seed(&mut self) -> u64 {
        (**self).next_seed()
    }
}
