use rayon::prelude::*;
use std::sync::OnceLock;

use super::cell::Cell;
use super::generation::{GUTTER, Generation};
use super::kernel::advance_row;

/// How a transition computes the next generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransitionStrategy {
    /// Row-major single-threaded loop. Reference for the parallel path.
    Sequential,
    /// One rayon task per row, joined before returning.
    #[default]
    Parallel,
}

static PHYSICAL_CORES: OnceLock<usize> = OnceLock::new();

#[inline]
fn physical_core_count() -> usize {
    *PHYSICAL_CORES.get_or_init(|| num_cpus::get_physical().max(1))
}

/// Resolve the pool size from a config, falling back to physical cores.
pub(crate) fn resolve_thread_count(config: &TransitionConfig) -> usize {
    let mut threads = config.thread_count.unwrap_or_else(physical_core_count);
    if let Some(cap) = config.max_threads {
        threads = threads.min(cap);
    }
    threads.max(1)
}

/// Configuration for the transition engine used by a [`Game`](crate::Game).
///
/// `TransitionConfig::default()` sizes the pool from the physical core count
/// and uses the parallel strategy.
#[derive(Clone, Debug, Default)]
pub struct TransitionConfig {
    /// Number of threads for the compute pool.
    /// `None` means one per physical core.
    pub thread_count: Option<usize>,
    /// Hard upper bound on threads regardless of auto-detection.
    pub max_threads: Option<usize>,
    /// `None` means [`TransitionStrategy::Parallel`].
    pub strategy: Option<TransitionStrategy>,
}

impl TransitionConfig {
    /// Set an explicit thread count for the compute pool.
    pub fn thread_count(mut self, n: usize) -> Self {
        self.thread_count = Some(n.max(1));
        self
    }

    /// Set a hard upper bound on threads.
    pub fn max_threads(mut self, n: usize) -> Self {
        self.max_threads = Some(n.max(1));
        self
    }

    pub fn strategy(mut self, strategy: TransitionStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub(crate) fn resolved_strategy(&self) -> TransitionStrategy {
        self.strategy.unwrap_or_default()
    }

    /// Build the dedicated rayon pool described by this config.
    pub(crate) fn build_pool(&self) -> Result<rayon::ThreadPool, rayon::ThreadPoolBuildError> {
        rayon::ThreadPoolBuilder::new()
            .num_threads(resolve_thread_count(self))
            .thread_name(|i| format!("gutter-life-{i}"))
            .build()
    }
}

impl Generation {
    /// Interior rows of the destination buffer, one padded-width chunk each.
    #[inline]
    fn interior_rows_mut(&mut self) -> &mut [Cell] {
        let padded_width = self.padded_width();
        let start = GUTTER * padded_width;
        &mut self.cells[start..start + self.height * padded_width]
    }

    /// Next generation computed row by row on the calling thread.
    pub fn sequential_transition(&self) -> Generation {
        let mut next = self.clone();
        let (width, padded_width) = (self.width, self.padded_width());
        for (y, row) in next.interior_rows_mut().chunks_mut(padded_width).enumerate() {
            advance_row(self, y, &mut row[GUTTER..GUTTER + width]);
        }
        next
    }

    /// Next generation with one task per row on the current rayon pool.
    ///
    /// The destination is a single copy of `self` split into disjoint padded
    /// rows; each task only sees its own row slice and writes its interior.
    /// All reads go to `self`, which is never written.
    pub fn parallel_transition(&self) -> Generation {
        let mut next = self.clone();
        let (width, padded_width) = (self.width, self.padded_width());
        next.interior_rows_mut()
            .par_chunks_mut(padded_width)
            .enumerate()
            .for_each(|(y, row)| {
                advance_row(self, y, &mut row[GUTTER..GUTTER + width]);
            });
        next
    }

    pub fn transition(&self, strategy: TransitionStrategy) -> Generation {
        match strategy {
            TransitionStrategy::Sequential => self.sequential_transition(),
            TransitionStrategy::Parallel => self.parallel_transition(),
        }
    }
}
