//! Simulation controller: current state, reset snapshot and generation counter.

use std::path::Path;

use tracing::{debug, trace, warn};

use crate::gutterlife::{Generation, TransitionConfig, TransitionStrategy};
use crate::loader::{self, ParseError};

/// Side length of the board used by [`Game::default`].
pub const DEFAULT_SIDE: usize = 100;

/// Drives a [`Generation`] forward and remembers where it started.
///
/// Every mutating call is synchronous and leaves the game fully consistent:
/// `current` is only replaced by a completely computed generation, and a
/// failed load leaves all state untouched. Calls must be serialized by the
/// caller.
pub struct Game {
    initial: Generation,
    current: Generation,
    generation_number: u64,
    pool: rayon::ThreadPool,
    strategy: TransitionStrategy,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Generation::new(DEFAULT_SIDE, DEFAULT_SIDE))
    }
}

impl Game {
    pub fn new(initial: Generation) -> Self {
        Self::with_config(initial, TransitionConfig::default())
    }

    /// Create a game with an explicit engine configuration.
    pub fn with_config(initial: Generation, config: TransitionConfig) -> Self {
        let pool = config
            .build_pool()
            .expect("failed to build gutter-life rayon thread pool");
        let strategy = config.resolved_strategy();
        debug!(
            threads = pool.current_num_threads(),
            ?strategy,
            width = initial.width(),
            height = initial.height(),
            "game created"
        );

        Self {
            current: initial.clone(),
            initial,
            generation_number: 0,
            pool,
            strategy,
        }
    }

    pub fn current(&self) -> &Generation {
        &self.current
    }

    pub fn initial(&self) -> &Generation {
        &self.initial
    }

    /// Advances since the initial generation.
    pub fn generation_number(&self) -> u64 {
        self.generation_number
    }

    pub fn population(&self) -> u64 {
        self.current.population()
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn strategy(&self) -> TransitionStrategy {
        self.strategy
    }

    /// Whether [`Game::reset`] would change anything.
    pub fn can_reset(&self) -> bool {
        self.generation_number > 0
    }

    #[inline]
    fn next_generation(&self) -> Generation {
        self.pool.install(|| self.current.transition(self.strategy))
    }

    /// Replace the current generation with its successor.
    pub fn advance(&mut self) {
        let next = self.next_generation();
        self.current = next;
        self.generation_number += 1;
        trace!(generation = self.generation_number, "advanced");
    }

    pub fn step_n(&mut self, n: u64) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// Go back to a fresh copy of the initial generation.
    pub fn reset(&mut self) {
        self.current = Generation::copy_of(&self.initial);
        self.generation_number = 0;
        debug!("reset to initial generation");
    }

    /// Install an already parsed generation as both initial and current state.
    pub fn replace(&mut self, generation: Generation) {
        self.current = generation.clone();
        self.initial = generation;
        self.generation_number = 0;
        debug!(
            width = self.initial.width(),
            height = self.initial.height(),
            population = self.initial.population(),
            "loaded new initial generation"
        );
    }

    /// Parse `source` and, only on success, make it the new initial state.
    pub fn load<I, S>(&mut self, source: I) -> Result<(), ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = loader::parse(source).inspect_err(|err| warn!(%err, "rejected config"))?;
        self.replace(parsed);
        Ok(())
    }

    pub fn load_str(&mut self, source: &str) -> Result<(), ParseError> {
        self.load(source.lines())
    }

    /// Read a config file and load it; state is unchanged on any error.
    pub fn import(&mut self, path: impl AsRef<Path>) -> Result<(), ParseError> {
        let parsed = loader::import(path).inspect_err(|err| warn!(%err, "rejected config"))?;
        self.replace(parsed);
        Ok(())
    }
}
