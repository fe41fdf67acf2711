use std::fmt::Debug;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{BotError, BotResult};

/// Source of bounded random integers used by every sampling step.
///
/// Components never reach for a global RNG: each one owns the generator it
/// was built with, so tests can substitute a scripted source.
pub trait NumberGenerator: Send + Debug {
	/// Returns an integer in `[0, bound)`.
	///
	/// # Errors
	/// - `InvalidArgument` if `bound` is zero.
	/// - Scripted generators fail once exhausted or when a value does not fit.
	fn next(&mut self, bound: usize) -> BotResult<usize>;
}

/// True-random generator backed by `rand`'s standard RNG.
#[derive(Debug, Clone)]
pub struct RandomNumberGenerator {
	rng: StdRng,
}

impl RandomNumberGenerator {
	/// Creates a generator seeded from OS entropy.
	pub fn new() -> Self {
		Self { rng: StdRng::from_os_rng() }
	}

	/// Creates a reproducible generator from a fixed seed.
	pub fn seeded(seed: u64) -> Self {
		Self { rng: StdRng::seed_from_u64(seed) }
	}
}

impl Default for RandomNumberGenerator {
	fn default() -> Self {
		Self::new()
	}
}

impl NumberGenerator for RandomNumberGenerator {
	fn next(&mut self, bound: usize) -> BotResult<usize> {
		if bound == 0 {
			return Err(BotError::invalid("bound must be positive"));
		}
		Ok(self.rng.random_range(0..bound))
	}
}

/// Scripted generator replaying a fixed list of integers, in order.
///
/// Once every value has been handed out, further calls fail with
/// [`BotError::ReplayExhausted`]. A value is only consumed when it fits the
/// requested bound.
#[derive(Debug, Clone, Default)]
pub struct ListNumberGenerator {
	values: Vec<usize>,
	position: usize,
}

impl ListNumberGenerator {
	pub fn new(values: impl Into<Vec<usize>>) -> Self {
		Self { values: values.into(), position: 0 }
	}

	/// Number of values not yet consumed.
	pub fn remaining(&self) -> usize {
		self.values.len() - self.position
	}
}

impl NumberGenerator for ListNumberGenerator {
	fn next(&mut self, bound: usize) -> BotResult<usize> {
		if bound == 0 {
			return Err(BotError::invalid("bound must be positive"));
		}
		let value = *self
			.values
			.get(self.position)
			.ok_or(BotError::ReplayExhausted { consumed: self.position })?;
		if value >= bound {
			return Err(BotError::OutOfBound { value, bound });
		}
		self.position += 1;
		Ok(value)
	}
}
