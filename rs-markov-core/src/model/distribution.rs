use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::error::{BotError, BotResult};
use super::number_generator::NumberGenerator;

/// Occurrence counts of observed items, sampled proportionally to their counts.
///
/// Conceptually this is the outgoing edge set of one node in a Markov chain,
/// or the set of sentence openers.
///
/// ## Responsibilities:
/// - Accumulate occurrences during training
/// - Pick an item using weighted sampling driven by a [`NumberGenerator`]
/// - Report the exact value a generator must return for `pick` to select a
///   given item (`index`), which makes deterministic replay possible
///
/// ## Invariants
/// - Every recorded count is strictly positive
/// - `total` is the sum of all counts
/// - Items keep their first-seen order forever; `index` and `pick` both walk
///   that order, so `pick` returns `x` when the generator returns `index(x)`
#[derive(Clone, Debug)]
pub struct WeightedDistribution<T> {
	/// Distinct items with their counts, in first-seen order.
	entries: Vec<(T, usize)>,
	/// Position of each item in `entries`.
	positions: HashMap<T, usize>,
	total: usize,
}

impl<T> Default for WeightedDistribution<T> {
	fn default() -> Self {
		Self {
			entries: Vec::new(),
			positions: HashMap::new(),
			total: 0,
		}
	}
}

impl<T: Eq + Hash + Clone> WeightedDistribution<T> {
	/// Creates an empty distribution.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one occurrence of `item`.
	///
	/// - If the item already exists, its count is increased.
	/// - Otherwise it is appended to the insertion order with a count of 1.
	pub fn record(&mut self, item: T) {
		match self.positions.get(&item) {
			Some(&position) => self.entries[position].1 += 1,
			None => {
				self.positions.insert(item.clone(), self.entries.len());
				self.entries.push((item, 1));
			}
		}
		self.total += 1;
	}

	/// Returns how many times `item` was recorded (0 if never).
	pub fn count<Q>(&self, item: &Q) -> usize
	where
		T: Borrow<Q>,
		Q: Hash + Eq + ?Sized,
	{
		self.positions
			.get(item)
			.map_or(0, |&position| self.entries[position].1)
	}

	/// Returns the cumulative lower bound of `item`: the sum of the counts of
	/// every item inserted strictly before it.
	///
	/// # Errors
	/// Returns [`BotError::NotRecorded`] if the item was never recorded.
	pub fn index<Q>(&self, item: &Q) -> BotResult<usize>
	where
		T: Borrow<Q>,
		Q: Hash + Eq + fmt::Display + ?Sized,
	{
		let position = *self
			.positions
			.get(item)
			.ok_or_else(|| BotError::NotRecorded { token: item.to_string() })?;
		Ok(self.entries[..position].iter().map(|(_, count)| count).sum())
	}

	/// Picks an item using weighted sampling.
	///
	/// Draws `r` in `[0, total)` from `rng`, then scans the items in insertion
	/// order and returns the first one whose cumulative upper bound exceeds `r`.
	/// This is an O(n) scan.
	///
	/// # Errors
	/// - [`BotError::EmptyDistribution`] if nothing was recorded.
	/// - Any error of the generator itself (exhausted replay, ...).
	pub fn pick(&self, rng: &mut dyn NumberGenerator) -> BotResult<&T> {
		if self.total == 0 {
			return Err(BotError::EmptyDistribution);
		}

		let value = rng.next(self.total)?;
		let mut r = value;
		for (item, count) in &self.entries {
			if r < *count {
				return Ok(item);
			}
			r -= count;
		}

		// Only reachable with a generator that ignores its bound.
		Err(BotError::OutOfBound { value, bound: self.total })
	}

	/// Sum of all counts.
	pub fn total(&self) -> usize {
		self.total
	}

	/// Number of distinct items.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterates over `(item, count)` pairs in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&T, usize)> {
		self.entries.iter().map(|(item, count)| (item, *count))
	}
}

impl<T: fmt::Display> fmt::Display for WeightedDistribution<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{{")?;
		for (i, (item, count)) in self.entries.iter().enumerate() {
			if i > 0 {
				write!(f, ", ")?;
			}
			write!(f, "{item}={count}")?;
		}
		write!(f, "}}")
	}
}
