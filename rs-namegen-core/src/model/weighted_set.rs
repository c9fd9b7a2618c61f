use std::collections::HashMap;
use std::hash::Hash;

use rand::Rng;

use crate::error::{NameGenError, Result};

/// A mutable discrete probability distribution.
///
/// Each item carries a non-negative weight and `sample` returns an item with
/// probability `weight / total`.
///
/// ## Responsibilities:
/// - Accumulate weight per item (`add` sums, it never replaces)
/// - Keep `total` consistent with the stored weights on every mutation
/// - Sample in a single pass with a guaranteed result or an error
///
/// ## Invariants
/// - `total` is the sum of all stored weights
/// - Every stored weight is `>= 0`
/// - `index[item]` is the position of `item` in `entries`
///
/// Items added with weight 0 are kept and listed by `items`, but they can never
/// be sampled. Entries are kept in insertion order so that a seeded random
/// source reproduces the same draws from one run to the next.
#[derive(Clone, Debug)]
pub struct WeightedSet<T> {
	/// Items and their weights, in insertion order.
	entries: Vec<(T, f64)>,
	/// Position of each item in `entries`.
	index: HashMap<T, usize>,
	/// Sum of all weights.
	total: f64,
}

impl<T> Default for WeightedSet<T> {
	fn default() -> Self {
		Self {
			entries: Vec::new(),
			index: HashMap::new(),
			total: 0.0,
		}
	}
}

impl<T: Eq + Hash + Clone> WeightedSet<T> {
	/// Creates an empty set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds `weight` to `item`, inserting it if needed.
	///
	/// - Negative (and NaN) weights are clamped to 0
	/// - Calling `add` twice for the same item sums the weights
	pub fn add(&mut self, item: T, weight: f64) -> &mut Self {
		let weight = weight.max(0.0);
		match self.index.get(&item) {
			Some(&i) => self.entries[i].1 += weight,
			None => {
				self.index.insert(item.clone(), self.entries.len());
				self.entries.push((item, weight));
			}
		}
		self.total += weight;
		self
	}

	/// Removes `item` and returns the weight it had, or 0 if it was absent.
	pub fn remove(&mut self, item: &T) -> f64 {
		let Some(i) = self.index.remove(item) else {
			return 0.0;
		};

		let (_, weight) = self.entries.remove(i);
		for (moved, _) in &self.entries[i..] {
			if let Some(position) = self.index.get_mut(moved) {
				*position -= 1;
			}
		}

		// total is the exact sum of what remains
		self.total = self.entries.iter().map(|(_, w)| w).sum();
		weight
	}

	/// Returns every item currently present, zero-weight ones included.
	///
	/// Callers must not rely on the order.
	pub fn items(&self) -> impl Iterator<Item = &T> {
		self.entries.iter().map(|(item, _)| item)
	}

	/// Returns `(item, weight)` pairs.
	pub fn iter(&self) -> impl Iterator<Item = (&T, f64)> {
		self.entries.iter().map(|(item, weight)| (item, *weight))
	}

	/// Returns the weight of `item`, or 0 if absent.
	pub fn weight(&self, item: &T) -> f64 {
		self.index.get(item).map_or(0.0, |&i| self.entries[i].1)
	}

	/// Returns the sum of all weights.
	pub fn total(&self) -> f64 {
		self.total
	}

	/// Number of items, zero-weight ones included.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Returns `true` if `sample` can succeed.
	pub fn is_sampleable(&self) -> bool {
		self.total.is_finite() && self.total > 0.0 && self.entries.iter().any(|(_, w)| *w > 0.0)
	}

	/// Adds every item of `other` with its weight.
	pub fn merge(&mut self, other: &Self) -> &mut Self {
		for (item, weight) in &other.entries {
			self.add(item.clone(), *weight);
		}
		self
	}

	/// Picks an item with probability proportional to its weight.
	///
	/// Draws `r` in `[0, total)` then walks the entries, subtracting each
	/// weight, and returns the first item at which `r` drops below zero.
	/// If rounding keeps `r` from crossing zero, the last item with a positive
	/// weight is returned.
	///
	/// # Errors
	/// Returns `NameGenError::Unsampleable` if the set is empty, its total is
	/// zero or not finite, or no item has a positive weight.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&T> {
		if !self.is_sampleable() {
			return Err(NameGenError::Unsampleable { total: self.total });
		}

		let mut r = rng.random_range(0.0..self.total);

		let mut fallback: Option<&T> = None;
		for (item, weight) in &self.entries {
			if *weight <= 0.0 {
				continue;
			}
			r -= weight;
			if r < 0.0 {
				return Ok(item);
			}
			fallback = Some(item);
		}

		fallback.ok_or(NameGenError::Unsampleable { total: self.total })
	}
}

impl<T: Eq + Hash + Clone> FromIterator<(T, f64)> for WeightedSet<T> {
	fn from_iter<I: IntoIterator<Item = (T, f64)>>(iter: I) -> Self {
		let mut set = Self::new();
		set.extend(iter);
		set
	}
}

impl<T: Eq + Hash + Clone> Extend<(T, f64)> for WeightedSet<T> {
	fn extend<I: IntoIterator<Item = (T, f64)>>(&mut self, iter: I) {
		for (item, weight) in iter {
			self.add(item, weight);
		}
	}
}
