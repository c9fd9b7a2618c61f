use std::sync::mpsc;
use std::thread;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{NameGenError, Result};
use super::config::ComposerConfig;
use super::weighted_set::WeightedSet;

/// Letter class selected by one symbol of a syllable shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LetterClass {
	/// `v`
	Vowel,
	/// `c`
	Consonant,
	/// `l`, vowels and consonants together
	Letter,
}

impl LetterClass {
	pub fn name(self) -> &'static str {
		match self {
			LetterClass::Vowel => "vowel",
			LetterClass::Consonant => "consonant",
			LetterClass::Letter => "letter",
		}
	}
}

impl TryFrom<char> for LetterClass {
	type Error = char;

	fn try_from(symbol: char) -> std::result::Result<Self, Self::Error> {
		match symbol {
			'v' => Ok(LetterClass::Vowel),
			'c' => Ok(LetterClass::Consonant),
			'l' => Ok(LetterClass::Letter),
			other => Err(other),
		}
	}
}

/// Assembles names from weighted syllables.
///
/// # Responsibilities
/// - Own the five distributions a name is drawn from
/// - Derive `letters` from vowels and consonants once, at construction
/// - Generate names sequentially or across worker threads
///
/// Distributions are never mutated while generating, so a composer can be
/// shared between threads as long as each thread has its own random source.
#[derive(Clone, Debug)]
pub struct NameComposer {
	vowels: WeightedSet<String>,
	consonants: WeightedSet<String>,
	/// Union of `vowels` and `consonants`, weights summed.
	letters: WeightedSet<String>,
	syllables: WeightedSet<String>,
	syllable_counts: WeightedSet<usize>,
}

impl NameComposer {
	/// Creates a composer from ready-made distributions.
	///
	/// # Errors
	/// Returns `NameGenError::UnknownSymbol` if a syllable shape contains
	/// anything other than `v`, `c` or `l`.
	pub fn new(
		vowels: WeightedSet<String>,
		consonants: WeightedSet<String>,
		syllables: WeightedSet<String>,
		syllable_counts: WeightedSet<usize>,
	) -> Result<Self> {
		for shape in syllables.items() {
			Self::shape_classes(shape)?;
		}

		let mut letters = WeightedSet::new();
		letters.merge(&vowels).merge(&consonants);

		debug!(
			"composer ready: {} vowels, {} consonants, {} shapes, {} syllable counts",
			vowels.len(),
			consonants.len(),
			syllables.len(),
			syllable_counts.len()
		);

		Ok(Self { vowels, consonants, letters, syllables, syllable_counts })
	}

	/// Resolves a textual configuration into a composer.
	///
	/// # Errors
	/// Any parse, count or shape error found in `config`.
	pub fn from_config(config: &ComposerConfig) -> Result<Self> {
		Self::new(
			config.vowel_set()?,
			config.consonant_set()?,
			config.syllable_set()?,
			config.syllable_count_set()?,
		)
	}

	pub fn vowels(&self) -> &WeightedSet<String> {
		&self.vowels
	}

	pub fn consonants(&self) -> &WeightedSet<String> {
		&self.consonants
	}

	pub fn letters(&self) -> &WeightedSet<String> {
		&self.letters
	}

	pub fn syllables(&self) -> &WeightedSet<String> {
		&self.syllables
	}

	pub fn syllable_counts(&self) -> &WeightedSet<usize> {
		&self.syllable_counts
	}

	fn shape_classes(shape: &str) -> Result<Vec<LetterClass>> {
		shape
			.chars()
			.map(|symbol| {
				LetterClass::try_from(symbol).map_err(|symbol| NameGenError::UnknownSymbol {
					shape: shape.to_owned(),
					symbol,
				})
			})
			.collect()
	}

	fn class_set(&self, class: LetterClass) -> &WeightedSet<String> {
		match class {
			LetterClass::Vowel => &self.vowels,
			LetterClass::Consonant => &self.consonants,
			LetterClass::Letter => &self.letters,
		}
	}

	/// Samples `set`, naming the distribution in the error.
	fn pick<'a, T, R>(set: &'a WeightedSet<T>, name: &str, rng: &mut R) -> Result<&'a T>
	where
		T: Eq + std::hash::Hash + Clone,
		R: Rng + ?Sized,
	{
		set.sample(rng).map_err(|_| NameGenError::EmptyDistribution(name.to_owned()))
	}

	/// Generates one raw (uncapitalized) name.
	///
	/// - Draws the number of syllables
	/// - Draws a shape for each syllable
	/// - Fills every shape symbol from the matching letter class
	///
	/// # Errors
	/// Returns `NameGenError::EmptyDistribution` if a distribution needed on
	/// the way has no positive weight.
	pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String> {
		let count = *Self::pick(&self.syllable_counts, "syllable count", rng)?;

		let mut name = String::new();
		for _ in 0..count {
			let shape = Self::pick(&self.syllables, "syllable", rng)?;
			for class in Self::shape_classes(shape)? {
				name.push_str(Self::pick(self.class_set(class), class.name(), rng)?);
			}
		}

		trace!("generated {name:?} ({count} syllables)");
		Ok(name)
	}

	/// Generates `n` names one after the other.
	///
	/// Stops at the first error; no partial output is returned.
	pub fn generate_many<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Vec<String>> {
		(0..n).map(|_| self.generate(rng)).collect()
	}

	/// Random source of one `generate_parallel` chunk.
	///
	/// The chunk index is spread over all 64 bits before being mixed in, so
	/// neighbouring seeds do not share chunk streams.
	fn chunk_rng(seed: Option<u64>, chunk: usize) -> StdRng {
		match seed {
			Some(seed) => StdRng::seed_from_u64(seed ^ (chunk as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)),
			None => StdRng::from_os_rng(),
		}
	}

	/// Generates `n` names on worker threads.
	///
	/// # Behavior
	/// - Splits the work into chunks (based on CPU cores * factor)
	/// - Each chunk owns a `StdRng` seeded from `seed` and the chunk index, or
	///   from the OS when `seed` is `None`
	/// - Names are returned in chunk order, so a given seed yields the same
	///   list on machines with the same number of cores
	///
	/// # Errors
	/// The first error of any chunk, in chunk order.
	pub fn generate_parallel(&self, n: usize, seed: Option<u64>) -> Result<Vec<String>> {
		if n == 0 {
			return Ok(Vec::new());
		}

		let cpus = num_cpus::get();
		let factor = 4;
		let chunks = cpus * factor;
		let chunk_size = n.div_ceil(chunks);
		let nb_chunks = n.div_ceil(chunk_size);
		debug!("generating {n} names in {nb_chunks} chunks of up to {chunk_size}");

		let mut results: Vec<Option<Result<Vec<String>>>> = (0..nb_chunks).map(|_| None).collect();

		thread::scope(|scope| {
			let (tx, rx) = mpsc::channel();
			for chunk in 0..nb_chunks {
				let tx = tx.clone();
				let size = chunk_size.min(n - chunk * chunk_size);

				scope.spawn(move || {
					let mut rng = Self::chunk_rng(seed, chunk);
					// The receiver outlives every worker inside the scope
					let _ = tx.send((chunk, self.generate_many(size, &mut rng)));
				});
			}
			drop(tx);

			for (chunk, partial) in rx.iter() {
				results[chunk] = Some(partial);
			}
		});

		let mut names = Vec::with_capacity(n);
		for partial in results.into_iter().flatten() {
			names.extend(partial?);
		}
		Ok(names)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn set(entries: &[(&str, f64)]) -> WeightedSet<String> {
		entries.iter().map(|(k, w)| (k.to_string(), *w)).collect()
	}

	fn counts(entries: &[(usize, f64)]) -> WeightedSet<usize> {
		entries.iter().copied().collect()
	}

	#[test]
	fn letter_class_symbols() {
		assert_eq!(LetterClass::try_from('v'), Ok(LetterClass::Vowel));
		assert_eq!(LetterClass::try_from('c'), Ok(LetterClass::Consonant));
		assert_eq!(LetterClass::try_from('l'), Ok(LetterClass::Letter));
		assert_eq!(LetterClass::try_from('x'), Err('x'));
	}

	#[test]
	fn letters_are_the_union_of_both_classes() {
		let composer = NameComposer::new(
			set(&[("a", 2.0)]),
			set(&[("b", 3.0)]),
			set(&[("cv", 1.0)]),
			counts(&[(1, 1.0)]),
		)
		.unwrap();
		assert_eq!(composer.letters().weight(&"a".to_owned()), 2.0);
		assert_eq!(composer.letters().weight(&"b".to_owned()), 3.0);
		assert_eq!(composer.letters().total(), 5.0);
	}

	#[test]
	fn unknown_shape_symbol_is_rejected_upfront() {
		let err = NameComposer::new(
			set(&[("a", 1.0)]),
			set(&[("b", 1.0)]),
			set(&[("cv", 1.0), ("cxv", 0.0)]),
			counts(&[(1, 1.0)]),
		)
		.unwrap_err();
		assert_eq!(err, NameGenError::UnknownSymbol { shape: "cxv".to_owned(), symbol: 'x' });
	}

	#[test]
	fn letter_shape_draws_from_both_classes() {
		let composer = NameComposer::new(
			set(&[("a", 1.0)]),
			set(&[("b", 1.0)]),
			set(&[("l", 1.0)]),
			counts(&[(1, 1.0)]),
		)
		.unwrap();
		let mut rng = StdRng::seed_from_u64(3);
		let names = composer.generate_many(200, &mut rng).unwrap();
		assert!(names.iter().any(|n| n == "a"));
		assert!(names.iter().any(|n| n == "b"));
	}

	#[test]
	fn empty_class_fails_the_run() {
		let composer = NameComposer::new(
			WeightedSet::new(),
			set(&[("b", 1.0)]),
			set(&[("cv", 1.0)]),
			counts(&[(2, 1.0)]),
		)
		.unwrap();
		let mut rng = StdRng::seed_from_u64(3);
		assert_eq!(
			composer.generate_many(5, &mut rng),
			Err(NameGenError::EmptyDistribution("vowel".to_owned()))
		);
	}

	#[test]
	fn zero_syllables_gives_an_empty_name() {
		let composer = NameComposer::new(
			set(&[("a", 1.0)]),
			set(&[("b", 1.0)]),
			set(&[("cv", 1.0)]),
			counts(&[(0, 1.0)]),
		)
		.unwrap();
		let mut rng = StdRng::seed_from_u64(3);
		assert_eq!(composer.generate(&mut rng).unwrap(), "");
	}

	#[test]
	fn parallel_generation_is_reproducible() {
		let composer = NameComposer::from_config(&ComposerConfig::default()).unwrap();
		let first = composer.generate_parallel(1_000, Some(42)).unwrap();
		let second = composer.generate_parallel(1_000, Some(42)).unwrap();
		assert_eq!(first.len(), 1_000);
		assert_eq!(first, second);
		assert!(composer.generate_parallel(0, Some(42)).unwrap().is_empty());
	}

	#[test]
	fn neighbouring_seeds_use_distinct_chunk_streams() {
		let draws = |seed, chunk| -> Vec<u64> {
			let mut rng = NameComposer::chunk_rng(Some(seed), chunk);
			(0..8).map(|_| rng.random()).collect()
		};
		assert_ne!(draws(43, 0), draws(42, 1));
		assert_ne!(draws(42, 0), draws(42, 1));
		assert_eq!(draws(42, 3), draws(42, 3));
	}

	#[test]
	fn parallel_generation_propagates_errors() {
		let composer = NameComposer::new(
			set(&[("a", 1.0)]),
			set(&[("b", 0.0)]),
			set(&[("cv", 1.0)]),
			counts(&[(1, 1.0)]),
		)
		.unwrap();
		assert_eq!(
			composer.generate_parallel(10, None),
			Err(NameGenError::EmptyDistribution("consonant".to_owned()))
		);
	}
}
