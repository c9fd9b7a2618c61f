use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{NameGenError, Result};
use crate::text::parse_weights;
use super::presets::Preset;
use super::weighted_set::WeightedSet;

/// Default syllable shapes.
pub const DEFAULT_SYLLABLES: &str = "cv:2,cvc,vc:2";

/// Default syllable counts.
pub const DEFAULT_SYLLABLE_COUNTS: &str = "2,3:3,4";

/// Largest syllable count a configuration may ask for.
pub const MAX_SYLLABLES: usize = 64;

/// Where a letter distribution comes from.
///
/// Serialized as a plain string: a preset name or a custom weight spec.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(from = "String", into = "String")]
pub enum LetterSource {
	Preset(Preset),
	/// A weight spec such as `"a:3,e:2,io"`. Every key is split into its
	/// characters and each character receives the key's weight.
	Custom(String),
}

impl LetterSource {
	/// Builds the distribution, taking preset letters from `preset_letters`.
	///
	/// # Errors
	/// Returns `NameGenError::Parse` if a custom spec is malformed.
	pub fn resolve<F>(&self, preset_letters: F) -> Result<WeightedSet<String>>
	where
		F: FnOnce(Preset) -> WeightedSet<String>,
	{
		match self {
			LetterSource::Preset(preset) => Ok(preset_letters(*preset)),
			LetterSource::Custom(spec) => {
				let mut set = WeightedSet::new();
				for (key, weight) in parse_weights(spec)? {
					for c in key.chars() {
						set.add(c.to_string(), weight);
					}
				}
				Ok(set)
			}
		}
	}
}

impl From<&str> for LetterSource {
	fn from(s: &str) -> Self {
		match s.parse::<Preset>() {
			Ok(preset) => LetterSource::Preset(preset),
			Err(_) => LetterSource::Custom(s.to_owned()),
		}
	}
}

impl From<String> for LetterSource {
	fn from(s: String) -> Self {
		LetterSource::from(s.as_str())
	}
}

impl From<LetterSource> for String {
	fn from(source: LetterSource) -> Self {
		source.to_string()
	}
}

impl fmt::Display for LetterSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			LetterSource::Preset(preset) => fmt::Display::fmt(preset, f),
			LetterSource::Custom(spec) => f.write_str(spec),
		}
	}
}

/// Textual configuration of a `NameComposer`.
///
/// # Invariants
/// - `syllables` and `syllable_counts` use the `key[:weight]` spec format
/// - `syllable_counts` keys are decimal integers (checked when resolved)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ComposerConfig {
	pub vowels: LetterSource,
	pub consonants: LetterSource,
	/// Syllable shapes over `v`, `c` and `l`.
	pub syllables: String,
	/// Number of syllables per name.
	pub syllable_counts: String,
}

impl Default for ComposerConfig {
	fn default() -> Self {
		Self {
			vowels: LetterSource::Preset(Preset::English),
			consonants: LetterSource::Preset(Preset::English),
			syllables: DEFAULT_SYLLABLES.to_owned(),
			syllable_counts: DEFAULT_SYLLABLE_COUNTS.to_owned(),
		}
	}
}

impl ComposerConfig {
	pub fn vowel_set(&self) -> Result<WeightedSet<String>> {
		self.vowels.resolve(Preset::vowels)
	}

	pub fn consonant_set(&self) -> Result<WeightedSet<String>> {
		self.consonants.resolve(Preset::consonants)
	}

	pub fn syllable_set(&self) -> Result<WeightedSet<String>> {
		Ok(parse_weights(&self.syllables)?.into_iter().collect())
	}

	/// Resolves the syllable count keys to integers.
	///
	/// # Errors
	/// - `NameGenError::InvalidCount` for a key that is not a non-negative decimal integer
	/// - `NameGenError::CountTooLarge` for a count above `MAX_SYLLABLES`
	pub fn syllable_count_set(&self) -> Result<WeightedSet<usize>> {
		let mut set = WeightedSet::new();
		for (key, weight) in parse_weights(&self.syllable_counts)? {
			let count: usize = key.parse().map_err(|_| NameGenError::InvalidCount(key.clone()))?;
			if count > MAX_SYLLABLES {
				return Err(NameGenError::CountTooLarge { count, max: MAX_SYLLABLES });
			}
			set.add(count, weight);
		}
		Ok(set)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn letter_source_prefers_presets() {
		assert_eq!(LetterSource::from("english"), LetterSource::Preset(Preset::English));
		assert_eq!(LetterSource::from("UNIFORM"), LetterSource::Preset(Preset::Uniform));
		assert_eq!(LetterSource::from("a:2,e"), LetterSource::Custom("a:2,e".to_owned()));
	}

	#[test]
	fn custom_letters_split_keys_into_characters() {
		let set = LetterSource::from("ae:2,i").resolve(Preset::vowels).unwrap();
		assert_eq!(set.weight(&"a".to_owned()), 2.0);
		assert_eq!(set.weight(&"e".to_owned()), 2.0);
		assert_eq!(set.weight(&"i".to_owned()), 1.0);
		assert_eq!(set.total(), 5.0);
	}

	#[test]
	fn default_counts_resolve_to_integers() {
		let counts = ComposerConfig::default().syllable_count_set().unwrap();
		assert_eq!(counts.weight(&2), 1.0);
		assert_eq!(counts.weight(&3), 3.0);
		assert_eq!(counts.weight(&4), 1.0);
	}

	#[test]
	fn non_integer_count_is_rejected() {
		let config = ComposerConfig { syllable_counts: "2,three".to_owned(), ..Default::default() };
		assert_eq!(
			config.syllable_count_set().unwrap_err(),
			NameGenError::InvalidCount("three".to_owned())
		);
	}

	#[test]
	fn negative_count_is_rejected() {
		let config = ComposerConfig { syllable_counts: "-1,2".to_owned(), ..Default::default() };
		assert_eq!(
			config.syllable_count_set().unwrap_err(),
			NameGenError::InvalidCount("-1".to_owned())
		);
	}

	#[test]
	fn count_above_limit_is_rejected() {
		let config = ComposerConfig { syllable_counts: "2,1000000000".to_owned(), ..Default::default() };
		assert_eq!(
			config.syllable_count_set().unwrap_err(),
			NameGenError::CountTooLarge { count: 1_000_000_000, max: MAX_SYLLABLES }
		);

		let config = ComposerConfig { syllable_counts: MAX_SYLLABLES.to_string(), ..Default::default() };
		assert_eq!(config.syllable_count_set().unwrap().weight(&MAX_SYLLABLES), 1.0);
	}

	#[test]
	fn serializes_sources_as_strings() {
		let config = ComposerConfig {
			consonants: LetterSource::from("b:3,k"),
			..Default::default()
		};
		let json = serde_json::to_value(&config).unwrap();
		assert_eq!(json["vowels"], "english");
		assert_eq!(json["consonants"], "b:3,k");

		let parsed: ComposerConfig = serde_json::from_str(r#"{"vowels":"uniform"}"#).unwrap();
		assert_eq!(parsed.vowels, LetterSource::Preset(Preset::Uniform));
		assert_eq!(parsed.syllables, DEFAULT_SYLLABLES);
	}
}
