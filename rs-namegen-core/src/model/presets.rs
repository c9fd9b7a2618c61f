use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NameGenError;
use super::weighted_set::WeightedSet;

const VOWELS: [&str; 6] = ["a", "e", "i", "o", "u", "y"];

const CONSONANTS: [&str; 20] = [
	"b", "c", "d", "f", "g", "h", "j", "k", "l", "m", "n", "p", "q", "r", "s", "t", "v", "w", "x", "z",
];

/// Letter frequencies in English text, in thousandths of a percent.
const ENGLISH_VOWELS: [(&str, f64); 6] = [
	("a", 8167.0),
	("e", 12702.0),
	("i", 6966.0),
	("o", 7507.0),
	("u", 2758.0),
	("y", 1974.0),
];

const ENGLISH_CONSONANTS: [(&str, f64); 20] = [
	("b", 1492.0),
	("c", 2782.0),
	("d", 4253.0),
	("f", 2228.0),
	("g", 2015.0),
	("h", 6094.0),
	("j", 153.0),
	("k", 772.0),
	("l", 4025.0),
	("m", 2406.0),
	("n", 6749.0),
	("p", 1929.0),
	("q", 95.0),
	("r", 5987.0),
	("s", 6327.0),
	("t", 9056.0),
	("v", 978.0),
	("w", 2360.0),
	("x", 150.0),
	("z", 74.0),
];

/// Built-in vowel/consonant distributions.
///
/// `y` counts as a vowel in both presets.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
	/// Every letter weighs 1.
	Uniform,
	/// Letters weigh their frequency in English text.
	English,
}

impl Preset {
	pub const ALL: [Preset; 2] = [Preset::Uniform, Preset::English];

	pub fn name(self) -> &'static str {
		match self {
			Preset::Uniform => "uniform",
			Preset::English => "english",
		}
	}

	/// Builds a fresh vowel distribution.
	pub fn vowels(self) -> WeightedSet<String> {
		match self {
			Preset::Uniform => VOWELS.iter().map(|v| (v.to_string(), 1.0)).collect(),
			Preset::English => ENGLISH_VOWELS.iter().map(|(v, w)| (v.to_string(), *w)).collect(),
		}
	}

	/// Builds a fresh consonant distribution.
	pub fn consonants(self) -> WeightedSet<String> {
		match self {
			Preset::Uniform => CONSONANTS.iter().map(|c| (c.to_string(), 1.0)).collect(),
			Preset::English => ENGLISH_CONSONANTS.iter().map(|(c, w)| (c.to_string(), *w)).collect(),
		}
	}
}

impl fmt::Display for Preset {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Preset {
	type Err = NameGenError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Preset::ALL
			.into_iter()
			.find(|preset| preset.name().eq_ignore_ascii_case(s.trim()))
			.ok_or_else(|| NameGenError::Parse(format!("unknown preset {s:?}")))
	}
}
