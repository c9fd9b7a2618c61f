use std::fmt;

/// Errors raised while configuring or running name generation.
///
/// Every variant is fatal for the run: a composer that fails once will keep
/// failing with the same configuration, so callers are expected to abort.
#[derive(Debug, Clone, PartialEq)]
pub enum NameGenError {
	/// A `WeightedSet` was sampled while its total was not a positive finite number.
	Unsampleable { total: f64 },
	/// A named distribution of the composer could not be sampled.
	EmptyDistribution(String),
	/// A syllable shape contains a symbol other than `v`, `c` or `l`.
	UnknownSymbol { shape: String, symbol: char },
	/// A syllable count key is not a non-negative decimal integer.
	InvalidCount(String),
	/// A syllable count is above the configured limit.
	CountTooLarge { count: usize, max: usize },
	/// A weight specification string could not be parsed.
	Parse(String),
}

impl fmt::Display for NameGenError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Unsampleable { total } => {
				write!(f, "cannot sample a distribution with total weight {total}")
			}
			Self::EmptyDistribution(name) => {
				write!(f, "{name} distribution is empty or has zero total weight")
			}
			Self::UnknownSymbol { shape, symbol } => {
				write!(f, "unrecognized letter type {symbol:?} in syllable shape {shape:?}")
			}
			Self::InvalidCount(key) => {
				write!(f, "syllable count {key:?} is not a non-negative integer")
			}
			Self::CountTooLarge { count, max } => {
				write!(f, "syllable count {count} is above the limit of {max}")
			}
			Self::Parse(msg) => write!(f, "parse error: {msg}"),
		}
	}
}

impl std::error::Error for NameGenError {}

pub type Result<T> = std::result::Result<T, NameGenError>;
