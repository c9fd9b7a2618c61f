//! Pronounceable random name generation.
//!
//! Names are assembled from syllables. Each syllable follows a shape such as
//! `"cv"` or `"cvc"`, and each symbol of the shape is filled by sampling a
//! weighted letter distribution:
//! - `v`: vowels
//! - `c`: consonants
//! - `l`: any letter (vowels and consonants merged)
//!
//! The number of syllables and the shape of each one are themselves drawn from
//! weighted distributions, all backed by [`model::weighted_set::WeightedSet`].

/// Weighted distributions, presets, configuration and the name composer.
pub mod model;

/// Text glue: the `key:weight` specification parser and title-casing.
pub mod text;

/// Crate error type.
pub mod error;

pub use error::{NameGenError, Result};
