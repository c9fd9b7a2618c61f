//! Top-level module for name generation.
//!
//! This module provides:
//! - A weighted random-choice collection (`WeightedSet`)
//! - Built-in letter distributions (`Preset`)
//! - Textual configuration (`ComposerConfig`)
//! - The syllable-based generator (`NameComposer`)

/// Mutable discrete distribution with weighted sampling.
///
/// Accumulates weight per item and samples in a single pass.
pub mod weighted_set;

/// Built-in vowel and consonant distributions (`uniform`, `english`).
pub mod presets;

/// Textual configuration resolved into distributions.
///
/// Presets or custom weight specs for letters, plus syllable shape and
/// syllable count specs.
pub mod config;

/// High-level interface assembling names from syllables.
///
/// Samples a syllable count, then a shape per syllable, then a letter per
/// shape symbol.
pub mod composer;
