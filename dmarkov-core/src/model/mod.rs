//! Top-level module for sequence statistics and PFSA simulation.
//!
//! This module groups:
//! - Subsequence frequency estimation (`frequency`)
//! - Conditional next-symbol probabilities (`conditional`)
//! - A stateful analysis wrapper (`analyzer`)
//! - The PFSA model and its generator (`pfsa`, `state`)
//! - Generation configuration (`generation_input`)

/// Subsequence frequency tables and the observed alphabet.
///
/// Counts every window of length 1..L and normalises by the sequence length.
pub mod frequency;

/// Conditional probabilities `symbol|context` built from two adjacent
/// frequency layers.
pub mod conditional;

/// Runs frequency then conditional estimation and remembers whether the
/// first step has been computed.
pub mod analyzer;

/// One PFSA state: per-symbol target label and probability.
///
/// Also provides categorical sampling of the next symbol.
pub mod state;

/// Probabilistic finite-state automaton: state table, validation,
/// lazy generation and scoring.
pub mod pfsa;

/// Generation parameters (length, initial state, optional seed).
pub mod generation_input;
