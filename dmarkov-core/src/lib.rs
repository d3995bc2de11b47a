//! Sequence statistics and probabilistic finite-state automata.
//!
//! This crate provides the building blocks used by D-Markov style analysis:
//! - Subsequence frequency estimation up to a bounded context length
//! - Conditional next-symbol probabilities derived from adjacent lengths
//! - A PFSA model (states keyed by label, weighted symbol transitions)
//! - Stochastic sequence generation and scoring over a PFSA
//!
//! Estimation is pure and synchronous. Generation takes its randomness from
//! an injected `rand::Rng`, so runs can be reproduced with a seeded generator.

/// Estimators, the PFSA model and generation configuration.
pub mod model;

/// Error taxonomy shared by every module.
pub mod error;

/// File helpers (symbol sequences, PFSA tables, binary cache).
pub mod io;

pub use error::{DMarkovError, Result};
pub use model::analyzer::SequenceAnalyzer;
pub use model::conditional::{ConditionalKey, ConditionalTable, derive_conditionals};
pub use model::frequency::{Alphabet, FrequencyEstimate, FrequencyTable, estimate};
pub use model::generation_input::GenerationInput;
pub use model::pfsa::{Pfsa, Walk};
pub use model::state::{State, Transition};
