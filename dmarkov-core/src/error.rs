//! Error types for estimation and PFSA operations.

use thiserror::Error;

/// Errors raised by the estimators, the PFSA model and its I/O helpers.
#[derive(Error, Debug)]
pub enum DMarkovError {
	/// A parameter is out of range, or an operation was called out of order
	#[error("invalid configuration: {0}")]
	InvalidConfiguration(String),

	/// A label is not present in the state table
	#[error("unknown state '{label}'")]
	UnknownState { label: String },

	/// A state's probabilities do not sum to 1
	#[error("state '{label}' is not stochastic: probabilities sum to {sum}")]
	NonStochasticRow { label: String, sum: f64 },

	/// A state has no transition for an alphabet symbol
	#[error("state '{label}' has no transition for symbol '{symbol}'")]
	MissingTransition { label: String, symbol: String },

	/// A transition probability is outside [0, 1] or not finite
	#[error("state '{label}' has invalid probability {probability} for symbol '{symbol}'")]
	InvalidProbability {
		label: String,
		symbol: String,
		probability: f64,
	},

	/// A symbol is not part of the alphabet
	#[error("unknown symbol '{symbol}'")]
	UnknownSymbol { symbol: String },

	/// A tabular file could not be parsed
	#[error("malformed table at line {line}: {reason}")]
	MalformedTable { line: usize, reason: String },

	/// I/O error
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// Binary cache encoding/decoding error
	#[error("encoding error: {0}")]
	Encoding(#[from] postcard::Error),
}

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, DMarkovError>;
