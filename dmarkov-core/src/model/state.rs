use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{DMarkovError, Result};
use super::frequency::Alphabet;

/// Outgoing edge of a state for one symbol.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Transition {
	/// Label of the state reached after emitting the symbol.
	pub target: String,
	/// Probability of emitting the symbol from the owning state.
	pub probability: f64,
}

/// Represents a state of a PFSA.
///
/// A `State` is identified by its `label` and holds, for each alphabet
/// symbol, the label of the next state and the probability of emitting that
/// symbol. Targets are labels only: moving to them always goes through the
/// owning `Pfsa`'s state table.
///
/// ## Responsibilities:
/// - Store per-symbol transitions
/// - Expose the probability row ("morph") in alphabet order
/// - Draw the next symbol from that row
///
/// ## Invariants (checked by `Pfsa::new`)
/// - Every alphabet symbol has a transition
/// - Probabilities are in [0, 1] and sum to 1
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct State {
	label: String,
	transitions: HashMap<String, Transition>,
}

impl State {
	/// Creates a state with no transitions.
	pub fn new(label: &str) -> Self {
		Self {
			label: label.to_owned(),
			transitions: HashMap::new(),
		}
	}

	/// Builder form of [`State::add_transition`].
	pub fn with_transition(mut self, symbol: &str, target: &str, probability: f64) -> Self {
		self.add_transition(symbol, target, probability);
		self
	}

	/// Sets the transition for `symbol`, replacing any previous one.
	pub fn add_transition(&mut self, symbol: &str, target: &str, probability: f64) {
		self.transitions.insert(
			symbol.to_owned(),
			Transition { target: target.to_owned(), probability },
		);
	}

	pub fn label(&self) -> &str {
		&self.label
	}

	pub fn transition(&self, symbol: &str) -> Option<&Transition> {
		self.transitions.get(symbol)
	}

	/// Emission probabilities in alphabet order. Missing symbols count as 0.
	pub fn morph(&self, alphabet: &Alphabet) -> Vec<f64> {
		alphabet
			.iter()
			.map(|symbol| self.transition(symbol).map_or(0.0, |t| t.probability))
			.collect()
	}

	/// Checks that the row is a probability distribution over `alphabet`.
	pub(crate) fn validate(&self, alphabet: &Alphabet, tolerance: f64) -> Result<()> {
		let mut sum = 0.0;
		for symbol in alphabet.iter() {
			let transition = self.transition(symbol).ok_or_else(|| DMarkovError::MissingTransition {
				label: self.label.clone(),
				symbol: symbol.to_owned(),
			})?;
			let probability = transition.probability;
			if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
				return Err(DMarkovError::InvalidProbability {
					label: self.label.clone(),
					symbol: symbol.to_owned(),
					probability,
				});
			}
			sum += probability;
		}

		if (sum - 1.0).abs() > tolerance {
			return Err(DMarkovError::NonStochasticRow { label: self.label.clone(), sum });
		}
		Ok(())
	}

	/// Draws the next symbol using categorical sampling over the morph.
	///
	/// A uniform value in `[0, total)` is walked down the row by cumulative
	/// subtraction, in alphabet order, so a seeded `rng` always yields the
	/// same symbol.
	///
	/// Returns `None` if the row carries no probability mass or its mass is
	/// not finite. Callers needing a strict distribution check the row first
	/// (see `Walk`).
	pub fn predict<'a, R: Rng + ?Sized>(
		&self,
		alphabet: &'a Alphabet,
		rng: &mut R,
	) -> Option<&'a str> {
		let morph = self.morph(alphabet);
		let total: f64 = morph.iter().sum();
		if !total.is_finite() || total <= 0.0 {
			return None;
		}

		let mut r = rng.random_range(0.0..total);

		let mut fallback: Option<&str> = None;
		for (symbol, probability) in alphabet.iter().zip(morph) {
			if probability <= 0.0 {
				continue;
			}
			if r < probability {
				return Some(symbol);
			}
			r -= probability;
			fallback = Some(symbol);
		}

		// Rounding can leave `r` just above the last bucket
		fallback
	}
}
