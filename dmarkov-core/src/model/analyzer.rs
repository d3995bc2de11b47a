use std::fmt::Display;

use crate::error::{DMarkovError, Result};
use super::conditional::{ConditionalTable, derive_conditionals};
use super::frequency::{FrequencyEstimate, estimate};

/// Two-step sequence analysis: frequencies first, conditionals second.
///
/// Keeps the frequency estimate of the last analysed sequence so that
/// conditional probabilities can be requested afterwards. Asking for them
/// before any successful `analyze` is reported as an error.
///
/// # Invariants
/// - `max_length` is always >= 1
/// - `estimate`, when present, was computed with `max_length`
#[derive(Clone, Debug)]
pub struct SequenceAnalyzer {
	max_length: usize,
	estimate: Option<FrequencyEstimate>,
}

impl SequenceAnalyzer {
	/// Creates an analyzer for contexts up to `max_length` symbols.
	///
	/// # Errors
	/// Returns `InvalidConfiguration` if `max_length < 1`.
	pub fn new(max_length: usize) -> Result<Self> {
		if max_length < 1 {
			return Err(DMarkovError::InvalidConfiguration(format!(
				"max_length must be >= 1, got {max_length}"
			)));
		}
		Ok(Self { max_length, estimate: None })
	}

	/// Wraps an estimate computed elsewhere (for instance loaded from cache).
	pub fn from_estimate(estimate: FrequencyEstimate) -> Result<Self> {
		let mut analyzer = Self::new(estimate.max_length())?;
		analyzer.estimate = Some(estimate);
		Ok(analyzer)
	}

	pub fn max_length(&self) -> usize {
		self.max_length
	}

	/// Whether frequency estimation has been computed.
	pub fn is_computed(&self) -> bool {
		self.estimate.is_some()
	}

	/// Estimates subsequence frequencies of `sequence`, replacing any previous
	/// estimate.
	pub fn analyze<T: Display>(&mut self, sequence: &[T]) -> Result<&FrequencyEstimate> {
		let estimate = estimate(sequence, self.max_length)?;
		Ok(&*self.estimate.insert(estimate))
	}

	/// Last frequency estimate, `None` if nothing was analysed yet.
	pub fn frequencies(&self) -> Option<&FrequencyEstimate> {
		self.estimate.as_ref()
	}

	/// Conditional probabilities of the last analysed sequence.
	///
	/// # Errors
	/// Returns `InvalidConfiguration` if frequencies were not computed.
	pub fn conditional_probabilities(&self) -> Result<Vec<ConditionalTable>> {
		let estimate = self.estimate.as_ref().ok_or_else(|| {
			DMarkovError::InvalidConfiguration(
				"frequency estimation has not been computed".to_owned(),
			)
		})?;
		Ok(derive_conditionals(estimate))
	}
}
