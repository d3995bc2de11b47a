use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::{DMarkovError, Result};

/// Parameters for generating a sequence from a PFSA.
///
/// # Responsibilities
/// - Track the number of symbols to emit and the starting state
/// - Hold an optional seed so runs can be replayed
/// - Build the random source used by `Pfsa::generate_with`
///
/// # Invariants
/// - `initial_state` is never empty
pub struct GenerationInput {
	/// Number of symbols to emit. `0` yields an empty sequence.
	pub length: usize,

	/// Label of the state the walk starts from.
	initial_state: String,

	/// Seed for a reproducible run; `None` draws from OS entropy.
	seed: Option<u64>,
}

impl GenerationInput {
	/// Creates an unseeded input.
	///
	/// # Errors
	/// Returns an error if `initial_state` is empty.
	pub fn new(initial_state: &str, length: usize) -> Result<Self> {
		let mut input = Self { length, initial_state: String::new(), seed: None };
		input.set_initial_state(initial_state)?;
		Ok(input)
	}

	pub fn initial_state(&self) -> &str {
		&self.initial_state
	}

	/// Sets the starting state label.
	///
	/// # Errors
	/// Returns an error if the label is empty.
	pub fn set_initial_state(&mut self, initial_state: &str) -> Result<()> {
		if initial_state.is_empty() {
			return Err(DMarkovError::InvalidConfiguration(
				"initial state label cannot be empty".to_owned(),
			));
		}
		self.initial_state = initial_state.to_owned();
		Ok(())
	}

	pub fn seed(&self) -> Option<u64> {
		self.seed
	}

	/// Makes every generation with this input replay the same draws.
	pub fn set_seed(&mut self, seed: u64) {
		self.seed = Some(seed);
	}

	pub fn clear_seed(&mut self) {
		self.seed = None;
	}

	/// Random source for one generation run.
	pub(crate) fn rng(&self) -> StdRng {
		match self.seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_os_rng(),
		}
	}
}
