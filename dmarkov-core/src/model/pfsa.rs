use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;

use log::{debug, trace};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{DMarkovError, Result};
use crate::io::{build_output_path, is_up_to_date, load_binary, read_table, save_binary};
use super::frequency::Alphabet;
use super::generation_input::GenerationInput;
use super::state::State;

/// Largest accepted gap between a state's probability sum and 1.
pub const STOCHASTIC_TOLERANCE: f64 = 1e-6;

/// Name of the label column in a states table.
const LABEL_COLUMN: &str = "label";

/// Probabilistic finite-state automaton.
///
/// Owns a state table indexed by label and the alphabet. States refer to
/// each other by label only; every move is a lookup in `states`.
///
/// # Responsibilities
/// - Validate that every state is a distribution over the alphabet
/// - Generate sequences by a weighted random walk (`walk`, `generate`)
/// - Score sequences (`log_likelihood`)
/// - Load from a states table + alphabet listing, or from a binary cache
///
/// Generation never mutates the automaton, so a `Pfsa` can be shared
/// between threads as long as each run has its own random source.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Pfsa {
	states: HashMap<String, State>,
	alphabet: Alphabet,
}

impl Pfsa {
	/// Builds an automaton from its states and alphabet.
	///
	/// # Errors
	/// - `InvalidConfiguration` if two states share a label
	/// - `MissingTransition`, `InvalidProbability` or `NonStochasticRow` if a
	///   state is not a probability distribution over `alphabet`
	///
	/// Transition targets are not checked here; an unknown target surfaces as
	/// `UnknownState` when a walk reaches it.
	pub fn new<I: IntoIterator<Item = State>>(states: I, alphabet: Alphabet) -> Result<Self> {
		let mut table = HashMap::new();
		for state in states {
			state.validate(&alphabet, STOCHASTIC_TOLERANCE)?;
			match table.entry(state.label().to_owned()) {
				Entry::Occupied(entry) => {
					return Err(DMarkovError::InvalidConfiguration(format!(
						"duplicate state label '{}'",
						entry.key()
					)));
				}
				Entry::Vacant(entry) => {
					entry.insert(state);
				}
			}
		}
		Ok(Self { states: table, alphabet })
	}

	/// Reads an automaton from a states table and an alphabet listing.
	///
	/// Both files are comma separated with a header line.
	/// - alphabet: one symbol per row, first column
	/// - states: a `label` column (the first column when none is named so),
	///   and for each symbol `s` a column `s` (target label) and a column
	///   `P(s)` (probability). Other columns are ignored.
	pub fn from_files<PS, PA>(states_path: PS, alphabet_path: PA) -> Result<Self>
	where
		PS: AsRef<Path>,
		PA: AsRef<Path>,
	{
		let alphabet = Self::read_alphabet(alphabet_path)?;
		let states = Self::read_states(states_path, &alphabet)?;
		debug!("Loaded {} states over {} symbols", states.len(), alphabet.len());
		Self::new(states, alphabet)
	}

	/// Same as [`Pfsa::from_files`], with a binary cache next to the states file.
	///
	/// If `<states>.bin` is at least as recent as both tables it is loaded
	/// instead of parsing them. Otherwise the tables are parsed and the cache
	/// is (re)written.
	pub fn open<PS, PA>(states_path: PS, alphabet_path: PA) -> Result<Self>
	where
		PS: AsRef<Path>,
		PA: AsRef<Path>,
	{
		let (states_path, alphabet_path) = (states_path.as_ref(), alphabet_path.as_ref());
		let binary_data_path = build_output_path(states_path, "bin")?;
		if is_up_to_date(&binary_data_path, &[states_path, alphabet_path])? {
			debug!("Loading cached automaton from {}", binary_data_path.display());
			return Self::load(binary_data_path);
		}
		if binary_data_path.exists() {
			debug!("Cache {} is stale, rebuilding", binary_data_path.display());
		}
		let pfsa = Self::from_files(states_path, alphabet_path)?;
		pfsa.save(binary_data_path)?;
		Ok(pfsa)
	}

	/// Writes the automaton to a `postcard` binary file.
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
		save_binary(self, path)
	}

	/// Reads an automaton written by [`Pfsa::save`].
	///
	/// The decoded states go through the same checks as [`Pfsa::new`].
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
		let decoded: Self = load_binary(path)?;
		Self::new(decoded.states.into_values(), decoded.alphabet)
	}

	fn read_alphabet<P: AsRef<Path>>(path: P) -> Result<Alphabet> {
		let rows = read_table(path)?;
		let mut alphabet = Alphabet::new();
		for (line, cells) in rows.iter().skip(1) {
			match cells.first() {
				Some(symbol) if !symbol.is_empty() => {
					alphabet.insert(symbol);
				}
				_ => {
					return Err(DMarkovError::MalformedTable {
						line: *line,
						reason: "empty symbol".to_owned(),
					});
				}
			}
		}
		Ok(alphabet)
	}

	fn read_states<P: AsRef<Path>>(path: P, alphabet: &Alphabet) -> Result<Vec<State>> {
		let rows = read_table(path)?;
		let Some((header_line, header)) = rows.first() else {
			return Err(DMarkovError::MalformedTable {
				line: 1,
				reason: "missing header".to_owned(),
			});
		};

		let column = |name: &str| -> Result<usize> {
			header.iter().position(|cell| cell == name).ok_or_else(|| DMarkovError::MalformedTable {
				line: *header_line,
				reason: format!("missing column '{name}'"),
			})
		};

		let label_column = header.iter().position(|cell| cell == LABEL_COLUMN).unwrap_or(0);
		let mut symbol_columns = Vec::with_capacity(alphabet.len());
		for symbol in alphabet.iter() {
			symbol_columns.push((symbol, column(symbol)?, column(&format!("P({symbol})"))?));
		}

		let mut states = Vec::with_capacity(rows.len() - 1);
		for (line, cells) in rows.iter().skip(1) {
			let mut state = State::new(cell(cells, label_column, *line)?);
			for (symbol, target_column, probability_column) in &symbol_columns {
				let raw = cell(cells, *probability_column, *line)?;
				let probability = raw.parse::<f64>().map_err(|_| DMarkovError::MalformedTable {
					line: *line,
					reason: format!("invalid probability '{raw}' for symbol '{symbol}'"),
				})?;
				state.add_transition(symbol, cell(cells, *target_column, *line)?, probability);
			}
			states.push(state);
		}
		Ok(states)
	}

	pub fn alphabet(&self) -> &Alphabet {
		&self.alphabet
	}

	/// Number of states.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Iterates over the states in no particular order.
	pub fn states(&self) -> impl Iterator<Item = &State> {
		self.states.values()
	}

	/// Looks up a state by label.
	///
	/// # Errors
	/// Returns `UnknownState` if no state has this label.
	pub fn state(&self, label: &str) -> Result<&State> {
		self.states.get(label).ok_or_else(|| DMarkovError::UnknownState { label: label.to_owned() })
	}

	/// Probability row of a state, in alphabet order.
	pub fn morph(&self, label: &str) -> Result<Vec<f64>> {
		Ok(self.state(label)?.morph(&self.alphabet))
	}

	/// Starts a lazy random walk from `initial_state`.
	///
	/// The returned iterator emits one symbol per step and never ends on its
	/// own; see [`Walk`].
	///
	/// # Errors
	/// Returns `UnknownState` if `initial_state` is not in the table.
	pub fn walk<'a, R: Rng + ?Sized>(
		&'a self,
		rng: &'a mut R,
		initial_state: &str,
	) -> Result<Walk<'a, R>> {
		let current = self.state(initial_state)?;
		Ok(Walk { pfsa: self, rng, current, failed: false })
	}

	/// Generates exactly `length` symbols starting from `initial_state`.
	///
	/// # Errors
	/// Returns the first error of the walk (`UnknownState` when a target
	/// label is missing, `NonStochasticRow` when a reached row is not a
	/// distribution). No partial sequence is returned.
	pub fn generate<R: Rng + ?Sized>(
		&self,
		rng: &mut R,
		length: usize,
		initial_state: &str,
	) -> Result<Vec<String>> {
		debug!("Generating {length} symbols from state '{initial_state}'");
		self.walk(rng, initial_state)?.take(length).collect()
	}

	/// Generates a sequence using the parameters and random source of `input`.
	pub fn generate_with(&self, input: &GenerationInput) -> Result<Vec<String>> {
		let mut rng = input.rng();
		self.generate(&mut rng, input.length, input.initial_state())
	}

	/// Natural log-probability of emitting `sequence` from `initial_state`.
	///
	/// Returns `f64::NEG_INFINITY` as soon as a symbol has probability 0.
	///
	/// # Errors
	/// - `UnknownSymbol` if a symbol is outside the alphabet
	/// - `UnknownState` if the path reaches a missing label
	pub fn log_likelihood<S: AsRef<str>>(
		&self,
		sequence: &[S],
		initial_state: &str,
	) -> Result<f64> {
		let mut current = self.state(initial_state)?;
		let mut log_likelihood = 0.0;
		for symbol in sequence {
			let symbol = symbol.as_ref();
			let transition = current
				.transition(symbol)
				.filter(|_| self.alphabet.contains(symbol))
				.ok_or_else(|| DMarkovError::UnknownSymbol { symbol: symbol.to_owned() })?;
			if transition.probability <= 0.0 {
				return Ok(f64::NEG_INFINITY);
			}
			log_likelihood += transition.probability.ln();
			current = self.state(&transition.target)?;
		}
		Ok(log_likelihood)
	}
}

fn cell(cells: &[String], index: usize, line: usize) -> Result<&str> {
	cells.get(index).map(String::as_str).ok_or_else(|| DMarkovError::MalformedTable {
		line,
		reason: format!("expected at least {} cells, got {}", index + 1, cells.len()),
	})
}

/// Lazy weighted random walk over a [`Pfsa`].
///
/// Each `next` checks that the current state's morph sums to 1, draws a
/// symbol from it, then moves to that symbol's target. The walk is
/// unbounded: use `take(n)` to bound it.
/// After an error the iterator is exhausted.
pub struct Walk<'a, R: ?Sized> {
	pfsa: &'a Pfsa,
	rng: &'a mut R,
	current: &'a State,
	failed: bool,
}

impl<'a, R: Rng + ?Sized> Walk<'a, R> {
	/// Label of the state the next symbol will be drawn from.
	pub fn current_state(&self) -> &str {
		self.current.label()
	}

	fn step(&mut self) -> Result<String> {
		let pfsa = self.pfsa;
		let current = self.current;
		let label = current.label();

		let sum: f64 = current.morph(&pfsa.alphabet).iter().sum();
		if !sum.is_finite() || (sum - 1.0).abs() > STOCHASTIC_TOLERANCE {
			return Err(DMarkovError::NonStochasticRow { label: label.to_owned(), sum });
		}

		let symbol = current.predict(&pfsa.alphabet, &mut *self.rng).ok_or_else(|| {
			DMarkovError::NonStochasticRow { label: label.to_owned(), sum }
		})?;
		let transition = current.transition(symbol).ok_or_else(|| {
			DMarkovError::MissingTransition { label: label.to_owned(), symbol: symbol.to_owned() }
		})?;

		trace!("'{label}' --{symbol}--> '{}'", transition.target);
		self.current = pfsa.state(&transition.target)?;
		Ok(symbol.to_owned())
	}
}

impl<'a, R: Rng + ?Sized> Iterator for Walk<'a, R> {
	type Item = Result<String>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.failed {
			return None;
		}
		let result = self.step();
		self.failed = result.is_err();
		Some(result)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;
	use std::fs::File;
	use std::time::{Duration, SystemTime};

	fn two_state() -> Pfsa {
		let states = vec![
			State::new("0").with_transition("x", "1", 0.5).with_transition("y", "0", 0.5),
			State::new("1").with_transition("x", "1", 0.2).with_transition("y", "0", 0.8),
		];
		Pfsa::new(states, Alphabet::from_symbols(["x", "y"])).unwrap()
	}

	#[test]
	fn generates_requested_length() {
		let pfsa = two_state();
		let mut rng = StdRng::seed_from_u64(1);
		for _ in 0..50 {
			let sequence = pfsa.generate(&mut rng, 3, "0").unwrap();
			assert_eq!(sequence.len(), 3);
			assert!(sequence.iter().all(|s| s == "x" || s == "y"));
		}
	}

	#[test]
	fn zero_length_is_empty() {
		let pfsa = two_state();
		let mut rng = StdRng::seed_from_u64(1);
		assert!(pfsa.generate(&mut rng, 0, "0").unwrap().is_empty());
	}

	#[test]
	fn same_seed_same_sequence() {
		let pfsa = two_state();
		let a = pfsa.generate(&mut StdRng::seed_from_u64(9), 200, "0").unwrap();
		let b = pfsa.generate(&mut StdRng::seed_from_u64(9), 200, "0").unwrap();
		assert_eq!(a, b);
	}

	#[test]
	fn generate_with_seeded_input_replays() {
		let pfsa = two_state();
		let mut input = GenerationInput::new("1", 64).unwrap();
		input.set_seed(3);
		assert_eq!(pfsa.generate_with(&input).unwrap(), pfsa.generate_with(&input).unwrap());
	}

	#[test]
	fn unknown_initial_state() {
		let pfsa = two_state();
		let mut rng = StdRng::seed_from_u64(1);
		assert!(matches!(
			pfsa.generate(&mut rng, 3, "7"),
			Err(DMarkovError::UnknownState { label }) if label == "7"
		));
	}

	#[test]
	fn unknown_target_aborts_generation() {
		let states = vec![State::new("0").with_transition("x", "ghost", 1.0)];
		let pfsa = Pfsa::new(states, Alphabet::from_symbols(["x"])).unwrap();
		let mut rng = StdRng::seed_from_u64(1);
		assert!(matches!(
			pfsa.generate(&mut rng, 5, "0"),
			Err(DMarkovError::UnknownState { label }) if label == "ghost"
		));
	}

	#[test]
	fn walk_stops_after_error() {
		let states = vec![State::new("0").with_transition("x", "ghost", 1.0)];
		let pfsa = Pfsa::new(states, Alphabet::from_symbols(["x"])).unwrap();
		let mut rng = StdRng::seed_from_u64(1);
		let mut walk = pfsa.walk(&mut rng, "0").unwrap();
		assert!(walk.next().unwrap().is_err());
		assert!(walk.next().is_none());
	}

	#[test]
	fn walk_follows_deterministic_path() {
		let states = vec![
			State::new("a").with_transition("0", "b", 1.0).with_transition("1", "a", 0.0),
			State::new("b").with_transition("0", "b", 0.0).with_transition("1", "a", 1.0),
		];
		let pfsa = Pfsa::new(states, Alphabet::from_symbols(["0", "1"])).unwrap();
		let mut rng = StdRng::seed_from_u64(5);
		let mut walk = pfsa.walk(&mut rng, "a").unwrap();
		assert_eq!(walk.next().unwrap().unwrap(), "0");
		assert_eq!(walk.current_state(), "b");
		assert_eq!(walk.next().unwrap().unwrap(), "1");
		assert_eq!(walk.current_state(), "a");
	}

	#[test]
	fn non_stochastic_row_is_rejected() {
		let states = vec![
			State::new("0").with_transition("x", "0", 0.3).with_transition("y", "0", 0.3),
		];
		let result = Pfsa::new(states, Alphabet::from_symbols(["x", "y"]));
		assert!(matches!(result, Err(DMarkovError::NonStochasticRow { .. })));
	}

	#[test]
	fn duplicate_label_is_rejected() {
		let states = vec![
			State::new("0").with_transition("x", "0", 1.0),
			State::new("0").with_transition("x", "0", 1.0),
		];
		let result = Pfsa::new(states, Alphabet::from_symbols(["x"]));
		assert!(matches!(result, Err(DMarkovError::InvalidConfiguration(_))));
	}

	#[test]
	fn morph_of_state() {
		let pfsa = two_state();
		assert_eq!(pfsa.morph("1").unwrap(), vec![0.2, 0.8]);
		assert!(pfsa.morph("2").is_err());
	}

	#[test]
	fn log_likelihood_of_path() {
		let pfsa = two_state();
		// 0 -x-> 1 -y-> 0 -y-> 0
		let score = pfsa.log_likelihood(&["x", "y", "y"], "0").unwrap();
		let expected = 0.5f64.ln() + 0.8f64.ln() + 0.5f64.ln();
		assert!((score - expected).abs() < 1e-12);
	}

	#[test]
	fn log_likelihood_impossible_path() {
		let states = vec![
			State::new("0").with_transition("x", "0", 1.0).with_transition("y", "0", 0.0),
		];
		let pfsa = Pfsa::new(states, Alphabet::from_symbols(["x", "y"])).unwrap();
		assert_eq!(pfsa.log_likelihood(&["x", "y"], "0").unwrap(), f64::NEG_INFINITY);
	}

	#[test]
	fn log_likelihood_unknown_symbol() {
		let pfsa = two_state();
		assert!(matches!(
			pfsa.log_likelihood(&["z"], "0"),
			Err(DMarkovError::UnknownSymbol { symbol }) if symbol == "z"
		));
	}

	fn temp_path(name: &str) -> std::path::PathBuf {
		std::env::temp_dir().join(format!("dmarkov-{}-{name}", std::process::id()))
	}

	#[test]
	fn reads_tables_from_files() {
		let states_path = temp_path("read-states.csv");
		let alphabet_path = temp_path("read-alphabet.csv");
		write_two_state_tables(&states_path, &alphabet_path);

		let pfsa = Pfsa::from_files(&states_path, &alphabet_path).unwrap();
		std::fs::remove_file(&states_path).unwrap();
		std::fs::remove_file(&alphabet_path).unwrap();

		assert_eq!(pfsa, two_state());
	}

	#[test]
	fn label_defaults_to_first_column() {
		let states_path = temp_path("first-states.csv");
		let alphabet_path = temp_path("first-alphabet.csv");
		std::fs::write(&states_path, "name,P(x),x,note\ns,1.0,s,ignored\n").unwrap();
		std::fs::write(&alphabet_path, "symbol\nx\n").unwrap();

		let pfsa = Pfsa::from_files(&states_path, &alphabet_path).unwrap();
		std::fs::remove_file(&states_path).unwrap();
		std::fs::remove_file(&alphabet_path).unwrap();

		assert_eq!(pfsa.len(), 1);
		assert_eq!(pfsa.state("s").unwrap().transition("x").unwrap().target, "s");
	}

	#[test]
	fn missing_probability_column() {
		let states_path = temp_path("missing-states.csv");
		let alphabet_path = temp_path("missing-alphabet.csv");
		std::fs::write(&states_path, "label,x\n0,0\n").unwrap();
		std::fs::write(&alphabet_path, "symbol\nx\n").unwrap();

		let result = Pfsa::from_files(&states_path, &alphabet_path);
		std::fs::remove_file(&states_path).unwrap();
		std::fs::remove_file(&alphabet_path).unwrap();

		assert!(matches!(result, Err(DMarkovError::MalformedTable { line: 1, .. })));
	}

	#[test]
	fn bad_probability_cell() {
		let states_path = temp_path("bad-states.csv");
		let alphabet_path = temp_path("bad-alphabet.csv");
		std::fs::write(&states_path, "label,x,P(x)\n0,0,half\n").unwrap();
		std::fs::write(&alphabet_path, "symbol\nx\n").unwrap();

		let result = Pfsa::from_files(&states_path, &alphabet_path);
		std::fs::remove_file(&states_path).unwrap();
		std::fs::remove_file(&alphabet_path).unwrap();

		assert!(matches!(result, Err(DMarkovError::MalformedTable { line: 2, .. })));
	}

	fn write_two_state_tables(states_path: &Path, alphabet_path: &Path) {
		std::fs::write(states_path, "label,x,P(x),y,P(y)\n0,1,0.5,0,0.5\n1,1,0.2,0,0.8\n").unwrap();
		std::fs::write(alphabet_path, "symbol\nx\ny\n").unwrap();
	}

	fn set_modified(path: &Path, time: SystemTime) {
		File::options().write(true).open(path).unwrap().set_modified(time).unwrap();
	}

	#[test]
	fn open_writes_then_uses_cache() {
		let states_path = temp_path("cache-states.csv");
		let alphabet_path = temp_path("cache-alphabet.csv");
		write_two_state_tables(&states_path, &alphabet_path);
		let cache_path = build_output_path(&states_path, "bin").unwrap();
		let _ = std::fs::remove_file(&cache_path);

		let first = Pfsa::open(&states_path, &alphabet_path).unwrap();
		assert!(cache_path.exists());
		// Broken tables older than the cache are never read
		std::fs::write(&states_path, "garbage").unwrap();
		set_modified(&states_path, SystemTime::UNIX_EPOCH);
		set_modified(&alphabet_path, SystemTime::UNIX_EPOCH);
		let second = Pfsa::open(&states_path, &alphabet_path).unwrap();

		std::fs::remove_file(&states_path).unwrap();
		std::fs::remove_file(&alphabet_path).unwrap();
		std::fs::remove_file(&cache_path).unwrap();

		assert_eq!(first, second);
		assert_eq!(first, two_state());
	}

	#[test]
	fn open_rebuilds_stale_cache() {
		let states_path = temp_path("stale-states.csv");
		let alphabet_path = temp_path("stale-alphabet.csv");
		write_two_state_tables(&states_path, &alphabet_path);
		let cache_path = build_output_path(&states_path, "bin").unwrap();
		let _ = std::fs::remove_file(&cache_path);

		let first = Pfsa::open(&states_path, &alphabet_path).unwrap();
		std::fs::write(&states_path, "label,x,P(x),y,P(y)\n0,0,0.1,0,0.9\n").unwrap();
		set_modified(&states_path, SystemTime::now() + Duration::from_secs(60));
		let second = Pfsa::open(&states_path, &alphabet_path).unwrap();
		let reloaded = Pfsa::load(&cache_path).unwrap();

		std::fs::remove_file(&states_path).unwrap();
		std::fs::remove_file(&alphabet_path).unwrap();
		std::fs::remove_file(&cache_path).unwrap();

		assert_eq!(first.len(), 2);
		assert_eq!(second.len(), 1);
		assert_eq!(second.morph("0").unwrap(), vec![0.1, 0.9]);
		assert_eq!(reloaded, second);
	}

	#[test]
	fn open_rebuilds_when_alphabet_changes() {
		let states_path = temp_path("alpha-states.csv");
		let alphabet_path = temp_path("alpha-alphabet.csv");
		write_two_state_tables(&states_path, &alphabet_path);
		let cache_path = build_output_path(&states_path, "bin").unwrap();
		let _ = std::fs::remove_file(&cache_path);

		Pfsa::open(&states_path, &alphabet_path).unwrap();
		// Only 'x' now: the rows no longer sum to 1 over the alphabet
		std::fs::write(&alphabet_path, "symbol\nx\n").unwrap();
		set_modified(&alphabet_path, SystemTime::now() + Duration::from_secs(60));
		let result = Pfsa::open(&states_path, &alphabet_path);

		std::fs::remove_file(&states_path).unwrap();
		std::fs::remove_file(&alphabet_path).unwrap();
		std::fs::remove_file(&cache_path).unwrap();

		assert!(matches!(result, Err(DMarkovError::NonStochasticRow { .. })));
	}

	/// Builds an automaton without the constructor checks, as a hand-made
	/// or corrupted cache would decode.
	fn unchecked(probability_x: f64, probability_y: f64) -> Pfsa {
		let state = State::new("0")
			.with_transition("x", "0", probability_x)
			.with_transition("y", "0", probability_y);
		Pfsa {
			states: HashMap::from([("0".to_owned(), state)]),
			alphabet: Alphabet::from_symbols(["x", "y"]),
		}
	}

	#[test]
	fn load_rejects_non_stochastic_cache() {
		let path = temp_path("low-mass.bin");
		unchecked(0.1, 0.1).save(&path).unwrap();
		let result = Pfsa::load(&path);
		std::fs::remove_file(&path).unwrap();

		match result {
			Err(DMarkovError::NonStochasticRow { label, sum }) => {
				assert_eq!(label, "0");
				assert!((sum - 0.2).abs() < 1e-12);
			}
			other => panic!("expected NonStochasticRow, got {other:?}"),
		}
	}

	#[test]
	fn load_rejects_infinite_probability() {
		let path = temp_path("infinite.bin");
		unchecked(f64::INFINITY, 0.0).save(&path).unwrap();
		let result = Pfsa::load(&path);
		std::fs::remove_file(&path).unwrap();

		assert!(matches!(
			result,
			Err(DMarkovError::InvalidProbability { symbol, .. }) if symbol == "x"
		));
	}

	#[test]
	fn generation_reports_low_mass_row() {
		let pfsa = unchecked(0.1, 0.1);
		let mut rng = StdRng::seed_from_u64(1);
		match pfsa.generate(&mut rng, 5, "0") {
			Err(DMarkovError::NonStochasticRow { label, sum }) => {
				assert_eq!(label, "0");
				assert!((sum - 0.2).abs() < 1e-12);
			}
			other => panic!("expected NonStochasticRow, got {other:?}"),
		}
	}

	#[test]
	fn generation_reports_infinite_row_without_panicking() {
		let pfsa = unchecked(f64::INFINITY, 0.0);
		let mut rng = StdRng::seed_from_u64(1);
		assert!(matches!(
			pfsa.generate(&mut rng, 5, "0"),
			Err(DMarkovError::NonStochasticRow { sum, .. }) if sum.is_infinite()
		));
	}
}
