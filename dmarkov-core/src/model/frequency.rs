use std::collections::HashMap;
use std::fmt::Display;
use std::path::Path;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::error::{DMarkovError, Result};
use crate::io::{load_binary, save_binary};

/// Distinct symbols observed in a sequence.
///
/// Symbols are kept in first-occurrence order, but the alphabet has set
/// semantics: inserting a symbol twice keeps a single copy. The order is only
/// used to make sampling reproducible.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Alphabet {
	symbols: Vec<String>,
}

impl Alphabet {
	/// Creates an empty alphabet.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds an alphabet from a list of symbols, dropping duplicates.
	pub fn from_symbols<I, S>(symbols: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut alphabet = Self::new();
		for symbol in symbols {
			alphabet.insert(symbol.as_ref());
		}
		alphabet
	}

	/// Adds a symbol. Returns `false` if it was already present.
	pub fn insert(&mut self, symbol: &str) -> bool {
		if self.contains(symbol) {
			return false;
		}
		self.symbols.push(symbol.to_owned());
		true
	}

	pub fn contains(&self, symbol: &str) -> bool {
		self.symbols.iter().any(|s| s == symbol)
	}

	pub fn len(&self) -> usize {
		self.symbols.len()
	}

	pub fn is_empty(&self) -> bool {
		self.symbols.is_empty()
	}

	/// Iterates over the symbols in first-occurrence order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.symbols.iter().map(String::as_str)
	}
}

/// Empirical probabilities of every observed context of one length.
///
/// # Invariants
/// - Every key is the concatenation of exactly `length` symbols
/// - Every probability lies in (0, 1]; unobserved contexts have no key
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FrequencyTable {
	length: usize,
	probabilities: HashMap<String, f64>,
}

impl FrequencyTable {
	/// Turns window counts into probabilities by dividing by `total`.
	fn from_counts(length: usize, counts: HashMap<String, usize>, total: usize) -> Self {
		let probabilities = counts
			.into_iter()
			.map(|(context, count)| (context, count as f64 / total as f64))
			.collect();
		Self { length, probabilities }
	}

	/// Number of symbols in every context of this table.
	pub fn length(&self) -> usize {
		self.length
	}

	/// Probability of `context`, `None` if it was never observed.
	pub fn get(&self, context: &str) -> Option<f64> {
		self.probabilities.get(context).copied()
	}

	pub fn contains(&self, context: &str) -> bool {
		self.probabilities.contains_key(context)
	}

	/// Number of distinct contexts observed.
	pub fn len(&self) -> usize {
		self.probabilities.len()
	}

	pub fn is_empty(&self) -> bool {
		self.probabilities.is_empty()
	}

	/// Iterates over `(context, probability)` pairs in no particular order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
		self.probabilities.iter().map(|(k, v)| (k.as_str(), *v))
	}

	/// Sum of all probabilities.
	///
	/// Exactly 1 for length 1 on a non-empty sequence; below 1 for longer
	/// contexts since the last `length - 1` positions start no window.
	pub fn total_mass(&self) -> f64 {
		self.probabilities.values().sum()
	}
}

/// Output of [`estimate`]: one frequency table per context length plus the
/// alphabet discovered at length 1.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FrequencyEstimate {
	sequence_length: usize,
	tables: Vec<FrequencyTable>,
	alphabet: Alphabet,
}

impl FrequencyEstimate {
	/// Largest context length estimated.
	pub fn max_length(&self) -> usize {
		self.tables.len()
	}

	/// Length of the analysed sequence (the common denominator).
	pub fn sequence_length(&self) -> usize {
		self.sequence_length
	}

	pub fn alphabet(&self) -> &Alphabet {
		&self.alphabet
	}

	/// Table for contexts of `length` symbols, `None` outside `1..=max_length`.
	pub fn table(&self, length: usize) -> Option<&FrequencyTable> {
		length.checked_sub(1).and_then(|index| self.tables.get(index))
	}

	/// All tables, index `i` holding contexts of length `i + 1`.
	pub fn tables(&self) -> &[FrequencyTable] {
		&self.tables
	}

	/// Probability of a context of `length` symbols, 0 if never observed.
	pub fn probability(&self, length: usize, context: &str) -> f64 {
		self.table(length).and_then(|table| table.get(context)).unwrap_or(0.0)
	}

	/// Writes the estimate to a `postcard` binary file.
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
		save_binary(self, path)
	}

	/// Reads an estimate previously written by [`FrequencyEstimate::save`].
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
		load_binary(path)
	}
}

/// Estimates subsequence probabilities for every context length `1..=max_length`.
///
/// For each length `l`, a window of width `l` slides over every start
/// position `0..=len - l`, and the concatenated (stringified) symbols of the
/// window are counted. Counts are then divided by the length of the whole
/// sequence, at every `l`. The alphabet is collected while counting `l = 1`.
///
/// An empty sequence gives empty tables and an empty alphabet. A
/// `max_length` larger than the sequence leaves the longer tables empty.
///
/// # Errors
/// Returns `InvalidConfiguration` if `max_length < 1`.
pub fn estimate<T: Display>(sequence: &[T], max_length: usize) -> Result<FrequencyEstimate> {
	if max_length < 1 {
		return Err(DMarkovError::InvalidConfiguration(format!(
			"max_length must be >= 1, got {max_length}"
		)));
	}

	let symbols: Vec<String> = sequence.iter().map(ToString::to_string).collect();
	let total = symbols.len();
	debug!("Estimating subsequence probabilities, L = {max_length}, sequence length = {total}");

	let mut alphabet = Alphabet::new();
	let mut tables = Vec::with_capacity(max_length);
	for length in 1..=max_length {
		let mut counts: HashMap<String, usize> = HashMap::new();
		// `windows` yields nothing when the sequence is shorter than `length`
		for window in symbols.windows(length) {
			let context = window.concat();
			if length == 1 {
				alphabet.insert(&context);
			}
			*counts.entry(context).or_insert(0) += 1;
		}
		trace!("Length {length}: {} distinct contexts", counts.len());
		tables.push(FrequencyTable::from_counts(length, counts, total));
	}

	debug!("Subsequence probabilities computed, alphabet size = {}", alphabet.len());
	Ok(FrequencyEstimate { sequence_length: total, tables, alphabet })
}
