use std::collections::{HashMap, HashSet};
use std::fmt;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::frequency::{Alphabet, FrequencyEstimate};

/// Key of a conditional probability: `symbol` following `context`.
///
/// Renders as `symbol|context`. An empty context stands for "no history".
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConditionalKey {
	pub symbol: String,
	pub context: String,
}

impl ConditionalKey {
	pub fn new(symbol: &str, context: &str) -> Self {
		Self { symbol: symbol.to_owned(), context: context.to_owned() }
	}
}

impl fmt::Display for ConditionalKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}|{}", self.symbol, self.context)
	}
}

/// Probabilities of the next symbol given a context of fixed length.
///
/// # Invariants
/// - Every context present has one entry per alphabet symbol
/// - Unobserved continuations are stored as exactly `0.0`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ConditionalTable {
	context_length: usize,
	probabilities: HashMap<ConditionalKey, f64>,
}

impl ConditionalTable {
	fn new(context_length: usize) -> Self {
		Self { context_length, probabilities: HashMap::new() }
	}

	fn insert(&mut self, symbol: &str, context: &str, probability: f64) {
		self.probabilities.insert(ConditionalKey::new(symbol, context), probability);
	}

	/// Number of symbols in every context of this table.
	pub fn context_length(&self) -> usize {
		self.context_length
	}

	/// Probability of `symbol` given `context`, `None` if the context was
	/// never observed or the symbol is outside the alphabet.
	pub fn get(&self, symbol: &str, context: &str) -> Option<f64> {
		self.probabilities.get(&ConditionalKey::new(symbol, context)).copied()
	}

	/// Distinct contexts, in no particular order.
	pub fn contexts(&self) -> HashSet<&str> {
		self.probabilities.keys().map(|key| key.context.as_str()).collect()
	}

	/// Next-symbol distribution for `context`, in alphabet order.
	///
	/// Returns `None` if the context is not part of the table.
	pub fn row(&self, context: &str, alphabet: &Alphabet) -> Option<Vec<f64>> {
		alphabet.iter().map(|symbol| self.get(symbol, context)).collect()
	}

	pub fn len(&self) -> usize {
		self.probabilities.len()
	}

	pub fn is_empty(&self) -> bool {
		self.probabilities.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&ConditionalKey, f64)> {
		self.probabilities.iter().map(|(k, v)| (k, *v))
	}
}

/// Derives conditional next-symbol probabilities from a frequency estimate.
///
/// Returns `max_length` tables. Index 0 holds the length-1 frequencies as
/// `symbol|""` entries. Index `l >= 1` crosses every context `s` of the
/// length-`l` table with every alphabet symbol `a`:
/// `P(a|s) = P(s + a) / P(s)` when `s + a` was observed, `0.0` otherwise.
///
/// Contexts come from the keys of the length-`l` table, so `P(s) > 0`
/// whenever it is used as a divisor.
///
/// An estimate with no observed symbols yields empty tables.
pub fn derive_conditionals(estimate: &FrequencyEstimate) -> Vec<ConditionalTable> {
	let alphabet = estimate.alphabet();
	let max_length = estimate.max_length();
	if alphabet.is_empty() {
		warn!("Deriving conditional probabilities from an empty estimate");
	}

	let mut tables = Vec::with_capacity(max_length);

	let mut unconditioned = ConditionalTable::new(0);
	if let Some(first) = estimate.table(1) {
		for symbol in alphabet.iter() {
			unconditioned.insert(symbol, "", first.get(symbol).unwrap_or(0.0));
		}
	}
	tables.push(unconditioned);

	let layers = estimate.tables();
	for (length, pair) in (1..).zip(layers.windows(2)) {
		let (layer, next_layer) = (&pair[0], &pair[1]);
		let mut table = ConditionalTable::new(length);
		let mut extended = String::new();
		for (context, context_probability) in layer.iter() {
			for symbol in alphabet.iter() {
				extended.clear();
				extended.push_str(context);
				extended.push_str(symbol);
				let probability = match next_layer.get(&extended) {
					Some(joint) => joint / context_probability,
					None => 0.0,
				};
				table.insert(symbol, context, probability);
			}
		}
		debug!("Conditional probabilities for context length {length}: {} entries", table.len());
		tables.push(table);
	}

	tables
}
