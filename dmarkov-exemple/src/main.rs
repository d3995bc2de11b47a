use dmarkov_core::{GenerationInput, Pfsa, SequenceAnalyzer};
use log::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::init();

	// Load the even process from its states table and alphabet listing.
	// A binary cache (even_states.bin) is written next to the table on first run
	let pfsa = Pfsa::open("./data/even_states.csv", "./data/even_alphabet.csv")?;
	info!("Loaded automaton with {} states", pfsa.len());

	// Generate a reproducible sequence starting from state 'A'
	let mut input = GenerationInput::new("A", 10_000)?;
	input.set_seed(42);
	let sequence = pfsa.generate_with(&input)?;
	println!("First symbols: {}", sequence.iter().take(40).cloned().collect::<String>());
	println!("Log-likelihood: {:.3}", pfsa.log_likelihood(&sequence, "A")?);

	// Asking for conditionals before any analysis is reported, not skipped
	let mut analyzer = SequenceAnalyzer::new(3)?;
	match analyzer.conditional_probabilities() {
		Ok(_) => println!("Should not happen"),
		Err(e) => println!("Expected error: {e}"),
	}

	// Estimate subsequence frequencies up to length 3
	let estimate = analyzer.analyze(&sequence)?;
	for table in estimate.tables() {
		println!(
			"Length {}: {} contexts, total mass {:.4}",
			table.length(),
			table.len(),
			table.total_mass()
		);
	}

	// In the even process, a '1' following an odd block of '1's is forced
	let conditionals = analyzer.conditional_probabilities()?;
	for (index, table) in conditionals.iter().enumerate() {
		let mut entries: Vec<_> = table.iter().collect();
		entries.sort_by(|a, b| a.0.to_string().cmp(&b.0.to_string()));
		for (key, probability) in entries {
			println!("[{index}] P({key}) = {probability:.3}");
		}
	}

	// Unknown states are fatal
	match pfsa.generate(&mut rand::rng(), 5, "Z") {
		Ok(_) => println!("Should not happen"),
		Err(e) => println!("Expected error: {e}"),
	}

	Ok(())
}
