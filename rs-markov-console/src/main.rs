use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use log::info;
use rs_markov_core::io::{collect_inputs, dump_path, read_text};
use rs_markov_core::{ChainConfig, MarkovChain, MarkovError};

#[derive(Debug, Parser)]
#[command(name = "rs-markov-console")]
#[command(about = "Train a Markov chain on text files and print generated sentences")]
#[command(version)]
struct Args {
	/// Context depth (defaults to the chain default)
	#[arg(long)]
	depth: Option<usize>,

	/// Seed for reproducible output
	#[arg(long)]
	seed: Option<u64>,

	/// Write the debug dump next to the first input
	#[arg(long)]
	dump: bool,

	/// Training files, or directories of .txt files
	#[arg(required = true)]
	inputs: Vec<PathBuf>,
}

impl Args {
	fn config(&self) -> Result<ChainConfig, MarkovError> {
		let mut config = ChainConfig::default();
		if let Some(depth) = self.depth {
			config.set_depth(depth)?;
		}
		config.seed = self.seed;
		Ok(config)
	}
}

/// Trains a chain on every input, then prints one sentence per line read
/// from stdin until `q` is entered.
fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::init();

	let args = Args::parse();

	let files = collect_inputs(&args.inputs, "txt")?;
	let mut chain = MarkovChain::new(args.config()?)?;
	for file in &files {
		info!("training on {}", file.display());
		chain.train(&read_text(file)?);
	}
	info!("chain ready with {} nodes", chain.node_count());

	if args.dump {
		let path = dump_path(&args.inputs)?;
		std::fs::write(&path, chain.dump())?;
		info!("dump written to {}", path.display());
	}

	let stdin = io::stdin();
	let mut stdout = io::stdout();
	for line in stdin.lock().lines() {
		let line = line?;
		if line.trim().eq_ignore_ascii_case("q") {
			break;
		}

		let sentence = chain.generate_sentence();
		if sentence.is_empty() {
			writeln!(stdout, "(no sentence could be generated)")?;
		} else {
			writeln!(stdout, "{sentence}")?;
		}
		writeln!(stdout)?;
		stdout.flush()?;
	}

	Ok(())
}
