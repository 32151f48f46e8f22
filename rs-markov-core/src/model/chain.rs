use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;

use log::{debug, trace, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::config::ChainConfig;
use super::context::ContextBuffer;
use super::node::MarkovNode;
use crate::error::MarkovError;
use crate::random::RandomSource;
use crate::token::{self, Marker, Token};
use crate::tokenizer::tokenize;

/// Index of a node in the chain's arena.
pub type NodeId = usize;

/// Variable-order Markov chain over word tokens.
///
/// The chain owns every [`MarkovNode`] in an arena, indexed by token value.
/// Training walks a token stream and records each transition in the node
/// of the preceding token, keyed by up to `depth` tokens of context.
/// Generation walks the nodes from `SentenceStart`, sampling each step from
/// the longest context the node knows about.
///
/// # Invariants
/// - A node exists for every structural marker from construction on
/// - A node exists for every token ever seen as a transition target
/// - Nodes are never removed
pub struct MarkovChain<R = StdRng> {
	config: ChainConfig,
	nodes: Vec<MarkovNode>,
	index: HashMap<Token, NodeId>,
	rng: R,
}

impl MarkovChain<StdRng> {
	/// Creates an empty chain.
	///
	/// The random source is seeded from `config.seed` when set, from the OS
	/// otherwise.
	///
	/// # Errors
	/// Returns an error if the configuration is invalid.
	pub fn new(config: ChainConfig) -> Result<Self, MarkovError> {
		let rng = match config.seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_os_rng(),
		};
		Self::with_rng(config, rng)
	}
}

impl<R: RandomSource> MarkovChain<R> {
	/// Creates an empty chain drawing from `rng`.
	///
	/// `config.seed` is ignored.
	///
	/// # Errors
	/// Returns an error if the configuration is invalid.
	pub fn with_rng(config: ChainConfig, rng: R) -> Result<Self, MarkovError> {
		config.validate()?;
		let mut chain = Self {
			config,
			nodes: Vec::new(),
			index: HashMap::new(),
			rng,
		};
		for marker in Marker::ALL {
			chain.node_id(marker.into());
		}
		Ok(chain)
	}

	pub fn config(&self) -> &ChainConfig {
		&self.config
	}

	pub fn depth(&self) -> usize {
		self.config.depth()
	}

	/// Returns the node of `token`, creating it if needed.
	fn node_id(&mut self, token: Token) -> NodeId {
		match self.index.entry(token) {
			Entry::Occupied(entry) => *entry.get(),
			Entry::Vacant(entry) => {
				let id = self.nodes.len();
				self.nodes.push(MarkovNode::new(entry.key().clone()));
				entry.insert(id);
				id
			}
		}
	}

	pub fn node(&self, token: &Token) -> Option<&MarkovNode> {
		self.index.get(token).map(|&id| &self.nodes[id])
	}

	/// All nodes, in creation order.
	pub fn nodes(&self) -> impl Iterator<Item = &MarkovNode> {
		self.nodes.iter()
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Tokenizes `text` and trains on the resulting stream.
	pub fn train(&mut self, text: &str) {
		self.train_tokens(tokenize(text));
	}

	/// Trains on a token stream.
	///
	/// Each transition `prev -> t` is recorded in the node of `prev`, under
	/// the last `depth` tokens seen (the window ends with `prev` itself).
	/// Repeated calls accumulate statistics.
	pub fn train_tokens<I: IntoIterator<Item = Token>>(&mut self, tokens: I) {
		let mut tokens = tokens.into_iter();
		let Some(first) = tokens.next() else {
			return;
		};

		let mut context = ContextBuffer::new(self.config.depth());
		let mut current = self.node_id(first.clone());
		context.push(first);

		let mut transitions = 0usize;
		for token in tokens {
			self.nodes[current].add_observation(context.as_slice(), &token);
			current = self.node_id(token.clone());
			context.push(token);
			transitions += 1;
		}

		debug!("trained {transitions} transitions, chain has {} nodes", self.nodes.len());
	}

	/// Walks the chain once from `SentenceStart`, reusing `context` as the
	/// window.
	///
	/// Returns `None` if the walk takes more than `max_tokens` steps. Silent
	/// markers count as steps, so a cycle that emits nothing still ends.
	fn walk_sentence(&mut self, context: &mut ContextBuffer) -> Option<Vec<Token>> {
		context.clear();
		let mut sentence = Vec::new();
		let mut current = self.index.get(&Token::Marker(Marker::SentenceStart)).copied();
		let mut steps = 0usize;

		while let Some(id) = current {
			steps += 1;
			if steps > self.config.max_tokens() {
				return None;
			}
			let Some(next) = self.nodes[id].sample_next(context.as_slice(), &mut self.rng) else {
				// Never followed by anything: the sentence ends here.
				break;
			};
			let next = next.clone();

			match next.as_marker() {
				Some(marker) if marker.ends_sentence() => break,
				Some(Marker::QuoteStart | Marker::QuoteEnd) => sentence.push(Token::Punctuation('"')),
				Some(_) => (),
				None => sentence.push(next.clone()),
			}

			current = self.index.get(&next).copied();
			context.push(next);
		}
		Some(sentence)
	}

	/// Generates one sentence as a token sequence.
	///
	/// Sentences shorter than `min_tokens` (or walks over `max_tokens` steps) are
	/// discarded and generation restarts, up to `max_attempts` times.
	///
	/// # Returns
	/// - The sentence tokens, without any structural marker. Quote markers
	///   are rendered as `"` punctuation.
	/// - An empty vector if every attempt failed, which is always the case
	///   for an untrained chain.
	pub fn generate_sequence(&mut self) -> Vec<Token> {
		let mut context = ContextBuffer::new(self.config.depth());
		for attempt in 1..=self.config.max_attempts() {
			match self.walk_sentence(&mut context) {
				Some(sentence) if sentence.len() >= self.config.min_tokens() => {
					trace!("attempt {attempt}: accepted {} tokens", sentence.len());
					return sentence;
				}
				Some(sentence) => trace!("attempt {attempt}: too short ({} tokens)", sentence.len()),
				None => trace!("attempt {attempt}: walk exceeded {} steps", self.config.max_tokens()),
			}
		}

		warn!("no sentence generated after {} attempts", self.config.max_attempts());
		Vec::new()
	}

	/// Generates one sentence joined with single spaces.
	///
	/// Returns an empty string if generation failed.
	pub fn generate_sentence(&mut self) -> String {
		token::join(&self.generate_sequence())
	}

	/// Merges the statistics of another chain into this one.
	///
	/// # Notes
	/// - Counts of matching nodes and contexts are summed.
	/// - Missing nodes and contexts are created.
	/// - The random source and limits of `self` are kept.
	///
	/// # Errors
	/// Returns an error if the chain depths differ.
	pub fn merge<S>(&mut self, other: &MarkovChain<S>) -> Result<(), MarkovError> {
		if self.depth() != other.config.depth() {
			return Err(MarkovError::DepthMismatch {
				expected: self.depth(),
				found: other.config.depth(),
			});
		}

		for node in &other.nodes {
			let id = self.node_id(node.value().clone());
			self.nodes[id].merge(node)?;
		}

		debug!("merged {} nodes, chain has {} nodes", other.nodes.len(), self.nodes.len());
		Ok(())
	}

	/// Human readable listing of every node and its per-context tables.
	///
	/// Meant for debugging only, the format is not stable.
	pub fn dump(&self) -> String {
		self.to_string()
	}
}

impl<R> fmt::Display for MarkovChain<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for node in &self.nodes {
			node.dump(f)?;
		}
		Ok(())
	}
}
