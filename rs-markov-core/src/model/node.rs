use std::fmt;

use serde::{Deserialize, Serialize};

use super::prefix_trie::PrefixTrie;
use crate::error::MarkovError;
use crate::random::RandomSource;
use crate::token::Token;

/// A state of the chain: one token and what was observed after it.
///
/// The node keeps a [`PrefixTrie`] answering "what comes after me, given
/// the 0..=D tokens that led here".
///
/// # Invariants
/// - `value` never changes after creation
/// - The trie is only mutated through [`MarkovNode::add_observation`]
///   (and [`MarkovNode::merge`])
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MarkovNode {
	value: Token,
	next: PrefixTrie,
}

impl MarkovNode {
	pub fn new(value: Token) -> Self {
		Self { value, next: PrefixTrie::new() }
	}

	pub fn value(&self) -> &Token {
		&self.value
	}

	pub fn trie(&self) -> &PrefixTrie {
		&self.next
	}

	/// Records that `next` followed this node within `context`.
	pub fn add_observation(&mut self, context: &[Token], next: &Token) {
		self.next.add_observation(context, next);
	}

	/// Draws the next token, from the longest known context down to none.
	///
	/// Returns `None` if this node was never followed by anything.
	pub fn sample_next<R: RandomSource + ?Sized>(&self, context: &[Token], rng: &mut R) -> Option<&Token> {
		self.next.sample_next(context, rng)
	}

	/// Sums the statistics of `other` into this node.
	///
	/// # Errors
	/// Returns an error if the nodes do not hold the same token.
	pub fn merge(&mut self, other: &Self) -> Result<(), MarkovError> {
		if self.value != other.value {
			return Err(MarkovError::NodeMismatch {
				expected: self.value.to_string(),
				found: other.value.to_string(),
			});
		}
		self.next.merge(&other.next);
		Ok(())
	}

	/// Writes a human readable view of the node and its tables.
	///
	/// Not a stable format.
	pub fn dump(&self, out: &mut impl fmt::Write) -> fmt::Result {
		writeln!(out, "\"{}\" : {{", self.value)?;
		for (context, table) in self.next.tables() {
			let context = context.iter().map(|t| t.to_string()).collect::<Vec<_>>().join(" ");
			write!(out, "\t[{context}] ({}) :", table.total())?;
			for (token, count) in table.iter() {
				write!(out, " \"{token}\"={count}")?;
			}
			writeln!(out)?;
		}
		writeln!(out, "}}")
	}
}
