use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::frequency_table::FrequencyTable;
use crate::random::RandomSource;
use crate::token::Token;

/// Index of the zero-context entry.
const ROOT: usize = 0;

/// One context suffix: its next-token counts and its one-token-longer
/// extensions.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
struct TrieEntry {
	table: FrequencyTable,
	/// Older context token -> entry index.
	children: BTreeMap<Token, usize>,
}

/// Next-token statistics for every observed context suffix.
///
/// Entries live in an arena. The root holds the zero-context table; each
/// level below it extends the context by one *older* token, so the path
/// root → `c[k-1]` → `c[k-2]` → ... spells a context backwards, most recent
/// token first. A longest-suffix lookup is then a plain walk from the root.
///
/// # Invariants
/// - The root entry always exists
/// - A table at depth k only counts tokens observed after that exact
///   k-token suffix
/// - A child's total never exceeds its parent's total, since every
///   observation is recorded at all depths up to its context length
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PrefixTrie {
	entries: Vec<TrieEntry>,
}

impl Default for PrefixTrie {
	fn default() -> Self {
		Self { entries: vec![TrieEntry::default()] }
	}
}

impl PrefixTrie {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the child of `entry` for `token`, creating it if needed.
	fn child_or_insert(&mut self, entry: usize, token: &Token) -> usize {
		if let Some(&child) = self.entries[entry].children.get(token) {
			return child;
		}
		let child = self.entries.len();
		self.entries.push(TrieEntry::default());
		self.entries[entry].children.insert(token.clone(), child);
		child
	}

	/// Records that `next` followed `context` (most recent token last).
	///
	/// The count is added at every depth from the empty context up to the
	/// full context, so a single observation also feeds all the shorter
	/// generalizations of its context.
	pub fn add_observation(&mut self, context: &[Token], next: &Token) {
		let mut entry = ROOT;
		self.entries[entry].table.add(next.clone());
		for token in context.iter().rev() {
			entry = self.child_or_insert(entry, token);
			self.entries[entry].table.add(next.clone());
		}
	}

	/// Entries matching the longest known suffix of `context`, root first.
	fn matching_path(&self, context: &[Token]) -> Vec<usize> {
		let mut path = vec![ROOT];
		let mut entry = ROOT;
		for token in context.iter().rev() {
			match self.entries[entry].children.get(token) {
				Some(&child) => {
					path.push(child);
					entry = child;
				}
				None => break,
			}
		}
		path
	}

	/// Draws a next token for `context`, backing off to shorter contexts.
	///
	/// The longest known suffix of `context` is tried first, then the
	/// oldest token is dropped one at a time down to the zero-context
	/// table.
	///
	/// Returns `None` only when even the zero-context table is empty,
	/// i.e. nothing was ever observed.
	pub fn sample_next<R: RandomSource + ?Sized>(&self, context: &[Token], rng: &mut R) -> Option<&Token> {
		self.matching_path(context)
			.into_iter()
			.rev()
			.find_map(|entry| self.entries[entry].table.draw(&mut *rng))
	}

	/// Table for exactly `context`, if that context was ever observed.
	pub fn table(&self, context: &[Token]) -> Option<&FrequencyTable> {
		let path = self.matching_path(context);
		if path.len() == context.len() + 1 {
			path.last().map(|&entry| &self.entries[entry].table)
		} else {
			None
		}
	}

	/// The zero-context table.
	pub fn root(&self) -> &FrequencyTable {
		&self.entries[ROOT].table
	}

	/// Returns `true` when nothing was ever observed.
	pub fn is_empty(&self) -> bool {
		self.root().is_empty()
	}

	/// Every stored context with its table, depth first from the root.
	///
	/// Contexts are returned most recent token last.
	pub fn tables(&self) -> Vec<(Vec<&Token>, &FrequencyTable)> {
		let mut out = Vec::with_capacity(self.entries.len());
		let mut stack: Vec<(usize, Vec<&Token>)> = vec![(ROOT, Vec::new())];
		while let Some((entry, suffix)) = stack.pop() {
			for (token, &child) in self.entries[entry].children.iter().rev() {
				let mut longer = Vec::with_capacity(suffix.len() + 1);
				longer.push(token);
				longer.extend(suffix.iter().copied());
				stack.push((child, longer));
			}
			out.push((suffix, &self.entries[entry].table));
		}
		out
	}

	/// Adds every count of `other` into this trie, creating missing contexts.
	pub fn merge(&mut self, other: &Self) {
		let mut stack = vec![(ROOT, ROOT)];
		while let Some((mine, theirs)) = stack.pop() {
			self.entries[mine].table.merge(&other.entries[theirs].table);
			for (token, &their_child) in &other.entries[theirs].children {
				let my_child = self.child_or_insert(mine, token);
				stack.push((my_child, their_child));
			}
		}
	}
}
