use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::random::RandomSource;
use crate::token::Token;

/// Counts of the tokens observed after one context.
///
/// Conceptually, this is the set of weighted outgoing edges of a Markov
/// state: each next token is weighted by the number of times it followed.
///
/// ## Responsibilities:
/// - Accumulate occurrences during training
/// - Draw a next token with probability proportional to its count
/// - Merge with the counts of another table
///
/// ## Invariants
/// - `total` is always the sum of all counts
/// - Every stored count is strictly positive
/// - `total == 0` means "no observations"
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrequencyTable {
	/// Occurrences indexed by the next token.
	/// Ordered so that draws from a seeded source are reproducible.
	counts: BTreeMap<Token, usize>,
	total: usize,
}

impl FrequencyTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one occurrence of `next`.
	pub fn add(&mut self, next: Token) {
		self.add_count(next, 1);
	}

	/// Records `count` occurrences of `next`. A count of zero is ignored.
	pub fn add_count(&mut self, next: Token, count: usize) {
		if count == 0 {
			return;
		}
		*self.counts.entry(next).or_insert(0) += count;
		self.total += count;
	}

	/// Sum of all counts.
	pub fn total(&self) -> usize {
		self.total
	}

	/// Occurrences of `token`, zero when never observed.
	pub fn count(&self, token: &Token) -> usize {
		self.counts.get(token).copied().unwrap_or(0)
	}

	pub fn is_empty(&self) -> bool {
		self.total == 0
	}

	/// Iterates over `(token, count)` pairs in token order.
	pub fn iter(&self) -> impl Iterator<Item = (&Token, usize)> {
		self.counts.iter().map(|(token, count)| (token, *count))
	}

	/// Draws a next token using weighted random sampling.
	///
	/// A uniform integer `r` is picked in `[0, total)` and the token whose
	/// cumulative count interval contains `r` is returned. The scan is O(n)
	/// over the distinct tokens.
	///
	/// Returns `None` if the table has no observations.
	///
	/// # Panics
	/// Panics if the counts do not add up to `total`.
	pub fn draw<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Option<&Token> {
		if self.total == 0 {
			return None;
		}

		let mut r = rng.below(self.total);
		for (token, count) in &self.counts {
			if r < *count {
				return Some(token);
			}
			r -= count;
		}

		panic!("frequency table total ({}) exceeds the sum of its counts", self.total);
	}

	/// Adds every count of `other` into this table.
	pub fn merge(&mut self, other: &Self) {
		for (token, count) in &other.counts {
			self.add_count(token.clone(), *count);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn w(s: &str) -> Token {
		Token::word(s)
	}

	#[test]
	fn total_tracks_counts() {
		let mut table = FrequencyTable::new();
		assert!(table.is_empty());
		table.add(w("a"));
		table.add(w("b"));
		table.add(w("a"));
		assert_eq!(table.total(), 3);
		assert_eq!(table.count(&w("a")), 2);
		assert_eq!(table.count(&w("b")), 1);
		assert_eq!(table.count(&w("c")), 0);
		assert_eq!(table.iter().count(), 2);
		assert_eq!(table.iter().map(|(_, c)| c).sum::<usize>(), table.total());
	}

	#[test]
	fn zero_count_is_ignored() {
		let mut table = FrequencyTable::new();
		table.add_count(w("a"), 0);
		assert!(table.is_empty());
		assert_eq!(table.iter().count(), 0);
	}

	#[test]
	fn empty_table_draws_nothing() {
		let mut rng = StdRng::seed_from_u64(1);
		assert_eq!(FrequencyTable::new().draw(&mut rng), None);
	}

	#[test]
	fn single_entry_always_drawn() {
		let mut table = FrequencyTable::new();
		table.add_count(w("only"), 5);
		let mut rng = StdRng::seed_from_u64(3);
		for _ in 0..200 {
			assert_eq!(table.draw(&mut rng), Some(&w("only")));
		}
	}

	#[test]
	fn draw_follows_weights() {
		let mut table = FrequencyTable::new();
		table.add_count(w("common"), 9);
		table.add_count(w("rare"), 1);

		let mut rng = StdRng::seed_from_u64(99);
		let n = 10_000;
		let common = (0..n)
			.filter(|_| table.draw(&mut rng) == Some(&w("common")))
			.count();
		let pct = common as f64 / n as f64;
		assert!((0.85..0.95).contains(&pct), "expected ~90% common, got {:.1}%", pct * 100.0);
	}

	#[test]
	fn every_entry_is_reachable() {
		let mut table = FrequencyTable::new();
		for s in ["a", "b", "c", "d"] {
			table.add(w(s));
		}
		let mut rng = StdRng::seed_from_u64(5);
		let mut seen = std::collections::BTreeSet::new();
		for _ in 0..1000 {
			seen.insert(table.draw(&mut rng).cloned());
		}
		assert_eq!(seen.len(), 4);
	}

	#[test]
	#[should_panic(expected = "exceeds the sum of its counts")]
	fn corrupted_total_panics() {
		let mut table = FrequencyTable::new();
		table.add(w("a"));
		table.total = 1_000;
		let mut rng = StdRng::seed_from_u64(0);
		// The last 999 values of r fall outside every interval.
		for _ in 0..1000 {
			table.draw(&mut rng);
		}
	}

	#[test]
	fn merge_sums_counts() {
		let mut a = FrequencyTable::new();
		a.add(w("x"));
		let mut b = FrequencyTable::new();
		b.add(w("x"));
		b.add(w("y"));
		a.merge(&b);
		assert_eq!(a.count(&w("x")), 2);
		assert_eq!(a.count(&w("y")), 1);
		assert_eq!(a.total(), 3);
	}
}
