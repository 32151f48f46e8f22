use serde::{Deserialize, Serialize};

use crate::error::MarkovError;

/// Largest supported context depth.
pub const MAX_DEPTH: usize = 16;

/// Parameters of a [`MarkovChain`](super::chain::MarkovChain).
///
/// # Responsibilities
/// - Track the model order (`depth`) used when training and sampling
/// - Track the generation limits (`max_attempts`, `min_tokens`, `max_tokens`)
/// - Carry an optional seed for reproducible generation
///
/// # Invariants
/// - `depth <= MAX_DEPTH`
/// - `max_attempts >= 1`
/// - `min_tokens <= max_tokens` and `max_tokens >= 1`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChainConfig {
	/// Maximum number of context tokens kept while training and generating.
	depth: usize,

	/// Number of generation attempts before giving up on a sentence.
	max_attempts: usize,

	/// Sentences with fewer tokens are discarded and retried.
	min_tokens: usize,

	/// An attempt producing more tokens is abandoned.
	max_tokens: usize,

	/// Seed of the chain's random source. `None` seeds from the OS.
	pub seed: Option<u64>,
}

impl Default for ChainConfig {
	fn default() -> Self {
		Self {
			depth: 3,
			max_attempts: 10,
			min_tokens: 3,
			max_tokens: 200,
			seed: None,
		}
	}
}

impl ChainConfig {
	pub fn depth(&self) -> usize {
		self.depth
	}

	pub fn max_attempts(&self) -> usize {
		self.max_attempts
	}

	pub fn min_tokens(&self) -> usize {
		self.min_tokens
	}

	pub fn max_tokens(&self) -> usize {
		self.max_tokens
	}

	/// Sets the context depth (0..=MAX_DEPTH).
	///
	/// A depth of 0 gives a plain first-order chain.
	///
	/// # Errors
	/// Returns an error if the value is out of range.
	pub fn set_depth(&mut self, depth: usize) -> Result<(), MarkovError> {
		if depth > MAX_DEPTH {
			return Err(MarkovError::InvalidConfig(format!(
				"depth must be between 0 and {MAX_DEPTH}, got {depth}"
			)));
		}
		self.depth = depth;
		Ok(())
	}

	/// Sets the number of generation attempts.
	///
	/// # Errors
	/// Returns an error if `max_attempts` is 0.
	pub fn set_max_attempts(&mut self, max_attempts: usize) -> Result<(), MarkovError> {
		if max_attempts == 0 {
			return Err(MarkovError::InvalidConfig("max_attempts must be >= 1".to_owned()));
		}
		self.max_attempts = max_attempts;
		Ok(())
	}

	/// Sets the accepted sentence length range, in tokens.
	///
	/// # Errors
	/// Returns an error if `max_tokens` is 0 or smaller than `min_tokens`.
	pub fn set_token_range(&mut self, min_tokens: usize, max_tokens: usize) -> Result<(), MarkovError> {
		if max_tokens == 0 || min_tokens > max_tokens {
			return Err(MarkovError::InvalidConfig(format!(
				"invalid token range {min_tokens}..={max_tokens}"
			)));
		}
		self.min_tokens = min_tokens;
		self.max_tokens = max_tokens;
		Ok(())
	}

	/// Checks every invariant, e.g. after deserializing.
	pub fn validate(&self) -> Result<(), MarkovError> {
		let mut checked = Self::default();
		checked.set_depth(self.depth)?;
		checked.set_max_attempts(self.max_attempts)?;
		checked.set_token_range(self.min_tokens, self.max_tokens)?;
		Ok(())
	}
}
