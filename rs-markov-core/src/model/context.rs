use std::collections::VecDeque;

use crate::token::Token;

/// Fixed-capacity window over the most recent tokens, oldest first.
///
/// When full, pushing evicts the oldest token. Until then the window is
/// simply shorter: empty slots are never padded.
#[derive(Clone, Debug)]
pub struct ContextBuffer {
	tokens: VecDeque<Token>,
	capacity: usize,
}

impl ContextBuffer {
	pub fn new(capacity: usize) -> Self {
		Self {
			tokens: VecDeque::with_capacity(capacity),
			capacity,
		}
	}

	pub fn push(&mut self, token: Token) {
		if self.capacity == 0 {
			return;
		}
		if self.tokens.len() == self.capacity {
			self.tokens.pop_front();
		}
		self.tokens.push_back(token);
	}

	/// The window as a slice, most recent token last.
	pub fn as_slice(&mut self) -> &[Token] {
		self.tokens.make_contiguous()
	}

	pub fn clear(&mut self) {
		self.tokens.clear();
	}
}
