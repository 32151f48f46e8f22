use rand::Rng;

/// Source of uniform integers used for weighted draws.
///
/// Implemented for every [`rand::Rng`], so a thread-local generator, a
/// `StdRng` seeded from the OS or a `StdRng` seeded from a fixed value can
/// all drive the model. Draws need not be cryptographically secure.
pub trait RandomSource {
	/// Returns a uniform integer in `[0, n)`.
	///
	/// # Panics
	/// Panics if `n == 0`.
	fn below(&mut self, n: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
	fn below(&mut self, n: usize) -> usize {
		assert!(n > 0, "below: n must be greater than 0");
		self.random_range(0..n)
	}
}
