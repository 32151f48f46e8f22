use thiserror::Error;

/// Errors raised by configuration, merging and file loading.
///
/// Tokenizing and generating never fail: malformed text is tolerated and
/// an exhausted generation yields an empty result instead.
#[derive(Debug, Error)]
pub enum MarkovError {
	#[error("invalid configuration: {0}")]
	InvalidConfig(String),

	#[error("depth mismatch: expected {expected}, found {found}")]
	DepthMismatch { expected: usize, found: usize },

	#[error("node mismatch: expected {expected}, found {found}")]
	NodeMismatch { expected: String, found: String },

	#[error(transparent)]
	Io(#[from] std::io::Error),
}
