//! Markov prose generation library.
//!
//! This crate turns prose into a statistical model of token transitions
//! and samples new sentences from it:
//! - A rule-based tokenizer emitting words, punctuation and structural
//!   markers (sentences, paragraphs, quotations)
//! - A variable-order Markov chain with prefix backoff
//! - An injectable random source for reproducible generation
//! - Small I/O helpers for loading training files
//!
//! ```no_run
//! use rs_markov_core::{ChainConfig, MarkovChain};
//!
//! let mut chain = MarkovChain::new(ChainConfig::default())?;
//! chain.train("The cat sat on the mat. The dog sat on the cat.");
//! println!("{}", chain.generate_sentence());
//! # Ok::<(), rs_markov_core::MarkovError>(())
//! ```

/// Error type shared by the fallible operations.
pub mod error;

/// I/O utilities (file loading, path helpers).
pub mod io;

/// Markov model: tables, tries, nodes and the chain.
pub mod model;

/// Uniform integer source used by weighted draws.
pub mod random;

/// Token and structural marker types.
pub mod token;

/// Text to token stream scanner.
pub mod tokenizer;

pub use error::MarkovError;
pub use model::chain::MarkovChain;
pub use model::config::ChainConfig;
pub use random::RandomSource;
pub use token::{Marker, Token};
pub use tokenizer::{Tokenizer, tokenize};
