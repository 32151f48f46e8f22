//! Variable-order Markov model over word tokens.
//!
//! This module provides:
//! - Frequency tables with weighted random draws (`FrequencyTable`)
//! - Context-suffix tries with backoff (`PrefixTrie`)
//! - Per-token states (`MarkovNode`)
//! - The chain driving training and generation (`MarkovChain`)
//! - Its configuration (`ChainConfig`)

/// Token chain: node arena, training from token streams and sentence
/// generation with bounded retries.
pub mod chain;

/// Chain parameters: context depth, retry and length limits, seed.
pub mod config;

/// Sliding window over the most recent tokens.
pub mod context;

/// Next-token counts for a single context.
///
/// Tracks occurrences and supports weighted random sampling.
pub mod frequency_table;

/// A state of the chain and its per-context statistics.
pub mod node;

/// Arena of frequency tables keyed by reversed context suffixes.
pub mod prefix_trie;
