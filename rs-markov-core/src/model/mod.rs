//! Top-level module for the Markov tweet generation system.
//!
//! This module provides a first-order Markov text generator, including:
//! - Bounded random number sources, true-random and scripted (`NumberGenerator`)
//! - Weighted occurrence counts with exact replay indices (`WeightedDistribution`)
//! - The bigram chain and its resumable walk (`MarkovChain`)
//! - Tweet assembly with punctuation and length budgets (`TweetGenerator`)

/// Bounded integer sources driving every random choice.
///
/// `RandomNumberGenerator` samples with `rand`; `ListNumberGenerator`
/// replays a fixed script, which is how outputs get pinned.
pub mod number_generator;

/// Weighted distribution of observed items.
///
/// Supports weighted sampling and the cumulative index used for replay.
pub mod distribution;

/// First-order Markov chain over tokens.
///
/// Handles sentence training, the stateful walk,
/// and pinning the walk to an exact output.
pub mod markov_chain;

/// Punctuation marks inserted between generated sentences.
pub mod punctuation;

/// High-level interface generating tweets from a trained chain.
///
/// Exposes word-bounded and character-bounded generation
/// and pinning of a whole tweet.
pub mod tweet_generator;
