//! Markov-chain tweet generation library.
//!
//! This crate provides a first-order Markov text generator including:
//! - Bigram training over cleaned sentences
//! - Weighted sampling with exact, replayable draws
//! - A resumable sentence walk and tweet assembly under word or character budgets
//! - Utilities to turn CSV tweet data into training sentences
//!
//! Every random choice goes through an injected `NumberGenerator`, so any
//! output can be pinned and reproduced in tests.

/// Core chain, distribution and generation logic.
pub mod model;

/// Run configuration (JSON file + defaults).
pub mod config;

/// Error type shared by the whole crate.
pub mod error;

/// Cleaning of raw tweets into training sentences.
pub mod parser;

/// I/O utilities (line reading and writing).
pub mod io;
