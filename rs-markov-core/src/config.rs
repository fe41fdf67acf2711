use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{BotError, BotResult};
use crate::model::number_generator::RandomNumberGenerator;

/// Settings of a generation run.
///
/// # Responsibilities
/// - Locate the training data (`data_path`, `tweet_column`)
/// - Size the output (`num_tweets`, `max_chars`)
/// - Control randomness (`seed`) and where tweets go (`output_path`, `append`)
///
/// Every field is optional in the JSON form; missing ones take the defaults
/// of [`BotConfig::default`].
///
/// # Invariants
/// - `num_tweets` and `max_chars` are never negative once validated
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BotConfig {
	/// CSV file holding the training tweets.
	pub data_path: PathBuf,

	/// Zero-based CSV column containing the tweet text.
	pub tweet_column: usize,

	/// Number of tweets to generate.
	num_tweets: isize,

	/// Character budget of each tweet.
	max_chars: isize,

	/// Seed for reproducible runs; OS entropy when absent.
	pub seed: Option<u64>,

	/// File receiving the tweets; standard output when absent.
	pub output_path: Option<PathBuf>,

	/// Whether to append to `output_path` instead of overwriting it.
	pub append: bool,
}

impl Default for BotConfig {
	fn default() -> Self {
		Self {
			data_path: PathBuf::from("data/sample_tweets.csv"),
			tweet_column: 1,
			num_tweets: 10,
			max_chars: 280,
			seed: None,
			output_path: None,
			append: false,
		}
	}
}

impl BotConfig {
	/// Loads a configuration from a JSON file and validates it.
	///
	/// # Errors
	/// - I/O errors reading the file.
	/// - `Config` if the JSON is malformed.
	/// - Invalid-argument if a value is out of range.
	pub fn from_json_file<P: AsRef<Path>>(path: P) -> BotResult<Self> {
		let contents = fs::read_to_string(path)?;
		let config: Self = serde_json::from_str(&contents)?;
		config.validate()?;
		Ok(config)
	}

	/// Checks that every value is in range.
	pub fn validate(&self) -> BotResult<()> {
		if self.num_tweets < 0 {
			return Err(BotError::invalid(format!("num_tweets must not be negative, got {}", self.num_tweets)));
		}
		if self.max_chars < 0 {
			return Err(BotError::invalid(format!("max_chars must not be negative, got {}", self.max_chars)));
		}
		Ok(())
	}

	pub fn num_tweets(&self) -> isize {
		self.num_tweets
	}

	pub fn max_chars(&self) -> isize {
		self.max_chars
	}

	/// Sets the number of tweets to generate.
	///
	/// # Errors
	/// Returns an error if the value is negative.
	pub fn set_num_tweets(&mut self, num_tweets: isize) -> BotResult<()> {
		if num_tweets < 0 {
			return Err(BotError::invalid("num_tweets must not be negative"));
		}
		self.num_tweets = num_tweets;
		Ok(())
	}

	/// Sets the character budget of each tweet.
	///
	/// # Errors
	/// Returns an error if the value is negative.
	pub fn set_max_chars(&mut self, max_chars: isize) -> BotResult<()> {
		if max_chars < 0 {
			return Err(BotError::invalid("max_chars must not be negative"));
		}
		self.max_chars = max_chars;
		Ok(())
	}

	/// Builds the walk and punctuation generators for this run.
	///
	/// With a seed, both are derived from it so a run can be replayed.
	pub fn generators(&self) -> (RandomNumberGenerator, RandomNumberGenerator) {
		match self.seed {
			Some(seed) => (
				RandomNumberGenerator::seeded(seed),
				RandomNumberGenerator::seeded(seed.wrapping_add(1)),
			),
			None => (RandomNumberGenerator::new(), RandomNumberGenerator::new()),
		}
	}
}
