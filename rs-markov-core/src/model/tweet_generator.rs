use crate::error::{BotError, BotResult};
use crate::model::markov_chain::MarkovChain;
use crate::model::number_generator::{ListNumberGenerator, NumberGenerator};
use crate::model::punctuation::Punctuation;

/// High-level generator stitching chain walks into tweets.
///
/// # Responsibilities
/// - Generate text bounded by a number of words or by a character budget
/// - Insert a punctuation mark at every sentence boundary and at the end
/// - Pin both the walk and the punctuation choices to reproduce a given tweet
///
/// The walk samples with the chain's own generator; punctuation is chosen with
/// a second generator owned here. Pinning replaces both, since walk draws and
/// punctuation draws interleave in an order only the generation loop knows.
#[derive(Debug)]
pub struct TweetGenerator {
	chain: MarkovChain,
	/// Source of punctuation choices.
	rng: Box<dyn NumberGenerator>,
}

impl TweetGenerator {
	pub fn new(chain: MarkovChain, rng: impl NumberGenerator + 'static) -> Self {
		Self { chain, rng: Box::new(rng) }
	}

	/// Trains a new chain on every sentence and wraps it in a generator.
	///
	/// # Parameters
	/// - `sentences`: cleaned training sentences, one token sequence each.
	/// - `chain_rng`: generator driving the walk.
	/// - `punctuation_rng`: generator driving punctuation choices.
	///
	/// # Errors
	/// Returns an error if a sentence contains the end sentinel.
	pub fn from_sentences<I, S, T>(
		sentences: I,
		chain_rng: impl NumberGenerator + 'static,
		punctuation_rng: impl NumberGenerator + 'static,
	) -> BotResult<Self>
	where
		I: IntoIterator<Item = S>,
		S: IntoIterator<Item = T>,
		T: Into<String>,
	{
		let mut chain = MarkovChain::new(chain_rng);
		let mut trained = 0;
		for sentence in sentences {
			chain.train(sentence)?;
			trained += 1;
		}
		log::info!(
			"trained chain on {} sentences: {} start words, {} tokens with successors",
			trained,
			chain.start_words().len(),
			chain.len()
		);
		Ok(Self::new(chain, punctuation_rng))
	}

	pub fn chain(&self) -> &MarkovChain {
		&self.chain
	}

	pub fn chain_mut(&mut self) -> &mut MarkovChain {
		&mut self.chain
	}

	/// Generates a tweet of exactly `count` words.
	///
	/// # Behavior
	/// - Resets the walk, then emits tokens separated by single spaces.
	/// - When a sentence ends before `count` words, a punctuation mark is
	///   appended and a new sentence starts.
	/// - The tweet always ends with a punctuation mark.
	///
	/// # Returns
	/// An empty string when `count` is 0 or the chain has no start words.
	///
	/// # Errors
	/// - Invalid-argument if `count` is negative.
	/// - Generator errors (e.g. an exhausted pinned script).
	pub fn generate_word_sequence(&mut self, count: isize) -> BotResult<String> {
		let count = usize::try_from(count)
			.map_err(|_| BotError::invalid(format!("word count must not be negative, got {count}")))?;

		self.chain.reset()?;
		if count == 0 || !self.chain.has_next() {
			return Ok(String::new());
		}

		let mut tweet = String::new();
		let mut words = 0;
		while words < count {
			words += 1;
			tweet.push_str(&self.chain.next_token()?);
			if !self.chain.has_next() && words < count {
				tweet.push(self.random_punctuation()?.as_char());
				log::debug!("sentence ended after {words} of {count} words, starting another");
				self.chain.reset()?;
			}
			if words < count {
				tweet.push(' ');
			}
		}
		tweet.push(self.random_punctuation()?.as_char());
		Ok(tweet)
	}

	/// Generates the longest tweet (in words) whose length fits `max_chars`.
	///
	/// Performs a linear search: generates 1, 2, 3, ... words from scratch
	/// and returns the last result that still fits. Every attempt is a full
	/// regeneration, so the cost is quadratic in the output length.
	/// Length is counted in `char`s.
	///
	/// # Returns
	/// An empty string if even a one-word tweet does not fit, or nothing can
	/// be generated.
	///
	/// # Errors
	/// - Invalid-argument if `max_chars` is negative.
	pub fn generate_bounded_by_chars(&mut self, max_chars: isize) -> BotResult<String> {
		let max_chars = usize::try_from(max_chars)
			.map_err(|_| BotError::invalid(format!("tweet length must not be negative, got {max_chars}")))?;

		let mut tweet = String::new();
		let mut words: isize = 1;
		loop {
			let candidate = self.generate_word_sequence(words)?;
			if candidate.is_empty() || candidate.chars().count() > max_chars {
				return Ok(tweet);
			}
			tweet = candidate;
			words += 1;
		}
	}

	/// Generates `num_tweets` tweets bounded by `max_chars` each.
	pub fn generate_tweets(&mut self, num_tweets: isize, max_chars: isize) -> BotResult<Vec<String>> {
		let num_tweets = usize::try_from(num_tweets)
			.map_err(|_| BotError::invalid(format!("tweet count must not be negative, got {num_tweets}")))?;

		let tweets = (0..num_tweets)
			.map(|_| self.generate_bounded_by_chars(max_chars))
			.collect::<BotResult<Vec<_>>>()?;
		log::info!("generated {} tweets of at most {} chars", tweets.len(), max_chars);
		Ok(tweets)
	}

	/// Chooses a punctuation mark: `.` 70% of the time, `;` `?` `!` 10% each.
	pub fn random_punctuation(&mut self) -> BotResult<Punctuation> {
		Ok(Punctuation::from_draw(self.rng.next(Punctuation::DRAW_BOUND)?))
	}

	/// Pins generation so the next tweet reproduces `tweet`.
	///
	/// `tweet` is an ordered list of words and single punctuation tokens. Words
	/// pin the chain walk (punctuation standing for sentence boundaries), and
	/// the punctuation tokens, in order, pin the punctuation choices.
	///
	/// # Errors
	/// Invalid-argument if `tweet` is empty, does not end with one of
	/// `. ? ! ;`, or cannot be walked on the trained chain.
	pub fn fix_distribution(&mut self, tweet: &[&str]) -> BotResult<()> {
		let last = tweet
			.last()
			.ok_or_else(|| BotError::invalid("a pinned tweet must not be empty"))?;
		if Punctuation::from_token(last).is_none() {
			return Err(BotError::invalid("a pinned tweet must end with punctuation"));
		}

		let words: Vec<Option<&str>> = tweet
			.iter()
			.map(|token| match Punctuation::from_token(token) {
				Some(_) => None,
				None => Some(*token),
			})
			.collect();
		self.chain.fix_distribution(&words, true)?;

		let draws: Vec<usize> = tweet
			.iter()
			.filter_map(|token| Punctuation::from_token(token))
			.map(Punctuation::draw)
			.collect();
		self.rng = Box::new(ListNumberGenerator::new(draws));
		Ok(())
	}

	/// True if `text` ends with one of `. ? ! ;`.
	pub fn is_punctuated(text: &str) -> bool {
		text.chars().last().is_some_and(Punctuation::is_mark)
	}
}
