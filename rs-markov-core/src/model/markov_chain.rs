use std::collections::BTreeMap;
use std::fmt;

use crate::error::{BotError, BotResult};
use super::distribution::WeightedDistribution;
use super::number_generator::{ListNumberGenerator, NumberGenerator, RandomNumberGenerator};

/// Sentinel successor marking the end of a sentence.
///
/// Training data is cleaned of punctuation first, so this can never be a
/// real word. It is never recorded as the predecessor of a bigram.
pub const END_TOKEN: &str = "<END>";

/// Position of the walk over the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkState {
	/// No `reset` happened yet.
	Fresh,
	/// The next call to `next_token` returns this token.
	InSentence(String),
	/// The walk reached `<END>` (or had nothing to start from).
	Terminal,
}

/// First-order Markov chain over whitespace-delimited tokens.
///
/// The chain keeps a distribution of sentence openers and, for every token,
/// the distribution of the tokens that followed it during training. After
/// training it behaves as a resumable iterator: `reset` starts a sentence,
/// `next_token` returns the current token and samples its successor.
///
/// # Example
/// Training on `["a", "table"]`, `["a", "banana"]` and `["a", "banana"]` gives
/// - start words: `a`:3
/// - `a` → `table`:1, `banana`:2
/// - `table` → `<END>`:1
/// - `banana` → `<END>`:2
///
/// # Invariants
/// - There is never an outgoing distribution for `<END>`
/// - Every successor and every start word is a trained token (or `<END>`)
///
/// # Hazard
/// A chain whose cycle cannot reach `<END>` (only possible through
/// `add_bigram` or pinning) walks forever. Callers bound such walks themselves.
#[derive(Debug)]
pub struct MarkovChain {
	/// Source of every sampling decision of the walk.
	rng: Box<dyn NumberGenerator>,
	/// Distribution of the first token of each sentence.
	start_words: WeightedDistribution<String>,
	/// For each token, the distribution of the token that follows it.
	chain: BTreeMap<String, WeightedDistribution<String>>,
	state: WalkState,
}

impl Default for MarkovChain {
	fn default() -> Self {
		Self::new(RandomNumberGenerator::new())
	}
}

impl MarkovChain {
	/// Creates an empty chain sampling with `rng`.
	pub fn new(rng: impl NumberGenerator + 'static) -> Self {
		Self {
			rng: Box::new(rng),
			start_words: WeightedDistribution::new(),
			chain: BTreeMap::new(),
			state: WalkState::Fresh,
		}
	}

	/// Replaces the generator used by the walk.
	pub fn set_generator(&mut self, rng: impl NumberGenerator + 'static) {
		self.rng = Box::new(rng);
	}

	/// Records one occurrence of the bigram `first → second`.
	///
	/// # Errors
	/// Returns an error if `first` is the end sentinel.
	pub fn add_bigram(&mut self, first: &str, second: &str) -> BotResult<()> {
		if first == END_TOKEN {
			return Err(BotError::invalid("the end sentinel cannot precede a token"));
		}
		self.chain
			.entry(first.to_owned())
			.or_default()
			.record(second.to_owned());
		Ok(())
	}

	/// Adds one sentence of training data.
	///
	/// The first token is recorded as a start word, each adjacent pair as a
	/// bigram, and the last token is followed by `<END>`. Training accumulates
	/// across calls; an empty sentence is a no-op.
	///
	/// # Errors
	/// Returns an error (and records nothing) if a token is the end sentinel.
	pub fn train<I, S>(&mut self, sentence: I) -> BotResult<()>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let tokens: Vec<String> = sentence.into_iter().map(Into::into).collect();
		if tokens.iter().any(|token| token == END_TOKEN) {
			return Err(BotError::invalid(format!("{END_TOKEN} is reserved and cannot be trained")));
		}

		let Some((first, rest)) = tokens.split_first() else {
			return Ok(());
		};

		self.start_words.record(first.clone());
		let mut previous = first;
		for token in rest {
			self.add_bigram(previous, token)?;
			previous = token;
		}
		self.add_bigram(previous, END_TOKEN)
	}

	/// Successor distribution of `token`, if it was ever followed by anything.
	pub fn get(&self, token: &str) -> Option<&WeightedDistribution<String>> {
		self.chain.get(token)
	}

	pub fn start_words(&self) -> &WeightedDistribution<String> {
		&self.start_words
	}

	/// Number of tokens with an outgoing distribution.
	pub fn len(&self) -> usize {
		self.chain.len()
	}

	pub fn is_empty(&self) -> bool {
		self.chain.is_empty()
	}

	pub fn state(&self) -> &WalkState {
		&self.state
	}

	/// Starts a new sentence from a start word picked with the generator.
	///
	/// An untrained chain has nothing to start from and becomes terminal.
	pub fn reset(&mut self) -> BotResult<()> {
		if self.start_words.is_empty() {
			self.state = WalkState::Terminal;
			return Ok(());
		}
		let start = self.start_words.pick(self.rng.as_mut())?.clone();
		log::trace!("walk reset to {start:?}");
		self.state = WalkState::InSentence(start);
		Ok(())
	}

	/// Starts a walk at `start` without consulting the generator.
	///
	/// The next call to `next_token` returns `start`. `start` does not need
	/// to be a trained token; an unknown token simply ends the walk after it.
	///
	/// # Errors
	/// Returns an error if `start` is empty.
	pub fn reset_to(&mut self, start: &str) -> BotResult<()> {
		if start.is_empty() {
			return Err(BotError::invalid("start token cannot be empty"));
		}
		self.state = if start == END_TOKEN {
			WalkState::Terminal
		} else {
			WalkState::InSentence(start.to_owned())
		};
		Ok(())
	}

	/// True if `next_token` will return a meaningful token.
	pub fn has_next(&self) -> bool {
		matches!(self.state, WalkState::InSentence(_))
	}

	/// Returns the current token and advances the walk to a sampled successor
	/// (or to `<END>` when the token has no successors).
	///
	/// # Errors
	/// - [`BotError::EndOfSequence`] if the walk is not inside a sentence.
	/// - Sampling errors; the walk is left untouched in that case.
	pub fn next_token(&mut self) -> BotResult<String> {
		let current = match &self.state {
			WalkState::InSentence(token) => token.clone(),
			_ => return Err(BotError::EndOfSequence),
		};

		let following = match self.chain.get(&current) {
			Some(successors) => successors.pick(self.rng.as_mut())?.clone(),
			None => END_TOKEN.to_owned(),
		};

		self.state = if following == END_TOKEN {
			WalkState::Terminal
		} else {
			WalkState::InSentence(following)
		};
		Ok(current)
	}

	/// Iterates over the rest of the current sentence.
	pub fn walk(&mut self) -> Walk<'_> {
		Walk { chain: self }
	}

	/// Pins the walk so it outputs `words` in order.
	///
	/// The first word must be a start word; it is drawn from the start words
	/// only when `pick_first` is set (i.e. the caller will use `reset` rather
	/// than `reset_to`). Every following word must have been recorded after
	/// the previous one. `None` marks a sentence boundary: the previous word
	/// must have ended a sentence, and the next word is drawn from the start
	/// words again. A trailing boundary is accepted after any word, since
	/// nothing is generated after it. When the sequence ends with a word that
	/// can end a sentence, the walk ends right after it.
	///
	/// The generator is replaced by a scripted one; reproducing the sequence
	/// consumes it exactly, and walking further fails.
	///
	/// # Errors
	/// Invalid-argument errors when the sequence is empty, starts with a
	/// boundary or a non-start word, contains a transition that was never
	/// trained, or has two consecutive boundaries.
	pub fn fix_distribution(&mut self, words: &[Option<&str>], pick_first: bool) -> BotResult<()> {
		let (first, rest) = words
			.split_first()
			.ok_or_else(|| BotError::invalid("cannot pin an empty word sequence"))?;
		let first = first.ok_or_else(|| BotError::invalid("a pinned sequence must start with a word"))?;
		if self.start_words.count(first) < 1 {
			return Err(BotError::invalid(format!("first word {first:?} is not a start word")));
		}

		let mut script = Vec::with_capacity(words.len() + 1);
		if pick_first {
			script.push(self.start_words.index(first)?);
		}

		let mut previous = Some(first);
		for (position, &word) in rest.iter().enumerate() {
			let is_last = position + 1 == rest.len();
			let index = match (previous, word) {
				(None, Some(word)) => self.start_words.index(word)?,
				(Some(previous), Some(word)) => self
					.chain
					.get(previous)
					.ok_or_else(|| BotError::NotRecorded { token: word.to_owned() })?
					.index(word)?,
				(Some(previous), None) => {
					match self.get(previous).and_then(|successors| successors.index(END_TOKEN).ok()) {
						Some(index) => index,
						// A trailing boundary only closes the output; the draw is still consumed.
						None if is_last => 0,
						None => {
							return Err(BotError::invalid(format!("word {previous:?} never ends a sentence")));
						}
					}
				}
				(None, None) => return Err(BotError::invalid("consecutive sentence boundaries")),
			};
			script.push(index);
			previous = word;
		}

		if let Some(last) = previous {
			if let Some(index) = self.get(last).and_then(|successors| successors.index(END_TOKEN).ok()) {
				script.push(index);
			}
		}

		log::debug!("pinned walk of {} tokens to {} scripted values", words.len(), script.len());
		self.rng = Box::new(ListNumberGenerator::new(script));
		Ok(())
	}

	/// Pins the walk to a single sentence of words.
	///
	/// The first word is drawn from the start words only for a one-word
	/// sentence; longer sentences expect a `reset_to` on their first word.
	pub fn fix_words(&mut self, words: &[&str]) -> BotResult<()> {
		let sequence: Vec<Option<&str>> = words.iter().map(|word| Some(*word)).collect();
		self.fix_distribution(&sequence, words.len() == 1)
	}
}

impl fmt::Display for MarkovChain {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (token, successors) in &self.chain {
			writeln!(f, "{token}: {successors}")?;
		}
		Ok(())
	}
}

/// Borrowing iterator over the remaining tokens of the current sentence.
pub struct Walk<'a> {
	chain: &'a mut MarkovChain,
}

impl Iterator for Walk<'_> {
	type Item = BotResult<String>;

	fn next(&mut self) -> Option<Self::Item> {
		if !self.chain.has_next() {
			return None;
		}
		Some(self.chain.next_token())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn trained(sentences: &[&str]) -> MarkovChain {
		let mut chain = MarkovChain::new(RandomNumberGenerator::seeded(42));
		for sentence in sentences {
			chain.train(sentence.split_whitespace()).unwrap();
		}
		chain
	}

	#[test]
	fn test_add_bigram() {
		let mut chain = MarkovChain::default();
		chain.add_bigram("word1", "word2").unwrap();
		chain.add_bigram("word1", "word2").unwrap();
		chain.add_bigram("word1", "word3").unwrap();
		let successors = chain.get("word1").unwrap();
		assert_eq!(successors.count("word2"), 2);
		assert_eq!(successors.count("word3"), 1);
	}

	#[test]
	fn test_add_bigram_keeps_whitespace() {
		let mut chain = MarkovChain::default();
		chain.add_bigram(" word1 ", "word2").unwrap();
		assert!(chain.get(" word1 ").is_some());
		assert!(chain.get("word1").is_none());
	}

	#[test]
	fn test_end_token_never_precedes() {
		let mut chain = MarkovChain::default();
		assert!(chain.add_bigram(END_TOKEN, "a").unwrap_err().is_invalid_argument());
		assert!(chain.train(["a", END_TOKEN, "b"]).unwrap_err().is_invalid_argument());
		assert!(chain.is_empty());
		assert_eq!(chain.start_words().total(), 0);
	}

	#[test]
	fn test_train() {
		let chain = trained(&["1 2 3"]);
		assert_eq!(chain.len(), 3);
		assert_eq!(chain.get("1").unwrap().count("2"), 1);
		assert_eq!(chain.get("2").unwrap().count("3"), 1);
		assert_eq!(chain.get("3").unwrap().count(END_TOKEN), 1);
		assert!(chain.get(END_TOKEN).is_none());
	}

	#[test]
	fn test_train_empty_sentence_is_noop() {
		let mut chain = MarkovChain::default();
		chain.train(Vec::<String>::new()).unwrap();
		assert!(chain.is_empty());
		assert!(chain.start_words().is_empty());
	}

	#[test]
	fn test_train_single_word() {
		let chain = trained(&["word"]);
		assert_eq!(chain.len(), 1);
		assert_eq!(chain.get("word").unwrap().count(END_TOKEN), 1);
		assert_eq!(chain.start_words().count("word"), 1);
	}

	#[test]
	fn test_train_repeated_words() {
		let chain = trained(&["1 2 1 2 1"]);
		assert_eq!(chain.len(), 2);
		assert_eq!(chain.get("1").unwrap().count("2"), 2);
		assert_eq!(chain.get("1").unwrap().count(END_TOKEN), 1);
		assert_eq!(chain.get("2").unwrap().count("1"), 2);
	}

	#[test]
	fn test_fresh_chain_has_no_next() {
		let mut chain = trained(&["a b"]);
		assert_eq!(chain.state(), &WalkState::Fresh);
		assert!(!chain.has_next());
		assert!(matches!(chain.next_token(), Err(BotError::EndOfSequence)));
	}

	#[test]
	fn test_reset_untrained_is_terminal() {
		let mut chain = MarkovChain::default();
		chain.reset().unwrap();
		assert_eq!(chain.state(), &WalkState::Terminal);
		assert!(!chain.has_next());
	}

	#[test]
	fn test_reset_to_start_word() {
		let mut chain = trained(&["apple orange banana"]);
		chain.reset_to("orange").unwrap();
		assert_eq!(chain.next_token().unwrap(), "orange");
		assert_eq!(chain.next_token().unwrap(), "banana");
		assert!(!chain.has_next());
		assert!(matches!(chain.next_token(), Err(BotError::EndOfSequence)));
	}

	#[test]
	fn test_reset_to_untrained_word() {
		let mut chain = MarkovChain::new(ListNumberGenerator::new(vec![42]));
		chain.train("the quick brown fox jumps over the lazy dog".split(' ')).unwrap();
		chain.reset_to("apple").unwrap();
		assert!(chain.has_next());
		assert_eq!(chain.next_token().unwrap(), "apple");
		assert!(!chain.has_next());
	}

	#[test]
	fn test_reset_to_end_token() {
		let mut chain = trained(&["apple orange banana"]);
		chain.reset_to(END_TOKEN).unwrap();
		assert!(!chain.has_next());
		assert!(matches!(chain.next_token(), Err(BotError::EndOfSequence)));
	}

	#[test]
	fn test_reset_to_empty_fails() {
		let mut chain = trained(&["apple"]);
		assert!(chain.reset_to("").unwrap_err().is_invalid_argument());
	}

	#[test]
	fn test_random_reset_uses_start_words() {
		let mut chain = trained(&["a table", "a banana", "the end"]);
		for _ in 0..20 {
			chain.reset().unwrap();
			let first = chain.next_token().unwrap();
			assert!(first == "a" || first == "the");
		}
	}

	#[test]
	fn test_walk_terminates_on_acyclic_chain() {
		let mut chain = trained(&["a b c d", "a c", "b d"]);
		for _ in 0..20 {
			chain.reset().unwrap();
			let tokens: Vec<String> = chain.walk().collect::<BotResult<_>>().unwrap();
			assert!(!tokens.is_empty());
			assert!(tokens.len() <= 4);
			assert!(!chain.has_next());
		}
	}

	#[test]
	fn test_walk_without_reachable_end_keeps_going() {
		let mut chain = MarkovChain::new(RandomNumberGenerator::seeded(5));
		chain.add_bigram("x", "y").unwrap();
		chain.add_bigram("y", "x").unwrap();
		chain.reset_to("x").unwrap();
		let tokens: Vec<String> = chain.walk().take(100).collect::<BotResult<_>>().unwrap();
		assert_eq!(tokens.len(), 100);
		assert_eq!(tokens[98], "x");
		assert_eq!(tokens[99], "y");
		assert!(chain.has_next());
	}

	#[test]
	fn test_fix_distribution_walk() {
		let expected = ["CIS", "1200", "beats", "CIS", "1200", "rocks"];
		let mut chain = trained(&["CIS 1200 rocks", "CIS 1200 beats CIS 1600"]);
		chain.reset_to("CIS").unwrap();
		chain.fix_words(&expected).unwrap();
		for word in expected {
			assert!(chain.has_next());
			assert_eq!(chain.next_token().unwrap(), word);
		}
		assert!(!chain.has_next());
	}

	#[test]
	fn test_fix_distribution_across_boundary() {
		let mut chain = trained(&["a b", "c d", "c b"]);
		chain
			.fix_distribution(&[Some("c"), Some("b"), None, Some("a"), Some("b"), None], true)
			.unwrap();
		chain.reset().unwrap();
		assert_eq!(chain.walk().collect::<BotResult<Vec<_>>>().unwrap(), vec!["c", "b"]);
		chain.reset().unwrap();
		assert_eq!(chain.walk().collect::<BotResult<Vec<_>>>().unwrap(), vec!["a", "b"]);
		assert!(matches!(chain.reset(), Err(BotError::ReplayExhausted { .. })));
	}

	#[test]
	fn test_fix_distribution_rejects_untrained_paths() {
		let mut chain = trained(&["CIS 1200 rocks"]);
		assert!(chain.fix_words(&[]).unwrap_err().is_invalid_argument());
		assert!(chain.fix_words(&["1200", "rocks"]).unwrap_err().is_invalid_argument());
		assert!(chain.fix_words(&["CIS", "rocks"]).unwrap_err().is_invalid_argument());
		assert!(chain.fix_distribution(&[None], true).unwrap_err().is_invalid_argument());
		assert!(
			chain
				.fix_distribution(&[Some("CIS"), None, Some("CIS")], true)
				.unwrap_err()
				.is_invalid_argument()
		);
		chain.fix_distribution(&[Some("CIS"), None], true).unwrap();
		assert!(
			chain
				.fix_distribution(&[Some("CIS"), Some("1200"), Some("rocks"), None, None], true)
				.unwrap_err()
				.is_invalid_argument()
		);
	}

	#[test]
	fn test_display() {
		let chain = trained(&["a table", "a banana", "a banana"]);
		assert_eq!(
			chain.to_string(),
			"a: {table=1, banana=2}\nbanana: {<END>=2}\ntable: {<END>=1}\n"
		);
	}
}
