use std::path::PathBuf;

use rs_markov_core::error::BotError;
use rs_markov_core::io::{read_lines, write_lines};
use rs_markov_core::model::markov_chain::{END_TOKEN, MarkovChain};
use rs_markov_core::model::number_generator::{ListNumberGenerator, RandomNumberGenerator};
use rs_markov_core::model::punctuation::Punctuation;
use rs_markov_core::model::tweet_generator::TweetGenerator;
use rs_markov_core::parser::{csv_data_to_training_data, replace_punctuation};
use tempdir::TempDir;

fn sample_data() -> PathBuf {
	PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../data/sample_tweets.csv")
}

fn sample_bot(seed: u64) -> TweetGenerator {
	let lines = read_lines(sample_data()).unwrap();
	TweetGenerator::from_sentences(
		csv_data_to_training_data(&lines, 1),
		RandomNumberGenerator::seeded(seed),
		RandomNumberGenerator::seeded(seed + 1),
	)
	.unwrap()
}

#[test]
fn test_table_banana_training() {
	let mut chain = MarkovChain::default();
	chain.train(["a", "table"]).unwrap();
	chain.train(["a", "banana"]).unwrap();
	chain.train(["a", "banana"]).unwrap();

	assert_eq!(chain.start_words().count("a"), 3);
	assert_eq!(chain.get("a").unwrap().count("table"), 1);
	assert_eq!(chain.get("a").unwrap().count("banana"), 2);
	assert_eq!(chain.get("table").unwrap().count(END_TOKEN), 1);
	assert_eq!(chain.get("banana").unwrap().count(END_TOKEN), 2);
}

#[test]
fn test_table_banana_walk_probabilities() {
	let mut chain = MarkovChain::new(ListNumberGenerator::new(vec![0, 0, 0, 0, 1, 0, 0, 2, 0]));
	chain.train(["a", "table"]).unwrap();
	chain.train(["a", "banana"]).unwrap();
	chain.train(["a", "banana"]).unwrap();

	// "a" -> "table" covers draw 0, "a" -> "banana" covers draws 1 and 2.
	for expected in ["table", "banana", "banana"] {
		chain.reset().unwrap();
		let sentence: Vec<String> = chain.walk().collect::<Result<_, _>>().unwrap();
		assert_eq!(sentence, vec!["a", expected]);
	}
}

#[test]
fn test_counts_sum_to_totals_on_sample_data() {
	let bot = sample_bot(1);
	let chain = bot.chain();
	let start_sum: usize = chain.start_words().iter().map(|(_, count)| count).sum();
	assert_eq!(start_sum, chain.start_words().total());

	for (token, _) in chain.start_words().iter() {
		let successors = chain.get(token).unwrap();
		let sum: usize = successors.iter().map(|(_, count)| count).sum();
		assert_eq!(sum, successors.total());
	}
	assert!(chain.get(END_TOKEN).is_none());
}

#[test]
fn test_pinned_cis_walk() {
	let expected = ["CIS", "1200", "beats", "CIS", "1200", "rocks"];
	let mut chain = MarkovChain::default();
	chain.train("CIS 1200 rocks".split(' ')).unwrap();
	chain.train("CIS 1200 beats CIS 1600".split(' ')).unwrap();

	chain.reset_to("CIS").unwrap();
	chain.fix_words(&expected).unwrap();

	let walked: Vec<String> = chain.walk().collect::<Result<_, _>>().unwrap();
	assert_eq!(walked, expected);
}

#[test]
fn test_pinned_punctuation_is_selected() {
	let mut bot = sample_bot(5);
	bot.fix_distribution(&["the", "dog", "wants", "a", "snack", "!"]).unwrap();

	let tweet = bot.generate_word_sequence(5).unwrap();
	assert_eq!(tweet, "the dog wants a snack!");
	assert!(tweet.ends_with(Punctuation::Exclamation.as_char()));
}

#[test]
fn test_pinned_tweet_spanning_sentences() {
	let mut bot = sample_bot(5);
	let tweet = [
		"barked", "anyway", "?", "sometimes", "my", "tail", "wins", ";", "nobody", "won", ".",
	];
	bot.fix_distribution(&tweet).unwrap();

	let generated = bot.generate_word_sequence(8).unwrap();
	assert_eq!(generated, "barked anyway? sometimes my tail wins; nobody won.");
	assert_eq!(replace_punctuation(&generated), "barked anyway. sometimes my tail wins. nobody won.");

	// The script is spent: the next generation cannot replay anything.
	assert!(matches!(bot.generate_word_sequence(1), Err(BotError::ReplayExhausted { .. })));
}

#[test]
fn test_bounded_tweets_from_sample_data() {
	let mut bot = sample_bot(12);
	let tweets = bot.generate_tweets(10, 280).unwrap();
	assert_eq!(tweets.len(), 10);
	for tweet in &tweets {
		assert!(!tweet.is_empty());
		assert!(tweet.chars().count() <= 280);
		assert!(TweetGenerator::is_punctuated(tweet));
	}
}

#[test]
fn test_same_seed_same_tweets() {
	let first = sample_bot(77).generate_tweets(3, 140).unwrap();
	let second = sample_bot(77).generate_tweets(3, 140).unwrap();
	assert_eq!(first, second);
}

#[test]
fn test_write_generated_tweets() {
	let dir = TempDir::new("rs-markov-tweets").unwrap();
	let path = dir.path().join("generated_tweets.txt");

	let mut bot = sample_bot(3);
	let tweets = bot.generate_tweets(4, 80).unwrap();
	write_lines(&tweets, &path, false).unwrap();
	write_lines(&tweets[..1], &path, true).unwrap();

	let written = read_lines(&path).unwrap();
	assert_eq!(written.len(), 5);
	assert_eq!(written[..4], tweets[..]);
	assert_eq!(written[4], tweets[0]);
}
