//! Turns raw CSV tweet data into cleaned training sentences.
//!
//! Cleaning rules:
//! - URLs (words starting with `http`) are dropped
//! - Sentences end at `.`, `?`, `!` or `;`
//! - Words are lowercased and kept only if made of ASCII letters, digits and `'`

use crate::model::punctuation::Punctuation;

/// Returns the `column`-th comma-separated field of `line`, if present.
pub fn extract_column(line: &str, column: usize) -> Option<&str> {
	line.split(',').nth(column)
}

/// Extracts the tweet column of every CSV line, skipping lines that are too short.
pub fn csv_data_to_tweets<I, S>(lines: I, column: usize) -> Vec<String>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	lines
		.into_iter()
		.filter_map(|line| extract_column(line.as_ref(), column).map(str::to_owned))
		.collect()
}

/// Removes every whitespace-delimited word starting with `http`.
///
/// Surrounding whitespace is preserved, and a URL ending a sentence keeps its
/// final `.` so the sentence boundary survives.
pub fn remove_urls(text: &str) -> String {
	let mut cleaned = String::with_capacity(text.len());
	let mut rest = text;
	while !rest.is_empty() {
		let word_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
		let (word, tail) = rest.split_at(word_end);
		if !word.starts_with("http") {
			cleaned.push_str(word);
		} else if word.ends_with('.') {
			cleaned.push('.');
		}

		let blank_end = tail.find(|c: char| !c.is_whitespace()).unwrap_or(tail.len());
		cleaned.push_str(&tail[..blank_end]);
		rest = &tail[blank_end..];
	}
	cleaned
}

/// Lowercases `word`, or returns `None` if it contains anything other than
/// ASCII letters, digits and apostrophes.
pub fn clean_word(word: &str) -> Option<String> {
	let lower = word.to_lowercase();
	if !lower.is_empty() && lower.chars().all(|c| c.is_ascii_alphanumeric() || c == '\'') {
		Some(lower)
	} else {
		None
	}
}

/// Splits a sentence on whitespace and keeps its valid words, cleaned.
pub fn parse_and_clean_sentence(sentence: &str) -> Vec<String> {
	sentence.split_whitespace().filter_map(clean_word).collect()
}

/// Splits a tweet into cleaned sentences.
///
/// Blank fragments between marks are dropped; a fragment whose words are all
/// invalid yields an empty sentence.
pub fn parse_and_clean_tweet(tweet: &str) -> Vec<Vec<String>> {
	remove_urls(tweet)
		.split(Punctuation::is_mark)
		.filter(|fragment| !fragment.trim().is_empty())
		.map(parse_and_clean_sentence)
		.collect()
}

/// Builds training data: every non-empty sentence of every tweet in `column`.
pub fn csv_data_to_training_data<I, S>(lines: I, column: usize) -> Vec<Vec<String>>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let sentences: Vec<Vec<String>> = csv_data_to_tweets(lines, column)
		.iter()
		.flat_map(|tweet| parse_and_clean_tweet(tweet))
		.filter(|sentence| !sentence.is_empty())
		.collect();
	log::debug!("extracted {} training sentences from column {column}", sentences.len());
	sentences
}

/// Replaces `?`, `!` and `;` with `.`.
pub fn replace_punctuation(text: &str) -> String {
	text.chars()
		.map(|c| match Punctuation::from_char(c) {
			Some(_) => Punctuation::Period.as_char(),
			None => c,
		})
		.collect()
}
