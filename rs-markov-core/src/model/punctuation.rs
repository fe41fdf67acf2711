use std::fmt;

/// Punctuation marks appended at sentence boundaries.
///
/// A mark is chosen by drawing a value in `[0, DRAW_BOUND)`: the first three
/// values select `;`, `?` and `!` (10% each), anything else selects `.`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Punctuation {
	Semicolon,
	Question,
	Exclamation,
	Period,
}

impl Punctuation {
	/// Exclusive bound of the draw used by [`Punctuation::from_draw`].
	pub const DRAW_BOUND: usize = 10;

	/// Maps a draw in `[0, DRAW_BOUND)` to a mark.
	pub fn from_draw(value: usize) -> Self {
		match value {
			0 => Punctuation::Semicolon,
			1 => Punctuation::Question,
			2 => Punctuation::Exclamation,
			_ => Punctuation::Period,
		}
	}

	/// Smallest draw selecting this mark.
	pub fn draw(self) -> usize {
		match self {
			Punctuation::Semicolon => 0,
			Punctuation::Question => 1,
			Punctuation::Exclamation => 2,
			Punctuation::Period => 3,
		}
	}

	pub fn as_char(self) -> char {
		match self {
			Punctuation::Semicolon => ';',
			Punctuation::Question => '?',
			Punctuation::Exclamation => '!',
			Punctuation::Period => '.',
		}
	}

	pub fn from_char(c: char) -> Option<Self> {
		match c {
			';' => Some(Punctuation::Semicolon),
			'?' => Some(Punctuation::Question),
			'!' => Some(Punctuation::Exclamation),
			'.' => Some(Punctuation::Period),
			_ => None,
		}
	}

	/// Parses a token made of exactly one mark.
	pub fn from_token(token: &str) -> Option<Self> {
		let mut chars = token.chars();
		match (chars.next(), chars.next()) {
			(Some(c), None) => Self::from_char(c),
			_ => None,
		}
	}

	/// True if `c` ends a sentence.
	pub fn is_mark(c: char) -> bool {
		Self::from_char(c).is_some()
	}
}

impl fmt::Display for Punctuation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.as_char())
	}
}
