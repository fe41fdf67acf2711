//! Error types shared by every component of the bot.

/// Errors raised by training, sampling, walking and generation.
///
/// All errors are raised synchronously by the call that breaks its contract.
/// Nothing is retried internally.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
	/// A caller supplied an argument outside of the operation's domain.
	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	/// An item was looked up (or pinned) in a distribution that never recorded it.
	#[error("token {token:?} was never recorded in this distribution")]
	NotRecorded {
		/// The missing item, rendered for display.
		token: String,
	},

	/// `pick` was called on a distribution with a zero total.
	#[error("cannot sample from an empty distribution")]
	EmptyDistribution,

	/// The walk was advanced after reaching the end of its sentence.
	#[error("the walk has no more tokens")]
	EndOfSequence,

	/// A scripted number generator ran out of values.
	#[error("scripted number generator exhausted after {consumed} values")]
	ReplayExhausted {
		/// How many values were handed out before exhaustion.
		consumed: usize,
	},

	/// A scripted value does not fit the bound requested by the caller.
	#[error("scripted value {value} is out of bound {bound}")]
	OutOfBound {
		/// The scripted value.
		value: usize,
		/// The exclusive bound requested.
		bound: usize,
	},

	/// I/O error.
	#[error(transparent)]
	Io(#[from] std::io::Error),

	/// Malformed configuration file.
	#[error("config error: {0}")]
	Config(#[from] serde_json::Error),
}

impl BotError {
	/// Builds an [`BotError::InvalidArgument`] from anything printable.
	pub fn invalid(message: impl Into<String>) -> Self {
		BotError::InvalidArgument(message.into())
	}

	/// True for the whole invalid-argument class, including lookups of
	/// unrecorded tokens.
	pub fn is_invalid_argument(&self) -> bool {
		matches!(self, BotError::InvalidArgument(_) | BotError::NotRecorded { .. })
	}
}

/// Result type for bot operations.
pub type BotResult<T> = Result<T, BotError>;
