use std::fmt;

use serde::{Deserialize, Serialize};

/// Structural markers inserted by the tokenizer around sentences,
/// paragraphs and quotations.
///
/// Markers are ordinary tokens for the model: they take part in the
/// transition counts and in the context windows exactly like words.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Marker {
	ParagraphStart,
	ParagraphBreak,
	SentenceStart,
	SentenceBreak,
	QuoteStart,
	QuoteEnd,
	TextEnd,
}

impl Marker {
	/// Every marker, in declaration order.
	pub const ALL: [Marker; 7] = [
		Marker::ParagraphStart,
		Marker::ParagraphBreak,
		Marker::SentenceStart,
		Marker::SentenceBreak,
		Marker::QuoteStart,
		Marker::QuoteEnd,
		Marker::TextEnd,
	];

	/// Delimiter-wrapped literal used when a marker is rendered as text.
	pub fn literal(self) -> &'static str {
		match self {
			Marker::ParagraphStart => "<<<START-PARAGRAPH>>>",
			Marker::ParagraphBreak => "<<<END-PARAGRAPH>>>",
			Marker::SentenceStart => "<<<START-SENTENCE>>>",
			Marker::SentenceBreak => "<<<END-SENTENCE>>>",
			Marker::QuoteStart => "<<<START-QUOTE>>>",
			Marker::QuoteEnd => "<<<END-QUOTE>>>",
			Marker::TextEnd => "<<<END-TEXT>>>",
		}
	}

	/// Returns `true` for the markers that end a generated sentence.
	pub fn ends_sentence(self) -> bool {
		matches!(self, Marker::SentenceBreak | Marker::ParagraphBreak | Marker::TextEnd)
	}
}

/// Atomic unit of the training and generation stream.
///
/// A token is either a word (letters, apostrophes and, for a few
/// abbreviations, a trailing period), a single punctuation character,
/// or a structural [`Marker`]. Keeping markers in their own variant means
/// a word can never be mistaken for a control token, whatever it spells.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Token {
	Word(String),
	Punctuation(char),
	Marker(Marker),
}

impl Token {
	/// Builds a word token.
	pub fn word(s: &str) -> Self {
		Token::Word(s.to_owned())
	}

	/// Returns the marker if this token is one.
	pub fn as_marker(&self) -> Option<Marker> {
		match self {
			Token::Marker(m) => Some(*m),
			_ => None,
		}
	}

	pub fn is_marker(&self) -> bool {
		matches!(self, Token::Marker(_))
	}
}

impl From<Marker> for Token {
	fn from(marker: Marker) -> Self {
		Token::Marker(marker)
	}
}

impl fmt::Display for Token {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Token::Word(w) => f.write_str(w),
			Token::Punctuation(c) => write!(f, "{c}"),
			Token::Marker(m) => f.write_str(m.literal()),
		}
	}
}

/// Joins tokens with single spaces.
pub fn join(tokens: &[Token]) -> String {
	tokens
		.iter()
		.map(Token::to_string)
		.collect::<Vec<_>>()
		.join(" ")
}
