use std::collections::VecDeque;

use crate::token::{Marker, Token};

/// Abbreviations whose trailing period belongs to the word.
///
/// An abbreviation that also ends a sentence is not detected: `"Dr."` is
/// always a word and never a sentence terminator.
const ABBREVIATIONS: [&str; 5] = ["mr", "mrs", "dr", "etc", "esq"];

/// Tokenizes a text buffer.
///
/// Shorthand for [`Tokenizer::new`].
pub fn tokenize(text: &str) -> Tokenizer {
	Tokenizer::new(text)
}

/// Single-pass scanner turning raw prose into a stream of [`Token`]s.
///
/// The stream always starts with `ParagraphStart, SentenceStart` and
/// always ends with `ParagraphBreak, TextEnd`. In between it carries words,
/// the punctuation the model cares about (`. ? ! , ; :`) and the sentence,
/// paragraph and quotation markers.
///
/// # Notes
/// - The tokenizer is lazy: characters are scanned only as tokens are pulled.
/// - It is not restartable; build a new one to scan the text again.
/// - It never fails. Unrecognized characters (digits, dashes, brackets...)
///   are silently dropped and unbalanced quotes are repaired on a
///   best-effort basis.
pub struct Tokenizer {
	chars: Vec<char>,
	pos: usize,
	quote_open: bool,
	pending: VecDeque<Token>,
	finished: bool,
}

impl Tokenizer {
	/// Creates a tokenizer over `text`.
	///
	/// The text is trimmed and `\r\n` line endings are normalized to `\n`.
	pub fn new(text: &str) -> Self {
		let chars = text.trim().replace("\r\n", "\n").chars().collect();
		Self {
			chars,
			pos: 0,
			quote_open: false,
			pending: VecDeque::from([Marker::ParagraphStart.into(), Marker::SentenceStart.into()]),
			finished: false,
		}
	}

	/// Character `offset` positions past the scan position, if any.
	fn at(&self, offset: usize) -> Option<char> {
		self.chars.get(self.pos + offset).copied()
	}

	fn push(&mut self, token: impl Into<Token>) {
		self.pending.push_back(token.into());
	}

	/// Consumes one lexical unit, queuing the tokens it produces.
	fn step(&mut self) {
		let Some(c) = self.at(0) else {
			self.push(Marker::ParagraphBreak);
			self.push(Marker::TextEnd);
			self.finished = true;
			return;
		};

		if c == ' ' || c == '\t' {
			self.pos += 1;
			return;
		}
		if c == '\n' {
			self.paragraph_break();
			return;
		}
		if is_terminator(c) || c == ',' {
			self.close_quote_before(c);
		}
		if is_terminator(c) {
			self.sentence_end(c);
		} else if c.is_alphabetic() {
			self.word();
		} else if matches!(c, ',' | ';' | ':') {
			self.clause_break(c);
		} else if c == '"' {
			let marker = if self.quote_open { Marker::QuoteEnd } else { Marker::QuoteStart };
			self.quote_open = !self.quote_open;
			self.push(marker);
			self.pos += 1;
		} else {
			self.pos += 1;
		}
	}

	/// Moves a closing quote in front of the punctuation that precedes it.
	///
	/// - `.` + newline inside an open quote: the quote was never closed, a
	///   synthetic `QuoteEnd` is emitted.
	/// - `."` or `,"` inside an open quote: `QuoteEnd` is emitted first and
	///   the quote character is skipped.
	fn close_quote_before(&mut self, c: char) {
		if !self.quote_open {
			return;
		}
		if is_terminator(c) && self.at(1) == Some('\n') {
			self.push(Marker::QuoteEnd);
			self.quote_open = false;
		} else if self.at(1) == Some('"') {
			self.push(Marker::QuoteEnd);
			self.quote_open = false;
			// Leaves the scan position on the quote so the terminator
			// handling consumes it.
			self.pos += 1;
		}
	}

	fn sentence_end(&mut self, c: char) {
		self.push(Token::Punctuation(c));
		self.push(Marker::SentenceBreak);
		self.pos += 1;

		while self.at(0) == Some(' ') {
			self.pos += 1;
		}
		// A newline is left to the paragraph break handling.
		if self.at(0).is_some_and(can_start_sentence) {
			self.push(Marker::SentenceStart);
		}
	}

	fn paragraph_break(&mut self) {
		self.push(Marker::ParagraphBreak);
		self.pos += 1;

		while self.at(0) == Some('\n') {
			self.pos += 1;
		}
		if self.at(0).is_some_and(can_start_sentence) {
			self.push(Marker::ParagraphStart);
			self.push(Marker::SentenceStart);
		}
	}

	fn word(&mut self) {
		let start = self.pos;
		while self.at(0).is_some_and(|c| c.is_alphabetic() || c == '\'') {
			self.pos += 1;
		}
		let mut word: String = self.chars[start..self.pos].iter().collect();

		if self.at(0) == Some('.') && ABBREVIATIONS.contains(&word.to_lowercase().as_str()) {
			self.pos += 1;
			word.push('.');
			self.push(Token::Word(word));
			return;
		}

		self.push(Token::Word(word));
		if self.at(0) == Some('\n') {
			// A line ending without punctuation still ends the sentence.
			self.push(Token::Punctuation('.'));
			self.push(Marker::SentenceBreak);
		}
	}

	fn clause_break(&mut self, c: char) {
		self.push(Token::Punctuation(c));
		self.pos += 1;
		while self.at(0).is_some_and(char::is_whitespace) {
			self.pos += 1;
		}
	}
}

impl Iterator for Tokenizer {
	type Item = Token;

	fn next(&mut self) -> Option<Token> {
		loop {
			if let Some(token) = self.pending.pop_front() {
				return Some(token);
			}
			if self.finished {
				return None;
			}
			self.step();
		}
	}
}

fn is_terminator(c: char) -> bool {
	matches!(c, '.' | '?' | '!')
}

fn can_start_sentence(c: char) -> bool {
	c.is_alphabetic() || c.is_numeric() || c == '"'
}

#[cfg(test)]
mod tests {
	use super::*;

	use Marker::*;

	fn w(s: &str) -> Token {
		Token::word(s)
	}

	fn p(c: char) -> Token {
		Token::Punctuation(c)
	}

	fn m(marker: Marker) -> Token {
		Token::Marker(marker)
	}

	fn tokens(text: &str) -> Vec<Token> {
		tokenize(text).collect()
	}

	#[test]
	fn simple_sentence() {
		assert_eq!(
			tokens("Hello world."),
			vec![
				m(ParagraphStart),
				m(SentenceStart),
				w("Hello"),
				w("world"),
				p('.'),
				m(SentenceBreak),
				m(ParagraphBreak),
				m(TextEnd),
			]
		);
	}

	#[test]
	fn empty_text_still_framed() {
		assert_eq!(
			tokens("   \n "),
			vec![m(ParagraphStart), m(SentenceStart), m(ParagraphBreak), m(TextEnd)]
		);
	}

	#[test]
	fn abbreviation_absorbs_period() {
		let out = tokens("Dr. Smith left.");
		assert_eq!(
			out,
			vec![
				m(ParagraphStart),
				m(SentenceStart),
				w("Dr."),
				w("Smith"),
				w("left"),
				p('.'),
				m(SentenceBreak),
				m(ParagraphBreak),
				m(TextEnd),
			]
		);
		assert_eq!(out.iter().filter(|t| **t == m(SentenceBreak)).count(), 1);
	}

	#[test]
	fn abbreviation_match_is_case_insensitive() {
		let out = tokens("MRS. Jones and mr. Brown");
		assert!(out.contains(&w("MRS.")));
		assert!(out.contains(&w("mr.")));
	}

	#[test]
	fn sentence_start_after_terminator() {
		assert_eq!(
			tokens("Why? Because!"),
			vec![
				m(ParagraphStart),
				m(SentenceStart),
				w("Why"),
				p('?'),
				m(SentenceBreak),
				m(SentenceStart),
				w("Because"),
				p('!'),
				m(SentenceBreak),
				m(ParagraphBreak),
				m(TextEnd),
			]
		);
	}

	#[test]
	fn paragraphs_collapse_blank_lines() {
		assert_eq!(
			tokens("One.\n\n\nTwo."),
			vec![
				m(ParagraphStart),
				m(SentenceStart),
				w("One"),
				p('.'),
				m(SentenceBreak),
				m(ParagraphBreak),
				m(ParagraphStart),
				m(SentenceStart),
				w("Two"),
				p('.'),
				m(SentenceBreak),
				m(ParagraphBreak),
				m(TextEnd),
			]
		);
	}

	#[test]
	fn crlf_behaves_like_lf() {
		assert_eq!(tokens("One.\r\nTwo."), tokens("One.\nTwo."));
	}

	#[test]
	fn line_without_punctuation_ends_sentence() {
		assert_eq!(
			tokens("First line\nSecond"),
			vec![
				m(ParagraphStart),
				m(SentenceStart),
				w("First"),
				w("line"),
				p('.'),
				m(SentenceBreak),
				m(ParagraphBreak),
				m(ParagraphStart),
				m(SentenceStart),
				w("Second"),
				m(ParagraphBreak),
				m(TextEnd),
			]
		);
	}

	#[test]
	fn closing_quote_moves_before_period() {
		assert_eq!(
			tokens("He said \"hi.\" Then left."),
			vec![
				m(ParagraphStart),
				m(SentenceStart),
				w("He"),
				w("said"),
				m(QuoteStart),
				w("hi"),
				m(QuoteEnd),
				p('.'),
				m(SentenceBreak),
				m(SentenceStart),
				w("Then"),
				w("left"),
				p('.'),
				m(SentenceBreak),
				m(ParagraphBreak),
				m(TextEnd),
			]
		);
	}

	#[test]
	fn closing_quote_moves_before_comma() {
		assert_eq!(
			tokens("\"Fine,\" she said."),
			vec![
				m(ParagraphStart),
				m(SentenceStart),
				m(QuoteStart),
				w("Fine"),
				m(QuoteEnd),
				p(','),
				w("she"),
				w("said"),
				p('.'),
				m(SentenceBreak),
				m(ParagraphBreak),
				m(TextEnd),
			]
		);
	}

	#[test]
	fn closing_quote_moves_before_question_and_exclamation() {
		for terminator in ['?', '!'] {
			assert_eq!(
				tokens(&format!("\"Are you coming{terminator}\" she asked.")),
				vec![
					m(ParagraphStart),
					m(SentenceStart),
					m(QuoteStart),
					w("Are"),
					w("you"),
					w("coming"),
					m(QuoteEnd),
					p(terminator),
					m(SentenceBreak),
					m(SentenceStart),
					w("she"),
					w("asked"),
					p('.'),
					m(SentenceBreak),
					m(ParagraphBreak),
					m(TextEnd),
				]
			);
		}
	}

	#[test]
	fn quote_after_terminator_opens_next_sentence() {
		assert_eq!(
			tokens("Done.\"Yes,\" he said."),
			vec![
				m(ParagraphStart),
				m(SentenceStart),
				w("Done"),
				p('.'),
				m(SentenceBreak),
				m(SentenceStart),
				m(QuoteStart),
				w("Yes"),
				m(QuoteEnd),
				p(','),
				w("he"),
				w("said"),
				p('.'),
				m(SentenceBreak),
				m(ParagraphBreak),
				m(TextEnd),
			]
		);
	}

	#[test]
	fn dangling_quote_closed_at_paragraph_end() {
		assert_eq!(
			tokens("\"Unclosed.\nNext"),
			vec![
				m(ParagraphStart),
				m(SentenceStart),
				m(QuoteStart),
				w("Unclosed"),
				m(QuoteEnd),
				p('.'),
				m(SentenceBreak),
				m(ParagraphBreak),
				m(ParagraphStart),
				m(SentenceStart),
				w("Next"),
				m(ParagraphBreak),
				m(TextEnd),
			]
		);
	}

	#[test]
	fn unknown_characters_are_dropped() {
		assert_eq!(
			tokens("a-b (42) c!"),
			vec![
				m(ParagraphStart),
				m(SentenceStart),
				w("a"),
				w("b"),
				w("c"),
				p('!'),
				m(SentenceBreak),
				m(ParagraphBreak),
				m(TextEnd),
			]
		);
	}

	#[test]
	fn clause_punctuation_swallows_following_whitespace() {
		assert_eq!(
			tokens("well,\n\tthen; so: ok."),
			vec![
				m(ParagraphStart),
				m(SentenceStart),
				w("well"),
				p(','),
				w("then"),
				p(';'),
				w("so"),
				p(':'),
				w("ok"),
				p('.'),
				m(SentenceBreak),
				m(ParagraphBreak),
				m(TextEnd),
			]
		);
	}

	#[test]
	fn apostrophes_stay_inside_words() {
		let out = tokens("I don't know.");
		assert!(out.contains(&w("don't")));
	}

	#[test]
	fn tokens_are_produced_lazily() {
		let mut tokenizer = tokenize("Hello world.");
		assert_eq!(tokenizer.next(), Some(m(ParagraphStart)));
		assert_eq!(tokenizer.next(), Some(m(SentenceStart)));
		// Nothing scanned yet beyond the framing tokens.
		assert_eq!(tokenizer.pos, 0);
		assert_eq!(tokenizer.next(), Some(w("Hello")));
		assert_eq!(tokenizer.last(), Some(m(TextEnd)));
	}
}
