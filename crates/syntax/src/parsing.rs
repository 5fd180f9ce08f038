use std::str::FromStr;

use crate::Regex;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
	#[error("Missing opening `(`")]
	UnmatchedClosingParenthesis,

	#[error("Missing closing `)`")]
	MissingClosingParenthesis,

	#[error("No argument for *")]
	NoArgumentForStar,

	#[error("Not enough arguments for +")]
	NotEnoughArgumentsForAlt,

	#[error("Not enough arguments for .")]
	NotEnoughArgumentsForConcat,

	#[error("Not all arguments are used in expression")]
	UnconsumedOperands,
}

/// One parenthesization level of the infix grammar.
///
/// `last` is kept out of `sequence` until the next atom arrives so that a
/// postfix `*` can still reach it.
struct Frame {
	alternatives: Option<Regex>,
	sequence: Option<Regex>,
	last: Option<Regex>,
}

impl Frame {
	fn new() -> Self {
		Self {
			alternatives: None,
			sequence: None,
			last: None,
		}
	}

	fn push_atom(&mut self, atom: Regex) {
		self.flush_last();
		self.last = Some(atom);
	}

	fn flush_last(&mut self) {
		if let Some(last) = self.last.take() {
			self.sequence = Some(match self.sequence.take() {
				Some(sequence) => sequence.concat(last),
				None => last,
			});
		}
	}

	fn star(&mut self) -> Result<(), ParseError> {
		match self.last.as_mut() {
			Some(last) => {
				last.iterate_in_place();
				Ok(())
			}
			None => Err(ParseError::NoArgumentForStar),
		}
	}

	fn alternate(&mut self) {
		self.flush_last();
		// An absent branch denotes the empty word.
		let sequence = self.sequence.take().unwrap_or_else(Regex::empty);
		self.alternatives = Some(match self.alternatives.take() {
			Some(alternatives) => alternatives.alt(sequence),
			None => sequence,
		});
	}

	fn finish(mut self) -> Regex {
		self.flush_last();
		let sequence = self.sequence.take().unwrap_or_else(Regex::empty);
		match self.alternatives.take() {
			Some(alternatives) => alternatives.alt(sequence),
			None => sequence,
		}
	}
}

impl Regex {
	/// Parses the infix syntax: `0` is the empty language, `1` the empty
	/// word, any other character a literal; `+` alternates, juxtaposition
	/// concatenates, postfix `*` iterates, parentheses group.
	pub fn parse(input: &str) -> Result<Self, ParseError> {
		let mut stack = vec![Frame::new()];

		for c in input.chars() {
			match c {
				'(' => stack.push(Frame::new()),
				')' => {
					let frame = stack.pop().unwrap();
					let parent = stack
						.last_mut()
						.ok_or(ParseError::UnmatchedClosingParenthesis)?;
					parent.push_atom(frame.finish());
				}
				'+' => stack.last_mut().unwrap().alternate(),
				'*' => stack.last_mut().unwrap().star()?,
				'0' => stack.last_mut().unwrap().push_atom(Self::none()),
				'1' => stack.last_mut().unwrap().push_atom(Self::empty()),
				c => stack.last_mut().unwrap().push_atom(Self::literal(c)),
			}
		}

		let frame = stack.pop().unwrap();
		if !stack.is_empty() {
			return Err(ParseError::MissingClosingParenthesis);
		}

		Ok(frame.finish())
	}

	/// Parses the reverse Polish syntax, where `.` denotes concatenation:
	/// atoms push one operand, `.` and `+` consume two, `*` consumes one.
	pub fn parse_reverse_polish(input: &str) -> Result<Self, ParseError> {
		let mut stack: Vec<Self> = Vec::new();

		for c in input.chars() {
			match c {
				'*' => {
					let inner = stack.pop().ok_or(ParseError::NoArgumentForStar)?;
					stack.push(inner.iterate());
				}
				'+' => {
					let second = stack.pop().ok_or(ParseError::NotEnoughArgumentsForAlt)?;
					let first = stack.pop().ok_or(ParseError::NotEnoughArgumentsForAlt)?;
					stack.push(first.alt(second));
				}
				'.' => {
					let second = stack
						.pop()
						.ok_or(ParseError::NotEnoughArgumentsForConcat)?;
					let first = stack
						.pop()
						.ok_or(ParseError::NotEnoughArgumentsForConcat)?;
					stack.push(first.concat(second));
				}
				'0' => stack.push(Self::none()),
				'1' => stack.push(Self::empty()),
				c => stack.push(Self::literal(c)),
			}
		}

		let result = stack.pop().unwrap_or_else(Self::empty);
		if !stack.is_empty() {
			return Err(ParseError::UnconsumedOperands);
		}

		Ok(result)
	}
}

impl FromStr for Regex {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Node;

	fn check_print_and_parse(regex: &Regex, representation: &str) {
		assert_eq!(regex.to_string(), representation);
		assert_eq!(
			Regex::parse(representation).unwrap().to_string(),
			representation
		);
	}

	#[test]
	fn empty_set() {
		check_print_and_parse(&Regex::none(), "0");
	}

	#[test]
	fn empty_word() {
		check_print_and_parse(&Regex::empty(), "1");
	}

	#[test]
	fn simple_word() {
		let regex = Regex::literal('a') * Regex::literal('b') * Regex::literal('c');
		check_print_and_parse(&regex, "abc");
	}

	#[test]
	fn alternation() {
		let regex = Regex::literal('a') + Regex::literal('b') + Regex::literal('c');
		check_print_and_parse(&regex, "a+b+c");
	}

	#[test]
	fn kleene_star() {
		check_print_and_parse(&Regex::literal('a').iterate(), "a*");
	}

	#[test]
	fn no_parentheses_needed() {
		let regex = Regex::literal('c') + Regex::literal('a').iterate() * Regex::literal('b');
		check_print_and_parse(&regex, "c+a*b");
	}

	#[test]
	fn parentheses_needed() {
		let regex =
			((Regex::literal('c') + Regex::literal('a')) * Regex::literal('b')).iterate();
		check_print_and_parse(&regex, "((c+a)b)*");
	}

	#[test]
	fn parsed_structure() {
		let regex = Regex::parse("c+a*b").unwrap();
		let Node::Alt(first, second) = regex.node() else {
			panic!("expected alternation, got {regex:?}");
		};
		assert!(matches!(first.node(), Node::Literal('c')));
		let Node::Concat(star, b) = second.node() else {
			panic!("expected concatenation, got {second:?}");
		};
		assert!(matches!(star.node(), Node::Star(_)));
		assert!(matches!(b.node(), Node::Literal('b')));
	}

	#[test]
	fn smart_constructors_apply_during_parsing() {
		assert_eq!(Regex::parse("0a").unwrap().to_string(), "0");
		assert_eq!(Regex::parse("1a").unwrap().to_string(), "a");
		assert_eq!(Regex::parse("0*").unwrap().to_string(), "1");
		assert_eq!(Regex::parse("1*").unwrap().to_string(), "1");
		assert_eq!(Regex::parse("0+a").unwrap().to_string(), "a");
	}

	#[test]
	fn parenthesis_errors() {
		assert!(matches!(
			Regex::parse("(ab"),
			Err(ParseError::MissingClosingParenthesis)
		));
		assert!(matches!(
			Regex::parse("ab)"),
			Err(ParseError::UnmatchedClosingParenthesis)
		));
	}

	#[test]
	fn standalone_star() {
		assert!(matches!(
			Regex::parse("*a"),
			Err(ParseError::NoArgumentForStar)
		));
		assert!(matches!(
			Regex::parse("a+*"),
			Err(ParseError::NoArgumentForStar)
		));
	}

	#[test]
	fn reverse_polish_none() {
		assert_eq!(Regex::parse_reverse_polish("0").unwrap().to_string(), "0");
	}

	#[test]
	fn reverse_polish_empty_word() {
		assert_eq!(Regex::parse_reverse_polish("1").unwrap().to_string(), "1");
	}

	#[test]
	fn reverse_polish_word() {
		assert_eq!(
			Regex::parse_reverse_polish("ab.c.").unwrap().to_string(),
			"abc"
		);
	}

	#[test]
	fn reverse_polish_alternation() {
		assert_eq!(
			Regex::parse_reverse_polish("ab+c+").unwrap().to_string(),
			"a+b+c"
		);
	}

	#[test]
	fn reverse_polish_star() {
		assert_eq!(Regex::parse_reverse_polish("a*").unwrap().to_string(), "a*");
	}

	#[test]
	fn reverse_polish_compound() {
		assert_eq!(
			Regex::parse_reverse_polish("ca*b.+").unwrap().to_string(),
			"c+a*b"
		);
	}

	#[test]
	fn reverse_polish_errors() {
		assert!(matches!(
			Regex::parse_reverse_polish("*"),
			Err(ParseError::NoArgumentForStar)
		));
		assert!(matches!(
			Regex::parse_reverse_polish("a+"),
			Err(ParseError::NotEnoughArgumentsForAlt)
		));
		assert!(matches!(
			Regex::parse_reverse_polish("a."),
			Err(ParseError::NotEnoughArgumentsForConcat)
		));
		assert!(matches!(
			Regex::parse_reverse_polish("ab"),
			Err(ParseError::UnconsumedOperands)
		));
	}
}
