use std::collections::VecDeque;

use kleene_automata::{Error, Nfa, StateId};
use kleene_syntax::{Fold, Regex};

use crate::nfa_from_regex;

/// Length of the longest prefix of `pattern` accepted by the automaton,
/// 0 when no non-empty prefix is.
///
/// Breadth-first search over `(state, consumed length)` pairs. Every
/// transition label must be a single symbol
/// ([`Error::NotSingleLetter`]); feed the automaton through
/// [`Nfa::remove_epsilon`] and [`Nfa::split_transitions`] first.
pub fn max_matching_prefix(automaton: &Nfa, pattern: &str) -> Result<usize, Error> {
	let mut edges: Vec<Vec<(char, StateId)>> = Vec::with_capacity(automaton.state_count());
	for state in automaton.states() {
		let mut outgoing = Vec::new();
		for (label, target) in automaton.transitions_from(state) {
			let mut symbols = label.chars();
			match (symbols.next(), symbols.next()) {
				(Some(symbol), None) => outgoing.push((symbol, *target)),
				_ => return Err(Error::NotSingleLetter),
			}
		}

		edges.push(outgoing);
	}

	if automaton.state_count() == 0 {
		return Ok(0);
	}

	let pattern: Vec<char> = pattern.chars().collect();
	let mut visited = vec![vec![false; pattern.len() + 1]; automaton.state_count()];
	let mut to_process = VecDeque::new();
	visited[automaton.initial_state()][0] = true;
	to_process.push_back((automaton.initial_state(), 0));

	let mut longest = 0;
	while let Some((state, consumed)) = to_process.pop_front() {
		if automaton.is_accepting(state) {
			longest = longest.max(consumed);
		}

		if consumed == pattern.len() {
			continue;
		}

		for &(symbol, target) in &edges[state] {
			if symbol == pattern[consumed] && !visited[target][consumed + 1] {
				visited[target][consumed + 1] = true;
				to_process.push_back((target, consumed + 1));
			}
		}
	}

	Ok(longest)
}

/// Length of the longest prefix of `pattern` the expression matches, or
/// `None` when not even the empty prefix does (the expression does not
/// match ε). Unlike [`regex_max_matching_prefix`], which reports 0 in both
/// situations, this distinguishes "matches only ε" from "matches nothing".
pub fn regex_matched_prefix(regex: &Regex, pattern: &str) -> Option<usize> {
	let matchable = possible_substrings(regex, pattern);
	matchable[0].iter().rposition(|&matches| matches)
}

/// Checks whether the expression matches the whole of `text`.
pub fn regex_matches(regex: &Regex, text: &str) -> bool {
	possible_substrings(regex, text)[0][text.chars().count()]
}

/// For every span `left..right` of `pattern`, whether the expression
/// matches it: a dynamic program folded bottom-up over the expression.
fn possible_substrings(regex: &Regex, pattern: &str) -> Vec<Vec<bool>> {
	let mut matcher = Substrings {
		pattern: pattern.chars().collect(),
	};
	regex.fold(&mut matcher)
}

type Spans = Vec<Vec<bool>>;

struct Substrings {
	pattern: Vec<char>,
}

impl Substrings {
	fn positions(&self) -> usize {
		self.pattern.len() + 1
	}

	fn nothing(&self) -> Spans {
		vec![vec![false; self.positions()]; self.positions()]
	}
}

impl Fold for Substrings {
	type Output = Spans;

	fn none(&mut self) -> Spans {
		self.nothing()
	}

	/// ε matches exactly the empty spans.
	fn empty(&mut self) -> Spans {
		let mut spans = self.nothing();
		for position in 0..self.positions() {
			spans[position][position] = true;
		}

		spans
	}

	fn literal(&mut self, symbol: char) -> Spans {
		let mut spans = self.nothing();
		for (position, &pattern_symbol) in self.pattern.iter().enumerate() {
			if pattern_symbol == symbol {
				spans[position][position + 1] = true;
			}
		}

		spans
	}

	/// A span matches a concatenation iff some pivot splits it into a
	/// match of each part.
	fn concat(&mut self, first: Spans, second: Spans) -> Spans {
		let mut spans = self.nothing();
		for left in 0..self.positions() {
			for pivot in left..self.positions() {
				if first[left][pivot] {
					for right in pivot..self.positions() {
						if second[pivot][right] {
							spans[left][right] = true;
						}
					}
				}
			}
		}

		spans
	}

	fn alt(&mut self, mut first: Spans, second: Spans) -> Spans {
		for left in 0..self.positions() {
			for right in left..self.positions() {
				if second[left][right] {
					first[left][right] = true;
				}
			}
		}

		first
	}

	/// Transitive closure of the inner matches, plus the empty spans.
	fn star(&mut self, mut inner: Spans) -> Spans {
		for left in (0..self.positions()).rev() {
			for right in left..self.positions() {
				for pivot in left..=right {
					if inner[left][pivot] && inner[pivot][right] {
						inner[left][right] = true;
					}
				}
			}
		}

		for position in 0..self.positions() {
			inner[position][position] = true;
		}

		inner
	}
}

/// [`max_matching_prefix`] for an expression: builds the automaton,
/// normalizes it and searches.
pub fn regex_max_matching_prefix(regex: &Regex, pattern: &str) -> Result<usize, Error> {
	let mut automaton = nfa_from_regex(regex).remove_epsilon();
	automaton.split_transitions();
	max_matching_prefix(&automaton, pattern)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn pattern(input: &str) -> Regex {
		Regex::parse(input).unwrap()
	}

	#[test]
	fn prefix_of_starred_group() {
		assert_eq!(
			regex_max_matching_prefix(&pattern("(a*b)*"), "aababac").unwrap(),
			5
		);
	}

	#[test]
	fn prefix_of_mismatch() {
		assert_eq!(regex_max_matching_prefix(&pattern("c(a+b)"), "aa").unwrap(), 0);
	}

	#[test]
	fn prefix_consumes_whole_match() {
		assert_eq!(regex_max_matching_prefix(&pattern("c(a+b)"), "cb").unwrap(), 2);
	}

	#[test]
	fn prefix_of_single_word_automaton() {
		let automaton = Nfa::new(3, 0, &[2], &[(0, 1, "a"), (1, 2, "b")]).unwrap();
		assert_eq!(max_matching_prefix(&automaton, "").unwrap(), 0);
		assert_eq!(max_matching_prefix(&automaton, "a").unwrap(), 0);
		assert_eq!(max_matching_prefix(&automaton, "abcd").unwrap(), 2);
	}

	#[test]
	fn prefix_of_unary_loop() {
		let automaton = Nfa::new(1, 0, &[0], &[(0, 0, "a")]).unwrap();
		assert_eq!(max_matching_prefix(&automaton, "aaabc").unwrap(), 3);
	}

	#[test]
	fn prefix_of_fixed_length_language() {
		let automaton = Nfa::new(
			3,
			0,
			&[2],
			&[(0, 1, "a"), (0, 1, "b"), (1, 2, "a"), (1, 2, "b")],
		)
		.unwrap();
		assert_eq!(max_matching_prefix(&automaton, "a").unwrap(), 0);
		assert_eq!(max_matching_prefix(&automaton, "baa").unwrap(), 2);
	}

	#[test]
	fn rejects_unnormalized_labels() {
		let automaton = Nfa::new(2, 0, &[1], &[(0, 1, "ab")]).unwrap();
		assert!(matches!(
			max_matching_prefix(&automaton, "ab"),
			Err(Error::NotSingleLetter)
		));

		let automaton = Nfa::new(2, 0, &[1], &[(0, 1, "")]).unwrap();
		assert!(matches!(
			max_matching_prefix(&automaton, "ab"),
			Err(Error::NotSingleLetter)
		));
	}

	#[test]
	fn substring_prefix_search() {
		assert_eq!(regex_matched_prefix(&pattern("(a*b)*"), "aababac"), Some(5));
		assert_eq!(regex_matched_prefix(&pattern("c(a+b)"), "aa"), None);
		assert_eq!(regex_matched_prefix(&pattern("c(a+b)"), "cb"), Some(2));
	}

	#[test]
	fn whole_word_matching() {
		let regex = pattern("c+a*b");
		assert!(regex_matches(&regex, "c"));
		assert!(regex_matches(&regex, "b"));
		assert!(regex_matches(&regex, "aaab"));
		assert!(!regex_matches(&regex, ""));
		assert!(!regex_matches(&regex, "ca"));
		assert!(!regex_matches(&regex, "ba"));
	}

	#[test]
	fn matching_boundary_languages() {
		assert!(!regex_matches(&pattern("0"), ""));
		assert!(regex_matches(&pattern("1"), ""));
		assert!(regex_matches(&pattern("a*"), ""));
	}
}
