//! Kleene is a toolkit for the classical theory of regular languages: it
//! converts freely between regular expressions, nondeterministic and
//! deterministic finite automata, and runs the standard decision and
//! construction procedures on them (acceptance, determinization,
//! minimization, completion, complement, intersection, equivalence and
//! language-to-expression synthesis).
//!
//! The expression algebra lives in [`kleene-syntax`], the automata and
//! their transformations in [`kleene-automata`]; this crate owns every
//! operation crossing between the two worlds, plus a line-oriented
//! interactive front-end ([`repl`]).
//!
//! If you are instead looking for a ready-to-use and feature-rich regular
//! expression matcher, please use the [`regex`] library.
//!
//! [`kleene-syntax`]: <https://crates.io/crates/kleene-syntax>
//! [`kleene-automata`]: <https://crates.io/crates/kleene-automata>
//! [`regex`]: <https://github.com/rust-lang/regex>
pub use kleene_automata as automata;
pub use kleene_syntax as syntax;

pub use automata::{Dfa, Error, Nfa};
pub use syntax::Regex;

mod thompson;
pub use thompson::*;

mod elimination;
pub use elimination::*;

mod matching;
pub use matching::*;

pub mod repl;

/// Minimal complete deterministic automaton for the expression over the
/// union of `alphabet` and the expression's own literals.
///
/// Two expressions denote the same language exactly when their minimal
/// complete automata over a common alphabet are isomorphic, which is what
/// [`regex_equivalent`] checks.
pub fn regex_to_mcdfa(regex: &Regex, alphabet: &[char]) -> Result<Dfa, Error> {
	let mut automaton = nfa_from_regex(regex).determinize()?;
	automaton.make_complete(alphabet);
	automaton.minimize()
}

/// Expression for the complement language over `alphabet`: the minimal
/// complete automaton is complemented, read back as a nondeterministic
/// automaton and eliminated back into an expression.
pub fn regex_complement(regex: &Regex, alphabet: &[char]) -> Result<Regex, Error> {
	let mut automaton = regex_to_mcdfa(regex, alphabet)?;
	automaton.complement()?;

	let mut nondeterministic = automaton.to_nondeterministic();
	nondeterministic.make_single_accepting();
	nfa_to_regex(&nondeterministic)
}

/// Language equality of two expressions, decided over the union of their
/// literal alphabets.
pub fn regex_equivalent(first: &Regex, second: &Regex) -> Result<bool, Error> {
	let alphabet: Vec<char> = first
		.literals()
		.union(&second.literals())
		.copied()
		.collect();

	Ok(regex_to_mcdfa(first, &alphabet)?.is_isomorphic(&regex_to_mcdfa(second, &alphabet)?))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse(pattern: &str) -> Regex {
		Regex::parse(pattern).unwrap()
	}

	fn equivalent(first: &str, second: &str) -> bool {
		regex_equivalent(&parse(first), &parse(second)).unwrap()
	}

	#[test]
	fn complement_of_two_letter_word() {
		let complement = regex_complement(&parse("aa"), &['a', 'b']).unwrap();
		assert_eq!(complement.to_string(), "1+a+(b+ab+aa(a+b))(a+b)*");
	}

	#[test]
	fn complement_swaps_acceptance() {
		let complement = regex_complement(&parse("a*"), &['a', 'b']).unwrap();
		assert!(!regex_matches(&complement, ""));
		assert!(!regex_matches(&complement, "aaa"));
		assert!(regex_matches(&complement, "ab"));
		assert!(regex_matches(&complement, "b"));
	}

	#[test]
	fn same_symbol_is_equivalent() {
		assert!(equivalent("a", "a"));
	}

	#[test]
	fn different_symbols_are_not_equivalent() {
		assert!(!equivalent("a", "b"));
	}

	#[test]
	fn star_commutes_with_adjacent_symbol() {
		assert!(equivalent("aa*", "a*a"));
	}

	#[test]
	fn adjacent_symbol_matters() {
		assert!(!equivalent("a*", "aa*"));
	}

	#[test]
	fn alternation_is_commutative() {
		assert!(equivalent("a+b", "b+a"));
	}

	#[test]
	fn concatenation_is_not_commutative() {
		assert!(!equivalent("ab", "ba"));
	}

	#[test]
	fn two_spellings_of_alternating_words() {
		assert!(equivalent("(ab)*a", "a(ba)*"));
	}

	#[test]
	fn mcdfa_accepts_the_language() {
		let automaton = regex_to_mcdfa(&parse("c+a*b"), &['a', 'b', 'c']).unwrap();
		assert!(automaton.accepts("c"));
		assert!(automaton.accepts("b"));
		assert!(automaton.accepts("aab"));
		assert!(!automaton.accepts(""));
		assert!(!automaton.accepts("cb"));
		assert!(automaton.is_complete());
	}

	#[test]
	fn elimination_inverts_construction() {
		for pattern in ["a", "ab", "a+b", "a*b+c", "(a+b)*a"] {
			let regex = parse(pattern);
			let mut nfa = nfa_from_regex(&regex);
			nfa.make_single_accepting();
			let rebuilt = nfa_to_regex(&nfa).unwrap();
			assert!(
				regex_equivalent(&regex, &rebuilt).unwrap(),
				"`{pattern}` rebuilt as `{rebuilt}`"
			);
		}
	}
}
