//! Property tests for the universally quantified invariants of the
//! toolkit, over small expressions and automata on the alphabet {a, b}.
use kleene::{
	nfa_from_regex, nfa_to_regex, regex_equivalent, regex_matches, regex_to_mcdfa, Nfa, Regex,
};
use proptest::prelude::*;

const ALPHABET: [char; 2] = ['a', 'b'];

fn regex_strategy() -> impl Strategy<Value = Regex> {
	let leaf = prop_oneof![
		Just(Regex::none()),
		Just(Regex::empty()),
		prop::sample::select(ALPHABET.to_vec()).prop_map(Regex::literal),
	];

	leaf.prop_recursive(4, 24, 2, |inner| {
		prop_oneof![
			(inner.clone(), inner.clone()).prop_map(|(first, second)| first.concat(second)),
			(inner.clone(), inner.clone()).prop_map(|(first, second)| first.alt(second)),
			inner.prop_map(Regex::iterate),
		]
	})
}

/// Smaller expressions for the elimination round trip: synthesized
/// expressions grow quickly with the number of eliminated states.
fn small_regex_strategy() -> impl Strategy<Value = Regex> {
	let leaf = prop_oneof![
		Just(Regex::none()),
		Just(Regex::empty()),
		prop::sample::select(ALPHABET.to_vec()).prop_map(Regex::literal),
	];

	leaf.prop_recursive(3, 10, 2, |inner| {
		prop_oneof![
			(inner.clone(), inner.clone()).prop_map(|(first, second)| first.concat(second)),
			(inner.clone(), inner.clone()).prop_map(|(first, second)| first.alt(second)),
			inner.prop_map(Regex::iterate),
		]
	})
}

fn nfa_strategy() -> impl Strategy<Value = Nfa> {
	(1usize..5).prop_flat_map(|state_count| {
		let transition = (
			0..state_count,
			0..state_count,
			prop::sample::select(vec!["", "a", "b", "ab", "ba", "aba"]),
		);

		(
			prop::collection::vec(transition, 0..8),
			prop::collection::vec(any::<bool>(), state_count),
			0..state_count,
		)
			.prop_map(move |(transitions, accepting, initial)| {
				let mut nfa = Nfa::with_states(state_count, initial);
				for (state, &accept) in accepting.iter().enumerate() {
					nfa.set_accepting(state, accept);
				}
				for (from, to, label) in transitions {
					nfa.add_transition(from, to, label).unwrap();
				}
				nfa
			})
	})
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(64))]

	#[test]
	fn printing_then_parsing_is_stable(regex in regex_strategy()) {
		let printed = regex.to_string();
		let reparsed = Regex::parse(&printed).unwrap();
		prop_assert_eq!(reparsed.to_string(), printed);
	}

	#[test]
	fn mcdfa_agrees_with_the_matching_oracle(
		regex in regex_strategy(),
		word in "[ab]{0,5}",
	) {
		let automaton = regex_to_mcdfa(&regex, &ALPHABET).unwrap();
		prop_assert_eq!(automaton.accepts(&word), regex_matches(&regex, &word));
	}

	#[test]
	fn elimination_inverts_construction(regex in small_regex_strategy()) {
		let rebuilt = nfa_to_regex(&nfa_from_regex(&regex)).unwrap();
		prop_assert!(regex_equivalent(&regex, &rebuilt).unwrap());
	}

	#[test]
	fn double_complement_is_structurally_identity(regex in regex_strategy()) {
		let mut automaton = regex_to_mcdfa(&regex, &ALPHABET).unwrap();
		let original = automaton.clone();
		automaton.complement().unwrap();
		automaton.complement().unwrap();
		prop_assert_eq!(automaton, original);
	}

	#[test]
	fn epsilon_removal_preserves_the_language(nfa in nfa_strategy()) {
		let removed = nfa.remove_epsilon();
		for state in removed.states() {
			for (label, _) in removed.transitions_from(state) {
				prop_assert!(!label.is_empty());
			}
		}

		prop_assert!(removed
			.determinize()
			.unwrap()
			.is_equivalent(&nfa.determinize().unwrap()));
	}

	#[test]
	fn splitting_preserves_the_language(nfa in nfa_strategy()) {
		let mut split = nfa.clone();
		split.split_transitions();
		for state in split.states() {
			for (label, _) in split.transitions_from(state) {
				prop_assert!(label.chars().count() <= 1);
			}
		}

		prop_assert!(split
			.determinize()
			.unwrap()
			.is_equivalent(&nfa.determinize().unwrap()));
	}

	#[test]
	fn minimization_preserves_acceptance(
		nfa in nfa_strategy(),
		word in "[ab]{0,5}",
	) {
		let mut complete = nfa.determinize().unwrap();
		complete.make_complete(&ALPHABET);
		let minimized = complete.minimize().unwrap();
		prop_assert!(minimized.is_complete());
		prop_assert!(minimized.state_count() <= complete.state_count());
		prop_assert_eq!(minimized.accepts(&word), complete.accepts(&word));
	}

	#[test]
	fn intersection_is_commutative_up_to_isomorphism(
		first in nfa_strategy(),
		second in nfa_strategy(),
	) {
		let first = first.determinize().unwrap();
		let second = second.determinize().unwrap();
		prop_assert!(first
			.intersection(&second)
			.is_isomorphic(&second.intersection(&first)));
	}

	#[test]
	fn intersection_is_idempotent_up_to_isomorphism(nfa in nfa_strategy()) {
		let automaton = nfa.determinize().unwrap();
		prop_assert!(automaton.intersection(&automaton).is_isomorphic(&automaton));
	}

	#[test]
	fn equivalence_is_reflexive_and_symmetric(
		first in nfa_strategy(),
		second in nfa_strategy(),
	) {
		let first = first.determinize().unwrap();
		let second = second.determinize().unwrap();
		prop_assert!(first.is_equivalent(&first));
		prop_assert_eq!(first.is_equivalent(&second), second.is_equivalent(&first));
	}
}
