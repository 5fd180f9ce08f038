use kleene_automata::{Nfa, StateId};
use kleene_syntax::{Fold, Regex};

/// Builds a nondeterministic automaton accepting the language of the
/// expression, by Thompson's construction.
///
/// Every sub-expression contributes an automaton whose initial state is 0
/// and which accepts through exactly one state; the combining cases renumber
/// the sub-automata with [`Nfa::merge`]. The returned automaton therefore
/// always has a single accepting state, and its only labels are single
/// symbols and ε.
pub fn nfa_from_regex(regex: &Regex) -> Nfa {
	regex.fold(&mut Builder)
}

/// Two fresh states with the second one accepting, the shape shared by
/// all three leaf cases.
fn leaf() -> Nfa {
	let mut nfa = Nfa::with_states(2, 0);
	nfa.set_accepting(1, true);
	nfa
}

fn epsilon(nfa: &mut Nfa, from: StateId, to: StateId) {
	nfa.push_transition(from, to, String::new());
}

struct Builder;

impl Fold for Builder {
	type Output = Nfa;

	/// The accepting state stays unreachable: no word is accepted.
	fn none(&mut self) -> Nfa {
		leaf()
	}

	fn empty(&mut self) -> Nfa {
		let mut nfa = leaf();
		epsilon(&mut nfa, 0, 1);
		nfa
	}

	fn literal(&mut self, symbol: char) -> Nfa {
		let mut nfa = leaf();
		nfa.push_transition(0, 1, symbol.to_string());
		nfa
	}

	/// Appends `second` after `first` and bridges the seam with ε.
	fn concat(&mut self, first: Nfa, second: Nfa) -> Nfa {
		let first_accepting: Vec<StateId> = first.accepting_states().collect();
		let second_initial = second.initial_state();

		let mut nfa = first;
		let offset = nfa.merge(second);
		for state in first_accepting {
			epsilon(&mut nfa, state, second_initial + offset);
			nfa.set_accepting(state, false);
		}

		nfa
	}

	/// A fresh initial state branches into both alternatives, which drain
	/// into a fresh accepting state.
	fn alt(&mut self, first: Nfa, second: Nfa) -> Nfa {
		let first_initial = first.initial_state();
		let first_accepting: Vec<StateId> = first.accepting_states().collect();
		let second_initial = second.initial_state();
		let second_accepting: Vec<StateId> = second.accepting_states().collect();

		let mut nfa = Nfa::with_states(1, 0);
		let first_offset = nfa.merge(first);
		let second_offset = nfa.merge(second);
		let accepting = nfa.add_state();
		nfa.set_accepting(accepting, true);

		epsilon(&mut nfa, 0, first_initial + first_offset);
		epsilon(&mut nfa, 0, second_initial + second_offset);
		for state in first_accepting {
			epsilon(&mut nfa, state + first_offset, accepting);
			nfa.set_accepting(state + first_offset, false);
		}
		for state in second_accepting {
			epsilon(&mut nfa, state + second_offset, accepting);
			nfa.set_accepting(state + second_offset, false);
		}

		nfa
	}

	/// A fresh state, both initial and accepting, opens the loop; the
	/// inner accepting state closes it with an ε back-edge.
	fn star(&mut self, inner: Nfa) -> Nfa {
		let inner_initial = inner.initial_state();
		let inner_accepting: Vec<StateId> = inner.accepting_states().collect();

		let mut nfa = Nfa::with_states(1, 0);
		nfa.set_accepting(0, true);
		let offset = nfa.merge(inner);

		epsilon(&mut nfa, 0, inner_initial + offset);
		for state in inner_accepting {
			epsilon(&mut nfa, state + offset, 0);
			nfa.set_accepting(state + offset, false);
		}

		nfa
	}
}
