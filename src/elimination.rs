use kleene_automata::{Error, Nfa};
use kleene_syntax::Regex;

/// Synthesizes a regular expression for the language of the automaton by
/// state elimination.
///
/// The automaton is read as a complete matrix of regular-expression edges,
/// seeded with ∅ where it has no transition, ε for empty labels and a
/// literal for single-symbol labels; longer labels are rejected with
/// [`Error::BadTransitionLabelLength`]. There must be at most one accepting
/// state ([`Error::MultipleAcceptingStates`]; use
/// [`Nfa::make_single_accepting`] first when there are several), and with
/// none the language is ∅.
///
/// Interior states are eliminated in ascending id order, rerouting every
/// detour `i → k → j` as `R[i,j] + R[i,k]·R[k,k]*·R[k,j]`; the elimination
/// order is observable in the shape of the printed expression but not in
/// the language. All combinations go through the simplifying smart
/// constructors, which is what keeps ∅ edges from spreading through the
/// matrix.
pub fn nfa_to_regex(automaton: &Nfa) -> Result<Regex, Error> {
	let Some(accepting) = automaton.single_accepting_state()? else {
		return Ok(Regex::none());
	};
	let initial = automaton.initial_state();
	let state_count = automaton.state_count();

	let mut edges = vec![vec![Regex::none(); state_count]; state_count];
	for state in automaton.states() {
		for (label, target) in automaton.transitions_from(state) {
			let mut symbols = label.chars();
			let piece = match (symbols.next(), symbols.next()) {
				(None, _) => Regex::empty(),
				(Some(symbol), None) => Regex::literal(symbol),
				_ => return Err(Error::BadTransitionLabelLength),
			};

			edges[state][*target] += piece;
		}
	}

	for state in automaton.states() {
		if state == initial || state == accepting {
			continue;
		}

		let through = edges[state][state].clone().iterate();
		for from in automaton.states().filter(|&from| from != state) {
			let incoming = edges[from][state].clone();
			if incoming.is_none() {
				continue;
			}

			for to in automaton.states().filter(|&to| to != state) {
				let detour = incoming.clone() * through.clone() * edges[state][to].clone();
				edges[from][to] += detour;
			}
		}

		for other in automaton.states() {
			edges[state][other] = Regex::none();
			edges[other][state] = Regex::none();
		}
	}

	if initial == accepting {
		Ok(edges[initial][initial].clone().iterate())
	} else {
		let enter = edges[initial][initial].clone().iterate()
			* edges[initial][accepting].clone();
		let cycle = edges[accepting][accepting].clone()
			+ edges[accepting][initial].clone() * enter.clone();
		Ok(enter * cycle.iterate())
	}
}
