use std::{
	collections::{BTreeMap, HashMap, VecDeque},
	str::FromStr,
};

use crate::{Automaton, Description, Dfa, Error, StateId};

/// Outgoing transitions of one nondeterministic state, in insertion
/// order. Labels are strings: empty for ε, one symbol after
/// [`Nfa::split_transitions`], arbitrarily long otherwise. Duplicates are
/// allowed until [`Nfa::remove_duplicate_transitions`].
pub type NonDetTransitions = Vec<(String, StateId)>;

/// Nondeterministic finite automaton.
pub type Nfa = Automaton<NonDetTransitions>;

impl Nfa {
	/// Assembles a nondeterministic automaton from a state count,
	/// accepting state ids and `(from, to, label)` transitions.
	pub fn new(
		state_count: usize,
		initial: StateId,
		accepting: &[StateId],
		transitions: &[(StateId, StateId, &str)],
	) -> Result<Self, Error> {
		let mut automaton = Self::with_states(state_count, initial);
		for &state in accepting {
			automaton.check_state(state)?;
			automaton.set_accepting(state, true);
		}

		for &(from, to, label) in transitions {
			automaton.add_transition(from, to, label)?;
		}

		Ok(automaton)
	}

	pub fn add_transition(
		&mut self,
		from: StateId,
		to: StateId,
		label: impl Into<String>,
	) -> Result<(), Error> {
		self.check_state(from)?;
		self.check_state(to)?;
		self.push_transition(from, to, label.into());
		Ok(())
	}

	/// Appends a transition without validating the state ids, for callers
	/// that mint the ids themselves.
	///
	/// # Panics
	///
	/// Panics if `from` or `to` is not a valid state id.
	pub fn push_transition(&mut self, from: StateId, to: StateId, label: String) {
		assert!(to < self.state_count(), "invalid target state {to}");
		self.transitions_mut(from).push((label, to));
	}

	/// Sorts and deduplicates the outgoing transitions of one state.
	pub fn remove_duplicate_transitions(&mut self, state: StateId) {
		let transitions = self.transitions_mut(state);
		transitions.sort();
		transitions.dedup();
	}

	/// Replaces, in place, every transition labelled by two or more
	/// symbols with a chain of fresh states consuming one symbol each.
	/// Labels of length zero or one are left alone.
	pub fn split_transitions(&mut self) {
		for state in 0..self.state_count() {
			let old_transitions = std::mem::take(self.transitions_mut(state));
			for (label, target) in old_transitions {
				let symbols: Vec<char> = label.chars().collect();
				match symbols.as_slice() {
					[] | [_] => self.push_transition(state, target, label),
					[head @ .., last] => {
						let mut source = state;
						for &symbol in head {
							let next = self.add_state();
							self.push_transition(source, next, symbol.to_string());
							source = next;
						}

						self.push_transition(source, target, last.to_string());
					}
				}
			}
		}
	}

	/// States reachable from `state` through ε-transitions alone,
	/// including `state` itself, as a membership vector.
	fn epsilon_closure(&self, state: StateId) -> Vec<bool> {
		let mut closure = vec![false; self.state_count()];
		closure[state] = true;
		let mut to_process = vec![state];
		while let Some(current) = to_process.pop() {
			for (label, target) in self.transitions_from(current) {
				if label.is_empty() && !closure[*target] {
					closure[*target] = true;
					to_process.push(*target);
				}
			}
		}

		closure
	}

	/// Builds an automaton without ε-transitions accepting the same
	/// language: each state adopts the acceptance and the non-ε
	/// transitions of its entire ε-closure.
	pub fn remove_epsilon(&self) -> Self {
		let mut result = Self::with_states(self.state_count(), self.initial_state());
		for state in self.states() {
			let closure = self.epsilon_closure(state);
			for member in self.states().filter(|&member| closure[member]) {
				if self.is_accepting(member) {
					result.set_accepting(state, true);
				}

				for (label, target) in self.transitions_from(member) {
					if !label.is_empty() {
						result.push_transition(state, *target, label.clone());
					}
				}
			}

			result.remove_duplicate_transitions(state);
		}

		result
	}

	/// Subset construction over an automaton whose labels are all exactly
	/// one symbol long ([`Error::NotSingleLetter`] otherwise).
	///
	/// Subset states are numbered in discovery order starting from the
	/// initial subset; the frontier is processed first-in first-out and
	/// the symbols of a subset are explored in descending order. Only
	/// reachable subsets exist in the result.
	pub fn determinize_single_letter(&self) -> Result<Dfa, Error> {
		let mut single_letter: Vec<Vec<(char, StateId)>> = Vec::with_capacity(self.state_count());
		for state in self.states() {
			let mut edges = Vec::new();
			for (label, target) in self.transitions_from(state) {
				let mut symbols = label.chars();
				match (symbols.next(), symbols.next()) {
					(Some(symbol), None) => edges.push((symbol, *target)),
					_ => return Err(Error::NotSingleLetter),
				}
			}

			single_letter.push(edges);
		}

		if self.state_count() == 0 {
			return Ok(Dfa::with_states(0, 0));
		}

		let mut initial_subset = vec![false; self.state_count()];
		initial_subset[self.initial_state()] = true;

		let mut determinized = Dfa::with_states(1, 0);
		let mut subset_ids = HashMap::from([(initial_subset.clone(), 0)]);
		let mut frontier = VecDeque::from([initial_subset]);

		while let Some(subset) = frontier.pop_front() {
			let subset_id = subset_ids[&subset];

			let mut successors: BTreeMap<char, Vec<bool>> = BTreeMap::new();
			for state in self.states().filter(|&state| subset[state]) {
				if self.is_accepting(state) {
					determinized.set_accepting(subset_id, true);
				}

				for &(symbol, target) in &single_letter[state] {
					successors
						.entry(symbol)
						.or_insert_with(|| vec![false; self.state_count()])[target] = true;
				}
			}

			for (&symbol, successor) in successors.iter().rev() {
				let successor_id = match subset_ids.get(successor) {
					Some(&id) => id,
					None => {
						let id = determinized.add_state();
						subset_ids.insert(successor.clone(), id);
						frontier.push_back(successor.clone());
						id
					}
				};

				determinized
					.transitions_mut(subset_id)
					.insert(symbol, successor_id);
			}
		}

		Ok(determinized)
	}

	/// Full determinization: ε-removal, transition splitting, then subset
	/// construction.
	pub fn determinize(&self) -> Result<Dfa, Error> {
		let mut single_letter = self.remove_epsilon();
		single_letter.split_transitions();
		single_letter.determinize_single_letter()
	}

	/// Rewires the automaton, in place, to accept through one fresh state:
	/// every previously accepting state loses its bit and gains an
	/// ε-transition into the new sole accepting state.
	pub fn make_single_accepting(&mut self) {
		let accepting: Vec<StateId> = self.accepting_states().collect();
		let target = self.add_state();
		self.set_accepting(target, true);
		for state in accepting {
			self.push_transition(state, target, String::new());
			self.set_accepting(state, false);
		}
	}

	/// Appends the states, transitions and acceptance bits of `other`,
	/// renumbered past the current states, and returns the offset that was
	/// added to `other`'s state ids. The initial state is left untouched.
	pub fn merge(&mut self, other: Self) -> StateId {
		let offset = self.state_count();
		for (state, accepting) in other.accepting().iter().enumerate() {
			let id = self.add_state();
			debug_assert_eq!(id, offset + state);
			self.set_accepting(id, *accepting);
		}

		for (state, transitions) in other.into_transitions().into_iter().enumerate() {
			for (label, target) in transitions {
				self.push_transition(offset + state, offset + target, label);
			}
		}

		offset
	}
}

impl FromStr for Nfa {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let description = Description::parse(s)?;
		let mut automaton = Self::with_states(description.state_count, description.initial);
		for state in description.accepting {
			automaton.set_accepting(state, true);
		}

		for (from, to, label) in description.transitions {
			automaton.add_transition(from, to, label.unwrap_or_default())?;
		}

		Ok(automaton)
	}
}
