use std::{
	collections::{BTreeMap, BTreeSet, HashMap},
	hash::Hash,
	str::FromStr,
};

use crate::{Automaton, Description, Error, Nfa, StateId};

/// Outgoing transitions of one deterministic state: at most one target per
/// symbol, symbols in ascending order.
pub type DetTransitions = BTreeMap<char, StateId>;

/// Deterministic finite automaton.
pub type Dfa = Automaton<DetTransitions>;

impl Dfa {
	/// Assembles a deterministic automaton from a state count, accepting
	/// state ids and `(from, to, symbol)` transitions.
	pub fn new(
		state_count: usize,
		initial: StateId,
		accepting: &[StateId],
		transitions: &[(StateId, StateId, char)],
	) -> Result<Self, Error> {
		let mut automaton = Self::with_states(state_count, initial);
		for &state in accepting {
			automaton.check_state(state)?;
			automaton.set_accepting(state, true);
		}

		for &(from, to, symbol) in transitions {
			automaton.add_transition(from, to, symbol)?;
		}

		Ok(automaton)
	}

	/// Adds a transition, replacing any previous one on the same symbol.
	pub fn add_transition(
		&mut self,
		from: StateId,
		to: StateId,
		symbol: char,
	) -> Result<(), Error> {
		self.check_state(from)?;
		self.check_state(to)?;
		self.transitions_mut(from).insert(symbol, to);
		Ok(())
	}

	pub fn has_transition(&self, state: StateId, symbol: char) -> bool {
		self.transitions_from(state).contains_key(&symbol)
	}

	pub fn next_state(&self, state: StateId, symbol: char) -> Option<StateId> {
		self.transitions_from(state).get(&symbol).copied()
	}

	/// Walks the input from the initial state; a missing transition
	/// rejects.
	pub fn accepts(&self, input: &str) -> bool {
		if self.state_count() == 0 {
			return false;
		}

		let mut state = self.initial_state();
		for symbol in input.chars() {
			match self.next_state(state, symbol) {
				Some(next) => state = next,
				None => return false,
			}
		}

		self.is_accepting(state)
	}

	/// Every symbol appearing on some transition, in ascending order.
	pub fn alphabet(&self) -> BTreeSet<char> {
		let mut symbols = BTreeSet::new();
		for state in self.states() {
			symbols.extend(self.transitions_from(state).keys());
		}

		symbols
	}

	/// Checks completeness over the automaton's own alphabet: every state
	/// must have a transition on every symbol appearing anywhere.
	pub fn is_complete(&self) -> bool {
		let symbols = self.alphabet();
		self.states()
			.all(|state| self.transitions_from(state).len() == symbols.len())
	}

	/// Completes the automaton in place over the union of the given
	/// alphabet and every symbol already present, routing all missing
	/// transitions to one fresh sink state.
	pub fn make_complete(&mut self, alphabet: &[char]) {
		let mut symbols: BTreeSet<char> = alphabet.iter().copied().collect();
		symbols.extend(self.alphabet());

		let sink = self.add_state();
		for state in self.states() {
			for &symbol in &symbols {
				if !self.has_transition(state, symbol) {
					self.transitions_mut(state).insert(symbol, sink);
				}
			}
		}
	}

	/// Flips every acceptance bit in place. The automaton must be
	/// [complete](Self::is_complete), otherwise the complement would also
	/// accept words it merely fails to read.
	pub fn complement(&mut self) -> Result<(), Error> {
		if !self.is_complete() {
			return Err(Error::NotCompleteForComplement);
		}

		for state in self.states() {
			let accepting = self.is_accepting(state);
			self.set_accepting(state, !accepting);
		}

		Ok(())
	}

	/// Merges indistinguishable states by iterated partition refinement.
	///
	/// The refinement signature reads, for every state, the classes of its
	/// successors on the symbols of state 0; the automaton must therefore
	/// be complete ([`Error::NotCompleteForMinimize`]). Classes of the
	/// result are numbered in first-seen order of their lowest member, and
	/// unreachable states are kept, folded into whatever class their
	/// signature puts them in.
	pub fn minimize(&self) -> Result<Self, Error> {
		let symbols: Vec<char> = if self.state_count() == 0 {
			Vec::new()
		} else {
			self.transitions_from(0).keys().copied().collect()
		};

		for state in self.states() {
			let transitions = self.transitions_from(state);
			if transitions.len() != symbols.len()
				|| !symbols.iter().all(|symbol| transitions.contains_key(symbol))
			{
				return Err(Error::NotCompleteForMinimize);
			}
		}

		Ok(self.minimize_complete(&symbols))
	}

	/// Minimization core, assuming every state covers exactly `symbols`.
	fn minimize_complete(&self, symbols: &[char]) -> Self {
		if self.state_count() == 0 {
			return self.clone();
		}

		let mut classes = number_by_first_seen(self.states().map(|state| self.is_accepting(state)));
		loop {
			let refined = number_by_first_seen(self.states().map(|state| {
				let successors: Vec<usize> = symbols
					.iter()
					.map(|symbol| classes[self.transitions_from(state)[symbol]])
					.collect();
				(classes[state], successors)
			}));

			if refined == classes {
				break;
			}

			classes = refined;
		}

		let class_count = classes.iter().max().map_or(0, |&max| max + 1);
		let mut minimized = Self::with_states(class_count, classes[self.initial_state()]);
		for state in self.states() {
			let class = classes[state];
			if self.is_accepting(state) {
				minimized.set_accepting(class, true);
			}

			for (&symbol, &target) in self.transitions_from(state) {
				minimized.transitions_mut(class).insert(symbol, classes[target]);
			}
		}

		minimized
	}

	/// Product construction: state `(p, q)` gets id
	/// `p * other.state_count() + q`, and a transition exists on a symbol
	/// exactly when both factors have one. Accepts the intersection of the
	/// two languages.
	pub fn intersection(&self, other: &Self) -> Self {
		let width = other.state_count();
		let mut product = Self::with_states(
			self.state_count() * width,
			self.initial_state() * width + other.initial_state(),
		);

		for p in self.states() {
			for q in other.states() {
				let id = p * width + q;
				if self.is_accepting(p) && other.is_accepting(q) {
					product.set_accepting(id, true);
				}

				for (&symbol, &p_target) in self.transitions_from(p) {
					if let Some(q_target) = other.next_state(q, symbol) {
						product
							.transitions_mut(id)
							.insert(symbol, p_target * width + q_target);
					}
				}
			}
		}

		product
	}

	/// Checks for a bijection between the reachable parts of the two
	/// automata preserving the initial state, acceptance and every
	/// transition, by a parallel depth-first traversal from both initial
	/// states.
	pub fn is_isomorphic(&self, other: &Self) -> bool {
		if self.state_count() == 0 || other.state_count() == 0 {
			return self.state_count() == other.state_count();
		}

		let mut forward = HashMap::new();
		let mut backward = HashMap::new();
		forward.insert(self.initial_state(), other.initial_state());
		backward.insert(other.initial_state(), self.initial_state());
		let mut to_process = vec![(self.initial_state(), other.initial_state())];

		while let Some((p, q)) = to_process.pop() {
			if self.is_accepting(p) != other.is_accepting(q) {
				return false;
			}

			let p_transitions = self.transitions_from(p);
			let q_transitions = other.transitions_from(q);
			if p_transitions.len() != q_transitions.len() {
				return false;
			}

			for (&symbol, &p_target) in p_transitions {
				let Some(&q_target) = q_transitions.get(&symbol) else {
					return false;
				};

				match forward.get(&p_target) {
					Some(&mapped) => {
						if mapped != q_target {
							return false;
						}
					}
					None => {
						if backward.contains_key(&q_target) {
							return false;
						}

						forward.insert(p_target, q_target);
						backward.insert(q_target, p_target);
						to_process.push((p_target, q_target));
					}
				}
			}
		}

		true
	}

	/// Language equality: both automata are completed over their own
	/// alphabets, minimized, and compared for isomorphism.
	pub fn is_equivalent(&self, other: &Self) -> bool {
		let mut this = self.clone();
		this.make_complete(&[]);
		let mut that = other.clone();
		that.make_complete(&[]);

		let this_symbols: Vec<char> = this.alphabet().into_iter().collect();
		let that_symbols: Vec<char> = that.alphabet().into_iter().collect();
		this.minimize_complete(&this_symbols)
			.is_isomorphic(&that.minimize_complete(&that_symbols))
	}

	/// Reinterprets the automaton as a nondeterministic one with
	/// single-symbol labels.
	pub fn to_nondeterministic(&self) -> Nfa {
		let mut nfa = Nfa::with_states(self.state_count(), self.initial_state());
		for state in self.states() {
			if self.is_accepting(state) {
				nfa.set_accepting(state, true);
			}
		}

		self.for_each_transition(|from, to, &symbol| {
			nfa.push_transition(from, to, symbol.to_string());
		});

		nfa
	}
}

/// Numbers the items of a sequence by their key: equal keys share a
/// number, and numbers increase in order of first appearance.
fn number_by_first_seen<K: Eq + Hash>(keys: impl Iterator<Item = K>) -> Vec<usize> {
	let mut numbering = HashMap::new();
	keys.map(|key| {
		let next = numbering.len();
		*numbering.entry(key).or_insert(next)
	})
	.collect()
}

impl FromStr for Dfa {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let description = Description::parse(s)?;
		let mut automaton = Self::with_states(description.state_count, description.initial);
		for state in description.accepting {
			automaton.set_accepting(state, true);
		}

		for (from, to, label) in description.transitions {
			let mut symbols = label.unwrap_or_default().chars();
			let (Some(symbol), None) = (symbols.next(), symbols.next()) else {
				return Err(Error::InvalidInput(format!(
					"transition {from} -> {to} must be labelled by a single symbol"
				)));
			};

			automaton.add_transition(from, to, symbol)?;
		}

		Ok(automaton)
	}
}
