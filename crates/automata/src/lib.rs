//! This library provides nondeterministic ([`Nfa`]) and deterministic
//! ([`Dfa`]) finite automata over single-symbol alphabets, together with
//! the classical constructions on them: ε-removal, subset-construction
//! determinization, completion, complement, partition-refinement
//! minimization, product intersection and isomorphism checking. It is used
//! by the [`kleene`] crate to convert between automata and regular
//! expressions.
//!
//! [`kleene`]: <https://crates.io/crates/kleene>
use std::{collections::BTreeMap, fmt, ops::Range};

pub mod dfa;
pub use dfa::Dfa;

pub mod nfa;
pub use nfa::Nfa;

pub mod dot;

/// Dense automaton state identifier, valid within a single automaton.
pub type StateId = usize;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid input: {0}")]
	InvalidInput(String),

	#[error("Invalid state index {0}")]
	InvalidStateIndex(StateId),

	#[error("Transition label is not a single symbol")]
	NotSingleLetter,

	#[error("Automaton must be complete to be complemented")]
	NotCompleteForComplement,

	#[error("Automaton must be complete to be minimized")]
	NotCompleteForMinimize,

	#[error("More than one accepting state")]
	MultipleAcceptingStates,

	#[error("Transition label longer than one symbol")]
	BadTransitionLabelLength,

	#[error("Sizes of accepting states and transitions differ")]
	SizesDiffer,
}

/// Per-state container of outgoing transitions.
///
/// The two implementations define the two automaton flavours: a keyed map
/// of single symbols for [`Dfa`], an ordered list of string labels
/// (possibly empty, possibly several symbols long) for [`Nfa`].
pub trait EdgeList: Default {
	type Label;

	fn edges(&self) -> impl Iterator<Item = (&Self::Label, StateId)>;
}

impl EdgeList for BTreeMap<char, StateId> {
	type Label = char;

	fn edges(&self) -> impl Iterator<Item = (&char, StateId)> {
		self.iter().map(|(symbol, &target)| (symbol, target))
	}
}

impl EdgeList for Vec<(String, StateId)> {
	type Label = String;

	fn edges(&self) -> impl Iterator<Item = (&String, StateId)> {
		self.iter().map(|(label, target)| (label, *target))
	}
}

/// Finite automaton over a dense state space.
///
/// States are identified by `0..state_count`; ids are stable for the
/// lifetime of the automaton. The flavour of the automaton is decided by
/// the per-state transition container `E`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton<E> {
	initial: StateId,
	accepting: Vec<bool>,
	transitions: Vec<E>,
}

impl<E: EdgeList> Automaton<E> {
	/// Creates an automaton with the given number of states, none of them
	/// accepting, and no transitions.
	pub fn with_states(state_count: usize, initial: StateId) -> Self {
		Self {
			initial,
			accepting: vec![false; state_count],
			transitions: std::iter::repeat_with(E::default).take(state_count).collect(),
		}
	}

	/// Assembles an automaton from its parts.
	pub fn from_parts(
		initial: StateId,
		accepting: Vec<bool>,
		transitions: Vec<E>,
	) -> Result<Self, Error> {
		if accepting.len() != transitions.len() {
			return Err(Error::SizesDiffer);
		}

		Ok(Self {
			initial,
			accepting,
			transitions,
		})
	}

	pub fn state_count(&self) -> usize {
		self.accepting.len()
	}

	/// Iterates over all state ids in ascending order.
	pub fn states(&self) -> Range<StateId> {
		0..self.state_count()
	}

	pub fn initial_state(&self) -> StateId {
		self.initial
	}

	pub fn set_initial_state(&mut self, state: StateId) {
		self.initial = state;
	}

	/// Appends a fresh non-accepting state and returns its id.
	pub fn add_state(&mut self) -> StateId {
		self.accepting.push(false);
		self.transitions.push(E::default());
		self.state_count() - 1
	}

	pub fn is_accepting(&self, state: StateId) -> bool {
		self.accepting[state]
	}

	pub fn set_accepting(&mut self, state: StateId, accepting: bool) {
		self.accepting[state] = accepting;
	}

	/// The acceptance bit of every state, indexed by state id.
	pub fn accepting(&self) -> &[bool] {
		&self.accepting
	}

	/// Iterates over the accepting state ids in ascending order.
	pub fn accepting_states(&self) -> impl Iterator<Item = StateId> + '_ {
		self.states().filter(|&state| self.accepting[state])
	}

	/// Returns the only accepting state, `None` if there is none.
	pub fn single_accepting_state(&self) -> Result<Option<StateId>, Error> {
		let mut accepting = self.accepting_states();
		let first = accepting.next();
		if accepting.next().is_some() {
			return Err(Error::MultipleAcceptingStates);
		}

		Ok(first)
	}

	/// Outgoing transitions of the given state.
	pub fn transitions_from(&self, state: StateId) -> &E {
		&self.transitions[state]
	}

	/// Calls `f` with `(from, to, label)` for every transition, states in
	/// ascending order.
	pub fn for_each_transition(&self, mut f: impl FnMut(StateId, StateId, &E::Label)) {
		for state in self.states() {
			for (label, target) in self.transitions[state].edges() {
				f(state, target, label);
			}
		}
	}

	/// States reachable from the initial state, in ascending id order.
	pub fn reachable_states(&self) -> Vec<StateId> {
		let mut reachable = vec![false; self.state_count()];
		if self.state_count() == 0 {
			return Vec::new();
		}

		reachable[self.initial] = true;
		let mut to_process = vec![self.initial];
		while let Some(state) = to_process.pop() {
			for (_, target) in self.transitions[state].edges() {
				if !reachable[target] {
					reachable[target] = true;
					to_process.push(target);
				}
			}
		}

		self.states().filter(|&state| reachable[state]).collect()
	}

	pub(crate) fn check_state(&self, state: StateId) -> Result<(), Error> {
		if state < self.state_count() {
			Ok(())
		} else {
			Err(Error::InvalidStateIndex(state))
		}
	}

	pub(crate) fn transitions_mut(&mut self, state: StateId) -> &mut E {
		&mut self.transitions[state]
	}

	pub(crate) fn into_transitions(self) -> Vec<E> {
		self.transitions
	}
}

impl<E: EdgeList> fmt::Display for Automaton<E>
where
	E::Label: fmt::Display,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "{} states", self.state_count())?;
		writeln!(f, "Initial state: {}", self.initial)?;
		for state in self.states() {
			write!(f, "State {state}")?;
			if self.is_accepting(state) {
				write!(f, " (accepting)")?;
			}
			writeln!(f, ":")?;
			for (label, target) in self.transitions[state].edges() {
				writeln!(f, "  to {target} by {label}")?;
			}
		}

		Ok(())
	}
}

/// A textual automaton description, common to both flavours.
///
/// ```text
/// <state_count> <initial>
/// <accepting state ids>
/// <from> <to> <label>
/// ...
/// ```
///
/// A blank line (or the end of input) terminates the transition list; the
/// label may be absent, which the [`Nfa`] parser reads as ε.
pub(crate) struct Description<'a> {
	pub state_count: usize,
	pub initial: StateId,
	pub accepting: Vec<StateId>,
	pub transitions: Vec<(StateId, StateId, Option<&'a str>)>,
}

impl<'a> Description<'a> {
	pub fn parse(input: &'a str) -> Result<Self, Error> {
		fn number(token: &str) -> Result<usize, Error> {
			token
				.parse()
				.map_err(|_| Error::InvalidInput(format!("expected a number, found `{token}`")))
		}

		let mut lines = input.lines();

		let header = lines
			.next()
			.ok_or_else(|| Error::InvalidInput("missing automaton header".to_owned()))?;
		let mut header = header.split_whitespace();
		let state_count = number(header.next().ok_or_else(|| {
			Error::InvalidInput("expected `<state count> <initial state>`".to_owned())
		})?)?;
		let initial = number(header.next().ok_or_else(|| {
			Error::InvalidInput("expected `<state count> <initial state>`".to_owned())
		})?)?;
		if header.next().is_some() {
			return Err(Error::InvalidInput(
				"unexpected token after automaton header".to_owned(),
			));
		}

		let accepting = lines
			.next()
			.map(|line| line.split_whitespace().map(number).collect())
			.transpose()?
			.unwrap_or_default();

		let mut transitions = Vec::new();
		for line in lines {
			if line.trim().is_empty() {
				break;
			}

			let mut tokens = line.split_whitespace();
			let from = number(tokens.next().ok_or_else(|| {
				Error::InvalidInput("expected `<from> <to> <label>`".to_owned())
			})?)?;
			let to = number(tokens.next().ok_or_else(|| {
				Error::InvalidInput("expected `<from> <to> <label>`".to_owned())
			})?)?;
			let label = tokens.next();
			if tokens.next().is_some() {
				return Err(Error::InvalidInput(
					"unexpected token after transition".to_owned(),
				));
			}

			transitions.push((from, to, label));
		}

		if state_count > 0 && initial >= state_count {
			return Err(Error::InvalidInput(format!(
				"initial state {initial} out of range"
			)));
		}
		for &state in &accepting {
			if state >= state_count {
				return Err(Error::InvalidInput(format!(
					"accepting state {state} out of range"
				)));
			}
		}

		Ok(Self {
			state_count,
			initial,
			accepting,
			transitions,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn add_accepting_state() {
		let mut automaton = Dfa::with_states(3, 1);
		automaton.set_accepting(0, true);
		automaton.set_accepting(1, true);
		assert_eq!(automaton.accepting(), [true, true, false]);
	}

	#[test]
	fn remove_accepting_state() {
		let mut automaton = Dfa::with_states(3, 1);
		automaton.set_accepting(0, true);
		automaton.set_accepting(1, true);
		automaton.set_accepting(1, false);
		assert_eq!(automaton.accepting(), [true, false, false]);
	}

	#[test]
	fn sizes_must_agree() {
		assert!(matches!(
			Nfa::from_parts(0, vec![false; 2], vec![Vec::new(); 3]),
			Err(Error::SizesDiffer)
		));
	}

	#[test]
	fn single_accepting_state() {
		let mut automaton = Nfa::with_states(3, 0);
		assert!(matches!(automaton.single_accepting_state(), Ok(None)));
		automaton.set_accepting(1, true);
		assert!(matches!(automaton.single_accepting_state(), Ok(Some(1))));
		automaton.set_accepting(2, true);
		assert!(matches!(
			automaton.single_accepting_state(),
			Err(Error::MultipleAcceptingStates)
		));
	}

	#[test]
	fn reachable_states() {
		let mut automaton = Nfa::with_states(4, 0);
		automaton.add_transition(0, 2, "a").unwrap();
		automaton.add_transition(2, 0, "b").unwrap();
		automaton.add_transition(3, 1, "a").unwrap();
		assert_eq!(automaton.reachable_states(), [0, 2]);
	}

	#[test]
	fn print_automaton() {
		let automaton = Dfa::new(3, 1, &[0, 2], &[(1, 2, 'a'), (1, 0, 'b')]).unwrap();
		let expected = "3 states\nInitial state: 1\nState 0 (accepting):\nState 1:\n  to 2 by a\n  to 0 by b\nState 2 (accepting):\n";
		assert_eq!(automaton.to_string(), expected);
	}
}
