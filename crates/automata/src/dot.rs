//! Graphviz rendering of automata, for debugging and inspection.
use std::fmt;

use crate::{Automaton, EdgeList};

pub trait DotDisplay {
	fn dot(&self) -> DotDisplayed<Self> {
		DotDisplayed(self)
	}

	fn dot_fmt(&self, f: &mut fmt::Formatter) -> fmt::Result;
}

pub struct DotDisplayed<'a, T: ?Sized>(pub &'a T);

impl<'a, T: ?Sized + DotDisplay> fmt::Display for DotDisplayed<'a, T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.dot_fmt(f)
	}
}

/// Transition label rendering; ε gets its proper glyph instead of an
/// empty edge label.
pub trait DotLabel {
	fn dot_label_fmt(&self, f: &mut fmt::Formatter) -> fmt::Result;
}

impl DotLabel for char {
	fn dot_label_fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		if self.is_ascii_graphic() {
			fmt::Display::fmt(self, f)
		} else {
			write!(f, "\\\\u{{{:x}}}", *self as u32)
		}
	}
}

impl DotLabel for String {
	fn dot_label_fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		if self.is_empty() {
			f.write_str("ε")
		} else {
			for symbol in self.chars() {
				symbol.dot_label_fmt(f)?;
			}

			Ok(())
		}
	}
}

impl<E: EdgeList> DotDisplay for Automaton<E>
where
	E::Label: DotLabel,
{
	fn dot_fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		writeln!(f, "digraph {{")?;
		writeln!(f, "\trankdir = LR")?;

		for state in self.states() {
			let shape = if self.is_accepting(state) {
				"doublecircle"
			} else {
				"circle"
			};
			writeln!(f, "\tq{state} [shape = {shape}]")?;
		}

		writeln!(f, "\tstart [shape = none, label = \"\"]")?;
		writeln!(f, "\tstart -> q{}", self.initial_state())?;

		for state in self.states() {
			for (label, target) in self.transitions_from(state).edges() {
				writeln!(
					f,
					"\tq{state} -> q{target} [label = \"{}\"]",
					DotLabelDisplayed(label)
				)?;
			}
		}

		write!(f, "}}")
	}
}

struct DotLabelDisplayed<'a, T>(&'a T);

impl<'a, T: DotLabel> fmt::Display for DotLabelDisplayed<'a, T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.dot_label_fmt(f)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Nfa;

	#[test]
	fn epsilon_edge_label() {
		let automaton = Nfa::new(2, 0, &[1], &[(0, 1, "")]).unwrap();
		let rendered = automaton.dot().to_string();
		assert!(rendered.contains("q0 -> q1 [label = \"ε\"]"));
		assert!(rendered.contains("q1 [shape = doublecircle]"));
	}
}
