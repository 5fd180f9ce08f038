//! This library provides the abstract syntax of regular expressions over
//! single-symbol alphabets: six node kinds with simplifying smart
//! constructors, a stack-driven post-order fold, precedence-aware printing
//! and two concrete text syntaxes (infix and reverse Polish). Regular
//! expressions can then be compiled into finite automata using the
//! [`kleene-automata`] library.
//!
//! [`kleene-automata`]: <https://crates.io/crates/kleene-automata>
use replace_with::replace_with_or_abort;
use std::{
	collections::BTreeSet,
	ops::{Add, AddAssign, Mul, MulAssign},
	rc::Rc,
};

mod parsing;
pub use parsing::*;

mod display;
pub use display::*;

mod fold;
pub use fold::*;

/// Regular expression node.
///
/// Binary nodes hold shared handles, never owned copies: the same
/// sub-expression may appear under many parents, forming a DAG. Nodes are
/// immutable once built, so sharing is safe.
#[derive(Debug)]
pub enum Node {
	/// The empty language, printed `0`.
	None,

	/// The language containing only the empty word, printed `1`.
	Empty,

	/// A single symbol.
	Literal(char),

	/// Concatenation, printed by juxtaposition.
	Concat(Regex, Regex),

	/// Alternation, printed `+`.
	Alt(Regex, Regex),

	/// Kleene star, printed as a postfix `*`.
	Star(Regex),
}

impl Node {
	/// Printing precedence: alternation binds loosest, then concatenation;
	/// atoms and the postfix star need no grouping.
	pub fn precedence(&self) -> u8 {
		match self {
			Self::Alt(_, _) => 0,
			Self::Concat(_, _) => 1,
			Self::None | Self::Empty | Self::Literal(_) | Self::Star(_) => 2,
		}
	}
}

/// Shared handle to an immutable regular expression.
///
/// Cloning is cheap (a reference count bump). `Regex` has no `PartialEq`:
/// equality of regular expressions is *language* equality, decided through
/// automata by `kleene::regex_equivalent`. Structural equality is only
/// available on automata.
#[derive(Debug, Clone)]
pub struct Regex(Rc<Node>);

impl Regex {
	/// The empty language `0`.
	pub fn none() -> Self {
		Self(Rc::new(Node::None))
	}

	/// The empty word `1`.
	pub fn empty() -> Self {
		Self(Rc::new(Node::Empty))
	}

	/// A single symbol.
	pub fn literal(symbol: char) -> Self {
		Self(Rc::new(Node::Literal(symbol)))
	}

	pub fn node(&self) -> &Node {
		&self.0
	}

	pub fn precedence(&self) -> u8 {
		self.0.precedence()
	}

	/// Checks if this is the empty language `0`.
	pub fn is_none(&self) -> bool {
		matches!(*self.0, Node::None)
	}

	/// Checks if this is the empty word `1`.
	pub fn is_empty_word(&self) -> bool {
		matches!(*self.0, Node::Empty)
	}

	/// Kleene star.
	///
	/// Iterating `0` or `1` yields `1`; both identities are applied here,
	/// at the build site, because downstream constructions (state
	/// elimination in particular) rely on them to keep absorbed
	/// sub-expressions from reappearing.
	pub fn iterate(self) -> Self {
		if self.is_none() || self.is_empty_word() {
			Self::empty()
		} else {
			Self(Rc::new(Node::Star(self)))
		}
	}

	/// Concatenation. `0` absorbs, `1` is neutral.
	pub fn concat(self, other: Self) -> Self {
		if self.is_none() || other.is_none() {
			Self::none()
		} else if self.is_empty_word() {
			other
		} else if other.is_empty_word() {
			self
		} else {
			Self(Rc::new(Node::Concat(self, other)))
		}
	}

	/// Alternation. `0` is neutral.
	pub fn alt(self, other: Self) -> Self {
		if self.is_none() {
			other
		} else if other.is_none() {
			self
		} else {
			Self(Rc::new(Node::Alt(self, other)))
		}
	}

	/// In-place Kleene star, the destructive form of [`Self::iterate`].
	pub fn iterate_in_place(&mut self) {
		replace_with_or_abort(self, Self::iterate)
	}

	/// Collects every literal symbol appearing in the expression.
	pub fn literals(&self) -> BTreeSet<char> {
		struct Literals(BTreeSet<char>);

		impl Fold for Literals {
			type Output = ();

			fn none(&mut self) {}

			fn empty(&mut self) {}

			fn literal(&mut self, symbol: char) {
				self.0.insert(symbol);
			}

			fn concat(&mut self, _: (), _: ()) {}

			fn alt(&mut self, _: (), _: ()) {}

			fn star(&mut self, _: ()) {}
		}

		let mut literals = Literals(BTreeSet::new());
		self.fold(&mut literals);
		literals.0
	}
}

impl Add for Regex {
	type Output = Self;

	/// Alternation, through the smart constructor.
	fn add(self, other: Self) -> Self {
		self.alt(other)
	}
}

impl AddAssign for Regex {
	fn add_assign(&mut self, other: Self) {
		replace_with_or_abort(self, |this| this.alt(other))
	}
}

impl Mul for Regex {
	type Output = Self;

	/// Concatenation, through the smart constructor.
	fn mul(self, other: Self) -> Self {
		self.concat(other)
	}
}

impl MulAssign for Regex {
	fn mul_assign(&mut self, other: Self) {
		replace_with_or_abort(self, |this| this.concat(other))
	}
}

impl Drop for Regex {
	/// Tears down sole-owned subtrees iteratively. The default recursive
	/// drop would overflow the stack on the deeply nested expressions
	/// state elimination produces.
	fn drop(&mut self) {
		fn steal(handle: &mut Regex, pending: &mut Vec<Node>) {
			if let Some(node) = Rc::get_mut(&mut handle.0) {
				pending.push(std::mem::replace(node, Node::None));
			}
		}

		let mut pending = Vec::new();
		steal(self, &mut pending);

		while let Some(node) = pending.pop() {
			match node {
				Node::Concat(mut first, mut second) | Node::Alt(mut first, mut second) => {
					steal(&mut first, &mut pending);
					steal(&mut second, &mut pending);
				}
				Node::Star(mut inner) => steal(&mut inner, &mut pending),
				Node::None | Node::Empty | Node::Literal(_) => {}
			}
		}
	}
}
