use core::fmt;

use crate::{Fold, Regex};

/// A rendered sub-expression together with the precedence of its root,
/// which decides whether an enclosing operator must parenthesize it.
struct Printed {
	precedence: u8,
	text: String,
}

impl Printed {
	fn atom(text: String) -> Self {
		Self {
			precedence: 2,
			text,
		}
	}

	/// The text as seen by an operator of the given precedence: grouped
	/// exactly when the operator binds tighter than this expression.
	fn under(self, outer: u8) -> String {
		if self.precedence < outer {
			format!("({})", self.text)
		} else {
			self.text
		}
	}
}

struct Printer;

impl Fold for Printer {
	type Output = Printed;

	fn none(&mut self) -> Printed {
		Printed::atom("0".to_owned())
	}

	fn empty(&mut self) -> Printed {
		Printed::atom("1".to_owned())
	}

	fn literal(&mut self, symbol: char) -> Printed {
		Printed::atom(symbol.to_string())
	}

	fn concat(&mut self, first: Printed, second: Printed) -> Printed {
		Printed {
			precedence: 1,
			text: format!("{}{}", first.under(1), second.under(1)),
		}
	}

	fn alt(&mut self, first: Printed, second: Printed) -> Printed {
		Printed {
			precedence: 0,
			text: format!("{}+{}", first.under(0), second.under(0)),
		}
	}

	fn star(&mut self, inner: Printed) -> Printed {
		Printed {
			precedence: 2,
			text: format!("{}*", inner.under(2)),
		}
	}
}

impl fmt::Display for Regex {
	/// Prints with the minimal parenthesization that re-parses to the same
	/// tree. Stack-safe: rendering goes through [`Regex::fold`].
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.fold(&mut Printer).text)
	}
}
