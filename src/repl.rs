//! Line-oriented interactive front-end.
//!
//! Each command operates on an indexed registry of objects (regular
//! expressions, nondeterministic and deterministic automata) and prints
//! the id of any object it creates. A failed command prints a one-line
//! diagnostic and leaves the registry untouched.
use std::io::{self, BufRead, Write};

use anyhow::{anyhow, bail, Context, Result};
use tracing::debug;

use crate::{
	nfa_from_regex, nfa_to_regex, regex_complement, regex_to_mcdfa, Dfa, Nfa, Regex,
};

/// A registry entry.
pub enum Object {
	Regex(Regex),
	Nfa(Nfa),
	Dfa(Dfa),
}

impl Object {
	fn kind(&self) -> &'static str {
		match self {
			Self::Regex(_) => "regex",
			Self::Nfa(_) => "nondeterministic automaton",
			Self::Dfa(_) => "deterministic automaton",
		}
	}
}

#[derive(Default)]
pub struct Repl {
	objects: Vec<Object>,
}

impl Repl {
	pub fn new() -> Self {
		Self::default()
	}

	/// Reads commands from `input` until end of file, writing every
	/// response to `output`. Only I/O failures abort the loop.
	pub fn run(&mut self, input: impl BufRead, mut output: impl Write) -> io::Result<()> {
		let mut lines = input.lines();
		while let Some(line) = lines.next() {
			let line = line?;
			if line.trim().is_empty() {
				continue;
			}

			debug!(command = %line, "executing");
			if let Err(error) = self.execute(&line, &mut lines, &mut output) {
				writeln!(output, "{error}")?;
			}
		}

		Ok(())
	}

	fn execute(
		&mut self,
		line: &str,
		lines: &mut impl Iterator<Item = io::Result<String>>,
		output: &mut impl Write,
	) -> Result<()> {
		let mut args = line.split_whitespace();
		let command = args.next().unwrap_or_default();

		match command {
			"regex" => {
				let pattern = next_line(lines)?
					.ok_or_else(|| anyhow!("Expected a regex on the next line"))?;
				let regex = Regex::parse(pattern.trim())?;
				self.add_object(Object::Regex(regex), output)?;
			}
			"automaton" => {
				let mut description = String::new();
				while let Some(line) = next_line(lines)? {
					if line.trim().is_empty() {
						break;
					}

					description.push_str(&line);
					description.push('\n');
				}

				let automaton: Nfa = description.parse()?;
				self.add_object(Object::Nfa(automaton), output)?;
			}
			"add_state" => {
				let id = parse_id(&mut args)?;
				let state = match self.get_mut(id)? {
					Object::Nfa(automaton) => automaton.add_state(),
					Object::Dfa(automaton) => automaton.add_state(),
					object => bail!("Cannot add a state to a {}", object.kind()),
				};
				writeln!(output, "State: {state}")?;
			}
			"add_transition" => {
				let id = parse_id(&mut args)?;
				let from = parse_id(&mut args)?;
				let to = parse_id(&mut args)?;
				let label = args.next();
				match self.get_mut(id)? {
					Object::Nfa(automaton) => {
						automaton.add_transition(from, to, label.unwrap_or_default())?
					}
					Object::Dfa(automaton) => {
						let symbol = single_symbol(label)?;
						automaton.add_transition(from, to, symbol)?
					}
					object => bail!("Cannot add a transition to a {}", object.kind()),
				}
			}
			"set_accepting" => {
				let id = parse_id(&mut args)?;
				let state = parse_id(&mut args)?;
				let value = match args.next() {
					None | Some("1") => true,
					Some("0") => false,
					Some(other) => bail!("Expected 0 or 1, found `{other}`"),
				};
				match self.get_mut(id)? {
					Object::Nfa(automaton) => {
						check_state(state, automaton.state_count())?;
						automaton.set_accepting(state, value);
					}
					Object::Dfa(automaton) => {
						check_state(state, automaton.state_count())?;
						automaton.set_accepting(state, value);
					}
					object => bail!("Cannot mark a state of a {}", object.kind()),
				}
			}
			"print" => {
				let id = parse_id(&mut args)?;
				match self.get(id)? {
					Object::Regex(regex) => writeln!(output, "{regex}")?,
					Object::Nfa(automaton) => write!(output, "{automaton}")?,
					Object::Dfa(automaton) => write!(output, "{automaton}")?,
				}
			}
			"minimize" => {
				let id = parse_id(&mut args)?;
				let minimized = self.get_dfa(id)?.minimize()?;
				self.add_object(Object::Dfa(minimized), output)?;
			}
			"to_complete" => {
				let id = parse_id(&mut args)?;
				let alphabet = parse_alphabet(&mut args)?;
				let mut completed = self.get_dfa(id)?.clone();
				completed.make_complete(&alphabet);
				self.add_object(Object::Dfa(completed), output)?;
			}
			"determinize" => {
				let id = parse_id(&mut args)?;
				let determinized = self.get_nfa(id)?.determinize()?;
				self.add_object(Object::Dfa(determinized), output)?;
			}
			"complement" => {
				let id = parse_id(&mut args)?;
				let alphabet = parse_alphabet(&mut args)?;
				let complemented = match self.get(id)? {
					Object::Regex(regex) => Object::Regex(regex_complement(regex, &alphabet)?),
					Object::Dfa(automaton) => {
						let mut complemented = automaton.clone();
						complemented.make_complete(&alphabet);
						complemented.complement()?;
						Object::Dfa(complemented)
					}
					object => bail!(
						"Cannot complement a {}; determinize it first",
						object.kind()
					),
				};
				self.add_object(complemented, output)?;
			}
			"intersection" => {
				let first = parse_id(&mut args)?;
				let second = parse_id(&mut args)?;
				let product = self.to_dfa(first)?.intersection(&self.to_dfa(second)?);
				self.add_object(Object::Dfa(product), output)?;
			}
			"to_regex" => {
				let id = parse_id(&mut args)?;
				let automaton = self.get_nfa(id)?;
				let regex = match automaton.single_accepting_state() {
					Ok(_) => nfa_to_regex(automaton)?,
					Err(_) => {
						let mut single = automaton.clone();
						single.make_single_accepting();
						nfa_to_regex(&single)?
					}
				};
				self.add_object(Object::Regex(regex), output)?;
			}
			"to_nfa" => {
				let id = parse_id(&mut args)?;
				let automaton = self.to_nfa(id)?;
				self.add_object(Object::Nfa(automaton), output)?;
			}
			"to_mcdfa" => {
				let id = parse_id(&mut args)?;
				let alphabet = parse_alphabet(&mut args)?;
				let automaton = regex_to_mcdfa(self.get_regex(id)?, &alphabet)?;
				self.add_object(Object::Dfa(automaton), output)?;
			}
			"equivalence" => {
				let first = parse_id(&mut args)?;
				let second = parse_id(&mut args)?;
				if self.to_dfa(first)?.is_equivalent(&self.to_dfa(second)?) {
					writeln!(output, "equivalent")?;
				} else {
					writeln!(output, "not equivalent")?;
				}
			}
			unknown => writeln!(output, "Unknown command {unknown}")?,
		}

		Ok(())
	}

	fn add_object(&mut self, object: Object, output: &mut impl Write) -> Result<()> {
		let id = self.objects.len();
		writeln!(output, "Id: {id}")?;
		self.objects.push(object);
		Ok(())
	}

	fn get(&self, id: usize) -> Result<&Object> {
		self.objects
			.get(id)
			.ok_or_else(|| anyhow!("No object with id {id}"))
	}

	fn get_mut(&mut self, id: usize) -> Result<&mut Object> {
		self.objects
			.get_mut(id)
			.ok_or_else(|| anyhow!("No object with id {id}"))
	}

	fn get_regex(&self, id: usize) -> Result<&Regex> {
		match self.get(id)? {
			Object::Regex(regex) => Ok(regex),
			object => bail!("Object {id} is a {}, expected a regex", object.kind()),
		}
	}

	fn get_nfa(&self, id: usize) -> Result<&Nfa> {
		match self.get(id)? {
			Object::Nfa(automaton) => Ok(automaton),
			object => bail!(
				"Object {id} is a {}, expected a nondeterministic automaton",
				object.kind()
			),
		}
	}

	fn get_dfa(&self, id: usize) -> Result<&Dfa> {
		match self.get(id)? {
			Object::Dfa(automaton) => Ok(automaton),
			object => bail!(
				"Object {id} is a {}, expected a deterministic automaton",
				object.kind()
			),
		}
	}

	/// Coerces any registry object to a deterministic automaton.
	fn to_dfa(&self, id: usize) -> Result<Dfa> {
		match self.get(id)? {
			Object::Regex(regex) => Ok(nfa_from_regex(regex).determinize()?),
			Object::Nfa(automaton) => Ok(automaton.determinize()?),
			Object::Dfa(automaton) => Ok(automaton.clone()),
		}
	}

	/// Coerces any registry object to a nondeterministic automaton.
	fn to_nfa(&self, id: usize) -> Result<Nfa> {
		match self.get(id)? {
			Object::Regex(regex) => Ok(nfa_from_regex(regex)),
			Object::Nfa(automaton) => Ok(automaton.clone()),
			Object::Dfa(automaton) => Ok(automaton.to_nondeterministic()),
		}
	}
}

fn next_line(lines: &mut impl Iterator<Item = io::Result<String>>) -> Result<Option<String>> {
	lines
		.next()
		.transpose()
		.context("Failed to read the next line")
}

fn parse_id<'a>(args: &mut impl Iterator<Item = &'a str>) -> Result<usize> {
	let token = args
		.next()
		.ok_or_else(|| anyhow!("Expected a numeric argument"))?;
	token
		.parse()
		.map_err(|_| anyhow!("Expected a number, found `{token}`"))
}

fn parse_alphabet<'a>(args: &mut impl Iterator<Item = &'a str>) -> Result<Vec<char>> {
	Ok(args.next().unwrap_or_default().chars().collect())
}

fn single_symbol(label: Option<&str>) -> Result<char> {
	let label = label.ok_or_else(|| anyhow!("Expected a transition symbol"))?;
	let mut symbols = label.chars();
	match (symbols.next(), symbols.next()) {
		(Some(symbol), None) => Ok(symbol),
		_ => bail!("Expected a single transition symbol, found `{label}`"),
	}
}

fn check_state(state: usize, state_count: usize) -> Result<()> {
	if state < state_count {
		Ok(())
	} else {
		bail!("Invalid state index {state}")
	}
}
