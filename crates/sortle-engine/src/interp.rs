//! Step-wise rewriting of the program state.

use sortle_ast::Expression;
use sortle_eval::{MatchContext, evaluate};
use sortle_regex::{Pattern, RegexError};
use tracing::debug;

use crate::{ProgramState, Result};

/// What a single rewrite did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The expression took a fresh name and was reinserted
    Renamed { old: String, new: String },
    /// The new name collided with another entry, which was replaced
    Clobbered { old: String, new: String },
    /// The expression evaluated to the empty name and was removed
    Deleted { old: String },
    /// Only one expression remains; nothing was done
    Halted,
}

/// Drives a program state one rewrite at a time.
///
/// The interpreter owns the state and the instruction pointer. Front-ends
/// that want to animate or debug a program call [`Interpreter::step`] in
/// their own loop and read the state between calls; [`Interpreter::run`]
/// just loops until the program halts.
pub struct Interpreter {
    state: ProgramState,
    ip: usize,
}

impl Interpreter {
    /// Start interpreting at the first expression.
    pub fn new(state: ProgramState) -> Self {
        Interpreter { state, ip: 0 }
    }

    /// The current program state.
    pub fn state(&self) -> &ProgramState {
        &self.state
    }

    /// Index of the next expression to evaluate.
    pub fn ip(&self) -> usize {
        self.ip
    }

    /// True once the program has terminated.
    pub fn is_halted(&self) -> bool {
        self.state.len() == 1
    }

    /// The program's output: the last name standing, once halted.
    pub fn output(&self) -> Option<&str> {
        if self.is_halted() {
            self.state.entries().first().map(|e| e.name.as_str())
        } else {
            None
        }
    }

    /// Run to termination, returning the surviving expression's name.
    ///
    /// A program that starts with a single expression terminates at once
    /// without evaluating it. Divergent programs never return; callers that
    /// need a bound drive [`Interpreter::step`] themselves.
    pub fn run(&mut self) -> Result<String> {
        while !self.is_halted() {
            self.step()?;
        }
        // construction rejects empty programs and deletion stops at one
        // entry, so a halted state always has an output
        match self.output() {
            Some(name) => Ok(name.to_string()),
            None => Err(crate::RuntimeError::EmptyProgram),
        }
    }

    /// Perform exactly one rewrite.
    ///
    /// Evaluates the expression under the instruction pointer, removes it,
    /// and reinserts it under its new name; the empty name deletes it
    /// instead. After a reinsertion the pointer moves to the entry after
    /// the landing position; after a deletion it stays put, now addressing
    /// what used to be the next entry. Either way it wraps to the front
    /// when it falls off the end. On a halted program this is a no-op that
    /// reports [`StepOutcome::Halted`].
    pub fn step(&mut self) -> Result<StepOutcome> {
        if self.is_halted() {
            return Ok(StepOutcome::Halted);
        }

        let current = &self.state.entries()[self.ip];
        let scope = SearchScope { entries: self.state.entries(), skip: self.ip };
        let value = evaluate(&current.terms, &scope)?;
        let new_name = value.to_name();

        let old = self.state.remove(self.ip);
        let outcome = if new_name.is_empty() {
            StepOutcome::Deleted { old: old.name }
        } else {
            let entry = Expression::new(new_name.clone(), old.terms);
            let (index, clobbered) = self.state.reinsert(entry);
            self.ip = index + 1;
            if clobbered {
                StepOutcome::Clobbered { old: old.name, new: new_name }
            } else {
                StepOutcome::Renamed { old: old.name, new: new_name }
            }
        };
        if self.ip >= self.state.len() {
            self.ip = 0;
        }
        debug!(?outcome, ip = self.ip, remaining = self.state.len(), "rewrite");
        Ok(outcome)
    }
}

/// Candidate view for the `?` operator.
///
/// Names are tried in reverse sort order starting with the entry just
/// before the evaluating expression, wrapping over the top of the list; the
/// evaluating expression itself is excluded. Since the list is sorted, the
/// two reversed halves produce exactly that order.
struct SearchScope<'a> {
    entries: &'a [Expression],
    skip: usize,
}

impl MatchContext for SearchScope<'_> {
    fn search(&self, pattern: &str) -> std::result::Result<String, RegexError> {
        let compiled = Pattern::compile(pattern)?;
        let before = self.entries[..self.skip].iter().rev();
        let after = self.entries[self.skip + 1..].iter().rev();
        Ok(compiled.find_first(before.chain(after).map(|e| e.name.as_str())))
    }
}
