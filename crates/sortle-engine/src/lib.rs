//! Sortle's rewrite engine.
//!
//! The whole of a running Sortle program is an ordered list of named
//! expressions, kept sorted by name. One [`Interpreter::step`] evaluates the
//! expression under the instruction pointer, removes it, and reinserts it
//! under the name it evaluated to; an empty name deletes it, and a name
//! collision replaces the other expression (a clobber). The program halts
//! when exactly one expression remains, and that expression's name is the
//! program's output.
//!
//! `step` is an atomic unit of progress and the engine never assumes it runs
//! to completion, so a debugger front-end can drive it one rewrite at a time
//! and inspect the state between rewrites. [`Interpreter::run`] is the plain
//! loop over `step` that the CLI uses.

use sortle_eval::EvalError;
use thiserror::Error;

mod interp;
mod state;

pub use interp::{Interpreter, StepOutcome};
pub use state::ProgramState;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Errors that abort a run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// Running a program with no expressions at all
    #[error("program must have at least one expression")]
    EmptyProgram,

    /// Two initial expressions share a name
    #[error("duplicate expression name '{name}'")]
    DuplicateName { name: String },

    /// Evaluating the current expression failed
    #[error("{0}")]
    Eval(#[from] EvalError),
}
