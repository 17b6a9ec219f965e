// Runtime system for glispy
// This module contains the evaluator, scopes, the standard library and the host-value bridge

pub mod error;
pub mod evaluator;
pub mod host_interface;
pub mod host_values;
pub mod scope;
mod stack;
pub mod stdlib;
pub mod values;


pub use error::{RuntimeError, RuntimeResult};
pub use evaluator::Evaluator;
pub use host_interface::{HostConvert, HostRef, HostValue};
pub use host_values::HostMap;
pub use scope::Scope;
pub use values::{Arity, Function};

use crate::ast::{Expression, Symbol};
use crate::config::InterpreterConfig;
use crate::error::GlispyError;
use crate::parser;
use crate::runtime::stdlib::StandardLibrary;
use std::fs;
use std::rc::Rc;
use tracing::debug;

/// An interpreter session: the builtin root scope, a globals scope for user
/// definitions, and the evaluator that runs forms against them.
///
/// Builtins live in a root scope that is fully populated before the first
/// evaluation. Top-level `define`/`defun` write into a child "globals" scope,
/// so user code can shadow a builtin without replacing it.
///
/// An `Interpreter` is single-threaded. Sharing one across entry points that
/// may evaluate concurrently is the caller's responsibility to serialize.
#[derive(Debug)]
pub struct Interpreter {
    evaluator: Evaluator,
    builtins: Rc<Scope>,
    globals: Rc<Scope>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Create an interpreter with the standard library loaded.
    pub fn new() -> Self {
        Self::with_evaluator(Evaluator::default())
    }

    fn with_evaluator(evaluator: Evaluator) -> Self {
        let builtins = StandardLibrary::create_global_environment();
        let globals = Rc::new(Scope::child_of(builtins.clone()));
        Interpreter {
            evaluator,
            builtins,
            globals,
        }
    }

    /// Create an interpreter from configuration, evaluating any prelude files
    /// into the globals scope.
    pub fn from_config(config: &InterpreterConfig) -> Result<Self, GlispyError> {
        let interpreter = Self::with_evaluator(Evaluator::new(config.max_call_depth));
        for path in &config.prelude {
            debug!(path = %path.display(), "loading prelude");
            let source = fs::read_to_string(path).map_err(|error| GlispyError::Prelude {
                path: path.clone(),
                message: error.to_string(),
            })?;
            interpreter.eval_str(&source)?;
        }
        Ok(interpreter)
    }

    /// Evaluate an already-parsed expression in the globals scope.
    ///
    /// The expression is not modified, so the same tree can be evaluated
    /// repeatedly.
    pub fn eval(&self, expr: &Expression) -> RuntimeResult<Expression> {
        self.evaluator.evaluate(expr, &self.globals)
    }

    /// Parse and evaluate every top-level form in `source`, yielding the last
    /// result (the empty list for empty input).
    ///
    /// The whole source is parsed before anything runs. Evaluation stops at
    /// the first failing form; bindings made by earlier forms are kept.
    pub fn eval_str(&self, source: &str) -> Result<Expression, GlispyError> {
        let program = parser::parse_program(source)?;
        let mut last = Expression::empty();
        for form in &program {
            last = self.eval(form)?;
        }
        Ok(last)
    }

    /// Bind a value in the globals scope, e.g. a host record for scripts to use.
    pub fn put(&self, name: &str, value: impl Into<Expression>) {
        self.globals.put(Symbol::new(name), value.into());
    }

    /// Look a name up from the globals scope (falls back to builtins).
    pub fn get(&self, name: &str) -> Option<Expression> {
        self.globals.get(&Symbol::new(name))
    }

    /// Scope user code runs in.
    pub fn scope(&self) -> &Rc<Scope> {
        &self.globals
    }

    /// Read-only root scope holding the builtins.
    pub fn builtins(&self) -> &Rc<Scope> {
        &self.builtins
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }
}
