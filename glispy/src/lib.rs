//! glispy: a small Lisp-like expression evaluator meant to be embedded in a
//! host program.
//!
//! ```
//! use glispy::Interpreter;
//!
//! let interp = Interpreter::new();
//! let result = interp.eval_str("(defun square (x) (* x x)) (square 12)").unwrap();
//! assert_eq!(result.as_number(), Some(144.0));
//! ```

pub mod ast;
pub mod config;
pub mod error;
pub mod input_handling;
pub mod parser;
pub mod runtime;

pub use ast::{Expression, Symbol};
pub use config::{ConfigError, InterpreterConfig};
pub use error::GlispyError;
pub use parser::{parse_expression, parse_program, ParseError};
pub use runtime::{HostConvert, HostMap, HostRef, HostValue, Interpreter, RuntimeError, RuntimeResult};
