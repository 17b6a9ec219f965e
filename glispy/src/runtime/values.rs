// Callable values for glispy
// Builtins (native logic) and closures (user-defined functions) share one call contract

use crate::ast::{Expression, Symbol};
use crate::runtime::error::RuntimeResult;
use crate::runtime::evaluator::Evaluator;
use crate::runtime::scope::Scope;
use std::fmt;
use std::rc::Rc;

/// Native builtin logic. Receives the caller's arguments (symbols already
/// resolved unless the builtin is a binding form) and is responsible for
/// evaluating any nested list arguments itself.
pub type BuiltinFn = Rc<dyn Fn(&[Expression], &Evaluator, &Rc<Scope>) -> RuntimeResult<Expression>>;

#[derive(Clone)]
pub enum Function {
    Builtin(BuiltinFunction),
    Closure(Rc<Closure>),
}

impl Function {
    pub fn builtin<F>(name: &str, arity: Arity, func: F) -> Function
    where
        F: Fn(&[Expression], &Evaluator, &Rc<Scope>) -> RuntimeResult<Expression> + 'static,
    {
        Function::Builtin(BuiltinFunction {
            name: name.to_string(),
            arity,
            policy: ArgPolicy::Resolved,
            func: Rc::new(func),
        })
    }

    /// A builtin whose first argument is a literal binding target.
    pub fn binding_form<F>(name: &str, arity: Arity, func: F) -> Function
    where
        F: Fn(&[Expression], &Evaluator, &Rc<Scope>) -> RuntimeResult<Expression> + 'static,
    {
        Function::Builtin(BuiltinFunction {
            name: name.to_string(),
            arity,
            policy: ArgPolicy::BindingForm,
            func: Rc::new(func),
        })
    }

    pub fn new_closure(
        name: Option<Symbol>,
        params: Vec<Symbol>,
        body: Expression,
        env: Rc<Scope>,
    ) -> Function {
        Function::Closure(Rc::new(Closure {
            name,
            params,
            body: Rc::new(body),
            env,
        }))
    }

    pub fn arg_policy(&self) -> ArgPolicy {
        match self {
            Function::Builtin(builtin) => builtin.policy,
            Function::Closure(_) => ArgPolicy::Resolved,
        }
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Function::Builtin(builtin) => write!(f, "{:?}", builtin),
            Function::Closure(closure) => write!(f, "{:?}", closure),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Function::Builtin(builtin) => write!(f, "#<builtin {}>", builtin.name),
            Function::Closure(closure) => match &closure.name {
                Some(name) => write!(f, "#<closure {}>", name),
                None => write!(f, "#<closure>"),
            },
        }
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Function::Builtin(a), Function::Builtin(b)) => a == b,
            (Function::Closure(a), Function::Closure(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// How the evaluator prepares arguments before handing them to a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgPolicy {
    /// Bare symbol arguments are resolved against the caller's scope into a
    /// fresh argument vector. Nested lists are left for the callee.
    Resolved,
    /// Arguments are passed untouched; the first one names a binding target.
    BindingForm,
}

pub struct Closure {
    pub name: Option<Symbol>,
    pub params: Vec<Symbol>,
    pub body: Rc<Expression>,
    pub env: Rc<Scope>,
}

impl fmt::Debug for Closure {
    // The captured scope usually contains this closure, so it is not printed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("body", &self.body)
            .finish()
    }
}

#[derive(Clone)]
pub struct BuiltinFunction {
    pub name: String,
    pub arity: Arity,
    pub policy: ArgPolicy,
    pub func: BuiltinFn,
}

impl fmt::Debug for BuiltinFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltinFunction")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("policy", &self.policy)
            .finish()
    }
}

impl PartialEq for BuiltinFunction {
    fn eq(&self, other: &Self) -> bool {
        // Compare builtin functions by name and arity, not by function pointer
        self.name == other.name && self.arity == other.arity
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Arity {
    Fixed(usize),
    Variadic(usize), // Minimum number of arguments
    Range(usize, usize),
}
