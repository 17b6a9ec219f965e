// glispy Evaluator - reduces parsed expressions against a scope

use crate::ast::{Expression, Symbol};
use crate::runtime::error::{RuntimeError, RuntimeResult};
use crate::runtime::scope::Scope;
use crate::runtime::stack::ensure_sufficient_stack;
use crate::runtime::values::{ArgPolicy, Arity, BuiltinFunction, Closure, Function};
use std::cell::Cell;
use std::rc::Rc;
use tracing::trace;

pub const DEFAULT_MAX_CALL_DEPTH: usize = 256;

const IF_SYMBOL: &str = "if";

/// Tree-walking evaluator.
///
/// Evaluation is recursive and single-threaded. Closure calls are counted so
/// that runaway recursion fails with `StackOverflow` instead of exhausting
/// the host stack.
#[derive(Debug)]
pub struct Evaluator {
    call_depth: Cell<usize>,
    max_call_depth: usize,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CALL_DEPTH)
    }
}

/// Restores the call depth on every exit path out of a closure body.
struct CallGuard<'a> {
    depth: &'a Cell<usize>,
}

impl Drop for CallGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get() - 1);
    }
}

impl Evaluator {
    pub fn new(max_call_depth: usize) -> Self {
        Evaluator {
            call_depth: Cell::new(0),
            max_call_depth,
        }
    }

    pub fn max_call_depth(&self) -> usize {
        self.max_call_depth
    }

    pub fn call_depth(&self) -> usize {
        self.call_depth.get()
    }

    /// Evaluate an expression in the given scope.
    pub fn evaluate(&self, expr: &Expression, env: &Rc<Scope>) -> RuntimeResult<Expression> {
        match expr {
            Expression::Number(_) | Expression::String(_) => Ok(expr.clone()),
            Expression::Symbol(sym) => self.eval_symbol(sym, env),
            Expression::List(items) => ensure_sufficient_stack(|| self.eval_list(items, env)),
            Expression::Function(_) | Expression::HostValue(_) => Ok(expr.clone()),
        }
    }

    /// Evaluate an expression and require a number result.
    pub fn evaluate_number(
        &self,
        expr: &Expression,
        env: &Rc<Scope>,
        operation: &str,
    ) -> RuntimeResult<f64> {
        match self.evaluate(expr, env)? {
            Expression::Number(n) => Ok(n),
            other => Err(RuntimeError::expected_number(other.type_name(), operation)),
        }
    }

    fn eval_symbol(&self, sym: &Symbol, env: &Rc<Scope>) -> RuntimeResult<Expression> {
        env.get(sym)
            .ok_or_else(|| RuntimeError::UnboundSymbol(sym.clone()))
    }

    fn eval_list(&self, items: &[Expression], env: &Rc<Scope>) -> RuntimeResult<Expression> {
        match items.first() {
            // `()` evaluates to itself.
            None => Ok(Expression::empty()),
            // A list of lists runs as a sequence.
            Some(Expression::List(_)) => self.eval_sequence(items, env),
            Some(Expression::Symbol(head)) => self.process_list(head, &items[1..], env),
            Some(head) => self.apply(head.clone(), &items[1..], env),
        }
    }

    /// Evaluate every form left to right and yield the last result.
    pub fn eval_sequence(&self, forms: &[Expression], env: &Rc<Scope>) -> RuntimeResult<Expression> {
        let mut last = Expression::empty();
        for form in forms {
            last = self.evaluate(form, env)?;
        }
        Ok(last)
    }

    fn process_list(
        &self,
        head: &Symbol,
        args: &[Expression],
        env: &Rc<Scope>,
    ) -> RuntimeResult<Expression> {
        if head.as_str() == IF_SYMBOL {
            return self.eval_if(args, env);
        }
        let func = self.eval_symbol(head, env)?;
        self.apply(func, args, env)
    }

    fn eval_if(&self, args: &[Expression], env: &Rc<Scope>) -> RuntimeResult<Expression> {
        let [test, consequent, alternate] = args else {
            return Err(RuntimeError::arity(IF_SYMBOL, "3", args.len()));
        };

        let condition = self.evaluate(test, env)?;
        trace!(truthy = condition.is_truthy(), "if");
        if condition.is_truthy() {
            self.evaluate(consequent, env)
        } else {
            self.evaluate(alternate, env)
        }
    }

    fn apply(&self, head: Expression, args: &[Expression], env: &Rc<Scope>) -> RuntimeResult<Expression> {
        let func = match head {
            Expression::Function(func) => func,
            other => {
                return Err(RuntimeError::ExpectedFunction {
                    actual: other.type_name().to_string(),
                })
            }
        };

        match func.arg_policy() {
            ArgPolicy::BindingForm => self.call_function(&func, args, env),
            ArgPolicy::Resolved => {
                let resolved = self.resolve_symbols(args, env)?;
                self.call_function(&func, &resolved, env)
            }
        }
    }

    /// Resolve bare symbol arguments into a fresh vector. The parsed list is
    /// never rewritten, so one tree can be evaluated any number of times.
    fn resolve_symbols(&self, args: &[Expression], env: &Rc<Scope>) -> RuntimeResult<Vec<Expression>> {
        args.iter()
            .map(|arg| match arg {
                Expression::Symbol(sym) => self.eval_symbol(sym, env),
                other => Ok(other.clone()),
            })
            .collect()
    }

    /// Call a function with the caller's scope and its argument list.
    pub fn call_function(
        &self,
        func: &Function,
        args: &[Expression],
        env: &Rc<Scope>,
    ) -> RuntimeResult<Expression> {
        match func {
            Function::Builtin(builtin) => self.call_builtin(builtin, args, env),
            Function::Closure(closure) => self.call_closure(closure, args, env),
        }
    }

    fn call_builtin(
        &self,
        builtin: &BuiltinFunction,
        args: &[Expression],
        env: &Rc<Scope>,
    ) -> RuntimeResult<Expression> {
        if !self.check_arity(&builtin.arity, args.len()) {
            return Err(RuntimeError::arity(
                &builtin.name,
                self.arity_to_string(&builtin.arity),
                args.len(),
            ));
        }
        trace!(function = %builtin.name, argc = args.len(), "call builtin");
        (builtin.func)(args, self, env)
    }

    fn call_closure(
        &self,
        closure: &Closure,
        args: &[Expression],
        env: &Rc<Scope>,
    ) -> RuntimeResult<Expression> {
        let frame = Scope::child_of(closure.env.clone());

        // Arguments are evaluated in the caller's scope, not the closure's.
        let values = args
            .iter()
            .map(|arg| self.evaluate(arg, env))
            .collect::<RuntimeResult<Vec<_>>>()?;

        if values.len() != closure.params.len() {
            let name = closure
                .name
                .as_ref()
                .map(|n| n.to_string())
                .unwrap_or_else(|| "#<closure>".to_string());
            return Err(RuntimeError::arity(
                &name,
                closure.params.len().to_string(),
                values.len(),
            ));
        }

        for (param, value) in closure.params.iter().zip(values) {
            frame.put(param.clone(), value);
        }

        let _guard = self.enter_call()?;
        trace!(
            function = ?closure.name,
            depth = self.call_depth.get(),
            "call closure"
        );
        self.evaluate(&closure.body, &Rc::new(frame))
    }

    fn enter_call(&self) -> RuntimeResult<CallGuard<'_>> {
        let depth = self.call_depth.get();
        if depth >= self.max_call_depth {
            return Err(RuntimeError::StackOverflow {
                limit: self.max_call_depth,
            });
        }
        self.call_depth.set(depth + 1);
        Ok(CallGuard {
            depth: &self.call_depth,
        })
    }

    fn check_arity(&self, arity: &Arity, arg_count: usize) -> bool {
        match arity {
            Arity::Fixed(n) => arg_count == *n,
            Arity::Variadic(n) => arg_count >= *n,
            Arity::Range(min, max) => arg_count >= *min && arg_count <= *max,
        }
    }

    fn arity_to_string(&self, arity: &Arity) -> String {
        match arity {
            Arity::Fixed(n) => n.to_string(),
            Arity::Variadic(n) => format!("at least {}", n),
            Arity::Range(min, max) => format!("{}-{}", min, max),
        }
    }
}
