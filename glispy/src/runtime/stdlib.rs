//! glispy Standard Library
//!
//! Builtins registered into the root scope before any evaluation begins:
//! - Arithmetic functions (`+ - * / sqrt`) and the `pi` constant
//! - Comparison functions (`> < = >= <=`)
//! - Sequencing and output (`begin`, `println`)
//! - Binding forms (`define`, `defun`)
//! - Host-value bridge (`make-hash-map`, `set-value`, `get-value`)
//!
//! Builtins receive their arguments with bare symbols already resolved (binding
//! forms receive them untouched) and reduce nested lists themselves.

use crate::ast::{Expression, Symbol};
use crate::runtime::error::{RuntimeError, RuntimeResult};
use crate::runtime::evaluator::Evaluator;
use crate::runtime::host_interface::HostRef;
use crate::runtime::host_values::HostMap;
use crate::runtime::scope::Scope;
use crate::runtime::values::{Arity, Function};
use std::rc::Rc;
use tracing::debug;

type BuiltinImpl = fn(&[Expression], &Evaluator, &Rc<Scope>) -> RuntimeResult<Expression>;

/// The Standard Library for the glispy runtime.
pub struct StandardLibrary;

impl StandardLibrary {
    /// Creates a new root scope and populates it with every builtin.
    ///
    /// The returned scope has no parent. Callers should treat it as read-only
    /// and evaluate user code in a child scope.
    pub fn create_global_environment() -> Rc<Scope> {
        let env = Scope::new();
        Self::load_arithmetic_functions(&env);
        Self::load_comparison_functions(&env);
        Self::load_sequence_functions(&env);
        Self::load_binding_forms(&env);
        Self::load_host_bridge_functions(&env);
        Rc::new(env)
    }

    fn register(env: &Scope, name: &str, arity: Arity, func: BuiltinImpl) {
        env.put(
            Symbol::new(name),
            Expression::Function(Function::builtin(name, arity, func)),
        );
    }

    fn register_binding_form(env: &Scope, name: &str, arity: Arity, func: BuiltinImpl) {
        env.put(
            Symbol::new(name),
            Expression::Function(Function::binding_form(name, arity, func)),
        );
    }

    fn load_arithmetic_functions(env: &Scope) {
        Self::register(env, "+", Arity::Variadic(0), Self::add);
        Self::register(env, "-", Arity::Variadic(1), Self::subtract);
        Self::register(env, "*", Arity::Variadic(0), Self::multiply);
        Self::register(env, "/", Arity::Variadic(1), Self::divide);
        Self::register(env, "sqrt", Arity::Fixed(1), Self::sqrt);
        env.put(Symbol::new("pi"), Expression::Number(std::f64::consts::PI));
    }

    fn load_comparison_functions(env: &Scope) {
        Self::register(env, ">", Arity::Fixed(2), Self::greater_than);
        Self::register(env, "<", Arity::Fixed(2), Self::less_than);
        Self::register(env, ">=", Arity::Fixed(2), Self::greater_equal);
        Self::register(env, "<=", Arity::Fixed(2), Self::less_equal);
        Self::register(env, "=", Arity::Fixed(2), Self::equal);
    }

    fn load_sequence_functions(env: &Scope) {
        Self::register(env, "begin", Arity::Variadic(0), Self::begin);
        Self::register(env, "println", Arity::Variadic(0), Self::println);
    }

    fn load_binding_forms(env: &Scope) {
        Self::register_binding_form(env, "define", Arity::Fixed(2), Self::define);
        Self::register_binding_form(env, "defun", Arity::Fixed(3), Self::defun);
    }

    fn load_host_bridge_functions(env: &Scope) {
        Self::register_binding_form(env, "make-hash-map", Arity::Fixed(1), Self::make_hash_map);
        Self::register(env, "set-value", Arity::Fixed(3), Self::set_value);
        Self::register(env, "get-value", Arity::Fixed(2), Self::get_value);
    }

    fn numbers(
        args: &[Expression],
        evaluator: &Evaluator,
        env: &Rc<Scope>,
        operation: &str,
    ) -> RuntimeResult<Vec<f64>> {
        args.iter()
            .map(|arg| evaluator.evaluate_number(arg, env, operation))
            .collect()
    }

    // `(+ a b ...)` - sum of all arguments, 0 when empty
    fn add(args: &[Expression], evaluator: &Evaluator, env: &Rc<Scope>) -> RuntimeResult<Expression> {
        let mut sum = 0.0;
        for arg in args {
            sum += evaluator.evaluate_number(arg, env, "+")?;
        }
        Ok(Expression::Number(sum))
    }

    // `(* a b ...)` - product of all arguments, 1 when empty
    fn multiply(args: &[Expression], evaluator: &Evaluator, env: &Rc<Scope>) -> RuntimeResult<Expression> {
        let mut product = 1.0;
        for arg in args {
            product *= evaluator.evaluate_number(arg, env, "*")?;
        }
        Ok(Expression::Number(product))
    }

    // `(- a)` negates, `(- a b ...)` subtracts left to right
    fn subtract(args: &[Expression], evaluator: &Evaluator, env: &Rc<Scope>) -> RuntimeResult<Expression> {
        let numbers = Self::numbers(args, evaluator, env, "-")?;
        let result = match numbers.split_first() {
            Some((first, [])) => -first,
            Some((first, rest)) => rest.iter().fold(*first, |acc, n| acc - n),
            None => return Err(RuntimeError::arity("-", "at least 1", 0)),
        };
        Ok(Expression::Number(result))
    }

    // `(/ a)` is the reciprocal, `(/ a b ...)` divides left to right
    fn divide(args: &[Expression], evaluator: &Evaluator, env: &Rc<Scope>) -> RuntimeResult<Expression> {
        let numbers = Self::numbers(args, evaluator, env, "/")?;
        let (first, rest) = match numbers.split_first() {
            Some((first, [])) => (1.0, std::slice::from_ref(first)),
            Some((first, rest)) => (*first, rest),
            None => return Err(RuntimeError::arity("/", "at least 1", 0)),
        };
        let mut result = first;
        for divisor in rest {
            if *divisor == 0.0 {
                return Err(RuntimeError::DivisionByZero);
            }
            result /= divisor;
        }
        Ok(Expression::Number(result))
    }

    fn sqrt(args: &[Expression], evaluator: &Evaluator, env: &Rc<Scope>) -> RuntimeResult<Expression> {
        let n = evaluator.evaluate_number(&args[0], env, "sqrt")?;
        Ok(Expression::Number(n.sqrt()))
    }

    fn compare(
        args: &[Expression],
        evaluator: &Evaluator,
        env: &Rc<Scope>,
        operation: &str,
        predicate: fn(f64, f64) -> bool,
    ) -> RuntimeResult<Expression> {
        let a = evaluator.evaluate_number(&args[0], env, operation)?;
        let b = evaluator.evaluate_number(&args[1], env, operation)?;
        Ok(Expression::truth(predicate(a, b)))
    }

    fn greater_than(args: &[Expression], evaluator: &Evaluator, env: &Rc<Scope>) -> RuntimeResult<Expression> {
        Self::compare(args, evaluator, env, ">", |a, b| a > b)
    }

    fn less_than(args: &[Expression], evaluator: &Evaluator, env: &Rc<Scope>) -> RuntimeResult<Expression> {
        Self::compare(args, evaluator, env, "<", |a, b| a < b)
    }

    fn greater_equal(args: &[Expression], evaluator: &Evaluator, env: &Rc<Scope>) -> RuntimeResult<Expression> {
        Self::compare(args, evaluator, env, ">=", |a, b| a >= b)
    }

    fn less_equal(args: &[Expression], evaluator: &Evaluator, env: &Rc<Scope>) -> RuntimeResult<Expression> {
        Self::compare(args, evaluator, env, "<=", |a, b| a <= b)
    }

    // `(= a b)` - structural equality of the evaluated arguments
    fn equal(args: &[Expression], evaluator: &Evaluator, env: &Rc<Scope>) -> RuntimeResult<Expression> {
        let a = evaluator.evaluate(&args[0], env)?;
        let b = evaluator.evaluate(&args[1], env)?;
        Ok(Expression::truth(a == b))
    }

    // `(begin form ...)` - evaluate in order, yield the last result
    fn begin(args: &[Expression], evaluator: &Evaluator, env: &Rc<Scope>) -> RuntimeResult<Expression> {
        evaluator.eval_sequence(args, env)
    }

    // `(println value ...)` - print space-separated, strings without quotes
    fn println(args: &[Expression], evaluator: &Evaluator, env: &Rc<Scope>) -> RuntimeResult<Expression> {
        let mut parts = Vec::with_capacity(args.len());
        for arg in args {
            match evaluator.evaluate(arg, env)? {
                Expression::String(s) => parts.push(s),
                other => parts.push(other.to_string()),
            }
        }
        println!("{}", parts.join(" "));
        Ok(Expression::empty())
    }

    fn binding_name(expr: &Expression, operation: &str) -> RuntimeResult<Symbol> {
        match expr {
            Expression::Symbol(sym) => Ok(sym.clone()),
            other => Err(RuntimeError::ExpectedSymbol {
                actual: other.type_name().to_string(),
                operation: operation.to_string(),
            }),
        }
    }

    // `(define name value)` - bind the evaluated value in the calling scope
    fn define(args: &[Expression], evaluator: &Evaluator, env: &Rc<Scope>) -> RuntimeResult<Expression> {
        let name = Self::binding_name(&args[0], "define")?;
        let value = evaluator.evaluate(&args[1], env)?;
        debug!(name = %name, value = %value, "define");
        env.put(name, value.clone());
        Ok(value)
    }

    // `(defun name (params ...) body)` - bind a closure over the calling scope
    fn defun(args: &[Expression], _evaluator: &Evaluator, env: &Rc<Scope>) -> RuntimeResult<Expression> {
        let name = Self::binding_name(&args[0], "defun")?;
        let params = match &args[1] {
            Expression::List(items) => items
                .iter()
                .map(|param| Self::binding_name(param, "defun parameter list"))
                .collect::<RuntimeResult<Vec<_>>>()?,
            other => {
                return Err(RuntimeError::ExpectedSymbol {
                    actual: other.type_name().to_string(),
                    operation: "defun parameter list".to_string(),
                })
            }
        };

        debug!(name = %name, arity = params.len(), "defun");
        let closure = Expression::Function(Function::new_closure(
            Some(name.clone()),
            params,
            args[2].clone(),
            env.clone(),
        ));
        env.put(name, closure.clone());
        Ok(closure)
    }

    // `(make-hash-map name)` - bind a new empty host map in the calling scope
    fn make_hash_map(args: &[Expression], _evaluator: &Evaluator, env: &Rc<Scope>) -> RuntimeResult<Expression> {
        let name = Self::binding_name(&args[0], "make-hash-map")?;
        let map = Expression::HostValue(HostRef::new(HostMap::new()));
        debug!(name = %name, "make-hash-map");
        env.put(name, map.clone());
        Ok(map)
    }

    fn host_ref(expr: Expression, operation: &str) -> RuntimeResult<HostRef> {
        match expr {
            Expression::HostValue(host) => Ok(host),
            other => Err(RuntimeError::ExpectedHostValue {
                actual: other.type_name().to_string(),
                operation: operation.to_string(),
            }),
        }
    }

    fn host_key(expr: Expression, operation: &str) -> RuntimeResult<String> {
        match expr {
            Expression::String(key) => Ok(key),
            other => Err(RuntimeError::ExpectedString {
                actual: other.type_name().to_string(),
                operation: operation.to_string(),
            }),
        }
    }

    // `(set-value host "key" value)` - write through the host bridge, yield the value
    fn set_value(args: &[Expression], evaluator: &Evaluator, env: &Rc<Scope>) -> RuntimeResult<Expression> {
        let host = Self::host_ref(evaluator.evaluate(&args[0], env)?, "set-value")?;
        let key = Self::host_key(evaluator.evaluate(&args[1], env)?, "set-value")?;
        let value = evaluator.evaluate(&args[2], env)?;
        host.set(&key, value.clone())?;
        Ok(value)
    }

    // `(get-value host "key")` - read through the host bridge
    fn get_value(args: &[Expression], evaluator: &Evaluator, env: &Rc<Scope>) -> RuntimeResult<Expression> {
        let host = Self::host_ref(evaluator.evaluate(&args[0], env)?, "get-value")?;
        let key = Self::host_key(evaluator.evaluate(&args[1], env)?, "get-value")?;
        host.get(&key)
    }
}
