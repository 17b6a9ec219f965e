//! Defines the `HostValue` trait for exposing externally owned values to the evaluator.
//!
//! Scripts read and write host data only through `get`/`set` by key. Concrete
//! host types decide how keys map onto their storage: a free-form map accepts
//! any key, a fixed record accepts only its declared fields (see
//! [`host_record!`](crate::host_record)).

use crate::ast::Expression;
use crate::runtime::error::{RuntimeError, RuntimeResult};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// `HostValue` is the contract between the evaluator and a value it does not own.
pub trait HostValue: fmt::Debug {
    /// Short name used in diagnostics and when printing the value.
    fn type_name(&self) -> &str;

    /// Reads the value stored under `key`, converted back to an expression.
    ///
    /// Free-form containers report a missing key as `KeyNotFound`, fixed
    /// records report an unknown field as `FieldNotFound`.
    fn get(&self, key: &str) -> RuntimeResult<Expression>;

    /// Writes `value` under `key`, converting it to the host's native
    /// representation. A rejected conversion is a `TypeMismatch`.
    fn set(&mut self, key: &str, value: Expression) -> RuntimeResult<()>;

    /// Keys currently readable through `get`.
    fn keys(&self) -> Vec<String>;
}

/// Shared handle to a host value. Clones alias the same underlying value.
#[derive(Clone)]
pub struct HostRef(Rc<RefCell<dyn HostValue>>);

impl HostRef {
    pub fn new<T: HostValue + 'static>(value: T) -> Self {
        HostRef(Rc::new(RefCell::new(value)))
    }

    /// Wraps a value the host keeps its own handle to, so the host can read
    /// the record back after a script has modified it.
    pub fn from_shared<T: HostValue + 'static>(value: Rc<RefCell<T>>) -> Self {
        HostRef(value)
    }

    pub fn get(&self, key: &str) -> RuntimeResult<Expression> {
        self.0.borrow().get(key)
    }

    pub fn set(&self, key: &str, value: Expression) -> RuntimeResult<()> {
        self.0.borrow_mut().set(key, value)
    }

    pub fn keys(&self) -> Vec<String> {
        self.0.borrow().keys()
    }

    pub fn type_name(&self) -> String {
        self.0.borrow().type_name().to_string()
    }

    pub fn ptr_eq(&self, other: &HostRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for HostRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(value) => write!(f, "HostRef({:?})", value),
            Err(_) => write!(f, "HostRef(<borrowed>)"),
        }
    }
}

impl PartialEq for HostRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

/// Conversion between a native field type and an expression.
pub trait HostConvert: Sized {
    /// Name of the native type, for `TypeMismatch` diagnostics.
    const NATIVE_TYPE: &'static str;

    fn to_expression(&self) -> Expression;

    /// Converts `value` for storage in `field`, rejecting values the native
    /// type cannot represent.
    fn from_expression(field: &str, value: &Expression) -> RuntimeResult<Self>;
}

fn mismatch(field: &str, expected: &str, value: &Expression) -> RuntimeError {
    RuntimeError::TypeMismatch {
        field: field.to_string(),
        expected: expected.to_string(),
        actual: value.to_string(),
    }
}

impl HostConvert for String {
    const NATIVE_TYPE: &'static str = "string";

    fn to_expression(&self) -> Expression {
        Expression::String(self.clone())
    }

    fn from_expression(field: &str, value: &Expression) -> RuntimeResult<Self> {
        match value {
            Expression::String(s) => Ok(s.clone()),
            other => Err(mismatch(field, Self::NATIVE_TYPE, other)),
        }
    }
}

impl HostConvert for f64 {
    const NATIVE_TYPE: &'static str = "f64";

    fn to_expression(&self) -> Expression {
        Expression::Number(*self)
    }

    fn from_expression(field: &str, value: &Expression) -> RuntimeResult<Self> {
        match value {
            Expression::Number(n) => Ok(*n),
            other => Err(mismatch(field, Self::NATIVE_TYPE, other)),
        }
    }
}

impl HostConvert for f32 {
    const NATIVE_TYPE: &'static str = "f32";

    fn to_expression(&self) -> Expression {
        Expression::Number(f64::from(*self))
    }

    fn from_expression(field: &str, value: &Expression) -> RuntimeResult<Self> {
        match value {
            Expression::Number(n) if n.is_finite() && n.abs() > f64::from(f32::MAX) => {
                Err(mismatch(field, Self::NATIVE_TYPE, value))
            }
            Expression::Number(n) => Ok(*n as f32),
            other => Err(mismatch(field, Self::NATIVE_TYPE, other)),
        }
    }
}

macro_rules! integer_host_convert {
    ($($int:ty),* $(,)?) => {
        $(
            impl HostConvert for $int {
                const NATIVE_TYPE: &'static str = stringify!($int);

                fn to_expression(&self) -> Expression {
                    Expression::Number(*self as f64)
                }

                fn from_expression(field: &str, value: &Expression) -> RuntimeResult<Self> {
                    match value {
                        Expression::Number(n)
                            if n.fract() == 0.0
                                && *n >= <$int>::MIN as f64
                                && *n < (<$int>::MAX as f64) + 1.0 =>
                        {
                            Ok(*n as $int)
                        }
                        other => Err(mismatch(field, Self::NATIVE_TYPE, other)),
                    }
                }
            }
        )*
    };
}

integer_host_convert!(u8, i32, u32, i64, u64);

impl HostConvert for bool {
    const NATIVE_TYPE: &'static str = "bool";

    fn to_expression(&self) -> Expression {
        Expression::truth(*self)
    }

    fn from_expression(field: &str, value: &Expression) -> RuntimeResult<Self> {
        match value {
            Expression::String(s) if s == "true" => Ok(true),
            v if v.is_empty_list() => Ok(false),
            other => Err(mismatch(field, Self::NATIVE_TYPE, other)),
        }
    }
}
