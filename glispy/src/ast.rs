// Expression model for glispy
// Parsed code and runtime values share one closed sum type

use crate::runtime::host_interface::HostRef;
use crate::runtime::values::Function;
use std::fmt;
use std::rc::Rc;

/// A name used for scope lookup. Cloning is cheap and comparison is by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(pub Rc<str>);

impl Symbol {
    pub fn new(name: &str) -> Self {
        Symbol(Rc::from(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol::new(name)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Either an atom (number, string, symbol), a list, or a runtime-only value
/// (function, host value). Lists double as data and as unevaluated call forms.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Number(f64),
    String(String),
    Symbol(Symbol),
    List(Vec<Expression>),
    Function(Function),
    HostValue(HostRef),
}

impl Expression {
    /// The empty list. Doubles as the false value and the result of forms
    /// that have nothing to return.
    pub fn empty() -> Self {
        Expression::List(Vec::new())
    }

    /// Boolean results are the string `"true"` or the empty list.
    pub fn truth(value: bool) -> Self {
        if value {
            Expression::String("true".to_string())
        } else {
            Expression::empty()
        }
    }

    pub fn symbol(name: &str) -> Self {
        Expression::Symbol(Symbol::new(name))
    }

    pub fn string(text: impl Into<String>) -> Self {
        Expression::String(text.into())
    }

    pub fn is_empty_list(&self) -> bool {
        matches!(self, Expression::List(items) if items.is_empty())
    }

    /// Everything except the empty list is truthy.
    pub fn is_truthy(&self) -> bool {
        !self.is_empty_list()
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Expression::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Expression::Number(_) => "number",
            Expression::String(_) => "string",
            Expression::Symbol(_) => "symbol",
            Expression::List(items) if items.is_empty() => "empty list",
            Expression::List(_) => "list",
            Expression::Function(_) => "function",
            Expression::HostValue(_) => "host value",
        }
    }
}

impl From<f64> for Expression {
    fn from(n: f64) -> Self {
        Expression::Number(n)
    }
}

impl From<&str> for Expression {
    fn from(text: &str) -> Self {
        Expression::String(text.to_string())
    }
}

impl From<String> for Expression {
    fn from(text: String) -> Self {
        Expression::String(text)
    }
}

impl From<HostRef> for Expression {
    fn from(host: HostRef) -> Self {
        Expression::HostValue(host)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Number(n) => write!(f, "{}", n),
            Expression::String(s) => write!(f, "\"{}\"", s),
            Expression::Symbol(s) => write!(f, "{}", s),
            Expression::List(items) => {
                let items: Vec<String> = items.iter().map(|item| format!("{}", item)).collect();
                write!(f, "({})", items.join(" "))
            }
            Expression::Function(func) => write!(f, "{}", func),
            Expression::HostValue(host) => write!(f, "#<host {}>", host.type_name()),
        }
    }
}
