// Lexical scopes for variable bindings

use crate::ast::{Expression, Symbol};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// A chained name-to-value mapping. Lookups walk child to parent; writes only
/// ever touch the local level.
///
/// Scopes are shared as `Rc<Scope>`: a closure keeps its defining scope alive
/// for as long as the closure itself is reachable.
#[derive(Default)]
pub struct Scope {
    parent: Option<Rc<Scope>>,
    bindings: RefCell<HashMap<Symbol, Expression>>,
}

impl Scope {
    /// Creates a new, empty root scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty scope that falls back to `parent`.
    pub fn child_of(parent: Rc<Scope>) -> Self {
        Scope {
            parent: Some(parent),
            bindings: RefCell::new(HashMap::new()),
        }
    }

    /// Looks up a symbol by searching the current scope and then its parents.
    pub fn get(&self, name: &Symbol) -> Option<Expression> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|parent| parent.get(name))
    }

    /// Defines a new variable or overwrites an existing one in this scope.
    pub fn put(&self, name: Symbol, value: Expression) {
        self.bindings.borrow_mut().insert(name, value);
    }

    /// Number of scopes between this one and the root, inclusive.
    pub fn depth(&self) -> usize {
        1 + self.parent.as_ref().map(|p| p.depth()).unwrap_or(0)
    }

    /// Names bound in this scope only, sorted.
    pub fn local_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .bindings
            .borrow()
            .keys()
            .map(|s| s.to_string())
            .collect();
        names.sort();
        names
    }

    /// Names visible from this scope, including every ancestor.
    pub fn symbol_names(&self) -> Vec<String> {
        let mut names = self.local_names();
        if let Some(parent) = &self.parent {
            names.append(&mut parent.symbol_names());
        }
        names.sort();
        names.dedup();
        names
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("bindings", &self.local_names())
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Expression {
        Expression::Number(n)
    }

    #[test]
    fn test_lookup_walks_parent_chain() {
        let root = Rc::new(Scope::new());
        root.put(Symbol::new("x"), num(1.0));
        let middle = Rc::new(Scope::child_of(root.clone()));
        let leaf = Scope::child_of(middle);

        assert_eq!(leaf.get(&Symbol::new("x")), Some(num(1.0)));
        assert_eq!(leaf.get(&Symbol::new("y")), None);
        assert_eq!(leaf.depth(), 3);
    }

    #[test]
    fn test_put_only_writes_local_level() {
        let root = Rc::new(Scope::new());
        root.put(Symbol::new("x"), num(1.0));
        let child = Scope::child_of(root.clone());
        child.put(Symbol::new("x"), num(2.0));
        child.put(Symbol::new("y"), num(3.0));

        assert_eq!(child.get(&Symbol::new("x")), Some(num(2.0)));
        assert_eq!(root.get(&Symbol::new("x")), Some(num(1.0)));
        assert_eq!(root.get(&Symbol::new("y")), None);
    }

    #[test]
    fn test_symbol_names_merges_ancestors() {
        let root = Rc::new(Scope::new());
        root.put(Symbol::new("a"), num(1.0));
        let child = Scope::child_of(root);
        child.put(Symbol::new("b"), num(2.0));
        child.put(Symbol::new("a"), num(3.0));

        assert_eq!(child.local_names(), vec!["a", "b"]);
        assert_eq!(child.symbol_names(), vec!["a", "b"]);
    }
}
