use std::collections::HashMap;

use tracing::trace;

use crate::{common::Error, token::Token, value::Value};

/// Index of a scope frame inside an [`Environment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeId(usize);

#[derive(Debug, Clone, Default)]
struct Scope {
    values: HashMap<String, Value>,
    enclosing: Option<ScopeId>,
}

/// All live scopes of a run, stored as an arena. Every frame points at its
/// enclosing frame by index; the global frame (index 0) has none. A parent
/// always sits at a lower index than its children, so chains can't cycle.
#[derive(Debug, Clone)]
pub struct Environment {
    scopes: Vec<Scope>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

fn undefined(name: &Token) -> Error {
    Error::runtime(name.line, format!("Undefined variable '{}'.", name.lexeme))
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            scopes: vec![Scope::default()],
        }
    }

    pub fn global(&self) -> ScopeId {
        ScopeId(0)
    }

    /// Number of live frames, the global one included.
    #[cfg(test)]
    pub(crate) fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Opens a fresh scope whose parent is `enclosing`.
    pub fn nest(&mut self, enclosing: ScopeId) -> ScopeId {
        self.scopes.push(Scope {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        });
        let id = ScopeId(self.scopes.len() - 1);
        trace!(scope = id.0, enclosing = enclosing.0, "nest");
        id
    }

    /// Drops `scope` and every scope opened after it. The global scope is
    /// never dropped.
    pub fn unnest(&mut self, scope: ScopeId) {
        trace!(scope = scope.0, "unnest");
        self.scopes.truncate(scope.0.max(1));
    }

    fn chain(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(Some(scope), move |id| self.scopes[id.0].enclosing)
    }

    /// Binds `name` in `scope` itself, replacing any earlier local binding.
    pub fn define(&mut self, scope: ScopeId, name: &str, value: Value) {
        self.scopes[scope.0].values.insert(name.to_string(), value);
    }

    /// Reads `name` from the nearest scope in the chain that defines it.
    pub fn get(&self, scope: ScopeId, name: &Token) -> Result<Value, Error> {
        self.chain(scope)
            .find_map(|id| self.scopes[id.0].values.get(&name.lexeme))
            .cloned()
            .ok_or_else(|| undefined(name))
    }

    /// Overwrites `name` in the nearest scope that defines it. Never creates
    /// a binding.
    pub fn assign(&mut self, scope: ScopeId, name: &Token, value: Value) -> Result<(), Error> {
        let owner = self
            .chain(scope)
            .find(|id| self.scopes[id.0].values.contains_key(&name.lexeme))
            .ok_or_else(|| undefined(name))?;

        self.scopes[owner.0].values.insert(name.lexeme.clone(), value);
        Ok(())
    }
}
