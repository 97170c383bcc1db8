use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::errors::{RuntimeError, RuntimeResult};
use super::value::Value;
use crate::egg_frontend::grammar::DataType;

use tracing::debug;

/// A declared variable. Its type is fixed at declaration and `value` stays
/// `None` until the first store.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub data_type: DataType,
    pub constant: bool,
    pub value: Option<Value>,
}

impl Variable {
    pub fn new(data_type: DataType, constant: bool) -> Self {
        Variable {
            data_type,
            constant,
            value: None,
        }
    }

    fn store(&mut self, name: &str, value: Value) -> RuntimeResult<()> {
        if value.data_type() != self.data_type {
            return Err(RuntimeError::TypeMismatch {
                name: name.to_owned(),
                expected: self.data_type,
                found: value.data_type(),
            });
        }
        self.value = Some(value);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Scope {
    variables: HashMap<String, Variable>,
}

/// Stack of lexical scopes. The bottom scope is the global one and is
/// never popped.
#[derive(Debug)]
pub struct Environment {
    scopes: Vec<Scope>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            scopes: vec![Scope::default()],
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::default());
        debug!(depth = self.depth(), "entered scope");
    }

    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
        debug!(depth = self.depth(), "left scope");
    }

    /// Adds a variable to the innermost scope. Outer scopes may already hold
    /// the same name, which is then shadowed.
    pub fn declare(&mut self, name: &str, variable: Variable) -> RuntimeResult<()> {
        let scope = self.current_scope();
        match scope.variables.entry(name.to_owned()) {
            Entry::Occupied(_) => Err(RuntimeError::AlreadyDeclared(name.to_owned())),
            Entry::Vacant(slot) => {
                debug!(
                    name,
                    data_type = %variable.data_type,
                    constant = variable.constant,
                    "declared variable"
                );
                slot.insert(variable);
                Ok(())
            }
        }
    }

    /// Declares and stores in one step. Constants are allowed through here since
    /// this is their one and only store.
    pub fn initialize(
        &mut self,
        name: &str,
        mut variable: Variable,
        value: Value,
    ) -> RuntimeResult<()> {
        variable.store(name, value)?;
        self.declare(name, variable)
    }

    /// Reads from the innermost scope declaring `name`. A declared but unset
    /// variable is an error even if an outer scope has a value for it.
    pub fn get(&self, name: &str) -> RuntimeResult<Value> {
        let variable = self
            .scopes
            .iter()
            .rev()
            .find_map(|scope| scope.variables.get(name))
            .ok_or_else(|| RuntimeError::UndeclaredVariable(name.to_owned()))?;

        variable
            .value
            .clone()
            .ok_or_else(|| RuntimeError::UninitializedVariable(name.to_owned()))
    }

    /// Overwrites the innermost visible `name`, checking constness and type.
    pub fn assign(&mut self, name: &str, value: Value) -> RuntimeResult<()> {
        let variable = self
            .scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.variables.get_mut(name))
            .ok_or_else(|| RuntimeError::UndeclaredVariable(name.to_owned()))?;

        if variable.constant {
            return Err(RuntimeError::ConstantReassignment(name.to_owned()));
        }
        variable.store(name, value)
    }

    fn current_scope(&mut self) -> &mut Scope {
        // The global scope is always present.
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }
}
