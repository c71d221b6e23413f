//! Lexical scopes naming types and templates.
//!
//! Scopes form a parent-linked tree stored inside [`InferState`]. Lookups
//! walk from a frame up to the root and return the nearest match;
//! registration only ever writes into the frame it is given.

use std::collections::HashMap;

use crate::error::{EntryKind, ScopeError};
use crate::types::{TemplateDef, TemplateId, TypeId};

use super::state::InferState;

/// Handle to a scope frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

/// What a name is bound to in a scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScopeEntry {
    Type(TypeId),
    Template(TemplateId),
}

impl From<TypeId> for ScopeEntry {
    fn from(id: TypeId) -> Self {
        ScopeEntry::Type(id)
    }
}

impl From<TemplateId> for ScopeEntry {
    fn from(id: TemplateId) -> Self {
        ScopeEntry::Template(id)
    }
}

/// One frame of the scope tree.
#[derive(Clone, Debug, Default)]
pub struct ScopeFrame {
    parent: Option<ScopeId>,
    known: HashMap<String, ScopeEntry>,
}

/// Parameters of a template being registered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TemplateParams {
    /// Ordered parameter names; each gets a fresh constraint as its bound.
    Names(Vec<String>),
    /// Ordered parameter names with explicit constraints.
    Bounds(Vec<(String, TypeId)>),
}

impl<const N: usize> From<[&str; N]> for TemplateParams {
    fn from(names: [&str; N]) -> Self {
        TemplateParams::Names(names.iter().map(|n| n.to_string()).collect())
    }
}

impl From<&[&str]> for TemplateParams {
    fn from(names: &[&str]) -> Self {
        TemplateParams::Names(names.iter().map(|n| n.to_string()).collect())
    }
}

impl From<Vec<String>> for TemplateParams {
    fn from(names: Vec<String>) -> Self {
        TemplateParams::Names(names)
    }
}

impl From<Vec<(String, TypeId)>> for TemplateParams {
    fn from(bounds: Vec<(String, TypeId)>) -> Self {
        TemplateParams::Bounds(bounds)
    }
}

impl InferState {
    /// Create a root scope.
    pub fn create_scope(&mut self) -> ScopeId {
        self.push_frame(None)
    }

    /// Create a scope whose lookups fall back to `parent`.
    pub fn create_child(&mut self, parent: ScopeId) -> ScopeId {
        self.push_frame(Some(parent))
    }

    fn push_frame(&mut self, parent: Option<ScopeId>) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(ScopeFrame {
            parent,
            known: HashMap::new(),
        });
        id
    }

    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scopes[scope.0].parent
    }

    /// Register a named type or template under its own name.
    ///
    /// If the name is already bound in this frame the existing entry is
    /// returned and nothing changes.
    pub fn register(
        &mut self,
        scope: ScopeId,
        entry: impl Into<ScopeEntry>,
    ) -> Result<ScopeEntry, ScopeError> {
        let entry = entry.into();
        let name = match entry {
            ScopeEntry::Type(id) => self
                .node(id)
                .name()
                .map(str::to_string)
                .ok_or_else(|| ScopeError::Unnamed {
                    ty: self.render(id),
                })?,
            ScopeEntry::Template(id) => self.template(id).name.clone(),
        };
        if let Some(existing) = self.local(scope, &name) {
            return Ok(existing);
        }
        Ok(self.set(scope, name, entry))
    }

    /// Get or create the terminal `name` in this frame.
    ///
    /// Fails if `name` is already bound here to a template.
    pub fn register_terminal(
        &mut self,
        scope: ScopeId,
        name: &str,
    ) -> Result<TypeId, ScopeError> {
        match self.local(scope, name) {
            Some(ScopeEntry::Type(existing)) => return Ok(existing),
            Some(ScopeEntry::Template(_)) => {
                return Err(ScopeError::KindMismatch {
                    name: name.to_string(),
                    expected: EntryKind::Type,
                })
            }
            None => {}
        }
        let id = self.new_terminal(name);
        self.set(scope, name, id);
        Ok(id)
    }

    /// Get or create the template `name` in this frame.
    ///
    /// Fails if `name` is already bound here to a type.
    pub fn register_template(
        &mut self,
        scope: ScopeId,
        name: &str,
        params: impl Into<TemplateParams>,
    ) -> Result<TemplateId, ScopeError> {
        match self.local(scope, name) {
            Some(ScopeEntry::Template(existing)) => return Ok(existing),
            Some(ScopeEntry::Type(_)) => {
                return Err(ScopeError::KindMismatch {
                    name: name.to_string(),
                    expected: EntryKind::Template,
                })
            }
            None => {}
        }
        let (params, constraints): (Vec<String>, Vec<TypeId>) = match params.into() {
            TemplateParams::Names(names) => {
                let constraints = names.iter().map(|_| self.new_constraint(None)).collect();
                (names, constraints)
            }
            TemplateParams::Bounds(bounds) => bounds.into_iter().unzip(),
        };
        let id = self.define_template(TemplateDef {
            name: name.to_string(),
            params,
            constraints,
        });
        self.set(scope, name, id);
        Ok(id)
    }

    /// Bind `key` in this frame, replacing any previous local entry.
    pub fn set(
        &mut self,
        scope: ScopeId,
        key: impl Into<String>,
        value: impl Into<ScopeEntry>,
    ) -> ScopeEntry {
        let value = value.into();
        self.scopes[scope.0].known.insert(key.into(), value);
        value
    }

    /// Resolve `key`, searching enclosing frames.
    pub fn get(&self, scope: ScopeId, key: &str) -> Result<ScopeEntry, ScopeError> {
        self.lookup(scope, key).ok_or_else(|| ScopeError::Undefined {
            name: key.to_string(),
        })
    }

    /// Resolve `key` and require it to name a type.
    pub fn get_type(&self, scope: ScopeId, key: &str) -> Result<TypeId, ScopeError> {
        match self.get(scope, key)? {
            ScopeEntry::Type(id) => Ok(id),
            ScopeEntry::Template(_) => Err(ScopeError::KindMismatch {
                name: key.to_string(),
                expected: EntryKind::Type,
            }),
        }
    }

    /// Resolve `key` and require it to name a template.
    pub fn get_template(&self, scope: ScopeId, key: &str) -> Result<TemplateId, ScopeError> {
        match self.get(scope, key)? {
            ScopeEntry::Template(id) => Ok(id),
            ScopeEntry::Type(_) => Err(ScopeError::KindMismatch {
                name: key.to_string(),
                expected: EntryKind::Template,
            }),
        }
    }

    pub fn has(&self, scope: ScopeId, key: &str) -> bool {
        self.lookup(scope, key).is_some()
    }

    fn local(&self, scope: ScopeId, key: &str) -> Option<ScopeEntry> {
        self.scopes[scope.0].known.get(key).copied()
    }

    fn lookup(&self, scope: ScopeId, key: &str) -> Option<ScopeEntry> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let frame = &self.scopes[id.0];
            if let Some(entry) = frame.known.get(key) {
                return Some(*entry);
            }
            current = frame.parent;
        }
        None
    }
}
