//! Structure-preserving rewrites of the type graph.
//!
//! `clone`, `seal` and `unseal` share one traversal that rebuilds template
//! instances and replaces each distinct variable or constraint according to a
//! [`Rewrite`]. Replacements are memoized per source node, so a variable that
//! occurs twice in the input maps to one node occurring twice in the output.
//! Terminals and unions pass through untouched.

use std::collections::HashMap;

use super::ty::{Type, TypeArena, TypeId};

/// Which placeholders a rewrite replaces, and with what.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rewrite {
    /// Fresh variable for each variable, fresh constraint for each constraint.
    Clone,
    /// Constraint for each variable; constraints are kept.
    Seal,
    /// Fresh variable for each constraint; variables are kept.
    Unseal,
}

/// Memo table from source placeholder to its replacement.
#[derive(Clone, Debug, Default)]
pub struct Renaming {
    map: HashMap<TypeId, TypeId>,
}

impl Renaming {
    pub fn new() -> Self {
        Renaming {
            map: HashMap::new(),
        }
    }

    /// Replacement already chosen for `source`, if any.
    pub fn get(&self, source: TypeId) -> Option<TypeId> {
        self.map.get(&source).copied()
    }
}

impl TypeArena {
    /// Independent copy of `ty` with fresh, unbound placeholders.
    pub fn clone_type(&mut self, ty: TypeId) -> TypeId {
        self.rewrite(ty, Rewrite::Clone, &mut Renaming::new())
    }

    /// Generalize: every free variable in `ty` becomes a constraint.
    pub fn seal(&mut self, ty: TypeId) -> TypeId {
        self.rewrite(ty, Rewrite::Seal, &mut Renaming::new())
    }

    /// Instantiate: every constraint in `ty` becomes a fresh variable.
    pub fn unseal(&mut self, ty: TypeId) -> TypeId {
        self.rewrite(ty, Rewrite::Unseal, &mut Renaming::new())
    }

    /// Apply `mode` to `ty`, sharing `renaming` with earlier calls.
    ///
    /// Passing the same renaming to several calls keeps placeholders that
    /// occur in more than one root mapped consistently.
    pub fn rewrite(&mut self, ty: TypeId, mode: Rewrite, renaming: &mut Renaming) -> TypeId {
        let ty = self.actual(ty);
        if let Some(done) = renaming.map.get(&ty) {
            return *done;
        }

        match self.get(ty).clone() {
            Type::Var { name, .. } => {
                let replacement = match mode {
                    Rewrite::Clone => self.alloc(Type::Var {
                        name,
                        binding: None,
                    }),
                    Rewrite::Seal => self.alloc(Type::Constraint { name }),
                    Rewrite::Unseal => ty,
                };
                renaming.map.insert(ty, replacement);
                replacement
            }

            Type::Constraint { name } => {
                let replacement = match mode {
                    Rewrite::Clone => self.alloc(Type::Constraint { name }),
                    Rewrite::Seal => ty,
                    Rewrite::Unseal => self.alloc(Type::Var {
                        name,
                        binding: None,
                    }),
                };
                renaming.map.insert(ty, replacement);
                replacement
            }

            Type::Instance { template, args } => {
                let args = args
                    .into_iter()
                    .map(|arg| self.rewrite(arg, mode, renaming))
                    .collect();
                self.alloc(Type::Instance { template, args })
            }

            Type::Terminal { .. } | Type::Union { .. } => ty,
        }
    }
}
