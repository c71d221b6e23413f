//! Core type definitions for tunify.
//!
//! Every type expression lives in a [`TypeArena`] and is addressed by a
//! [`TypeId`] handle. Identity of a node is identity of its handle: two
//! terminals named `Int32` registered separately are different types, and
//! two constraints are never equal unless they are the same node.
//!
//! The only mutable part of the graph is a variable's binding slot, which
//! the unifier fills at most once (and may clear again when rewinding).

use std::fmt;

/// Handle to a node in a [`TypeArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeId(u32);

impl TypeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle to a template definition in a [`TypeArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TemplateId(u32);

impl TemplateId {
    /// The built-in function template, `Function<Input, Output>`.
    /// Every arena allocates it first.
    pub const FUNCTION: TemplateId = TemplateId(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node of the type graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Type {
    /// Atomic nominal type such as `Int32`.
    Terminal { name: String },

    /// Unification variable. `binding` is `None` while the variable is free.
    Var {
        name: Option<String>,
        binding: Option<TypeId>,
    },

    /// Rigid placeholder. Matched by identity, never bound.
    Constraint { name: Option<String> },

    /// Application of a template, e.g. `List<Int32>`.
    Instance {
        template: TemplateId,
        args: Vec<TypeId>,
    },

    /// Overload set, resolved by unification.
    Union { members: Vec<TypeId> },
}

impl Type {
    /// The name a scope would register this node under, if it has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Type::Terminal { name } => Some(name),
            Type::Var { name, .. } | Type::Constraint { name } => name.as_deref(),
            Type::Instance { .. } | Type::Union { .. } => None,
        }
    }

    pub fn is_unbound_var(&self) -> bool {
        matches!(self, Type::Var { binding: None, .. })
    }

    pub fn is_constraint(&self) -> bool {
        matches!(self, Type::Constraint { .. })
    }

    pub fn is_union(&self) -> bool {
        matches!(self, Type::Union { .. })
    }

    pub fn as_instance(&self) -> Option<(TemplateId, &[TypeId])> {
        match self {
            Type::Instance { template, args } => Some((*template, args)),
            _ => None,
        }
    }
}

/// A named generic constructor with a fixed, ordered parameter list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateDef {
    pub name: String,
    /// Parameter names in declaration order.
    pub params: Vec<String>,
    /// Declared bound of each parameter, parallel to `params`.
    pub constraints: Vec<TypeId>,
}

impl TemplateDef {
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Look up the declared bound of a parameter by name.
    pub fn constraint(&self, param: &str) -> Option<TypeId> {
        self.params
            .iter()
            .position(|p| p == param)
            .map(|i| self.constraints[i])
    }
}

/// Storage for every node and template of one type-checking pass.
#[derive(Clone, Debug)]
pub struct TypeArena {
    nodes: Vec<Type>,
    templates: Vec<TemplateDef>,
}

impl Default for TypeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeArena {
    /// Create an arena holding only the built-in `Function` template.
    pub fn new() -> Self {
        let mut arena = TypeArena {
            nodes: Vec::new(),
            templates: Vec::new(),
        };
        let input = arena.alloc(Type::Constraint { name: None });
        let output = arena.alloc(Type::Constraint { name: None });
        let function = arena.add_template(TemplateDef {
            name: "Function".to_string(),
            params: vec!["Input".to_string(), "Output".to_string()],
            constraints: vec![input, output],
        });
        debug_assert_eq!(function, TemplateId::FUNCTION);
        arena
    }

    /// Store a node and return its handle.
    pub(crate) fn alloc(&mut self, ty: Type) -> TypeId {
        let id = TypeId(self.nodes.len() as u32);
        self.nodes.push(ty);
        id
    }

    pub(crate) fn add_template(&mut self, def: TemplateDef) -> TemplateId {
        let id = TemplateId(self.templates.len() as u32);
        self.templates.push(def);
        id
    }

    pub fn get(&self, id: TypeId) -> &Type {
        &self.nodes[id.index()]
    }

    pub fn template(&self, id: TemplateId) -> &TemplateDef {
        &self.templates[id.index()]
    }

    /// Follow variable bindings to the representative node.
    ///
    /// Returns `id` itself for everything except a bound variable. The walk
    /// is a loop so long binding chains cost no stack.
    pub fn actual(&self, id: TypeId) -> TypeId {
        let mut current = id;
        while let Type::Var {
            binding: Some(next),
            ..
        } = self.get(current)
        {
            current = *next;
        }
        current
    }

    /// Fill the binding slot of a free variable.
    ///
    /// Panics if `var` is not a variable; the unifier only calls this on
    /// nodes it has just matched as `Type::Var`.
    pub(crate) fn set_binding(&mut self, var: TypeId, target: Option<TypeId>) {
        match &mut self.nodes[var.index()] {
            Type::Var { binding, .. } => *binding = target,
            other => panic!("cannot bind non-variable node {:?}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_template_is_first() {
        let arena = TypeArena::new();
        let function = arena.template(TemplateId::FUNCTION);
        assert_eq!(function.name, "Function");
        assert_eq!(function.params, vec!["Input", "Output"]);
        assert_eq!(function.arity(), 2);

        let input = function.constraint("Input").unwrap();
        assert!(arena.get(input).is_constraint());
        assert_ne!(function.constraint("Input"), function.constraint("Output"));
        assert_eq!(function.constraint("Missing"), None);
    }

    #[test]
    fn test_actual_follows_chain() {
        let mut arena = TypeArena::new();
        let int = arena.alloc(Type::Terminal {
            name: "Int32".into(),
        });
        let a = arena.alloc(Type::Var {
            name: Some("a".into()),
            binding: None,
        });
        let b = arena.alloc(Type::Var {
            name: None,
            binding: None,
        });

        assert_eq!(arena.actual(a), a);
        assert_eq!(arena.actual(int), int);

        arena.set_binding(a, Some(b));
        arena.set_binding(b, Some(int));
        assert_eq!(arena.actual(a), int);
        assert_eq!(arena.actual(arena.actual(a)), int);
        assert_eq!(arena.actual(b), int);
    }

    #[test]
    fn test_long_chain_does_not_recurse() {
        let mut arena = TypeArena::new();
        let end = arena.alloc(Type::Terminal { name: "End".into() });
        let mut prev = end;
        for _ in 0..100_000 {
            prev = arena.alloc(Type::Var {
                name: None,
                binding: Some(prev),
            });
        }
        assert_eq!(arena.actual(prev), end);
    }

    #[test]
    fn test_names() {
        let term = Type::Terminal {
            name: "Int32".into(),
        };
        assert_eq!(term.name(), Some("Int32"));

        let anon = Type::Constraint { name: None };
        assert_eq!(anon.name(), None);

        let union = Type::Union { members: vec![] };
        assert_eq!(union.name(), None);
        assert!(union.is_union());
    }
}
