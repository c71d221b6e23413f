//! Inference state management.
//!
//! `InferState` owns everything one type-checking pass touches:
//! - the type arena (nodes, templates, variable bindings)
//! - scope frames
//! - the binding trail used to rewind trials and failed unifications
//! - the engine configuration

use crate::config::UnifyConfig;
use crate::error::TypeError;
use crate::types::{PrettyContext, Rendered, TemplateDef, TemplateId, Type, TypeArena, TypeId};

use super::scope::ScopeFrame;

/// Position in the binding trail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct TrailMark(usize);

/// Inference state tracking the type graph, scopes and bindings.
#[derive(Debug)]
pub struct InferState {
    arena: TypeArena,

    pub(super) scopes: Vec<ScopeFrame>,

    /// Variables bound by the unification in progress, in binding order.
    /// Emptied again when the top-level call returns.
    trail: Vec<TypeId>,

    config: UnifyConfig,
}

impl Default for InferState {
    fn default() -> Self {
        Self::new()
    }
}

impl InferState {
    pub fn new() -> Self {
        Self::with_config(UnifyConfig::default())
    }

    pub fn with_config(config: UnifyConfig) -> Self {
        InferState {
            arena: TypeArena::new(),
            scopes: Vec::new(),
            trail: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &UnifyConfig {
        &self.config
    }

    pub fn arena(&self) -> &TypeArena {
        &self.arena
    }

    // === Construction ===

    /// Create a terminal outside any scope.
    ///
    /// Terminals are nominal: two calls with the same name give two
    /// unrelated types. Use `register_terminal` to share one by name.
    pub fn new_terminal(&mut self, name: impl Into<String>) -> TypeId {
        self.arena.alloc(Type::Terminal { name: name.into() })
    }

    /// Create a fresh, unbound unification variable.
    pub fn new_var(&mut self, name: Option<&str>) -> TypeId {
        self.arena.alloc(Type::Var {
            name: name.map(str::to_string),
            binding: None,
        })
    }

    /// Create a fresh rigid constraint.
    pub fn new_constraint(&mut self, name: Option<&str>) -> TypeId {
        self.arena.alloc(Type::Constraint {
            name: name.map(str::to_string),
        })
    }

    /// Define a template outside any scope.
    ///
    /// Every parameter needs exactly one declared bound.
    pub fn new_template(&mut self, def: TemplateDef) -> Result<TemplateId, TypeError> {
        if def.params.len() != def.constraints.len() {
            return Err(TypeError::MalformedTemplate {
                template: def.name,
                params: def.params.len(),
                constraints: def.constraints.len(),
            });
        }
        Ok(self.define_template(def))
    }

    pub(super) fn define_template(&mut self, def: TemplateDef) -> TemplateId {
        self.arena.add_template(def)
    }

    /// Apply a template to arguments, e.g. `List<Int32>`.
    pub fn create_instance(
        &mut self,
        template: TemplateId,
        args: Vec<TypeId>,
    ) -> Result<TypeId, TypeError> {
        let def = self.arena.template(template);
        if def.arity() != args.len() {
            return Err(TypeError::ArityMismatch {
                template: def.name.clone(),
                expected: def.arity(),
                found: args.len(),
            });
        }
        Ok(self.arena.alloc(Type::Instance { template, args }))
    }

    /// Build the curried function type `A -> (B -> ... -> R)`.
    ///
    /// With no arguments this is `result` itself.
    pub fn function_type(&mut self, args: &[TypeId], result: TypeId) -> TypeId {
        args.iter().rev().fold(result, |output, input| {
            self.arena.alloc(Type::Instance {
                template: TemplateId::FUNCTION,
                args: vec![*input, output],
            })
        })
    }

    /// Wrap candidates as an overload set. Members are kept as given.
    pub fn union(&mut self, members: Vec<TypeId>) -> TypeId {
        self.arena.alloc(Type::Union { members })
    }

    // === Inspection ===

    /// The node `id` currently stands for, following variable bindings.
    pub fn actual(&self, id: TypeId) -> TypeId {
        self.arena.actual(id)
    }

    pub fn node(&self, id: TypeId) -> &Type {
        self.arena.get(id)
    }

    pub fn template(&self, id: TemplateId) -> &TemplateDef {
        self.arena.template(id)
    }

    pub fn is_unbound_var(&self, id: TypeId) -> bool {
        self.node(self.actual(id)).is_unbound_var()
    }

    // === Substitution ===

    pub fn clone_type(&mut self, ty: TypeId) -> TypeId {
        self.arena.clone_type(ty)
    }

    pub fn seal(&mut self, ty: TypeId) -> TypeId {
        self.arena.seal(ty)
    }

    pub fn unseal(&mut self, ty: TypeId) -> TypeId {
        self.arena.unseal(ty)
    }

    // === Rendering ===

    /// Render with a fresh naming context.
    pub fn render(&self, id: TypeId) -> String {
        self.display(id).to_string()
    }

    /// Render with a caller-owned context so labels agree across calls.
    pub fn render_with(&self, ctx: &mut PrettyContext, id: TypeId) -> String {
        ctx.format_type(&self.arena, id)
    }

    pub fn display(&self, id: TypeId) -> Rendered<'_> {
        self.arena.display(id)
    }

    // === Bindings ===

    /// Bind a free variable and record it on the trail.
    pub(super) fn bind(&mut self, var: TypeId, target: TypeId) {
        tracing::trace!(var = %var, target = %self.display(target), "bind");
        self.arena.set_binding(var, Some(target));
        self.trail.push(var);
    }

    /// Current position of the binding trail.
    pub(super) fn mark(&self) -> TrailMark {
        TrailMark(self.trail.len())
    }

    /// Unbind every variable bound since `mark`, newest first.
    pub(super) fn rewind(&mut self, mark: TrailMark) {
        let undone = self.trail.len().saturating_sub(mark.0);
        if undone > 0 {
            tracing::trace!(undone, "rewind bindings");
        }
        while self.trail.len() > mark.0 {
            if let Some(var) = self.trail.pop() {
                self.arena.set_binding(var, None);
            }
        }
    }

    /// Keep every binding made since `mark` and forget their trail entries.
    pub(super) fn commit(&mut self, mark: TrailMark) {
        self.trail.truncate(mark.0);
    }

    /// Whether `var` is reachable from `ty` through instance arguments,
    /// union members or bindings.
    pub fn occurs_in(&self, var: TypeId, ty: TypeId) -> bool {
        let mut stack = vec![ty];
        let mut seen = std::collections::HashSet::new();
        while let Some(next) = stack.pop() {
            let next = self.actual(next);
            if next == var {
                return true;
            }
            if !seen.insert(next) {
                continue;
            }
            match self.node(next) {
                Type::Instance { args, .. } => stack.extend(args.iter().copied()),
                Type::Union { members } => stack.extend(members.iter().copied()),
                Type::Terminal { .. } | Type::Var { .. } | Type::Constraint { .. } => {}
            }
        }
        false
    }
}
