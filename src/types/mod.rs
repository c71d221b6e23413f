//! Type system module for tunify.
//!
//! This module provides the type graph and its arena, the substitution
//! operators (clone, seal, unseal) and pretty-printing.

mod pretty;
mod subst;
mod ty;

pub use pretty::{PrettyContext, Rendered};
pub use subst::{Renaming, Rewrite};
pub use ty::{TemplateDef, TemplateId, Type, TypeArena, TypeId};
