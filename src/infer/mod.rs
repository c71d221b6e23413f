//! Unification engine.
//!
//! This module provides the core of tunify:
//! - `state`: Inference state owning the type arena, bindings and config
//! - `scope`: Parent-linked scopes naming types and templates
//! - `unify`: Unification with overload resolution over unions
//! - `call`: Call-site unification against curried function types

mod call;
#[cfg(test)]
mod proptests;
mod scope;
mod state;
mod unify;

pub use scope::{ScopeEntry, ScopeId, TemplateParams};
pub use state::InferState;
pub use unify::UnifyResult;
