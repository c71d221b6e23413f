//! Tunify: unification over nominal types, templates and overload sets.
//!
//! This library is the type core for a small statically typed language. It
//! features:
//!
//! - **Terminals and templates** (`Int32`, `List<T>`) organized in lexical scopes
//! - **Unification variables** bound once, through a rewindable trail
//! - **Sealing and unsealing** to generalize and instantiate generic functions
//! - **Overload sets** resolved by trial unification and specificity
//! - **Curried function types** rendered as `(A, B) -> R`
//!
//! ```
//! use tunify::InferState;
//!
//! let mut state = InferState::new();
//! let root = state.create_scope();
//! let int = state.register_terminal(root, "Int32").unwrap();
//!
//! let t = state.new_var(Some("T"));
//! let id_open = state.function_type(&[t], t);
//! let id = state.seal(id_open);
//!
//! let result = state.new_var(None);
//! state.unify_call(id, &[int], result).unwrap();
//! assert_eq!(state.render(result), "Int32");
//! ```

pub mod config;
pub mod error;
pub mod infer;
pub mod types;

pub use config::UnifyConfig;
pub use error::{Result, ScopeError, TunifyError, TypeError};
pub use infer::{InferState, ScopeEntry, ScopeId, TemplateParams};
pub use types::{PrettyContext, TemplateDef, TemplateId, Type, TypeId};
