//! Error types for tunify.
//!
//! Every error carries the rendered form of the types involved; handles are
//! meaningless outside the arena that produced them.

use thiserror::Error;

/// Result type for tunify operations.
pub type Result<T> = std::result::Result<T, TunifyError>;

/// Main error type for tunify.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TunifyError {
    #[error("Scope error: {0}")]
    Scope(#[from] ScopeError),

    #[error("Type error: {0}")]
    Type(#[from] TypeError),
}

/// Scope lookup and registration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScopeError {
    #[error("Not defined: {name}")]
    Undefined { name: String },

    #[error("Could not find a name for {ty}")]
    Unnamed { ty: String },

    #[error("'{name}' is not a {expected}")]
    KindMismatch { name: String, expected: EntryKind },
}

/// What a scope entry was expected to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Type,
    Template,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKind::Type => write!(f, "type"),
            EntryKind::Template => write!(f, "template"),
        }
    }
}

/// Unification and type construction errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("Incompatible types: {left} and {right}")]
    Incompatible { left: String, right: String },

    #[error("No match for {target} in {union}")]
    NoMatch { target: String, union: String },

    #[error("Ambiguous {target} for {union}")]
    Ambiguous {
        target: String,
        union: String,
        /// Rendered candidates that tied for the best score.
        candidates: Vec<String>,
    },

    #[error("Infinite type: {var} occurs in {ty}")]
    InfiniteType { var: String, ty: String },

    #[error("Wrong number of arguments for {template}: expected {expected}, found {found}")]
    ArityMismatch {
        template: String,
        expected: usize,
        found: usize,
    },

    #[error("Template {template} has {params} parameters but {constraints} constraints")]
    MalformedTemplate {
        template: String,
        params: usize,
        constraints: usize,
    },
}

impl TypeError {
    /// Whether this failure only means "this overload candidate does not fit".
    pub fn rejects_candidate(&self) -> bool {
        match self {
            TypeError::Incompatible { .. }
            | TypeError::NoMatch { .. }
            | TypeError::Ambiguous { .. }
            | TypeError::InfiniteType { .. } => true,
            TypeError::ArityMismatch { .. } | TypeError::MalformedTemplate { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = TypeError::Incompatible {
            left: "List<Int32>".into(),
            right: "Int32".into(),
        };
        assert_eq!(err.to_string(), "Incompatible types: List<Int32> and Int32");

        let err: TunifyError = ScopeError::Undefined { name: "Foo".into() }.into();
        assert_eq!(err.to_string(), "Scope error: Not defined: Foo");

        let err = ScopeError::KindMismatch {
            name: "List".into(),
            expected: EntryKind::Type,
        };
        assert_eq!(err.to_string(), "'List' is not a type");
    }

    #[test]
    fn test_rejects_candidate() {
        assert!(TypeError::NoMatch {
            target: "a".into(),
            union: "{}".into()
        }
        .rejects_candidate());
        assert!(!TypeError::ArityMismatch {
            template: "List".into(),
            expected: 1,
            found: 2
        }
        .rejects_candidate());
        assert!(!TypeError::MalformedTemplate {
            template: "Map".into(),
            params: 2,
            constraints: 1
        }
        .rejects_candidate());
    }
}
