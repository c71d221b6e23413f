//! Call-site unification.
//!
//! A call `f(x, y)` with result `r` is checked by instantiating the callee's
//! type and unifying it with the curried shape `(x, y) -> r`. Overloaded
//! callees are resolved by the union rules in `unify`.

use crate::error::TypeError;
use crate::types::TypeId;

use super::state::InferState;

impl InferState {
    /// Unify a call of `callee` with `args`, producing `result`.
    ///
    /// The callee is instantiated first, so a sealed (generic) function can
    /// be called at different types. On success, `result` and any free
    /// argument variables are narrowed.
    pub fn unify_call(
        &mut self,
        callee: TypeId,
        args: &[TypeId],
        result: TypeId,
    ) -> Result<TypeId, TypeError> {
        let shape = self.function_type(args, result);
        let instance = self.unseal(callee);
        tracing::debug!(
            callee = %self.display(instance),
            shape = %self.display(shape),
            "unify call"
        );
        self.unify(instance, shape)
    }
}
