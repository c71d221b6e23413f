//! Unification algorithm for type inference.
//!
//! Implements unification for:
//! - Variables (one-shot binding with occurs check)
//! - Terminals and constraints (identity)
//! - Template instances (same template, argument-wise)
//! - Unions (overload resolution by trial unification and specificity)

use crate::error::TypeError;
use crate::types::{PrettyContext, Type, TypeId};

use super::state::InferState;

/// Result type for unification.
pub type UnifyResult<T> = Result<T, TypeError>;

/// An overload that survived its trial unification.
#[derive(Clone, Copy, Debug)]
struct Candidate {
    member: TypeId,
    score: usize,
}

impl InferState {
    /// Unify two types, binding variables as needed.
    ///
    /// Returns the representative of the unified pair: the non-variable
    /// side when a variable was bound, otherwise `a`.
    ///
    /// On failure, bindings made before the failing step are kept unless
    /// [`UnifyConfig::rollback_on_failure`](crate::UnifyConfig) is set.
    pub fn unify(&mut self, a: TypeId, b: TypeId) -> UnifyResult<TypeId> {
        let mark = self.mark();
        let result = self.unify_impl(a, b);
        if let Err(err) = &result {
            if self.config().rollback_on_failure {
                tracing::debug!(error = %err, "rolling back failed unification");
                self.rewind(mark);
            }
        }
        self.commit(mark);
        result
    }

    fn unify_impl(&mut self, a: TypeId, b: TypeId) -> UnifyResult<TypeId> {
        let a = self.actual(a);
        let b = self.actual(b);
        tracing::trace!(a = %self.display(a), b = %self.display(b), "unify");

        match (self.node(a), self.node(b)) {
            // A free variable is never bound to itself.
            (Type::Var { .. }, _) if a == b => Ok(a),

            // Overload sets, including against a free variable.
            (Type::Union { members }, _) => {
                let members = members.clone();
                self.unify_union(a, &members, b)
            }
            (_, Type::Union { members }) => {
                let members = members.clone();
                self.unify_union(b, &members, a)
            }

            (Type::Var { .. }, _) => {
                self.bind_var(a, b)?;
                Ok(b)
            }
            (_, Type::Var { .. }) => {
                self.bind_var(b, a)?;
                Ok(a)
            }

            _ if a == b => Ok(a),

            (
                Type::Instance {
                    template: t1,
                    args: args1,
                },
                Type::Instance {
                    template: t2,
                    args: args2,
                },
            ) if t1 == t2 => {
                // Same template, so same arity.
                let pairs: Vec<(TypeId, TypeId)> =
                    args1.iter().copied().zip(args2.iter().copied()).collect();
                for (x, y) in pairs {
                    self.unify_impl(x, y)?;
                }
                Ok(a)
            }

            _ => Err(self.incompatible(a, b)),
        }
    }

    /// Bind the free variable `var` to `ty` (with occurs check).
    fn bind_var(&mut self, var: TypeId, ty: TypeId) -> UnifyResult<()> {
        if self.occurs_in(var, ty) {
            let mut ctx = PrettyContext::new();
            return Err(TypeError::InfiniteType {
                var: self.render_with(&mut ctx, var),
                ty: self.render_with(&mut ctx, ty),
            });
        }
        self.bind(var, ty);
        Ok(())
    }

    /// Resolve the overload set `union` against `target`.
    ///
    /// A free target is bound to the whole set, deferring the choice.
    /// Otherwise every member is tried on a fresh instantiation against a
    /// clone of the target; the trial is rewound whatever its outcome. Of
    /// the members that fit, the most specific wins outright or the call is
    /// ambiguous. Only the final unification with the winner may bind
    /// variables reachable from `target`.
    fn unify_union(
        &mut self,
        union: TypeId,
        members: &[TypeId],
        target: TypeId,
    ) -> UnifyResult<TypeId> {
        let target = self.actual(target);
        if self.node(target).is_unbound_var() {
            self.bind_var(target, union)?;
            return Ok(union);
        }

        let mut candidates = Vec::new();
        for &member in members {
            let score = self.specificity(member);
            let mark = self.mark();
            let instance = self.unseal(member);
            let probe = self.clone_type(target);
            let outcome = self.unify_impl(instance, probe);
            self.rewind(mark);

            match outcome {
                Ok(_) => candidates.push(Candidate { member, score }),
                Err(err) if err.rejects_candidate() => {
                    tracing::debug!(candidate = %self.display(member), error = %err, "overload rejected");
                }
                Err(err) => return Err(err),
            }
        }

        // Stable, so equal scores keep declaration order.
        candidates.sort_by(|x, y| y.score.cmp(&x.score));

        let winner = match candidates.as_slice() {
            [] => {
                let mut ctx = PrettyContext::new();
                return Err(TypeError::NoMatch {
                    target: self.render_with(&mut ctx, target),
                    union: self.render_with(&mut ctx, union),
                });
            }
            [only] => *only,
            [best, second, ..] if best.score > second.score => *best,
            [best, ..] => {
                let mut ctx = PrettyContext::new();
                let tied = candidates
                    .iter()
                    .filter(|c| c.score == best.score)
                    .map(|c| self.render_with(&mut ctx, c.member))
                    .collect();
                return Err(TypeError::Ambiguous {
                    target: self.render_with(&mut ctx, target),
                    union: self.render_with(&mut ctx, union),
                    candidates: tied,
                });
            }
        };

        tracing::debug!(
            winner = %self.display(winner.member),
            score = winner.score,
            viable = candidates.len(),
            "overload resolved"
        );

        let instance = self.unseal(winner.member);
        self.unify_impl(instance, target)
    }

    /// Count of concrete nodes in `ty`, used to rank overloads.
    ///
    /// Variables and constraints count 0, terminals and unions 1, an
    /// instance 1 plus its arguments.
    pub fn specificity(&self, ty: TypeId) -> usize {
        let ty = self.actual(ty);
        match self.node(ty) {
            Type::Var { .. } | Type::Constraint { .. } => 0,
            Type::Instance { args, .. } => {
                1 + args.iter().map(|arg| self.specificity(*arg)).sum::<usize>()
            }
            Type::Terminal { .. } | Type::Union { .. } => 1,
        }
    }

    fn incompatible(&self, a: TypeId, b: TypeId) -> TypeError {
        let mut ctx = PrettyContext::new();
        TypeError::Incompatible {
            left: self.render_with(&mut ctx, a),
            right: self.render_with(&mut ctx, b),
        }
    }
}
