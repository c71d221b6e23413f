//! Property-based tests for unification and substitution.

use proptest::prelude::*;

use super::state::InferState;
use crate::types::{TemplateId, TypeId};

const TERMINALS: [&str; 3] = ["Int32", "Float64", "String"];

/// Type shape independent of any arena.
#[derive(Clone, Debug)]
enum Shape {
    Terminal(usize),
    /// A fresh variable per occurrence.
    Var,
    List(Box<Shape>),
    Func(Vec<Shape>, Box<Shape>),
}

impl Shape {
    /// Same shape with every variable replaced by the first terminal.
    fn ground(&self) -> Shape {
        match self {
            Shape::Terminal(i) => Shape::Terminal(*i),
            Shape::Var => Shape::Terminal(0),
            Shape::List(inner) => Shape::List(Box::new(inner.ground())),
            Shape::Func(args, result) => Shape::Func(
                args.iter().map(Shape::ground).collect(),
                Box::new(result.ground()),
            ),
        }
    }
}

struct Fixture {
    state: InferState,
    terminals: Vec<TypeId>,
    list: TemplateId,
}

impl Fixture {
    fn new() -> Self {
        let mut state = InferState::new();
        let root = state.create_scope();
        let terminals = TERMINALS
            .iter()
            .map(|name| state.register_terminal(root, name).unwrap())
            .collect();
        let list = state.register_template(root, "List", ["T"]).unwrap();
        Fixture {
            state,
            terminals,
            list,
        }
    }

    /// Build `shape`, collecting the variables it creates.
    fn build(&mut self, shape: &Shape, vars: &mut Vec<TypeId>) -> TypeId {
        match shape {
            Shape::Terminal(i) => self.terminals[*i],
            Shape::Var => {
                let var = self.state.new_var(None);
                vars.push(var);
                var
            }
            Shape::List(inner) => {
                let inner = self.build(inner, vars);
                self.state.create_instance(self.list, vec![inner]).unwrap()
            }
            Shape::Func(args, result) => {
                let args: Vec<TypeId> = args.iter().map(|a| self.build(a, vars)).collect();
                let result = self.build(result, vars);
                self.state.function_type(&args, result)
            }
        }
    }

    fn build_ground(&mut self, shape: &Shape) -> TypeId {
        self.build(&shape.ground(), &mut Vec::new())
    }
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![
        3 => (0..TERMINALS.len()).prop_map(Shape::Terminal),
        1 => Just(Shape::Var),
    ];
    leaf.prop_recursive(3, 24, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(|s| Shape::List(Box::new(s))),
            (prop::collection::vec(inner.clone(), 1..3), inner)
                .prop_map(|(args, result)| Shape::Func(args, Box::new(result))),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_unify_is_reflexive(shape in shape_strategy()) {
        let mut fx = Fixture::new();
        let t = fx.build(&shape, &mut Vec::new());
        let before = fx.state.render(t);
        prop_assert_eq!(fx.state.unify(t, t), Ok(t));
        prop_assert_eq!(fx.state.render(t), before);
    }

    #[test]
    fn prop_equal_ground_shapes_unify(shape in shape_strategy()) {
        let mut fx = Fixture::new();
        let a = fx.build_ground(&shape);
        let b = fx.build_ground(&shape);
        prop_assert!(fx.state.unify(a, b).is_ok());
        prop_assert_eq!(fx.state.render(a), fx.state.render(b));
    }

    #[test]
    fn prop_var_takes_on_any_type(shape in shape_strategy()) {
        let mut fx = Fixture::new();
        let t = fx.build(&shape, &mut Vec::new());
        let var = fx.state.new_var(None);
        prop_assert_eq!(fx.state.unify(var, t), Ok(t));
        prop_assert_eq!(fx.state.actual(var), fx.state.actual(t));
        prop_assert_eq!(fx.state.render(var), fx.state.render(t));
    }

    #[test]
    fn prop_open_shape_narrows_to_ground(shape in shape_strategy()) {
        let mut fx = Fixture::new();
        let mut vars = Vec::new();
        let open = fx.build(&shape, &mut vars);
        let ground = fx.build_ground(&shape);

        prop_assert!(fx.state.unify(open, ground).is_ok());
        for var in vars {
            prop_assert_eq!(fx.state.actual(var), fx.terminals[0]);
        }
        prop_assert_eq!(fx.state.render(open), fx.state.render(ground));
    }

    #[test]
    fn prop_clone_is_independent(shape in shape_strategy()) {
        let mut fx = Fixture::new();
        let mut vars = Vec::new();
        let t = fx.build(&shape, &mut vars);
        let before = fx.state.render(t);

        let copy = fx.state.clone_type(t);
        let ground = fx.build_ground(&shape);
        prop_assert!(fx.state.unify(copy, ground).is_ok());

        for var in vars {
            prop_assert!(fx.state.is_unbound_var(var));
        }
        prop_assert_eq!(fx.state.render(t), before);
    }

    #[test]
    fn prop_unseal_instances_are_independent(shape in shape_strategy()) {
        let mut fx = Fixture::new();
        let mut vars = Vec::new();
        let t = fx.build(&shape, &mut vars);
        let sealed = fx.state.seal(t);

        let first = fx.state.unseal(sealed);
        let second = fx.state.unseal(sealed);
        let second_before = fx.state.render(second);

        let ground = fx.build_ground(&shape);
        prop_assert!(fx.state.unify(first, ground).is_ok());

        prop_assert_eq!(fx.state.render(second), second_before);
        for var in vars {
            prop_assert!(fx.state.is_unbound_var(var));
        }
    }

    #[test]
    fn prop_distinct_terminals_fail(i in 0..TERMINALS.len(), j in 0..TERMINALS.len()) {
        prop_assume!(i != j);
        let mut fx = Fixture::new();
        let (a, b) = (fx.terminals[i], fx.terminals[j]);
        prop_assert!(fx.state.unify(a, b).is_err());
    }

    #[test]
    fn prop_function_rendering(
        args in prop::collection::vec(0..TERMINALS.len(), 1..5),
        result in 0..TERMINALS.len(),
    ) {
        let mut fx = Fixture::new();
        let arg_ids: Vec<TypeId> = args.iter().map(|i| fx.terminals[*i]).collect();
        let f = fx.state.function_type(&arg_ids, fx.terminals[result]);

        let names: Vec<&str> = args.iter().map(|i| TERMINALS[*i]).collect();
        let expected = format!("({}) -> {}", names.join(", "), TERMINALS[result]);
        prop_assert_eq!(fx.state.render(f), expected);
    }
}
