use super::*;
use crate::node::BoundLiteral;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::convert::Infallible;
use tfport_ir::{ArithmeticOp, Literal, Span};
use tfport_types::Type;

fn int(value: i64) -> BoundExpr {
    BoundExpr::Literal(BoundLiteral {
        ty: Type::NUMBER,
        value: Literal::Int(value),
        span: Span::DUMMY,
    })
}

fn string(value: &str) -> BoundExpr {
    BoundExpr::Literal(BoundLiteral {
        ty: Type::STRING,
        value: Literal::string(value),
        span: Span::DUMMY,
    })
}

fn add(exprs: Vec<BoundExpr>) -> BoundExpr {
    BoundExpr::Arithmetic(BoundArithmetic {
        op: ArithmeticOp::Add,
        exprs,
        span: Span::DUMMY,
    })
}

fn int_value(node: &BoundNode) -> Option<i64> {
    match node {
        BoundNode::Expr(BoundExpr::Literal(BoundLiteral {
            value: Literal::Int(v),
            ..
        })) => Some(*v),
        _ => None,
    }
}

/// A post visitor deleting the integer literals in `doomed` and logging
/// every node it sees.
fn delete_ints<'a>(
    doomed: &'a [i64],
    seen: &'a mut Vec<&'static str>,
) -> impl FnMut(BoundNode) -> Result<Option<BoundNode>, Infallible> + 'a {
    move |node| {
        seen.push(node.kind_name());
        match int_value(&node) {
            Some(v) if doomed.contains(&v) => Ok(None),
            _ => Ok(Some(node)),
        }
    }
}

fn run(node: BoundNode) -> Option<BoundNode> {
    match visit_bound_node::<Infallible, _, _>(node, identity, identity) {
        Ok(result) => result,
        Err(e) => match e {},
    }
}

#[test]
fn identity_keeps_the_tree() {
    let tree: BoundNode = BoundNode::MapProperty(MapProperty {
        elements: [
            ("a".to_owned(), BoundNode::Expr(add(vec![int(1), int(2)]))),
            (
                "b".to_owned(),
                BoundNode::ListProperty(ListProperty {
                    elements: vec![string("x").into(), string("y").into()],
                    span: Span::DUMMY,
                }),
            ),
        ]
        .into_iter()
        .collect(),
        span: Span::DUMMY,
    });
    assert_eq!(run(tree.clone()), Some(tree));
}

#[test]
fn deleting_every_operand_deletes_the_arithmetic() {
    let mut seen = Vec::new();
    let tree = BoundNode::Expr(add(vec![int(1), int(2), int(3)]));
    let result = visit_bound_node(tree, identity, delete_ints(&[1, 2, 3], &mut seen));
    assert_eq!(result, Ok(None));
    // The arithmetic's own post never ran.
    assert_eq!(seen, vec!["literal", "literal", "literal"]);
}

#[test]
fn deleting_one_operand_keeps_the_rest_in_order() {
    let mut seen = Vec::new();
    let tree = BoundNode::Expr(add(vec![int(1), int(2), int(3)]));
    let result = visit_bound_node(tree, identity, delete_ints(&[2], &mut seen));
    assert_eq!(result, Ok(Some(BoundNode::Expr(add(vec![int(1), int(3)])))));
    assert_eq!(seen, vec!["literal", "literal", "literal", "arithmetic"]);
}

#[test]
fn deleting_every_argument_deletes_the_call() {
    let mut seen = Vec::new();
    let tree = BoundNode::Expr(BoundExpr::Call(BoundCall {
        func: "format".to_owned(),
        ty: Type::STRING,
        args: vec![int(1), int(2)],
        span: Span::DUMMY,
    }));
    let result = visit_bound_node(tree, identity, delete_ints(&[1, 2], &mut seen));
    assert_eq!(result, Ok(None));
    assert_eq!(seen, vec!["literal", "literal"]);
}

#[test]
fn deleting_every_part_deletes_the_output() {
    let mut seen = Vec::new();
    let tree = BoundNode::Expr(BoundExpr::Output(BoundOutput {
        exprs: vec![int(7)],
        span: Span::DUMMY,
    }));
    let result = visit_bound_node(tree, identity, delete_ints(&[7], &mut seen));
    assert_eq!(result, Ok(None));
    assert_eq!(seen, vec!["literal"]);
}

#[test]
fn call_without_arguments_survives() {
    let mut seen = Vec::new();
    let tree = BoundNode::Expr(BoundExpr::Call(BoundCall {
        func: "list".to_owned(),
        ty: Type::UNKNOWN.list_of(),
        args: vec![],
        span: Span::DUMMY,
    }));
    let result = visit_bound_node(tree.clone(), identity, delete_ints(&[1], &mut seen));
    assert_eq!(result, Ok(Some(tree)));
    assert_eq!(seen, vec!["call"]);
}

#[test]
fn post_sees_the_pre_replacement() {
    let mut observed = Vec::new();
    let result = visit_bound_node::<Infallible, _, _>(
        BoundNode::Expr(int(1)),
        |node| match int_value(&node) {
            Some(1) => Ok(Some(BoundNode::Expr(int(42)))),
            _ => Ok(Some(node)),
        },
        |node| {
            observed.push(int_value(&node));
            Ok(Some(node))
        },
    );
    assert_eq!(result, Ok(Some(BoundNode::Expr(int(42)))));
    assert_eq!(observed, vec![Some(42)]);
}

#[test]
fn descent_follows_the_replacement() {
    let mut observed = Vec::new();
    let result = visit_bound_node::<Infallible, _, _>(
        BoundNode::Expr(string("placeholder")),
        |node| match node {
            BoundNode::Expr(BoundExpr::Literal(ref lit)) if lit.ty == Type::STRING => {
                Ok(Some(BoundNode::Expr(add(vec![int(1), int(2)]))))
            }
            other => Ok(Some(other)),
        },
        |node| {
            observed.push(node.kind_name());
            Ok(Some(node))
        },
    );
    assert_eq!(result, Ok(Some(BoundNode::Expr(add(vec![int(1), int(2)])))));
    assert_eq!(observed, vec!["literal", "literal", "arithmetic"]);
}

#[test]
fn pre_deletion_skips_children_and_post() {
    let mut posts = 0;
    let tree = BoundNode::Expr(add(vec![int(1), add(vec![int(2), int(3)]), int(4)]));
    let result = visit_bound_node::<Infallible, _, _>(
        tree,
        |node| match &node {
            BoundNode::Expr(BoundExpr::Arithmetic(arith)) if arith.exprs.len() == 2 => Ok(None),
            _ => Ok(Some(node)),
        },
        |node| {
            posts += 1;
            Ok(Some(node))
        },
    );
    assert_eq!(result, Ok(Some(BoundNode::Expr(add(vec![int(1), int(4)])))));
    // 1, 4 and the outer arithmetic.
    assert_eq!(posts, 3);
}

#[test]
fn already_empty_lists_survive() {
    let empty_output = BoundNode::Expr(BoundExpr::Output(BoundOutput {
        exprs: Vec::new(),
        span: Span::DUMMY,
    }));
    assert_eq!(run(empty_output.clone()), Some(empty_output));

    let empty_list = BoundNode::ListProperty(ListProperty {
        elements: Vec::new(),
        span: Span::DUMMY,
    });
    assert_eq!(run(empty_list.clone()), Some(empty_list));
}

#[test]
fn emptied_list_property_is_deleted() {
    let mut seen = Vec::new();
    let tree = BoundNode::ListProperty(ListProperty {
        elements: vec![int(1).into(), int(2).into()],
        span: Span::DUMMY,
    });
    let result = visit_bound_node(tree, identity, delete_ints(&[1, 2], &mut seen));
    assert_eq!(result, Ok(None));
    assert_eq!(seen, vec!["literal", "literal"]);
}

#[test]
fn map_entries_are_removed_but_the_map_stays() {
    let mut seen = Vec::new();
    let tree = BoundNode::MapProperty(MapProperty {
        elements: [
            ("a".to_owned(), BoundNode::Expr(int(1))),
            ("b".to_owned(), BoundNode::Expr(int(2))),
        ]
        .into_iter()
        .collect(),
        span: Span::DUMMY,
    });
    let result = visit_bound_node(tree, identity, delete_ints(&[1, 2], &mut seen));
    assert_eq!(
        result,
        Ok(Some(BoundNode::MapProperty(MapProperty {
            elements: BTreeMap::new(),
            span: Span::DUMMY,
        })))
    );
    assert_eq!(seen, vec!["literal", "literal", "map_property"]);
}

#[test]
fn deletion_propagates_through_nested_lists() {
    let mut seen = Vec::new();
    let inner = ListProperty {
        elements: vec![int(1).into()],
        span: Span::DUMMY,
    };
    let tree = BoundNode::MapProperty(MapProperty {
        elements: [
            ("gone".to_owned(), BoundNode::ListProperty(inner)),
            ("kept".to_owned(), BoundNode::Expr(int(2))),
        ]
        .into_iter()
        .collect(),
        span: Span::DUMMY,
    });
    let result = visit_bound_node(tree, identity, delete_ints(&[1], &mut seen));
    let map = match result {
        Ok(Some(BoundNode::MapProperty(map))) => map,
        other => panic!("expected a map, got {other:?}"),
    };
    assert_eq!(map.elements.keys().collect::<Vec<_>>(), vec!["kept"]);
}

#[test]
fn errors_abort_the_walk() {
    let mut posts = Vec::new();
    let tree = BoundNode::Expr(add(vec![int(1), int(2), int(3)]));
    let result = visit_bound_node(tree, identity, |node| {
        let value = int_value(&node);
        posts.push(value);
        if value == Some(2) {
            Err("boom")
        } else {
            Ok(Some(node))
        }
    });
    assert_eq!(result, Err("boom"));
    assert_eq!(posts, vec![Some(1), Some(2)]);
}

#[test]
fn fixed_slots_are_rewritten() {
    let tree = BoundExpr::Index(BoundIndex {
        ty: Type::UNKNOWN,
        target: Box::new(string("list")),
        key: Box::new(int(0)),
        span: Span::DUMMY,
    });
    let result = visit_bound_expr::<Infallible, _, _>(tree, identity, |node| {
        match int_value(&node) {
            Some(0) => Ok(Some(BoundNode::Expr(int(1)))),
            _ => Ok(Some(node)),
        }
    });
    let index = match result {
        Ok(Some(BoundExpr::Index(index))) => index,
        other => panic!("expected an index, got {other:?}"),
    };
    assert_eq!(*index.key, int(1));
    assert_eq!(*index.target, string("list"));
}

#[test]
#[should_panic(expected = "conditional true branch deleted")]
fn deleting_a_required_slot_panics() {
    let tree = BoundExpr::Conditional(BoundConditional {
        ty: Type::NUMBER,
        cond: Box::new(string("true")),
        then_expr: Box::new(int(1)),
        else_expr: Box::new(int(2)),
        span: Span::DUMMY,
    });
    let mut seen = Vec::new();
    let _ = visit_bound_expr(tree, identity, delete_ints(&[1], &mut seen));
}

#[test]
#[should_panic(expected = "list_property in expression position")]
fn container_in_expression_position_panics() {
    let tree = add(vec![int(1)]);
    let _ = visit_bound_expr::<Infallible, _, _>(tree, identity, |node| {
        match int_value(&node) {
            Some(1) => Ok(Some(BoundNode::ListProperty(ListProperty {
                elements: Vec::new(),
                span: Span::DUMMY,
            }))),
            _ => Ok(Some(node)),
        }
    });
}

proptest! {
    #[test]
    fn deletion_keeps_survivor_order(
        values in proptest::collection::vec(0i64..1000, 1..12),
        mask in proptest::collection::vec(any::<bool>(), 12),
    ) {
        let doomed: Vec<i64> = values
            .iter()
            .zip(&mask)
            .filter(|(_, delete)| **delete)
            .map(|(v, _)| *v)
            .collect();
        let survivors: Vec<i64> = values.iter().copied().filter(|v| !doomed.contains(v)).collect();

        let mut seen = Vec::new();
        let tree = BoundNode::Expr(add(values.iter().copied().map(int).collect()));
        let result = visit_bound_node(tree, identity, delete_ints(&doomed, &mut seen));

        if survivors.is_empty() {
            prop_assert_eq!(result, Ok(None));
        } else {
            prop_assert_eq!(
                result,
                Ok(Some(BoundNode::Expr(add(survivors.into_iter().map(int).collect()))))
            );
        }
    }
}
