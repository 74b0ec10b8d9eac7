//! Graph nodes a bound tree depends on.

use rustc_hash::FxHashSet;
use tfport_graph::NodeRef;

use crate::node::{BoundExpr, BoundNode};
use crate::visitor::{walk_expr, Visitor};

/// Every graph node referenced by a variable access in `node`, without
/// duplicates, in the order first referenced.
pub fn dependencies(node: &BoundNode) -> Vec<NodeRef> {
    let mut collector = Collector::default();
    collector.visit_node(node);
    collector.found
}

#[derive(Default)]
struct Collector {
    seen: FxHashSet<NodeRef>,
    found: Vec<NodeRef>,
}

impl Visitor for Collector {
    fn visit_expr(&mut self, expr: &BoundExpr) {
        if let BoundExpr::VariableAccess(access) = expr {
            if let Some(node) = access.node {
                if self.seen.insert(node) {
                    self.found.push(node);
                }
            }
        }
        walk_expr(self, expr);
    }
}
