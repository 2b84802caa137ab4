//! Walks a function body and locates decisions (§4.3).

use crate::host::{Expr, ExprKind};

/// Every subtree whose top operator is `&&` or `||`. Descent stops at a
/// decision root — its own `&&`/`||` children are part of the same
/// decision, not separate ones — but every other node kind (parens,
/// prefixes, ternary branches, non-boolean infix operands, and whatever
/// structural containers the host uses for statements and blocks) is still
/// traversed to discover decisions nested or adjacent to it.
pub fn find_decisions<'a>(body: &'a dyn Expr) -> Vec<&'a dyn Expr> {
    let mut decisions = Vec::new();
    walk(body, &mut decisions);
    decisions
}

fn walk<'a>(expr: &'a dyn Expr, decisions: &mut Vec<&'a dyn Expr>) {
    if is_decision_root(expr) {
        decisions.push(expr);
        walk_nested_ternaries(expr, decisions);
        return;
    }
    for child in expr.children() {
        walk(child, decisions);
    }
}

/// A decision root's subtree is done once recorded, but a `Ternary` buried
/// inside it (under parens, prefixes, or its own `&&`/`||` children) still
/// hides other decisions in its `then`/`else` branches — its `cond` doesn't
/// count, since that's a leaf of the enclosing decision, not a new one.
fn walk_nested_ternaries<'a>(expr: &'a dyn Expr, decisions: &mut Vec<&'a dyn Expr>) {
    if expr.kind() == ExprKind::Ternary {
        let branches = expr.children();
        walk(branches[1], decisions);
        walk(branches[2], decisions);
        return;
    }
    for child in expr.children() {
        walk_nested_ternaries(child, decisions);
    }
}

fn is_decision_root(expr: &dyn Expr) -> bool {
    expr.kind() == ExprKind::Infix && matches!(expr.operator(), Some("&&") | Some("||"))
}
