//! A language-independent boolean expression tree: the extractor's output
//! and the BDD engine's input.

use rustc_hash::FxHashSet;

/// A boolean expression folded out of a host-language decision.
///
/// Leaves are opaque source text (`Var`); everything else the host parser
/// knows about a condition — comparisons, calls, arithmetic — is captured
/// as the textual form of a single `Var` leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoolExpr {
    Var(String),
    And(Box<BoolExpr>, Box<BoolExpr>),
    Or(Box<BoolExpr>, Box<BoolExpr>),
    Not(Box<BoolExpr>),
}

impl BoolExpr {
    pub fn var(text: impl Into<String>) -> Self {
        BoolExpr::Var(text.into())
    }

    pub fn and(l: BoolExpr, r: BoolExpr) -> Self {
        BoolExpr::And(Box::new(l), Box::new(r))
    }

    pub fn or(l: BoolExpr, r: BoolExpr) -> Self {
        BoolExpr::Or(Box::new(l), Box::new(r))
    }

    pub fn not(x: BoolExpr) -> Self {
        BoolExpr::Not(Box::new(x))
    }
}

/// Variables in first-occurrence order, left to right, deduplicated.
///
/// This is both the decision's "original order" and the seed permutation
/// for the tree checker's reorder search.
pub fn collect_variable_order(expr: &BoolExpr) -> Vec<String> {
    let mut seen = FxHashSet::default();
    let mut order = Vec::new();
    collect(expr, &mut seen, &mut order);
    order
}

fn collect(expr: &BoolExpr, seen: &mut FxHashSet<String>, order: &mut Vec<String>) {
    match expr {
        BoolExpr::Var(name) => {
            if seen.insert(name.clone()) {
                order.push(name.clone());
            }
        }
        BoolExpr::And(l, r) | BoolExpr::Or(l, r) => {
            collect(l, seen, order);
            collect(r, seen, order);
        }
        BoolExpr::Not(x) => collect(x, seen, order),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_variables_left_to_right_deduplicated() {
        let expr = BoolExpr::or(
            BoolExpr::and(BoolExpr::var("b"), BoolExpr::var("c")),
            BoolExpr::and(BoolExpr::var("a"), BoolExpr::var("b")),
        );
        assert_eq!(collect_variable_order(&expr), vec!["b", "c", "a"]);
    }

    #[test]
    fn single_variable_order_is_itself() {
        let expr = BoolExpr::var("x");
        assert_eq!(collect_variable_order(&expr), vec!["x"]);
    }
}
