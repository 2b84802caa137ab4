//! Classifies a decision and, when needed, searches for a variable order
//! that makes it tree-shaped (§4.4).

use std::time::{Duration, Instant};

use crate::bool_expr::BoolExpr;
use crate::config::AnalysisConfig;
use crate::engine::Bdd;

/// Worst-to-best ordering matches declaration order: `Tree` is the least
/// severe, `NonTreeNonCorrectable` the most — aggregating a set of
/// decisions is `max()`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Classification {
    Tree,
    NonTreeCorrectable,
    NonTreeNonCorrectable,
}

#[derive(Debug, Clone)]
pub struct DecisionAnalysis {
    pub condition_count: usize,
    pub node_count: usize,
    pub classification: Classification,
    pub original_order: Vec<String>,
    pub suggested_order: Option<Vec<String>>,
}

/// Builds the BDD under `original_order`; if it isn't already tree-shaped,
/// searches for a permutation of `original_order` that is, bounded by
/// `config.max_reorder_variables` and, if set, `config.deadline`.
pub fn check_decision(
    expr: &BoolExpr,
    original_order: &[String],
    config: &AnalysisConfig,
) -> DecisionAnalysis {
    log::debug!("building BDD for decision over {} variable(s)", original_order.len());
    let bdd = Bdd::build(expr, original_order);
    let root = bdd.root();
    let condition_count = bdd.variables(root).len();
    let node_count = bdd.node_count(root);

    if bdd.is_tree(root) {
        return DecisionAnalysis {
            condition_count,
            node_count,
            classification: Classification::Tree,
            original_order: original_order.to_vec(),
            suggested_order: None,
        };
    }

    let suggested_order = if original_order.len() <= config.max_reorder_variables {
        find_tree_permutation(expr, original_order, config.deadline)
    } else {
        None
    };

    let classification = if suggested_order.is_some() {
        Classification::NonTreeCorrectable
    } else {
        Classification::NonTreeNonCorrectable
    };

    DecisionAnalysis {
        condition_count,
        node_count,
        classification,
        original_order: original_order.to_vec(),
        suggested_order,
    }
}

fn find_tree_permutation(
    expr: &BoolExpr,
    vars: &[String],
    deadline: Option<Duration>,
) -> Option<Vec<String>> {
    log::debug!("searching for a tree-shaped permutation of {} variable(s)", vars.len());
    let start = Instant::now();
    let mut timed_out = false;

    let found = first_permutation_satisfying(vars, &mut |candidate| {
        if timed_out {
            return false;
        }
        if let Some(budget) = deadline {
            if start.elapsed() >= budget {
                timed_out = true;
                return false;
            }
        }
        let bdd = Bdd::build(expr, candidate);
        bdd.is_tree(bdd.root())
    });

    if timed_out && found.is_none() {
        log::warn!(
            "reorder search over {} variables exceeded its deadline; reporting non-correctable",
            vars.len()
        );
    }
    found
}

/// Deterministic lexicographic enumeration (§9): at each position, pick
/// each remaining element in its current index order, recurse, and stop at
/// the first full permutation for which `visit` returns true.
fn first_permutation_satisfying(
    items: &[String],
    visit: &mut impl FnMut(&[String]) -> bool,
) -> Option<Vec<String>> {
    let mut prefix = Vec::with_capacity(items.len());
    search(items.to_vec(), &mut prefix, visit)
}

fn search(
    remaining: Vec<String>,
    prefix: &mut Vec<String>,
    visit: &mut impl FnMut(&[String]) -> bool,
) -> Option<Vec<String>> {
    if remaining.is_empty() {
        return if visit(prefix) { Some(prefix.clone()) } else { None };
    }
    for i in 0..remaining.len() {
        let mut rest = remaining.clone();
        let item = rest.remove(i);
        prefix.push(item);
        if let Some(found) = search(rest, prefix, visit) {
            return Some(found);
        }
        prefix.pop();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn config(max_reorder_variables: usize) -> AnalysisConfig {
        AnalysisConfig { max_reorder_variables, deadline: None }
    }

    #[test]
    fn scenario_and_of_two_is_tree() {
        let expr = BoolExpr::and(BoolExpr::var("a"), BoolExpr::var("b"));
        let result = check_decision(&expr, &order(&["a", "b"]), &config(5));
        assert_eq!(result.classification, Classification::Tree);
        assert!(result.suggested_order.is_none());
    }

    #[test]
    fn scenario_shared_subexpression_is_correctable() {
        // (b && c) || a, order [b, c, a]: not tree-shaped, but [b, a, c] is.
        let expr = BoolExpr::or(
            BoolExpr::and(BoolExpr::var("b"), BoolExpr::var("c")),
            BoolExpr::var("a"),
        );
        let result = check_decision(&expr, &order(&["b", "c", "a"]), &config(5));
        assert_eq!(result.classification, Classification::NonTreeCorrectable);
        assert_eq!(result.suggested_order, Some(order(&["b", "a", "c"])));
    }

    #[test]
    fn scenario_not_a_and_b_is_tree() {
        let expr = BoolExpr::and(BoolExpr::not(BoolExpr::var("a")), BoolExpr::var("b"));
        let result = check_decision(&expr, &order(&["a", "b"]), &config(5));
        assert_eq!(result.classification, Classification::Tree);
    }

    #[test]
    fn arity_over_bound_skips_reorder_search() {
        // a shared variable reused across six sibling conjunctions is
        // structurally non-tree under every order, and with arity above
        // the bound no search is attempted at all.
        let vars = order(&["a", "b", "c", "d", "e", "f"]);
        let mut expr = BoolExpr::var("a");
        for name in &vars[1..] {
            expr = BoolExpr::or(expr, BoolExpr::and(BoolExpr::var("a"), BoolExpr::var(name.clone())));
        }
        let result = check_decision(&expr, &vars, &config(5));
        assert_eq!(result.classification, Classification::NonTreeNonCorrectable);
        assert!(result.suggested_order.is_none());
    }

    #[test]
    fn zero_deadline_forces_non_correctable() {
        let expr = BoolExpr::or(
            BoolExpr::and(BoolExpr::var("b"), BoolExpr::var("c")),
            BoolExpr::var("a"),
        );
        let cfg = AnalysisConfig { max_reorder_variables: 5, deadline: Some(Duration::from_nanos(0)) };
        let result = check_decision(&expr, &order(&["b", "c", "a"]), &cfg);
        assert_eq!(result.classification, Classification::NonTreeNonCorrectable);
    }

    #[test]
    fn classification_ordering_is_worst_first() {
        assert!(Classification::Tree < Classification::NonTreeCorrectable);
        assert!(Classification::NonTreeCorrectable < Classification::NonTreeNonCorrectable);
    }
}
