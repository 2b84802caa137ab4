//! Folds a host [`Expr`] tree into a [`BoolExpr`] (§4.2, rules 1–5).

use crate::bool_expr::BoolExpr;
use crate::host::{Expr, ExprKind};

/// Rule 1: parens unwrap. Rule 2/3: `&&`/`||` fold to `And`/`Or`, `!` folds
/// to `Not`. Rule 4: only a ternary's condition participates; its branches
/// are never folded in here (the decision finder still visits them
/// separately to find decisions nested inside a branch). Rule 5: anything
/// else — including non-boolean infix operators like `==` — is a leaf
/// carrying its own trimmed source text.
pub fn extract(expr: &dyn Expr) -> BoolExpr {
    match expr.kind() {
        ExprKind::Paren => {
            let children = expr.children();
            extract(children[0])
        }
        ExprKind::Infix => {
            let children = expr.children();
            match expr.operator() {
                Some("&&") => BoolExpr::and(extract(children[0]), extract(children[1])),
                Some("||") => BoolExpr::or(extract(children[0]), extract(children[1])),
                _ => BoolExpr::var(expr.text().trim().to_string()),
            }
        }
        ExprKind::Prefix => {
            let children = expr.children();
            match expr.operator() {
                Some("!") => BoolExpr::not(extract(children[0])),
                _ => BoolExpr::var(expr.text().trim().to_string()),
            }
        }
        ExprKind::Ternary => {
            let children = expr.children();
            extract(children[0])
        }
        ExprKind::Other => BoolExpr::var(expr.text().trim().to_string()),
    }
}
