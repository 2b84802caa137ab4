//! The reference adapter's expression/function representation, wired into
//! the host interface traits.

use std::borrow::Cow;

use crate::host::{Expr, ExprKind, FunctionLike, SourceFile};

#[derive(Debug, Clone)]
pub enum ExprNode {
    Paren(Box<ExprNode>),
    Infix { op: &'static str, lhs: Box<ExprNode>, rhs: Box<ExprNode> },
    Prefix { op: &'static str, operand: Box<ExprNode> },
    Ternary { cond: Box<ExprNode>, then_branch: Box<ExprNode>, else_branch: Box<ExprNode> },
    Atom(String),
    /// Not an expression in its own right: a container for every
    /// condition expression found inside a block or function body, so the
    /// decision finder has a single root to walk.
    Sequence(Vec<ExprNode>),
}

impl Expr for ExprNode {
    fn kind(&self) -> ExprKind {
        match self {
            ExprNode::Paren(_) => ExprKind::Paren,
            ExprNode::Infix { .. } => ExprKind::Infix,
            ExprNode::Prefix { .. } => ExprKind::Prefix,
            ExprNode::Ternary { .. } => ExprKind::Ternary,
            ExprNode::Atom(_) | ExprNode::Sequence(_) => ExprKind::Other,
        }
    }

    fn operator(&self) -> Option<&str> {
        match self {
            ExprNode::Infix { op, .. } => Some(op),
            ExprNode::Prefix { op, .. } => Some(op),
            _ => None,
        }
    }

    fn children(&self) -> Vec<&dyn Expr> {
        match self {
            ExprNode::Paren(inner) => vec![inner.as_ref()],
            ExprNode::Infix { lhs, rhs, .. } => vec![lhs.as_ref(), rhs.as_ref()],
            ExprNode::Prefix { operand, .. } => vec![operand.as_ref()],
            ExprNode::Ternary { cond, then_branch, else_branch } => {
                vec![cond.as_ref(), then_branch.as_ref(), else_branch.as_ref()]
            }
            ExprNode::Atom(_) => vec![],
            ExprNode::Sequence(items) => items.iter().map(|e| e as &dyn Expr).collect(),
        }
    }

    fn text(&self) -> Cow<'_, str> {
        match self {
            ExprNode::Atom(s) => Cow::Borrowed(s.trim()),
            _ => Cow::Borrowed(""),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FunctionDecl {
    pub name: String,
    pub line: u32,
    pub body: Option<ExprNode>,
}

impl FunctionLike for FunctionDecl {
    fn name(&self) -> &str {
        &self.name
    }

    fn line(&self) -> u32 {
        self.line
    }

    fn body(&self) -> Option<&dyn Expr> {
        self.body.as_ref().map(|b| b as &dyn Expr)
    }
}

#[derive(Debug, Clone)]
pub struct ParsedFile {
    pub functions: Vec<FunctionDecl>,
}

impl SourceFile for ParsedFile {
    fn functions(&self) -> Vec<&dyn FunctionLike> {
        self.functions.iter().map(|f| f as &dyn FunctionLike).collect()
    }
}
