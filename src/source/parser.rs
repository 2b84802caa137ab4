//! A small hand-rolled recursive-descent reader for a C/Swift-like subset:
//! `func`/`init` declarations, `if`/`while`/`guard` conditions, and
//! `&&`/`||`/`!`/`?:`/parens inside them.
//!
//! This exists to make the façade and CLI runnable end to end against real
//! files (§6). It is explicitly not the focus of this crate: it only
//! recognizes condition expressions reachable from `if`/`while`/`guard`
//! statements, not arbitrary bare expression statements, and treats
//! anything it cannot make sense of as a single opaque atom rather than
//! failing the whole file.

use std::path::Path;

use super::ast::{ExprNode, FunctionDecl, ParsedFile};
use super::lexer::{lex, Token};
use crate::error::AnalysisError;

pub fn parse_source_file(path: &Path) -> Result<ParsedFile, AnalysisError> {
    let text = std::fs::read_to_string(path)
        .map_err(|source| AnalysisError::Io { path: path.to_path_buf(), source })?;
    parse_source_str(&text).map_err(|message| AnalysisError::Parse { path: path.to_path_buf(), message })
}

pub fn parse_source_str(text: &str) -> Result<ParsedFile, String> {
    let tokens = lex(text);
    let mut parser = Parser::new(&tokens);
    let functions = parser.parse_file()?;
    Ok(ParsedFile { functions })
}

struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    /// Tokens (other than `&&`, `||`, `?`, `:`) that terminate the
    /// innermost condition expression currently being parsed.
    stop: Vec<&'static str>,
}

impl<'t> Parser<'t> {
    fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, pos: 0, stop: Vec::new() }
    }

    fn peek_text(&self) -> Option<&str> {
        self.tokens.get(self.pos).map(|t| t.text.as_str())
    }

    fn advance(&mut self) -> Option<&Token> {
        let t = self.tokens.get(self.pos);
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn expect(&mut self, text: &str) -> Result<(), String> {
        match self.advance() {
            Some(t) if t.text == text => Ok(()),
            Some(t) => Err(format!("expected `{text}`, found `{}` at line {}", t.text, t.line)),
            None => Err(format!("expected `{text}`, found end of input")),
        }
    }

    fn parse_file(&mut self) -> Result<Vec<FunctionDecl>, String> {
        let mut functions = Vec::new();
        while !self.at_end() {
            match self.peek_text() {
                Some("func") => functions.push(self.parse_function()?),
                Some("init") => functions.push(self.parse_init()?),
                _ => {
                    self.advance();
                }
            }
        }
        Ok(functions)
    }

    fn parse_function(&mut self) -> Result<FunctionDecl, String> {
        let line = self.tokens.get(self.pos).map(|t| t.line).unwrap_or(0);
        self.expect("func")?;
        let name = match self.advance() {
            Some(t) => t.text.clone(),
            None => return Err(format!("expected function name at line {line}")),
        };
        self.skip_parameter_list()?;
        self.skip_to_body_or_end();
        let body = self.parse_optional_body()?;
        Ok(FunctionDecl { name, line, body })
    }

    fn parse_init(&mut self) -> Result<FunctionDecl, String> {
        let line = self.tokens.get(self.pos).map(|t| t.line).unwrap_or(0);
        self.expect("init")?;
        if matches!(self.peek_text(), Some("?") | Some("!")) {
            self.advance();
        }
        self.skip_parameter_list()?;
        self.skip_to_body_or_end();
        let body = self.parse_optional_body()?;
        Ok(FunctionDecl { name: "init".to_string(), line, body })
    }

    fn skip_parameter_list(&mut self) -> Result<(), String> {
        self.expect("(")?;
        let mut depth = 1;
        while depth > 0 {
            match self.advance() {
                Some(t) if t.text == "(" => depth += 1,
                Some(t) if t.text == ")" => depth -= 1,
                Some(_) => {}
                None => return Err("unterminated parameter list".to_string()),
            }
        }
        Ok(())
    }

    /// Skips a return-type/`throws`/`async` tail up to the next `{` or `;`.
    fn skip_to_body_or_end(&mut self) {
        while let Some(text) = self.peek_text() {
            if text == "{" || text == ";" {
                break;
            }
            self.advance();
        }
    }

    fn parse_optional_body(&mut self) -> Result<Option<ExprNode>, String> {
        match self.peek_text() {
            Some("{") => Ok(Some(self.parse_block()?)),
            Some(";") => {
                self.advance();
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    /// Parses a brace-delimited block into a [`ExprNode::Sequence`] of
    /// every condition expression reachable inside it, recursing into
    /// nested blocks so a decision nested several levels deep is still
    /// found.
    fn parse_block(&mut self) -> Result<ExprNode, String> {
        self.expect("{")?;
        let mut items = Vec::new();
        while !matches!(self.peek_text(), Some("}") | None) {
            match self.peek_text() {
                Some("if") => items.push(self.parse_if()?),
                Some("while") => items.push(self.parse_while()?),
                Some("guard") => items.push(self.parse_guard()?),
                Some("{") => items.push(self.parse_block()?),
                _ => {
                    self.advance();
                }
            }
        }
        self.expect("}")?;
        Ok(ExprNode::Sequence(items))
    }

    fn parse_if(&mut self) -> Result<ExprNode, String> {
        self.expect("if")?;
        let cond = self.parse_expr_until(&["{"])?;
        let block = self.parse_block()?;
        let mut items = vec![cond, block];
        if self.peek_text() == Some("else") {
            self.advance();
            if self.peek_text() == Some("if") {
                items.push(self.parse_if()?);
            } else {
                items.push(self.parse_block()?);
            }
        }
        Ok(ExprNode::Sequence(items))
    }

    fn parse_while(&mut self) -> Result<ExprNode, String> {
        self.expect("while")?;
        let cond = self.parse_expr_until(&["{"])?;
        let block = self.parse_block()?;
        Ok(ExprNode::Sequence(vec![cond, block]))
    }

    fn parse_guard(&mut self) -> Result<ExprNode, String> {
        self.expect("guard")?;
        let cond = self.parse_expr_until(&["else"])?;
        self.expect("else")?;
        let block = self.parse_block()?;
        Ok(ExprNode::Sequence(vec![cond, block]))
    }

    fn parse_expr_until(&mut self, stop: &[&'static str]) -> Result<ExprNode, String> {
        let previous = std::mem::replace(&mut self.stop, stop.to_vec());
        let result = self.parse_expr();
        self.stop = previous;
        result
    }

    /// `expr := or_expr ('?' expr ':' expr)?` — ternary binds loosest, as
    /// in the languages this subset is modeled on.
    fn parse_expr(&mut self) -> Result<ExprNode, String> {
        let cond = self.parse_or()?;
        if self.peek_text() == Some("?") {
            self.advance();
            let then_branch = self.parse_expr()?;
            self.expect(":")?;
            let else_branch = self.parse_expr()?;
            Ok(ExprNode::Ternary {
                cond: Box::new(cond),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            })
        } else {
            Ok(cond)
        }
    }

    fn parse_or(&mut self) -> Result<ExprNode, String> {
        let mut lhs = self.parse_and()?;
        while self.peek_text() == Some("||") {
            self.advance();
            let rhs = self.parse_and()?;
            lhs = ExprNode::Infix { op: "||", lhs: Box::new(lhs), rhs: Box::new(rhs) };
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<ExprNode, String> {
        let mut lhs = self.parse_unary()?;
        while self.peek_text() == Some("&&") {
            self.advance();
            let rhs = self.parse_unary()?;
            lhs = ExprNode::Infix { op: "&&", lhs: Box::new(lhs), rhs: Box::new(rhs) };
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<ExprNode, String> {
        if self.peek_text() == Some("!") {
            self.advance();
            let operand = self.parse_unary()?;
            Ok(ExprNode::Prefix { op: "!", operand: Box::new(operand) })
        } else {
            self.parse_primary()
        }
    }

    /// Tries to read a leading `(` as a genuine boolean grouping: if what
    /// follows its matching `)` is a connective or a stop token, it is one
    /// and we recurse to find `&&`/`||`/`?:` structure inside it. Otherwise
    /// it's parenthesized non-boolean syntax (a call, a cast, ...) and the
    /// whole thing — parens included — is reparsed as one opaque atom.
    fn parse_primary(&mut self) -> Result<ExprNode, String> {
        if self.peek_text() == Some("(") {
            let save = self.pos;
            self.advance();
            if let Ok(inner) = self.parse_expr() {
                if self.peek_text() == Some(")") {
                    self.advance();
                    if self.at_group_boundary() {
                        return Ok(ExprNode::Paren(Box::new(inner)));
                    }
                }
            }
            self.pos = save;
        }
        self.parse_atom()
    }

    fn at_group_boundary(&self) -> bool {
        match self.peek_text() {
            None => true,
            Some("&&") | Some("||") | Some("?") | Some(":") => true,
            Some(t) => self.stop.iter().any(|s| *s == t),
        }
    }

    /// Consumes a depth-aware run of tokens as one opaque leaf: `&&`,
    /// `||`, `?`, `:`, and the caller's stop tokens only terminate it at
    /// paren depth zero, so a function call or a comparison wrapped in
    /// parens stays a single atom.
    fn parse_atom(&mut self) -> Result<ExprNode, String> {
        let start = self.pos;
        let mut depth: i32 = 0;
        let mut parts = Vec::new();

        loop {
            match self.peek_text() {
                None => break,
                Some(")") if depth == 0 => break,
                Some(t) if depth == 0 && matches!(t, "&&" | "||" | "?" | ":") => break,
                Some(t) if depth == 0 && self.stop.iter().any(|s| *s == t) => break,
                Some(t) => {
                    if t == "(" {
                        depth += 1;
                    } else if t == ")" {
                        depth -= 1;
                    }
                    parts.push(t.to_string());
                    self.advance();
                }
            }
        }

        if parts.is_empty() {
            return Err(format!("expected an expression at token index {start}"));
        }
        Ok(ExprNode::Atom(parts.join(" ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Expr, ExprKind};

    #[test]
    fn parses_func_and_init_with_bodies() {
        let parsed = parse_source_str("func f() { } init(x: Int) { }").unwrap();
        assert_eq!(parsed.functions.len(), 2);
        assert_eq!(parsed.functions[0].name, "f");
        assert_eq!(parsed.functions[1].name, "init");
        assert!(parsed.functions[0].body.is_some());
    }

    #[test]
    fn bodyless_declaration_has_no_body() {
        let parsed = parse_source_str("func f() -> Bool").unwrap();
        assert_eq!(parsed.functions.len(), 1);
        assert!(parsed.functions[0].body.is_none());
    }

    #[test]
    fn failable_initializer_is_recognized() {
        let parsed = parse_source_str("init?(x: Int) { }").unwrap();
        assert_eq!(parsed.functions.len(), 1);
        assert_eq!(parsed.functions[0].name, "init");
    }

    #[test]
    fn if_condition_parses_and_or() {
        let parsed = parse_source_str("func f() { if (b && c) || a { } }").unwrap();
        let body = parsed.functions[0].body.as_ref().unwrap();
        let cond = body.children()[0].children()[0];
        assert_eq!(cond.kind(), ExprKind::Infix);
        assert_eq!(cond.operator(), Some("||"));
    }

    #[test]
    fn ternary_condition_is_isolated() {
        let parsed = parse_source_str("func f() { if (a ? b : c) && d { } }").unwrap();
        let body = parsed.functions[0].body.as_ref().unwrap();
        let decision = body.children()[0].children()[0];
        assert_eq!(decision.operator(), Some("&&"));
        let lhs = decision.children()[0];
        assert_eq!(lhs.kind(), ExprKind::Paren);
        assert_eq!(lhs.children()[0].kind(), ExprKind::Ternary);
    }

    #[test]
    fn comparison_with_parens_is_one_opaque_atom() {
        let parsed = parse_source_str("func f() { if a == (b || c) && b { } }").unwrap();
        let body = parsed.functions[0].body.as_ref().unwrap();
        let decision = body.children()[0].children()[0];
        assert_eq!(decision.operator(), Some("&&"));
        let lhs = decision.children()[0];
        assert_eq!(lhs.kind(), ExprKind::Other);
        assert_eq!(lhs.text(), "a == ( b || c )");
    }

    #[test]
    fn nested_if_inside_if_is_discovered() {
        let parsed = parse_source_str("func f() { if a { if b && c { } } }").unwrap();
        let body = parsed.functions[0].body.as_ref().unwrap();
        let decisions = crate::decision_finder::find_decisions(body);
        assert_eq!(decisions.len(), 1);
        assert_eq!(decisions[0].operator(), Some("&&"));
    }

    #[test]
    fn guard_else_condition_parses() {
        let parsed = parse_source_str("func f() { guard a && b else { } }").unwrap();
        let body = parsed.functions[0].body.as_ref().unwrap();
        let cond = body.children()[0].children()[0];
        assert_eq!(cond.operator(), Some("&&"));
    }
}
