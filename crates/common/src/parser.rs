use crate::ast::{BinaryOp, Call, ChainKind, Expr, Program, Statement, UnaryOp};
use crate::error::TickError;
use crate::lexer::tokenize;
use crate::token::{Token, TokenKind};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn parse(mut self) -> Result<Program, TickError> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }
        Ok(Program { statements })
    }

    fn parse_statement(&mut self) -> Result<Statement, TickError> {
        match self.current().kind {
            TokenKind::Var => self.parse_declaration(),
            TokenKind::Dbrp => self.parse_dbrp(),
            _ => Ok(Statement::Expression(self.parse_expr(0)?)),
        }
    }

    fn parse_declaration(&mut self) -> Result<Statement, TickError> {
        let span = self.current().span;
        self.advance();
        let name = self.expect_identifier()?;
        if let TokenKind::Ident(type_name) = &self.current().kind {
            let type_name = type_name.clone();
            self.advance();
            return Ok(Statement::TypeDeclaration {
                span,
                name,
                type_name,
            });
        }
        self.expect(TokenKind::Assign)?;
        let expr = self.parse_expr(0)?;
        Ok(Statement::Declaration { span, name, expr })
    }

    fn parse_dbrp(&mut self) -> Result<Statement, TickError> {
        let span = self.current().span;
        self.advance();
        let database = self.expect_reference()?;
        self.expect(TokenKind::Dot)?;
        let retention_policy = self.expect_reference()?;
        Ok(Statement::Dbrp {
            span,
            database,
            retention_policy,
        })
    }

    fn parse_expr(&mut self, min_precedence: u8) -> Result<Expr, TickError> {
        let mut lhs = self.parse_unary()?;
        while let Some(op) = binary_op(&self.current().kind) {
            if op.precedence() < min_precedence {
                break;
            }
            self.advance();
            let rhs = self.parse_expr(op.precedence() + 1)?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr, TickError> {
        let op = match self.current().kind {
            TokenKind::Not => UnaryOp::Not,
            TokenKind::Minus => UnaryOp::Neg,
            _ => return self.parse_postfix(),
        };
        self.advance();
        let operand = self.parse_unary()?;
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    fn parse_postfix(&mut self) -> Result<Expr, TickError> {
        let mut expr = self.parse_primary()?;
        loop {
            let kind = match self.current().kind {
                TokenKind::Pipe => ChainKind::Pipe,
                TokenKind::Dot => ChainKind::Dot,
                TokenKind::At => ChainKind::At,
                _ => return Ok(expr),
            };
            self.advance();
            let span = self.current().span;
            let name = self.expect_identifier()?;
            let args = self.parse_args()?;
            expr = Expr::Chain {
                source: Box::new(expr),
                kind,
                call: Call { span, name, args },
            };
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, TickError> {
        let token = self.current().clone();
        let expr = match token.kind {
            TokenKind::Number(n) => Expr::Number(n),
            TokenKind::Duration(d) => Expr::Duration(d),
            TokenKind::Str { value, triple } => Expr::Str { value, triple },
            TokenKind::True => Expr::Bool(true),
            TokenKind::False => Expr::Bool(false),
            TokenKind::Regex(r) => Expr::Regex(r),
            TokenKind::Reference(r) => Expr::Reference(r),
            TokenKind::Star => Expr::Star,
            TokenKind::LBracket => return self.parse_list(),
            TokenKind::Lambda => {
                self.advance();
                let body = self.parse_expr(0)?;
                return Ok(Expr::Lambda(Box::new(body)));
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr(0)?;
                self.expect(TokenKind::RParen)?;
                return Ok(Expr::Paren(Box::new(inner)));
            }
            TokenKind::Ident(name) => {
                self.advance();
                if self.check(&TokenKind::LParen) {
                    let args = self.parse_args()?;
                    return Ok(Expr::Call(Call {
                        span: token.span,
                        name,
                        args,
                    }));
                }
                return Ok(Expr::Ident {
                    span: token.span,
                    name,
                });
            }
            other => return Err(self.error(format!("unexpected {other}, expected an expression"))),
        };
        self.advance();
        Ok(expr)
    }

    fn parse_list(&mut self) -> Result<Expr, TickError> {
        self.expect(TokenKind::LBracket)?;
        let mut items = Vec::new();
        while !self.check(&TokenKind::RBracket) {
            items.push(self.parse_expr(0)?);
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        self.expect(TokenKind::RBracket)?;
        Ok(Expr::List(items))
    }

    fn parse_args(&mut self) -> Result<Vec<Expr>, TickError> {
        self.expect(TokenKind::LParen)?;
        let mut args = Vec::new();
        if self.check(&TokenKind::RParen) {
            self.advance();
            return Ok(args);
        }
        loop {
            args.push(self.parse_expr(0)?);
            if self.check(&TokenKind::Comma) {
                self.advance();
                continue;
            }
            self.expect(TokenKind::RParen)?;
            return Ok(args);
        }
    }

    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.current().kind == TokenKind::Eof
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current().kind) == std::mem::discriminant(kind)
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), TickError> {
        if self.check(&kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(format!("unexpected {}, expected {kind}", self.current().kind)))
        }
    }

    fn expect_identifier(&mut self) -> Result<String, TickError> {
        match &self.current().kind {
            TokenKind::Ident(s) => {
                let s = s.clone();
                self.advance();
                Ok(s)
            }
            other => Err(self.error(format!("unexpected {other}, expected identifier"))),
        }
    }

    fn expect_reference(&mut self) -> Result<String, TickError> {
        match &self.current().kind {
            TokenKind::Reference(s) => {
                let s = s.clone();
                self.advance();
                Ok(s)
            }
            other => Err(self.error(format!("unexpected {other}, expected reference"))),
        }
    }

    fn error(&self, message: String) -> TickError {
        TickError::Parse {
            span: self.current().span,
            message,
        }
    }
}

fn binary_op(kind: &TokenKind) -> Option<BinaryOp> {
    Some(match kind {
        TokenKind::Or => BinaryOp::Or,
        TokenKind::And => BinaryOp::And,
        TokenKind::Eq => BinaryOp::Eq,
        TokenKind::NotEq => BinaryOp::NotEq,
        TokenKind::Lt => BinaryOp::Lt,
        TokenKind::LtEq => BinaryOp::LtEq,
        TokenKind::Gt => BinaryOp::Gt,
        TokenKind::GtEq => BinaryOp::GtEq,
        TokenKind::RegexEq => BinaryOp::RegexEq,
        TokenKind::RegexNotEq => BinaryOp::RegexNotEq,
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Percent => BinaryOp::Mod,
        _ => return None,
    })
}

/// Parses a TICKscript program into its syntax tree.
pub fn parse(source: &str) -> Result<Program, TickError> {
    let tokens = tokenize(source)?;
    Parser::new(tokens).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Span;

    fn single_expr(src: &str) -> Expr {
        let program = parse(src).unwrap();
        match program.statements.into_iter().next().unwrap() {
            Statement::Expression(e) => e,
            Statement::Declaration { expr, .. } => expr,
            other => panic!("unexpected statement {other:?}"),
        }
    }

    #[test]
    fn parses_declarations_and_pipelines() {
        let program = parse(
            "var db = 'telegraf'\nvar data = stream\n    |from()\n        .database(db)\n",
        )
        .unwrap();
        assert_eq!(program.statements.len(), 2);
        match &program.statements[1] {
            Statement::Declaration { name, expr, .. } => {
                assert_eq!(name, "data");
                let (head, links) = expr.chain_links();
                assert!(matches!(head, Expr::Ident { name, .. } if name == "stream"));
                assert_eq!(links.len(), 2);
                assert_eq!(links[1].1.name, "database");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn statements_split_without_separators() {
        let program = parse("var a = 1 var b = a trigger|httpOut('output')").unwrap();
        assert_eq!(program.statements.len(), 3);
    }

    #[test]
    fn and_binds_tighter_than_or() {
        let expr = single_expr(r#"lambda: "a" == 1 OR "b" == 2 AND "c" == 3"#);
        let Expr::Lambda(body) = expr else {
            panic!("expected lambda")
        };
        match *body {
            Expr::Binary { op, rhs, .. } => {
                assert_eq!(op, BinaryOp::Or);
                assert!(matches!(*rhs, Expr::Binary { op: BinaryOp::And, .. }));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn parens_are_kept() {
        let expr = single_expr(r#"lambda: ("cpu" == 'cpu_total') AND isPresent("usage")"#);
        let Expr::Lambda(body) = expr else {
            panic!("expected lambda")
        };
        let Expr::Binary { lhs, rhs, .. } = *body else {
            panic!("expected binary")
        };
        assert!(matches!(*lhs, Expr::Paren(_)));
        assert!(matches!(*rhs, Expr::Call(Call { ref name, .. }) if name == "isPresent"));
    }

    #[test]
    fn string_concatenation_in_declaration() {
        let expr = single_expr("var idVar = name + ':{{.Group}}'");
        assert!(matches!(expr, Expr::Binary { op: BinaryOp::Add, .. }));
    }

    #[test]
    fn typed_declaration_and_dbrp() {
        let program = parse("dbrp \"telegraf\".\"autogen\"\nvar crit float").unwrap();
        assert!(matches!(
            &program.statements[0],
            Statement::Dbrp { database, retention_policy, .. }
                if database == "telegraf" && retention_policy == "autogen"
        ));
        assert!(matches!(
            &program.statements[1],
            Statement::TypeDeclaration { type_name, .. } if type_name == "float"
        ));
    }

    #[test]
    fn lists_and_star() {
        assert_eq!(
            single_expr("var groupBy = ['host', 'cpu']"),
            Expr::List(vec![
                Expr::Str { value: "host".into(), triple: false },
                Expr::Str { value: "cpu".into(), triple: false },
            ])
        );
        let expr = single_expr("stream|from().groupBy(*)");
        let (_, links) = expr.chain_links();
        assert_eq!(links[1].1.args, vec![Expr::Star]);
    }

    #[test]
    fn missing_paren_is_a_parse_error() {
        let err = parse("stream|from(").unwrap_err();
        assert!(matches!(err, TickError::Parse { .. }));
        assert!(err.to_string().contains("expected an expression"));
    }

    #[test]
    fn chain_requires_call() {
        let err = parse("alert().slack").unwrap_err();
        assert!(err.to_string().contains("expected ("));
    }

    #[test]
    fn unclosed_list_reports_position() {
        let err = parse("var x = ['a', 'b'").unwrap_err();
        assert_eq!(err.span(), Span::new(1, 18));
    }
}
